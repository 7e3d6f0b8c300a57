pub mod check;
pub mod fmt;
pub mod matching;
pub mod shares;
