//! 下标重映射
//!
//! 序列发生插入、删除或移动之后，所有指向该序列的下标都要经过这里换算。
//! 依赖关系和样例引用都只通过本模块更新，不在调用处各自推导。

/// 作用在一个序列上的结构变更
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMutation {
    /// 在 `k` 处插入一个元素
    Insert(usize),
    /// 删除 `k` 处的元素
    Delete(usize),
    /// 把 `from` 处的元素移到 `to`
    Move { from: usize, to: usize },
}

/// 上移 / 下移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl IndexMutation {
    /// 与相邻元素交换，越界时返回 `None`
    pub fn step(at: usize, direction: Direction, len: usize) -> Option<Self> {
        let to = match direction {
            Direction::Up => at.checked_sub(1)?,
            Direction::Down => at.checked_add(1)?,
        };
        (at < len && to < len).then_some(IndexMutation::Move { from: at, to })
    }

    /// 换算旧下标，`None` 表示被引用的元素已删除
    pub fn apply(self, i: usize) -> Option<usize> {
        match self {
            IndexMutation::Insert(k) => Some(if i < k { i } else { i + 1 }),
            IndexMutation::Delete(k) => match i.cmp(&k) {
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(i - 1),
                std::cmp::Ordering::Less => Some(i),
            },
            IndexMutation::Move { from, to } => Some(if i == from {
                to
            } else if from < to && i > from && i <= to {
                i - 1
            } else if to < from && i >= to && i < from {
                i + 1
            } else {
                i
            }),
        }
    }

    /// 对序列本身执行变更，插入时放入 `inserted`
    ///
    /// 调用方需保证下标合法。
    pub fn apply_to_vec<T>(self, items: &mut Vec<T>, inserted: Option<T>) {
        match self {
            IndexMutation::Insert(k) => {
                if let Some(item) = inserted {
                    items.insert(k, item);
                }
            }
            IndexMutation::Delete(k) => {
                items.remove(k);
            }
            IndexMutation::Move { from, to } => {
                let item = items.remove(from);
                items.insert(to, item);
            }
        }
    }
}

/// 换算一组下标，丢弃指向已删除元素的引用，保持原有顺序
pub fn remap_indices(indices: &[usize], mutation: IndexMutation) -> Vec<usize> {
    indices.iter().filter_map(|&i| mutation.apply(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 用真实序列验证：变更后每个旧元素都能按映射找回
    fn check_against_vec(len: usize, mutation: IndexMutation) {
        let before: Vec<usize> = (0..len).collect();
        let mut after = before.clone();
        mutation.apply_to_vec(&mut after, Some(usize::MAX));
        for (old, value) in before.iter().enumerate() {
            match mutation.apply(old) {
                Some(new) => assert_eq!(after[new], *value, "{mutation:?} at {old}"),
                None => assert!(!after.contains(value), "{mutation:?} at {old}"),
            }
        }
    }

    #[test]
    fn insert_shifts_tail() {
        let m = IndexMutation::Insert(2);
        assert_eq!(m.apply(0), Some(0));
        assert_eq!(m.apply(1), Some(1));
        assert_eq!(m.apply(2), Some(3));
        assert_eq!(m.apply(5), Some(6));
    }

    #[test]
    fn delete_drops_target() {
        let m = IndexMutation::Delete(1);
        assert_eq!(m.apply(0), Some(0));
        assert_eq!(m.apply(1), None);
        assert_eq!(m.apply(2), Some(1));
    }

    #[test]
    fn move_forward_and_backward() {
        let m = IndexMutation::Move { from: 1, to: 3 };
        assert_eq!(
            (0..5).map(|i| m.apply(i)).collect::<Vec<_>>(),
            vec![Some(0), Some(3), Some(1), Some(2), Some(4)]
        );
        let m = IndexMutation::Move { from: 3, to: 1 };
        assert_eq!(
            (0..5).map(|i| m.apply(i)).collect::<Vec<_>>(),
            vec![Some(0), Some(2), Some(3), Some(1), Some(4)]
        );
    }

    #[test]
    fn adjacent_move_is_swap() {
        let m = IndexMutation::step(2, Direction::Up, 4).unwrap();
        assert_eq!(m.apply(2), Some(1));
        assert_eq!(m.apply(1), Some(2));
        assert_eq!(m.apply(0), Some(0));
        assert_eq!(m.apply(3), Some(3));
    }

    #[test]
    fn step_rejects_edges() {
        assert_eq!(IndexMutation::step(0, Direction::Up, 3), None);
        assert_eq!(IndexMutation::step(2, Direction::Down, 3), None);
        assert_eq!(IndexMutation::step(3, Direction::Up, 3), None);
        assert_eq!(IndexMutation::step(usize::MAX, Direction::Down, 3), None);
        assert_eq!(IndexMutation::step(usize::MAX, Direction::Up, 3), None);
    }

    #[test]
    fn mapping_agrees_with_sequence_edits() {
        for len in 1..6 {
            for k in 0..=len {
                check_against_vec(len, IndexMutation::Insert(k));
            }
            for k in 0..len {
                check_against_vec(len, IndexMutation::Delete(k));
            }
            for from in 0..len {
                for to in 0..len {
                    check_against_vec(len, IndexMutation::Move { from, to });
                }
            }
        }
    }

    #[test]
    fn remap_keeps_order_and_drops_deleted() {
        assert_eq!(
            remap_indices(&[3, 1, 2], IndexMutation::Delete(1)),
            vec![2, 1]
        );
    }
}
