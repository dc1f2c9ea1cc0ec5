//! AVL imbalance classification and rebalancing bookkeeping.

use std::fmt;

/// One of the four ways an insertion can push a node's balance factor to ±2.
///
/// The first half of the name is the heavy side of the unbalanced node, the second half the heavy
/// side of its child on that side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fixup {
    /// Left-heavy node with a left-heavy left child; fixed by a single right rotation.
    LeftLeft,
    /// Left-heavy node with a right-heavy left child; fixed by a left rotation of the child
    /// followed by a right rotation of the node.
    LeftRight,
    /// Right-heavy node with a right-heavy right child; fixed by a single left rotation.
    RightRight,
    /// Right-heavy node with a left-heavy right child; fixed by a right rotation of the child
    /// followed by a left rotation of the node.
    RightLeft,
}

impl Fixup {
    /// Classifies the imbalance at a node whose balance factor just became `balance`, given the
    /// balance factor of the child the walk came up from.
    ///
    /// Returns `None` if `balance` is still within `-1..=1`.
    pub fn classify(balance: i8, child: i8) -> Option<Fixup> {
        match balance {
            2 if child == 1 => Some(Fixup::LeftLeft),
            2 => Some(Fixup::LeftRight),
            -2 if child == -1 => Some(Fixup::RightRight),
            -2 => Some(Fixup::RightLeft),
            _ => None,
        }
    }

    /// Checks if this fixup needs two rotations.
    pub fn is_double(self) -> bool {
        matches!(self, Fixup::LeftRight | Fixup::RightLeft)
    }
}

impl fmt::Display for Fixup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Fixup::LeftLeft => "left-left",
            Fixup::LeftRight => "left-right",
            Fixup::RightRight => "right-right",
            Fixup::RightLeft => "right-left",
        })
    }
}

/// Computes the balance factors of the unbalanced node and of its child after a double rotation.
///
/// `heavy` is the balance factor sign of the node's heavy side (`1` for left, `-1` for right) and
/// `grandchild` is the balance factor the grandchild had before rotating. The grandchild itself
/// always ends up with a balance factor of zero.
pub fn after_double_rotation(heavy: i8, grandchild: i8) -> (i8, i8) {
    if grandchild == heavy {
        (-heavy, 0)
    } else if grandchild == -heavy {
        (0, heavy)
    } else {
        (0, 0)
    }
}

/// Counts of the fixups applied to a tree since it was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixupCounts {
    left_left: usize,
    left_right: usize,
    right_right: usize,
    right_left: usize,
}

impl FixupCounts {
    /// Records one application of `fixup`.
    pub fn record(&mut self, fixup: Fixup) {
        match fixup {
            Fixup::LeftLeft => self.left_left += 1,
            Fixup::LeftRight => self.left_right += 1,
            Fixup::RightRight => self.right_right += 1,
            Fixup::RightLeft => self.right_left += 1,
        }
    }

    /// Returns the number of times `fixup` was applied.
    pub fn get(&self, fixup: Fixup) -> usize {
        match fixup {
            Fixup::LeftLeft => self.left_left,
            Fixup::LeftRight => self.left_right,
            Fixup::RightRight => self.right_right,
            Fixup::RightLeft => self.right_left,
        }
    }

    /// Returns the number of single right rotations applied to left-left imbalances.
    pub fn left_left(&self) -> usize { self.left_left }

    /// Returns the number of double rotations applied to left-right imbalances.
    pub fn left_right(&self) -> usize { self.left_right }

    /// Returns the number of single left rotations applied to right-right imbalances.
    pub fn right_right(&self) -> usize { self.right_right }

    /// Returns the number of double rotations applied to right-left imbalances.
    pub fn right_left(&self) -> usize { self.right_left }

    /// Returns the total number of fixups applied.
    pub fn total(&self) -> usize {
        self.left_left + self.left_right + self.right_right + self.right_left
    }
}

impl fmt::Display for FixupCounts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LL={} LR={} RR={} RL={}",
               self.left_left, self.left_right, self.right_right, self.right_left)
    }
}

#[cfg(test)]
mod test {
    use super::{Fixup, FixupCounts, after_double_rotation};

    #[test]
    fn classify_in_range() {
        for &balance in &[-1, 0, 1] {
            for &child in &[-1, 0, 1] {
                assert_eq!(Fixup::classify(balance, child), None);
            }
        }
    }

    #[test]
    fn classify_out_of_range() {
        assert_eq!(Fixup::classify(2, 1), Some(Fixup::LeftLeft));
        assert_eq!(Fixup::classify(2, -1), Some(Fixup::LeftRight));
        assert_eq!(Fixup::classify(-2, -1), Some(Fixup::RightRight));
        assert_eq!(Fixup::classify(-2, 1), Some(Fixup::RightLeft));
        assert!(!Fixup::LeftLeft.is_double());
        assert!(Fixup::RightLeft.is_double());
    }

    #[test]
    fn double_rotation_table() {
        // left-right: (node, left child)
        assert_eq!(after_double_rotation(1, 1), (-1, 0));
        assert_eq!(after_double_rotation(1, -1), (0, 1));
        assert_eq!(after_double_rotation(1, 0), (0, 0));

        // right-left: (node, right child)
        assert_eq!(after_double_rotation(-1, -1), (1, 0));
        assert_eq!(after_double_rotation(-1, 1), (0, -1));
        assert_eq!(after_double_rotation(-1, 0), (0, 0));
    }

    #[test]
    fn counts() {
        let mut counts = FixupCounts::default();
        counts.record(Fixup::LeftLeft);
        counts.record(Fixup::RightLeft);
        counts.record(Fixup::RightLeft);

        assert_eq!(counts.left_left(), 1);
        assert_eq!(counts.left_right(), 0);
        assert_eq!(counts.get(Fixup::RightLeft), 2);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.to_string(), "LL=1 LR=0 RR=0 RL=2");
    }
}
