//! Errors reported by a set.

use std::error::Error;
use std::fmt::{self, Debug, Display};

/// The error returned when inserting a key that is already in the set.
///
/// The rejected key is handed back; the set is left exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuplicateKey<T>(pub T);

impl<T> DuplicateKey<T> {
    /// Returns the rejected key.
    pub fn into_key(self) -> T { self.0 }
}

impl<T> Display for DuplicateKey<T> where T: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "key {:?} is already present", self.0)
    }
}

impl<T> Error for DuplicateKey<T> where T: Debug {}

/// A broken structural invariant, found by [`Set::verify`](crate::Set::verify).
///
/// Every variant carries the key of the first offending node found. None of these can be produced
/// by a correct insertion sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation<T> {
    /// The in-order key sequence is not strictly increasing under the set's comparator.
    Order {
        /// The first key out of place.
        key: T,
    },
    /// A stored balance factor differs from the recomputed height difference.
    BalanceFactorMismatch {
        /// The key of the node.
        key: T,
        /// The balance factor found in the node.
        stored: i8,
        /// `height(left) - height(right)`, recomputed from scratch.
        actual: isize,
    },
    /// A balance factor lies outside `-1..=1`.
    BalanceOutOfRange {
        /// The key of the node.
        key: T,
        /// The balance factor found in the node.
        balance: i8,
    },
    /// A node's parent link does not point at the node holding it, or the root has a parent.
    ParentMismatch {
        /// The key of the node whose parent link is wrong.
        key: T,
    },
}

impl<T> Violation<T> {
    /// Returns the key of the offending node.
    pub fn key(&self) -> &T {
        match *self {
            Violation::Order { ref key } |
            Violation::BalanceFactorMismatch { ref key, .. } |
            Violation::BalanceOutOfRange { ref key, .. } |
            Violation::ParentMismatch { ref key } => key,
        }
    }
}

impl<T> Display for Violation<T> where T: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Violation::Order { ref key } =>
                write!(f, "in-order traversal is not sorted at key {:?}", key),
            Violation::BalanceFactorMismatch { ref key, stored, actual } =>
                write!(f, "node {:?} stores balance factor {} but its subtrees differ by {}",
                       key, stored, actual),
            Violation::BalanceOutOfRange { ref key, balance } =>
                write!(f, "node {:?} has balance factor {}", key, balance),
            Violation::ParentMismatch { ref key } =>
                write!(f, "node {:?} has an inconsistent parent link", key),
        }
    }
}

impl<T> Error for Violation<T> where T: Debug {}
