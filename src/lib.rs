//! An ordered set of unique keys based on an AVL tree.
//!
//! Nodes live in an arena and keep a link to their parent, so an insertion rebalances by walking
//! up from the new leaf, adjusting balance factors until the subtree stops growing or a single or
//! double rotation absorbs the growth. [`Set::verify`] rechecks every structural invariant from
//! scratch.
//!
//! ```
//! let mut set = avl::Set::new();
//!
//! for key in [30, 10, 20] { set.insert(key).unwrap(); }
//!
//! assert!(set.insert(20).is_err());
//! assert!(set.contains(&10));
//! assert!(!set.contains(&15));
//! assert_eq!(set.fixups().left_right(), 1);
//! assert_eq!(set.verify(), Ok(()));
//! ```

#![warn(missing_docs)]

mod balance;
mod error;
mod node;
#[cfg(feature = "quickcheck")] mod quickcheck;
pub mod set;
mod verify;

pub use balance::{Fixup, FixupCounts};
pub use error::{DuplicateKey, Violation};
pub use set::Set;
