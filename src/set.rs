//! An ordered set based on an AVL tree.

use compare::{Compare, Natural};
use log::trace;
use std::cmp::Ordering::Equal;
use std::fmt::{self, Debug};
use std::iter;
use super::balance::FixupCounts;
use super::error::{DuplicateKey, Violation};
use super::node::Tree;
use super::verify;

/// An ordered set based on an AVL tree.
///
/// Keys are unique: inserting a key that is already present is an error that leaves the set
/// untouched. Every node records its parent, so an insertion rebalances by walking up from the new
/// leaf rather than unwinding a recursive descent, and applies at most one single or double
/// rotation.
///
/// The behavior of this set is undefined if a key's ordering relative to any other key changes
/// while the key is in the set. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct Set<T, C = Natural<T>> where C: Compare<T> {
    tree: Tree<T>,
    cmp: C,
    fixups: FixupCounts,
}

impl<T> Set<T> where T: Ord {
    /// Creates an empty set ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    ///
    /// set.insert(2).unwrap();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    ///
    /// assert_eq!(format!("{:?}", set), "{1, 2, 3}");
    /// ```
    pub fn new() -> Self { Set::with_cmp(compare::natural()) }
}

impl<T, C> Set<T, C> where C: Compare<T> {
    /// Creates an empty set ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut set = avl::Set::with_cmp(natural().rev());
    ///
    /// set.insert(2).unwrap();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    ///
    /// assert_eq!(format!("{:?}", set), "{3, 2, 1}");
    /// assert!(set.verify().is_ok());
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        Set { tree: Tree::new(), cmp, fixups: FixupCounts::default() }
    }

    /// Checks if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    /// assert!(set.is_empty());
    ///
    /// set.insert(2).unwrap();
    /// assert!(!set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.tree.root().is_none() }

    /// Returns the number of keys in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    /// assert_eq!(set.len(), 0);
    ///
    /// set.insert(2).unwrap();
    /// assert_eq!(set.len(), 1);
    ///
    /// assert!(set.insert(2).is_err());
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.tree.len() }

    /// Returns a reference to the set's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Returns the height of the set's tree, zero for an empty set.
    ///
    /// The height is read off the balance factors along a single root-to-leaf path, so this takes
    /// logarithmic time.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    /// assert_eq!(set.height(), 0);
    ///
    /// for key in 1..8 { set.insert(key).unwrap(); }
    /// assert_eq!(set.height(), 3);
    /// ```
    pub fn height(&self) -> usize { self.tree.height() }

    /// Returns the number of rebalancing fixups applied so far, by case.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    ///
    /// set.insert(10).unwrap();
    /// set.insert(20).unwrap();
    /// set.insert(30).unwrap();
    ///
    /// assert_eq!(set.fixups().right_right(), 1);
    /// assert_eq!(set.fixups().total(), 1);
    /// ```
    pub fn fixups(&self) -> &FixupCounts { &self.fixups }

    /// Removes all keys from the set.
    ///
    /// The fixup counts are kept.
    pub fn clear(&mut self) { self.tree.clear(); }

    /// Inserts a key into the set.
    ///
    /// If the set already contains an equal key, the given key is returned inside the error and
    /// the set is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::DuplicateKey;
    ///
    /// let mut set = avl::Set::new();
    /// assert_eq!(set.insert(5), Ok(()));
    /// assert_eq!(set.insert(5), Err(DuplicateKey(5)));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> Result<(), DuplicateKey<T>> {
        match self.tree.insert(&self.cmp, key) {
            Err(key) => Err(DuplicateKey(key)),
            Ok(None) => Ok(()),
            Ok(Some(fixup)) => {
                self.fixups.record(fixup);
                trace!("{} fixups so far ({})", self.fixups.total(), self.fixups);
                Ok(())
            }
        }
    }

    /// Checks if the set contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    /// assert!(!set.contains(&1));
    /// set.insert(1).unwrap();
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, T> {
        self.tree.find(&self.cmp, key).is_some()
    }

    /// Checks the set's structural invariants, returning the first violation found.
    ///
    /// The checks are, in order: the in-order key sequence is strictly increasing, every stored
    /// balance factor equals the difference between its subtrees' recomputed heights, every
    /// balance factor lies within `-1..=1`, and every parent link points back at the node holding
    /// it.
    ///
    /// This walks the whole tree several times and is meant for tests and debugging.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    /// for key in (0..100).rev() { set.insert(key).unwrap(); }
    /// assert_eq!(set.verify(), Ok(()));
    /// ```
    pub fn verify(&self) -> Result<(), Violation<T>> where T: Clone {
        verify::verify(&self.tree, &self.cmp)
    }

    fn keys(&self) -> impl Iterator<Item = &T> + '_ {
        self.tree.in_order().into_iter().map(move |id| self.tree.node(id).key())
    }

    #[cfg(feature = "quickcheck")]
    pub(crate) fn to_vec(&self) -> Vec<T> where T: Clone { self.keys().cloned().collect() }
}

impl<T, C> Debug for Set<T, C> where T: Debug, C: Compare<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

impl<T, C> Default for Set<T, C> where C: Compare<T> + Default {
    fn default() -> Self { Set::with_cmp(C::default()) }
}

impl<T, C> Extend<T> for Set<T, C> where C: Compare<T> {
    /// Inserts every key, skipping duplicates.
    fn extend<I: IntoIterator<Item=T>>(&mut self, it: I) {
        for key in it { let _ = self.insert(key); }
    }
}

impl<T, C> iter::FromIterator<T> for Set<T, C> where C: Compare<T> + Default {
    fn from_iter<I: IntoIterator<Item=T>>(it: I) -> Self {
        let mut set = Set::default();
        set.extend(it);
        set
    }
}

impl<T, C> PartialEq for Set<T, C> where C: Compare<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() &&
            self.keys().zip(other.keys()).all(|(a, b)| self.cmp.compare(a, b) == Equal)
    }
}

impl<T, C> Eq for Set<T, C> where C: Compare<T> {}

#[cfg(test)]
mod test {
    use super::Set;

    #[test]
    fn equality_ignores_shape() {
        let a: Set<i32> = vec![1, 2, 3, 4, 5].into_iter().collect();
        let b: Set<i32> = vec![5, 4, 3, 2, 1].into_iter().collect();
        let c: Set<i32> = vec![1, 2, 3, 4].into_iter().collect();

        assert_eq!(a, b);
        assert!(a != c);
    }

    #[test]
    fn extend_skips_duplicates() {
        let mut set = Set::new();
        set.extend(vec![3, 1, 3, 2, 1]);

        assert_eq!(set.len(), 3);
        assert_eq!(format!("{:?}", set), "{1, 2, 3}");
        assert_eq!(set.verify(), Ok(()));
    }

    #[test]
    fn clear() {
        let mut set: Set<i32> = (0..10).collect();
        assert_eq!(set.fixups().total(), 6);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.height(), 0);
        assert!(!set.contains(&3));

        set.insert(3).unwrap();
        assert!(set.contains(&3));
        assert_eq!(set.verify(), Ok(()));
    }
}
