use avl::{DuplicateKey, Fixup, Set};
use compare::{Compare, natural};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeSet;

/// The worst-case height of an AVL tree holding `len` keys.
fn height_bound(len: usize) -> usize {
    (1.4405 * ((len + 2) as f64).log2()).ceil() as usize
}

#[quickcheck]
fn arbitrary_sets_are_valid(set: Set<i32>) -> bool {
    set.verify().is_ok()
}

#[quickcheck]
fn in_order_is_strictly_increasing(keys: Vec<i32>) -> bool {
    let set: Set<i32> = keys.iter().cloned().collect();
    let expected: BTreeSet<i32> = keys.into_iter().collect();

    format!("{:?}", set) == format!("{:?}", expected)
}

#[quickcheck]
fn contains_exactly_the_inserted_keys(keys: Vec<i16>, probes: Vec<i16>) -> bool {
    let mut set = Set::new();
    let mut inserted = BTreeSet::new();

    for key in keys {
        assert_eq!(set.insert(key).is_ok(), inserted.insert(key));
    }

    set.len() == inserted.len() &&
        inserted.iter().all(|key| set.contains(key)) &&
        probes.iter().all(|key| set.contains(key) == inserted.contains(key))
}

#[quickcheck]
fn duplicates_are_rejected(keys: Vec<i8>, index: usize) -> TestResult {
    if keys.is_empty() { return TestResult::discard(); }

    let key = keys[index % keys.len()];
    let set: Set<i8> = keys.into_iter().collect();
    let mut copy = set.clone();
    TestResult::from_bool(
        copy.insert(key) == Err(DuplicateKey(key)) &&
        copy == set &&
        copy.len() == set.len() &&
        copy.height() == set.height() &&
        copy.fixups() == set.fixups()
    )
}

#[quickcheck]
fn height_is_logarithmic(keys: Vec<u32>) -> bool {
    let set: Set<u32> = keys.into_iter().collect();
    set.height() <= height_bound(set.len())
}

#[quickcheck]
fn reversed_order_is_valid(keys: Vec<i32>) -> bool {
    let mut set = Set::with_cmp(natural().rev());
    for key in keys { let _ = set.insert(key); }

    set.verify().is_ok() && set.cmp().compares_gt(&1, &2)
}

#[test]
fn duplicate_leaves_single_node() {
    let mut set = Set::new();

    assert_eq!(set.insert(5), Ok(()));
    assert_eq!(set.insert(5), Err(DuplicateKey(5)));
    assert_eq!(set.len(), 1);
    assert_eq!(format!("{:?}", set), "{5}");
    assert_eq!(set.verify(), Ok(()));
}

#[test]
fn ascending_keys_stay_balanced() {
    let mut set = Set::new();

    for key in 0..1024 {
        set.insert(key).unwrap();
        assert_eq!(set.verify(), Ok(()));
    }

    assert_eq!(set.height(), 11);
    assert_eq!(set.fixups().total(), set.fixups().right_right());
}

#[test]
fn shuffled_keys_trigger_every_fixup() {
    let mut keys: Vec<i32> = (1..=1000).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(20200705));

    let mut set = Set::new();
    for key in keys { set.insert(key).unwrap(); }

    for &fixup in &[Fixup::LeftLeft, Fixup::LeftRight, Fixup::RightRight, Fixup::RightLeft] {
        assert!(set.fixups().get(fixup) > 0, "no {} fixup", fixup);
    }

    assert_eq!(set.len(), 1000);
    assert!(set.height() <= height_bound(1000));
    assert!((1..=1000).all(|key| set.contains(&key)));
    assert!(!set.contains(&0) && !set.contains(&1001));
    assert_eq!(set.verify(), Ok(()));
}

#[test]
fn error_messages() {
    let mut set = Set::new();
    set.insert(7).unwrap();

    let err = set.insert(7).unwrap_err();
    assert_eq!(err.to_string(), "key 7 is already present");
    assert_eq!(err.into_key(), 7);
}
