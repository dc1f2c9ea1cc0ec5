//! Independent checks of a tree's structural invariants.
//!
//! Nothing here trusts the stored balance factors except to compare them against values recomputed
//! from the shape of the tree.

use compare::Compare;
use index_vec::IndexVec;
use log::debug;
use std::cmp::Ordering::Equal;
use super::error::Violation;
use super::node::{NodeId, Tree};

/// Runs every check in turn, stopping at the first violation.
pub fn verify<T, C>(tree: &Tree<T>, cmp: &C) -> Result<(), Violation<T>>
    where T: Clone, C: Compare<T> {

    check_order(tree, cmp)?;
    debug!("in-order traversal is sorted");

    check_balance_factors(tree)?;
    debug!("balance factors match subtree heights");

    check_balance_range(tree)?;
    debug!("balance factors are within -1..=1");

    check_parents(tree)?;
    debug!("parent links are consistent");

    Ok(())
}

/// Sorts a copy of the in-order key sequence and compares it against the original.
pub fn check_order<T, C>(tree: &Tree<T>, cmp: &C) -> Result<(), Violation<T>>
    where T: Clone, C: Compare<T> {

    let keys: Vec<&T> = tree.in_order().into_iter().map(|id| tree.node(id).key()).collect();
    let mut sorted = keys.clone();
    sorted.sort_by(|a, b| cmp.compare(*a, *b));

    // The sort is stable, so an already sorted sequence keeps every key in place.
    if let Some(i) = (0..keys.len()).find(|&i| !std::ptr::eq(keys[i], sorted[i])) {
        return Err(Violation::Order { key: keys[i].clone() });
    }

    match keys.windows(2).find(|pair| cmp.compare(pair[0], pair[1]) == Equal) {
        Some(pair) => Err(Violation::Order { key: pair[1].clone() }),
        None => Ok(()),
    }
}

/// Computes the height of every node's subtree, an empty subtree having height zero.
pub fn heights<T>(tree: &Tree<T>) -> IndexVec<NodeId, usize> {
    let mut heights = IndexVec::from_vec(vec![0; tree.len()]);

    // Reversed pre-order visits children before their parent.
    for id in tree.pre_order().into_iter().rev() {
        let node = tree.node(id);
        let left = node.left().map_or(0, |child| heights[child]);
        let right = node.right().map_or(0, |child| heights[child]);
        heights[id] = 1 + left.max(right);
    }

    heights
}

pub fn check_balance_factors<T>(tree: &Tree<T>) -> Result<(), Violation<T>> where T: Clone {
    let heights = heights(tree);
    let height = |link: Option<NodeId>| link.map_or(0, |id| heights[id]) as isize;

    for id in tree.pre_order() {
        let node = tree.node(id);
        let actual = height(node.left()) - height(node.right());

        if actual != node.balance() as isize {
            return Err(Violation::BalanceFactorMismatch {
                key: node.key().clone(),
                stored: node.balance(),
                actual,
            });
        }
    }

    Ok(())
}

pub fn check_balance_range<T>(tree: &Tree<T>) -> Result<(), Violation<T>> where T: Clone {
    for id in tree.pre_order() {
        let node = tree.node(id);
        if !(-1..=1).contains(&node.balance()) {
            return Err(Violation::BalanceOutOfRange {
                key: node.key().clone(),
                balance: node.balance(),
            });
        }
    }

    Ok(())
}

pub fn check_parents<T>(tree: &Tree<T>) -> Result<(), Violation<T>> where T: Clone {
    if let Some(root) = tree.root() {
        let node = tree.node(root);
        if node.parent().is_some() {
            return Err(Violation::ParentMismatch { key: node.key().clone() });
        }
    }

    for id in tree.pre_order() {
        let node = tree.node(id);
        for child in node.left().into_iter().chain(node.right()) {
            let child = tree.node(child);
            if child.parent() != Some(id) {
                return Err(Violation::ParentMismatch { key: child.key().clone() });
            }
        }
    }

    Ok(())
}
