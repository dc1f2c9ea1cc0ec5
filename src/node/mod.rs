
use compare::Compare;
use index_vec::IndexVec;
use log::trace;
use std::cmp::Ordering::*;
use super::balance::{self, Fixup};

index_vec::define_index_type! {
    /// The position of a node in its tree's arena.
    pub struct NodeId = u32;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<T> {
    key: T,
    /// `height(left) - height(right)`.
    balance: i8,
    left: Option<NodeId>,
    right: Option<NodeId>,
    /// Navigation only: the parent's child slot is what holds this node in the tree.
    parent: Option<NodeId>,
}

impl<T> Node<T> {
    fn new(key: T, parent: Option<NodeId>) -> Self {
        Node { key, balance: 0, left: None, right: None, parent }
    }

    pub fn key(&self) -> &T { &self.key }
    pub fn balance(&self) -> i8 { self.balance }
    pub fn left(&self) -> Option<NodeId> { self.left }
    pub fn right(&self) -> Option<NodeId> { self.right }
    pub fn parent(&self) -> Option<NodeId> { self.parent }
}

/// An AVL tree whose nodes live in a flat arena.
///
/// Nodes are only ever appended, so `nodes.len()` is the number of keys in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree<T> {
    nodes: IndexVec<NodeId, Node<T>>,
    root: Option<NodeId>,
}

impl<T> Tree<T> {
    pub fn new() -> Self { Tree { nodes: IndexVec::new(), root: None } }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn root(&self) -> Option<NodeId> { self.root }

    pub fn node(&self, id: NodeId) -> &Node<T> { &self.nodes[id] }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the node holding `key`, if any.
    pub fn find<C, Q: ?Sized>(&self, cmp: &C, key: &Q) -> Option<NodeId> where C: Compare<Q, T> {
        let mut link = self.root;

        while let Some(id) = link {
            let node = &self.nodes[id];
            link = match cmp.compare(key, &node.key) {
                Equal => return Some(id),
                Less => node.left,
                Greater => node.right,
            };
        }

        None
    }

    /// Inserts `key`, returning the fixup applied to restore balance, if any.
    ///
    /// If the key is already present, it is handed back and the tree is left untouched.
    pub fn insert<C>(&mut self, cmp: &C, key: T) -> Result<Option<Fixup>, T> where C: Compare<T> {
        let mut parent = match self.root {
            None => {
                self.root = Some(self.nodes.push(Node::new(key, None)));
                return Ok(None);
            }
            Some(root) => root,
        };

        let left = loop {
            let node = &self.nodes[parent];
            let (child, left) = match cmp.compare(&key, &node.key) {
                Equal => return Err(key),
                Less => (node.left, true),
                Greater => (node.right, false),
            };

            match child {
                Some(child) => parent = child,
                None => break left,
            }
        };

        let leaf = self.nodes.push(Node::new(key, Some(parent)));
        let slot = if left {
            Left::child_mut(&mut self.nodes[parent])
        } else {
            Right::child_mut(&mut self.nodes[parent])
        };
        *slot = Some(leaf);

        Ok(self.retrace(parent, leaf))
    }

    // Walk up from a freshly attached leaf, updating balance factors until a subtree's height
    // stops changing or a fixup absorbs the growth.
    fn retrace(&mut self, mut parent: NodeId, mut cur: NodeId) -> Option<Fixup> {
        loop {
            let balance = {
                let node = &mut self.nodes[parent];
                if node.left == Some(cur) { node.balance += 1; } else { node.balance -= 1; }
                node.balance
            };

            if balance == 0 { return None; }

            if let Some(fixup) = Fixup::classify(balance, self.nodes[cur].balance) {
                trace!("{} fixup at node {}", fixup, parent.index());
                match fixup {
                    Fixup::LeftLeft => self.rotate_single::<Left>(parent),
                    Fixup::LeftRight => self.rotate_double::<Left>(parent),
                    Fixup::RightRight => self.rotate_single::<Right>(parent),
                    Fixup::RightLeft => self.rotate_double::<Right>(parent),
                }
                return Some(fixup);
            }

            match self.nodes[parent].parent {
                None => return None,
                Some(up) => {
                    cur = parent;
                    parent = up;
                }
            }
        }
    }

    // `node` is heavy on side `H` and so is its child on that side.
    fn rotate_single<H>(&mut self, node: NodeId) where H: Dir {
        let child = self.pivot::<H>(node);
        self.rotate::<H::Opposite>(node);
        self.nodes[node].balance = 0;
        self.nodes[child].balance = 0;
    }

    // `node` is heavy on side `H`, its child on that side is heavy on the other one.
    fn rotate_double<H>(&mut self, node: NodeId) where H: Dir {
        let child = self.pivot::<H>(node);
        let grandchild = self.pivot::<H::Opposite>(child);
        let (node_balance, child_balance) =
            balance::after_double_rotation(H::HEAVY, self.nodes[grandchild].balance);

        self.rotate::<H>(child);
        self.rotate::<H::Opposite>(node);

        self.nodes[node].balance = node_balance;
        self.nodes[child].balance = child_balance;
        self.nodes[grandchild].balance = 0;
    }

    fn pivot<D>(&self, node: NodeId) -> NodeId where D: Dir {
        match D::child(&self.nodes[node]) {
            Some(child) => child,
            None => panic!("node {} has no {} child to rotate", node.index(), D::NAME),
        }
    }

    /// Rotates `node` down towards `D`: its child on the opposite side takes its place.
    ///
    /// Only links are changed; callers are responsible for the balance factors.
    pub fn rotate<D>(&mut self, node: NodeId) where D: Dir {
        let pivot = self.pivot::<D::Opposite>(node);
        let up = self.nodes[node].parent;
        let inner = D::child(&self.nodes[pivot]);

        self.nodes[pivot].parent = up;
        match up {
            None => self.root = Some(pivot),
            Some(up) => {
                let up = &mut self.nodes[up];
                if up.left == Some(node) { up.left = Some(pivot); } else { up.right = Some(pivot); }
            }
        }

        *D::child_mut(&mut self.nodes[pivot]) = Some(node);
        self.nodes[node].parent = Some(pivot);

        *<D::Opposite as Dir>::child_mut(&mut self.nodes[node]) = inner;
        if let Some(inner) = inner { self.nodes[inner].parent = Some(node); }
    }

    /// Returns the tree's height, following the taller side of each node from the root.
    ///
    /// This trusts the stored balance factors.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut link = self.root;

        while let Some(id) = link {
            let node = &self.nodes[id];
            height += 1;
            link = if node.balance < 0 { node.right } else { node.left };
        }

        height
    }

    /// Returns the nodes in key order.
    pub fn in_order(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![];
        let mut link = self.root;

        loop {
            while let Some(id) = link {
                stack.push(id);
                link = self.nodes[id].left;
            }

            match stack.pop() {
                None => return ids,
                Some(id) => {
                    ids.push(id);
                    link = self.nodes[id].right;
                }
            }
        }
    }

    /// Returns the nodes with every node before its descendants and left subtrees before right
    /// ones.
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();

        while let Some(id) = stack.pop() {
            ids.push(id);
            let node = &self.nodes[id];
            stack.extend(node.right);
            stack.extend(node.left);
        }

        ids
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self { Tree::new() }
}

/// A side of a node.
pub trait Dir: Sized {
    type Opposite: Dir<Opposite=Self>;

    /// The sign a node's balance factor takes when this side is the taller one.
    const HEAVY: i8;

    const NAME: &'static str;

    fn child<T>(node: &Node<T>) -> Option<NodeId>;
    fn child_mut<T>(node: &mut Node<T>) -> &mut Option<NodeId>;
}

#[allow(unused)]
pub enum Left {}

impl Dir for Left {
    type Opposite = Right;

    const HEAVY: i8 = 1;
    const NAME: &'static str = "left";

    fn child<T>(node: &Node<T>) -> Option<NodeId> { node.left }
    fn child_mut<T>(node: &mut Node<T>) -> &mut Option<NodeId> { &mut node.left }
}

#[allow(unused)]
pub enum Right {}

impl Dir for Right {
    type Opposite = Left;

    const HEAVY: i8 = -1;
    const NAME: &'static str = "right";

    fn child<T>(node: &Node<T>) -> Option<NodeId> { node.right }
    fn child_mut<T>(node: &mut Node<T>) -> &mut Option<NodeId> { &mut node.right }
}
