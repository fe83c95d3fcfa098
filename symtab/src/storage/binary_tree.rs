use super::{write_pairs, SymbolTable};
use crate::{Result, SymtabErrorKind};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

/// Unbalanced binary search tree: lesser keys go left, greater keys go right.
///
/// The shape is purely a function of insertion order. Inserting keys in
/// sorted order yields a list-shaped tree, so every walk, including the one
/// performed on drop, is an explicit loop instead of recursion.
///
/// ```
/// use symtab::BinaryTreeStore;
///
/// let mut tree = BinaryTreeStore::new();
/// tree.put(2, "two");
/// tree.put(1, "one");
/// tree.put(3, "three");
///
/// assert_eq!("one", *tree.get(&1).unwrap());
/// assert_eq!(vec![&1, &2, &3], tree.inorder_keys());
/// assert_eq!(2, tree.depth());
/// ```
#[derive(Debug)]
pub struct BinaryTreeStore<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K: Ord, V> BinaryTreeStore<K, V> {
    /// create an empty tree
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// insert the pair, or overwrite the value of an equal key
    pub fn put(&mut self, key: K, value: V) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Equal => {
                    node.value = value;
                    return;
                }
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
            }
        }

        *link = Some(Node::leaf(key, value));
        self.len += 1;
    }

    /// get a view of the value associated with key
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key)
            .map(|node| &node.value)
            .ok_or_else(|| SymtabErrorKind::KeyNotFound.into())
    }

    /// whether an entry with the given key exists
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }
}

impl<K, V> BinaryTreeStore<K, V> {
    /// number of nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// whether the tree is empty
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// number of nodes on the longest root-to-leaf path, 0 for an empty tree
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node<K, V>, usize)> = self.root.iter().map(|n| (&**n, 1)).collect();
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in node.left.iter().chain(node.right.iter()) {
                stack.push((&**child, depth + 1));
            }
        }
        deepest
    }

    /// entries in pre-order: node, left subtree, right subtree
    pub fn preorder(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<K, V>> = self.root.iter().map(|n| &**n).collect();
        while let Some(node) = stack.pop() {
            out.push((&node.key, &node.value));
            // right first so left is visited first
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        out
    }

    /// keys in pre-order
    pub fn preorder_keys(&self) -> Vec<&K> {
        self.preorder().into_iter().map(|(key, _)| key).collect()
    }

    /// keys in in-order, which is ascending
    pub fn inorder_keys(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<K, V>> = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            match stack.pop() {
                Some(node) => {
                    out.push(&node.key);
                    current = node.right.as_deref();
                }
                None => break,
            }
        }
        out
    }

    /// keys in post-order: left subtree, right subtree, node
    pub fn postorder_keys(&self) -> Vec<&K> {
        // reversed (node, right, left) pre-order
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<K, V>> = self.root.iter().map(|n| &**n).collect();
        while let Some(node) = stack.pop() {
            out.push(&node.key);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        out.reverse();
        out
    }
}

impl<K, V> Drop for BinaryTreeStore<K, V> {
    fn drop(&mut self) {
        // detach children before each node drops, so no drop recurses
        let mut stack: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K: Ord, V> Default for BinaryTreeStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> SymbolTable<K, V> for BinaryTreeStore<K, V> {
    fn put(&mut self, key: K, value: V) {
        BinaryTreeStore::put(self, key, value)
    }

    fn get(&self, key: &K) -> Result<&V> {
        BinaryTreeStore::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        BinaryTreeStore::contains(self, key)
    }

    fn len(&self) -> usize {
        BinaryTreeStore::len(self)
    }
}

/// pre-order rendering, `[{k, v}, {k, v}]`
impl<K: fmt::Display, V: fmt::Display> fmt::Display for BinaryTreeStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(f, self.preorder())
    }
}
