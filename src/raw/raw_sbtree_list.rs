use alloc::vec::Vec;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use super::size::Size;

/// In-order traversal stack, inlined up to the heights the balance criterion
/// actually produces for small lists.
pub(crate) type TraversalStack = SmallVec<[Handle; 16]>;

/// The size-balanced tree backing `SBTreeList`.
///
/// All nodes live in a slot arena and link to each other by [`Handle`], so
/// the tree owns every reachable node through exactly one path and tearing
/// the structure down is a flat sweep over the arena, independent of depth.
pub(crate) struct RawSBTreeList<T> {
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
}

impl<T> RawSBTreeList<T> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of elements; the root's subtree size.
    pub(crate) fn len(&self) -> usize {
        self.subtree_size(self.root)
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    fn subtree_size(&self, tree: Option<Handle>) -> usize {
        tree.map_or(0, |handle| self.nodes.get(handle).size().to_usize())
    }

    fn recompute_size(&mut self, cur: Handle) {
        let size = self.subtree_size(self.node(cur).left()) + self.subtree_size(self.node(cur).right()) + 1;
        self.node_mut(cur).set_size(Size::from_usize(size));
    }

    // ─── Rotations ───────────────────────────────────────────────────────────

    // Both rotations are local: they relink three child slots, give the
    // promoted node the old root's size, recompute the demoted node's size,
    // and hand the new subtree root back to the caller for relinking.
    // In-order output is unchanged.

    fn rotate_left(&mut self, cur: Handle) -> Handle {
        let promoted = self.node(cur).right().expect("`rotate_left()` - node has no right child!");
        let middle = self.node(promoted).left();
        self.node_mut(cur).set_right(middle);
        self.node_mut(promoted).set_left(Some(cur));
        let size = self.node(cur).size();
        self.node_mut(promoted).set_size(size);
        self.recompute_size(cur);
        promoted
    }

    fn rotate_right(&mut self, cur: Handle) -> Handle {
        let promoted = self.node(cur).left().expect("`rotate_right()` - node has no left child!");
        let middle = self.node(promoted).right();
        self.node_mut(cur).set_left(middle);
        self.node_mut(promoted).set_right(Some(cur));
        let size = self.node(cur).size();
        self.node_mut(promoted).set_size(size);
        self.recompute_size(cur);
        promoted
    }

    // ─── Rebalancing ─────────────────────────────────────────────────────────

    fn maintain_opt(&mut self, tree: Option<Handle>) -> Option<Handle> {
        tree.map(|handle| self.maintain(handle))
    }

    /// Restores the size-balance criterion at `cur` after its subtree grew:
    /// no grandchild subtree may outweigh its uncle subtree.
    ///
    /// Cases are checked in order (left-left, left-right, right-right,
    /// right-left) and the first match wins; each rotation sequence then
    /// re-maintains the subtrees whose shape changed before the node itself.
    fn maintain(&mut self, cur: Handle) -> Handle {
        let left = self.node(cur).left();
        let right = self.node(cur).right();
        let left_size = self.subtree_size(left);
        let right_size = self.subtree_size(right);
        let (left_left, left_right) = left.map_or((0, 0), |handle| {
            (self.subtree_size(self.node(handle).left()), self.subtree_size(self.node(handle).right()))
        });
        let (right_left, right_right) = right.map_or((0, 0), |handle| {
            (self.subtree_size(self.node(handle).left()), self.subtree_size(self.node(handle).right()))
        });

        if left_left > right_size {
            let cur = self.rotate_right(cur);
            let fixed = self.maintain_opt(self.node(cur).right());
            self.node_mut(cur).set_right(fixed);
            self.maintain(cur)
        } else if left_right > right_size {
            // A non-empty left-right grandchild implies a left child.
            let child = left.expect("`maintain()` - left-right heavy without a left child!");
            let child = self.rotate_left(child);
            self.node_mut(cur).set_left(Some(child));
            let cur = self.rotate_right(cur);
            let fixed = self.maintain_opt(self.node(cur).left());
            self.node_mut(cur).set_left(fixed);
            let fixed = self.maintain_opt(self.node(cur).right());
            self.node_mut(cur).set_right(fixed);
            self.maintain(cur)
        } else if right_right > left_size {
            let cur = self.rotate_left(cur);
            let fixed = self.maintain_opt(self.node(cur).left());
            self.node_mut(cur).set_left(fixed);
            self.maintain(cur)
        } else if right_left > left_size {
            let child = right.expect("`maintain()` - right-left heavy without a right child!");
            let child = self.rotate_right(child);
            self.node_mut(cur).set_right(Some(child));
            let cur = self.rotate_left(cur);
            let fixed = self.maintain_opt(self.node(cur).left());
            self.node_mut(cur).set_left(fixed);
            let fixed = self.maintain_opt(self.node(cur).right());
            self.node_mut(cur).set_right(fixed);
            self.maintain(cur)
        } else {
            cur
        }
    }

    // ─── Rank-indexed mutation ───────────────────────────────────────────────

    /// Inserts `value` at rank `pos`; elements previously at `pos..` shift
    /// right by one. The caller has already validated `pos <= len()`.
    pub(crate) fn insert(&mut self, pos: usize, value: T) {
        debug_assert!(pos <= self.len());
        let root = self.insert_node(self.root, pos, value);
        self.root = Some(root);
    }

    fn insert_node(&mut self, tree: Option<Handle>, pos: usize, value: T) -> Handle {
        let Some(cur) = tree else {
            return self.nodes.alloc(Node::new(value));
        };

        // Ranks strictly below `left_and_self` land in the left subtree;
        // `pos == size(left)` inserts immediately before this node, so the
        // boundary descends left as well.
        let left_and_self = self.node(cur).size().to_usize() - self.subtree_size(self.node(cur).right());
        if pos < left_and_self {
            let child = self.insert_node(self.node(cur).left(), pos, value);
            self.node_mut(cur).set_left(Some(child));
        } else {
            let child = self.insert_node(self.node(cur).right(), pos - left_and_self, value);
            self.node_mut(cur).set_right(Some(child));
        }

        self.node_mut(cur).increment_size();
        self.maintain(cur)
    }

    /// Removes and returns the element at rank `pos`; elements previously
    /// after it shift left by one. The caller has already validated
    /// `pos < len()`.
    ///
    /// Sizes are recomputed for every surviving ancestor on the unwind, but
    /// no rotations are performed: the balance criterion is restored by
    /// subsequent insertions, and the height stays logarithmic in the
    /// largest length the list has reached.
    pub(crate) fn remove(&mut self, pos: usize) -> T {
        debug_assert!(pos < self.len());
        let root = self.root.expect("`remove()` - list is empty!");
        let (root, value) = self.remove_node(root, pos);
        self.root = root;
        value
    }

    fn remove_node(&mut self, cur: Handle, pos: usize) -> (Option<Handle>, T) {
        let left_size = self.subtree_size(self.node(cur).left());

        let (replacement, value) = if pos < left_size {
            let child = self.node(cur).left().expect("`remove_node()` - rank descent lost its left child!");
            let (child, value) = self.remove_node(child, pos);
            self.node_mut(cur).set_left(child);
            (Some(cur), value)
        } else if pos == left_size {
            self.unlink(cur)
        } else {
            let child = self.node(cur).right().expect("`remove_node()` - rank descent lost its right child!");
            let (child, value) = self.remove_node(child, pos - left_size - 1);
            self.node_mut(cur).set_right(child);
            (Some(cur), value)
        };

        if let Some(handle) = replacement {
            self.recompute_size(handle);
        }

        (replacement, value)
    }

    /// Detaches `cur` from the tree, returning the subtree that takes its
    /// place and the removed value.
    fn unlink(&mut self, cur: Handle) -> (Option<Handle>, T) {
        let left = self.node(cur).left();
        let right = self.node(cur).right();

        match (left, right) {
            (None, None) => (None, self.nodes.take(cur).into_value()),
            (Some(child), None) | (None, Some(child)) => (Some(child), self.nodes.take(cur).into_value()),
            (Some(_), Some(right)) => {
                // Two children: promote the in-order successor, the leftmost
                // node of the right subtree. Every node on the way down loses
                // one descendant; the successor's own size is recomputed by
                // the caller once it is spliced in.
                let mut parent = None;
                let mut successor = right;
                self.node_mut(successor).decrement_size();
                while let Some(next) = self.node(successor).left() {
                    parent = Some(successor);
                    successor = next;
                    self.node_mut(successor).decrement_size();
                }

                if let Some(parent) = parent {
                    let remainder = self.node(successor).right();
                    self.node_mut(parent).set_left(remainder);
                    self.node_mut(successor).set_right(Some(right));
                }
                self.node_mut(successor).set_left(left);

                (Some(successor), self.nodes.take(cur).into_value())
            }
        }
    }

    // ─── Rank search ─────────────────────────────────────────────────────────

    pub(crate) fn get(&self, pos: usize) -> Option<&T> {
        self.node_at(pos).map(|handle| self.node(handle).value())
    }

    pub(crate) fn get_mut(&mut self, pos: usize) -> Option<&mut T> {
        let handle = self.node_at(pos)?;
        Some(self.node_mut(handle).value_mut())
    }

    /// Iterative rank descent; `None` when `pos` is past the end.
    fn node_at(&self, mut pos: usize) -> Option<Handle> {
        if pos >= self.len() {
            return None;
        }

        let mut cur = self.root;
        while let Some(handle) = cur {
            let left_size = self.subtree_size(self.node(handle).left());
            if pos < left_size {
                cur = self.node(handle).left();
            } else if pos == left_size {
                return Some(handle);
            } else {
                cur = self.node(handle).right();
                pos -= left_size + 1;
            }
        }

        None
    }

    pub(crate) fn first(&self) -> Option<&T> {
        let mut cur = self.root?;
        while let Some(left) = self.node(cur).left() {
            cur = left;
        }
        Some(self.node(cur).value())
    }

    pub(crate) fn first_mut(&mut self) -> Option<&mut T> {
        let mut cur = self.root?;
        while let Some(left) = self.node(cur).left() {
            cur = left;
        }
        Some(self.node_mut(cur).value_mut())
    }

    pub(crate) fn last(&self) -> Option<&T> {
        let mut cur = self.root?;
        while let Some(right) = self.node(cur).right() {
            cur = right;
        }
        Some(self.node(cur).value())
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut T> {
        let mut cur = self.root?;
        while let Some(right) = self.node(cur).right() {
            cur = right;
        }
        Some(self.node_mut(cur).value_mut())
    }

    // ─── Whole-tree walks ────────────────────────────────────────────────────

    /// Moves every value out in rank order.
    ///
    /// Uses an explicit traversal stack; the call stack never depends on the
    /// tree's depth here, whatever shape deletions have left it in.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.len());
        let mut stack = TraversalStack::new();
        let mut cur = self.root;

        loop {
            while let Some(handle) = cur {
                stack.push(handle);
                cur = self.node(handle).left();
            }
            let Some(handle) = stack.pop() else { break };
            cur = self.node(handle).right();
            result.push(self.nodes.take(handle).into_value());
        }

        self.root = None;
        self.nodes.clear();
        result
    }

    /// Structural copy through `convert`: same shape, same handles, same
    /// rank order.
    pub(crate) fn map_ref<U>(&self, mut convert: impl FnMut(&T) -> U) -> RawSBTreeList<U> {
        let mut convert_node = |node: &Node<T>| node.map_ref(&mut convert);
        RawSBTreeList {
            nodes: self.nodes.map_ref(&mut convert_node),
            root: self.root,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
impl<T> RawSBTreeList<T> {
    pub(crate) fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, tree: Option<Handle>) -> usize {
        tree.map_or(0, |handle| {
            1 + core::cmp::max(
                self.subtree_height(self.node(handle).left()),
                self.subtree_height(self.node(handle).right()),
            )
        })
    }

    /// Panics unless every node's cached size matches its actual subtree.
    pub(crate) fn assert_size_invariant(&self) {
        self.checked_subtree_size(self.root);
    }

    fn checked_subtree_size(&self, tree: Option<Handle>) -> usize {
        let Some(handle) = tree else { return 0 };
        let left = self.checked_subtree_size(self.node(handle).left());
        let right = self.checked_subtree_size(self.node(handle).right());
        assert_eq!(
            self.node(handle).size().to_usize(),
            left + right + 1,
            "cached size diverged from the subtree"
        );
        left + right + 1
    }

    /// Panics unless every grandchild subtree is bounded by its uncle.
    /// Only meaningful after insert-only workloads; removals are allowed to
    /// erode this.
    pub(crate) fn assert_balance_invariant(&self) {
        self.check_balance(self.root);
    }

    fn check_balance(&self, tree: Option<Handle>) {
        let Some(handle) = tree else { return };
        let left = self.node(handle).left();
        let right = self.node(handle).right();
        let left_size = self.subtree_size(left);
        let right_size = self.subtree_size(right);

        if let Some(child) = left {
            assert!(self.subtree_size(self.node(child).left()) <= right_size, "left-left outweighs its uncle");
            assert!(self.subtree_size(self.node(child).right()) <= right_size, "left-right outweighs its uncle");
        }
        if let Some(child) = right {
            assert!(self.subtree_size(self.node(child).right()) <= left_size, "right-right outweighs its uncle");
            assert!(self.subtree_size(self.node(child).left()) <= left_size, "right-left outweighs its uncle");
        }

        self.check_balance(left);
        self.check_balance(right);
    }
}
