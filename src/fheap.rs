use std::{collections::hash_map::Entry, hash::Hash, mem};

use log::{debug, trace};
use num_traits::Num;
use rustc_hash::FxHashMap;

use crate::error::{HeapError, Result};

/// Numeric priority type accepted by `FibHeap`.  Smaller keys are extracted first.
/// Floats are accepted, but a NaN key leaves the ordering of that node unspecified.
pub trait Key: Num + PartialOrd + Copy {}

impl<T: Num + PartialOrd + Copy> Key for T {}

#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
struct Node<I, K> {
	key: K,
	parent: Option<I>,
	children: Vec<I>,
	/// position of this node in its parent's `children`, meaningless for roots
	slot: usize,
	marked: bool
}

impl<I, K> Node<I, K> {
	fn new(key: K) -> Self {
		Self{key, parent: None, children: Vec::new(), slot: 0, marked: false}
	}

	fn rank(&self) -> usize {
		self.children.len()
	}
}

#[cfg(test)]
#[derive(Debug, PartialEq)]
enum FibHeapError<I> {
	LessThanParent(I),
	BrokenParentLink(I),
	MarkedRoot(I),
	TooSmall(I),
	StaleMin,
	WrongCount
}

/// Upper bound on the rank of any root in a heap holding `count` nodes.
/// A root of rank r has at least F(r + 2) >= phi^r descendants, so r <= log_phi(count).
fn max_rank(count: usize) -> usize {
	if count <= 1 {
		return 0
	}
	// Calculate the ceiling of the base 2 log of count, then multiply by the reciprocal of the base 2 log of the golden ratio
	((((count - 1).ilog2() + 1) as f64)*1.4404200904125567).ceil() as usize
}

/// A Fibonacci heap whose nodes are addressed by a caller supplied index.
/// - Insert: O(1)
/// - Find min: O(1)
/// - Decrease key: O(1) amortized
/// - Extract min: O(log(n)) amortized
///
/// Every node lives in an arena keyed by its index; parent and child links are indices into
/// that arena, so the trees never own each other.  The index is the node's identity and the key
/// is its priority: two live nodes may share a key but never an index.
#[derive(Debug, Clone)]
pub struct FibHeap<I, K> {
	nodes: FxHashMap<I, Node<I, K>>,
	roots: Vec<I>,
	min: Option<I>
}

impl<I: Hash + Eq + Clone, K: Key> Default for FibHeap<I, K> {
	fn default() -> Self {
		Self::new()
	}
}

impl<I: Hash + Eq + Clone, K: Key> FibHeap<I, K> {
	/// Create an empty heap
	pub fn new() -> Self {
		Self{nodes: FxHashMap::default(), roots: Vec::new(), min: None}
	}

	/// Create an empty heap with room for `capacity` nodes before the arena reallocates
	pub fn with_capacity(capacity: usize) -> Self {
		Self{nodes: FxHashMap::with_capacity_and_hasher(capacity, Default::default()), roots: Vec::new(), min: None}
	}

	/// Get the number of nodes in the heap
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Check whether `index` names a node currently in the heap
	pub fn contains(&self, index: &I) -> bool {
		self.nodes.contains_key(index)
	}

	/// Get the current key of the node named by `index`
	pub fn key_of(&self, index: &I) -> Result<K> {
		self.nodes.get(index).map(|node|node.key).ok_or(HeapError::UnknownIndex)
	}

	/// Get the index and key of the minimal node without removing it.
	/// When several nodes share the minimal key, which one is returned is unspecified.
	pub fn find_min(&self) -> Result<(I, K)> {
		let min = self.min.as_ref().ok_or(HeapError::EmptyHeap)?;
		Ok((min.clone(), self.nodes[min].key))
	}

	/// Like `FibHeap::find_min`, but an empty heap gives `None`
	pub fn peek_min(&self) -> Option<(I, K)> {
		self.find_min().ok()
	}

	/// Add a new node as a singleton tree in the root list.
	/// Fails with `HeapError::DuplicateIndex` if `index` is already in the heap.
	pub fn insert(&mut self, index: I, key: K) -> Result<()> {
		let min_key = self.min.as_ref().map(|min|self.nodes[min].key);
		let slot = match self.nodes.entry(index) {
			Entry::Occupied(_) => return Err(HeapError::DuplicateIndex),
			Entry::Vacant(slot) => slot
		};
		let index = slot.key().clone();
		slot.insert(Node::new(key));
		if min_key.map_or(true, |min_key|key < min_key) {
			self.min = Some(index.clone());
		}
		self.roots.push(index);
		#[cfg(test)]{
			assert!(self.check().is_ok())
		}
		Ok(())
	}

	/// Remove the minimal node and return its index and key.
	/// Its children join the root list, then the root list is consolidated so that
	/// no two roots have the same rank.
	pub fn extract_min(&mut self) -> Result<(I, K)> {
		let min = self.min.take().ok_or(HeapError::EmptyHeap)?;
		let Some(node) = self.nodes.remove(&min) else {
			unreachable!("cached minimum is not in the node table")
		};
		for child in &node.children {
			let child_node = self.node_mut(child);
			child_node.parent = None;
			child_node.marked = false;
		}
		let mut roots = mem::take(&mut self.roots);
		if let Some(pos) = roots.iter().position(|root|*root == min) {
			roots.swap_remove(pos);
		}
		roots.extend(node.children);
		self.consolidate(roots);
		#[cfg(test)]{
			assert!(self.check().is_ok());
			assert!(self.roots_have_distinct_ranks());
		}
		Ok((min, node.key))
	}

	/// Like `FibHeap::extract_min`, but an empty heap gives `None`
	pub fn pop_min(&mut self) -> Option<(I, K)> {
		self.extract_min().ok()
	}

	/// Lower the key of the node named by `index` to `new_key`.
	/// If this breaks heap order the node is cut into the root list, and any marked ancestors
	/// are cut after it until an unmarked ancestor is reached, which becomes marked.
	/// Setting a key equal to the current one is allowed and changes nothing.
	/// Fails with `HeapError::UnknownIndex` or `HeapError::KeyIncreaseNotAllowed`,
	/// in which case the heap is left untouched.
	pub fn decrease_key(&mut self, index: &I, new_key: K) -> Result<()> {
		let node = self.nodes.get_mut(index).ok_or(HeapError::UnknownIndex)?;
		if new_key > node.key {
			return Err(HeapError::KeyIncreaseNotAllowed)
		}
		node.key = new_key;
		if let Some(parent) = node.parent.clone() {
			if new_key < self.nodes[&parent].key {
				self.cut(index, &parent);
				self.cascading_cut(parent);
			}
		}
		// only the decreased node can undercut the cached minimum; promoted ancestors cannot
		if self.nodes[index].parent.is_none() {
			self.offer_min(index, new_key);
		}
		#[cfg(test)]{
			assert!(self.check().is_ok())
		}
		Ok(())
	}

	fn node_mut(&mut self, index: &I) -> &mut Node<I, K> {
		match self.nodes.get_mut(index) {
			Some(node) => node,
			None => unreachable!("linked index is not in the node table")
		}
	}

	fn offer_min(&mut self, index: &I, key: K) {
		if self.min.as_ref().map_or(true, |min|key < self.nodes[min].key) {
			self.min = Some(index.clone());
		}
	}

	fn scan_min(&self) -> Option<I> {
		let mut iter = self.roots.iter();
		let mut min = iter.next()?;
		for root in iter {
			if self.nodes[root].key < self.nodes[min].key {
				min = root;
			}
		}
		Some(min.clone())
	}

	/// Make one of two roots with the same rank the child of the other, and return the new parent.
	/// The root with the smaller key wins, ties go to `node`.
	fn link(&mut self, node: I, other: I) -> I {
		let (parent, child) = if self.nodes[&node].key <= self.nodes[&other].key {
			(node, other)
		} else { (other, node) };
		let slot = self.nodes[&parent].rank();
		trace!("linking two roots of rank {}", slot);
		let child_node = self.node_mut(&child);
		child_node.parent = Some(parent.clone());
		child_node.slot = slot;
		child_node.marked = false;
		self.node_mut(&parent).children.push(child);
		parent
	}

	/// Merge trees in `roots` until every rank is held by at most one root, the same way a
	/// binary counter carries, then install the survivors as the root list and rescan the minimum.
	fn consolidate(&mut self, roots: Vec<I>) {
		let root_count = roots.len();
		let mut ranks: Vec<Option<I>> = vec![None; max_rank(self.nodes.len()) + 1];
		for mut root in roots {
			loop { // repeatedly try to insert the root into the rank table, merging it with the root with the same rank until it has unique rank
				let rank = self.nodes[&root].rank();
				if rank >= ranks.len() {
					ranks.resize(rank + 1, None);
				}
				match ranks[rank].take() {
					None => {
						ranks[rank] = Some(root);
						break
					},
					Some(other) => root = self.link(root, other)
				}
			}
		}
		let max_rank = ranks.len() - 1;
		self.roots = ranks.into_iter().flatten().collect();
		self.min = self.scan_min();
		debug!("consolidated {} roots into {} (rank bound {})", root_count, self.roots.len(), max_rank);
	}

	/// Detach `index` from `parent` and move it to the root list unmarked.
	fn cut(&mut self, index: &I, parent: &I) {
		let slot = self.nodes[index].slot;
		let siblings = &mut self.node_mut(parent).children;
		siblings.swap_remove(slot);
		if let Some(moved) = siblings.get(slot).cloned() {
			self.node_mut(&moved).slot = slot;
		}
		let node = self.node_mut(index);
		node.parent = None;
		node.marked = false;
		trace!("cut node with {} children into the root list", node.rank());
		self.roots.push(index.clone());
	}

	/// Walk up from `node`, which has just lost a child, cutting every marked ancestor that still
	/// has a parent.  The walk ends by marking the first unmarked non-root, or unmarking a root.
	fn cascading_cut(&mut self, mut node: I) {
		let mut cuts = 0usize;
		loop {
			let (parent, marked) = {
				let current = &self.nodes[&node];
				(current.parent.clone(), current.marked)
			};
			match parent {
				Some(parent) if marked => {
					self.cut(&node, &parent);
					cuts += 1;
					node = parent;
				},
				Some(_) => {
					self.node_mut(&node).marked = true;
					break
				},
				None => {
					self.node_mut(&node).marked = false;
					break
				}
			}
		}
		if cuts > 0 {
			trace!("cascading cut moved {} ancestors into the root list", cuts);
		}
	}

	#[cfg(test)]
	fn roots_have_distinct_ranks(&self) -> bool {
		let mut seen = rustc_hash::FxHashSet::default();
		self.roots.iter().all(|root|seen.insert(self.nodes[root].rank()))
	}

	#[cfg(test)]
	fn check_subtree(&self, index: &I) -> std::result::Result<usize, FibHeapError<I>> {
		use FibHeapError::*;
		let node = &self.nodes[index];
		let mut count = 1;
		let (mut fib_d1, mut fib_d2) = (1, 1);
		for (slot, child) in node.children.iter().enumerate() {
			(fib_d1, fib_d2) = (fib_d2, fib_d1 + fib_d2);
			let Some(child_node) = self.nodes.get(child) else {
				return Err(BrokenParentLink(child.clone()))
			};
			if child_node.key < node.key {
				return Err(LessThanParent(child.clone()))
			} else if child_node.parent.as_ref() != Some(index) || child_node.slot != slot {
				return Err(BrokenParentLink(child.clone()))
			}
			count += self.check_subtree(child)?;
		}
		if count < fib_d2 {
			Err(TooSmall(index.clone()))
		} else { Ok(count) }
	}

	#[cfg(test)]
	fn check(&self) -> std::result::Result<(), FibHeapError<I>> {
		use FibHeapError::*;
		if self.nodes.is_empty() != self.min.is_none() || self.nodes.is_empty() != self.roots.is_empty() {
			return Err(WrongCount)
		}
		#[cfg(feature = "stress_tests")]{
			return Ok(())
		}
		let mut count = 0;
		for root in &self.roots {
			let Some(node) = self.nodes.get(root) else {
				return Err(BrokenParentLink(root.clone()))
			};
			if node.parent.is_some() {
				return Err(BrokenParentLink(root.clone()))
			} else if node.marked {
				return Err(MarkedRoot(root.clone()))
			}
			count += self.check_subtree(root)?;
		}
		if count != self.nodes.len() {
			return Err(WrongCount)
		}
		match &self.min {
			Some(min) if !self.roots.contains(min) => Err(StaleMin),
			Some(min) if self.roots.iter().any(|root|self.nodes[root].key < self.nodes[min].key) => Err(StaleMin),
			_ => Ok(())
		}
	}
}
