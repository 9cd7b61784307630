//! The open and closed lists of the A* search.
//!
//! The [OpenList] is a binary heap keyed on a node's total cost with ties
//! broken by insertion order. When a node's cost is revised it is simply
//! re-added, the heap entry pushed earlier is left behind as stale and
//! skipped when it surfaces.
//!

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// An entry of the [OpenList] heap
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
	/// Total cost of the node when it was inserted
	total_cost: f64,
	/// Insertion counter used to keep equal costs in insertion order
	sequence: u64,
	/// Index of the node within the [crate::prelude::NodeTable]
	index: usize,
}

/// Lowest total cost first, then earliest insertion first
fn compare_entries(a: &FrontierEntry, b: &FrontierEntry) -> Ordering {
	a.total_cost
		.total_cmp(&b.total_cost)
		.then(a.sequence.cmp(&b.sequence))
}

impl Ord for FrontierEntry {
	fn cmp(&self, other: &Self) -> Ordering {
		// BinaryHeap is a max-heap, flip so the cheapest entry sits on top
		compare_entries(other, self)
	}
}

impl PartialOrd for FrontierEntry {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for FrontierEntry {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}
impl Eq for FrontierEntry {}

/// Nodes discovered but not yet expanded, ordered by total cost
#[derive(Clone, Debug, Default)]
pub struct OpenList {
	/// Heap of entries, may contain stale entries of removed nodes
	heap: BinaryHeap<FrontierEntry>,
	/// Live members mapped to the sequence of their current heap entry
	members: HashMap<usize, u64>,
	/// Next insertion sequence
	next_sequence: u64,
}

impl OpenList {
	/// Insert a node `index` with its `total_cost`. If the node is already a
	/// member its previous entry is superseded
	pub fn add(&mut self, index: usize, total_cost: f64) {
		let sequence = self.next_sequence;
		self.next_sequence += 1;
		self.members.insert(index, sequence);
		self.heap.push(FrontierEntry {
			total_cost,
			sequence,
			index,
		});
	}
	/// Drop stale entries from the top of the heap
	fn discard_stale(&mut self) {
		while let Some(top) = self.heap.peek() {
			if self.members.get(&top.index) == Some(&top.sequence) {
				break;
			}
			self.heap.pop();
		}
	}
	/// Peek the node with the lowest total cost
	pub fn first(&mut self) -> Option<usize> {
		self.discard_stale();
		self.heap.peek().map(|entry| entry.index)
	}
	/// Remove and return the node with the lowest total cost
	pub fn pop_first(&mut self) -> Option<usize> {
		self.discard_stale();
		let entry = self.heap.pop()?;
		self.members.remove(&entry.index);
		Some(entry.index)
	}
	/// Remove an arbitrary node, returns whether it was a member
	pub fn remove(&mut self, index: usize) -> bool {
		self.members.remove(&index).is_some()
	}
	pub fn contains(&self, index: usize) -> bool {
		self.members.contains_key(&index)
	}
	pub fn clear(&mut self) {
		self.heap.clear();
		self.members.clear();
		self.next_sequence = 0;
	}
	/// Number of live members
	pub fn size(&self) -> usize {
		self.members.len()
	}
	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}
}

/// Nodes which have already been expanded
#[derive(Clone, Debug, Default)]
pub struct ClosedList(HashSet<usize>);

impl ClosedList {
	pub fn add(&mut self, index: usize) {
		self.0.insert(index);
	}
	/// Remove a node, returns whether it was a member
	pub fn remove(&mut self, index: usize) -> bool {
		self.0.remove(&index)
	}
	pub fn contains(&self, index: usize) -> bool {
		self.0.contains(&index)
	}
	pub fn clear(&mut self) {
		self.0.clear();
	}
	pub fn size(&self) -> usize {
		self.0.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn pops_lowest_total_cost() {
		let mut open = OpenList::default();
		open.add(1, 5.0);
		open.add(2, 1.5);
		open.add(3, 3.0);
		assert_eq!(Some(2), open.first());
		assert_eq!(Some(2), open.pop_first());
		assert_eq!(Some(3), open.pop_first());
		assert_eq!(Some(1), open.pop_first());
		assert_eq!(None, open.pop_first());
	}
	#[test]
	fn ties_keep_insertion_order() {
		let mut open = OpenList::default();
		open.add(7, 2.0);
		open.add(3, 2.0);
		open.add(9, 2.0);
		assert_eq!(Some(7), open.pop_first());
		assert_eq!(Some(3), open.pop_first());
		assert_eq!(Some(9), open.pop_first());
	}
	#[test]
	fn removed_node_is_skipped() {
		let mut open = OpenList::default();
		open.add(1, 1.0);
		open.add(2, 2.0);
		assert!(open.remove(1));
		assert!(!open.contains(1));
		assert_eq!(1, open.size());
		assert_eq!(Some(2), open.pop_first());
		assert!(open.is_empty());
	}
	#[test]
	fn re_adding_supersedes_old_cost() {
		let mut open = OpenList::default();
		open.add(1, 10.0);
		open.add(2, 5.0);
		// cheaper route to node 1 found
		open.add(1, 1.0);
		assert_eq!(2, open.size());
		assert_eq!(Some(1), open.pop_first());
		assert_eq!(Some(2), open.pop_first());
		// the stale entry of node 1 must not resurface
		assert_eq!(None, open.pop_first());
	}
	#[test]
	fn closed_membership() {
		let mut closed = ClosedList::default();
		closed.add(4);
		assert!(closed.contains(4));
		assert!(closed.remove(4));
		assert!(!closed.remove(4));
		assert_eq!(0, closed.size());
	}
}
