use std::fmt;

/// Errors returned by `FibHeap` operations.
/// Every check happens before the heap is touched, so an `Err` means nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
	/// `find_min` / `extract_min` on a heap with no nodes
	EmptyHeap,
	/// `insert` with an index that is already live in the heap
	DuplicateIndex,
	/// The index does not name a live node
	UnknownIndex,
	/// `decrease_key` was given a key greater than the node's current key
	KeyIncreaseNotAllowed
}

impl fmt::Display for HeapError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			HeapError::EmptyHeap => write!(f, "heap is empty"),
			HeapError::DuplicateIndex => write!(f, "index is already present in the heap"),
			HeapError::UnknownIndex => write!(f, "index is not present in the heap"),
			HeapError::KeyIncreaseNotAllowed => write!(f, "new key is greater than the current key")
		}
	}
}

impl std::error::Error for HeapError {}

pub type Result<T> = std::result::Result<T, HeapError>;
