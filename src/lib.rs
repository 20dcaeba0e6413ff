//! An index-addressed Fibonacci heap.
//!
//! Nodes are named by a caller supplied index and ordered by a numeric key, so the key of any
//! live node can be lowered in amortized O(1) without holding a handle:
//!
//! ```rust
//! use fibheap::FibHeap;
//!
//! let mut heap = FibHeap::new();
//! heap.insert(1, 5).unwrap();
//! heap.insert(2, 3).unwrap();
//! heap.decrease_key(&1, 0).unwrap();
//! assert_eq!(heap.extract_min(), Ok((1, 0)));
//! assert_eq!(heap.find_min(), Ok((2, 3)));
//! ```

pub mod error;
pub mod fheap;

#[cfg(test)]
mod testing;

pub use error::{HeapError, Result};
pub use fheap::{FibHeap, Key};
