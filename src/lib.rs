//! # fitalloc - A Free-List Memory Allocator Library
//!
//! This crate provides a **free-list allocator** managing one contiguous,
//! monotonically growing heap region, with selectable placement
//! strategies (first-fit and best-fit).
//!
//! ## Overview
//!
//! ```text
//!   Free-List Allocator Concept:
//!
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                      MANAGED HEAP REGION                         │
//!   │                                                                  │
//!   │   ┌───┬─────┬───┬─────────┬───┬─────┬───┬──────────┐             │
//!   │   │ H │ M   │ H │ F       │ H │ M   │ H │ F        │ reserved    │
//!   │   └───┴─────┴───┴─────────┴───┴─────┴───┴──────────┘             │
//!   │   ▲                                               ▲         ▲    │
//!   │   │                                               │         │    │
//!   │  heap base                                     heap top  ceiling │
//!   │                                                                  │
//!   │   H = header span   M = used payload   F = free payload          │
//!   └──────────────────────────────────────────────────────────────────┘
//!
//!   Blocks cover the range [base, top) back to back, in address order.
//!   A request is served by reusing or splitting a free block, and only
//!   grows the heap when no free block fits.
//! ```
//!
//! Releasing a block merges it with any free address-adjacent neighbor,
//! so no two adjacent free blocks ever persist:
//!
//! ```text
//!   Split on allocate:            Coalesce on release:
//!
//!   ┌───┬───────────────┐         ┌───┬─────┬───┬─────┐
//!   │ H │ F 256         │         │ H │ F   │ H │ F   │
//!   └───┴───────────────┘         └───┴─────┴───┴─────┘
//!            │                             │
//!            ▼                             ▼
//!   ┌───┬────┬───┬──────┐         ┌───┬───────────────┐
//!   │ H │ M  │ H │ F    │         │ H │ F             │
//!   └───┴────┴───┴──────┘         └───┴───────────────┘
//! ```
//!
//! ## Placement Strategies
//!
//! - [`SearchMode::FirstFit`]: take the first free block (in address
//!   order) large enough for the request.
//! - [`SearchMode::BestFit`]: scan the whole chain and take the free
//!   block leaving the least unused space, first one winning ties.
//!
//! ## Crate Structure
//!
//! ```text
//!   fitalloc
//!   ├── align      - Alignment unit and the align_to! macro
//!   ├── block      - Block metadata and header overhead
//!   ├── chain      - Address-ordered block chain (slot arena)
//!   ├── heap       - Reserved heap region (mmap-backed)
//!   ├── search     - First-fit / best-fit candidate search
//!   ├── allocator  - The engine: allocate / resize / release
//!   ├── dump       - Diagnostic chain snapshots
//!   ├── stats      - Operation counters
//!   └── error      - Error taxonomy
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fitalloc::{Allocator, SearchMode};
//!
//! fn main() -> Result<(), fitalloc::AllocError> {
//!     let mut heap = Allocator::new(SearchMode::FirstFit)?;
//!
//!     // Allocate 64 usable bytes and write to them.
//!     let ptr = heap.allocate(64)?;
//!     heap.payload_mut(ptr)?.fill(0xAB);
//!
//!     // Grow the allocation; the payload prefix is preserved.
//!     let ptr = heap.resize(ptr, 256)?;
//!     assert!(heap.payload(ptr)?[..64].iter().all(|b| *b == 0xAB));
//!
//!     heap.release(ptr)?;
//!
//!     // Teardown reports whether anything was left allocated.
//!     assert!(heap.deinit().is_clean());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! The allocator reserves a fixed ceiling of address space from the OS
//! up front and bumps its heap top inside the reservation; reserved
//! pages cost nothing until touched. Block metadata lives outside the
//! managed memory, in a slot arena indexed by the chain links, while
//! every block still reserves a fixed header span in front of its
//! payload. Callers hold opaque [`BlockPtr`] handles; the table from
//! handle to chain slot makes release and resize O(1) lookups.
//!
//! Exceeding the ceiling surfaces as [`AllocError::OutOfMemory`], a
//! stale or repeated handle as [`AllocError::InvalidPointer`].
//!
//! ## Limitations
//!
//! - **Single-threaded only**: no internal locking; wrap the whole
//!   allocator in external mutual exclusion if shared.
//! - **Fixed alignment**: payload sizes round up to [`ALIGNMENT`]
//!   bytes; no stricter alignment guarantees.
//! - **Bounded region**: the heap never grows past the configured
//!   ceiling and never shrinks before teardown.
//!
//! ## Safety
//!
//! The public surface is safe. Raw memory handling is confined to the
//! heap region module, which hands out bounds-checked slices of the
//! mapping it owns.

mod align;
mod allocator;
mod block;
mod chain;
mod dump;
mod error;
mod heap;
mod search;
mod stats;

pub use align::ALIGNMENT;
pub use allocator::{
  Allocator, BlockPtr, DEFAULT_HEAP_CAPACITY, HeapConfig, TeardownReport,
};
pub use block::HEADER_SIZE;
pub use dump::{BlockInfo, HeapDump};
pub use error::AllocError;
pub use search::SearchMode;
pub use stats::HeapStats;
