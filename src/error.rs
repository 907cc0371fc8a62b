use thiserror::Error;

/// Errors surfaced by the allocator's public operations.
///
/// Every operation that fails leaves the chain, the region, and the live
/// handle table exactly as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
  /// Growing the managed range would exceed the configured ceiling, or
  /// the region reservation itself was refused.
  #[error("out of memory: requested {requested} bytes, {available} available")]
  OutOfMemory { requested: usize, available: usize },

  /// The handle does not name a live allocation of this allocator. Also
  /// raised on a second release of the same handle.
  #[error("invalid pointer: not a live allocation")]
  InvalidPointer,

  /// Zero-sized requests are rejected.
  #[error("zero-sized request")]
  ZeroSize,
}
