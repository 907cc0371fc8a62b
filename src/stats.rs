/// A snapshot of the allocator's operation counters.
///
/// Obtained by calling [`crate::Allocator::stats`]. Purely
/// informational; nothing in the engine reads these back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapStats {
  /// Successful allocations, including the one a moving resize makes.
  pub allocations: u64,

  /// Successful releases, including the one a moving resize makes.
  pub releases: u64,

  /// Resize calls that completed, moved or not.
  pub resizes: u64,

  /// Free blocks split to satisfy a smaller request.
  pub splits: u64,

  /// Adjacent free blocks merged on release.
  pub merges: u64,

  /// Times the heap grew, widening the tail block or appending a fresh
  /// one.
  pub grows: u64,

  /// Current top of the managed range, as an offset from its base.
  pub heap_top: usize,

  /// Blocks currently on the chain, free and used.
  pub blocks: usize,
}
