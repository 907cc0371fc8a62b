use std::collections::HashMap;

use log::{trace, warn};

use crate::align::ALIGNMENT;
use crate::align_to;
use crate::block::{Block, HEADER_SIZE};
use crate::chain::BlockChain;
use crate::dump::{BlockInfo, HeapDump};
use crate::error::AllocError;
use crate::heap::HeapRegion;
use crate::search::{Candidate, SearchMode};
use crate::stats::HeapStats;

/// Default ceiling of reserved address space, in bytes.
pub const DEFAULT_HEAP_CAPACITY: usize = 256 * 1024 * 1024;

/// Construction settings for an [`Allocator`].
#[derive(Debug, Clone, Copy)]
pub struct HeapConfig {
  /// Placement strategy for every allocation this allocator makes.
  pub mode: SearchMode,

  /// Ceiling on the managed range. Growth past it fails with
  /// [`AllocError::OutOfMemory`].
  pub capacity: usize,
}

impl Default for HeapConfig {
  fn default() -> Self {
    Self {
      mode: SearchMode::FirstFit,
      capacity: DEFAULT_HEAP_CAPACITY,
    }
  }
}

/// A handle to a live allocation.
///
/// Wraps the payload's offset from the heap base and grants access to
/// the payload bytes only, through [`Allocator::payload`] and
/// [`Allocator::payload_mut`]. Two handles compare equal exactly when
/// they name the same address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPtr(usize);

impl BlockPtr {
  /// Offset of the payload from the base of the managed range.
  pub fn offset(&self) -> usize {
    self.0
  }
}

/// Outcome of [`Allocator::deinit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeardownReport {
  /// Bytes of free blocks, headers included, returned to the region.
  pub reclaimed: usize,

  /// Bytes still owned by outstanding used blocks. Non-zero means the
  /// caller did not release everything before teardown.
  pub leaked: usize,
}

impl TeardownReport {
  pub fn is_clean(&self) -> bool {
    self.leaked == 0
  }
}

/// The allocation engine.
///
/// Owns the block chain, the heap region, and the table of live
/// handles. All chain maintenance (splitting, coalescing, growth) stays
/// internal; after every public operation the chain covers the managed
/// range contiguously, every payload size is a multiple of
/// [`ALIGNMENT`], and no two adjacent blocks are both free.
pub struct Allocator {
  chain: BlockChain,
  heap: HeapRegion,
  mode: SearchMode,
  live: HashMap<usize, usize>,
  stats: HeapStats,
}

impl Allocator {
  /// Creates an allocator with the given placement strategy and the
  /// default capacity.
  pub fn new(mode: SearchMode) -> Result<Self, AllocError> {
    Self::with_config(HeapConfig {
      mode,
      ..HeapConfig::default()
    })
  }

  pub fn with_config(config: HeapConfig) -> Result<Self, AllocError> {
    Ok(Self {
      chain: BlockChain::new(),
      heap: HeapRegion::new(config.capacity)?,
      mode: config.mode,
      live: HashMap::new(),
      stats: HeapStats::default(),
    })
  }

  pub fn mode(&self) -> SearchMode {
    self.mode
  }

  /// Allocates `size` usable bytes, rounded up to the alignment unit.
  ///
  /// Reuses or splits a free block when the strategy finds one, widens a
  /// free tail block in place when it does not, and appends a fresh
  /// block at the top otherwise.
  pub fn allocate(&mut self, size: usize) -> Result<BlockPtr, AllocError> {
    let ptr = self.allocate_inner(size)?;
    self.stats.allocations += 1;
    trace!("allocate({size}) -> offset {}", ptr.offset());
    self.debug_check_chain();

    Ok(ptr)
  }

  fn allocate_inner(&mut self, size: usize) -> Result<BlockPtr, AllocError> {
    if size == 0 {
      return Err(AllocError::ZeroSize);
    }
    if size > self.heap.capacity() {
      return Err(AllocError::OutOfMemory {
        requested: size,
        available: self.heap.available(),
      });
    }
    let size = align_to!(size, ALIGNMENT);

    if let Some(Candidate { index, leftover }) =
      self.mode.find_candidate(&self.chain, size)
    {
      if leftover > 0 {
        self.split(index, size);
      } else {
        self.chain.get_mut(index).is_free = false;
      }
      return Ok(self.register(index));
    }

    // No free block can host the request. A free tail block is widened
    // in place; otherwise a fresh block is appended at the top.
    match self.chain.tail() {
      Some(tail) if self.chain.get(tail).is_free => {
        let payload_size = self.chain.get(tail).payload_size;
        debug_assert!(payload_size < size);
        self.heap.grow(size - payload_size)?;
        self.stats.grows += 1;

        let block = self.chain.get_mut(tail);
        block.payload_size = size;
        block.is_free = false;

        Ok(self.register(tail))
      }
      _ => {
        let offset = self.heap.grow(size + HEADER_SIZE)?;
        self.stats.grows += 1;

        let index = self.chain.push_back(Block::new(offset, size, false));

        Ok(self.register(index))
      }
    }
  }

  /// Shrinks the free block at `index` to `size`, marks it used, and
  /// inserts the remainder as a new free block right after it.
  fn split(
    &mut self,
    index: usize,
    size: usize,
  ) {
    let (end, payload_size) = {
      let block = self.chain.get_mut(index);
      debug_assert!(block.is_free);
      debug_assert!(block.payload_size >= size + HEADER_SIZE);

      let payload_size = block.payload_size;
      block.payload_size = size;
      block.is_free = false;

      (block.end_offset(), payload_size)
    };

    let remainder = Block::new(end, payload_size - size - HEADER_SIZE, true);
    self.chain.insert_after(index, remainder);
    self.stats.splits += 1;
  }

  fn register(&mut self, index: usize) -> BlockPtr {
    let offset = self.chain.get(index).payload_offset();
    self.live.insert(offset, index);

    BlockPtr(offset)
  }

  /// Releases a live allocation and merges it with any free
  /// address-adjacent neighbor.
  pub fn release(&mut self, ptr: BlockPtr) -> Result<(), AllocError> {
    let index = self
      .live
      .remove(&ptr.offset())
      .ok_or(AllocError::InvalidPointer)?;
    self.chain.get_mut(index).is_free = true;

    // Absorb the address-next neighbor first, then let the previous one
    // absorb the result. Both sides are always checked, so no adjacent
    // free pair survives a release.
    if let Some(next) = self.chain.get(index).next {
      if self.chain.get(next).is_free {
        let absorbed = self.chain.remove(next);
        self.chain.get_mut(index).payload_size += absorbed.span();
        self.stats.merges += 1;
      }
    }
    if let Some(prev) = self.chain.get(index).prev {
      if self.chain.get(prev).is_free {
        let absorbed = self.chain.remove(index);
        self.chain.get_mut(prev).payload_size += absorbed.span();
        self.stats.merges += 1;
      }
    }

    self.stats.releases += 1;
    trace!("release(offset {})", ptr.offset());
    self.debug_check_chain();

    Ok(())
  }

  /// Moves a live allocation to `new_size` usable bytes, preserving the
  /// first `min(old, new)` payload bytes.
  ///
  /// When `new_size` rounds to the block's current payload size the
  /// handle is returned unchanged. Otherwise the new block is placed by
  /// the ordinary search, the payload prefix is copied, and the old
  /// block is released. The old block stays live until after the copy,
  /// so neither splitting nor coalescing can clobber its bytes; on
  /// failure it remains live and untouched.
  pub fn resize(
    &mut self,
    ptr: BlockPtr,
    new_size: usize,
  ) -> Result<BlockPtr, AllocError> {
    if new_size == 0 {
      return Err(AllocError::ZeroSize);
    }
    let index = *self
      .live
      .get(&ptr.offset())
      .ok_or(AllocError::InvalidPointer)?;
    let old_size = self.chain.get(index).payload_size;

    let rounded = align_to!(new_size, ALIGNMENT);
    if rounded == old_size {
      self.stats.resizes += 1;
      trace!("resize(offset {}, {new_size}) kept in place", ptr.offset());
      return Ok(ptr);
    }

    let new_ptr = self.allocate(new_size)?;
    self.heap.copy(ptr.offset(), new_ptr.offset(), old_size.min(rounded));
    self.release(ptr)?;

    self.stats.resizes += 1;
    trace!(
      "resize(offset {}, {new_size}) -> offset {}",
      ptr.offset(),
      new_ptr.offset()
    );

    Ok(new_ptr)
  }

  /// The payload bytes `ptr` grants access to.
  pub fn payload(&self, ptr: BlockPtr) -> Result<&[u8], AllocError> {
    let index = *self
      .live
      .get(&ptr.offset())
      .ok_or(AllocError::InvalidPointer)?;
    let block = self.chain.get(index);

    Ok(self.heap.bytes(block.payload_offset(), block.payload_size))
  }

  pub fn payload_mut(
    &mut self,
    ptr: BlockPtr,
  ) -> Result<&mut [u8], AllocError> {
    let index = *self
      .live
      .get(&ptr.offset())
      .ok_or(AllocError::InvalidPointer)?;
    let block = self.chain.get(index);
    let (offset, len) = (block.payload_offset(), block.payload_size);

    Ok(self.heap.bytes_mut(offset, len))
  }

  /// Address-ordered snapshot of the chain. Side-effect free.
  pub fn dump(&self) -> HeapDump {
    HeapDump {
      blocks: self
        .chain
        .iter()
        .map(|(_, block)| BlockInfo {
          offset: block.offset,
          payload_size: block.payload_size,
          is_free: block.is_free,
        })
        .collect(),
    }
  }

  pub fn stats(&self) -> HeapStats {
    HeapStats {
      heap_top: self.heap.top(),
      blocks: self.chain.len(),
      ..self.stats
    }
  }

  /// Tears the allocator down: returns every free byte to the region
  /// and reports whatever is still outstanding.
  ///
  /// A leak is a diagnostic, not a fault; the allocator cannot tell a
  /// leak from a caller that chose not to release before shutdown.
  pub fn deinit(mut self) -> TeardownReport {
    let reclaimed: usize = self
      .chain
      .iter()
      .filter(|(_, block)| block.is_free)
      .map(|(_, block)| block.span())
      .sum();
    self.heap.shrink(reclaimed);

    let leaked = self.heap.top();
    if leaked > 0 {
      warn!(
        "memory leak at teardown: {leaked} bytes still allocated in {} blocks",
        self.live.len()
      );
    }

    TeardownReport { reclaimed, leaked }
  }

  /// Walks the chain asserting the structural invariants: contiguity
  /// over the managed range, aligned payloads, and no adjacent free
  /// pair. Debug builds only.
  pub(crate) fn debug_check_chain(&self) {
    if !cfg!(debug_assertions) {
      return;
    }

    let mut expected = 0;
    let mut prev_free = false;

    for (_, block) in self.chain.iter() {
      assert_eq!(block.offset, expected, "chain gap or overlap");
      assert_eq!(block.payload_size % ALIGNMENT, 0, "unaligned payload");
      assert!(!(prev_free && block.is_free), "adjacent free blocks");

      prev_free = block.is_free;
      expected = block.end_offset();
    }

    assert_eq!(expected, self.heap.top(), "chain does not cover the heap");
  }
}
