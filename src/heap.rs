use std::ptr::{self, NonNull};
use std::slice;

use libc::{
  MAP_ANONYMOUS, MAP_FAILED, MAP_PRIVATE, PROT_READ, PROT_WRITE, c_void,
  mmap, munmap,
};
use log::debug;

use crate::error::AllocError;

/// The managed address range.
///
/// The full ceiling is reserved up front as one anonymous private
/// mapping, and `top` grows monotonically inside it. Reserved pages are
/// only committed by the kernel once touched, so a large ceiling costs
/// address space, not memory. The range shrinks only at teardown and the
/// mapping is returned on drop.
pub(crate) struct HeapRegion {
  base: NonNull<u8>,
  capacity: usize,
  top: usize,
}

impl HeapRegion {
  pub fn new(capacity: usize) -> Result<Self, AllocError> {
    let refused = AllocError::OutOfMemory {
      requested: capacity,
      available: 0,
    };

    let address = unsafe {
      mmap(
        ptr::null_mut(),
        capacity,
        PROT_READ | PROT_WRITE,
        MAP_PRIVATE | MAP_ANONYMOUS,
        -1,
        0,
      )
    };
    if address == MAP_FAILED {
      return Err(refused);
    }

    Ok(Self {
      base: NonNull::new(address as *mut u8).ok_or(refused)?,
      capacity,
      top: 0,
    })
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  /// Current top of the range, as an offset from its base.
  pub fn top(&self) -> usize {
    self.top
  }

  pub fn available(&self) -> usize {
    self.capacity - self.top
  }

  /// Extends the managed range by `bytes` and returns the offset the
  /// extension starts at.
  pub fn grow(&mut self, bytes: usize) -> Result<usize, AllocError> {
    if bytes > self.available() {
      return Err(AllocError::OutOfMemory {
        requested: bytes,
        available: self.available(),
      });
    }

    let offset = self.top;
    self.top += bytes;
    debug!("heap grew by {bytes} bytes, top = {}", self.top);

    Ok(offset)
  }

  /// Teardown only. The range never shrinks during normal operation.
  pub fn shrink(&mut self, bytes: usize) {
    debug_assert!(bytes <= self.top);
    self.top -= bytes;
  }

  pub fn bytes(
    &self,
    offset: usize,
    len: usize,
  ) -> &[u8] {
    debug_assert!(offset + len <= self.top);
    unsafe { slice::from_raw_parts(self.base.as_ptr().add(offset), len) }
  }

  pub fn bytes_mut(
    &mut self,
    offset: usize,
    len: usize,
  ) -> &mut [u8] {
    debug_assert!(offset + len <= self.top);
    unsafe { slice::from_raw_parts_mut(self.base.as_ptr().add(offset), len) }
  }

  /// Copies `len` bytes from offset `src` to offset `dst`. The two
  /// ranges may overlap.
  pub fn copy(
    &mut self,
    src: usize,
    dst: usize,
    len: usize,
  ) {
    debug_assert!(src + len <= self.top);
    debug_assert!(dst + len <= self.top);
    unsafe {
      ptr::copy(
        self.base.as_ptr().add(src),
        self.base.as_ptr().add(dst),
        len,
      );
    }
  }
}

impl Drop for HeapRegion {
  fn drop(&mut self) {
    unsafe {
      munmap(self.base.as_ptr() as *mut c_void, self.capacity);
    }
  }
}
