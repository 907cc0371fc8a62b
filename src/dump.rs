use std::fmt;

/// One chain entry in a [`HeapDump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
  /// Header offset from the base of the managed range.
  pub offset: usize,
  pub payload_size: usize,
  pub is_free: bool,
}

/// Address-ordered snapshot of the block chain, for diagnostics and
/// tests.
///
/// Obtained from [`crate::Allocator::dump`]. The `Display` form lists
/// one `F`/`M` flag and payload size per block followed by the block
/// count; it is meant for humans and is not a stable format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapDump {
  pub blocks: Vec<BlockInfo>,
}

impl HeapDump {
  pub fn block_count(&self) -> usize {
    self.blocks.len()
  }
}

impl fmt::Display for HeapDump {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    writeln!(f, "===========================")?;
    for block in &self.blocks {
      let flag = if block.is_free { 'F' } else { 'M' };
      writeln!(f, "{} {}", flag, block.payload_size)?;
    }
    writeln!(f, "blocks: {}", self.blocks.len())?;
    write!(f, "===========================")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display_lists_flags_and_count() {
    let dump = HeapDump {
      blocks: vec![
        BlockInfo {
          offset: 0,
          payload_size: 64,
          is_free: false,
        },
        BlockInfo {
          offset: 96,
          payload_size: 160,
          is_free: true,
        },
      ],
    };

    let text = dump.to_string();
    assert!(text.contains("M 64\n"));
    assert!(text.contains("F 160\n"));
    assert!(text.contains("blocks: 2"));
  }
}
