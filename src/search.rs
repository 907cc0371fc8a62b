use crate::block::HEADER_SIZE;
use crate::chain::BlockChain;

/// Placement strategy used when scanning the chain for a free block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
  /// Takes the first free block (in address order) large enough for the
  /// request. The scan stops at the first match.
  FirstFit,
  /// Scans the whole chain and takes the free block leaving the least
  /// unused space. Ties keep the first block encountered in address
  /// order.
  BestFit,
}

/// A free block the search settled on. `leftover` is the payload that
/// would remain unused if the request were placed here.
pub(crate) struct Candidate {
  pub index: usize,
  pub leftover: usize,
}

/// A free block can host `size` bytes only if it matches exactly, or has
/// room for the remainder block's header as well. Anything in between
/// would leave a remainder with negative payload.
fn fits(
  payload_size: usize,
  size: usize,
) -> bool {
  payload_size == size || payload_size >= size + HEADER_SIZE
}

impl SearchMode {
  pub(crate) fn find_candidate(
    self,
    chain: &BlockChain,
    size: usize,
  ) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for (index, block) in chain.iter() {
      if !block.is_free || !fits(block.payload_size, size) {
        continue;
      }
      let leftover = block.payload_size - size;

      match self {
        SearchMode::FirstFit => return Some(Candidate { index, leftover }),
        SearchMode::BestFit => match &best {
          Some(current) if current.leftover <= leftover => {}
          _ => best = Some(Candidate { index, leftover }),
        },
      }
    }

    best
  }
}
