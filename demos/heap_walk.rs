use std::io::Read;

use fitalloc::{AllocError, Allocator, SearchMode};

/// Waits until the user presses ENTER. Useful when you want to follow
/// how each operation reshapes the block chain.
fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn main() -> Result<(), AllocError> {
  // RUST_LOG=trace shows every engine operation and heap growth.
  env_logger::init();

  let mut heap = Allocator::new(SearchMode::FirstFit)?;

  // --------------------------------------------------------------------
  // 1) Allocate 256 bytes and fill them with a pattern.
  // --------------------------------------------------------------------
  let first = heap.allocate(256)?;
  heap.payload_mut(first)?.fill(0xAB);
  println!("\n[1] Allocate 256 bytes at offset {}", first.offset());
  println!("{}", heap.dump());

  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 2) Allocate 64 more bytes; the heap grows again since nothing is
  //    free yet.
  // --------------------------------------------------------------------
  let second = heap.allocate(64)?;
  println!("\n[2] Allocate 64 bytes at offset {}", second.offset());
  println!("{}", heap.dump());

  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 3) Release the first block. It turns into a 256-byte free block at
  //    the front of the chain.
  // --------------------------------------------------------------------
  heap.release(first)?;
  println!("\n[3] Release the first block");
  println!("{}", heap.dump());

  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 4) Allocate 64 bytes. First-fit reuses the 256-byte free block and
  //    splits it, leaving a free remainder in the middle.
  // --------------------------------------------------------------------
  let third = heap.allocate(64)?;
  println!("\n[4] Allocate 64 bytes (observe the split)");
  println!(
    "[4] third == first? {}",
    if third == first {
      "Yes, it reused the freed block"
    } else {
      "No, it allocated somewhere else"
    }
  );
  println!("{}", heap.dump());

  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 5) Grow the second block with resize. The payload moves, but its
  //    bytes travel along.
  // --------------------------------------------------------------------
  heap.payload_mut(second)?.fill(0x11);
  let moved = heap.resize(second, 256)?;
  println!(
    "\n[5] Resize the 64-byte block to 256, offset {} -> {}",
    second.offset(),
    moved.offset()
  );
  println!(
    "[5] first 64 bytes preserved? {}",
    heap.payload(moved)?[..64].iter().all(|b| *b == 0x11)
  );
  println!("{}", heap.dump());

  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 6) Release everything. Coalescing folds the chain back into one
  //    free block.
  // --------------------------------------------------------------------
  heap.release(third)?;
  heap.release(moved)?;
  println!("\n[6] Release everything (observe coalescing)");
  println!("{}", heap.dump());

  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 7) Operation counters, then teardown. A clean report means every
  //    allocation was matched by a release.
  // --------------------------------------------------------------------
  println!("\n[7] Stats: {:#?}", heap.stats());

  let report = heap.deinit();
  println!("[7] Teardown: {report:?}, clean = {}", report.is_clean());

  Ok(())
}
