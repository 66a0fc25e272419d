//! Gallery slot-order arithmetic.
//!
//! Slot 0 is the cover image. Enrollment assigns `0..n` in upload order;
//! later additions append after the current maximum, which counts as 0 for
//! an empty gallery.

use crate::types::SlotOrder;

/// Slot holding a program's cover (main) image.
pub const MAIN_IMAGE_SLOT: SlotOrder = 0;

/// First slot for images appended after `current_max`.
///
/// An empty gallery is treated as having maximum [`MAIN_IMAGE_SLOT`], so the
/// first appended image lands on slot 1 and the cover slot stays free.
pub fn next_slot_order(current_max: Option<SlotOrder>) -> SlotOrder {
    current_max.unwrap_or(MAIN_IMAGE_SLOT) + 1
}

/// Slots for `count` images appended after `current_max`, in input order.
pub fn append_slots(current_max: Option<SlotOrder>, count: usize) -> Vec<SlotOrder> {
    let start = next_slot_order(current_max);
    (0..count).map(|i| start + i as SlotOrder).collect()
}

/// Slots for the images uploaded with a brand new program: `0..count`.
pub fn initial_slots(count: usize) -> Vec<SlotOrder> {
    (0..count).map(|i| MAIN_IMAGE_SLOT + i as SlotOrder).collect()
}
