//! Ordering rule for the public program listing.
//!
//! Programs with a cover image come first, newest (highest id) first;
//! programs without one follow, also newest first.

use crate::types::DbId;

/// A row that can be placed in the public listing.
pub trait ListingEntry {
    fn id(&self) -> DbId;
    fn has_main_image(&self) -> bool;
}

/// Partition `entries` by cover presence and sort each group by id descending.
pub fn order_for_listing<T: ListingEntry>(entries: Vec<T>) -> Vec<T> {
    let (mut with_cover, mut without_cover): (Vec<T>, Vec<T>) =
        entries.into_iter().partition(|e| e.has_main_image());

    with_cover.sort_by(|a, b| b.id().cmp(&a.id()));
    without_cover.sort_by(|a, b| b.id().cmp(&a.id()));

    with_cover.extend(without_cover);
    with_cover
}
