//! Catalog of game locations, keyed by storage volume.
//!
//! The catalog maps a volume identifier to the ordered list of games
//! currently living on that volume. It is persisted as a single JSON
//! document and rewritten in full on every mutation.

mod model;
mod store;

pub use model::*;
pub use store::*;

#[cfg(test)]
mod tests;
