//! Background relocation of game folders between volumes.
//!
//! One [`MoveBatch`] runs at a time. The worker thread owns its copies of the
//! selected records, performs all blocking filesystem work, and reports back
//! over a channel: one progress event per record, then a final outcome. The
//! interactive thread reconciles the catalog once the outcome arrives.

mod batch;
mod plan;
mod thread;
mod types;

pub use batch::*;
pub use plan::destination_path;
pub use types::*;
