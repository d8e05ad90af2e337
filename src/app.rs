//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog store, the
//! two-pane selection state and the in-flight move batch, if any.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
