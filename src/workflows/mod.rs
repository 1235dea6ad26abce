//! Workflow orchestration.
//!
//! The controller receives commands from presentation layers, owns the
//! Summary→Export gate, and spawns one task per triggered workflow. Results
//! are applied in completion order: re-triggering a workflow before a prior
//! request resolves means last-to-complete wins. There is deliberately no
//! cancellation; a stale overwrite is an accepted limitation.

mod controller;
mod export;
mod history;
mod listing;
mod summary;

pub use controller::{run_controller, UiCommand};
pub use export::EXPORT_LOCKED_NOTICE;
pub use summary::EMPTY_QUERY_NOTICE;
