//! Terminal client for the research summarization service.
//!
//! Four independent workflows — query summarization, report export,
//! publication listing, report history — funnel through one request
//! executor. The Summary→Export gate is the only cross-workflow state; a
//! failure or absence of one workflow never affects the others.

pub mod api;
pub mod cli;
pub mod model;
#[cfg(feature = "tui")]
mod tui;
pub mod workflows;
