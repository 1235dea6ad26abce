//! Report export workflow.
//!
//! Stateless and idempotent: every trigger re-derives from the current gate.
//! The URL is handed to the presentation layer to open in the host browser;
//! no response is ever parsed client-side.

use crate::api::ApiClient;
use crate::model::{ExportGate, WorkflowEvent};
use tokio::sync::mpsc::UnboundedSender;

/// Prompt for an export attempted before any summary completed.
pub const EXPORT_LOCKED_NOTICE: &str = "Please generate a summary first.";

pub fn run(client: &ApiClient, gate: &ExportGate, event_tx: &UnboundedSender<WorkflowEvent>) {
    match gate.armed() {
        Some(query) => {
            let url = client.report_url(query);
            let _ = event_tx.send(WorkflowEvent::OpenReport { url });
        }
        None => {
            let _ = event_tx.send(WorkflowEvent::Notice(EXPORT_LOCKED_NOTICE.into()));
        }
    }
}
