//! Workflow lifecycle controller.
//!
//! Owns the `ExportGate` and spawns workflow tasks in response to UI
//! commands, emitting events for presentation layers. This is the only task
//! that mutates cross-workflow state, so no locks are needed.

use crate::api::ApiClient;
use crate::model::{AppConfig, ExportGate, SummaryView, WorkflowEvent};
use crate::workflows::{export, history, listing, summary};
use anyhow::Result;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Commands emitted by presentation layers to trigger workflows.
#[derive(Debug, Clone)]
pub enum UiCommand {
    SubmitSummary { query: String },
    ExportReport,
    SearchListing { query: String },
    Quit,
}

/// Completions reported back by spawned workflow tasks. Only the summary
/// workflow needs one: its completion is what arms the export gate.
enum TaskDone {
    Summary {
        query: String,
        view: Option<SummaryView>,
    },
}

/// Drive workflows until `Quit` (or the command channel closes).
///
/// The listing and history loads fire immediately on startup, run
/// concurrently with each other and with any user-triggered workflow, and
/// report straight to the presentation layer.
pub async fn run_controller(
    cfg: &AppConfig,
    event_tx: UnboundedSender<WorkflowEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let client = ApiClient::new(cfg, Some(event_tx.clone()))?;
    let mut gate = ExportGate::default();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<TaskDone>();

    let _ = event_tx.send(WorkflowEvent::Status(format!(
        "Connected to {}",
        client.base_url()
    )));
    tokio::spawn(listing::load(client.clone(), None, event_tx.clone()));
    tokio::spawn(history::load(client.clone(), event_tx.clone()));

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(UiCommand::SubmitSummary { query }) => {
                    let query = query.trim().to_string();
                    if query.is_empty() {
                        // Precondition prompt: no request, no diagnostic entry.
                        let _ = event_tx.send(WorkflowEvent::Notice(
                            summary::EMPTY_QUERY_NOTICE.into(),
                        ));
                        continue;
                    }
                    // Visible latency feedback before the request resolves.
                    let _ = event_tx.send(WorkflowEvent::SummaryPending);
                    let client = client.clone();
                    let done_tx = done_tx.clone();
                    tokio::spawn(async move {
                        let view = summary::run(&client, &query).await;
                        let _ = done_tx.send(TaskDone::Summary { query, view });
                    });
                }
                Some(UiCommand::ExportReport) => {
                    export::run(&client, &gate, &event_tx);
                }
                Some(UiCommand::SearchListing { query }) => {
                    let query = query.trim().to_string();
                    tokio::spawn(listing::load(
                        client.clone(),
                        Some(query),
                        event_tx.clone(),
                    ));
                }
                Some(UiCommand::Quit) | None => break,
            },
            // A local done_tx is always held, so this branch only yields
            // actual task completions.
            done = done_rx.recv() => {
                if let Some(TaskDone::Summary { query, view }) = done {
                    if let Some(body) = view {
                        let _ = event_tx.send(WorkflowEvent::SummaryRendered { body });
                        // The single write path to the export gate.
                        gate.arm(&query);
                        let _ = event_tx.send(WorkflowEvent::ExportUnlocked { query });
                    }
                    // Absent result: the executor already notified the user;
                    // the summary pane stays as it was.
                }
            }
        }
    }

    Ok(())
}
