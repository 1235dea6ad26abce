//! Report-history workflow. Runs once at startup; no user-initiated refresh.

use crate::api::ApiClient;
use crate::model::{ReportEntry, ReportLink, WorkflowEvent};
use tokio::sync::mpsc::UnboundedSender;

pub async fn load(client: ApiClient, event_tx: UnboundedSender<WorkflowEvent>) {
    let fetched = client.report_history().await;
    let entries = ReportEntry::list_from(fetched)
        .into_iter()
        .map(|e| ReportLink {
            view_url: client.report_view_url(e.id),
            query: e.query,
        })
        .collect();
    let _ = event_tx.send(WorkflowEvent::HistoryRendered { entries });
}
