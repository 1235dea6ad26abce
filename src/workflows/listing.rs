//! Publication listing workflow.
//!
//! The initial load and search share one routine. Each run fully replaces
//! the prior row set; an absent or non-array result renders as an empty set,
//! which the presentation layer shows as a single placeholder row.

use crate::api::ApiClient;
use crate::model::{Publication, WorkflowEvent};
use tokio::sync::mpsc::UnboundedSender;

/// `query: None` is the unfiltered initial load. `Some` is a search; an
/// empty query is still forwarded, the service returns the full set.
pub async fn load(client: ApiClient, query: Option<String>, event_tx: UnboundedSender<WorkflowEvent>) {
    let fetched = match query.as_deref() {
        Some(q) => client.search_publications(q).await,
        None => client.publications().await,
    };
    let rows = Publication::list_from(fetched);
    let _ = event_tx.send(WorkflowEvent::ListingRendered { rows });
}
