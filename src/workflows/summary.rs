//! Natural-language summary workflow.

use crate::api::ApiClient;
use crate::model::SummaryView;

/// Prompt for a summary submitted with an empty or whitespace-only query.
pub const EMPTY_QUERY_NOTICE: &str = "Please enter a query.";

/// Request a summary for `query` (already trimmed and non-empty).
///
/// `None` means the request failed; the executor has notified the user and
/// the summary pane must not change.
pub async fn run(client: &ApiClient, query: &str) -> Option<SummaryView> {
    SummaryView::from_fetched(client.summarize(query).await)
}
