use crate::model::{Publication, ReportLink, SummaryView, WorkflowEvent};

pub const TAB_TITLES: [&str; 4] = ["Summary", "Publications", "History", "Help"];

/// All rendered UI regions. Owned by the UI thread only; no cross-thread
/// mutation — workflow results arrive as events and are applied here.
pub struct UiState {
    pub tab: usize,
    pub status: String,
    /// Blocking notification; all other input is ignored until dismissed.
    pub notice: Option<String>,

    // Summary pane
    pub query_input: String,
    pub query_editing: bool,
    pub summary_pending: bool,
    pub summary: Option<SummaryView>,
    /// Render-side mirror of the controller-owned export gate.
    pub export_query: Option<String>,

    // Publications pane
    pub search_input: String,
    pub search_editing: bool,
    pub rows: Vec<Publication>,
    pub listing_loaded: bool,
    pub refreshed_at: Option<String>,

    // History pane
    pub history: Vec<ReportLink>,
    pub history_loaded: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            status: String::new(),
            notice: None,
            query_input: String::new(),
            query_editing: false,
            summary_pending: false,
            summary: None,
            export_query: None,
            search_input: String::new(),
            search_editing: false,
            rows: Vec::new(),
            listing_loaded: false,
            refreshed_at: None,
            history: Vec::new(),
            history_loaded: false,
        }
    }
}

/// Apply one workflow event to the rendered state. `OpenReport` is handled
/// by the event loop itself because it has a side effect (launching the
/// host browser).
pub fn apply_event(state: &mut UiState, ev: WorkflowEvent) {
    match ev {
        WorkflowEvent::SummaryPending => {
            state.summary_pending = true;
        }
        WorkflowEvent::SummaryRendered { body } => {
            state.summary = Some(body);
            state.summary_pending = false;
        }
        WorkflowEvent::ExportUnlocked { query } => {
            state.export_query = Some(query);
            state.status = "Report export unlocked.".into();
        }
        WorkflowEvent::ListingRendered { rows } => {
            // Destructive replacement: prior rows never accumulate.
            state.rows = rows;
            state.listing_loaded = true;
            state.refreshed_at = clock_stamp();
        }
        WorkflowEvent::HistoryRendered { entries } => {
            state.history = entries;
            state.history_loaded = true;
        }
        WorkflowEvent::Notice(msg) => {
            state.notice = Some(msg);
        }
        WorkflowEvent::Status(msg) => {
            state.status = msg;
        }
        WorkflowEvent::OpenReport { .. } => {}
    }
}

pub fn clock_stamp() -> Option<String> {
    let fmt = time::macros::format_description!("[hour]:[minute]:[second]");
    time::OffsetDateTime::now_local()
        .unwrap_or_else(|_| time::OffsetDateTime::now_utc())
        .format(&fmt)
        .ok()
}
