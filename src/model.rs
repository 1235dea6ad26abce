use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

/// Outcome of one executed request.
///
/// Exactly one variant is produced per call. `Absent` means the request
/// failed at some stage (connect error, non-success status, unreadable
/// body); it carries no error detail because the executor has already
/// surfaced the failure to diagnostics and to the user.
#[derive(Debug, Clone)]
pub enum Fetched {
    /// Body parsed as JSON.
    Structured(serde_json::Value),
    /// Body that is not valid JSON, kept verbatim.
    Text(String),
    /// The request failed; nothing to render.
    Absent,
}

impl Fetched {
    pub fn is_absent(&self) -> bool {
        matches!(self, Fetched::Absent)
    }
}

/// Renderable form of a summary response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryView {
    /// Plain-text summary, rendered verbatim.
    Plain(String),
    /// Structured summary, rendered pretty-printed.
    Json(String),
}

impl SummaryView {
    /// `None` for an absent result: the executor already notified the user
    /// and the summary pane must not change.
    pub fn from_fetched(fetched: Fetched) -> Option<Self> {
        match fetched {
            Fetched::Text(t) => Some(SummaryView::Plain(t)),
            Fetched::Structured(v) => Some(SummaryView::Json(
                serde_json::to_string_pretty(&v).unwrap_or_else(|_| v.to_string()),
            )),
            Fetched::Absent => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SummaryView::Plain(s) | SummaryView::Json(s) => s,
        }
    }
}

/// Gate handed from the Summary workflow to the Export workflow.
///
/// Created disarmed at startup, armed with the submitted query on every
/// non-absent summary result, never reset within a session. Owned solely by
/// the controller task; workflow tasks never touch it directly.
#[derive(Debug, Clone, Default)]
pub struct ExportGate {
    query: Option<String>,
}

impl ExportGate {
    pub fn arm(&mut self, query: impl Into<String>) {
        self.query = Some(query.into());
    }

    /// The attached query, if a summary has completed. Empty queries never
    /// reach `arm`, so `Some` implies a usable query.
    pub fn armed(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

/// One row of the publication listing. Every field is optional on the wire;
/// unknown service fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Publication {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
}

impl Publication {
    /// Table cells with fixed fallbacks for missing (or blank) fields.
    pub fn cells(&self) -> [String; 4] {
        [
            self.id.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
            non_blank(self.title.as_deref())
                .unwrap_or("Untitled")
                .to_string(),
            non_blank(self.author.as_deref())
                .unwrap_or("Unknown")
                .to_string(),
            self.year.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
        ]
    }

    /// Decode a listing response. Anything that is not a JSON array of
    /// records (including an absent result) renders as an empty set.
    pub fn list_from(fetched: Fetched) -> Vec<Publication> {
        match fetched {
            Fetched::Structured(v) => serde_json::from_value(v).unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// One prior report as returned by the history endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportEntry {
    pub id: i64,
    #[serde(default)]
    pub query: String,
}

impl ReportEntry {
    pub fn list_from(fetched: Fetched) -> Vec<ReportEntry> {
        match fetched {
            Fetched::Structured(v) => serde_json::from_value(v).unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

/// A history entry resolved to its per-report view URL, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLink {
    pub query: String,
    pub view_url: String,
}

/// Events emitted by the controller and workflow tasks, consumed by
/// presentation layers (TUI or one-shot CLI output).
#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    /// Summary request in flight; render the "generating" placeholder.
    SummaryPending,
    /// Summary completed with content; replaces the summary pane.
    SummaryRendered { body: SummaryView },
    /// The export control is now armed with this query.
    ExportUnlocked { query: String },
    /// Hand this report URL to the host browser; no response is parsed.
    OpenReport { url: String },
    /// Full replacement of the publication table contents.
    ListingRendered { rows: Vec<Publication> },
    /// Full replacement of the report-history list.
    HistoryRendered { entries: Vec<ReportLink> },
    /// Blocking user notification (precondition prompts, request failures).
    Notice(String),
    /// Non-blocking status line update.
    Status(String),
}
