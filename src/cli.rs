use crate::api::ApiClient;
use crate::model::{AppConfig, Fetched, Publication, ReportEntry, SummaryView, WorkflowEvent};
use anyhow::{bail, Result};
use clap::Parser;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "research-console",
    version,
    about = "Terminal client for the research summarization service"
)]
pub struct Cli {
    /// Base URL of the research service
    #[arg(long, default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Summarize a query, print the result, and exit (no TUI)
    #[arg(long, value_name = "QUERY")]
    pub summarize: Option<String>,

    /// Print the full publication listing and exit (no TUI)
    #[arg(long)]
    pub list: bool,

    /// Search publications and print the matches (no TUI)
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Print the report history and exit (no TUI)
    #[arg(long)]
    pub history: bool,

    /// Print raw JSON instead of formatted text in one-shot modes
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout
    #[arg(long, default_value = "30s")]
    pub timeout: humantime::Duration,
}

impl Cli {
    /// True when any one-shot output mode is selected; otherwise the
    /// interactive TUI runs.
    pub fn one_shot(&self) -> bool {
        self.summarize.is_some() || self.list || self.search.is_some() || self.history
    }
}

/// Build an `AppConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> AppConfig {
    AppConfig {
        base_url: args.base_url.clone(),
        request_timeout: Duration::from(args.timeout),
        user_agent: format!("research-console/{}", env!("CARGO_PKG_VERSION")),
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if args.one_shot() {
        return run_one_shot(args).await;
    }
    #[cfg(feature = "tui")]
    {
        crate::tui::run(args).await
    }
    #[cfg(not(feature = "tui"))]
    {
        bail!("built without the tui feature; use --summarize, --list, --search or --history")
    }
}

/// Execute a single workflow and print its result, mirroring the event-driven
/// notification path of the interactive mode on stderr.
async fn run_one_shot(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<WorkflowEvent>();
    let client = ApiClient::new(&cfg, Some(event_tx))?;

    let fetched = if let Some(query) = args.summarize.as_deref() {
        let query = query.trim().to_string();
        if query.is_empty() {
            bail!("{}", crate::workflows::EMPTY_QUERY_NOTICE);
        }
        client.summarize(&query).await
    } else if args.list {
        client.publications().await
    } else if let Some(query) = args.search.as_deref() {
        client.search_publications(query.trim()).await
    } else {
        client.report_history().await
    };

    // Notices first, on stderr, so stdout stays machine-consumable.
    while let Ok(ev) = event_rx.try_recv() {
        if let WorkflowEvent::Notice(msg) = ev {
            eprintln!("{msg}");
        }
    }

    if args.summarize.is_some() {
        print_summary(fetched, args.json)
    } else if args.history {
        print_history(&client, fetched, args.json)
    } else {
        print_listing(fetched, args.json)
    }
}

fn print_summary(fetched: Fetched, raw: bool) -> Result<()> {
    if raw {
        if let Fetched::Structured(v) = &fetched {
            println!("{v}");
            return Ok(());
        }
    }
    match SummaryView::from_fetched(fetched) {
        Some(view) => {
            println!("{}", view.as_str());
            Ok(())
        }
        None => bail!("summary request failed"),
    }
}

fn print_listing(fetched: Fetched, raw: bool) -> Result<()> {
    if fetched.is_absent() {
        bail!("listing request failed");
    }
    if raw {
        if let Fetched::Structured(v) = &fetched {
            println!("{v}");
            return Ok(());
        }
    }
    let rows = Publication::list_from(fetched);
    if rows.is_empty() {
        println!("No results found.");
        return Ok(());
    }
    for row in rows {
        let [id, title, author, year] = row.cells();
        println!("{id} | {title} | {author} | {year}");
    }
    Ok(())
}

fn print_history(client: &ApiClient, fetched: Fetched, raw: bool) -> Result<()> {
    if fetched.is_absent() {
        bail!("history request failed");
    }
    if raw {
        if let Fetched::Structured(v) = &fetched {
            println!("{v}");
            return Ok(());
        }
    }
    let entries = ReportEntry::list_from(fetched);
    if entries.is_empty() {
        println!("No previous reports found.");
        return Ok(());
    }
    for entry in entries {
        println!("{} - View: {}", entry.query, client.report_view_url(entry.id));
    }
    Ok(())
}
