use anyhow::Result;
use clap::Parser;
use research_console::cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr and stay silent unless RUST_LOG is set, so
    // the TUI and one-shot stdout output are undisturbed.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();
    let one_shot = args.one_shot();

    match cli::run(args).await {
        Ok(()) => {
            // Explicit exit code 0 for scriptable one-shot modes.
            if one_shot {
                std::process::exit(0);
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}
