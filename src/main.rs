//! curview - Browse AWS Cost and Usage Report line items

use clap::Parser;
use curview::{
    cli::{Cli, Command},
    error::{CurviewError, Result},
    filters::FilterUpdate,
    output::get_formatter,
    serve::serve_stdio,
    session::ViewState,
    source::build_source,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet by default; --verbose enables info logs and honours RUST_LOG
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("curview=info"))
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.no_color || !is_terminal::is_terminal(std::io::stdout()) {
        colored::control::set_override(false);
    }

    let filter_spec = cli.filter_spec()?;
    let config = cli.source_config()?;
    info!("Report source: {}", config.display_name());
    let source = build_source(&config)?;

    // The report is fetched exactly once per session
    let mut state = ViewState::load(source.as_ref()).await;
    if filter_spec.is_active() {
        state.update_filters(FilterUpdate {
            date_from: Some(filter_spec.date_from),
            date_to: Some(filter_spec.date_to),
        });
    } else {
        info!("No date filter applied");
    }

    let snapshot = state.snapshot();
    let formatter = get_formatter(cli.json);
    let views = &snapshot.views;

    let output = match cli.command() {
        Command::Serve => return serve_stdio(&mut state).await,
        _ if snapshot.error.is_some() => {
            let message = snapshot.error.clone().unwrap_or_default();
            // Render the error state, then exit non-zero
            if cli.json {
                println!("{}", formatter.format_summary(&snapshot));
            } else {
                eprint!("{}", formatter.format_summary(&snapshot));
            }
            return Err(CurviewError::ReportUnavailable(message));
        }
        Command::Summary => formatter.format_summary(&snapshot),
        Command::Monthly => formatter.format_monthly(&views.monthly),
        Command::Daily => formatter.format_daily(&views.daily),
        Command::Breakdown => formatter.format_breakdown(&views.breakdown),
        Command::Compare => formatter.format_comparison(&views.comparison),
        Command::Items => formatter.format_items(
            &snapshot.filtered_items,
            &snapshot.filters,
            snapshot.total_items,
        ),
    };
    println!("{output}");

    Ok(())
}
