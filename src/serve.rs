//! Line-delimited JSON event loop
//!
//! Lets a dashboard front end drive a session over stdio. Each input line is
//! one event object tagged by `"event"`; each event yields exactly one output
//! line.
//!
//! # Example Session
//!
//! ```text
//! > {"event": "update_filters", "date_from": "2024-02-01"}
//! < {"monthly": [...], "daily": [...], ..., "filters": {"date_from": "2024-02-01", "date_to": ""}}
//! > {"event": "request_export"}
//! < {"export": {"acknowledged": true, "filtered_items": 12, "requests": 1}}
//! > {"event": "bogus"}
//! < {"error": "invalid event: ..."}
//! ```
//!
//! Blank lines are ignored and end of input ends the session.

use crate::error::Result;
use crate::session::{DashboardEvent, EventOutcome, ViewState};
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Answer a single raw event line
pub fn respond(state: &mut ViewState, line: &str) -> String {
    let event = match serde_json::from_str::<DashboardEvent>(line) {
        Ok(event) => event,
        Err(e) => {
            warn!("Ignoring invalid event: {}", e);
            return json!({ "error": format!("invalid event: {e}") }).to_string();
        }
    };

    debug!("Handling event {:?}", event);
    let response = match state.handle(event) {
        EventOutcome::Snapshot(snapshot) => serde_json::to_string(&snapshot),
        EventOutcome::Export(ack) => serde_json::to_string(&json!({ "export": ack })),
    };

    response.unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string())
}

/// Process events from `reader` until end of input, writing one line per event
pub async fn run_event_loop<R, W>(state: &mut ViewState, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0usize;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = respond(state, line);
        writer.write_all(response.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        handled += 1;
    }

    info!("Event stream closed after {} events", handled);
    Ok(())
}

/// Run the event loop over the process's stdin and stdout
pub async fn serve_stdio(state: &mut ViewState) -> Result<()> {
    info!("Serving dashboard events on stdio");
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    run_event_loop(state, stdin, stdout).await
}
