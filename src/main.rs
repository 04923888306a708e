mod classes;
mod config;
mod error;
mod experiences;
mod gate;
mod index;
mod ipc;
mod logging;
mod pending;
mod query;
mod seed;
mod session;
mod stats;
mod store;
mod students;
mod teachers;

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let cfg = config::Config::parse();
    logging::init(&cfg.log);

    let mut state = ipc::AppState::new(&cfg);
    tracing::info!(
        delay_ms = cfg.delay_ms,
        empty = cfg.empty,
        require_session = cfg.require_session,
        "lmsd ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("read request line")?;
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => {
                tracing::debug!(id = %req.id, method = %req.method, "request");
                ipc::handle_request(&mut state, req)
            }
            // Can't reply with an id.
            Err(e) => {
                tracing::warn!(error = %e, "unparseable request");
                json!({ "ok": false, "error": { "code": "bad_json", "message": e.to_string() } })
            }
        };
        writeln!(stdout, "{resp}").context("write response")?;
        stdout.flush().context("flush response")?;
    }
    Ok(())
}
