// SPDX-License-Identifier: GPL-3.0-only

//! Widget session replay tool.
//!
//! Runs a JSON script of widget calls and host events against an in-memory
//! host and prints every callback and effect as one JSON line.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use ce_widget::replay;

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ce_widget=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: ce-widget-replay <script.json>");
        return ExitCode::FAILURE;
    };

    let steps = match replay::load_script(&path) {
        Ok(steps) => steps,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Replaying {} step(s) from {}", steps.len(), path.display());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in replay::run_script(steps) {
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to serialize record: {}", e);
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = writeln!(out, "{}", line) {
            tracing::error!("Failed to write output: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
