// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Hostlink simulator
//
// Entry point. Drives the lifecycle bridge with a stub host and a logging
// engine, then prints what the engine received as JSON.

mod engine;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hostlink_bridge::stub::HostProfile;
use hostlink_core::config::BridgeConfig;
use hostlink_core::error::Result;

use session::ConfigChange;

#[derive(Debug, Parser)]
#[command(name = "hostlink-sim", version, about = "Replay host lifecycle events against the bridge")]
struct Cli {
    /// Host profile (JSON). Defaults to a 1920x1080 landscape device with no cache dir.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Bridge configuration (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Configuration change to deliver after start, as axis:degrees. Repeatable.
    #[arg(long = "rotate", value_name = "AXIS:DEGREES")]
    changes: Vec<ConfigChange>,

    /// Log filter, overriding the configured one. `RUST_LOG` still takes
    /// precedence when set.
    #[arg(long)]
    log: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, kind = ?e.kind(), "simulation failed");
            eprintln!("hostlink-sim: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };
    hostlink_bridge::logging::init(cli.log.as_deref().unwrap_or(config.log_filter.as_str()));

    let profile = match &cli.profile {
        Some(path) => HostProfile::load(path)?,
        None => HostProfile::default(),
    };

    tracing::info!(changes = cli.changes.len(), "simulation starting");
    let summary = session::run(profile, config, &cli.changes)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_accepts_log_filter_and_repeated_rotations() {
        let cli = Cli::try_parse_from([
            "hostlink-sim",
            "--log",
            "debug",
            "--rotate",
            "portrait:90",
            "--rotate",
            "landscape:0",
        ])
        .unwrap();
        assert_eq!(cli.log.as_deref(), Some("debug"));
        assert_eq!(cli.changes.len(), 2);
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_rejects_malformed_rotation() {
        assert!(Cli::try_parse_from(["hostlink-sim", "--rotate", "portrait:45"]).is_err());
    }
}
