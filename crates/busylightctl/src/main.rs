//! busylightctl - kuando Busylight control CLI
//!
//! Builds 64-byte Busylight programs from YAML/JSON pattern files, prints
//! them, verifies captured buffers and writes them to connected devices.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;
mod pattern;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::DeviceArgs;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "busylightctl")]
#[command(about = "kuando Busylight control CLI - build, inspect and send light programs")]
#[command(version)]
#[command(long_about = "
busylightctl assembles the 64-byte command buffer understood by kuando
Busylight devices. A buffer holds up to seven steps (color, on/off timing,
repeat count, tone and the next step to jump to) plus a configuration record
and a trailing checksum.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a pattern file and print the buffer
    Show {
        /// Pattern file (.yaml, .yml or .json)
        pattern: PathBuf,
    },

    /// Assemble a pattern file and write it to a device
    Send {
        /// Pattern file (.yaml, .yml or .json)
        pattern: PathBuf,

        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Check the checksum of a 64-byte buffer given as hex
    Verify {
        /// 128 hex digits; whitespace is ignored
        #[arg(env = "BUSYLIGHT_BUFFER")]
        hex: String,
    },

    /// Print (or send) the built-in demo pattern
    Demo {
        /// Write the pattern to a device instead of printing it
        #[arg(short, long)]
        send: bool,

        #[command(flatten)]
        device: DeviceArgs,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "busylightctl={log_level},busylight_hid_protocol={log_level},busylight_hid_transport={log_level}"
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = execute_command(&cli);

    // Handle errors with appropriate exit codes
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            ExitCode::from(e.downcast_ref::<CliError>().map_or(1, CliError::exit_code))
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Show { pattern } => commands::show::execute(pattern, cli.json),
        Commands::Send { pattern, device } => commands::send::execute(pattern, device, cli.json),
        Commands::Verify { hex } => commands::verify::execute(hex, cli.json),
        Commands::Demo { send, device } => commands::demo::execute(*send, device, cli.json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_show_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["busylightctl", "show", "pattern.yaml"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(matches!(
            cli.command,
            Commands::Show { ref pattern } if pattern == &PathBuf::from("pattern.yaml")
        ));
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["busylightctl", "demo", "--json", "-vv"])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Demo { send: false, .. }));
        Ok(())
    }

    #[test]
    fn parse_send_with_explicit_ids() -> TestResult {
        let cli = Cli::try_parse_from([
            "busylightctl",
            "send",
            "p.json",
            "--vid",
            "27BB",
            "--pid",
            "0x3BCD",
        ])?;
        match cli.command {
            Commands::Send { device, .. } => {
                assert_eq!(device.ids(), Some((0x27BB, 0x3BCD)));
            }
            _ => return Err("expected send".into()),
        }
        Ok(())
    }

    #[test]
    fn vid_without_pid_is_rejected() {
        let result = Cli::try_parse_from(["busylightctl", "demo", "--send", "--vid", "27BB"]);
        assert!(result.is_err());
    }

    #[test]
    fn send_requires_a_pattern() {
        assert!(Cli::try_parse_from(["busylightctl", "send"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
