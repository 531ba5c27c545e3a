//! Interactive ride-dispatch console.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dispatch_cli::command::{parse_line, USAGE};
use dispatch_cli::session::{Reply, Session};
use dispatch_core::config::DispatchConfig;
use dispatch_core::scenario::build_dispatcher;

#[derive(Parser, Debug)]
#[command(
    name = "dispatch",
    about = "Ride-hailing dispatch console",
    long_about = "Seeds a fleet of users and drivers, then reads commands from stdin\n\
                  to request rides, move them through their lifecycle, pay, and rate."
)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON file with pricing, trip estimate, and seed fleet settings.
    #[arg(long, env = "DISPATCH_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => DispatchConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DispatchConfig::default(),
    };
    tracing::debug!(?config, "configuration loaded");

    let mut session = Session::new(build_dispatcher(&config));
    run_console(
        &mut session,
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
    )
}

fn run_console(
    session: &mut Session,
    input: impl BufRead,
    mut out: impl Write,
    mut err_out: impl Write,
) -> anyhow::Result<()> {
    writeln!(out, "\n===== Ride Dispatch =====")?;
    writeln!(out, "{USAGE}\n")?;

    let mut lines = input.lines();
    loop {
        write!(out, ">> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading command")?;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                tracing::debug!("unparsed input {line:?}: {err}");
                writeln!(out, "Unknown command.\n{USAGE}")?;
                continue;
            }
        };

        match session.execute(command) {
            Ok(Reply::Lines(reply)) => {
                for text in reply {
                    writeln!(out, "{text}")?;
                }
            }
            Ok(Reply::Exit) => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            Err(err) => {
                tracing::debug!(%err, "command failed");
                writeln!(err_out, "Error: {}", err.message())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::test_helpers::demo_dispatcher;

    #[test]
    fn scripted_session_prints_replies_and_errors_continue() {
        let script = "request-ride 1 0 0 3 4 standard\n\
                      advance 1000 start\n\
                      advance 1000 accept\n\
                      bogus\n\
                      summary\n\
                      exit\n\
                      summary\n";
        let mut session = Session::new(demo_dispatcher());
        let mut out = Vec::new();
        let mut errors = Vec::new();
        run_console(&mut session, script.as_bytes(), &mut out, &mut errors).expect("console");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Ride created with id: 1000, type: Standard, distance: 5.00 km"));
        assert!(text.contains("Status: Accepted"));
        assert!(text.contains("Unknown command."));
        assert!(text.contains("#1000 | User=Aarav | Driver=Ramesh | Status=Accepted"));
        assert!(text.trim_end().ends_with("Goodbye!"));
        assert_eq!(
            String::from_utf8(errors).expect("utf8"),
            "Error: Cannot start now\n"
        );
    }

    #[test]
    fn errors_print_their_message_only() {
        let mut session = Session::new(demo_dispatcher());
        let mut out = Vec::new();
        let mut errors = Vec::new();
        run_console(&mut session, "pay 42 cash\n".as_bytes(), &mut out, &mut errors)
            .expect("console");
        assert_eq!(String::from_utf8(errors).expect("utf8"), "Error: Ride not found\n");
    }
}
