//! Console command grammar.
//!
//! Each input line is parsed with clap as if it were a tiny command line.
//! Commands keep their numeric shortcuts (`1` for `list-drivers`, and so on).

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = ">>",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List every driver with availability and rating
    #[command(alias = "1")]
    ListDrivers,
    /// Request a ride: <user> <from-x> <from-y> <to-x> <to-y> <standard|surge|pool>
    #[command(alias = "2", allow_negative_numbers = true)]
    RequestRide {
        user: u32,
        from_x: f64,
        from_y: f64,
        to_x: f64,
        to_y: f64,
        fare_type: String,
    },
    /// Move a ride through its lifecycle
    #[command(alias = "3")]
    Advance {
        ride: u32,
        #[arg(value_enum)]
        action: RideAction,
    },
    /// Pay for a completed ride: <ride> <upi|card|cash>
    #[command(alias = "4")]
    Pay { ride: u32, method: String },
    /// Rate the user or driver of a ride: <ride> <user|driver> <1-5>
    #[command(alias = "5", allow_negative_numbers = true)]
    Rate { ride: u32, who: String, stars: i64 },
    /// List every ride created in this session
    #[command(alias = "6")]
    Summary,
    /// Leave the console
    #[command(alias = "0")]
    Exit,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideAction {
    Accept,
    Start,
    Complete,
    Cancel,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    Line::try_parse_from(words).map(|line| Some(line.command))
}

pub const USAGE: &str = "Commands:
 1) list-drivers
 2) request-ride <userId> <fromX> <fromY> <toX> <toY> <type: standard|surge|pool>
 3) advance <rideId> <action: accept|start|complete|cancel>
 4) pay <rideId> <method: upi|card|cash>
 5) rate <rideId> <user|driver> <1-5>
 6) summary
 0) exit";
