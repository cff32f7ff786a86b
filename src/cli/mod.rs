pub mod auth;
pub mod devices;
pub mod output;
pub mod sensors;

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use crate::models::level::LevelChange;

pub const BIN_NAME: &str = "tdlive";

/// Exit status for a missing or unknown command and for bad arguments.
pub const USAGE_EXIT_CODE: i32 = 1;

#[derive(Parser)]
#[command(
    name = "tdlive",
    version,
    about = "Telldus Live CLI - dim devices and read sensors"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON instead of plain text
    #[arg(long = "json", global = true, conflicts_with = "table")]
    pub json: bool,

    /// Output listings as a table
    #[arg(short = 't', long = "table", global = true)]
    pub table: bool,

    /// Verbose output (log HTTP requests/responses to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Credentials file [default: auth.yml next to the executable]
    #[arg(long = "auth-file", env = "TDLIVE_AUTH_FILE", global = true, value_name = "PATH")]
    pub auth_file: Option<PathBuf>,

    /// API base URL
    #[arg(long, env = "TDLIVE_SITE", global = true, value_name = "URL")]
    pub site: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List devices
    Devices,

    /// Set a device's dim level, or adjust it with +N / -N
    #[command(allow_negative_numbers = true)]
    Dim {
        /// Device ID
        device_id: i64,
        /// New level in percent (0-100), or +N / -N relative to the current level
        #[arg(allow_hyphen_values = true)]
        amount: LevelChange,
    },

    /// List sensors
    Sensors,

    /// Show a sensor and its readings
    Sensor {
        /// Sensor ID
        sensor_id: i64,
    },

    /// Run the OAuth handshake and write the credentials file
    Authorize {
        /// Application consumer key
        #[arg(long)]
        consumer_key: Option<String>,
        /// Application consumer secret
        #[arg(long)]
        consumer_secret: Option<String>,
    },
}

pub fn print_usage() {
    println!("Usage:");
    println!("  {} command [argument]...", BIN_NAME);
}

/// Map a parse failure to an exit code. A missing or unknown command prints
/// the short usage; other argument errors print clap's message to stderr.
/// `--help` and `--version` are left to clap.
pub fn handle_parse_error(err: clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::MissingSubcommand
        | ErrorKind::InvalidSubcommand
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            print_usage();
            USAGE_EXIT_CODE
        }
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => {
            let _ = err.print();
            USAGE_EXIT_CODE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once(BIN_NAME).chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_dim_relative() {
        let cli = parse(&["dim", "42", "+5"]).unwrap();
        match cli.command {
            Commands::Dim { device_id, amount } => {
                assert_eq!(device_id, 42);
                assert_eq!(amount, LevelChange::Increase(5));
            }
            _ => panic!("expected dim"),
        }
    }

    #[test]
    fn test_parse_dim_negative_step() {
        let cli = parse(&["dim", "42", "-10"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Dim { amount: LevelChange::Decrease(10), .. }
        ));
    }

    #[test]
    fn test_parse_dim_rejects_garbage_amount() {
        let err = parse(&["dim", "42", "abc"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("Could not parse new level: abc"));
    }

    #[test]
    fn test_parse_dim_requires_two_arguments() {
        let err = parse(&["dim", "42"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_unknown_command_kind() {
        let err = parse(&["frobnicate"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_argument_errors_map_to_usage_exit_code() {
        let err = parse(&["dim", "42", "abc"]).err().unwrap();
        assert_eq!(handle_parse_error(err), USAGE_EXIT_CODE);

        let err = parse(&["sensor", "kitchen"]).err().unwrap();
        assert_eq!(handle_parse_error(err), USAGE_EXIT_CODE);
    }

    #[test]
    fn test_json_and_table_conflict() {
        let err = parse(&["devices", "--json", "--table"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse(&["sensor", "7", "--site", "http://localhost:9999", "-v"]).unwrap();
        assert_eq!(cli.site.as_deref(), Some("http://localhost:9999"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Sensor { sensor_id: 7 }));
    }
}
