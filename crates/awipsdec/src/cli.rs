use std::fmt::Display;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};

const USAGE_SHORT: &str = r#"
This program decodes NWS text products, such as watches, warnings, and forecast discussions, and prints a summary of their contents.

See --help for more details.
"#;

const USAGE_LONG: &str = r#"
This program decodes NWS text products, such as watches, warnings, and forecast discussions, and prints a summary of their contents.

Each product must be saved to its own file, exactly as received:

    awipsdec parse SVRMKX.txt

Use --json to print the complete decoded product in JSON format instead:

    awipsdec parse --json SVRMKX.txt

Products which lack an issuance line are assumed to have been issued at the current time. For archived products, give the time they were received:

    awipsdec --received 2024-06-10T21:56:00Z parse SVRMKX.txt

Problems which affect only part of a product, such as an invalid VTEC string, are logged as warnings. The rest of the product is still printed.
"#;

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print NOTHING but decoded products
    #[arg(short, long)]
    pub quiet: bool,

    /// Fallback issuance time (RFC 3339)
    ///
    /// Used for products which have no issuance line. Defaults to
    /// the current time.
    #[arg(long, value_parser = parse_received)]
    pub received: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Decode a text product and print it
    Parse {
        /// Product file
        file: PathBuf,

        /// Print the decoded product as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_received(arg: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(arg)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Io, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    #[test]
    fn test_clap() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "awipsdec",
            "-vv",
            "--received",
            "2024-06-10T16:56:00-05:00",
            "parse",
            "--json",
            "SVRMKX.txt",
        ])
        .expect("bad args");

        assert_eq!(args.verbose, 2);
        assert!(!args.quiet);
        assert_eq!(
            args.received,
            Some(Utc.with_ymd_and_hms(2024, 6, 10, 21, 56, 0).unwrap())
        );
        match args.command {
            Command::Parse { file, json } => {
                assert_eq!(file, PathBuf::from("SVRMKX.txt"));
                assert!(json);
            }
        }

        assert!(Args::try_parse_from(["awipsdec", "--received", "yesterday", "parse", "x"]).is_err());
        assert!(Args::try_parse_from(["awipsdec", "parse"]).is_err());
    }
}
