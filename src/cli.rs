//! CLI argument definitions.

use std::ffi::OsString;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::duration;

/// Version reported by `--version`; stamped at build time when
/// `UUID_GENERATOR_VERSION` is set.
pub const VERSION: &str = match option_env!("UUID_GENERATOR_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Subcommand run when none is given.
pub const DEFAULT_COMMAND: &str = "infinite";

/// Top-level CLI parser for `uuid-generator`.
#[derive(Debug, Parser)]
#[command(name = "uuid-generator", version = VERSION, about = "Generates UUIDs")]
pub struct Cli {
    /// The command to execute; `infinite` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generates UUIDs until the app is stopped.
    #[command(visible_alias = "i")]
    Infinite(InfiniteArgs),
    /// Generates one UUID or if specified the amount desired.
    #[command(visible_alias = "g")]
    Generate {
        /// How many UUIDs to print; anything but a positive number prints one.
        #[arg(allow_negative_numbers = true)]
        count: Option<String>,
    },
}

/// Options of the `infinite` command.
#[derive(Debug, Args)]
pub struct InfiniteArgs {
    /// create a uuid every n amount of time
    #[arg(long, env = "REFRESH", default_value = "1s", value_parser = parse_refresh)]
    pub refresh: Duration,
}

/// Parses command-line arguments into the command to run.
///
/// An invocation without a subcommand resolves to [`DEFAULT_COMMAND`] with
/// its defaults, so `REFRESH` is honoured on that path too.
///
/// # Errors
///
/// Returns the clap error for invalid input and for `--help`/`--version`
/// requests.
pub fn parse_command<I, T>(args: I) -> Result<Command, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if let Some(command) = Cli::try_parse_from(&args)?.command {
        return Ok(command);
    }

    let program = args.first().cloned().unwrap_or_else(|| "uuid-generator".into());
    let resolved = Cli::try_parse_from([program, DEFAULT_COMMAND.into()])?;
    resolved.command.ok_or_else(|| {
        Cli::command().error(ErrorKind::MissingSubcommand, "no subcommand to run")
    })
}

/// Parses a refresh interval, which must be longer than zero.
///
/// # Errors
///
/// Returns a message when the text is not a duration or is not positive.
pub fn parse_refresh(raw: &str) -> Result<Duration, String> {
    let refresh = duration::parse(raw).map_err(|err| err.to_string())?;
    if refresh.is_zero() {
        return Err("refresh interval must be positive".to_string());
    }
    Ok(refresh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_infinite_without_subcommand() {
        let command = parse_command(["uuid-generator"]).unwrap();
        let Command::Infinite(args) = command else {
            panic!("expected infinite, got {command:?}");
        };
        if std::env::var_os("REFRESH").is_none() {
            assert_eq!(args.refresh, Duration::from_secs(1));
        }
    }

    #[test]
    fn parses_generate_with_count() {
        let command = parse_command(["uuid-generator", "generate", "12"]).unwrap();
        assert!(matches!(command, Command::Generate { count: Some(c) } if c == "12"));
    }

    #[test]
    fn parses_generate_alias_without_count() {
        let command = parse_command(["uuid-generator", "g"]).unwrap();
        assert!(matches!(command, Command::Generate { count: None }));
    }

    #[test]
    fn generate_keeps_negative_and_junk_counts() {
        let command = parse_command(["uuid-generator", "generate", "-3"]).unwrap();
        assert!(matches!(command, Command::Generate { count: Some(c) } if c == "-3"));

        let command = parse_command(["uuid-generator", "generate", "lots"]).unwrap();
        assert!(matches!(command, Command::Generate { count: Some(c) } if c == "lots"));
    }

    #[test]
    fn parses_infinite_with_refresh() {
        let command = parse_command(["uuid-generator", "infinite", "--refresh", "250ms"]).unwrap();
        assert!(
            matches!(command, Command::Infinite(args) if args.refresh == Duration::from_millis(250))
        );
    }

    #[test]
    fn parses_infinite_alias() {
        let command = parse_command(["uuid-generator", "i", "--refresh", "2s"]).unwrap();
        assert!(matches!(command, Command::Infinite(args) if args.refresh == Duration::from_secs(2)));
    }

    #[test]
    fn rejects_zero_refresh() {
        let err = parse_command(["uuid-generator", "infinite", "--refresh", "0s"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_malformed_refresh() {
        let err = parse_command(["uuid-generator", "infinite", "--refresh", "soon"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_unknown_subcommand() {
        let err = parse_command(["uuid-generator", "nonsense"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn version_flag_is_reported_as_display_request() {
        let err = parse_command(["uuid-generator", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn refresh_parser_requires_positive_duration() {
        assert_eq!(parse_refresh("1m30s"), Ok(Duration::from_secs(90)));
        assert!(parse_refresh("0").is_err());
        assert!(parse_refresh("-5s").is_err());
    }
}
