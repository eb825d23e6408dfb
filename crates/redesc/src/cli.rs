use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Smallest number of videos one invocation may be limited to
pub const MIN_LIMIT: usize = 10;

#[derive(Parser, Debug)]
#[command(
    name = "redesc",
    version,
    about = "Regex find/replace over the titles and descriptions of a YouTube playlist"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace matches of a regular expression, reviewing every change.
    Substitute(SubstituteArgs),
    /// Authorize access to the YouTube account.
    Authorize,
    /// Give untagged videos the tags listed for them in a JSON file.
    BackfillTags(BackfillArgs),
}

#[derive(Args, Debug)]
pub struct SubstituteArgs {
    /// Regular expression to search for. Wrap in quotes (`"..."`) to keep
    /// leading or trailing spaces.
    #[arg(allow_hyphen_values = true)]
    pub expression: String,

    /// Replacement; `$1`, `${name}` refer to capture groups, `$$` is a dollar.
    /// Pass `""` to delete the matches.
    #[arg(allow_hyphen_values = true)]
    pub replacement: String,

    /// Apply at most this many changes (at least 10).
    #[arg(short, long, value_parser = parse_limit)]
    pub limit: Option<usize>,

    /// Playlist to edit instead of the configured default.
    #[arg(short, long)]
    pub playlist: Option<String>,

    /// Leave titles untouched.
    #[arg(long)]
    pub no_titles: bool,

    /// Leave descriptions untouched.
    #[arg(long)]
    pub no_descriptions: bool,
}

#[derive(Args, Debug)]
pub struct BackfillArgs {
    /// JSON object mapping video IDs to tag lists.
    pub mapping: PathBuf,

    /// Playlist to backfill instead of the configured default.
    #[arg(short, long)]
    pub playlist: Option<String>,
}

fn parse_limit(value: &str) -> Result<usize, String> {
    let limit: usize = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if limit < MIN_LIMIT {
        return Err(format!("limit must be at least {}", MIN_LIMIT));
    }
    Ok(limit)
}

/// Parse CLI arguments.
pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn substitute(args: &[&str]) -> SubstituteArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Substitute(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_substitute_defaults() {
        let args = substitute(&["redesc", "substitute", "cat", "dog"]);
        assert_eq!(args.expression, "cat");
        assert_eq!(args.replacement, "dog");
        assert_eq!(args.limit, None);
        assert_eq!(args.playlist, None);
        assert!(!args.no_titles);
        assert!(!args.no_descriptions);
    }

    #[test]
    fn test_substitute_options() {
        let args = substitute(&[
            "redesc",
            "substitute",
            "--limit",
            "25",
            "--playlist",
            "PL123",
            "--no-titles",
            "cat",
            "\"\"",
        ]);
        assert_eq!(args.limit, Some(25));
        assert_eq!(args.playlist.as_deref(), Some("PL123"));
        assert!(args.no_titles);
        assert_eq!(args.expression, "cat");
        assert_eq!(args.replacement, "\"\"");
    }

    #[test]
    fn test_limit_below_minimum_is_rejected() {
        assert!(Cli::try_parse_from(["redesc", "substitute", "a", "b", "--limit", "9"]).is_err());
        assert!(Cli::try_parse_from(["redesc", "substitute", "a", "b", "--limit", "x"]).is_err());
    }

    #[test]
    fn test_backfill_and_authorize() {
        let cli = Cli::try_parse_from(["redesc", "backfill-tags", "tags.json"]).unwrap();
        match cli.command {
            Commands::BackfillTags(args) => assert_eq!(args.mapping, PathBuf::from("tags.json")),
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["redesc", "authorize"]).unwrap();
        assert!(matches!(cli.command, Commands::Authorize));
    }
}
