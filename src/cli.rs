//! Command-line interface for goimportfmt.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Root directory to format
    pub dir: PathBuf,

    /// Comma-separated exclusion fragments, one entry per `-e`
    pub exclude_dir: Vec<String>,

    /// Only list files that would change
    pub list: bool,

    /// Local import path prefixes
    pub local: Option<String>,

    /// Path to config file (overrides auto-discovery)
    pub config: Option<PathBuf>,

    /// Enable debug output
    pub debug: bool,

    /// Only log warnings and errors
    pub silent: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("goimportfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Normalize the import blocks of every Go file under a directory")
        .arg(
            Arg::new("dir")
                .help("Root directory to scan")
                .value_name("DIR")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("exclude-dir")
                .short('e')
                .long("exclude-dir")
                .help("Skip files whose path contains any of these comma-separated fragments (can be repeated) [default: vendor]")
                .value_name("FRAGMENTS")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("List files whose imports would change without writing them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("local")
                .long("local")
                .help("Put imports beginning with these comma-separated prefixes after third-party imports")
                .value_name("PREFIX"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config and every processed file)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (only warnings and errors are logged)")
                .action(ArgAction::SetTrue)
                .conflicts_with("debug"),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        dir: matches
            .get_one::<PathBuf>("dir")
            .cloned()
            .unwrap_or_default(),
        exclude_dir: matches
            .get_many::<String>("exclude-dir")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        list: matches.get_flag("list"),
        local: matches.get_one::<String>("local").cloned(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        let cmd = build_cli();
        cmd.clone().debug_assert();
        assert_eq!(cmd.get_name(), "goimportfmt");
    }

    #[test]
    fn test_dir_is_required() {
        let result = build_cli().try_get_matches_from(vec!["goimportfmt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let args = parse_args_from(vec!["goimportfmt", "src"]);
        assert_eq!(args.dir, PathBuf::from("src"));
        assert!(args.exclude_dir.is_empty());
        assert!(!args.list);
        assert_eq!(args.local, None);
        assert_eq!(args.config, None);
        assert!(!args.debug);
        assert!(!args.silent);
    }

    #[test]
    fn test_exclude_dir_single() {
        let args = parse_args_from(vec!["goimportfmt", "-e", "vendor,testdata", "."]);
        assert_eq!(args.exclude_dir, vec!["vendor,testdata"]);
    }

    #[test]
    fn test_exclude_dir_repeated() {
        let args = parse_args_from(vec![
            "goimportfmt",
            "--exclude-dir",
            "vendor",
            "-e",
            "third_party",
            ".",
        ]);
        assert_eq!(args.exclude_dir, vec!["vendor", "third_party"]);
    }

    #[test]
    fn test_list_and_local() {
        let args = parse_args_from(vec!["goimportfmt", "-l", "--local", "github.com/acme", "."]);
        assert!(args.list);
        assert_eq!(args.local.as_deref(), Some("github.com/acme"));
    }

    #[test]
    fn test_config_flag() {
        let args = parse_args_from(vec!["goimportfmt", "-c", "my.toml", "."]);
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
    }

    #[test]
    fn test_debug_flag() {
        let args = parse_args_from(vec!["goimportfmt", "-D", "."]);
        assert!(args.debug);
    }

    #[test]
    fn test_silent_long_flag() {
        let args = parse_args_from(vec!["goimportfmt", "--silent", "."]);
        assert!(args.silent);
    }

    #[test]
    fn test_debug_conflicts_with_silent() {
        let result = build_cli().try_get_matches_from(vec!["goimportfmt", "-D", "-S", "."]);
        assert!(result.is_err());
    }
}
