//! CLI argument parsing module for depbump
//!
//! Flags use single-dash long names (`-nopush`, `-version v1.2.3`) and are
//! only recognised before PATH; every argument after PATH belongs to the
//! post-update command, even if it starts with `-`. `normalize_args` rewrites
//! that convention into something clap understands.

use crate::domain::{RunConfig, DEFAULT_BASE_BRANCH, DEFAULT_TOKEN_VAR};
use crate::error::ConfigError;
use clap::Parser;

/// Flags that take a value
const VALUE_FLAGS: &[&str] = &["version", "token", "base"];

/// Flags that take no value
const SWITCH_FLAGS: &[&str] = &["nopush", "push", "nopr", "verbose", "help"];

/// Returns the flag name if `arg` spells a known flag with one or two dashes
fn flag_name(arg: &str) -> Option<&str> {
    let name = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))?;
    (VALUE_FLAGS.contains(&name) || SWITCH_FLAGS.contains(&name)).then_some(name)
}

/// Rewrite raw arguments for clap
///
/// Known flags before PATH become `--name`; PATH is followed by `--` so the
/// post-update command is taken verbatim. Unknown dashed arguments are left
/// alone for clap to reject.
pub fn normalize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<String> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        if arg == "--" {
            normalized.push(arg);
            normalized.extend(args);
            break;
        }

        let name = flag_name(&arg).map(str::to_string);
        match name {
            Some(name) => {
                let takes_value = VALUE_FLAGS.contains(&name.as_str());
                normalized.push(format!("--{}", name));
                if takes_value {
                    if let Some(value) = args.next() {
                        normalized.push(value);
                    }
                }
            }
            None if arg.starts_with('-') && arg != "-" => normalized.push(arg),
            None => {
                normalized.push(arg);
                let rest: Vec<String> = args.collect();
                if !rest.is_empty() {
                    normalized.push("--".to_string());
                    normalized.extend(rest);
                }
                break;
            }
        }
    }

    normalized
}

/// Bump a Go module dependency, commit it on a branch and open a pull request
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depbump",
    about = "Bump a single Go module dependency, commit it on a branch and open a pull request",
    override_usage = "depbump [-nopush|-push] [-nopr] [-version VERSION] [-token NAME] [-base BRANCH] PATH [COMMAND]..."
)]
pub struct CliArgs {
    /// Do not push the update branch (implies -nopr)
    #[arg(long = "nopush", overrides_with = "push")]
    pub no_push: bool,

    /// Push the update branch to origin (default)
    #[arg(long = "push", overrides_with = "no_push")]
    pub push: bool,

    /// Do not open a pull request
    #[arg(long = "nopr")]
    pub no_pr: bool,

    /// Version to upgrade to (default: latest)
    #[arg(long = "version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Environment variable holding the GitHub token
    #[arg(long = "token", value_name = "NAME", default_value = DEFAULT_TOKEN_VAR)]
    pub token: String,

    /// Branch the pull request targets
    #[arg(long = "base", value_name = "BRANCH", default_value = DEFAULT_BASE_BRANCH)]
    pub base: String,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Module path of the dependency to bump
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Command to run after the upgrade; tokens may use template fields like {{version}}
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub post_command: Vec<String>,
}

impl CliArgs {
    /// Parse arguments in depbump's flag convention
    pub fn try_parse_args<I, S>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// Build the run configuration, resolving the token with `lookup`
    pub fn into_config<F>(self, lookup: F) -> Result<RunConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(&self.token).filter(|value| !value.is_empty());
        let config = RunConfig {
            path: self.path,
            version: self.version.filter(|v| !v.is_empty()),
            push: !self.no_push,
            pull_request: !self.no_pr,
            token_var: self.token,
            token,
            base: self.base,
            post_command: self.post_command,
            verbose: self.verbose,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_args(args.iter().copied()).unwrap()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_normalize_single_dash_flags() {
        let args = normalize_args(["depbump", "-nopush", "-version", "v1.2.3", "github.com/foo/bar"]);
        assert_eq!(
            args,
            vec!["depbump", "--nopush", "--version", "v1.2.3", "github.com/foo/bar"]
        );
    }

    #[test]
    fn test_normalize_fences_post_command() {
        let args = normalize_args(["depbump", "github.com/foo/bar", "make", "-nopr", "--x"]);
        assert_eq!(
            args,
            vec!["depbump", "github.com/foo/bar", "--", "make", "-nopr", "--x"]
        );
    }

    #[test]
    fn test_normalize_leaves_unknown_flags() {
        let args = normalize_args(["depbump", "-bogus", "github.com/foo/bar"]);
        assert_eq!(args, vec!["depbump", "-bogus", "github.com/foo/bar"]);
    }

    #[test]
    fn test_default_args() {
        let args = parse(&["depbump", "github.com/foo/bar"]);
        assert_eq!(args.path, "github.com/foo/bar");
        assert!(!args.no_push);
        assert!(!args.no_pr);
        assert!(args.version.is_none());
        assert_eq!(args.token, "GITHUB_TOKEN");
        assert_eq!(args.base, "master");
        assert!(args.post_command.is_empty());
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "depbump",
            "-nopush",
            "-nopr",
            "-version",
            "v1.3.0",
            "-token",
            "GH_PAT",
            "-base",
            "main",
            "-verbose",
            "github.com/foo/bar",
        ]);
        assert!(args.no_push);
        assert!(args.no_pr);
        assert_eq!(args.version.as_deref(), Some("v1.3.0"));
        assert_eq!(args.token, "GH_PAT");
        assert_eq!(args.base, "main");
        assert!(args.verbose);
    }

    #[test]
    fn test_double_dash_flags_accepted() {
        let args = parse(&["depbump", "--nopush", "--version", "v1.3.0", "github.com/foo/bar"]);
        assert!(args.no_push);
        assert_eq!(args.version.as_deref(), Some("v1.3.0"));
    }

    #[test]
    fn test_push_overrides_nopush() {
        let args = parse(&["depbump", "-nopush", "-push", "github.com/foo/bar"]);
        assert!(!args.no_push);

        let args = parse(&["depbump", "-push", "-nopush", "github.com/foo/bar"]);
        assert!(args.no_push);
    }

    #[test]
    fn test_post_command_keeps_dashes() {
        let args = parse(&[
            "depbump",
            "github.com/foo/bar",
            "go",
            "generate",
            "-run",
            "{{project}}",
            "-nopush",
        ]);
        assert!(!args.no_push);
        assert_eq!(
            args.post_command,
            vec!["go", "generate", "-run", "{{project}}", "-nopush"]
        );
    }

    #[test]
    fn test_missing_path() {
        let err = CliArgs::try_parse_args(["depbump", "-nopush"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_unknown_flag() {
        let err = CliArgs::try_parse_args(["depbump", "-bogus", "github.com/foo/bar"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_missing_flag_value() {
        assert!(CliArgs::try_parse_args(["depbump", "-version"]).is_err());
    }

    #[test]
    fn test_help() {
        let err = CliArgs::try_parse_args(["depbump", "-help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_into_config() {
        let config = parse(&["depbump", "-nopush", "-version", "v1.3.0", "github.com/foo/bar"])
            .into_config(no_env)
            .unwrap();
        assert_eq!(config.path, "github.com/foo/bar");
        assert_eq!(config.version.as_deref(), Some("v1.3.0"));
        assert!(!config.push);
        assert!(config.pull_request);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_into_config_resolves_named_token() {
        let config = parse(&["depbump", "-token", "GH_PAT", "github.com/foo/bar"])
            .into_config(|name| (name == "GH_PAT").then(|| "secret".to_string()))
            .unwrap();
        assert_eq!(config.token_var, "GH_PAT");
        assert_eq!(config.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_into_config_empty_token_is_absent() {
        let config = parse(&["depbump", "github.com/foo/bar"])
            .into_config(|_| Some(String::new()))
            .unwrap();
        assert!(config.token.is_none());
    }

    #[test]
    fn test_into_config_empty_path() {
        let err = parse(&["depbump", ""]).into_config(no_env).unwrap_err();
        assert_eq!(err, ConfigError::EmptyPath);
    }
}
