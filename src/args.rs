//! Handles arguments for the build types.

use clap::builder::{NonEmptyStringValueParser, PossibleValuesParser};
use clap::{Args, Parser, Subcommand};

use crate::preset::{Jdk, DEFAULT_HAR_ARGS, DEFAULT_MAVEN_ARGS, DEFAULT_MAVEN_GOALS};
use crate::submit::DEFAULT_TEAMCITY_URL;
use crate::TC_BIN_NAME;

/// Trigger personal builds on TeamCity
#[derive(Debug, Parser)]
#[command(
    name = TC_BIN_NAME,
    author,
    version,
    after_help = "Specify `-h` with a build type for more specific help."
)]
pub struct TcArgs {
    /// Build type to trigger
    #[command(subcommand)]
    pub command: Option<BuildCommand>,

    /// Log level
    #[arg(
        long = "log",
        default_value = "warn",
        value_parser = PossibleValuesParser::new(["trace", "debug", "info", "warn", "error"]),
        value_name = "LEVEL",
        global = true,
    )]
    pub log_level: String,
}

/// Build types
#[derive(Debug, Subcommand)]
pub enum BuildCommand {
    /// Neo4j Linux
    Linux(LinuxArgs),

    /// Neo4j HA robustness
    Har(HarArgs),
}

/// Arguments shared by every build type
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// TeamCity username
    #[arg(
        short,
        long,
        value_name = "USERNAME",
        env = "TEAMCITY_USER",
        help_heading = "Mandatory arguments"
    )]
    pub user: String,

    /// TeamCity password
    #[arg(
        short,
        long,
        env = "TEAMCITY_PASSWORD",
        hide_env_values = true,
        help_heading = "Mandatory arguments"
    )]
    pub password: String,

    /// Branch on remote to checkout
    #[arg(
        short,
        long,
        value_parser = NonEmptyStringValueParser::new(),
        help_heading = "Mandatory arguments"
    )]
    pub branch: String,

    /// Public remote repo where branch exists
    #[arg(
        short,
        long,
        value_name = "URL",
        default_value = "origin",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub remote: String,

    /// Url to TeamCity
    #[arg(
        long,
        value_name = "URL",
        default_value = DEFAULT_TEAMCITY_URL,
        env = "TEAMCITY_URL"
    )]
    pub teamcity: String,

    /// Trigger a personal build
    #[arg(long, overrides_with = "no_personal")]
    personal: bool,

    /// Trigger a regular build [default]
    #[arg(long, overrides_with = "personal")]
    no_personal: bool,
}

impl ServerArgs {
    /// Returns true if the build should be personal. The last of
    /// `--personal` and `--no-personal` wins.
    pub fn personal(&self) -> bool {
        self.personal && !self.no_personal
    }
}

/// Arguments for a Linux build
#[derive(Args, Debug)]
pub struct LinuxArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    /// Maven goal(s) to invoke
    #[arg(long, value_name = "GOALS", default_value = DEFAULT_MAVEN_GOALS)]
    pub maven_goals: String,

    /// Additional Maven arguments
    #[arg(
        long,
        value_name = "ARGS",
        default_value = DEFAULT_MAVEN_ARGS,
        allow_hyphen_values = true
    )]
    pub maven_args: String,

    /// JDK to build with
    #[arg(long, value_enum, default_value_t = Jdk::OpenJdk8)]
    pub jdk: Jdk,
}

/// Arguments for an HA robustness build
#[derive(Args, Debug)]
pub struct HarArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    /// Arguments for the robustness run
    #[arg(
        long,
        value_name = "ARGS",
        default_value = DEFAULT_HAR_ARGS,
        allow_hyphen_values = true
    )]
    pub arguments: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    const REQUIRED: [&str; 6] = ["-u", "jonas", "-p", "secret", "-b", "feature/y"];

    fn parse(args: &[&str]) -> TcArgs {
        TcArgs::try_parse_from(std::iter::once(TC_BIN_NAME).chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn verify_cli() {
        TcArgs::command().debug_assert();
    }

    #[test]
    fn linux_defaults() {
        let mut args = vec!["linux"];
        args.extend(REQUIRED);
        let TcArgs { command, log_level } = parse(&args);

        assert_eq!(log_level, "warn");
        let Some(BuildCommand::Linux(linux)) = command else {
            panic!("expected linux command");
        };
        assert_eq!(linux.server.user, "jonas");
        assert_eq!(linux.server.branch, "feature/y");
        assert_eq!(linux.server.remote, "origin");
        assert_eq!(linux.server.teamcity, DEFAULT_TEAMCITY_URL);
        assert!(!linux.server.personal());
        assert_eq!(linux.maven_goals, DEFAULT_MAVEN_GOALS);
        assert_eq!(linux.maven_args, DEFAULT_MAVEN_ARGS);
        assert_eq!(linux.jdk, Jdk::OpenJdk8);
    }

    #[test]
    fn linux_overrides() {
        let mut args = vec!["linux"];
        args.extend(REQUIRED);
        args.extend([
            "--maven-args",
            "-Dfoo",
            "--maven-goals",
            "install",
            "--jdk",
            "ibmjdk-7",
            "--personal",
        ]);
        let Some(BuildCommand::Linux(linux)) = parse(&args).command else {
            panic!("expected linux command");
        };

        assert_eq!(linux.maven_args, "-Dfoo");
        assert_eq!(linux.maven_goals, "install");
        assert_eq!(linux.jdk, Jdk::IbmJdk7);
        assert!(linux.server.personal());
    }

    #[test]
    fn last_personal_flag_wins() {
        let mut args = vec!["har"];
        args.extend(REQUIRED);
        args.extend(["--personal", "--no-personal"]);
        let Some(BuildCommand::Har(har)) = parse(&args).command else {
            panic!("expected har command");
        };
        assert!(!har.server.personal());
        assert_eq!(har.arguments, DEFAULT_HAR_ARGS);

        let mut args = vec!["har"];
        args.extend(REQUIRED);
        args.extend(["--no-personal", "--personal"]);
        let Some(BuildCommand::Har(har)) = parse(&args).command else {
            panic!("expected har command");
        };
        assert!(har.server.personal());
    }

    #[test]
    fn rejects_bad_invocations() {
        let parse = |args: &[&str]| {
            TcArgs::try_parse_from(std::iter::once(TC_BIN_NAME).chain(args.iter().copied()))
        };

        assert!(parse(&["windows", "-u", "a", "-p", "b", "-b", "c"]).is_err());
        assert!(parse(&["linux", "-u", "a", "-p", "b"]).is_err());
        assert!(parse(&["linux", "-u", "a", "-p", "b", "-b", ""]).is_err());
        assert!(parse(&["linux", "-u", "a", "-p", "b", "-b", "c", "--jdk", "zulu-11"]).is_err());
    }

    #[test]
    fn no_command_is_allowed() {
        assert!(parse(&[]).command.is_none());
    }
}
