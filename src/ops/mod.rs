//! Implementation of `tc`.

use std::io::Write;
use std::time::Duration;

use anyhow::bail;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::args::{BuildCommand, ServerArgs, TcArgs};
use crate::error::Error;
use crate::request::BuildRequest;
use crate::submit::{Credentials, Submission, TeamCity};
use crate::{util, TcResult};

pub mod har;
pub mod linux;

/// Main routine for `tc`.
pub fn exec() -> TcResult<()> {
    let args = match TcArgs::try_parse() {
        Ok(args) => args,
        // help and version go to stdout with exit code 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            e.print()?;
            std::process::exit(1);
        }
    };

    util::init_logger(&args.log_level)?;

    _exec(args)
}

/// Core routine for `tc`.
fn _exec(args: TcArgs) -> TcResult<()> {
    match &args.command {
        Some(BuildCommand::Linux(linux_args)) => linux::exec(linux_args, &args.log_level),
        Some(BuildCommand::Har(har_args)) => har::exec(har_args, &args.log_level),
        None => {
            TcArgs::command().print_help()?;
            Ok(())
        }
    }
}

/// Sends the build request to the server and reports the outcome.
pub(crate) fn trigger(server: &ServerArgs, request: &BuildRequest, log_level: &str) -> TcResult<()> {
    info!(build_type = %request.build_type, branch = %request.branch, personal = request.personal);

    let credentials = Credentials::new(&server.user, &server.password);
    let teamcity = TeamCity::new(&server.teamcity, credentials)?;
    let xml = request.to_xml();

    // progress bar
    let pb = if util::show_progress(log_level) {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    let ps = ProgressStyle::with_template("{spinner:.dim.bold} {prefix:>10.cyan.bold} {wide_msg}")?
        .tick_chars("/|\\- ");
    pb.enable_steady_tick(Duration::from_millis(200));
    pb.set_style(ps);
    pb.set_prefix("Queueing");
    pb.set_message(format!("{} build on {}", request.build_type, request.branch));

    let submission = teamcity.submit(&xml);

    pb.finish_and_clear();

    report(&mut std::io::stdout().lock(), submission?)
}

/// Prints the outcome of a submission. A rejected build is returned as an
/// error after its status and body have been printed.
pub(crate) fn report<W: Write>(out: &mut W, submission: Submission) -> TcResult<()> {
    match submission {
        Submission::Queued(build) => {
            writeln!(
                out,
                "{:>12} Build started. View status at",
                "Queued".green().bold()
            )?;
            writeln!(out, "{}", build.web_url)?;
            Ok(())
        }
        Submission::Rejected { status, body } => {
            writeln!(out, "{:>12} Could not start build:", "Failed".red().bold())?;
            writeln!(out, "{}", status)?;
            writeln!(out, "{}", body)?;
            bail!(Error::BuildRejected(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::submit::{QueuedBuild, ResponseBody};

    fn report_to_string(submission: Submission) -> (String, TcResult<()>) {
        let mut out = Vec::new();
        let result = report(&mut out, submission);
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn report_prints_web_url() {
        let (out, result) = report_to_string(Submission::Queued(QueuedBuild {
            web_url: "http://ci/build/1".to_string(),
            id: Some(1),
            state: Some("queued".to_string()),
        }));

        assert!(result.is_ok());
        assert!(out.contains("Build started. View status at"));
        assert!(out.contains("http://ci/build/1"));
    }

    #[test]
    fn report_prints_text_failure() {
        let (out, result) = report_to_string(Submission::Rejected {
            status: 500,
            body: ResponseBody::Text("boom".to_string()),
        });

        assert!(out.contains("Could not start build:"));
        assert!(out.contains("500"));
        assert!(out.contains("boom"));
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::BuildRejected(500))
        ));
    }

    #[test]
    fn report_prints_json_failure() {
        let (out, result) = report_to_string(Submission::Rejected {
            status: 403,
            body: ResponseBody::Json(json!({"message": "forbidden"})),
        });

        assert!(result.is_err());
        assert!(out.contains("403"));
        assert!(out.contains(r#"{"message":"forbidden"}"#));
    }
}
