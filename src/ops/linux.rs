//! Implementation of `tc linux`.

use tracing::debug;

use crate::args::LinuxArgs;
use crate::preset::{self, BuildType};
use crate::request::BuildRequest;
use crate::TcResult;

/// Starts a custom Linux build.
pub fn exec(args: &LinuxArgs, log_level: &str) -> TcResult<()> {
    let props = preset::linux_properties(args.jdk, &args.maven_goals, &args.maven_args);
    debug!(?props);

    let request = BuildRequest::new(BuildType::Linux, &args.server.branch, &args.server.remote)
        .personal(args.server.personal())
        .properties(props);

    super::trigger(&args.server, &request, log_level)
}
