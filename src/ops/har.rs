//! Implementation of `tc har`.

use crate::args::HarArgs;
use crate::preset::{self, BuildType};
use crate::request::BuildRequest;
use crate::TcResult;

/// Starts an HA robustness build.
pub fn exec(args: &HarArgs, log_level: &str) -> TcResult<()> {
    let props = preset::har_properties(&args.arguments);

    let request = BuildRequest::new(BuildType::Har, &args.server.branch, &args.server.remote)
        .personal(args.server.personal())
        .properties(props);

    super::trigger(&args.server, &request, log_level)
}
