use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("TeamCity refused to start the build (HTTP status {0})")]
    BuildRejected(u16),

    #[error(
        "Given TeamCity URL is not valid: {0}\n\
        Run with `--teamcity <URL>` to specify the server, e.g. `--teamcity https://build.neohq.net`"
    )]
    InvalidServerUrl(String, #[source] url::ParseError),
}
