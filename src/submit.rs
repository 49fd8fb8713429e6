//! Submits build requests to the TeamCity REST API.

use std::fmt;

use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::error::Error;
use crate::TcResult;

/// Default URL to TeamCity.
pub const DEFAULT_TEAMCITY_URL: &str = "https://build.neohq.net";

/// Path of the build queue, relative to the server URL.
pub const BUILD_QUEUE_PATH: &str = "httpAuth/app/rest/buildQueue";

/// Credentials for HTTP basic authentication.
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    password: String,
}

impl Credentials {
    pub fn new<U, P>(user: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Value of the `Authorization` header.
    pub fn basic_auth(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.user, self.password));
        format!("Basic {}", token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Subset of the build queue entry returned by TeamCity.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueuedBuild {
    /// Page to follow the build.
    pub web_url: String,
    /// Build id.
    pub id: Option<u64>,
    /// Queue state, e.g. `queued`.
    pub state: Option<String>,
}

/// Body of a failed response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Parses the body as JSON, keeping the raw text when that fails.
    pub fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(e) => {
                debug!("response body is not JSON: {}", e);
                ResponseBody::Text(text)
            }
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{}", value),
            ResponseBody::Text(text) => f.write_str(text),
        }
    }
}

/// Outcome of a build submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Build was added to the queue.
    Queued(QueuedBuild),
    /// Server answered with a non-2xx status.
    Rejected { status: u16, body: ResponseBody },
}

/// Client for the TeamCity build queue.
pub struct TeamCity {
    agent: ureq::Agent,
    queue_url: Url,
    credentials: Credentials,
}

impl TeamCity {
    /// Creates a client for the server at `server`.
    pub fn new(server: &str, credentials: Credentials) -> TcResult<Self> {
        let queue_url = queue_url(server)?;
        info!(%queue_url, user = %credentials.user, "using TeamCity build queue");

        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("tc/", env!("CARGO_PKG_VERSION")))
            .build();

        Ok(Self {
            agent,
            queue_url,
            credentials,
        })
    }

    /// URL the requests are posted to.
    pub fn queue_url(&self) -> &Url {
        &self.queue_url
    }

    /// Posts the build request document to the build queue.
    pub fn submit(&self, xml: &str) -> TcResult<Submission> {
        debug!("request:{}", xml);

        let request = self
            .agent
            .post(self.queue_url.as_str())
            .set("Authorization", &self.credentials.basic_auth())
            .set("Accept", "application/json")
            .set("Content-Type", "application/xml");

        match request.send_string(xml) {
            Ok(resp) if (200..300).contains(&resp.status()) => {
                info!(status = resp.status(), "build request accepted");
                let build: QueuedBuild = resp
                    .into_json()
                    .context("failed to parse the build queue response")?;
                debug!(?build);
                Ok(Submission::Queued(build))
            }
            Ok(resp) | Err(ureq::Error::Status(_, resp)) => {
                let status = resp.status();
                info!(status, "build request rejected");
                let text = resp
                    .into_string()
                    .context("failed to read the response body")?;
                Ok(Submission::Rejected {
                    status,
                    body: ResponseBody::parse(text),
                })
            }
            Err(e) => Err(e).with_context(|| format!("failed to reach {}", self.queue_url)),
        }
    }
}

/// Resolves the build queue URL for the server at `server`.
pub fn queue_url(server: &str) -> TcResult<Url> {
    let mut base =
        Url::parse(server).map_err(|e| Error::InvalidServerUrl(server.to_string(), e))?;

    // keep any path prefix, e.g. `https://host/teamcity`
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let url = base
        .join(BUILD_QUEUE_PATH)
        .map_err(|e| Error::InvalidServerUrl(server.to_string(), e))?;
    Ok(url)
}
