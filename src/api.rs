// API client module: a small blocking HTTP client for the timekeeping API.
// Two calls are made per run: authenticate with username/password, then
// fetch the calculated hours for a date range with the bearer token.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, CredentialEncoding};
use crate::dates::DateRange;

// A wrapped error is either printed inline or exposed as `source`, never
// both; reqwest's `Display` already includes its cause chain.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("server returned status: {status}")]
    Status { status: StatusCode },

    #[error("failed to parse response")]
    Decode(#[from] serde_json::Error),

    #[error("received empty or invalid time data")]
    EmptyTimeData,

    #[error("token cannot be sent as a header")]
    InvalidToken(#[from] InvalidHeaderValue),
}

impl From<reqwest::Error> for ApiError {
    /// The request URL is dropped: in verbatim mode it carries the password.
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.without_url())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Body of `GET /auth/authenticate`.
#[derive(Deserialize, Debug)]
pub struct AuthResponse {
    pub user: AuthUser,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub user_id: String,
    pub token: String,
}

/// Body of `GET /punch/GetCalculatedHours`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TimeResponse {
    pub user_calculated_data: Vec<UserCalculatedData>,
}

/// One per-user aggregate over the requested range.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserCalculatedData {
    pub hours: Vec<HourEntry>,
    pub total_hours: Vec<HourEntry>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HourEntry {
    pub amount: f64,
}

/// Days with an hours entry and the server-reported total for the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkRecord {
    pub days_worked: usize,
    pub total_hours_worked: f64,
}

impl TimeResponse {
    /// Reduce to a [`WorkRecord`] from the first aggregate. Every entry in
    /// `hours` counts as a worked day, zero-hour entries included, and the
    /// first `totalHours` entry is taken as the grand total.
    pub fn into_work_record(self) -> ApiResult<WorkRecord> {
        if self.user_calculated_data.len() > 1 {
            warn!(
                aggregates = self.user_calculated_data.len(),
                "multiple aggregates returned, only the first is used"
            );
        }
        let first = self
            .user_calculated_data
            .into_iter()
            .next()
            .ok_or(ApiError::EmptyTimeData)?;
        let total = first.total_hours.first().ok_or(ApiError::EmptyTimeData)?;
        if first.hours.is_empty() {
            return Err(ApiError::EmptyTimeData);
        }
        if first.total_hours.len() > 1 {
            warn!(
                totals = first.total_hours.len(),
                "multiple totals returned, only the first is used"
            );
        }
        Ok(WorkRecord {
            days_worked: first.hours.len(),
            total_hours_worked: total.amount,
        })
    }
}

/// Blocking client bound to one API root.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credential_encoding: CredentialEncoding,
}

impl ApiClient {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Client(e.without_url()))?;
        Ok(ApiClient {
            client,
            base_url: config.base_url.clone(),
            credential_encoding: config.credential_encoding,
        })
    }

    /// Exchange username and password for a user id and bearer token.
    pub fn authenticate(&self, username: &str, password: &str) -> ApiResult<AuthUser> {
        let url = format!("{}/auth/authenticate", self.base_url);
        let req = match self.credential_encoding {
            CredentialEncoding::Verbatim => self
                .client
                .get(format!("{url}?username={username}&password={password}")),
            CredentialEncoding::PercentEncoded => self
                .client
                .get(&url)
                .query(&[("username", username), ("password", password)]),
        };
        debug!(%url, username, "authenticating");

        let resp: AuthResponse = send_json(req)?;
        debug!(user_id = %resp.user.user_id, "authenticated");
        Ok(resp.user)
    }

    /// Fetch calculated hours for `range` and reduce them to a [`WorkRecord`].
    pub fn fetch_hours(&self, user: &AuthUser, range: &DateRange) -> ApiResult<WorkRecord> {
        let url = format!(
            "{}/punch/GetCalculatedHours?userId={}&groupId=&StartDateTime={}&EndDateTime={}&ReturnWorkWeek=false",
            self.base_url,
            user.user_id,
            range.start_param(),
            range.end_param(),
        );
        debug!(%url, "fetching calculated hours");

        let req = self.client.get(&url).headers(auth_headers(&user.token)?);
        let resp: TimeResponse = send_json(req)?;
        debug!(
            aggregates = resp.user_calculated_data.len(),
            "calculated hours received"
        );
        resp.into_work_record()
    }
}

/// Authorization header carrying the bearer token.
fn auth_headers(token: &str) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Send, require a 200 and decode the body. The body is read to the end
/// before decoding, so the connection is released on every path.
fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> ApiResult<T> {
    let res: Response = req.send()?;
    let status = res.status();
    debug!(%status, "response received");
    if status != StatusCode::OK {
        return Err(ApiError::Status { status });
    }
    let body = res.text()?;
    Ok(serde_json::from_str(&body)?)
}
