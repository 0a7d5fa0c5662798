// Configuration: the API base URL and the expected hours per day are
// injected from command-line flags so the clients can be pointed at a mock
// server or a different quota.

use std::time::Duration;

use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "https://rubixx.timetrakgo.com/api";
pub const DEFAULT_HOURS_PER_DAY: f64 = 7.4;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How username and password are placed in the authentication query string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CredentialEncoding {
    /// Interpolated as typed. Reserved characters such as `&` or `=` are not
    /// escaped, which is what the existing server has always received.
    #[default]
    Verbatim,
    /// Serialized through the HTTP client's query encoder.
    PercentEncoded,
}

/// Values the rest of the crate reads. Built from [`Args`] in the binary and
/// constructed directly in tests.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub hours_per_day: f64,
    /// `None` means requests may block indefinitely.
    pub timeout: Option<Duration>,
    pub credential_encoding: CredentialEncoding,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.into(),
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            credential_encoding: CredentialEncoding::Verbatim,
        }
    }
}

impl Config {
    /// Same defaults, aimed at another API root.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Config {
            base_url: normalize_base_url(base_url.into()),
            ..Config::default()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "timetrak-hours", version, long_about = None)]
#[command(about = "Compare this month's worked hours against the expected hours")]
pub struct Args {
    // `TIMETRAK_BASE_URL` is the only environment variable read; everything
    // else comes from flags.
    #[arg(
        long,
        env = "TIMETRAK_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        help = "Root of the timekeeping API"
    )]
    pub base_url: String,

    #[arg(
        long,
        default_value_t = DEFAULT_HOURS_PER_DAY,
        value_parser = parse_hours_per_day,
        help = "Hours expected for every day worked"
    )]
    pub hours_per_day: f64,

    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "Per-request timeout in seconds, 0 disables it"
    )]
    pub timeout: u64,

    #[arg(
        long,
        help = "Percent-encode username and password in the authentication URL"
    )]
    pub encode_credentials: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    pub verbose: u8,
}

impl Args {
    pub fn into_config(self) -> Config {
        Config {
            base_url: normalize_base_url(self.base_url),
            hours_per_day: self.hours_per_day,
            timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
            credential_encoding: if self.encode_credentials {
                CredentialEncoding::PercentEncoded
            } else {
                CredentialEncoding::Verbatim
            },
        }
    }
}

fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

fn parse_hours_per_day(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("expected a positive number of hours, got {s}"));
    }
    Ok(value)
}
