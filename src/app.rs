// Orchestrator: credentials -> authenticate -> fetch hours -> report.
// The first failure stops the run; each stage adds its own label so the
// final message says where it went wrong.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::api::ApiClient;
use crate::config::Config;
use crate::dates::{current_month_range, Clock};
use crate::report::Report;
use crate::ui::{with_spinner, CredentialSource};

pub fn run<W: Write + ?Sized>(
    config: &Config,
    credentials: &mut dyn CredentialSource,
    clock: &dyn Clock,
    out: &mut W,
) -> Result<Report> {
    let creds = credentials
        .credentials()
        .context("failed to get credentials")?;

    let api = ApiClient::new(config).context("authentication failed")?;
    let user = with_spinner("Authenticating...", || {
        api.authenticate(&creds.username, &creds.password)
    })
    .context("authentication failed")?;

    let range = current_month_range(clock);
    writeln!(out, "{range}").context("failed to retrieve working hours")?;
    let record = with_spinner("Fetching hours...", || api.fetch_hours(&user, &range))
        .context("failed to retrieve working hours")?;
    info!(
        days_worked = record.days_worked,
        total_hours = record.total_hours_worked,
        "work record"
    );

    let report = Report::new(
        record.days_worked,
        record.total_hours_worked,
        config.hours_per_day,
    );
    report.write_to(out).context("failed to print report")?;
    Ok(report)
}
