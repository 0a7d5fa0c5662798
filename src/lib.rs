// Library root
// -----------
// This crate exposes the pieces the `timetrak-hours` binary is built from,
// so they can be exercised against a mock API in tests.
//
// Module responsibilities:
// - `config`: command-line flags and the values injected into the clients.
// - `api`: blocking HTTP calls to the timekeeping API (authenticate and
//   fetch calculated hours) plus the JSON shapes they decode.
// - `dates`: the current-month date range and the clock it is derived from.
// - `report`: expected hours, delta and the printed summary.
// - `ui`: terminal prompts for credentials and the request spinner.
// - `app`: sequences the stages above and labels failures per stage.
// - `logging`: tracing subscriber setup (stderr only).
pub mod api;
pub mod app;
pub mod config;
pub mod dates;
pub mod logging;
pub mod report;
pub mod ui;
