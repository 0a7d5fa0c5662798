#![allow(dead_code)]
//! Mock timekeeping API served by axum on a background runtime, plus fixed
//! credentials and clock for driving `app::run` without a terminal.

use std::collections::HashMap;
use std::io;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use timetrak_hours::dates::Clock;
use timetrak_hours::ui::{CredentialSource, Credentials};

pub type Params = HashMap<String, String>;

#[derive(Clone)]
pub struct MockApi {
    pub auth_status: StatusCode,
    pub auth_body: String,
    pub hours_status: StatusCode,
    pub hours_body: String,
    pub auth_calls: Arc<AtomicUsize>,
    pub hours_calls: Arc<AtomicUsize>,
    pub auth_query: Arc<Mutex<Option<Params>>>,
    pub hours_query: Arc<Mutex<Option<Params>>>,
    pub hours_authorization: Arc<Mutex<Option<String>>>,
}

impl MockApi {
    pub fn new(auth_body: &str, hours_body: &str) -> Self {
        MockApi {
            auth_status: StatusCode::OK,
            auth_body: auth_body.into(),
            hours_status: StatusCode::OK,
            hours_body: hours_body.into(),
            auth_calls: Arc::default(),
            hours_calls: Arc::default(),
            auth_query: Arc::default(),
            hours_query: Arc::default(),
            hours_authorization: Arc::default(),
        }
    }

    /// Responses for user `u1` with token `t1`, two days and 15.5 hours.
    pub fn happy() -> Self {
        MockApi::new(
            r#"{"user":{"userId":"u1","token":"t1"}}"#,
            r#"{"userCalculatedData":[{"hours":[{"amount":7.5},{"amount":8}],"totalHours":[{"amount":15.5}]}]}"#,
        )
    }

    pub fn hours_calls(&self) -> usize {
        self.hours_calls.load(Ordering::SeqCst)
    }

    pub fn auth_calls(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    pub fn auth_query(&self) -> Params {
        self.auth_query.lock().unwrap().clone().expect("auth not called")
    }

    pub fn hours_query(&self) -> Params {
        self.hours_query.lock().unwrap().clone().expect("hours not called")
    }

    /// Serve on an ephemeral localhost port and return the API base URL.
    pub fn serve(&self) -> String {
        let app = Router::new()
            .route("/api/auth/authenticate", get(authenticate))
            .route("/api/punch/GetCalculatedHours", get(calculated_hours))
            .with_state(self.clone());

        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        let listener = rt
            .block_on(tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0)))
            .expect("bind mock server");
        let addr = listener.local_addr().expect("local addr");
        std::thread::spawn(move || {
            rt.block_on(async move {
                if let Err(e) = axum::serve(listener, app).await {
                    eprintln!("mock server error: {e}");
                }
            })
        });
        format!("http://{addr}/api")
    }
}

async fn authenticate(
    State(mock): State<MockApi>,
    Query(params): Query<Params>,
) -> (StatusCode, String) {
    mock.auth_calls.fetch_add(1, Ordering::SeqCst);
    *mock.auth_query.lock().unwrap() = Some(params);
    (mock.auth_status, mock.auth_body.clone())
}

async fn calculated_hours(
    State(mock): State<MockApi>,
    headers: HeaderMap,
    Query(params): Query<Params>,
) -> (StatusCode, String) {
    mock.hours_calls.fetch_add(1, Ordering::SeqCst);
    *mock.hours_query.lock().unwrap() = Some(params);
    *mock.hours_authorization.lock().unwrap() = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (mock.hours_status, mock.hours_body.clone())
}

/// A base URL nothing listens on.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/api")
}

pub struct FixedCredentials(pub Credentials);

impl FixedCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        FixedCredentials(Credentials::new(username, password))
    }
}

impl CredentialSource for FixedCredentials {
    fn credentials(&mut self) -> io::Result<Credentials> {
        Ok(self.0.clone())
    }
}

pub struct ClosedInput;

impl CredentialSource for ClosedInput {
    fn credentials(&mut self) -> io::Result<Credentials> {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "failed to read username: input closed",
        ))
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn ymd(y: i32, m: u32, d: u32) -> Self {
        FixedClock(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
