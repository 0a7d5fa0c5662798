// UI layer: terminal prompts for the credentials and a spinner shown while
// a request is in flight. Everything user-facing that is not the report
// lives here.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};

/// Username and password as typed, with surrounding whitespace removed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Credentials {
            username: username.trim().to_string(),
            password: password.trim().to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Where the orchestrator gets credentials from.
pub trait CredentialSource {
    fn credentials(&mut self) -> io::Result<Credentials>;
}

/// Username from stdin, password from the terminal with echo disabled.
pub struct TerminalCredentials;

impl CredentialSource for TerminalCredentials {
    fn credentials(&mut self) -> io::Result<Credentials> {
        let stdin = io::stdin();
        let username = read_username(&mut stdin.lock(), &mut io::stdout())?;
        // `Password` hides input in terminal for passwords.
        let password = Password::new()
            .with_prompt("Please enter your password")
            .allow_empty_password(true)
            .interact()?;
        Ok(Credentials::new(&username, &password))
    }
}

/// Prompt on `out` and read one line from `input`. A stream that ends before
/// any line arrives is an `UnexpectedEof` error; content is not validated.
pub fn read_username<R, W>(input: &mut R, out: &mut W) -> io::Result<String>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    writeln!(out, "Please enter your username:")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "failed to read username: input closed",
        ));
    }
    Ok(line.trim().to_string())
}

/// Run `f` while a spinner with `message` ticks on stderr. The spinner is
/// cleared before returning so it never interleaves with stdout output.
pub fn with_spinner<T>(message: &'static str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    result
}
