// Reporter: compares hours worked against `days worked * hours per day` and
// renders the four-line summary printed at the end of a run.

use std::fmt;
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Report {
    pub days_worked: usize,
    pub hours_worked: f64,
    pub expected_hours: f64,
    /// Positive when over the expectation.
    pub delta: f64,
}

impl Report {
    pub fn new(days_worked: usize, hours_worked: f64, hours_per_day: f64) -> Self {
        let expected_hours = days_worked as f64 * hours_per_day;
        Report {
            days_worked,
            hours_worked,
            expected_hours,
            delta: hours_worked - expected_hours,
        }
    }

    pub fn status(&self) -> String {
        if self.delta >= 0.0 {
            format!("Over by {:.2} hours", self.delta)
        } else {
            format!("Down by {:.2} hours", -self.delta)
        }
    }

    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")?;
        out.flush()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Days worked: {}", self.days_worked)?;
        writeln!(f, "Hours worked: {:.2}", self.hours_worked)?;
        writeln!(f, "Expected hours: {:.2}", self.expected_hours)?;
        writeln!(f, "Status: {}", self.status())
    }
}
