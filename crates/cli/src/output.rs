use crate::messages::Language;
use anyhow::Result;
use dropcat_ingest::{Status, StatusReporter};
use serde::Serialize;
use std::io::{self, Write};

/// Write one line to stdout. A closed pipe (`dropcat show | head`) is not an error.
pub fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    print_stdout(&serde_json::to_string(value)?)
}

#[derive(Serialize)]
struct StatusLine<'a> {
    #[serde(flatten)]
    status: &'a Status,
    message: String,
}

/// Prints every status as a localized line, or as one JSON object per line.
pub struct ConsoleReporter {
    lang: Language,
    json: bool,
}

impl ConsoleReporter {
    pub fn new(lang: Language, json: bool) -> Self {
        Self { lang, json }
    }

    fn write(&self, status: &Status) -> Result<()> {
        let message = self.lang.render(status);
        if self.json {
            print_json(&StatusLine { status, message })
        } else {
            print_stdout(&message)
        }
    }
}

impl StatusReporter for ConsoleReporter {
    fn report(&self, status: &Status) {
        if let Err(err) = self.write(status) {
            log::warn!("Failed to print status {}: {err:#}", status.key);
        }
    }
}
