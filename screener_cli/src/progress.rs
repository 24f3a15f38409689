//! Keeps log lines and the progress bar from drawing over each other on stderr.

use std::io::{self, Write};
use std::sync::Mutex;

use indicatif::ProgressBar;

static ACTIVE_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Routes log output around `pb` until [`detach`] is called.
pub fn attach(pb: &ProgressBar) {
    if let Ok(mut slot) = ACTIVE_BAR.lock() {
        *slot = Some(pb.clone());
    }
}

pub fn detach() {
    if let Ok(mut slot) = ACTIVE_BAR.lock() {
        *slot = None;
    }
}

fn active_bar() -> Option<ProgressBar> {
    ACTIVE_BAR.lock().ok().and_then(|slot| slot.clone())
}

/// stderr writer for the tracing subscriber. While a bar is attached, each log
/// line is written with the bar suspended.
pub struct LogWriter;

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match active_bar() {
            Some(pb) => pb.suspend(|| io::stderr().write(buf)),
            None => io::stderr().write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match active_bar() {
            Some(pb) => pb.suspend(|| io::stderr().write_all(buf)),
            None => io::stderr().write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_follows_attached_bar() {
        assert_eq!(LogWriter.write(b"").unwrap(), 0);

        let pb = ProgressBar::hidden();
        attach(&pb);
        assert!(active_bar().is_some());
        LogWriter.write_all(b"").unwrap();

        detach();
        assert!(active_bar().is_none());
    }
}
