//! The mail transport capability.
//!
//! No real delivery protocol lives here. The pipeline only needs something
//! it can hand an (address, body) pair to; the two implementations cover
//! the modes the CLI exposes: log-and-drop for dry runs, one file per
//! message for actual output.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("cannot create outbox {path}: {source}")]
    Outbox {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("transport failure for {address}: {source}")]
    Transport {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can carry one message to one recipient.
///
/// Implementations report failures per message; the batch sender decides
/// what to do with them. A failed send must not have partial side effects
/// the next send depends on.
pub trait Mailer {
    fn send(&mut self, address: &str, body: &str) -> Result<(), MailError>;
}

/// Prints what would be sent instead of sending it.
#[derive(Debug, Default)]
pub struct DryRunMailer;

impl Mailer for DryRunMailer {
    fn send(&mut self, address: &str, body: &str) -> Result<(), MailError> {
        println!("Mail would be sent to {address} with content:");
        println!("{body}");
        println!("{}", "-".repeat(40));
        debug!(address, bytes = body.len(), "dry run, message not transmitted");
        Ok(())
    }
}

/// Writes each message to `<dir>/<seq>-<address>.txt`.
#[derive(Debug)]
pub struct OutboxMailer {
    dir: PathBuf,
    sequence: usize,
}

impl OutboxMailer {
    /// Creates the outbox directory eagerly so a bad path fails before the
    /// first message rather than in the middle of the batch.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, MailError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| MailError::Outbox {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir, sequence: 0 })
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

impl Mailer for OutboxMailer {
    fn send(&mut self, address: &str, body: &str) -> Result<(), MailError> {
        self.sequence += 1;
        let path = self
            .dir
            .join(format!("{:03}-{}.txt", self.sequence, sanitize(address)));
        fs::write(&path, body).map_err(|source| MailError::Transport {
            address: address.to_string(),
            source,
        })?;
        info!(address, path = %path.display(), "message written to outbox");
        Ok(())
    }
}

fn sanitize(address: &str) -> String {
    address
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '@' | '.' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbox_writes_one_file_per_message() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut mailer = OutboxMailer::create(dir.path().join("outbox")).expect("create outbox");
        mailer
            .send("marie@example.org", "first body")
            .expect("send first");
        mailer
            .send("niels@example.org", "second body")
            .expect("send second");
        let first = dir.path().join("outbox/001-marie@example.org.txt");
        let second = dir.path().join("outbox/002-niels@example.org.txt");
        assert_eq!(fs::read_to_string(first).expect("read first"), "first body");
        assert_eq!(
            fs::read_to_string(second).expect("read second"),
            "second body"
        );
    }

    #[test]
    fn addresses_are_sanitized_for_filenames() {
        assert_eq!(sanitize("marie@example.org"), "marie@example.org");
        assert_eq!(sanitize("weird name/with:stuff"), "weird_name_with_stuff");
    }

    #[test]
    fn dry_run_never_fails() {
        let mut mailer = DryRunMailer;
        assert!(mailer.send("anyone@example.org", "body").is_ok());
    }
}
