//! Notification building and dispatch for selected marks.

pub mod batch;
pub mod body;
pub mod mailer;

pub use batch::{BatchReport, Dispatch, DispatchFailure, send_batch};
pub use body::{MessageTemplate, build_body};
pub use mailer::{DryRunMailer, MailError, Mailer, OutboxMailer};
