//! Alerting - threshold decision and notification sink

pub mod notifier;
pub mod policy;

pub use notifier::{Notifier, NotifyError, WebhookNotifier};
pub use policy::{decide, AlertDecision, AlertPolicy, ALERT_SUBJECT, DEFAULT_THRESHOLD};
