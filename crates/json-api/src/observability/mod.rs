//! Structured logging, request tracing and Prometheus metrics.

mod init;
mod metrics;
mod request;
mod settings;

pub(crate) use init::Observability;
pub(crate) use metrics::{metrics_handler, observe_code_validation, observe_redemption};
pub(crate) use request::request_logging;
