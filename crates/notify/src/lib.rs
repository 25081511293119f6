//! Alert message rendering for chat delivery.
//!
//! This crate provides:
//! - `generate_message` turning an [`AlertData`] into plain-text and HTML bodies
//! - Webhook payload adapters (legacy and unified alerting) producing [`AlertData`]
//! - The `render-alert` binary wiring both together

pub mod error;
pub mod formatter;
pub mod message;
pub mod payload;

pub use error::NotifyError;
pub use formatter::generate_message;
pub use forwarder_core::{AlertData, EvalMatch};
pub use message::RenderedMessage;
pub use payload::{parse_alert, AlertPayload, PayloadVersion};
