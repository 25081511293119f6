//! Webhook payload adapters.
//!
//! Each supported alerting schema deserializes into its own payload type
//! and converts into the schema-independent [`AlertData`] the renderer
//! consumes.

pub mod legacy;
pub mod unified;

pub use forwarder_core::config::PayloadVersion;
pub use legacy::LegacyPayload;
pub use unified::UnifiedPayload;

use forwarder_core::AlertData;
use serde::{Deserialize, Deserializer};

use crate::error::NotifyError;

/// A decoded webhook payload that can be normalized into an [`AlertData`].
pub trait AlertPayload {
    /// Stable identifier used to route and deduplicate notifications.
    fn full_rule_id(&self) -> Result<String, NotifyError>;

    /// Normalize into the renderer's input. `eval_matches` is always
    /// present, empty when the schema has none.
    fn to_alert_data(&self) -> Result<AlertData, NotifyError>;
}

/// Deserialize a field, reading JSON `null` the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a raw webhook body according to `version` and normalize it.
pub fn parse_alert(version: PayloadVersion, body: &[u8]) -> Result<AlertData, NotifyError> {
    let alert = match version {
        PayloadVersion::Legacy => serde_json::from_slice::<LegacyPayload>(body)?.to_alert_data()?,
        PayloadVersion::Unified => serde_json::from_slice::<UnifiedPayload>(body)?.to_alert_data()?,
    };

    tracing::debug!(
        %version,
        id = %alert.id,
        state = %alert.state,
        eval_matches = alert.eval_matches.len(),
        tags = alert.tags.len(),
        "Decoded webhook payload"
    );

    Ok(alert)
}
