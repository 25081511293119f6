//! Unified alerting webhook schema.

use serde::Deserialize;

use forwarder_core::{AlertData, Tags};

use super::{null_as_default, AlertPayload};
use crate::error::NotifyError;

/// Label carrying the rule's display name.
pub const ALERT_NAME_LABEL: &str = "alertname";
/// Annotation carrying the human-readable description.
pub const DESCRIPTION_ANNOTATION: &str = "description";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnifiedPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub org_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub group_labels: Tags,
    #[serde(deserialize_with = "null_as_default")]
    pub common_labels: Tags,
    #[serde(deserialize_with = "null_as_default")]
    pub common_annotations: Tags,
    #[serde(deserialize_with = "null_as_default")]
    pub alerts: Vec<UnifiedAlert>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UnifiedAlert {
    #[serde(deserialize_with = "null_as_default")]
    pub annotations: Tags,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Tags,
    #[serde(rename = "dashboardURL", deserialize_with = "null_as_default")]
    pub dashboard_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fingerprint: String,
}

impl UnifiedPayload {
    fn first_alert(&self) -> Result<&UnifiedAlert, NotifyError> {
        self.alerts
            .first()
            .ok_or_else(|| NotifyError::Payload("payload contains no alerts".to_string()))
    }
}

impl AlertPayload for UnifiedPayload {
    /// `unified.<orgId>.<fingerprint of the first alert>`.
    fn full_rule_id(&self) -> Result<String, NotifyError> {
        let first = self.first_alert()?;
        Ok(format!("unified.{}.{}", self.org_id, first.fingerprint))
    }

    fn to_alert_data(&self) -> Result<AlertData, NotifyError> {
        let first = self.first_alert()?;
        Ok(AlertData {
            id: self.full_rule_id()?,
            state: self.state.clone(),
            rule_url: first.dashboard_url.clone(),
            rule_name: self
                .common_labels
                .get(ALERT_NAME_LABEL)
                .cloned()
                .unwrap_or_default(),
            message: self
                .common_annotations
                .get(DESCRIPTION_ANNOTATION)
                .cloned()
                .unwrap_or_default(),
            tags: self.common_labels.clone(),
            eval_matches: Vec::new(),
        })
    }
}
