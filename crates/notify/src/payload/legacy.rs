//! Legacy dashboard alerting webhook schema.

use serde::Deserialize;

use forwarder_core::{AlertData, EvalMatch, Tags};

use super::{null_as_default, AlertPayload};
use crate::error::NotifyError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rule_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub rule_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rule_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub org_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub dashboard_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub panel_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Tags,
    #[serde(deserialize_with = "null_as_default")]
    pub eval_matches: Vec<LegacyEvalMatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegacyEvalMatch {
    /// `null` when the datasource returned no value; read as `0`.
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub metric: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Tags,
}

impl AlertPayload for LegacyPayload {
    /// `<orgId>.<dashboardId>.<panelId>.<ruleId>`.
    fn full_rule_id(&self) -> Result<String, NotifyError> {
        Ok(format!(
            "{}.{}.{}.{}",
            self.org_id, self.dashboard_id, self.panel_id, self.rule_id
        ))
    }

    fn to_alert_data(&self) -> Result<AlertData, NotifyError> {
        let eval_matches = self
            .eval_matches
            .iter()
            .map(|m| EvalMatch {
                value: m.value,
                metric: m.metric.clone(),
                tags: m.tags.clone(),
            })
            .collect();

        Ok(AlertData {
            id: self.full_rule_id()?,
            state: self.state.clone(),
            rule_url: self.rule_url.clone(),
            rule_name: self.rule_name.clone(),
            message: self.message.clone(),
            tags: self.tags.clone(),
            eval_matches,
        })
    }
}
