use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label or annotation set attached to an alert. Ordered by key so that
/// every rendering of the same alert lists tags identically.
pub type Tags = BTreeMap<String, String>;

/// A normalized alert notification, independent of the webhook schema it arrived in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertData {
    /// Routing/deduplication key. Not rendered.
    pub id: String,
    /// Raw alert state (`alerting`, `ok`, `no_data`, or anything else).
    /// Matched case-sensitively by the renderer.
    pub state: String,
    pub rule_url: String,
    pub rule_name: String,
    pub message: String,
    #[serde(default)]
    pub tags: Tags,
    /// Rendered in the order received.
    #[serde(default)]
    pub eval_matches: Vec<EvalMatch>,
}

/// A single metric measurement from an alert evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalMatch {
    pub value: f64,
    pub metric: String,
    /// Scoped to this match; carried through but not rendered.
    #[serde(default)]
    pub tags: Tags,
}
