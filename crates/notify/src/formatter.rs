//! Renders an [`AlertData`] into plain-text and HTML message bodies.
//!
//! Both bodies are assembled in the same order:
//! header, rule and message, metric list (if any), tag list (if any).
//! Empty sections contribute nothing, not even a separator.
//!
//! Rendering is a pure function of its input: no I/O, no logging and no
//! shared state, so it is safe to call from any number of threads.

use std::fmt::Write;

use forwarder_core::AlertData;

use crate::error::NotifyError;
use crate::message::RenderedMessage;

/// Icon and label shown at the top of a message for an alert state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateStyle {
    pub icon: &'static str,
    pub label: &'static str,
}

const UNKNOWN_STYLE: StateStyle = StateStyle {
    icon: "❓",
    label: "UNKNOWN",
};

/// Header styles keyed by raw state. Matching is case-sensitive; any state
/// not listed here (including the empty string) renders as [`UNKNOWN_STYLE`].
const STATE_STYLES: &[(&str, StateStyle)] = &[
    (
        "alerting",
        StateStyle {
            icon: "💔",
            label: "ALERT",
        },
    ),
    (
        "ok",
        StateStyle {
            icon: "💚",
            label: "RESOLVED",
        },
    ),
    (
        "no_data",
        StateStyle {
            icon: "❓",
            label: "NO DATA",
        },
    ),
];

/// Look up the header style for a raw state string. Never fails.
pub fn state_style(raw_state: &str) -> StateStyle {
    STATE_STYLES
        .iter()
        .find(|(state, _)| *state == raw_state)
        .map(|(_, style)| *style)
        .unwrap_or(UNKNOWN_STYLE)
}

/// Render both message bodies for an alert.
///
/// `metric_rounding` is the number of fractional digits kept for each
/// eval match value; `0` leaves the value unrounded.
///
/// # Errors
///
/// Returns [`NotifyError::Unrenderable`] only if a body cannot be written.
/// Unknown states, empty URLs and empty tag or metric sets all render.
pub fn generate_message(
    alert: &AlertData,
    metric_rounding: u32,
) -> Result<RenderedMessage, NotifyError> {
    let style = state_style(&alert.state);

    let text_body = render_plain(alert, style, metric_rounding)
        .map_err(|e| NotifyError::Unrenderable(format!("plain body: {e}")))?;
    let html_body = render_html(alert, style, metric_rounding)
        .map_err(|e| NotifyError::Unrenderable(format!("html body: {e}")))?;

    Ok(RenderedMessage {
        text_body,
        html_body,
    })
}

fn render_plain(
    alert: &AlertData,
    style: StateStyle,
    rounding: u32,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    write!(
        out,
        "{} {} Rule: {} | {}",
        style.icon, style.label, alert.rule_name, alert.message
    )?;

    for m in &alert.eval_matches {
        write!(out, " {}: {}", m.metric, format_metric_value(m.value, rounding))?;
    }

    if !alert.tags.is_empty() {
        out.push_str(" Tags: ");
        for (key, value) in &alert.tags {
            write!(out, "{key}: {value}")?;
        }
    }

    Ok(out)
}

fn render_html(
    alert: &AlertData,
    style: StateStyle,
    rounding: u32,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    write!(
        out,
        "{} <b>{}</b><p>Rule: <a href=\"{}\">{}</a> | {}</p>",
        style.icon,
        style.label,
        escape_html(&alert.rule_url),
        escape_html(&alert.rule_name),
        escape_html(&alert.message)
    )?;

    if !alert.eval_matches.is_empty() {
        out.push_str("<ul>");
        for m in &alert.eval_matches {
            write!(
                out,
                "<li><b>{}</b>: {}</li>",
                escape_html(&m.metric),
                format_metric_value(m.value, rounding)
            )?;
        }
        out.push_str("</ul>");
    }

    if !alert.tags.is_empty() {
        out.push_str("<p>Tags:</p><ul>");
        for (key, value) in &alert.tags {
            write!(
                out,
                "<li><b>{}</b>: {}</li>",
                escape_html(key),
                escape_html(value)
            )?;
        }
        out.push_str("</ul>");
    }

    Ok(out)
}

/// Fractional digits that print every finite `f64` exactly (the smallest
/// subnormal needs 1074). Also keeps precision below the formatter's limit.
pub const MAX_ROUNDING_DIGITS: u32 = 1100;

/// Format a metric value with at most `rounding` fractional digits.
///
/// The value is rounded to nearest (exact ties to even) at the requested
/// precision and then printed as the shortest decimal that round-trips,
/// so no trailing zeros are added. `rounding == 0` prints the raw value.
/// Precisions above [`MAX_ROUNDING_DIGITS`] are clamped to it.
pub fn format_metric_value(value: f64, rounding: u32) -> String {
    if rounding == 0 || !value.is_finite() {
        return value.to_string();
    }

    let digits = rounding.min(MAX_ROUNDING_DIGITS) as usize;
    let fixed = format!("{value:.digits$}");
    let rounded: f64 = fixed.parse().unwrap_or(value);

    // "-0.00" parses to negative zero.
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

/// Escapes text for embedding in HTML element content or a quoted attribute.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with character references.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use forwarder_core::EvalMatch;

    fn sample_alert(state: &str) -> AlertData {
        AlertData {
            state: state.to_string(),
            rule_url: "http://example.com".to_string(),
            rule_name: "sample".to_string(),
            message: "sample message".to_string(),
            ..Default::default()
        }
    }

    fn sample_match(metric: &str, value: f64) -> EvalMatch {
        EvalMatch {
            value,
            metric: metric.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn alerting_state() {
        let msg = generate_message(&sample_alert("alerting"), 0).unwrap();
        assert_eq!(
            msg.html_body,
            "💔 <b>ALERT</b><p>Rule: <a href=\"http://example.com\">sample</a> | sample message</p>"
        );
        assert_eq!(msg.text_body, "💔 ALERT Rule: sample | sample message");
    }

    #[test]
    fn alerting_state_with_eval_matches() {
        let mut alert = sample_alert("alerting");
        alert.eval_matches.push(sample_match("sample", 10.65124));

        let msg = generate_message(&alert, 5).unwrap();
        assert_eq!(
            msg.html_body,
            "💔 <b>ALERT</b><p>Rule: <a href=\"http://example.com\">sample</a> | sample message</p><ul><li><b>sample</b>: 10.65124</li></ul>"
        );
        assert_eq!(
            msg.text_body,
            "💔 ALERT Rule: sample | sample message sample: 10.65124"
        );
    }

    #[test]
    fn alerting_state_with_eval_matches_and_tags() {
        let mut alert = sample_alert("alerting");
        alert.eval_matches.push(sample_match("sample", 10.65124));
        alert.tags.insert("key2".to_string(), "value2".to_string());
        alert.tags.insert("key1".to_string(), "value1".to_string());

        let msg = generate_message(&alert, 5).unwrap();
        assert_eq!(
            msg.html_body,
            "💔 <b>ALERT</b><p>Rule: <a href=\"http://example.com\">sample</a> | sample message</p><ul><li><b>sample</b>: 10.65124</li></ul><p>Tags:</p><ul><li><b>key1</b>: value1</li><li><b>key2</b>: value2</li></ul>"
        );
        assert_eq!(
            msg.text_body,
            "💔 ALERT Rule: sample | sample message sample: 10.65124 Tags: key1: value1key2: value2"
        );
    }

    #[test]
    fn tags_without_eval_matches() {
        let mut alert = sample_alert("ok");
        alert.tags.insert("env".to_string(), "prod".to_string());

        let msg = generate_message(&alert, 3).unwrap();
        assert_eq!(
            msg.html_body,
            "💚 <b>RESOLVED</b><p>Rule: <a href=\"http://example.com\">sample</a> | sample message</p><p>Tags:</p><ul><li><b>env</b>: prod</li></ul>"
        );
        assert_eq!(
            msg.text_body,
            "💚 RESOLVED Rule: sample | sample message Tags: env: prod"
        );
    }

    #[test]
    fn multiple_eval_matches_keep_input_order() {
        let mut alert = sample_alert("alerting");
        alert.eval_matches.push(sample_match("zeta", 1.0));
        alert.eval_matches.push(sample_match("alpha", 2.5));

        let msg = generate_message(&alert, 2).unwrap();
        assert!(msg.text_body.ends_with(" zeta: 1 alpha: 2.5"));
        assert!(msg
            .html_body
            .ends_with("<ul><li><b>zeta</b>: 1</li><li><b>alpha</b>: 2.5</li></ul>"));
    }

    #[test]
    fn state_headers() {
        let cases = [
            ("alerting", "💔", "ALERT"),
            ("ok", "💚", "RESOLVED"),
            ("no_data", "❓", "NO DATA"),
            ("invalid state", "❓", "UNKNOWN"),
            ("", "❓", "UNKNOWN"),
            ("OK", "❓", "UNKNOWN"),
        ];
        for (state, icon, label) in cases {
            let msg = generate_message(&sample_alert(state), 0).unwrap();
            assert_eq!(
                msg.text_body,
                format!("{icon} {label} Rule: sample | sample message"),
                "state {state:?}"
            );
            assert!(
                msg.html_body.starts_with(&format!("{icon} <b>{label}</b><p>")),
                "state {state:?}"
            );
        }
    }

    #[test]
    fn empty_fields_still_render() {
        let alert = AlertData::default();
        let msg = generate_message(&alert, 0).unwrap();
        assert_eq!(msg.text_body, "❓ UNKNOWN Rule:  | ");
        assert_eq!(
            msg.html_body,
            "❓ <b>UNKNOWN</b><p>Rule: <a href=\"\"></a> | </p>"
        );
    }

    #[test]
    fn rendering_is_repeatable() {
        let mut alert = sample_alert("alerting");
        alert.eval_matches.push(sample_match("cpu", 0.987654));
        for i in 0..10 {
            alert.tags.insert(format!("k{i}"), format!("v{i}"));
        }
        let first = generate_message(&alert, 2).unwrap();
        let second = generate_message(&alert, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn html_escapes_alert_text() {
        let mut alert = sample_alert("alerting");
        alert.rule_name = "<script>".to_string();
        alert.message = "a & b".to_string();
        alert.rule_url = "http://x/?a=1&b=\"2\"".to_string();
        alert.eval_matches.push(sample_match("<m>", 1.0));
        alert.tags.insert("it's".to_string(), "<v>".to_string());

        let msg = generate_message(&alert, 0).unwrap();
        assert_eq!(
            msg.html_body,
            "💔 <b>ALERT</b><p>Rule: <a href=\"http://x/?a=1&amp;b=&quot;2&quot;\">&lt;script&gt;</a> | a &amp; b</p><ul><li><b>&lt;m&gt;</b>: 1</li></ul><p>Tags:</p><ul><li><b>it&#39;s</b>: &lt;v&gt;</li></ul>"
        );
        // Plain text is never escaped.
        assert_eq!(
            msg.text_body,
            "💔 ALERT Rule: <script> | a & b <m>: 1 Tags: it's: <v>"
        );
    }

    #[test]
    fn metric_value_rounding() {
        assert_eq!(format_metric_value(10.65124, 5), "10.65124");
        assert_eq!(format_metric_value(10.65124, 2), "10.65");
        assert_eq!(format_metric_value(3.14159, 3), "3.142");
        assert_eq!(format_metric_value(42.0, 3), "42");
        assert_eq!(format_metric_value(0.987654, 2), "0.99");
        assert_eq!(format_metric_value(1234.5678, 1), "1234.6");
        assert_eq!(format_metric_value(-7.25, 4), "-7.25");
    }

    #[test]
    fn metric_value_without_rounding() {
        assert_eq!(format_metric_value(10.65124, 0), "10.65124");
        assert_eq!(format_metric_value(0.1 + 0.2, 0), "0.30000000000000004");
        assert_eq!(format_metric_value(100.0, 0), "100");
    }

    #[test]
    fn metric_value_rounding_to_zero_drops_sign() {
        assert_eq!(format_metric_value(-0.0001, 2), "0");
    }

    #[test]
    fn metric_value_huge_rounding_is_clamped() {
        assert_eq!(format_metric_value(1.5, u32::MAX), "1.5");
        assert_eq!(format_metric_value(10.65124, 70_000), "10.65124");
        assert_eq!(
            format_metric_value(f64::MIN_POSITIVE, MAX_ROUNDING_DIGITS + 1),
            f64::MIN_POSITIVE.to_string()
        );
    }

    #[test]
    fn generate_message_with_huge_rounding() {
        let mut alert = sample_alert("alerting");
        alert.eval_matches.push(sample_match("sample", 10.65124));

        let msg = generate_message(&alert, u32::MAX).unwrap();
        assert_eq!(
            msg.text_body,
            "💔 ALERT Rule: sample | sample message sample: 10.65124"
        );
    }

    #[test]
    fn metric_value_non_finite() {
        assert_eq!(format_metric_value(f64::NAN, 3), "NaN");
        assert_eq!(format_metric_value(f64::INFINITY, 3), "inf");
    }

    #[test]
    fn escape_html_passthrough() {
        assert_eq!(escape_html("Hello World 123"), "Hello World 123");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn unknown_style_is_fallback() {
        assert_eq!(state_style("whatever"), UNKNOWN_STYLE);
        assert_eq!(state_style(""), UNKNOWN_STYLE);
        assert_eq!(state_style("ALERTING"), UNKNOWN_STYLE);
        assert_eq!(state_style("no_data").label, "NO DATA");
    }
}
