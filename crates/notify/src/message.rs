//! The rendered output handed to a chat delivery client.

/// A rendered alert ready for delivery.
///
/// Chat protocols with rich-text support take `html_body` and fall back to
/// `text_body` for clients that only show plain text.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RenderedMessage {
    pub text_body: String,
    /// Uses only `b`, `p`, `a`, `ul` and `li` tags.
    pub html_body: String,
}
