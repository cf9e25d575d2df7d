use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::fmt;

/// Longest body, in characters, rendered without truncation.
pub const MAX_DISPLAY_CHARS: usize = 13;
pub const ELLIPSIS: &str = "...";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders as `"<author> (<created_at>): <body>"` with the body shortened
/// by [`truncate_body`].
#[derive(Debug, Clone, Copy)]
pub struct PostDisplay<'a> {
    pub author: &'a str,
    pub created_at: DateTime<Utc>,
    pub body: &'a str,
}

impl<'a> PostDisplay<'a> {
    pub fn new(author: &'a str, created_at: DateTime<Utc>, body: &'a str) -> Self {
        Self {
            author,
            created_at,
            body,
        }
    }
}

impl fmt::Display for PostDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.author,
            self.created_at.format(TIMESTAMP_FORMAT),
            truncate_body(self.body)
        )
    }
}

/// Bodies up to [`MAX_DISPLAY_CHARS`] characters come back unchanged. Longer
/// ones are cut so that the kept prefix plus [`ELLIPSIS`] is exactly
/// `MAX_DISPLAY_CHARS` characters.
pub fn truncate_body(body: &str) -> Cow<'_, str> {
    if body.chars().count() <= MAX_DISPLAY_CHARS {
        return Cow::Borrowed(body);
    }

    let keep = MAX_DISPLAY_CHARS - ELLIPSIS.chars().count();
    let mut truncated: String = body.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}
