//! Shared constants for the env-file dialect.

/// Delimiter between segments of a hierarchical configuration path.
pub const KEY_DELIMITER: &str = ":";

/// Separator written in raw keys in place of [`KEY_DELIMITER`], since the
/// delimiter itself is not representable in environment-style names.
pub const KEY_SEPARATOR: &str = "__";

/// Characters that mark a line as a comment when they appear first after
/// trimming.
pub const COMMENT_CHARS: [char; 3] = [';', '#', '/'];
