//! Colour code translation.

/// Marker the host uses for rich-text codes.
pub const DEFAULT_MARKER: char = '§';

/// Character users write colour codes with.
pub const ALTERNATE_CHAR: char = '&';

const CODE_CHARS: &str = "0123456789abcdefklmnorx";

/// Whether `c` is a valid code character (case-insensitive).
pub fn is_code_char(c: char) -> bool {
    CODE_CHARS.contains(c.to_ascii_lowercase())
}

/// Replaces `&`-prefixed codes with `marker`-prefixed, lower-cased ones.
///
/// An `&` not followed by a code character is kept as is.
pub fn translate_codes(text: &str, marker: char) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == ALTERNATE_CHAR && is_code_char(next) => {
                out.push(marker);
                out.push(next.to_ascii_lowercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}
