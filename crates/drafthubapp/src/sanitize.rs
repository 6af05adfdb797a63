//! Markup stripping for user-supplied draft text.
//!
//! Everything that parses as an HTML tag is removed together with its attributes.
//! `<script>` and `<style>` lose their contents as well. The remaining text is
//! serialized HTML-safe, so a literal `&` comes back as `&amp;` and a stray `<`
//! as `&lt;`. Running the sanitizer twice is a no-op on tag structure.

use std::collections::HashSet;

/// Returns `text` with every markup tag removed.
pub fn strip_markup(text: &str) -> String {
    let mut builder = ammonia::Builder::empty();
    builder.clean_content_tags(HashSet::from(["script", "style"]));
    builder.clean(text).to_string()
}

/// True when `text` carries nothing after trimming whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
