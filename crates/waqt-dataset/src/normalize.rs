use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Turns a free-text city name into the token used in table file names.
///
/// Diacritics are stripped, letters upper-cased, every run of other
/// characters becomes one `_`, and leading/trailing `_` are trimmed:
/// `"  São  Paulo! "` → `"SAO_PAULO"`.
pub fn city_token(name: &str) -> String {
    let mut token = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !token.is_empty() {
                token.push('_');
            }
            pending_sep = false;
            token.push(c.to_ascii_uppercase());
        } else {
            pending_sep = true;
        }
    }
    token
}
