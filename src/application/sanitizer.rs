//! Log-only transformations of provider traffic.
//!
//! Nothing here ever fails: when a body cannot be understood it is logged as-is.
//! The output of these functions is never handed back to callers.

use serde_json::Value;

pub const MASK: char = '*';
pub const SECRET_MASK: &str = "********";

/// Replaces every `\uXXXX` (or `\UXXXX`) escape with the character it encodes.
///
/// UTF-16 surrogate pairs written as two escapes are combined. Escapes that do
/// not yield a valid character are left untouched.
pub fn decode_unicode_escapes(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match parse_escape(tail) {
            Some(high @ 0xD800..=0xDBFF) => {
                let low = parse_escape(&tail[6..]).filter(|u| (0xDC00..=0xDFFF).contains(u));
                match low.and_then(|low| combine_surrogates(high, low)) {
                    Some(c) => {
                        out.push(c);
                        rest = &tail[12..];
                    }
                    None => {
                        out.push_str(&tail[..6]);
                        rest = &tail[6..];
                    }
                }
            }
            Some(unit) => {
                match char::from_u32(unit) {
                    Some(c) => out.push(c),
                    None => out.push_str(&tail[..6]),
                }
                rest = &tail[6..];
            }
            None => {
                out.push('\\');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Reads `\uXXXX` at the start of `text`.
fn parse_escape(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    if bytes.len() < 6 || bytes[0] != b'\\' || !matches!(bytes[1], b'u' | b'U') {
        return None;
    }
    if !bytes[2..6].iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    u32::from_str_radix(&text[2..6], 16).ok()
}

fn combine_surrogates(high: u32, low: u32) -> Option<char> {
    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
}

/// Top-level fields whose values are credentials.
pub const TOKEN_FIELDS: [&str; 2] = ["token", "access_token"];

/// Masks the values of the top-level `token` and `access_token` fields
/// wherever they appear in `text`.
///
/// Both the decoded value and its escaped form as written in the body are
/// masked, each with a run of `*` of the same length. Malformed JSON,
/// non-object bodies and bodies without the fields come back unchanged.
pub fn redact_token(text: &str) -> String {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(text) else {
        return text.to_string();
    };
    let mut redacted = text.to_string();
    for name in TOKEN_FIELDS {
        let literal = match fields.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => continue,
            Some(other) => other.to_string(),
        };
        for raw in raw_string_values(text, name) {
            redacted = mask_all(&redacted, raw);
        }
        redacted = mask_all(&redacted, &literal);
    }
    redacted
}

/// String values of `"field": "..."` exactly as written, escapes included.
fn raw_string_values<'a>(text: &'a str, field: &str) -> Vec<&'a str> {
    let key = format!("\"{}\"", field);
    let bytes = text.as_bytes();
    let skip_ws = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    };

    let mut values = Vec::new();
    let mut from = 0;
    while let Some(found) = text[from..].find(&key) {
        from += found + key.len();
        let colon = skip_ws(from);
        if bytes.get(colon) != Some(&b':') {
            continue;
        }
        let quote = skip_ws(colon + 1);
        if bytes.get(quote) != Some(&b'"') {
            continue;
        }
        let start = quote + 1;
        let mut end = start;
        while end < bytes.len() && bytes[end] != b'"' {
            end += if bytes[end] == b'\\' { 2 } else { 1 };
        }
        if end < bytes.len() {
            values.push(&text[start..end]);
        }
    }
    values
}

/// Replaces every occurrence of `secret` with an equal-length run of `*`.
pub fn mask_all(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    let mask: String = std::iter::repeat_n(MASK, secret.chars().count()).collect();
    text.replace(secret, &mask)
}

/// Replaces a known secret (the password) with a fixed mask.
pub fn redact_secret(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, SECRET_MASK)
}

/// Prepares provider traffic for log lines.
///
/// Holds the secrets that must never be printed: the basic-auth password and
/// the bearer token currently in use.
#[derive(Default)]
pub struct Sanitizer<'a> {
    secrets: Vec<&'a str>,
}

impl<'a> Sanitizer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, secret: &'a str) -> Self {
        if !secret.is_empty() {
            self.secrets.push(secret);
        }
        self
    }

    /// Sanitized copy of a response body.
    pub fn response(&self, body: &str) -> String {
        let redacted = self.hide_secrets(&redact_token(body));
        decode_unicode_escapes(&redacted)
    }

    /// Sanitized copy of an outgoing request body.
    pub fn request(&self, body: &str) -> String {
        decode_unicode_escapes(&self.hide_secrets(body))
    }

    fn hide_secrets(&self, text: &str) -> String {
        self.secrets
            .iter()
            .fold(text.to_string(), |acc, secret| redact_secret(&acc, secret))
    }
}
