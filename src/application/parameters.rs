//! Operator-specific payment parameters.
//!
//! The platform hands over raw parameter values; each operator carries a
//! template such as `ID={0};SUM={1}` that turns them into `KEY=VALUE` pairs
//! separated by `;`.

use crate::error::{GatewayError, Result};

pub const ACCOUNT_ID_KEY: &str = "ID";

/// Expands `{n}` placeholders in `template` with `values[n]`.
///
/// Placeholders past the end of `values` expand to an empty string; anything
/// that is not a `{digits}` placeholder is copied through.
pub fn format_parameters<S: AsRef<str>>(values: &[S], template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let index = after
            .find('}')
            .filter(|&close| close > 0 && after[..close].bytes().all(|b| b.is_ascii_digit()))
            .map(|close| (close, after[..close].parse::<usize>()));
        match index {
            Some((close, Ok(n))) => {
                if let Some(value) = values.get(n) {
                    out.push_str(value.as_ref());
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Parsed `KEY=VALUE;KEY=VALUE` parameter list. Keys are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentParameters {
    entries: Vec<(String, String)>,
}

impl PaymentParameters {
    pub fn parse(formatted: &str) -> Self {
        let entries = formatted
            .split(';')
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                let key = key.trim();
                (!key.is_empty()).then(|| (key.to_string(), value.to_string()))
            })
            .collect();
        Self { entries }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `ID` parameter with every space removed.
    pub fn account_id(&self) -> Result<String> {
        let raw = self.get(ACCOUNT_ID_KEY).ok_or_else(|| {
            GatewayError::Validation(format!("Missing {} parameter", ACCOUNT_ID_KEY))
        })?;
        let id = crate::domain::payment::strip_spaces(raw);
        if id.is_empty() {
            return Err(GatewayError::Validation(format!(
                "Empty {} parameter",
                ACCOUNT_ID_KEY
            )));
        }
        Ok(id)
    }
}
