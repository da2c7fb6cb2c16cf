/* SPDX-FileCopyrightText: © 2025-2026 dmgdisasm contributors */
/* SPDX-License-Identifier: MIT */

use alloc::collections::btree_map::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::registry;
use super::AnnotationError;

/// One parsed directive: `name arg1 arg2 key=value ...`.
///
/// Parsing validates the name against the registry immediately, so an
/// [`Annotation`] that exists is always dispatchable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    name: String,
    args: Vec<String>,
    kwargs: BTreeMap<String, String>,
}

impl Annotation {
    pub fn parse(text: &str) -> Result<Self, AnnotationError> {
        let mut words = text.split_whitespace();
        let name = words.next().unwrap_or("").to_string();
        if registry::lookup(&name).is_none() {
            return Err(AnnotationError::UnknownAnnotation { name });
        }

        let mut args = Vec::new();
        let mut kwargs = BTreeMap::new();
        for word in words {
            match word.split_once('=') {
                Some((key, value)) => {
                    kwargs.insert(key.to_string(), value.to_string());
                }
                None => args.push(word.to_string()),
            }
        }
        Ok(Self { name, args, kwargs })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn kwarg(&self, key: &str) -> Option<&str> {
        self.kwargs.get(key).map(String::as_str)
    }

    /// Position in the ascending application order.
    #[must_use]
    pub(crate) fn priority(&self) -> u8 {
        match registry::lookup(&self.name) {
            Some(entry) => entry.priority,
            // Unreachable after parse, but a stable answer is cheaper than
            // a panic path.
            None => u8::MAX,
        }
    }
}

/// Numeric annotation arguments: `$2a` and `0x2a` are hex, bare digits are
/// decimal.
pub(crate) fn parse_number(text: &str) -> Option<u16> {
    if let Some(hex) = text.strip_prefix('$') {
        u16::from_str_radix(hex, 16).ok()
    } else if let Some(hex) = text.strip_prefix("0x") {
        u16::from_str_radix(hex, 16).ok()
    } else {
        text.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_and_keyword_arguments() {
        let annotation = Annotation::parse("data bwp size=12").unwrap();
        assert_eq!(annotation.name(), "data");
        assert_eq!(annotation.arg(0), Some("bwp"));
        assert_eq!(annotation.kwarg("size"), Some("12"));
        assert_eq!(annotation.kwarg("missing"), None);
    }

    #[test]
    fn unknown_name_is_a_hard_error() {
        assert_eq!(
            Annotation::parse("frobnicate 1 2"),
            Err(AnnotationError::UnknownAnnotation {
                name: "frobnicate".into()
            })
        );
    }

    #[test]
    fn number_formats() {
        assert_eq!(parse_number("$2a"), Some(0x2A));
        assert_eq!(parse_number("0x2a"), Some(0x2A));
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number("bogus"), None);
    }
}
