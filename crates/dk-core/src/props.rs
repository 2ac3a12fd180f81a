//! Character property maps and the share-string interchange format.
//!
//! A character is interchanged as a flat map of string keys to string
//! values: stat names hold decimal point allocations, resource keys hold
//! decimal current values (`-1` meaning "track at max"). Numeric parsing
//! is deliberately lenient — malformed or missing values fall back to
//! their defaults so saved characters stay loadable across ruleset
//! revisions.
//!
//! The share string is the same map serialized as `key: value` lines,
//! newline-joined and base64-encoded. Export filters entries equal to
//! their implicit default to keep the string compact.

use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::catalog::catalog;
use crate::error::{CoreError, CoreResult};
use crate::resource::{RESOURCE_UNSET, Resource};

/// A flat character property map.
pub type Props = HashMap<String, String>;

/// Parse an integer property, returning `None` on a missing or
/// malformed value.
pub fn int_prop(props: &Props, key: &str) -> Option<i32> {
    props.get(key).and_then(|v| v.trim().parse::<i32>().ok())
}

/// Whether a property entry equals its implicit default and can be
/// dropped from a share string.
fn is_default_entry(key: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        return true;
    }
    let parsed = value.trim().parse::<i32>().ok();
    if catalog().get(key).is_some() {
        return parsed == Some(0);
    }
    if Resource::from_key(key).is_some() {
        return parsed == Some(RESOURCE_UNSET);
    }
    false
}

/// Serialize a property map as a compact base64 share string.
///
/// Entries equal to their implicit default (zero-point stats,
/// max-sentinel resources, empty values) are omitted. Keys are emitted
/// in sorted order so equal maps produce equal strings.
pub fn to_share_string(props: &Props) -> String {
    let mut entries: Vec<(&String, &String)> = props
        .iter()
        .filter(|(key, value)| !is_default_entry(key, value))
        .collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    let lines: Vec<String> = entries
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect();
    BASE64.encode(lines.join("\n"))
}

/// Decode a share string back into a property map.
///
/// Lines without a colon are skipped; invalid base64 or non-UTF-8
/// content fails with a descriptive error.
pub fn parse_share_string(share: &str) -> CoreResult<Props> {
    let bytes = BASE64
        .decode(share.trim())
        .map_err(|e| CoreError::ShareString(format!("invalid base64: {e}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|_| CoreError::ShareString("decoded bytes are not UTF-8".to_string()))?;

    let mut props = Props::new();
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        props.insert(key.to_string(), value.trim().to_string());
    }
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props_of(entries: &[(&str, &str)]) -> Props {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn int_prop_lenient() {
        let props = props_of(&[("Level", "3"), ("Body", "abc"), ("Mind", " 2 ")]);
        assert_eq!(int_prop(&props, "Level"), Some(3));
        assert_eq!(int_prop(&props, "Body"), None);
        assert_eq!(int_prop(&props, "Mind"), Some(2));
        assert_eq!(int_prop(&props, "Soul"), None);
    }

    #[test]
    fn round_trip_preserves_non_default_entries() {
        let props = props_of(&[
            ("Level", "3"),
            ("Body", "2"),
            ("Muscles", "1"),
            ("Vitality", "4"),
        ]);
        let decoded = parse_share_string(&to_share_string(&props)).unwrap();
        assert_eq!(decoded, props);
    }

    #[test]
    fn export_filters_defaults() {
        let props = props_of(&[
            ("Level", "2"),
            ("Body", "0"),
            ("Vitality", "-1"),
            ("Notes", ""),
        ]);
        let decoded = parse_share_string(&to_share_string(&props)).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.get("Level").map(String::as_str), Some("2"));
    }

    #[test]
    fn export_keeps_non_default_resource_overrides() {
        let props = props_of(&[("Action", "2")]);
        let decoded = parse_share_string(&to_share_string(&props)).unwrap();
        assert_eq!(decoded.get("Action").map(String::as_str), Some("2"));
    }

    #[test]
    fn import_skips_lines_without_colon() {
        let encoded = BASE64.encode("Level: 2\ngarbage line\nBody: 1");
        let decoded = parse_share_string(&encoded).unwrap();
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn import_rejects_bad_base64() {
        let err = parse_share_string("!!! not base64 !!!").unwrap_err();
        assert!(err.to_string().contains("base64"));
    }

    #[test]
    fn import_rejects_non_utf8() {
        let encoded = BASE64.encode([0xff, 0xfe, 0x00, 0x01]);
        let err = parse_share_string(&encoded).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn equal_maps_share_equal_strings() {
        let a = props_of(&[("Level", "2"), ("Body", "1")]);
        let b = props_of(&[("Body", "1"), ("Level", "2")]);
        assert_eq!(to_share_string(&a), to_share_string(&b));
    }
}
