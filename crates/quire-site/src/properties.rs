//! Page properties and output path resolution.
//!
//! Properties are a flat string-to-string mapping read from a document's YAML
//! front matter. The only key interpreted here is [`OUT_KEY`], which lets a
//! page choose its own output path.

use std::collections::HashMap;

use quire_paths::SuffixRule;
use serde_yaml::Value;

/// Property naming an explicit output path for the page.
pub const OUT_KEY: &str = "out";

/// Per-page property map.
///
/// Keys are unique. When built from a sequence holding the same key twice,
/// the last value wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    /// Parse properties from YAML front matter.
    ///
    /// Empty content yields empty properties. Scalar values are kept as
    /// strings; nulls, sequences and mappings are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or is not a mapping.
    pub fn from_yaml(content: &str) -> Result<Self, PropertiesError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_yaml::from_str(trimmed)
            .map_err(|e| PropertiesError::Parse(format!("Invalid YAML: {e}")))?;
        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(Self::default()),
            _ => return Err(PropertiesError::NotAMapping),
        };

        let mut values = HashMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let Some(key) = scalar_to_string(key) else {
                tracing::debug!("Skipping property with non-scalar key");
                continue;
            };
            match scalar_to_string(value) {
                Some(value) => {
                    values.insert(key, value);
                }
                None => tracing::debug!(key = %key, "Skipping non-scalar property"),
            }
        }

        Ok(Self { values })
    }

    /// Get a property value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all key/value pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Error type for property parsing.
#[derive(Debug, thiserror::Error)]
pub enum PropertiesError {
    /// YAML parsing error.
    #[error("{0}")]
    Parse(String),
    /// Front matter is valid YAML but not a key/value mapping.
    #[error("Front matter must be a mapping")]
    NotAMapping,
}

/// Resolve the output path of a page.
///
/// Uses the [`OUT_KEY`] property when it follows the output convention of
/// `convert` (ends with its target suffix); otherwise the override is dropped
/// and `convert` is applied to `source_path`.
///
/// # Examples
///
/// ```
/// use quire_paths::SuffixRule;
/// use quire_site::{Properties, convert_to_target};
///
/// let rule = SuffixRule::default();
/// let props: Properties = [("out", "home.html")].into_iter().collect();
/// assert_eq!(convert_to_target(&props, &rule, "index.md"), "home.html");
/// assert_eq!(convert_to_target(&Properties::default(), &rule, "index.md"), "index.html");
/// ```
pub fn convert_to_target(
    properties: &Properties,
    convert: &SuffixRule,
    source_path: &str,
) -> String {
    match properties.get(OUT_KEY) {
        Some(out) if convert.is_target(out) => out.to_owned(),
        Some(out) => {
            tracing::debug!(
                path = %source_path,
                out = %out,
                expected = %convert.target_suffix(),
                "Ignoring output override with unexpected suffix"
            );
            convert.apply(source_path)
        }
        None => convert.apply(source_path),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Properties {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_convert_to_target_invalid_override_dropped() {
        let rule = SuffixRule::default();

        let target = convert_to_target(&props(&[("out", "page.foo")]), &rule, "index.md");

        assert_eq!(target, "index.html");
    }

    #[test]
    fn test_convert_to_target_valid_override_used() {
        let rule = SuffixRule::default();

        let target = convert_to_target(&props(&[("out", "newIndex.html")]), &rule, "index.md");

        assert_eq!(target, "newIndex.html");
    }

    #[test]
    fn test_convert_to_target_without_override() {
        let rule = SuffixRule::default();

        assert_eq!(
            convert_to_target(&props(&[]), &rule, "index.md"),
            "index.html"
        );
    }

    #[test]
    fn test_convert_to_target_nested_override_verbatim() {
        let rule = SuffixRule::default();

        let target = convert_to_target(&props(&[("out", "x/y/z.html")]), &rule, "a/b.md");

        assert_eq!(target, "x/y/z.html");
    }

    #[test]
    fn test_convert_to_target_custom_rule() {
        let rule = SuffixRule::new(".markdown", ".htm");

        assert_eq!(
            convert_to_target(&props(&[("out", "a.html")]), &rule, "b.markdown"),
            "b.htm"
        );
        assert_eq!(
            convert_to_target(&props(&[("out", "a.htm")]), &rule, "b.markdown"),
            "a.htm"
        );
    }

    #[test]
    fn test_from_iter_last_value_wins() {
        let properties = props(&[("out", "a.html"), ("out", "b.html")]);

        assert_eq!(properties.len(), 1);
        assert_eq!(properties.get("out"), Some("b.html"));
    }

    #[test]
    fn test_from_yaml_empty() {
        let properties = Properties::from_yaml("  \n").unwrap();

        assert!(properties.is_empty());
    }

    #[test]
    fn test_from_yaml_scalars_stringified() {
        let properties = Properties::from_yaml("out: a.html\nweight: 3\ndraft: false\n").unwrap();

        assert_eq!(properties.get("out"), Some("a.html"));
        assert_eq!(properties.get("weight"), Some("3"));
        assert_eq!(properties.get("draft"), Some("false"));
    }

    #[test]
    fn test_from_yaml_skips_non_scalars() {
        let properties =
            Properties::from_yaml("title: Guide\ntags:\n  - a\n  - b\nempty:\n").unwrap();

        assert_eq!(properties.len(), 1);
        assert_eq!(properties.get("title"), Some("Guide"));
    }

    #[test]
    fn test_from_yaml_invalid() {
        let result = Properties::from_yaml("out: [broken");

        assert!(matches!(result, Err(PropertiesError::Parse(_))));
    }

    #[test]
    fn test_from_yaml_not_a_mapping() {
        let result = Properties::from_yaml("- a\n- b\n");

        assert!(matches!(result, Err(PropertiesError::NotAMapping)));
    }
}
