//! Attribute access for a single `row` element

use super::RecordError;
use quick_xml::events::BytesStart;
use std::collections::HashMap;
use std::str::FromStr;

/// Unescaped attributes of one `row` element, keyed by attribute name.
///
/// Names are case-sensitive and kept exactly as in the dump (`Id`,
/// `TagName`, `ExcerptPostId`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowAttributes {
    values: HashMap<String, String>,
}

impl RowAttributes {
    /// Collect and unescape every attribute of `element`
    pub fn from_element(element: &BytesStart<'_>) -> Result<Self, RecordError> {
        let mut values = HashMap::new();

        for attr in element.attributes() {
            let attr = attr?;
            let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            values.insert(name, value);
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Free text; an absent attribute reads as empty
    pub fn text(&self, name: &str) -> String {
        self.get(name).map(str::to_owned).unwrap_or_default()
    }

    /// A value that must be present and parse as `T`
    pub fn required<T: FromStr>(&self, name: &'static str) -> Result<T, RecordError> {
        let raw = self.get(name).ok_or(RecordError::MissingAttribute(name))?;
        parse_value(name, raw)
    }

    /// A value that may be absent; present-but-blank also counts as absent
    pub fn optional<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, RecordError> {
        match self.get(name) {
            Some(raw) if !raw.trim().is_empty() => parse_value(name, raw).map(Some),
            _ => Ok(None),
        }
    }

    /// A boolean that must be present
    ///
    /// Accepts `true`/`false` in any case plus `1`/`0` and `t`/`f`.
    pub fn required_flag(&self, name: &'static str) -> Result<bool, RecordError> {
        let raw = self.get(name).ok_or(RecordError::MissingAttribute(name))?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Ok(true),
            "false" | "f" | "0" => Ok(false),
            _ => Err(RecordError::InvalidValue {
                name,
                value: raw.to_string(),
            }),
        }
    }
}

fn parse_value<T: FromStr>(name: &'static str, raw: &str) -> Result<T, RecordError> {
    raw.trim().parse().map_err(|_| RecordError::InvalidValue {
        name,
        value: raw.to_string(),
    })
}

impl<K, V> FromIterator<(K, V)> for RowAttributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
