//! Line decoding.
//!
//! Turns one markup line such as
//! `zoneA;;shape=rect;;coords=0,0,10,10;;tooltip=Zone A;;description=Hello`
//! into a flat [`Record`] of escaped key/value pairs.

use std::collections::HashMap;

use crate::util::escape_html;

/// Separator between the clauses of a line.
pub const FIELD_SEPARATOR: &str = ";;";

/// Separator between key and value inside a clause.
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Key under which the leading, unnamed token of a line is stored.
pub const NAME_KEY: &str = "name";

/// Flat key/value record decoded from one markup line.
///
/// A decoded record always holds [`NAME_KEY`]. The empty record (no `name`)
/// is the signal for a malformed line.
///
/// # Example
///
/// ```
/// use imagemap_renderer::Record;
///
/// let record = Record::decode("pic.png;;width=300");
/// assert_eq!(record.get("name"), Some("pic.png"));
/// assert_eq!(record.get("width"), Some("300"));
///
/// let malformed = Record::decode("pic.png;;width");
/// assert!(malformed.is_empty());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    /// Decode a single line.
    ///
    /// Every clause after the first must contain exactly one `=`; otherwise the
    /// whole line is rejected and an empty record is returned. Keys and values
    /// are HTML-escaped before they are stored.
    #[must_use]
    pub fn decode(line: &str) -> Self {
        let mut segments = line.split(FIELD_SEPARATOR);
        let mut fields = HashMap::new();

        let name = segments.next().unwrap_or_default();
        fields.insert(NAME_KEY.to_owned(), escape_html(name));

        for segment in segments {
            let mut parts = segment.split(KEY_VALUE_SEPARATOR);
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                return Self::default();
            };
            fields.insert(escape_html(key), escape_html(value));
        }

        Self { fields }
    }

    /// Whether the record is empty (the line was malformed).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields, including `name`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Get a field value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Remove a field and return its value.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    /// Remove the `name` field and return its value.
    pub fn take_name(&mut self) -> Option<String> {
        self.take(NAME_KEY)
    }

    /// Remaining keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.fields.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
