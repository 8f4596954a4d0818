use crate::common::{quote_json, unordered_hash, ReadExecutor, Value};
use crate::errors::{CollectError, CollectResult, ErrorKind};
use crate::FIELD_SEPARATOR;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};

/// Represents a record element of a collection.
///
/// A document is an insertion ordered set of named fields. The key is always a
/// [String] and the value is a [Value].
///
/// Documents nest. The key of a nested field is a [String] separated by the
/// field separator (default: `.`), configurable through
/// [`crate::config::CollectConfig::set_field_separator`]. For a document
/// `{"a": {"b": 1}}`, `document.get("a.b")` returns `1`.
///
/// Two documents are equal when they hold the same fields with equal values,
/// regardless of field order.
#[derive(Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collect::collection::Document;
    ///
    /// let doc = Document::new();
    /// assert!(doc.is_empty());
    /// assert_eq!(doc.size(), 0);
    /// ```
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Associates the specified [Value] with the specified key in this document.
    ///
    /// If the key already exists its value is replaced in place, keeping the
    /// field's position. Keys containing the field separator create the
    /// intermediate documents (e.g. `"user.name"`).
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidOperation] if the key is empty and
    /// [ErrorKind::InvalidFieldName] if a segment of an embedded key is
    /// empty. A failed put leaves the document unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collect::collection::Document;
    /// use collect::common::Value;
    ///
    /// let mut doc = Document::new();
    /// doc.put("user.name", "Alice").unwrap();
    /// doc.put("age", 30).unwrap();
    /// assert_eq!(doc.get("user.name"), Value::from("Alice"));
    /// assert_eq!(doc.size(), 2);
    /// ```
    pub fn put<'a, T: Into<Value>>(
        &mut self,
        key: impl Into<Cow<'a, str>>,
        value: T,
    ) -> CollectResult<()> {
        let key = key.into();
        // key cannot be empty
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(CollectError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        let value = value.into();
        if self.is_embedded(&key) {
            let splits: Vec<String> =
                FIELD_SEPARATOR.read_with(|sep| key.split(sep.as_str()).map(String::from).collect());
            if splits.iter().any(|segment| segment.is_empty()) {
                log::error!("Invalid embedded field name {}", key);
                return Err(CollectError::new(
                    &format!("Invalid embedded field name {}", key),
                    ErrorKind::InvalidFieldName,
                ));
            }
            self.deep_put(&splits, value);
            Ok(())
        } else {
            self.data.insert(key.into_owned(), value);
            Ok(())
        }
    }

    /// Returns the [Value] associated with the key, or [Value::Null] if this
    /// document contains no mapping for it.
    ///
    /// Embedded keys walk into nested documents, and numeric segments index
    /// into arrays (`"items.0"`).
    ///
    /// ```rust
    /// use collect::doc;
    /// use collect::common::Value;
    ///
    /// let doc = doc!{ location: { city: "New York" }, items: [1, 2, 3] };
    /// assert_eq!(doc.get("location.city"), Value::from("New York"));
    /// assert_eq!(doc.get("items.1"), Value::from(2));
    /// assert_eq!(doc.get("missing"), Value::Null);
    /// ```
    pub fn get(&self, key: &str) -> Value {
        match self.data.get(key) {
            Some(value) => value.clone(),
            None if self.is_embedded(key) => self.deep_get(key),
            None => Value::Null,
        }
    }

    /// Reads a top level field, without interpreting the field separator.
    pub(crate) fn get_direct(&self, key: &str) -> Value {
        self.data.get(key).cloned().unwrap_or_default()
    }

    /// Checks if a top level key exists in the document.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Checks if a top level field or an embedded field exists in the document.
    pub fn contains_field(&self, field: &str) -> bool {
        self.contains_key(field) || self.fields().iter().any(|f| f == field)
    }

    /// Removes the key and returns its value, if it was present.
    ///
    /// Embedded keys remove the innermost field; a nested document left empty
    /// by the removal is removed as well. The order of the remaining fields is
    /// preserved.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        if let Some(value) = self.data.shift_remove(key) {
            return Some(value);
        }

        if self.is_embedded(key) {
            let splits: Vec<String> =
                FIELD_SEPARATOR.read_with(|sep| key.split(sep.as_str()).map(String::from).collect());
            self.deep_remove(&splits)
        } else {
            None
        }
    }

    /// Returns the number of top level entries in the document.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns every leaf field of the document; nested fields are joined with
    /// the field separator.
    ///
    /// ```rust
    /// use collect::doc;
    ///
    /// let doc = doc!{ name: "Alice", address: { city: "Oslo", zip: 150 } };
    /// assert_eq!(doc.fields(), vec!["name", "address.city", "address.zip"]);
    /// ```
    pub fn fields(&self) -> Vec<String> {
        self.get_fields_internal("")
    }

    /// Gets an iterator over the top level entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.data.iter()
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let mut json_string = String::with_capacity(self.data.len() * 30 + indent * 2);
        json_string.push_str("{\n");
        let indent_str = " ".repeat(indent + 2);
        for (key, value) in self.data.iter() {
            json_string.push_str(&format!(
                "{}{}: {},\n",
                indent_str,
                quote_json(key),
                value.to_pretty_json(indent + 2)
            ));
        }

        json_string.pop();
        json_string.pop();
        json_string.push_str(&format!("\n{}}}", " ".repeat(indent)));
        json_string
    }

    pub(crate) fn to_debug_string(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let mut debug_string = String::new();
        debug_string.push_str("{\n");
        let indent_str = " ".repeat(indent + 2);
        for (key, value) in self.data.iter() {
            debug_string.push_str(&format!(
                "{}\"{}\": {},\n",
                indent_str,
                key,
                value.to_debug_string(indent + 2)
            ));
        }

        debug_string.pop();
        debug_string.pop();
        debug_string.push_str(&format!("\n{}}}", " ".repeat(indent)));
        debug_string
    }

    fn is_embedded(&self, key: &str) -> bool {
        FIELD_SEPARATOR.read_with(|it| key.contains(it.as_str()))
    }

    fn get_fields_internal(&self, prefix: &str) -> Vec<String> {
        let separator = FIELD_SEPARATOR.read_with(|s| s.clone());
        let mut fields = Vec::new();

        for (key, value) in self.data.iter() {
            let field = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}{}{}", prefix, separator, key)
            };

            match value {
                // nested documents contribute their own leaves
                Value::Document(doc) if !doc.is_empty() => {
                    fields.append(&mut doc.get_fields_internal(&field))
                }
                _ => fields.push(field),
            }
        }
        fields
    }

    fn deep_get(&self, key: &str) -> Value {
        FIELD_SEPARATOR.read_with(|sep| {
            let mut splits = key.split(sep.as_str());
            match splits.next().and_then(|first| self.data.get(first)) {
                Some(head) => head.walk(splits),
                None => Value::Null,
            }
        })
    }

    // segments are validated by put
    fn deep_put(&mut self, splits: &[String], value: Value) {
        let Some((key, remaining)) = splits.split_first() else {
            return;
        };

        if remaining.is_empty() {
            self.data.insert(key.clone(), value);
            return;
        }

        // descend into an existing embedded document, or start a new one
        match self.data.get_mut(key) {
            Some(Value::Document(obj)) => obj.deep_put(remaining, value),
            _ => {
                let mut nested = Document::new();
                nested.deep_put(remaining, value);
                self.data.insert(key.clone(), Value::Document(nested));
            }
        }
    }

    fn deep_remove(&mut self, splits: &[String]) -> Option<Value> {
        let (key, remaining) = splits.split_first()?;
        if remaining.is_empty() {
            return self.data.shift_remove(key);
        }

        let Some(Value::Document(obj)) = self.data.get_mut(key) else {
            return None;
        };
        let removed = obj.deep_remove(remaining);
        if removed.is_some() && obj.is_empty() {
            self.data.shift_remove(key);
        }
        removed
    }
}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.len().hash(state);
        unordered_hash(self.data.iter()).hash(state);
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_debug_string(0))
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

impl From<IndexMap<String, Value>> for Document {
    fn from(data: IndexMap<String, Value>) -> Self {
        Document { data }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Document {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// Keys may be bare identifiers or string literals; values may be literals,
/// nested `{ .. }` documents, `[ .. ]` arrays or parenthesised expressions.
///
/// # Examples
///
/// ```rust
/// use collect::doc;
///
/// let empty = doc!{};
/// assert!(empty.is_empty());
///
/// let base = 100;
/// let person = doc!{
///     name: "Bob",
///     score: (base * 2),
///     "home town": "Oslo",
///     tags: ["admin", "user"],
///     address: { zip: 150 }
/// };
/// assert_eq!(person.size(), 5);
/// ```
#[macro_export]
macro_rules! doc {
    ({}) => {
        $crate::collection::Document::new()
    };

    () => {
        $crate::collection::Document::new()
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the [doc!] macro.
#[macro_export]
macro_rules! doc_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
