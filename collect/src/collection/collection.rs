use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::common::{atomic, unordered_hash, Atomic, Key, ReadExecutor, Value, WriteExecutor};
use crate::errors::{CollectError, CollectResult, ErrorKind};

use super::Elements;

/// A fluent, chainable wrapper around an ordered sequence of values.
///
/// Every transformation (`filter`, `pluck`, `group_by`, `chunk`, ...) returns a
/// new `Collection`; only [Collection::push], [Collection::set] and
/// [Collection::delete] mutate the receiver.
///
/// ## Sharing
///
/// The elements live behind a shared cell. Cloning a `Collection` (or calling
/// [Collection::share]) hands out another handle to the *same* elements, so a
/// mutation through one handle is visible through every other handle. Use
/// [Collection::values] or [Collection::slice] for an independent copy.
///
/// A collection must not contain itself, directly or through nested
/// collections.
///
/// # Examples
///
/// ```rust
/// use collect::{collect, doc};
/// use collect::common::Value;
///
/// let people = collect(vec![
///     doc!{ name: "Ann", team: "red" },
///     doc!{ name: "Bob", team: "blue" },
///     doc!{ name: "Cid", team: "red" },
/// ]).unwrap();
///
/// let reds = people.where_eq("team", "red").pluck("name");
/// assert_eq!(reds.to_array(), Value::from(vec!["Ann", "Cid"]));
/// assert_eq!(people.implode("name"), "Ann,Bob,Cid");
/// ```
#[derive(Clone)]
pub struct Collection {
    elements: Atomic<Elements>,
}

impl Collection {
    /// Creates an empty sequential collection.
    pub fn new() -> Self {
        Collection::from_elements(Elements::default())
    }

    /// Creates a collection over `data`, which must be an array.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::TypeConstraint] if `data` is not a [Value::Array].
    ///
    /// ```rust
    /// use collect::collection::Collection;
    /// use collect::errors::ErrorKind;
    ///
    /// assert_eq!(Collection::init(vec![1, 2, 3]).unwrap().length(), 3);
    ///
    /// let err = Collection::init("not an array").unwrap_err();
    /// assert_eq!(err.kind(), &ErrorKind::TypeConstraint);
    /// ```
    pub fn init(data: impl Into<Value>) -> CollectResult<Self> {
        match data.into() {
            Value::Array(values) => Ok(Collection::from_elements(Elements::sequence(values))),
            other => {
                log::error!("Collection data must be an array, got {:?}", other);
                Err(CollectError::new(
                    "Collection data must be an array",
                    ErrorKind::TypeConstraint,
                ))
            }
        }
    }

    /// Wraps an ordered map as a keyed collection.
    pub fn keyed(map: IndexMap<Key, Value>) -> Self {
        Collection::from_elements(Elements::keyed(map))
    }

    pub(crate) fn from_elements(elements: Elements) -> Self {
        Collection {
            elements: atomic(elements),
        }
    }

    pub(crate) fn from_values(values: Vec<Value>) -> Self {
        Collection::from_elements(Elements::sequence(values))
    }

    /// Returns another handle to the same elements.
    pub fn share(&self) -> Self {
        self.clone()
    }

    /// Checks whether both handles point to the same elements.
    pub fn is_shared_with(&self, other: &Collection) -> bool {
        Arc::ptr_eq(&self.elements, &other.elements)
    }

    /// Slot count for sequences (holes included), entry count for keyed
    /// collections.
    pub fn length(&self) -> usize {
        self.elements.read_with(|it| it.len())
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Checks whether the collection holds associative (keyed) storage.
    pub fn is_keyed(&self) -> bool {
        self.elements.read_with(|it| it.is_keyed())
    }

    /// Returns the element at `key`, or `None` when absent.
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        let key = key.into();
        self.elements.read_with(|it| it.get(&key))
    }

    /// Writes `value` at `key`.
    ///
    /// Writing past the end of a sequence pads the gap with holes; a key that
    /// is not a position turns the collection keyed.
    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        log::trace!("Setting {:?} in collection", key);
        self.elements.write_with(|it| it.set(key, value));
    }

    /// Checks whether an element is present at `key`. Holes are absent.
    pub fn has(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        self.elements.read_with(|it| it.contains(&key))
    }

    /// Removes the element at `key`, leaving a hole in a sequence. Later
    /// elements keep their positions.
    ///
    /// Returns whether an element was removed.
    pub fn delete(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        self.elements.write_with(|it| it.remove(&key))
    }

    /// Appends `item` to the end and returns the new length.
    pub fn push(&self, item: impl Into<Value>) -> usize {
        let item = item.into();
        self.elements.write_with(|it| it.push(item))
    }

    /// Iterates over a snapshot of the present `(key, value)` pairs.
    pub fn iter(&self) -> std::vec::IntoIter<(Key, Value)> {
        self.entries().into_iter()
    }

    pub(crate) fn entries(&self) -> Vec<(Key, Value)> {
        self.elements.read_with(|it| it.entries())
    }

    pub(crate) fn values_vec(&self) -> Vec<Value> {
        self.elements.read_with(|it| it.values())
    }

    pub(crate) fn keys_vec(&self) -> Vec<Key> {
        self.elements.read_with(|it| it.keys())
    }

    pub(crate) fn snapshot(&self) -> Elements {
        self.elements.read_with(|it| it.clone())
    }

    /// Maps every present element to `value_fn(item, key)`, in iteration
    /// order, into a new sequential collection. Holes are skipped.
    ///
    /// ```rust
    /// use collect::collect;
    /// use collect::common::Value;
    ///
    /// let squares = collect(vec![1, 2, 3]).unwrap()
    ///     .foreach(|item, _| item.parse_int().map(|n| n * n));
    /// assert_eq!(squares.to_array(), Value::from(vec![1i64, 4, 9]));
    /// ```
    pub fn foreach<F, R>(&self, mut value_fn: F) -> Collection
    where
        F: FnMut(&Value, &Key) -> R,
        R: Into<Value>,
    {
        let values = self
            .entries()
            .iter()
            .map(|(key, item)| value_fn(item, key).into())
            .collect();
        Collection::from_values(values)
    }

    /// Maps every present element to `value_fn(item, key)` and stores it under
    /// `key_fn(item)` in a new keyed collection. A later element overwrites an
    /// earlier one with the same key, keeping the first one's position.
    pub fn foreach_keyed<F, G, R, K>(&self, mut value_fn: F, mut key_fn: G) -> Collection
    where
        F: FnMut(&Value, &Key) -> R,
        G: FnMut(&Value) -> K,
        R: Into<Value>,
        K: Into<Key>,
    {
        let mut result = Elements::keyed(IndexMap::new());
        for (key, item) in self.entries() {
            let new_key = key_fn(&item).into();
            let new_value = value_fn(&item, &key).into();
            result.set(new_key, new_value);
        }
        Collection::from_elements(result)
    }

    /// Converts the collection into a plain value: a [Value::Array] for
    /// sequences (holes dropped) or a [Value::Map] for keyed collections.
    /// Nested collections are converted recursively.
    pub fn to_array(&self) -> Value {
        let convert = |item: Value| match item {
            Value::Collection(nested) => nested.to_array(),
            other => other,
        };

        match self.snapshot() {
            Elements::Sequence(slots) => {
                Value::Array(slots.into_iter().flatten().map(convert).collect())
            }
            Elements::Keyed(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, convert(v))).collect())
            }
        }
    }

    /// Runs `func` with this collection when `condition` is truthy.
    ///
    /// ```rust
    /// use collect::collect;
    ///
    /// let items = collect(vec![1, 2]).unwrap();
    /// assert_eq!(items.when(true, |c| c.length()), Some(2));
    /// assert_eq!(items.when(0, |c| c.length()), None);
    /// ```
    pub fn when<T, F>(&self, condition: impl Into<Value>, func: F) -> Option<T>
    where
        F: FnOnce(&Collection) -> T,
    {
        if condition.into().is_truthy() {
            Some(func(self))
        } else {
            None
        }
    }
}

impl Default for Collection {
    fn default() -> Self {
        Collection::new()
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.is_shared_with(other) || self.snapshot() == other.snapshot()
    }
}

impl Eq for Collection {}

impl Hash for Collection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.snapshot() {
            Elements::Sequence(slots) => {
                0u8.hash(state);
                slots.hash(state);
            }
            Elements::Keyed(map) => {
                1u8.hash(state);
                map.len().hash(state);
                unordered_hash(map.iter()).hash(state);
            }
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_array().to_pretty_json(0))
    }
}

impl Debug for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "collection({})", self.to_array().to_debug_string(0))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Collection {
    fn from(values: Vec<T>) -> Self {
        Collection::from_values(values.into_iter().map(|v| v.into()).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Collection {
    fn from(values: [T; N]) -> Self {
        Collection::from_values(values.into_iter().map(|v| v.into()).collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for Collection {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Collection::from_values(iter.into_iter().map(|v| v.into()).collect())
    }
}

impl IntoIterator for &Collection {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Collection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_array(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Collection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match <Value as serde::Deserialize>::deserialize(deserializer)? {
            Value::Array(values) => Ok(Collection::from_values(values)),
            Value::Document(doc) => Ok(Collection::keyed(
                doc.iter()
                    .map(|(key, value)| (Value::from(key), value.clone()))
                    .collect(),
            )),
            Value::Map(map) => Ok(Collection::keyed(map)),
            other => Err(serde::de::Error::custom(format!(
                "expected an array or an object for a collection, got {:?}",
                other
            ))),
        }
    }
}

/// Creates a [Collection] from a list of values.
///
/// ```rust
/// use collect::{collect, doc};
///
/// let items = collect![1, "two", 3.0, doc!{ four: 4 }];
/// assert_eq!(items.length(), 4);
/// assert!(collect![].is_empty());
/// ```
#[macro_export]
macro_rules! collect {
    () => {
        $crate::collection::Collection::new()
    };

    ($($value:expr),+ $(,)?) => {
        $crate::collection::Collection::from(vec![$($crate::common::Value::from($value)),+])
    };
}
