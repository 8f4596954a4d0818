use indexmap::IndexMap;
use itertools::Itertools;

use crate::collection::{normalize_key, Collection, Elements};
use crate::common::{Key, ReadExecutor, Value};
use crate::errors::{CollectError, CollectResult, ErrorKind};
use crate::filter::Field;
use crate::IMPLODE_SEPARATOR;

impl Collection {
    /// Extracts `field` from every element into a new sequential collection.
    /// Missing fields yield [Value::Null].
    pub fn pluck(&self, field: impl Into<Field>) -> Collection {
        let field = field.into();
        self.foreach(|item, _| field.resolve(item))
    }

    /// Extracts `field` from every element into a keyed collection indexed by
    /// `key` of the same element.
    ///
    /// ```rust
    /// use collect::{collect, doc};
    /// use collect::common::Value;
    ///
    /// let users = collect(vec![doc!{ id: 7, name: "Ann" }, doc!{ id: 9, name: "Bob" }]).unwrap();
    /// let names = users.pluck_keyed("name", "id");
    /// assert_eq!(names.get(9), Some(Value::from("Bob")));
    /// ```
    pub fn pluck_keyed(&self, field: impl Into<Field>, key: impl Into<Field>) -> Collection {
        let field = field.into();
        let key = key.into();
        self.foreach_keyed(|item, _| field.resolve(item), |item| key.resolve(item))
    }

    /// Returns the present elements re-sequenced `0..n-1`.
    pub fn values(&self) -> Collection {
        Collection::from_values(self.values_vec())
    }

    /// Returns the keys of the present elements; positions for sequences.
    pub fn keys(&self) -> Collection {
        Collection::from_values(self.keys_vec())
    }

    /// Indexes the elements by `field`. A later element overwrites an earlier
    /// one with the same key.
    pub fn key_by(&self, field: impl Into<Field>) -> Collection {
        let field = field.into();
        self.foreach_keyed(|item, _| item.clone(), |item| field.resolve(item))
    }

    /// Groups the elements by `field` into a keyed collection of arrays, in
    /// first-seen key order.
    ///
    /// ```rust
    /// use collect::{collect, doc};
    ///
    /// let items = collect(vec![doc!{ a: 1 }, doc!{ a: 2 }, doc!{ a: 1 }]).unwrap();
    /// let groups = items.group_by("a");
    /// assert_eq!(groups.length(), 2);
    /// assert_eq!(groups.get(1).and_then(|g| g.as_array().map(|g| g.len())), Some(2));
    /// ```
    pub fn group_by(&self, field: impl Into<Field>) -> Collection {
        self.group_by_with(field, true)
    }

    /// Groups the elements by `field`. With `assoc == false` the groups are
    /// re-sequenced `0..n-1` instead of keyed by the group value.
    pub fn group_by_with(&self, field: impl Into<Field>, assoc: bool) -> Collection {
        let field = field.into();
        let mut groups: IndexMap<Key, Vec<Value>> = IndexMap::new();
        for item in self.values_vec() {
            groups.entry(normalize_key(field.resolve(&item))).or_default().push(item);
        }

        let mut result = Elements::keyed(IndexMap::new());
        for (key, bucket) in groups {
            result.set(key, Value::Array(bucket));
        }

        let grouped = Collection::from_elements(result);
        if assoc {
            grouped
        } else {
            grouped.values()
        }
    }

    /// Swaps keys and values. Values are normalised like keyed storage keys,
    /// so `1` and `"1"` collide, and a later duplicate overwrites an earlier
    /// one.
    ///
    /// ```rust
    /// use collect::collect;
    /// use collect::common::Value;
    ///
    /// let flipped = collect(vec!["a", "b"]).unwrap().flip();
    /// assert_eq!(flipped.get(&Value::from("b")), Some(&Value::USize(1)));
    /// ```
    pub fn flip(&self) -> IndexMap<Key, Value> {
        self.iter()
            .map(|(key, item)| (normalize_key(item), key))
            .collect()
    }

    /// Pairs the values of this collection, used as keys, with the elements
    /// of `values` at the same keys. Missing counterparts are [Value::Null].
    /// Keys are normalised like [Collection::flip] does.
    ///
    /// ```rust
    /// use collect::collect;
    /// use collect::common::Value;
    ///
    /// let combined = collect(vec!["name", "age"]).unwrap().combine(vec![Value::from("Ann")]);
    /// assert_eq!(combined.get(&Value::from("name")), Some(&Value::from("Ann")));
    /// assert_eq!(combined.get(&Value::from("age")), Some(&Value::Null));
    /// ```
    pub fn combine(&self, values: impl Into<Value>) -> IndexMap<Key, Value> {
        let values = values.into();
        self.iter()
            .map(|(key, item)| (normalize_key(item), values.lookup(&key)))
            .collect()
    }

    /// Copies the range `[start, end)` into a new collection. Negative bounds
    /// count from the end and `None` means "to the end". Holes are kept, and
    /// keyed collections keep their keys.
    pub fn slice(&self, start: isize, end: Option<isize>) -> Collection {
        Collection::from_elements(self.snapshot().slice(start, end))
    }

    /// Appends `other` to a copy of this collection. Arrays and collections
    /// are spread element by element; any other value is appended as a single
    /// element. Keyed receivers contribute their values in order.
    pub fn concat(&self, other: impl Into<Value>) -> Collection {
        let mut slots = match self.snapshot() {
            Elements::Sequence(slots) => slots,
            Elements::Keyed(map) => map.into_values().map(Some).collect(),
        };

        match other.into() {
            Value::Array(values) => slots.extend(values.into_iter().map(Some)),
            Value::Collection(collection) => match collection.snapshot() {
                Elements::Sequence(other_slots) => slots.extend(other_slots),
                Elements::Keyed(map) => slots.extend(map.into_values().map(Some)),
            },
            value => slots.push(Some(value)),
        }
        Collection::from_elements(Elements::Sequence(slots))
    }

    /// Folds the elements from the left, seeded with the first element.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::EmptySequence] when the collection has no elements.
    ///
    /// ```rust
    /// use collect::collect;
    /// use collect::common::Value;
    ///
    /// let sum = collect(vec![1, 2, 3]).unwrap()
    ///     .reduce(|acc, item| Value::from(acc.parse_int().unwrap_or(0) + item.parse_int().unwrap_or(0)))
    ///     .unwrap();
    /// assert_eq!(sum, Value::from(6i64));
    /// ```
    pub fn reduce<F>(&self, func: F) -> CollectResult<Value>
    where
        F: FnMut(Value, Value) -> Value,
    {
        self.values_vec().into_iter().reduce(func).ok_or_else(|| {
            log::error!("Cannot reduce an empty collection without an initial value");
            CollectError::new(
                "Cannot reduce an empty collection without an initial value",
                ErrorKind::EmptySequence,
            )
        })
    }

    /// Splits the collection into sub-collections of at most `size` slots.
    ///
    /// A size of zero yields an empty collection.
    pub fn chunk(&self, size: usize) -> Collection {
        if size == 0 {
            log::warn!("Chunk size must be positive, returning an empty collection");
            return Collection::new();
        }

        let elements = self.snapshot();
        let chunks = elements.len().div_ceil(size);
        let step = isize::try_from(size).unwrap_or(isize::MAX);
        let values = (0..chunks)
            .map(|i| {
                let start = (i as isize).saturating_mul(step);
                let chunk = elements.slice(start, Some(start.saturating_add(step)));
                Value::Collection(Collection::from_elements(chunk))
            })
            .collect();
        Collection::from_values(values)
    }

    /// Joins `field` of every element with the configured implode separator
    /// (`,` by default). An empty field name joins the elements themselves.
    pub fn implode(&self, field: impl Into<Field>) -> String {
        let separator = IMPLODE_SEPARATOR.read_with(|it| it.clone());
        self.implode_with(field, &separator)
    }

    /// Joins `field` of every element with `separator`.
    ///
    /// Values render as text: `Null` renders empty, arrays join with `,` and
    /// records render as `[object Object]`.
    ///
    /// ```rust
    /// use collect::collect;
    ///
    /// assert_eq!(collect(vec![1, 2, 3]).unwrap().implode_with("", "-"), "1-2-3");
    /// ```
    pub fn implode_with(&self, field: impl Into<Field>, separator: &str) -> String {
        match self.pluck(field).to_array() {
            Value::Array(values) => values.iter().map(|v| v.to_join_string()).join(separator),
            other => other.to_join_string(),
        }
    }
}
