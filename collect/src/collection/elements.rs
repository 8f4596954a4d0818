use crate::common::{Key, Value};
use indexmap::IndexMap;

/// Storage behind a [crate::collection::Collection].
///
/// A collection starts out as a dense `Sequence` indexed `0..n-1`. Deleting an
/// element leaves a hole (`None`) so later positions keep their index.
/// Associative operations (`key_by`, `group_by`, keyed `pluck`) produce
/// `Keyed` storage, an insertion ordered map. Writing a key that is not a
/// position into a sequence turns it into `Keyed` storage as well.
///
/// Keyed storage treats canonical numeric strings as positions, so `"1"` and
/// `1` address the same entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Elements {
    Sequence(Vec<Option<Value>>),
    Keyed(IndexMap<Key, Value>),
}

impl Default for Elements {
    fn default() -> Self {
        Elements::Sequence(Vec::new())
    }
}

/// Largest run of holes a single write may pad a sequence with. Writes
/// further past the end store the element sparsely in keyed storage.
pub(crate) const MAX_HOLE_PADDING: usize = 1 << 16;

/// Maps canonical numeric string keys to positions.
pub(crate) fn normalize_key(key: Key) -> Key {
    match key.as_index() {
        Some(index) if key.is_string() => Value::USize(index),
        _ => key,
    }
}

/// Resolves a JS-style relative slice bound against `len`.
fn clamp_bound(bound: isize, len: usize) -> usize {
    if bound < 0 {
        len.saturating_sub(bound.unsigned_abs())
    } else {
        (bound as usize).min(len)
    }
}

impl Elements {
    pub(crate) fn sequence(values: Vec<Value>) -> Self {
        Elements::Sequence(values.into_iter().map(Some).collect())
    }

    pub(crate) fn keyed(map: IndexMap<Key, Value>) -> Self {
        Elements::Keyed(
            map.into_iter()
                .map(|(k, v)| (normalize_key(k), v))
                .collect(),
        )
    }

    /// Slot count for sequences, holes included; entry count for keyed storage.
    pub fn len(&self) -> usize {
        match self {
            Elements::Sequence(slots) => slots.len(),
            Elements::Keyed(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self, Elements::Keyed(_))
    }

    /// Snapshot of the present entries in iteration order. Sequence positions
    /// are reported as [Value::USize].
    pub fn entries(&self) -> Vec<(Key, Value)> {
        match self {
            Elements::Sequence(slots) => slots
                .iter()
                .enumerate()
                .filter_map(|(i, slot)| slot.as_ref().map(|v| (Value::USize(i), v.clone())))
                .collect(),
            Elements::Keyed(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }

    /// Present values in iteration order.
    pub fn values(&self) -> Vec<Value> {
        match self {
            Elements::Sequence(slots) => slots.iter().flatten().cloned().collect(),
            Elements::Keyed(map) => map.values().cloned().collect(),
        }
    }

    /// Keys of the present values in iteration order.
    pub fn keys(&self) -> Vec<Key> {
        match self {
            Elements::Sequence(slots) => slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.is_some())
                .map(|(i, _)| Value::USize(i))
                .collect(),
            Elements::Keyed(map) => map.keys().cloned().collect(),
        }
    }

    pub fn get(&self, key: &Key) -> Option<Value> {
        match self {
            Elements::Sequence(slots) => key
                .as_index()
                .and_then(|i| slots.get(i))
                .and_then(|slot| slot.clone()),
            Elements::Keyed(map) => map
                .get(key)
                .or_else(|| map.get(&normalize_key(key.clone())))
                .cloned(),
        }
    }

    pub fn contains(&self, key: &Key) -> bool {
        match self {
            Elements::Sequence(slots) => key
                .as_index()
                .and_then(|i| slots.get(i))
                .is_some_and(|slot| slot.is_some()),
            Elements::Keyed(map) => {
                map.contains_key(key) || map.contains_key(&normalize_key(key.clone()))
            }
        }
    }

    /// Writes `value` at `key`.
    ///
    /// A position past the end of a sequence pads the gap with holes. A key
    /// that is not a position, or a position more than [MAX_HOLE_PADDING]
    /// past the end, converts a sequence into keyed storage, keeping the
    /// present elements under their positions.
    pub fn set(&mut self, key: Key, value: Value) {
        match self {
            Elements::Sequence(slots) => match key.as_index() {
                Some(index) if index < slots.len() => slots[index] = Some(value),
                Some(index) if index - slots.len() <= MAX_HOLE_PADDING => {
                    match index.checked_add(1) {
                        Some(new_len) => {
                            slots.resize(new_len, None);
                            slots[index] = Some(value);
                        }
                        None => self.convert_and_insert(Value::USize(index), value),
                    }
                }
                Some(index) => self.convert_and_insert(Value::USize(index), value),
                None => self.convert_and_insert(key, value),
            },
            Elements::Keyed(map) => {
                map.insert(normalize_key(key), value);
            }
        }
    }

    fn convert_and_insert(&mut self, key: Key, value: Value) {
        log::debug!("Switching sequence to keyed storage for key {}", key.to_join_string());
        let mut map: IndexMap<Key, Value> = self.entries().into_iter().collect();
        map.insert(key, value);
        *self = Elements::Keyed(map);
    }

    /// Removes the value at `key`. Sequences keep a hole in its place.
    /// Returns whether a value was removed.
    pub fn remove(&mut self, key: &Key) -> bool {
        match self {
            Elements::Sequence(slots) => key
                .as_index()
                .and_then(|i| slots.get_mut(i))
                .and_then(|slot| slot.take())
                .is_some(),
            Elements::Keyed(map) => {
                map.shift_remove(key).is_some()
                    || map.shift_remove(&normalize_key(key.clone())).is_some()
            }
        }
    }

    /// Appends `value` and returns the new length. Keyed storage appends under
    /// the next integer key (one past the largest non-negative integer key).
    pub fn push(&mut self, value: Value) -> usize {
        match self {
            Elements::Sequence(slots) => {
                slots.push(Some(value));
                slots.len()
            }
            Elements::Keyed(map) => {
                let next = map
                    .keys()
                    .filter_map(|k| k.as_index())
                    .max()
                    .map_or(0, |max| max + 1);
                map.insert(Value::USize(next), value);
                map.len()
            }
        }
    }

    /// Copies the range `[start, end)` with relative bound clamping: negative
    /// bounds count from the end, a missing end means the length. Holes are
    /// kept; keyed storage is sliced by position and keeps its keys.
    pub fn slice(&self, start: isize, end: Option<isize>) -> Elements {
        let len = self.len();
        let from = clamp_bound(start, len);
        let to = end.map_or(len, |e| clamp_bound(e, len));
        if from >= to {
            return match self {
                Elements::Sequence(_) => Elements::Sequence(Vec::new()),
                Elements::Keyed(_) => Elements::Keyed(IndexMap::new()),
            };
        }

        match self {
            Elements::Sequence(slots) => Elements::Sequence(slots[from..to].to_vec()),
            Elements::Keyed(map) => Elements::Keyed(
                map.iter()
                    .skip(from)
                    .take(to - from)
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Elements {
        Elements::sequence(vec![Value::from("a"), Value::from("b"), Value::from("c")])
    }

    #[test]
    fn test_clamp_bound() {
        assert_eq!(clamp_bound(0, 5), 0);
        assert_eq!(clamp_bound(7, 5), 5);
        assert_eq!(clamp_bound(-2, 5), 3);
        assert_eq!(clamp_bound(-9, 5), 0);
    }

    #[test]
    fn test_get_and_contains() {
        let elements = abc();
        assert_eq!(elements.get(&Value::from(1)), Some(Value::from("b")));
        assert_eq!(elements.get(&Value::from("2")), Some(Value::from("c")));
        assert_eq!(elements.get(&Value::from(3)), None);
        assert!(elements.contains(&Value::USize(0)));
        assert!(!elements.contains(&Value::from("x")));
    }

    #[test]
    fn test_remove_leaves_hole() {
        let mut elements = abc();
        assert!(elements.remove(&Value::from(1)));
        assert!(!elements.remove(&Value::from(1)));
        assert_eq!(elements.len(), 3);
        assert!(!elements.contains(&Value::from(1)));
        assert_eq!(elements.get(&Value::from(2)), Some(Value::from("c")));
        assert_eq!(elements.keys(), vec![Value::USize(0), Value::USize(2)]);
        assert_eq!(elements.values(), vec![Value::from("a"), Value::from("c")]);
    }

    #[test]
    fn test_set_past_end_pads_holes() {
        let mut elements = abc();
        elements.set(Value::from(5), Value::from("f"));
        assert_eq!(elements.len(), 6);
        assert!(!elements.contains(&Value::from(4)));
        assert_eq!(elements.get(&Value::from(5)), Some(Value::from("f")));
    }

    #[test]
    fn test_set_far_past_end_stays_sparse() {
        let mut elements = abc();
        elements.set(Value::USize(usize::MAX), Value::from("last"));
        assert!(elements.is_keyed());
        assert_eq!(elements.len(), 4);
        assert_eq!(elements.get(&Value::USize(usize::MAX)), Some(Value::from("last")));
        assert_eq!(elements.get(&Value::from(2)), Some(Value::from("c")));

        let mut elements = abc();
        elements.set(Value::I64(10_000_000_000), Value::from("far"));
        assert!(elements.is_keyed());
        assert_eq!(elements.get(&Value::from("10000000000")), Some(Value::from("far")));
        assert_eq!(elements.push(Value::from("next")), 5);
        assert_eq!(elements.get(&Value::I64(10_000_000_001)), Some(Value::from("next")));

        let mut elements = abc();
        elements.set(Value::USize(3 + MAX_HOLE_PADDING), Value::from("edge"));
        assert!(!elements.is_keyed());
        assert_eq!(elements.len(), 4 + MAX_HOLE_PADDING);
    }

    #[test]
    fn test_set_named_key_converts_to_keyed() {
        let mut elements = abc();
        elements.set(Value::from("name"), Value::from("n"));
        assert!(elements.is_keyed());
        assert_eq!(elements.len(), 4);
        assert_eq!(elements.get(&Value::from(0)), Some(Value::from("a")));
        assert_eq!(elements.get(&Value::from("name")), Some(Value::from("n")));
    }

    #[test]
    fn test_keyed_numeric_strings_address_positions() {
        let mut elements = Elements::keyed(IndexMap::new());
        elements.set(Value::from("7"), Value::from("seven"));
        assert_eq!(elements.get(&Value::from(7)), Some(Value::from("seven")));
        assert!(elements.contains(&Value::I64(7)));
        assert!(elements.remove(&Value::from("7")));
        assert!(elements.is_empty());
    }

    #[test]
    fn test_keyed_push_uses_next_integer_key() {
        let mut map = IndexMap::new();
        map.insert(Value::from("x"), Value::from(1));
        let mut elements = Elements::keyed(map);
        assert_eq!(elements.push(Value::from(2)), 2);
        assert_eq!(elements.get(&Value::from(0)), Some(Value::from(2)));

        elements.set(Value::from(10), Value::from(3));
        elements.push(Value::from(4));
        assert_eq!(elements.get(&Value::from(11)), Some(Value::from(4)));
    }

    #[test]
    fn test_slice_sequence() {
        let elements = abc();
        assert_eq!(elements.slice(1, None).values(), vec![Value::from("b"), Value::from("c")]);
        assert_eq!(elements.slice(-2, Some(-1)).values(), vec![Value::from("b")]);
        assert!(elements.slice(2, Some(1)).is_empty());
        assert_eq!(elements.slice(-10, Some(10)).len(), 3);
    }

    #[test]
    fn test_slice_keeps_holes_and_keys() {
        let mut elements = abc();
        elements.remove(&Value::from(1));
        assert_eq!(elements.slice(0, Some(2)).len(), 2);
        assert_eq!(elements.slice(0, Some(2)).values(), vec![Value::from("a")]);

        let mut map = IndexMap::new();
        map.insert(Value::from("a"), Value::from(1));
        map.insert(Value::from("b"), Value::from(2));
        map.insert(Value::from("c"), Value::from(3));
        let sliced = Elements::keyed(map).slice(1, None);
        assert_eq!(sliced.keys(), vec![Value::from("b"), Value::from("c")]);
    }
}
