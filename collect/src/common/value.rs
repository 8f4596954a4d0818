use crate::collection::{Collection, Document};
use crate::common::ReadExecutor;
use crate::FIELD_SEPARATOR;
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::hash_map::DefaultHasher;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Compare two floats for equality with proper NaN handling.
#[inline]
fn num_eq_float(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        true
    } else {
        a == b
    }
}

/// Returns the integer a float stands for, if it has no fractional part.
#[inline]
fn integral_float(f: f64) -> Option<i128> {
    if f.is_finite() && f.fract() == 0.0 && f >= i128::MIN as f64 && f < i128::MAX as f64 {
        Some(f as i128)
    } else {
        None
    }
}

/// Numeric equality across every integer and float variant.
fn num_eq(a: &Value, b: &Value) -> bool {
    match (a.as_integer(), b.as_integer()) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) => b.as_decimal().and_then(integral_float) == Some(x),
        (None, Some(y)) => a.as_decimal().and_then(integral_float) == Some(y),
        (None, None) => match (a.as_decimal(), b.as_decimal()) {
            (Some(x), Some(y)) => num_eq_float(x, y),
            _ => false,
        },
    }
}

/// Order independent hash of map entries, consistent with map equality.
pub(crate) fn unordered_hash<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> u64
where
    K: Hash + 'a,
    V: Hash + 'a,
{
    entries.fold(0u64, |acc, entry| {
        let mut hasher = DefaultHasher::new();
        entry.hash(&mut hasher);
        acc.wrapping_add(hasher.finish())
    })
}

/// Represents an element of a [Collection]. It can be a simple value like
/// [Value::I32], [Value::String] or a complex value like [Value::Document],
/// [Value::Array], [Value::Map] or a nested [Value::Collection].
///
/// # Characteristics
/// - **Numeric equality**: integers compare equal across integer widths, and
///   an integral float equals the matching integer (`1 == 1.0`); NaN equals NaN
/// - **Hashable**: `Hash` agrees with `Eq`, so any value can serve as a [Key]
/// - **Truthy**: [Value::is_truthy] follows the usual dynamic-language rules
/// - **Default**: defaults to [Value::Null], which also stands for "absent"
///
/// # Usage
/// ```rust
/// use collect::common::Value;
/// use collect::val;
///
/// let v1: Value = 42.into();
/// let v2 = Value::from("hello");
/// let v3 = val!(true);
/// assert_eq!(v1, Value::I64(42));
/// assert!(v2.is_string());
/// assert!(v3.is_truthy());
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// Represents a null (or absent) value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a signed 32-bit integer value.
    I32(i32),
    /// Represents an unsigned 32-bit integer value.
    U32(u32),
    /// Represents a signed 64-bit integer value.
    I64(i64),
    /// Represents an unsigned 64-bit integer value.
    U64(u64),
    /// Represents a signed isize value.
    ISize(isize),
    /// Represents an unsigned isize value. Sequence positions use this variant.
    USize(usize),
    /// Represents a 32-bit floating point value.
    F32(f32),
    /// Represents a 64-bit floating point value.
    F64(f64),
    /// Represents a character value.
    Char(char),
    /// Represents a string value.
    String(String),
    /// Represents a record with named fields.
    Document(Document),
    /// Represents a dense array value.
    Array(Vec<Value>),
    /// Represents an insertion ordered associative container.
    Map(IndexMap<Key, Value>),
    /// Represents a nested collection.
    Collection(Collection),
}

/// Type alias for associative keys.
///
/// Any [Value] can be used as a key; sequence positions are reported as
/// [Value::USize].
pub type Key = Value;

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_debug_string(0))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.is_number() && other.is_number() {
            return num_eq(self, other);
        }

        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Document(a), Value::Document(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Collection(a), Value::Collection(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(int) = self.as_integer() {
            1u8.hash(state);
            int.hash(state);
            return;
        }

        if let Some(float) = self.as_decimal() {
            match integral_float(float) {
                Some(int) => {
                    1u8.hash(state);
                    int.hash(state);
                }
                None if float.is_nan() => {
                    2u8.hash(state);
                    f64::NAN.to_bits().hash(state);
                }
                None => {
                    2u8.hash(state);
                    float.to_bits().hash(state);
                }
            }
            return;
        }

        match self {
            Value::Null => 0u8.hash(state),
            Value::Bool(v) => {
                3u8.hash(state);
                v.hash(state);
            }
            Value::Char(v) => {
                4u8.hash(state);
                v.hash(state);
            }
            Value::String(v) => {
                5u8.hash(state);
                v.hash(state);
            }
            Value::Document(v) => {
                6u8.hash(state);
                v.hash(state);
            }
            Value::Array(v) => {
                7u8.hash(state);
                v.hash(state);
            }
            Value::Map(v) => {
                8u8.hash(state);
                v.len().hash(state);
                unordered_hash(v.iter()).hash(state);
            }
            Value::Collection(v) => {
                9u8.hash(state);
                v.hash(state);
            }
            // numbers are hashed above
            _ => {}
        }
    }
}

impl Value {
    /// Creates a new [Value] from the given value that implements [`Into<Value>`].
    pub fn from<T: Into<Value>>(value: T) -> Value {
        value.into()
    }

    /// Creates a new [Value] from the given [Option], mapping [None] to [Value::Null].
    pub fn from_option<T: Into<Value>>(value: Option<T>) -> Value {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }

    /// Creates a [Value::Array] from a vector of convertible values.
    pub fn from_vec<T: Into<Value>>(values: Vec<T>) -> Value {
        Value::Array(values.into_iter().map(|v| v.into()).collect())
    }

    /// Widens any integer variant to `i128`.
    #[inline]
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::I32(v) => Some(*v as i128),
            Value::U32(v) => Some(*v as i128),
            Value::I64(v) => Some(*v as i128),
            Value::U64(v) => Some(*v as i128),
            Value::ISize(v) => Some(*v as i128),
            Value::USize(v) => Some(*v as i128),
            _ => None,
        }
    }

    /// Widens any float variant to `f64`.
    #[inline]
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Value::F32(v) => Some(*v as f64),
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns any numeric variant as `f64`.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        self.as_integer()
            .map(|v| v as f64)
            .or_else(|| self.as_decimal())
    }

    /// Returns any integer variant as `i64` if it fits.
    #[inline]
    pub fn to_i64(&self) -> Option<i64> {
        self.as_integer().and_then(|v| i64::try_from(v).ok())
    }

    /// Returns the string value if the [Value] is [Value::String].
    #[inline]
    pub fn as_string(&self) -> Option<&String> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the record if the [Value] is [Value::Document].
    #[inline]
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the array value if the [Value] is [Value::Array].
    #[inline]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&IndexMap<Key, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Checks if the [Value] is [Value::Null].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Checks if the [Value] is [Value::String].
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Checks if the [Value] is [Value::Document].
    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self, Value::Document(_))
    }

    /// Checks if the [Value] is [Value::Array].
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Checks if the [Value] is [Value::Collection].
    #[inline]
    pub fn is_collection(&self) -> bool {
        matches!(self, Value::Collection(_))
    }

    /// Checks if the [Value] is a number type.
    #[inline]
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_decimal()
    }

    /// Checks if the [Value] is an integer type.
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Value::I32(_)
                | Value::U32(_)
                | Value::I64(_)
                | Value::U64(_)
                | Value::ISize(_)
                | Value::USize(_)
        )
    }

    /// Checks if the [Value] is a decimal type.
    #[inline]
    pub fn is_decimal(&self) -> bool {
        matches!(self, Value::F32(_) | Value::F64(_))
    }

    /// Truthiness of the value.
    ///
    /// `Null`, `false`, numeric zero, NaN and the empty string are falsy.
    /// Everything else is truthy, including empty arrays, maps, documents and
    /// collections.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(v) => *v,
            Value::String(v) => !v.is_empty(),
            v if v.is_number() => v.as_number().is_some_and(|n| n != 0.0 && !n.is_nan()),
            _ => true,
        }
    }

    /// Interprets the value as a sequence position.
    ///
    /// Non-negative integers, integral floats and canonical decimal strings
    /// (`"0"`, `"12"`, but not `"012"` or `"+1"`) are positions.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Value::String(s) => {
                let canonical = !s.is_empty()
                    && s.bytes().all(|b| b.is_ascii_digit())
                    && (s == "0" || !s.starts_with('0'));
                if canonical {
                    s.parse::<usize>().ok()
                } else {
                    None
                }
            }
            v if v.is_integer() => v.as_integer().and_then(|i| usize::try_from(i).ok()),
            v if v.is_decimal() => v
                .as_decimal()
                .and_then(integral_float)
                .and_then(|i| usize::try_from(i).ok()),
            _ => None,
        }
    }

    /// Parses the value as an integer the way a lenient `parseInt` does.
    ///
    /// Integers pass through, floats are truncated and strings are read up to
    /// the first non-digit after optional leading whitespace and sign
    /// (`"12px"` is 12). Anything else is not a number.
    pub fn parse_int(&self) -> Option<i64> {
        match self {
            v if v.is_integer() => v.to_i64(),
            v if v.is_decimal() => v
                .as_decimal()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64),
            Value::String(s) => parse_int_prefix(s),
            Value::Char(c) => parse_int_prefix(&c.to_string()),
            Value::Array(_) | Value::Collection(_) => parse_int_prefix(&self.to_join_string()),
            _ => None,
        }
    }

    /// Looks up a single key inside this value, the way `item[key]` reads.
    ///
    /// Records and maps are read by key, arrays, collections and strings by
    /// position. Every miss yields [Value::Null].
    pub fn lookup(&self, key: &Key) -> Value {
        match self {
            Value::Document(doc) => match key {
                Value::String(name) => doc.get_direct(name),
                other => doc.get_direct(&other.to_join_string()),
            },
            Value::Map(map) => map
                .get(key)
                .or_else(|| key.as_index().and_then(|i| map.get(&Value::USize(i))))
                .cloned()
                .unwrap_or_default(),
            Value::Array(items) => key
                .as_index()
                .and_then(|i| items.get(i).cloned())
                .unwrap_or_default(),
            Value::Collection(collection) => collection.get(key.clone()).unwrap_or_default(),
            Value::String(s) => key
                .as_index()
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::String(c.to_string()))
                .unwrap_or_default(),
            _ => Value::Null,
        }
    }

    /// Reads a named field, following nested paths split by the configured
    /// field separator when the name itself is not a key.
    ///
    /// ```rust
    /// use collect::doc;
    /// use collect::common::Value;
    ///
    /// let item = Value::from(doc!{ user: { name: "Ann" }, tags: ["a", "b"] });
    /// assert_eq!(item.get_field("user.name"), Value::from("Ann"));
    /// assert_eq!(item.get_field("tags.1"), Value::from("b"));
    /// assert_eq!(item.get_field("missing"), Value::Null);
    /// ```
    pub fn get_field(&self, name: &str) -> Value {
        let direct = self.lookup(&Value::from(name));
        if !direct.is_null() {
            return direct;
        }

        FIELD_SEPARATOR.read_with(|separator| {
            if name.contains(separator.as_str()) {
                self.walk(name.split(separator.as_str()))
            } else {
                Value::Null
            }
        })
    }

    pub(crate) fn walk<'a>(&self, segments: impl Iterator<Item = &'a str>) -> Value {
        let mut current = self.clone();
        for segment in segments {
            current = current.lookup(&Value::from(segment));
            if current.is_null() {
                break;
            }
        }
        current
    }

    /// Renders the value the way it appears when joined into a string.
    ///
    /// `Null` renders empty, arrays and collections are joined with `,` and
    /// records render as `[object Object]`.
    pub fn to_join_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(v) => v.to_string(),
            Value::Char(v) => v.to_string(),
            Value::String(v) => v.clone(),
            Value::Array(items) => items.iter().map(|v| v.to_join_string()).join(","),
            Value::Collection(collection) => collection
                .values_vec()
                .iter()
                .map(|v| v.to_join_string())
                .join(","),
            Value::Document(_) | Value::Map(_) => "[object Object]".to_string(),
            v => match v.as_decimal() {
                Some(f) if f.is_nan() => "NaN".to_string(),
                Some(f) if f.is_infinite() && f > 0.0 => "Infinity".to_string(),
                Some(f) if f.is_infinite() => "-Infinity".to_string(),
                Some(f) => f.to_string(),
                None => v.as_integer().map(|i| i.to_string()).unwrap_or_default(),
            },
        }
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Char(v) => quote_json(&v.to_string()),
            Value::String(v) => quote_json(v),
            Value::Document(v) => v.to_pretty_json(indent),
            Value::Collection(v) => v.to_array().to_pretty_json(indent),
            Value::Array(v) => {
                if v.is_empty() {
                    return "[]".to_string();
                }

                let mut json_str = String::new();
                json_str.push_str("[\n");
                let indent_str = " ".repeat(indent + 2);
                for value in v {
                    json_str.push_str(&format!(
                        "{}{},\n",
                        indent_str,
                        value.to_pretty_json(indent + 2)
                    ));
                }
                json_str.pop(); // remove last comma
                json_str.pop(); // remove last newline
                json_str.push_str(&format!("\n{}]", " ".repeat(indent)));
                json_str
            }
            Value::Map(v) => {
                if v.is_empty() {
                    return "{}".to_string();
                }

                let mut json_str = String::new();
                json_str.push_str("{\n");
                let indent_str = " ".repeat(indent + 2);
                for (key, value) in v {
                    json_str.push_str(&format!(
                        "{}{}: {},\n",
                        indent_str,
                        quote_json(&key.to_join_string()),
                        value.to_pretty_json(indent + 2)
                    ));
                }
                json_str.pop();
                json_str.pop();
                json_str.push_str(&format!("\n{}}}", " ".repeat(indent)));
                json_str
            }
            number => number.to_join_string(),
        }
    }

    pub(crate) fn to_debug_string(&self, indent: usize) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(v) => format!("bool({})", v),
            Value::I32(v) => format!("i32({})", v),
            Value::U32(v) => format!("u32({})", v),
            Value::I64(v) => format!("i64({})", v),
            Value::U64(v) => format!("u64({})", v),
            Value::ISize(v) => format!("isize({})", v),
            Value::USize(v) => format!("usize({})", v),
            Value::F32(v) => format!("f32({})", v),
            Value::F64(v) => format!("f64({})", v),
            Value::Char(v) => format!("char(\"{}\")", v),
            Value::String(v) => format!("string(\"{}\")", v),
            Value::Document(v) => format!("object({})", v.to_debug_string(indent)),
            Value::Collection(v) => format!("collection({})", v.to_array().to_debug_string(indent)),
            Value::Array(v) => {
                if v.is_empty() {
                    return "array([])".to_string();
                }

                let mut debug_str = String::new();
                debug_str.push_str("array([\n");
                let indent_str = " ".repeat(indent + 2);
                for value in v {
                    debug_str.push_str(&format!(
                        "{}{},\n",
                        indent_str,
                        value.to_debug_string(indent + 2)
                    ));
                }
                debug_str.pop();
                debug_str.pop();
                debug_str.push_str(&format!("\n{}])", " ".repeat(indent)));
                debug_str
            }
            Value::Map(v) => {
                if v.is_empty() {
                    return "map({})".to_string();
                }

                let mut debug_str = String::new();
                debug_str.push_str("map({\n");
                let indent_str = " ".repeat(indent + 2);
                for (key, value) in v {
                    debug_str.push_str(&format!(
                        "{}{}: {},\n",
                        indent_str,
                        key.to_debug_string(indent + 2),
                        value.to_debug_string(indent + 2)
                    ));
                }
                debug_str.pop();
                debug_str.pop();
                debug_str.push_str(&format!("\n{}}})", " ".repeat(indent)));
                debug_str
            }
        }
    }
}

/// Renders `s` as a JSON string literal.
pub(crate) fn quote_json(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Reads the leading integer of `s`. A `0x`/`0X` prefix after the sign reads
/// hexadecimal digits. Digit runs outside the `i64` range are not a number.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let end = digits
        .bytes()
        .position(|b| !(b as char).is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    #[inline]
    fn from(value: i8) -> Self {
        Value::I32(value as i32)
    }
}

impl From<u8> for Value {
    #[inline]
    fn from(value: u8) -> Self {
        Value::U32(value as u32)
    }
}

impl From<i16> for Value {
    #[inline]
    fn from(value: i16) -> Self {
        Value::I32(value as i32)
    }
}

impl From<u16> for Value {
    #[inline]
    fn from(value: u16) -> Self {
        Value::U32(value as u32)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(value: u32) -> Self {
        Value::U32(value)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<u64> for Value {
    #[inline]
    fn from(value: u64) -> Self {
        Value::U64(value)
    }
}

impl From<isize> for Value {
    #[inline]
    fn from(value: isize) -> Self {
        Value::ISize(value)
    }
}

impl From<usize> for Value {
    #[inline]
    fn from(value: usize) -> Self {
        Value::USize(value)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::F32(value)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

impl From<Collection> for Value {
    fn from(value: Collection) -> Self {
        Value::Collection(value)
    }
}

impl From<&Collection> for Value {
    fn from(value: &Collection) -> Self {
        Value::Collection(value.clone())
    }
}

impl From<IndexMap<Key, Value>> for Value {
    fn from(value: IndexMap<Key, Value>) -> Self {
        Value::Map(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        Value::from_option(value)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Vec<T>) -> Self {
        Value::from_vec(value)
    }
}

impl<T, const N: usize> From<[T; N]> for Value
where
    T: Into<Value>,
{
    fn from(value: [T; N]) -> Self {
        Value::Array(value.into_iter().map(|v| v.into()).collect())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

/// A macro to create a `Value` from a given expression.
///
/// # Examples
///
/// ```rust
/// use collect::common::Value;
/// use collect::val;
///
/// assert_eq!(val!(42), Value::I32(42));
/// assert_eq!(val!("hello"), Value::String("hello".to_string()));
/// assert_eq!(val!(true), Value::Bool(true));
/// ```
#[macro_export]
macro_rules! val {
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        use serde::Serialize;

        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::ISize(v) => serializer.serialize_i64(*v as i64),
            Value::USize(v) => serializer.serialize_u64(*v as u64),
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Char(v) => serializer.serialize_char(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Document(doc) => doc.serialize(serializer),
            Value::Array(values) => serializer.collect_seq(values),
            Value::Map(map) => {
                // object keys are always strings
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(&key.to_join_string(), value)?;
                }
                state.end()
            }
            Value::Collection(collection) => collection.to_array().serialize(serializer),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(feature = "serde")]
struct ValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a null, boolean, number, string, array or object")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: serde::Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::I64(v))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v).map(Value::I64).unwrap_or(Value::U64(v)))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::F64(v))
    }

    fn visit_char<E: serde::de::Error>(self, v: char) -> Result<Value, E> {
        Ok(Value::Char(v))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A: serde::de::SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element()? {
            values.push(value);
        }
        Ok(Value::Array(values))
    }

    fn visit_map<A: serde::de::MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut data = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            data.insert(key, value);
        }
        Ok(Value::Document(Document::from(data)))
    }
}
