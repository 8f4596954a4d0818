use crate::common::{Key, Value};
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

type FieldFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Selects a part of a collection element.
///
/// Operations that take a field (`pluck`, `key_by`, `group_by`, `where_eq`,
/// `implode` and the fluent filters) accept anything convertible into a
/// `Field`:
///
/// - `""` selects the element itself ([Field::Identity])
/// - any other string reads a named field, following nested paths split by the
///   configured field separator ([Field::Name])
/// - an integer reads a position ([Field::Index])
/// - [by] wraps a closure ([Field::Func])
///
/// # Examples
///
/// ```rust
/// use collect::doc;
/// use collect::common::Value;
/// use collect::filter::{by, Field};
///
/// let item = Value::from(doc!{ name: "Ann", age: 41 });
/// assert_eq!(Field::from("name").resolve(&item), Value::from("Ann"));
///
/// let decade = by(|item: &Value| item.get_field("age").parse_int().map(|age| age / 10));
/// assert_eq!(decade.resolve(&item), Value::from(4i64));
/// ```
#[derive(Clone, Default)]
pub enum Field {
    /// The element itself.
    #[default]
    Identity,
    /// A named field or a nested path.
    Name(String),
    /// A key or position.
    Index(Key),
    /// A computed value.
    Func(FieldFn),
}

impl Field {
    /// Reads this field from `item`, yielding [Value::Null] when absent.
    #[inline]
    pub fn resolve(&self, item: &Value) -> Value {
        match self {
            Field::Identity => item.clone(),
            Field::Name(name) => item.get_field(name),
            Field::Index(key) => item.lookup(key),
            Field::Func(func) => func(item),
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        matches!(self, Field::Identity)
    }
}

/// Creates a [Field] computed by a closure.
pub fn by<F, R>(func: F) -> Field
where
    F: Fn(&Value) -> R + Send + Sync + 'static,
    R: Into<Value>,
{
    Field::Func(Arc::new(move |item| func(item).into()))
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        if name.is_empty() {
            Field::Identity
        } else {
            Field::Name(name.to_string())
        }
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        if name.is_empty() {
            Field::Identity
        } else {
            Field::Name(name)
        }
    }
}

impl From<&String> for Field {
    fn from(name: &String) -> Self {
        Field::from(name.as_str())
    }
}

impl From<usize> for Field {
    fn from(index: usize) -> Self {
        Field::Index(Value::USize(index))
    }
}

impl From<i32> for Field {
    fn from(index: i32) -> Self {
        Field::Index(Value::I32(index))
    }
}

impl From<i64> for Field {
    fn from(index: i64) -> Self {
        Field::Index(Value::I64(index))
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Identity => write!(f, "$"),
            Field::Name(name) => write!(f, "{}", name),
            Field::Index(key) => write!(f, "[{}]", key.to_join_string()),
            Field::Func(_) => write!(f, "<fn>"),
        }
    }
}

impl Debug for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Identity => write!(f, "Identity"),
            Field::Name(name) => write!(f, "Name({:?})", name),
            Field::Index(key) => write!(f, "Index({:?})", key),
            Field::Func(_) => write!(f, "Func(..)"),
        }
    }
}
