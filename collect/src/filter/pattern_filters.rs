use std::{any::Any, fmt::Display};

use crate::common::Value;

use super::{Field, Filter, FilterProvider};

/// Matches elements whose field contains a value.
///
/// - string fields match when the value's text is a substring
/// - array and collection fields match when one of their elements equals the value
/// - anything else never matches
pub(crate) struct ContainsFilter {
    field: Field,
    field_value: Value,
}

impl ContainsFilter {
    #[inline]
    pub(crate) fn new(field: Field, field_value: Value) -> Self {
        ContainsFilter { field, field_value }
    }
}

impl Display for ContainsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} contains {})", self.field, self.field_value)
    }
}

impl FilterProvider for ContainsFilter {
    fn apply(&self, item: &Value) -> bool {
        match self.field.resolve(item) {
            Value::String(text) => text.contains(self.field_value.to_join_string().as_str()),
            Value::Array(values) => values.contains(&self.field_value),
            Value::Collection(collection) => collection.values_vec().contains(&self.field_value),
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches elements whose array field holds at least one element accepted by
/// the inner filter. The inner filter sees each array element as the item.
pub(crate) struct ElementMatchFilter {
    field: Field,
    filter: Filter,
}

impl ElementMatchFilter {
    #[inline]
    pub(crate) fn new(field: Field, filter: Filter) -> Self {
        ElementMatchFilter { field, filter }
    }
}

impl Display for ElementMatchFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} elemMatch {})", self.field, self.filter)
    }
}

impl FilterProvider for ElementMatchFilter {
    fn apply(&self, item: &Value) -> bool {
        match self.field.resolve(item) {
            Value::Array(values) => values.iter().any(|v| self.filter.apply(v)),
            Value::Collection(collection) => {
                collection.values_vec().iter().any(|v| self.filter.apply(v))
            }
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
