use std::{any::Any, fmt::Display};

use crate::common::Value;

use super::{Field, FilterProvider};

/// A filter that matches every element.
///
/// Used as the neutral filter; `filter_by(&all())` keeps the present elements
/// as they are.
pub(crate) struct AllFilter;

impl FilterProvider for AllFilter {
    fn apply(&self, _item: &Value) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllFilter")
    }
}

/// Matches elements whose field equals a value.
///
/// Equality is [Value] equality: numbers compare across widths (`1 == 1.0`),
/// strings never equal numbers.
pub(crate) struct EqualsFilter {
    field: Field,
    field_value: Value,
}

impl EqualsFilter {
    #[inline]
    pub(crate) fn new(field: Field, field_value: Value) -> Self {
        EqualsFilter { field, field_value }
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.field, self.field_value)
    }
}

impl FilterProvider for EqualsFilter {
    #[inline]
    fn apply(&self, item: &Value) -> bool {
        self.field.resolve(item) == self.field_value
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches elements whose field differs from a value. Absent fields differ
/// from every value but `Null`.
pub(crate) struct NotEqualsFilter {
    field: Field,
    field_value: Value,
}

impl NotEqualsFilter {
    #[inline]
    pub(crate) fn new(field: Field, field_value: Value) -> Self {
        NotEqualsFilter { field, field_value }
    }
}

impl Display for NotEqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} != {})", self.field, self.field_value)
    }
}

impl FilterProvider for NotEqualsFilter {
    #[inline]
    fn apply(&self, item: &Value) -> bool {
        self.field.resolve(item) != self.field_value
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches elements whose field is truthy.
pub(crate) struct TruthyFilter {
    field: Field,
}

impl TruthyFilter {
    #[inline]
    pub(crate) fn new(field: Field) -> Self {
        TruthyFilter { field }
    }
}

impl Display for TruthyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "truthy({})", self.field)
    }
}

impl FilterProvider for TruthyFilter {
    #[inline]
    fn apply(&self, item: &Value) -> bool {
        self.field.resolve(item).is_truthy()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Matches elements accepted by a closure.
pub(crate) struct PredicateFilter {
    predicate: Predicate,
}

impl PredicateFilter {
    pub(crate) fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        PredicateFilter {
            predicate: Box::new(predicate),
        }
    }
}

impl Display for PredicateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PredicateFilter")
    }
}

impl FilterProvider for PredicateFilter {
    #[inline]
    fn apply(&self, item: &Value) -> bool {
        (self.predicate)(item)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
