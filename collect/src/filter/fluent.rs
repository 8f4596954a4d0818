use crate::common::Value;

use super::{
    BetweenFilter, ComparisonFilter, ComparisonMode, ContainsFilter, ElementMatchFilter,
    EqualsFilter, Field, Filter, InFilter, NotEqualsFilter, NotInFilter, TruthyFilter,
};

/// Creates a fluent filter builder for the specified field.
///
/// The field may be a name (nested paths allowed), `""` for the element
/// itself, a position, or a [super::by] closure.
///
/// ```rust
/// use collect::doc;
/// use collect::common::Value;
/// use collect::filter::field;
///
/// let item = Value::from(doc!{ user: { name: "Ann" }, age: 41 });
/// assert!(field("user.name").eq("Ann").apply(&item));
/// assert!(field("age").between(40, 50).apply(&item));
/// ```
pub fn field(field: impl Into<Field>) -> FluentFilter {
    FluentFilter {
        field: field.into(),
    }
}

/// A fluent builder for constructing filters on a specific field.
///
/// Each method consumes the builder and returns a [Filter] that can be passed
/// to `filter_by` or combined with other filters.
pub struct FluentFilter {
    field: Field,
}

impl FluentFilter {
    /// Matches when the field equals `value`.
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(EqualsFilter::new(self.field, value.into()))
    }

    /// Matches when the field differs from `value`.
    #[inline]
    pub fn ne<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(NotEqualsFilter::new(self.field, value.into()))
    }

    /// Matches when the field is greater than `value`.
    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparisonFilter::new(
            self.field,
            value.into(),
            ComparisonMode::Greater,
        ))
    }

    /// Matches when the field is greater than or equal to `value`.
    #[inline]
    pub fn gte<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparisonFilter::new(
            self.field,
            value.into(),
            ComparisonMode::GreaterEqual,
        ))
    }

    /// Matches when the field is less than `value`.
    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparisonFilter::new(
            self.field,
            value.into(),
            ComparisonMode::Lesser,
        ))
    }

    /// Matches when the field is less than or equal to `value`.
    #[inline]
    pub fn lte<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparisonFilter::new(
            self.field,
            value.into(),
            ComparisonMode::LesserEqual,
        ))
    }

    /// Matches when the field, parsed as an integer, lies within
    /// `[lower_bound, upper_bound]`.
    #[inline]
    pub fn between<T: Into<Value>>(self, lower_bound: T, upper_bound: T) -> Filter {
        Filter::new(BetweenFilter::new(
            self.field,
            lower_bound.into(),
            upper_bound.into(),
        ))
    }

    /// Matches when the field contains `value`: a substring of a string field
    /// or an element of an array field.
    #[inline]
    pub fn contains<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ContainsFilter::new(self.field, value.into()))
    }

    /// Matches when the field equals one of `values`.
    #[inline]
    pub fn in_array<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        Filter::new(InFilter::new(
            self.field,
            values.into_iter().map(|v| v.into()).collect(),
        ))
    }

    /// Matches when the field equals none of `values`.
    #[inline]
    pub fn not_in_array<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        Filter::new(NotInFilter::new(
            self.field,
            values.into_iter().map(|v| v.into()).collect(),
        ))
    }

    /// Matches when some element of the array field is accepted by `filter`.
    #[inline]
    pub fn elem_match(self, filter: Filter) -> Filter {
        Filter::new(ElementMatchFilter::new(self.field, filter))
    }

    /// Matches when the field is truthy.
    #[inline]
    pub fn truthy(self) -> Filter {
        Filter::new(TruthyFilter::new(self.field))
    }
}
