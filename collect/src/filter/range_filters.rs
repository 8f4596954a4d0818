use std::{any::Any, cmp::Ordering, fmt::Display};

use itertools::Itertools;

use crate::common::Value;

use super::{Field, FilterProvider};

/// Reads a range bound as a number. Numeric strings count as numbers.
fn bound_number(bound: &Value) -> Option<f64> {
    match bound {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => other.as_number(),
    }
}

/// Orders two values when they are comparable: numbers with numbers, text
/// with text. Everything else, and NaN, is unordered.
pub(crate) fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Char(x), Value::Char(y)) => Some(x.cmp(y)),
        (x, y) if x.is_number() && y.is_number() => match (x.as_integer(), y.as_integer()) {
            (Some(i), Some(j)) => Some(i.cmp(&j)),
            _ => x.as_number()?.partial_cmp(&y.as_number()?),
        },
        _ => None,
    }
}

/// Matches elements whose field, parsed as an integer, lies within
/// `[lower_bound, upper_bound]`.
///
/// The field is parsed leniently (`"12px"` reads as 12, `3.9` as 3). Fields
/// that do not parse never match.
pub(crate) struct BetweenFilter {
    field: Field,
    lower_bound: Value,
    upper_bound: Value,
}

impl BetweenFilter {
    pub(crate) fn new(field: Field, lower_bound: Value, upper_bound: Value) -> Self {
        BetweenFilter {
            field,
            lower_bound,
            upper_bound,
        }
    }
}

impl Display for BetweenFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} between [{}, {}])",
            self.field, self.lower_bound, self.upper_bound
        )
    }
}

impl FilterProvider for BetweenFilter {
    fn apply(&self, item: &Value) -> bool {
        let Some(parsed) = self.field.resolve(item).parse_int() else {
            return false;
        };

        let parsed = parsed as f64;
        match (
            bound_number(&self.lower_bound),
            bound_number(&self.upper_bound),
        ) {
            (Some(lower), Some(upper)) => parsed >= lower && parsed <= upper,
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Comparison modes for [ComparisonFilter].
pub(crate) enum ComparisonMode {
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

impl Display for ComparisonMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonMode::Greater => write!(f, ">"),
            ComparisonMode::GreaterEqual => write!(f, ">="),
            ComparisonMode::Lesser => write!(f, "<"),
            ComparisonMode::LesserEqual => write!(f, "<="),
        }
    }
}

/// Matches elements whose field orders against a value in the given mode.
/// Incomparable values never match.
pub(crate) struct ComparisonFilter {
    field: Field,
    field_value: Value,
    comparison_mode: ComparisonMode,
}

impl ComparisonFilter {
    #[inline]
    pub(crate) fn new(field: Field, field_value: Value, comparison_mode: ComparisonMode) -> Self {
        ComparisonFilter {
            field,
            field_value,
            comparison_mode,
        }
    }
}

impl Display for ComparisonFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} {} {})",
            self.field, self.comparison_mode, self.field_value
        )
    }
}

impl FilterProvider for ComparisonFilter {
    fn apply(&self, item: &Value) -> bool {
        let value = self.field.resolve(item);
        match compare_values(&value, &self.field_value) {
            Some(ordering) => match self.comparison_mode {
                ComparisonMode::Greater => ordering == Ordering::Greater,
                ComparisonMode::GreaterEqual => ordering != Ordering::Less,
                ComparisonMode::Lesser => ordering == Ordering::Less,
                ComparisonMode::LesserEqual => ordering != Ordering::Greater,
            },
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches elements whose field equals one of the given values.
pub(crate) struct InFilter {
    field: Field,
    field_values: Vec<Value>,
}

impl InFilter {
    pub(crate) fn new(field: Field, field_values: Vec<Value>) -> Self {
        InFilter {
            field,
            field_values,
        }
    }
}

impl Display for InFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} in [{}])",
            self.field,
            self.field_values.iter().join(", ")
        )
    }
}

impl FilterProvider for InFilter {
    fn apply(&self, item: &Value) -> bool {
        let value = self.field.resolve(item);
        self.field_values.contains(&value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches elements whose field equals none of the given values.
pub(crate) struct NotInFilter {
    field: Field,
    field_values: Vec<Value>,
}

impl NotInFilter {
    pub(crate) fn new(field: Field, field_values: Vec<Value>) -> Self {
        NotInFilter {
            field,
            field_values,
        }
    }
}

impl Display for NotInFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} not in [{}])",
            self.field,
            self.field_values.iter().join(", ")
        )
    }
}

impl FilterProvider for NotInFilter {
    fn apply(&self, item: &Value) -> bool {
        let value = self.field.resolve(item);
        !self.field_values.contains(&value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
