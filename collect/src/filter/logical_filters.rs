use std::{any::Any, fmt::Display};

use itertools::Itertools;

use crate::common::Value;

use super::{Filter, FilterProvider};

/// Matches elements that satisfy every wrapped filter.
///
/// Evaluation short-circuits on the first filter that fails, in the order the
/// filters were given. An empty conjunction matches everything.
pub(crate) struct AndFilter {
    filters: Vec<Filter>,
}

impl AndFilter {
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        AndFilter { filters }
    }
}

impl Display for AndFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.filters.iter().join(" && "))
    }
}

impl FilterProvider for AndFilter {
    #[inline]
    fn apply(&self, item: &Value) -> bool {
        self.filters.iter().all(|filter| filter.apply(item))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches elements that satisfy at least one wrapped filter.
///
/// An empty disjunction matches nothing.
pub(crate) struct OrFilter {
    filters: Vec<Filter>,
}

impl OrFilter {
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        OrFilter { filters }
    }
}

impl Display for OrFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.filters.iter().join(" || "))
    }
}

impl FilterProvider for OrFilter {
    #[inline]
    fn apply(&self, item: &Value) -> bool {
        self.filters.iter().any(|filter| filter.apply(item))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Negates the wrapped filter.
pub(crate) struct NotFilter {
    filter: Filter,
}

impl NotFilter {
    pub(crate) fn new(filter: Filter) -> Self {
        NotFilter { filter }
    }
}

impl Display for NotFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "!({})", self.filter)
    }
}

impl FilterProvider for NotFilter {
    #[inline]
    fn apply(&self, item: &Value) -> bool {
        !self.filter.apply(item)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
