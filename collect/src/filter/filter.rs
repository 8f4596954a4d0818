use std::any::Any;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use crate::common::Value;

use super::{AllFilter, AndFilter, NotFilter, OrFilter, PredicateFilter};

/// Provides the matching logic behind a [Filter].
///
/// Implementations decide whether a single collection element matches. They
/// must be thread-safe since filters are shared behind an [Arc].
pub trait FilterProvider: Any + Send + Sync + Display {
    /// Applies the filter to an element and returns whether it matches.
    fn apply(&self, item: &Value) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// A predicate for selecting elements of a collection.
///
/// `Filter` wraps a [FilterProvider] and composes with other filters:
/// - `and(other)` matches when both match
/// - `or(other)` matches when either matches
/// - `not()` negates the filter
///
/// # Examples
///
/// ```rust
/// use collect::{collect, doc};
/// use collect::filter::field;
///
/// let people = collect(vec![doc!{ age: 20 }, doc!{ age: 35 }, doc!{ age: 50 }]).unwrap();
/// let filter = field("age").gte(30).and(field("age").lt(50));
/// assert_eq!(people.filter_by(&filter).length(), 1);
/// ```
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    /// Creates a new filter from a filter provider implementation.
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter {
            inner: Arc::new(inner),
        }
    }

    /// Combines this filter with another using logical AND.
    pub fn and(&self, filter: Filter) -> Self {
        Filter::new(AndFilter::new(vec![self.clone(), filter]))
    }

    /// Combines this filter with another using logical OR.
    pub fn or(&self, filter: Filter) -> Self {
        Filter::new(OrFilter::new(vec![self.clone(), filter]))
    }

    /// Negates this filter using logical NOT.
    pub fn not(&self) -> Self {
        Filter::new(NotFilter::new(self.clone()))
    }
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Creates a filter that matches every element.
pub fn all() -> Filter {
    Filter::new(AllFilter {})
}

/// Creates a filter that matches when every filter matches.
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

/// Creates a filter that matches when any filter matches.
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::new(OrFilter::new(filters))
}

/// Creates a filter that negates `filter`.
pub fn not(filter: Filter) -> Filter {
    Filter::new(NotFilter::new(filter))
}

/// Creates a filter from a closure over the whole element.
///
/// ```rust
/// use collect::common::Value;
/// use collect::filter::predicate;
///
/// let even = predicate(|item: &Value| item.parse_int().is_some_and(|n| n % 2 == 0));
/// assert!(even.apply(&Value::from(4)));
/// assert!(!even.apply(&Value::from(5)));
/// ```
pub fn predicate<F>(func: F) -> Filter
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Filter::new(PredicateFilter::new(func))
}

pub(crate) fn is_all_filter(filter: &Filter) -> bool {
    filter.as_any().is::<AllFilter>()
}
