use crate::collection::Collection;
use crate::common::Value;
use crate::filter::{field, is_all_filter, Field, Filter};

impl Collection {
    /// Keeps the elements accepted by `predicate`, re-sequenced `0..n-1`.
    pub fn filter<F>(&self, mut predicate: F) -> Collection
    where
        F: FnMut(&Value) -> bool,
    {
        let values = self
            .values_vec()
            .into_iter()
            .filter(|item| predicate(item))
            .collect();
        Collection::from_values(values)
    }

    /// Keeps the truthy elements.
    ///
    /// ```rust
    /// use collect::collect;
    /// use collect::common::Value;
    ///
    /// let items = collect(vec![Value::from(0), Value::from("a"), Value::Null, Value::from(2)]).unwrap();
    /// assert_eq!(items.filter_truthy().to_array(), Value::from(vec![Value::from("a"), Value::from(2)]));
    /// ```
    pub fn filter_truthy(&self) -> Collection {
        self.filter(|item| item.is_truthy())
    }

    /// Keeps the elements matching a composable [Filter].
    pub fn filter_by(&self, filter: &Filter) -> Collection {
        if is_all_filter(filter) {
            return self.values();
        }
        self.filter(|item| filter.apply(item))
    }

    /// Keeps the elements whose `field` equals `value`.
    pub fn where_eq(&self, field_name: impl Into<Field>, value: impl Into<Value>) -> Collection {
        self.filter_by(&field(field_name).eq(value))
    }

    /// Keeps the elements for which `func` returns a truthy value.
    pub fn where_fn<F, R>(&self, mut func: F) -> Collection
    where
        F: FnMut(&Value) -> R,
        R: Into<Value>,
    {
        self.filter(|item| func(item).into().is_truthy())
    }

    /// Keeps the elements whose `field` equals one of `values`.
    pub fn where_in<T: Into<Value>>(&self, field_name: impl Into<Field>, values: Vec<T>) -> Collection {
        self.filter_by(&field(field_name).in_array(values))
    }

    /// Keeps the elements whose `field`, parsed as an integer, lies within
    /// `[lower_bound, upper_bound]`.
    ///
    /// ```rust
    /// use collect::{collect, doc};
    ///
    /// let items = collect(vec![doc!{ v: "5kg" }, doc!{ v: 12 }, doc!{ v: "x" }]).unwrap();
    /// assert_eq!(items.where_between("v", 1, 10).length(), 1);
    /// ```
    pub fn where_between<T: Into<Value>>(
        &self,
        field_name: impl Into<Field>,
        lower_bound: T,
        upper_bound: T,
    ) -> Collection {
        self.filter_by(&field(field_name).between(lower_bound, upper_bound))
    }

    /// Keeps the elements whose `field` contains `value`: a substring for
    /// string fields, an element for array fields.
    pub fn search(&self, field_name: impl Into<Field>, value: impl Into<Value>) -> Collection {
        self.filter_by(&field(field_name).contains(value))
    }
}
