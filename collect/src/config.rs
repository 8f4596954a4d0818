use crate::common::{ReadExecutor, WriteExecutor};
use crate::errors::{CollectError, CollectResult, ErrorKind};
use crate::{FIELD_SEPARATOR, IMPLODE_SEPARATOR};

/// Separator between the segments of a nested field path.
pub const DEFAULT_FIELD_SEPARATOR: &str = ".";

/// Separator `implode` joins with when none is given.
pub const DEFAULT_IMPLODE_SEPARATOR: &str = ",";

/// Process-wide configuration of the collection helpers.
///
/// The settings are global: every collection, document and field path in the
/// process observes a change immediately.
///
/// # Examples
///
/// ```rust
/// use collect::config::CollectConfig;
/// use collect::{collect, doc};
/// use collect::common::Value;
///
/// # fn main() -> collect::errors::CollectResult<()> {
/// let config = CollectConfig::new();
/// config.set_field_separator(":")?;
/// config.set_implode_separator(" | ")?;
///
/// let items = collect(vec![doc!{ a: { b: 1 } }, doc!{ a: { b: 2 } }])?;
/// assert_eq!(items.pluck("a:b").to_array(), Value::from(vec![1, 2]));
/// assert_eq!(items.implode("a:b"), "1 | 2");
///
/// config.reset();
/// assert_eq!(config.field_separator(), ".");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CollectConfig;

impl CollectConfig {
    pub fn new() -> Self {
        CollectConfig
    }

    /// Returns the current field separator for nested field access.
    pub fn field_separator(&self) -> String {
        FIELD_SEPARATOR.read_with(|it| it.clone())
    }

    /// Sets the field separator for nested field access.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidOperation] if the separator is empty.
    pub fn set_field_separator(&self, separator: &str) -> CollectResult<()> {
        if separator.is_empty() {
            log::error!("Field separator cannot be empty");
            return Err(CollectError::new(
                "Field separator cannot be empty",
                ErrorKind::InvalidOperation,
            ));
        }

        log::debug!("Field separator set to {:?}", separator);
        FIELD_SEPARATOR.write_with(|it| *it = separator.to_string());
        Ok(())
    }

    /// Returns the separator `implode` uses by default.
    pub fn implode_separator(&self) -> String {
        IMPLODE_SEPARATOR.read_with(|it| it.clone())
    }

    /// Sets the separator `implode` uses by default. An empty separator joins
    /// the values without anything in between.
    pub fn set_implode_separator(&self, separator: &str) -> CollectResult<()> {
        log::debug!("Implode separator set to {:?}", separator);
        IMPLODE_SEPARATOR.write_with(|it| *it = separator.to_string());
        Ok(())
    }

    /// Restores both separators to their defaults.
    pub fn reset(&self) {
        FIELD_SEPARATOR.write_with(|it| *it = DEFAULT_FIELD_SEPARATOR.to_string());
        IMPLODE_SEPARATOR.write_with(|it| *it = DEFAULT_IMPLODE_SEPARATOR.to_string());
    }
}
