use collect::common::Value;
use collect::filter::{field, Filter, FilterProvider};
use collect_int_test::test_util::{cleanup, create_test_context, run_test};
use std::any::Any;
use std::fmt::Display;

/// Matches records whose zip code starts with a prefix.
struct ZipPrefixFilter {
    prefix: String,
}

impl Display for ZipPrefixFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(address.zip startsWith {})", self.prefix)
    }
}

impl FilterProvider for ZipPrefixFilter {
    fn apply(&self, item: &Value) -> bool {
        item.get_field("address.zip")
            .as_string()
            .is_some_and(|zip| zip.starts_with(&self.prefix))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn zip_prefix(prefix: &str) -> Filter {
    Filter::new(ZipPrefixFilter {
        prefix: prefix.to_string(),
    })
}

#[test]
fn test_custom_filter() {
    run_test(
        create_test_context,
        |ctx| {
            let people = ctx.people();
            let oslo = people.filter_by(&zip_prefix("015"));
            assert_eq!(oslo.pluck("first_name").to_array(), Value::from(vec!["fn1", "fn3"]));
            assert!(people.filter_by(&zip_prefix("99")).is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_custom_filter_composes() {
    run_test(
        create_test_context,
        |ctx| {
            let people = ctx.people();
            let filter = zip_prefix("015").and(field("active").truthy().not());
            assert!(people.filter_by(&filter).is_empty());

            let filter = zip_prefix("015").not().or(field("id").eq(3));
            assert_eq!(
                people.filter_by(&filter).pluck("id").to_array(),
                Value::from(vec![2, 3, 4])
            );
            assert_eq!(zip_prefix("0").to_string(), "(address.zip startsWith 0)");
            Ok(())
        },
        cleanup,
    )
}
