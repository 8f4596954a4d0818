use collect::collection::Collection;
use collect::common::Value;
use collect::collect;
use collect_int_test::test_util::{cleanup, create_test_context, run_test, sum};

fn first_names(collection: &Collection) -> Value {
    collection.pluck("first_name").to_array()
}

#[test]
fn test_filter_is_idempotent() {
    run_test(
        create_test_context,
        |ctx| {
            let active = |p: &Value| p.get_field("active").is_truthy();
            let once = ctx.people().filter(active);
            let twice = once.filter(active);

            assert_eq!(once.to_array(), twice.to_array());
            assert_eq!(first_names(&once), Value::from(vec!["fn1", "fn3"]));
            assert_eq!(once.keys().to_array(), Value::from(vec![0usize, 1]));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_filter_truthy() {
    let items = collect(vec![
        Value::from(0),
        Value::from(""),
        Value::Null,
        Value::from("a"),
        Value::from(false),
        Value::from(1),
        Value::from(f64::NAN),
    ])
    .unwrap();
    assert_eq!(
        items.filter_truthy().to_array(),
        Value::from(vec![Value::from("a"), Value::from(1)])
    );
}

#[test]
fn test_where_eq() {
    run_test(
        create_test_context,
        |ctx| {
            let people = ctx.people();
            assert_eq!(first_names(&people.where_eq("city", "Oslo")), Value::from(vec!["fn1", "fn3"]));
            assert_eq!(first_names(&people.where_eq("address.zip", "00184")), Value::from(vec!["fn2"]));
            assert_eq!(first_names(&people.where_eq("id", 4.0)), Value::from(vec!["fn4"]));
            assert!(people.where_eq("age", 17).is_empty());
            assert!(people.where_eq("nickname", "x").is_empty());

            let paid = ctx.orders().where_eq("status", "paid");
            assert_eq!(sum(&paid.pluck("total"))?, 37);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_where_in_and_between() {
    run_test(
        create_test_context,
        |ctx| {
            let people = ctx.people();
            let result = people.where_in("last_name", vec!["ln2", "ln4"]);
            assert_eq!(first_names(&result), Value::from(vec!["fn2", "fn3", "fn4"]));
            assert!(people.where_in("last_name", Vec::<&str>::new()).is_empty());

            // "25 years" parses as 25
            let result = people.where_between("age", 18, 30);
            assert_eq!(first_names(&result), Value::from(vec!["fn3", "fn4"]));

            let result = people.where_between("age", "10", "20");
            assert_eq!(first_names(&result), Value::from(vec!["fn2"]));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_where_fn_and_search() {
    run_test(
        create_test_context,
        |ctx| {
            let people = ctx.people();
            let tagged = people.where_fn(|p| {
                p.get_field("tags").as_array().map(|tags| tags.len()).unwrap_or(0)
            });
            assert_eq!(first_names(&tagged), Value::from(vec!["fn1", "fn3", "fn4"]));

            assert_eq!(people.search("first_name", "fn").length(), 4);
            assert_eq!(first_names(&people.search("tags", "dev")), Value::from(vec!["fn1", "fn3"]));
            assert_eq!(first_names(&people.search("address.street", "gate")), Value::from(vec!["fn3"]));
            assert!(people.search("tags", "de").is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_queries_skip_holes() {
    run_test(
        create_test_context,
        |ctx| {
            let people = ctx.people();
            people.delete(0);
            assert_eq!(first_names(&people.where_eq("city", "Oslo")), Value::from(vec!["fn3"]));
            assert_eq!(people.filter(|_| true).length(), 3);
            Ok(())
        },
        cleanup,
    )
}
