use collect::collection::Collection;
use collect::common::Value;
use collect::filter::{all, and, by, field, not, or, predicate};
use collect_int_test::test_util::{cleanup, create_test_context, run_test};

fn order_ids(orders: &Collection) -> Value {
    orders.pluck("order_id").to_array()
}

#[test]
fn test_comparison_filters() {
    run_test(
        create_test_context,
        |ctx| {
            let orders = ctx.orders();
            assert_eq!(order_ids(&orders.filter_by(&field("total").gt(20))), Value::from(vec![100, 103]));
            assert_eq!(order_ids(&orders.filter_by(&field("total").gte(30))), Value::from(vec![100, 103]));
            assert_eq!(order_ids(&orders.filter_by(&field("total").lt(12))), Value::from(vec![102]));
            assert_eq!(order_ids(&orders.filter_by(&field("total").lte(12))), Value::from(vec![101, 102]));
            assert_eq!(
                order_ids(&orders.filter_by(&field("total").between(10, 30))),
                Value::from(vec![100, 101, 104])
            );
            assert_eq!(
                order_ids(&orders.filter_by(&field("status").gt("paid"))),
                Value::from(vec![103])
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_logical_filters() {
    run_test(
        create_test_context,
        |ctx| {
            let orders = ctx.orders();

            let paid_by_first = and(vec![field("status").eq("paid"), field("customer").eq(1)]);
            assert_eq!(order_ids(&orders.filter_by(&paid_by_first)), Value::from(vec![100, 102]));

            let refunded_or_small = or(vec![field("status").eq("refunded"), field("total").lt(10)]);
            assert_eq!(order_ids(&orders.filter_by(&refunded_or_small)), Value::from(vec![102, 103]));

            let not_open = not(field("status").eq("open"));
            assert_eq!(order_ids(&orders.filter_by(&not_open)), Value::from(vec![100, 102, 103]));
            assert_eq!(
                order_ids(&orders.filter_by(&field("status").eq("open").not())),
                order_ids(&orders.filter_by(&field("status").ne("open")))
            );

            let chained = field("customer").eq(1).and(field("total").gt(10)).or(field("order_id").eq(101));
            assert_eq!(order_ids(&orders.filter_by(&chained)), Value::from(vec![100, 101, 104]));

            assert_eq!(orders.filter_by(&all()), orders);
            assert_eq!(orders.filter_by(&and(vec![])).length(), 5);
            assert!(orders.filter_by(&or(vec![])).is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_array_filters() {
    run_test(
        create_test_context,
        |ctx| {
            let orders = ctx.orders();
            assert_eq!(
                order_ids(&orders.filter_by(&field("status").in_array(vec!["open", "refunded"]))),
                Value::from(vec![101, 103, 104])
            );
            assert_eq!(
                order_ids(&orders.filter_by(&field("status").not_in_array(vec!["open", "refunded"]))),
                Value::from(vec![100, 102])
            );

            let people = ctx.people();
            let ops = people.filter_by(&field("tags").elem_match(field("").eq("ops")));
            assert_eq!(ops.pluck("first_name").to_array(), Value::from(vec!["fn4"]));

            let with_d = people.filter_by(&field("tags").elem_match(field("").contains("d")));
            assert_eq!(with_d.pluck("first_name").to_array(), Value::from(vec!["fn1", "fn3"]));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_contains_and_truthy() {
    run_test(
        create_test_context,
        |ctx| {
            let orders = ctx.orders();
            assert_eq!(
                order_ids(&orders.filter_by(&field("status").contains("pa"))),
                Value::from(vec![100, 102])
            );

            let active = ctx.people().filter_by(&field("active").truthy());
            assert_eq!(active.pluck("first_name").to_array(), Value::from(vec!["fn1", "fn3"]));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_computed_fields_and_predicates() {
    run_test(
        create_test_context,
        |ctx| {
            let orders = ctx.orders();
            let with_tax = by(|o: &Value| o.get_field("total").to_i64().unwrap_or(0) * 2);
            assert_eq!(
                order_ids(&orders.filter_by(&field(with_tax).gte(60))),
                Value::from(vec![100, 103])
            );

            let odd_ids = predicate(|o: &Value| o.get_field("order_id").to_i64().is_some_and(|id| id % 2 == 1));
            assert_eq!(order_ids(&orders.filter_by(&odd_ids)), Value::from(vec![101, 103]));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_filter_display() {
    assert_eq!(field("total").gt(20).to_string(), "(total > 20)");
    assert_eq!(
        field("a").eq(1).and(field("b").lte(2)).to_string(),
        "((a == 1) && (b <= 2))"
    );
}
