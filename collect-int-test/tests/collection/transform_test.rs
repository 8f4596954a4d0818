use collect::collection::Collection;
use collect::common::Value;
use collect::errors::ErrorKind;
use collect::filter::by;
use collect::{collect, doc};
use collect_int_test::test_util::{cleanup, create_test_context, is_sorted, run_test, sum};

fn one_to(n: i32) -> Collection {
    collect((1..=n).collect::<Vec<_>>()).unwrap()
}

#[test]
fn test_chunk_example() {
    let chunks = one_to(5).chunk(2);
    assert_eq!(
        chunks.to_array(),
        Value::from(vec![
            Value::from(vec![1, 2]),
            Value::from(vec![3, 4]),
            Value::from(vec![5]),
        ])
    );
    assert!(chunks.get(0).unwrap().is_collection());
}

#[test]
fn test_chunk_reassembles_sequence() {
    for size in 1..=7 {
        let source = one_to(6);
        let chunks = source.chunk(size).to_array();
        let chunks = chunks.as_array().unwrap();
        assert_eq!(chunks.len(), 6usize.div_ceil(size));

        let (last, rest) = chunks.split_last().unwrap();
        for chunk in rest {
            assert_eq!(chunk.as_array().unwrap().len(), size);
        }
        assert!(last.as_array().unwrap().len() <= size);

        let rejoined: Vec<Value> = chunks
            .iter()
            .flat_map(|chunk| chunk.as_array().unwrap().clone())
            .collect();
        assert_eq!(Value::Array(rejoined), source.to_array());
    }

    assert!(one_to(3).chunk(0).is_empty());
    assert!(Collection::new().chunk(2).is_empty());
}

#[test]
fn test_group_by_example() {
    let items = collect(vec![doc! { a: 1 }, doc! { a: 2 }, doc! { a: 1 }]).unwrap();
    let groups = items.group_by("a");

    assert!(groups.is_keyed());
    assert_eq!(groups.keys().to_array(), Value::from(vec![1, 2]));
    assert_eq!(
        groups.get(1),
        Some(Value::from(vec![doc! { a: 1 }, doc! { a: 1 }]))
    );
    assert_eq!(groups.get(2), Some(Value::from(vec![doc! { a: 2 }])));
}

#[test]
fn test_group_orders_by_customer() {
    run_test(
        create_test_context,
        |ctx| {
            let orders = ctx.orders();
            let by_customer = orders.group_by("customer");
            assert_eq!(by_customer.keys().to_array(), Value::from(vec![1, 2, 3]));

            let first = Collection::init(by_customer.get(1).unwrap_or_default())?;
            assert_eq!(first.pluck("order_id").to_array(), Value::from(vec![100, 102, 104]));
            assert_eq!(sum(&first.pluck("total"))?, 56);

            let sequenced = orders.group_by_with("customer", false);
            assert!(!sequenced.is_keyed());
            assert_eq!(sequenced.keys().to_array(), Value::from(vec![0usize, 1, 2]));

            let by_size = orders.group_by(by(|o: &Value| {
                if o.get_field("total").to_i64().unwrap_or(0) >= 20 { "large" } else { "small" }
            }));
            assert_eq!(by_size.keys().to_array(), Value::from(vec!["large", "small"]));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_key_by_and_pluck_keyed() {
    run_test(
        create_test_context,
        |ctx| {
            let people = ctx.people().key_by("id");
            assert_eq!(people.get(3).map(|p| p.get_field("first_name")), Some(Value::from("fn3")));
            assert_eq!(people.get("3"), people.get(3));

            // later entries overwrite earlier ones in place
            let last_order = ctx.orders().key_by("customer");
            assert_eq!(last_order.length(), 3);
            assert_eq!(last_order.keys().to_array(), Value::from(vec![1, 2, 3]));
            assert_eq!(last_order.get(1).map(|o| o.get_field("order_id")), Some(Value::from(104)));

            let names = ctx.people().pluck_keyed("first_name", "id");
            assert_eq!(names.get(2), Some(Value::from("fn2")));
            assert_eq!(names.values().to_array(), ctx.people().pluck("first_name").to_array());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_pluck_missing_field() {
    run_test(
        create_test_context,
        |ctx| {
            let active = ctx.people().pluck("active");
            assert_eq!(
                active.to_array(),
                Value::from(vec![Value::from(true), Value::from(false), Value::from(true), Value::Null])
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_flip_and_combine() {
    let flipped = collect(vec!["a", "b", "a"]).unwrap().flip();
    assert_eq!(flipped.len(), 2);
    assert_eq!(flipped.get(&Value::from("a")), Some(&Value::USize(2)));

    let combined = collect(vec!["x", "y", "z"]).unwrap().combine(vec![1, 2]);
    let combined = Collection::keyed(combined);
    assert_eq!(combined.get("y"), Some(Value::from(2)));
    assert_eq!(combined.get("z"), Some(Value::Null));
    assert_eq!(combined.keys().to_array(), Value::from(vec!["x", "y", "z"]));
}

#[test]
fn test_slice_and_concat() {
    let items = one_to(5);
    assert_eq!(items.slice(1, Some(3)).to_array(), Value::from(vec![2, 3]));
    assert_eq!(items.slice(-2, None).to_array(), Value::from(vec![4, 5]));
    assert_eq!(items.slice(0, Some(-4)).to_array(), Value::from(vec![1]));
    assert!(items.slice(3, Some(1)).is_empty());
    assert!(items.slice(9, None).is_empty());

    let joined = items.slice(0, Some(2)).concat(vec![8, 9]);
    assert_eq!(joined.to_array(), Value::from(vec![1, 2, 8, 9]));
    assert_eq!(joined.concat(10).length(), 5);
    assert_eq!(joined.concat(one_to(2)).to_array(), Value::from(vec![1, 2, 8, 9, 1, 2]));
    assert_eq!(joined.length(), 4);
}

#[test]
fn test_reduce() {
    run_test(
        create_test_context,
        |ctx| {
            assert_eq!(sum(&ctx.orders().pluck("total"))?, 123);

            let err = Collection::new().reduce(|acc, _| acc).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::EmptySequence);

            let single = collect(vec!["only"]).unwrap().reduce(|_, item| item)?;
            assert_eq!(single, Value::from("only"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_implode() {
    run_test(
        create_test_context,
        |ctx| {
            assert_eq!(one_to(3).implode_with("", "-"), "1-2-3");
            assert_eq!(ctx.people().implode("first_name"), "fn1,fn2,fn3,fn4");
            assert_eq!(ctx.people().implode("missing"), ",,,");
            assert_eq!(ctx.people().implode_with("tags", "|"), "admin,dev||dev|ops");
            assert_eq!(Collection::new().implode(""), "");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_chained_pipeline() {
    run_test(
        create_test_context,
        |ctx| {
            let selected = ctx.orders().where_in("status", vec!["open", "paid"]);
            let ids: Vec<i64> = selected
                .pluck("order_id")
                .iter()
                .filter_map(|(_, v)| v.to_i64())
                .collect();
            // source order is kept, not the order of the accepted statuses
            assert_eq!(ids, vec![100, 101, 102, 104]);
            assert!(is_sorted(ids.iter(), true));

            let totals = selected.pluck("total");
            assert_eq!(totals.to_array(), Value::from(vec![30, 12, 7, 19]));
            assert!(!is_sorted(totals.iter().filter_map(|(_, v)| v.to_i64()), true));
            assert_eq!(sum(&totals)?, 68);
            Ok(())
        },
        cleanup,
    )
}
