use collect::collection::Collection;
use collect::common::Value;
use collect::errors::ErrorKind;
use collect::{collect, doc};
use collect_int_test::test_util::{cleanup, create_test_context, create_test_docs, run_test};

fn sample_sequences() -> Vec<Vec<Value>> {
    vec![
        vec![],
        vec![Value::from(1), Value::from(2), Value::from(3)],
        vec![Value::Null, Value::from("a"), Value::from(2.5), Value::from(false)],
        vec![Value::from(vec![1, 2]), Value::from(doc! { a: { b: 1 } })],
        create_test_docs().into_iter().map(Value::from).collect(),
    ]
}

#[test]
fn test_collect_preserves_sequence() {
    for sequence in sample_sequences() {
        let collection = collect(sequence.clone()).unwrap();
        assert_eq!(collection.length(), sequence.len());
        assert_eq!(collection.to_array(), Value::Array(sequence));
        assert!(!collection.is_keyed());
    }
}

#[test]
fn test_collect_rejects_non_array() {
    let inputs = vec![
        Value::from("not an array"),
        Value::from(42),
        Value::Null,
        Value::from(doc! { a: 1 }),
    ];

    for input in inputs {
        let err = collect(input).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TypeConstraint);
        assert!(!err.message().is_empty());
    }
}

#[test]
fn test_fixture_access() {
    run_test(
        create_test_context,
        |ctx| {
            let people = ctx.people();
            assert_eq!(people.length(), 4);
            assert!(people.is_not_empty());

            let first = people.get(0).unwrap();
            assert_eq!(first.get_field("first_name"), Value::from("fn1"));
            assert_eq!(first.get_field("address.zip"), Value::from("0155"));

            assert!(people.has(3));
            assert!(!people.has(4));
            assert_eq!(people.get(4), None);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_shared_handles_see_mutations() {
    run_test(
        create_test_context,
        |ctx| {
            let people = ctx.people();
            assert_eq!(people.push(doc! { id: 5, first_name: "fn5" }), 5);
            assert_eq!(ctx.people().length(), 5);
            assert!(people.is_shared_with(&ctx.people()));

            let copy = people.values();
            copy.push(doc! { id: 6 });
            assert_eq!(people.length(), 5);
            assert_eq!(copy.length(), 6);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_leaves_hole() {
    let items = collect(vec!["a", "b", "c"]).unwrap();
    assert!(items.delete(1));
    assert!(!items.delete(1));

    assert_eq!(items.length(), 3);
    assert!(!items.has(1));
    assert_eq!(items.get(2), Some(Value::from("c")));
    assert_eq!(items.to_array(), Value::from(vec!["a", "c"]));
    assert_eq!(items.keys().to_array(), Value::from(vec![0usize, 2]));

    let values = items.values();
    assert_eq!(values.to_array(), Value::from(vec!["a", "c"]));
    assert_eq!(values.keys().to_array(), Value::from(vec![0usize, 1]));
}

#[test]
fn test_set_pads_and_converts() {
    let items = collect(vec![1]).unwrap();
    items.set(3, 4);
    assert_eq!(items.length(), 4);
    assert!(!items.has(2));
    assert_eq!(items.to_array(), Value::from(vec![1, 4]));

    items.set("name", "x");
    assert!(items.is_keyed());
    assert_eq!(items.get(0), Some(Value::from(1)));
    assert_eq!(items.get("name"), Some(Value::from("x")));
    assert_eq!(items.to_array().as_map().map(|m| m.len()), Some(3));
}

#[test]
fn test_keyed_push_uses_next_integer_key() {
    run_test(
        create_test_context,
        |ctx| {
            let by_id = ctx.people().key_by("id");
            assert!(by_id.is_keyed());
            assert_eq!(by_id.push(doc! { id: 9 }), 5);
            assert_eq!(by_id.get(5).map(|p| p.get_field("id")), Some(Value::from(9)));
            assert_eq!(
                by_id.keys().to_array(),
                Value::from(vec![1, 2, 3, 4, 5])
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_foreach_and_when() {
    let items = collect(vec!["a", "b", "c"]).unwrap();

    let positions = items.foreach(|_, key| key.clone());
    assert_eq!(positions.to_array(), Value::from(vec![0usize, 1, 2]));

    let by_letter = items.foreach_keyed(|_, key| key.clone(), |item| item.clone());
    assert_eq!(by_letter.get("c"), Some(Value::USize(2)));

    assert_eq!(items.when(items.is_not_empty(), |c| c.length()), Some(3));
    assert_eq!(items.when("", |c| c.length()), None);
}

#[test]
fn test_equality_compares_elements() {
    let left = collect(vec![1, 2]).unwrap();
    let right = Collection::from(vec![1i64, 2]);
    assert_eq!(left, right);
    assert!(!left.is_shared_with(&right));

    right.push(3);
    assert_ne!(left, right);
    assert_eq!(Collection::new(), Collection::default());
}

#[test]
fn test_nested_collections_flatten_in_to_array() {
    let inner = collect(vec![1, 2]).unwrap();
    let outer = Collection::from(vec![Value::from(&inner), Value::from(3)]);
    assert_eq!(
        outer.to_array(),
        Value::from(vec![Value::from(vec![1, 2]), Value::from(3)])
    );
}
