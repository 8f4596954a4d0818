use collect::collection::Document;
use collect::common::Value;
use collect::doc;
use collect::errors::ErrorKind;
use collect_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_put_and_get_embedded_fields() {
    let mut doc = Document::new();
    doc.put("name", "fn1").unwrap();
    doc.put("address.city", "Oslo").unwrap();
    doc.put("address.geo.lat", 59.91).unwrap();

    assert_eq!(doc.size(), 2);
    assert_eq!(doc.get("address.city"), Value::from("Oslo"));
    assert_eq!(doc.get("address.geo.lat"), Value::from(59.91));
    assert!(doc.get("address").is_document());
    assert_eq!(doc.fields(), vec!["name", "address.city", "address.geo.lat"]);
    assert!(doc.contains_field("address.geo.lat"));
    assert!(!doc.contains_field("address.geo"));
}

#[test]
fn test_put_rejects_empty_keys() {
    let mut doc = Document::new();
    let err = doc.put("", 1).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidOperation);

    let err = doc.put("a..b", 1).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidFieldName);
    assert!(doc.is_empty());
}

#[test]
fn test_remove_prunes_empty_parents() {
    let mut doc = doc! { a: { b: { c: 1 } }, d: 2 };
    assert_eq!(doc.remove("a.b.c"), Some(Value::from(1)));
    assert!(!doc.contains_key("a"));
    assert_eq!(doc.remove("a.b.c"), None);
    assert_eq!(doc.fields(), vec!["d"]);
}

#[test]
fn test_array_segments_in_paths() {
    let doc = doc! { items: [{ sku: "x1" }, { sku: "y2" }] };
    assert_eq!(doc.get("items.1.sku"), Value::from("y2"));
    assert_eq!(doc.get("items.5.sku"), Value::Null);
    assert_eq!(Value::from(doc).get_field("items.0.sku"), Value::from("x1"));
}

#[test]
fn test_fixture_documents() {
    run_test(
        create_test_context,
        |ctx| {
            for person in ctx.people().iter().map(|(_, person)| person) {
                let doc = person.as_document().unwrap();
                assert!(doc.contains_field("address.zip"));
                assert!(doc.get("first_name").is_string());
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_document_equality_ignores_field_order() {
    let left = doc! { a: 1, b: "two" };
    let right = doc! { b: "two", a: 1 };
    assert_eq!(left, right);
    assert_eq!(Value::from(left), Value::from(right));
}
