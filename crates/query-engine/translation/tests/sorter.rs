mod common;

use common::{invalid, Calls, Fixture};
use query_engine_metadata::metadata::{Fields, OrderDirection, Schema, SortField, SortSchema};
use query_engine_translation::translation::adapter::SortSpec;
use query_engine_translation::translation::orchestrators::Sorter;
use serde_json::json;

fn sort_schema(sort: SortSchema) -> Schema {
    Schema {
        sort,
        ..Schema::default()
    }
}

fn spec(field: &str, order: OrderDirection) -> SortSpec {
    SortSpec {
        field: field.to_string(),
        order,
    }
}

#[test]
fn returns_the_query_key() {
    let fixture = Fixture::new(json!({}));
    let mut querier = fixture.querier();
    assert_eq!(Sorter::new(&mut querier).query_key(), "sort");
}

#[test]
fn parse_flat_keeps_request_order() {
    let fixture = Fixture::new(json!({ "sort": "-created_at,name" }));
    let mut querier = fixture.querier();
    let sorter = Sorter::new(&mut querier);

    assert_eq!(
        sorter.parse_flat(true).into_iter().collect::<Vec<_>>(),
        vec![
            ("sort:created_at".to_string(), json!("desc")),
            ("sort:name".to_string(), json!("asc")),
        ]
    );
    assert_eq!(
        sorter.parse_flat(false).into_iter().collect::<Vec<_>>(),
        vec![
            ("created_at".to_string(), json!("desc")),
            ("name".to_string(), json!("asc")),
        ]
    );
}

#[test]
fn parse_uses_the_default_sort_without_a_query() {
    let schema = sort_schema(SortSchema {
        default: vec![SortField {
            field: "id".to_string(),
            order: OrderDirection::Desc,
        }],
        ..SortSchema::default()
    });
    let fixture = Fixture::with_schema(json!({}), schema);
    let mut querier = fixture.querier();

    assert_eq!(Sorter::new(&mut querier).parse()["sort:id"].value, json!("desc"));
}

#[test]
fn run_applies_each_key_in_order() {
    let fixture = Fixture::new(json!({ "sort": ["name", "-id"] }));
    let mut querier = fixture.querier();
    Sorter::new(&mut querier).run().unwrap();

    assert_eq!(
        querier.query_builder().sorts,
        vec![
            spec("name", OrderDirection::Asc),
            spec("id", OrderDirection::Desc)
        ]
    );
}

#[test]
fn validate_checks_the_direction() {
    let fixture = Fixture::new(json!({ "sort": { "name": "sideways" } }));
    let mut querier = fixture.querier();

    assert_eq!(
        Sorter::new(&mut querier).validate(),
        Err(invalid("name must be one of [asc, desc]"))
    );
}

#[test]
fn validate_checks_the_field_list() {
    let schema = sort_schema(SortSchema {
        fields: Fields::only(["id", "name"]),
        ..SortSchema::default()
    });
    let fixture = Fixture::with_schema(json!({ "sort": "name,-password" }), schema);
    let mut querier = fixture.querier();

    assert_eq!(
        Sorter::new(&mut querier).validate(),
        Err(invalid("password is not sortable"))
    );
}

#[test]
fn validate_rejects_a_field_sorted_twice() {
    for sort in [json!("name,-name"), json!(["-id", "name", "id"])] {
        let fixture = Fixture::new(json!({ "sort": sort }));
        let mut querier = fixture.querier();
        let expected = if sort.is_string() { "name" } else { "id" };

        assert_eq!(
            Sorter::new(&mut querier).run().err(),
            Some(invalid(&format!("{expected} is sorted more than once")))
        );
        assert_eq!(querier.query_builder(), &Calls::default());
    }
}

#[test]
fn validate_rejects_a_bare_dash() {
    let fixture = Fixture::new(json!({ "sort": "-" }));
    let mut querier = fixture.querier();

    assert_eq!(
        Sorter::new(&mut querier).run().err(),
        Some(invalid("sort must name a field"))
    );
}

#[test]
fn run_does_not_apply_when_disabled() {
    let schema = sort_schema(SortSchema {
        is_enabled: false,
        ..SortSchema::default()
    });
    let fixture = Fixture::with_schema(json!({ "sort": 5 }), schema);
    let mut querier = fixture.querier();
    Sorter::new(&mut querier).run().unwrap();

    assert_eq!(querier.query_builder(), &Calls::default());
}
