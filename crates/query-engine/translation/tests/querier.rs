use query_engine_metadata::metadata::{OrderDirection, Schema, SortField, SortSchema};
use query_engine_sql::sql;
use query_engine_translation::translation::adapter::SqlAdapter;
use query_engine_translation::translation::error::{Error, ValidationError};
use query_engine_translation::translation::querier::Querier;
use query_engine_translation::translation::raw_query::parse_query_string;

/// Translate a query string against the `test` table.
fn translate(query_string: &str, schema: &Schema) -> Result<sql::ast::Select, Error> {
    let raw_query = parse_query_string(query_string);
    let adapter = SqlAdapter::new();
    Querier::new(
        &raw_query,
        sql::helpers::select_from_table("test"),
        schema,
        &adapter,
    )
    .run()
}

#[test]
fn translates_every_facet() {
    let select = translate(
        "filter[name][like]=%25a%25&filter[id][in][]=1&filter[id][in][]=2&sort=-id&page=3",
        &Schema::default(),
    )
    .unwrap();

    insta::assert_snapshot!(
        select.to_string(),
        @r#"select * from "test" where "name" like '%a%' and "id" in (1, 2) order by "id" desc limit 20 offset 40"#
    );
}

#[test]
fn falls_back_to_schema_defaults() {
    let schema = Schema {
        sort: SortSchema {
            default: vec![SortField {
                field: "id".to_string(),
                order: OrderDirection::Desc,
            }],
            ..SortSchema::default()
        },
        ..Schema::default()
    };
    let select = translate("", &schema).unwrap();

    insta::assert_snapshot!(
        select.to_string(),
        @r#"select * from "test" order by "id" desc limit 20 offset 0"#
    );
}

#[test]
fn leaves_the_query_alone_when_everything_is_disabled() {
    let select = translate("filter[id]=1&sort=id&page=2", &Schema::disabled()).unwrap();

    assert_eq!(select, sql::helpers::select_from_table("test"));
}

#[test]
fn reports_the_first_invalid_facet() {
    assert_eq!(
        translate("page=two&filter[age][>]=old", &Schema::default()),
        Err(Error::Validation(ValidationError::new("age must be a number")))
    );
}

#[test]
fn renders_strings_as_parameters() {
    let select = translate(
        "filter[name]=O'Brien&filter[deleted_at][is]=null&page=1",
        &Schema::default(),
    )
    .unwrap();
    let query = select.query_sql();

    assert_eq!(
        query.sql,
        "select * from \"test\" where \"name\" = $1 and \"deleted_at\" is null limit 20 offset 0"
    );
    assert_eq!(
        query.params,
        vec![sql::string::Param::String("O'Brien".to_string())]
    );
}

#[test]
fn empty_sets_match_nothing_or_everything() {
    let raw_query = serde_json::json!({ "filter": { "id": { "in": [] }, "age": { "not in": [] } } });
    let serde_json::Value::Object(raw_query) = raw_query else {
        unreachable!()
    };
    let adapter = SqlAdapter::new();
    let schema = Schema {
        filter: Schema::default().filter,
        ..Schema::disabled()
    };
    let select = Querier::new(
        &raw_query,
        sql::helpers::select_from_table("test"),
        &schema,
        &adapter,
    )
    .run()
    .unwrap();

    insta::assert_snapshot!(
        select.to_string(),
        @r#"select * from "test" where 1 = 0 and 1 = 1"#
    );
}
