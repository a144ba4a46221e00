use query_engine_sql::sql::{ast, helpers, string};

#[test]
fn it_converts_simple_select() {
    let select = helpers::select_from_table("bamba");
    assert_eq!(select.to_string(), "select * from \"bamba\"");
}

#[test]
fn it_converts_schema_qualified_column_select() {
    let mut select = helpers::star_select(ast::From::Table {
        reference: ast::TableReference::DBTable {
            schema: Some(ast::SchemaName("public".to_string())),
            table: ast::TableName("bamba".to_string()),
        },
    });
    select.select_list = ast::SelectList::Columns(vec![
        ast::ColumnName("x".to_string()),
        ast::ColumnName("y".to_string()),
    ]);
    insta::assert_snapshot!(select.to_string(), @r#"select "x", "y" from "public"."bamba""#);
}

#[test]
fn it_chains_where_clauses_with_and() {
    let mut select = helpers::select_from_table("album");
    helpers::and_where(
        &mut select,
        ast::Expression::BinaryOperation {
            left: Box::new(helpers::column("title")),
            operator: ast::BinaryOperator::Like,
            right: Box::new(ast::Expression::Value(ast::Value::String(
                "%rock'n'roll%".to_string(),
            ))),
        },
    );
    helpers::and_where(
        &mut select,
        ast::Expression::UnaryOperation {
            expression: Box::new(helpers::column("deleted_at")),
            operator: ast::UnaryOperator::IsNull,
        },
    );
    insta::assert_snapshot!(
        select.to_string(),
        @r#"select * from "album" where "title" like '%rock''n''roll%' and "deleted_at" is null"#
    );
}

#[test]
fn it_renders_positional_parameters() {
    let mut select = helpers::select_from_table("album");
    helpers::and_where(
        &mut select,
        ast::Expression::BinaryArrayOperation {
            left: Box::new(helpers::column("genre")),
            operator: ast::BinaryArrayOperator::NotIn,
            right: vec![
                ast::Expression::Value(ast::Value::String("jazz".to_string())),
                ast::Expression::Value(ast::Value::Int8(7)),
            ],
        },
    );
    select.limit = ast::Limit {
        limit: Some(5),
        offset: None,
    };
    assert_eq!(
        select.query_sql(),
        string::SQL {
            sql: "select * from \"album\" where \"genre\" not in ($1, 7) limit 5".to_string(),
            params: vec![string::Param::String("jazz".to_string())],
            param_index: 1,
            style: string::ParamStyle::Positional,
        }
    );
}

#[test]
fn it_renders_ordering_and_ranges() {
    let mut select = helpers::select_from_table("track");
    helpers::and_where(
        &mut select,
        ast::Expression::Between {
            expression: Box::new(helpers::column("milliseconds")),
            negated: true,
            low: Box::new(ast::Expression::Value(ast::Value::Float8(1.5))),
            high: Box::new(ast::Expression::Value(ast::Value::Int8(9000))),
        },
    );
    select.order_by.elements.push(ast::OrderByElement {
        target: helpers::column("name"),
        direction: ast::OrderByDirection::Asc,
    });
    select.order_by.elements.push(ast::OrderByElement {
        target: helpers::column("id"),
        direction: ast::OrderByDirection::Desc,
    });
    insta::assert_snapshot!(
        select.to_string(),
        @r#"select * from "track" where "milliseconds" not between 1.5 and 9000 order by "name" asc, "id" desc"#
    );
}

#[test]
fn it_renders_constant_conditions_and_empty_lists() {
    let mut select = helpers::select_from_table("album");
    helpers::and_where(&mut select, helpers::constant_condition(false));
    helpers::and_where(&mut select, helpers::constant_condition(true));
    insta::assert_snapshot!(select.to_string(), @r#"select * from "album" where 1 = 0 and 1 = 1"#);

    let empty = ast::Expression::BinaryArrayOperation {
        left: Box::new(helpers::column("id")),
        operator: ast::BinaryArrayOperator::In,
        right: vec![],
    };
    let mut sql = string::SQL::new();
    empty.to_sql(&mut sql);
    assert_eq!(sql.sql, "\"id\" in ()");
}
