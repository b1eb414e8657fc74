//! End-to-end tests: raw query pairs through normalization, binding,
//! clause building, and shaping down to the final statement.

use pretty_assertions::assert_eq;

use sift_query::criteria;
use sift_query::prelude::*;

criteria! {
    pub struct UserCriteria {
        "Name" => name: StringFilter,
        "Age" => age: IntFilter,
        "Score" => score: FloatFilter,
        "CreatedAt" => created_at: TimeFilter,
        "Vip" => vip: BoolFilter,
    }
}

fn bind_pairs(pairs: &[(&str, &str)]) -> UserCriteria {
    let params = ParamMap::from_query_pairs(pairs.iter().copied());
    let mut criteria = UserCriteria::default();
    bind_params(&mut criteria, &params).unwrap();
    criteria
}

#[test]
fn query_string_to_statement() {
    let criteria = bind_pairs(&[
        ("name.contains", "al"),
        ("age.gte", "18"),
        ("age.lt", "65"),
        ("vip.equals", "true"),
    ]);

    let query = SelectQuery::postgres("users");
    let query = build_string_specification(query, "name", &criteria.name);
    let query = build_int_specification(query, "age", &criteria.age);
    let query = build_bool_specification(query, "vip", &criteria.vip);

    let (sql, params) = query.build_sql();
    assert_eq!(
        sql,
        "SELECT * FROM users WHERE (name LIKE $1 AND age < $2 AND age >= $3 AND vip = $4)"
    );
    assert_eq!(
        params,
        vec![
            FilterValue::String("%al%".to_string()),
            FilterValue::Int(65),
            FilterValue::Int(18),
            FilterValue::Bool(true),
        ]
    );
}

#[test]
fn unknown_keys_are_ignored() {
    let criteria = bind_pairs(&[
        ("age.gte", "21"),
        ("unknown.field", "x"),
        ("page", "3"),
    ]);

    assert_eq!(criteria.age.gte, Some(21));
    assert_eq!(criteria.name, StringFilter::default());
}

#[test]
fn unparsable_numbers_bind_defaults_not_errors() {
    let criteria = bind_pairs(&[("age.equals", "forty-two")]);
    assert_eq!(criteria.age.equals, Some(0));
}

#[test]
fn membership_lists_flow_through() {
    let criteria = bind_pairs(&[("age.in", "30,40,fifty")]);

    let query = build_int_specification(SelectQuery::postgres("users"), "age", &criteria.age);
    let (sql, params) = query.build_sql();

    assert_eq!(sql, "SELECT * FROM users WHERE age IN ($1, $2, $3)");
    assert_eq!(
        params,
        vec![FilterValue::Int(30), FilterValue::Int(40), FilterValue::Int(0)]
    );
}

#[test]
fn time_range_round_trip() {
    let criteria = bind_pairs(&[
        ("createdAt.gte", "2024-01-01 00:00:00"),
        ("createdAt.lt", "2025-01-01 00:00:00"),
    ]);

    let query = build_time_specification(
        SelectQuery::postgres("users"),
        "created_at",
        &criteria.created_at,
    );
    let (sql, params) = query.build_sql();

    assert_eq!(
        sql,
        "SELECT * FROM users WHERE (created_at < $1 AND created_at >= $2)"
    );
    assert!(matches!(params[0], FilterValue::Timestamp(_)));
}

#[test]
#[should_panic(expected = "unparsable time literal")]
fn bad_time_literal_panics() {
    let criteria = bind_pairs(&[("createdAt.gte", "January 1st")]);
    build_time_specification(
        SelectQuery::postgres("users"),
        "created_at",
        &criteria.created_at,
    );
}

#[test]
fn shaping_applies_after_predicates() {
    let criteria = bind_pairs(&[("score.gt", "0.5")]);

    let query =
        build_float_specification(SelectQuery::postgres("players"), "score", &criteria.score);
    let shaped = QueryShape::new()
        .selects(vec!["id".to_string(), "score".to_string()])
        .order("score DESC")
        .limit(20)
        .apply(query);

    let (sql, params) = shaped.build_sql();
    assert_eq!(
        sql,
        "SELECT id, score FROM players WHERE score > $1 ORDER BY score DESC LIMIT 20"
    );
    assert_eq!(params, vec![FilterValue::Float(0.5)]);
}

#[test]
fn mysql_dialect_end_to_end() {
    let criteria = bind_pairs(&[("name.equals", "ada")]);

    let query = build_string_specification(SelectQuery::mysql("users"), "name", &criteria.name);
    let (sql, params) = query.build_sql();

    assert_eq!(sql, "SELECT * FROM users WHERE name = ?");
    assert_eq!(params, vec![FilterValue::String("ada".to_string())]);
}
