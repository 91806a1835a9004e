use reqsql::{Dialect, Grammar, Placeholder, Request, SqlError, Where};

#[test]
fn toml_dialect_overrides_only_given_fields() {
    let dialect = Dialect::from_toml_str(
        r#"
            identifier_quote_open = "["
            identifier_quote_close = "]"
            descending = "DESC"
        "#,
    )
    .unwrap();

    assert_eq!(dialect.identifier_quote_open, "[");
    assert_eq!(dialect.placeholder, Placeholder::Positional("?".into()));
    assert_eq!(dialect.list_separator, ", ");

    let q = Grammar::new(dialect)
        .compile(&Request::new("dbo.users").order_by("id", "desc"))
        .unwrap();
    assert_eq!(q.text(), "SELECT *\nFROM [dbo].[users]\nORDER BY [id] DESC\n");
}

#[test]
fn toml_numbered_placeholder() {
    let dialect = Dialect::from_toml_str(
        r#"
            identifier_quote_open = '"'
            identifier_quote_close = '"'
            placeholder = { numbered = "$" }
        "#,
    )
    .unwrap();
    assert_eq!(dialect, Dialect::postgres());
}

#[test]
fn json_dialect_round_trips_presets() {
    let json = serde_json::to_string(&Dialect::mssql()).unwrap();
    assert_eq!(Dialect::from_json_str(&json).unwrap(), Dialect::mssql());
}

#[test]
fn empty_tokens_are_rejected() {
    let err = Dialect::from_toml_str(r#"identifier_quote_open = """#).unwrap_err();
    assert!(matches!(err, SqlError::Config(_)));
    assert!(err.to_string().contains("identifier_quote_open"));

    let err = Dialect::from_json_str(r#"{"placeholder": {"positional": ""}}"#).unwrap_err();
    assert!(err.to_string().contains("placeholder"));
}

#[test]
fn malformed_config_is_a_config_error() {
    let err = Dialect::from_toml_str("identifier_quote_open = ").unwrap_err();
    assert!(matches!(err, SqlError::Config(_)));

    let err = Dialect::from_json_str("{").unwrap_err();
    assert!(matches!(err, SqlError::Config(_)));

    let err = Dialect::from_json_str(r#"{"placeholder": "dollar"}"#).unwrap_err();
    assert!(matches!(err, SqlError::Config(_)));
}

#[test]
fn unknown_preset_name() {
    assert!(Dialect::by_name("PostgreSQL").is_ok());
    assert!(matches!(Dialect::by_name("oracle"), Err(SqlError::Config(_))));
}

#[test]
fn custom_descending_keyword_is_matched_case_insensitively() {
    let mut dialect = Dialect::sqlite();
    dialect.descending = "DESCENDING".into();
    dialect.ascending = "ASCENDING".into();

    let q = Grammar::new(dialect)
        .compile(
            &Request::new("t")
                .order_by("a", "descending")
                .order_by("b", "DESC"),
        )
        .unwrap();
    assert_eq!(
        q.text(),
        "SELECT *\nFROM \"t\"\nORDER BY \"a\" DESCENDING, \"b\" ASCENDING\n"
    );
}

#[test]
fn dialects_coexist() {
    let request = Request::new("users").filter(Where::new().eq("id", 1).eq("name", "x"));
    let mysql = Grammar::new(Dialect::mysql()).compile(&request).unwrap();
    let pg = Grammar::new(Dialect::postgres()).compile(&request).unwrap();

    assert!(mysql.text().contains("`id` = ?\n\t AND `name` = ?"));
    assert!(pg.text().contains("\"id\" = $1\n\t AND \"name\" = $2"));
    assert_eq!(mysql.params(), pg.params());
}
