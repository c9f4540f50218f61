use cardkit_core::db::{import_rows, open_db, open_db_in_memory, DbError};
use cardkit_core::{
    CardKind, CollectionQuery, CollectionService, HtmlContainer, LoadOutcome, Record,
    RecordSource, RenderOptions, SourceError, SqliteRecordSource,
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

fn rows(value: Value) -> Vec<Record> {
    let Value::Array(items) = value else {
        panic!("fixture should be an array");
    };
    items
        .into_iter()
        .map(|item| Record::from_value(item).expect("fixture row should be an object"))
        .collect()
}

fn field<'r>(record: &'r Record, name: &str) -> &'r Value {
    record.get(name).expect("field should be present")
}

#[test]
fn team_query_filters_inactive_and_sorts_by_display_order() {
    let mut conn = open_db_in_memory().unwrap();
    let inserted = import_rows(
        &mut conn,
        "team_members",
        &rows(json!([
            {"name": "Third", "display_order": 3},
            {"name": "Hidden", "display_order": 0, "is_active": false},
            {"name": "First", "display_order": 1},
            {"name": "Second", "display_order": 2, "is_active": true}
        ])),
    )
    .unwrap();
    assert_eq!(inserted, 4);

    let source = SqliteRecordSource::new(&conn);
    let fetched = source
        .fetch(&CollectionQuery::for_kind(CardKind::TeamMember))
        .unwrap();

    let names: Vec<&Value> = fetched.iter().map(|record| field(record, "name")).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
    assert_eq!(field(&fetched[0], "is_active"), &json!(1));
}

#[test]
fn activities_are_newest_first_with_missing_dates_last() {
    let mut conn = open_db_in_memory().unwrap();
    import_rows(
        &mut conn,
        "recent_activities",
        &rows(json!([
            {"title": "Undated"},
            {"title": "Older", "date": "2024-03-01"},
            {"title": "Newer", "date": "2024-05-01"}
        ])),
    )
    .unwrap();

    let fetched = SqliteRecordSource::new(&conn)
        .fetch(&CollectionQuery::for_kind(CardKind::Activity))
        .unwrap();
    let titles: Vec<&Value> = fetched.iter().map(|record| field(record, "title")).collect();
    assert_eq!(titles, vec!["Newer", "Older", "Undated"]);
}

#[test]
fn unknown_table_is_an_unknown_collection() {
    let conn = open_db_in_memory().unwrap();
    let err = SqliteRecordSource::new(&conn)
        .fetch(&CollectionQuery::new("sponsors", "name", true))
        .unwrap_err();
    assert!(matches!(err, SourceError::UnknownCollection(table) if table == "sponsors"));
}

#[test]
fn query_names_are_checked_before_reaching_sql() {
    let conn = open_db_in_memory().unwrap();
    let source = SqliteRecordSource::new(&conn);

    let injected = source
        .fetch(&CollectionQuery::new("team_members; DROP TABLE team_members", "id", true))
        .unwrap_err();
    assert!(matches!(injected, SourceError::InvalidQuery(_)));

    let missing_column = source
        .fetch(&CollectionQuery::new("upcoming_events", "display_order", true))
        .unwrap_err();
    assert!(matches!(missing_column, SourceError::InvalidQuery(_)));

    let missing_flag = source
        .fetch(&CollectionQuery::new("upcoming_events", "date", true).active_only())
        .unwrap_err();
    assert!(matches!(missing_flag, SourceError::InvalidQuery(_)));

    assert!(source
        .fetch(&CollectionQuery::for_kind(CardKind::TeamMember))
        .unwrap()
        .is_empty());
}

#[test]
fn import_rejects_unknown_columns_without_partial_writes() {
    let mut conn = open_db_in_memory().unwrap();
    let err = import_rows(
        &mut conn,
        "upcoming_events",
        &rows(json!([
            {"title": "Fine"},
            {"title": "Bad", "venue": "Hall"}
        ])),
    )
    .unwrap_err();
    assert!(matches!(err, DbError::UnknownColumn { ref column, .. } if column == "venue"));

    let fetched = SqliteRecordSource::new(&conn)
        .fetch(&CollectionQuery::for_kind(CardKind::Event))
        .unwrap();
    assert!(fetched.is_empty());
}

#[test]
fn stored_collection_renders_through_service() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.sqlite3");
    {
        let mut conn = open_db(&path).unwrap();
        import_rows(
            &mut conn,
            "upcoming_events",
            &rows(json!([
                {"title": "Gala", "date": "2024-12-01", "description": "<p>Formal</p><script>x()</script>"},
                {"title": "Picnic", "date": "2024-07-04", "image": "https://cdn.example.org/picnic.jpg"}
            ])),
        )
        .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let service = CollectionService::new(SqliteRecordSource::new(&conn), RenderOptions::default());
    let mut container = HtmlContainer::new(CardKind::Event.container_id());
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    assert_eq!(
        service.load(CardKind::Event, &mut container, now),
        LoadOutcome::Populated(2)
    );
    let html = container.html();
    let picnic = html.find(">Picnic</h3>").expect("Picnic rendered");
    let gala = html.find(">Gala</h3>").expect("Gala rendered");
    assert!(picnic < gala);
    assert!(html.contains("<p>Formal</p>"));
    assert!(!html.contains("<script"));
    assert!(html.contains("Jul 4, 2024"));
}

#[test]
fn empty_store_renders_empty_placeholders() {
    let conn = open_db_in_memory().unwrap();
    let service = CollectionService::new(SqliteRecordSource::new(&conn), RenderOptions::default());
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    for kind in CardKind::ALL {
        let mut container = HtmlContainer::new(kind.container_id());
        assert_eq!(service.load(kind, &mut container, now), LoadOutcome::Empty);
        assert_eq!(container.html(), kind.placeholders().empty);
    }
}
