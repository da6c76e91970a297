use chrono::NaiveDate;
use dailyword_core::db::migrations::latest_version;
use dailyword_core::db::open_db_in_memory;
use dailyword_core::{parse_date, RepoError, SqliteWordRepository, WordRepository};
use rusqlite::Connection;

#[test]
fn insert_and_find_by_date_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();

    let id = repo.insert_word("sonder").unwrap();
    repo.assign_date(id, date("2024-01-01")).unwrap();

    let found = repo.find_by_date(date("2024-01-01")).unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.text, "sonder");
    assert_eq!(found.date, Some(date("2024-01-01")));
    assert!(found.is_assigned());
}

#[test]
fn insert_rejects_blank_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();

    let err = repo.insert_word("   ").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn duplicate_texts_are_permitted_in_the_pool() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();

    let first = repo.insert_word("echo").unwrap();
    let second = repo.insert_word("echo").unwrap();
    assert_ne!(first, second);
}

#[test]
fn find_by_date_on_empty_store_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_date(date("2024-06-15")).unwrap().is_none());
}

#[test]
fn random_pick_only_sees_the_unassigned_pool() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();

    assert!(repo.find_unassigned_random().unwrap().is_none());

    let assigned = repo.insert_word("alpha").unwrap();
    let unassigned = repo.insert_word("beta").unwrap();
    repo.assign_date(assigned, date("2024-01-01")).unwrap();

    let picked = repo.find_unassigned_random().unwrap().unwrap();
    assert_eq!(picked.id, unassigned);
    assert!(!picked.is_assigned());

    repo.assign_date(unassigned, date("2024-01-02")).unwrap();
    assert!(repo.find_unassigned_random().unwrap().is_none());
}

#[test]
fn assign_date_is_write_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();

    let id = repo.insert_word("gamma").unwrap();
    repo.assign_date(id, date("2024-01-01")).unwrap();

    let err = repo.assign_date(id, date("2024-01-02")).unwrap_err();
    assert!(matches!(err, RepoError::AlreadyAssigned(found) if found == id));

    let unchanged = repo.find_by_date(date("2024-01-01")).unwrap().unwrap();
    assert_eq!(unchanged.id, id);
    assert!(repo.find_by_date(date("2024-01-02")).unwrap().is_none());
}

#[test]
fn assign_date_unknown_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();

    let err = repo.assign_date(4_242, date("2024-01-01")).unwrap_err();
    assert!(matches!(err, RepoError::WordNotFound(4_242)));
}

#[test]
fn list_assigned_desc_orders_newest_first_and_truncates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();

    seed_assigned(&repo, &[("alpha", "2024-01-01"), ("beta", "2024-01-03"), ("gamma", "2024-01-02")]);

    let all = repo.list_assigned_desc(None).unwrap();
    let dates: Vec<_> = all.iter().map(|word| word.date.unwrap()).collect();
    assert_eq!(
        dates,
        vec![date("2024-01-03"), date("2024-01-02"), date("2024-01-01")]
    );

    let truncated = repo.list_assigned_desc(Some(2)).unwrap();
    assert_eq!(truncated.len(), 2);
    assert_eq!(truncated[0].text, "beta");
    assert_eq!(truncated[1].text, "gamma");
}

#[test]
fn list_assigned_desc_excludes_unassigned_words() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();

    repo.insert_word("still-pooled").unwrap();
    seed_assigned(&repo, &[("alpha", "2024-01-01")]);

    let listed = repo.list_assigned_desc(None).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].text, "alpha");
}

#[test]
fn list_assigned_in_range_has_inclusive_bounds() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();

    seed_assigned(
        &repo,
        &[
            ("alpha", "2024-01-01"),
            ("beta", "2024-01-02"),
            ("gamma", "2024-01-03"),
            ("delta", "2024-01-04"),
        ],
    );

    let words = repo
        .list_assigned_in_range(date("2024-01-02"), date("2024-01-03"))
        .unwrap();
    let texts: Vec<_> = words.iter().map(|word| word.text.as_str()).collect();
    assert_eq!(texts, vec!["gamma", "beta"]);
}

#[test]
fn list_assigned_in_range_rejects_reversed_bounds() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();

    seed_assigned(&repo, &[("alpha", "2024-01-01")]);

    let err = repo
        .list_assigned_in_range(date("2024-01-05"), date("2024-01-01"))
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidRange { .. }));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteWordRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_words_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteWordRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("words"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_words_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE words (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteWordRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "words",
            column: "date"
        })
    ));
}

fn date(raw: &str) -> NaiveDate {
    parse_date(raw).unwrap()
}

fn seed_assigned(repo: &impl WordRepository, entries: &[(&str, &str)]) {
    for (text, day) in entries {
        let id = repo.insert_word(text).unwrap();
        repo.assign_date(id, date(day)).unwrap();
    }
}
