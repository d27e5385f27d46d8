//! Tests for Engine
//!
//! These tests verify:
//! - Basic insert/select operations
//! - Statement execution
//! - Capacity ceiling (TableFull)
//! - Persistence across close/reopen
//! - Explicit flush without close
//! - Engine lifecycle (open/close)

use std::fs;
use std::path::{Path, PathBuf};

use pagedb::config::Config;
use pagedb::engine::{Engine, ExecuteOutcome};
use pagedb::statement::Statement;
use pagedb::{PageDbError, Row};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_engine() -> (TempDir, PathBuf, Engine) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("engine.db");
    let engine = Engine::open_path(&path).unwrap();
    (temp_dir, path, engine)
}

fn small_config(path: &Path) -> Config {
    // 3 rows of 100 bytes per 320-byte page, 4 pages: 12 rows max
    Config::builder()
        .db_path(path)
        .page_size(320)
        .max_pages(4)
        .username_size(16)
        .email_size(80)
        .build()
}

fn sample_row(i: u32) -> Row {
    Row::new(i, format!("user{}", i), format!("person{}@example.com", i))
}

fn select_all(engine: &mut Engine) -> Vec<Row> {
    engine.select().collect::<Result<Vec<_>, _>>().unwrap()
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_engine_open_creates_file() {
    let (_temp, path, engine) = setup_temp_engine();

    assert!(path.exists());
    assert_eq!(engine.row_count(), 0);
    assert_eq!(engine.max_rows(), 1400);
}

#[test]
fn test_insert_and_select_in_order() {
    let (_temp, _path, mut engine) = setup_temp_engine();

    engine.insert(&Row::new(1, "user1", "person1@example.com")).unwrap();
    engine.insert(&Row::new(2, "user2", "person2@example.com")).unwrap();

    let rows = select_all(&mut engine);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].to_string(), "(1, user1, person1@example.com)");
    assert_eq!(rows[1].to_string(), "(2, user2, person2@example.com)");
}

#[test]
fn test_select_empty_table() {
    let (_temp, _path, mut engine) = setup_temp_engine();

    assert_eq!(engine.select().count(), 0);
}

#[test]
fn test_ids_are_not_deduplicated() {
    let (_temp, _path, mut engine) = setup_temp_engine();

    engine.insert(&sample_row(5)).unwrap();
    engine.insert(&sample_row(5)).unwrap();

    assert_eq!(engine.row_count(), 2);
}

#[test]
fn test_insert_order_not_id_order() {
    let (_temp, _path, mut engine) = setup_temp_engine();

    for id in [30, 10, 20] {
        engine.insert(&sample_row(id)).unwrap();
    }

    let ids: Vec<u32> = select_all(&mut engine).iter().map(Row::id).collect();
    assert_eq!(ids, vec![30, 10, 20]);
}

// =============================================================================
// Execute Tests
// =============================================================================

#[test]
fn test_execute_insert_then_select() {
    let (_temp, _path, mut engine) = setup_temp_engine();

    let outcome = engine.execute(Statement::Insert(sample_row(1))).unwrap();
    assert_eq!(outcome, ExecuteOutcome::Inserted);

    match engine.execute(Statement::Select).unwrap() {
        ExecuteOutcome::Selected(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].id(), 1);
            assert_eq!(rows[0].username(), "user1");
        }
        other => panic!("Expected Selected, got {:?}", other),
    }
}

// =============================================================================
// Capacity Tests
// =============================================================================

#[test]
fn test_fill_table_then_table_full() {
    let (_temp, _path, mut engine) = setup_temp_engine();
    let max_rows = engine.max_rows();

    for i in 0..max_rows as u32 {
        engine.insert(&sample_row(i)).unwrap();
    }
    assert_eq!(engine.row_count(), max_rows);

    let result = engine.insert(&sample_row(9999));
    assert!(matches!(result, Err(PageDbError::TableFull)));
    assert!(!result.unwrap_err().is_fatal());
    assert_eq!(engine.row_count(), max_rows);
}

#[test]
fn test_table_full_with_small_geometry() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = Engine::open(small_config(&temp_dir.path().join("small.db"))).unwrap();
    assert_eq!(engine.max_rows(), 12);

    for i in 0..12 {
        engine.insert(&sample_row(i)).unwrap();
    }

    assert!(matches!(engine.insert(&sample_row(12)), Err(PageDbError::TableFull)));
    assert!(matches!(engine.insert(&sample_row(13)), Err(PageDbError::TableFull)));
    assert_eq!(engine.row_count(), 12);
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_close_and_reopen_preserves_rows() {
    let (_temp, path, mut engine) = setup_temp_engine();

    engine.insert(&Row::new(1, "user1", "person1@example.com")).unwrap();
    engine.insert(&Row::new(2, "user2", "person2@example.com")).unwrap();
    let before = select_all(&mut engine);
    engine.close().unwrap();

    let mut engine = Engine::open_path(&path).unwrap();
    assert_eq!(engine.row_count(), 2);
    assert_eq!(select_all(&mut engine), before);
}

#[test]
fn test_second_page_survives_reopen() {
    let (_temp, path, mut engine) = setup_temp_engine();
    let count = engine.table().rows_per_page() + 1;

    for i in 0..count as u32 {
        engine.insert(&sample_row(i)).unwrap();
    }
    assert_eq!(engine.table().pager().resident_pages(), 2);
    engine.close().unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 4096 + 292);

    let mut engine = Engine::open_path(&path).unwrap();
    let ids: Vec<u32> = select_all(&mut engine).iter().map(Row::id).collect();
    assert_eq!(ids, (0..count as u32).collect::<Vec<_>>());
}

#[test]
fn test_full_table_survives_reopen() {
    let (_temp, path, mut engine) = setup_temp_engine();
    let max_rows = engine.max_rows();

    for i in 0..max_rows as u32 {
        engine.insert(&sample_row(i)).unwrap();
    }
    engine.close().unwrap();

    let mut engine = Engine::open_path(&path).unwrap();
    assert_eq!(engine.row_count(), max_rows);

    let rows = select_all(&mut engine);
    assert_eq!(rows.len(), max_rows);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row, &{
            let mut buf = vec![0u8; 292];
            engine.codec().encode(&sample_row(i as u32), &mut buf);
            engine.codec().decode(&buf)
        });
    }

    assert!(matches!(engine.insert(&sample_row(0)), Err(PageDbError::TableFull)));
}

#[test]
fn test_append_after_reopen() {
    let (_temp, path, mut engine) = setup_temp_engine();

    for i in 0..10 {
        engine.insert(&sample_row(i)).unwrap();
    }
    engine.close().unwrap();

    let mut engine = Engine::open_path(&path).unwrap();
    for i in 10..20 {
        engine.insert(&sample_row(i)).unwrap();
    }
    engine.close().unwrap();

    let mut engine = Engine::open_path(&path).unwrap();
    let ids: Vec<u32> = select_all(&mut engine).iter().map(Row::id).collect();
    assert_eq!(ids, (0..20).collect::<Vec<_>>());
}

#[test]
fn test_reopen_without_touching_rows_keeps_them() {
    let (_temp, path, mut engine) = setup_temp_engine();
    for i in 0..20 {
        engine.insert(&sample_row(i)).unwrap();
    }
    engine.close().unwrap();

    // Open and close again without loading any page
    let engine = Engine::open_path(&path).unwrap();
    assert_eq!(engine.table().pager().resident_pages(), 0);
    engine.close().unwrap();

    let mut engine = Engine::open_path(&path).unwrap();
    let ids: Vec<u32> = select_all(&mut engine).iter().map(Row::id).collect();
    assert_eq!(ids, (0..20).collect::<Vec<_>>());
}

#[test]
fn test_dropping_without_close_loses_inserts() {
    let (_temp, path, mut engine) = setup_temp_engine();

    engine.insert(&sample_row(1)).unwrap();
    drop(engine);

    let engine = Engine::open_path(&path).unwrap();
    assert_eq!(engine.row_count(), 0);
}

#[test]
fn test_explicit_flush_is_durable() {
    let (_temp, path, mut engine) = setup_temp_engine();

    engine.insert(&sample_row(1)).unwrap();
    engine.insert(&sample_row(2)).unwrap();
    engine.flush().unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 2 * 292);

    engine.insert(&sample_row(3)).unwrap();
    drop(engine);

    let mut engine = Engine::open_path(&path).unwrap();
    let ids: Vec<u32> = select_all(&mut engine).iter().map(Row::id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_empty_close_writes_no_rows() {
    let (_temp, path, engine) = setup_temp_engine();

    engine.close().unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn test_small_geometry_persistence() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("small.db");

    let mut engine = Engine::open(small_config(&path)).unwrap();
    for i in 0..7 {
        engine.insert(&sample_row(i)).unwrap();
    }
    engine.close().unwrap();

    // 2 full pages of 320 bytes + 1 row of 100 bytes
    assert_eq!(fs::metadata(&path).unwrap().len(), 2 * 320 + 100);

    let mut engine = Engine::open(small_config(&path)).unwrap();
    let rows = select_all(&mut engine);
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[6].username(), "user6");
    assert_eq!(rows[6].email(), "person6@example.com");
}

#[test]
fn test_open_with_smaller_geometry_keeps_rows() {
    let (_temp, path, mut engine) = setup_temp_engine();
    for i in 0..100 {
        engine.insert(&sample_row(i)).unwrap();
    }
    engine.close().unwrap();
    let len = fs::metadata(&path).unwrap().len();
    assert_eq!(len, 7 * 4096 + 2 * 292);

    let config = Config::builder().db_path(&path).max_pages(1).build();
    let result = Engine::open(config);
    assert!(matches!(result, Err(PageDbError::Config(_))));
    assert_eq!(fs::metadata(&path).unwrap().len(), len);

    let mut engine = Engine::open_path(&path).unwrap();
    assert_eq!(engine.row_count(), 100);
    let rows = select_all(&mut engine);
    assert_eq!(rows[99].to_string(), "(99, user99, person99@example.com)");
}
