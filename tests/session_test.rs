//! Session-level behavior through the executor: catalog correctness,
//! freeform error containment, and the load-once contract.

mod common;

use tempfile::TempDir;

use madang::{catalog, executor::SqlExecutor};

fn fixture_executor() -> (TempDir, SqlExecutor) {
    let dir = tempfile::tempdir().unwrap();
    common::write_fixture_dataset(dir.path());
    let executor = SqlExecutor::new(dir.path()).unwrap();
    (dir, executor)
}

fn column(result: &madang::QueryResult, name: &str) -> Vec<String> {
    let idx = result.columns.iter().position(|c| c == name).unwrap();
    result.rows.iter().map(|row| row[idx].clone()).collect()
}

#[test]
fn test_catalog_queries_are_deterministic() {
    let (_dir, mut executor) = fixture_executor();

    for entry in catalog::entries() {
        let first = executor.execute(entry.sql).unwrap();
        let second = executor.execute(entry.sql).unwrap();
        assert_eq!(first.columns, second.columns);
        assert_eq!(first.rows, second.rows);
    }
}

#[test]
fn test_order_history_excludes_dangling_references() {
    let (_dir, mut executor) = fixture_executor();

    let result = executor.execute(catalog::get(1).unwrap().sql).unwrap();
    assert_eq!(
        result.columns,
        vec!["orderid", "customer_name", "bookname", "saleprice", "orderdate"]
    );

    // Orders 6 (custid 99) and 7 (bookid 88) have no matching rows and are
    // silently excluded by the inner joins.
    let order_ids = column(&result, "orderid");
    assert_eq!(order_ids, vec!["1", "2", "3", "4", "5"]);

    // Every surviving row carries both names
    for name in column(&result, "customer_name") {
        assert!(!name.is_empty());
    }
    for name in column(&result, "bookname") {
        assert!(!name.is_empty());
    }
}

#[test]
fn test_order_history_is_sorted_by_date_ascending() {
    let (_dir, mut executor) = fixture_executor();

    let result = executor.execute(catalog::get(1).unwrap().sql).unwrap();
    let dates = column(&result, "orderdate");
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[test]
fn test_per_customer_totals_match_manual_aggregation() {
    let (_dir, mut executor) = fixture_executor();

    let result = executor.execute(catalog::get(2).unwrap().sql).unwrap();
    assert_eq!(result.columns, vec!["custid", "customer_name", "total_spent", "num_orders"]);

    // Customer 1: 6000 + 21000 + 2000, customer 2: 8000 + 9000,
    // customer 3: 5000. The dangling custid 99 order joins nothing.
    assert_eq!(column(&result, "custid"), vec!["1", "2", "3"]);
    assert_eq!(column(&result, "total_spent"), vec!["29000", "17000", "5000"]);
    assert_eq!(column(&result, "num_orders"), vec!["3", "2", "1"]);
}

#[test]
fn test_per_publisher_sales_group_null_publishers_together() {
    let (_dir, mut executor) = fixture_executor();

    let result = executor.execute(catalog::get(3).unwrap().sql).unwrap();
    assert_eq!(result.columns, vec!["publisher", "total_sales", "num_orders"]);

    // Daehan Media: 21000. GoodSports: 6000 + 8000 + 1000. The two books
    // with an empty publisher form a single NULL group: 5000 + 9000.
    assert_eq!(result.row_count, 3);
    assert_eq!(column(&result, "total_sales"), vec!["21000", "15000", "14000"]);

    let null_groups: Vec<_> =
        column(&result, "publisher").into_iter().filter(|p| p.is_empty()).collect();
    assert_eq!(null_groups.len(), 1);
}

#[test]
fn test_freeform_syntax_error_is_contained() {
    let (_dir, mut executor) = fixture_executor();

    let err = executor.execute("SELEKT * FROM book").unwrap_err();
    assert!(err.to_string().to_lowercase().contains("syntax"));

    // The session survives and the base tables are unaffected
    let result = executor.execute("SELECT COUNT(*) FROM book").unwrap();
    assert_eq!(result.rows[0][0], common::data_rows(common::BOOK_CSV).to_string());
}

#[test]
fn test_freeform_unknown_table_reports_engine_diagnostic() {
    let (_dir, mut executor) = fixture_executor();

    let err = executor.execute("SELECT * FROM no_such_table").unwrap_err();
    assert!(err.to_string().contains("no_such_table"));
}

#[test]
fn test_limit_five_returns_at_most_five_rows_with_all_columns() {
    let (_dir, mut executor) = fixture_executor();

    let result = executor.execute("SELECT * FROM book LIMIT 5").unwrap();
    assert!(result.row_count <= 5);
    assert_eq!(result.columns, vec!["bookid", "bookname", "publisher", "price", "rating"]);
}

#[test]
fn test_queries_never_trigger_a_reload() {
    let (_dir, mut executor) = fixture_executor();
    let before = executor.execute("SELECT COUNT(*) FROM orders").unwrap().rows[0][0].clone();

    // A spread of session activity: browsing, describing, listing, failing
    executor.execute("SELECT * FROM book").unwrap();
    executor.list_tables().unwrap();
    executor.describe_table("customer").unwrap();
    let _ = executor.execute("SELEKT nonsense");

    let after = executor.execute("SELECT COUNT(*) FROM orders").unwrap().rows[0][0].clone();
    assert_eq!(before, after);
}

#[test]
fn test_explicit_reload_preserves_row_counts() {
    let (_dir, mut executor) = fixture_executor();
    let before = executor.execute("SELECT COUNT(*) FROM book").unwrap().rows[0][0].clone();

    executor.reload().unwrap();

    let after = executor.execute("SELECT COUNT(*) FROM book").unwrap().rows[0][0].clone();
    assert_eq!(before, after);
}

#[test]
fn test_destructive_freeform_is_permitted_and_reload_recovers() {
    let (_dir, mut executor) = fixture_executor();

    // No allow-list: a DROP against the in-memory tables succeeds
    executor.execute("DROP TABLE book").unwrap();
    assert!(executor.execute("SELECT * FROM book").is_err());

    // Reload restores the dataset from disk
    executor.reload().unwrap();
    let result = executor.execute("SELECT COUNT(*) FROM book").unwrap();
    assert_eq!(result.rows[0][0], common::data_rows(common::BOOK_CSV).to_string());
}

#[test]
fn test_describe_and_list_tables_render_as_results() {
    let (_dir, mut executor) = fixture_executor();

    let tables = executor.list_tables().unwrap();
    assert_eq!(column(&tables, "table"), vec!["book", "customer", "orders"]);

    let described = executor.describe_table("orders").unwrap();
    assert_eq!(
        column(&described, "name"),
        vec!["orderid", "custid", "bookid", "saleprice", "orderdate"]
    );

    assert!(executor.describe_table("nope").is_err());
}
