//! JOIN evaluation tests: row admission, NULL padding and reachability

mod common;

use common::{C, TestContext, assert_close, setup_test};
use sqlfit_sql::{ColumnDescriptor, Value};

fn setup_company(ctx: &mut TestContext) {
    ctx.exec("INSERT INTO Employees (name, department_id, project_id) VALUES ('John', 1, 1)");
    ctx.exec("INSERT INTO Departments VALUES (1, 'Sales')");
    ctx.exec("INSERT INTO Projects VALUES (1, 'ProjectX')");
}

fn name_and_department() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::table_column("name", "employees"),
        ColumnDescriptor::table_column("department_name", "departments"),
    ]
}

#[test]
fn test_left_join_with_rows_in_left_table() {
    let mut ctx = setup_test();
    ctx.exec("INSERT INTO TableA VALUES ('John')");
    ctx.empty("TableB");

    for sql in [
        "SELECT name FROM TableA LEFT JOIN TableB",
        "SELECT name FROM TableA LEFT OUTER JOIN TableB",
    ] {
        let result = ctx.heuristic(sql);
        assert!(result.truthness.is_true());
        assert_eq!(
            result.rows.columns(),
            &[ColumnDescriptor::table_column("name", "tablea")]
        );
        assert_rows!(ctx, sql, [["John"]]);
    }
}

#[test]
fn test_left_join_with_rows_in_right_table() {
    let mut ctx = setup_test();
    ctx.empty("TableA");
    ctx.exec("INSERT INTO TableB VALUES ('John')");

    for sql in [
        "SELECT name FROM TableA LEFT JOIN TableB",
        "SELECT name FROM TableA LEFT OUTER JOIN TableB",
    ] {
        let result = ctx.heuristic(sql);
        assert!(!result.truthness.is_true());
        assert_close(result.truthness.of_true(), C);
        assert_eq!(
            result.rows.columns(),
            &[ColumnDescriptor::table_column("name", "tablea")]
        );
        assert!(result.rows.is_empty());
    }
}

#[test]
fn test_right_join_with_rows_in_right_table() {
    let mut ctx = setup_test();
    ctx.empty("TableA");
    ctx.exec("INSERT INTO TableB VALUES ('John')");

    for sql in [
        "SELECT name FROM TableA RIGHT JOIN TableB",
        "SELECT name FROM TableA RIGHT OUTER JOIN TableB",
    ] {
        let result = ctx.heuristic(sql);
        assert!(result.truthness.is_true());
        // The unqualified name resolves to the first declared table, whose
        // side of the row is padded.
        assert_eq!(
            result.rows.columns(),
            &[ColumnDescriptor::table_column("name", "tablea")]
        );
        assert_rows!(ctx, sql, [[Value::Null]]);
    }
    assert_rows!(ctx, "SELECT TableB.name FROM TableA RIGHT JOIN TableB", [["John"]]);
}

#[test]
fn test_right_join_with_rows_in_left_table() {
    let mut ctx = setup_test();
    ctx.exec("INSERT INTO TableA VALUES ('John')");
    ctx.empty("TableB");

    for sql in [
        "SELECT name FROM TableA RIGHT JOIN TableB",
        "SELECT name FROM TableA RIGHT OUTER JOIN TableB",
    ] {
        let result = ctx.heuristic(sql);
        assert!(!result.truthness.is_true());
        assert_close(result.truthness.of_true(), C);
        assert!(result.rows.is_empty());
    }
}

#[test]
fn test_cross_join() {
    let mut ctx = setup_test();
    ctx.empty("TableA");
    ctx.empty("TableB");

    let result = ctx.heuristic("SELECT name FROM TableA CROSS JOIN TableB");
    assert_close(result.truthness.of_true(), C);
    assert_eq!(
        result.rows.columns(),
        &[ColumnDescriptor::table_column("name", "tablea")]
    );
    assert!(result.rows.is_empty());

    ctx.exec("INSERT INTO TableA VALUES ('John')");
    let result = ctx.heuristic("SELECT name FROM TableA CROSS JOIN TableB");
    assert_close(result.truthness.of_true(), C);

    ctx.exec("INSERT INTO TableB VALUES ('Jack')");
    let result = ctx.heuristic("SELECT name FROM TableA CROSS JOIN TableB");
    assert!(result.truthness.is_true());
    assert_rows!(ctx, "SELECT name FROM TableA CROSS JOIN TableB", [["John"]]);
    assert_rows!(ctx, "SELECT TableA.name, TableB.name FROM TableA, TableB", [["John", "Jack"]]);

    setup_company(&mut ctx);
    let sql = "SELECT Employees.name, Departments.department_name FROM Employees CROSS JOIN Departments";
    let result = ctx.heuristic(sql);
    assert!(result.truthness.is_true());
    assert_eq!(result.rows.columns(), name_and_department().as_slice());
    assert_rows!(ctx, sql, [["John", "Sales"]]);
}

#[test]
fn test_inner_join() {
    let mut ctx = setup_test();
    setup_company(&mut ctx);

    let sql = "SELECT Employees.name, Departments.department_name \
               FROM Employees JOIN Departments ON Employees.department_id = Departments.department_id";
    let result = ctx.heuristic(sql);
    assert!(result.truthness.is_true());
    assert_eq!(result.rows.columns(), name_and_department().as_slice());
    assert_rows!(ctx, sql, [["John", "Sales"]]);

    let sql = "SELECT e.name, d.department_name \
               FROM Employees e INNER JOIN Departments d ON e.department_id = d.department_id";
    assert_eq!(ctx.distance(sql).distance, 0.0);
    assert_rows!(ctx, sql, [["John", "Sales"]]);
}

#[test]
fn test_inner_join_without_matches() {
    let mut ctx = setup_test();
    ctx.exec("INSERT INTO Employees (name, department_id) VALUES ('John', 2)");
    ctx.exec("INSERT INTO Departments VALUES (1, 'Sales')");

    let result = ctx.heuristic(
        "SELECT name FROM Employees JOIN Departments ON Employees.department_id = Departments.department_id",
    );
    assert!(result.rows.is_empty());
    // The best pair misses by one: 0.5 lifted above partial credit.
    assert_close(result.truthness.of_true(), C + (1.0 - C) * 0.5);

    // Only an empty side leaves the join with partial credit.
    ctx.empty("Departments");
    let result = ctx.heuristic(
        "SELECT name FROM Employees JOIN Departments ON Employees.department_id = Departments.department_id",
    );
    assert_close(result.truthness.of_true(), C);
}

#[test]
fn test_inner_join_prefers_closer_keys() {
    let sql = "SELECT e.name FROM Employees e JOIN Departments d ON e.department_id = d.department_id";
    let truthness_for = |department_id: i64| {
        let mut ctx = setup_test();
        ctx.exec(&format!(
            "INSERT INTO Employees (name, department_id) VALUES ('John', {})",
            department_id
        ));
        ctx.exec("INSERT INTO Departments VALUES (1, 'Sales')");
        ctx.heuristic(sql).truthness
    };

    let near = truthness_for(2);
    let far = truthness_for(1000);
    assert!(!near.is_true() && !far.is_true());
    assert!(near.of_true() > far.of_true(), "{} vs {}", near, far);
    assert!(far.of_true() > C);
    assert!(truthness_for(1).is_true());
}

#[test]
fn test_many_inner_joins() {
    let mut ctx = setup_test();
    setup_company(&mut ctx);

    let sql = "SELECT Employees.name, Departments.department_name, Projects.project_name \
               FROM Employees \
               JOIN Departments ON Employees.department_id = Departments.department_id \
               JOIN Projects ON Employees.project_id = Projects.project_id";
    let result = ctx.heuristic(sql);
    assert!(result.truthness.is_true());
    assert_eq!(
        result.rows.columns()[2],
        ColumnDescriptor::table_column("project_name", "projects")
    );
    assert_rows!(ctx, sql, [["John", "Sales", "ProjectX"]]);
}

#[test]
fn test_outer_joins_with_predicate() {
    let mut ctx = setup_test();
    ctx.exec("INSERT INTO Employees (name, department_id) VALUES ('John', 1)");
    ctx.empty("Departments");

    let sql = "SELECT Employees.name, Departments.department_name \
               FROM Employees LEFT JOIN Departments ON Employees.department_id = Departments.department_id";
    let result = ctx.heuristic(sql);
    assert!(result.truthness.is_true());
    assert_eq!(result.rows.columns(), name_and_department().as_slice());
    assert_rows!(ctx, sql, [["John", Value::Null]]);

    let mut ctx = setup_test();
    ctx.empty("Employees");
    ctx.exec("INSERT INTO Departments VALUES (1, 'Sales')");

    let sql = "SELECT Employees.name, Departments.department_name \
               FROM Employees RIGHT JOIN Departments ON Employees.department_id = Departments.department_id";
    let result = ctx.heuristic(sql);
    assert!(result.truthness.is_true());
    assert_rows!(ctx, sql, [[Value::Null, "Sales"]]);
}

#[test]
fn test_full_join() {
    let mut ctx = setup_test();
    ctx.exec("INSERT INTO Employees (name, department_id) VALUES ('John', 1), ('Jane', 3)");
    ctx.exec("INSERT INTO Departments VALUES (1, 'Sales'), (2, 'Marketing')");

    let sql = "SELECT Employees.name, Departments.department_name \
               FROM Employees FULL OUTER JOIN Departments \
               ON Employees.department_id = Departments.department_id";
    assert!(ctx.heuristic(sql).truthness.is_true());
    assert_rows!(
        ctx,
        sql,
        [
            ["John", "Sales"],
            ["Jane", Value::Null],
            [Value::Null, "Marketing"],
        ]
    );

    let mut ctx = setup_test();
    ctx.empty("TableA");
    ctx.empty("TableB");
    let result = ctx.heuristic("SELECT name FROM TableA FULL JOIN TableB");
    assert_close(result.truthness.of_true(), C);
}

#[test]
fn test_self_join() {
    let mut ctx = setup_test();
    ctx.exec(
        "INSERT INTO Categories (id, name, parent_id) VALUES \
         (1, 'Electronics', NULL), \
         (2, 'Computers', 1), \
         (3, 'Laptops', 2), \
         (4, 'Phones', 1), \
         (5, 'Accessories', 2)",
    );

    let sql = "SELECT child.name AS category, parent.name AS parent_category \
               FROM categories child \
               LEFT JOIN categories parent ON child.parent_id = parent.id;";
    let result = ctx.heuristic(sql);
    assert_eq!(
        result.rows.columns(),
        &[
            ColumnDescriptor::new(Some("name"), Some("category"), Some("categories"), None),
            ColumnDescriptor::new(Some("name"), Some("parent_category"), Some("categories"), None),
        ]
    );
    assert_rows!(
        ctx,
        sql,
        [
            ["Electronics", Value::Null],
            ["Computers", "Electronics"],
            ["Laptops", "Computers"],
            ["Phones", "Electronics"],
            ["Accessories", "Computers"],
        ]
    );
}

#[test]
fn test_qualified_wildcard_keeps_alias() {
    let mut ctx = setup_test();
    ctx.exec(
        "INSERT INTO Employees VALUES ('John Doe', 'John', NULL, 1, 50000)",
    );
    ctx.exec("INSERT INTO Projects VALUES (1, 'ProjectX')");

    let sql = "SELECT e.* FROM employees e LEFT JOIN projects p ON e.project_id = p.project_id";
    let result = ctx.heuristic(sql);
    let columns: Vec<_> = ["name", "first_name", "department_id", "project_id", "salary"]
        .into_iter()
        .map(|c| ColumnDescriptor::new(Some(c), Some(c), Some("employees"), Some("e")))
        .collect();
    assert_eq!(result.rows.columns(), columns.as_slice());
    assert_rows!(ctx, sql, [["John Doe", "John", Value::Null, 1, 50000]]);
}

#[test]
fn test_join_counts_scored_pairs() {
    let mut ctx = setup_test();
    ctx.exec("INSERT INTO TableA VALUES ('a'), ('b')");
    ctx.exec("INSERT INTO TableB VALUES ('b'), ('c'), ('d')");

    let metrics = ctx.distance("SELECT TableA.name FROM TableA JOIN TableB ON TableA.name = TableB.name");
    assert_eq!(metrics.distance, 0.0);
    assert_eq!(metrics.evaluated_rows, 6);

    // Without a predicate nothing is scored.
    let metrics = ctx.distance("SELECT TableA.name FROM TableA JOIN TableB");
    assert_eq!(metrics.evaluated_rows, 0);
}
