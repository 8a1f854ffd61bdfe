// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Row, Table};

/// Rows where at least one cell contains `query`, ignoring case, in table
/// order. An empty query keeps every row.
pub fn filter<'a>(table: &'a Table, query: &str) -> Vec<&'a Row> {
    let needle = query.to_lowercase();
    table
        .rows()
        .iter()
        .filter(|row| row_matches(row, &needle))
        .collect()
}

/// `needle` must already be lowercased.
pub fn row_matches(row: &Row, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    row.cells()
        .iter()
        .any(|cell| cell.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::filter;
    use crate::Table;
    use alumni_app::ColumnKey;

    fn table() -> Table {
        Table::new([
            [
                "1".to_owned(),
                "Ada Lovelace".to_owned(),
                "Mathematician".to_owned(),
                "Analytical Engines".to_owned(),
                "Computing".to_owned(),
            ],
            [
                "2".to_owned(),
                "Grace Hopper".to_owned(),
                "Rear Admiral".to_owned(),
                "US Navy".to_owned(),
                "Compilers".to_owned(),
            ],
            [
                "3".to_owned(),
                "Émile Borel".to_owned(),
                "Professor".to_owned(),
                "Sorbonne".to_owned(),
                "Probability".to_owned(),
            ],
        ])
    }

    fn names<'a>(rows: &[&'a crate::Row]) -> Vec<&'a str> {
        rows.iter().map(|row| row.cell(ColumnKey::Name)).collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let table = table();
        let rows = filter(&table, "");
        assert_eq!(rows.len(), table.len());
        assert!(rows.iter().zip(table.rows()).all(|(left, right)| *left == right));
    }

    #[test]
    fn match_is_case_insensitive_substring_of_any_cell() {
        let table = table();
        assert_eq!(names(&filter(&table, "COMP")), vec!["Ada Lovelace", "Grace Hopper"]);
        assert_eq!(names(&filter(&table, "navy")), vec!["Grace Hopper"]);
        assert_eq!(names(&filter(&table, "3")), vec!["Émile Borel"]);
    }

    #[test]
    fn non_ascii_case_folds() {
        let table = table();
        assert_eq!(names(&filter(&table, "émile")), vec!["Émile Borel"]);
    }

    #[test]
    fn no_match_yields_empty_subsequence() {
        let table = table();
        assert!(filter(&table, "zzz").is_empty());
    }

    #[test]
    fn result_is_ordered_subsequence_satisfying_predicate() {
        let table = table();
        for query in ["a", "o", "er", "Pro", " ", "1"] {
            let rows = filter(&table, query);
            let needle = query.to_lowercase();
            let positions = rows
                .iter()
                .map(|row| {
                    table
                        .rows()
                        .iter()
                        .position(|candidate| candidate.id() == row.id())
                        .expect("returned row comes from the table")
                })
                .collect::<Vec<_>>();
            assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
            for row in table.rows() {
                let matches = row
                    .cells()
                    .iter()
                    .any(|cell| cell.to_lowercase().contains(&needle));
                assert_eq!(
                    matches,
                    rows.iter().any(|kept| kept.id() == row.id()),
                    "query {query:?} row {:?}",
                    row.id()
                );
            }
        }
    }
}
