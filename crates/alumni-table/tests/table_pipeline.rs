// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use alumni_app::{ColumnKey, RowId, SortDirection};
use alumni_table::{ExportError, Table, TableOp, TableOutcome, filter};
use alumni_testkit::{AlumniFaker, fixture_roster};
use anyhow::{Result, bail};

fn visible_column(table: &Table, key: ColumnKey) -> Vec<String> {
    table
        .visible_rows()
        .map(|row| row.cell(key).to_owned())
        .collect()
}

#[test]
fn search_sort_export_round_trip_on_fixture() -> Result<()> {
    let mut table = Table::new(fixture_roster());

    assert_eq!(
        table.dispatch(TableOp::Search("INITECH".to_owned())),
        TableOutcome::Filtered { visible: 2 }
    );
    table.dispatch(TableOp::ActivateHeader(ColumnKey::SrNo));
    assert_eq!(visible_column(&table, ColumnKey::SrNo), vec!["2", "3"]);

    let TableOutcome::Exported { payload, rows } = table.dispatch(TableOp::Export) else {
        bail!("export of a non-empty view should succeed");
    };
    assert_eq!(rows, 2);
    let text = String::from_utf8(payload)?;
    assert_eq!(
        text,
        concat!(
            "\"Sr. No.\",\"Name\",\"Role\",\"Company\",\"Domain\"\n",
            "\"2\",\"Bob \"\"Bobby\"\" Reed\",\"Designer\",\"Initech\",\"Product\"\n",
            "\"3\",\"Carol Diaz\",\"Engineer\",\"Initech\",\"Software\"\n",
        )
    );
    Ok(())
}

#[test]
fn non_numeric_serial_sorts_first_ascending() {
    let mut table = Table::new(fixture_roster());
    table.dispatch(TableOp::ActivateHeader(ColumnKey::SrNo));
    assert_eq!(
        visible_column(&table, ColumnKey::SrNo),
        vec!["n/a", "1", "2", "3", "10"]
    );

    table.dispatch(TableOp::ActivateHeader(ColumnKey::SrNo));
    assert_eq!(
        visible_column(&table, ColumnKey::SrNo),
        vec!["10", "3", "2", "1", "n/a"]
    );
}

#[test]
fn export_after_search_with_no_hits_reports_no_data() {
    let mut table = Table::new(fixture_roster());
    table.dispatch(TableOp::Search("zzz".to_owned()));
    assert_eq!(
        table.dispatch(TableOp::Export),
        TableOutcome::ExportFailed(ExportError::NoData)
    );
}

#[test]
fn filter_matches_visible_flags_for_generated_roster() {
    let mut faker = AlumniFaker::new(11);
    let mut table = Table::new(faker.roster_cells(60));

    for query in ["eng", "INC", "a", "zz", ""] {
        let expected = filter(&table, query)
            .into_iter()
            .map(|row| row.id())
            .collect::<Vec<_>>();
        table.apply_query(query);
        let actual = table.visible_rows().map(|row| row.id()).collect::<Vec<_>>();
        assert_eq!(actual, expected, "query {query:?}");
    }
}

#[test]
fn selection_and_row_count_survive_a_session() {
    let mut faker = AlumniFaker::new(5);
    let mut table = Table::new(faker.roster_cells(30));
    let picked = [RowId::new(1), RowId::new(7), RowId::new(29)];
    for id in picked {
        table.dispatch(TableOp::ToggleSelection(id));
    }

    table.dispatch(TableOp::Search("e".to_owned()));
    table.dispatch(TableOp::Sort {
        key: ColumnKey::Company,
        direction: SortDirection::Desc,
    });
    table.dispatch(TableOp::ActivateHeader(ColumnKey::Name));
    table.dispatch(TableOp::Search(String::new()));

    assert_eq!(table.len(), 30);
    assert_eq!(table.visible_count(), 30);
    let mut selected = table
        .rows()
        .iter()
        .filter(|row| row.is_selected())
        .map(|row| row.id())
        .collect::<Vec<_>>();
    selected.sort();
    assert_eq!(selected, picked.to_vec());
}

#[test]
fn repeated_operations_are_idempotent() {
    let mut table = Table::new(fixture_roster());
    table.dispatch(TableOp::Sort {
        key: ColumnKey::Name,
        direction: SortDirection::Asc,
    });
    let once = table.clone();
    table.dispatch(TableOp::Sort {
        key: ColumnKey::Name,
        direction: SortDirection::Asc,
    });
    assert_eq!(table, once);

    table.apply_query("o");
    let filtered = table.clone();
    table.apply_query("o");
    assert_eq!(table, filtered);
}
