// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! In-memory alumni table and the engines that reshape it: search, sort,
//! CSV export and row selection.
//!
//! A [`Table`] owns every row for the lifetime of a session. Engines never
//! create or drop rows; they reorder them, flip their `visible` flag, or flip
//! their `selected` flag.

pub mod error;
pub mod export;
pub mod filter;
pub mod selection;
pub mod sort;

use alumni_app::{COLUMN_COUNT, ColumnKey, RowId, SortDirection};
use tracing::debug;

pub use error::ExportError;
pub use export::{EXPORT_FILE_NAME, encode_csv, export_csv};
pub use filter::{filter, row_matches};
pub use selection::toggle_selection;
pub use sort::{SortState, compare_rows, locale_cmp, parse_serial, sort, sort_announcement};

pub type Cells = [String; COLUMN_COUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: ColumnKey,
    pub label: &'static str,
}

pub const COLUMNS: [Column; COLUMN_COUNT] = [
    Column {
        key: ColumnKey::SrNo,
        label: ColumnKey::SrNo.label(),
    },
    Column {
        key: ColumnKey::Name,
        label: ColumnKey::Name.label(),
    },
    Column {
        key: ColumnKey::Role,
        label: ColumnKey::Role.label(),
    },
    Column {
        key: ColumnKey::Company,
        label: ColumnKey::Company.label(),
    },
    Column {
        key: ColumnKey::Domain,
        label: ColumnKey::Domain.label(),
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: RowId,
    cells: Cells,
    selected: bool,
    visible: bool,
}

impl Row {
    pub fn new(id: RowId, cells: Cells) -> Self {
        Self {
            id,
            cells,
            selected: false,
            visible: true,
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, key: ColumnKey) -> &str {
        &self.cells[key.index()]
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// One user-triggered table operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOp {
    Search(String),
    ActivateHeader(ColumnKey),
    Sort {
        key: ColumnKey,
        direction: SortDirection,
    },
    Export,
    ToggleSelection(RowId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    Filtered {
        visible: usize,
    },
    Sorted {
        key: ColumnKey,
        direction: SortDirection,
        announcement: String,
    },
    Exported {
        payload: Vec<u8>,
        rows: usize,
    },
    ExportFailed(ExportError),
    Toggled {
        id: RowId,
        selected: bool,
    },
    UnknownRow(RowId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    rows: Vec<Row>,
    sort: SortState,
    query: String,
}

impl Table {
    /// Builds a table from records in display order. Ids are assigned by
    /// position and never change afterwards.
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Cells>,
    {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, cells)| Row::new(RowId::new(index), cells))
            .collect();
        Self {
            rows,
            sort: SortState::default(),
            query: String::new(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().count()
    }

    pub fn selected_count(&self) -> usize {
        self.rows.iter().filter(|row| row.selected).count()
    }

    pub fn dispatch(&mut self, op: TableOp) -> TableOutcome {
        match op {
            TableOp::Search(query) => TableOutcome::Filtered {
                visible: self.apply_query(&query),
            },
            TableOp::ActivateHeader(key) => {
                let direction = self.sort.activate(key);
                self.sorted_outcome(key, direction)
            }
            TableOp::Sort { key, direction } => {
                self.sort.set(key, direction);
                self.sorted_outcome(key, direction)
            }
            TableOp::Export => match self.export_csv() {
                Ok(payload) => TableOutcome::Exported {
                    payload,
                    rows: self.visible_count(),
                },
                Err(error) => TableOutcome::ExportFailed(error),
            },
            TableOp::ToggleSelection(id) => match self.toggle_selection(id) {
                Some(selected) => TableOutcome::Toggled { id, selected },
                None => TableOutcome::UnknownRow(id),
            },
        }
    }

    fn sorted_outcome(&mut self, key: ColumnKey, direction: SortDirection) -> TableOutcome {
        self.apply_sort(key, direction);
        TableOutcome::Sorted {
            key,
            direction,
            announcement: sort_announcement(key, direction),
        }
    }

    /// Recomputes visibility against every row, not only the rows the previous
    /// query left visible. Returns the number of visible rows.
    pub fn apply_query(&mut self, query: &str) -> usize {
        self.query = query.to_owned();
        let needle = query.to_lowercase();
        let mut visible = 0;
        for row in &mut self.rows {
            row.visible = row_matches(row, &needle);
            if row.visible {
                visible += 1;
            }
        }
        debug!(query, visible, total = self.rows.len(), "applied search");
        visible
    }

    /// Reorders the full row sequence, hidden rows included, so clearing the
    /// query later shows everything in the active order.
    pub fn apply_sort(&mut self, key: ColumnKey, direction: SortDirection) {
        self.rows
            .sort_by(|left, right| compare_rows(key, direction, left, right));
        debug!(
            key = key.as_str(),
            direction = direction.label(),
            "applied sort"
        );
    }

    pub fn export_csv(&self) -> Result<Vec<u8>, ExportError> {
        export_csv(self)
    }

    pub fn toggle_selection(&mut self, id: RowId) -> Option<bool> {
        let row = self.rows.iter_mut().find(|row| row.id == id)?;
        Some(toggle_selection(row))
    }
}
