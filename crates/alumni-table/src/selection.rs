// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Row;

/// Flips the row's selection flag and returns the new value.
pub fn toggle_selection(row: &mut Row) -> bool {
    row.selected = !row.selected;
    row.selected
}

#[cfg(test)]
mod tests {
    use super::toggle_selection;
    use crate::Row;
    use alumni_app::RowId;

    fn row() -> Row {
        Row::new(
            RowId::new(4),
            [
                "5".to_owned(),
                "Katherine Johnson".to_owned(),
                "Mathematician".to_owned(),
                "NASA".to_owned(),
                "Aerospace".to_owned(),
            ],
        )
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut row = row();
        let original = row.is_selected();
        assert!(toggle_selection(&mut row));
        assert!(!toggle_selection(&mut row));
        assert_eq!(row.is_selected(), original);
    }

    #[test]
    fn toggle_leaves_cells_and_visibility_alone() {
        let mut row = row();
        let before = row.cells().to_vec();
        toggle_selection(&mut row);
        assert_eq!(row.cells(), before.as_slice());
        assert!(row.is_visible());
        assert_eq!(row.id(), RowId::new(4));
    }
}
