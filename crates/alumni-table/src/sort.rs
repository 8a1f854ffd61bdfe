// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use alumni_app::{ColumnKey, SortDirection};
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::Row;

/// Active header and its direction. Only one column sorts at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub active: Option<ColumnKey>,
    pub direction: SortDirection,
}

impl SortState {
    /// Header activation: a new column starts ascending, the active column
    /// flips direction.
    pub fn activate(&mut self, key: ColumnKey) -> SortDirection {
        let direction = match self.active {
            Some(active) if active == key => self.direction.flipped(),
            _ => SortDirection::Asc,
        };
        self.set(key, direction);
        direction
    }

    pub fn set(&mut self, key: ColumnKey, direction: SortDirection) {
        self.active = Some(key);
        self.direction = direction;
    }

    pub fn direction_for(&self, key: ColumnKey) -> Option<SortDirection> {
        (self.active == Some(key)).then_some(self.direction)
    }
}

pub fn sort_announcement(key: ColumnKey, direction: SortDirection) -> String {
    format!("Sorted by {} in {} order", key.as_str(), direction.label())
}

/// Stable sort by one column. Rows with equal keys keep their input order in
/// either direction.
pub fn sort<'a, I>(rows: I, key: ColumnKey, direction: SortDirection) -> Vec<&'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut sorted = rows.into_iter().collect::<Vec<_>>();
    sorted.sort_by(|left, right| compare_rows(key, direction, left, right));
    sorted
}

pub fn compare_rows(
    key: ColumnKey,
    direction: SortDirection,
    left: &Row,
    right: &Row,
) -> Ordering {
    let order = compare_cells(key, left.cell(key), right.cell(key));
    match direction {
        SortDirection::Asc => order,
        SortDirection::Desc => order.reverse(),
    }
}

pub fn compare_cells(key: ColumnKey, left: &str, right: &str) -> Ordering {
    if key.is_numeric() {
        // `None < Some(_)`, so unparsable serials sort as smallest.
        parse_serial(left).cmp(&parse_serial(right))
    } else {
        locale_cmp(left, right)
    }
}

/// Lenient integer parse: leading whitespace, an optional sign, then leading
/// ASCII digits. Anything after the digits is ignored. Values beyond `i64`
/// saturate.
pub fn parse_serial(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digit_len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if digit_len == 0 {
        return None;
    }

    let magnitude = digits[..digit_len].bytes().fold(0_i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Dictionary-style text order. Letters compare without accents or case
/// first, so `Émile` sits among the `E`s. Ties go to the unaccented form,
/// then to lowercase at the first differing letter, then to raw code points.
pub fn locale_cmp(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(base_letters(right))
        .then_with(|| accented_letters(left).cmp(accented_letters(right)))
        .then_with(|| case_cmp(left, right))
        .then_with(|| left.cmp(right))
}

fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
}

fn accented_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().flat_map(char::to_lowercase)
}

fn case_cmp(left: &str, right: &str) -> Ordering {
    for (l, r) in left.chars().zip(right.chars()) {
        if l == r {
            continue;
        }
        match (l.is_lowercase(), r.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
