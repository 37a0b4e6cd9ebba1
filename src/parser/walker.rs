use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use tracing::debug;

use super::cell::{self, SearchKey};
use super::header;
use super::ScheduleEntry;
use crate::settings::Settings;
use crate::source::{Document, Page, Table};

// e.g. 3К9091 (Cyrillic К)
static GROUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\dК\d+").unwrap());

/// Trimmed first cell when it has the group-code shape.
pub(crate) fn group_code(row: &[Option<String>]) -> Option<&str> {
    let first = row.first()?.as_deref()?.trim();
    GROUP_RE.is_match(first).then_some(first)
}

pub fn walk_table(table: &Table, key: &SearchKey, settings: &Settings) -> Vec<ScheduleEntry> {
    if table.len() < settings.min_table_rows {
        debug!(rows = table.len(), "table too short, skipped");
        return Vec::new();
    }

    let resolved = header::resolve(table, settings.max_slots);
    debug!(
        header_row = ?resolved.header_row,
        mapping = ?resolved.mapping.kind(),
        "header resolved"
    );

    let mut entries = Vec::new();
    for (i, row) in table.rows.iter().enumerate().skip(resolved.data_start()) {
        let Some(group) = group_code(row) else {
            debug!(row = i, "not a group row");
            continue;
        };

        for (col, text) in row.iter().enumerate().skip(1) {
            let Some(text) = text else { continue };
            if let Some(m) = cell::extract(text, key) {
                entries.push(ScheduleEntry {
                    group: group.to_string(),
                    slot: resolved.mapping.slot_for(col),
                    subject: m.subject,
                    instructor_line: m.instructor_line,
                    rooms: m.rooms,
                });
            }
        }
    }

    entries
}

/// Entries of one page in discovery order (unsorted).
pub fn walk_page(page: &Page, key: &SearchKey, settings: &Settings) -> Vec<ScheduleEntry> {
    page.tables
        .iter()
        .flat_map(|t| walk_table(t, key, settings))
        .collect()
}

/// All pages in parallel, then a stable sort by slot.
pub fn walk_document(doc: &Document, key: &SearchKey, settings: &Settings) -> Vec<ScheduleEntry> {
    let per_page: Vec<Vec<ScheduleEntry>> = doc
        .pages
        .par_iter()
        .map(|p| walk_page(p, key, settings))
        .collect();

    let mut entries: Vec<ScheduleEntry> = per_page.into_iter().flatten().collect();
    entries.sort_by_key(|e| e.slot);
    entries
}

// ── Tests ──
