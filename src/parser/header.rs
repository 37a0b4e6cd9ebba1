use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::source::Table;

const SLOT_WORD: &str = "пара";

static SLOT_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*пара").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    /// Built from `<n> пара` labels of a header row.
    Header,
    /// Identity fallback `1..=max_slots`.
    Positional,
}

/// Column index → slot number for one table.
#[derive(Debug, Clone)]
pub struct SlotMapping {
    kind: MappingKind,
    slots: BTreeMap<usize, u32>,
}

impl SlotMapping {
    pub fn positional(max_slots: u32) -> Self {
        let slots = (1..=max_slots).map(|n| (n as usize, n)).collect();
        SlotMapping {
            kind: MappingKind::Positional,
            slots,
        }
    }

    /// Maps every cell labelled `<n> пара` to `n`. Returns `None` when no
    /// cell carries a label.
    pub fn from_header(row: &[Option<String>]) -> Option<Self> {
        let slots: BTreeMap<usize, u32> = row
            .iter()
            .enumerate()
            .filter_map(|(col, cell)| {
                let caps = SLOT_LABEL_RE.captures(cell.as_deref()?)?;
                let slot = caps[1].parse().ok()?;
                Some((col, slot))
            })
            .collect();

        if slots.is_empty() {
            None
        } else {
            Some(SlotMapping {
                kind: MappingKind::Header,
                slots,
            })
        }
    }

    /// Never fails: unmapped columns resolve to their own index.
    pub fn slot_for(&self, col: usize) -> u32 {
        self.slots.get(&col).copied().unwrap_or(col as u32)
    }

    pub fn kind(&self) -> MappingKind {
        self.kind
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.slots.iter().map(|(&col, &slot)| (col, slot))
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedHeader {
    pub mapping: SlotMapping,
    pub header_row: Option<usize>,
}

impl ResolvedHeader {
    /// First row that may hold data.
    pub fn data_start(&self) -> usize {
        self.header_row.map_or(0, |i| i + 1)
    }
}

pub fn resolve(table: &Table, max_slots: u32) -> ResolvedHeader {
    let header_row = table.rows.iter().position(|row| {
        row.iter()
            .flatten()
            .any(|cell| cell.contains(SLOT_WORD))
    });

    // A header row without numbered labels still counts as the header
    let mapping = header_row
        .and_then(|i| SlotMapping::from_header(&table.rows[i]))
        .unwrap_or_else(|| SlotMapping::positional(max_slots));

    ResolvedHeader {
        mapping,
        header_row,
    }
}

// ── Tests ──
