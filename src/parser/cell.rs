use std::sync::LazyLock;

use regex::Regex;

static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());
static ROOM_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{3}").unwrap());

/// Gym ("спортзал") and assembly hall ("актовый зал") short forms.
const HALL_TOKENS: &[&str] = &["с/з", "а/з"];

pub const SUBJECT_PLACEHOLDER: &str = "Не указан";

/// Instructor surname, optionally with initials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKey {
    display: String,
    needle: String,
}

impl SearchKey {
    pub fn parse(raw: &str) -> Option<Self> {
        let display = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if display.is_empty() {
            return None;
        }
        let needle = display.to_lowercase();
        Some(SearchKey { display, needle })
    }

    pub fn matches(&self, line: &str) -> bool {
        line.to_lowercase().contains(&self.needle)
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }
}

/// The fields one cell contributes to a schedule entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMatch {
    pub subject: String,
    pub instructor_line: String,
    pub rooms: Vec<String>,
}

/// Classify a cell's lines as subject / instructor / rooms.
pub fn extract(cell_text: &str, key: &SearchKey) -> Option<CellMatch> {
    let lines = split_lines(cell_text);
    let at = find_instructor_line(&lines, key)?;

    Some(CellMatch {
        subject: subject_from(&lines[..at]),
        instructor_line: lines[at].to_string(),
        rooms: rooms_from(&lines[at + 1..]),
    })
}

pub(crate) fn split_lines(cell_text: &str) -> Vec<&str> {
    cell_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// First line naming the key that has no digits once initials' dots are gone.
pub(crate) fn find_instructor_line(lines: &[&str], key: &SearchKey) -> Option<usize> {
    lines
        .iter()
        .position(|line| key.matches(line) && !DIGIT_RE.is_match(&line.replace('.', "")))
}

pub(crate) fn subject_from(above: &[&str]) -> String {
    if above.is_empty() {
        SUBJECT_PLACEHOLDER.to_string()
    } else {
        above.join(" ")
    }
}

pub(crate) fn rooms_from(below: &[&str]) -> Vec<String> {
    below
        .iter()
        .filter(|l| is_room(l))
        .map(|l| l.to_string())
        .collect()
}

pub(crate) fn is_room(line: &str) -> bool {
    ROOM_NUMBER_RE.is_match(line) || HALL_TOKENS.iter().any(|t| line.contains(t))
}

// ── Tests ──
