pub mod cell;
pub mod header;
pub mod walker;

use serde::Serialize;

pub use cell::SearchKey;
pub use walker::walk_document;

/// One class of the searched instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub group: String,
    pub slot: u32,
    pub subject: String,
    /// Full matched line, co-instructors and initials included.
    pub instructor_line: String,
    pub rooms: Vec<String>,
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::source::{JsonSource, TableSource};

    fn find(key: &str) -> Vec<ScheduleEntry> {
        let doc = JsonSource::from_path("tests/fixtures/schedule.json").load().unwrap();
        walk_document(&doc, &SearchKey::parse(key).unwrap(), &Settings::default())
    }

    #[test]
    fn fixture_petrov() {
        let entries = find("Петров");
        let got: Vec<_> = entries
            .iter()
            .map(|e| (e.slot, e.group.as_str(), e.subject.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                (1, "3К9091", "Математический анализ"),
                (2, "3К9092", "Не указан"),
                (3, "3К9091", "Физическая культура"),
                (4, "4К1011", "Теория вероятностей"),
            ]
        );
        assert_eq!(entries[0].rooms, vec!["ауд. 204"]);
        assert!(entries[1].rooms.is_empty());
        assert_eq!(entries[2].rooms, vec!["с/з"]);
        assert_eq!(entries[3].instructor_line, "Петров И.И., Сидорова А.А.");
    }

    #[test]
    fn fixture_initials_narrow_the_match() {
        assert!(find("Петров А.В.").is_empty());
        assert_eq!(find("петров и.и.").len(), 4);
    }

    #[test]
    fn fixture_other_instructor() {
        let entries = find("Сидорова");
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.instructor_line.contains("Сидорова")));
    }

    #[test]
    fn fixture_unknown_instructor() {
        assert!(find("Иванов").is_empty());
    }
}
