use anyhow::Result;
use clap::ValueEnum;

use crate::parser::ScheduleEntry;

pub const ROOMS_PLACEHOLDER: &str = "Не указана";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One chat-style block per class
    Message,
    /// Compact fixed-width overview
    Table,
    /// Pretty-printed JSON
    Json,
}

pub fn render(entries: &[ScheduleEntry], format: Format) -> Result<String> {
    Ok(match format {
        Format::Message => entries.iter().map(message).collect::<Vec<_>>().join("\n\n"),
        Format::Table => table(entries),
        Format::Json => serde_json::to_string_pretty(entries)?,
    })
}

pub fn rooms_text(entry: &ScheduleEntry) -> String {
    if entry.rooms.is_empty() {
        ROOMS_PLACEHOLDER.to_string()
    } else {
        entry.rooms.join(", ")
    }
}

pub fn message(entry: &ScheduleEntry) -> String {
    format!(
        "👤 {}\n👥 Группа: {}\n⏰ Пара: {}\n📘 {}\n🏫 {}",
        entry.instructor_line,
        entry.group,
        entry.slot,
        entry.subject,
        rooms_text(entry)
    )
}

fn table(entries: &[ScheduleEntry]) -> String {
    let mut out = format!(
        "{:>4} | {:<10} | {:<32} | {:<16} | {:<24}\n",
        "Slot", "Group", "Subject", "Rooms", "Instructor"
    );
    out.push_str(&"-".repeat(98));
    for e in entries {
        out.push('\n');
        out.push_str(&format!(
            "{:>4} | {:<10} | {:<32} | {:<16} | {:<24}",
            e.slot,
            truncate(&e.group, 10),
            truncate(&e.subject, 32),
            truncate(&rooms_text(e), 16),
            truncate(&e.instructor_line, 24),
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rooms: &[&str]) -> ScheduleEntry {
        ScheduleEntry {
            group: "3К9091".into(),
            slot: 2,
            subject: "Математика".into(),
            instructor_line: "Петров И.И.".into(),
            rooms: rooms.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn message_block() {
        assert_eq!(
            message(&entry(&["204", "с/з"])),
            "👤 Петров И.И.\n👥 Группа: 3К9091\n⏰ Пара: 2\n📘 Математика\n🏫 204, с/з"
        );
    }

    #[test]
    fn empty_rooms_render_placeholder() {
        assert_eq!(rooms_text(&entry(&[])), ROOMS_PLACEHOLDER);
        assert!(message(&entry(&[])).ends_with("🏫 Не указана"));
    }

    #[test]
    fn messages_separated_by_blank_line() {
        let out = render(&[entry(&[]), entry(&["101"])], Format::Message).unwrap();
        assert_eq!(out.matches("\n\n").count(), 1);
    }

    #[test]
    fn json_keeps_rooms_as_list() {
        let out = render(&[entry(&["101"])], Format::Json).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v[0]["slot"], 2);
        assert_eq!(v[0]["rooms"][0], "101");
        assert_eq!(v[0]["instructor_line"], "Петров И.И.");
    }

    #[test]
    fn table_truncates_long_fields() {
        let mut e = entry(&["101"]);
        e.subject = "Очень длинное название дисциплины для проверки".into();
        let out = render(&[e], Format::Table).unwrap();
        let row = out.lines().nth(2).unwrap();
        assert!(row.contains("..."));
        assert!(row.starts_with("   2 | 3К9091"));
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("Петров", 6), "Петров");
        assert_eq!(truncate("Петрович", 6), "Пет...");
    }
}
