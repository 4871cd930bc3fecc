//! Rendering of records for the terminal.
//!
//! Every rendering is keyed by record id, never by list position.

use std::fmt::Write as _;

use crate::config::DisplayConfig;
use crate::record::Record;

/// Decides how passwords are printed.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    reveal: bool,
    mask: char,
}

impl PasswordPolicy {
    /// Build the policy from configuration and the `--show-passwords` flag.
    #[must_use]
    pub fn new(display: &DisplayConfig, show_passwords: bool) -> Self {
        Self {
            reveal: show_passwords || !display.mask_passwords,
            mask: display.mask_char,
        }
    }

    /// A copy of `record` whose password is masked unless revealed.
    #[must_use]
    pub fn apply(self, record: &Record) -> Record {
        if self.reveal {
            return record.clone();
        }
        let mut fields = record.fields.clone();
        fields.password = record.fields.masked_password(self.mask);
        record.with_fields(fields)
    }
}

/// One labelled block per record.
#[must_use]
pub fn plain(records: &[Record], policy: PasswordPolicy) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&block(&policy.apply(record)));
    }
    out
}

/// A single record as a labelled block, with its creation time.
#[must_use]
pub fn block(record: &Record) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}]", record.id);
    if let Some(created) = record.id.created_at() {
        let _ = writeln!(out, "  Created:   {}", created.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    let _ = writeln!(out, "  Name:      {}", record.fields.name);
    let _ = writeln!(out, "  Last name: {}", record.fields.last_name);
    let _ = writeln!(out, "  Email:     {}", record.fields.email);
    let _ = writeln!(out, "  Password:  {}", record.fields.password);
    out
}

/// Records as an aligned table with a header row.
#[must_use]
pub fn table(records: &[Record], policy: PasswordPolicy) -> String {
    let header = ["ID", "NAME", "LAST NAME", "EMAIL", "PASSWORD"].map(str::to_string);
    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|r| policy.apply(r))
        .map(|r| {
            [
                r.id.to_string(),
                r.fields.name,
                r.fields.last_name,
                r.fields.email,
                r.fields.password,
            ]
        })
        .collect();

    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

/// Records as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn json(records: &[Record], policy: PasswordPolicy) -> serde_json::Result<String> {
    let shown: Vec<Record> = records.iter().map(|r| policy.apply(r)).collect();
    serde_json::to_string_pretty(&shown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordFields, RecordId};

    fn records() -> Vec<Record> {
        vec![
            Record::new(
                RecordId::new(1_700_000_000_000),
                RecordFields::new("Ana", "Diaz", "ana@example.com", "secret"),
            ),
            Record::new(
                RecordId::new(1_700_000_000_001),
                RecordFields::new("Bo", "Li", "bo@example.com", "pw"),
            ),
        ]
    }

    fn masked() -> PasswordPolicy {
        PasswordPolicy::new(&DisplayConfig::default(), false)
    }

    #[test]
    fn test_policy_masks_by_default() {
        let shown = masked().apply(&records()[0]);
        assert_eq!(shown.fields.password, "******");
        assert_eq!(shown.id, records()[0].id);
    }

    #[test]
    fn test_policy_reveals_on_flag() {
        let policy = PasswordPolicy::new(&DisplayConfig::default(), true);
        assert_eq!(policy.apply(&records()[0]).fields.password, "secret");
    }

    #[test]
    fn test_policy_reveals_when_masking_disabled() {
        let display = DisplayConfig {
            mask_passwords: false,
            mask_char: '*',
        };
        let policy = PasswordPolicy::new(&display, false);
        assert_eq!(policy.apply(&records()[1]).fields.password, "pw");
    }

    #[test]
    fn test_plain_keys_by_id() {
        let out = plain(&records(), masked());
        assert!(out.contains("[1700000000000]"));
        assert!(out.contains("[1700000000001]"));
        assert!(out.contains("Last name: Diaz"));
        assert!(out.contains("Created:   2023-11-14 22:13:20 UTC"));
        assert!(!out.contains("secret"));
    }

    #[test]
    fn test_plain_empty() {
        assert_eq!(plain(&[], masked()), "");
    }

    #[test]
    fn test_table_aligns_columns() {
        let out = table(&records(), masked());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        let email_col = lines[0].find("EMAIL").unwrap();
        assert_eq!(lines[1].find("ana@example.com"), Some(email_col));
        assert_eq!(lines[2].find("bo@example.com"), Some(email_col));
    }

    #[test]
    fn test_json_masks_and_keeps_shape() {
        let out = json(&records(), masked()).unwrap();
        let parsed: Vec<Record> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].fields.password, "******");
        assert!(out.contains("\"lastName\""));
    }
}
