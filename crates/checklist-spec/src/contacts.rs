//! Best-effort extraction of `(name, email)` pairs from pasted tabular text.
//!
//! Rows with at least [`MIN_COLUMNS`] columns are read positionally (name in
//! column 3, email in column 4, ignore flag in column 8). Blank cells still
//! count as columns. Shorter lines fall back to scanning the raw text for the
//! first email address.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum column count for the positional layout.
pub const MIN_COLUMNS: usize = 8;

const NAME_COLUMN: usize = 2;
const EMAIL_COLUMN: usize = 3;
const IGNORE_COLUMN: usize = 7;
const IGNORE_FLAG: &str = "sim";
const NAME_PUNCTUATION: &[char] = &[',', ';', ':', '|', '<', '>', '(', ')', '{', '}', '[', ']'];

static COLUMN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\t|\s{2,}").expect("column separator regex"));
static EMAIL_SEARCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email search regex")
});
static EMAIL_EXACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email exact regex")
});

/// A validated contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Returns true when `email` is a conventional `local@domain.tld` address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_EXACT.is_match(email)
}

fn non_blank_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('\n').filter(|line| !line.trim().is_empty())
}

fn split_columns(line: &str) -> impl Iterator<Item = &str> {
    COLUMN_SEPARATOR.split(line).map(str::trim)
}

fn is_ignore_flag(value: &str) -> bool {
    value.trim().to_lowercase() == IGNORE_FLAG
}

/// Extracts every qualifying contact, preserving line order.
///
/// Duplicate pairs are kept. Lines that cannot produce a contact are skipped
/// without error.
pub fn extract_contacts(raw: &str) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for (index, line) in non_blank_lines(raw).enumerate() {
        let columns: Vec<&str> = split_columns(line).collect();

        let candidate = if columns.len() >= MIN_COLUMNS {
            if is_ignore_flag(columns[IGNORE_COLUMN]) {
                debug!(line = index, "contact row flagged as ignored");
                continue;
            }
            Some(Contact::new(columns[NAME_COLUMN], columns[EMAIL_COLUMN]))
        } else {
            fallback_contact(line)
        };

        match candidate {
            Some(contact)
                if !contact.name.is_empty()
                    && !contact.email.is_empty()
                    && is_valid_email(&contact.email) =>
            {
                contacts.push(contact);
            }
            _ => debug!(line = index, "skipping line without a usable contact"),
        }
    }

    contacts
}

fn fallback_contact(line: &str) -> Option<Contact> {
    let email = EMAIL_SEARCH.find(line)?.as_str();

    let without_email = line.replacen(email, "", 1);
    let stripped: String = without_email
        .trim()
        .chars()
        .filter(|ch| !NAME_PUNCTUATION.contains(ch))
        .collect();
    let mut name = stripped.trim().to_string();

    if name.chars().count() < 2 {
        name = email
            .split_once('@')
            .map(|(local, _)| local)
            .unwrap_or(email)
            .to_string();
    }

    Some(Contact::new(name, email))
}

/// Display state of a parsed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    /// The ignore flag is set.
    Ignored,
    /// Name and email are both present.
    Valid,
    /// Name or email is missing.
    Incomplete,
}

impl RowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Ignored => "ignored",
            RowStatus::Valid => "valid",
            RowStatus::Incomplete => "incomplete",
        }
    }
}

/// Columnar view of one pasted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContactRow {
    /// Trimmed columns, padded with empty strings to at least eight.
    pub columns: Vec<String>,
    pub should_ignore: bool,
    pub name: String,
    pub email: String,
}

impl ContactRow {
    fn from_line(line: &str) -> Self {
        let mut columns: Vec<String> = split_columns(line).map(str::to_string).collect();
        if columns.len() < MIN_COLUMNS {
            columns.resize(MIN_COLUMNS, String::new());
        }
        let should_ignore = is_ignore_flag(&columns[IGNORE_COLUMN]);
        let name = columns[NAME_COLUMN].clone();
        let email = columns[EMAIL_COLUMN].clone();
        Self {
            columns,
            should_ignore,
            name,
            email,
        }
    }

    pub fn status(&self) -> RowStatus {
        if self.should_ignore {
            RowStatus::Ignored
        } else if !self.name.is_empty() && !self.email.is_empty() {
            RowStatus::Valid
        } else {
            RowStatus::Incomplete
        }
    }

    /// The row's contact when it is not ignored and carries a valid email.
    pub fn contact(&self) -> Option<Contact> {
        (self.status() == RowStatus::Valid && is_valid_email(&self.email))
            .then(|| Contact::new(self.name.clone(), self.email.clone()))
    }
}

/// Splits every non-blank line into a positional row, without dropping
/// empty cells.
pub fn parse_contact_rows(raw: &str) -> Vec<ContactRow> {
    non_blank_lines(raw).map(ContactRow::from_line).collect()
}

/// Counters shown next to the parsed table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContactSummary {
    pub valid: usize,
    pub ignored: usize,
    pub total: usize,
}

impl ContactSummary {
    pub fn from_rows(rows: &[ContactRow]) -> Self {
        Self {
            valid: rows
                .iter()
                .filter(|row| !row.should_ignore && !row.email.is_empty())
                .count(),
            ignored: rows.iter().filter(|row| row.should_ignore).count(),
            total: rows.len(),
        }
    }
}

/// Emails joined with `"; "`, ready to paste into a recipient field.
pub fn join_emails(contacts: &[Contact]) -> String {
    contacts
        .iter()
        .map(|contact| contact.email.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// One `"{name} - {email}"` line per contact.
pub fn contact_lines(contacts: &[Contact]) -> String {
    contacts
        .iter()
        .map(|contact| format!("{} - {}", contact.name, contact.email))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_yields_nothing() {
        assert!(extract_contacts("").is_empty());
        assert!(extract_contacts("  \n\t\n   ").is_empty());
    }

    #[test]
    fn columnar_row_uses_third_and_fourth_columns() {
        let contacts = extract_contacts("J.\tSmith\tJane Smith\tjane@x.com\t-\t-\t-\tNão");
        assert_eq!(contacts, vec![Contact::new("Jane Smith", "jane@x.com")]);
    }

    #[test]
    fn ignore_flag_is_case_insensitive() {
        for flag in ["Sim", "sim", "SIM", " sIm "] {
            let line = format!("a\tb\tJane\tjane@x.com\t-\t-\t-\t{}", flag);
            assert!(extract_contacts(&line).is_empty(), "flag {:?}", flag);
        }
    }

    #[test]
    fn ignored_row_is_dropped_even_with_invalid_email() {
        assert!(extract_contacts("a\tb\tJane\tnot-an-email\t-\t-\t-\tSim").is_empty());
    }

    #[test]
    fn columnar_row_with_invalid_email_is_dropped() {
        assert!(extract_contacts("a\tb\tJane\tnot-an-email\t-\t-\t-\tNão").is_empty());
    }

    #[test]
    fn ignore_flag_applies_to_rows_with_blank_cells() {
        let line = "Empresa\t\tJane Smith\tjane@x.com\t-\t-\t-\tSim";
        assert!(extract_contacts(line).is_empty());
        assert_eq!(parse_contact_rows(line)[0].status(), RowStatus::Ignored);
    }

    #[test]
    fn blank_name_or_email_cell_drops_the_row() {
        assert!(extract_contacts("a\tb\t\tjane@x.com\t-\t-\t-\tNão").is_empty());
        assert!(extract_contacts("a\tb\tJane Smith\t\t-\t-\t-\tNão").is_empty());
    }

    #[test]
    fn blank_trailing_cells_keep_the_columnar_layout() {
        let contacts = extract_contacts("Empresa\tCargo\tJane Smith\tjane@x.com\t\t\t\tNão");
        assert_eq!(contacts, vec![Contact::new("Jane Smith", "jane@x.com")]);

        let unflagged = extract_contacts("Empresa\tCargo\tJane Smith\tjane@x.com\t\t\t\t");
        assert_eq!(unflagged, vec![Contact::new("Jane Smith", "jane@x.com")]);
    }

    #[test]
    fn runs_of_spaces_separate_columns() {
        let contacts = extract_contacts("a  b  Jane Doe  jane@doe.org  c  d  e  não");
        assert_eq!(contacts, vec![Contact::new("Jane Doe", "jane@doe.org")]);
    }

    #[test]
    fn fallback_takes_name_from_remaining_text() {
        let contacts = extract_contacts("Maria Silva <maria.silva@empresa.com.br>");
        assert_eq!(
            contacts,
            vec![Contact::new("Maria Silva", "maria.silva@empresa.com.br")]
        );
    }

    #[test]
    fn fallback_uses_local_part_when_name_is_missing() {
        assert_eq!(
            extract_contacts("contato@loja.com"),
            vec![Contact::new("contato", "contato@loja.com")]
        );
        assert_eq!(
            extract_contacts("x; ops@loja.com"),
            vec![Contact::new("ops", "ops@loja.com")]
        );
    }

    #[test]
    fn fallback_skips_lines_without_email() {
        assert!(extract_contacts("just a name\tand a column").is_empty());
    }

    #[test]
    fn order_and_duplicates_are_preserved() {
        let raw = "b@x.com\na@x.com\nb@x.com";
        let emails: Vec<String> = extract_contacts(raw)
            .into_iter()
            .map(|contact| contact.email)
            .collect();
        assert_eq!(emails, vec!["b@x.com", "a@x.com", "b@x.com"]);
    }

    #[test]
    fn rows_are_padded_and_classified() {
        let rows = parse_contact_rows("a\tb\tJane\tjane@x.com\nc\td\t\t\t-\t-\t-\tSim\nonly");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].columns.len(), MIN_COLUMNS);
        assert_eq!(rows[0].status(), RowStatus::Valid);
        assert_eq!(rows[1].status(), RowStatus::Ignored);
        assert_eq!(rows[2].status(), RowStatus::Incomplete);

        let summary = ContactSummary::from_rows(&rows);
        assert_eq!(
            summary,
            ContactSummary {
                valid: 1,
                ignored: 1,
                total: 3
            }
        );
    }

    #[test]
    fn row_contact_requires_valid_email() {
        let rows = parse_contact_rows("a\tb\tJane\tjane-at-x\t-\t-\t-\tNão");
        assert_eq!(rows[0].status(), RowStatus::Valid);
        assert_eq!(rows[0].contact(), None);
    }

    #[test]
    fn joins_emails_and_lines() {
        let contacts = vec![
            Contact::new("Jane", "jane@x.com"),
            Contact::new("John", "john@x.com"),
        ];
        assert_eq!(join_emails(&contacts), "jane@x.com; john@x.com");
        assert_eq!(
            contact_lines(&contacts),
            "Jane - jane@x.com\nJohn - john@x.com"
        );
    }
}
