use serde::{Deserialize, Serialize};

use super::raw_row::RawRow;

/// Spreadsheet column headers of the contact template
pub mod columns {
    pub const FULL_NAME: &str = "이름";
    pub const COMPANY_NAME: &str = "회사명";
    pub const POSITION: &str = "직위";
    pub const DEPARTMENT: &str = "부서";
    pub const EMAIL: &str = "이메일";
    pub const PHONE: &str = "전화번호";
    pub const MOBILE: &str = "휴대폰";
    pub const CONTACT_TYPE: &str = "관계유형";
    pub const NOTE: &str = "메모";
}

/// A contact parsed from one spreadsheet row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub last_name: String,
    pub first_name: String,
    pub full_name: String,
    pub company_name_raw: String,
    pub position: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    pub mobile: String,
    pub contact_type: String,
    pub note: String,
    pub source_row_index: usize,
    /// Set by customer mapping; `None` also when no company was given
    pub resolved_customer_id: Option<String>,
}

impl ContactRecord {
    pub fn new(last_name: &str, first_name: &str, source_row_index: usize) -> Self {
        Self {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            full_name: join_name(last_name, first_name),
            source_row_index,
            ..Self::default()
        }
    }

    pub fn from_raw_row(row: &RawRow) -> Self {
        let cell = |header: &str| row.get(header).unwrap_or_default().trim().to_string();

        let full_name = cell(columns::FULL_NAME);
        let (last_name, first_name) = split_full_name(&full_name);

        Self {
            last_name,
            first_name,
            full_name,
            company_name_raw: cell(columns::COMPANY_NAME),
            position: cell(columns::POSITION),
            department: cell(columns::DEPARTMENT),
            email: cell(columns::EMAIL),
            phone: cell(columns::PHONE),
            mobile: cell(columns::MOBILE),
            contact_type: cell(columns::CONTACT_TYPE),
            note: cell(columns::NOTE),
            source_row_index: row.source_row_index(),
            resolved_customer_id: None,
        }
    }

    /// Name used in logs and error reports
    pub fn display_name(&self) -> String {
        if !self.full_name.trim().is_empty() {
            self.full_name.trim().to_string()
        } else {
            join_name(&self.last_name, &self.first_name)
        }
    }
}

fn join_name(last_name: &str, first_name: &str) -> String {
    let (last, first) = (last_name.trim(), first_name.trim());
    if contains_hangul(last) || contains_hangul(first) {
        format!("{}{}", last, first)
    } else {
        [first, last]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn is_hangul(ch: char) -> bool {
    matches!(ch,
        '\u{AC00}'..='\u{D7A3}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
}

fn contains_hangul(text: &str) -> bool {
    text.chars().any(is_hangul)
}

/// Split a full name into `(last_name, first_name)`.
///
/// Korean names put the family name first, either as its own token or as
/// the first syllable. Latin names put it last; a single Latin token is
/// taken as the first name.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let tokens: Vec<&str> = full_name.split_whitespace().collect();

    match tokens.as_slice() {
        [] => (String::new(), String::new()),
        [single] if contains_hangul(single) => {
            let mut chars = single.chars();
            let last: String = chars.next().map(String::from).unwrap_or_default();
            (last, chars.collect())
        }
        [single] => (String::new(), single.to_string()),
        [first, rest @ ..] if contains_hangul(full_name) => {
            (first.to_string(), rest.join(" "))
        }
        [init @ .., last] => (last.to_string(), init.join(" ")),
    }
}
