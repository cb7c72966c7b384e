//! Field validation for user-entered attribute values.
//!
//! Rules describe what a field accepts; `check` returns a user-facing
//! message on the first violation. Re-prompting on failure belongs to the
//! input-soliciting layer, not here.

use chrono::NaiveDate;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Name,
    Date,
}

pub struct FieldRules {
    pub kind: RuleKind,
    /// Display text for prompts and messages, e.g. "first name".
    pub label: &'static str,
    pub min_len: usize,
    pub max_len: usize,
    /// Anchored pattern the whole (normalized) value must match.
    pub pattern: &'static str,
}

pub const PARTICIPANT_FIRST_NAME: FieldRules = FieldRules {
    kind: RuleKind::Name,
    label: "first name",
    min_len: 2,
    max_len: 20,
    pattern: r"^[A-Za-z '.\-]+$",
};

pub const PARTICIPANT_LAST_NAME: FieldRules = FieldRules {
    kind: RuleKind::Name,
    label: "last name",
    min_len: 2,
    max_len: 30,
    pattern: r"^[A-Za-z '.\-]+$",
};

/// Team names may also contain digits.
pub const TEAM_NAME: FieldRules = FieldRules {
    kind: RuleKind::Name,
    label: "team name",
    min_len: 5,
    max_len: 30,
    pattern: r"^[A-Za-z0-9 '.\-]+$",
};

pub const BIRTH_DATE: FieldRules = FieldRules {
    kind: RuleKind::Date,
    label: "birth date",
    min_len: 10,
    max_len: 10,
    pattern: r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$",
};

/// Collapse interior whitespace runs and trim the ends.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Validate `value` against `rules`. Returns the warning to show the user
/// on the first violation found.
pub fn check(value: &str, rules: &FieldRules) -> Result<(), String> {
    match rules.kind {
        RuleKind::Name => check_name(value, rules),
        RuleKind::Date => check_date(value, rules),
    }
}

fn check_name(value: &str, rules: &FieldRules) -> Result<(), String> {
    let name = normalize_name(value);
    let len = name.chars().count();
    if len < rules.min_len || len > rules.max_len {
        return Err(format!(
            "Invalid {} length: expected {} to {} characters, got {}.",
            rules.label, rules.min_len, rules.max_len, len
        ));
    }
    // pattern is a compile-time literal; it cannot fail to parse
    let allowed = Regex::new(rules.pattern).unwrap();
    if !allowed.is_match(&name) {
        return Err(format!(
            "Invalid character(s) in {}: only letters, spaces, periods, \
             hyphens, and apostrophes are allowed (team names may also \
             contain digits).",
            rules.label
        ));
    }
    Ok(())
}

fn check_date(value: &str, rules: &FieldRules) -> Result<(), String> {
    let date = value.trim();
    let shape = Regex::new(rules.pattern).unwrap();
    if !shape.is_match(date) {
        return Err(
            "Invalid date format. Please use YYYY-MM-DD (with leading zeros).".to_string(),
        );
    }
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(
            "Invalid date: that day does not exist. Check the day/month combination."
                .to_string(),
        );
    }
    Ok(())
}
