//! Parsing of command arguments into domain values.

use std::str::FromStr;

use ccard_core::format::{FormatSettings, Locale};
use ccard_domain::{Category, StatementPeriod};
use chrono::NaiveDate;
use strsim::levenshtein;

use crate::cli::core::CommandError;

/// Positional arguments plus `--key value` / `--key=value` options.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    options: Vec<(&'a str, &'a str)>,
}

impl<'a> ParsedArgs<'a> {
    /// Splits `args`, rejecting options not listed in `known` (names without `--`).
    pub fn parse(args: &[&'a str], known: &[&str]) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let Some(option) = arg.strip_prefix("--") else {
                parsed.positional.push(*arg);
                continue;
            };
            let (key, value) = match option.split_once('=') {
                Some((key, value)) => (key, value),
                None => {
                    let value = iter.next().ok_or_else(|| {
                        CommandError::InvalidArguments(format!("option `--{option}` needs a value"))
                    })?;
                    (option, *value)
                }
            };
            if !known.contains(&key) {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `--{key}`"
                )));
            }
            parsed.options.push((key, value));
        }
        Ok(parsed)
    }

    /// Last value given for `key`.
    pub fn option(&self, key: &str) -> Option<&'a str> {
        self.options
            .iter()
            .rev()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

/// Accepts `12.50`, `12,50`, `1.234,56` and `1,234.56`.
///
/// With both separators present the last one is decimal. A lone grouping
/// separator of the locale counts as grouping only when every group after it
/// has three digits, so `1.234` is 1234 in pt-BR but `12.50` stays 12.5.
pub fn parse_value(raw: &str, settings: &FormatSettings) -> Result<f64, CommandError> {
    let trimmed = raw.trim();
    let (_, grouping) = settings.locale.separators();
    let mixed = trimmed.contains(',') && trimmed.contains('.');
    let normalized = if !mixed && trimmed.contains(grouping) && is_grouped(trimmed, grouping) {
        trimmed.replace(grouping, "")
    } else {
        match trimmed.rfind(|c| c == ',' || c == '.') {
            Some(index) => join_decimal(trimmed, index),
            None => trimmed.to_string(),
        }
    };
    let value: f64 = normalized
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not an amount")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(CommandError::InvalidArguments(format!(
            "amount must be zero or positive, got `{raw}`"
        )));
    }
    Ok(value)
}

/// Digits before `index` (separators dropped), a dot, then the digits after it.
fn join_decimal(raw: &str, index: usize) -> String {
    let (whole, fraction) = raw.split_at(index);
    let whole: String = whole.chars().filter(|c| *c != ',' && *c != '.').collect();
    format!("{}.{}", whole, &fraction[1..])
}

fn is_grouped(raw: &str, grouping: char) -> bool {
    let mut groups = raw.split(grouping);
    let head_ok = groups
        .next()
        .is_some_and(|head| (1..=3).contains(&head.len()));
    head_ok && groups.all(|group| group.len() == 3 && group.chars().all(|c| c.is_ascii_digit()))
}

/// `today`, ISO `YYYY-MM-DD`, or the locale's short date.
pub fn parse_date(
    raw: &str,
    settings: &FormatSettings,
    today: NaiveDate,
) -> Result<NaiveDate, CommandError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    let local = match settings.locale {
        Locale::PtBr => "%d/%m/%Y",
        Locale::EnUs => "%m/%d/%Y",
    };
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, local))
        .map_err(|_| {
            CommandError::InvalidArguments(format!(
                "`{raw}` is not a date; use YYYY-MM-DD or {}",
                local.replace("%d", "dd").replace("%m", "mm").replace("%Y", "yyyy")
            ))
        })
}

/// Category by keyword or label, suggesting the closest keyword on a miss.
pub fn parse_category(raw: &str) -> Result<Category, CommandError> {
    Category::from_str(raw).map_err(|_| {
        let needle = raw.trim().to_lowercase();
        let closest = Category::ALL
            .iter()
            .map(|category| (levenshtein(category.keyword(), &needle), category.keyword()))
            .min_by_key(|(distance, _)| *distance);
        let message = match closest {
            Some((distance, keyword)) if distance <= 3 => {
                format!("unknown category `{raw}`; did you mean `{keyword}`?")
            }
            _ => format!("unknown category `{raw}`; see `categories`"),
        };
        CommandError::InvalidArguments(message)
    })
}

/// `C/T`, e.g. `2/10`. Bounds are checked when the purchase is built.
pub fn parse_installments(raw: &str) -> Result<(u32, u32), CommandError> {
    let invalid = || {
        CommandError::InvalidArguments(format!(
            "`{raw}` is not an installment plan; use CURRENT/TOTAL, e.g. 1/3"
        ))
    };
    let (current, total) = raw.trim().split_once('/').ok_or_else(invalid)?;
    let current = current.trim().parse().map_err(|_| invalid())?;
    let total = total.trim().parse().map_err(|_| invalid())?;
    Ok((current, total))
}

pub fn parse_period(raw: &str) -> Result<StatementPeriod, CommandError> {
    StatementPeriod::from_str(raw.trim()).map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a statement month; use MM/YYYY"))
    })
}
