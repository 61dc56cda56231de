//! Locale-aware rendering of money, dates and statement months.

use ccard_domain::StatementPeriod;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    PtBr,
    EnUs,
}

impl Locale {
    /// Maps a BCP 47 tag (`pt-BR`, `en_US`, `en`) to a supported locale.
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        if normalized == "en" || normalized.starts_with("en-") {
            Locale::EnUs
        } else {
            Locale::PtBr
        }
    }

    /// `(decimal, grouping)` separators.
    pub fn separators(self) -> (char, char) {
        match self {
            Locale::PtBr => (',', '.'),
            Locale::EnUs => ('.', ','),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSettings {
    pub locale: Locale,
    pub currency: String,
}

impl FormatSettings {
    pub fn new(locale_tag: &str, currency: &str) -> Self {
        Self {
            locale: Locale::from_tag(locale_tag),
            currency: currency.trim().to_uppercase(),
        }
    }

    fn symbol(&self) -> &str {
        match self.currency.as_str() {
            "BRL" => "R$",
            "USD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            other => other,
        }
    }
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self::new("pt-BR", "BRL")
    }
}

/// `R$ 1.234,56` for pt-BR, `$1,234.56` for en-US.
pub fn currency(value: f64, settings: &FormatSettings) -> String {
    let (decimal, grouping) = settings.locale.separators();
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_digits(cents / 100, grouping);
    let amount = format!("{whole}{decimal}{:02}", cents % 100);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    match settings.locale {
        Locale::PtBr => format!("{sign}{} {amount}", settings.symbol()),
        Locale::EnUs => format!("{sign}{}{amount}", settings.symbol()),
    }
}

/// `dd/mm/yyyy` for pt-BR, `mm/dd/yyyy` for en-US.
pub fn date(value: NaiveDate, settings: &FormatSettings) -> String {
    match settings.locale {
        Locale::PtBr => value.format("%d/%m/%Y").to_string(),
        Locale::EnUs => value.format("%m/%d/%Y").to_string(),
    }
}

/// One decimal place, e.g. `42.5%`.
pub fn percent(share: f64) -> String {
    format!("{share:.1}%")
}

pub fn month_name(month: u32, locale: Locale) -> &'static str {
    const PT: [&str; 12] = [
        "Janeiro",
        "Fevereiro",
        "Março",
        "Abril",
        "Maio",
        "Junho",
        "Julho",
        "Agosto",
        "Setembro",
        "Outubro",
        "Novembro",
        "Dezembro",
    ];
    const EN: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    let index = (month.clamp(1, 12) - 1) as usize;
    match locale {
        Locale::PtBr => PT[index],
        Locale::EnUs => EN[index],
    }
}

/// `Março 2024` / `March 2024`.
pub fn period_label(period: StatementPeriod, settings: &FormatSettings) -> String {
    format!(
        "{} {}",
        month_name(period.month(), settings.locale),
        period.year()
    )
}

fn group_digits(mut value: u64, separator: char) -> String {
    let mut groups = Vec::new();
    loop {
        if value < 1000 {
            groups.push(value.to_string());
            break;
        }
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }
    groups.reverse();
    groups.join(&separator.to_string())
}
