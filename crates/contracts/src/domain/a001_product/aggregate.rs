use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// ISO calendar date format used by the API and by the form fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Aggregate
// ============================================================================

/// Financial product of the catalog
///
/// Dates travel as ISO `YYYY-MM-DD` strings: the form edits them as plain text
/// and the release-date rule compares them lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Product {
    /// External identifier chosen at registration, immutable afterwards
    pub id: String,
    pub name: String,
    pub description: String,
    /// Logo URL or identifier
    pub logo: String,
    pub date_release: String,
    pub date_revision: String,
}

impl Product {
    pub fn list_name() -> &'static str {
        "Financial products"
    }
}

// ============================================================================
// Date helpers
// ============================================================================

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Same calendar date one year later.
///
/// Feb 29 has no counterpart in the following year and rolls over to Mar 1.
pub fn add_one_year(date: NaiveDate) -> NaiveDate {
    let year = date.year() + 1;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date)
}

/// Revision date derived from an ISO release date string
pub fn revision_date_for(release: &str) -> Option<String> {
    parse_date(release).map(|date| format_iso_date(add_one_year(date)))
}

// ============================================================================
// Presentation helpers
// ============================================================================

/// Up to two initials taken from the first two space-separated words.
///
/// Falls back to the first two characters of the name, then to `P`.
pub fn logo_initials(name: &str) -> String {
    let mut parts = name.split(' ');
    let mut initials = String::new();

    if let Some(first) = parts.next().and_then(|p| p.chars().next()) {
        initials.push(first);
    }
    if let Some(second) = parts.next().and_then(|p| p.chars().next()) {
        initials.push(second);
    }

    if initials.is_empty() && name.chars().count() >= 2 {
        initials = name.chars().take(2).collect();
    }

    if initials.is_empty() {
        return "P".to_string();
    }
    initials.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_revision_date_keeps_month_and_day() {
        assert_eq!(revision_date_for("2025-03-15").as_deref(), Some("2026-03-15"));
        assert_eq!(revision_date_for("2025-12-31").as_deref(), Some("2026-12-31"));
    }

    #[test]
    fn test_revision_date_leap_day_rolls_to_march() {
        assert_eq!(add_one_year(date(2024, 2, 29)), date(2025, 3, 1));
        assert_eq!(add_one_year(date(2027, 2, 28)), date(2028, 2, 28));
    }

    #[test]
    fn test_revision_date_rejects_garbage() {
        assert_eq!(revision_date_for(""), None);
        assert_eq!(revision_date_for("15/03/2025"), None);
    }

    #[test]
    fn test_logo_initials() {
        assert_eq!(logo_initials("Banco Pichincha"), "BP");
        assert_eq!(logo_initials("tarjeta de credito"), "TD");
        assert_eq!(logo_initials("Visa"), "V");
        assert_eq!(logo_initials(" ahorro"), "A");
        assert_eq!(logo_initials(""), "P");
    }

    #[test]
    fn test_product_json_shape() {
        let product = Product {
            id: "trj-crd".into(),
            name: "Tarjetas de Credito".into(),
            description: "Tarjeta de consumo".into(),
            logo: "https://example.com/logo.png".into(),
            date_release: "2025-03-15".into(),
            date_revision: "2026-03-15".into(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["date_release"], "2025-03-15");
        assert_eq!(json["id"], "trj-crd");
        assert_eq!(parse_date(&product.date_release), Some(date(2025, 3, 15)));
    }
}
