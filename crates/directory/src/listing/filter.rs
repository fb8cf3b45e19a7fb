//! In-memory matching and display formatting.
//!
//! [`matches_search`] is the same predicate the listing query applies in SQL.
//! [`matches_live`] is the wider predicate used to re-filter an already
//! loaded page without a round trip.

use crate::models::Advocate;

fn norm(value: &str) -> String {
    value.to_lowercase()
}

/// `true` when `needle` appears case-insensitively in first name, last name,
/// city or degree. An empty needle matches everything.
pub fn matches_search(advocate: &Advocate, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [
        &advocate.first_name,
        &advocate.last_name,
        &advocate.city,
        &advocate.degree,
    ]
    .into_iter()
    .any(|field| norm(field).contains(&needle))
}

/// Live-filter predicate over every displayed field, including specialties,
/// years of experience and the raw phone number.
pub fn matches_live(advocate: &Advocate, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() || matches_search(advocate, &needle) {
        return true;
    }

    if advocate
        .specialties
        .iter()
        .any(|s| norm(s).contains(&needle))
    {
        return true;
    }

    let years = advocate.years_of_experience.to_string();
    let phone = advocate.phone_number.map(|p| p.to_string());
    years.contains(&needle) || phone.as_deref().unwrap_or_default().contains(&needle)
}

/// Format a phone number for display.
///
/// Exactly ten digits (after stripping everything else) render as
/// `XXX-XXX-XXXX`; any other value is returned unchanged. Absent or empty
/// input renders as the empty string.
pub fn format_phone(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return String::new();
    };

    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 10 {
        return raw.to_string();
    }

    format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

/// Format a stored phone number. Absent and zero both render as the empty
/// string.
pub fn format_phone_number(number: Option<i64>) -> String {
    match number.filter(|n| *n != 0) {
        Some(n) => format_phone(Some(&n.to_string())),
        None => String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn advocate() -> Advocate {
        Advocate {
            id: 1,
            first_name: "Ann".to_string(),
            last_name: "Okafor".to_string(),
            city: "Denver".to_string(),
            degree: "MSW".to_string(),
            specialties: vec!["Trauma & PTSD".to_string(), "LGBTQ".to_string()],
            years_of_experience: 14,
            phone_number: Some(3035550199),
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
        }
    }

    #[test]
    fn phone_with_ten_digits_is_dashed() {
        assert_eq!(format_phone(Some("1234567890")), "123-456-7890");
        assert_eq!(format_phone(Some("(123) 456 7890")), "123-456-7890");
    }

    #[test]
    fn phone_without_ten_digits_is_unchanged() {
        assert_eq!(format_phone(Some("123")), "123");
        assert_eq!(format_phone(Some("+1 123 456 7890")), "+1 123 456 7890");
    }

    #[test]
    fn absent_phone_is_empty() {
        assert_eq!(format_phone(None), "");
        assert_eq!(format_phone(Some("")), "");
    }

    #[test]
    fn stored_phone_zero_is_empty() {
        assert_eq!(format_phone_number(Some(0)), "");
        assert_eq!(format_phone_number(None), "");
        assert_eq!(format_phone_number(Some(3035550199)), "303-555-0199");
        assert_eq!(format_phone_number(Some(911)), "911");
    }

    #[test]
    fn search_predicate_covers_name_city_degree() {
        let a = advocate();
        assert!(matches_search(&a, "ann"));
        assert!(matches_search(&a, "OKA"));
        assert!(matches_search(&a, "denv"));
        assert!(matches_search(&a, "msw"));
        assert!(matches_search(&a, ""));
        assert!(!matches_search(&a, "trauma"));
        assert!(!matches_search(&a, "303"));
    }

    #[test]
    fn live_predicate_is_wider() {
        let a = advocate();
        assert!(matches_live(&a, "trauma"));
        assert!(matches_live(&a, "lgbtq"));
        assert!(matches_live(&a, "14"));
        assert!(matches_live(&a, "5550199"));
        assert!(matches_live(&a, "  Denver "));
        assert!(!matches_live(&a, "boston"));
    }

    #[test]
    fn live_predicate_tolerates_missing_fields() {
        let mut a = advocate();
        a.specialties.clear();
        a.phone_number = None;
        assert!(!matches_live(&a, "555"));
        assert!(matches_live(&a, "ann"));
    }
}
