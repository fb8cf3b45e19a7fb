//! Advocate model.
//!
//! Rows are read into [`AdvocateRow`], which mirrors the nullable columns,
//! and converted once into [`Advocate`] where defaults are applied.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Columns selected for every advocate read, in row order.
pub const COLUMNS: [&str; 9] = [
    "id",
    "first_name",
    "last_name",
    "city",
    "degree",
    "specialties",
    "years_of_experience",
    "phone_number",
    "created_at",
];

/// Raw `advocates` row as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdvocateRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    pub specialties: Option<Vec<String>>,
    pub years_of_experience: i32,
    pub phone_number: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Advocate record as exposed to the API and templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advocate {
    /// Row identifier.
    pub id: i32,

    pub first_name: String,

    pub last_name: String,

    pub city: String,

    /// Degree abbreviation (e.g., "MD", "PhD", "MSW").
    pub degree: String,

    /// Areas of practice. Never absent; empty when the column is NULL.
    #[serde(default)]
    pub specialties: Vec<String>,

    pub years_of_experience: i32,

    /// Phone number as stored. Formatting happens at presentation time.
    pub phone_number: Option<i64>,

    pub created_at: DateTime<Utc>,
}

impl From<AdvocateRow> for Advocate {
    fn from(row: AdvocateRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            city: row.city,
            degree: row.degree,
            specialties: row.specialties.unwrap_or_default(),
            years_of_experience: row.years_of_experience,
            phone_number: row.phone_number,
            created_at: row.created_at,
        }
    }
}

impl Advocate {
    /// Phone number for display, `XXX-XXX-XXXX` when it has exactly 10 digits.
    pub fn display_phone(&self) -> String {
        crate::listing::format_phone_number(self.phone_number)
    }

    /// Full name as "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Count all advocates.
    pub async fn count_all(pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM advocates")
            .fetch_one(pool)
            .await
            .context("failed to count advocates")?;

        Ok(count)
    }
}

/// Input for inserting an advocate (seed tooling only).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdvocate {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub years_of_experience: i32,
    pub phone_number: Option<i64>,
}

impl NewAdvocate {
    /// Insert this record, returning the stored advocate.
    pub async fn insert(&self, pool: &PgPool) -> Result<Advocate> {
        let row = sqlx::query_as::<_, AdvocateRow>(
            r#"
            INSERT INTO advocates
                (first_name, last_name, city, degree, specialties, years_of_experience, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, first_name, last_name, city, degree, specialties,
                      years_of_experience, phone_number, created_at
            "#,
        )
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(&self.city)
        .bind(&self.degree)
        .bind(&self.specialties)
        .bind(self.years_of_experience)
        .bind(self.phone_number)
        .fetch_one(pool)
        .await
        .with_context(|| {
            format!(
                "failed to insert advocate {} {}",
                self.first_name, self.last_name
            )
        })?;

        Ok(row.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn row() -> AdvocateRow {
        AdvocateRow {
            id: 7,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            city: "Austin".to_string(),
            degree: "MD".to_string(),
            specialties: None,
            years_of_experience: 12,
            phone_number: Some(5551234567),
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
        }
    }

    #[test]
    fn null_specialties_become_empty_list() {
        let advocate = Advocate::from(row());
        assert!(advocate.specialties.is_empty());

        let json = serde_json::to_value(&advocate).unwrap();
        assert_eq!(json["specialties"], serde_json::json!([]));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Advocate::from(row())).unwrap();
        assert_eq!(json["firstName"], "Ann");
        assert_eq!(json["lastName"], "Lee");
        assert_eq!(json["yearsOfExperience"], 12);
        assert_eq!(json["phoneNumber"], 5551234567_i64);
    }

    #[test]
    fn display_phone_formats_ten_digits() {
        let advocate = Advocate::from(row());
        assert_eq!(advocate.display_phone(), "555-123-4567");

        let mut missing = row();
        missing.phone_number = None;
        assert_eq!(Advocate::from(missing).display_phone(), "");
    }

    #[test]
    fn new_advocate_defaults_specialties() {
        let input: NewAdvocate = serde_json::from_str(
            r#"{"firstName":"Bob","lastName":"Ng","city":"Reno","degree":"PhD","yearsOfExperience":3,"phoneNumber":null}"#,
        )
        .unwrap();
        assert!(input.specialties.is_empty());
        assert_eq!(input.phone_number, None);
    }
}
