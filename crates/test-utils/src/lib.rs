#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Advocate directory test utilities.
//!
//! Fixture builders for advocate rows, isolated database schemas, and
//! assertion helpers for listing responses.

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;
use uuid::Uuid;

/// Create a test advocate with default values.
pub fn test_advocate(first_name: &str, last_name: &str) -> TestAdvocate {
    TestAdvocate {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        city: "Springfield".to_string(),
        degree: "MD".to_string(),
        specialties: None,
        years_of_experience: 5,
        phone_number: None,
    }
}

/// A test advocate builder for creating fixture rows.
#[derive(Debug, Clone)]
pub struct TestAdvocate {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    /// `None` stores SQL NULL.
    pub specialties: Option<Vec<String>>,
    pub years_of_experience: i32,
    pub phone_number: Option<i64>,
}

impl TestAdvocate {
    /// Set the city.
    pub fn with_city(mut self, city: &str) -> Self {
        self.city = city.to_string();
        self
    }

    /// Set the degree.
    pub fn with_degree(mut self, degree: &str) -> Self {
        self.degree = degree.to_string();
        self
    }

    /// Set specialties.
    pub fn with_specialties(mut self, specialties: &[&str]) -> Self {
        self.specialties = Some(specialties.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Set years of experience.
    pub fn with_years(mut self, years: i32) -> Self {
        self.years_of_experience = years;
        self
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: i64) -> Self {
        self.phone_number = Some(phone);
        self
    }

    /// Insert the row and return its id.
    pub async fn insert(&self, pool: &PgPool) -> i32 {
        sqlx::query_scalar(
            r#"
            INSERT INTO advocates
                (first_name, last_name, city, degree, specialties, years_of_experience, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
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
        .expect("failed to insert test advocate")
    }
}

/// Insert several fixtures in order.
pub async fn insert_all(pool: &PgPool, advocates: &[TestAdvocate]) -> Vec<i32> {
    let mut ids = Vec::with_capacity(advocates.len());
    for advocate in advocates {
        ids.push(advocate.insert(pool).await);
    }
    ids
}

/// A pool whose connections all resolve unqualified names in a freshly
/// created schema, so each test sees its own `advocates` table.
pub struct IsolatedSchema {
    pub pool: PgPool,
    pub schema: String,
    admin: PgPool,
}

impl IsolatedSchema {
    /// Create a new schema and a pool bound to it.
    pub async fn create(database_url: &str) -> Self {
        let schema = format!("test_{}", Uuid::now_v7().simple());

        let admin = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .expect("failed to connect to PostgreSQL");

        admin
            .execute(format!("CREATE SCHEMA \"{schema}\"").as_str())
            .await
            .expect("failed to create test schema");

        let search_path = schema.clone();
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .after_connect(move |conn, _meta| {
                let statement = format!("SET search_path TO \"{search_path}\"");
                Box::pin(async move {
                    conn.execute(statement.as_str()).await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await
            .expect("failed to connect test pool");

        Self {
            pool,
            schema,
            admin,
        }
    }

    /// Drop the schema and everything in it.
    pub async fn drop_schema(self) {
        self.pool.close().await;
        self.admin
            .execute(format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", self.schema).as_str())
            .await
            .ok();
    }
}

/// Assertion helpers.
pub mod assert {
    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert values are in non-decreasing byte order.
    pub fn ascending<T: AsRef<str>>(values: &[T]) {
        for pair in values.windows(2) {
            assert!(
                pair[0].as_ref().as_bytes() <= pair[1].as_ref().as_bytes(),
                "'{}' sorted before '{}'",
                pair[0].as_ref(),
                pair[1].as_ref()
            );
        }
    }

    /// Assert values are in non-increasing byte order.
    pub fn descending<T: AsRef<str>>(values: &[T]) {
        for pair in values.windows(2) {
            assert!(
                pair[0].as_ref().as_bytes() >= pair[1].as_ref().as_bytes(),
                "'{}' sorted before '{}'",
                pair[0].as_ref(),
                pair[1].as_ref()
            );
        }
    }
}
