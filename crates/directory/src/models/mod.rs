//! Database models.

pub mod advocate;

pub use advocate::{Advocate, AdvocateRow, NewAdvocate};
