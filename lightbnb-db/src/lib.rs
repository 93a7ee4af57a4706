//! PostgreSQL data-access layer for the LightBnB application
//!
//! One component, the [`Gateway`], holds a shared connection pool and
//! exposes six operations: user lookup by email or id, user creation,
//! a guest's reservations, filtered property search, and property
//! creation. Every operation is a single parameterized round trip; the
//! HTTP layer above and the database below are external collaborators.

pub mod gateway;
pub mod search;

pub use gateway::{Gateway, DEFAULT_LIMIT};
pub use lightbnb_core::{
    DatabaseConfig, DbError, GuestReservation, NewProperty, NewUser, Property, PropertyListing,
    PropertySearch, Result, User,
};

/// Schema for the test harness. The deployed schema is owned by the
/// external database; this layer never migrates it.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../migrations");
