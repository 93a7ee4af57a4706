//! Row and request models for the LightBnB query gateway
//!
//! Every lookup returns a full persisted row (inserts use `RETURNING *`),
//! so these structs mirror the external database schema exactly. The
//! downstream HTTP layer serializes them to JSON as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Users
// ============================================================================

/// A user row, including the stored (hashed upstream) password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Payload for `add_user`. Email uniqueness is the caller's problem; a
/// duplicate surfaces as the driver's constraint-violation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

// ============================================================================
// Properties
// ============================================================================

/// A property listing row. `cost_per_night` is stored in currency
/// subunits (cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Property {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

/// A property returned by search, augmented with the average of its
/// review ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PropertyListing {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub property: Property,
    pub average_rating: f64,
}

/// Payload for `add_property`.
///
/// All columns are optional: the insert statement is built from whichever
/// fields are *effective* — present and non-falsy (zero integers, empty
/// strings, and `false` are dropped from the column list rather than
/// inserted, matching the upstream application's contract). Missing
/// NOT NULL columns without defaults fail at the database, and that error
/// propagates unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_photo_url: Option<String>,
    pub cover_photo_url: Option<String>,
    /// In currency subunits (cents), unlike the search bounds
    pub cost_per_night: Option<i32>,
    pub parking_spaces: Option<i32>,
    pub number_of_bathrooms: Option<i32>,
    pub number_of_bedrooms: Option<i32>,
    pub country: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub post_code: Option<String>,
    pub active: Option<bool>,
}

/// Optional filters for `get_all_properties`. Filters are purely
/// conjunctive: each effective field narrows the result set, absent
/// fields impose no constraint, and no combination is invalid.
///
/// Falsy values (zero prices, a zero rating, an empty city) are treated
/// as "not specified", preserving the behavior callers already rely on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertySearch {
    /// Case-insensitive substring match against the property's city
    pub city: Option<String>,
    /// Exact match against the property's owner
    pub owner_id: Option<i64>,
    /// Lower bound in whole currency units; converted to cents before
    /// comparison against the stored cost
    pub minimum_price_per_night: Option<i32>,
    /// Upper bound, same conversion
    pub maximum_price_per_night: Option<i32>,
    /// Lower bound against the property's average review rating
    pub minimum_rating: Option<f64>,
}

// ============================================================================
// Reservations
// ============================================================================

/// A reservation merged with its property's columns and the property's
/// average review rating. Read-only from this layer's perspective.
///
/// Both ids are carried explicitly; the upstream query aliased
/// `reservations.id AS id` over the property's id, which a keyed record
/// cannot represent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GuestReservation {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
    pub average_rating: f64,
}
