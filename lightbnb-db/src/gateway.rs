//! The query gateway: six operations over a shared PostgreSQL pool
//!
//! Not-found is data, not an error: single-record lookups return
//! `Ok(None)` and list operations return an empty `Vec`. Everything the
//! driver raises — connectivity, constraint violations, malformed SQL —
//! propagates to the caller untranslated.

use lightbnb_core::{
    DatabaseConfig, GuestReservation, NewProperty, NewUser, Property, PropertyListing,
    PropertySearch, Result, User,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::search::{property_insert_query, property_search_query};

/// Row cap used by the upstream application when callers give none
pub const DEFAULT_LIMIT: i64 = 10;

/// Stateless query gateway over a shared connection pool.
///
/// Every operation is one asynchronous round trip with no transactional
/// linkage to any other, so concurrent calls interleave arbitrarily. The
/// pool is the only shared resource; its lifecycle belongs to the
/// process (connect at startup, [`Gateway::close`] at shutdown), and any
/// timeout or retry behavior comes from the pool's own configuration.
#[derive(Clone)]
pub struct Gateway {
    pool: PgPool,
}

impl Gateway {
    /// Wrap an already-connected pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a new pool from injected configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;
        info!(
            max_connections = config.max_connections,
            "connected to database"
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool; in-flight queries complete first
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Exact-match lookup by email. `Ok(None)` when no user exists.
    pub async fn get_user_with_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Same contract as [`Gateway::get_user_with_email`], keyed by id
    pub async fn get_user_with_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Insert a user and return the persisted row, generated id included.
    /// Email uniqueness is not pre-validated; a duplicate surfaces as the
    /// driver's constraint-violation error.
    pub async fn add_user(&self, user: &NewUser) -> Result<User> {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await?;
        debug!(user_id = inserted.id, "added user");
        Ok(inserted)
    }

    // ========================================================================
    // Reservations
    // ========================================================================

    /// A guest's reservations, each merged with its property's columns and
    /// the property's average review rating, ordered by start date
    /// ascending and capped at `limit`.
    ///
    /// The review join is inner: reservations for properties with zero
    /// reviews are silently dropped, a quirk callers depend on.
    pub async fn get_all_reservations(
        &self,
        guest_id: i64,
        limit: i64,
    ) -> Result<Vec<GuestReservation>> {
        let reservations = sqlx::query_as::<_, GuestReservation>(
            r#"
            SELECT reservations.id, reservations.start_date, reservations.end_date,
                   properties.id AS property_id, properties.owner_id, properties.title,
                   properties.description, properties.thumbnail_photo_url,
                   properties.cover_photo_url, properties.cost_per_night,
                   properties.parking_spaces, properties.number_of_bathrooms,
                   properties.number_of_bedrooms, properties.country, properties.street,
                   properties.city, properties.province, properties.post_code,
                   properties.active,
                   AVG(property_reviews.rating)::float8 AS average_rating
            FROM reservations
            JOIN properties ON properties.id = reservations.property_id
            JOIN property_reviews ON properties.id = property_reviews.property_id
            WHERE reservations.guest_id = $1
            GROUP BY reservations.id, properties.id
            ORDER BY reservations.start_date
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(reservations)
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Filtered property search. Accepts any subset of filters (including
    /// none); results carry each property's average rating and are ordered
    /// by nightly cost ascending. See [`crate::search`] for clause assembly.
    pub async fn get_all_properties(
        &self,
        search: &PropertySearch,
        limit: i64,
    ) -> Result<Vec<PropertyListing>> {
        let mut query = property_search_query(search, limit);
        debug!(sql = query.sql(), "property search");
        let listings = query
            .build_query_as::<PropertyListing>()
            .fetch_all(&self.pool)
            .await?;
        Ok(listings)
    }

    /// Insert a property built from the payload's effective (present and
    /// non-falsy) fields and return the persisted row.
    pub async fn add_property(&self, property: &NewProperty) -> Result<Property> {
        let mut query = property_insert_query(property);
        let inserted = query
            .build_query_as::<Property>()
            .fetch_one(&self.pool)
            .await?;
        debug!(property_id = inserted.id, "added property");
        Ok(inserted)
    }
}
