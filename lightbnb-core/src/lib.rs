pub mod config;
pub mod error;
pub mod models;

pub use config::DatabaseConfig;
pub use error::{DbError, Result};
pub use models::{
    GuestReservation, NewProperty, NewUser, Property, PropertyListing, PropertySearch, User,
};
