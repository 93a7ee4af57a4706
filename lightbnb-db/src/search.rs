//! Dynamic SQL assembly for property search and insertion
//!
//! Both builders lean on `sqlx::QueryBuilder`, which numbers positional
//! placeholders as values are bound, so placeholder order and parameter
//! order cannot drift apart. The builders are pure: they never touch the
//! pool, and tests assert against the rendered SQL directly.

use lightbnb_core::models::{NewProperty, PropertySearch};
use sqlx::{Postgres, QueryBuilder};

/// Base search query: properties joined to a pre-aggregated per-property
/// average rating. The join is inner, so properties without any review
/// never appear in search results.
const SEARCH_BASE: &str = "\
SELECT properties.*, property_ratings.average_rating \
FROM properties \
JOIN (\
SELECT property_id, AVG(rating)::float8 AS average_rating \
FROM property_reviews GROUP BY property_id\
) AS property_ratings ON properties.id = property_ratings.property_id \
WHERE 1 = 1";

/// Build the filtered search statement.
///
/// Each effective filter appends one `AND` clause with one bound
/// parameter; `limit` is always the final parameter. Falsy filter values
/// (zero prices, a zero owner id or rating, an empty city) count as
/// unset, matching what callers of the upstream application relied on.
pub fn property_search_query(
    search: &PropertySearch,
    limit: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(SEARCH_BASE);

    if let Some(city) = search.city.as_deref().filter(|c| !c.is_empty()) {
        query.push(" AND LOWER(city) LIKE LOWER(");
        query.push_bind(format!("%{city}%"));
        query.push(")");
    }

    if let Some(owner_id) = search.owner_id.filter(|id| *id != 0) {
        query.push(" AND owner_id = ");
        query.push_bind(owner_id);
    }

    if let Some(minimum) = search.minimum_price_per_night.filter(|p| *p != 0) {
        query.push(" AND cost_per_night >= ");
        query.push_bind(to_cents(minimum));
    }

    if let Some(maximum) = search.maximum_price_per_night.filter(|p| *p != 0) {
        query.push(" AND cost_per_night <= ");
        query.push_bind(to_cents(maximum));
    }

    if let Some(rating) = search.minimum_rating.filter(|r| *r != 0.0) {
        query.push(" AND property_ratings.average_rating >= ");
        query.push_bind(rating);
    }

    query.push(" ORDER BY cost_per_night LIMIT ");
    query.push_bind(limit);

    query
}

/// Price bounds arrive in whole currency units; costs are stored in cents.
fn to_cents(units: i32) -> i32 {
    units * 100
}

/// A value destined for one bound parameter of a dynamic statement
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    BigInt(i64),
    Int(i32),
    Text(String),
    Bool(bool),
}

/// Column set for a property insert: every field that is present and
/// non-falsy, in schema declaration order. Zero integers, empty strings,
/// and `false` are dropped from the column list rather than inserted,
/// leaving those columns to the table's defaults (or to a NOT NULL
/// rejection, which propagates like any other driver error).
pub fn property_insert_columns(property: &NewProperty) -> Vec<(&'static str, ColumnValue)> {
    let mut columns = Vec::new();

    if let Some(value) = property.owner_id.filter(|v| *v != 0) {
        columns.push(("owner_id", ColumnValue::BigInt(value)));
    }
    push_text(&mut columns, "title", &property.title);
    push_text(&mut columns, "description", &property.description);
    push_text(
        &mut columns,
        "thumbnail_photo_url",
        &property.thumbnail_photo_url,
    );
    push_text(&mut columns, "cover_photo_url", &property.cover_photo_url);
    push_int(&mut columns, "cost_per_night", property.cost_per_night);
    push_int(&mut columns, "parking_spaces", property.parking_spaces);
    push_int(
        &mut columns,
        "number_of_bathrooms",
        property.number_of_bathrooms,
    );
    push_int(
        &mut columns,
        "number_of_bedrooms",
        property.number_of_bedrooms,
    );
    push_text(&mut columns, "country", &property.country);
    push_text(&mut columns, "street", &property.street);
    push_text(&mut columns, "city", &property.city);
    push_text(&mut columns, "province", &property.province);
    push_text(&mut columns, "post_code", &property.post_code);
    if let Some(value) = property.active.filter(|v| *v) {
        columns.push(("active", ColumnValue::Bool(value)));
    }

    columns
}

fn push_text(
    columns: &mut Vec<(&'static str, ColumnValue)>,
    name: &'static str,
    value: &Option<String>,
) {
    if let Some(value) = value.as_deref().filter(|s| !s.is_empty()) {
        columns.push((name, ColumnValue::Text(value.to_owned())));
    }
}

fn push_int(
    columns: &mut Vec<(&'static str, ColumnValue)>,
    name: &'static str,
    value: Option<i32>,
) {
    if let Some(value) = value.filter(|v| *v != 0) {
        columns.push((name, ColumnValue::Int(value)));
    }
}

/// Build the property insert statement.
///
/// Column identifiers come from the fixed set in
/// [`property_insert_columns`]; values are always bound parameters, never
/// interpolated into the SQL text. An all-falsy payload renders an
/// insert with an empty column list, which the database rejects — the
/// same observable outcome the upstream application produced.
pub fn property_insert_query(property: &NewProperty) -> QueryBuilder<'static, Postgres> {
    let columns = property_insert_columns(property);

    let mut query = QueryBuilder::new("INSERT INTO properties (");
    let mut names = query.separated(", ");
    for (name, _) in &columns {
        names.push(*name);
    }
    query.push(") VALUES (");
    let mut values = query.separated(", ");
    for (_, value) in columns {
        match value {
            ColumnValue::BigInt(v) => values.push_bind(v),
            ColumnValue::Int(v) => values.push_bind(v),
            ColumnValue::Text(v) => values.push_bind(v),
            ColumnValue::Bool(v) => values.push_bind(v),
        };
    }
    query.push(") RETURNING *");

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_without_filters_has_no_clauses() {
        let sql = property_search_query(&PropertySearch::default(), 10).into_sql();
        assert!(sql.starts_with("SELECT properties.*"));
        assert!(!sql.contains(" AND "));
        assert!(sql.ends_with(" ORDER BY cost_per_night LIMIT $1"));
    }

    #[test]
    fn test_city_filter_is_case_insensitive_substring() {
        let search = PropertySearch {
            city: Some("couver".to_string()),
            ..Default::default()
        };
        let sql = property_search_query(&search, 10).into_sql();
        assert!(sql.contains(" AND LOWER(city) LIKE LOWER($1)"));
        assert!(sql.ends_with(" LIMIT $2"));
    }

    #[test]
    fn test_all_filters_bind_in_order() {
        let search = PropertySearch {
            city: Some("Vancouver".to_string()),
            owner_id: Some(3),
            minimum_price_per_night: Some(50),
            maximum_price_per_night: Some(200),
            minimum_rating: Some(4.0),
        };
        let sql = property_search_query(&search, 10).into_sql();
        assert!(sql.contains("LOWER(city) LIKE LOWER($1)"));
        assert!(sql.contains("owner_id = $2"));
        assert!(sql.contains("cost_per_night >= $3"));
        assert!(sql.contains("cost_per_night <= $4"));
        assert!(sql.contains("property_ratings.average_rating >= $5"));
        assert!(sql.ends_with(" ORDER BY cost_per_night LIMIT $6"));
    }

    #[test]
    fn test_zero_and_empty_filters_match_unset() {
        let search = PropertySearch {
            city: Some(String::new()),
            owner_id: Some(0),
            minimum_price_per_night: Some(0),
            maximum_price_per_night: Some(0),
            minimum_rating: Some(0.0),
        };
        let filtered = property_search_query(&search, 10).into_sql();
        let unset = property_search_query(&PropertySearch::default(), 10).into_sql();
        assert_eq!(filtered, unset);
    }

    #[test]
    fn test_single_price_bound_renders_one_clause() {
        let search = PropertySearch {
            maximum_price_per_night: Some(150),
            ..Default::default()
        };
        let sql = property_search_query(&search, 5).into_sql();
        assert!(!sql.contains("cost_per_night >="));
        assert!(sql.contains("cost_per_night <= $1"));
        assert!(sql.ends_with(" LIMIT $2"));
    }

    #[test]
    fn test_insert_drops_falsy_fields() {
        let property = NewProperty {
            cost_per_night: Some(0),
            city: Some("Town".to_string()),
            ..Default::default()
        };
        let columns = property_insert_columns(&property);
        assert_eq!(columns, vec![("city", ColumnValue::Text("Town".to_string()))]);

        let sql = property_insert_query(&property).into_sql();
        assert_eq!(sql, "INSERT INTO properties (city) VALUES ($1) RETURNING *");
    }

    #[test]
    fn test_insert_drops_empty_strings_and_false() {
        let property = NewProperty {
            owner_id: Some(4),
            title: Some("Cabin".to_string()),
            description: Some(String::new()),
            active: Some(false),
            ..Default::default()
        };
        let columns = property_insert_columns(&property);
        let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["owner_id", "title"]);
    }

    #[test]
    fn test_insert_binds_full_column_set_in_order() {
        let property = NewProperty {
            owner_id: Some(1),
            title: Some("Loft".to_string()),
            description: Some("Bright".to_string()),
            thumbnail_photo_url: Some("https://example.com/t.jpg".to_string()),
            cover_photo_url: Some("https://example.com/c.jpg".to_string()),
            cost_per_night: Some(9300),
            parking_spaces: Some(1),
            number_of_bathrooms: Some(1),
            number_of_bedrooms: Some(2),
            country: Some("Canada".to_string()),
            street: Some("123 Main St".to_string()),
            city: Some("Vancouver".to_string()),
            province: Some("BC".to_string()),
            post_code: Some("V5K 0A1".to_string()),
            active: Some(true),
        };
        let sql = property_insert_query(&property).into_sql();
        assert!(sql.starts_with(
            "INSERT INTO properties (owner_id, title, description, thumbnail_photo_url"
        ));
        assert!(sql.contains("VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)"));
        assert!(sql.ends_with("RETURNING *"));
    }

    #[test]
    fn test_insert_with_no_effective_fields_renders_empty_list() {
        // The database rejects this statement; the error propagates to the
        // caller exactly as it did upstream.
        let sql = property_insert_query(&NewProperty::default()).into_sql();
        assert_eq!(sql, "INSERT INTO properties () VALUES () RETURNING *");
    }
}
