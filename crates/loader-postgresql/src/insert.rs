//! Batched INSERT logic for PostgreSQL.

use crate::error::PostgreSQLSinkError;
use loader_core::ReviewRecord;
use tokio_postgres::types::ToSql;
use tokio_postgres::Client;

/// Bind parameters used by one review row.
pub const PARAMS_PER_ROW: usize = ReviewRecord::COLUMNS.len();

/// Upper limit on bind parameters in a single PostgreSQL statement.
pub const MAX_BIND_PARAMETERS: usize = 65_535;

// Casts let the server coerce into narrower column types (e.g. SMALLINT rating,
// TIMESTAMP without time zone) by assignment.
const PARAM_CASTS: [&str; PARAMS_PER_ROW] = ["int4", "int4", "int4", "text", "timestamptz"];

/// Quote a table name, optionally schema-qualified, as SQL identifiers.
///
/// `public.reviews` becomes `"public"."reviews"`. Embedded double quotes are
/// doubled.
pub fn quote_table_name(table: &str) -> Result<String, PostgreSQLSinkError> {
    let parts: Vec<&str> = table.split('.').collect();
    if parts.len() > 2 || parts.iter().any(|p| p.trim().is_empty()) {
        return Err(PostgreSQLSinkError::InvalidTableName(table.to_string()));
    }

    Ok(parts
        .iter()
        .map(|p| format!("\"{}\"", p.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join("."))
}

/// Build a multi-row INSERT statement for `row_count` review rows.
pub fn build_insert_sql(quoted_table: &str, row_count: usize) -> String {
    let columns = ReviewRecord::COLUMNS
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");

    let mut placeholders: Vec<String> = Vec::with_capacity(row_count);
    let mut param_idx = 1;

    for _ in 0..row_count {
        let row_placeholders: Vec<String> = PARAM_CASTS
            .iter()
            .map(|cast| {
                let p = format!("${param_idx}::{cast}");
                param_idx += 1;
                p
            })
            .collect();
        placeholders.push(format!("({})", row_placeholders.join(", ")));
    }

    format!(
        "INSERT INTO {} ({}) VALUES {}",
        quoted_table,
        columns,
        placeholders.join(", ")
    )
}

/// Check that a batch fits in one statement.
pub fn check_parameter_limit(row_count: usize) -> Result<(), PostgreSQLSinkError> {
    let params = row_count * PARAMS_PER_ROW;
    if params > MAX_BIND_PARAMETERS {
        return Err(PostgreSQLSinkError::TooManyParameters {
            rows: row_count,
            params,
            max: MAX_BIND_PARAMETERS,
        });
    }
    Ok(())
}

/// Insert a batch of reviews into a PostgreSQL table.
pub async fn insert_batch(
    client: &Client,
    table: &str,
    rows: &[ReviewRecord],
) -> Result<u64, PostgreSQLSinkError> {
    if rows.is_empty() {
        return Ok(0);
    }
    check_parameter_limit(rows.len())?;

    let sql = build_insert_sql(&quote_table_name(table)?, rows.len());

    let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(rows.len() * PARAMS_PER_ROW);
    for row in rows {
        params.push(&row.product_id);
        params.push(&row.user_id);
        params.push(&row.rating);
        params.push(&row.comment);
        params.push(&row.created_at);
    }

    let inserted = client.execute(&sql, &params).await?;

    Ok(inserted)
}

/// Generate TRUNCATE TABLE statement.
pub fn generate_truncate_table(table: &str) -> Result<String, PostgreSQLSinkError> {
    Ok(format!("TRUNCATE TABLE {}", quote_table_name(table)?))
}

/// Generate a row-count query.
pub fn generate_count(table: &str) -> Result<String, PostgreSQLSinkError> {
    Ok(format!("SELECT COUNT(*) FROM {}", quote_table_name(table)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loader_core::MAX_BATCH_SIZE;

    #[test]
    fn test_quote_table_name() {
        assert_eq!(quote_table_name("reviews").unwrap(), "\"reviews\"");
        assert_eq!(
            quote_table_name("public.reviews").unwrap(),
            "\"public\".\"reviews\""
        );
        assert_eq!(quote_table_name("we\"ird").unwrap(), "\"we\"\"ird\"");
    }

    #[test]
    fn test_quote_table_name_rejects_malformed() {
        for bad in ["", " ", "a..b", ".reviews", "a.b.c"] {
            assert!(
                matches!(
                    quote_table_name(bad),
                    Err(PostgreSQLSinkError::InvalidTableName(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_build_insert_sql_single_row() {
        let sql = build_insert_sql("\"reviews\"", 1);
        assert_eq!(
            sql,
            "INSERT INTO \"reviews\" (\"product_id\", \"user_id\", \"rating\", \"comment\", \"created_at\") \
             VALUES ($1::int4, $2::int4, $3::int4, $4::text, $5::timestamptz)"
        );
    }

    #[test]
    fn test_build_insert_sql_numbers_params_across_rows() {
        let sql = build_insert_sql("\"reviews\"", 3);
        assert!(sql.contains("($6::int4, $7::int4, $8::int4, $9::text, $10::timestamptz)"));
        assert!(sql.ends_with("($11::int4, $12::int4, $13::int4, $14::text, $15::timestamptz)"));
        assert!(!sql.contains("$16"));
    }

    #[test]
    fn test_parameter_limit_matches_max_batch_size() {
        assert!(check_parameter_limit(MAX_BATCH_SIZE).is_ok());
        assert!(matches!(
            check_parameter_limit(MAX_BATCH_SIZE + 1),
            Err(PostgreSQLSinkError::TooManyParameters { .. })
        ));
    }

    #[test]
    fn test_generate_truncate_and_count() {
        assert_eq!(
            generate_truncate_table("reviews").unwrap(),
            "TRUNCATE TABLE \"reviews\""
        );
        assert_eq!(
            generate_count("public.reviews").unwrap(),
            "SELECT COUNT(*) FROM \"public\".\"reviews\""
        );
    }
}
