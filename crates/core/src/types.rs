/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary values map to NUMERIC(10,2) columns.
pub type Money = rust_decimal::Decimal;
