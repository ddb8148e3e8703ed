/// Schema metadata for PostgreSQL tables.
///
/// Provides compile-time SQL generation for table creation and indexing.
/// All methods return `&'static str` so statements can be assembled with
/// `const_format::concatcp!` against the table name constants.
///
/// # Design
///
/// This trait contains no I/O operations; it purely describes table
/// structure. [`migrate`] is the only place the statements are executed.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
}

/// Creates a table and its indices if they do not exist yet.
///
/// Idempotent, so it is safe to run on every startup.
pub async fn migrate<S: Schema>(client: &tokio_postgres::Client) -> Result<(), super::PgErr> {
    log::debug!("creating table ({})", S::name());
    client.batch_execute(S::creates()).await?;
    client.batch_execute(S::indices()).await?;
    Ok(())
}
