//! Contact storage on top of a SQLite connection pool.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::models::{Contact, NewContact, UpdateContact};
use crate::schema;

/// Storage handle shared by all request handlers.
///
/// Cloning is cheap; every clone refers to the same pool. Each operation
/// acquires a connection for its own duration and returns it on completion.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Connect to the database at `database_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the database cannot be opened.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create an in-memory database with the schema already in place.
    ///
    /// The pool is pinned to a single connection that never expires, since
    /// every SQLite connection to `:memory:` opens a separate database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema creation fails.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let db = Self { pool };
        db.create_tables().await?;
        Ok(db)
    }

    /// Create the `contacts` table if it does not exist yet.
    pub async fn create_tables(&self) -> Result<(), sqlx::Error> {
        schema::create_tables(&self.pool).await
    }

    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All contacts in insertion order.
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            "SELECT id, first_name, last_name, email FROM contacts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_contact(&self, id: i64) -> Result<Option<Contact>, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            "SELECT id, first_name, last_name, email FROM contacts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a contact and return its newly assigned id.
    pub async fn create_contact(&self, contact: &NewContact) -> Result<i64, sqlx::Error> {
        let result =
            sqlx::query("INSERT INTO contacts (first_name, last_name, email) VALUES (?, ?, ?)")
                .bind(&contact.first_name)
                .bind(&contact.last_name)
                .bind(&contact.email)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Apply `changes` to the contact with the given id, returning whether it existed.
    ///
    /// Fields left as `None` keep their stored value. Lookup and write are a
    /// single statement, so no read lock is held while waiting to write.
    pub async fn update_contact(
        &self,
        id: i64,
        changes: UpdateContact,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r"
            UPDATE contacts SET
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                email = COALESCE(?, email)
            WHERE id = ?
            ",
        )
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.email)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete the contact with the given id, returning whether it existed.
    pub async fn delete_contact(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
