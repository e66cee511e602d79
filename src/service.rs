// Business Directory Service
// Each operation borrows one pooled connection and runs one statement

use rusqlite::Connection;

use crate::business::{Business, NewBusiness};
use crate::db::{self, DbPool};
use crate::error::DirectoryResult;

/// The four directory operations over a connection pool.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone)]
pub struct BusinessDirectory {
    pool: DbPool,
}

impl BusinessDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run `op` on a pooled connection inside the blocking thread pool.
    /// The connection goes back to the pool when `op` returns, on every path.
    async fn with_conn<T, F>(&self, op: F) -> DirectoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> DirectoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            op(&*conn)
        })
        .await?
    }

    /// Insert a validated record; the assigned id is not exposed to callers
    pub async fn create(&self, record: NewBusiness) -> DirectoryResult<()> {
        let id = self
            .with_conn(move |conn| db::insert_business(conn, &record))
            .await?;
        tracing::debug!(id, "business inserted");
        Ok(())
    }

    /// Full replace keyed by `id`. Succeeds even when no row matches.
    pub async fn update(&self, id: i64, record: NewBusiness) -> DirectoryResult<()> {
        let affected = self
            .with_conn(move |conn| db::update_business(conn, id, &record))
            .await?;
        tracing::debug!(id, affected, "business updated");
        Ok(())
    }

    /// Succeeds whether or not the row existed
    pub async fn delete(&self, id: i64) -> DirectoryResult<()> {
        let affected = self
            .with_conn(move |conn| db::delete_business(conn, id))
            .await?;
        tracing::debug!(id, affected, "business deleted");
        Ok(())
    }

    pub async fn search(&self, query: String) -> DirectoryResult<Vec<Business>> {
        self.with_conn(move |conn| db::search_businesses(conn, &query))
            .await
    }

    pub async fn count(&self) -> DirectoryResult<i64> {
        self.with_conn(db::count_businesses).await
    }
}
