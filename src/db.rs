use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::time::Duration;

use crate::business::{Business, NewBusiness};
use crate::error::{DirectoryError, DirectoryResult};

/// Pool of SQLite connections shared by every request handler
pub type DbPool = r2d2::Pool<SqliteConnectionManager>;

const INSERT_SQL: &str = "INSERT INTO businesses
    (name, address, city, state, zip_code, phone, latitude, longitude, rating, review_count, categories, url)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";

const UPDATE_SQL: &str = "UPDATE businesses
    SET name = ?1, address = ?2, city = ?3, state = ?4, zip_code = ?5, phone = ?6,
        latitude = ?7, longitude = ?8, rating = ?9, review_count = ?10, categories = ?11, url = ?12
    WHERE id = ?13";

const DELETE_SQL: &str = "DELETE FROM businesses WHERE id = ?1";

// `\` escapes wildcards coming from the query text, see escape_like()
const SEARCH_SQL: &str = r"SELECT id, name, address, city, state, zip_code, phone,
        latitude, longitude, rating, review_count, categories, url
    FROM businesses
    WHERE categories LIKE ?1 ESCAPE '\'
       OR city LIKE ?1 ESCAPE '\'
       OR name LIKE ?1 ESCAPE '\'
    ORDER BY review_count DESC";

// ============================================================================
// Pool & schema bootstrap
// ============================================================================

/// Open a pool of connections to the SQLite file at `path`.
///
/// Fails if the first connections cannot be established within
/// `connect_timeout`.
pub fn open_pool(path: &Path, max_size: u32, connect_timeout: Duration) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(path).with_init(|conn| {
        // WAL lets readers proceed while a writer holds the lock
        conn.pragma_update(None, "journal_mode", "WAL")
    });

    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(connect_timeout)
        .build(manager)
        .with_context(|| format!("Failed to open database at {:?}", path))?;

    Ok(pool)
}

/// Create the `businesses` table when it does not exist yet.
/// Existing tables are left untouched.
pub fn setup_database(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS businesses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            zip_code TEXT NOT NULL,
            phone TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            rating REAL NOT NULL,
            review_count INTEGER NOT NULL,
            categories TEXT NOT NULL,
            url TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create businesses table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_businesses_review_count ON businesses(review_count)",
        [],
    )
    .context("Failed to create review_count index")?;

    Ok(())
}

// ============================================================================
// Statements
// ============================================================================

/// Insert a new business and return the identifier storage assigned
pub fn insert_business(conn: &Connection, record: &NewBusiness) -> DirectoryResult<i64> {
    let mut stmt = conn.prepare(INSERT_SQL).map_err(DirectoryError::Prepare)?;

    stmt.execute(params![
        record.name,
        record.address,
        record.city,
        record.state,
        record.zip_code,
        record.phone,
        record.latitude,
        record.longitude,
        record.rating,
        record.review_count,
        record.categories_text(),
        record.url,
    ])
    .map_err(DirectoryError::Insert)?;

    Ok(conn.last_insert_rowid())
}

/// Replace every field of the row with `id`. Returns rows affected (0 when absent).
pub fn update_business(conn: &Connection, id: i64, record: &NewBusiness) -> DirectoryResult<usize> {
    let mut stmt = conn.prepare(UPDATE_SQL).map_err(DirectoryError::Prepare)?;

    let affected = stmt
        .execute(params![
            record.name,
            record.address,
            record.city,
            record.state,
            record.zip_code,
            record.phone,
            record.latitude,
            record.longitude,
            record.rating,
            record.review_count,
            record.categories_text(),
            record.url,
            id,
        ])
        .map_err(DirectoryError::Update)?;

    Ok(affected)
}

/// Remove the row with `id`. Returns rows affected (0 when absent).
pub fn delete_business(conn: &Connection, id: i64) -> DirectoryResult<usize> {
    let mut stmt = conn.prepare(DELETE_SQL).map_err(DirectoryError::Prepare)?;

    let affected = stmt.execute(params![id]).map_err(DirectoryError::Delete)?;

    Ok(affected)
}

/// Businesses whose categories, city or name contain `query`,
/// highest review count first.
pub fn search_businesses(conn: &Connection, query: &str) -> DirectoryResult<Vec<Business>> {
    let pattern = format!("%{}%", escape_like(query));

    let mut stmt = conn.prepare(SEARCH_SQL).map_err(DirectoryError::Prepare)?;
    let mut rows = stmt.query(params![pattern]).map_err(DirectoryError::Query)?;

    let mut businesses = Vec::new();
    while let Some(row) = rows.next().map_err(DirectoryError::Query)? {
        businesses.push(business_from_row(row).map_err(DirectoryError::Scan)?);
    }

    Ok(businesses)
}

pub fn count_businesses(conn: &Connection) -> DirectoryResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM businesses", [], |row| row.get(0))
        .map_err(DirectoryError::Query)
}

fn business_from_row(row: &Row<'_>) -> rusqlite::Result<Business> {
    Ok(Business {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        city: row.get(3)?,
        state: row.get(4)?,
        zip_code: row.get(5)?,
        phone: row.get(6)?,
        latitude: row.get(7)?,
        longitude: row.get(8)?,
        rating: row.get(9)?,
        review_count: row.get(10)?,
        categories: row.get(11)?,
        url: row.get(12)?,
    })
}

/// Escape LIKE wildcards so the query text matches literally
pub fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
