use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::error::{LacunaError, Result};
use crate::models::Account;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    account_type TEXT NOT NULL,
    institution TEXT,
    expected_frequency INTEGER,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS imports (
    id INTEGER PRIMARY KEY,
    filename TEXT NOT NULL,
    account_id INTEGER NOT NULL,
    import_date TEXT DEFAULT (datetime('now')),
    record_count INTEGER,
    date_range_start TEXT,
    date_range_end TEXT,
    checksum TEXT,
    FOREIGN KEY (account_id) REFERENCES accounts(id)
);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    account_id INTEGER NOT NULL,
    date TEXT NOT NULL,
    description TEXT NOT NULL,
    amount REAL NOT NULL,
    import_id INTEGER,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (account_id) REFERENCES accounts(id),
    FOREIGN KEY (import_id) REFERENCES imports(id)
);

CREATE INDEX IF NOT EXISTS idx_transactions_account_date
    ON transactions(account_id, date);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Account queries
// ---------------------------------------------------------------------------

pub fn get_account(conn: &Connection, name: &str) -> Result<Account> {
    let mut stmt = conn.prepare(
        "SELECT id, name, account_type, institution, expected_frequency \
         FROM accounts WHERE name = ?1",
    )?;
    let mut rows = stmt.query_map([name], account_from_row)?;
    match rows.next() {
        Some(account) => Ok(account?),
        None => Err(LacunaError::UnknownAccount(name.to_string())),
    }
}

pub fn list_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, account_type, institution, expected_frequency \
         FROM accounts ORDER BY name",
    )?;
    let accounts = stmt
        .query_map([], account_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(accounts)
}

fn account_from_row(row: &rusqlite::Row) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        account_type: row.get(2)?,
        institution: row.get(3)?,
        expected_frequency: row.get(4)?,
    })
}

/// Set or clear (opt out) the expected activity frequency for an account.
pub fn set_expected_frequency(
    conn: &Connection,
    account_id: i64,
    days: Option<u32>,
) -> Result<()> {
    conn.execute(
        "UPDATE accounts SET expected_frequency = ?1 WHERE id = ?2",
        rusqlite::params![days, account_id],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Activity dates
// ---------------------------------------------------------------------------

/// Distinct transaction dates for one account, ascending. Rows whose date
/// column does not parse as YYYY-MM-DD are skipped.
pub fn activity_dates(conn: &Connection, account_id: i64) -> Result<Vec<NaiveDate>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT date FROM transactions WHERE account_id = ?1 ORDER BY date",
    )?;
    let raw: Vec<String> = stmt
        .query_map([account_id], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(raw
        .iter()
        .filter_map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .collect())
}
