use std::path::Path;

use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::db::get_account;
use crate::error::{LacunaError, Result};
use crate::models::ParsedRow;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return -inner.trim().parse::<f64>().unwrap_or(0.0);
    }
    s.parse().unwrap_or(0.0)
}

/// Normalize a date cell to YYYY-MM-DD. Accepts ISO dates and US-style
/// M/D/YYYY.
pub fn parse_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
        return Some(raw.to_string());
    }
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let m: u32 = parts[0].parse().ok()?;
    let d: u32 = parts[1].parse().ok()?;
    let y: i32 = parts[2].parse().ok()?;
    chrono::NaiveDate::from_ymd_opt(y, m, d).map(|dt| dt.format("%Y-%m-%d").to_string())
}

fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

fn is_duplicate_row(conn: &Connection, account_id: i64, row: &ParsedRow) -> bool {
    let mut stmt = conn
        .prepare_cached(
            "SELECT 1 FROM transactions WHERE account_id = ?1 AND date = ?2 AND amount = ?3 AND description = ?4",
        )
        .unwrap();
    stmt.exists(rusqlite::params![account_id, row.date, row.amount, row.description])
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

fn header_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| LacunaError::UnknownFormat(format!("missing '{name}' column")))
}

fn parse_csv(file_path: &Path) -> Result<Vec<ParsedRow>> {
    let mut reader = csv::Reader::from_path(file_path)?;
    let headers = reader.headers()?.clone();
    let date_idx = header_index(&headers, "date")?;
    let desc_idx = header_index(&headers, "description")?;
    let amount_idx = header_index(&headers, "amount")?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let raw_date = record.get(date_idx).unwrap_or("");
        let date = parse_date(raw_date).ok_or_else(|| {
            LacunaError::Other(format!("row {}: unrecognized date '{raw_date}'", line + 2))
        })?;
        rows.push(ParsedRow {
            date,
            description: record.get(desc_idx).unwrap_or("").trim().to_string(),
            amount: parse_amount(record.get(amount_idx).unwrap_or("")),
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub duplicate_file: bool,
}

pub fn import_file(conn: &Connection, file_path: &Path, account_name: &str) -> Result<ImportResult> {
    let account = get_account(conn, account_name)?;
    let checksum = compute_checksum(file_path)?;

    let already_imported: bool = conn
        .prepare("SELECT 1 FROM imports WHERE checksum = ?1")?
        .exists([&checksum])?;
    if already_imported {
        return Ok(ImportResult {
            imported: 0,
            skipped: 0,
            duplicate_file: true,
        });
    }

    let rows = parse_csv(file_path)?;
    let range_start = rows.iter().map(|r| r.date.as_str()).min().map(str::to_string);
    let range_end = rows.iter().map(|r| r.date.as_str()).max().map(str::to_string);

    let filename = file_path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.to_string_lossy().to_string());
    conn.execute(
        "INSERT INTO imports (filename, account_id, record_count, date_range_start, date_range_end, checksum) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![filename, account.id, rows.len() as i64, range_start, range_end, checksum],
    )?;
    let import_id = conn.last_insert_rowid();

    let mut imported = 0;
    let mut skipped = 0;
    for row in &rows {
        if is_duplicate_row(conn, account.id, row) {
            skipped += 1;
            continue;
        }
        conn.execute(
            "INSERT INTO transactions (account_id, date, description, amount, import_id) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![account.id, row.date, row.description, row.amount, import_id],
        )?;
        imported += 1;
    }

    Ok(ImportResult {
        imported,
        skipped,
        duplicate_file: false,
    })
}
