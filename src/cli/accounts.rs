use comfy_table::{Cell, Table};

use crate::db::{get_account, get_connection, set_expected_frequency};
use crate::error::{LacunaError, Result};
use crate::fmt::days;
use crate::settings::get_data_dir;

pub fn add(
    name: &str,
    account_type: &str,
    institution: Option<&str>,
    frequency: Option<u32>,
) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("lacuna.db"))?;
    conn.execute(
        "INSERT INTO accounts (name, account_type, institution, expected_frequency) \
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![name, account_type, institution, frequency],
    )?;
    match frequency {
        Some(f) => println!("Added account: {name} (expected every {})", days(i64::from(f))),
        None => println!("Added account: {name} (not tracked — set a frequency to audit it)"),
    }
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("lacuna.db"))?;
    let mut stmt = conn.prepare(
        "SELECT id, name, account_type, institution, expected_frequency FROM accounts ORDER BY name",
    )?;
    let rows: Vec<(i64, String, String, Option<String>, Option<u32>)> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type", "Institution", "Frequency"]);
    for (id, name, acct_type, inst, freq) in rows {
        table.add_row(vec![
            Cell::new(id),
            Cell::new(name),
            Cell::new(acct_type),
            Cell::new(inst.unwrap_or_default()),
            Cell::new(freq.map(|f| days(i64::from(f))).unwrap_or_else(|| "—".to_string())),
        ]);
    }
    println!("Accounts\n{table}");
    Ok(())
}

pub fn frequency(name: &str, new_days: Option<u32>, opt_out: bool) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("lacuna.db"))?;
    let account = get_account(&conn, name)?;

    if opt_out {
        set_expected_frequency(&conn, account.id, None)?;
        println!("Opted {name} out of coverage tracking");
        return Ok(());
    }
    match new_days {
        Some(d) => {
            set_expected_frequency(&conn, account.id, Some(d))?;
            println!("Set expected frequency for {name}: every {}", days(i64::from(d)));
            Ok(())
        }
        None => Err(LacunaError::Other(
            "specify --days N or --opt-out".to_string(),
        )),
    }
}
