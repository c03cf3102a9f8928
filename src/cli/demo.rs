use chrono::{Duration, Local};

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::get_data_dir;

const ACCOUNT_NAME: &str = "Demo Checking";

const VENDORS: &[(&str, f64)] = &[
    ("ADOBE CREATIVE CLOUD", -54.99),
    ("GITHUB INC", -21.00),
    ("AMAZON WEB SERVICES", -189.00),
    ("COMCAST BUSINESS", -129.99),
    ("COSTCO WHOLESALE", -84.12),
    ("CLIENT PAYMENT", 2400.00),
];

/// Seed a sample account with deliberately gappy activity: weekly imports,
/// then a six-week silence, then sparser activity up to a few days ago. With
/// the default 14-day frequency this produces one interior gap and clean
/// trailing coverage.
pub fn run() -> Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let conn = get_connection(&data_dir.join("lacuna.db"))?;
    init_db(&conn)?;

    let exists: bool = conn
        .prepare("SELECT 1 FROM accounts WHERE name = ?1")?
        .exists([ACCOUNT_NAME])?;
    if exists {
        println!("Demo data already loaded. Run `lacuna coverage` to see it.");
        return Ok(());
    }

    conn.execute(
        "INSERT INTO accounts (name, account_type, institution, expected_frequency) \
         VALUES (?1, 'checking', 'Demo Bank', 14)",
        [ACCOUNT_NAME],
    )?;
    let account_id = conn.last_insert_rowid();

    let today = Local::now().date_naive();
    let mut offsets: Vec<i64> = Vec::new();
    // Weekly activity for three months...
    let mut back = 180;
    while back > 90 {
        offsets.push(back);
        back -= 7;
    }
    // ...six weeks of silence, then sparser activity until recently.
    let mut back = 45;
    while back >= 5 {
        offsets.push(back);
        back -= 10;
    }

    for (i, offset) in offsets.iter().enumerate() {
        let date = today - Duration::days(*offset);
        let (vendor, amount) = VENDORS[i % VENDORS.len()];
        conn.execute(
            "INSERT INTO transactions (account_id, date, description, amount) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![account_id, date.format("%Y-%m-%d").to_string(), vendor, amount],
        )?;
    }

    println!(
        "Loaded {} demo transactions into '{ACCOUNT_NAME}'. Run `lacuna coverage` to see the gap.",
        offsets.len()
    );
    Ok(())
}
