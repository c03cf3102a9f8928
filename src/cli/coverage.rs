use chrono::{Local, NaiveDate};
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::coverage::{analyze, CoverageReport};
use crate::db::{activity_dates, get_account, get_connection, list_accounts};
use crate::error::{LacunaError, Result};
use crate::fmt::days;
use crate::models::Account;
use crate::settings::get_data_dir;

fn parse_as_of(as_of: Option<&str>) -> Result<NaiveDate> {
    match as_of {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| LacunaError::Other(format!("invalid --as-of date '{raw}' (expected YYYY-MM-DD)"))),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn run(account: Option<String>, as_of: Option<String>) -> Result<()> {
    let as_of = parse_as_of(as_of.as_deref())?;
    let conn = get_connection(&get_data_dir().join("lacuna.db"))?;

    match account {
        Some(name) => {
            let account = get_account(&conn, &name)?;
            let dates = activity_dates(&conn, account.id)?;
            match analyze(&account.name, &dates, account.expected_frequency, as_of) {
                Some(report) => render_detail(&report, as_of),
                None if account.expected_frequency.is_none() => {
                    println!(
                        "{} is not tracked. Set a frequency with `lacuna accounts frequency`.",
                        account.name
                    );
                }
                None => println!("{} has no recorded activity.", account.name),
            }
            Ok(())
        }
        None => run_all(&conn, as_of),
    }
}

fn run_all(conn: &rusqlite::Connection, as_of: NaiveDate) -> Result<()> {
    let accounts = list_accounts(conn)?;
    if accounts.is_empty() {
        println!("No accounts yet. Add one with `lacuna accounts add`.");
        return Ok(());
    }

    let mut reports: Vec<CoverageReport> = Vec::new();
    let mut table = Table::new();
    table.set_header(vec!["Account", "First", "Last", "Periods", "Status"]);

    for account in &accounts {
        let dates = activity_dates(conn, account.id)?;
        match analyze(&account.name, &dates, account.expected_frequency, as_of) {
            Some(report) => {
                table.add_row(summary_row(&report));
                reports.push(report);
            }
            None => {
                table.add_row(skipped_row(account, dates.is_empty()));
            }
        }
    }

    println!("Coverage as of {as_of}\n{table}");

    for report in reports.iter().filter(|r| !r.complete) {
        println!();
        render_gaps(report);
    }
    Ok(())
}

fn summary_row(report: &CoverageReport) -> Vec<Cell> {
    let status = if report.complete {
        Cell::new("OK".green())
    } else if report.gaps.len() == 1 {
        Cell::new("1 gap".red())
    } else {
        Cell::new(format!("{} gaps", report.gaps.len()).red())
    };
    vec![
        Cell::new(&report.account),
        Cell::new(report.first_date),
        Cell::new(report.last_date),
        Cell::new(report.periods.len()),
        status,
    ]
}

fn skipped_row(account: &Account, no_activity: bool) -> Vec<Cell> {
    let status = if account.expected_frequency.is_none() {
        Cell::new("not tracked".dimmed())
    } else if no_activity {
        Cell::new("no activity".yellow())
    } else {
        Cell::new("".normal())
    };
    vec![
        Cell::new(&account.name),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        status,
    ]
}

fn render_detail(report: &CoverageReport, as_of: NaiveDate) {
    println!(
        "Coverage for {} as of {as_of} (expected every {})",
        report.account,
        days(i64::from(report.expected_frequency))
    );

    let mut periods = Table::new();
    periods.set_header(vec!["Period start", "Period end", "Length"]);
    for p in &report.periods {
        let length = (p.end - p.start).num_days() + 1;
        periods.add_row(vec![
            Cell::new(p.start),
            Cell::new(p.end),
            Cell::new(days(length)),
        ]);
    }
    println!("{periods}");

    if report.complete {
        println!("{}", "Coverage is complete — no gaps.".green());
    } else {
        println!();
        render_gaps(report);
    }
}

fn render_gaps(report: &CoverageReport) {
    println!(
        "{} — expected activity every {}",
        format!("Gaps in {}", report.account).red().bold(),
        days(i64::from(report.expected_frequency))
    );
    let mut table = Table::new();
    table.set_header(vec!["Gap start", "Gap end", "Missing"]);
    for gap in &report.gaps {
        table.add_row(vec![
            Cell::new(gap.start),
            Cell::new(gap.end),
            Cell::new(days(gap.days)),
        ]);
    }
    println!("{table}");
}
