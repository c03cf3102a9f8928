#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub account_type: String,
    pub institution: Option<String>,
    /// Maximum days of inactivity considered normal. `None` means the
    /// account is excluded from coverage tracking.
    pub expected_frequency: Option<u32>,
}

/// Intermediate representation from the CSV parser before DB insert.
#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub date: String,
    pub description: String,
    pub amount: f64,
}
