use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Statement};
use serde::Serialize;

/// Date-bearing action columns the month filter can target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MonthField {
    Deadline,
    PlannedOn,
}

impl MonthField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "deadline" => Some(Self::Deadline),
            "planned_on" => Some(Self::PlannedOn),
            _ => None,
        }
    }

    fn column_name(self) -> &'static str {
        match self {
            Self::Deadline => "deadline",
            Self::PlannedOn => "planned_on",
        }
    }
}

/// One (month, year) pair actually present in the data. Filter values
/// are exchanged as `MM-YYYY`, labels as `{month name} {year}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    fn new(year: i32, month: u32) -> Option<Self> {
        // Reject months without a representable successor month
        NaiveDate::from_ymd_opt(year, month, 1)?;
        let (next_year, next_month) = next_month(year, month);
        NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
        Some(Self { year, month })
    }

    /// Parse a selected filter value (`01-2024`). Anything malformed
    /// yields `None`; callers then leave the result set unchanged.
    pub fn parse(value: &str) -> Option<Self> {
        let (month, year) = value.split_once('-')?;
        let month: u32 = month.parse().ok()?;
        let year: i32 = year.parse().ok()?;
        Self::new(year, month)
    }

    /// Parse the `YYYY-MM` form produced by `strftime('%Y-%m', …)`.
    fn parse_year_month(value: &str) -> Option<Self> {
        let (year, month) = value.split_once('-')?;
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        Self::new(year, month)
    }

    pub fn value(&self) -> String {
        format!("{:02}-{}", self.month, self.year)
    }

    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => self.value(),
        }
    }

    /// Half-open date range `[first of month, first of next month)`.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let (next_year, next_month) = next_month(self.year, self.month);
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
        Some((start, end))
    }

    /// Same range as UTC datetimes, for datetime columns.
    pub fn datetime_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let (start, end) = self.date_bounds()?;
        Some((
            start.and_hms_opt(0, 0, 0)?.and_utc(),
            end.and_hms_opt(0, 0, 0)?.and_utc(),
        ))
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// A selectable filter option for the admin list sidebar.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthOption {
    pub value: String,
    pub label: String,
}

/// Months actually used by at least one action for the given field,
/// most recent first.
pub async fn distinct_months(
    db: &DatabaseConnection,
    field: MonthField,
) -> Result<Vec<MonthOption>, DbErr> {
    let column = field.column_name();
    let rows = db
        .query_all(Statement::from_string(
            DbBackend::Sqlite,
            format!(
                "SELECT DISTINCT strftime('%Y-%m', {column}) AS ym \
                 FROM actions WHERE {column} IS NOT NULL ORDER BY ym DESC"
            ),
        ))
        .await?;

    let mut months = Vec::with_capacity(rows.len());
    for row in rows {
        let ym: String = row.try_get("", "ym")?;
        if let Some(key) = MonthKey::parse_year_month(&ym) {
            months.push(MonthOption {
                value: key.value(),
                label: key.label(),
            });
        }
    }
    Ok(months)
}
