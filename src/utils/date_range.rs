use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Named shorthand for a reporting window ending today.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, EnumString, Display)]
pub enum TimeFilter {
    #[strum(serialize = "daily")]
    Daily,
    #[strum(serialize = "weekly")]
    Weekly,
    #[default]
    #[strum(serialize = "monthly")]
    Monthly,
    #[strum(serialize = "3months")]
    ThreeMonths,
    #[strum(serialize = "6months")]
    SixMonths,
    #[strum(serialize = "yearly")]
    Yearly,
}

impl TimeFilter {
    /// Unknown or absent tokens fall back to the monthly window.
    pub fn parse_or_default(token: Option<&str>) -> Self {
        token
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or_default()
    }

    pub fn start_from(self, today: NaiveDate) -> NaiveDate {
        let start = match self {
            TimeFilter::Daily => today.checked_sub_days(Days::new(1)),
            TimeFilter::Weekly => today.checked_sub_days(Days::new(7)),
            TimeFilter::Monthly => months_back(today, 1),
            TimeFilter::ThreeMonths => months_back(today, 3),
            TimeFilter::SixMonths => months_back(today, 6),
            TimeFilter::Yearly => months_back(today, 12),
        };
        start.unwrap_or(today)
    }
}

/// Same day-of-month `months` earlier. A day the target month lacks rolls
/// over into the following month (2024-03-31 minus one month is 2024-03-02).
fn months_back(today: NaiveDate, months: u32) -> Option<NaiveDate> {
    let index = today.year() * 12 + today.month0() as i32 - months as i32;
    let first = NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)?;
    first.checked_add_days(Days::new(u64::from(today.day0())))
}

/// Inclusive `[start, end]` window.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, ToSchema)]
pub struct DateRange {
    #[schema(example = "2024-01-08", value_type = String, format = "date")]
    pub start: NaiveDate,
    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub end: NaiveDate,
}

impl DateRange {
    pub fn for_filter(filter: TimeFilter, today: NaiveDate) -> Self {
        DateRange {
            start: filter.start_from(today),
            end: today,
        }
    }

    /// An explicit pair wins when both ends parse as `YYYY-MM-DD`; anything
    /// else resolves through the named filter.
    pub fn resolve(
        time_filter: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        today: NaiveDate,
    ) -> Self {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            match (parse_iso(start), parse_iso(end)) {
                (Some(start), Some(end)) => return DateRange { start, end },
                _ => tracing::warn!(
                    start_date = start,
                    end_date = end,
                    "Ignoring malformed explicit date range"
                ),
            }
        }

        if let Some(token) = time_filter {
            if token.trim().parse::<TimeFilter>().is_err() {
                tracing::warn!(time_filter = token, "Unknown time filter, using monthly");
            }
        }

        DateRange::for_filter(TimeFilter::parse_or_default(time_filter), today)
    }
}

fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
