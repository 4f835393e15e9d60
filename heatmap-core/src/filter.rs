use crate::model::DailyRecord;

/// Default size of the year window.
pub const DEFAULT_YEARS: u32 = 10;

/// Keep the records from the most recent `years` calendar years present in the data.
///
/// The window ends at the latest year found in `records`, not the current
/// date, and does not care how many rows each year has.
pub fn filter_last_years(records: &[DailyRecord], years: u32) -> Vec<DailyRecord> {
    let Some(max_year) = records.iter().map(DailyRecord::year).max() else {
        return Vec::new();
    };
    let cutoff = i64::from(max_year) - i64::from(years);

    records
        .iter()
        .filter(|r| i64::from(r.year()) > cutoff)
        .copied()
        .collect()
}
