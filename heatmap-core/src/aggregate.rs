use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Cell, DailyRecord};

/// Lowest `min` and highest `max` across a set of days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureExtent {
    pub low: f64,
    pub high: f64,
}

/// Group records by year, then zero-based month, and summarize each group.
///
/// Months without data get no cell. Each cell's days are sorted by date.
pub fn aggregate(records: &[DailyRecord]) -> Vec<Cell> {
    let mut by_year: BTreeMap<i32, BTreeMap<u32, Vec<DailyRecord>>> = BTreeMap::new();

    for record in records {
        by_year
            .entry(record.year())
            .or_default()
            .entry(record.month0())
            .or_default()
            .push(*record);
    }

    by_year
        .into_iter()
        .flat_map(|(year, months)| {
            months
                .into_iter()
                .map(move |(month, days)| summarize(year, month, days))
        })
        .collect()
}

fn summarize(year: i32, month: u32, mut days: Vec<DailyRecord>) -> Cell {
    days.sort_by_key(|d| d.date);
    let count = days.len() as f64;
    let avg_max = days.iter().map(|d| d.max).sum::<f64>() / count;
    let avg_min = days.iter().map(|d| d.min).sum::<f64>() / count;

    Cell {
        year,
        month,
        avg_max,
        avg_min,
        days,
    }
}

/// Distinct years among the cells, ascending.
pub fn distinct_years(cells: &[Cell]) -> Vec<i32> {
    let mut years: Vec<i32> = cells.iter().map(|c| c.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Global extent over every day of every cell, `None` when there are no days.
pub fn temperature_extent(cells: &[Cell]) -> Option<TemperatureExtent> {
    let mut days = cells.iter().flat_map(|c| c.days.iter());
    let first = days.next()?;

    Some(days.fold(
        TemperatureExtent {
            low: first.min.min(first.max),
            high: first.max.max(first.min),
        },
        |acc, d| TemperatureExtent {
            low: acc.low.min(d.min).min(d.max),
            high: acc.high.max(d.max).max(d.min),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32, max: f64, min: f64) -> DailyRecord {
        DailyRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), max, min)
    }

    #[test]
    fn averages_are_means_over_the_cells_days() {
        let records = vec![
            day(2020, 1, 3, 10.0, 0.0),
            day(2020, 1, 1, 20.0, 5.0),
            day(2020, 2, 1, 7.0, -3.0),
            day(2021, 1, 1, 1.0, 1.0),
            day(2020, 1, 2, 30.0, 10.0),
        ];

        let cells = aggregate(&records);
        assert_eq!(cells.len(), 3);

        for cell in &cells {
            let expected: Vec<_> = records
                .iter()
                .filter(|r| r.year() == cell.year && r.month0() == cell.month)
                .collect();
            assert_eq!(cell.days.len(), expected.len());
            let n = expected.len() as f64;
            assert_eq!(cell.avg_max, expected.iter().map(|r| r.max).sum::<f64>() / n);
            assert_eq!(cell.avg_min, expected.iter().map(|r| r.min).sum::<f64>() / n);
        }

        let jan = cells.iter().find(|c| c.year == 2020 && c.month == 0).unwrap();
        assert_eq!(jan.avg_max, 20.0);
        assert_eq!(jan.avg_min, 5.0);
        let dates: Vec<u32> = jan.days.iter().map(|d| chrono::Datelike::day(&d.date)).collect();
        assert_eq!(dates, vec![1, 2, 3]);
    }

    #[test]
    fn sparse_months_produce_no_cell_and_pairs_are_unique() {
        let records = vec![day(2020, 3, 1, 1.0, 0.0), day(2020, 3, 2, 1.0, 0.0), day(2020, 11, 5, 1.0, 0.0)];
        let cells = aggregate(&records);
        let keys: Vec<(i32, u32)> = cells.iter().map(|c| (c.year, c.month)).collect();
        assert_eq!(keys, vec![(2020, 2), (2020, 10)]);
    }

    #[test]
    fn single_day_month_is_a_valid_cell() {
        let cells = aggregate(&[day(2019, 6, 15, 25.5, 14.0)]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].avg_max, 25.5);
        assert_eq!(cells[0].avg_min, 14.0);
        assert_eq!(cells[0].days.len(), 1);
    }

    #[test]
    fn years_and_extent() {
        let cells = aggregate(&[
            day(2021, 1, 1, 12.0, -4.0),
            day(2019, 1, 1, 33.0, 8.0),
            day(2021, 5, 1, 20.0, 2.0),
        ]);
        assert_eq!(distinct_years(&cells), vec![2019, 2021]);
        assert_eq!(
            temperature_extent(&cells),
            Some(TemperatureExtent { low: -4.0, high: 33.0 })
        );
        assert_eq!(temperature_extent(&[]), None);
    }
}
