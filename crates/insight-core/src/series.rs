//! Time-bucketed revenue/expense series and the positional profit trend.

use std::borrow::Borrow;

use chrono::NaiveDate;
use tracing::trace;

use insight_model::{ColumnBinding, ProfitPoint, Record, SemanticRole, TimeBucket};

use crate::options::BucketOrder;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y", "%d %b %Y"];

/// Bucket key for a raw date string: everything before the first space.
pub fn period_key(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.split(' ').next().unwrap_or(trimmed)
}

/// Best-effort calendar date of a bucket key.
///
/// Accepts common date layouts, an ISO timestamp (`2024-01-05T09:30:00`), and
/// year-month keys (`2024-01`), which sort as the first of the month.
pub fn parse_period(key: &str) -> Option<NaiveDate> {
    let date_part = key.split('T').next().unwrap_or(key);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{date_part}-01"), "%Y-%m-%d").ok())
}

/// Sums revenue and expenses per period key and keeps the last `limit` buckets.
///
/// Requires a bound Date column; otherwise the series is empty. Records
/// whose date is missing are skipped.
pub fn time_series<R: Borrow<Record>>(
    records: &[R],
    binding: &ColumnBinding,
    order: BucketOrder,
    limit: usize,
) -> Vec<TimeBucket> {
    let Some(date_column) = binding.column(SemanticRole::Date) else {
        return Vec::new();
    };
    let revenue = binding.column(SemanticRole::Revenue);
    let expense = binding.column(SemanticRole::Expense);

    let mut buckets: Vec<TimeBucket> = Vec::new();
    for record in records {
        let record = record.borrow();
        let raw = record.text(date_column);
        let key = period_key(&raw);
        if key.is_empty() {
            continue;
        }
        let index = match buckets.iter().position(|bucket| bucket.period_label == key) {
            Some(index) => index,
            None => {
                buckets.push(TimeBucket::new(key));
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[index];
        bucket.revenue += revenue.map_or(0.0, |column| record.number(column));
        bucket.expenses += expense.map_or(0.0, |column| record.number(column));
    }

    if order == BucketOrder::Chronological {
        // Stable, so unparsable keys keep their relative first-seen order.
        buckets.sort_by_key(|bucket| {
            let parsed = parse_period(&bucket.period_label);
            (parsed.is_none(), parsed)
        });
    }

    let skip = buckets.len().saturating_sub(limit);
    trace!(bucket_count = buckets.len(), kept = buckets.len() - skip, "time series built");
    buckets.split_off(skip)
}

/// Profit of the first `length` records, reversed for display.
///
/// `sequence_index` is 1-based in the reversed order. Empty when Profit is
/// unbound.
pub fn profit_trend<R: Borrow<Record>>(
    records: &[R],
    binding: &ColumnBinding,
    length: usize,
) -> Vec<ProfitPoint> {
    let Some(column) = binding.column(SemanticRole::Profit) else {
        return Vec::new();
    };
    records
        .iter()
        .take(length)
        .map(|record| record.borrow().number(column))
        .rev()
        .enumerate()
        .map(|(position, profit)| ProfitPoint {
            sequence_index: position + 1,
            profit,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_model::Value;

    fn dated(rows: &[(&str, f64)]) -> (Vec<Record>, ColumnBinding) {
        let records = rows
            .iter()
            .map(|(date, rev)| {
                Record::from_pairs([("day", Value::from(*date)), ("rev", Value::from(*rev))])
            })
            .collect();
        let mut binding = ColumnBinding::new();
        binding.bind(SemanticRole::Date, "day");
        binding.bind(SemanticRole::Revenue, "rev");
        (records, binding)
    }

    #[test]
    fn key_truncates_at_first_space() {
        assert_eq!(period_key("2024-01-05 10:30:00"), "2024-01-05");
        assert_eq!(period_key("Q1"), "Q1");
        assert_eq!(period_key("   "), "");
    }

    #[test]
    fn parses_common_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7);
        assert_eq!(parse_period("2024-03-07"), expected);
        assert_eq!(parse_period("03/07/2024"), expected);
        assert_eq!(parse_period("2024-03-07T08:00:00"), expected);
        assert_eq!(parse_period("2024-03"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(parse_period("Q1"), None);
    }

    #[test]
    fn chronological_order_is_opt_in() {
        let (records, binding) = dated(&[("2024-02-01", 1.0), ("2024-01-01", 2.0), ("later", 3.0)]);
        let first_seen = time_series(&records, &binding, BucketOrder::FirstSeen, 10);
        let labels: Vec<&str> = first_seen.iter().map(|b| b.period_label.as_str()).collect();
        assert_eq!(labels, ["2024-02-01", "2024-01-01", "later"]);

        let sorted = time_series(&records, &binding, BucketOrder::Chronological, 10);
        let labels: Vec<&str> = sorted.iter().map(|b| b.period_label.as_str()).collect();
        assert_eq!(labels, ["2024-01-01", "2024-02-01", "later"]);
    }

    #[test]
    fn keeps_last_buckets_and_skips_missing_dates() {
        let (records, binding) = dated(&[("d1", 1.0), ("", 50.0), ("d2", 2.0), ("d3", 3.0)]);
        let series = time_series(&records, &binding, BucketOrder::FirstSeen, 2);
        let labels: Vec<&str> = series.iter().map(|b| b.period_label.as_str()).collect();
        assert_eq!(labels, ["d2", "d3"]);
        assert_eq!(series.iter().map(|b| b.revenue).sum::<f64>(), 5.0);
    }

    #[test]
    fn profit_trend_reverses_leading_records() {
        let records: Vec<Record> = [10.0, 20.0, 30.0]
            .into_iter()
            .map(|profit| Record::from_pairs([("profit", profit)]))
            .collect();
        let mut binding = ColumnBinding::new();
        binding.bind(SemanticRole::Profit, "profit");
        let trend = profit_trend(&records, &binding, 2);
        assert_eq!(
            trend,
            vec![
                ProfitPoint { sequence_index: 1, profit: 20.0 },
                ProfitPoint { sequence_index: 2, profit: 10.0 },
            ]
        );
        assert!(profit_trend(&records, &ColumnBinding::new(), 2).is_empty());
    }
}
