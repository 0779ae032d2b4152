//! Categorical breakdowns, rankings, and filter selector options.

use std::borrow::Borrow;

use insight_model::{ALL_VALUES, CategoryBucket, Record, SemanticRole};

use crate::context::AnalyticsContext;

/// Bucket name for records with no value in the grouping column.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// What each grouped record contributes to its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMeasure {
    Count,
    /// Value of the role's bound column; zero when the role is unbound.
    Sum(SemanticRole),
}

/// Groups records by the column of `group_by` (or its positional fallback).
///
/// One bucket per distinct value, in order of first appearance. Empty when
/// the dataset has no column to group by.
pub fn category_breakdown<R: Borrow<Record>>(
    records: &[R],
    ctx: &AnalyticsContext<'_>,
    group_by: SemanticRole,
    measure: CategoryMeasure,
) -> Vec<CategoryBucket> {
    let Some(column) = ctx.grouping_column(group_by) else {
        return Vec::new();
    };
    let measure_column = match measure {
        CategoryMeasure::Count => None,
        CategoryMeasure::Sum(role) => Some(ctx.column(role)),
    };

    let mut buckets: Vec<CategoryBucket> = Vec::new();
    for record in records {
        let record = record.borrow();
        let amount = match measure_column {
            None => 1.0,
            Some(Some(column)) => record.number(column),
            Some(None) => 0.0,
        };
        accumulate(&mut buckets, category_name(record, column), amount);
    }
    buckets
}

/// Department record count.
pub fn department_counts<R: Borrow<Record>>(
    records: &[R],
    ctx: &AnalyticsContext<'_>,
) -> Vec<CategoryBucket> {
    category_breakdown(records, ctx, SemanticRole::Department, CategoryMeasure::Count)
}

/// Department profit totals.
pub fn department_profit<R: Borrow<Record>>(
    records: &[R],
    ctx: &AnalyticsContext<'_>,
) -> Vec<CategoryBucket> {
    category_breakdown(
        records,
        ctx,
        SemanticRole::Department,
        CategoryMeasure::Sum(SemanticRole::Profit),
    )
}

/// Regions ranked by revenue, or by record count when Revenue is unbound.
///
/// Sorting is stable descending, so equal weights keep first-appearance order.
/// At most `top_n` entries from the context options are returned.
pub fn ranked_breakdown<R: Borrow<Record>>(
    records: &[R],
    ctx: &AnalyticsContext<'_>,
) -> Vec<CategoryBucket> {
    let measure = if ctx.column(SemanticRole::Revenue).is_some() {
        CategoryMeasure::Sum(SemanticRole::Revenue)
    } else {
        CategoryMeasure::Count
    };
    let mut buckets = category_breakdown(records, ctx, SemanticRole::Region, measure);
    buckets.sort_by(|a, b| b.value.total_cmp(&a.value));
    buckets.truncate(ctx.options.top_n);
    buckets
}

/// Selector values for a role: `"All"` followed by the distinct non-blank
/// values of its bound column, in first-appearance order.
///
/// Only bound roles offer values, since role filters on unbound roles have
/// no effect.
pub fn filter_options<R: Borrow<Record>>(
    records: &[R],
    ctx: &AnalyticsContext<'_>,
    role: SemanticRole,
) -> Vec<String> {
    let mut options = vec![ALL_VALUES.to_string()];
    let Some(column) = ctx.column(role) else {
        return options;
    };
    for record in records {
        let value = record.borrow().text(column);
        if value.trim().is_empty() || options[1..].contains(&value) {
            continue;
        }
        options.push(value);
    }
    options
}

fn category_name(record: &Record, column: &str) -> String {
    let value = record.text(column);
    if value.trim().is_empty() {
        UNKNOWN_CATEGORY.to_string()
    } else {
        value
    }
}

fn accumulate(buckets: &mut Vec<CategoryBucket>, name: String, amount: f64) {
    match buckets.iter_mut().find(|bucket| bucket.name == name) {
        Some(bucket) => bucket.value += amount,
        None => buckets.push(CategoryBucket::new(name, amount)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_model::{ColumnBinding, Value};

    fn rows() -> Vec<Record> {
        [
            ("Sales", "East", Value::Number(100.0)),
            ("Ops", "West", Value::Number(300.0)),
            ("Sales", "North", Value::Number(300.0)),
            ("", "East", Value::from("oops")),
        ]
        .into_iter()
        .map(|(dept, region, rev)| {
            Record::from_pairs([
                ("dept", Value::from(dept)),
                ("area", Value::from(region)),
                ("rev", rev),
            ])
        })
        .collect()
    }

    fn columns() -> Vec<String> {
        vec!["dept".to_string(), "area".to_string(), "rev".to_string()]
    }

    #[test]
    fn counts_fall_back_to_first_column() {
        let records = rows();
        let binding = ColumnBinding::new();
        let cols = columns();
        let ctx = AnalyticsContext::new(&binding, &cols);
        let buckets = department_counts(&records, &ctx);
        assert_eq!(
            buckets,
            vec![
                CategoryBucket::new("Sales", 2.0),
                CategoryBucket::new("Ops", 1.0),
                CategoryBucket::new(UNKNOWN_CATEGORY, 1.0),
            ]
        );
    }

    #[test]
    fn department_profit_sums_bound_column() {
        let records = rows();
        let mut binding = ColumnBinding::new();
        binding.bind(SemanticRole::Department, "dept");
        binding.bind(SemanticRole::Profit, "rev");
        let cols = columns();
        let ctx = AnalyticsContext::new(&binding, &cols);
        assert_eq!(
            department_profit(&records, &ctx),
            vec![
                CategoryBucket::new("Sales", 400.0),
                CategoryBucket::new("Ops", 300.0),
                CategoryBucket::new(UNKNOWN_CATEGORY, 0.0),
            ]
        );
    }

    #[test]
    fn department_profit_is_zero_without_profit_column() {
        let records = rows();
        let mut binding = ColumnBinding::new();
        binding.bind(SemanticRole::Department, "dept");
        let cols = columns();
        let ctx = AnalyticsContext::new(&binding, &cols);
        let buckets = department_profit(&records, &ctx);
        let names: Vec<&str> = buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Sales", "Ops", UNKNOWN_CATEGORY]);
        assert!(buckets.iter().all(|bucket| bucket.value == 0.0));
    }

    #[test]
    fn ranking_is_stable_descending() {
        let records = rows();
        let mut binding = ColumnBinding::new();
        binding.bind(SemanticRole::Revenue, "rev");
        let cols = columns();
        let ctx = AnalyticsContext::new(&binding, &cols);
        let ranked = ranked_breakdown(&records, &ctx);
        let names: Vec<&str> = ranked.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["West", "North", "East"]);
    }

    #[test]
    fn ranking_counts_without_revenue() {
        let records = rows();
        let binding = ColumnBinding::new();
        let cols = columns();
        let options = crate::AnalyticsOptions {
            top_n: 1,
            ..Default::default()
        };
        let ctx = AnalyticsContext::new(&binding, &cols).with_options(options);
        assert_eq!(ranked_breakdown(&records, &ctx), vec![CategoryBucket::new("East", 2.0)]);
    }

    #[test]
    fn options_start_with_all_and_skip_blanks() {
        let records = rows();
        let mut binding = ColumnBinding::new();
        binding.bind(SemanticRole::Department, "dept");
        let cols = columns();
        let ctx = AnalyticsContext::new(&binding, &cols);
        assert_eq!(
            filter_options(&records, &ctx, SemanticRole::Department),
            vec![ALL_VALUES.to_string(), "Sales".to_string(), "Ops".to_string()]
        );
        assert_eq!(filter_options(&records, &ctx, SemanticRole::Region), vec![ALL_VALUES]);
    }
}
