//! Flat presentation shapes derived from aggregation outputs.

use std::collections::BTreeMap;

use serde::Serialize;

use insight_model::{
    CategoryBucket, KpiSet, ProfitPoint, Record, SemanticRole, TimeBucket, format_numeric,
};

use crate::paginate::Page;

/// A labelled headline value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
}

impl KpiCard {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Rounds to cents and drops trailing fractional zeros.
pub fn format_amount(value: f64) -> String {
    format_numeric((value * 100.0).round() / 100.0)
}

pub fn kpi_cards(kpis: &KpiSet) -> Vec<KpiCard> {
    vec![
        KpiCard::new("Total Revenue", format_amount(kpis.total_revenue)),
        KpiCard::new("Total Profit", format_amount(kpis.total_profit)),
        KpiCard::new("Total Expenses", format_amount(kpis.total_expenses)),
        KpiCard::new("Total Units", format_amount(kpis.total_units)),
        KpiCard::new("Top Rating", kpis.top_rating.clone()),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// A named series of labelled points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn new(name: &str, points: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            name: name.to_string(),
            points: points
                .into_iter()
                .map(|(label, value)| ChartPoint { label, value })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Revenue and expenses as two series sharing the period labels.
pub fn time_series_charts(buckets: &[TimeBucket]) -> Vec<ChartSeries> {
    vec![
        ChartSeries::new(
            "Revenue",
            buckets.iter().map(|b| (b.period_label.clone(), b.revenue)),
        ),
        ChartSeries::new(
            "Expenses",
            buckets.iter().map(|b| (b.period_label.clone(), b.expenses)),
        ),
    ]
}

pub fn profit_chart(points: &[ProfitPoint]) -> ChartSeries {
    ChartSeries::new(
        "Profit",
        points
            .iter()
            .map(|p| (p.sequence_index.to_string(), p.profit)),
    )
}

pub fn category_chart(name: &str, buckets: &[CategoryBucket]) -> ChartSeries {
    ChartSeries::new(name, buckets.iter().map(|b| (b.name.clone(), b.value)))
}

/// String table for one ledger page, one row per record in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LedgerTable {
    pub fn from_records(columns: &[String], records: &[&Record]) -> Self {
        let rows = records
            .iter()
            .map(|record| columns.iter().map(|column| record.text(column)).collect())
            .collect();
        Self {
            columns: columns.to_vec(),
            rows,
        }
    }
}

/// Page bookkeeping without the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_records: usize,
}

impl<T> From<&Page<T>> for PageSummary {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            total_records: page.total_records,
        }
    }
}

/// Everything a dashboard renders for the current filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub kpis: KpiSet,
    pub kpi_cards: Vec<KpiCard>,
    pub time_series: Vec<TimeBucket>,
    pub profit_trend: Vec<ProfitPoint>,
    pub department_counts: Vec<CategoryBucket>,
    pub department_profit: Vec<CategoryBucket>,
    pub region_ranking: Vec<CategoryBucket>,
    pub filter_options: BTreeMap<SemanticRole, Vec<String>>,
    pub page: PageSummary,
    pub ledger: LedgerTable,
}

impl DashboardReport {
    /// Every chart series in display order.
    pub fn charts(&self) -> Vec<ChartSeries> {
        let mut charts = time_series_charts(&self.time_series);
        charts.push(profit_chart(&self.profit_trend));
        charts.push(category_chart("Department Count", &self.department_counts));
        charts.push(category_chart("Department Profit", &self.department_profit));
        charts.push(category_chart("Top Regions", &self.region_ranking));
        charts
    }
}
