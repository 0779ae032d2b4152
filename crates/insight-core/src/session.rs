//! Per-dataset dashboard state: binding, filters, and the current page.

use std::collections::BTreeMap;

use tracing::debug;

use insight_model::{
    CategoryBucket, ColumnBinding, Dataset, FilterState, KpiSet, ProfitPoint, Record, Result,
    RoleFilter, SemanticRole, TimeBucket,
};

use crate::breakdown::{department_counts, department_profit, filter_options, ranked_breakdown};
use crate::context::AnalyticsContext;
use crate::filter::{matches_role_filters, matches_search};
use crate::kpi::compute_kpis;
use crate::options::{AnalyticsOptions, PagePolicy};
use crate::paginate::{Page, clamp_page, paginate, total_pages};
use crate::projection::{DashboardReport, LedgerTable, PageSummary, kpi_cards};
use crate::series::{profit_trend, time_series};

/// Roles that get a filter selector.
pub const FILTER_ROLES: [SemanticRole; 2] = [SemanticRole::Department, SemanticRole::Region];

/// Dashboard state for one selected dataset.
///
/// Every derived structure is recomputed from the filtered set on demand.
/// Filter changes re-run the filter pipeline immediately and, under
/// [`PagePolicy::Clamp`], pull the current page back into range.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    dataset: Dataset,
    binding: ColumnBinding,
    options: AnalyticsOptions,
    filters: FilterState,
    page: usize,
    /// Indices of records that pass the current filters.
    visible: Vec<usize>,
}

impl DashboardSession {
    pub fn new(dataset: Dataset, binding: ColumnBinding, options: AnalyticsOptions) -> Result<Self> {
        options.validate()?;
        let mut session = Self {
            dataset,
            binding,
            options,
            filters: FilterState::default(),
            page: 1,
            visible: Vec::new(),
        };
        session.refresh();
        Ok(session)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn binding(&self) -> &ColumnBinding {
        &self.binding
    }

    pub fn options(&self) -> &AnalyticsOptions {
        &self.options
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Current 1-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.visible.len(), self.options.page_size)
    }

    pub fn filtered_len(&self) -> usize {
        self.visible.len()
    }

    pub fn filtered_records(&self) -> Vec<&Record> {
        let records = self.dataset.records();
        self.visible.iter().map(|&index| &records[index]).collect()
    }

    pub fn context(&self) -> AnalyticsContext<'_> {
        AnalyticsContext::new(&self.binding, self.dataset.columns()).with_options(self.options)
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filters.set_search(text);
        self.refresh();
    }

    pub fn set_role_filter(&mut self, role: SemanticRole, filter: impl Into<RoleFilter>) {
        self.filters.set_role_filter(role, filter);
        self.refresh();
    }

    pub fn apply_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.refresh();
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.refresh();
    }

    /// Replaces the binding, e.g. after merging remote hints.
    pub fn rebind(&mut self, binding: ColumnBinding) {
        self.binding = binding;
        self.refresh();
    }

    /// Switches to another dataset with fresh filters on page 1.
    pub fn select_dataset(&mut self, dataset: Dataset, binding: ColumnBinding) {
        self.dataset = dataset;
        self.binding = binding;
        self.filters = FilterState::default();
        self.page = 1;
        self.refresh();
    }

    /// Requests a page and returns the page actually selected.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = match self.options.page_policy {
            PagePolicy::Clamp => clamp_page(page, self.total_pages()),
            PagePolicy::Preserve => page.max(1),
        };
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.set_page(self.page.saturating_sub(1))
    }

    pub fn kpis(&self) -> KpiSet {
        compute_kpis(
            &self.filtered_records(),
            &self.binding,
            self.options.rating_tie_break,
        )
    }

    pub fn time_series(&self) -> Vec<TimeBucket> {
        time_series(
            &self.filtered_records(),
            &self.binding,
            self.options.bucket_order,
            self.options.series_limit,
        )
    }

    pub fn profit_trend(&self) -> Vec<ProfitPoint> {
        profit_trend(
            &self.filtered_records(),
            &self.binding,
            self.options.trend_length,
        )
    }

    pub fn department_counts(&self) -> Vec<CategoryBucket> {
        department_counts(&self.filtered_records(), &self.context())
    }

    pub fn department_profit(&self) -> Vec<CategoryBucket> {
        department_profit(&self.filtered_records(), &self.context())
    }

    pub fn region_ranking(&self) -> Vec<CategoryBucket> {
        ranked_breakdown(&self.filtered_records(), &self.context())
    }

    /// Selector values per filterable role, drawn from the whole dataset.
    pub fn filter_options(&self) -> BTreeMap<SemanticRole, Vec<String>> {
        let ctx = self.context();
        FILTER_ROLES
            .into_iter()
            .map(|role| (role, filter_options(self.dataset.records(), &ctx, role)))
            .collect()
    }

    pub fn current_page(&self) -> Page<&Record> {
        paginate(&self.filtered_records(), self.page, self.options.page_size)
    }

    /// Computes every dashboard output for the current state in one pass
    /// over the filtered set.
    pub fn report(&self) -> DashboardReport {
        let records = self.filtered_records();
        let ctx = self.context();
        let kpis = compute_kpis(&records, &self.binding, self.options.rating_tie_break);
        let page = paginate(&records, self.page, self.options.page_size);
        DashboardReport {
            kpi_cards: kpi_cards(&kpis),
            kpis,
            time_series: time_series(
                &records,
                &self.binding,
                self.options.bucket_order,
                self.options.series_limit,
            ),
            profit_trend: profit_trend(&records, &self.binding, self.options.trend_length),
            department_counts: department_counts(&records, &ctx),
            department_profit: department_profit(&records, &ctx),
            region_ranking: ranked_breakdown(&records, &ctx),
            filter_options: self.filter_options(),
            page: PageSummary::from(&page),
            ledger: LedgerTable::from_records(self.dataset.columns(), &page.items),
        }
    }

    fn refresh(&mut self) {
        let needle = self.filters.search_text.to_lowercase();
        let visible: Vec<usize> = self
            .dataset
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                matches_search(record, &needle)
                    && matches_role_filters(record, &self.binding, &self.filters)
            })
            .map(|(index, _)| index)
            .collect();
        self.visible = visible;
        if self.options.page_policy == PagePolicy::Clamp {
            self.page = clamp_page(self.page, self.total_pages());
        }
        debug!(
            record_count = self.dataset.len(),
            visible_count = self.visible.len(),
            page = self.page,
            "filters applied"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rows: usize, options: AnalyticsOptions) -> DashboardSession {
        let records = (0..rows)
            .map(|i| {
                let region = if i % 2 == 0 { "East" } else { "West" };
                Record::from_pairs([("region", region)])
            })
            .collect();
        let mut binding = ColumnBinding::new();
        binding.bind(SemanticRole::Region, "region");
        DashboardSession::new(Dataset::from_records(records), binding, options)
            .expect("valid options")
    }

    #[test]
    fn filter_change_clamps_page() {
        let mut session = session(20, AnalyticsOptions::default().with_page_size(4));
        assert_eq!(session.set_page(5), 5);
        session.set_role_filter(SemanticRole::Region, "East");
        assert_eq!(session.total_pages(), 3);
        assert_eq!(session.page(), 3);
        assert_eq!(session.current_page().items.len(), 2);
    }

    #[test]
    fn preserve_policy_keeps_stale_page() {
        let options = AnalyticsOptions::default()
            .with_page_size(4)
            .with_page_policy(PagePolicy::Preserve);
        let mut session = session(20, options);
        session.set_page(5);
        session.set_search("nothing matches");
        assert_eq!(session.page(), 5);
        assert!(session.current_page().is_empty());
    }

    #[test]
    fn page_clamps_to_one_when_empty() {
        let mut session = session(3, AnalyticsOptions::default());
        session.set_search("zzz");
        assert_eq!(session.total_pages(), 0);
        assert_eq!(session.page(), 1);
        assert_eq!(session.next_page(), 1);
    }

    #[test]
    fn new_dataset_resets_filters() {
        let mut session = session(3, AnalyticsOptions::default());
        session.set_search("east");
        assert_eq!(session.filtered_len(), 2);
        session.select_dataset(Dataset::default(), ColumnBinding::new());
        assert!(session.filters().is_default());
        assert_eq!(session.filtered_len(), 0);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let result = DashboardSession::new(
            Dataset::default(),
            ColumnBinding::new(),
            AnalyticsOptions::default().with_page_size(0),
        );
        assert!(result.is_err());
    }
}
