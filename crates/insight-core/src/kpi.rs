//! Headline KPI aggregation.

use std::borrow::Borrow;

use insight_model::{ColumnBinding, KpiSet, NO_RATING, Record, SemanticRole};

use crate::options::RatingTieBreak;

/// Sum of a role's bound column. Unbound roles and unparsable cells count zero.
pub fn sum_role<R: Borrow<Record>>(
    records: &[R],
    binding: &ColumnBinding,
    role: SemanticRole,
) -> f64 {
    let Some(column) = binding.column(role) else {
        return 0.0;
    };
    records
        .iter()
        .map(|record| record.borrow().number(column))
        .sum()
}

pub fn compute_kpis<R: Borrow<Record>>(
    records: &[R],
    binding: &ColumnBinding,
    tie_break: RatingTieBreak,
) -> KpiSet {
    KpiSet {
        total_revenue: sum_role(records, binding, SemanticRole::Revenue),
        total_profit: sum_role(records, binding, SemanticRole::Profit),
        total_expenses: sum_role(records, binding, SemanticRole::Expense),
        total_units: sum_role(records, binding, SemanticRole::Units),
        top_rating: top_rating(records, binding, tie_break),
    }
}

/// Most frequent distinct rating string, or `"N/A"` when there is none.
pub fn top_rating<R: Borrow<Record>>(
    records: &[R],
    binding: &ColumnBinding,
    tie_break: RatingTieBreak,
) -> String {
    let Some(column) = binding.column(SemanticRole::Rating) else {
        return NO_RATING.to_string();
    };

    // (value, count) in order of first appearance
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        let value = record.borrow().text(column);
        if value.trim().is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let Some(max) = counts.iter().map(|(_, count)| *count).max() else {
        return NO_RATING.to_string();
    };
    let mut tied = counts
        .into_iter()
        .filter(|(_, count)| *count == max)
        .map(|(value, _)| value);
    let winner = match tie_break {
        RatingTieBreak::FirstEncountered => tied.next(),
        RatingTieBreak::Lexicographic => tied.min(),
    };
    winner.unwrap_or_else(|| NO_RATING.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(values: &[&str]) -> (Vec<Record>, ColumnBinding) {
        let records = values
            .iter()
            .map(|value| Record::from_pairs([("score", *value)]))
            .collect();
        let mut binding = ColumnBinding::new();
        binding.bind(SemanticRole::Rating, "score");
        (records, binding)
    }

    #[test]
    fn most_frequent_rating_wins() {
        let (records, binding) = rated(&["4", "5", "5", "3"]);
        assert_eq!(top_rating(&records, &binding, RatingTieBreak::FirstEncountered), "5");
    }

    #[test]
    fn ties_follow_configured_rule() {
        let (records, binding) = rated(&["B", "A", "A", "B", "C"]);
        assert_eq!(top_rating(&records, &binding, RatingTieBreak::FirstEncountered), "B");
        assert_eq!(top_rating(&records, &binding, RatingTieBreak::Lexicographic), "A");
    }

    #[test]
    fn missing_ratings_yield_placeholder() {
        let (records, binding) = rated(&["", " "]);
        assert_eq!(top_rating(&records, &binding, RatingTieBreak::default()), NO_RATING);
        let unbound: Vec<Record> = Vec::new();
        assert_eq!(
            top_rating(&unbound, &ColumnBinding::new(), RatingTieBreak::default()),
            NO_RATING
        );
    }

    #[test]
    fn unbound_numeric_roles_sum_to_zero() {
        let records = vec![Record::from_pairs([("amount_due", 10.0)])];
        let kpis = compute_kpis(&records, &ColumnBinding::new(), RatingTieBreak::default());
        assert_eq!(kpis, KpiSet::default());
    }
}
