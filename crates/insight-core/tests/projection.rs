//! Snapshot tests for presentation projections.

use insight_core::{LedgerTable, kpi_cards};
use insight_model::{KpiSet, Record, Value};

#[test]
fn kpi_cards_snapshot() {
    let kpis = KpiSet {
        total_revenue: 350.0,
        total_profit: 12.5,
        total_expenses: 130.0,
        total_units: 0.0,
        top_rating: "5".to_string(),
    };
    insta::assert_json_snapshot!(kpi_cards(&kpis), @r#"
    [
      {
        "label": "Total Revenue",
        "value": "350"
      },
      {
        "label": "Total Profit",
        "value": "12.5"
      },
      {
        "label": "Total Expenses",
        "value": "130"
      },
      {
        "label": "Total Units",
        "value": "0"
      },
      {
        "label": "Top Rating",
        "value": "5"
      }
    ]
    "#);
}

#[test]
fn ledger_table_snapshot() {
    let columns = vec!["date".to_string(), "region".to_string(), "rev".to_string()];
    let first = Record::from_pairs([
        ("date", Value::from("2024-01-05")),
        ("region", Value::Missing),
        ("rev", Value::Number(100.0)),
    ]);
    let table = LedgerTable::from_records(&columns, &[&first]);
    insta::assert_json_snapshot!(table, @r#"
    {
      "columns": [
        "date",
        "region",
        "rev"
      ],
      "rows": [
        [
          "2024-01-05",
          "",
          "100"
        ]
      ]
    }
    "#);
}
