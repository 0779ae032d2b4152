use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use insight_core::{ChartSeries, DashboardReport, format_amount};
use insight_ingest::{LoadedSource, UploadSummary};
use insight_map::ResolutionReport;
use insight_model::{ColumnBinding, SemanticRole};
use insight_stream::{RemoteAggregation, Sentiment};

pub fn print_upload_summary(loaded: &LoadedSource) {
    println!("Source: {} ({})", loaded.source.filename, loaded.source.id);
    match &loaded.summary {
        UploadSummary::Structured {
            columns,
            rows,
            preview,
        } => {
            println!("Structured: {rows} rows, {} columns", columns.len());
            let mut table = Table::new();
            table.set_header(columns.iter().map(|column| header_cell(column)));
            apply_table_style(&mut table);
            for record in preview {
                table.add_row(columns.iter().map(|column| Cell::new(record.text(column))));
            }
            println!("{table}");
        }
        UploadSummary::Text { preview } => {
            println!("Text preview:");
            println!("{preview}");
        }
    }
}

pub fn print_resolution(report: &ResolutionReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("Column"),
        header_cell("Position"),
        header_cell("Keyword"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for role in SemanticRole::ALL {
        match report.match_for(role) {
            Some(found) => table.add_row(vec![
                Cell::new(role.label()).add_attribute(Attribute::Bold),
                Cell::new(&found.column).fg(Color::Green),
                Cell::new(found.column_index),
                Cell::new(&found.keyword),
            ]),
            None => table.add_row(vec![
                Cell::new(role.label()).add_attribute(Attribute::Bold),
                dim_cell("unbound"),
                dim_cell("-"),
                dim_cell("-"),
            ]),
        };
    }
    println!("{table}");
    if !report.unassigned_columns.is_empty() {
        println!("Unassigned columns: {}", report.unassigned_columns.join(", "));
    }
}

pub fn print_binding(binding: &ColumnBinding, changed: &[SemanticRole]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Role"), header_cell("Column")]);
    apply_table_style(&mut table);
    for role in SemanticRole::ALL {
        let column = match binding.column(role) {
            Some(column) if changed.contains(&role) => Cell::new(column)
                .fg(Color::Yellow)
                .add_attribute(Attribute::Bold),
            Some(column) => Cell::new(column),
            None => dim_cell("unbound"),
        };
        table.add_row(vec![Cell::new(role.label()), column]);
    }
    println!("{table}");
}

pub fn print_report(title: &str, report: &DashboardReport) {
    println!("Dataset: {title}");

    let mut kpis = Table::new();
    kpis.set_header(report.kpi_cards.iter().map(|card| header_cell(&card.label)));
    apply_table_style(&mut kpis);
    kpis.add_row(report.kpi_cards.iter().map(|card| Cell::new(&card.value)));
    println!("{kpis}");

    for chart in report.charts() {
        print_chart(&chart);
    }

    let page = &report.page;
    println!();
    println!(
        "Ledger: page {} of {} ({} records)",
        page.page,
        page.total_pages.max(1),
        page.total_records
    );
    let mut ledger = Table::new();
    ledger.set_header(report.ledger.columns.iter().map(|column| header_cell(column)));
    apply_ledger_style(&mut ledger);
    for row in &report.ledger.rows {
        ledger.add_row(row.iter().map(Cell::new));
    }
    if report.ledger.rows.is_empty() {
        println!("(no records on this page)");
    } else {
        println!("{ledger}");
    }
}

fn print_chart(chart: &ChartSeries) {
    println!();
    println!("{}", chart.name);
    if chart.is_empty() {
        println!("  (no data)");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Label"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for point in &chart.points {
        table.add_row(vec![
            Cell::new(&point.label),
            Cell::new(format_amount(point.value)),
        ]);
    }
    println!("{table}");
}

pub fn print_remote(aggregation: &RemoteAggregation) {
    if !aggregation.metrics.is_empty() {
        let mut metrics = Table::new();
        metrics.set_header(vec![header_cell("Metric"), header_cell("Value")]);
        apply_table_style(&mut metrics);
        for (name, value) in &aggregation.metrics {
            metrics.add_row(vec![Cell::new(name), Cell::new(value)]);
        }
        println!("{metrics}");
    }

    let mut periods = Table::new();
    periods.set_header(vec![
        header_cell("Period"),
        header_cell("Revenue"),
        header_cell("Expenses"),
    ]);
    apply_table_style(&mut periods);
    align_column(&mut periods, 1, CellAlignment::Right);
    align_column(&mut periods, 2, CellAlignment::Right);
    for bucket in aggregation.time_buckets() {
        periods.add_row(vec![
            Cell::new(&bucket.period_label),
            Cell::new(format_amount(bucket.revenue)),
            Cell::new(format_amount(bucket.expenses)),
        ]);
    }
    println!("{periods}");

    if let Some(synthesis) = &aggregation.ai_synthesis {
        if !synthesis.narrative.is_empty() {
            println!();
            println!("{}", synthesis.narrative);
        }
        for insight in &synthesis.insights {
            let marker = match insight.sentiment {
                Sentiment::Positive => '+',
                Sentiment::Negative => '-',
                Sentiment::Neutral => '~',
            };
            println!("  {marker} {}: {}", insight.metric, insight.narrative);
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_ledger_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
