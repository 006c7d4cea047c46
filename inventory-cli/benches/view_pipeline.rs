use criterion::{black_box, criterion_group, criterion_main, Criterion};
use inventory_cli::data::column::ColumnSpec;
use inventory_cli::data::datatable::{DataColumn, DataRow, DataTable, DataValue};
use inventory_cli::data::table_view::TableView;
use std::sync::Arc;

fn create_test_data(rows: usize) -> DataTable {
    let mut table = DataTable::new("bench");

    table.add_column(DataColumn::new("name"));
    table.add_column(DataColumn::new("qty"));
    table.add_column(DataColumn::new("status"));

    let names = [
        "Brake Pad",
        "Brake Rotor",
        "Battery Cell",
        "Battery Pack",
        "Motor Shaft",
        "Motor Winding",
        "Frame Tube",
        "Frame Weld",
        "Wheel Spoke",
        "Wheel Rim",
    ];

    for i in 0..rows {
        let row = DataRow::new(vec![
            DataValue::String(names[i % names.len()].to_string()),
            DataValue::Integer((i % 500) as i64),
            DataValue::String(format!("STATUS_{}", i % 5)),
        ]);
        table.add_row(row).unwrap();
    }

    table.infer_column_types();
    table
}

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("name", "Name"),
        ColumnSpec::new("qty", "Quantity"),
        ColumnSpec::new("status", "Status"),
    ]
}

fn benchmark_global_filter(c: &mut Criterion) {
    let table_10k = Arc::new(create_test_data(10_000));
    let table_50k = Arc::new(create_test_data(50_000));

    let mut group = c.benchmark_group("global_filter");

    group.bench_function("10k_rows", |b| {
        b.iter(|| {
            let mut view = TableView::new(table_10k.clone(), columns());
            view.set_global_filter(black_box("brake"));
            assert!(view.row_count() > 0);
        });
    });

    group.bench_function("50k_rows", |b| {
        b.iter(|| {
            let mut view = TableView::new(table_50k.clone(), columns());
            view.set_global_filter(black_box("brake"));
            assert!(view.row_count() > 0);
        });
    });

    group.finish();
}

fn benchmark_filter_sort_page(c: &mut Criterion) {
    let table_10k = Arc::new(create_test_data(10_000));

    c.bench_function("filter_sort_page_10k", |b| {
        b.iter(|| {
            let mut view = TableView::new(table_10k.clone(), columns());
            view.set_column_filter("status", black_box("STATUS_3"));
            view.toggle_sort("qty");
            view.last_page();
            assert!(!view.page_rows().is_empty());
        });
    });
}

criterion_group!(benches, benchmark_global_filter, benchmark_filter_sort_page);
criterion_main!(benches);
