use crate::cli::parser::Commands;
use crate::codec;
use crate::config::Config;
use crate::core::Logbook;
use crate::errors::AppResult;
use crate::models::LogCollection;
use crate::models::cell::format_number;
use crate::ui::messages::{info, success};
use crate::utils::chart::render_bar_chart;
use crate::utils::date::display_date;
use crate::utils::table::{Column, Table};
use std::path::Path;

const CHART_WIDTH: usize = 40;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { file, chart } = cmd {
        let mut book = Logbook::new();
        import_file(&mut book, Path::new(file))?;

        print_logbook(&book, cfg);
        if *chart {
            print_chart(&book, cfg);
        }
    }
    Ok(())
}

/// Read, decode and import a spreadsheet into `book`.
pub fn import_file(book: &mut Logbook, path: &Path) -> AppResult<usize> {
    info(format!("Importing {}", path.display()));

    let records = codec::decode_file(path)?;
    let rows = book.import_records(&records)?.len();

    success(format!("Imported {rows} rows from {}", path.display()));
    Ok(rows)
}

pub fn print_logbook(book: &Logbook, cfg: &Config) {
    match book.collection() {
        Some(c) => print!("{}", render_logbook(c, &cfg.distance_unit, cfg.color)),
        None => info("No data loaded. Use `import <FILE>` or `insert`."),
    }
}

pub fn print_chart(book: &Logbook, cfg: &Config) {
    match book.series() {
        Some(s) if !s.is_empty() => {
            print!("{}", render_bar_chart(&s, &cfg.distance_unit, CHART_WIDTH, cfg.color))
        }
        _ => info("Nothing to chart."),
    }
}

/// Row index, the four log columns, then every pass-through column.
pub fn render_logbook(collection: &LogCollection, unit: &str, color: bool) -> String {
    let extras: Vec<&str> = collection.extra_columns().collect();

    let mut columns = vec![
        Column::right("#"),
        Column::left("Date"),
        Column::right(format!("Distance start ({unit})")),
        Column::right(format!("Distance stop ({unit})")),
        Column::right(format!("Travel distance ({unit})")),
    ];
    columns.extend(extras.iter().map(|name| Column::left(*name)));

    let mut table = Table::new(columns);

    for (i, row) in collection.rows().iter().enumerate() {
        let mut cells = vec![
            i.to_string(),
            display_date(row.date()),
            format_number(row.distance_start()),
            format_number(row.distance_stop()),
            format_number(row.distance_diff()),
        ];
        cells.extend(
            extras
                .iter()
                .map(|name| row.extra().get(*name).map(|v| v.to_string()).unwrap_or_default()),
        );
        table.add_row(cells);
    }

    table.render(color)
}
