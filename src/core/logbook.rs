use crate::codec::export_file_name;
use crate::core::journal::Journal;
use crate::core::series::ChartSeries;
use crate::errors::{AppError, AppResult};
use crate::models::{CellValue, LogCollection, LogField, LogRow, Record};
use crate::utils::date;
use chrono::NaiveDate;

/// Records and target file name produced by [`Logbook::export_records`].
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub file_name: String,
    pub records: Vec<Record>,
}

/// Owner of the session's log collection.
///
/// Every user action is one method call; the collection is only reachable
/// through shared borrows from the outside.
#[derive(Debug, Default)]
pub struct Logbook {
    collection: Option<LogCollection>,
    journal: Journal,
}

impl Logbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until something is imported or inserted.
    pub fn collection(&self) -> Option<&LogCollection> {
        self.collection.as_ref()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Record an action performed outside the row model (e.g. a file write).
    pub fn note(&mut self, operation: &str, target: &str, message: impl Into<String>) {
        self.journal.record(operation, target, message);
    }

    /// Replace the collection with normalized `records`.
    ///
    /// On error the previous collection is kept untouched.
    pub fn import_records(&mut self, records: &[Record]) -> AppResult<&LogCollection> {
        let collection = LogCollection::from_records(records)?;

        self.journal
            .record("import", "", format!("{} rows", collection.len()));

        Ok(&*self.collection.insert(collection))
    }

    /// Edit `field` of row `index`.
    ///
    /// A no-op returning `Ok(None)` while nothing is loaded.
    pub fn edit_field(
        &mut self,
        index: usize,
        field: &str,
        value: CellValue,
    ) -> AppResult<Option<&LogCollection>> {
        let Some(collection) = self.collection.as_mut() else {
            return Ok(None);
        };

        let field = LogField::parse(field);
        let shown = value.to_string();
        collection.edit(index, &field, value)?;

        self.journal.record(
            "edit",
            &format!("row {index}"),
            format!("{} = {}", field.name(), shown),
        );

        Ok(self.collection.as_ref())
    }

    /// Append a blank row dated today, creating the collection if needed.
    pub fn insert_row(&mut self) -> &LogCollection {
        self.insert_row_on(date::today())
    }

    pub fn insert_row_on(&mut self, day: NaiveDate) -> &LogCollection {
        let collection = self.collection.get_or_insert_with(LogCollection::new);
        collection.push(LogRow::blank(day));

        let index = collection.len() - 1;
        self.journal
            .record("insert", &format!("row {index}"), date::format_date(day));

        collection
    }

    /// Export-ready records and a file name dated today.
    pub fn export_records(&self, prefix: &str, ext: &str) -> AppResult<ExportBundle> {
        self.export_records_on(date::today(), prefix, ext)
    }

    pub fn export_records_on(
        &self,
        day: NaiveDate,
        prefix: &str,
        ext: &str,
    ) -> AppResult<ExportBundle> {
        match &self.collection {
            Some(c) if !c.is_empty() => Ok(ExportBundle {
                file_name: export_file_name(prefix, day, ext),
                records: c.to_records(),
            }),
            _ => Err(AppError::EmptyCollection),
        }
    }

    /// Back to the "no data loaded" state.
    pub fn reload(&mut self) {
        self.collection = None;
        self.journal.clear();
        self.journal.record("reload", "", "session reset");
    }

    pub fn series(&self) -> Option<ChartSeries> {
        self.collection.as_ref().map(ChartSeries::from_collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::log_row::{DATE, DISTANCE_START, DISTANCE_STOP};

    fn imported() -> Logbook {
        let mut book = Logbook::new();
        book.import_records(&[
            Record::new()
                .with(DATE, 45000.0)
                .with(DISTANCE_START, 100.0)
                .with(DISTANCE_STOP, 150.0),
            Record::new()
                .with(DATE, "2023-03-01")
                .with(DISTANCE_START, 150.0)
                .with(DISTANCE_STOP, 150.0),
        ])
        .unwrap();
        book
    }

    #[test]
    fn import_normalizes_dates_and_diffs() {
        let book = imported();
        let c = book.collection().unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.rows()[0].date(), "2023-03-15");
        assert_eq!(c.rows()[0].distance_diff(), 50.0);
        assert_eq!(c.rows()[1].date(), "2023-03-01");
        assert_eq!(c.rows()[1].distance_diff(), 0.0);
    }

    #[test]
    fn failed_import_keeps_previous_state() {
        let mut book = imported();
        let before = book.collection().cloned();
        let err = book
            .import_records(&[Record::new().with(DATE, f64::NAN)])
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
        assert_eq!(book.collection().cloned(), before);
    }

    #[test]
    fn edit_without_data_is_a_noop() {
        let mut book = Logbook::new();
        let result = book
            .edit_field(0, DISTANCE_STOP, CellValue::Number(1.0))
            .unwrap();
        assert!(result.is_none());
        assert!(book.collection().is_none());
        assert!(book.journal().is_empty());
    }

    #[test]
    fn edits_keep_the_diff_invariant() {
        let mut book = imported();
        book.edit_field(1, DISTANCE_STOP, CellValue::Number(190.0))
            .unwrap();
        book.edit_field(1, DISTANCE_START, CellValue::Number(160.0))
            .unwrap();
        let c = book
            .edit_field(1, "note", CellValue::from("detour"))
            .unwrap()
            .unwrap();

        for row in c.rows() {
            assert_eq!(row.distance_diff(), row.distance_stop() - row.distance_start());
        }
        assert_eq!(c.rows()[1].distance_diff(), 30.0);
        assert_eq!(c.rows()[0].distance_diff(), 50.0);
    }

    #[test]
    fn insert_on_empty_book_creates_one_row() {
        let mut book = Logbook::new();
        let c = book.insert_row();
        assert_eq!(c.len(), 1);
        let row = &c.rows()[0];
        assert_eq!(row.date(), date::today_string());
        assert_eq!(row.distance_start(), 0.0);
        assert_eq!(row.distance_stop(), 0.0);
        assert_eq!(row.distance_diff(), 0.0);
    }

    #[test]
    fn insert_appends_at_the_end() {
        let mut book = imported();
        let day = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap();
        let c = book.insert_row_on(day);
        assert_eq!(c.len(), 3);
        assert_eq!(c.rows()[2].date(), "2023-04-01");
    }

    #[test]
    fn export_requires_rows() {
        let book = Logbook::new();
        assert!(matches!(
            book.export_records("logbook", "xlsx"),
            Err(AppError::EmptyCollection)
        ));

        let mut book = Logbook::new();
        book.import_records(&[]).unwrap();
        assert!(matches!(
            book.export_records("logbook", "xlsx"),
            Err(AppError::EmptyCollection)
        ));
    }

    #[test]
    fn export_names_the_file_after_the_day() {
        let book = imported();
        let day = NaiveDate::from_ymd_opt(2024, 12, 24).unwrap();
        let bundle = book.export_records_on(day, "logbook", "xlsx").unwrap();
        assert_eq!(bundle.file_name, "logbook_2024-12-24.xlsx");
        assert_eq!(bundle.records.len(), 2);
    }

    #[test]
    fn reload_discards_everything() {
        let mut book = imported();
        book.reload();
        assert!(book.collection().is_none());
        assert!(book.series().is_none());
        assert_eq!(book.journal().entries().len(), 1);
    }
}
