pub mod cell;
pub mod collection;
pub mod log_row;

pub use cell::{CellValue, Record};
pub use collection::LogCollection;
pub use log_row::{LogField, LogRow};
