pub mod journal;
pub mod logbook;
pub mod series;

pub use logbook::{ExportBundle, Logbook};
pub use series::ChartSeries;
