use crate::models::LogCollection;
use crate::utils::date::display_date;

/// Read-only snapshot handed to chart consumers: four parallel sequences
/// indexed by row order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub dates: Vec<String>,
    pub starts: Vec<f64>,
    pub stops: Vec<f64>,
    pub diffs: Vec<f64>,
}

impl ChartSeries {
    pub fn from_collection(collection: &LogCollection) -> Self {
        let rows = collection.rows();
        Self {
            dates: rows.iter().map(|r| display_date(r.date())).collect(),
            starts: rows.iter().map(|r| r.distance_start()).collect(),
            stops: rows.iter().map(|r| r.distance_stop()).collect(),
            diffs: rows.iter().map(|r| r.distance_diff()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LogCollection, LogRow};

    #[test]
    fn series_are_parallel() {
        let mut c = LogCollection::new();
        c.push(LogRow::new("2024-01-01T08:00:00", 10.0, 25.0));
        c.push(LogRow::new("2024-01-02", 25.0, 40.0));

        let s = ChartSeries::from_collection(&c);
        assert_eq!(s.len(), 2);
        assert_eq!(s.dates, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(s.starts, vec![10.0, 25.0]);
        assert_eq!(s.stops, vec![25.0, 40.0]);
        assert_eq!(s.diffs, vec![15.0, 15.0]);
    }
}
