//! The loaded lookup table handed to interpolation code

use crate::column::Column;
use crate::missing::MissingValue;
use ndarray::{Array2, ArrayView1};
use serde::Serialize;
use std::collections::HashMap;

/// Payload values plus the coordinate columns that index them
///
/// Produced by a [`DataExtractorBackend`](crate::backend::DataExtractorBackend);
/// the layout does not depend on the file format it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTable {
    /// Payload values, shape (rows, 1)
    ///
    /// Missing values are always [`MISSING_FLOAT`](crate::missing::MISSING_FLOAT),
    /// also for integer payload columns: their `MISSING_INT` sentinel is
    /// rewritten rather than cast to `f64`.
    pub payload: Array2<f64>,

    /// Coordinate columns keyed by normalized name
    pub coordinate_columns: HashMap<String, Column>,

    /// Coordinate column name to the dimension it indexes
    pub coord_to_dim: HashMap<String, usize>,

    /// Coordinate column names bound to each dimension, in column order
    pub dim_to_coords: Vec<Vec<String>>,
}

impl Default for ExtractedTable {
    /// An empty table: payload shape (0, 1), no coordinates
    fn default() -> Self {
        Self {
            payload: Array2::zeros((0, 1)),
            coordinate_columns: HashMap::new(),
            coord_to_dim: HashMap::new(),
            dim_to_coords: Vec::new(),
        }
    }
}

impl ExtractedTable {
    /// Register a coordinate column under `dim`
    pub fn add_coordinate(&mut self, name: impl Into<String>, dim: usize, column: Column) {
        let name = name.into();
        if self.dim_to_coords.len() <= dim {
            self.dim_to_coords.resize(dim + 1, Vec::new());
        }
        self.dim_to_coords[dim].push(name.clone());
        self.coord_to_dim.insert(name.clone(), dim);
        self.coordinate_columns.insert(name, column);
    }

    /// Number of data rows
    pub fn num_rows(&self) -> usize {
        self.payload.nrows()
    }

    /// Payload values as a 1-D view; empty if the payload has no column
    pub fn payload_values(&self) -> ArrayView1<'_, f64> {
        if self.payload.ncols() == 0 {
            let empty: &[f64] = &[];
            return ArrayView1::from(empty);
        }
        self.payload.column(0)
    }

    /// Get a coordinate column by name
    pub fn coordinate(&self, name: &str) -> Option<&Column> {
        self.coordinate_columns.get(name)
    }

    /// Coordinate column names in dimension then column order
    pub fn coordinate_names(&self) -> Vec<&str> {
        self.dim_to_coords
            .iter()
            .flatten()
            .map(|s| s.as_str())
            .collect()
    }

    /// Dimension a coordinate column is bound to
    pub fn dimension_of(&self, name: &str) -> Option<usize> {
        self.coord_to_dim.get(name).copied()
    }

    /// Serializable overview of the table
    pub fn summary(&self) -> TableSummary {
        let present: Vec<f64> = self
            .payload
            .iter()
            .copied()
            .filter(|v| !v.is_missing())
            .collect();
        let payload_min = present.iter().copied().reduce(f64::min);
        let payload_max = present.iter().copied().reduce(f64::max);

        let coordinates = self
            .dim_to_coords
            .iter()
            .enumerate()
            .flat_map(|(dim, names)| names.iter().map(move |name| (dim, name)))
            .filter_map(|(dim, name)| {
                self.coordinate_columns.get(name).map(|col| CoordinateSummary {
                    name: name.clone(),
                    dtype: col.type_name(),
                    len: col.len(),
                    dimension: dim,
                })
            })
            .collect();

        TableSummary {
            num_rows: self.num_rows(),
            payload_missing: self.payload.len() - present.len(),
            payload_min,
            payload_max,
            coordinates,
        }
    }
}

/// Overview of an [`ExtractedTable`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub num_rows: usize,
    pub payload_missing: usize,
    /// Ignores missing values
    pub payload_min: Option<f64>,
    pub payload_max: Option<f64>,
    pub coordinates: Vec<CoordinateSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateSummary {
    pub name: String,
    pub dtype: &'static str,
    pub len: usize,
    pub dimension: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::missing::MISSING_FLOAT;
    use ndarray::array;

    fn sample() -> ExtractedTable {
        let mut table = ExtractedTable {
            payload: array![[1.0], [MISSING_FLOAT], [3.0]],
            ..Default::default()
        };
        table.add_coordinate("lat", 0, Column::Float(vec![0.0, 1.0, 2.0]));
        table.add_coordinate("MetaData/station", 0, Column::Str(vec!["a".into(); 3]));
        table
    }

    #[test]
    fn test_add_coordinate_binds_dimension() {
        let table = sample();
        assert_eq!(table.dim_to_coords, vec![vec!["lat", "MetaData/station"]]);
        assert_eq!(table.dimension_of("lat"), Some(0));
        assert_eq!(table.dimension_of("missing"), None);
        assert_eq!(table.coordinate_names(), vec!["lat", "MetaData/station"]);
    }

    #[test]
    fn test_empty_tables_do_not_panic() {
        let table = ExtractedTable::default();
        assert_eq!(table.payload.shape(), &[0, 1]);
        assert_eq!(table.payload_values().len(), 0);
        let summary = table.summary();
        assert_eq!(summary.num_rows, 0);
        assert_eq!(summary.payload_min, None);

        let hand_built = ExtractedTable {
            payload: Array2::zeros((0, 0)),
            ..Default::default()
        };
        assert!(hand_built.payload_values().is_empty());
        assert_eq!(hand_built.summary().payload_missing, 0);
    }

    #[test]
    fn test_summary_ignores_missing_payload() {
        let summary = sample().summary();
        assert_eq!(summary.num_rows, 3);
        assert_eq!(summary.payload_missing, 1);
        assert_eq!(summary.payload_min, Some(1.0));
        assert_eq!(summary.payload_max, Some(3.0));
        assert_eq!(summary.coordinates.len(), 2);
        assert_eq!(summary.coordinates[1].dtype, "string");
    }
}
