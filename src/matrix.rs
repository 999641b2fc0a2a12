//! Dense symmetric distance matrix over one planning request's locations.

use crate::traits::{DistanceSource, Location};

/// N×N distance matrix in kilometers. `None` marks an unknown distance.
///
/// Symmetric with a zero diagonal by construction, and immutable after
/// build: each planning request gets its own freshly built matrix.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    cells: Vec<Vec<Option<f64>>>,
}

impl DistanceMatrix {
    /// Build a matrix for an ordered location list from a distance source.
    ///
    /// Pure function of its inputs. Each unordered pair is consulted once
    /// and mirrored into both triangles.
    pub fn build(locations: &[Location], source: &impl DistanceSource) -> Self {
        let n = locations.len();
        let mut cells = vec![vec![None; n]; n];
        for i in 0..n {
            cells[i][i] = Some(0.0);
            for j in (i + 1)..n {
                let d = source.distance(&locations[i], &locations[j]);
                cells[i][j] = d;
                cells[j][i] = d;
            }
        }
        Self { cells }
    }

    /// Number of locations this matrix covers.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Distance between indices, `None` when unknown.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.cells[i][j]
    }

    /// Index pairs (i < j) with no known distance.
    pub fn missing_pairs(&self) -> Vec<(usize, usize)> {
        let n = self.len();
        let mut missing = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.cells[i][j].is_none() {
                    missing.push((i, j));
                }
            }
        }
        missing
    }
}
