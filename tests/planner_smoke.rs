use trip_planner::matrix::DistanceMatrix;
use trip_planner::planner::{nearest_neighbor, path_length, two_opt};
use trip_planner::traits::{DistanceSource, Location};

/// Manhattan-style source over coordinates, exercising the trait seam the
/// same way any custom provider would.
struct GridSource;

impl DistanceSource for GridSource {
    fn distance(&self, a: &Location, b: &Location) -> Option<f64> {
        if a.name() == b.name() {
            return Some(0.0);
        }
        let (ax, ay) = a.coords()?;
        let (bx, by) = b.coords()?;
        Some((ax - bx).abs() + (ay - by).abs())
    }
}

#[test]
fn grid_cities_plan_end_to_end() {
    let locations = vec![
        Location::with_coords("Depot", 0.0, 0.0).unwrap(),
        Location::with_coords("North", 0.0, 3.0).unwrap(),
        Location::with_coords("East", 4.0, 0.0).unwrap(),
        Location::with_coords("Far", 4.0, 3.0).unwrap(),
    ];

    let matrix = DistanceMatrix::build(&locations, &GridSource);
    assert!(matrix.missing_pairs().is_empty());

    let mut order = nearest_neighbor(&matrix);
    assert_eq!(order[0], 0);
    assert_eq!(order.len(), locations.len());

    let (initial, _) = path_length(&order, &matrix);
    two_opt(&mut order, &matrix, 50);
    let (refined, has_unknown) = path_length(&order, &matrix);

    assert!(!has_unknown);
    assert!(refined <= initial + 1e-9);
    assert_eq!(order[0], 0);
}
