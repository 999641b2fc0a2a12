//! trip-planner core
//!
//! Route-planning engine for short open-path itineraries over named
//! locations: distance source composition, dense matrix construction,
//! nearest-neighbor tour construction, and 2-opt refinement.

pub mod traits;
pub mod haversine;
pub mod table;
pub mod matrix;
pub mod planner;
pub mod catalog;
pub mod remote;
