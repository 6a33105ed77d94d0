#![forbid(unsafe_code)]

//! Proportional-area geometry for chart layout.
//!
//! - [`partition_triangle`]: pyramid/funnel bands whose areas are proportional to weights,
//! - [`size_proportional`]: circle/square/hexagon extents with area proportional to weight,
//! - [`pack`] / [`partition_grid`]: fixed-policy small-multiples grid.
//!
//! Everything here is a pure function of its inputs.

pub mod error;
pub mod grid;
pub mod model;
pub mod partition;

pub use error::{Error, Result};
pub use grid::{GridPacking, pack, partition_grid};
pub use model::{Point, Rect, WeightedItem, items_in_order};
pub use partition::radial::{Shape, size_proportional};
pub use partition::triangle::{
    BandSolve, DEGENERATE_SLOPE, Orientation, SolveMethod, partition_triangle, solve_band_height,
};
pub use partition::{PartitionSegment, SegmentGeometry, Trapezoid};
