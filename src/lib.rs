//! Bulk ray-casting point-in-polygon tests on [`ndarray`] matrices.
//!
//! Query points come in as an M×2 matrix (rows = points, column 0 = x,
//! column 1 = y) and the polygon as an N×2 matrix of vertices in boundary
//! order, implicitly closed. The answer is an `Array1<bool>` with one entry
//! per point row, in row order: `true` iff the horizontal ray from the point
//! towards +x crosses the boundary an odd number of times.
//!
//! [`points_in_polygon`] prepares the polygon (bounding box plus a per-edge
//! slope-inverse table) and classifies every row; [`par_points_in_polygon`]
//! does the same across the rayon thread pool. Callers holding one polygon
//! fixed across many batches can build a [`PreparedPolygon`] once and call
//! [`PreparedPolygon::contains_points`] (or its parallel twin) directly.
//!
//! ```
//! use ndarray::array;
//! use points_in_polygon::points_in_polygon;
//!
//! let square = array![[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]];
//! let points = array![[5.0, 5.0], [15.0, 15.0]];
//! let inside = points_in_polygon(&points, &square).unwrap();
//! assert!(inside[0]);
//! assert!(!inside[1]);
//! ```
//!
//! Complexity is O(N) to prepare and O(N) per point, with no spatial index,
//! which suits small-to-medium polygons. Each point is classified
//! independently against the immutable tables, so the batch is free to run
//! in parallel with no locking.
//!
//! # Quirks
//!
//! The crossing test is kept bit-for-bit stable across releases; callers
//! compare batch outputs, so its boolean structure is deliberate down to the
//! operator level:
//!
//! - **Boundary points.** A point exactly on an edge or vertex gets a
//!   deterministic but unspecified side. For an axis-aligned rectangle the
//!   left/bottom edges classify outside and the right/top edges inside, a
//!   consequence of the `>=`/`<` straddle pair and the strict `<` intercept
//!   comparison.
//! - **Asymmetric guard.** The straddle test restricts upward edges with an
//!   extra x-position guard whose second comparison puts the successor's x
//!   against the query point's *y*. For a point beside a steep upward edge
//!   the guard can suppress a crossing a symmetric test would count; a
//!   regression test pins one such fixture.
//! - **Horizontal edges.** An edge with zero y-span can never straddle the
//!   ray. It is tagged and skipped outright, so no ±∞/NaN slope coefficient
//!   is ever computed, let alone consumed.

mod bbox;
mod error;
mod prepared;

pub use bbox::BoundingBox;
pub use error::{Error, Result};
pub use prepared::PreparedPolygon;

use log::debug;
use ndarray::{Array1, Array2};

/// Classifies every row of `points` (M×2) against `polygon` (N×2, vertices in
/// boundary order, implicitly closed).
///
/// The polygon's bounding box and edge table are derived once, used for the
/// whole batch and discarded. Entry i of the result corresponds to row i of
/// `points`.
///
/// # Errors
///
/// [`Error::BadShape`] unless both matrices have exactly 2 columns,
/// [`Error::TooFewVertices`] when the polygon has fewer than 3 rows, and
/// [`Error::BoundsUndefined`] when a vertex coordinate is NaN.
pub fn points_in_polygon(points: &Array2<f64>, polygon: &Array2<f64>) -> Result<Array1<bool>> {
    let prepared = PreparedPolygon::new(polygon)?;
    debug!(
        "classifying {} points against a {}-vertex polygon",
        points.nrows(),
        polygon.nrows()
    );
    prepared.contains_points(points)
}

/// Like [`points_in_polygon`], classifying rows across the rayon thread pool.
///
/// Results are identical to the sequential path: the derived tables are
/// immutable and every row writes its own output slot.
///
/// # Errors
///
/// Same conditions as [`points_in_polygon`].
pub fn par_points_in_polygon(points: &Array2<f64>, polygon: &Array2<f64>) -> Result<Array1<bool>> {
    let prepared = PreparedPolygon::new(polygon)?;
    debug!(
        "classifying {} points against a {}-vertex polygon in parallel",
        points.nrows(),
        polygon.nrows()
    );
    prepared.par_contains_points(points)
}
