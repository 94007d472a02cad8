use ndarray::{Array2, ArrayView1};
use ndarray_stats::errors::MinMaxError;
use ndarray_stats::QuantileExt;

/// Minimum of a coordinate column.
///
/// Fails on an empty column (`EmptyInput`) or when the values cannot be
/// ordered because one of them is NaN (`UndefinedOrder`).
pub(crate) fn column_min(xs: ArrayView1<'_, f64>) -> Result<f64, MinMaxError> {
    xs.min().copied()
}

/// Maximum of a coordinate column. Same failure modes as [`column_min`].
pub(crate) fn column_max(xs: ArrayView1<'_, f64>) -> Result<f64, MinMaxError> {
    xs.max().copied()
}

/// Axis-aligned bounding box of a polygon's vertices.
///
/// A fast-reject filter: every enclosed point lies inside the box, so a point
/// outside it is outside the polygon, while a point inside it still has to
/// pass the full crossing test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Derives the box from a vertex matrix (rows = vertices, columns = x, y).
    pub(crate) fn of_polygon(polygon: &Array2<f64>) -> Result<Self, MinMaxError> {
        let xs = polygon.column(0);
        let ys = polygon.column(1);
        Ok(Self {
            min_x: column_min(xs)?,
            max_x: column_max(xs)?,
            min_y: column_min(ys)?,
            max_y: column_max(ys)?,
        })
    }

    /// Inclusive on all four sides.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}
