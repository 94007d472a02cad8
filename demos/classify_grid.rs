//! Classifies a lattice of points against a C-shaped polygon and plots the
//! result: blue = inside, red = outside. The notch of the C shows up red even
//! though it sits inside the bounding box.
//!
//! Run with `cargo run --example classify_grid` (opens a gnuplot window).

use gnuplot::{Caption, Color, Figure, PointSymbol};
use ndarray::{array, stack, Array, Axis};
use points_in_polygon::PreparedPolygon;

fn main() {
    env_logger::init();

    let polygon = array![
        [0.0, 0.0],
        [6.0, 0.0],
        [6.0, 2.0],
        [2.0, 2.0],
        [2.0, 4.0],
        [6.0, 4.0],
        [6.0, 6.0],
        [0.0, 6.0]
    ];
    let prepared = PreparedPolygon::new(&polygon).unwrap();
    let bbox = prepared.bounding_box();

    let x = Array::linspace(bbox.min_x - 1.0, bbox.max_x + 1.0, 65);
    let y = Array::linspace(bbox.min_y - 1.0, bbox.max_y + 1.0, 65);
    let xi = vec![x, y];
    let grids = meshgridrs::meshgrid(&xi, meshgridrs::Indexing::Xy).unwrap();
    let xpos = &grids[0];
    let ypos = &grids[1];
    let xpos_flat = xpos.to_shape((xpos.len(), 1)).unwrap();
    let ypos_flat = ypos.to_shape((ypos.len(), 1)).unwrap();
    let points = stack![Axis(1), xpos_flat, ypos_flat].remove_axis(Axis(2));

    let inside = prepared.par_contains_points(&points).unwrap();

    let mut x_in = Vec::new();
    let mut y_in = Vec::new();
    let mut x_out = Vec::new();
    let mut y_out = Vec::new();
    for (row, &flag) in points.outer_iter().zip(&inside) {
        if flag {
            x_in.push(row[0]);
            y_in.push(row[1]);
        } else {
            x_out.push(row[0]);
            y_out.push(row[1]);
        }
    }
    println!("{} of {} lattice points are inside", x_in.len(), inside.len());

    let mut fg = Figure::new();
    {
        let axes = fg.axes2d();
        axes.points(
            &x_in,
            &y_in,
            &[Caption("inside"), Color("blue"), PointSymbol('O')],
        )
        .points(
            &x_out,
            &y_out,
            &[Caption("outside"), Color("red"), PointSymbol('.')],
        );
    }
    fg.show().unwrap();
}
