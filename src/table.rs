//! Feasibility tables: character-matrix and CSV renditions of an [`EndpointMap`].

use itertools::Itertools;
use ndarray::Array2;

use crate::map::EndpointMap;

/// Lay the feasibility matrix of `map` out as characters: row `x1` is the start column,
/// column `x2` the end column; `#` marks a feasible pair and `.` an infeasible one.
pub fn grid(map: &EndpointMap) -> Array2<char> {
    let m = map.rectangle().width();

    Array2::from_shape_fn((m, m), |(x1, x2)| {
        match map.ends(x1).is_some_and(|ends| ends.contains(&x2)) {
            true => '#',
            false => '.',
        }
    })
}

/// Dump `grid` row by row into a newline-terminated string.
pub fn print(grid: Array2<char>) -> String {
    let mut out = String::with_capacity(grid.nrows() * (grid.ncols() + 1));

    for row in grid.rows() {
        for col in row {
            out.push(*col);
        }
        out.push('\n');
    }

    out
}

/// The spreadsheet rows for `map`: a `m,n,S,T,feasible` header, then one row per column
/// pair with `S` on the top row, `T` on the bottom row, and feasibility as `1`/`0`.
pub fn csv(map: &EndpointMap) -> String {
    let rect = map.rectangle();
    let (m, n) = (rect.width(), rect.height());
    let mut out = String::from("m,n,S,T,feasible\n");

    for (x1, x2) in (0..m).cartesian_product(0..m) {
        let feasible = map.ends(x1).is_some_and(|ends| ends.contains(&x2));
        out.push_str(&format!(
            "{},{},\"({},{})\",\"({},{})\",{}\n",
            m,
            n,
            x1,
            n - 1,
            x2,
            0,
            feasible as usize
        ));
    }

    out
}
