#![warn(missing_docs)]

//! # `hamstack`
//!
//! Decides, by a closed-form case theorem rather than by walking paths, which
//! Hamiltonian paths exist across vertically stacked rectangular grid graphs.
//!
//! For a single `m`-by-`n` rectangle, [`Rectangle::admits`] answers whether a
//! Hamiltonian path can start at a given column of the top row and end at a given
//! column of the bottom row. [`Rectangle::endpoint_map`] materializes that predicate
//! into the full start-to-end column map. Stacks of rectangles, listed bottom-first,
//! are composed with [`Stack::solve`]: endpoint maps propagate from the topmost level
//! downward, and every end-to-end consistent [`Chain`] is enumerated. Zero chains is an
//! ordinary answer, not an error.
//!
//! # Internals
//!
//! The oracle is a decision tree over the parity and size classes of `(m, n)`. Widths 2
//! and 3 admit only a handful of column pairs, and height 2 together with the even-width
//! height-3 band carries boundary exceptions; every remaining class reduces to endpoint
//! parity. The nine classes are
//! reified in [`cases`], whose [`Taxonomy`](cases::Taxonomy) relates them by realizable
//! width and generates representative stacks for study. The crate reports existence,
//! endpoint maps, and chains only; no path vertex sequence is ever constructed, and no
//! path is ever counted by enumeration.

pub use map::{EndpointMap, MapCache};
pub use rect::{Coord, EndpointPair, GridError, Location, Rectangle};
pub use stack::{Chain, Solutions, Stack};

pub mod cases;
pub(crate) mod map;
pub(crate) mod oracle;
pub(crate) mod rect;
pub(crate) mod stack;
pub mod table;
mod tests;
