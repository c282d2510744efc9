use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::oracle;
use crate::rect::{Coord, Rectangle};
use crate::table;

/// The feasible endpoint pairs of one [`Rectangle`], keyed by start column.
///
/// Maps each start column on the top row to the ascending set of end columns on the
/// bottom row reachable by a Hamiltonian path. Start columns with no feasible end are
/// absent; a rectangle with no feasible pairs at all yields a map with no entries, which
/// is an ordinary value and propagates into (possibly zero) chains downstream rather
/// than erroring.
///
/// Derived data with no identity of its own: recomputed on demand and holding no state
/// between queries. `Display` renders the feasibility matrix as a character grid, see
/// [`table::grid`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EndpointMap {
    rect: Rectangle,
    entries: BTreeMap<Coord, Vec<Coord>>,
}

impl EndpointMap {
    /// Build the map for `rect` by probing all `m * m` column pairs through the oracle.
    pub fn of(rect: Rectangle) -> Self {
        let mut entries: BTreeMap<Coord, Vec<Coord>> = BTreeMap::new();

        for (x1, x2) in (0..rect.width()).cartesian_product(0..rect.width()) {
            if oracle::admits_path(rect.width(), rect.height(), x1, x2) {
                entries.entry(x1).or_default().push(x2);
            }
        }

        Self { rect, entries }
    }

    /// The rectangle this map was built from.
    pub fn rectangle(&self) -> Rectangle {
        self.rect
    }

    /// Ascending start columns with at least one feasible end.
    pub fn starts(&self) -> impl Iterator<Item = Coord> + '_ {
        self.entries.keys().copied()
    }

    /// The ascending feasible end columns for `start`, or `None` if it has no entry.
    pub fn ends(&self, start: Coord) -> Option<&[Coord]> {
        self.entries.get(&start).map(Vec::as_slice)
    }

    /// Entries in ascending start order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &[Coord])> + '_ {
        self.entries.iter().map(|(start, ends)| (*start, ends.as_slice()))
    }

    /// Number of start columns with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no start column has a feasible end at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total count of feasible pairs, summed over all entries.
    pub fn feasible_pairs(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl Display for EndpointMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", table::print(table::grid(self)))
    }
}

/// Memoizes [`EndpointMap`]s by rectangle value.
///
/// Purely an optimization for sweeps that revisit dimensions; a cached map is always
/// equal to a fresh [`EndpointMap::of`] build. The cache holds no lock of its own, so
/// callers sharing one across workers must wrap it in their own mutual exclusion.
#[derive(Clone, Debug, Default)]
pub struct MapCache {
    maps: HashMap<Rectangle, EndpointMap>,
}

impl MapCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The map for `rect`, building and retaining it on first use.
    pub fn get_or_build(&mut self, rect: Rectangle) -> &EndpointMap {
        self.maps.entry(rect).or_insert_with(|| EndpointMap::of(rect))
    }

    /// Number of distinct rectangles cached so far.
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
