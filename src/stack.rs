use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::map::EndpointMap;
use crate::rect::{Coord, EndpointPair, Location, Rectangle};

/// An ordered stack of rectangles, index 0 the bottommost.
///
/// Adjacent rectangles share a horizontal boundary with their columns aligned at
/// `x = 0`. The solver places no constraint on widths; strictly narrowing stacks are a
/// property of the generator in [`cases`](crate::cases), not of chain propagation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stack {
    levels: Vec<Rectangle>,
}

impl Stack {
    /// A stack from bottom-first rectangles.
    pub fn new(levels: Vec<Rectangle>) -> Self {
        Self { levels }
    }

    /// The rectangles, bottom-first.
    pub fn levels(&self) -> &[Rectangle] {
        &self.levels
    }

    /// Number of stacked rectangles.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Global `y` of each level's bottom row, bottom-first: level 0 sits at 0, level `i`
    /// at the summed heights of everything below it.
    pub fn offsets(&self) -> Vec<usize> {
        self.levels
            .iter()
            .scan(0, |acc, rect| {
                let offset = *acc;
                *acc += rect.height();
                Some(offset)
            })
            .collect()
    }

    /// Total height in rows.
    pub fn height(&self) -> usize {
        self.levels.iter().map(Rectangle::height).sum()
    }

    /// Enumerate every chain of endpoint pairs consistent across level boundaries.
    ///
    /// Propagation runs depth-first from the topmost level, whose start column is a free
    /// choice among its endpoint-map entries. Each lower level must then start at the
    /// column its upper neighbor ended on; a start column absent from that level's map
    /// prunes the branch. Iteration is in ascending column order throughout, so the
    /// chain order is deterministic. An empty chain list marks a structurally infeasible
    /// stack and is an ordinary outcome, not an error.
    pub fn solve(&self) -> Solutions {
        let maps = self.levels.iter().map(Rectangle::endpoint_map).collect_vec();
        let mut chains = Vec::new();

        if let Some((top, below)) = maps.split_last() {
            let mut pairs = Vec::with_capacity(self.depth());
            for (start, ends) in top.iter() {
                for &end in ends {
                    pairs.push(EndpointPair(start, end));
                    descend(below, end, &mut pairs, &mut chains);
                    pairs.pop();
                }
            }
        }

        Solutions { stack: self.clone(), chains }
    }

    /// Per-level global start/end locations for `chain`, bottom-first. Starts sit on
    /// each level's top row, ends on its bottom row.
    pub fn spans(&self, chain: &Chain) -> Vec<(Location, Location)> {
        chain
            .links()
            .iter()
            .zip(self.levels.iter())
            .zip(self.offsets())
            .map(|((pair, rect), offset)| {
                (
                    Location(pair.start(), offset + rect.height() - 1),
                    Location(pair.end(), offset),
                )
            })
            .collect_vec()
    }

    /// Whole-stack endpoints of `chain`: the topmost level's top-row start and the
    /// bottommost level's bottom-row end. `None` on an empty stack.
    pub fn endpoints(&self, chain: &Chain) -> Option<(Location, Location)> {
        let spans = self.spans(chain);

        match (spans.last(), spans.first()) {
            (Some(&(start, _)), Some(&(_, end))) => Some((start, end)),
            _ => None,
        }
    }
}

// below holds the maps under the level whose start column was just fixed; pairs holds
// the choices made so far, top-first.
fn descend(
    below: &[EndpointMap],
    start: Coord,
    pairs: &mut Vec<EndpointPair>,
    chains: &mut Vec<Chain>,
) {
    match below.split_last() {
        None => {
            let mut links = pairs.clone();
            links.reverse();
            chains.push(Chain { links });
        }
        Some((level, rest)) => {
            if let Some(ends) = level.ends(start) {
                for &end in ends {
                    pairs.push(EndpointPair(start, end));
                    descend(rest, end, pairs, chains);
                    pairs.pop();
                }
            }
        }
    }
}

/// One globally consistent assignment of endpoint pairs, one per level, bottom-first.
///
/// For adjacent levels `i` (lower) and `i + 1`, `links[i].start() == links[i + 1].end()`:
/// the column leaving the bottom of the upper rectangle meets the column entering the
/// top of the one below.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chain {
    links: Vec<EndpointPair>,
}

impl Chain {
    /// The endpoint pairs, bottom-first.
    pub fn links(&self) -> &[EndpointPair] {
        &self.links
    }
}

/// Every chain of a solved stack, plus the stack itself for geometry queries.
///
/// `Display` renders the scenario-report form: a `#Solutions: N` line, then one
/// top-first `R<i>[start->end]` line per chain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solutions {
    stack: Stack,
    chains: Vec<Chain>,
}

impl Solutions {
    /// The solved stack.
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// The chains, in the order the search produced them.
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Number of chains found. Zero marks a structurally infeasible stack, not an error.
    pub fn count(&self) -> usize {
        self.chains.len()
    }
}

impl Display for Solutions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "#Solutions: {}", self.count())?;

        for (index, chain) in self.chains.iter().enumerate() {
            let line = chain
                .links()
                .iter()
                .enumerate()
                .rev()
                .map(|(level, pair)| format!("R{}[{}->{}]", level + 1, pair.start(), pair.end()))
                .join(", ");
            writeln!(f, "{:3}. {}", index + 1, line)?;
        }

        Ok(())
    }
}
