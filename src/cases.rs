//! The nine combinatorial classes of rectangle dimensions, the "admits a strictly wider
//! width" relation between them, and the realization of class assignments into concrete
//! stacks for study.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use strum::VariantArray;
use thiserror::Error;

use crate::rect::Rectangle;
use crate::stack::Stack;

/// Default upper bound on the widths considered when relating case classes.
pub const DEFAULT_WIDTH_BOUND: usize = 15;

const CASE_COUNT: usize = CaseClass::VARIANTS.len();

/// One of the nine classes partitioning `(m, n)` space by width parity and size, each
/// carrying its height constraint. `Display` gives the compact `C1`..`C9` labels used in
/// scenario-file headers.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum CaseClass {
    /// `m = 2`, any `n`.
    TwoWide,
    /// `m` even `> 2`, `n = 2`.
    EvenWideTwoTall,
    /// `m` even `> 2`, `n` even `> 2`.
    EvenWideEvenTall,
    /// `m` even `> 2`, `n = 3`.
    EvenWideThreeTall,
    /// `m` even `> 2`, `n` odd `> 3`.
    EvenWideOddTall,
    /// `m = 3`, any `n`.
    ThreeWide,
    /// `m` odd `> 3`, `n = 2`.
    OddWideTwoTall,
    /// `m` odd `> 3`, `n` even `> 2`.
    OddWideEvenTall,
    /// `m` odd `> 3`, `n` odd.
    OddWideOddTall,
}

impl CaseClass {
    /// Whether width `m` falls in this class.
    pub fn fits_width(&self, m: usize) -> bool {
        match self {
            Self::TwoWide => m == 2,
            Self::ThreeWide => m == 3,
            Self::EvenWideTwoTall
            | Self::EvenWideEvenTall
            | Self::EvenWideThreeTall
            | Self::EvenWideOddTall => m > 2 && m % 2 == 0,
            Self::OddWideTwoTall | Self::OddWideEvenTall | Self::OddWideOddTall => {
                m > 3 && m % 2 == 1
            }
        }
    }

    /// Whether height `n` falls in this class.
    pub fn fits_height(&self, n: usize) -> bool {
        match self {
            Self::TwoWide | Self::ThreeWide => n >= 1,
            Self::EvenWideTwoTall | Self::OddWideTwoTall => n == 2,
            Self::EvenWideThreeTall => n == 3,
            Self::EvenWideEvenTall | Self::OddWideEvenTall => n > 2 && n % 2 == 0,
            Self::EvenWideOddTall => n > 3 && n % 2 == 1,
            Self::OddWideOddTall => n % 2 == 1,
        }
    }

    /// Whether `rect` satisfies both the width and the height constraint.
    pub fn fits(&self, rect: Rectangle) -> bool {
        self.fits_width(rect.width()) && self.fits_height(rect.height())
    }

    /// The representative height used when realizing this class into concrete
    /// rectangles.
    pub fn sample_height(&self) -> usize {
        match self {
            Self::EvenWideTwoTall | Self::OddWideTwoTall => 2,
            Self::EvenWideThreeTall => 3,
            Self::EvenWideOddTall | Self::OddWideOddTall => 5,
            Self::TwoWide | Self::ThreeWide | Self::EvenWideEvenTall | Self::OddWideEvenTall => 4,
        }
    }

    /// The human-readable constraint, matching scenario-file headers.
    pub fn description(&self) -> &'static str {
        match self {
            Self::TwoWide => "m = 2",
            Self::EvenWideTwoTall => "m even > 2, n = 2",
            Self::EvenWideEvenTall => "m even > 2, n even > 2",
            Self::EvenWideThreeTall => "m even > 2, n = 3",
            Self::EvenWideOddTall => "m even > 2, n odd > 3",
            Self::ThreeWide => "m = 3",
            Self::OddWideTwoTall => "m odd > 3, n = 2",
            Self::OddWideEvenTall => "m odd > 3, n even > 2",
            Self::OddWideOddTall => "m odd > 3, n odd",
        }
    }

    fn index(&self) -> usize {
        Self::VARIANTS.iter().find_position(|case| *case == self).unwrap().0
    }
}

impl Display for CaseClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "C{}", self.index() + 1)
    }
}

/// A class assignment whose adjacent levels cannot be realized by strictly narrowing
/// widths within the taxonomy's bound. Reported to the caller, who decides whether to
/// skip or regenerate; never fatal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
#[error("no width in class {lower} strictly exceeds a width in class {upper} (bottom-first level {level})")]
pub struct StructuralMismatch {
    /// Bottom-first index of the lower level of the failing pair.
    pub level: usize,
    /// Class assigned to the lower level.
    pub lower: CaseClass,
    /// Class assigned to the level directly above it.
    pub upper: CaseClass,
}

/// The "admits a strictly wider width" relation between case classes, precomputed over
/// all widths in `2..=bound` rather than re-searched per query.
///
/// Used solely to pre-validate and generate synthetic stacks; neither the oracle nor
/// chain propagation consults it.
#[derive(Clone, Debug)]
pub struct Taxonomy {
    bound: usize,
    wider: [[bool; CASE_COUNT]; CASE_COUNT],
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::with_bound(DEFAULT_WIDTH_BOUND)
    }
}

impl Taxonomy {
    /// Precompute the relation for widths up to and including `bound`.
    pub fn with_bound(bound: usize) -> Self {
        let mut wider = [[false; CASE_COUNT]; CASE_COUNT];

        for (i, a) in CaseClass::VARIANTS.iter().enumerate() {
            for (j, b) in CaseClass::VARIANTS.iter().enumerate() {
                wider[i][j] = (2..=bound)
                    .cartesian_product(2..=bound)
                    .any(|(ma, mb)| ma > mb && a.fits_width(ma) && b.fits_width(mb));
            }
        }

        Self { bound, wider }
    }

    /// The width bound the relation was computed under.
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Whether some width in `a` strictly exceeds some width in `b`, both within the
    /// bound.
    pub fn admits_wider(&self, a: CaseClass, b: CaseClass) -> bool {
        self.wider[a.index()][b.index()]
    }

    /// Check that a bottom-first class assignment can be realized by strictly narrowing
    /// rectangles: every level's class must admit a width strictly above its upper
    /// neighbor's.
    pub fn validate(&self, classes: &[CaseClass]) -> Result<(), StructuralMismatch> {
        for (level, pair) in classes.windows(2).enumerate() {
            let (lower, upper) = (pair[0], pair[1]);
            if !self.admits_wider(lower, upper) {
                return Err(StructuralMismatch { level, lower, upper });
            }
        }

        Ok(())
    }

    /// Realize a bottom-first class assignment into at most `limit` concrete stacks by
    /// backtracking over strictly narrowing widths within the bound; heights come from
    /// [`CaseClass::sample_height`].
    ///
    /// An empty result for a [`validate`](Self::validate)-clean assignment means it has
    /// no realization under this bound, which callers may treat as skippable.
    pub fn concrete_stacks(&self, classes: &[CaseClass], limit: usize) -> Vec<Stack> {
        let mut stacks = Vec::new();

        if !classes.is_empty() && limit > 0 {
            let mut widths = Vec::with_capacity(classes.len());
            self.descend(classes, limit, &mut widths, &mut stacks);
        }

        stacks
    }

    fn descend(
        &self,
        classes: &[CaseClass],
        limit: usize,
        widths: &mut Vec<usize>,
        out: &mut Vec<Stack>,
    ) {
        if out.len() >= limit {
            return;
        }

        let level = widths.len();
        if level == classes.len() {
            let rects = classes
                .iter()
                .zip(widths.iter())
                .map(|(case, &m)| Rectangle::new(m, case.sample_height()))
                .collect::<Result<Vec<_>, _>>();
            // every generated width is >= 2 and every sampled height >= 2
            if let Ok(rects) = rects {
                out.push(Stack::new(rects));
            }
            return;
        }

        let ceiling = match level {
            0 => self.bound + 1,
            _ => widths[level - 1],
        };

        for m in 2..ceiling {
            if classes[level].fits_width(m) {
                widths.push(m);
                self.descend(classes, limit, widths, out);
                widths.pop();
            }
        }
    }
}
