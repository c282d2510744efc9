use crate::rect::Coord;

// Closed-form existence of a Hamiltonian path from (x1, n-1) to (x2, 0) on an m-by-n
// grid. One branch per parity/size class of (m, n); callers have already validated
// m >= 2, n >= 1 and both columns.
pub(crate) fn admits_path(m: usize, n: usize, x1: Coord, x2: Coord) -> bool {
    let same_parity = x1 % 2 == x2 % 2;

    match (m, n) {
        // two columns: the path snakes, so the height's parity forces the exit column
        (2, _) if n % 2 == 1 => matches!((x1, x2), (0, 1) | (1, 0)),
        (2, _) => x1 == x2,
        // three columns: corner-to-corner only, at any height
        (3, _) => (x1 == 0 || x1 == m - 1) && (x2 == 0 || x2 == m - 1),
        // two rows: equal interior columns strand a quadrant
        (_, 2) => same_parity && (x1 != x2 || x1 == 0 || x1 == m - 1),
        (_, 3) if m % 2 == 0 => three_rows_even_width(m, x1, x2),
        (_, _) if m % 2 == 0 && n % 2 == 0 => same_parity,
        // m even, n odd > 3
        (_, _) if m % 2 == 0 => !same_parity,
        // m odd > 3, n even > 2
        (_, _) if n % 2 == 0 => same_parity,
        // m odd > 3, n odd
        (_, _) => x1 % 2 == 0 && x2 % 2 == 0,
    }
}

// m even > 2, n = 3. Endpoint parities must differ; a start within two columns of either
// vertical edge reaches every opposite-parity end, interior starts lose the ends listed
// by forbidden_ends.
fn three_rows_even_width(m: usize, x1: Coord, x2: Coord) -> bool {
    if x1 % 2 == x2 % 2 {
        return false;
    }

    if [0, 2, m - 3, m - 1].contains(&x1) {
        return true;
    }

    !forbidden_ends(m, x1).contains(&x2)
}

/// End columns unreachable from the interior start `x1` on an `(m, 3)` grid with `m`
/// even. An odd start forbids the tail of `{2, 4, .., m-2}` from index `(x1 + 1) / 2`
/// on; an even start forbids the prefix of `{1, 3, .., m-5}` short of its last
/// `(m - 2 - x1) / 2` elements. The index arithmetic is an empirical rule; small-m
/// behavior is sensitive to it, so it is kept exactly as stated.
pub(crate) fn forbidden_ends(m: usize, x1: Coord) -> Vec<Coord> {
    if x1 % 2 == 1 {
        let k = (x1 + 1) / 2;
        (2..m).step_by(2).skip(k).collect()
    } else {
        let k = (m - 2 - x1) / 2;
        let odd: Vec<Coord> = (1..m.saturating_sub(4)).step_by(2).collect();
        odd[..odd.len() - k].to_vec()
    }
}
