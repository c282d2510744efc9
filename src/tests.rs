#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use itertools::Itertools;
    use petgraph::graphmap::UnGraphMap;
    use strum::VariantArray;

    use crate::cases::{CaseClass, Taxonomy};
    use crate::oracle;
    use crate::rect::{Coord, EndpointPair, GridError, Location, Rectangle};
    use crate::stack::Stack;
    use crate::table;

    fn rect(m: usize, n: usize) -> Rectangle {
        Rectangle::new(m, n).unwrap()
    }

    #[test]
    fn rejects_malformed_rectangles() {
        assert_eq!(
            Rectangle::new(1, 5),
            Err(GridError::InvalidRectangle { m: 1, n: 5 })
        );
        assert_eq!(
            Rectangle::new(2, 0),
            Err(GridError::InvalidRectangle { m: 2, n: 0 })
        );
        assert!(Rectangle::new(2, 1).is_ok());

        assert_eq!(
            GridError::InvalidRectangle { m: 1, n: 5 }.to_string(),
            "rectangle dimensions must satisfy m >= 2, n >= 1; got m=1, n=5"
        );
    }

    #[test]
    fn rejects_out_of_range_columns() {
        let r = rect(4, 3);

        assert_eq!(
            r.admits(4, 0),
            Err(GridError::ColumnOutOfRange { column: 4, width: 4 })
        );
        assert_eq!(
            r.admits(0, 9),
            Err(GridError::ColumnOutOfRange { column: 9, width: 4 })
        );
        assert_eq!(
            GridError::ColumnOutOfRange { column: 9, width: 4 }.to_string(),
            "column 9 out of range for width 4"
        );
    }

    #[test]
    fn two_column_point_checks() {
        assert!(rect(2, 3).admits(0, 1).unwrap());
        assert!(!rect(2, 3).admits(0, 0).unwrap());
        assert!(rect(2, 4).admits(0, 0).unwrap());
        assert!(!rect(2, 4).admits(1, 0).unwrap());
    }

    #[test]
    fn three_column_point_checks() {
        assert!(rect(3, 5).admits(0, 0).unwrap());
        assert!(!rect(3, 5).admits(1, 1).unwrap());
        assert!(rect(3, 5).admits(0, 2).unwrap());
    }

    #[test]
    fn oracle_is_deterministic() {
        for (m, n) in (2..=8).cartesian_product(1..=8) {
            let r = rect(m, n);
            for (x1, x2) in (0..m).cartesian_product(0..m) {
                assert_eq!(r.admits(x1, x2), r.admits(x1, x2));
            }
            assert_eq!(r.endpoint_map(), r.endpoint_map());
        }
    }

    #[test]
    fn forbidden_ends_small_widths() {
        assert_eq!(oracle::forbidden_ends(6, 1), vec![4]);
        assert_eq!(oracle::forbidden_ends(8, 3), vec![6]);
        assert_eq!(oracle::forbidden_ends(8, 4), vec![1]);
        assert_eq!(oracle::forbidden_ends(10, 3), vec![6, 8]);
        assert_eq!(oracle::forbidden_ends(10, 5), vec![8]);
        assert_eq!(oracle::forbidden_ends(10, 4), vec![1]);
        assert_eq!(oracle::forbidden_ends(10, 6), vec![1, 3]);
    }

    #[test]
    fn two_column_maps() {
        let snaking = rect(2, 3).endpoint_map();
        assert_eq!(snaking.ends(0), Some([1].as_slice()));
        assert_eq!(snaking.ends(1), Some([0].as_slice()));
        assert_eq!(format!("{}", snaking), ".#
#.
");

        let straight = rect(2, 4).endpoint_map();
        assert_eq!(straight.ends(0), Some([0].as_slice()));
        assert_eq!(straight.ends(1), Some([1].as_slice()));
        assert_eq!(format!("{}", straight), "#.
.#
");
    }

    #[test]
    fn three_column_corners_only() {
        assert_eq!(format!("{}", rect(3, 5).endpoint_map()), "#.#
...
#.#
");
    }

    #[test]
    fn even_width_three_row_maps() {
        assert_eq!(format!("{}", rect(4, 3).endpoint_map()), ".#.#
#.#.
.#.#
#.#.
");

        // interior starts 1 and 4 lose the ends listed by forbidden_ends
        assert_eq!(format!("{}", rect(6, 3).endpoint_map()), ".#.#.#
#.#...
.#.#.#
#.#.#.
...#.#
#.#.#.
");
    }

    #[test]
    fn map_omits_starts_with_no_ends() {
        let map = rect(5, 5).endpoint_map();

        assert_eq!(map.starts().collect_vec(), vec![0, 2, 4]);
        assert_eq!(map.ends(1), None);
        assert_eq!(map.ends(3), None);
        assert_eq!(map.len(), 3);
        assert_eq!(map.feasible_pairs(), 9);
        assert!(!map.is_empty());
    }

    #[test]
    fn map_total_matches_pairwise_sweep() {
        for (m, n) in [(4, 3), (5, 4), (6, 5), (7, 7), (2, 6), (9, 2)] {
            let r = rect(m, n);
            let swept = (0..m)
                .cartesian_product(0..m)
                .filter(|&(x1, x2)| r.admits(x1, x2).unwrap())
                .count();

            assert_eq!(r.endpoint_map().feasible_pairs(), swept);
        }
    }

    #[test]
    fn map_cache_matches_fresh_builds() {
        let mut cache = crate::MapCache::new();
        assert!(cache.is_empty());

        assert_eq!(*cache.get_or_build(rect(6, 3)), rect(6, 3).endpoint_map());
        assert_eq!(*cache.get_or_build(rect(6, 3)), rect(6, 3).endpoint_map());
        assert_eq!(*cache.get_or_build(rect(5, 2)), rect(5, 2).endpoint_map());
        assert_eq!(cache.len(), 2);
    }

    fn grid_graph(m: usize, n: usize) -> UnGraphMap<(Coord, Coord), ()> {
        let mut graph = UnGraphMap::new();

        for (x, y) in (0..m).cartesian_product(0..n) {
            graph.add_node((x, y));
        }
        for (x, y) in (0..m).cartesian_product(0..n) {
            if x + 1 < m {
                graph.add_edge((x, y), (x + 1, y), ());
            }
            if y + 1 < n {
                graph.add_edge((x, y), (x, y + 1), ());
            }
        }

        graph
    }

    fn extend_path(
        graph: &UnGraphMap<(Coord, Coord), ()>,
        goal: (Coord, Coord),
        visited: &mut HashSet<(Coord, Coord)>,
        current: (Coord, Coord),
    ) -> bool {
        if visited.len() == graph.node_count() {
            return current == goal;
        }
        if current == goal {
            return false;
        }

        for next in graph.neighbors(current).collect_vec() {
            if visited.insert(next) {
                if extend_path(graph, goal, visited, next) {
                    return true;
                }
                visited.remove(&next);
            }
        }

        false
    }

    fn brute_force_path_exists(m: usize, n: usize, x1: Coord, x2: Coord) -> bool {
        let graph = grid_graph(m, n);
        let start = (x1, n - 1);
        let mut visited = HashSet::from([start]);

        extend_path(&graph, (x2, 0), &mut visited, start)
    }

    #[test]
    fn oracle_agrees_with_brute_force() {
        for (m, n) in (2..=5).cartesian_product(2..=5) {
            let r = rect(m, n);
            for (x1, x2) in (0..m).cartesian_product(0..m) {
                assert_eq!(
                    r.admits(x1, x2).unwrap(),
                    brute_force_path_exists(m, n, x1, x2),
                    "oracle disagrees with search at m={} n={} x1={} x2={}",
                    m,
                    n,
                    x1,
                    x2
                );
            }
        }
    }

    #[test]
    fn case_labels_and_membership() {
        assert_eq!(CaseClass::TwoWide.to_string(), "C1");
        assert_eq!(CaseClass::EvenWideThreeTall.to_string(), "C4");
        assert_eq!(CaseClass::OddWideOddTall.to_string(), "C9");
        assert_eq!(CaseClass::EvenWideThreeTall.description(), "m even > 2, n = 3");

        assert!(CaseClass::EvenWideThreeTall.fits(rect(6, 3)));
        assert!(!CaseClass::EvenWideThreeTall.fits(rect(6, 4)));
        assert!(!CaseClass::EvenWideThreeTall.fits(rect(5, 3)));
        assert!(CaseClass::TwoWide.fits(rect(2, 9)));
        assert!(CaseClass::OddWideOddTall.fits(rect(7, 3)));
        assert!(!CaseClass::OddWideOddTall.fits(rect(7, 4)));

        assert_eq!(CaseClass::OddWideTwoTall.sample_height(), 2);
        assert_eq!(CaseClass::EvenWideThreeTall.sample_height(), 3);
        assert_eq!(CaseClass::ThreeWide.sample_height(), 4);
        assert_eq!(CaseClass::EvenWideOddTall.sample_height(), 5);
    }

    #[test]
    fn taxonomy_relation_spot_checks() {
        let taxonomy = Taxonomy::default();
        assert_eq!(taxonomy.bound(), 15);

        // nothing fits strictly below width 2
        for b in CaseClass::VARIANTS {
            assert!(!taxonomy.admits_wider(CaseClass::TwoWide, *b));
        }

        assert!(taxonomy.admits_wider(CaseClass::ThreeWide, CaseClass::TwoWide));
        assert!(!taxonomy.admits_wider(CaseClass::ThreeWide, CaseClass::ThreeWide));
        assert!(taxonomy.admits_wider(CaseClass::EvenWideTwoTall, CaseClass::OddWideOddTall));
        assert!(taxonomy.admits_wider(CaseClass::OddWideTwoTall, CaseClass::ThreeWide));

        let narrow = Taxonomy::with_bound(3);
        assert!(narrow.admits_wider(CaseClass::ThreeWide, CaseClass::TwoWide));
        assert!(!narrow.admits_wider(CaseClass::EvenWideTwoTall, CaseClass::TwoWide));
    }

    #[test]
    fn validator_accepts_and_rejects() {
        let taxonomy = Taxonomy::default();

        assert!(taxonomy
            .validate(&[
                CaseClass::OddWideOddTall,
                CaseClass::EvenWideThreeTall,
                CaseClass::ThreeWide,
            ])
            .is_ok());

        let mismatch = taxonomy
            .validate(&[CaseClass::TwoWide, CaseClass::ThreeWide])
            .unwrap_err();
        assert_eq!(mismatch.level, 0);
        assert_eq!(mismatch.lower, CaseClass::TwoWide);
        assert_eq!(mismatch.upper, CaseClass::ThreeWide);
        assert_eq!(
            mismatch.to_string(),
            "no width in class C1 strictly exceeds a width in class C6 (bottom-first level 0)"
        );
    }

    #[test]
    fn generator_realizes_assignments() {
        let taxonomy = Taxonomy::default();
        let classes = [CaseClass::OddWideOddTall, CaseClass::ThreeWide];

        let stacks = taxonomy.concrete_stacks(&classes, 5);
        assert_eq!(stacks.len(), 5);
        assert_eq!(stacks[0], Stack::new(vec![rect(5, 5), rect(3, 4)]));

        for stack in &stacks {
            for (case, level) in classes.iter().zip(stack.levels()) {
                assert!(case.fits(*level));
            }
            for pair in stack.levels().windows(2) {
                assert!(pair[0].width() > pair[1].width());
            }
        }

        // structurally impossible: nothing is narrower than two columns
        assert!(taxonomy
            .concrete_stacks(&[CaseClass::TwoWide, CaseClass::ThreeWide], 5)
            .is_empty());
    }

    #[test]
    fn chains_align_across_boundaries() {
        let stack = Stack::new(vec![rect(6, 4), rect(4, 3), rect(2, 2)]);
        let solutions = stack.solve();
        assert!(solutions.count() > 0);

        for chain in solutions.chains() {
            assert_eq!(chain.links().len(), stack.depth());
            for pair in chain.links().windows(2) {
                assert_eq!(pair[0].start(), pair[1].end());
            }
        }
    }

    #[test]
    fn two_level_tower_end_to_end() {
        let stack = Stack::new(vec![rect(2, 3), rect(2, 4)]);
        let solutions = stack.solve();

        assert_eq!(solutions.count(), 2);
        assert_eq!(
            solutions.chains()[0].links(),
            [EndpointPair(0, 1), EndpointPair(0, 0)]
        );
        assert_eq!(
            solutions.chains()[1].links(),
            [EndpointPair(1, 0), EndpointPair(1, 1)]
        );
        assert_eq!(format!("{}", solutions), "#Solutions: 2
  1. R2[0->0], R1[0->1]
  2. R2[1->1], R1[1->0]
");

        assert_eq!(stack.offsets(), vec![0, 3]);
        assert_eq!(stack.height(), 7);
        assert_eq!(
            stack.spans(&solutions.chains()[0]),
            vec![
                (Location(0, 2), Location(1, 0)),
                (Location(0, 6), Location(0, 3)),
            ]
        );
        assert_eq!(
            stack.endpoints(&solutions.chains()[0]),
            Some((Location(0, 6), Location(1, 0)))
        );
    }

    #[test]
    fn infeasible_stack_yields_zero_chains() {
        // the middle level can only end on odd columns, which the bottom never starts on
        let stack = Stack::new(vec![rect(5, 5), rect(4, 3), rect(3, 4)]);
        let solutions = stack.solve();

        assert_eq!(solutions.count(), 0);
        assert!(solutions.chains().is_empty());
        assert_eq!(format!("{}", solutions), "#Solutions: 0
");
    }

    #[test]
    fn csv_rows_follow_the_grid_convention() {
        assert_eq!(table::csv(&rect(2, 3).endpoint_map()), "m,n,S,T,feasible
2,3,\"(0,2)\",\"(0,0)\",0
2,3,\"(0,2)\",\"(1,0)\",1
2,3,\"(1,2)\",\"(0,0)\",1
2,3,\"(1,2)\",\"(1,0)\",0
");
    }
}
