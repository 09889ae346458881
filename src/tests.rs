#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::board::Board;
    use crate::cell::NodeId;
    use crate::color::Color;
    use crate::level::parse_level;
    use crate::location::Location;

    fn subtree_size(board: &Board, id: NodeId) -> usize {
        1 + board.node(id).children().iter().map(|child| subtree_size(board, *child)).sum::<usize>()
    }

    /// Every cell is covered by the region the lookup names, and every live node hangs off some top-level region.
    fn assert_consistent(board: &Board) {
        for (x, y) in (0..board.cols()).cartesian_product(0..board.rows()) {
            let location = Location(x, y);
            assert!(board.node_at(location).contains(location), "{:?} not covered by its region", location);
        }
        let reachable = board.top_level().into_iter().map(|id| subtree_size(board, id)).sum::<usize>();
        assert_eq!(reachable, board.arena.live());
    }

    fn uniform(rows: usize, cols: usize) -> Board {
        Board::init(rows, cols, 0, "", |_| Color::Red).unwrap()
    }

    #[test]
    fn lookup_accessors() {
        let mut board = uniform(2, 3);
        assert_eq!(board.at_xy(2, 1), board.at(Location(2, 1)));
        assert_eq!(board.clamp(-4, 9), Location(0, 1));
        assert_eq!(board.clamp(1, 1), Location(1, 1));

        let corner = board.at(Location(0, 0));
        let displaced = board.at(Location(1, 0));
        board.put(Location(1, 0), corner);
        assert_eq!(board.at(Location(1, 0)), corner);
        board.put(Location(1, 0), displaced);
        assert_consistent(&board);
    }

    #[test]
    fn display_plain_level() {
        let board = parse_level("2 4 1 a caption
1 1 2 2
1 1 2 2
A 0 0 3 1
").unwrap();

        // the end sits on orange, so it is drawn blocked
        assert_eq!(format!("{}", board), "A122
112!
");
    }

    #[test]
    fn display_after_merge() {
        let mut board = parse_level("2 4 1 x
1 1 2 2
1 5 2 2
A 0 0 3 1
").unwrap();

        assert!(board.combine(Location(2, 0), Location(3, 1)));
        assert!(board.combine(Location(0, 0), Location(1, 1)));
        board.update_path();
        assert_eq!(format!("{}", board), "A122
112!
");

        assert!(board.combine(Location(0, 0), Location(3, 1)));
        board.update_path();
        // four red cells against four orange: the tie goes to red
        assert_eq!(format!("{}", board), "A111
111A
");
        assert_consistent(&board);
    }

    #[test]
    fn merge_split_round_trip() {
        let mut board = uniform(4, 4);
        let original = board.lookup.clone();

        assert!(board.combine(Location(0, 0), Location(1, 1)));
        assert_consistent(&board);
        assert!(board.split(Location(1, 1)));
        assert_eq!(board.lookup, original);
        assert_consistent(&board);
    }

    #[test]
    fn nested_merges_unwind() {
        let mut board = uniform(4, 4);
        let original = board.lookup.clone();

        assert!(board.combine(Location(0, 0), Location(1, 1)));
        assert!(board.combine(Location(2, 0), Location(3, 1)));
        let halves = board.lookup.clone();
        assert!(board.combine(Location(0, 0), Location(3, 1)));
        assert_eq!(board.node_at(Location(3, 0)).dim(), Location(4, 2));
        assert_eq!(board.node_at(Location(3, 0)).children().len(), 2);
        assert_consistent(&board);

        assert!(board.split(Location(2, 1)));
        assert_eq!(board.lookup, halves);
        assert!(board.split(Location(0, 0)));
        assert!(board.split(Location(3, 1)));
        assert_eq!(board.lookup, original);
        assert_consistent(&board);

        // leaves have nothing to undo
        assert!(!board.split(Location(3, 1)));
        assert_eq!(board.arena.live(), 16);
    }

    #[test]
    fn ragged_merge_is_refused() {
        let mut board = uniform(2, 2);
        assert!(board.combine(Location(0, 0), Location(1, 0)));
        let before = board.lookup.clone();

        // a 2x1 region alongside two single cells
        assert!(!board.combine(Location(0, 0), Location(1, 1)));
        assert_eq!(board.lookup, before);
        // entirely within one region
        assert!(!board.combine(Location(0, 0), Location(1, 0)));
        assert_eq!(board.lookup, before);
        assert_consistent(&board);
    }

    #[test]
    fn cutting_merge_is_refused() {
        let mut board = uniform(1, 3);
        assert!(board.combine(Location(0, 0), Location(1, 0)));
        let before = board.lookup.clone();

        assert!(!board.combine(Location(1, 0), Location(2, 0)));
        assert_eq!(board.lookup, before);

        // corners out of order or off the board
        assert!(!board.combine(Location(2, 0), Location(0, 0)));
        assert!(!board.combine(Location(0, 0), Location(3, 0)));
        assert_eq!(board.lookup, before);
    }

    #[test]
    fn selection_snaps_to_regions() {
        let mut board = uniform(4, 4);
        assert!(board.combine(Location(2, 2), Location(3, 3)));
        assert_eq!(board.selection(Location(3, 3), Location(0, 0)), (Location(0, 0), Location(3, 3)));
        assert_eq!(board.selection(Location(2, 3), Location(3, 2)), (Location(2, 2), Location(3, 3)));
    }

    #[test]
    fn majority_color() {
        let row = |digits: &str| parse_level(&format!("1 {} 0 x\n{}\n", digits.len(), digits)).unwrap();
        let merged = |digits: &str| {
            let mut board = row(digits);
            assert!(board.combine(Location(0, 0), Location(digits.len() - 1, 0)));
            board.node_at(Location(0, 0)).color()
        };

        assert_eq!(merged("11155"), Color::Red);
        assert_eq!(merged("55111"), Color::Red);
        assert_eq!(merged("1101"), Color::Black);
        assert_eq!(merged("7775"), Color::Indigo);
        assert_eq!(merged("77"), Color::White);
        assert_eq!(merged("21"), Color::Red);
    }

    #[test]
    fn majority_counts_cells_not_regions() {
        let mut board = parse_level("2 4 0 x\n2 2 1 1\n2 2 1 3\n").unwrap();
        assert!(board.combine(Location(0, 0), Location(1, 1)));
        // one orange region covering four cells outvotes three red regions
        assert_eq!(board.result_color(Location(0, 0), Location(3, 1)), Color::Orange);
    }

    #[test]
    fn adjacency_is_unique() {
        let mut board = uniform(3, 2);
        assert!(board.combine(Location(0, 0), Location(1, 1)));
        assert!(board.combine(Location(0, 2), Location(1, 2)));
        let top = board.at(Location(0, 0));
        let bottom = board.at(Location(0, 2));

        assert_eq!(board.adjacent(top), vec![bottom]);
        assert_eq!(board.adjacent(bottom), vec![top]);
    }

    #[test]
    fn adjacency_at_corners() {
        let board = uniform(3, 3);
        let corner = board.adjacent(board.at(Location(0, 0)));
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&board.at(Location(1, 0))));
        assert!(corner.contains(&board.at(Location(0, 1))));
        assert_eq!(board.adjacent(board.at(Location(1, 1))).len(), 4);
    }

    #[test]
    fn single_color_is_satisfied() {
        let mut board = parse_level("3 3 1 x
1 1 1
1 1 1
1 1 1
A 0 0 2 2
").unwrap();
        let result = board.update_path();
        assert_eq!(result.satisfied, vec![true]);
        assert!(result.won);
    }

    #[test]
    fn black_row_blocks() {
        let mut board = parse_level("3 3 1 x
1 1 1
0 0 0
1 1 1
A 0 0 2 2
").unwrap();
        assert_eq!(format!("{}", board), "A11
000
11A
");
        let result = board.update_path();
        assert_eq!(result.satisfied, vec![false]);
        assert!(!result.won);
    }

    #[test]
    fn one_of_two_is_not_a_win() {
        let mut board = parse_level("2 3 2 x
1 1 1
2 0 2
A 0 0 2 0
B 0 1 2 1
").unwrap();
        let result = board.update_path();
        assert_eq!(result.satisfied, vec![true, false]);
        assert!(!result.won);
    }

    #[test]
    fn no_symbols_is_a_win() {
        let mut board = uniform(2, 2);
        assert!(board.update_path().won);
    }

    #[test]
    fn merging_bridges_a_gap() {
        let mut board = parse_level("2 4 1 x
1 1 1 1
1 0 1 1
A 0 1 3 1
").unwrap();
        // (0, 1) reaches (3, 1) around the top already
        assert!(board.update_path().won);

        assert!(board.set_color(Location(1, 0), Color::Black));
        assert!(!board.update_path().won);

        // any black cell turns the merged block black
        assert!(board.combine(Location(0, 0), Location(1, 1)));
        assert_eq!(board.node_at(Location(0, 0)).color(), Color::Black);
        assert!(!board.update_path().won);

        assert!(board.split(Location(0, 0)));
        assert!(board.set_color(Location(1, 1), Color::Red));
        assert!(board.update_path().won);
    }

    #[test]
    fn connectivity_is_idempotent() {
        let mut board = parse_level("3 4 2 x
1 1 2 2
1 0 2 3
1 1 3 3
A 0 0 1 2
B 2 0 3 2
").unwrap();
        assert!(board.combine(Location(2, 1), Location(3, 2)));

        let first = board.update_path();
        let flags = board.top_level().into_iter().map(|id| board.node(id).paths()).collect_vec();
        let second = board.update_path();
        let again = board.top_level().into_iter().map(|id| board.node(id).paths()).collect_vec();

        assert_eq!(first, second);
        assert_eq!(flags, again);
    }

    #[test]
    fn clones_are_independent() {
        let mut board = uniform(2, 2);
        let copy = board.clone();
        assert!(board.combine(Location(0, 0), Location(1, 1)));
        assert_eq!(copy.top_level().len(), 4);
        assert_eq!(board.top_level().len(), 1);
        assert_consistent(&copy);
    }
}
