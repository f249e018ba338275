// Copyright (C) 2020-2024 Andy Kurnia.

use super::{anchor, board, cross_check, dictionary, rack};

// var_coord runs along the line, common_coord picks the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlacedTile {
    pub tile: u8,
    pub var_coord: i8,
    pub is_blank: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MoveInfo {
    pub horizontal: bool,
    pub common_coord: i8,
    pub tiles: Vec<PlacedTile>,
}

impl MoveInfo {
    // (col, row) in board coordinates of each placed tile.
    pub fn board_coords(&self) -> impl Iterator<Item = (i8, i8, &PlacedTile)> + '_ {
        self.tiles.iter().map(move |t| {
            if self.horizontal {
                (t.var_coord, self.common_coord, t)
            } else {
                (self.common_coord, t.var_coord, t)
            }
        })
    }
}

// Reusable buffers for the per-anchor search.
#[derive(Default)]
pub struct WorkingBuffer {
    word: Vec<u8>,
    placed: Vec<PlacedTile>,
}

impl WorkingBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct AnchorContext<'a, D: ?Sized, B: board::BoardModel + ?Sized> {
    pub dict: &'a D,
    pub view: &'a board::BoardView<'a, B>,
    pub cross_checks: &'a cross_check::CrossCheckTable,
    pub row: i8,
    pub min_tiles: i8,
}

// Runs left_part/extend_right from one anchor. found gets the placed tiles (all
// is_blank false) and the faces the blanks currently stand for; it returns
// false to stop. Returns true iff stopped. The rack is restored either way.
pub fn gen_moves_for_anchor<
    D: dictionary::DictionaryView + ?Sized,
    B: board::BoardModel + ?Sized,
    F: FnMut(&[PlacedTile], &[u8]) -> bool,
>(
    ctx: &AnchorContext<'_, D, B>,
    anchor: &anchor::Anchor,
    rack: &mut rack::Rack,
    working_buffer: &mut WorkingBuffer,
    found: F,
) -> bool {
    struct Env<'a, D: ?Sized, B: board::BoardModel + ?Sized, F> {
        dict: &'a D,
        view: &'a board::BoardView<'a, B>,
        cross_checks: &'a cross_check::CrossCheckTable,
        rack: &'a mut rack::Rack,
        word: &'a mut Vec<u8>,
        placed: &'a mut Vec<PlacedTile>,
        found: F,
        row: i8,
        min_tiles: i8,
        stopped: bool,
    }

    fn consider_move<
        D: dictionary::DictionaryView + ?Sized,
        B: board::BoardModel + ?Sized,
        F: FnMut(&[PlacedTile], &[u8]) -> bool,
    >(
        env: &mut Env<D, B, F>,
        first_col: i8,
    ) {
        env.placed.clear();
        let len = env.view.line_len();
        let mut col = first_col;
        let mut i = 0;
        while i < env.word.len() && col < len {
            if env.view.is_empty(col, env.row) {
                env.placed.push(PlacedTile {
                    tile: env.word[i],
                    var_coord: col,
                    is_blank: false,
                });
                i += 1;
            }
            col += 1;
        }
        debug_assert_eq!(i, env.word.len());
        if !(env.found)(&env.placed[..], env.rack.blank_values()) {
            env.stopped = true;
        }
    }

    fn extend_right<
        D: dictionary::DictionaryView + ?Sized,
        B: board::BoardModel + ?Sized,
        F: FnMut(&[PlacedTile], &[u8]) -> bool,
    >(
        env: &mut Env<D, B, F>,
        edge: Option<dictionary::Edge>,
        accepting: bool,
        first_col: i8,
        col: i8,
    ) {
        if col < env.view.line_len() {
            match env.view.get(col, env.row, false) {
                Some(tile) => {
                    // the board's tile must continue the word.
                    if let Some(e) = env.dict.edge_with_tile(edge, tile) {
                        let (next, accepts) = (env.dict.follow(e), env.dict.is_accepting(e));
                        extend_right(env, next, accepts, first_col, col + 1);
                    }
                    return;
                }
                None => {
                    if let Some(mut e) = edge {
                        if env.rack.tiles_left() > 0 {
                            let cross_check = env.cross_checks.get(col);
                            loop {
                                let tile = env.dict.edge_tile(e);
                                if cross_check.contains(tile) {
                                    if let Some(is_blank) = env.rack.remove(tile) {
                                        env.word.push(tile);
                                        let (next, accepts) =
                                            (env.dict.follow(e), env.dict.is_accepting(e));
                                        extend_right(env, next, accepts, first_col, col + 1);
                                        env.word.pop();
                                        env.rack.replace(tile, is_blank);
                                        if env.stopped {
                                            return;
                                        }
                                    }
                                }
                                match env.dict.next_sibling(e) {
                                    Some(next) => e = next,
                                    None => break,
                                }
                            }
                        }
                    }
                }
            }
        }
        // the word so far ends here: off the board, off the dawg, or before an empty square.
        if accepting && env.word.len() as i8 >= env.min_tiles {
            consider_move(env, first_col);
        }
    }

    fn left_part<
        D: dictionary::DictionaryView + ?Sized,
        B: board::BoardModel + ?Sized,
        F: FnMut(&[PlacedTile], &[u8]) -> bool,
    >(
        env: &mut Env<D, B, F>,
        edge: Option<dictionary::Edge>,
        limit: i8,
        first_col: i8,
        anchor_col: i8,
    ) {
        extend_right(env, edge, false, first_col, anchor_col);
        if env.stopped || limit <= 0 || env.rack.tiles_left() <= 0 {
            return;
        }
        let Some(mut e) = edge else {
            return;
        };
        loop {
            let tile = env.dict.edge_tile(e);
            if let Some(is_blank) = env.rack.remove(tile) {
                env.word.push(tile);
                let next = env.dict.follow(e);
                left_part(env, next, limit - 1, first_col - 1, anchor_col);
                env.word.pop();
                env.rack.replace(tile, is_blank);
            }
            if env.stopped {
                break;
            }
            match env.dict.next_sibling(e) {
                Some(next) => e = next,
                None => break,
            }
        }
    }

    // the run of board tiles just left of col, read through the dawg.
    fn consume_from_left<
        D: dictionary::DictionaryView + ?Sized,
        B: board::BoardModel + ?Sized,
        F: FnMut(&[PlacedTile], &[u8]) -> bool,
    >(
        env: &Env<D, B, F>,
        col: i8,
    ) -> Option<dictionary::Edge> {
        let mut start = col;
        while !env.view.is_empty(start - 1, env.row) {
            start -= 1;
        }
        debug_assert!(start < col);
        let mut edge = env.dict.top_edge();
        for c in start..col {
            edge = env.dict.edge_from_tile(edge, env.view.get(c, env.row, false)?);
        }
        edge
    }

    working_buffer.word.clear();
    let mut env = Env {
        dict: ctx.dict,
        view: ctx.view,
        cross_checks: ctx.cross_checks,
        rack,
        word: &mut working_buffer.word,
        placed: &mut working_buffer.placed,
        found,
        row: ctx.row,
        min_tiles: ctx.min_tiles.max(1),
        stopped: false,
    };

    let col = anchor.col;
    if env.view.is_empty(col - 1, env.row) {
        // left part squares must be free of neighbors; between anchors they
        // always are, unless the first move is made on a board with tiles.
        let limit = anchor.left_limit(env.rack.tiles_left());
        let mut free = 0;
        while free < limit {
            let c = col - 1 - free;
            let cross_check = env.cross_checks.get(c);
            if cross_check.bits == 0
                || cross_check.has_cross_word
                || !env.view.is_empty(c, env.row)
                || !env.view.is_empty(c - 1, env.row)
            {
                break;
            }
            free += 1;
        }
        let top_edge = env.dict.top_edge();
        left_part(&mut env, top_edge, free, col, col);
    } else {
        // tiles on the left are part of every word through this anchor.
        let edge = consume_from_left(&env, col);
        if edge.is_some() {
            extend_right(&mut env, edge, false, col, col);
        }
    }
    env.stopped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardModel;
    use crate::{alphabet, board_layout};

    fn w(s: &str) -> Vec<u8> {
        alphabet::ENGLISH_ALPHABET.word_from_str(s).unwrap()
    }

    fn collect(
        dict: &dictionary::Dictionary,
        board: &board::Board,
        horizontal: bool,
        row: i8,
        tray: &str,
    ) -> Vec<(Vec<PlacedTile>, Vec<u8>)> {
        let alphabet = &alphabet::ENGLISH_ALPHABET;
        let dim = board.dim();
        let layout = board_layout::make_plain_board_layout(dim.rows, dim.cols);
        let view = board::BoardView::new(board, &layout, horizontal, alphabet.blank_tile());
        let mut cross_checks = cross_check::CrossCheckTable::new();
        cross_checks.compute(dict, &view, row, 0, view.line_len() - 1);
        let mut rack = rack::Rack::new();
        rack.init(
            alphabet.len(),
            alphabet.blank_tile(),
            &alphabet.rack_from_str(tray).unwrap(),
            7,
        );
        let tally_before = rack.tally().to_vec();
        let ctx = AnchorContext {
            dict,
            view: &view,
            cross_checks: &cross_checks,
            row,
            min_tiles: 1,
        };
        let mut working_buffer = WorkingBuffer::new();
        let mut found = Vec::new();
        let center = if board.get_tile(layout.star_col(), layout.star_row()).is_none() {
            Some((layout.star_col(), layout.star_row()))
        } else {
            None
        };
        let mut scan = anchor::AnchorScan::new(0, view.line_len() - 1);
        while let Some(anchor) = scan.next_anchor(&view, row, center) {
            let stopped =
                gen_moves_for_anchor(&ctx, &anchor, &mut rack, &mut working_buffer, |p, b| {
                    found.push((p.to_vec(), b.to_vec()));
                    true
                });
            assert!(!stopped);
            scan.finish(&anchor);
        }
        assert_eq!(rack.tally(), &tally_before[..]);
        found
    }

    fn word_of(placed: &[PlacedTile]) -> Vec<u8> {
        placed.iter().map(|p| p.tile).collect()
    }

    #[test]
    fn first_move_goes_through_center() {
        let dict = dictionary::Dictionary::from_words(
            &alphabet::ENGLISH_ALPHABET,
            &["CAT", "CATS", "AT"],
        )
        .unwrap();
        let board = board::Board::new(crate::matrix::Dim { rows: 5, cols: 5 });
        let found = collect(&dict, &board, true, 2, "CATS");
        assert!(!found.is_empty());
        for (placed, _) in &found {
            let cols = placed.iter().map(|p| p.var_coord).collect::<Vec<_>>();
            assert!(cols.contains(&2), "{:?}", placed);
            assert!(dictionary::DictionaryView::check_word(&dict, &word_of(placed)));
        }
        assert!(found.iter().any(|(p, _)| word_of(p) == w("CATS")));
        // CATS is 4 long and must cover col 2 on a 5-wide line.
        assert_eq!(
            found
                .iter()
                .filter(|(p, _)| word_of(p) == w("CATS"))
                .count(),
            2
        );
    }

    #[test]
    fn hooks_onto_existing_word() {
        let dict = dictionary::Dictionary::from_words(
            &alphabet::ENGLISH_ALPHABET,
            &["CAT", "CATS", "AT"],
        )
        .unwrap();
        let board = board::Board::from_rows(
            &alphabet::ENGLISH_ALPHABET,
            &[".....", ".CAT.", "....."],
        )
        .unwrap();
        let found = collect(&dict, &board, true, 1, "S");
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].0,
            vec![PlacedTile {
                tile: w("S")[0],
                var_coord: 4,
                is_blank: false
            }]
        );
    }

    #[test]
    fn blank_stands_in_for_missing_tile() {
        let dict = dictionary::Dictionary::from_words(&alphabet::ENGLISH_ALPHABET, &["DOG"])
            .unwrap();
        let board = board::Board::new(crate::matrix::Dim { rows: 3, cols: 3 });
        let found = collect(&dict, &board, true, 1, "?OG");
        assert!(!found.is_empty());
        for (placed, blanks) in &found {
            assert_eq!(word_of(placed), w("DOG"));
            assert_eq!(blanks, &w("D"));
        }
    }

    #[test]
    fn cross_checks_prune_placements() {
        // AT runs down column 1 below row 0.
        let dict = dictionary::Dictionary::from_words(
            &alphabet::ENGLISH_ALPHABET,
            &["AT", "TA", "ATE", "TE"],
        )
        .unwrap();
        let board = board::Board::from_rows(&alphabet::ENGLISH_ALPHABET, &["...", ".A.", ".T."])
            .unwrap();
        for (placed, _) in collect(&dict, &board, true, 0, "TE") {
            // row 0 squares: col 1 sits above AT, nothing makes ?AT a word.
            assert!(placed.iter().all(|p| p.var_coord != 1), "{:?}", placed);
        }
    }

    #[test]
    fn stop_request_unwinds() {
        let dict = dictionary::Dictionary::from_words(
            &alphabet::ENGLISH_ALPHABET,
            &["CAT", "CATS", "AT", "TA", "ACT"],
        )
        .unwrap();
        let alphabet = &alphabet::ENGLISH_ALPHABET;
        let board = board::Board::new(crate::matrix::Dim { rows: 5, cols: 5 });
        let layout = board_layout::make_plain_board_layout(5, 5);
        let view = board::BoardView::new(&board, &layout, true, 0);
        let mut cross_checks = cross_check::CrossCheckTable::new();
        cross_checks.compute(&dict, &view, 2, 0, 4);
        let mut rack = rack::Rack::new();
        rack.init(alphabet.len(), 0, &alphabet.rack_from_str("CATS?").unwrap(), 7);
        let tally_before = rack.tally().to_vec();
        let ctx = AnchorContext {
            dict: &dict,
            view: &view,
            cross_checks: &cross_checks,
            row: 2,
            min_tiles: 1,
        };
        let mut calls = 0;
        let stopped = gen_moves_for_anchor(
            &ctx,
            &anchor::Anchor {
                col: 2,
                prev_anchor: -1,
            },
            &mut rack,
            &mut WorkingBuffer::new(),
            |_, _| {
                calls += 1;
                calls < 2
            },
        );
        assert!(stopped);
        assert_eq!(calls, 2);
        assert_eq!(rack.tally(), &tally_before[..]);
        assert!(rack.blank_values().is_empty());
        assert_eq!(rack.tiles_left(), 5);
    }
}
