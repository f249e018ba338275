// Copyright (C) 2020-2024 Andy Kurnia.

use super::{board, dictionary};

// Per empty square: which faces may go there without breaking the perpendicular
// word, and the face-value sum of that word's existing tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrossCheck {
    pub bits: u64,
    pub score: i16,
    pub has_cross_word: bool,
}

impl CrossCheck {
    pub const EMPTY: CrossCheck = CrossCheck {
        bits: 0,
        score: 0,
        has_cross_word: false,
    };

    pub const ALL: CrossCheck = CrossCheck {
        bits: !0,
        score: 0,
        has_cross_word: false,
    };

    #[inline(always)]
    pub fn contains(&self, tile: u8) -> bool {
        tile < 64 && self.bits & (1 << tile) != 0
    }
}

#[derive(Default)]
pub struct CrossCheckTable {
    checks: Vec<CrossCheck>,
    prefix: Vec<u8>,
    suffix: Vec<u8>,
}

impl CrossCheckTable {
    pub fn new() -> Self {
        Self::default()
    }

    // fills the table for one line. squares outside first_col..=last_col get
    // nothing, so nothing is ever placed there.
    pub fn compute<D: dictionary::DictionaryView + ?Sized, B: board::BoardModel + ?Sized>(
        &mut self,
        dict: &D,
        view: &board::BoardView<B>,
        row: i8,
        first_col: i8,
        last_col: i8,
    ) {
        let len = view.line_len();
        self.checks.clear();
        self.checks.resize(len.max(0) as usize, CrossCheck::EMPTY);
        for col in first_col.max(0)..=last_col.min(len - 1) {
            if view.is_empty(col, row) {
                self.checks[col as usize] = self.compute_one(dict, view, col, row);
            }
        }
    }

    fn compute_one<D: dictionary::DictionaryView + ?Sized, B: board::BoardModel + ?Sized>(
        &mut self,
        dict: &D,
        view: &board::BoardView<B>,
        col: i8,
        row: i8,
    ) -> CrossCheck {
        let mut score = 0i16;
        self.prefix.clear();
        let mut r = row - 1;
        while let Some(tile) = view.get(col, r, false) {
            self.prefix.push(tile);
            score += view.get(col, r, true).map_or(0, |t| dict.tile_value(t));
            r -= 1;
        }
        self.prefix.reverse();
        self.suffix.clear();
        let mut r = row + 1;
        while let Some(tile) = view.get(col, r, false) {
            self.suffix.push(tile);
            score += view.get(col, r, true).map_or(0, |t| dict.tile_value(t));
            r += 1;
        }
        if self.prefix.is_empty() && self.suffix.is_empty() {
            return CrossCheck::ALL;
        }

        let mut e = dict.top_edge();
        for &tile in &self.prefix {
            e = dict.edge_from_tile(e, tile);
            if e.is_none() {
                break;
            }
        }
        let mut bits = 0u64;
        while let Some(edge) = e {
            let tile = dict.edge_tile(edge);
            let ok = if self.suffix.is_empty() {
                dict.is_accepting(edge)
            } else {
                dict.lookup(dict.follow(edge), &self.suffix)
            };
            if ok && tile < 64 {
                bits |= 1 << tile;
            }
            e = dict.next_sibling(edge);
        }
        CrossCheck {
            bits,
            score,
            has_cross_word: true,
        }
    }

    #[inline(always)]
    pub fn get(&self, col: i8) -> CrossCheck {
        if col < 0 {
            return CrossCheck::EMPTY;
        }
        self.checks
            .get(col as usize)
            .copied()
            .unwrap_or(CrossCheck::EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alphabet, board_layout};

    fn w(s: &str) -> Vec<u8> {
        alphabet::ENGLISH_ALPHABET.word_from_str(s).unwrap()
    }

    #[test]
    fn legal_tiles_form_words() {
        let alphabet = &alphabet::ENGLISH_ALPHABET;
        let dict =
            dictionary::Dictionary::from_words(alphabet, &["CAT", "CATS", "AT", "DOG", "ATE"])
                .unwrap();
        let layout = board_layout::make_plain_board_layout(6, 5);
        let board = board::Board::from_rows(
            alphabet,
            &[".....", ".....", "..A..", "..T..", ".....", "....."],
        )
        .unwrap();
        let view = board::BoardView::new(&board, &layout, true, 0);
        let mut table = CrossCheckTable::new();

        table.compute(&dict, &view, 1, 0, 4);
        let above = table.get(2);
        assert_eq!(above.bits, 1 << w("C")[0]);
        assert_eq!(above.score, 2);
        assert!(above.has_cross_word);
        assert_eq!(table.get(1), CrossCheck::ALL);

        table.compute(&dict, &view, 4, 0, 4);
        let below = table.get(2);
        assert_eq!(below.bits, 1 << w("E")[0]);
        for tile in 0..alphabet.len() {
            if below.contains(tile) {
                let mut word = w("AT");
                word.push(tile);
                assert!(dictionary::DictionaryView::check_word(&dict, &word));
            }
        }
    }

    #[test]
    fn unknown_prefix_blocks_square() {
        let alphabet = &alphabet::ENGLISH_ALPHABET;
        let dict = dictionary::Dictionary::from_words(alphabet, &["CAT"]).unwrap();
        let layout = board_layout::make_plain_board_layout(3, 3);
        let board = board::Board::from_rows(alphabet, &[".Q.", "...", "..."]).unwrap();
        let view = board::BoardView::new(&board, &layout, true, 0);
        let mut table = CrossCheckTable::new();
        table.compute(&dict, &view, 1, 0, 2);
        assert_eq!(table.get(1).bits, 0);
        assert!(table.get(1).has_cross_word);
        assert_eq!(table.get(0), CrossCheck::ALL);
    }

    #[test]
    fn squares_outside_range_are_blocked() {
        let alphabet = &alphabet::ENGLISH_ALPHABET;
        let dict = dictionary::Dictionary::from_words(alphabet, &["CAT"]).unwrap();
        let layout = board_layout::make_plain_board_layout(3, 5);
        let board = board::Board::new(layout.dim());
        let view = board::BoardView::new(&board, &layout, true, 0);
        let mut table = CrossCheckTable::new();
        table.compute(&dict, &view, 1, 1, 3);
        assert_eq!(table.get(0), CrossCheck::EMPTY);
        assert_eq!(table.get(1), CrossCheck::ALL);
        assert_eq!(table.get(3), CrossCheck::ALL);
        assert_eq!(table.get(4), CrossCheck::EMPTY);
        assert_eq!(table.get(-1), CrossCheck::EMPTY);
        assert_eq!(table.get(5), CrossCheck::EMPTY);
    }

    #[test]
    fn blank_on_board_scores_nothing() {
        let alphabet = &alphabet::ENGLISH_ALPHABET;
        let dict = dictionary::Dictionary::from_words(alphabet, &["CAT"]).unwrap();
        let layout = board_layout::make_plain_board_layout(3, 1);
        let board = board::Board::from_rows(alphabet, &["C", "a", "."]).unwrap();
        let view = board::BoardView::new(&board, &layout, true, 0);
        let mut table = CrossCheckTable::new();
        table.compute(&dict, &view, 2, 0, 0);
        assert_eq!(table.get(0).bits, 1 << w("T")[0]);
        assert_eq!(table.get(0).score, 3);
    }
}
