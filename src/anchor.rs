// Copyright (C) 2020-2024 Andy Kurnia.

use super::board;

// An empty square next to a tile, or the center square of an empty board
// (first_move_center, given in view coordinates).
pub fn is_anchor_square<B: board::BoardModel + ?Sized>(
    view: &board::BoardView<B>,
    col: i8,
    row: i8,
    first_move_center: Option<(i8, i8)>,
) -> bool {
    if !view.is_empty(col, row) {
        return false;
    }
    if let Some(center) = first_move_center {
        return (col, row) == center;
    }
    // out-of-range neighbors read as empty.
    !view.is_empty(col - 1, row)
        || !view.is_empty(col + 1, row)
        || !view.is_empty(col, row - 1)
        || !view.is_empty(col, row + 1)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub col: i8,
    // column of the previous anchor on this line, or first_col - 1.
    pub prev_anchor: i8,
}

impl Anchor {
    // how many tiles may be placed left of the anchor. squares between the
    // previous anchor and this one are never anchors themselves, hence empty.
    #[inline(always)]
    pub fn left_limit(&self, tiles_left: i8) -> i8 {
        (self.col - self.prev_anchor - 1).min(tiles_left - 1).max(0)
    }
}

// Left-to-right anchor enumeration over first_col..=last_col of one line.
#[derive(Clone, Copy, Debug)]
pub struct AnchorScan {
    next_col: i8,
    last_col: i8,
    prev_anchor: i8,
}

impl AnchorScan {
    pub fn new(first_col: i8, last_col: i8) -> Self {
        Self {
            next_col: first_col,
            last_col,
            prev_anchor: first_col - 1,
        }
    }

    // picks up a scan whose anchor at col was not finished.
    pub fn resume(col: i8, prev_anchor: i8, last_col: i8) -> Self {
        Self {
            next_col: col,
            last_col,
            prev_anchor,
        }
    }

    pub fn next_anchor<B: board::BoardModel + ?Sized>(
        &mut self,
        view: &board::BoardView<B>,
        row: i8,
        first_move_center: Option<(i8, i8)>,
    ) -> Option<Anchor> {
        while self.next_col <= self.last_col {
            let col = self.next_col;
            self.next_col += 1;
            if is_anchor_square(view, col, row, first_move_center) {
                return Some(Anchor {
                    col,
                    prev_anchor: self.prev_anchor,
                });
            }
        }
        None
    }

    // marks the anchor as searched.
    #[inline(always)]
    pub fn finish(&mut self, anchor: &Anchor) {
        self.prev_anchor = anchor.col;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alphabet, board_layout};

    fn anchors(board: &board::Board, horizontal: bool, row: i8) -> Vec<Anchor> {
        let layout = board_layout::make_plain_board_layout(board.dim().rows, board.dim().cols);
        let view = board::BoardView::new(board, &layout, horizontal, 0);
        let mut scan = AnchorScan::new(0, view.line_len() - 1);
        let mut v = Vec::new();
        while let Some(anchor) = scan.next_anchor(&view, row, None) {
            scan.finish(&anchor);
            v.push(anchor);
        }
        v
    }

    #[test]
    fn empty_board_only_anchors_at_center() {
        let board = board::Board::from_rows(&alphabet::ENGLISH_ALPHABET, &["...", "...", "..."])
            .unwrap();
        let layout = board_layout::make_plain_board_layout(3, 3);
        let view = board::BoardView::new(&board, &layout, true, 0);
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(
                    is_anchor_square(&view, col, row, Some((1, 1))),
                    (col, row) == (1, 1)
                );
                assert!(!is_anchor_square(&view, col, row, None));
            }
        }
    }

    #[test]
    fn anchors_at_edges_stay_on_board() {
        let board = board::Board::from_rows(&alphabet::ENGLISH_ALPHABET, &["A...B", ".....", "....."])
            .unwrap();
        assert_eq!(
            anchors(&board, true, 0),
            vec![
                Anchor {
                    col: 1,
                    prev_anchor: -1
                },
                Anchor {
                    col: 3,
                    prev_anchor: 1
                },
            ]
        );
        assert_eq!(
            anchors(&board, true, 1),
            vec![
                Anchor {
                    col: 0,
                    prev_anchor: -1
                },
                Anchor {
                    col: 4,
                    prev_anchor: 0
                },
            ]
        );
        assert!(anchors(&board, true, 2).is_empty());
        // vertically, line 4 is the last column.
        assert_eq!(
            anchors(&board, false, 4),
            vec![Anchor {
                col: 1,
                prev_anchor: -1
            }]
        );
    }

    #[test]
    fn left_limit_is_bounded_by_rack() {
        let anchor = Anchor {
            col: 9,
            prev_anchor: -1,
        };
        assert_eq!(anchor.left_limit(7), 6);
        assert_eq!(anchor.left_limit(3), 2);
        assert_eq!(anchor.left_limit(0), 0);
        let anchor = Anchor {
            col: 4,
            prev_anchor: 2,
        };
        assert_eq!(anchor.left_limit(7), 1);
    }

    #[test]
    fn resumed_scan_revisits_anchor() {
        let board = board::Board::from_rows(&alphabet::ENGLISH_ALPHABET, &["A...B"]).unwrap();
        let layout = board_layout::make_plain_board_layout(1, 5);
        let view = board::BoardView::new(&board, &layout, true, 0);
        let mut scan = AnchorScan::resume(3, 1, 4);
        assert_eq!(
            scan.next_anchor(&view, 0, None),
            Some(Anchor {
                col: 3,
                prev_anchor: 1
            })
        );
        assert_eq!(scan.next_anchor(&view, 0, None), None);
    }
}
