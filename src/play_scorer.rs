// Copyright (C) 2020-2024 Andy Kurnia.

use super::{board, board_layout, cross_check, dictionary, game_config, movegen};

pub struct PlayScorer {
    word_buffer: Vec<u8>,
}

impl Default for PlayScorer {
    fn default() -> Self {
        Self::new()
    }
}

// extent of the word along the line through first..=last.
fn word_extent<B: board::BoardModel + ?Sized>(
    view: &board::BoardView<B>,
    row: i8,
    first: i8,
    last: i8,
) -> (i8, i8) {
    let mut start = first;
    while !view.is_empty(start - 1, row) {
        start -= 1;
    }
    let mut end = last;
    while !view.is_empty(end + 1, row) {
        end += 1;
    }
    (start, end)
}

impl PlayScorer {
    pub fn new() -> Self {
        Self {
            word_buffer: Vec::new(),
        }
    }

    // Scores tiles placed on line row of view, taking perpendicular sums from
    // cross_checks. No bonuses. Assume the play is valid.
    pub fn compute_score<D: dictionary::DictionaryView + ?Sized, B: board::BoardModel + ?Sized>(
        &self,
        dict: &D,
        view: &board::BoardView<B>,
        cross_checks: &cross_check::CrossCheckTable,
        row: i8,
        tiles: &[movegen::PlacedTile],
    ) -> i16 {
        let (Some(first), Some(last)) = (tiles.first(), tiles.last()) else {
            return 0;
        };
        let (start, end) = word_extent(view, row, first.var_coord, last.var_coord);
        let mut placed = tiles.iter().peekable();
        let mut word_multiplier = 1i16;
        let mut main_score = 0i16;
        let mut perpendicular_score = 0i16;
        for col in start..=end {
            if let Some(tile) = view.get(col, row, true) {
                main_score += dict.tile_value(tile);
            } else if let Some(p) = placed.next_if(|p| p.var_coord == col) {
                let premium = view.premium(col, row);
                // intentional to not hardcode blank tile value as zero
                let face = if p.is_blank { dict.blank_tile() } else { p.tile };
                let tile_score = dict.tile_value(face) * premium.tile_multiplier as i16;
                main_score += tile_score;
                word_multiplier *= premium.word_multiplier as i16;
                let cross_check = cross_checks.get(col);
                if cross_check.has_cross_word {
                    perpendicular_score +=
                        (cross_check.score + tile_score) * premium.word_multiplier as i16;
                }
            }
        }
        main_score * word_multiplier + perpendicular_score
    }

    // bingo bonus plus the bonus for emptying the tray.
    #[inline(always)]
    pub fn bonus(
        game_config: &game_config::GameConfig,
        num_played: i8,
        num_tray_tiles: i8,
        all_tiles_bonus: i16,
    ) -> i16 {
        game_config.num_played_bonus(num_played)
            + if num_played >= num_tray_tiles {
                all_tiles_bonus
            } else {
                0
            }
    }

    // Scores from the board alone, recounting every perpendicular word. No bonuses.
    pub fn recount_score<D: dictionary::DictionaryView + ?Sized, B: board::BoardModel + ?Sized>(
        &self,
        dict: &D,
        board: &B,
        board_layout: &board_layout::BoardLayout,
        play: &movegen::MoveInfo,
    ) -> i16 {
        let view = board::BoardView::new(board, board_layout, play.horizontal, dict.blank_tile());
        let across = board::BoardView::new(board, board_layout, !play.horizontal, dict.blank_tile());
        let row = play.common_coord;
        let (Some(first), Some(last)) = (play.tiles.first(), play.tiles.last()) else {
            return 0;
        };
        let (start, end) = word_extent(&view, row, first.var_coord, last.var_coord);
        let face_value = |p: &movegen::PlacedTile| {
            dict.tile_value(if p.is_blank { dict.blank_tile() } else { p.tile })
        };
        let mut placed = play.tiles.iter().peekable();
        let mut word_multiplier = 1i16;
        let mut main_score = 0i16;
        let mut recounted_score = 0i16;
        for col in start..=end {
            if let Some(tile) = view.get(col, row, true) {
                main_score += dict.tile_value(tile);
            } else if let Some(p) = placed.next_if(|p| p.var_coord == col) {
                let premium = view.premium(col, row);
                let tile_score = face_value(p) * premium.tile_multiplier as i16;
                main_score += tile_score;
                word_multiplier *= premium.word_multiplier as i16;

                // in the other orientation, this square is (row, col).
                let (lo, hi) = word_extent(&across, col, row, row);
                if lo < hi {
                    let mut perpendicular = tile_score;
                    for j in lo..=hi {
                        if j != row {
                            perpendicular +=
                                across.get(j, col, true).map_or(0, |t| dict.tile_value(t));
                        }
                    }
                    recounted_score += perpendicular * premium.word_multiplier as i16;
                }
            }
        }
        recounted_score + main_score * word_multiplier
    }

    // Checks the play against the board and the dictionary: squares empty and
    // contiguous, every word formed is accepted, and the play connects (or
    // covers the star on an empty board).
    pub fn play_is_valid<D: dictionary::DictionaryView + ?Sized, B: board::BoardModel + ?Sized>(
        &mut self,
        dict: &D,
        board: &B,
        board_layout: &board_layout::BoardLayout,
        play: &movegen::MoveInfo,
    ) -> bool {
        let view = board::BoardView::new(board, board_layout, play.horizontal, dict.blank_tile());
        let across = board::BoardView::new(board, board_layout, !play.horizontal, dict.blank_tile());
        let row = play.common_coord;
        let (Some(first), Some(last)) = (play.tiles.first(), play.tiles.last()) else {
            return false;
        };
        if row < 0
            || row >= view.num_lines()
            || first.var_coord < 0
            || last.var_coord >= view.line_len()
        {
            return false;
        }
        if play
            .tiles
            .windows(2)
            .any(|w| w[0].var_coord >= w[1].var_coord)
        {
            return false;
        }
        if play.tiles.iter().any(|p| !view.is_empty(p.var_coord, row)) {
            return false;
        }

        let (start, end) = word_extent(&view, row, first.var_coord, last.var_coord);
        let mut placed = play.tiles.iter().peekable();
        let mut connected = (end - start + 1) as usize > play.tiles.len();
        self.word_buffer.clear();
        for col in start..=end {
            if let Some(tile) = view.get(col, row, false) {
                self.word_buffer.push(tile);
            } else if let Some(p) = placed.next_if(|p| p.var_coord == col) {
                self.word_buffer.push(p.tile);
            } else {
                // gap
                return false;
            }
        }
        if !dict.check_word(&self.word_buffer) {
            return false;
        }

        for p in &play.tiles {
            let col = p.var_coord;
            let (lo, hi) = word_extent(&across, col, row, row);
            if lo == hi {
                continue;
            }
            connected = true;
            self.word_buffer.clear();
            for j in lo..=hi {
                self.word_buffer.push(if j == row {
                    p.tile
                } else {
                    across.get(j, col, false).unwrap_or(0)
                });
            }
            if !dict.check_word(&self.word_buffer) {
                return false;
            }
        }

        let (star_col, star_row) = (board_layout.star_col(), board_layout.star_row());
        if board.get_tile(star_col, star_row).is_none() {
            play.board_coords()
                .any(|(c, r, _)| (c, r) == (star_col, star_row))
        } else {
            connected
        }
    }
}
