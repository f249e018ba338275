// Copyright (C) 2020-2024 Andy Kurnia.

use super::{
    anchor, blanks, board, cross_check, dictionary, game_config, move_picker, movegen,
    play_scorer, rack,
};
use rand::prelude::*;

// Inclusive, in board coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: i8,
    pub top: i8,
    pub right: i8,
    pub bottom: i8,
}

// Inclusive bounds on the number of tiles placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileCountLimits {
    pub min: i8,
    pub max: i8,
}

// Reported to the progress callback, which returns false to stop the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchProgress {
    // about to search from this anchor, in board coordinates.
    Anchor { col: i8, row: i8 },
    // about to rank a word that was found.
    Candidate,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FindMoveParams<'a> {
    pub tray: &'a [u8],
    // step towards worse moves (false) or back towards better ones (true).
    pub use_prev: bool,
    pub search_limits: Option<Rect>,
    pub tile_count_limits: Option<TileCountLimits>,
    // 0 for hints, 1..=100 for robots (1 plays the best move).
    pub robot_iq: u8,
    pub all_tiles_bonus: i16,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FindMoveResult {
    // false if the search was stopped; call again to continue.
    pub complete: bool,
    pub can_move: bool,
    pub play: Option<movegen::MoveInfo>,
    pub score: i16,
    pub is_robot_move: bool,
}

// Where a stopped search picks up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchCursor {
    pub horizontal: bool,
    pub row: i8,
    pub col: i8,
    pub prev_anchor: i8,
    // the anchor at col was already reported to the progress callback.
    pub anchor_polled: bool,
    // candidates at this anchor already ranked.
    pub candidates_done: u32,
}

#[derive(Clone, Copy, Debug)]
enum SearchState {
    Idle,
    Searching(SearchCursor),
}

// (first_line, last_line, first_col, last_col) of one orientation.
fn line_bounds<B: board::BoardModel + ?Sized>(
    view: &board::BoardView<B>,
    search_limits: Option<Rect>,
) -> (i8, i8, i8, i8) {
    let (num_lines, line_len) = (view.num_lines(), view.line_len());
    match search_limits {
        None => (0, num_lines - 1, 0, line_len - 1),
        Some(rect) => {
            let (first_line, last_line, first_col, last_col) = if view.horizontal() {
                (rect.top, rect.bottom, rect.left, rect.right)
            } else {
                (rect.left, rect.right, rect.top, rect.bottom)
            };
            (
                first_line.max(0),
                last_line.min(num_lines - 1),
                first_col.max(0),
                last_col.min(line_len - 1),
            )
        }
    }
}

// One per player seat. Holds the ranked moves between hint requests and the
// cursor of a stopped search.
pub struct EngineCtxt<'a> {
    game_config: &'a game_config::GameConfig,
    rng: Box<dyn RngCore>,
    rack: rack::Rack,
    ranker: move_picker::MoveRanker,
    cross_checks: cross_check::CrossCheckTable,
    working_buffer: movegen::WorkingBuffer,
    play_scorer: play_scorer::PlayScorer,
    tiles_buf: Vec<movegen::PlacedTile>,
    blank_buf: Vec<u8>,
    state: SearchState,
    is_robot: bool,
}

impl<'a> EngineCtxt<'a> {
    pub fn new(game_config: &'a game_config::GameConfig) -> Self {
        Self::with_rng(
            game_config,
            Box::new(rand_chacha::ChaCha20Rng::from_os_rng()),
        )
    }

    pub fn with_seed(game_config: &'a game_config::GameConfig, seed: u64) -> Self {
        Self::with_rng(
            game_config,
            Box::new(rand_chacha::ChaCha20Rng::seed_from_u64(seed)),
        )
    }

    pub fn with_rng(game_config: &'a game_config::GameConfig, rng: Box<dyn RngCore>) -> Self {
        Self {
            game_config,
            rng,
            rack: rack::Rack::new(),
            ranker: move_picker::MoveRanker::new(),
            cross_checks: cross_check::CrossCheckTable::new(),
            working_buffer: movegen::WorkingBuffer::new(),
            play_scorer: play_scorer::PlayScorer::new(),
            tiles_buf: Vec::new(),
            blank_buf: Vec::new(),
            state: SearchState::Idle,
            is_robot: false,
        }
    }

    // Forget ranked moves and any stopped search. Needed whenever the board,
    // the tray or the dictionary changes.
    pub fn reset(&mut self) {
        self.ranker.reset();
        self.state = SearchState::Idle;
    }

    #[inline(always)]
    pub fn rack(&self) -> &rack::Rack {
        &self.rack
    }

    #[inline(always)]
    pub fn search_cursor(&self) -> Option<SearchCursor> {
        match self.state {
            SearchState::Idle => None,
            SearchState::Searching(cursor) => Some(cursor),
        }
    }

    #[inline(always)]
    pub fn num_ranked(&self) -> usize {
        self.ranker.num_ranked()
    }

    pub fn find_move<
        D: dictionary::DictionaryView + ?Sized,
        B: board::BoardModel + ?Sized,
        P: FnMut(SearchProgress) -> bool,
    >(
        &mut self,
        dict: &D,
        board: &B,
        params: &FindMoveParams,
        mut progress: P,
    ) -> FindMoveResult {
        let (min_tiles, max_tiles) = match params.tile_count_limits {
            Some(limits) => (limits.min.max(1), limits.max),
            None => (1, i8::MAX),
        };
        if dict.top_edge().is_none()
            || !self
                .rack
                .init(dict.num_faces(), dict.blank_tile(), params.tray, max_tiles)
            || self.rack.tiles_left() < min_tiles
        {
            log::debug!("nothing to search: empty dictionary or tray");
            return FindMoveResult {
                complete: true,
                ..Default::default()
            };
        }

        let cursor = match self.state {
            SearchState::Searching(cursor) => {
                log::debug!("resuming search at {:?}", cursor);
                Some(cursor)
            }
            SearchState::Idle => {
                if self.is_robot != (params.robot_iq > 0) {
                    // hints left over from the other mode are not reused.
                    self.ranker.reset();
                }
                self.ranker.set_direction(params.use_prev);
                if self.ranker.is_cache_empty() {
                    self.is_robot = params.robot_iq > 0;
                    let window = move_picker::window_for_iq(
                        params.robot_iq,
                        self.game_config.num_saved_moves(),
                        &mut *self.rng,
                    );
                    self.ranker.begin_search(window);
                    log::debug!(
                        "search starting: window {}, use_prev {}, limits {:?}",
                        window,
                        params.use_prev,
                        params.search_limits
                    );
                    let view = board::BoardView::new(
                        board,
                        self.game_config.board_layout(),
                        true,
                        dict.blank_tile(),
                    );
                    let (first_line, _, first_col, _) = line_bounds(&view, params.search_limits);
                    Some(SearchCursor {
                        horizontal: true,
                        row: first_line,
                        col: first_col,
                        prev_anchor: first_col - 1,
                        anchor_polled: false,
                        candidates_done: 0,
                    })
                } else {
                    None
                }
            }
        };

        if let Some(cursor) = cursor {
            if let Some(stopped_at) =
                self.run_search(dict, board, params, min_tiles, cursor, &mut progress)
            {
                log::debug!("search stopped at {:?}", stopped_at);
                self.state = SearchState::Searching(stopped_at);
                return FindMoveResult::default();
            }
            self.state = SearchState::Idle;
            self.ranker.finish_search();
            log::debug!("search finished: {} moves ranked", self.ranker.num_ranked());
        }

        let chosen = if self.is_robot {
            let chosen = self.ranker.robot_choice();
            self.ranker.reset();
            chosen
        } else {
            self.ranker.next_from_cache()
        };
        match chosen {
            Some(possible_move) => FindMoveResult {
                complete: true,
                can_move: true,
                score: possible_move.score,
                play: Some(possible_move.play),
                is_robot_move: self.is_robot,
            },
            None => {
                // the next request starts over from the top.
                self.ranker.reset();
                FindMoveResult {
                    complete: true,
                    ..Default::default()
                }
            }
        }
    }

    // Returns where it stopped, or None once every line of both orientations is done.
    fn run_search<
        D: dictionary::DictionaryView + ?Sized,
        B: board::BoardModel + ?Sized,
        P: FnMut(SearchProgress) -> bool,
    >(
        &mut self,
        dict: &D,
        board: &B,
        params: &FindMoveParams,
        min_tiles: i8,
        mut cursor: SearchCursor,
        progress: &mut P,
    ) -> Option<SearchCursor> {
        let Self {
            game_config,
            rack,
            ranker,
            cross_checks,
            working_buffer,
            play_scorer,
            tiles_buf,
            blank_buf,
            ..
        } = self;
        let game_config: &game_config::GameConfig = game_config;
        let board_layout = game_config.board_layout();
        let (star_col, star_row) = (board_layout.star_col(), board_layout.star_row());
        let is_first_move = board.get_tile(star_col, star_row).is_none();
        let num_tray_tiles = rack.num_tiles();

        loop {
            let horizontal = cursor.horizontal;
            let view = board::BoardView::new(board, board_layout, horizontal, dict.blank_tile());
            let (_, last_line, first_col, last_col) = line_bounds(&view, params.search_limits);
            let center = if is_first_move {
                Some(view.to_board(star_col, star_row))
            } else {
                None
            };

            while cursor.row <= last_line {
                let row = cursor.row;
                if center.is_none_or(|(_, center_row)| center_row == row) {
                    log::trace!("{} line {}", if horizontal { "row" } else { "col" }, row);
                    cross_checks.compute(dict, &view, row, first_col, last_col);
                    let cross_checks = &*cross_checks;
                    let ctx = movegen::AnchorContext {
                        dict,
                        view: &view,
                        cross_checks,
                        row,
                        min_tiles,
                    };
                    let mut scan =
                        anchor::AnchorScan::resume(cursor.col, cursor.prev_anchor, last_col);
                    let mut skip = cursor.candidates_done;
                    let mut polled = cursor.anchor_polled;
                    while let Some(anchor) = scan.next_anchor(&view, row, center) {
                        if !polled {
                            let (board_col, board_row) = view.to_board(anchor.col, row);
                            if !progress(SearchProgress::Anchor {
                                col: board_col,
                                row: board_row,
                            }) {
                                return Some(SearchCursor {
                                    horizontal,
                                    row: cursor.row,
                                    col: anchor.col,
                                    prev_anchor: anchor.prev_anchor,
                                    anchor_polled: false,
                                    candidates_done: 0,
                                });
                            }
                        }
                        let mut seen = 0u32;
                        let stopped = movegen::gen_moves_for_anchor(
                            &ctx,
                            &anchor,
                            rack,
                            working_buffer,
                            |placed, blank_values| {
                                seen += 1;
                                if seen <= skip {
                                    return true;
                                }
                                if !progress(SearchProgress::Candidate) {
                                    return false;
                                }
                                // a lone tile forming words both ways is reported across.
                                if !horizontal
                                    && placed.len() == 1
                                    && cross_checks.get(placed[0].var_coord).has_cross_word
                                {
                                    return true;
                                }
                                let bonus = play_scorer::PlayScorer::bonus(
                                    game_config,
                                    placed.len() as i8,
                                    num_tray_tiles,
                                    params.all_tiles_bonus,
                                );
                                tiles_buf.clear();
                                tiles_buf.extend_from_slice(placed);
                                blank_buf.clear();
                                blank_buf.extend_from_slice(blank_values);
                                blank_buf.sort_unstable();
                                blanks::resolve_blanks(tiles_buf, blank_buf, |tiles| {
                                    let score = play_scorer.compute_score(
                                        dict,
                                        &view,
                                        cross_checks,
                                        row,
                                        tiles,
                                    ) + bonus;
                                    if ranker.score_qualifies(score) {
                                        ranker.save_move_if_qualifies(
                                            &move_picker::PossibleMove {
                                                score,
                                                play: movegen::MoveInfo {
                                                    horizontal,
                                                    common_coord: row,
                                                    tiles: tiles.to_vec(),
                                                },
                                            },
                                        );
                                    }
                                });
                                true
                            },
                        );
                        if stopped {
                            // the last candidate seen was not ranked.
                            return Some(SearchCursor {
                                horizontal,
                                row: cursor.row,
                                col: anchor.col,
                                prev_anchor: anchor.prev_anchor,
                                anchor_polled: true,
                                candidates_done: seen - 1,
                            });
                        }
                        skip = 0;
                        polled = false;
                        scan.finish(&anchor);
                    }
                }
                cursor = SearchCursor {
                    horizontal,
                    row: row + 1,
                    col: first_col,
                    prev_anchor: first_col - 1,
                    anchor_polled: false,
                    candidates_done: 0,
                };
            }

            if !horizontal || (is_first_move && params.search_limits.is_none()) {
                return None;
            }
            let view = board::BoardView::new(board, board_layout, false, dict.blank_tile());
            let (first_line, _, first_col, _) = line_bounds(&view, params.search_limits);
            cursor = SearchCursor {
                horizontal: false,
                row: first_line,
                col: first_col,
                prev_anchor: first_col - 1,
                anchor_polled: false,
                candidates_done: 0,
            };
        }
    }
}
