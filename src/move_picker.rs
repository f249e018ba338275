// Copyright (C) 2020-2024 Andy Kurnia.

use super::movegen;
use rand::prelude::*;

// Ranked candidate. Ordered by score, ties broken by the play itself.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PossibleMove {
    pub score: i16,
    pub play: movegen::MoveInfo,
}

// How many of the best moves a player keeps, of which the worst is played.
// iq 0 is a human stepping through hints, 1 is the strongest robot.
pub fn window_for_iq(iq: u8, num_saved_moves: usize, rng: &mut dyn RngCore) -> usize {
    match iq {
        0 => num_saved_moves,
        1 => 1,
        _ => {
            let count = num_saved_moves * iq.min(100) as usize / 100;
            1 + if count > 0 {
                rng.random_range(0..count)
            } else {
                0
            }
        }
    }
}

// Bounded cache of the best (or, going backwards, the worst) moves seen in one
// pass, plus the cursor used to step through them.
//
// Slots are kept unsorted while a pass runs. After the pass they are sorted
// ascending with empty slots first, so occupied ones are bottom..len.
#[derive(Default)]
pub struct MoveRanker {
    slots: Vec<Option<PossibleMove>>,
    use_prev: bool,
    // exclusive bound carried over from the previous pass.
    last_seen: Option<PossibleMove>,
    // set once the pass is over.
    bottom: Option<usize>,
    cursor: isize,
}

impl MoveRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|m| *m = None);
        self.last_seen = None;
        self.bottom = None;
        self.cursor = 0;
    }

    #[inline(always)]
    pub fn set_direction(&mut self, use_prev: bool) {
        self.use_prev = use_prev;
    }

    #[inline(always)]
    pub fn num_ranked(&self) -> usize {
        self.slots.iter().filter(|m| m.is_some()).count()
    }

    // true when nothing is left to step through in the current direction.
    pub fn is_cache_empty(&self) -> bool {
        match self.bottom {
            None => true,
            Some(bottom) => {
                if bottom >= self.slots.len() {
                    true
                } else if self.use_prev {
                    self.cursor >= self.slots.len() as isize - 1
                } else {
                    self.cursor <= bottom as isize
                }
            }
        }
    }

    // Starts a pass with window slots. Moves at or beyond the far end of the
    // previous pass (per direction) will not be ranked again.
    pub fn begin_search(&mut self, window: usize) {
        self.last_seen = match self.bottom {
            Some(bottom) if bottom < self.slots.len() => {
                let idx = if self.use_prev {
                    self.slots.len() - 1
                } else {
                    bottom
                };
                self.slots[idx].clone()
            }
            _ => None,
        };
        self.slots.clear();
        self.slots.resize(window.max(1), None);
        self.bottom = None;
        self.cursor = 0;
    }

    // Cheap pre-filter before building the full move.
    pub fn score_qualifies(&self, score: i16) -> bool {
        if score <= 0 {
            return false;
        }
        if let Some(last_seen) = &self.last_seen {
            if self.use_prev && score < last_seen.score {
                return false;
            }
            if !self.use_prev && score > last_seen.score {
                return false;
            }
        }
        self.slots.iter().any(|m| match m {
            None => true,
            Some(m) => {
                if self.use_prev {
                    score <= m.score
                } else {
                    score >= m.score
                }
            }
        })
    }

    // Keeps the move if there is room or it beats the single worst kept move.
    pub fn save_move_if_qualifies(&mut self, possible_move: &PossibleMove) -> bool {
        if possible_move.score <= 0 {
            return false;
        }
        if let Some(last_seen) = &self.last_seen {
            let beyond = if self.use_prev {
                possible_move <= last_seen
            } else {
                possible_move >= last_seen
            };
            if beyond {
                return false;
            }
        }
        if let Some(idx) = self.slots.iter().position(|m| m.is_none()) {
            self.slots[idx] = Some(possible_move.clone());
            return true;
        }
        let kept = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(idx, m)| m.as_ref().map(|m| (idx, m)));
        let mostest = if self.use_prev {
            kept.max_by(|a, b| a.1.cmp(b.1))
        } else {
            kept.min_by(|a, b| a.1.cmp(b.1))
        };
        if let Some((idx, worst)) = mostest {
            let beats = if self.use_prev {
                possible_move < worst
            } else {
                possible_move > worst
            };
            if beats {
                self.slots[idx] = Some(possible_move.clone());
                return true;
            }
        }
        false
    }

    // Ends the pass: sorts and points the cursor just outside the occupied range.
    pub fn finish_search(&mut self) {
        self.slots.sort_unstable();
        let bottom = self
            .slots
            .iter()
            .position(|m| m.is_some())
            .unwrap_or(self.slots.len());
        self.bottom = Some(bottom);
        self.cursor = if self.use_prev {
            bottom as isize - 1
        } else {
            self.slots.len() as isize
        };
    }

    // The worst kept move, which is the robot's pick within its window.
    pub fn robot_choice(&self) -> Option<PossibleMove> {
        self.slots.iter().flatten().next().cloned()
    }

    // Steps the cursor: best first, or worst first when going backwards.
    pub fn next_from_cache(&mut self) -> Option<PossibleMove> {
        if self.is_cache_empty() {
            return None;
        }
        if self.use_prev {
            self.cursor += 1;
        } else {
            self.cursor -= 1;
        }
        self.slots
            .get(self.cursor as usize)
            .and_then(|m| m.clone())
            .filter(|m| m.score > 0)
    }
}
