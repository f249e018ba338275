// Copyright (C) 2020-2024 Andy Kurnia.

use super::board_layout;

pub struct StaticGameConfig {
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    num_saved_moves: usize, // >= 1
}

pub enum GameConfig {
    Static(StaticGameConfig),
}

impl GameConfig {
    #[inline(always)]
    pub fn board_layout(&self) -> &board_layout::BoardLayout {
        match self {
            GameConfig::Static(x) => &x.board_layout,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }

    // capacity of the ranked move cache.
    #[inline(always)]
    pub fn num_saved_moves(&self) -> usize {
        match self {
            GameConfig::Static(x) => x.num_saved_moves,
        }
    }

    #[inline(always)]
    pub fn num_played_bonus(&self, num_played: i8) -> i16 {
        match self {
            GameConfig::Static(x) => {
                // branchless
                50 & -((num_played >= x.rack_size) as i16)
            }
        }
    }
}

pub fn make_common_english_game_config() -> GameConfig {
    GameConfig::Static(StaticGameConfig {
        board_layout: board_layout::make_standard_board_layout(),
        rack_size: 7,
        num_saved_moves: 10,
    })
}

pub fn make_plain_game_config(rows: i8, cols: i8) -> GameConfig {
    GameConfig::Static(StaticGameConfig {
        board_layout: board_layout::make_plain_board_layout(rows, cols),
        rack_size: 7,
        num_saved_moves: 10,
    })
}
