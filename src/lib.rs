// Copyright (C) 2020-2024 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod anchor;
pub mod blanks;
pub mod board;
pub mod board_layout;
pub mod build;
pub mod cross_check;
pub mod dictionary;
pub mod display;
pub mod engine;
pub mod game_config;
pub mod kwg;
pub mod lexicon;
pub mod matrix;
pub mod move_picker;
pub mod movegen;
pub mod play_scorer;
pub mod rack;
