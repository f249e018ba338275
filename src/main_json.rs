// Copyright (C) 2020-2021 Andy Kurnia. All rights reserved.

use wordhint::{
    alphabet, board, board_layout, dictionary, display, engine, error, game_config, lexicon,
};

// words: the dictionary, or lexicon: a file with one word per line,
//   or kwg: a prebuilt graph file (replaces the other two).
// board: one string per row. "." is empty, lowercase is a designated blank.
//   15x15 boards use the standard premiums, other sizes use none.
//   omitted means an empty 15x15 board.
// rack: tiles as letters, "?" for a blank.
// count: maximum number of hints returned (robot_iq > 0 returns one move).
#[derive(serde::Deserialize)]
struct Question {
    #[serde(default)]
    words: Vec<String>,
    #[serde(default)]
    lexicon: Option<String>,
    #[serde(default)]
    kwg: Option<String>,
    #[serde(default)]
    board: Vec<String>,
    rack: String,
    #[serde(rename = "count", default = "default_count")]
    max_gen: usize,
    #[serde(default)]
    robot_iq: u8,
    #[serde(default)]
    use_prev: bool,
    #[serde(default)]
    all_tiles_bonus: i16,
    #[serde(default)]
    search_limits: Option<[i8; 4]>,
    #[serde(default)]
    tile_count_limits: Option<[i8; 2]>,
}

fn default_count() -> usize {
    10
}

pub fn main() -> error::Returns<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let data = r#"
      {
        "words": [ "AT", "CAT", "CATS", "ACT", "ACTS", "SCAT", "TA", "TAS" ],
        "board": [
          "...............",
          "...............",
          "...............",
          "...............",
          "...............",
          "...............",
          "...............",
          ".......CAT.....",
          "...............",
          "...............",
          "...............",
          "...............",
          "...............",
          "...............",
          "..............."
        ],
        "rack": "AST?",
        "count": 15
      }
    "#;
    let args = std::env::args().collect::<Vec<_>>();
    let question = if args.len() > 1 {
        serde_json::from_str::<Question>(&std::fs::read_to_string(&args[1])?)?
    } else {
        serde_json::from_str::<Question>(data)?
    };

    let alphabet = &alphabet::ENGLISH_ALPHABET;
    let mut words = question.words;
    if let Some(path) = &question.lexicon {
        words.extend(lexicon::read_word_list_file(path)?);
    }
    let dict = match &question.kwg {
        Some(path) => dictionary::Dictionary::from_bytes(&std::fs::read(path)?, alphabet)?,
        None => dictionary::Dictionary::from_words(alphabet, &words)?,
    };
    log::info!("dictionary has {} nodes", dict.kwg().len());

    let board = if question.board.is_empty() {
        board::Board::new(board_layout::make_standard_board_layout().dim())
    } else {
        board::Board::from_rows(alphabet, &question.board)?
    };
    let dim = board.dim();
    let game_config = if dim.rows == 15 && dim.cols == 15 {
        game_config::make_common_english_game_config()
    } else {
        game_config::make_plain_game_config(dim.rows, dim.cols)
    };
    let tray = alphabet.rack_from_str(&question.rack)?;
    if tray.len() > game_config.rack_size() as usize {
        wordhint::return_error!(format!(
            "rack has {} tiles, at most {} allowed",
            tray.len(),
            game_config.rack_size()
        ));
    }
    display::print_board(alphabet, game_config.board_layout(), &board);
    println!("rack: {}", alphabet.fmt_rack(&tray));

    let params = engine::FindMoveParams {
        tray: &tray,
        use_prev: question.use_prev,
        search_limits: question
            .search_limits
            .map(|[left, top, right, bottom]| engine::Rect {
                left,
                top,
                right,
                bottom,
            }),
        tile_count_limits: question
            .tile_count_limits
            .map(|[min, max]| engine::TileCountLimits { min, max }),
        robot_iq: question.robot_iq,
        all_tiles_bonus: question.all_tiles_bonus,
    };
    let max_gen = if question.robot_iq > 0 {
        1
    } else {
        question.max_gen
    };
    let mut engine_ctxt = engine::EngineCtxt::new(&game_config);
    let mut result = Vec::<serde_json::Value>::new();
    while result.len() < max_gen {
        let found = engine_ctxt.find_move(&dict, &board, &params, |_| true);
        let Some(play) = found.play.filter(|_| found.can_move) else {
            break;
        };
        println!(
            "{} {}",
            found.score,
            display::fmt_move(alphabet, &board, &play)
        );
        // across plays: down=false, lane=row, idx=col (0-based).
        // down plays: down=true, lane=col, idx=row (0-based).
        let tiles = play
            .tiles
            .iter()
            .map(|t| {
                serde_json::json!({
                    "idx": t.var_coord,
                    "tile": alphabet.from_board(t.tile, t.is_blank).unwrap_or("?"),
                    "blank": t.is_blank })
            })
            .collect::<Vec<_>>();
        result.push(serde_json::json!({
            "score": found.score,
            "down": !play.horizontal,
            "lane": play.common_coord,
            "tiles": tiles,
            "robot": found.is_robot_move,
            "move": display::fmt_move(alphabet, &board, &play).to_string() }));
    }
    log::info!("found {} moves", result.len());
    let ret = serde_json::to_value(result)?;
    println!("{}", ret);
    println!("{}", serde_json::to_string_pretty(&ret)?);

    Ok(())
}
