// Copyright (C) 2020-2021 Andy Kurnia. All rights reserved.

use wordhint::{alphabet, board, dictionary, display, engine, error, game_config, lexicon};

static HELP: &str = "\
lex <file>           load one word per line (replaces the dictionary)
words <w>...         add words to the dictionary
clear                empty the board
place <coord> <word> put a word on the board (8h across, h8 down, lowercase is blank)
rack <tiles>         set the rack (? is a blank)
limits <l> <t> <r> <b> | limits off
tiles <min> <max> | tiles off
hint                 next best hint
prev                 step back to a better hint
robot <iq>           robot move (1 is best)
check <word>         look a word up
reset                start hints over
show                 print the board
source <file>        run commands from a file
exit";

// "8h" is row 8 col h across, "h8" is col h row 8 down. Returns (col, row, horizontal).
fn parse_coord(s: &str) -> Option<(i8, i8, bool)> {
    if !s.is_ascii() {
        return None;
    }
    let b = s.as_bytes();
    let (horizontal, letter, digits) = match b.first()? {
        b'0'..=b'9' => (true, *b.last()?, &s[..s.len() - 1]),
        _ => (false, b[0], &s[1..]),
    };
    let col = letter.to_ascii_lowercase().checked_sub(b'a')?;
    let row = digits.parse::<i8>().ok()?.checked_sub(1)?;
    if col >= 26 || row < 0 {
        return None;
    }
    Some((col as i8, row, horizontal))
}

struct Shell<'a> {
    alphabet: &'a alphabet::Alphabet<'a>,
    game_config: &'a game_config::GameConfig,
    words: Vec<String>,
    dict: dictionary::Dictionary<'a>,
    board: board::Board,
    tray: Vec<u8>,
    search_limits: Option<engine::Rect>,
    tile_count_limits: Option<engine::TileCountLimits>,
    engine_ctxt: engine::EngineCtxt<'a>,
}

impl<'a> Shell<'a> {
    fn set_words(&mut self, words: Vec<String>) -> error::Returns<()> {
        self.dict = dictionary::Dictionary::from_words(self.alphabet, &words)?;
        self.words = words;
        self.engine_ctxt.reset();
        println!("{} words", self.words.len());
        Ok(())
    }

    fn find(&mut self, use_prev: bool, robot_iq: u8) {
        let params = engine::FindMoveParams {
            tray: &self.tray,
            use_prev,
            search_limits: self.search_limits,
            tile_count_limits: self.tile_count_limits,
            robot_iq,
            all_tiles_bonus: 0,
        };
        let mut num_anchors = 0;
        let found = self
            .engine_ctxt
            .find_move(&self.dict, &self.board, &params, |progress| {
                if let engine::SearchProgress::Anchor { .. } = progress {
                    num_anchors += 1;
                }
                true
            });
        log::debug!("{} anchors searched", num_anchors);
        match found.play {
            Some(play) if found.can_move => {
                println!(
                    "{}{} {}",
                    if found.is_robot_move { "robot: " } else { "" },
                    found.score,
                    display::fmt_move(self.alphabet, &self.board, &play)
                );
            }
            _ => {
                println!("no more moves");
            }
        }
    }

    fn do_command(&mut self, strings: &[String]) -> error::Returns<()> {
        match strings[0].as_str() {
            "help" => {
                println!("{}", HELP);
            }
            "lex" => {
                let Some(path) = strings.get(1) else {
                    wordhint::return_error!("need a file".into());
                };
                self.set_words(lexicon::read_word_list_file(path)?)?;
            }
            "words" => {
                let mut words = self.words.clone();
                words.extend(strings[1..].iter().map(|w| w.to_uppercase()));
                self.set_words(words)?;
            }
            "clear" => {
                self.board.clear();
                self.engine_ctxt.reset();
            }
            "place" => {
                let (Some(coord), Some(word)) = (strings.get(1), strings.get(2)) else {
                    wordhint::return_error!("need a coordinate and a word".into());
                };
                let Some((col, row, horizontal)) = parse_coord(coord) else {
                    wordhint::return_error!(format!("invalid coordinate {:?}", coord));
                };
                let mut new_board = self.board.clone();
                new_board.place_word(self.alphabet, word, col, row, horizontal)?;
                self.board = new_board;
                self.engine_ctxt.reset();
            }
            "rack" => {
                let tray = self
                    .alphabet
                    .rack_from_str(strings.get(1).map_or("", |s| s.as_str()))?;
                if tray.len() > self.game_config.rack_size() as usize {
                    wordhint::return_error!(format!("at most {} tiles", self.game_config.rack_size()));
                }
                self.tray = tray;
                self.engine_ctxt.reset();
            }
            "limits" => {
                if strings.get(1).map(|s| s.as_str()) == Some("off") {
                    self.search_limits = None;
                } else if strings.len() == 5 {
                    let v = strings[1..]
                        .iter()
                        .map(|s| s.parse::<i8>())
                        .collect::<Result<Vec<_>, _>>()?;
                    self.search_limits = Some(engine::Rect {
                        left: v[0],
                        top: v[1],
                        right: v[2],
                        bottom: v[3],
                    });
                } else {
                    wordhint::return_error!("need 4 numbers or off".into());
                }
                self.engine_ctxt.reset();
            }
            "tiles" => {
                if strings.get(1).map(|s| s.as_str()) == Some("off") {
                    self.tile_count_limits = None;
                } else if strings.len() == 3 {
                    self.tile_count_limits = Some(engine::TileCountLimits {
                        min: strings[1].parse()?,
                        max: strings[2].parse()?,
                    });
                } else {
                    wordhint::return_error!("need 2 numbers or off".into());
                }
                self.engine_ctxt.reset();
            }
            "hint" => self.find(false, 0),
            "prev" => self.find(true, 0),
            "robot" => {
                let iq = strings.get(1).map_or(Ok(1), |s| s.parse::<u8>())?;
                self.find(false, iq.max(1));
            }
            "check" => {
                for word in &strings[1..] {
                    let tiles = self.alphabet.word_from_str(&word.to_uppercase())?;
                    println!(
                        "{} {}",
                        word,
                        if dictionary::DictionaryView::check_word(&self.dict, &tiles) {
                            "is valid"
                        } else {
                            "is not valid"
                        }
                    );
                }
            }
            "reset" => {
                self.engine_ctxt.reset();
            }
            "show" => {
                display::print_board(self.alphabet, self.game_config.board_layout(), &self.board);
                println!("rack: {}", self.alphabet.fmt_rack(&self.tray));
            }
            _ => {
                println!("invalid input, help for help");
            }
        }
        Ok(())
    }
}

pub fn main() -> error::Returns<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let alphabet = &alphabet::ENGLISH_ALPHABET;
    let game_config = game_config::make_common_english_game_config();
    let mut shell = Shell {
        alphabet,
        game_config: &game_config,
        words: Vec::new(),
        dict: dictionary::Dictionary::from_words::<&str>(alphabet, &[])?,
        board: board::Board::new(game_config.board_layout().dim()),
        tray: Vec::new(),
        search_limits: None,
        tile_count_limits: None,
        engine_ctxt: engine::EngineCtxt::new(&game_config),
    };

    let mut rl = rustyline::DefaultEditor::new()?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if !strings.is_empty() {
                        match strings[0].as_str() {
                            "exit" => {
                                break;
                            }
                            "source" => {
                                if strings.len() > 1 {
                                    match std::fs::read_to_string(&strings[1]) {
                                        Ok(whole_file) => {
                                            let v = cmd_stack.len();
                                            for (line_num, line) in whole_file.lines().enumerate() {
                                                cmd_stack.push((
                                                    line.to_string(),
                                                    Some((strings[1].clone(), line_num + 1)),
                                                ));
                                            }
                                            cmd_stack[v..].reverse();
                                        }
                                        Err(err) => {
                                            println!("cannot open file: {:?}", err);
                                        }
                                    }
                                } else {
                                    println!("need another arg");
                                }
                            }
                            _ => {
                                if let Err(err) = shell.do_command(&strings) {
                                    println!("error: {}", err);
                                }
                            }
                        }
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    Ok(())
}
