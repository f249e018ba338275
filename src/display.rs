// Copyright (C) 2020-2024 Andy Kurnia. All rights reserved.

use super::{alphabet, board, board_layout, movegen};

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout, row: i8, col: i8) -> &'static str {
    if row == board_layout.star_row() && col == board_layout.star_col() {
        return "*";
    }
    let premium = board_layout.premium_at(row, col);
    match (premium.word_multiplier, premium.tile_multiplier) {
        (3, _) => "=",
        (2, _) => "-",
        (1, 3) => "\"",
        (1, 2) => "\'",
        _ => " ",
    }
}

#[inline(always)]
pub fn board_label<'a, B: board::BoardModel + ?Sized>(
    alphabet: &'a alphabet::Alphabet<'a>,
    board_layout: &board_layout::BoardLayout,
    board: &B,
    row: i8,
    col: i8,
) -> &'a str {
    board
        .get_tile(col, row)
        .and_then(|t| alphabet.from_board(t.tile, t.is_blank))
        .unwrap_or_else(|| empty_label(board_layout, row, col))
}

// "8h" across (row first), "h8" down (column first). Columns past z wrap.
pub fn fmt_coord(horizontal: bool, col: i8, row: i8) -> String {
    let col_label = ((col as u8 % 26) + 0x61) as char;
    if horizontal {
        format!("{}{}", row + 1, col_label)
    } else {
        format!("{}{}", col_label, row + 1)
    }
}

// The whole main word, with "." for tiles already on the board.
pub struct WriteableMove<'a, B: board::BoardModel + ?Sized> {
    alphabet: &'a alphabet::Alphabet<'a>,
    board: &'a B,
    play: &'a movegen::MoveInfo,
}

impl<B: board::BoardModel + ?Sized> std::fmt::Display for WriteableMove<'_, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let play = self.play;
        let (Some(first), Some(last)) = (play.tiles.first(), play.tiles.last()) else {
            return write!(f, "(none)");
        };
        let at = |var_coord: i8| {
            if play.horizontal {
                self.board.get_tile(var_coord, play.common_coord)
            } else {
                self.board.get_tile(play.common_coord, var_coord)
            }
        };
        let mut start = first.var_coord;
        while start > 0 && at(start - 1).is_some() {
            start -= 1;
        }
        let (col, row) = if play.horizontal {
            (start, play.common_coord)
        } else {
            (play.common_coord, start)
        };
        write!(f, "{} ", fmt_coord(play.horizontal, col, row))?;
        let mut placed = play.tiles.iter().peekable();
        let mut var_coord = start;
        loop {
            if let Some(p) = placed.next_if(|p| p.var_coord == var_coord) {
                write!(
                    f,
                    "{}",
                    self.alphabet.from_board(p.tile, p.is_blank).unwrap_or("?")
                )?;
            } else if at(var_coord).is_some() {
                write!(f, ".")?;
            } else {
                break;
            }
            if var_coord == i8::MAX {
                break;
            }
            var_coord += 1;
        }
        debug_assert!(var_coord > last.var_coord);
        Ok(())
    }
}

#[inline(always)]
pub fn fmt_move<'a, B: board::BoardModel + ?Sized>(
    alphabet: &'a alphabet::Alphabet<'a>,
    board: &'a B,
    play: &'a movegen::MoveInfo,
) -> WriteableMove<'a, B> {
    WriteableMove {
        alphabet,
        board,
        play,
    }
}

pub fn print_board<'a, B: board::BoardModel + ?Sized>(
    alphabet: &'a alphabet::Alphabet<'a>,
    board_layout: &board_layout::BoardLayout,
    board: &B,
) {
    let dim = board_layout.dim();
    print!("  ");
    for c in 0..dim.cols {
        print!(" {}", ((c as u8 % 26) + 0x61) as char);
    }
    println!();
    print!("  +");
    for _ in 1..dim.cols {
        print!("--");
    }
    println!("-+");
    for r in 0..dim.rows {
        print!("{:2}|", r + 1);
        for c in 0..dim.cols {
            if c > 0 {
                print!(" ")
            }
            print!("{}", board_label(alphabet, board_layout, board, r, c));
        }
        println!("|{}", r + 1);
    }
    print!("  +");
    for _ in 1..dim.cols {
        print!("--");
    }
    println!("-+");
    print!("  ");
    for c in 0..dim.cols {
        print!(" {}", ((c as u8 % 26) + 0x61) as char);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_premium_squares() {
        let layout = board_layout::make_standard_board_layout();
        assert_eq!(empty_label(&layout, 7, 7), "*");
        assert_eq!(empty_label(&layout, 0, 0), "=");
        assert_eq!(empty_label(&layout, 1, 1), "-");
        assert_eq!(empty_label(&layout, 0, 1), " ");
    }

    #[test]
    fn formats_play_through() {
        let alphabet = &alphabet::ENGLISH_ALPHABET;
        let board = board::Board::from_rows(alphabet, &[".....", ".A...", "....."]).unwrap();
        let play = movegen::MoveInfo {
            horizontal: true,
            common_coord: 1,
            tiles: vec![
                movegen::PlacedTile {
                    tile: 3,
                    var_coord: 0,
                    is_blank: false,
                },
                movegen::PlacedTile {
                    tile: 20,
                    var_coord: 2,
                    is_blank: true,
                },
            ],
        };
        assert_eq!(fmt_move(alphabet, &board, &play).to_string(), "2a C.t");
        let play = movegen::MoveInfo {
            horizontal: false,
            common_coord: 1,
            tiles: vec![movegen::PlacedTile {
                tile: 20,
                var_coord: 2,
                is_blank: false,
            }],
        };
        assert_eq!(fmt_move(alphabet, &board, &play).to_string(), "b2 .T");
    }
}
