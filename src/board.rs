// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, board_layout, error, matrix};

// A committed tile. A designated blank keeps the face it stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardTile {
    pub tile: u8,
    pub is_blank: bool,
}

// What the engine needs from the host's board. Only committed tiles are visible.
pub trait BoardModel {
    fn num_rows(&self) -> i8;
    fn num_cols(&self) -> i8;
    fn get_tile(&self, col: i8, row: i8) -> Option<BoardTile>;
}

#[derive(Clone)]
pub struct Board {
    dim: matrix::Dim,
    tiles: Box<[Option<BoardTile>]>,
}

impl Board {
    pub fn new(dim: matrix::Dim) -> Self {
        Self {
            dim,
            tiles: vec![None; dim.area()].into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    pub fn set(&mut self, col: i8, row: i8, tile: Option<BoardTile>) {
        self.tiles[self.dim.at_row_col(row, col)] = tile;
    }

    pub fn clear(&mut self) {
        self.tiles.iter_mut().for_each(|m| *m = None);
    }

    // one string per row, "." for an empty square, blank labels for designated blanks.
    pub fn from_rows<S: AsRef<str>>(
        alphabet: &alphabet::Alphabet,
        rows: &[S],
    ) -> error::Returns<Self> {
        let mut parsed = Vec::with_capacity(rows.len());
        for row in rows {
            let mut v = Vec::new();
            for ch in row.as_ref().chars() {
                if ch == '.' {
                    v.push(None);
                    continue;
                }
                let mut buf = [0u8; 4];
                match alphabet.board_tiles_from_str(ch.encode_utf8(&mut buf))?[..] {
                    [(tile, is_blank)] => v.push(Some(BoardTile { tile, is_blank })),
                    _ => {
                        return_error!(format!("invalid board square {:?}", ch));
                    }
                }
            }
            parsed.push(v);
        }
        let num_cols = parsed.first().map_or(0, |row| row.len());
        if parsed.iter().any(|row| row.len() != num_cols) {
            return_error!("board rows must have equal length".into());
        }
        if parsed.len() > i8::MAX as usize || num_cols > i8::MAX as usize {
            return_error!(format!(
                "board of {}x{} is too large",
                parsed.len(),
                num_cols
            ));
        }
        let mut board = Self::new(matrix::Dim {
            rows: parsed.len() as i8,
            cols: num_cols as i8,
        });
        for (row, v) in (0i8..).zip(parsed.iter()) {
            for (col, &tile) in (0i8..).zip(v.iter()) {
                board.set(col, row, tile);
            }
        }
        Ok(board)
    }

    // puts word on the board starting at (col, row), skipping nothing.
    pub fn place_word(
        &mut self,
        alphabet: &alphabet::Alphabet,
        word: &str,
        col: i8,
        row: i8,
        horizontal: bool,
    ) -> error::Returns<()> {
        let tiles = alphabet.board_tiles_from_str(word)?;
        let (dc, dr) = if horizontal { (1, 0) } else { (0, 1) };
        for (i, &(tile, is_blank)) in (0i8..).zip(tiles.iter()) {
            let (c, r) = (col + i * dc, row + i * dr);
            if !self.dim.contains(r, c) {
                return_error!(format!("{:?} does not fit on the board", word));
            }
            self.set(c, r, Some(BoardTile { tile, is_blank }));
        }
        Ok(())
    }
}

impl BoardModel for Board {
    #[inline(always)]
    fn num_rows(&self) -> i8 {
        self.dim.rows
    }

    #[inline(always)]
    fn num_cols(&self) -> i8 {
        self.dim.cols
    }

    #[inline(always)]
    fn get_tile(&self, col: i8, row: i8) -> Option<BoardTile> {
        if self.dim.contains(row, col) {
            self.tiles[self.dim.at_row_col(row, col)]
        } else {
            None
        }
    }
}

static PLAIN_SQUARE: board_layout::Premium = board_layout::Premium {
    word_multiplier: 1,
    tile_multiplier: 1,
};

// The board seen along one orientation. col runs along the line, row picks the
// line; in the vertical orientation both are swapped before touching the board.
pub struct BoardView<'a, B: BoardModel + ?Sized> {
    board: &'a B,
    board_layout: &'a board_layout::BoardLayout,
    horizontal: bool,
    blank_tile: u8,
}

impl<'a, B: BoardModel + ?Sized> BoardView<'a, B> {
    pub fn new(
        board: &'a B,
        board_layout: &'a board_layout::BoardLayout,
        horizontal: bool,
        blank_tile: u8,
    ) -> Self {
        Self {
            board,
            board_layout,
            horizontal,
            blank_tile,
        }
    }

    #[inline(always)]
    pub fn horizontal(&self) -> bool {
        self.horizontal
    }

    #[inline(always)]
    pub fn num_lines(&self) -> i8 {
        if self.horizontal {
            self.board.num_rows()
        } else {
            self.board.num_cols()
        }
    }

    #[inline(always)]
    pub fn line_len(&self) -> i8 {
        if self.horizontal {
            self.board.num_cols()
        } else {
            self.board.num_rows()
        }
    }

    // (col, row) in board coordinates.
    #[inline(always)]
    pub fn to_board(&self, col: i8, row: i8) -> (i8, i8) {
        if self.horizontal {
            (col, row)
        } else {
            (row, col)
        }
    }

    #[inline(always)]
    pub fn tile_at(&self, col: i8, row: i8) -> Option<BoardTile> {
        if col < 0 || row < 0 || col >= self.line_len() || row >= self.num_lines() {
            return None;
        }
        let (c, r) = self.to_board(col, row);
        self.board.get_tile(c, r)
    }

    // the face of the tile there, or the blank id for a designated blank when
    // subst_blank is set.
    #[inline(always)]
    pub fn get(&self, col: i8, row: i8, subst_blank: bool) -> Option<u8> {
        self.tile_at(col, row).map(|t| {
            if subst_blank && t.is_blank {
                self.blank_tile
            } else {
                t.tile
            }
        })
    }

    #[inline(always)]
    pub fn is_empty(&self, col: i8, row: i8) -> bool {
        self.tile_at(col, row).is_none()
    }

    #[inline(always)]
    pub fn premium(&self, col: i8, row: i8) -> board_layout::Premium {
        let (c, r) = self.to_board(col, row);
        if self.board_layout.dim().contains(r, c) {
            self.board_layout.premium_at(r, c)
        } else {
            PLAIN_SQUARE
        }
    }
}
