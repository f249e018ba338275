// Copyright (C) 2020-2024 Andy Kurnia.

use super::error;

pub struct Tile<'a> {
    label: &'a str,
    blank_label: &'a str,
    freq: u8,
    score: i8,
}

pub struct StaticAlphabet<'a> {
    tiles: &'a [Tile<'a>],
    blank_tile: u8,
}

pub enum Alphabet<'a> {
    Static(StaticAlphabet<'a>),
}

impl<'a> Alphabet<'a> {
    #[inline(always)]
    pub fn len(&self) -> u8 {
        match self {
            Alphabet::Static(x) => x.tiles.len() as u8,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn get(&self, idx: u8) -> &'a Tile<'a> {
        match self {
            Alphabet::Static(x) => &x.tiles[idx as usize],
        }
    }

    #[inline(always)]
    pub fn blank_tile(&self) -> u8 {
        match self {
            Alphabet::Static(x) => x.blank_tile,
        }
    }

    // face value; a blank scores as the blank face no matter what it stands for.
    #[inline(always)]
    pub fn score(&self, idx: u8) -> i8 {
        self.get(idx).score
    }

    #[inline(always)]
    pub fn freq(&self, idx: u8) -> u8 {
        self.get(idx).freq
    }

    #[inline(always)]
    pub fn from_board(&self, idx: u8, is_blank: bool) -> Option<&'a str> {
        if idx >= self.len() || idx == self.blank_tile() {
            None
        } else if is_blank {
            Some(self.get(idx).blank_label)
        } else {
            Some(self.get(idx).label)
        }
    }

    #[inline(always)]
    pub fn from_rack(&self, idx: u8) -> Option<&'a str> {
        if idx >= self.len() {
            None
        } else {
            Some(self.get(idx).label)
        }
    }

    // matches one label at the start of s, returns (tile, is_blank, bytes consumed).
    fn match_label(&self, s: &str) -> Option<(u8, bool, usize)> {
        for idx in 0..self.len() {
            let tile = self.get(idx);
            if s.starts_with(tile.label) {
                return Some((idx, false, tile.label.len()));
            }
        }
        for idx in 0..self.len() {
            if idx == self.blank_tile() {
                continue;
            }
            let tile = self.get(idx);
            if s.starts_with(tile.blank_label) {
                return Some((idx, true, tile.blank_label.len()));
            }
        }
        None
    }

    // rack notation: labels, "?" for the blank.
    pub fn rack_from_str(&self, s: &str) -> error::Returns<Vec<u8>> {
        let mut v = Vec::with_capacity(s.len());
        let mut rest = s;
        while !rest.is_empty() {
            match self.match_label(rest) {
                Some((tile, false, len)) => {
                    v.push(tile);
                    rest = &rest[len..];
                }
                _ => {
                    return_error!(format!("invalid tile in rack {:?} at {:?}", s, rest));
                }
            }
        }
        Ok(v)
    }

    // word notation: labels only, no blank.
    pub fn word_from_str(&self, s: &str) -> error::Returns<Vec<u8>> {
        let v = self.rack_from_str(s)?;
        if v.iter().any(|&tile| tile == self.blank_tile()) {
            return_error!(format!("word {:?} must not contain a blank", s));
        }
        Ok(v)
    }

    // board notation: labels are real tiles, blank labels are designated blanks.
    pub fn board_tiles_from_str(&self, s: &str) -> error::Returns<Vec<(u8, bool)>> {
        let mut v = Vec::with_capacity(s.len());
        let mut rest = s;
        while !rest.is_empty() {
            match self.match_label(rest) {
                Some((tile, is_blank, len)) if tile != self.blank_tile() => {
                    v.push((tile, is_blank));
                    rest = &rest[len..];
                }
                _ => {
                    return_error!(format!("invalid board tile in {:?} at {:?}", s, rest));
                }
            }
        }
        Ok(v)
    }

    pub fn fmt_rack(&self, rack: &[u8]) -> String {
        let mut s = String::new();
        for &tile in rack {
            s.push_str(self.from_rack(tile).unwrap_or("#"));
        }
        s
    }
}

pub static ENGLISH_ALPHABET: Alphabet = Alphabet::Static(StaticAlphabet {
    tiles: &[
        Tile {
            label: "?",
            blank_label: "?",
            freq: 2,
            score: 0,
        },
        Tile {
            label: "A",
            blank_label: "a",
            freq: 9,
            score: 1,
        },
        Tile {
            label: "B",
            blank_label: "b",
            freq: 2,
            score: 3,
        },
        Tile {
            label: "C",
            blank_label: "c",
            freq: 2,
            score: 3,
        },
        Tile {
            label: "D",
            blank_label: "d",
            freq: 4,
            score: 2,
        },
        Tile {
            label: "E",
            blank_label: "e",
            freq: 12,
            score: 1,
        },
        Tile {
            label: "F",
            blank_label: "f",
            freq: 2,
            score: 4,
        },
        Tile {
            label: "G",
            blank_label: "g",
            freq: 3,
            score: 2,
        },
        Tile {
            label: "H",
            blank_label: "h",
            freq: 2,
            score: 4,
        },
        Tile {
            label: "I",
            blank_label: "i",
            freq: 9,
            score: 1,
        },
        Tile {
            label: "J",
            blank_label: "j",
            freq: 1,
            score: 8,
        },
        Tile {
            label: "K",
            blank_label: "k",
            freq: 1,
            score: 5,
        },
        Tile {
            label: "L",
            blank_label: "l",
            freq: 4,
            score: 1,
        },
        Tile {
            label: "M",
            blank_label: "m",
            freq: 2,
            score: 3,
        },
        Tile {
            label: "N",
            blank_label: "n",
            freq: 6,
            score: 1,
        },
        Tile {
            label: "O",
            blank_label: "o",
            freq: 8,
            score: 1,
        },
        Tile {
            label: "P",
            blank_label: "p",
            freq: 2,
            score: 3,
        },
        Tile {
            label: "Q",
            blank_label: "q",
            freq: 1,
            score: 10,
        },
        Tile {
            label: "R",
            blank_label: "r",
            freq: 6,
            score: 1,
        },
        Tile {
            label: "S",
            blank_label: "s",
            freq: 4,
            score: 1,
        },
        Tile {
            label: "T",
            blank_label: "t",
            freq: 6,
            score: 1,
        },
        Tile {
            label: "U",
            blank_label: "u",
            freq: 4,
            score: 1,
        },
        Tile {
            label: "V",
            blank_label: "v",
            freq: 2,
            score: 4,
        },
        Tile {
            label: "W",
            blank_label: "w",
            freq: 2,
            score: 4,
        },
        Tile {
            label: "X",
            blank_label: "x",
            freq: 1,
            score: 8,
        },
        Tile {
            label: "Y",
            blank_label: "y",
            freq: 2,
            score: 4,
        },
        Tile {
            label: "Z",
            blank_label: "z",
            freq: 1,
            score: 10,
        },
    ],
    blank_tile: 0,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_tiles_have_expected_values() {
        let alphabet = &ENGLISH_ALPHABET;
        assert_eq!(alphabet.len(), 27);
        assert_eq!(alphabet.blank_tile(), 0);
        assert_eq!(alphabet.score(0), 0);
        assert_eq!(alphabet.score(17), 10);
        assert_eq!(alphabet.freq(5), 12);
        assert_eq!(
            (0..alphabet.len()).map(|t| alphabet.freq(t) as u16).sum::<u16>(),
            100
        );
    }

    #[test]
    fn parses_racks_words_and_board_tiles() {
        let alphabet = &ENGLISH_ALPHABET;
        assert_eq!(alphabet.rack_from_str("CAT?").unwrap(), vec![3, 1, 20, 0]);
        assert_eq!(alphabet.word_from_str("DOG").unwrap(), vec![4, 15, 7]);
        assert!(alphabet.word_from_str("D?G").is_err());
        assert!(alphabet.rack_from_str("cat").is_err());
        assert_eq!(
            alphabet.board_tiles_from_str("CaT").unwrap(),
            vec![(3, false), (1, true), (20, false)]
        );
        assert!(alphabet.board_tiles_from_str("C?T").is_err());
    }

    #[test]
    fn labels_round_trip() {
        let alphabet = &ENGLISH_ALPHABET;
        assert_eq!(alphabet.fmt_rack(&[19, 0, 1]), "S?A");
        assert_eq!(alphabet.from_board(19, true), Some("s"));
        assert_eq!(alphabet.from_board(0, false), None);
    }
}
