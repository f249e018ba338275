// Copyright (C) 2020-2024 Andy Kurnia.

use super::movegen;

// Calls found once per distinct choice of which placed tiles are blanks.
// blank_values are the faces the blanks stand for and must be sorted, so that
// blanks with the same face land on increasing positions and no choice repeats.
pub fn resolve_blanks<F: FnMut(&[movegen::PlacedTile])>(
    tiles: &mut [movegen::PlacedTile],
    blank_values: &[u8],
    mut found: F,
) {
    debug_assert!(blank_values.windows(2).all(|w| w[0] <= w[1]));

    fn assign<F: FnMut(&[movegen::PlacedTile])>(
        tiles: &mut [movegen::PlacedTile],
        blank_values: &[u8],
        prev: Option<(u8, usize)>,
        found: &mut F,
    ) {
        let Some((&face, rest)) = blank_values.split_first() else {
            found(tiles);
            return;
        };
        let start = match prev {
            Some((prev_face, idx)) if prev_face == face => idx + 1,
            _ => 0,
        };
        for idx in start..tiles.len() {
            if tiles[idx].tile == face && !tiles[idx].is_blank {
                tiles[idx].is_blank = true;
                assign(tiles, rest, Some((face, idx)), found);
                tiles[idx].is_blank = false;
            }
        }
    }

    assign(tiles, blank_values, None, &mut found);
}
