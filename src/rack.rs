// Copyright (C) 2020-2024 Andy Kurnia.

// Tally of the tiles still available to the search, plus the faces currently
// stood in for by blanks, most recent last.
#[derive(Clone, Default)]
pub struct Rack {
    tally: Vec<u8>,
    blank_tile: u8,
    blank_values: Vec<u8>,
    num_tiles: i8,
    tiles_left: i8,
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    // false if the tray has nothing to play.
    pub fn init(&mut self, num_faces: u8, blank_tile: u8, tray: &[u8], max_tiles: i8) -> bool {
        self.tally.clear();
        self.tally.resize(num_faces as usize, 0);
        self.blank_tile = blank_tile;
        self.blank_values.clear();
        self.num_tiles = 0;
        for &tile in tray {
            if let Some(count) = self.tally.get_mut(tile as usize) {
                *count += 1;
                self.num_tiles = self.num_tiles.saturating_add(1);
            }
        }
        self.tiles_left = self.num_tiles.min(max_tiles);
        self.num_tiles > 0
    }

    // Takes tile, or a blank standing in for it. Some(is_blank) on success.
    #[inline(always)]
    pub fn remove(&mut self, tile: u8) -> Option<bool> {
        let idx = tile as usize;
        if self.tiles_left <= 0 || tile == self.blank_tile || idx >= self.tally.len() {
            return None;
        }
        let is_blank = if self.tally[idx] > 0 {
            self.tally[idx] -= 1;
            false
        } else if self.tally.get(self.blank_tile as usize).is_some_and(|&n| n > 0) {
            self.tally[self.blank_tile as usize] -= 1;
            self.blank_values.push(tile);
            true
        } else {
            return None;
        };
        self.tiles_left -= 1;
        Some(is_blank)
    }

    // undoes the matching remove().
    #[inline(always)]
    pub fn replace(&mut self, tile: u8, is_blank: bool) {
        if is_blank {
            let popped = self.blank_values.pop();
            debug_assert_eq!(popped, Some(tile));
            self.tally[self.blank_tile as usize] += 1;
        } else {
            self.tally[tile as usize] += 1;
        }
        self.tiles_left += 1;
    }

    #[inline(always)]
    pub fn tiles_left(&self) -> i8 {
        self.tiles_left
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> i8 {
        self.num_tiles
    }

    #[inline(always)]
    pub fn blank_values(&self) -> &[u8] {
        &self.blank_values
    }

    #[inline(always)]
    pub fn tally(&self) -> &[u8] {
        &self.tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_real_tile_over_blank() {
        let mut rack = Rack::new();
        assert!(rack.init(27, 0, &[0, 5, 5], 7));
        assert_eq!(rack.tiles_left(), 3);
        assert_eq!(rack.remove(5), Some(false));
        assert_eq!(rack.remove(5), Some(false));
        assert_eq!(rack.remove(5), Some(true));
        assert_eq!(rack.blank_values(), &[5]);
        assert_eq!(rack.remove(5), None);
        assert_eq!(rack.remove(0), None);
        assert_eq!(rack.tiles_left(), 0);
        rack.replace(5, true);
        rack.replace(5, false);
        rack.replace(5, false);
        assert!(rack.blank_values().is_empty());
        assert_eq!(rack.tally()[0], 1);
        assert_eq!(rack.tally()[5], 2);
        assert_eq!(rack.tiles_left(), 3);
    }

    #[test]
    fn max_tiles_caps_removals() {
        let mut rack = Rack::new();
        assert!(rack.init(27, 0, &[1, 2, 3], 2));
        assert_eq!(rack.remove(1), Some(false));
        assert_eq!(rack.remove(2), Some(false));
        assert_eq!(rack.remove(3), None);
        assert_eq!(rack.tiles_left(), 0);
    }

    #[test]
    fn empty_tray_is_rejected() {
        let mut rack = Rack::new();
        assert!(!rack.init(27, 0, &[], 7));
        assert!(!rack.init(27, 0, &[40], 7));
    }
}
