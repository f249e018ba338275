// Copyright (C) 2020-2024 Andy Kurnia.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn contains(&self, row: i8, col: i8) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }

    #[inline(always)]
    pub fn area(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_row_major() {
        let dim = Dim { rows: 3, cols: 5 };
        assert_eq!(dim.at_row_col(0, 0), 0);
        assert_eq!(dim.at_row_col(1, 0), 5);
        assert_eq!(dim.at_row_col(2, 4), 14);
        assert_eq!(dim.area(), 15);
        assert!(dim.contains(2, 4));
        assert!(!dim.contains(3, 0));
        assert!(!dim.contains(0, -1));
    }
}
