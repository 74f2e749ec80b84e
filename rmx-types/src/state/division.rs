//! Clock division table.

/// Selectable divisors, indexed by a channel's division index.
pub const DIVISIONS: [u8; 19] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 16, 24, 32, 48, 64, 96,
];

/// Highest valid division index.
pub const MAX_DIVISION_INDEX: u8 = (DIVISIONS.len() - 1) as u8;

/// Lookup over [`DIVISIONS`] with index clamping.
pub struct DivisionTable;

impl DivisionTable {
    /// Divisor for `index`; indices past the end read the last entry.
    pub fn divisor(index: u8) -> u8 {
        DIVISIONS[Self::clamp_index(index) as usize]
    }

    pub fn clamp_index(index: u8) -> u8 {
        index.min(MAX_DIVISION_INDEX)
    }

    /// Advance a division counter by one edge. Returns the new counter;
    /// zero means the divided clock fires.
    pub fn advance(counter: u8, index: u8) -> u8 {
        ((counter as u16 + 1) % Self::divisor(index) as u16) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_shape() {
        assert_eq!(MAX_DIVISION_INDEX, 18);
        assert_eq!(DivisionTable::divisor(0), 1);
        assert_eq!(DivisionTable::divisor(3), 4);
        assert_eq!(DivisionTable::divisor(13), 16);
        assert_eq!(DivisionTable::divisor(18), 96);
    }

    #[test]
    fn divisor_clamps_index() {
        assert_eq!(DivisionTable::divisor(19), 96);
        assert_eq!(DivisionTable::divisor(u8::MAX), 96);
    }

    #[test]
    fn table_is_strictly_increasing() {
        assert!(DIVISIONS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn advance_wraps_at_divisor() {
        // divisor 4
        let mut c = 0;
        let fired: Vec<bool> = (0..8)
            .map(|_| {
                c = DivisionTable::advance(c, 3);
                c == 0
            })
            .collect();
        assert_eq!(fired, vec![false, false, false, true, false, false, false, true]);
    }

    #[test]
    fn advance_with_divisor_one_always_fires() {
        assert_eq!(DivisionTable::advance(0, 0), 0);
    }
}
