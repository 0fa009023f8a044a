/// Heading of the snake. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The heading that would send the snake straight back onto its neck
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Offset of one move, scaled by the cell size. Screen coordinates, so
    /// `Up` decreases y.
    pub fn offset(self, cell_size: i32) -> (i32, i32) {
        match self {
            Direction::Left => (-cell_size, 0),
            Direction::Right => (cell_size, 0),
            Direction::Up => (0, -cell_size),
            Direction::Down => (0, cell_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_pair_up() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert!(dir.is_opposite(dir.opposite()));
            assert!(!dir.is_opposite(dir));
        }
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Right.is_opposite(Direction::Down));
    }

    #[test]
    fn test_offset_scales_with_cell_size() {
        assert_eq!(Direction::Right.offset(10), (10, 0));
        assert_eq!(Direction::Left.offset(10), (-10, 0));
        assert_eq!(Direction::Up.offset(10), (0, -10));
        assert_eq!(Direction::Down.offset(1), (0, 1));
    }
}
