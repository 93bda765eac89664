pub const FULL_BOARD: u16 = 0b111_111_111;

pub const LINES: [u16; 8] = [
    0b000_000_111,
    0b000_111_000,
    0b111_000_000,
    0b001_001_001,
    0b010_010_010,
    0b100_100_100,
    0b100_010_001,
    0b001_010_100,
];

pub fn has_line(board: u16) -> bool {
    LINES.iter().any(|line| board & line == *line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_line_row() {
        assert!(has_line(0b000_111_000));
    }

    #[test]
    fn test_has_line_diagonal_with_noise() {
        assert!(has_line(0b101_010_101));
    }

    #[test]
    fn test_has_line_none() {
        assert!(!has_line(0b011_100_110));
    }
}
