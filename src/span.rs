use crate::prelude::*;

/// Map the checker's 1-based (line, column) plus a span width onto a 0-based
/// editor range. The checker is trusted but never allowed to produce negative
/// coordinates; coordinates at or below 1 clamp to 0. Spans do not wrap:
/// the report's offsets are single-line, so the end lands on the same line.
pub(crate) fn editor_range(line: u32, column: u32, width: u32) -> Range {
    let line = line.saturating_sub(1);
    let column = column.saturating_sub(1);
    Range {
        start: Position {
            line,
            character: column,
        },
        end: Position {
            line,
            character: column + width,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_one_based_to_zero_based() {
        let range = editor_range(2, 3, 5);
        assert_eq!(range.start, Position::new(1, 2));
        assert_eq!(range.end, Position::new(1, 7));
    }

    #[test]
    fn clamps_at_zero() {
        let range = editor_range(0, 0, 4);
        assert_eq!(range.start, Position::new(0, 0));
        assert_eq!(range.end, Position::new(0, 4));
    }

    #[test]
    fn zero_width_span_stays_zero_width() {
        let range = editor_range(7, 12, 0);
        assert_eq!(range.start, range.end);
        assert_eq!(range.start, Position::new(6, 11));
    }
}
