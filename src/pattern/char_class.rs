//! Character class interiors: bracket text to byte ranges, and membership.

use super::ast::ClassRange;

/// Width of one `low-high` window inside a bracket expression.
const RANGE_WINDOW: usize = 3;

/// Turn the interior of `[...]` (brackets excluded) into its ranges.
///
/// With a `-` anywhere in the interior, the text is cut into 3-byte windows
/// read as `low-high`; a short trailing window keeps its first and last
/// byte, so `a-zx` yields `a-z` and `x-x`. Without a `-` the whole interior
/// is one range from its first byte to its last.
///
/// The caller guarantees a non-empty interior.
pub fn class_ranges(interior: &[u8]) -> Vec<ClassRange> {
    debug_assert!(!interior.is_empty());
    if interior.contains(&b'-') {
        interior
            .chunks(RANGE_WINDOW)
            .map(|window| ClassRange::new(window[0], window[window.len() - 1]))
            .collect()
    } else {
        vec![ClassRange::new(interior[0], interior[interior.len() - 1])]
    }
}

/// Test whether `b` falls in any of `ranges`.
pub fn class_contains(ranges: &[ClassRange], b: u8) -> bool {
    ranges.iter().any(|r| r.low <= b && b <= r.high)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(low: u8, high: u8) -> ClassRange {
        ClassRange::new(low, high)
    }

    #[test]
    fn single_dash_range() {
        assert_eq!(class_ranges(b"a-z"), vec![r(b'a', b'z')]);
    }

    #[test]
    fn several_dash_ranges_keep_order() {
        assert_eq!(
            class_ranges(b"a-zA-Z0-9"),
            vec![r(b'a', b'z'), r(b'A', b'Z'), r(b'0', b'9')]
        );
    }

    #[test]
    fn trailing_short_window() {
        assert_eq!(class_ranges(b"a-zx"), vec![r(b'a', b'z'), r(b'x', b'x')]);
        assert_eq!(class_ranges(b"a-zxy"), vec![r(b'a', b'z'), r(b'x', b'y')]);
    }

    #[test]
    fn plain_list_folds_to_first_and_last() {
        assert_eq!(class_ranges(b"ace"), vec![r(b'a', b'e')]);
        assert_eq!(class_ranges(b"09"), vec![r(b'0', b'9')]);
    }

    #[test]
    fn membership() {
        let ranges = class_ranges(b"a-f0-3");
        assert!(class_contains(&ranges, b'a'));
        assert!(class_contains(&ranges, b'f'));
        assert!(class_contains(&ranges, b'2'));
        assert!(!class_contains(&ranges, b'g'));
        assert!(!class_contains(&ranges, b'4'));
    }

    #[test]
    fn reversed_range_contains_nothing() {
        let ranges = class_ranges(b"z-a");
        assert!(!class_contains(&ranges, b'a'));
        assert!(!class_contains(&ranges, b'm'));
        assert!(!class_contains(&ranges, b'z'));
    }
}
