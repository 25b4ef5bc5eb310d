/// Extracts the slice of a register reset value covered by the bit range
/// `[start, start + width)`. The mask is computed in 64-bit arithmetic so a
/// full 32-bit slice stays exact.
pub fn reset_slice(start: u32, width: u32, reset: u32) -> u32 {
    ((u64::from(reset) >> start) & ((1u64 << width) - 1)) as u32
}

/// Header constants render empty attributes as a literal placeholder.
pub fn unknown_if_empty(s: &str) -> &str {
    if s.is_empty() {
        "unknown"
    } else {
        s
    }
}

/// Collapses whitespace runs. SVD descriptions are often reflowed XML text
/// and must end up on a single output line.
pub fn respace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Doc-comment text for a description, with the placeholder for entities
/// that have none.
pub fn describe(s: &str) -> String {
    let description = respace(s);
    if description.is_empty() {
        "No description".to_string()
    } else {
        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_slice_extracts_bits() {
        assert_eq!(reset_slice(0, 2, 0b101), 1);
        assert_eq!(reset_slice(2, 1, 0b101), 1);
        assert_eq!(reset_slice(3, 5, 0b101), 0);
        assert_eq!(reset_slice(4, 8, 0xdead_beef), 0xee);
    }

    #[test]
    fn reset_slice_supports_full_width() {
        assert_eq!(reset_slice(0, 32, 0xdead_beef), 3_735_928_559);
    }

    #[test]
    fn reset_slices_reassemble() {
        let reset = 0xdead_beef;
        let chunks = [(0u32, 3u32), (3, 5), (8, 8), (16, 13), (29, 3)];
        let mut rebuilt = 0u32;
        for (start, width) in chunks {
            rebuilt |= reset_slice(start, width, reset) << start;
        }
        assert_eq!(rebuilt, reset);
    }

    #[test]
    fn respace_collapses_runs() {
        assert_eq!(respace("Reset and\n      clock control"), "Reset and clock control");
    }

    #[test]
    fn describe_falls_back() {
        assert_eq!(describe(""), "No description");
        assert_eq!(describe("  \n "), "No description");
        assert_eq!(describe("RNGEN comment"), "RNGEN comment");
    }
}
