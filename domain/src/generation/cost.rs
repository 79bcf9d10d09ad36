//! Credit cost estimation

/// Minimum balance required before a generation may start.
pub const MIN_CREDITS: u64 = 100;

/// Estimate the credit cost of a generation from its input size.
///
/// One unit per four characters of title + description, capped by the
/// session's `max_tokens` setting. Characters are UTF-16 code units, so
/// accented or CJK input is not overcharged for its byte width.
pub fn estimate_cost(title: &str, description: &str, max_tokens: u32) -> u64 {
    let chars = title.encode_utf16().count() + description.encode_utf16().count();
    let estimate = chars.div_ceil(4) as u64;
    estimate.min(max_tokens as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_example() {
        // "Report" (6) + "Quarterly results" (17) = 23, ceil(23/4) = 6
        assert_eq!(estimate_cost("Report", "Quarterly results", 4000), 6);
    }

    #[test]
    fn test_capped_by_max_tokens() {
        let long = "x".repeat(100_000);
        assert_eq!(estimate_cost(&long, "", 4000), 4000);
    }

    #[test]
    fn test_rounds_up() {
        // 5 chars -> ceil(5/4) = 2
        assert_eq!(estimate_cost("abc", "de", 4000), 2);
    }

    #[test]
    fn test_non_ascii_charged_per_character_not_per_byte() {
        // "Café" is 5 UTF-8 bytes but 4 characters -> 1 unit
        assert_eq!(estimate_cost("Café", "", 4000), 1);
        // "日本語の論文" is 18 bytes but 6 characters -> 2 units
        assert_eq!(estimate_cost("日本語の論文", "", 4000), 2);
    }
}
