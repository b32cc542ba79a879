//! Property tests for identifier normalization.
#![allow(clippy::panic, clippy::doc_markdown)]

use pagegate::ResourceId;
use proptest::prelude::*;

/// Inserts hyphens into `hex` at positions derived from `seed`.
fn scatter_hyphens(hex: &str, seed: u64) -> String {
    let mut out = String::with_capacity(hex.len() * 2);
    let mut bits = seed;
    for c in hex.chars() {
        out.push(c);
        if bits & 1 == 1 {
            out.push('-');
        }
        bits >>= 1;
    }
    out
}

proptest! {
    #[test]
    fn parse_is_case_insensitive(hex in "[0-9a-f]{32}") {
        let lower = ResourceId::parse(&hex).unwrap();
        let upper = ResourceId::parse(&hex.to_uppercase()).unwrap();
        prop_assert_eq!(&lower, &upper);
    }

    #[test]
    fn parse_ignores_hyphen_placement(hex in "[0-9a-f]{32}", seed in any::<u64>()) {
        let canonical = ResourceId::parse(&hex).unwrap();
        let scattered = scatter_hyphens(&hex, seed);
        prop_assert_eq!(ResourceId::parse(&scattered).unwrap(), canonical);
    }

    #[test]
    fn parse_output_is_fixed_point(hex in "[0-9a-f]{32}") {
        let id = ResourceId::parse(&hex).unwrap();
        let reparsed = ResourceId::parse(id.as_str()).unwrap();
        prop_assert_eq!(reparsed.as_str(), id.as_str());
        prop_assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn url_extraction_matches_direct_parse(hex in "[0-9a-f]{32}") {
        let direct = ResourceId::parse(&hex).unwrap();
        let url = format!("https://www.example.so/Some-Page-Title-{hex}");
        prop_assert_eq!(ResourceId::from_url(&url).unwrap(), direct);
    }

    #[test]
    fn parse_rejects_wrong_length(hex in "[0-9a-f]{1,31}") {
        prop_assert!(ResourceId::parse(&hex).is_err());
    }
}
