//! Property tests for the categorization extractor.

use clinic_triage::domain::triage::extract_categorization;
use proptest::prelude::*;

proptest! {
    // Same input, same outcome: the extractor has no hidden state.
    #[test]
    fn extraction_is_pure(reply in ".*") {
        let first = extract_categorization(&reply);
        let second = extract_categorization(&reply);
        prop_assert_eq!(first, second);
    }

    // Without a brace pair there is nothing to extract.
    #[test]
    fn input_without_braces_never_extracts(reply in "[^{}]*") {
        prop_assert_eq!(extract_categorization(&reply), None);
    }

    // Whatever the input, an extracted category is one of the four codes.
    #[test]
    fn extracted_category_is_always_valid(reply in ".*") {
        if let Some(draft) = extract_categorization(&reply) {
            prop_assert!((1..=4).contains(&draft.category.code()));
        }
    }

    // A single well-formed payload survives any brace-free prose around it.
    #[test]
    fn payload_survives_surrounding_prose(
        code in 1i64..=4,
        reason in "[A-Za-z ,.]{1,60}",
        preamble in "[^{}]{0,40}",
        postamble in "[^{}]{0,40}",
    ) {
        let payload = serde_json::json!({"category": code, "reason": reason});
        let reply = format!("{preamble}{payload}{postamble}");

        let draft = extract_categorization(&reply).expect("payload should extract");
        prop_assert_eq!(draft.category.code(), code);
        prop_assert_eq!(draft.reason.as_deref(), Some(reason.as_str()));
    }

    // Codes outside 1..=4 are rejected no matter how they are spelled.
    #[test]
    fn out_of_range_codes_never_extract(
        code in any::<i64>().prop_filter("outside 1..=4", |c| !(1..=4).contains(c)),
    ) {
        let numeric = serde_json::json!({"category": code, "reason": "x"}).to_string();
        prop_assert_eq!(extract_categorization(&numeric), None);

        let stringly = serde_json::json!({"category": code.to_string(), "reason": "x"}).to_string();
        prop_assert_eq!(extract_categorization(&stringly), None);
    }
}
