//! Property-based tests for the cleaning stages.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p life-expectancy --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p life-expectancy --test property_tests
//! ```

use proptest::prelude::*;

use life_expectancy::output::to_csv_bytes;
use life_expectancy::transform::{extract_value, transform};
use life_expectancy::{RawTable, Region};

// =============================================================================
// Test Strategies
// =============================================================================

/// Cells as they appear in the extract: numbers, flagged numbers, placeholders.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,3}\\.[0-9]{1,2}",
        "[0-9]{1,3}\\.[0-9]{1,2} [bep]{1,2}",
        Just(": ".to_string()),
        Just(":".to_string()),
        Just("-".to_string()),
        Just(String::new()),
        "[a-z: ]{0,5}",
    ]
}

fn region_code() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["PT", "DE", "FR", "EU27_2020", "XX"])
}

/// A wide table with 1-4 year columns and 0-8 rows.
fn wide_table() -> impl Strategy<Value = RawTable> {
    (1usize..=4, 0usize..=8).prop_flat_map(|(years, rows)| {
        prop::collection::vec(
            (
                region_code(),
                prop::sample::select(vec!["F", "M", "T"]),
                prop::collection::vec(cell(), years),
            ),
            rows,
        )
        .prop_map(move |rows| {
            let mut headers = vec!["unit,sex,age,geo\\time".to_string()];
            headers.extend((0..years).map(|i| format!(" {} ", 2000 + i)));
            let rows = rows
                .into_iter()
                .map(|(region, sex, cells)| {
                    let mut row = vec![format!("YR,{sex},Y10,{region}")];
                    row.extend(cells);
                    row
                })
                .collect();
            RawTable::new(headers, rows)
        })
    })
}

fn test_region() -> impl Strategy<Value = Option<Region>> {
    prop_oneof![
        Just(None),
        Just(Some(Region::PT)),
        Just(Some(Region::DE)),
        Just(Some(Region::EU27_2020)),
    ]
}

// =============================================================================
// Numeric extraction
// =============================================================================

proptest! {
    /// Extraction never panics on arbitrary text.
    #[test]
    fn extract_never_panics(s in "\\PC{0,40}") {
        let _ = extract_value(&s);
    }

    /// A leading decimal with any suffix parses to the decimal itself.
    #[test]
    fn extract_leading_decimal(
        int in "[0-9]{1,4}",
        frac in "[0-9]{1,4}",
        suffix in "[ a-z:]{0,6}",
    ) {
        let number = format!("{int}.{frac}");
        let expected: f64 = number.parse().unwrap();
        prop_assert_eq!(extract_value(&format!("{number}{suffix}")), Some(expected));
    }

    /// Text without a decimal point never yields a value.
    #[test]
    fn extract_without_point_is_missing(s in "[0-9a-z: \\-]{0,12}") {
        prop_assert_eq!(extract_value(&s), None);
    }
}

// =============================================================================
// Transform laws
// =============================================================================

proptest! {
    /// rows_out <= rows_in * years, with equality iff nothing is dropped or filtered.
    #[test]
    fn row_count_law(table in wide_table(), region in test_region()) {
        let rows_in = table.row_count();
        let years = table.column_count() - 1;
        let possible = rows_in * years;
        let complete = table
            .rows
            .iter()
            .flat_map(|row| row.iter().skip(1))
            .filter(|cell| extract_value(cell).is_some())
            .count();

        let tidy = transform(table, region).unwrap();

        prop_assert!(tidy.len() <= possible);
        if region.is_none() {
            prop_assert_eq!(tidy.len(), complete);
        }
    }

    /// Every filtered row matches, and filtering equals restricting the unfiltered output.
    #[test]
    fn filter_correctness(table in wide_table(), region in test_region()) {
        let Some(region) = region else { return Ok(()); };

        let filtered = transform(table.clone(), Some(region)).unwrap();
        let all = transform(table, None).unwrap();

        prop_assert!(filtered.iter().all(|r| r.region == region.as_str()));
        let restricted: Vec<_> = all.iter().filter(|r| r.is_in(region)).cloned().collect();
        prop_assert_eq!(filtered.records(), restricted.as_slice());
    }

    /// Same input, same bytes.
    #[test]
    fn output_is_deterministic(table in wide_table(), region in test_region()) {
        let first = to_csv_bytes(&transform(table.clone(), region).unwrap()).unwrap();
        let second = to_csv_bytes(&transform(table, region).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Region lookup
// =============================================================================

proptest! {
    /// Lookup succeeds exactly for enumerated codes.
    #[test]
    fn region_get_matches_enumeration(code in "[A-Z0-9_]{1,10}") {
        let known = Region::ALL.iter().any(|r| r.as_str() == code);
        prop_assert_eq!(Region::get(&code).is_ok(), known);
    }
}
