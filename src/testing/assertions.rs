//! Assertion functions for pipeline outputs.

use crate::record::Record;
use std::collections::HashMap;

/// Assert that two record lists are equal in order and content.
///
/// # Panics
///
/// Panics if the lists differ in length or at any position.
///
/// # Example
///
/// ```
/// use rowflow::record;
/// use rowflow::testing::assert_records_equal;
///
/// let actual = vec![record! {"n" => 1}, record! {"n" => 2}];
/// assert_records_equal(&actual, &[record! {"n" => 1}, record! {"n" => 2}]);
/// ```
pub fn assert_records_equal(actual: &[Record], expected: &[Record]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Record count mismatch:\n  Expected: {}\n  Actual: {}\n  Expected records: {}\n  Actual records: {}",
        expected.len(),
        actual.len(),
        render(expected),
        render(actual)
    );

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(
            a,
            e,
            "Record mismatch at index {i}:\n  Expected: {e}\n  Actual: {a}\n  Full expected: {}\n  Full actual: {}",
            render(expected),
            render(actual)
        );
    }
}

/// Assert that two record lists hold the same records with the same
/// multiplicities, ignoring order.
///
/// Use this for operators whose output order is unspecified, such as
/// `reduce_by_key`.
///
/// # Panics
///
/// Panics if some record occurs a different number of times in each list.
///
/// # Example
///
/// ```
/// use rowflow::record;
/// use rowflow::testing::assert_records_unordered_equal;
///
/// let actual = vec![record! {"k" => "b"}, record! {"k" => "a"}, record! {"k" => "a"}];
/// let expected = vec![record! {"k" => "a"}, record! {"k" => "a"}, record! {"k" => "b"}];
/// assert_records_unordered_equal(&actual, &expected);
/// ```
pub fn assert_records_unordered_equal(actual: &[Record], expected: &[Record]) {
    let actual_counts = counts(actual);
    let expected_counts = counts(expected);
    if actual_counts == expected_counts {
        return;
    }

    let missing: Vec<String> = expected_counts
        .iter()
        .filter(|(r, n)| actual_counts.get(*r).copied().unwrap_or(0) < **n)
        .map(|(r, _)| r.to_string())
        .collect();
    let extra: Vec<String> = actual_counts
        .iter()
        .filter(|(r, n)| expected_counts.get(*r).copied().unwrap_or(0) < **n)
        .map(|(r, _)| r.to_string())
        .collect();
    panic!(
        "Record content mismatch (ignoring order):\n  Missing: {missing:?}\n  Extra: {extra:?}\n  Expected: {}\n  Actual: {}",
        render(expected),
        render(actual)
    );
}

/// Assert that every record satisfies `pred`.
///
/// # Panics
///
/// Panics with the first offending record.
pub fn assert_all_records<F: Fn(&Record) -> bool>(records: &[Record], pred: F) {
    if let Some((i, bad)) = records.iter().enumerate().find(|(_, r)| !pred(r)) {
        panic!("Record at index {i} does not satisfy the predicate: {bad}");
    }
}

fn counts(records: &[Record]) -> HashMap<&Record, usize> {
    let mut out = HashMap::new();
    for r in records {
        *out.entry(r).or_insert(0) += 1;
    }
    out
}

fn render(records: &[Record]) -> String {
    let parts: Vec<String> = records.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
