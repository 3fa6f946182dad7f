// tests/sorting.rs
use anyhow::Result;
use rowflow::testing::*;
use rowflow::*;

fn ints(records: &[Record], field: &str) -> Vec<i64> {
    records.iter().map(|r| r.as_int(field)).collect()
}

#[test]
fn numeric_sort_orders_ascending() -> Result<()> {
    let out = Pipeline::from_records(numbered_records("k", [3, 1, 2]))
        .sort_by("k", SortKind::Numeric)
        .collect()?;
    assert_eq!(ints(&out, "k"), vec![1, 2, 3]);
    Ok(())
}

#[test]
fn sorting_twice_is_idempotent() -> Result<()> {
    let once = Pipeline::from_records(numbered_records("k", [5, -2, 9, 0, 3]))
        .sort_int("k")
        .collect()?;
    let twice = Pipeline::from_records(once.clone()).sort_int("k").collect()?;
    assert_records_equal(&once, &twice);
    assert_eq!(ints(&once, "k"), vec![-2, 0, 3, 5, 9]);
    Ok(())
}

#[test]
fn numeric_sort_parses_text_and_zeroes_garbage() -> Result<()> {
    let out = Pipeline::from_records(vec![
        record! {"k" => "10"},
        record! {"k" => "9"},
        record! {"k" => "oops"},
        record! {"k" => -1},
    ])
    .sort_by("k", SortKind::Numeric)
    .collect()?;
    assert_eq!(ints(&out, "k"), vec![-1, 0, 9, 10]);
    Ok(())
}

#[test]
fn lexical_sort_compares_text_bytes() -> Result<()> {
    let out = Pipeline::from_records(vec![
        record! {"k" => "10"},
        record! {"k" => "9"},
        record! {"k" => "B"},
        record! {"k" => "a"},
    ])
    .sort_text("k")
    .collect()?;
    let keys: Vec<String> = out.iter().map(|r| r.as_text("k")).collect();
    assert_eq!(keys, vec!["10", "9", "B", "a"]);
    Ok(())
}

#[test]
fn lexical_sort_formats_integers() -> Result<()> {
    let out = Pipeline::from_records(numbered_records("k", [100, 20, 3]))
        .sort_by("k", SortKind::Lexical)
        .collect()?;
    assert_eq!(ints(&out, "k"), vec![100, 20, 3]);
    Ok(())
}

#[test]
fn missing_keys_sort_as_zero_values() -> Result<()> {
    let out = Pipeline::from_records(vec![
        record! {"k" => 5},
        record! {"other" => 1},
        record! {"k" => -5},
    ])
    .sort_by("k", SortKind::Numeric)
    .collect()?;
    assert_records_equal(
        &out,
        &[record! {"k" => -5}, record! {"other" => 1}, record! {"k" => 5}],
    );
    Ok(())
}

#[test]
fn sort_keeps_every_record_including_ties() -> Result<()> {
    let data = RecordsBuilder::new()
        .add_generated(20, |i| record! {"k" => (i % 3) as i64, "id" => i as i64})
        .build();
    let out = Pipeline::from_records(data.clone()).sort_int("k").collect()?;

    assert_records_unordered_equal(&out, &data);
    let keys = ints(&out, "k");
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    Ok(())
}

#[test]
fn sort_on_empty_input_is_empty() -> Result<()> {
    let out = Pipeline::from_records(Vec::new()).sort_int("k").collect()?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn default_sort_kind_is_numeric() {
    assert_eq!(SortKind::default(), SortKind::Numeric);
}
