// tests/combine.rs
use anyhow::Result;
use rowflow::testing::*;
use rowflow::*;

fn sum_field(field: &'static str) -> impl Fn(&Record, &Record) -> Record + Send + Sync + 'static {
    move |acc: &Record, r: &Record| acc.set(field, acc.as_int(field) + r.as_int(field))
}

#[test]
fn reduce_sums_all_records() -> Result<()> {
    let out = Pipeline::from_records(numbered_records("foo", 1..=3))
        .reduce(sum_field("foo"))
        .collect()?;
    assert_records_equal(&out, &[record! {"foo" => 6}]);
    Ok(())
}

#[test]
fn reduce_seeds_with_first_record() -> Result<()> {
    let out = Pipeline::from_records(vec![
        record! {"n" => 1, "first" => true},
        record! {"n" => 2},
    ])
    .reduce(sum_field("n"))
    .collect()?;
    assert_records_equal(&out, &[record! {"n" => 3, "first" => true}]);
    Ok(())
}

#[test]
fn reduce_on_empty_input_emits_nothing() -> Result<()> {
    let out = Pipeline::from_records(Vec::new())
        .reduce(sum_field("n"))
        .collect()?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn reduce_on_single_record_returns_it_unchanged() -> Result<()> {
    let out = Pipeline::from_records(vec![record! {"n" => 7, "tag" => "x"}])
        .reduce(|_, _| record! {"never" => "called"})
        .collect()?;
    assert_records_equal(&out, &[record! {"n" => 7, "tag" => "x"}]);
    Ok(())
}

#[test]
fn reduce_exhausts_after_its_one_record() -> Result<()> {
    let mut p = Pipeline::from_records(numbered_records("n", 1..=3)).reduce(sum_field("n"));
    assert!(p.next()?.is_some());
    assert!(p.next()?.is_none());
    assert!(p.next()?.is_none());
    Ok(())
}

#[test]
fn reduce_by_key_folds_each_group() -> Result<()> {
    let out = Pipeline::from_records(sample_sales())
        .map(|r| record! {"region" => r.as_text("region"), "amount" => r.as_int("amount")})
        .reduce_by_key("region", sum_field("amount"))
        .collect()?;

    assert_records_unordered_equal(
        &out,
        &[
            record! {"region" => "north", "amount" => 54},
            record! {"region" => "south", "amount" => 55},
            record! {"region" => "east", "amount" => 9},
        ],
    );
    Ok(())
}

#[test]
fn reduce_by_key_is_independent_of_input_order_after_sort() -> Result<()> {
    let forward = sample_sales();
    let mut backward = sample_sales();
    backward.reverse();

    let run = |data: Vec<Record>| {
        Pipeline::from_records(data)
            .map(|r| record! {"region" => r.as_text("region"), "amount" => r.as_int("amount")})
            .reduce_by_key("region", sum_field("amount"))
            .sort_by("region", SortKind::Lexical)
            .collect()
    };

    assert_records_equal(&run(forward)?, &run(backward)?);
    Ok(())
}

#[test]
fn reduce_by_key_distinguishes_value_kinds() -> Result<()> {
    let out = Pipeline::from_records(vec![
        record! {"k" => 1, "n" => 1},
        record! {"k" => "1", "n" => 10},
        record! {"k" => 1, "n" => 100},
    ])
    .reduce_by_key("k", sum_field("n"))
    .collect()?;

    assert_records_unordered_equal(
        &out,
        &[record! {"k" => 1, "n" => 101}, record! {"k" => "1", "n" => 10}],
    );
    Ok(())
}

#[test]
fn records_missing_the_key_form_one_group() -> Result<()> {
    let out = Pipeline::from_records(vec![
        record! {"n" => 1},
        record! {"k" => "a", "n" => 2},
        record! {"n" => 3},
    ])
    .reduce_by_key("k", sum_field("n"))
    .collect()?;

    assert_records_unordered_equal(
        &out,
        &[record! {"n" => 4}, record! {"k" => "a", "n" => 2}],
    );
    Ok(())
}

#[test]
fn reduce_by_key_on_empty_input_emits_nothing() -> Result<()> {
    let out = Pipeline::from_records(Vec::new())
        .reduce_by_key("k", sum_field("n"))
        .collect()?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn reduce_by_key_emits_one_record_per_distinct_key() -> Result<()> {
    let data = RecordsBuilder::new()
        .add_generated(50, |i| record! {"k" => (i % 7) as i64, "n" => 1})
        .build();
    let out = Pipeline::from_records(data)
        .reduce_by_key("k", sum_field("n"))
        .sort_by("k", SortKind::Numeric)
        .collect()?;

    assert_eq!(out.len(), 7);
    let total: i64 = out.iter().map(|r| r.as_int("n")).sum();
    assert_eq!(total, 50);
    Ok(())
}
