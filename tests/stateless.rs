// tests/stateless.rs
use anyhow::Result;
use rowflow::testing::*;
use rowflow::*;

#[test]
fn filter_keeps_matching_records_in_order() -> Result<()> {
    let out = Pipeline::from_records(numbered_records("n", 1..=10))
        .filter(|r| r.as_int("n") % 3 == 0)
        .collect()?;
    assert_records_equal(&out, &numbered_records("n", [3, 6, 9]));
    Ok(())
}

#[test]
fn filter_with_no_matches_is_empty() -> Result<()> {
    let out = Pipeline::from_records(numbered_records("n", 1..=10))
        .filter(|_| false)
        .collect()?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn map_applies_to_every_record() -> Result<()> {
    let out = Pipeline::from_records(numbered_records("n", 1..=3))
        .map(|r| r.set("sq", r.as_int("n") * r.as_int("n")))
        .collect()?;
    let sq: Vec<i64> = out.iter().map(|r| r.as_int("sq")).collect();
    assert_eq!(sq, vec![1, 4, 9]);
    assert_all_records(&out, |r| r.contains_key("n"));
    Ok(())
}

#[test]
fn map_composition_matches_composed_function() -> Result<()> {
    let f = |r: &Record| r.set("n", r.as_int("n") + 1);
    let g = |r: &Record| r.set("n", r.as_int("n") * 2);

    let chained = Pipeline::from_records(numbered_records("n", 1..=5))
        .map(f)
        .map(g)
        .collect()?;
    let fused = Pipeline::from_records(numbered_records("n", 1..=5))
        .map(move |r| g(&f(r)))
        .collect()?;
    assert_records_equal(&chained, &fused);
    Ok(())
}

#[test]
fn filter_then_map_on_text_fields() -> Result<()> {
    let out = Pipeline::from_records(sample_sales())
        .filter(|r| r.as_text("product") == "lamp")
        .map(|r| record! {"region" => r.as_text("region")})
        .collect()?;
    assert_records_equal(
        &out,
        &[record! {"region" => "north"}, record! {"region" => "east"}],
    );
    Ok(())
}

#[test]
fn stateless_operators_are_lazy() -> Result<()> {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let mut p = Pipeline::from_records(numbered_records("n", 1..=100)).map(move |r| {
        seen.fetch_add(1, Ordering::SeqCst);
        r.clone()
    });
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    p.next()?;
    p.next()?;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    Ok(())
}
