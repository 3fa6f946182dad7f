// tests/pipeline.rs
use anyhow::Result;
use rowflow::testing::*;
use rowflow::*;

#[test]
fn identity_pipeline_yields_source_in_order() -> Result<()> {
    let data = numbered_records("n", 1..=5);
    let out = Pipeline::from_records(data.clone()).collect()?;
    assert_records_equal(&out, &data);
    Ok(())
}

#[test]
fn empty_source_collects_to_empty() -> Result<()> {
    let out = Pipeline::from_records(Vec::new()).collect()?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn exhaustion_is_sticky() -> Result<()> {
    let mut p = Pipeline::from_records(numbered_records("n", [1]));
    assert!(p.next()?.is_some());
    assert!(p.next()?.is_none());
    assert!(p.next()?.is_none());
    Ok(())
}

#[test]
fn memory_source_clone_is_a_snapshot() -> Result<()> {
    let mut src = MemorySource::new(numbered_records("n", 1..=4));
    assert_eq!(src.next()?.map(|r| r.as_int("n")), Some(1));

    let mut copy = src.clone_source();
    let mut rest_original = Vec::new();
    while let Some(r) = src.next()? {
        rest_original.push(r);
    }
    let mut rest_copy = Vec::new();
    while let Some(r) = copy.next()? {
        rest_copy.push(r);
    }

    let expected = numbered_records("n", 2..=4);
    assert_records_equal(&rest_original, &expected);
    assert_records_equal(&rest_copy, &expected);
    Ok(())
}

#[test]
fn pipeline_clone_mid_stream_yields_the_remainder() -> Result<()> {
    let mut p = Pipeline::from_records(numbered_records("n", 1..=3)).map(|r| r.set("seen", true));
    let first = p.next()?;
    assert_eq!(first.map(|r| r.as_int("n")), Some(1));

    let copy = p.clone();
    let a = p.collect()?;
    let b = copy.collect()?;
    assert_eq!(a, b);
    assert_eq!(a.iter().map(|r| r.as_int("n")).collect::<Vec<_>>(), vec![2, 3]);
    Ok(())
}

#[test]
fn clone_of_reduce_has_independent_state() -> Result<()> {
    let p = Pipeline::from_records(numbered_records("foo", 1..=3))
        .reduce(|acc, r| acc.set("foo", acc.as_int("foo") + r.as_int("foo")));
    let copy = p.clone();

    assert_records_equal(&p.collect()?, &[record! {"foo" => 6}]);
    assert_records_equal(&copy.collect()?, &[record! {"foo" => 6}]);
    Ok(())
}

#[test]
fn draining_a_clone_does_not_disturb_the_original() -> Result<()> {
    let p = Pipeline::from_records(sample_sales()).sort_by("amount", SortKind::Numeric);
    let first = p.clone().collect()?;
    let second = p.collect()?;
    assert_records_equal(&first, &second);
    Ok(())
}

#[test]
fn into_iterator_yields_results() -> Result<()> {
    let p = Pipeline::from_records(numbered_records("n", 1..=3));
    let ns = p
        .into_iter()
        .map(|r| r.map(|r| r.as_int("n")))
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(ns, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn into_iterator_stops_after_first_error() {
    let mut it = Pipeline::new(FailAfter::new(numbered_records("n", [1]))).into_iter();
    assert!(matches!(it.next(), Some(Ok(_))));
    assert!(matches!(it.next(), Some(Err(_))));
    assert!(it.next().is_none());
    assert!(it.next().is_none());
}

#[test]
fn pipeline_feeds_another_pipeline() -> Result<()> {
    let inner = Pipeline::from_records(numbered_records("n", 1..=4)).filter(|r| r.as_int("n") > 2);
    let outer = Pipeline::new(inner).map(|r| r.set("n", r.as_int("n") * 10));
    let out = outer.collect()?;
    assert_records_equal(&out, &numbered_records("n", [30, 40]));
    Ok(())
}

/// Emits every record twice.
#[derive(Default)]
struct Duplicate {
    pending: Option<Record>,
}

impl Transform for Duplicate {
    fn name(&self) -> &'static str {
        "duplicate"
    }

    fn step(&mut self, input: &mut dyn Source) -> Result<Option<Record>> {
        if let Some(rec) = self.pending.take() {
            return Ok(Some(rec));
        }
        let next = input.next()?;
        self.pending.clone_from(&next);
        Ok(next)
    }

    fn fresh(&self) -> Box<dyn Transform> {
        Box::new(Duplicate::default())
    }
}

#[test]
fn custom_transform_plugs_in() -> Result<()> {
    let p = Pipeline::from_records(numbered_records("n", [1, 2])).transform(Duplicate::default());
    assert_eq!(format!("{p:?}"), r#"Pipeline { transform: Some("duplicate"), .. }"#);

    let out = p.collect()?;
    assert_records_equal(&out, &numbered_records("n", [1, 1, 2, 2]));
    Ok(())
}

#[test]
fn clone_can_be_drained_on_another_thread() -> Result<()> {
    let p = Pipeline::from_records(numbered_records("n", 1..=100))
        .filter(|r| r.as_int("n") % 10 == 0)
        .sort_by("n", SortKind::Numeric);
    let copy = p.clone();

    let handle = std::thread::spawn(move || copy.collect());
    let here = p.collect()?;
    let there = handle
        .join()
        .map_err(|_| anyhow::anyhow!("worker panicked"))??;

    assert_eq!(here.len(), 10);
    assert_records_equal(&here, &there);
    Ok(())
}

#[test]
fn from_vec_and_from_iter_build_pipelines() -> Result<()> {
    let a = from_vec(numbered_records("n", [1, 2])).collect()?;
    let b = from_iter(numbered_records("n", [1, 2])).collect()?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn clone_after_sort_started_keeps_the_sorted_remainder() -> Result<()> {
    let mut p = Pipeline::from_records(numbered_records("k", [3, 1, 2])).sort_int("k");
    assert_eq!(p.next()?.map(|r| r.as_int("k")), Some(1));

    let copy = p.clone();
    let expected = numbered_records("k", [2, 3]);
    assert_records_equal(&p.collect()?, &expected);
    assert_records_equal(&copy.collect()?, &expected);
    Ok(())
}

#[test]
fn clone_after_grouping_started_keeps_the_remaining_groups() -> Result<()> {
    let mut p = Pipeline::from_records(sample_sales())
        .reduce_by_key("region", |acc, r| acc.set("amount", acc.as_int("amount") + r.as_int("amount")));
    assert!(p.next()?.is_some());

    let copy = p.clone();
    let rest = p.collect()?;
    assert_eq!(rest.len(), 2);
    assert_records_equal(&copy.collect()?, &rest);
    Ok(())
}

#[test]
fn clone_after_reduce_emitted_is_exhausted_too() -> Result<()> {
    let mut p = Pipeline::from_records(numbered_records("n", 1..=3))
        .reduce(|acc, r| acc.set("n", acc.as_int("n") + r.as_int("n")));
    assert!(p.next()?.is_some());
    assert!(p.clone().collect()?.is_empty());
    Ok(())
}

#[test]
fn clone_after_concat_switched_sides_continues_on_the_second() -> Result<()> {
    let mut p = Pipeline::from_records(numbered_records("n", [1, 2]))
        .concat(Pipeline::from_records(numbered_records("n", [3, 4])));
    for _ in 0..3 {
        assert!(p.next()?.is_some());
    }

    let copy = p.clone();
    assert_records_equal(&p.collect()?, &numbered_records("n", [4]));
    assert_records_equal(&copy.collect()?, &numbered_records("n", [4]));
    Ok(())
}

#[test]
fn clone_after_sort_started_drains_on_another_thread() -> Result<()> {
    let mut p = Pipeline::from_records(numbered_records("n", (1..=50).rev())).sort_int("n");
    assert!(p.next()?.is_some());
    let copy = p.clone();

    let handle = std::thread::spawn(move || copy.collect());
    let here = p.collect()?;
    let there = handle
        .join()
        .map_err(|_| anyhow::anyhow!("worker panicked"))??;

    assert_eq!(here.len(), 49);
    assert_records_equal(&here, &there);
    Ok(())
}
