// tests/io_jsonl.rs
#![cfg(feature = "io-jsonl")]

use anyhow::Result;
use rowflow::testing::*;
use rowflow::*;

#[test]
fn reads_typed_values_and_skips_blank_lines() -> Result<()> {
    let src = JsonlSource::from_bytes("{\"id\":1,\"name\":\"ada\",\"ok\":true}\n\n   \n{\"id\":2}\n");
    let out = Pipeline::new(src).collect()?;
    assert_records_equal(
        &out,
        &[
            record! {"id" => 1, "name" => "ada", "ok" => true},
            record! {"id" => 2},
        ],
    );
    Ok(())
}

#[test]
fn unsupported_json_values_name_the_line() {
    let src = JsonlSource::from_bytes("{\"a\":1}\n\n{\"a\":1.5}\n");
    let err = Pipeline::new(src).collect().unwrap_err();
    assert!(format!("{err:#}").contains("line 3"), "{err:#}");
}

#[test]
fn malformed_json_is_an_error() {
    let src = JsonlSource::from_bytes("{\"a\":1\n");
    assert!(Pipeline::new(src).collect().is_err());
}

#[test]
fn clone_restarts_from_the_first_line() -> Result<()> {
    let mut src = JsonlSource::from_bytes("{\"n\":1}\n{\"n\":2}\n");
    src.next()?;
    let copy = src.clone_source();
    assert_eq!(Pipeline::new(src).collect()?.len(), 1);
    assert_eq!(Pipeline::new(copy).collect()?.len(), 2);
    Ok(())
}

#[test]
fn write_then_read_round_trip() -> Result<()> {
    let dir = TempDirPath::new()?;
    let path = dir.file_path("sales.jsonl");

    let n = Pipeline::from_records(sample_sales()).write_jsonl(&path)?;
    assert_eq!(n, 6);
    assert_jsonl_equals(&path, &sample_sales());

    let north = read_jsonl(&path)
        .filter(|r| r.as_text("region") == "north")
        .collect()?;
    assert_eq!(north.len(), 3);
    Ok(())
}

#[test]
fn written_lines_are_compact_objects() -> Result<()> {
    let file = mock_jsonl_file(&[record! {"b" => "x", "a" => 1}])?;
    assert_eq!(read_output(file.path()), "{\"a\":1,\"b\":\"x\"}\n");
    Ok(())
}

#[test]
fn failing_pipeline_writes_no_jsonl_file() {
    let dir = TempDirPath::new().unwrap();
    let path = dir.file_path("never.jsonl");
    assert!(Pipeline::new(FailingSource::new()).write_jsonl(&path).is_err());
    assert!(!path.exists());
}
