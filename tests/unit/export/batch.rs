use std::io::Cursor;
use std::sync::Arc;

use super::*;
use crate::{OutputFormat, compose::RasterImage};

fn item(display_name: &str, rgba: [u8; 4]) -> ExportItem {
    let mut pixels = Vec::new();
    for _ in 0..16 * 16 {
        pixels.extend_from_slice(&rgba);
    }
    ExportItem {
        display_name: display_name.to_string(),
        image: RasterImage::from_rgba8(16, 16, pixels).unwrap(),
    }
}

// Dimensions that do not match the pixel buffer: composing this fails with
// a decode error, standing in for a corrupt source.
fn corrupt_item(display_name: &str) -> ExportItem {
    ExportItem {
        display_name: display_name.to_string(),
        image: RasterImage {
            width: 4,
            height: 4,
            rgba8: Arc::new(vec![0u8; 4]),
        },
    }
}

fn png_params() -> LayoutParams {
    LayoutParams::new(5.0, 1200, OutputFormat::Png)
}

fn archive_entries(output: &ExportOutput) -> (Vec<String>, usize) {
    match output {
        ExportOutput::Archive {
            file_name,
            bytes,
            entry_names,
        } => {
            assert_eq!(file_name, ARCHIVE_FILE_NAME);
            let archive = zip::ZipArchive::new(Cursor::new(bytes.clone())).unwrap();
            (entry_names.clone(), archive.len())
        }
        other => panic!("expected archive output, got {other:?}"),
    }
}

#[test]
fn empty_selection_yields_no_output() {
    let report = export_all(&[], &png_params(), &ExportOptions::default()).unwrap();
    assert!(report.output.is_none());
    assert!(report.failures.is_empty());
}

#[test]
fn single_item_yields_single_result_with_suggested_name() {
    let items = [item("holiday.jpeg", [255, 0, 0, 255])];
    let report = export_all(&items, &png_params(), &ExportOptions::default()).unwrap();
    assert!(report.failures.is_empty());
    match report.output.unwrap() {
        ExportOutput::Single { file_name, buffer } => {
            assert_eq!(file_name, "holiday.png");
            assert_eq!(buffer.format, OutputFormat::Png);
            let img = image::load_from_memory(&buffer.bytes).unwrap();
            assert_eq!((img.width(), img.height()), (1200, 1200));
        }
        other => panic!("expected single output, got {other:?}"),
    }
}

#[test]
fn single_item_failure_surfaces_directly() {
    let items = [corrupt_item("bad.png")];
    let err = export_all(&items, &png_params(), &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, MatboardError::Decode(_)), "got {err}");
}

#[test]
fn two_items_yield_an_archive_with_two_named_entries() {
    let items = [item("a.jpg", [255, 0, 0, 255]), item("b.jpg", [0, 255, 0, 255])];
    let report = export_all(&items, &png_params(), &ExportOptions::default()).unwrap();
    assert!(report.failures.is_empty());
    let (names, len) = archive_entries(&report.output.unwrap());
    assert_eq!(names, vec!["a.png", "b.png"]);
    assert_eq!(len, 2);
}

#[test]
fn sequential_and_parallel_agree_on_entry_names() {
    let items = [item("x.jpg", [1, 2, 3, 255]), item("y.jpg", [4, 5, 6, 255])];
    let sequential = ExportOptions {
        threading: ExportThreading {
            parallel: false,
            threads: None,
        },
        ..Default::default()
    };
    let a = export_all(&items, &png_params(), &sequential).unwrap();
    let b = export_all(&items, &png_params(), &ExportOptions::default()).unwrap();
    let (names_a, _) = archive_entries(&a.output.unwrap());
    let (names_b, _) = archive_entries(&b.output.unwrap());
    assert_eq!(names_a, names_b);
}

#[test]
fn stem_collisions_are_disambiguated_in_input_order() {
    let items = [item("a.jpg", [255, 0, 0, 255]), item("a.png", [0, 255, 0, 255])];
    let params = LayoutParams::new(5.0, 1200, OutputFormat::Jpeg);
    let report = export_all(&items, &params, &ExportOptions::default()).unwrap();
    let (names, _) = archive_entries(&report.output.unwrap());
    assert_eq!(names, vec!["a.jpg", "a-2.jpg"]);
}

#[test]
fn partial_success_enumerates_failures() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let items = [
        item("good-1.jpg", [255, 0, 0, 255]),
        corrupt_item("bad.png"),
        item("good-2.jpg", [0, 0, 255, 255]),
    ];
    let report = export_all(&items, &png_params(), &ExportOptions::default()).unwrap();

    let (names, len) = archive_entries(&report.output.unwrap());
    assert_eq!(names, vec!["good-1.png", "good-2.png"]);
    assert_eq!(len, 2);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].display_name, "bad.png");
    assert!(matches!(report.failures[0].error, MatboardError::Decode(_)));
}

#[test]
fn all_failures_yield_a_report_without_output() {
    let items = [corrupt_item("one.png"), corrupt_item("two.png")];
    let report = export_all(&items, &png_params(), &ExportOptions::default()).unwrap();
    assert!(report.output.is_none());
    assert_eq!(report.failures.len(), 2);
}

#[test]
fn raised_cancel_flag_aborts_the_run() {
    let cancel = CancelFlag::new();
    cancel.cancel();
    let progress = ProgressFlag::new();
    let opts = ExportOptions {
        cancel: Some(cancel),
        progress: Some(progress.clone()),
        ..Default::default()
    };

    let items = [item("a.jpg", [255, 0, 0, 255]), item("b.jpg", [0, 255, 0, 255])];
    let err = export_all(&items, &png_params(), &opts).unwrap_err();
    assert!(matches!(err, MatboardError::Cancelled), "got {err}");
    // The busy flag is lowered on the error path too.
    assert!(!progress.is_busy());
}

#[test]
fn zero_worker_threads_is_rejected() {
    let opts = ExportOptions {
        threading: ExportThreading {
            parallel: true,
            threads: Some(0),
        },
        ..Default::default()
    };
    let items = [item("a.jpg", [255, 0, 0, 255]), item("b.jpg", [0, 255, 0, 255])];
    let err = export_all(&items, &png_params(), &opts).unwrap_err();
    assert!(matches!(err, MatboardError::Validation(_)), "got {err}");
}

#[test]
fn progress_flag_is_lowered_after_a_successful_run() {
    let progress = ProgressFlag::new();
    let opts = ExportOptions {
        progress: Some(progress.clone()),
        ..Default::default()
    };
    let items = [item("a.jpg", [255, 0, 0, 255]), item("b.jpg", [0, 255, 0, 255])];
    export_all(&items, &png_params(), &opts).unwrap();
    assert!(!progress.is_busy());
}
