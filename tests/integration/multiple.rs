//! Integration tests for `multiple`.

use pdfsplice::SpliceError;

use crate::common::{Workspace, labels_of, quiet_merger, write};

#[tokio::test]
async fn test_concatenate_in_argument_order() {
    let ws = Workspace::new();
    let f1 = ws.pdf("f1.pdf", &["x1"]);
    let f2 = ws.pdf("f2.pdf", &["y1", "y2"]);
    let f3 = ws.pdf("f3.pdf", &["z1"]);
    let output = ws.path("combined.pdf");

    let merger = quiet_merger();
    let result = merger.concatenate_all(&[f3, f1, f2]).await.unwrap();
    write(&merger, &result, &output).await;

    assert_eq!(labels_of(&output).await, vec!["z1", "x1", "y1", "y2"]);
    assert_eq!(result.statistics.files_merged, 3);
    assert!(result.skipped.is_empty());
}

#[tokio::test]
async fn test_missing_input_is_skipped() {
    let ws = Workspace::new();
    let f1 = ws.pdf("f1.pdf", &["x1", "x2"]);
    let f2 = ws.path("f2.pdf");
    let f3 = ws.pdf("f3.pdf", &["z1"]);
    let output = ws.path("out.pdf");

    let merger = quiet_merger();
    let result = merger
        .concatenate_all(&[f1, f2.clone(), f3])
        .await
        .unwrap();
    write(&merger, &result, &output).await;

    assert_eq!(labels_of(&output).await, vec!["x1", "x2", "z1"]);
    assert_eq!(result.skipped, vec![f2]);
    assert_eq!(result.statistics.files_skipped, 1);
}

#[tokio::test]
async fn test_unreadable_input_aborts() {
    let ws = Workspace::new();
    let good = ws.pdf("good.pdf", &["g1"]);
    let bad = ws.garbage("bad.pdf");

    let err = quiet_merger()
        .concatenate_all(&[good, bad])
        .await
        .unwrap_err();

    assert!(matches!(err, SpliceError::FailedToLoadPdf { .. }));
}

#[tokio::test]
async fn test_same_file_twice() {
    let ws = Workspace::new();
    let f1 = ws.pdf("f1.pdf", &["a", "b"]);
    let output = ws.path("out.pdf");

    let merger = quiet_merger();
    let result = merger.concatenate_all(&[f1.clone(), f1]).await.unwrap();
    write(&merger, &result, &output).await;

    assert_eq!(labels_of(&output).await, vec!["a", "b", "a", "b"]);
}

#[tokio::test]
async fn test_glob_pattern_expands_sorted() {
    let ws = Workspace::new();
    ws.pdf("part-2.pdf", &["second"]);
    ws.pdf("part-1.pdf", &["first"]);
    ws.pdf("other.pdf", &["ignored"]);
    let output = ws.path("out.pdf");

    let merger = quiet_merger();
    let result = merger
        .concatenate_all(&[ws.path("part-*.pdf")])
        .await
        .unwrap();
    write(&merger, &result, &output).await;

    assert_eq!(labels_of(&output).await, vec!["first", "second"]);
}

#[tokio::test]
async fn test_unmatched_pattern_is_skipped() {
    let ws = Workspace::new();
    let f1 = ws.pdf("f1.pdf", &["a"]);
    let pattern = ws.path("nothing-*.pdf");

    let result = quiet_merger()
        .concatenate_all(&[pattern.clone(), f1])
        .await
        .unwrap();

    assert_eq!(result.plan.len(), 1);
    assert_eq!(result.skipped, vec![pattern]);
}

#[tokio::test]
async fn test_all_inputs_missing_writes_empty_document() {
    let ws = Workspace::new();
    let output = ws.path("out.pdf");

    let merger = quiet_merger();
    let result = merger
        .concatenate_all(&[ws.path("a.pdf"), ws.path("b.pdf")])
        .await
        .unwrap();
    write(&merger, &result, &output).await;

    assert_eq!(result.skipped.len(), 2);
    assert!(labels_of(&output).await.is_empty());
}
