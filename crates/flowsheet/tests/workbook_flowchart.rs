//! Integration tests that build flowcharts from real workbook files.

use flowsheet::app::App;
use flowsheet::config::Settings;
use flowsheet::error::Error;
use flowsheet::flowchart::{BuildOptions, Flowchart, NodeKind};
use flowsheet::render::{Layout, Variant};
use flowsheet::sheet::read_steps;
use rstest::{fixture, rstest};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

mod common;
use common::{write_demo, write_workbook, CapturingEngine};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

// ============================================================================
// Reading
// ============================================================================

#[rstest]
fn test_read_steps_skips_header(temp_dir: TempDir) {
    let path = write_demo(temp_dir.path(), &["A", "B", "", "C"]);

    let steps = read_steps(&path, "Sheet1", 1).unwrap();
    assert_eq!(
        steps,
        vec![
            Some("A".to_string()),
            Some("B".to_string()),
            None,
            Some("C".to_string())
        ]
    );
}

#[rstest]
fn test_missing_sheet_lists_available(temp_dir: TempDir) {
    let path = temp_dir.path().join("steps.xlsx");
    write_workbook(&path, "Process", &["A", "B"]);

    match read_steps(&path, "Sheet1", 1) {
        Err(Error::SheetNotFound { sheet, available }) => {
            assert_eq!(sheet, "Sheet1");
            assert_eq!(available, vec!["Process".to_string()]);
        }
        other => panic!("Expected SheetNotFound, got {other:?}"),
    }
}

#[rstest]
fn test_missing_workbook(temp_dir: TempDir) {
    let result = read_steps(&temp_dir.path().join("absent.xlsx"), "Sheet1", 1);
    assert!(matches!(result, Err(Error::InputNotFound(_))));
}

#[rstest]
fn test_unparseable_workbook(temp_dir: TempDir) {
    let path = temp_dir.path().join("broken.xlsx");
    std::fs::write(&path, "this is not a zip archive").unwrap();

    let result = read_steps(&path, "Sheet1", 1);
    assert!(matches!(result, Err(Error::Spreadsheet(_))));
}

#[rstest]
fn test_numeric_cells_become_labels(temp_dir: TempDir) {
    let path = temp_dir.path().join("numbers.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1").unwrap();
    sheet.write_string(0, 1, "Step").unwrap();
    sheet.write_number(1, 1, 1.0).unwrap();
    sheet.write_number(2, 1, 2.5).unwrap();
    sheet.write_string(3, 1, "1").unwrap();
    workbook.save(&path).unwrap();

    let flowchart = Flowchart::from_workbook(&path, "Sheet1", 1, BuildOptions::default()).unwrap();

    // The number 1 and the text "1" are the same step.
    assert_eq!(flowchart.nodes().collect::<Vec<_>>(), vec!["1", "2.5"]);
    assert!(flowchart.contains_edge("1", "2.5"));
    assert!(flowchart.contains_edge("2.5", "1"));
}

#[rstest]
fn test_other_column(temp_dir: TempDir) {
    let path = write_demo(temp_dir.path(), &["A", "B", "C"]);

    // Column A holds the row ids 1, 2, 3.
    let flowchart = Flowchart::from_workbook(&path, "Sheet1", 0, BuildOptions::default()).unwrap();
    assert_eq!(
        flowchart.edges().collect::<Vec<_>>(),
        vec![("1", "2"), ("2", "3")]
    );
}

// ============================================================================
// Building and classifying
// ============================================================================

#[rstest]
fn test_reference_sequence_keeps_self_loop(temp_dir: TempDir) {
    let path = write_demo(temp_dir.path(), &["A", "B", "B", "C", "", "D", "A"]);

    let flowchart = Flowchart::from_workbook(&path, "Sheet1", 1, BuildOptions::default()).unwrap();
    assert_eq!(
        flowchart.edges().collect::<Vec<_>>(),
        vec![("A", "B"), ("B", "B"), ("B", "C"), ("D", "A")]
    );

    let classification = flowchart.classify();
    assert_eq!(classification.decision, vec!["B"]);
    assert_eq!(classification.process, vec!["A"]);
    assert_eq!(classification.connector, vec!["C", "D"]);
}

#[rstest]
fn test_reference_sequence_without_self_loops(temp_dir: TempDir) {
    let path = write_demo(temp_dir.path(), &["A", "B", "B", "C", "", "D", "A"]);
    let options = BuildOptions {
        skip_self_loops: true,
    };

    let flowchart = Flowchart::from_workbook(&path, "Sheet1", 1, options).unwrap();
    assert_eq!(
        flowchart.edges().collect::<Vec<_>>(),
        vec![("A", "B"), ("B", "C"), ("D", "A")]
    );

    let classification = flowchart.classify();
    assert_eq!(classification.process, vec!["A", "B"]);
    assert_eq!(classification.connector, vec!["C", "D"]);
    assert!(classification.decision.is_empty());
}

#[rstest]
fn test_branching_process(temp_dir: TempDir) {
    let path = write_demo(
        temp_dir.path(),
        &[
            "Receive order",
            "In stock?",
            "Ship",
            "Close",
            "",
            "In stock?",
            "Backorder",
            "Ship",
        ],
    );

    let classification = Flowchart::from_workbook(&path, "Sheet1", 1, BuildOptions::default())
        .unwrap()
        .classify();

    assert_eq!(classification.kind_of("In stock?"), Some(NodeKind::Decision));
    assert_eq!(classification.kind_of("Receive order"), Some(NodeKind::Connector));
    assert_eq!(classification.kind_of("Ship"), Some(NodeKind::Process));
    assert_eq!(classification.kind_of("Backorder"), Some(NodeKind::Process));
    assert_eq!(classification.kind_of("Close"), Some(NodeKind::Connector));
}

// ============================================================================
// End to end through App
// ============================================================================

#[rstest]
#[tokio::test]
async fn test_app_renders_all_variants(temp_dir: TempDir) {
    let input = write_demo(temp_dir.path(), &["Start", "Check", "Done", "", "Check", "Retry"]);
    let settings = Settings {
        input,
        output_dir: temp_dir.path().join("charts"),
        ..Settings::default()
    };
    let app = App::load(settings).unwrap();
    let engine = CapturingEngine::default();

    let images = app.render(&engine).await.unwrap();

    assert_eq!(images.len(), Variant::ALL.len());
    let calls = engine.calls();
    assert_eq!(calls[0].0, Layout::Neato);
    assert_eq!(calls[3].0, Layout::Fdp);
    assert_eq!(calls[2].2, temp_dir.path().join("charts").join("flowchart.png"));
    assert!(calls[2].1.contains("label=\"Check\", shape=diamond"));
    for image in &images {
        assert!(image.path.exists());
    }
}
