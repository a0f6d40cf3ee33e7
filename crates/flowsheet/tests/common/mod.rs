//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use flowsheet::error::{Error, Result};
use flowsheet::render::{Layout, LayoutEngine, LayoutRequest};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Mutex;

/// Column the fixtures put their steps in (column B).
pub const STEP_COLUMN: u16 = 1;

/// Write a workbook whose `sheet` has a header row followed by one row per
/// step in column B. Empty strings leave the cell blank.
pub fn write_workbook(path: &Path, sheet: &str, steps: &[&str]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).expect("valid sheet name");
    worksheet.write_string(0, 0, "Id").unwrap();
    worksheet.write_string(0, STEP_COLUMN, "Step").unwrap();

    for (i, step) in steps.iter().enumerate() {
        let row = u32::try_from(i + 1).unwrap();
        worksheet.write_number(row, 0, f64::from(row)).unwrap();
        if !step.is_empty() {
            worksheet.write_string(row, STEP_COLUMN, *step).unwrap();
        }
    }

    workbook.save(path).expect("Failed to save workbook");
}

/// Write `demo.xlsx` with a default `Sheet1` into `dir` and return its path.
pub fn write_demo(dir: &Path, steps: &[&str]) -> PathBuf {
    let path = dir.join("demo.xlsx");
    write_workbook(&path, "Sheet1", steps);
    path
}

/// Run the flowsheet binary in the specified directory with colors disabled.
pub fn run_flowsheet_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flowsheet"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute flowsheet binary")
}

/// Whether Graphviz's `dot` can be started.
pub fn graphviz_available() -> bool {
    Command::new("dot").arg("-V").output().is_ok()
}

/// Layout engine that records what it was asked to do and writes the DOT
/// source in place of an image.
#[derive(Debug, Default)]
pub struct CapturingEngine {
    pub calls: Mutex<Vec<(Layout, String, PathBuf)>>,
}

impl CapturingEngine {
    pub fn calls(&self) -> Vec<(Layout, String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LayoutEngine for CapturingEngine {
    async fn render(&self, request: &LayoutRequest<'_>) -> Result<()> {
        std::fs::write(request.output, request.dot).map_err(|source| {
            Error::OutputWriteFailed {
                path: request.output.to_path_buf(),
                source,
            }
        })?;
        self.calls.lock().unwrap().push((
            request.layout,
            request.dot.to_string(),
            request.output.to_path_buf(),
        ));
        Ok(())
    }
}
