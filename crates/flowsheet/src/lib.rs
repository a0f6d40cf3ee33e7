//! Flowsheet - turn a spreadsheet of process steps into a flowchart.
//!
//! The pipeline is linear: [`sheet`] reads one workbook column,
//! [`flowchart`] connects consecutive steps and classifies them into
//! flowchart shapes, and [`render`] emits Graphviz DOT for each rendering
//! variant and hands it to a layout engine that writes the image.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod app;
pub mod config;
pub mod error;
pub mod flowchart;
pub mod render;
pub mod sheet;

// Public CLI module (needed by binary)
pub mod cli;

pub mod output;
