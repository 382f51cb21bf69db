//! Output formatting for subnet plans and layouts.
//!
//! This module handles formatting and outputting:
//! - [`table`] - CSV-style plan table
//! - [`json`] - Network layout as JSON
//! - [`terminal`] - Terminal helpers

mod json;
mod table;
mod terminal;

pub use json::{default_layout_path, layout_json, write_layout};
pub use table::{plan_print, plan_rows, PlanPrintRow};
pub use terminal::{export_lines, format_field, print_exports};
