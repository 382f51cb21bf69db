//! Terminal output utilities.

use crate::layout::LayoutExports;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// Values longer than `width` are quoted but not truncated.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

/// Lines describing the stack exports, as printed by [`print_exports`].
pub fn export_lines(exports: &LayoutExports) -> Vec<String> {
    vec![
        format!("vpcId: {}", exports.vpc_id),
        format!("publicSubnetIds: [{}]", exports.public_subnet_ids.join(", ")),
        format!("privateSubnetIds: [{}]", exports.private_subnet_ids.join(", ")),
    ]
}

/// Print the stack exports to stdout.
pub fn print_exports(exports: &LayoutExports) {
    println!("{}", "Exports:".bold());
    for line in export_lines(exports) {
        println!("  {line}");
    }
}
