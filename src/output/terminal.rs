//! Terminal rendering with colors.

use colored::Colorize;

use crate::result::Comparison;

/// Format a comparison for human-readable terminal output.
///
/// Same content as the `Display` form, with the verdict colorized: yellow
/// when the medians differ, green when equality cannot be rejected.
pub fn format_comparison(comparison: &Comparison) -> String {
    let mut output = String::new();

    output.push_str(&comparison.a.to_string());
    output.push('\n');
    output.push_str(&comparison.b.to_string());
    output.push('\n');

    let verdict = if comparison.test.reject_equal_medians {
        comparison.verdict().yellow().bold().to_string()
    } else {
        comparison.verdict().green().to_string()
    };
    output.push_str(&verdict);
    output.push_str(&format!(
        " (U = {}, critical = {})",
        comparison.test.u, comparison.test.critical_value
    ));

    output
}
