//! CLI presentation: text formatting of generation results.

use crate::generate::GenerationSummary;
use owo_colors::OwoColorize;

pub fn format_generation_summary(summary: &GenerationSummary, color: bool) -> String {
    if summary.written.is_empty() {
        return "No descriptors generated.".to_string();
    }

    let title = format!("Generated {} descriptor(s):", summary.written.len());
    let mut lines = vec![if color {
        format!("{}", title.bold())
    } else {
        title
    }];
    for path in &summary.written {
        let path = path.display().to_string();
        if color {
            lines.push(format!("  {} {}", "✓".green(), path));
        } else {
            lines.push(format!("  - {}", path));
        }
    }
    lines.join("\n")
}
