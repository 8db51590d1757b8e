//! Plain-text export of formatted summaries.
//!
//! The saved artifact is a simple header block followed by the summary
//! body; nothing downstream parses it back.

use chrono::Local;
use std::path::Path;

/// Width of the ruler separating the header block from the body.
const RULER_WIDTH: usize = 40;

/// Write the formatted summary to `path` under a small provenance header.
pub fn save_summary(path: &Path, origin: &str, body: &str) -> std::io::Result<()> {
    let mut out = String::new();
    out.push_str(&format!("来源：{}\n", origin));
    out.push_str(&format!(
        "生成时间：{}\n",
        Local::now().format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&"=".repeat(RULER_WIDTH));
    out.push('\n');
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    std::fs::write(path, out)
}
