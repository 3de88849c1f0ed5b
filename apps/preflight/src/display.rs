//! Output rendering and formatting

use preflight_bootstrap::BootstrapReport;
use std::io;

/// Completion line the hosting platform greps for
pub const SUCCESS_MESSAGE: &str = "✅ Build concluído com sucesso!";

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool) -> Self {
        Self { json_output }
    }

    /// Render the final bootstrap result.
    ///
    /// In text mode the completion message is always the last line written;
    /// in JSON mode a single machine-readable object replaces it.
    pub fn render_report(
        &self,
        report: &BootstrapReport,
        out: &mut impl io::Write,
    ) -> io::Result<()> {
        if self.json_output {
            let json = serde_json::json!({
                "status": "success",
                "steps_completed": report.steps_completed,
                "duration_ms": report.duration_ms,
                "message": SUCCESS_MESSAGE,
            });
            writeln!(out, "{json}")
        } else {
            writeln!(out, "{SUCCESS_MESSAGE}")
        }
    }
}
