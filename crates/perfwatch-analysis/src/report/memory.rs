//! Markdown reporter for a memory monitoring run.

use chrono::{DateTime, Local};
use perfwatch_core::constants::KB_PER_MB;
use perfwatch_core::errors::ReportError;

use super::{generated_line, Reporter};
use crate::classify::MonitorSnapshot;

#[derive(Debug, Clone, Default)]
pub struct MemoryMarkdownReporter {
    generated_at: Option<DateTime<Local>>,
}

impl MemoryMarkdownReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generated_at(mut self, at: DateTime<Local>) -> Self {
        self.generated_at = Some(at);
        self
    }
}

impl Reporter<MonitorSnapshot> for MemoryMarkdownReporter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn generate(&self, snapshot: &MonitorSnapshot) -> Result<String, ReportError> {
        let mut out = String::new();
        out.push_str("# Memory Leak Monitoring Report\n\n");
        out.push_str(&generated_line(self.generated_at.unwrap_or_else(Local::now)));

        let result = if snapshot.has_issues() { "❌ FAILED" } else { "✅ PASSED" };
        out.push_str(&format!("**Result:** {result}\n\n"));

        if snapshot.leaks.is_empty() {
            out.push_str("## ✅ No Memory Leaks Detected\n\n");
        } else {
            out.push_str("## ⚠️ Memory Leaks Detected\n\n");
            out.push_str(&format!("**Total Leaks:** {}\n\n", snapshot.leaks.len()));
            for leak in &snapshot.leaks {
                out.push_str(&format!("### {}\n\n", leak.test_name));
                out.push_str(&format!(
                    "- **Initial Memory:** {:.2} MB\n",
                    leak.initial_memory_kb / KB_PER_MB
                ));
                out.push_str(&format!(
                    "- **Final Memory:** {:.2} MB\n",
                    leak.final_memory_kb / KB_PER_MB
                ));
                out.push_str(&format!("- **Leaked:** {:.2} MB\n\n", leak.leaked_memory_mb));
            }
        }

        if !snapshot.excessive_usage.is_empty() {
            out.push_str("## ⚠️ Excessive Memory Usage\n\n");
            out.push_str(&format!("**Total Issues:** {}\n\n", snapshot.excessive_usage.len()));
            for issue in &snapshot.excessive_usage {
                out.push_str(&format!("### {}\n\n", issue.test_name));
                out.push_str(&format!("- **Memory Used:** {:.2} GB\n", issue.memory_gb));
                out.push_str(&format!("- **Threshold:** {:?} GB\n\n", issue.threshold_gb));
            }
        }

        if !snapshot.status_failures.is_empty() {
            out.push_str("## ⚠️ Memory Status Failures\n\n");
            out.push_str(&format!(
                "**Total Failures:** {}\n\n",
                snapshot.status_failures.len()
            ));
            for failure in &snapshot.status_failures {
                out.push_str(&format!(
                    "- Line {} (`{}`): {}\n",
                    failure.line_number,
                    failure.status.name(),
                    failure.line
                ));
            }
            out.push('\n');
        }

        Ok(out)
    }
}
