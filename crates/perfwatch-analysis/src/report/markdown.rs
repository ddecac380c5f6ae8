//! Markdown reporter for regression analysis.

use chrono::{DateTime, Local};
use perfwatch_core::errors::ReportError;

use super::{generated_line, Reporter};
use crate::aggregate::{AnalysisReport, RunStatus};
use crate::regression::{policy_for, MetricComparison, RegressionVerdict};

/// Which bucket a section is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Regression,
    Improvement,
}

#[derive(Debug, Clone, Default)]
pub struct RegressionMarkdownReporter {
    generated_at: Option<DateTime<Local>>,
}

impl RegressionMarkdownReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the generated timestamp instead of reading the clock.
    pub fn with_generated_at(mut self, at: DateTime<Local>) -> Self {
        self.generated_at = Some(at);
        self
    }

    fn write_benchmark(&self, out: &mut String, verdict: &RegressionVerdict, section: Section) {
        out.push_str(&format!("### {}\n\n", verdict.benchmark_key));
        for change in &verdict.changes {
            let listed = match section {
                Section::Regression => change.is_regression,
                Section::Improvement => !change.is_regression,
            };
            if listed {
                write_change(out, change);
            }
        }
    }
}

fn write_change(out: &mut String, change: &MetricComparison) {
    let precision = policy_for(&change.metric).precision;
    let icon = if change.is_regression { "⚠️" } else { "✅" };
    let arrow = if change.change_pct < 0.0 { "↓" } else { "↑" };

    out.push_str(&format!("{icon} **{}**:\n", change.name));
    out.push_str(&format!(
        "- Baseline: {:.precision$} {}\n",
        change.baseline, change.unit
    ));
    out.push_str(&format!(
        "- Current: {:.precision$} {}\n",
        change.current, change.unit
    ));
    out.push_str(&format!("- Change: {arrow} {:.2}%\n\n", change.change_pct.abs()));
}

impl Reporter<AnalysisReport> for RegressionMarkdownReporter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn generate(&self, report: &AnalysisReport) -> Result<String, ReportError> {
        let mut out = String::new();
        out.push_str("# Performance Regression Analysis Report\n\n");
        out.push_str(&generated_line(self.generated_at.unwrap_or_else(Local::now)));
        out.push_str(&format!("**Threshold:** {:?}%\n\n", report.threshold));

        let summary = &report.summary;
        out.push_str("## Summary\n\n");
        out.push_str(&format!("- **Total Benchmarks Compared:** {}\n", summary.total_benchmarks));
        out.push_str(&format!("- **Regressions Found:** {}\n", summary.regressions_found));
        out.push_str(&format!("- **Improvements Found:** {}\n", summary.improvements_found));
        out.push_str(&format!("- **Stable Benchmarks:** {}\n", summary.stable_benchmarks));
        if summary.unmatched_benchmarks > 0 {
            out.push_str(&format!("- **Unmatched Baselines:** {}\n", summary.unmatched_benchmarks));
        }
        out.push('\n');

        let message = report.message.as_deref().unwrap_or_default();
        match report.status {
            RunStatus::Regression => {
                out.push_str("## ⚠️ Performance Regressions Detected\n\n");
                for verdict in &report.regressions {
                    self.write_benchmark(&mut out, verdict, Section::Regression);
                }
            }
            RunStatus::NoBaseline => {
                out.push_str("## ℹ️ No Baseline Available\n\n");
                out.push_str(&format!("{message}\n\n"));
            }
            RunStatus::Error => {
                out.push_str("## ❌ Comparison Failed\n\n");
                out.push_str(&format!("{message}\n\n"));
            }
            RunStatus::Pass => out.push_str("## ✅ No Performance Regressions Detected\n\n"),
        }

        if !report.improvements.is_empty() {
            out.push_str("## 📈 Performance Improvements\n\n");
            for verdict in &report.improvements {
                self.write_benchmark(&mut out, verdict, Section::Improvement);
            }
        }

        if !report.stable.is_empty() {
            out.push_str("## 📊 Stable Performance\n\n");
            out.push_str(&format!(
                "**{} benchmarks** showed stable performance (within ±{:?}% threshold).\n\n",
                report.stable.len(),
                report.threshold
            ));
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::analyze;
    use chrono::TimeZone;
    use perfwatch_core::types::BenchmarkRecord;

    fn run(avg_ts: f64, avg_ns: f64) -> BenchmarkRecord {
        BenchmarkRecord::new()
            .with("model_type", "llama-7b")
            .with("backends", "cpu")
            .with("n_prompt", 128_i64)
            .with("n_gen", 128_i64)
            .with("avg_ts", avg_ts)
            .with("avg_ns", avg_ns)
    }

    fn reporter() -> RegressionMarkdownReporter {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        RegressionMarkdownReporter::new().with_generated_at(at)
    }

    #[test]
    fn regression_section_lists_only_regressing_metrics() {
        // Throughput drops 20%, latency improves 10%.
        let report = analyze(&[run(50.0, 2e7)], &[run(40.0, 1.8e7)], 5.0);
        let md = reporter().generate(&report).unwrap();

        assert!(md.starts_with("# Performance Regression Analysis Report\n\n"));
        assert!(md.contains("**Generated:** 2024-05-01 12:30:00\n"));
        assert!(md.contains("**Threshold:** 5.0%\n"));
        assert!(md.contains("## ⚠️ Performance Regressions Detected\n\n"));
        assert!(md.contains("### llama-7b | backend:cpu | p:128 | g:128\n\n"));
        assert!(md.contains("⚠️ **Average Tokens/Second**:\n- Baseline: 50.00 tokens/s\n- Current: 40.00 tokens/s\n- Change: ↓ 20.00%\n"));
        assert!(!md.contains("Average Latency"));
    }

    #[test]
    fn improvement_and_stable_sections() {
        let baseline = vec![run(100.0, 1e6), run(100.0, 1e6).with("n_gen", 256_i64)];
        let current = vec![run(110.0, 1e6), run(100.0, 1e6).with("n_gen", 256_i64)];
        let report = analyze(&baseline, &current, 5.0);
        let md = reporter().generate(&report).unwrap();

        assert!(md.contains("## ✅ No Performance Regressions Detected\n\n"));
        assert!(md.contains("## 📈 Performance Improvements\n\n"));
        assert!(md.contains("✅ **Average Tokens/Second**:\n"));
        assert!(md.contains("- Change: ↑ 10.00%\n"));
        assert!(md.contains("- Baseline: 1000000 ns\n"));
        assert!(md.contains("**1 benchmarks** showed stable performance (within ±5.0% threshold).\n"));
    }

    #[test]
    fn no_baseline_banner_carries_message() {
        let md = reporter().generate(&analyze(&[], &[run(1.0, 1.0)], 2.5)).unwrap();
        assert!(md.contains("**Threshold:** 2.5%\n"));
        assert!(md.contains("- **Total Benchmarks Compared:** 0\n"));
        assert!(md.contains("## ℹ️ No Baseline Available\n\nNo baseline results available for comparison\n"));
        assert!(!md.contains("Stable Performance"));
    }

    #[test]
    fn error_banner_carries_message() {
        let md = reporter().generate(&analyze(&[run(1.0, 1.0)], &[], 5.0)).unwrap();
        assert!(md.contains("## ❌ Comparison Failed\n\nNo current results found\n"));
        assert!(md.contains("- **Total Benchmarks Compared:** 1\n"));
    }
}
