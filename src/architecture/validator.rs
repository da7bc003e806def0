//! 趋势报告质量校验
//!
//! 纯函数：同样的输入总是得到同样的结果。结构性缺失记为issue并判定不通过，
//! 质量指标缺失只给出建议，不影响通过与否。

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::architecture::criteria::ValidationCriteria;

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s)\]>"']+"#).expect("link pattern is valid"));

/// 校验结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub passes: bool,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            passes: true,
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

impl ValidationResult {
    fn fail(&mut self, issue: String) {
        self.issues.push(issue);
        self.passes = false;
    }

    fn recommend(&mut self, recommendation: impl Into<String>) {
        self.recommendations.push(recommendation.into());
    }
}

pub struct ReportValidator;

impl ReportValidator {
    pub fn validate(report: &str, criteria: &ValidationCriteria) -> ValidationResult {
        let lowered = report.to_lowercase();
        let requirements = &criteria.content_requirements;
        let mut result = ValidationResult::default();

        let trend_count = lowered.matches("trend").count();
        if trend_count < requirements.minimum_trends {
            result.fail(format!(
                "Report mentions {} trends, minimum required: {}",
                trend_count, requirements.minimum_trends
            ));
        }

        for section in &requirements.required_sections {
            if !lowered.contains(&section.to_lowercase()) {
                result.fail(format!("Missing required section: {}", section));
            }
        }

        for check in criteria.enabled_checks() {
            if !check.keywords.iter().any(|kw| lowered.contains(kw)) {
                result.recommend(check.recommendation);
            }
        }

        let trend_sections = Self::count_trend_sections(&lowered);
        let example_mentions = lowered.matches("example").count();
        let expected_examples = trend_sections * requirements.minimum_examples_per_trend;
        if trend_sections > 0 && example_mentions < expected_examples {
            result.recommend(format!(
                "Consider adding at least {} examples per trend ({} found across {} trends)",
                requirements.minimum_examples_per_trend, example_mentions, trend_sections
            ));
        }

        let source_count = Self::count_sources(report);
        if source_count < requirements.minimum_sources {
            result.recommend(format!(
                "Report cites {} sources, consider citing at least {}",
                source_count, requirements.minimum_sources
            ));
        }

        result
    }

    /// 以 `### Trend` 开头的小节数
    fn count_trend_sections(lowered: &str) -> usize {
        lowered
            .lines()
            .filter(|line| line.trim_start().starts_with("### trend"))
            .count()
    }

    /// 统计报告中不重复的链接数
    pub fn count_sources(report: &str) -> usize {
        LINK_PATTERN
            .find_iter(report)
            .map(|m| m.as_str().trim_end_matches(['.', ',', ';']))
            .collect::<BTreeSet<_>>()
            .len()
    }
}
