//! 建筑趋势调研定制：将调研参数渲染为prompt、搜索词与校验标准

use crate::architecture::criteria::ValidationCriteria;
use crate::architecture::params::ResearchParameters;
use crate::architecture::prompts;
use crate::architecture::search::{
    QualityFilters, SearchEnhancement, SourcePriorities, enhance_search_keywords,
};
use crate::llm::ChatMessage;
use crate::utils::prompt_template::{PromptVars, TemplateError};

const REPORT_DISCLAIMER: &str = r#"---
**Important Note:** This report provides trend analysis based on current market research.
Implementation recommendations should be validated with local building codes, climate conditions,
and budget constraints. Consult with licensed architects and engineers for specific projects.
---"#;

/// 建筑趋势调研定制器
#[derive(Debug, Clone, PartialEq)]
pub struct ArchitectureEnhancer {
    params: ResearchParameters,
    criteria: ValidationCriteria,
}

impl Default for ArchitectureEnhancer {
    fn default() -> Self {
        Self::new(ResearchParameters::default(), ValidationCriteria::default())
    }
}

impl ArchitectureEnhancer {
    pub fn new(params: ResearchParameters, criteria: ValidationCriteria) -> Self {
        Self { params, criteria }
    }

    pub fn params(&self) -> &ResearchParameters {
        &self.params
    }

    pub fn validation_criteria(&self) -> &ValidationCriteria {
        &self.criteria
    }

    /// 调研问题prompt；有具体地点时附加地域定制说明
    pub fn enhanced_research_prompt(
        &self,
        messages: &[ChatMessage],
        date: &str,
    ) -> Result<String, TemplateError> {
        let vars = PromptVars::new()
            .with("messages", format_messages(messages))
            .with("date", date);
        let base_prompt = prompts::RESEARCH_TOPIC.render(&vars)?;

        match self.params.location() {
            Some(location) => {
                let enhancement = prompts::LOCATION_ENHANCEMENT
                    .render(&PromptVars::new().with("location", location))?;
                Ok(format!("{}\n\n{}", base_prompt, enhancement))
            }
            None => Ok(base_prompt),
        }
    }

    /// 调研员指引，附带优先来源与过滤规则
    pub fn research_instructions(&self) -> String {
        format!(
            "{}\n{}\n{}",
            prompts::RESEARCH_INSTRUCTIONS,
            self.source_priorities().to_markdown(),
            self.quality_filters().to_markdown()
        )
    }

    pub fn report_prompt(
        &self,
        research_brief: &str,
        findings: &str,
        date: &str,
    ) -> Result<String, TemplateError> {
        let vars = PromptVars::new()
            .with("research_brief", research_brief)
            .with("findings", findings)
            .with("date", date)
            .with("location", self.params.scope_label())
            .with("year", self.params.year().to_string())
            .with("industry_focus", self.params.industry_focus());
        prompts::REPORT.render(&vars)
    }

    pub fn search_keywords(&self, base_query: &str) -> SearchEnhancement {
        enhance_search_keywords(base_query, &self.params)
    }

    pub fn source_priorities(&self) -> SourcePriorities {
        SourcePriorities::default()
    }

    pub fn quality_filters(&self) -> QualityFilters {
        QualityFilters::for_year(self.params.year())
    }

    /// 为生成的报告加上元数据头与免责声明
    pub fn enhance_report(&self, report_content: &str, date: &str) -> String {
        let metadata = format!(
            "**Report Generated:** {}\n**Focus Area:** {}\n**Geographic Scope:** {}\n**Time Frame:** {}",
            date,
            self.params.industry_focus(),
            self.params.scope_label(),
            self.params.year()
        );
        format!("{}\n\n{}\n\n{}\n", metadata, report_content.trim(), REPORT_DISCLAIMER)
    }
}

/// 对话消息渲染为 `role: content` 的文本块
pub fn format_messages(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}
