use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::architecture::{ResearchParameters, ValidationResult};
use crate::llm::ChatMessage;

/// 调用方显式指定的调研参数，优先于从对话中提取的值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterOverrides {
    pub location: Option<String>,
    pub year: Option<u16>,
    pub industry_focus: Option<String>,
}

impl ParameterOverrides {
    /// 以覆盖值补全默认参数
    pub fn apply_to(&self, defaults: &ResearchParameters) -> ResearchParameters {
        ResearchParameters::with_defaults(
            self.location.clone(),
            self.year,
            self.industry_focus.clone(),
            defaults,
        )
    }
}

/// 一次调研请求在各阶段间流转的状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchState {
    pub run_id: Uuid,
    pub messages: Vec<ChatMessage>,
    pub overrides: ParameterOverrides,
    pub research_brief: Option<String>,
    pub research_params: Option<ResearchParameters>,
    pub findings: Vec<String>,
    pub final_report: Option<String>,
    pub validation: Option<ValidationResult>,
}

/// 阶段输出，合并进 [`ResearchState`]：Some覆盖原值，messages追加
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub research_brief: Option<String>,
    pub research_params: Option<ResearchParameters>,
    pub messages: Vec<ChatMessage>,
    pub final_report: Option<String>,
    pub validation: Option<ValidationResult>,
}

impl ResearchState {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            messages,
            overrides: ParameterOverrides::default(),
            research_brief: None,
            research_params: None,
            findings: Vec::new(),
            final_report: None,
            validation: None,
        }
    }

    pub fn with_overrides(mut self, overrides: ParameterOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_findings(mut self, findings: Vec<String>) -> Self {
        self.findings = findings;
        self
    }

    pub fn with_research_brief(mut self, brief: impl Into<String>) -> Self {
        self.research_brief = Some(brief.into());
        self
    }

    pub fn merge(&mut self, update: StateUpdate) {
        if let Some(brief) = update.research_brief {
            self.research_brief = Some(brief);
        }
        if let Some(params) = update.research_params {
            self.research_params = Some(params);
        }
        self.messages.extend(update.messages);
        if let Some(report) = update.final_report {
            self.final_report = Some(report);
        }
        if let Some(validation) = update.validation {
            self.validation = Some(validation);
        }
    }

    /// 已确定的参数；尚未确定时由覆盖值与默认参数推出
    pub fn resolve_params(&self, defaults: &ResearchParameters) -> ResearchParameters {
        self.research_params
            .clone()
            .unwrap_or_else(|| self.overrides.apply_to(defaults))
    }

    /// 各条调研发现以空行分隔拼接
    pub fn joined_findings(&self) -> String {
        self.findings
            .iter()
            .map(|finding| format!("\n\n{}\n\n", finding))
            .collect()
    }
}
