use anyhow::Result;
use async_trait::async_trait;

use crate::architecture::{ReportValidator, ResearchParameters};
use crate::architecture::prompts;
use crate::generator::context::GeneratorContext;
use crate::generator::stages::{PipelineStage, StageName, StageStrategy};
use crate::generator::state::{ResearchState, StateUpdate};
use crate::llm::{ChatMessage, ModelRequest};
use crate::utils::prompt_template::PromptVars;

/// 状态中缺少调研问题时使用
pub const FALLBACK_RESEARCH_BRIEF: &str = "Architecture trend analysis";

async fn request_report(context: &GeneratorContext, prompt: String) -> Result<String> {
    let request = ModelRequest::single_prompt(
        context.config.report_model(),
        context.config.report_max_tokens(),
        prompt,
    );
    context.model.invoke(request).await
}

fn research_brief(state: &ResearchState) -> &str {
    state
        .research_brief
        .as_deref()
        .unwrap_or(FALLBACK_RESEARCH_BRIEF)
}

fn error_report(message: String) -> StateUpdate {
    StateUpdate {
        final_report: Some(message),
        ..Default::default()
    }
}

/// 通用最终报告生成
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultReportStage;

#[async_trait]
impl PipelineStage for DefaultReportStage {
    fn name(&self) -> StageName {
        StageName::FinalReportGeneration
    }

    fn strategy(&self) -> StageStrategy {
        StageStrategy::Default
    }

    async fn execute(
        &self,
        context: &GeneratorContext,
        state: &ResearchState,
    ) -> Result<StateUpdate> {
        let vars = PromptVars::new()
            .with("research_brief", research_brief(state))
            .with("date", context.today())
            .with("findings", state.joined_findings());
        let prompt = prompts::DEFAULT_REPORT.render(&vars)?;

        match request_report(context, prompt).await {
            Ok(report) => Ok(StateUpdate {
                messages: vec![ChatMessage::assistant(report.clone())],
                final_report: Some(report),
                ..Default::default()
            }),
            Err(e) => {
                tracing::error!(error = %e, "最终报告生成失败");
                Ok(error_report(format!("Error generating final report: {}", e)))
            }
        }
    }
}

/// 建筑趋势报告生成
///
/// 成功时报告会加上元数据头与免责声明，并对模型原文做质量校验；
/// 模型调用失败时最终报告为错误说明，流水线不中断。
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchitectureReportStage;

impl ArchitectureReportStage {
    fn params(context: &GeneratorContext, state: &ResearchState) -> ResearchParameters {
        state.resolve_params(&context.default_params())
    }
}

#[async_trait]
impl PipelineStage for ArchitectureReportStage {
    fn name(&self) -> StageName {
        StageName::FinalReportGeneration
    }

    fn strategy(&self) -> StageStrategy {
        StageStrategy::Architecture
    }

    async fn execute(
        &self,
        context: &GeneratorContext,
        state: &ResearchState,
    ) -> Result<StateUpdate> {
        let enhancer = context.enhancer(Self::params(context, state));
        let prompt = enhancer.report_prompt(
            research_brief(state),
            &state.joined_findings(),
            context.today(),
        )?;

        let raw_report = match request_report(context, prompt).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "建筑趋势报告生成失败");
                return Ok(error_report(format!(
                    "Error generating architecture trend report: {}",
                    e
                )));
            }
        };

        let validation = ReportValidator::validate(&raw_report, enhancer.validation_criteria());
        if !validation.passes {
            tracing::warn!(issues = ?validation.issues, "报告未通过质量校验");
        }

        Ok(StateUpdate {
            final_report: Some(enhancer.enhance_report(&raw_report, context.today())),
            messages: vec![ChatMessage::assistant(raw_report)],
            validation: Some(validation),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::stages::test_support::{ScriptedModel, context_with};

    const RAW_REPORT: &str = "# Trends\n## Executive Summary\ntrend trend trend\n\
        ## Current Market Landscape\n## Top Architecture Trends\n\
        ## Implementation Recommendations\n## Sources\n";

    #[tokio::test]
    async fn test_architecture_report_wraps_and_validates() {
        let model = ScriptedModel::new(vec![Ok(RAW_REPORT)]);
        let context = context_with(model.clone());
        let mut state = ResearchState::new(vec![ChatMessage::user("hi")])
            .with_research_brief("Timber in Oslo")
            .with_findings(vec!["Finding A".to_string(), "Finding B".to_string()]);
        state.research_params = Some(ResearchParameters::new(
            Some("Oslo".to_string()),
            Some(2026),
            None,
        ));

        let update = ArchitectureReportStage.execute(&context, &state).await.unwrap();

        let report = update.final_report.unwrap();
        assert!(report.starts_with("**Report Generated:** Wed Jan 7, 2026"));
        assert!(report.contains("**Geographic Scope:** Oslo"));
        assert!(report.contains("## Executive Summary"));
        assert_eq!(update.messages, vec![ChatMessage::assistant(RAW_REPORT)]);
        assert!(update.validation.unwrap().passes);

        let requests = model.recorded();
        assert_eq!(requests[0].model, "powerful-model");
        assert_eq!(requests[0].max_tokens, 10000);
        let prompt = &requests[0].messages[0].content;
        assert!(prompt.contains("Timber in Oslo"));
        assert!(prompt.contains("\n\nFinding A\n\n\n\nFinding B\n\n"));
        assert!(prompt.contains("The report covers Oslo for 2026"));
    }

    #[tokio::test]
    async fn test_architecture_report_uses_fallback_brief_and_default_params() {
        let model = ScriptedModel::new(vec![Ok("short")]);
        let context = context_with(model.clone());
        let state = ResearchState::new(vec![]);

        let update = ArchitectureReportStage.execute(&context, &state).await.unwrap();

        let prompt = &model.recorded()[0].messages[0].content;
        assert!(prompt.contains("Architecture trend analysis"));
        assert!(prompt.contains("The report covers United States for 2025"));
        assert!(!update.validation.unwrap().passes);
    }

    #[tokio::test]
    async fn test_architecture_report_model_error_becomes_report_text() {
        let model = ScriptedModel::new(vec![Err("rate limited")]);
        let context = context_with(model);
        let state = ResearchState::new(vec![]);

        let update = ArchitectureReportStage.execute(&context, &state).await.unwrap();

        assert_eq!(
            update.final_report.as_deref(),
            Some("Error generating architecture trend report: rate limited")
        );
        assert!(update.messages.is_empty());
        assert!(update.validation.is_none());
    }

    #[tokio::test]
    async fn test_default_report_returns_raw_text() {
        let model = ScriptedModel::new(vec![Ok("plain answer")]);
        let context = context_with(model.clone());
        let state = ResearchState::new(vec![]).with_research_brief("brief");

        let update = DefaultReportStage.execute(&context, &state).await.unwrap();

        assert_eq!(update.final_report.as_deref(), Some("plain answer"));
        assert!(update.validation.is_none());
        let prompt = &model.recorded()[0].messages[0].content;
        assert!(prompt.contains("comprehensive, well-structured answer"));
    }

    #[tokio::test]
    async fn test_default_report_model_error() {
        let model = ScriptedModel::new(vec![Err("boom")]);
        let context = context_with(model);
        let state = ResearchState::new(vec![]);

        let update = DefaultReportStage.execute(&context, &state).await.unwrap();
        assert_eq!(
            update.final_report.as_deref(),
            Some("Error generating final report: boom")
        );
    }
}
