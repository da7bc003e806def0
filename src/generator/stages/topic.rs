use anyhow::Result;
use async_trait::async_trait;

use crate::architecture::LocationYearExtractor;
use crate::architecture::enhancer::format_messages;
use crate::architecture::prompts;
use crate::generator::context::GeneratorContext;
use crate::generator::stages::{PipelineStage, StageName, StageStrategy};
use crate::generator::state::{ResearchState, StateUpdate};
use crate::llm::{ChatMessage, ModelRequest};
use crate::utils::prompt_template::PromptVars;

async fn request_research_brief(context: &GeneratorContext, prompt: String) -> Result<String> {
    let request = ModelRequest::single_prompt(
        context.config.topic_model(),
        context.config.topic_max_tokens(),
        prompt,
    );
    context.model.invoke(request).await
}

fn brief_update(brief: String) -> StateUpdate {
    StateUpdate {
        messages: vec![ChatMessage::assistant(brief.clone())],
        research_brief: Some(brief),
        ..Default::default()
    }
}

/// 通用调研问题生成
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTopicStage;

#[async_trait]
impl PipelineStage for DefaultTopicStage {
    fn name(&self) -> StageName {
        StageName::TransformMessagesIntoResearchTopic
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
            .with("messages", format_messages(&state.messages))
            .with("date", context.today());
        let prompt = prompts::DEFAULT_RESEARCH_TOPIC.render(&vars)?;

        let brief = request_research_brief(context, prompt).await?;
        Ok(brief_update(brief))
    }
}

/// 建筑行业定制的调研问题生成
///
/// 从对话中提取地点与年份（显式覆盖值优先），生成定制prompt；
/// 模型调用失败时回退到通用实现。
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchitectureTopicStage;

#[async_trait]
impl PipelineStage for ArchitectureTopicStage {
    fn name(&self) -> StageName {
        StageName::TransformMessagesIntoResearchTopic
    }

    fn strategy(&self) -> StageStrategy {
        StageStrategy::Architecture
    }

    async fn execute(
        &self,
        context: &GeneratorContext,
        state: &ResearchState,
    ) -> Result<StateUpdate> {
        let hints = LocationYearExtractor::extract(&state.messages);
        tracing::debug!(
            location = ?hints.location,
            year = ?hints.year,
            "extracted research hints"
        );

        let overrides = &state.overrides;
        let params = hints.into_parameters(
            overrides.location.clone(),
            overrides.year,
            overrides.industry_focus.clone(),
            &context.default_params(),
        );

        let enhancer = context.enhancer(params.clone());
        let prompt = enhancer.enhanced_research_prompt(&state.messages, context.today())?;

        match request_research_brief(context, prompt).await {
            Ok(brief) => {
                let mut update = brief_update(brief);
                update.research_params = Some(params);
                Ok(update)
            }
            Err(e) => {
                tracing::warn!(error = %e, "建筑调研问题生成失败，回退到通用实现");
                DefaultTopicStage.execute(context, state).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::stages::test_support::{ScriptedModel, context_with};
    use crate::generator::state::ParameterOverrides;

    #[tokio::test]
    async fn test_architecture_topic_extracts_params_and_uses_topic_model() {
        let model = ScriptedModel::new(vec![Ok("Detailed brief")]);
        let context = context_with(model.clone());
        let state = ResearchState::new(vec![ChatMessage::user(
            "What are residential trends in Tokyo for 2027?",
        )]);

        let update = ArchitectureTopicStage.execute(&context, &state).await.unwrap();

        assert_eq!(update.research_brief.as_deref(), Some("Detailed brief"));
        assert_eq!(update.messages, vec![ChatMessage::assistant("Detailed brief")]);
        let params = update.research_params.unwrap();
        assert_eq!(params.location(), Some("Tokyo, Japan"));
        assert_eq!(params.year(), 2027);

        let requests = model.recorded();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "efficient-model");
        let prompt = &requests[0].messages[0].content;
        assert!(prompt.contains("architecture-focused research question"));
        assert!(prompt.contains("When researching architecture trends for Tokyo, Japan"));
        assert!(prompt.contains("Wed Jan 7, 2026"));
    }

    #[tokio::test]
    async fn test_architecture_topic_defaults_when_nothing_found() {
        let model = ScriptedModel::new(vec![Ok("brief")]);
        let context = context_with(model);
        let state = ResearchState::new(vec![ChatMessage::user("What is new in facades?")]);

        let update = ArchitectureTopicStage.execute(&context, &state).await.unwrap();

        let params = update.research_params.unwrap();
        assert_eq!(params.location(), Some("United States"));
        assert_eq!(params.year(), 2025);
    }

    #[tokio::test]
    async fn test_architecture_topic_overrides_win() {
        let model = ScriptedModel::new(vec![Ok("brief")]);
        let context = context_with(model);
        let state = ResearchState::new(vec![ChatMessage::user("Trends in Paris 2026")])
            .with_overrides(ParameterOverrides {
                location: Some("Global".to_string()),
                year: Some(2030),
                industry_focus: None,
            });

        let update = ArchitectureTopicStage.execute(&context, &state).await.unwrap();

        let params = update.research_params.unwrap();
        assert_eq!(params.location(), None);
        assert_eq!(params.year(), 2030);
    }

    #[tokio::test]
    async fn test_architecture_topic_falls_back_to_default_on_model_error() {
        let model = ScriptedModel::new(vec![Err("quota exceeded"), Ok("generic brief")]);
        let context = context_with(model.clone());
        let state = ResearchState::new(vec![ChatMessage::user("Office trends in London")]);

        let update = ArchitectureTopicStage.execute(&context, &state).await.unwrap();

        assert_eq!(update.research_brief.as_deref(), Some("generic brief"));
        assert!(update.research_params.is_none());

        let requests = model.recorded();
        assert_eq!(requests.len(), 2);
        assert!(
            requests[1].messages[0]
                .content
                .contains("more detailed and concrete research question")
        );
    }

    #[tokio::test]
    async fn test_default_topic_propagates_model_error() {
        let model = ScriptedModel::new(vec![Err("network down")]);
        let context = context_with(model);
        let state = ResearchState::new(vec![ChatMessage::user("anything")]);

        let err = DefaultTopicStage.execute(&context, &state).await.unwrap_err();
        assert!(err.to_string().contains("network down"));
    }
}
