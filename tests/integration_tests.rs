use anyhow::{Result, anyhow};
use archtrend::generator::stages::StageStrategy;
use archtrend::generator::workflow::{Task, execute, launch};
use archtrend::{
    ChatMessage, Config, GeneratorContext, LanguageModel, ModelRequest, ParameterOverrides,
    ReportValidator, ValidationCriteria,
};
use async_trait::async_trait;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const TREND_REPORT: &str = r#"# Mass Timber & Adaptive Reuse - Architecture Trends Report

## Executive Summary
Three trends stand out for Oslo in 2026.

## 1. Current Market Landscape
Demand for low-carbon construction keeps growing.

## 2. Top Architecture Trends
### Trend 1: Mass timber
Example: Mjostarne. Example: Treet.
### Trend 2: Adaptive reuse
Example: Vulkan. Example: Fabrikken.
### Trend 3: Passive cooling
Example: Powerhouse Brattorkaia. Example: Kiwi stores.

## 7. Implementation Recommendations
Budget an extra 5% for timber fire engineering.

## Sources
- [Statsbygg](https://www.statsbygg.no/)
"#;

/// 按顺序返回预设回复的模型
struct ReplayModel {
    replies: Mutex<Vec<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ReplayModel {
    fn new(replies: Vec<Result<&str, &str>>) -> Arc<Self> {
        let mut replies: Vec<_> = replies
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        replies.reverse();
        Arc::new(Self {
            replies: Mutex::new(replies),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ReplayModel {
    async fn invoke(&self, request: ModelRequest) -> Result<String> {
        let prompt = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);
        match self.replies.lock().unwrap().pop() {
            Some(Ok(text)) => Ok(text),
            Some(Err(e)) => Err(anyhow!(e)),
            None => Err(anyhow!("no reply left")),
        }
    }
}

fn context(model: Arc<ReplayModel>, temp_dir: &TempDir) -> GeneratorContext {
    let config = Config {
        output_path: temp_dir.path().join("reports"),
        ..Default::default()
    };
    GeneratorContext::with_model(config, model).with_today("Fri Oct 16, 2026")
}

#[tokio::test]
async fn test_full_run_produces_validated_report() {
    let temp_dir = TempDir::new().unwrap();
    let model = ReplayModel::new(vec![Ok("How is timber reshaping Oslo offices?"), Ok(TREND_REPORT)]);
    let context = context(model.clone(), &temp_dir);

    let state = execute(
        &context,
        Task::Run {
            messages: vec![ChatMessage::user("What will Oslo offices look like in 2026?")],
            findings: vec!["Timber towers are spreading".to_string()],
        },
        ParameterOverrides::default(),
    )
    .await
    .unwrap();

    let validation = state.validation.clone().unwrap();
    assert!(validation.passes, "issues: {:?}", validation.issues);
    assert!(
        validation
            .recommendations
            .iter()
            .any(|r| r.contains("consider citing at least 10"))
    );

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("user: What will Oslo offices look like in 2026?"));
    assert!(prompts[0].contains("Today's date is Fri Oct 16, 2026."));
    assert!(prompts[1].contains("How is timber reshaping Oslo offices?"));
    assert!(prompts[1].contains("Timber towers are spreading"));

    let saved = fs::read_to_string(temp_dir.path().join("reports/trend_report.md")).unwrap();
    assert!(saved.starts_with("**Report Generated:** Fri Oct 16, 2026"));
    assert!(saved.contains("**Time Frame:** 2026"));
    assert!(saved.contains("### Trend 1: Mass timber"));

    let json = fs::read_to_string(temp_dir.path().join("reports/validation.json")).unwrap();
    assert!(json.contains("\"passes\": true"));
}

#[tokio::test]
async fn test_topic_failure_falls_back_and_report_failure_is_embedded() {
    let temp_dir = TempDir::new().unwrap();
    let model = ReplayModel::new(vec![
        Err("architecture prompt rejected"),
        Ok("generic brief"),
        Err("report model unavailable"),
    ]);
    let context = context(model, &temp_dir);

    let state = execute(
        &context,
        Task::Run {
            messages: vec![ChatMessage::user("Trends in Dubai")],
            findings: vec![],
        },
        ParameterOverrides::default(),
    )
    .await
    .unwrap();

    assert_eq!(state.research_brief.as_deref(), Some("generic brief"));
    assert_eq!(
        state.final_report.as_deref(),
        Some("Error generating architecture trend report: report model unavailable")
    );
    assert!(state.validation.is_none());
}

#[tokio::test]
async fn test_default_strategy_skips_enhancement() {
    let temp_dir = TempDir::new().unwrap();
    let model = ReplayModel::new(vec![Ok("brief"), Ok("plain report")]);
    let mut context = context(model.clone(), &temp_dir);
    context.config.research.strategy = StageStrategy::Default;

    let state = execute(
        &context,
        Task::Run {
            messages: vec![ChatMessage::user("Trends in Paris")],
            findings: vec![],
        },
        ParameterOverrides::default(),
    )
    .await
    .unwrap();

    assert_eq!(state.final_report.as_deref(), Some("plain report"));
    assert!(state.research_params.is_none());
    assert!(!model.prompts()[0].contains("location-specific factors"));
}

#[tokio::test]
async fn test_validate_task_reports_failure() {
    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("draft.md");
    fs::write(&report, "## Executive Summary\nOne trend only.").unwrap();

    let passed = launch(
        &Config::default(),
        Task::Validate {
            report_path: report,
        },
        ParameterOverrides::default(),
    )
    .await
    .unwrap();

    assert!(!passed);
}

#[test]
fn test_validator_public_api() {
    let result = ReportValidator::validate(TREND_REPORT, &ValidationCriteria::default());
    assert!(result.passes);
    assert!(result.issues.is_empty());
}
