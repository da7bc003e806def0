use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::architecture::search::{SearchEnhancement, expand_search_queries};
use crate::architecture::{ArchitectureEnhancer, ReportValidator, ValidationResult};
use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::outlet;
use crate::generator::stages::{PipelineStage, StageStrategy, report_stage, topic_stage};
use crate::generator::state::{ParameterOverrides, ResearchState};
use crate::llm::ChatMessage;

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: HashMap<String, Instant>,
    phase_durations: Vec<(String, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: HashMap::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &str) {
        self.phase_start_times
            .insert(phase_name.to_string(), Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &str) -> Option<Duration> {
        let start_time = self.phase_start_times.remove(phase_name)?;
        let duration = start_time.elapsed();
        self.phase_durations
            .push((phase_name.to_string(), duration));
        Some(duration)
    }

    pub fn total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 按结束顺序排列的阶段耗时
    pub fn phase_durations(&self) -> &[(String, Duration)] {
        &self.phase_durations
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.total_duration().as_secs_f64()
        );

        if !self.phase_durations.is_empty() {
            report.push_str("\n各阶段执行时间:\n");
            for (phase, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

/// 调研流水线：调研问题生成 → 最终报告生成
///
/// 两个阶段的实现变体在构建时按策略确定。
pub struct ResearchPipeline {
    strategy: StageStrategy,
    topic: Box<dyn PipelineStage>,
    report: Box<dyn PipelineStage>,
}

impl ResearchPipeline {
    pub fn new(strategy: StageStrategy) -> Self {
        Self {
            strategy,
            topic: topic_stage(strategy),
            report: report_stage(strategy),
        }
    }

    pub fn strategy(&self) -> StageStrategy {
        self.strategy
    }

    async fn run_stage(
        stage: &dyn PipelineStage,
        context: &GeneratorContext,
        state: &mut ResearchState,
        timing: &mut TimingScope,
    ) -> Result<()> {
        let phase = stage.name().to_string();
        timing.start_phase(&phase);
        tracing::info!(
            run_id = %state.run_id,
            stage = %phase,
            strategy = %stage.strategy(),
            "stage started"
        );

        let update = stage.execute(context, state).await?;
        state.merge(update);

        if let Some(elapsed) = timing.end_phase(&phase) {
            tracing::info!(
                run_id = %state.run_id,
                stage = %phase,
                elapsed_ms = elapsed.as_millis() as u64,
                "stage finished"
            );
        }
        Ok(())
    }

    /// 执行调研问题生成阶段
    pub async fn transform_topic(
        &self,
        context: &GeneratorContext,
        state: &mut ResearchState,
        timing: &mut TimingScope,
    ) -> Result<()> {
        println!("🔍 正在生成调研问题...");
        Self::run_stage(self.topic.as_ref(), context, state, timing).await
    }

    /// 执行最终报告生成阶段
    pub async fn generate_report(
        &self,
        context: &GeneratorContext,
        state: &mut ResearchState,
        timing: &mut TimingScope,
    ) -> Result<()> {
        println!("📝 正在生成趋势报告...");
        Self::run_stage(self.report.as_ref(), context, state, timing).await
    }

    /// 依次执行两个阶段
    pub async fn run(
        &self,
        context: &GeneratorContext,
        state: &mut ResearchState,
    ) -> Result<TimingScope> {
        let mut timing = TimingScope::new();
        self.transform_topic(context, state, &mut timing).await?;
        self.generate_report(context, state, &mut timing).await?;
        Ok(timing)
    }
}

/// 命令行可执行的任务
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// 仅生成调研问题
    Topic { messages: Vec<ChatMessage> },
    /// 基于已有调研问题与调研发现生成报告
    Report { brief: String, findings: Vec<String> },
    /// 完整流程
    Run {
        messages: Vec<ChatMessage>,
        findings: Vec<String>,
    },
    /// 校验已有报告
    Validate { report_path: PathBuf },
    /// 输出增强后的搜索查询
    Queries { queries: Vec<String> },
}

/// 单个查询的增强结果及其扩展
#[derive(Debug, Clone, Serialize)]
pub struct QueryPlan {
    pub query: String,
    #[serde(flatten)]
    pub enhancement: SearchEnhancement,
    pub expansions: Vec<String>,
}

/// 为每个查询生成搜索增强与扩展
pub fn plan_queries(
    config: &Config,
    overrides: &ParameterOverrides,
    queries: &[String],
) -> Vec<QueryPlan> {
    let params = overrides.apply_to(&config.research.default_parameters());
    let enhancer = ArchitectureEnhancer::new(
        params.clone(),
        config.research.validation.clone(),
    );

    queries
        .iter()
        .map(|query| QueryPlan {
            query: query.clone(),
            enhancement: enhancer.search_keywords(query),
            expansions: expand_search_queries(
                std::slice::from_ref(query),
                params.location(),
                Some(params.year()),
            ),
        })
        .collect()
}

/// 校验磁盘上的报告文件
pub async fn validate_file(config: &Config, report_path: &Path) -> Result<ValidationResult> {
    let report = tokio::fs::read_to_string(report_path)
        .await
        .with_context(|| format!("Failed to read report {}", report_path.display()))?;
    Ok(ReportValidator::validate(&report, &config.research.validation))
}

fn print_validation(validation: &ValidationResult) {
    if validation.passes {
        println!("✅ 报告通过质量校验");
    } else {
        println!("⚠️ 报告未通过质量校验:");
        for issue in &validation.issues {
            println!("   - {}", issue);
        }
    }
    for recommendation in &validation.recommendations {
        println!("💡 {}", recommendation);
    }
}

/// 启动任务；仅 Validate 任务在报告未通过校验时返回 false
pub async fn launch(config: &Config, task: Task, overrides: ParameterOverrides) -> Result<bool> {
    match task {
        Task::Validate { report_path } => {
            let validation = validate_file(config, &report_path).await?;
            println!("{}", serde_json::to_string_pretty(&validation)?);
            Ok(validation.passes)
        }
        Task::Queries { queries } => {
            let plans = plan_queries(config, &overrides, &queries);
            println!("{}", serde_json::to_string_pretty(&plans)?);
            Ok(true)
        }
        task => {
            let context = GeneratorContext::connect(config.clone()).await?;
            execute(&context, task, overrides).await?;
            Ok(true)
        }
    }
}

/// 使用给定上下文执行需要模型的任务并保存结果
pub async fn execute(
    context: &GeneratorContext,
    task: Task,
    overrides: ParameterOverrides,
) -> Result<ResearchState> {
    let pipeline = ResearchPipeline::new(context.config.research.strategy);
    tracing::info!(strategy = %pipeline.strategy(), "pipeline created");

    let mut timing = TimingScope::new();
    let state = match task {
        Task::Topic { messages } => {
            let mut state = ResearchState::new(messages).with_overrides(overrides);
            pipeline.transform_topic(context, &mut state, &mut timing).await?;
            if let Some(brief) = &state.research_brief {
                println!("\n{}\n", brief);
            }
            state
        }
        Task::Report { brief, findings } => {
            let mut state = ResearchState::new(Vec::new())
                .with_overrides(overrides)
                .with_research_brief(brief)
                .with_findings(findings);
            pipeline.generate_report(context, &mut state, &mut timing).await?;
            state
        }
        Task::Run { messages, findings } => {
            let mut state = ResearchState::new(messages)
                .with_overrides(overrides)
                .with_findings(findings);
            timing = pipeline.run(context, &mut state).await?;
            state
        }
        Task::Validate { .. } | Task::Queries { .. } => {
            anyhow::bail!("task does not use the research pipeline")
        }
    };

    timing.start_phase("output");
    outlet::save(context, &state).await?;
    timing.end_phase("output");

    if let Some(validation) = &state.validation {
        print_validation(validation);
    }

    println!("\n{}", timing.generate_timing_report());
    Ok(state)
}
