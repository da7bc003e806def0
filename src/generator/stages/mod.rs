//! 调研流水线的具名阶段
//!
//! 每个阶段都有通用实现与建筑行业定制实现，
//! 在构建流水线时通过 [`StageStrategy`] 选择，而不是在运行时替换节点。

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::generator::context::GeneratorContext;
use crate::generator::state::{ResearchState, StateUpdate};

pub mod report;
pub mod topic;

pub use report::{ArchitectureReportStage, DefaultReportStage};
pub use topic::{ArchitectureTopicStage, DefaultTopicStage};

/// 阶段实现策略
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageStrategy {
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "architecture")]
    #[default]
    Architecture,
}

impl Display for StageStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageStrategy::Default => write!(f, "default"),
            StageStrategy::Architecture => write!(f, "architecture"),
        }
    }
}

impl std::str::FromStr for StageStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(StageStrategy::Default),
            "architecture" | "arch" => Ok(StageStrategy::Architecture),
            _ => Err(format!("Unknown stage strategy: {}", s)),
        }
    }
}

/// 阶段名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageName {
    TransformMessagesIntoResearchTopic,
    FinalReportGeneration,
}

impl Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageName::TransformMessagesIntoResearchTopic => {
                "transform_messages_into_research_topic"
            }
            StageName::FinalReportGeneration => "final_report_generation",
        };
        write!(f, "{}", name)
    }
}

/// 流水线阶段：读取当前状态，返回待合并的状态更新
#[async_trait]
pub trait PipelineStage: Send + Sync {
    fn name(&self) -> StageName;

    /// 实现变体，用于日志
    fn strategy(&self) -> StageStrategy;

    async fn execute(
        &self,
        context: &GeneratorContext,
        state: &ResearchState,
    ) -> Result<StateUpdate>;
}

/// 按策略创建调研问题生成阶段
pub fn topic_stage(strategy: StageStrategy) -> Box<dyn PipelineStage> {
    match strategy {
        StageStrategy::Default => Box::new(DefaultTopicStage),
        StageStrategy::Architecture => Box::new(ArchitectureTopicStage),
    }
}

/// 按策略创建最终报告生成阶段
pub fn report_stage(strategy: StageStrategy) -> Box<dyn PipelineStage> {
    match strategy {
        StageStrategy::Default => Box::new(DefaultReportStage),
        StageStrategy::Architecture => Box::new(ArchitectureReportStage),
    }
}
