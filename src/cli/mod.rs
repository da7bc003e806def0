use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, LLMProvider};
use crate::generator::stages::StageStrategy;
use crate::generator::state::ParameterOverrides;
use crate::generator::workflow::Task;
use crate::llm::ChatMessage;

/// archtrend - 由Rust与AI驱动的建筑行业趋势报告生成引擎
#[derive(Parser, Debug)]
#[command(name = "archtrend")]
#[command(
    about = "AI-based architecture trend report generator. It turns a conversation into a focused research brief, writes a structured trend report from research findings, and checks the report against quality criteria."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 输出路径
    #[arg(short, long, global = true)]
    pub output_path: Option<PathBuf>,

    /// 阶段实现策略 (default, architecture)
    #[arg(long, global = true)]
    pub strategy: Option<String>,

    /// 调研地点，"Global" 表示不做地域定制；优先于从对话中识别的地点
    #[arg(long, global = true)]
    pub location: Option<String>,

    /// 调研年份；优先于从对话中识别的年份
    #[arg(long, global = true)]
    pub year: Option<u16>,

    /// 行业领域
    #[arg(long, global = true)]
    pub industry_focus: Option<String>,

    /// LLM Provider (openai, mistral, openrouter, anthropic, gemini, moonshot, deepseek, ollama)
    #[arg(long, global = true)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long, global = true)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long, global = true)]
    pub llm_api_key: Option<String>,

    /// 高能效模型，用于调研问题生成
    #[arg(long, global = true)]
    pub model_efficient: Option<String>,

    /// 高质量模型，用于最终报告生成
    #[arg(long, global = true)]
    pub model_powerful: Option<String>,

    /// 最大tokens数
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 将对话转换为调研问题
    Topic {
        /// 用户消息，可重复
        #[arg(short, long = "message", required = true)]
        messages: Vec<String>,
    },
    /// 根据调研问题与调研发现生成趋势报告
    Report {
        /// 调研问题
        #[arg(short, long)]
        brief: String,

        /// 调研发现文件，可重复
        #[arg(short, long = "findings")]
        findings: Vec<PathBuf>,
    },
    /// 完整流程：调研问题 → 趋势报告 → 校验
    Run {
        #[arg(short, long = "message", required = true)]
        messages: Vec<String>,

        #[arg(short, long = "findings")]
        findings: Vec<PathBuf>,
    },
    /// 校验已有的报告文件
    Validate {
        /// 报告路径
        report: PathBuf,
    },
    /// 输出增强后的搜索查询
    Queries {
        #[arg(short, long = "query", required = true)]
        queries: Vec<String>,
    },
}

impl Args {
    /// 显式指定的调研参数
    pub fn overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            location: self.location.clone(),
            year: self.year,
            industry_focus: self.industry_focus.clone(),
        }
    }

    /// 将CLI参数转换为配置、任务与参数覆盖
    pub fn into_parts(self) -> Result<(Config, Task, ParameterOverrides)> {
        let overrides = self.overrides();
        let task = Self::build_task(&self.command)?;
        let config = self.into_config()?;
        Ok((config, task, overrides))
    }

    fn build_task(command: &Command) -> Result<Task> {
        let task = match command {
            Command::Topic { messages } => Task::Topic {
                messages: to_messages(messages),
            },
            Command::Report { brief, findings } => Task::Report {
                brief: brief.clone(),
                findings: read_findings(findings)?,
            },
            Command::Run { messages, findings } => Task::Run {
                messages: to_messages(messages),
                findings: read_findings(findings)?,
            },
            Command::Validate { report } => Task::Validate {
                report_path: report.clone(),
            },
            Command::Queries { queries } => Task::Queries {
                queries: queries.clone(),
            },
        };
        Ok(task)
    }

    /// 加载配置文件并以CLI参数覆盖
    pub fn into_config(self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }

        if let Some(strategy) = self.strategy {
            config.research.strategy = strategy
                .parse::<StageStrategy>()
                .map_err(|e| anyhow!(e))?;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }
}

fn to_messages(messages: &[String]) -> Vec<ChatMessage> {
    messages.iter().map(ChatMessage::user).collect()
}

/// 每个文件的内容作为一条调研发现
fn read_findings(paths: &[PathBuf]) -> Result<Vec<String>> {
    paths
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read findings file {}", path.display()))
        })
        .collect()
}
