use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::architecture::ValidationCriteria;
use crate::architecture::params::{
    DEFAULT_INDUSTRY_FOCUS, DEFAULT_LOCATION, DEFAULT_YEAR, ResearchParameters,
};
use crate::generator::stages::StageStrategy;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "archtrend.toml";

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "moonshot")]
    Moonshot,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "mistral")]
    Mistral,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Moonshot => write!(f, "moonshot"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Mistral => write!(f, "mistral"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "moonshot" => Ok(LLMProvider::Moonshot),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "mistral" => Ok(LLMProvider::Mistral),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "gemini" => Ok(LLMProvider::Gemini),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 输出路径
    pub output_path: PathBuf,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 调研配置
    pub research: ResearchConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 高能效模型，默认用于调研问题生成
    pub model_efficient: String,

    /// 高质量模型，默认用于最终报告生成
    pub model_powerful: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// 调研流程配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ResearchConfig {
    /// 未能从对话中识别地点时使用的地点，"Global" 表示不做地域定制
    pub default_location: String,

    /// 未能从对话中识别年份时使用的年份
    pub default_year: u16,

    pub industry_focus: String,

    /// 阶段实现策略
    pub strategy: StageStrategy,

    /// 调研问题生成模型，未设置时使用 llm.model_efficient
    pub topic_model: Option<String>,

    pub topic_max_tokens: u32,

    /// 最终报告生成模型，未设置时使用 llm.model_powerful
    pub report_model: Option<String>,

    pub report_max_tokens: u32,

    /// 报告校验标准
    pub validation: ValidationCriteria,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 显式路径优先；否则尝试工作目录下的默认配置文件，都没有时使用默认配置
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let default_config_path = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_CONFIG_FILE);

        if default_config_path.exists() {
            Self::from_file(&default_config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// 调研问题生成使用的模型
    pub fn topic_model(&self) -> &str {
        self.research
            .topic_model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(&self.llm.model_efficient)
    }

    /// 最终报告生成使用的模型
    pub fn report_model(&self) -> &str {
        self.research
            .report_model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(&self.llm.model_powerful)
    }

    pub fn topic_max_tokens(&self) -> u32 {
        self.research.topic_max_tokens.min(self.llm.max_tokens)
    }

    pub fn report_max_tokens(&self) -> u32 {
        self.research.report_max_tokens.min(self.llm.max_tokens)
    }
}

impl ResearchConfig {
    /// 配置中的默认调研参数
    pub fn default_parameters(&self) -> ResearchParameters {
        ResearchParameters::new(
            Some(self.default_location.clone()),
            Some(self.default_year),
            Some(self.industry_focus.clone()),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("./archtrend.reports"),
            llm: LLMConfig::default(),
            research: ResearchConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("ARCHTREND_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.openai.com/v1"),
            model_efficient: String::from("gpt-4.1-mini"),
            model_powerful: String::from("gpt-4.1"),
            max_tokens: 32768,
            temperature: 0.1,
            retry_attempts: 3,
            retry_delay_ms: 5000,
            timeout_seconds: 300,
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION.to_string(),
            default_year: DEFAULT_YEAR,
            industry_focus: DEFAULT_INDUSTRY_FOCUS.to_string(),
            strategy: StageStrategy::default(),
            topic_model: None,
            topic_max_tokens: 8192,
            report_model: None,
            report_max_tokens: 10000,
            validation: ValidationCriteria::default(),
        }
    }
}
