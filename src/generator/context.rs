use anyhow::Result;
use std::sync::Arc;

use crate::architecture::{ArchitectureEnhancer, ResearchParameters};
use crate::config::Config;
use crate::llm::{LLMClient, LanguageModel};

#[derive(Clone)]
pub struct GeneratorContext {
    /// 模型调用边界
    pub model: Arc<dyn LanguageModel>,
    /// 配置
    pub config: Config,
    /// 写入prompt的当前日期
    today: String,
}

impl GeneratorContext {
    /// 使用配置中的provider创建上下文，并在启动时检查模型连接
    pub async fn connect(config: Config) -> Result<Self> {
        let llm_client = LLMClient::new(config.llm.clone())?;
        llm_client.check_connection().await?;
        Ok(Self::with_model(config, Arc::new(llm_client)))
    }

    /// 使用指定的模型实现创建上下文
    pub fn with_model(config: Config, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            config,
            today: today_string(),
        }
    }

    pub fn with_today(mut self, today: impl Into<String>) -> Self {
        self.today = today.into();
        self
    }

    pub fn today(&self) -> &str {
        &self.today
    }

    /// 配置中的默认调研参数
    pub fn default_params(&self) -> ResearchParameters {
        self.config.research.default_parameters()
    }

    pub fn enhancer(&self, params: ResearchParameters) -> ArchitectureEnhancer {
        ArchitectureEnhancer::new(params, self.config.research.validation.clone())
    }
}

/// 形如 "Tue Mar 4, 2025" 的日期
pub fn today_string() -> String {
    chrono::Local::now().format("%a %b %-d, %Y").to_string()
}
