//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use crate::config::LLMConfig;

mod providers;
pub mod types;

use providers::{AgentSettings, ProviderClient};
pub use types::{ChatMessage, MessageRole, ModelRequest};

/// 模型调用边界：给定请求，返回一段生成文本
///
/// 流水线只通过这个trait访问模型，测试时可替换为脚本化实现。
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn invoke(&self, request: ModelRequest) -> Result<String>;
}

/// LLM客户端 - 基于rig的provider实现
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: LLMConfig) -> Result<Self> {
        let client = ProviderClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        println!("🔄 正在检查模型连接...");
        let request = ModelRequest::new(
            self.config.model_efficient.clone(),
            16,
            vec![
                ChatMessage::system("You are a helpful assistant."),
                ChatMessage::user("Hello"),
            ],
        );
        match self.invoke(request).await {
            Ok(_) => {
                println!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }

    /// 通用重试逻辑，用于处理异步操作的重试机制
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_retries = self.config.retry_attempts.max(1);
        let retry_delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    retries += 1;
                    tracing::warn!(
                        attempt = retries,
                        max_attempts = max_retries,
                        error = %err,
                        "调用模型服务出错"
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(retry_delay).await;
                }
            }
        }
    }

    async fn invoke_once(&self, request: &ModelRequest) -> Result<String> {
        let turns = request.split_turns();
        let agent = self.client.create_agent(AgentSettings {
            model: &request.model,
            preamble: &turns.preamble,
            max_tokens: request.max_tokens,
            temperature: self.config.temperature,
        })?;

        self.with_timeout(agent.chat(&turns)).await
    }

    /// 单次调用的超时限制
    async fn with_timeout<T, Fut>(&self, call: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let timeout = Duration::from_secs(self.config.timeout_seconds);
        tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| anyhow!("模型调用超时（{}秒）", self.config.timeout_seconds))?
    }
}

#[async_trait]
impl LanguageModel for LLMClient {
    async fn invoke(&self, request: ModelRequest) -> Result<String> {
        tracing::debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            messages = request.messages.len(),
            chars = request.content_len(),
            "invoking model"
        );
        self.retry_with_backoff(|| self.invoke_once(&request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn client_with(retry_attempts: u32, timeout_seconds: u64) -> LLMClient {
        LLMClient::new(LLMConfig {
            provider: crate::config::LLMProvider::OpenAI,
            api_key: "test-key".to_string(),
            retry_attempts,
            retry_delay_ms: 0,
            timeout_seconds,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_transient_failures() {
        let client = client_with(3, 300);
        let calls = AtomicU32::new(0);

        let result = client
            .retry_with_backoff(|| {
                let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if attempt < 3 {
                        Err(anyhow!("transient failure {}", attempt))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_retry_attempts_still_calls_once() {
        let client = client_with(0, 300);
        let calls = AtomicU32::new(0);

        let result: Result<()> = client
            .retry_with_backoff(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(anyhow!("quota exceeded")) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_last_error_returned_when_attempts_run_out() {
        let client = client_with(2, 300);
        let calls = AtomicU32::new(0);

        let err = client
            .retry_with_backoff(|| {
                let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Err::<(), _>(anyhow!("failure {}", attempt)) }
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "failure 2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_timeout_applies_to_pending_call() {
        let client = client_with(1, 0);

        let err = client
            .with_timeout(std::future::pending::<Result<String>>())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("超时"));

        let ok = client
            .with_timeout(async { Ok("done".to_string()) })
            .await
            .unwrap();
        assert_eq!(ok, "done");
    }
}
