//! LLM Provider支持模块

use anyhow::Result;
use rig::{
    agent::Agent,
    client::CompletionClient,
    completion::{Chat, Message},
    providers::gemini::completion::gemini_api_types::{AdditionalParameters, GenerationConfig},
};

use crate::config::{LLMConfig, LLMProvider};
use crate::llm::client::types::{ChatMessage, ChatTurns, MessageRole};

/// 统一的Provider客户端枚举
#[derive(Clone)]
pub enum ProviderClient {
    OpenAI(rig::providers::openai::Client),
    Moonshot(rig::providers::moonshot::Client),
    DeepSeek(rig::providers::deepseek::Client),
    Mistral(rig::providers::mistral::Client),
    OpenRouter(rig::providers::openrouter::Client),
    Anthropic(rig::providers::anthropic::Client),
    Gemini(rig::providers::gemini::Client),
    Ollama(rig::providers::ollama::Client),
}

/// 单次调用的Agent参数
#[derive(Debug, Clone, Copy)]
pub struct AgentSettings<'a> {
    pub model: &'a str,
    pub preamble: &'a str,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ProviderClient {
    /// 根据配置创建相应的provider客户端
    pub fn new(config: &LLMConfig) -> Result<Self> {
        match config.provider {
            LLMProvider::OpenAI => {
                let client = rig::providers::openai::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::OpenAI(client))
            }
            LLMProvider::Moonshot => {
                let client = rig::providers::moonshot::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::Moonshot(client))
            }
            LLMProvider::DeepSeek => {
                let client = rig::providers::deepseek::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::DeepSeek(client))
            }
            LLMProvider::Mistral => {
                let client = rig::providers::mistral::Client::builder(&config.api_key).build();
                Ok(ProviderClient::Mistral(client))
            }
            LLMProvider::OpenRouter => {
                let client = rig::providers::openrouter::Client::builder(&config.api_key).build();
                Ok(ProviderClient::OpenRouter(client))
            }
            LLMProvider::Anthropic => {
                let client =
                    rig::providers::anthropic::ClientBuilder::new(&config.api_key).build()?;
                Ok(ProviderClient::Anthropic(client))
            }
            LLMProvider::Gemini => {
                let client = rig::providers::gemini::Client::builder(&config.api_key).build()?;
                Ok(ProviderClient::Gemini(client))
            }
            LLMProvider::Ollama => {
                let client = rig::providers::ollama::Client::builder().build();
                Ok(ProviderClient::Ollama(client))
            }
        }
    }

    /// 创建Agent
    pub fn create_agent(&self, settings: AgentSettings<'_>) -> Result<ProviderAgent> {
        let max_tokens: u64 = settings.max_tokens.into();
        let agent = match self {
            ProviderClient::OpenAI(client) => ProviderAgent::OpenAI(
                client
                    .completion_model(settings.model)
                    .completions_api()
                    .into_agent_builder()
                    .preamble(settings.preamble)
                    .max_tokens(max_tokens)
                    .temperature(settings.temperature)
                    .build(),
            ),
            ProviderClient::Moonshot(client) => ProviderAgent::Moonshot(
                client
                    .agent(settings.model)
                    .preamble(settings.preamble)
                    .max_tokens(max_tokens)
                    .temperature(settings.temperature)
                    .build(),
            ),
            ProviderClient::DeepSeek(client) => ProviderAgent::DeepSeek(
                client
                    .agent(settings.model)
                    .preamble(settings.preamble)
                    .max_tokens(max_tokens)
                    .temperature(settings.temperature)
                    .build(),
            ),
            ProviderClient::Mistral(client) => ProviderAgent::Mistral(
                client
                    .agent(settings.model)
                    .preamble(settings.preamble)
                    .max_tokens(max_tokens)
                    .temperature(settings.temperature)
                    .build(),
            ),
            ProviderClient::OpenRouter(client) => ProviderAgent::OpenRouter(
                client
                    .agent(settings.model)
                    .preamble(settings.preamble)
                    .max_tokens(max_tokens)
                    .temperature(settings.temperature)
                    .build(),
            ),
            ProviderClient::Anthropic(client) => ProviderAgent::Anthropic(
                client
                    .agent(settings.model)
                    .preamble(settings.preamble)
                    .max_tokens(max_tokens)
                    .temperature(settings.temperature)
                    .build(),
            ),
            ProviderClient::Gemini(client) => {
                let gen_cfg = GenerationConfig::default();
                let cfg = AdditionalParameters::default().with_config(gen_cfg);

                ProviderAgent::Gemini(
                    client
                        .agent(settings.model)
                        .preamble(settings.preamble)
                        .max_tokens(max_tokens)
                        .temperature(settings.temperature)
                        .additional_params(serde_json::to_value(cfg)?)
                        .build(),
                )
            }
            ProviderClient::Ollama(client) => ProviderAgent::Ollama(
                client
                    .agent(settings.model)
                    .preamble(settings.preamble)
                    .max_tokens(max_tokens)
                    .temperature(settings.temperature)
                    .build(),
            ),
        };
        Ok(agent)
    }
}

/// 统一的Agent枚举
pub enum ProviderAgent {
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    Mistral(Agent<rig::providers::mistral::CompletionModel>),
    OpenRouter(Agent<rig::providers::openrouter::CompletionModel>),
    Anthropic(Agent<rig::providers::anthropic::completion::CompletionModel>),
    Gemini(Agent<rig::providers::gemini::completion::CompletionModel>),
    Moonshot(Agent<rig::providers::moonshot::CompletionModel>),
    DeepSeek(Agent<rig::providers::deepseek::CompletionModel>),
    Ollama(Agent<rig::providers::ollama::CompletionModel<reqwest::Client>>),
}

fn to_rig_message(message: &ChatMessage) -> Message {
    match message.role {
        MessageRole::Assistant => Message::assistant(message.content.clone()),
        // system消息已并入preamble，这里只会出现user
        MessageRole::User | MessageRole::System => Message::user(message.content.clone()),
    }
}

impl ProviderAgent {
    /// 执行带历史的对话
    pub async fn chat(&self, turns: &ChatTurns) -> Result<String> {
        let prompt = turns.prompt.as_str();
        let history: Vec<Message> = turns.history.iter().map(to_rig_message).collect();

        match self {
            ProviderAgent::OpenAI(agent) => agent.chat(prompt, history).await.map_err(|e| e.into()),
            ProviderAgent::Moonshot(agent) => {
                agent.chat(prompt, history).await.map_err(|e| e.into())
            }
            ProviderAgent::DeepSeek(agent) => {
                agent.chat(prompt, history).await.map_err(|e| e.into())
            }
            ProviderAgent::Mistral(agent) => {
                agent.chat(prompt, history).await.map_err(|e| e.into())
            }
            ProviderAgent::OpenRouter(agent) => {
                agent.chat(prompt, history).await.map_err(|e| e.into())
            }
            ProviderAgent::Anthropic(agent) => {
                agent.chat(prompt, history).await.map_err(|e| e.into())
            }
            ProviderAgent::Gemini(agent) => agent.chat(prompt, history).await.map_err(|e| e.into()),
            ProviderAgent::Ollama(agent) => agent.chat(prompt, history).await.map_err(|e| e.into()),
        }
    }
}
