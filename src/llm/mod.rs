pub mod client;

pub use client::{ChatMessage, LLMClient, LanguageModel, MessageRole, ModelRequest};
