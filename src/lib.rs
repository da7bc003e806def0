pub mod architecture;
pub mod cli;
pub mod config;
pub mod generator;
pub mod llm;
pub mod utils;

// Re-export commonly used types
pub use architecture::{
    ArchitectureEnhancer, LocationYearExtractor, ReportValidator, ResearchParameters,
    ValidationCriteria, ValidationResult,
};
pub use config::Config;
pub use generator::context::GeneratorContext;
pub use generator::state::{ParameterOverrides, ResearchState};
pub use generator::workflow::{ResearchPipeline, Task, launch};
pub use llm::{ChatMessage, LanguageModel, ModelRequest};
