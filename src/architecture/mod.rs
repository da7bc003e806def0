//! 建筑行业趋势报告定制
//!
//! - params: 单次调研参数（地点、年份、行业）
//! - extractor: 从对话中提取地点与年份
//! - enhancer: 参数渲染为prompt、搜索词、报告包装
//! - validator: 报告质量校验

pub mod criteria;
pub mod enhancer;
pub mod extractor;
pub mod params;
pub mod prompts;
pub mod search;
pub mod validator;

pub use criteria::ValidationCriteria;
pub use enhancer::ArchitectureEnhancer;
pub use extractor::{ExtractedHints, LocationYearExtractor};
pub use params::ResearchParameters;
pub use validator::{ReportValidator, ValidationResult};
