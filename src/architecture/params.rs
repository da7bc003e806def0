use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCATION: &str = "United States";
pub const DEFAULT_YEAR: u16 = 2025;
pub const DEFAULT_INDUSTRY_FOCUS: &str = "Architecture & Construction";

/// 表示全球范围（不做地域定制）的地点取值
pub const GLOBAL_SCOPE: &str = "Global";

/// 单次调研请求的参数，构造后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchParameters {
    location: Option<String>,
    year: u16,
    industry_focus: String,
}

impl Default for ResearchParameters {
    fn default() -> Self {
        Self {
            location: Some(DEFAULT_LOCATION.to_string()),
            year: DEFAULT_YEAR,
            industry_focus: DEFAULT_INDUSTRY_FOCUS.to_string(),
        }
    }
}

impl ResearchParameters {
    /// 未提供的字段取默认值；地点为 `"Global"` 时表示全球范围
    pub fn new(location: Option<String>, year: Option<u16>, industry_focus: Option<String>) -> Self {
        let defaults = Self::default();
        Self::with_defaults(location, year, industry_focus, &defaults)
    }

    /// 以给定的默认参数补全未提供的字段
    pub fn with_defaults(
        location: Option<String>,
        year: Option<u16>,
        industry_focus: Option<String>,
        defaults: &ResearchParameters,
    ) -> Self {
        let location = match location {
            Some(loc) if loc.trim().is_empty() => defaults.location.clone(),
            Some(loc) if loc.eq_ignore_ascii_case(GLOBAL_SCOPE) => None,
            Some(loc) => Some(loc),
            None => defaults.location.clone(),
        };
        Self {
            location,
            year: year.unwrap_or(defaults.year),
            industry_focus: industry_focus
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| defaults.industry_focus.clone()),
        }
    }

    /// 具体地点；全球范围时为None
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// 用于展示的地理范围
    pub fn scope_label(&self) -> &str {
        self.location.as_deref().unwrap_or(GLOBAL_SCOPE)
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn industry_focus(&self) -> &str {
        &self.industry_focus
    }
}
