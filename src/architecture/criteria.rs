use serde::{Deserialize, Serialize};

/// 趋势报告校验标准
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValidationCriteria {
    pub content_requirements: ContentRequirements,
    pub quality_indicators: QualityIndicators,
    pub technical_depth: TechnicalDepth,
}

/// 内容要求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentRequirements {
    pub minimum_trends: usize,
    pub minimum_examples_per_trend: usize,
    pub minimum_sources: usize,
    pub required_sections: Vec<String>,
}

impl Default for ContentRequirements {
    fn default() -> Self {
        Self {
            minimum_trends: 3,
            minimum_examples_per_trend: 2,
            minimum_sources: 10,
            required_sections: vec![
                "Executive Summary".to_string(),
                "Current Market Landscape".to_string(),
                "Top Architecture Trends".to_string(),
                "Implementation Recommendations".to_string(),
                "Sources".to_string(),
            ],
        }
    }
}

/// 质量指标开关
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityIndicators {
    pub specific_project_examples: bool,
    pub cost_information: bool,
    pub timeline_projections: bool,
    pub expert_quotes: bool,
    pub quantitative_data: bool,
    pub regional_considerations: bool,
}

impl Default for QualityIndicators {
    fn default() -> Self {
        Self {
            specific_project_examples: true,
            cost_information: true,
            timeline_projections: true,
            expert_quotes: true,
            quantitative_data: true,
            regional_considerations: true,
        }
    }
}

/// 技术深度开关
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalDepth {
    pub material_specifications: bool,
    pub technology_details: bool,
    pub implementation_challenges: bool,
    pub regulatory_considerations: bool,
}

impl Default for TechnicalDepth {
    fn default() -> Self {
        Self {
            material_specifications: true,
            technology_details: true,
            implementation_challenges: true,
            regulatory_considerations: true,
        }
    }
}

/// 关键词类别检查：开启时，报告中至少出现一个关键词，否则给出建议
#[derive(Debug, Clone, Copy)]
pub struct KeywordCheck {
    pub keywords: &'static [&'static str],
    pub recommendation: &'static str,
}

pub const PROJECT_EXAMPLES_CHECK: KeywordCheck = KeywordCheck {
    keywords: &["project", "building"],
    recommendation: "Consider adding specific project examples",
};

pub const COST_CHECK: KeywordCheck = KeywordCheck {
    keywords: &["cost", "$", "budget", "price", "expensive", "affordable"],
    recommendation: "Consider adding cost analysis and budget implications",
};

pub const TIMELINE_CHECK: KeywordCheck = KeywordCheck {
    keywords: &["timeline", "by 20", "adoption", "forecast", "projected", "outlook"],
    recommendation: "Consider adding timeline projections for trend adoption",
};

pub const EXPERT_QUOTES_CHECK: KeywordCheck = KeywordCheck {
    keywords: &["according to", "said", "says", "quoted", "interview"],
    recommendation: "Consider adding expert quotes from practicing architects",
};

pub const QUANTITATIVE_CHECK: KeywordCheck = KeywordCheck {
    keywords: &["%", "percent", "million", "billion", "square feet", "square meters"],
    recommendation: "Consider adding quantitative data such as market size or adoption rates",
};

pub const REGIONAL_CHECK: KeywordCheck = KeywordCheck {
    keywords: &["region", "climate", "local"],
    recommendation: "Consider adding regional and climate considerations",
};

pub const MATERIALS_CHECK: KeywordCheck = KeywordCheck {
    keywords: &["material", "timber", "concrete", "steel", "glass", "composite"],
    recommendation: "Consider adding material specifications",
};

pub const TECHNOLOGY_CHECK: KeywordCheck = KeywordCheck {
    keywords: &["technology", "smart", "digital", "automation", "sensor", "software"],
    recommendation: "Consider adding technology and system details",
};

pub const CHALLENGES_CHECK: KeywordCheck = KeywordCheck {
    keywords: &["challenge", "barrier", "obstacle", "risk", "limitation"],
    recommendation: "Consider discussing implementation challenges",
};

pub const REGULATORY_CHECK: KeywordCheck = KeywordCheck {
    keywords: &["code", "regulation", "zoning", "permit", "compliance"],
    recommendation: "Consider adding regulatory and building code considerations",
};

impl ValidationCriteria {
    /// 当前开启的关键词检查，顺序固定
    pub fn enabled_checks(&self) -> Vec<KeywordCheck> {
        let q = &self.quality_indicators;
        let t = &self.technical_depth;
        [
            (q.specific_project_examples, PROJECT_EXAMPLES_CHECK),
            (q.cost_information, COST_CHECK),
            (q.timeline_projections, TIMELINE_CHECK),
            (q.expert_quotes, EXPERT_QUOTES_CHECK),
            (q.quantitative_data, QUANTITATIVE_CHECK),
            (q.regional_considerations, REGIONAL_CHECK),
            (t.material_specifications, MATERIALS_CHECK),
            (t.technology_details, TECHNOLOGY_CHECK),
            (t.implementation_challenges, CHALLENGES_CHECK),
            (t.regulatory_considerations, REGULATORY_CHECK),
        ]
        .into_iter()
        .filter_map(|(enabled, check)| enabled.then_some(check))
        .collect()
    }
}
