//! 搜索关键词扩展、优先来源与质量过滤规则

use serde::Serialize;

use crate::architecture::params::ResearchParameters;

/// 建筑行业基础关键词，前五个用于增强主查询
pub const ARCHITECTURE_KEYWORDS: &[&str] = &[
    "architecture trends",
    "building design",
    "construction innovation",
    "sustainable architecture",
    "green building",
    "smart buildings",
    "architectural materials",
    "design trends",
    "building technology",
    "energy efficiency",
    "LEED certification",
    "biophilic design",
    "modular construction",
    "prefab architecture",
];

/// 批量扩展查询时使用的术语，只取前三个
pub const QUERY_EXPANSION_TERMS: &[&str] = &[
    "architecture trends",
    "building design innovation",
    "sustainable construction",
    "smart building technology",
    "green architecture",
    "modular construction",
    "prefab housing",
    "energy efficient buildings",
    "LEED certified projects",
    "biophilic design",
];

const ENHANCED_QUERY_KEYWORDS: usize = 5;
const EXPANSION_TERMS_PER_QUERY: usize = 3;

/// 单个查询的增强结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEnhancement {
    pub enhanced_query: String,
    pub fallback_queries: Vec<String>,
    /// 完整关键词列表（含地点与年份相关词）
    pub keywords: Vec<String>,
}

/// 为单个查询生成增强查询与备选查询
pub fn enhance_search_keywords(base_query: &str, params: &ResearchParameters) -> SearchEnhancement {
    let mut keywords: Vec<String> = ARCHITECTURE_KEYWORDS.iter().map(|s| s.to_string()).collect();

    if let Some(location) = params.location() {
        keywords.extend([
            format!("{} architecture", location),
            format!("{} building codes", location),
            format!("{} construction trends", location),
            format!("{} real estate", location),
        ]);
    }

    let year = params.year();
    keywords.extend([
        format!("{} architecture trends", year),
        format!("{} building trends", year),
        format!("{} construction trends", year),
    ]);

    let enhanced_query = format!(
        "{} {}",
        base_query,
        keywords[..ENHANCED_QUERY_KEYWORDS].join(" ")
    );

    let fallback_queries = vec![
        format!("{} architecture design trends {}", base_query, year),
        format!(
            "{} building construction innovation {}",
            base_query,
            params.scope_label()
        ),
        format!("{} sustainable architecture {}", base_query, year),
        format!("{} smart building technology trends", base_query),
    ];

    SearchEnhancement {
        enhanced_query,
        fallback_queries,
        keywords,
    }
}

/// 批量扩展查询：每个查询与前三个术语组合，并按需附加地点与年份
pub fn expand_search_queries(
    base_queries: &[String],
    location: Option<&str>,
    year: Option<u16>,
) -> Vec<String> {
    let mut expanded = Vec::with_capacity(base_queries.len() * EXPANSION_TERMS_PER_QUERY);

    for query in base_queries {
        for term in QUERY_EXPANSION_TERMS.iter().take(EXPANSION_TERMS_PER_QUERY) {
            let mut q = format!("{} {}", query, term);
            if let Some(location) = location {
                q.push(' ');
                q.push_str(location);
            }
            if let Some(year) = year {
                q.push_str(&format!(" {}", year));
            }
            expanded.push(q);
        }
    }

    expanded
}

/// 优先来源域名
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePriorities {
    pub primary_sources: Vec<&'static str>,
    pub secondary_sources: Vec<&'static str>,
    pub academic_sources: Vec<&'static str>,
}

impl Default for SourcePriorities {
    fn default() -> Self {
        Self {
            primary_sources: vec![
                "archidaily.com",
                "dezeen.com",
                "architecturaldigest.com",
                "architecturalrecord.com",
                "metropolismag.com",
                "aia.org",
                "usgbc.org",
                "construction.com",
                "bdcnetwork.com",
                "greenbuildingadvisor.com",
            ],
            secondary_sources: vec![
                "archdaily.com",
                "designboom.com",
                "inhabitat.com",
                "treehugger.com",
                "constructiondive.com",
                "buildinggreendigital.com",
                "contractormag.com",
                "constructionexec.com",
            ],
            academic_sources: vec![
                "sciencedirect.com",
                "scholar.google.com",
                "researchgate.net",
                "ieee.org",
                "journals.sagepub.com",
            ],
        }
    }
}

impl SourcePriorities {
    /// 渲染为调研指引中的Markdown片段
    pub fn to_markdown(&self) -> String {
        format!(
            "**Priority Sources:**\n- Primary: {}\n- Secondary: {}\n- Academic: {}\n",
            self.primary_sources.join(", "),
            self.secondary_sources.join(", "),
            self.academic_sources.join(", ")
        )
    }
}

/// 偏好的发布年份区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start_year: u16,
    pub end_year: u16,
}

/// 来源质量过滤规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityFilters {
    pub required_keywords: Vec<&'static str>,
    pub preferred_date_range: DateRange,
    pub exclude_patterns: Vec<&'static str>,
    /// 最少词数
    pub minimum_content_length: usize,
    pub required_elements: Vec<&'static str>,
}

impl QualityFilters {
    pub fn for_year(year: u16) -> Self {
        Self {
            required_keywords: vec![
                "architecture",
                "building",
                "design",
                "construction",
                "sustainable",
                "trends",
                "innovation",
                "technology",
            ],
            preferred_date_range: DateRange {
                start_year: year.saturating_sub(2),
                end_year: year.saturating_add(1),
            },
            exclude_patterns: vec![
                "listicle",
                "top 10",
                "clickbait",
                "advertisement",
                "sponsored content",
                "press release",
            ],
            minimum_content_length: 500,
            required_elements: vec![
                "specific examples",
                "expert quotes",
                "quantitative data",
                "project details",
            ],
        }
    }

    /// 渲染为调研指引中的Markdown片段
    pub fn to_markdown(&self) -> String {
        format!(
            "**Source Quality Filters:**\n- Prefer publications from {} to {}\n- Skip content matching: {}\n- Minimum length: {} words\n- Must contain: {}\n",
            self.preferred_date_range.start_year,
            self.preferred_date_range.end_year,
            self.exclude_patterns.join(", "),
            self.minimum_content_length,
            self.required_elements.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_search_keywords_location_specific() {
        let params = ResearchParameters::new(Some("Tokyo, Japan".to_string()), Some(2026), None);
        let enhancement = enhance_search_keywords("timber housing", &params);

        assert_eq!(
            enhancement.enhanced_query,
            "timber housing architecture trends building design construction innovation sustainable architecture green building"
        );
        assert_eq!(
            enhancement.fallback_queries,
            vec![
                "timber housing architecture design trends 2026",
                "timber housing building construction innovation Tokyo, Japan",
                "timber housing sustainable architecture 2026",
                "timber housing smart building technology trends",
            ]
        );
        assert_eq!(enhancement.keywords.len(), ARCHITECTURE_KEYWORDS.len() + 4 + 3);
        assert!(enhancement.keywords.contains(&"Tokyo, Japan building codes".to_string()));
        assert!(enhancement.keywords.contains(&"2026 construction trends".to_string()));
    }

    #[test]
    fn test_enhance_search_keywords_global_scope() {
        let params = ResearchParameters::new(Some("Global".to_string()), None, None);
        let enhancement = enhance_search_keywords("offices", &params);

        assert_eq!(enhancement.keywords.len(), ARCHITECTURE_KEYWORDS.len() + 3);
        assert_eq!(
            enhancement.fallback_queries[1],
            "offices building construction innovation Global"
        );
    }

    #[test]
    fn test_expand_search_queries() {
        let queries = vec!["schools".to_string(), "hospitals".to_string()];

        let expanded = expand_search_queries(&queries, Some("Berlin, Germany"), Some(2027));

        assert_eq!(expanded.len(), 6);
        assert_eq!(expanded[0], "schools architecture trends Berlin, Germany 2027");
        assert_eq!(expanded[2], "schools sustainable construction Berlin, Germany 2027");
        assert_eq!(expanded[3], "hospitals architecture trends Berlin, Germany 2027");
    }

    #[test]
    fn test_expand_search_queries_without_suffixes() {
        let expanded = expand_search_queries(&["lofts".to_string()], None, None);
        assert_eq!(
            expanded,
            vec![
                "lofts architecture trends",
                "lofts building design innovation",
                "lofts sustainable construction",
            ]
        );
    }

    #[test]
    fn test_quality_filters_date_range() {
        let filters = QualityFilters::for_year(2025);
        assert_eq!(
            filters.preferred_date_range,
            DateRange {
                start_year: 2023,
                end_year: 2026
            }
        );
        assert_eq!(filters.minimum_content_length, 500);
    }

    #[test]
    fn test_source_priorities_markdown() {
        let markdown = SourcePriorities::default().to_markdown();
        assert!(markdown.contains("dezeen.com"));
        assert!(markdown.contains("researchgate.net"));
    }
}
