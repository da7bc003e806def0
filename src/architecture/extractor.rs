//! 从对话消息中提取地点与年份
//!
//! 两个字段都采用"跨全部消息的首个匹配"：后出现的消息不会覆盖先前的结果。
//! 地点按关键词表顺序决胜，年份按消息顺序取第一个。

use regex::Regex;
use std::sync::LazyLock;

use crate::architecture::params::ResearchParameters;

/// 关键词 -> 规范地点，按顺序扫描
pub const LOCATION_KEYWORDS: &[(&str, &str)] = &[
    ("new york", "New York, USA"),
    ("california", "California, USA"),
    ("london", "London, UK"),
    ("tokyo", "Tokyo, Japan"),
    ("paris", "Paris, France"),
    ("berlin", "Berlin, Germany"),
    ("sydney", "Sydney, Australia"),
    ("toronto", "Toronto, Canada"),
    ("usa", "United States"),
    ("europe", "Europe"),
    ("asia", "Asia"),
];

pub const MIN_EXTRACTED_YEAR: u16 = 2024;
pub const MAX_EXTRACTED_YEAR: u16 = 2035;

// 前后不能紧挨其他数字，避免把 "20245" 读成 2024
static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)(20(?:2[4-9]|3[0-5]))(?:\D|$)").expect("year pattern is valid")
});

/// 提取结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedHints {
    pub location: Option<&'static str>,
    pub year: Option<u16>,
}

impl ExtractedHints {
    /// 显式指定的值优先，其次是提取结果，最后由默认参数补全
    pub fn into_parameters(
        self,
        explicit_location: Option<String>,
        explicit_year: Option<u16>,
        industry_focus: Option<String>,
        defaults: &ResearchParameters,
    ) -> ResearchParameters {
        ResearchParameters::with_defaults(
            explicit_location.or_else(|| self.location.map(str::to_string)),
            explicit_year.or(self.year),
            industry_focus,
            defaults,
        )
    }
}

/// 地点/年份提取器
pub struct LocationYearExtractor;

impl LocationYearExtractor {
    pub fn extract<M: AsRef<str>>(messages: &[M]) -> ExtractedHints {
        let lowered: Vec<String> = messages
            .iter()
            .map(|m| m.as_ref().to_lowercase())
            .collect();

        ExtractedHints {
            location: Self::extract_location(&lowered),
            year: Self::extract_year(&lowered),
        }
    }

    fn extract_location(lowered: &[String]) -> Option<&'static str> {
        LOCATION_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.iter().any(|text| text.contains(keyword)))
            .map(|(_, canonical)| *canonical)
    }

    fn extract_year(lowered: &[String]) -> Option<u16> {
        lowered.iter().find_map(|text| {
            YEAR_PATTERN
                .captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u16>().ok())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;

    #[test]
    fn test_extracts_tokyo_case_insensitively() {
        let messages = vec![ChatMessage::user("Residential trends in TOKYO please")];
        let hints = LocationYearExtractor::extract(&messages);
        assert_eq!(hints.location, Some("Tokyo, Japan"));
    }

    #[test]
    fn test_table_order_breaks_ties_not_message_order() {
        let messages = vec![
            ChatMessage::user("I work in Tokyo"),
            ChatMessage::user("but the project is in London"),
        ];
        let hints = LocationYearExtractor::extract(&messages);
        assert_eq!(hints.location, Some("London, UK"));
    }

    #[test]
    fn test_new_york_wins_over_usa() {
        let hints = LocationYearExtractor::extract(&["Office design in New York, USA"]);
        assert_eq!(hints.location, Some("New York, USA"));
    }

    #[test]
    fn test_no_keyword_leaves_location_unset() {
        let hints = LocationYearExtractor::extract(&["What is happening in Lagos?"]);
        assert_eq!(hints.location, None);
    }

    #[test]
    fn test_year_in_range_is_extracted() {
        for year in MIN_EXTRACTED_YEAR..=MAX_EXTRACTED_YEAR {
            let text = format!("Trends for {} and beyond", year);
            let hints = LocationYearExtractor::extract(&[text]);
            assert_eq!(hints.year, Some(year));
        }
    }

    #[test]
    fn test_years_outside_range_are_ignored() {
        let hints = LocationYearExtractor::extract(&["Back in 2019 and in 2023, then 2036 and 2100"]);
        assert_eq!(hints.year, None);
    }

    #[test]
    fn test_year_embedded_in_longer_number_is_ignored() {
        let hints = LocationYearExtractor::extract(&["budget 120250 units", "order #20301"]);
        assert_eq!(hints.year, None);

        let hints = LocationYearExtractor::extract(&["FY2027 pipeline"]);
        assert_eq!(hints.year, Some(2027));
    }

    #[test]
    fn test_first_year_wins_across_messages() {
        let hints = LocationYearExtractor::extract(&[
            "no year here",
            "Looking at 2026 or maybe 2030",
            "actually 2028",
        ]);
        assert_eq!(hints.year, Some(2026));
    }

    #[test]
    fn test_into_parameters_uses_defaults() {
        let defaults = ResearchParameters::default();

        let params = LocationYearExtractor::extract(&["anything"])
            .into_parameters(None, None, None, &defaults);
        assert_eq!(params.location(), Some("United States"));
        assert_eq!(params.year(), 2025);

        let params = LocationYearExtractor::extract(&["Paris in 2031"]).into_parameters(
            None,
            None,
            Some("Hospitality".to_string()),
            &defaults,
        );
        assert_eq!(params.location(), Some("Paris, France"));
        assert_eq!(params.year(), 2031);
        assert_eq!(params.industry_focus(), "Hospitality");
    }

    #[test]
    fn test_into_parameters_explicit_values_win() {
        let defaults = ResearchParameters::default();

        let params = LocationYearExtractor::extract(&["Paris in 2031"]).into_parameters(
            Some("Global".to_string()),
            Some(2029),
            None,
            &defaults,
        );
        assert_eq!(params.location(), None);
        assert_eq!(params.year(), 2029);

        let params = LocationYearExtractor::extract(&["Paris in 2031"]).into_parameters(
            None,
            Some(2029),
            None,
            &defaults,
        );
        assert_eq!(params.location(), Some("Paris, France"));
        assert_eq!(params.year(), 2029);
    }
}
