//! 具名占位符模板渲染
//!
//! 模板中的 `{name}` 会被替换为对应的值，`{{` 与 `}}` 输出字面量花括号。
//! 模板引用了但调用方未提供的占位符视为配置错误，直接返回 [`TemplateError`]。

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template `{template}` references placeholder `{{{placeholder}}}` but no value was supplied")]
    MissingPlaceholder {
        template: String,
        placeholder: String,
    },
}

/// 模板变量集合
#[derive(Debug, Clone, Default)]
pub struct PromptVars {
    values: BTreeMap<String, String>,
}

impl PromptVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// 带名称的prompt模板，名称仅用于错误信息
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub body: &'static str,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, body: &'static str) -> Self {
        Self { name, body }
    }

    /// 渲染模板
    pub fn render(&self, vars: &PromptVars) -> Result<String, TemplateError> {
        render_template(self.name, self.body, vars)
    }

    /// 模板中引用的全部占位符名称（按首次出现顺序，去重）
    pub fn placeholders(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in PLACEHOLDER_PATTERN.captures_iter(self.body) {
            if let Some(name) = caps.get(1) {
                let name = name.as_str().to_string();
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

pub fn render_template(
    template_name: &str,
    body: &str,
    vars: &PromptVars,
) -> Result<String, TemplateError> {
    let mut rendered = String::with_capacity(body.len());
    let mut last_end = 0;

    for caps in PLACEHOLDER_PATTERN.captures_iter(body) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        rendered.push_str(&body[last_end..whole.start()]);

        match caps.get(1) {
            Some(name) => {
                let value = vars.get(name.as_str()).ok_or_else(|| {
                    TemplateError::MissingPlaceholder {
                        template: template_name.to_string(),
                        placeholder: name.as_str().to_string(),
                    }
                })?;
                rendered.push_str(value);
            }
            None => rendered.push_str(&whole.as_str()[..1]),
        }

        last_end = whole.end();
    }

    rendered.push_str(&body[last_end..]);
    Ok(rendered)
}
