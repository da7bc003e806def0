use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::generator::context::GeneratorContext;
use crate::generator::state::ResearchState;

pub const REPORT_FILE: &str = "trend_report.md";
pub const VALIDATION_FILE: &str = "validation.json";
pub const BRIEF_FILE: &str = "research_brief.md";

/// 保存调研结果
pub async fn save(context: &GeneratorContext, state: &ResearchState) -> Result<Vec<PathBuf>> {
    let outlet = DiskOutlet::new(&context.config.output_path);
    outlet.save(state).await
}

#[allow(async_fn_in_trait)]
pub trait Outlet {
    /// 返回实际写入的文件
    async fn save(&self, state: &ResearchState) -> Result<Vec<PathBuf>>;
}

/// 写入本地目录
///
/// 本次运行没有产出的结果文件会被删除，避免与上一次运行的结果混在一起；
/// 目录中的其他文件保持不变。
pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    async fn write(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("💾 已保存: {}", path.display());
        Ok(path)
    }

    /// 删除上一次运行留下的结果文件
    async fn remove_stale(&self, file_name: &str) -> Result<()> {
        let path = self.output_dir.join(file_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed stale output");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove stale {}", path.display()))
            }
        }
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, state: &ResearchState) -> Result<Vec<PathBuf>> {
        println!("\n🖊️ 报告存储中...");
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| {
                format!("Failed to create output dir {}", self.output_dir.display())
            })?;

        let validation = state
            .validation
            .as_ref()
            .map(serde_json::to_string_pretty)
            .transpose()?;
        let outputs = [
            (BRIEF_FILE, state.research_brief.as_deref()),
            (REPORT_FILE, state.final_report.as_deref()),
            (VALIDATION_FILE, validation.as_deref()),
        ];

        let mut written = Vec::new();
        for (file_name, content) in outputs {
            match content {
                Some(content) => written.push(self.write(file_name, content).await?),
                None => self.remove_stale(file_name).await?,
            }
        }

        if written.is_empty() {
            tracing::warn!(run_id = %state.run_id, "没有可保存的内容");
        }
        tracing::info!(
            run_id = %state.run_id,
            files = written.len(),
            output_dir = %self.output_dir.display(),
            "outputs saved"
        );
        Ok(written)
    }
}
