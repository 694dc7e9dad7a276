// ==========================================
// War Room 工厂数据管线 - 管线错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 各阶段以显式 Result 返回，禁止在库代码中 panic
// ==========================================

use std::path::Path;
use thiserror::Error;

use crate::importer::ImportError;

/// 管线错误类型
///
/// 按失败环节分类，调用方（CLI、定时任务）可据此区分
/// 致命的输入问题与部分成功的情况。
#[derive(Error, Debug)]
pub enum PipelineError {
    // ===== 文档读取错误 =====
    #[error("文件读取失败: {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON 解析失败: {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ===== 数据校验错误 =====
    #[error("数据校验失败: {0}")]
    Validation(String),

    // ===== 文档写入错误 =====
    #[error("JSON 序列化失败: {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("文件写入失败: {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ===== 表格导入错误 =====
    #[error(transparent)]
    Import(#[from] ImportError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PipelineError {
    /// 构造读取错误（统一路径显示格式）
    pub fn load(path: &Path, source: std::io::Error) -> Self {
        PipelineError::Load {
            path: path.display().to_string(),
            source,
        }
    }

    /// 构造解析错误
    pub fn parse(path: &Path, source: serde_json::Error) -> Self {
        PipelineError::Parse {
            path: path.display().to_string(),
            source,
        }
    }

    /// 构造序列化错误
    pub fn serialize(path: &Path, source: serde_json::Error) -> Self {
        PipelineError::Serialize {
            path: path.display().to_string(),
            source,
        }
    }

    /// 构造写入错误
    pub fn write(path: &Path, source: std::io::Error) -> Self {
        PipelineError::Write {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Result 类型别名
pub type PipelineResult<T> = Result<T, PipelineError>;
