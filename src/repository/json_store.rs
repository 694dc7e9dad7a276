// ==========================================
// War Room 工厂数据管线 - JSON 文档读写
// ==========================================
// 职责: 整文档读入 / 整文档写出（2 空格缩进，UTF-8 原样输出）
// 写入纪律: 先写同目录 .tmp 再原子改名，写入中途崩溃不损坏旧文件
// ==========================================

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

/// 读取并反序列化 JSON 文档
pub fn load_json<T: DeserializeOwned>(path: &Path) -> PipelineResult<T> {
    let text = fs::read_to_string(path).map_err(|e| PipelineError::load(path, e))?;
    serde_json::from_str(&text).map_err(|e| PipelineError::parse(path, e))
}

/// 序列化并原子写出 JSON 文档
///
/// 输出 2 空格缩进，末尾不带换行，与读入方的既有格式一致。
pub fn save_json_atomic<T: Serialize>(path: &Path, value: &T) -> PipelineResult<()> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| PipelineError::serialize(path, e))?;

    let tmp_path = sibling_tmp_path(path);
    fs::write(&tmp_path, text.as_bytes()).map_err(|e| PipelineError::write(&tmp_path, e))?;

    if let Err(e) = fs::rename(&tmp_path, path) {
        // 改名失败时清理临时文件，保留旧文档
        let _ = fs::remove_file(&tmp_path);
        return Err(PipelineError::write(path, e));
    }

    Ok(())
}

/// 同目录临时文件路径: "<文件名>.tmp"
fn sibling_tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("document"));
    name.push(".tmp");
    path.with_file_name(name)
}
