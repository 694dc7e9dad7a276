// ==========================================
// War Room 工厂数据管线 - 注册表领域模型
// ==========================================
// 对应文件: factories.json（制造商/工厂权威标识）
// 红线: factory_id / manufacturer_id 全局唯一，永不复用
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{PipelineError, PipelineResult};

// ==========================================
// Manufacturer - 制造商
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manufacturer {
    pub manufacturer_id: i64,  // 稳定唯一标识
    pub manufacturer_name: String, // 展示名称（保留原始拼写）
}

// ==========================================
// Factory - 工厂（权威记录）
// ==========================================
// 新建判重键: (manufacturer_id, lower(factory_location_name))
// 富化字段由合并阶段写入，未合并时不落盘
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Factory {
    // ===== 标识 =====
    pub factory_id: i64,
    pub manufacturer_id: i64,

    // ===== 位置信息 =====
    pub factory_location_name: String, // "{city} ({company})" 或 "{facility_type} ({company})"
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub country: Option<String>,

    // ===== 富化字段（合并阶段写入，last-write-wins）=====
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ==========================================
// RegistryDocument - 权威注册表文档
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryDocument {
    pub manufacturers: Vec<Manufacturer>,
    pub factories: Vec<Factory>,
}

impl RegistryDocument {
    /// 校验注册表不变量
    ///
    /// - manufacturer_id 两两互异
    /// - factory_id 两两互异
    /// - 每个工厂的 manufacturer_id 必须引用已存在的制造商
    pub fn validate(&self) -> PipelineResult<()> {
        let mut manufacturer_ids = HashSet::new();
        for m in &self.manufacturers {
            if !manufacturer_ids.insert(m.manufacturer_id) {
                return Err(PipelineError::Validation(format!(
                    "重复的 manufacturer_id: {}",
                    m.manufacturer_id
                )));
            }
        }

        let mut factory_ids = HashSet::new();
        for f in &self.factories {
            if !factory_ids.insert(f.factory_id) {
                return Err(PipelineError::Validation(format!(
                    "重复的 factory_id: {}",
                    f.factory_id
                )));
            }
            if !manufacturer_ids.contains(&f.manufacturer_id) {
                return Err(PipelineError::Validation(format!(
                    "工厂 {} 引用了不存在的 manufacturer_id: {}",
                    f.factory_id, f.manufacturer_id
                )));
            }
        }

        Ok(())
    }

    /// 当前最大制造商 ID（空表为 0）
    pub fn max_manufacturer_id(&self) -> i64 {
        self.manufacturers
            .iter()
            .map(|m| m.manufacturer_id)
            .max()
            .unwrap_or(0)
    }

    /// 当前最大工厂 ID（空表为 0）
    pub fn max_factory_id(&self) -> i64 {
        self.factories
            .iter()
            .map(|f| f.factory_id)
            .max()
            .unwrap_or(0)
    }
}
