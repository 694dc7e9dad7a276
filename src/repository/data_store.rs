// ==========================================
// War Room 工厂数据管线 - 数据文档仓储
// ==========================================
// 职责: 三份 JSON 文档的类型化读写入口
// 红线: 仓储不含业务逻辑；注册表读入与写出均做不变量校验
// ==========================================

use crate::config::DataPaths;
use crate::domain::{FacilityRecord, RegistryDocument, WarRoomDocument};
use crate::error::PipelineResult;
use crate::repository::json_store::{load_json, save_json_atomic};

// ==========================================
// DataStore - 数据文档仓储
// ==========================================
#[derive(Debug, Clone)]
pub struct DataStore {
    paths: DataPaths,
}

impl DataStore {
    pub fn new(paths: DataPaths) -> Self {
        DataStore { paths }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    // ===== 权威注册表 =====

    pub fn load_registry(&self) -> PipelineResult<RegistryDocument> {
        let registry: RegistryDocument = load_json(&self.paths.registry_path())?;
        registry.validate()?;
        Ok(registry)
    }

    pub fn save_registry(&self, registry: &RegistryDocument) -> PipelineResult<()> {
        registry.validate()?;
        save_json_atomic(&self.paths.registry_path(), registry)
    }

    // ===== 平面设施数据 =====

    pub fn load_facilities(&self) -> PipelineResult<Vec<FacilityRecord>> {
        load_json(&self.paths.facilities_path())
    }

    pub fn save_facilities(&self, facilities: &[FacilityRecord]) -> PipelineResult<()> {
        save_json_atomic(&self.paths.facilities_path(), &facilities)
    }

    // ===== 展示文档 =====

    pub fn load_war_room(&self) -> PipelineResult<WarRoomDocument> {
        load_json(&self.paths.war_room_path())
    }

    pub fn save_war_room(&self, doc: &WarRoomDocument) -> PipelineResult<()> {
        save_json_atomic(&self.paths.war_room_path(), doc)
    }
}
