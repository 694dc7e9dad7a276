// ==========================================
// War Room 工厂数据管线 - 数据文件路径
// ==========================================
// 职责: 集中管理三份 JSON 文档的落盘位置
// 默认: 仪表盘静态资源目录 public/assets/data
// ==========================================

use std::path::{Path, PathBuf};

/// 默认数据目录（相对项目根）
pub const DEFAULT_DATA_DIR: &str = "public/assets/data";

/// 权威注册表文件名
pub const REGISTRY_FILE: &str = "factories.json";

/// 平面设施数据文件名
pub const FACILITIES_FILE: &str = "manufacturer-facilities.json";

/// 展示文档文件名
pub const WAR_ROOM_FILE: &str = "fluorescence-map-data.json";

// ==========================================
// DataPaths - 数据目录与文档路径
// ==========================================
#[derive(Debug, Clone)]
pub struct DataPaths {
    data_dir: PathBuf,
}

impl DataPaths {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        DataPaths {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// factories.json - 权威注册表
    pub fn registry_path(&self) -> PathBuf {
        self.data_dir.join(REGISTRY_FILE)
    }

    /// manufacturer-facilities.json - 平面设施数据
    pub fn facilities_path(&self) -> PathBuf {
        self.data_dir.join(FACILITIES_FILE)
    }

    /// fluorescence-map-data.json - 展示文档
    pub fn war_room_path(&self) -> PathBuf {
        self.data_dir.join(WAR_ROOM_FILE)
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths::new(DEFAULT_DATA_DIR)
    }
}
