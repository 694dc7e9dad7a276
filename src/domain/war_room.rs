// ==========================================
// War Room 工厂数据管线 - 地图展示文档模型
// ==========================================
// 对应文件: fluorescence-map-data.json（仪表盘视图模型）
// 红线: 未知键原样透传，非 namg 父组不做任何改动
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// namg 父组标识（同步目标）
pub const PARENT_GROUP_ID: &str = "namg";

/// 展示实体默认状态
pub const STATUS_ACTIVE: &str = "ACTIVE";

// ==========================================
// Coordinates - 地理坐标
// ==========================================
// (0, 0) 为哨兵值，表示"未解析到地理坐标"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Coordinates {
    fn default() -> Self {
        Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }

    /// 是否为哨兵坐标 (0, 0)
    pub fn is_sentinel(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

// ==========================================
// SubsidiaryMetrics - 子公司指标块
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsidiaryMetrics {
    pub asset_count: i64,
    pub incident_count: i64,
    pub sync_stability: f64,
}

impl Default for SubsidiaryMetrics {
    fn default() -> Self {
        SubsidiaryMetrics {
            asset_count: 0,
            incident_count: 0,
            sync_stability: 95.0,
        }
    }
}

// ==========================================
// QuantumChart - 子公司迷你图载荷
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantumChart {
    pub data_points: Vec<i64>,
    pub highlighted_index: i64,
}

impl Default for QuantumChart {
    fn default() -> Self {
        QuantumChart {
            data_points: vec![50, 60, 55, 70, 65, 80],
            highlighted_index: 5,
        }
    }
}

// ==========================================
// WarRoomFactory - 展示层工厂
// ==========================================
// 标识由子公司 slug + 位置名 slug 派生，与权威 factory_id 无共享键
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarRoomFactory {
    pub id: String,
    pub parent_group_id: String,
    pub subsidiary_id: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: Option<String>,
    pub status: String,
    pub sync_stability: f64,
    pub assets: i64,
    pub incidents: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: Option<String>,

    // ===== 同步字段（每次同步覆写，last-write-wins）=====
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub facility_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub coordinates: Coordinates,

    // ===== 透传字段 =====
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ==========================================
// Subsidiary - 子公司容器
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsidiary {
    pub id: String,
    pub parent_group_id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub metrics: SubsidiaryMetrics,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub quantum_chart: QuantumChart,
    #[serde(default)]
    pub hubs: Vec<Value>,
    #[serde(default)]
    pub factories: Vec<WarRoomFactory>,

    // ===== 透传字段 =====
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ==========================================
// ParentGroup / WarRoomDocument
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentGroup {
    pub id: String,
    #[serde(default)]
    pub subsidiaries: Vec<Subsidiary>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarRoomDocument {
    pub parent_groups: Vec<ParentGroup>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WarRoomDocument {
    /// 查找 namg 父组（同步目标）
    pub fn namg_group_mut(&mut self) -> Option<&mut ParentGroup> {
        self.parent_groups
            .iter_mut()
            .find(|g| g.id == PARENT_GROUP_ID)
    }
}
