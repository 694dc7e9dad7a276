// ==========================================
// War Room 工厂数据管线 - 平面设施记录
// ==========================================
// 对应文件: manufacturer-facilities.json（每行表格一条）
// 红线: 原始列逐字透传（缺失为 null），仅追加两个已解析标识
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::engine::normalize::value_text;

// 已知列名（表格口径）
pub const COL_COMPANY: &str = "Company";
pub const COL_FACILITY_TYPE: &str = "Facility Type";
pub const COL_CITY: &str = "City";
pub const COL_STATE_PROVINCE: &str = "State/Province";
pub const COL_COUNTRY: &str = "Country";
pub const COL_FULL_ADDRESS: &str = "Full Address";
pub const COL_NOTES: &str = "Notes";

// ==========================================
// FacilityRecord - 平面设施记录
// ==========================================
// 序列化顺序: 原始列在前（保持表格列顺序），标识在后
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityRecord {
    #[serde(flatten)]
    pub columns: Map<String, Value>,

    pub manufacturer_id: i64,
    pub factory_id: i64,
}

impl FacilityRecord {
    /// 读取指定列的文本值（trim 后非空才返回）
    pub fn text(&self, column: &str) -> Option<String> {
        self.columns.get(column).and_then(value_text)
    }

    pub fn company(&self) -> Option<String> {
        self.text(COL_COMPANY)
    }

    pub fn facility_type(&self) -> Option<String> {
        self.text(COL_FACILITY_TYPE)
    }

    pub fn city(&self) -> Option<String> {
        self.text(COL_CITY)
    }

    pub fn state_province(&self) -> Option<String> {
        self.text(COL_STATE_PROVINCE)
    }

    pub fn country(&self) -> Option<String> {
        self.text(COL_COUNTRY)
    }

    pub fn full_address(&self) -> Option<String> {
        self.text(COL_FULL_ADDRESS)
    }

    pub fn notes(&self) -> Option<String> {
        self.text(COL_NOTES)
    }
}
