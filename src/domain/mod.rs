// ==========================================
// War Room 工厂数据管线 - 领域模型层
// ==========================================
// 职责: 定义注册表、平面设施、展示文档三套实体
// 红线: 不含数据访问逻辑，不含引擎逻辑
// ==========================================

pub mod facility;
pub mod registry;
pub mod war_room;

// 重导出核心类型
pub use facility::FacilityRecord;
pub use registry::{Factory, Manufacturer, RegistryDocument};
pub use war_room::{
    Coordinates, ParentGroup, QuantumChart, Subsidiary, SubsidiaryMetrics, WarRoomDocument,
    WarRoomFactory, PARENT_GROUP_ID, STATUS_ACTIVE,
};
