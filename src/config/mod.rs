// ==========================================
// War Room 工厂数据管线 - 配置层
// ==========================================
// 职责: 静态查找表与数据文件路径
// 约定: 全部为不可变配置，构造时注入，不使用进程级可变全局量
// ==========================================

pub mod paths;
pub mod tables;

// 重导出核心配置类型
pub use paths::{DataPaths, DEFAULT_DATA_DIR, FACILITIES_FILE, REGISTRY_FILE, WAR_ROOM_FILE};
pub use tables::{GeocodeTable, SubsidiaryCatalog, SubsidiaryDefaults, SynonymTable};
