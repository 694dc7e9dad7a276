// ==========================================
// War Room 工厂数据管线 - 引擎层
// ==========================================
// 职责: 实现整合/合并/同步三套业务规则
// 红线: 引擎只处理内存文档，不做文件读写
// ==========================================

pub mod consolidator;
pub mod integrator;
pub mod normalize;
pub mod war_room_sync;

// 重导出核心引擎
pub use consolidator::{ConsolidationReport, ConsolidatorEngine};
pub use integrator::{IntegrationOutcome, IntegrationReport, IntegratorEngine};
pub use war_room_sync::{SyncReport, WarRoomSyncEngine};
