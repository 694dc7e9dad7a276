// ==========================================
// War Room 工厂数据管线 - 核心库
// ==========================================
// 系统定位: 批处理数据准备工具（客车制造商工厂数据）
// 数据流向: 表格提取 -> 注册表整合 -> 数据合并 -> 地图文档同步
// 技术栈: Rust + serde_json（纯文件批处理，无数据库）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与文档模型
pub mod domain;

// 数据仓储层 - JSON 文档读写
pub mod repository;

// 引擎层 - 整合/合并/同步规则
pub mod engine;

// 导入层 - 外部表格数据
pub mod importer;

// 配置层 - 静态查找表与路径
pub mod config;

// 管线编排
pub mod pipeline;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    Coordinates, FacilityRecord, Factory, Manufacturer, ParentGroup, RegistryDocument,
    Subsidiary, SubsidiaryMetrics, WarRoomDocument, WarRoomFactory,
};

// 引擎
pub use engine::{
    ConsolidationReport, ConsolidatorEngine, IntegrationOutcome, IntegrationReport,
    IntegratorEngine, SyncReport, WarRoomSyncEngine,
};

// 配置
pub use config::{DataPaths, GeocodeTable, SubsidiaryCatalog, SubsidiaryDefaults, SynonymTable};

// 仓储与编排
pub use pipeline::Pipeline;
pub use repository::DataStore;

// 错误
pub use error::{PipelineError, PipelineResult};
pub use importer::{ImportError, ImportResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "War Room 工厂数据管线";
