// ==========================================
// War Room 工厂数据管线 - 导入层
// ==========================================
// 职责: 外部表格数据读取，生成原始行记录
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod spreadsheet;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use spreadsheet::{
    CsvParser, ExcelParser, RawRow, SpreadsheetParser, UniversalSpreadsheetParser,
};
