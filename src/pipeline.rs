// ==========================================
// War Room 工厂数据管线 - 管线编排
// ==========================================
// 职责: 组合解析器/仓储/引擎，按阶段执行文件级批处理
// 执行模型: 单线程同步，一次性整文档读入-变换-写出
// ==========================================

use std::path::Path;

use crate::config::{DataPaths, GeocodeTable, SubsidiaryCatalog, SynonymTable};
use crate::engine::{
    ConsolidationReport, ConsolidatorEngine, IntegrationReport, IntegratorEngine, SyncReport,
    WarRoomSyncEngine,
};
use crate::error::PipelineResult;
use crate::importer::{RawRow, UniversalSpreadsheetParser};
use crate::repository::DataStore;

// ==========================================
// Pipeline - 管线编排器
// ==========================================
pub struct Pipeline {
    store: DataStore,
    parser: UniversalSpreadsheetParser,
    integrator: IntegratorEngine,
    consolidator: ConsolidatorEngine,
    sync_engine: WarRoomSyncEngine,
}

impl Pipeline {
    /// 用内置查找表构造管线
    pub fn new(paths: DataPaths) -> Self {
        Pipeline::with_tables(
            paths,
            SynonymTable::builtin(),
            GeocodeTable::builtin(),
            SubsidiaryCatalog::builtin(),
        )
    }

    /// 用指定查找表构造管线（测试可注入小表）
    pub fn with_tables(
        paths: DataPaths,
        synonyms: SynonymTable,
        geocode: GeocodeTable,
        catalog: SubsidiaryCatalog,
    ) -> Self {
        Pipeline {
            store: DataStore::new(paths),
            parser: UniversalSpreadsheetParser,
            integrator: IntegratorEngine::new(synonyms),
            consolidator: ConsolidatorEngine::new(),
            sync_engine: WarRoomSyncEngine::new(geocode, catalog),
        }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// 阶段 0: 提取 - 仅解析表格，产出原始行记录
    pub fn extract(&self, spreadsheet: &Path) -> PipelineResult<Vec<RawRow>> {
        Ok(self.parser.parse(spreadsheet)?)
    }

    /// 阶段 1: 整合 - 表格行并入注册表，写出注册表与平面设施数据
    pub fn integrate(&self, spreadsheet: &Path) -> PipelineResult<IntegrationReport> {
        let rows = self.extract(spreadsheet)?;
        let mut registry = self.store.load_registry()?;

        let outcome = self.integrator.integrate(&mut registry, &rows);

        self.store.save_registry(&registry)?;
        self.store.save_facilities(&outcome.facilities)?;
        Ok(outcome.report)
    }

    /// 阶段 2: 合并 - 平面设施数据按 factory_id 回写注册表
    pub fn consolidate(&self) -> PipelineResult<ConsolidationReport> {
        let mut registry = self.store.load_registry()?;
        let facilities = self.store.load_facilities()?;

        let report = self.consolidator.consolidate(&mut registry, &facilities);

        self.store.save_registry(&registry)?;
        Ok(report)
    }

    /// 阶段 3: 同步 - 注册表投影进展示文档
    pub fn sync(&self) -> PipelineResult<SyncReport> {
        let registry = self.store.load_registry()?;
        let mut doc = self.store.load_war_room()?;

        let report = self.sync_engine.sync(&mut doc, &registry)?;

        self.store.save_war_room(&doc)?;
        Ok(report)
    }

    /// 全流程: 整合 -> 合并 -> 同步
    pub fn run_all(
        &self,
        spreadsheet: &Path,
    ) -> PipelineResult<(IntegrationReport, ConsolidationReport, SyncReport)> {
        let integration = self.integrate(spreadsheet)?;
        let consolidation = self.consolidate()?;
        let sync = self.sync()?;
        Ok((integration, consolidation, sync))
    }
}
