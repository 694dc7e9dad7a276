// ==========================================
// War Room 工厂数据管线 - 整合引擎
// ==========================================
// 阶段 1: 原始表格行 -> 更新注册表 + 平面设施数据
// 规则: 同义词解析制造商，(制造商, 小写位置名) 判重工厂
// 分配: 新标识一律取 max(现有)+1，缺失值为 null 而非空串
// ==========================================

use std::collections::HashMap;

use crate::config::SynonymTable;
use crate::domain::facility::{
    COL_CITY, COL_COMPANY, COL_COUNTRY, COL_FACILITY_TYPE, COL_STATE_PROVINCE,
};
use crate::domain::{FacilityRecord, Factory, Manufacturer, RegistryDocument};
use crate::engine::normalize::{derive_location_name, value_text};
use crate::importer::RawRow;

// ==========================================
// IntegrationReport - 整合结果统计
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct IntegrationReport {
    pub total_rows: usize,
    pub skipped_rows: usize,
    pub new_manufacturers: usize,
    pub new_factories: usize,
}

/// 整合结果: 平面设施数据 + 统计
#[derive(Debug, Clone)]
pub struct IntegrationOutcome {
    pub facilities: Vec<FacilityRecord>,
    pub report: IntegrationReport,
}

// ==========================================
// IntegratorEngine - 整合引擎
// ==========================================
pub struct IntegratorEngine {
    synonyms: SynonymTable,
}

impl IntegratorEngine {
    pub fn new(synonyms: SynonymTable) -> Self {
        IntegratorEngine { synonyms }
    }

    /// 整合原始表格行到注册表，产出平面设施数据
    ///
    /// 每行都会进入平面数据（原始列透传 + 已解析标识）；
    /// 缺少 Company 的行无法解析制造商，跳过并计数。
    pub fn integrate(
        &self,
        registry: &mut RegistryDocument,
        rows: &[RawRow],
    ) -> IntegrationOutcome {
        let mut report = IntegrationReport {
            total_rows: rows.len(),
            ..Default::default()
        };

        // 制造商名索引（小写标准名 -> id）
        let mut name_index: HashMap<String, i64> = registry
            .manufacturers
            .iter()
            .map(|m| (m.manufacturer_name.to_lowercase(), m.manufacturer_id))
            .collect();

        // 工厂判重键 -> 最小 factory_id（键冲突时取最小标识，保证确定性）
        let mut factory_keys: HashMap<(i64, String), i64> = HashMap::new();
        for f in &registry.factories {
            let key = (f.manufacturer_id, f.factory_location_name.to_lowercase());
            factory_keys
                .entry(key)
                .and_modify(|id| {
                    if f.factory_id < *id {
                        *id = f.factory_id;
                    }
                })
                .or_insert(f.factory_id);
        }

        let mut next_manufacturer_id = registry.max_manufacturer_id() + 1;
        let mut next_factory_id = registry.max_factory_id() + 1;

        let mut facilities = Vec::with_capacity(rows.len());

        for (row_idx, row) in rows.iter().enumerate() {
            let company = match row.get(COL_COMPANY).and_then(value_text) {
                Some(c) => c,
                None => {
                    tracing::warn!("第 {} 行缺少 Company 列，跳过", row_idx + 1);
                    report.skipped_rows += 1;
                    continue;
                }
            };

            // ===== 制造商解析（同义词 -> 标准键 -> 索引）=====
            let normalized = company.to_lowercase();
            let resolved = self.synonyms.resolve(&normalized);
            let manufacturer_id = match name_index.get(resolved) {
                Some(&id) => id,
                None => {
                    let id = next_manufacturer_id;
                    next_manufacturer_id += 1;
                    // 展示名保留原始拼写，索引键用标准名
                    registry.manufacturers.push(Manufacturer {
                        manufacturer_id: id,
                        manufacturer_name: company.clone(),
                    });
                    name_index.insert(resolved.to_string(), id);
                    report.new_manufacturers += 1;
                    tracing::info!("新增制造商: {} (id={})", company, id);
                    id
                }
            };

            // ===== 工厂解析（判重键命中取最小 id，否则分配）=====
            let facility_type = row.get(COL_FACILITY_TYPE).and_then(value_text);
            let city = row.get(COL_CITY).and_then(value_text);
            let location_name =
                derive_location_name(&company, facility_type.as_deref(), city.as_deref());

            let factory_key = (manufacturer_id, location_name.to_lowercase());
            let factory_id = match factory_keys.get(&factory_key) {
                Some(&id) => id,
                None => {
                    let id = next_factory_id;
                    next_factory_id += 1;
                    registry.factories.push(Factory {
                        factory_id: id,
                        manufacturer_id,
                        factory_location_name: location_name.clone(),
                        city: city.clone(),
                        state_province: row.get(COL_STATE_PROVINCE).and_then(value_text),
                        country: row.get(COL_COUNTRY).and_then(value_text),
                        full_address: None,
                        facility_type: None,
                        notes: None,
                    });
                    factory_keys.insert(factory_key, id);
                    report.new_factories += 1;
                    id
                }
            };

            // ===== 平面设施记录（原始列透传 + 标识）=====
            facilities.push(FacilityRecord {
                columns: row.clone(),
                manufacturer_id,
                factory_id,
            });
        }

        tracing::info!(
            "整合完成: 共 {} 行，跳过 {} 行，新增制造商 {}，新增工厂 {}",
            report.total_rows,
            report.skipped_rows,
            report.new_manufacturers,
            report.new_factories
        );

        IntegrationOutcome { facilities, report }
    }
}
