// ==========================================
// War Room 工厂数据管线 - 合并引擎
// ==========================================
// 阶段 2: 平面设施数据按 factory_id 回写注册表
// 规则: 富化字段 last-write-wins（缺失列覆写为 null）
// 补录: 仅存在于平面数据的 factory_id 合成新注册表记录
// ==========================================

use std::collections::HashMap;

use crate::domain::{FacilityRecord, Factory, RegistryDocument};
use crate::engine::normalize::derive_location_name;

// ==========================================
// ConsolidationReport - 合并结果统计
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConsolidationReport {
    pub enriched: usize,
    pub appended: usize,
}

// ==========================================
// ConsolidatorEngine - 合并引擎
// ==========================================
pub struct ConsolidatorEngine;

impl ConsolidatorEngine {
    pub fn new() -> Self {
        ConsolidatorEngine
    }

    /// 将平面设施数据合并进注册表
    ///
    /// 对稳定输入幂等: 相同输入重复执行产出逐字节相同的注册表。
    pub fn consolidate(
        &self,
        registry: &mut RegistryDocument,
        facilities: &[FacilityRecord],
    ) -> ConsolidationReport {
        let mut report = ConsolidationReport::default();

        // factory_id -> 平面记录（同一 id 多条时后者覆盖前者）
        let mut facility_map: HashMap<i64, &FacilityRecord> = HashMap::new();
        for record in facilities {
            facility_map.insert(record.factory_id, record);
        }

        // ===== 富化既有注册表记录 =====
        for factory in &mut registry.factories {
            if let Some(record) = facility_map.get(&factory.factory_id) {
                factory.full_address = record.full_address();
                factory.facility_type = record.facility_type();
                factory.notes = record.notes();
                report.enriched += 1;
            }
        }

        // ===== 补录仅存在于平面数据的工厂 =====
        let existing_ids: Vec<i64> = registry.factories.iter().map(|f| f.factory_id).collect();
        for (&factory_id, record) in &facility_map {
            if existing_ids.contains(&factory_id) {
                continue;
            }

            let company = record.company().unwrap_or_default();
            let city = record.city();
            let facility_type = record.facility_type();
            let location_name =
                derive_location_name(&company, facility_type.as_deref(), city.as_deref());

            registry.factories.push(Factory {
                factory_id,
                manufacturer_id: record.manufacturer_id,
                factory_location_name: location_name,
                city,
                state_province: record.state_province(),
                country: record.country(),
                full_address: record.full_address(),
                facility_type,
                notes: record.notes(),
            });
            report.appended += 1;
        }

        // 输出顺序固定: 按 factory_id 升序
        registry.factories.sort_by_key(|f| f.factory_id);

        tracing::info!(
            "合并完成: 富化 {} 条，补录 {} 条",
            report.enriched,
            report.appended
        );

        report
    }
}

impl Default for ConsolidatorEngine {
    fn default() -> Self {
        ConsolidatorEngine::new()
    }
}
