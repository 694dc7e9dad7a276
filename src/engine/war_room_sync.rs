// ==========================================
// War Room 工厂数据管线 - 地图文档同步引擎
// ==========================================
// 阶段 3: 权威注册表 -> 层级展示文档（namg 父组）
// 匹配: 名称匹配键优先于城市匹配键，同级取最小展示 id
// 坐标: 精确城市查表 -> 位置名子串回退 -> 保留旧值/哨兵
// 去重: 全文档按精确坐标分组，逐次递增对角偏移
// ==========================================

use std::collections::HashMap;

use serde_json::Map;

use crate::config::{GeocodeTable, SubsidiaryCatalog};
use crate::domain::war_room::{PARENT_GROUP_ID, STATUS_ACTIVE};
use crate::domain::{
    QuantumChart, RegistryDocument, Subsidiary, SubsidiaryMetrics, WarRoomDocument,
    WarRoomFactory,
};
use crate::engine::normalize::{clean_key, slugify};
use crate::error::{PipelineError, PipelineResult};

/// 新建展示工厂的默认资产数
const NEW_FACTORY_ASSETS: i64 = 10;

/// 新建展示实体的默认同步稳定度
const DEFAULT_SYNC_STABILITY: f64 = 95.0;

/// 无设施类型时的默认描述
const DEFAULT_FACTORY_DESCRIPTION: &str = "Manufacturing Facility";

/// 坐标碰撞偏移步长（纬度与经度同步递增）
const JITTER_STEP: f64 = 0.005;

// ==========================================
// SyncReport - 同步结果统计
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub synced: usize,
    pub created_subsidiaries: usize,
    pub created_factories: usize,
    pub jittered: usize,
    /// 未登记到子公司目录的制造商（首见顺序，去重）
    pub unmapped_manufacturers: Vec<i64>,
}

// ==========================================
// WarRoomSyncEngine - 同步引擎
// ==========================================
pub struct WarRoomSyncEngine {
    geocode: GeocodeTable,
    catalog: SubsidiaryCatalog,
}

impl WarRoomSyncEngine {
    pub fn new(geocode: GeocodeTable, catalog: SubsidiaryCatalog) -> Self {
        WarRoomSyncEngine { geocode, catalog }
    }

    /// 将注册表投影进展示文档
    ///
    /// 非 namg 父组不做投影，但坐标去重覆盖整个文档。
    pub fn sync(
        &self,
        doc: &mut WarRoomDocument,
        registry: &RegistryDocument,
    ) -> PipelineResult<SyncReport> {
        let mut report = SyncReport::default();

        let group = doc.namg_group_mut().ok_or_else(|| {
            PipelineError::Validation(format!("展示文档缺少父组 '{}'", PARENT_GROUP_ID))
        })?;

        // ===== 子公司目录全量建档（无工厂的子公司也建）=====
        for (_, slug) in self.catalog.mappings() {
            if group.subsidiaries.iter().any(|s| s.id == slug) {
                continue;
            }
            group.subsidiaries.push(self.build_subsidiary(slug));
            report.created_subsidiaries += 1;
        }

        // ===== 逐工厂投影 =====
        for factory in &registry.factories {
            let slug = match self.catalog.subsidiary_for(factory.manufacturer_id) {
                Some(slug) => slug,
                None => {
                    if !report.unmapped_manufacturers.contains(&factory.manufacturer_id) {
                        tracing::warn!(
                            "制造商 {} 未登记子公司目录，工厂 {} 不投影",
                            factory.manufacturer_id,
                            factory.factory_id
                        );
                        report.unmapped_manufacturers.push(factory.manufacturer_id);
                    }
                    continue;
                }
            };

            let Some(sub_idx) = group.subsidiaries.iter().position(|s| s.id == slug) else {
                continue;
            };
            let subsidiary = &mut group.subsidiaries[sub_idx];

            let location_name = factory.factory_location_name.as_str();
            let city = factory.city.clone().unwrap_or_default();

            // ===== 匹配（名称键优先，同级取最小展示 id）=====
            let matched_idx = match_factory(&subsidiary.factories, location_name, &city);

            let target_idx = match matched_idx {
                Some(idx) => idx,
                None => {
                    let new_factory = WarRoomFactory {
                        id: format!("{}-{}", slug, slugify(location_name)),
                        parent_group_id: PARENT_GROUP_ID.to_string(),
                        subsidiary_id: slug.to_string(),
                        name: location_name.to_string(),
                        city: city.clone(),
                        country: factory.country.clone(),
                        status: STATUS_ACTIVE.to_string(),
                        sync_stability: DEFAULT_SYNC_STABILITY,
                        assets: NEW_FACTORY_ASSETS,
                        incidents: 0,
                        description: factory
                            .facility_type
                            .clone()
                            .unwrap_or_else(|| DEFAULT_FACTORY_DESCRIPTION.to_string()),
                        logo: subsidiary.logo.clone(),
                        full_address: None,
                        facility_type: None,
                        notes: None,
                        coordinates: Default::default(),
                        extra: Map::new(),
                    };
                    subsidiary.factories.push(new_factory);
                    report.created_factories += 1;
                    subsidiary.factories.len() - 1
                }
            };

            // ===== 同步字段覆写（last-write-wins）=====
            let target = &mut subsidiary.factories[target_idx];
            target.full_address = factory.full_address.clone();
            target.facility_type = factory.facility_type.clone();
            target.notes = factory.notes.clone();

            // 坐标: 精确城市查表 -> 位置名子串回退 -> 保留既有值
            let resolved = self
                .geocode
                .lookup_city(&city)
                .or_else(|| self.geocode.lookup_in_name(location_name));
            if let Some(coords) = resolved {
                target.coordinates = coords;
            }

            report.synced += 1;
        }

        // ===== 坐标去重（全文档，文档顺序）=====
        report.jittered = dedupe_coordinates(doc);

        tracing::info!(
            "同步完成: 投影 {} 个工厂，新建子公司 {}，新建工厂 {}，坐标偏移 {}，未登记制造商 {} 个",
            report.synced,
            report.created_subsidiaries,
            report.created_factories,
            report.jittered,
            report.unmapped_manufacturers.len()
        );

        Ok(report)
    }

    /// 按目录默认值构造子公司（目录无默认时回退到大写 slug）
    fn build_subsidiary(&self, slug: &str) -> Subsidiary {
        let defaults = self.catalog.defaults_for(slug);
        Subsidiary {
            id: slug.to_string(),
            parent_group_id: PARENT_GROUP_ID.to_string(),
            name: defaults
                .map(|d| d.name.clone())
                .unwrap_or_else(|| slug.to_uppercase()),
            status: STATUS_ACTIVE.to_string(),
            metrics: SubsidiaryMetrics::default(),
            description: defaults.map(|d| d.description.clone()).unwrap_or_default(),
            location: String::new(),
            logo: defaults.and_then(|d| d.logo.clone()),
            quantum_chart: QuantumChart::default(),
            hubs: Vec::new(),
            factories: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// 在子公司内查找匹配的展示工厂
///
/// 名称匹配键相等优先于城市匹配键相等（城市键须非空）；
/// 同级多个候选时取展示 id 字典序最小者，保证与集合顺序无关。
fn match_factory(factories: &[WarRoomFactory], location_name: &str, city: &str) -> Option<usize> {
    let name_key = clean_key(location_name);
    let city_key = clean_key(city);

    let pick_smallest = |candidates: Vec<usize>| -> Option<usize> {
        candidates
            .into_iter()
            .min_by(|&a, &b| factories[a].id.cmp(&factories[b].id))
    };

    let name_matches: Vec<usize> = factories
        .iter()
        .enumerate()
        .filter(|(_, wf)| clean_key(&wf.name) == name_key)
        .map(|(idx, _)| idx)
        .collect();
    if !name_matches.is_empty() {
        return pick_smallest(name_matches);
    }

    if city_key.is_empty() {
        return None;
    }
    let city_matches: Vec<usize> = factories
        .iter()
        .enumerate()
        .filter(|(_, wf)| clean_key(&wf.city) == city_key)
        .map(|(idx, _)| idx)
        .collect();
    pick_smallest(city_matches)
}

/// 坐标去重: 相同坐标对的后续工厂按碰撞序号获得递增对角偏移
///
/// 分组使用 f64 位级精确相等；偏移后的坐标不再参与分组。
fn dedupe_coordinates(doc: &mut WarRoomDocument) -> usize {
    let mut seen: HashMap<(u64, u64), u64> = HashMap::new();
    let mut jittered = 0;

    for group in &mut doc.parent_groups {
        for subsidiary in &mut group.subsidiaries {
            for factory in &mut subsidiary.factories {
                if factory.coordinates.is_sentinel() {
                    continue;
                }
                let key = (
                    factory.coordinates.latitude.to_bits(),
                    factory.coordinates.longitude.to_bits(),
                );
                match seen.get_mut(&key) {
                    Some(count) => {
                        let jitter = JITTER_STEP * (*count as f64);
                        factory.coordinates.latitude += jitter;
                        factory.coordinates.longitude += jitter;
                        *count += 1;
                        jittered += 1;
                    }
                    None => {
                        seen.insert(key, 1);
                    }
                }
            }
        }
    }

    jittered
}
