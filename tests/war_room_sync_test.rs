// ==========================================
// WarRoomSyncEngine 集成测试
// ==========================================
// 测试目标: 子公司建档、工厂匹配、坐标解析、去重偏移
// ==========================================


use war_room_data::config::{GeocodeTable, SubsidiaryCatalog};
use war_room_data::domain::{Coordinates, RegistryDocument};
use war_room_data::engine::WarRoomSyncEngine;
use war_room_data::error::PipelineError;
use war_room_data::logging;
use test_helpers::{factory, manufacturer, namg_document, seed_registry, subsidiary, war_room_factory};

fn builtin_engine() -> WarRoomSyncEngine {
    WarRoomSyncEngine::new(GeocodeTable::builtin(), SubsidiaryCatalog::builtin())
}

fn empty_registry() -> RegistryDocument {
    RegistryDocument {
        manufacturers: Vec::new(),
        factories: Vec::new(),
    }
}

#[test]
fn test_all_cataloged_subsidiaries_created_up_front() {
    logging::init_test();

    let mut doc = namg_document();
    let report = builtin_engine().sync(&mut doc, &empty_registry()).unwrap();

    // 无工厂的子公司也要建档
    assert_eq!(report.created_subsidiaries, 9);
    let group = &doc.parent_groups[0];
    assert_eq!(group.subsidiaries.len(), 9);

    let nova = group.subsidiaries.iter().find(|s| s.id == "nova").unwrap();
    assert_eq!(nova.name, "Nova Bus");
    assert_eq!(nova.status, "ACTIVE");
    assert_eq!(nova.metrics.asset_count, 0);
    assert_eq!(nova.metrics.sync_stability, 95.0);
    assert_eq!(nova.quantum_chart.data_points, vec![50, 60, 55, 70, 65, 80]);
    assert_eq!(nova.quantum_chart.highlighted_index, 5);
    assert_eq!(nova.logo.as_deref(), Some("/assets/images/Nova-Bus.png"));
}

#[test]
fn test_uncataloged_slug_falls_back_to_uppercase_name() {
    logging::init_test();

    let catalog = SubsidiaryCatalog::new(vec![(1, "solaris".to_string())]);
    let engine = WarRoomSyncEngine::new(GeocodeTable::empty(), catalog);

    let mut doc = namg_document();
    engine.sync(&mut doc, &empty_registry()).unwrap();

    let sub = &doc.parent_groups[0].subsidiaries[0];
    assert_eq!(sub.id, "solaris");
    assert_eq!(sub.name, "SOLARIS");
    assert_eq!(sub.description, "");
    assert_eq!(sub.logo, None);
}

#[test]
fn test_existing_subsidiary_not_duplicated() {
    logging::init_test();

    let mut doc = namg_document();
    doc.parent_groups[0].subsidiaries.push(subsidiary("nova"));

    let report = builtin_engine().sync(&mut doc, &empty_registry()).unwrap();

    assert_eq!(report.created_subsidiaries, 8);
    let nova_count = doc.parent_groups[0]
        .subsidiaries
        .iter()
        .filter(|s| s.id == "nova")
        .count();
    assert_eq!(nova_count, 1);
}

#[test]
fn test_new_factory_fields_and_derived_id() {
    logging::init_test();

    let mut registry = seed_registry();
    registry.factories[0].facility_type = Some("Final Assembly".to_string());
    registry.factories[0].full_address = Some("1000 Boul. Industriel".to_string());

    let mut doc = namg_document();
    let report = builtin_engine().sync(&mut doc, &registry).unwrap();

    assert_eq!(report.synced, 5);
    assert_eq!(report.created_factories, 5);

    let group = &doc.parent_groups[0];
    let nova = group.subsidiaries.iter().find(|s| s.id == "nova").unwrap();
    let f = &nova.factories[0];
    // slug 派生: 逐字符替换非字母数字为 '-'，不折叠
    assert_eq!(f.id, "nova-st--eustache--nova-");
    assert_eq!(f.name, "St. Eustache (Nova)");
    assert_eq!(f.city, "St. Eustache");
    assert_eq!(f.country.as_deref(), Some("Canada"));
    assert_eq!(f.status, "ACTIVE");
    assert_eq!(f.sync_stability, 95.0);
    assert_eq!(f.assets, 10);
    assert_eq!(f.incidents, 0);
    assert_eq!(f.description, "Final Assembly");
    // logo 继承子公司
    assert_eq!(f.logo.as_deref(), Some("/assets/images/Nova-Bus.png"));
    assert_eq!(f.full_address.as_deref(), Some("1000 Boul. Industriel"));
}

#[test]
fn test_description_defaults_when_facility_type_missing() {
    logging::init_test();

    let registry = seed_registry();
    let mut doc = namg_document();
    builtin_engine().sync(&mut doc, &registry).unwrap();

    let nova = doc.parent_groups[0]
        .subsidiaries
        .iter()
        .find(|s| s.id == "nova")
        .unwrap();
    assert_eq!(nova.factories[0].description, "Manufacturing Facility");
}

#[test]
fn test_st_eustache_scenario_exact_city_coordinates() {
    logging::init_test();

    // 端到端场景: 基线工厂 1 同步后落在 nova 子公司并取得精确城市坐标
    let registry = seed_registry();
    let mut doc = namg_document();
    builtin_engine().sync(&mut doc, &registry).unwrap();

    let nova = doc.parent_groups[0]
        .subsidiaries
        .iter()
        .find(|s| s.id == "nova")
        .unwrap();
    let f = &nova.factories[0];
    assert_eq!(f.coordinates.latitude, 45.5488);
    assert_eq!(f.coordinates.longitude, -73.9201);
    // 权威记录无地址时 fullAddress 为 null
    assert_eq!(f.full_address, None);
}

#[test]
fn test_match_by_clean_name_key_updates_in_place() {
    logging::init_test();

    let mut registry = seed_registry();
    registry.factories[0].full_address = Some("new address".to_string());

    let mut doc = namg_document();
    let mut sub = subsidiary("nova");
    // 名称匹配键相同（标点与大小写无关）: "st eustache nova" == "St. Eustache (Nova)"
    sub.factories
        .push(war_room_factory("nova-old", "nova", "st eustache nova", ""));
    doc.parent_groups[0].subsidiaries.push(sub);

    let report = builtin_engine().sync(&mut doc, &registry).unwrap();

    // 工厂 1 匹配到既有条目，不新建
    assert_eq!(report.created_factories, 4);
    let nova = doc.parent_groups[0]
        .subsidiaries
        .iter()
        .find(|s| s.id == "nova")
        .unwrap();
    let matched = nova.factories.iter().find(|f| f.id == "nova-old").unwrap();
    assert_eq!(matched.full_address.as_deref(), Some("new address"));
    // 名称保留展示层原值，不被权威名覆盖
    assert_eq!(matched.name, "st eustache nova");
}

#[test]
fn test_match_by_city_key_when_name_differs() {
    logging::init_test();

    let registry = RegistryDocument {
        manufacturers: vec![manufacturer(1, "Nova")],
        factories: vec![factory(
            1,
            1,
            "Nova Northeast Hub",
            Some("Plattsburgh"),
            Some("New York"),
            Some("USA"),
        )],
    };

    let mut doc = namg_document();
    let mut sub = subsidiary("nova");
    sub.factories.push(war_room_factory(
        "nova-plattsburgh",
        "nova",
        "Plattsburgh Service Center",
        "Plattsburgh",
    ));
    doc.parent_groups[0].subsidiaries.push(sub);

    let report = builtin_engine().sync(&mut doc, &registry).unwrap();

    assert_eq!(report.created_factories, 0);
    assert_eq!(report.synced, 1);
}

#[test]
fn test_name_match_beats_city_match() {
    logging::init_test();

    let registry = RegistryDocument {
        manufacturers: vec![manufacturer(1, "Nova")],
        factories: vec![factory(
            1,
            1,
            "St. Eustache (Nova)",
            Some("St. Eustache"),
            Some("Quebec"),
            Some("Canada"),
        )],
    };

    let mut doc = namg_document();
    let mut sub = subsidiary("nova");
    // 城市键相同但名称不同的干扰项在前
    sub.factories.push(war_room_factory(
        "nova-a-city-only",
        "nova",
        "Nova Assembly East",
        "St. Eustache",
    ));
    sub.factories.push(war_room_factory(
        "nova-b-exact-name",
        "nova",
        "St. Eustache (Nova)",
        "St. Eustache",
    ));
    doc.parent_groups[0].subsidiaries.push(sub);

    let mut registry_addr = registry.clone();
    registry_addr.factories[0].notes = Some("exact".to_string());

    builtin_engine().sync(&mut doc, &registry_addr).unwrap();

    let nova = doc.parent_groups[0]
        .subsidiaries
        .iter()
        .find(|s| s.id == "nova")
        .unwrap();
    // 名称匹配优先于城市匹配，即使城市匹配项排在前面
    let exact = nova
        .factories
        .iter()
        .find(|f| f.id == "nova-b-exact-name")
        .unwrap();
    assert_eq!(exact.notes.as_deref(), Some("exact"));
    let city_only = nova
        .factories
        .iter()
        .find(|f| f.id == "nova-a-city-only")
        .unwrap();
    assert_eq!(city_only.notes, None);
}

#[test]
fn test_city_tie_resolved_by_smallest_presentation_id() {
    logging::init_test();

    let registry = RegistryDocument {
        manufacturers: vec![manufacturer(1, "Nova")],
        factories: vec![factory(
            1,
            1,
            "Nova Quebec Operations",
            Some("Montreal"),
            Some("Quebec"),
            Some("Canada"),
        )],
    };

    let mut doc = namg_document();
    let mut sub = subsidiary("nova");
    // 两个同城候选，集合顺序与 id 字典序相反
    sub.factories.push(war_room_factory(
        "nova-z-montreal",
        "nova",
        "Montreal Plant B",
        "Montreal",
    ));
    sub.factories.push(war_room_factory(
        "nova-a-montreal",
        "nova",
        "Montreal Plant A",
        "Montreal",
    ));
    doc.parent_groups[0].subsidiaries.push(sub);

    let mut registry_marked = registry.clone();
    registry_marked.factories[0].notes = Some("winner".to_string());

    builtin_engine().sync(&mut doc, &registry_marked).unwrap();

    let nova = doc.parent_groups[0]
        .subsidiaries
        .iter()
        .find(|s| s.id == "nova")
        .unwrap();
    // 同级平手取最小展示 id，与集合顺序无关
    let winner = nova
        .factories
        .iter()
        .find(|f| f.id == "nova-a-montreal")
        .unwrap();
    assert_eq!(winner.notes.as_deref(), Some("winner"));
    let loser = nova
        .factories
        .iter()
        .find(|f| f.id == "nova-z-montreal")
        .unwrap();
    assert_eq!(loser.notes, None);
}

#[test]
fn test_substring_fallback_resolves_coordinates() {
    logging::init_test();

    let registry = RegistryDocument {
        manufacturers: vec![manufacturer(4, "TAM")],
        factories: vec![factory(
            // 城市缺失，位置名含国家级表键 "china"
            7,
            4,
            "TAM China Facility",
            None,
            None,
            Some("China"),
        )],
    };

    let mut doc = namg_document();
    builtin_engine().sync(&mut doc, &registry).unwrap();

    let tam = doc.parent_groups[0]
        .subsidiaries
        .iter()
        .find(|s| s.id == "tam")
        .unwrap();
    assert_eq!(tam.factories[0].coordinates.latitude, 35.0);
    assert_eq!(tam.factories[0].coordinates.longitude, 105.0);
}

#[test]
fn test_unknown_city_keeps_sentinel_coordinates() {
    logging::init_test();

    let registry = RegistryDocument {
        manufacturers: vec![manufacturer(1, "Nova")],
        factories: vec![factory(
            1,
            1,
            "Nova Remote Site",
            Some("Unknown City"),
            None,
            None,
        )],
    };

    let mut doc = namg_document();
    builtin_engine().sync(&mut doc, &registry).unwrap();

    let nova = doc.parent_groups[0]
        .subsidiaries
        .iter()
        .find(|s| s.id == "nova")
        .unwrap();
    assert!(nova.factories[0].coordinates.is_sentinel());
}

#[test]
fn test_unresolved_lookup_keeps_previous_coordinates() {
    logging::init_test();

    let registry = RegistryDocument {
        manufacturers: vec![manufacturer(1, "Nova")],
        factories: vec![factory(
            1,
            1,
            "Nova Remote Site",
            Some("Unknown City"),
            None,
            None,
        )],
    };

    let mut doc = namg_document();
    let mut sub = subsidiary("nova");
    let mut existing = war_room_factory("nova-remote", "nova", "Nova Remote Site", "Unknown City");
    existing.coordinates = Coordinates::new(12.34, 56.78);
    sub.factories.push(existing);
    doc.parent_groups[0].subsidiaries.push(sub);

    builtin_engine().sync(&mut doc, &registry).unwrap();

    let nova = doc.parent_groups[0]
        .subsidiaries
        .iter()
        .find(|s| s.id == "nova")
        .unwrap();
    // 查表失败时保留上次运行的非哨兵坐标
    assert_eq!(nova.factories[0].coordinates.latitude, 12.34);
    assert_eq!(nova.factories[0].coordinates.longitude, 56.78);
}

#[test]
fn test_jitter_is_deterministic_and_diagonal() {
    logging::init_test();

    // 三座工厂解析到同一坐标，按文档顺序获得 0 / +0.005 / +0.010 偏移
    let mut doc = namg_document();
    let mut sub = subsidiary("nova");
    for idx in 0..3 {
        let mut f = war_room_factory(
            &format!("nova-site-{}", idx),
            "nova",
            &format!("Site {}", idx),
            "",
        );
        f.coordinates = Coordinates::new(40.0, -74.0);
        sub.factories.push(f);
    }
    doc.parent_groups[0].subsidiaries.push(sub);

    let engine = WarRoomSyncEngine::new(GeocodeTable::empty(), SubsidiaryCatalog::new(Vec::new()));
    let report = engine.sync(&mut doc, &empty_registry()).unwrap();

    assert_eq!(report.jittered, 2);
    let factories = &doc.parent_groups[0].subsidiaries[0].factories;
    let expected = [(40.0, -74.0), (40.005, -73.995), (40.010, -73.990)];
    for (f, (lat, lon)) in factories.iter().zip(expected) {
        assert!((f.coordinates.latitude - lat).abs() < 1e-9);
        assert!((f.coordinates.longitude - lon).abs() < 1e-9);
    }
}

#[test]
fn test_jitter_skips_sentinel_coordinates() {
    logging::init_test();

    let mut doc = namg_document();
    let mut sub = subsidiary("nova");
    for idx in 0..2 {
        sub.factories.push(war_room_factory(
            &format!("nova-unknown-{}", idx),
            "nova",
            &format!("Unknown {}", idx),
            "",
        ));
    }
    doc.parent_groups[0].subsidiaries.push(sub);

    let engine = WarRoomSyncEngine::new(GeocodeTable::empty(), SubsidiaryCatalog::new(Vec::new()));
    let report = engine.sync(&mut doc, &empty_registry()).unwrap();

    // 哨兵坐标不参与去重
    assert_eq!(report.jittered, 0);
    for f in &doc.parent_groups[0].subsidiaries[0].factories {
        assert!(f.coordinates.is_sentinel());
    }
}

#[test]
fn test_unmapped_manufacturers_are_reported_not_projected() {
    logging::init_test();

    let registry = RegistryDocument {
        manufacturers: vec![manufacturer(1, "Nova"), manufacturer(42, "Mystery Coach")],
        factories: vec![
            factory(1, 1, "St. Eustache (Nova)", Some("St. Eustache"), None, None),
            factory(2, 42, "Mystery Plant", Some("Dallas"), None, None),
            factory(3, 42, "Mystery Depot", Some("Houston"), None, None),
        ],
    };

    let mut doc = namg_document();
    let report = builtin_engine().sync(&mut doc, &registry).unwrap();

    assert_eq!(report.synced, 1);
    // 去重后仅记一次，首见顺序
    assert_eq!(report.unmapped_manufacturers, vec![42]);
    // 未登记制造商的工厂不出现在任何子公司
    let total: usize = doc.parent_groups[0]
        .subsidiaries
        .iter()
        .map(|s| s.factories.len())
        .sum();
    assert_eq!(total, 1);
}

#[test]
fn test_non_namg_groups_pass_through() {
    logging::init_test();

    let mut doc = namg_document();
    let mut other = test_helpers::subsidiary("emea-ops");
    other.factories.push(war_room_factory(
        "emea-1",
        "emea-ops",
        "Maribor Plant",
        "Maribor",
    ));
    doc.parent_groups.push(war_room_data::domain::ParentGroup {
        id: "emea".to_string(),
        subsidiaries: vec![other],
        extra: serde_json::Map::new(),
    });

    builtin_engine().sync(&mut doc, &seed_registry()).unwrap();

    // 非 namg 父组不做投影：子公司数量与工厂内容保持不变
    let emea = doc.parent_groups.iter().find(|g| g.id == "emea").unwrap();
    assert_eq!(emea.subsidiaries.len(), 1);
    assert_eq!(emea.subsidiaries[0].factories.len(), 1);
    assert_eq!(emea.subsidiaries[0].factories[0].name, "Maribor Plant");
}

#[test]
fn test_missing_namg_group_is_validation_error() {
    logging::init_test();

    let mut doc = namg_document();
    doc.parent_groups[0].id = "other".to_string();

    let result = builtin_engine().sync(&mut doc, &empty_registry());
    assert!(matches!(result, Err(PipelineError::Validation(_))));
}
