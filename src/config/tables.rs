// ==========================================
// War Room 工厂数据管线 - 静态查找表
// ==========================================
// 职责: 同义词表 / 地理坐标表 / 子公司目录
// 约定: 不可变配置，构造时注入各引擎，测试可替换小表
// ==========================================

use std::collections::HashMap;

use crate::domain::Coordinates;

// ==========================================
// SynonymTable - 制造商同义词表
// ==========================================
// 键与值均为小写标准化形式
#[derive(Debug, Clone)]
pub struct SynonymTable {
    entries: HashMap<String, String>,
}

impl SynonymTable {
    /// 从 (别名, 标准名) 对构造
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        SynonymTable {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 内置同义词表
    pub fn builtin() -> Self {
        SynonymTable::from_pairs([
            ("nova bus", "nova"),
            ("arboc specialty vehicles", "arboc"),
            ("nfi / arboc", "arboc"),
            ("eldorado national", "enc (eldorado national)"),
            ("enc", "enc (eldorado national)"),
        ])
    }

    /// 空表（测试用）
    pub fn empty() -> Self {
        SynonymTable {
            entries: HashMap::new(),
        }
    }

    /// 解析同义词: 无映射时原样返回
    pub fn resolve<'a>(&'a self, normalized_name: &'a str) -> &'a str {
        self.entries
            .get(normalized_name)
            .map(String::as_str)
            .unwrap_or(normalized_name)
    }
}

// ==========================================
// GeocodeTable - 城市地理坐标表
// ==========================================
// 保持插入顺序: 子串回退按表序取第一个命中
#[derive(Debug, Clone)]
pub struct GeocodeTable {
    entries: Vec<(String, Coordinates)>,
}

impl GeocodeTable {
    /// 从 (城市键, 坐标) 对构造（键应为小写）
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Coordinates)>,
        S: Into<String>,
    {
        GeocodeTable {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// 内置坐标表（全部已知站点，含变体拼写）
    pub fn builtin() -> Self {
        let c = Coordinates::new;
        GeocodeTable::from_entries([
            // 加拿大
            ("winnipeg", c(49.8971, -97.0271)),
            ("saint-eustache", c(45.5488, -73.9201)),
            ("st. eustache", c(45.5488, -73.9201)),
            ("saint-françois-du-lac", c(46.0523, -72.8280)),
            ("saint-francois-du-lac", c(46.0523, -72.8280)),
            ("montréal", c(45.5786, -73.5414)),
            ("montreal", c(45.5786, -73.5414)),
            ("sainte-claire", c(46.5985, -70.8685)),
            ("lévis", c(46.7581, -71.2403)),
            ("levis", c(46.7581, -71.2403)),
            ("airdrie", c(51.2917, -114.0142)),
            ("richmond", c(49.1667, -123.1333)),
            ("mississauga", c(43.5890, -79.6441)),
            ("arnprior", c(45.4327, -76.3549)),
            // 美国
            ("crookston", c(47.7712, -96.6023)),
            ("st. cloud", c(45.4677, -94.1198)),
            ("anniston", c(33.6063, -85.8459)),
            ("jamestown", c(42.1010, -79.2070)),
            ("shepherdsville", c(38.0000, -85.7000)),
            ("pembina", c(48.9669, -97.2454)),
            ("plattsburgh", c(44.6995, -73.4529)),
            ("middlebury", c(41.6739, -85.7067)),
            ("blackwood", c(39.7578, -75.0503)),
            ("torrance", c(33.8358, -118.3406)),
            ("hayward", c(37.6688, -122.0808)),
            ("des plaines", c(42.0335, -87.8845)),
            ("dallas", c(32.7767, -96.7970)),
            ("newark", c(37.5255, -122.0355)),
            ("franklin park", c(41.9361, -87.8761)),
            ("south plainfield", c(40.5793, -74.4115)),
            ("secaucus", c(40.7896, -74.0565)),
            ("goodlettsville", c(36.3231, -86.7133)),
            ("fort worth", c(32.7555, -97.3308)),
            ("houston", c(29.7604, -95.3698)),
            ("jacksonville", c(30.3322, -81.6557)),
            ("winter garden", c(28.4070, -81.3061)),
            ("riverside", c(33.9533, -117.3961)),
            ("burlingame", c(37.5960, -122.3707)),
            ("orlando", c(28.4070, -81.3061)),
            // 其他地区
            ("maribor", c(46.5274, 15.6667)),
            ("nilufer", c(40.2311, 28.9328)),
            ("nilüfer", c(40.2311, 28.9328)),
            ("adana", c(36.9923, 35.1876)),
            ("istanbul", c(41.0119, 29.0269)),
            // 无具体城市时的国家级回退
            ("china", c(35.0000, 105.0000)),
        ])
    }

    /// 空表（测试用）
    pub fn empty() -> Self {
        GeocodeTable {
            entries: Vec::new(),
        }
    }

    /// 精确查找: 城市名 trim + 小写后全等匹配
    pub fn lookup_city(&self, city: &str) -> Option<Coordinates> {
        let key = city.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, coords)| *coords)
    }

    /// 子串回退: 位置名（小写）包含表键时按表序取第一个命中
    pub fn lookup_in_name(&self, location_name: &str) -> Option<Coordinates> {
        let haystack = location_name.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| haystack.contains(k.as_str()))
            .map(|(_, coords)| *coords)
    }
}

// ==========================================
// SubsidiaryCatalog - 制造商 -> 子公司目录
// ==========================================
#[derive(Debug, Clone)]
pub struct SubsidiaryDefaults {
    pub name: String,
    pub logo: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct SubsidiaryCatalog {
    // 保持插入顺序: 子公司按目录顺序创建
    mappings: Vec<(i64, String)>,
    defaults: HashMap<String, SubsidiaryDefaults>,
}

impl SubsidiaryCatalog {
    pub fn new(mappings: Vec<(i64, String)>) -> Self {
        SubsidiaryCatalog {
            mappings,
            defaults: HashMap::new(),
        }
    }

    pub fn with_defaults(
        mut self,
        slug: &str,
        name: &str,
        logo: Option<&str>,
        description: &str,
    ) -> Self {
        self.defaults.insert(
            slug.to_string(),
            SubsidiaryDefaults {
                name: name.to_string(),
                logo: logo.map(String::from),
                description: description.to_string(),
            },
        );
        self
    }

    /// 内置目录（manufacturer_id -> slug + 每个 slug 的默认描述字段）
    pub fn builtin() -> Self {
        SubsidiaryCatalog::new(vec![
            (1, "nova".to_string()),
            (2, "new-flyer".to_string()),
            (3, "arboc".to_string()),
            (4, "tam".to_string()),
            (5, "mci".to_string()),
            (6, "prevost".to_string()),
            (7, "enc".to_string()),
            (8, "karsan".to_string()),
            (9, "temsa".to_string()),
        ])
        .with_defaults(
            "nova",
            "Nova Bus",
            Some("/assets/images/Nova-Bus.png"),
            "High-capacity urban transit manufacturing.",
        )
        .with_defaults(
            "new-flyer",
            "New Flyer Industries",
            Some("/assets/images/New-Flyer.jpg"),
            "Zero-emission bus manufacturing and retrofits.",
        )
        .with_defaults(
            "arboc",
            "Arboc Specialty Vehicles",
            Some("/assets/images/NFI_Logo.png"),
            "Low-floor cutaway bus manufacturing.",
        )
        .with_defaults(
            "tam",
            "TAM",
            Some("/assets/images/svgs/user.svg"),
            "European bus and coach manufacturing.",
        )
        .with_defaults(
            "mci",
            "MCI (Motor Coach Industries)",
            Some("/assets/images/MCI_Logo.png"),
            "Premium motorcoach manufacturing.",
        )
        .with_defaults(
            "prevost",
            "Prevost",
            Some("/assets/images/Prevost_Logo.png"),
            "Luxury coach and motor caravan manufacturing.",
        )
        .with_defaults(
            "enc",
            "ENC",
            Some("/assets/images/svgs/user.svg"),
            "Specialized transit bus manufacturing.",
        )
        .with_defaults(
            "karsan",
            "Karsan",
            Some("/assets/images/KARSAN.jpg"),
            "European electric bus production.",
        )
        .with_defaults(
            "temsa",
            "TEMSA",
            Some("/assets/images/TEMSA_Logo_Black.svg"),
            "Global motorcoach and transit manufacturer.",
        )
    }

    /// 制造商对应的子公司 slug（未登记返回 None）
    pub fn subsidiary_for(&self, manufacturer_id: i64) -> Option<&str> {
        self.mappings
            .iter()
            .find(|(m_id, _)| *m_id == manufacturer_id)
            .map(|(_, slug)| slug.as_str())
    }

    /// 全部映射（目录顺序）
    pub fn mappings(&self) -> impl Iterator<Item = (i64, &str)> {
        self.mappings.iter().map(|(m_id, slug)| (*m_id, slug.as_str()))
    }

    /// slug 的默认描述字段
    pub fn defaults_for(&self, slug: &str) -> Option<&SubsidiaryDefaults> {
        self.defaults.get(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonym_resolution() {
        let table = SynonymTable::builtin();
        assert_eq!(table.resolve("nova bus"), "nova");
        assert_eq!(table.resolve("enc"), "enc (eldorado national)");
        assert_eq!(table.resolve("eldorado national"), "enc (eldorado national)");
        // 无映射时原样返回
        assert_eq!(table.resolve("tam"), "tam");
    }

    #[test]
    fn test_geocode_exact_lookup() {
        let table = GeocodeTable::builtin();
        let coords = table.lookup_city(" Winnipeg ").unwrap();
        assert_eq!(coords.latitude, 49.8971);
        assert!(table.lookup_city("Unknown City").is_none());
        assert!(table.lookup_city("").is_none());
    }

    #[test]
    fn test_geocode_st_eustache_spellings() {
        let table = GeocodeTable::builtin();
        let a = table.lookup_city("St. Eustache").unwrap();
        let b = table.lookup_city("Saint-Eustache").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.latitude, 45.5488);
        assert_eq!(a.longitude, -73.9201);
    }

    #[test]
    fn test_geocode_substring_fallback_in_table_order() {
        let table = GeocodeTable::builtin();
        let coords = table.lookup_in_name("Winnipeg (New Flyer)").unwrap();
        assert_eq!(coords.latitude, 49.8971);
        // 国家级回退
        let coords = table.lookup_in_name("TAM Facility China").unwrap();
        assert_eq!(coords.latitude, 35.0);
        assert!(table.lookup_in_name("Nowhere Facility").is_none());
    }

    #[test]
    fn test_catalog_mapping_and_defaults() {
        let catalog = SubsidiaryCatalog::builtin();
        assert_eq!(catalog.subsidiary_for(1), Some("nova"));
        assert_eq!(catalog.subsidiary_for(99), None);
        let defaults = catalog.defaults_for("new-flyer").unwrap();
        assert_eq!(defaults.name, "New Flyer Industries");
        // 目录顺序稳定
        let slugs: Vec<&str> = catalog.mappings().map(|(_, s)| s).collect();
        assert_eq!(slugs[0], "nova");
        assert_eq!(slugs[8], "temsa");
    }
}
