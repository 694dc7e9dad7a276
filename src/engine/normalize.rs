// ==========================================
// War Room 工厂数据管线 - 文本标准化
// ==========================================
// 职责: TRIM / NULL 标准化 / 匹配键与 slug 派生
// ==========================================

use serde_json::Value;

/// trim 后为空则视为 null
pub fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// JSON 值 -> 文本（trim 后非空才返回）
///
/// 数值与布尔值转为其字面文本，null 与空串返回 None。
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => blank_to_none(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 匹配键: 去除全部非 ASCII 字母数字字符并小写
///
/// "St. Eustache (Nova)" -> "steustachenova"
pub fn clean_key(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// slug 派生: 小写后逐字符把非 ASCII 字母数字替换为 '-'
///
/// 不折叠连续的 '-'，保证同一位置名始终产生同一 slug。
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// 位置名派生规则
///
/// 城市非空: "{city} ({company})"；否则: "{facility_type} ({company})"
pub fn derive_location_name(
    company: &str,
    facility_type: Option<&str>,
    city: Option<&str>,
) -> String {
    match city {
        Some(c) if !c.trim().is_empty() => format!("{} ({})", c.trim(), company),
        _ => format!("{} ({})", facility_type.unwrap_or("").trim(), company),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none("  Nova  ").as_deref(), Some("Nova"));
        assert_eq!(blank_to_none("   "), None);
        assert_eq!(blank_to_none(""), None);
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!(" Nova ")).as_deref(), Some("Nova"));
        assert_eq!(value_text(&json!(450)).as_deref(), Some("450"));
        assert_eq!(value_text(&Value::Null), None);
        assert_eq!(value_text(&json!("")), None);
    }

    #[test]
    fn test_clean_key() {
        assert_eq!(clean_key("St. Eustache (Nova)"), "steustachenova");
        assert_eq!(clean_key("Nilüfer"), "nilfer"); // 非 ASCII 字符被剔除
        assert_eq!(clean_key(""), "");
    }

    #[test]
    fn test_slugify_replaces_each_character() {
        // 每个非字母数字字符对应一个 '-'，不折叠
        assert_eq!(slugify("St. Eustache (Nova)"), "st--eustache--nova-");
        assert_eq!(slugify("TAM Facility"), "tam-facility");
    }

    #[test]
    fn test_derive_location_name() {
        assert_eq!(
            derive_location_name("Nova Bus", Some("Assembly"), Some("St. Eustache")),
            "St. Eustache (Nova Bus)"
        );
        assert_eq!(
            derive_location_name("TAM", Some("Assembly"), None),
            "Assembly (TAM)"
        );
        assert_eq!(
            derive_location_name("TAM", None, Some("  ")),
            " (TAM)"
        );
    }
}
