//! 半结构化扩展字段（extras）的解析
//!
//! 历史客户端对同一概念用过多种键名拼写。所有拼写集中在
//! 这里的常量表里按优先级排列：解析时按序探测，第一个能
//! 取到可用值的键生效，绝不合并多个键的值。将来再出现新
//! 拼写时只需在表里加一行。

use serde_json::Value;

// 小组得分的历史拼写
pub const GROUP_SCORE_KEYS: &[&str] = &["group_score", "groupScore", "team_score", "overall_score"];
// 系统/作品得分的历史拼写
pub const SYSTEM_SCORE_KEYS: &[&str] = &["system_score", "systemScore", "tech_score"];
// 个人得分的历史拼写（顶层字段）
pub const PERSONAL_SCORE_KEYS: &[&str] = &["personal_score", "personalScore", "individual_score"];

// 对应的评语拼写
pub const GROUP_COMMENT_KEYS: &[&str] = &["group_comment", "groupComment", "team_comment"];
pub const SYSTEM_COMMENT_KEYS: &[&str] = &["system_comment", "systemComment", "tech_comment"];
pub const PERSONAL_COMMENT_KEYS: &[&str] =
    &["personal_comment", "personalComment", "individual_comment"];

// 成员子结构的容器键：map（按学生 ID 为键）或数组（按成员记录）
pub const MEMBER_CONTAINER_KEYS: &[&str] = &["members", "per_member", "individual", "students"];
// 成员记录里的学生 ID 键
pub const MEMBER_ID_KEYS: &[&str] = &["student_id", "studentId", "id"];
// 成员记录里的得分/评语键
pub const MEMBER_SCORE_KEYS: &[&str] =
    &["score", "personal_score", "personalScore", "individual_score"];
pub const MEMBER_COMMENT_KEYS: &[&str] =
    &["comment", "personal_comment", "personalComment", "remark"];

/// 数值转换：数字或数字样式的字符串；其余（包括 NaN/Inf）一律 None
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// 字符串转换：非空字符串原样返回，其余 None
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// 按拼写表顺序探测，返回第一个可转换为数字的值
pub fn first_number(extras: &Value, keys: &[&str]) -> Option<f64> {
    let obj = extras.as_object()?;
    keys.iter().find_map(|key| obj.get(*key).and_then(coerce_number))
}

/// 按拼写表顺序探测，返回第一个非空字符串
pub fn first_string(extras: &Value, keys: &[&str]) -> Option<String> {
    let obj = extras.as_object()?;
    keys.iter().find_map(|key| obj.get(*key).and_then(coerce_string))
}

/// 在成员子结构中查找指定学生的条目
///
/// 容器可能是以学生 ID 字符串为键的 map，也可能是成员记录
/// 数组（按 MEMBER_ID_KEYS 匹配 ID）。按容器键顺序探测，
/// 找到该学生的条目即返回。
pub fn member_entry(extras: &Value, student_id: i64) -> Option<&Value> {
    let obj = extras.as_object()?;
    for key in MEMBER_CONTAINER_KEYS {
        let Some(container) = obj.get(*key) else {
            continue;
        };
        match container {
            Value::Object(map) => {
                if let Some(entry) = map.get(&student_id.to_string()) {
                    return Some(entry);
                }
            }
            Value::Array(items) => {
                let found = items.iter().find(|item| {
                    MEMBER_ID_KEYS.iter().any(|id_key| {
                        item.get(*id_key)
                            .and_then(coerce_number)
                            .is_some_and(|v| v == student_id as f64)
                    })
                });
                if let Some(entry) = found {
                    return Some(entry);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(85)), Some(85.0));
        assert_eq!(coerce_number(&json!(85.5)), Some(85.5));
        assert_eq!(coerce_number(&json!("85.5")), Some(85.5));
        assert_eq!(coerce_number(&json!(" 90 ")), Some(90.0));
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!([85])), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!("inf")), None);
    }

    #[test]
    fn test_first_number_spelling_order() {
        // 第一个可用的拼写生效，不合并
        let extras = json!({"groupScore": 80, "group_score": 90});
        assert_eq!(first_number(&extras, GROUP_SCORE_KEYS), Some(90.0));

        let extras = json!({"groupScore": 80});
        assert_eq!(first_number(&extras, GROUP_SCORE_KEYS), Some(80.0));
    }

    #[test]
    fn test_garbage_value_falls_through_to_next_spelling() {
        // 首选拼写是垃圾值时继续探测后续拼写
        let extras = json!({"group_score": "n/a", "groupScore": 75});
        assert_eq!(first_number(&extras, GROUP_SCORE_KEYS), Some(75.0));
    }

    #[test]
    fn test_first_number_on_non_object() {
        assert_eq!(first_number(&Value::Null, GROUP_SCORE_KEYS), None);
        assert_eq!(first_number(&json!([1, 2]), GROUP_SCORE_KEYS), None);
    }

    #[test]
    fn test_member_entry_map() {
        let extras = json!({"members": {"17": {"score": 88, "comment": "不错"}}});
        let entry = member_entry(&extras, 17).unwrap();
        assert_eq!(first_number(entry, MEMBER_SCORE_KEYS), Some(88.0));
        assert_eq!(
            first_string(entry, MEMBER_COMMENT_KEYS),
            Some("不错".to_string())
        );
        assert!(member_entry(&extras, 18).is_none());
    }

    #[test]
    fn test_member_entry_array() {
        let extras = json!({
            "students": [
                {"student_id": 5, "personal_score": 70},
                {"studentId": "6", "score": 92}
            ]
        });
        let entry = member_entry(&extras, 6).unwrap();
        assert_eq!(first_number(entry, MEMBER_SCORE_KEYS), Some(92.0));
    }

    #[test]
    fn test_member_entry_without_score_still_found() {
        // 只有评语没有得分的成员条目也要能取到
        let extras = json!({"per_member": {"9": {"comment": "表达清晰"}}});
        let entry = member_entry(&extras, 9).unwrap();
        assert_eq!(first_number(entry, MEMBER_SCORE_KEYS), None);
        assert_eq!(
            first_string(entry, MEMBER_COMMENT_KEYS),
            Some("表达清晰".to_string())
        );
    }
}
