//! 咖啡数据模型

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

pub type CafeId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cafe {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: CafeId,
    pub nombre: String,
    pub precio: f64,
    pub descripcion: String,
}

impl Cafe {
    pub fn new(id: CafeId, nombre: &str, precio: f64, descripcion: &str) -> Self {
        Self {
            id,
            nombre: nombre.to_string(),
            precio,
            descripcion: descripcion.to_string(),
        }
    }
}

/// 解析路径中的 id，无法解析时返回 None
pub fn parse_path_id(raw: &str) -> Option<CafeId> {
    raw.trim().parse().ok()
}

/// 接受整数或整数字符串形式的 id
fn deserialize_id<'de, D>(deserializer: D) -> Result<CafeId, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl de::Visitor<'_> for IdVisitor {
        type Value = CafeId;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer id or a string holding one")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<CafeId, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<CafeId, E> {
            CafeId::try_from(v).map_err(|_| E::custom(format!("id out of range: {}", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<CafeId, E> {
            parse_path_id(v).ok_or_else(|| E::custom(format!("invalid id: {:?}", v)))
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// 启动时的示例数据
pub fn sample_cafes() -> Vec<Cafe> {
    vec![
        Cafe::new(1, "Cortado", 2.5, "Espresso con un toque de leche"),
        Cafe::new(2, "Americano", 2.0, "Espresso diluido en agua caliente"),
        Cafe::new(3, "Mocachino", 3.2, "Espresso con chocolate y leche"),
        Cafe::new(4, "Cappuccino", 3.0, "Espresso con leche espumada"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_accepts_integer_and_numeric_string() {
        let from_int: Cafe = serde_json::from_value(json!({
            "id": 7, "nombre": "Latte", "precio": 3.5, "descripcion": "Leche"
        }))
        .unwrap();
        let from_str: Cafe = serde_json::from_value(json!({
            "id": "7", "nombre": "Latte", "precio": 3.5, "descripcion": "Leche"
        }))
        .unwrap();
        assert_eq!(from_int, from_str);
        assert_eq!(from_int.id, 7);
    }

    #[test]
    fn id_rejects_non_numeric_string() {
        let result: Result<Cafe, _> = serde_json::from_value(json!({
            "id": "abc", "nombre": "Latte", "precio": 3.5, "descripcion": "Leche"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn id_serializes_as_integer() {
        let value = serde_json::to_value(Cafe::new(1000, "Latte", 3.5, "Leche")).unwrap();
        assert_eq!(value["id"], json!(1000));
    }

    #[test]
    fn path_id_parsing() {
        assert_eq!(parse_path_id("1000"), Some(1000));
        assert_eq!(parse_path_id("-3"), Some(-3));
        assert_eq!(parse_path_id("cafe"), None);
        assert_eq!(parse_path_id(""), None);
    }

    #[test]
    fn sample_ids_are_unique() {
        let cafes = sample_cafes();
        let mut ids: Vec<_> = cafes.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), cafes.len());
        assert!(cafes.iter().any(|c| c.id == 1));
    }
}
