use serde::{Deserialize, Deserializer, Serialize};

/// Строка отчёта: имя колонки -> скалярное значение.
/// Порядок ключей совпадает с порядком в ответе API.
pub type ReportRow = serde_json::Map<String, serde_json::Value>;

/// Обёртка ответа API отчётов: `{ "data": [ ... ] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportEnvelope {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<ReportRow>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ReportRow>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ReportRow>>::deserialize(deserializer)?.unwrap_or_default())
}
