//! Форматирование ячеек по имени колонки

use crate::shared::components::table::format_amount;
use crate::shared::date_utils::{format_datetime_es, parse_datetime};
use serde_json::Value;

const AMOUNT_MARKERS: [&str; 3] = ["precio", "importe", "cantidad"];

/// Текст значения без форматирования (для фильтров, групп и сортировки).
/// `None` для отсутствующих и null значений.
pub fn raw_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_text(n)),
        other => Some(other.to_string()),
    }
}

/// `1.0` -> `1`, как в ответе API после разбора в браузере
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Отображаемое значение ячейки
///
/// - колонки с "fecha" в имени: строка-дата -> es-ES дата и время
/// - колонки с "precio" / "importe" / "cantidad": число -> 2 знака после запятой
/// - пусто -> "-"
pub fn format_cell(value: Option<&Value>, column: &str) -> String {
    let column_lower = column.to_lowercase();

    match value {
        Some(Value::String(s)) if column_lower.contains("fecha") => parse_datetime(s)
            .map(|dt| format_datetime_es(&dt))
            .unwrap_or_else(|| s.clone()),
        Some(Value::Number(n)) if AMOUNT_MARKERS.iter().any(|m| column_lower.contains(m)) => {
            n.as_f64().map(format_amount).unwrap_or_else(|| n.to_string())
        }
        other => raw_text(other).unwrap_or_else(|| "-".to_string()),
    }
}

/// Заголовок колонки из ключа: `tipo_receta` -> `TIPO RECETA`
pub fn column_header(key: &str) -> String {
    key.to_uppercase().replace('_', " ")
}
