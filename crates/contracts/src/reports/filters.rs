use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::kind::{FormLayout, ReportKind};
use crate::shared::warehouse;

/// Фильтры отчётов с периодом (пре-продажи, продажи и т.д.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeFilters {
    /// yyyy-mm-dd, как отдаёт `<input type="date">`
    pub fecha_inicio: String,
    pub fecha_fin: String,
    pub almacen_id: String,
}

/// Фильтры отчёта по остаткам
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockFilters {
    pub almacen_id: String,
    #[serde(default)]
    pub codigo_medicamento: String,
    #[serde(default)]
    pub mostrar_saldos_cero: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportFilters {
    DateRange(DateRangeFilters),
    Stock(StockFilters),
}

/// Query-параметры запроса к API отчётов
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<String>,
    pub almacen_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_medicamento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mostrar_saldos_cero: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("El campo {0} es obligatorio")]
    MissingDate(&'static str),
    #[error("Fecha no válida en {field}: {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("La fecha de inicio ({from}) es posterior a la fecha fin ({to})")]
    InvertedRange { from: String, to: String },
    #[error("Farmacia o almacén desconocido: {0}")]
    UnknownWarehouse(String),
}

impl ReportFilters {
    /// Начальное состояние формы для выбранного типа отчёта
    pub fn initial(kind: ReportKind, almacen_id: &str) -> Self {
        match kind.form_layout() {
            FormLayout::DateRange => ReportFilters::DateRange(DateRangeFilters {
                fecha_inicio: String::new(),
                fecha_fin: String::new(),
                almacen_id: almacen_id.to_string(),
            }),
            FormLayout::Stock => ReportFilters::Stock(StockFilters {
                almacen_id: almacen_id.to_string(),
                codigo_medicamento: String::new(),
                mostrar_saldos_cero: false,
            }),
        }
    }

    pub fn almacen_id(&self) -> &str {
        match self {
            ReportFilters::DateRange(f) => &f.almacen_id,
            ReportFilters::Stock(f) => &f.almacen_id,
        }
    }

    pub fn set_almacen_id(&mut self, value: String) {
        match self {
            ReportFilters::DateRange(f) => f.almacen_id = value,
            ReportFilters::Stock(f) => f.almacen_id = value,
        }
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if !warehouse::is_known(self.almacen_id()) {
            return Err(FilterError::UnknownWarehouse(self.almacen_id().to_string()));
        }

        let ReportFilters::DateRange(f) = self else {
            return Ok(());
        };

        let from = parse_required_date("Fecha Inicio", &f.fecha_inicio)?;
        let to = parse_required_date("Fecha Fin", &f.fecha_fin)?;
        if from > to {
            return Err(FilterError::InvertedRange {
                from: f.fecha_inicio.clone(),
                to: f.fecha_fin.clone(),
            });
        }
        Ok(())
    }

    pub fn to_query(&self) -> ReportQuery {
        match self {
            ReportFilters::DateRange(f) => ReportQuery {
                fecha_inicio: Some(f.fecha_inicio.clone()),
                fecha_fin: Some(f.fecha_fin.clone()),
                almacen_id: f.almacen_id.clone(),
                codigo_medicamento: None,
                mostrar_saldos_cero: None,
            },
            ReportFilters::Stock(f) => {
                let code = f.codigo_medicamento.trim();
                ReportQuery {
                    fecha_inicio: None,
                    fecha_fin: None,
                    almacen_id: f.almacen_id.clone(),
                    codigo_medicamento: (!code.is_empty()).then(|| code.to_string()),
                    mostrar_saldos_cero: Some(f.mostrar_saldos_cero),
                }
            }
        }
    }
}

fn parse_required_date(field: &'static str, value: &str) -> Result<NaiveDate, FilterError> {
    if value.trim().is_empty() {
        return Err(FilterError::MissingDate(field));
    }
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| FilterError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
