use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Тип отчёта, выбираемый в боковом меню
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Preventas,
    Ventas,
    Inventario,
    Reportes,
    Estadisticas,
    Saldos,
}

/// Набор полей формы поиска
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormLayout {
    /// Период + склад
    DateRange,
    /// Склад + код препарата + флаг нулевых остатков
    Stock,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report kind: {0}")]
pub struct UnknownReportKind(pub String);

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        ReportKind::Preventas,
        ReportKind::Ventas,
        ReportKind::Inventario,
        ReportKind::Reportes,
        ReportKind::Estadisticas,
        ReportKind::Saldos,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ReportKind::Preventas => "preventas",
            ReportKind::Ventas => "ventas",
            ReportKind::Inventario => "inventario",
            ReportKind::Reportes => "reportes",
            ReportKind::Estadisticas => "estadisticas",
            ReportKind::Saldos => "saldos",
        }
    }

    /// Путь на стороне API отчётов
    pub fn endpoint(&self) -> &'static str {
        match self {
            ReportKind::Preventas => "/preventa",
            ReportKind::Ventas => "/api/ventas",
            ReportKind::Inventario => "/api/inventario",
            ReportKind::Reportes => "/api/reportes",
            ReportKind::Estadisticas => "/api/estadisticas",
            ReportKind::Saldos => "/saldos",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Preventas => "Reporte de Pre-Ventas",
            ReportKind::Ventas => "Reporte de Ventas",
            ReportKind::Inventario => "Control de Inventario",
            ReportKind::Reportes => "Reportes Generados",
            ReportKind::Estadisticas => "Estadísticas Generales",
            ReportKind::Saldos => "Saldos de Almacén",
        }
    }

    pub fn menu_label(&self) -> &'static str {
        match self {
            ReportKind::Preventas => "Pre Ventas",
            ReportKind::Ventas => "Ventas",
            ReportKind::Inventario => "Inventario",
            ReportKind::Reportes => "Reportes",
            ReportKind::Estadisticas => "Estadísticas",
            ReportKind::Saldos => "Saldos",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ReportKind::Preventas => "shopping-cart",
            ReportKind::Ventas => "dollar-sign",
            ReportKind::Inventario => "package",
            ReportKind::Reportes => "file-text",
            ReportKind::Estadisticas => "bar-chart",
            ReportKind::Saldos => "layers",
        }
    }

    pub fn form_layout(&self) -> FormLayout {
        match self {
            ReportKind::Saldos => FormLayout::Stock,
            _ => FormLayout::DateRange,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ReportKind {
    type Err = UnknownReportKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| UnknownReportKind(s.to_string()))
    }
}
