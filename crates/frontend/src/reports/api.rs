use crate::shared::api_utils::api_url;
use contracts::reports::{ReportEnvelope, ReportFilters, ReportKind, ReportRow};
use gloo_net::http::Request;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("No se pudo construir la consulta: {0}")]
    Query(String),
    #[error("Error de conexión: {0}")]
    Request(String),
    #[error("Error: {status} - {status_text}")]
    Status { status: u16, status_text: String },
    #[error("Respuesta no válida: {0}")]
    Decode(String),
}

/// Полный URL запроса отчёта: `{base}{endpoint}?{query}`
pub fn report_url(base: &str, kind: ReportKind, filters: &ReportFilters) -> Result<String, FetchError> {
    let query =
        serde_qs::to_string(&filters.to_query()).map_err(|e| FetchError::Query(e.to_string()))?;
    Ok(format!("{}?{}", api_url(base, kind.endpoint()), query))
}

pub fn parse_envelope(text: &str) -> Result<Vec<ReportRow>, FetchError> {
    serde_json::from_str::<ReportEnvelope>(text)
        .map(|env| env.data)
        .map_err(|e| FetchError::Decode(e.to_string()))
}

/// Получить строки отчёта
pub async fn fetch_report(
    base: &str,
    kind: ReportKind,
    filters: &ReportFilters,
) -> Result<Vec<ReportRow>, FetchError> {
    let url = report_url(base, kind, filters)?;
    log::debug!("Fetch URL: {}", url);

    let result = async {
        let response = Request::get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        if !response.ok() {
            return Err(FetchError::Status {
                status: response.status(),
                status_text: response.status_text(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        parse_envelope(&text)
    }
    .await;

    match &result {
        Ok(rows) => log::info!("{}: received {} rows", kind, rows.len()),
        Err(e) => log::error!("Error fetching {}: {}", kind, e),
    }
    result
}
