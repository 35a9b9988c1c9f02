use crate::reports::api::FetchError;
use contracts::reports::{ReportKind, ReportRow};
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Номер запроса; результат применяется, только если номер ещё актуален
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Clone, Copy)]
pub struct DashboardContext {
    pub active_report: RwSignal<ReportKind>,
    pub sidebar_collapsed: RwSignal<bool>,
    pub rows: RwSignal<Vec<ReportRow>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    request_seq: RwSignal<u64>,
}

impl DashboardContext {
    pub fn new() -> Self {
        Self {
            active_report: RwSignal::new(ReportKind::default()),
            sidebar_collapsed: RwSignal::new(false),
            rows: RwSignal::new(vec![]),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            request_seq: RwSignal::new(0),
        }
    }

    pub fn select_report(&self, kind: ReportKind) {
        if self.active_report.get_untracked() == kind {
            return;
        }
        log::info!("Report selected: {}", kind);
        self.invalidate_requests();
        self.active_report.set(kind);
        self.rows.set(vec![]);
        self.error.set(None);
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_collapsed.update(|c| *c = !*c);
    }

    pub fn begin_request(&self) -> RequestTicket {
        self.request_seq.update(|seq| *seq += 1);
        self.loading.set(true);
        self.error.set(None);
        RequestTicket(self.request_seq.get_untracked())
    }

    /// Apply a fetch result. Stale tickets are dropped.
    pub fn finish_request(&self, ticket: RequestTicket, result: Result<Vec<ReportRow>, FetchError>) {
        if ticket.0 != self.request_seq.get_untracked() {
            log::debug!("Dropping stale response (request #{})", ticket.0);
            return;
        }
        match result {
            Ok(rows) => self.rows.set(rows),
            Err(e) => {
                self.rows.set(vec![]);
                self.error.set(Some(e.to_string()));
            }
        }
        self.loading.set(false);
    }

    fn invalidate_requests(&self) {
        self.request_seq.update(|seq| *seq += 1);
        self.loading.set(false);
    }

    /// `?report=<key>` <-> active report
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(kind) = report_from_query(&search) {
            self.active_report.set(kind);
        }

        let this = *self;
        Effect::new(move |_| {
            let kind = this.active_report.get();
            let new_url = format!("?{}", report_query(kind));

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }
}

impl Default for DashboardContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_dashboard() -> DashboardContext {
    use_context::<DashboardContext>().expect("DashboardContext context not found")
}

fn report_from_query(search: &str) -> Option<ReportKind> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    match params.get("report")?.parse() {
        Ok(kind) => Some(kind),
        Err(e) => {
            log::warn!("Ignoring ?report: {}", e);
            None
        }
    }
}

fn report_query(kind: ReportKind) -> String {
    serde_qs::to_string(&HashMap::from([("report", kind.key())])).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_query() {
        assert_eq!(report_from_query("?report=saldos"), Some(ReportKind::Saldos));
        assert_eq!(report_from_query("report=ventas&x=1"), Some(ReportKind::Ventas));
        assert_eq!(report_from_query("?report=clientes"), None);
        assert_eq!(report_from_query(""), None);
    }

    #[test]
    fn test_report_query() {
        assert_eq!(report_query(ReportKind::Inventario), "report=inventario");
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = DashboardContext::new();
            let first = ctx.begin_request();
            let second = ctx.begin_request();

            ctx.finish_request(first, Ok(vec![serde_json::Map::new()]));
            assert!(ctx.rows.get_untracked().is_empty());
            assert!(ctx.loading.get_untracked());

            ctx.finish_request(second, Err(FetchError::Request("offline".to_string())));
            assert!(!ctx.loading.get_untracked());
            assert_eq!(
                ctx.error.get_untracked().as_deref(),
                Some("Error de conexión: offline")
            );
        });
    }

    #[test]
    fn test_report_change_clears_rows_and_cancels_request() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = DashboardContext::new();
            let ticket = ctx.begin_request();
            ctx.select_report(ReportKind::Saldos);
            assert!(!ctx.loading.get_untracked());

            ctx.finish_request(ticket, Ok(vec![serde_json::Map::new()]));
            assert!(ctx.rows.get_untracked().is_empty());
            assert_eq!(ctx.active_report.get_untracked(), ReportKind::Saldos);
        });
    }
}
