use super::api::fetch_report;
use super::data_table::DataTable;
use super::search_form::SearchForm;
use crate::layout::global_context::use_dashboard;
use crate::shared::config::use_app_config;
use contracts::reports::{ReportFilters, ReportKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ReportPage(kind: ReportKind) -> impl IntoView {
    let ctx = use_dashboard();
    let base_url = StoredValue::new(use_app_config().api.base_url);

    let on_search = Callback::new(move |filters: ReportFilters| {
        let ticket = ctx.begin_request();
        spawn_local(async move {
            let base = base_url.get_value();
            let result = fetch_report(&base, kind, &filters).await;
            ctx.finish_request(ticket, result);
        });
    });

    view! {
        <div class="report-page">
            <header class="report-page__header">
                <h1 class="report-page__title">{kind.title()}</h1>
                <p class="report-page__subtitle">
                    "Utiliza los filtros para buscar y visualizar la información"
                </p>
            </header>

            <section class="report-page__card">
                <SearchForm kind=kind is_loading=ctx.loading on_search=on_search />
            </section>

            {move || ctx.error.get().map(|msg| view! {
                <div class="report-page__error" role="alert">{msg}</div>
            })}

            <section class="report-page__card">
                <DataTable rows=ctx.rows />
            </section>
        </div>
    }
}

/// Страница активного отчёта; пересоздаётся при смене типа
#[component]
pub fn ActiveReport() -> impl IntoView {
    let ctx = use_dashboard();
    move || {
        let kind = ctx.active_report.get();
        view! { <ReportPage kind=kind /> }
    }
}
