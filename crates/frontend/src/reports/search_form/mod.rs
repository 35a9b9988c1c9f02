//! Форма поиска: поля зависят от типа отчёта.
//!
//! Отчёты с периодом показывают две даты и склад, отчёт по остаткам -
//! склад, код препарата и флажок нулевых остатков. Форма создаётся заново
//! при смене типа отчёта, поэтому состояние не переносится.

use crate::shared::components::date_input::DateInput;
use crate::shared::config::use_app_config;
use crate::shared::icons::icon;
use contracts::reports::{FormLayout, ReportFilters, ReportKind};
use contracts::shared::warehouse::{self, DEFAULT_WAREHOUSE_ID, WAREHOUSES};
use leptos::prelude::*;
use thaw::*;

/// Одно изменение поля формы
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    FechaInicio(String),
    FechaFin(String),
    Almacen(String),
    CodigoMedicamento(String),
    MostrarSaldosCero(bool),
}

/// Применить изменение; поля, которых нет у текущей формы, игнорируются
pub fn apply_edit(filters: &mut ReportFilters, edit: FormEdit) {
    match (filters, edit) {
        (f, FormEdit::Almacen(id)) => f.set_almacen_id(id),
        (ReportFilters::DateRange(f), FormEdit::FechaInicio(v)) => f.fecha_inicio = v,
        (ReportFilters::DateRange(f), FormEdit::FechaFin(v)) => f.fecha_fin = v,
        (ReportFilters::Stock(f), FormEdit::CodigoMedicamento(v)) => f.codigo_medicamento = v,
        (ReportFilters::Stock(f), FormEdit::MostrarSaldosCero(v)) => f.mostrar_saldos_cero = v,
        (_, edit) => log::debug!("Ignoring {:?} for this form", edit),
    }
}

/// Склад по умолчанию из конфигурации, если он есть в справочнике
pub fn initial_warehouse(configured: &str) -> &str {
    if warehouse::is_known(configured) {
        configured
    } else {
        log::warn!("Unknown default warehouse {}, using {}", configured, DEFAULT_WAREHOUSE_ID);
        DEFAULT_WAREHOUSE_ID
    }
}

/// Что делать при отправке формы
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Запрос уже выполняется
    Busy,
    /// Ошибка проверки, показывается под формой
    Rejected(String),
    Search(ReportFilters),
}

pub fn submit_outcome(filters: &ReportFilters, is_loading: bool) -> SubmitOutcome {
    if is_loading {
        return SubmitOutcome::Busy;
    }
    match filters.validate() {
        Ok(()) => SubmitOutcome::Search(filters.clone()),
        Err(e) => SubmitOutcome::Rejected(e.to_string()),
    }
}

#[component]
pub fn SearchForm(
    kind: ReportKind,
    #[prop(into)] is_loading: Signal<bool>,
    on_search: Callback<ReportFilters>,
) -> impl IntoView {
    let config = use_app_config();
    let filters = RwSignal::new(ReportFilters::initial(
        kind,
        initial_warehouse(&config.search.default_warehouse_id),
    ));
    let (validation_error, set_validation_error) = signal(None::<String>);

    let edit = move |change: FormEdit| filters.update(|f| apply_edit(f, change));

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let outcome = filters.with_untracked(|f| submit_outcome(f, is_loading.get_untracked()));
        match outcome {
            SubmitOutcome::Busy => log::debug!("Search already in flight"),
            SubmitOutcome::Rejected(msg) => {
                log::warn!("Search form rejected: {}", msg);
                set_validation_error.set(Some(msg));
            }
            SubmitOutcome::Search(current) => {
                set_validation_error.set(None);
                on_search.run(current);
            }
        }
    };

    let fields = match kind.form_layout() {
        FormLayout::DateRange => {
            let fecha_inicio = Signal::derive(move || {
                filters.with(|f| match f {
                    ReportFilters::DateRange(d) => d.fecha_inicio.clone(),
                    ReportFilters::Stock(_) => String::new(),
                })
            });
            let fecha_fin = Signal::derive(move || {
                filters.with(|f| match f {
                    ReportFilters::DateRange(d) => d.fecha_fin.clone(),
                    ReportFilters::Stock(_) => String::new(),
                })
            });
            view! {
                <DateInput
                    id="fechaInicio"
                    label="Fecha Inicio"
                    value=fecha_inicio
                    on_change=move |v| edit(FormEdit::FechaInicio(v))
                    required=true
                />
                <DateInput
                    id="fechaFin"
                    label="Fecha Fin"
                    value=fecha_fin
                    on_change=move |v| edit(FormEdit::FechaFin(v))
                    required=true
                />
                <WarehouseSelect filters=filters on_change=Callback::new(move |id| edit(FormEdit::Almacen(id))) />
            }
            .into_any()
        }
        FormLayout::Stock => {
            let codigo = Signal::derive(move || {
                filters.with(|f| match f {
                    ReportFilters::Stock(s) => s.codigo_medicamento.clone(),
                    ReportFilters::DateRange(_) => String::new(),
                })
            });
            let saldos_cero = Signal::derive(move || {
                filters.with(|f| matches!(f, ReportFilters::Stock(s) if s.mostrar_saldos_cero))
            });
            view! {
                <WarehouseSelect filters=filters on_change=Callback::new(move |id| edit(FormEdit::Almacen(id))) />
                <div class="form__group">
                    <label class="form__label" for="codigoMedicamento">"Código de Medicamento (Opcional)"</label>
                    <input
                        id="codigoMedicamento"
                        name="codigoMedicamento"
                        type="text"
                        class="form__input"
                        placeholder="Ej. 03245"
                        prop:value=codigo
                        on:input=move |ev| edit(FormEdit::CodigoMedicamento(event_target_value(&ev)))
                    />
                </div>
                <label class="form__checkbox">
                    <input
                        type="checkbox"
                        prop:checked=saldos_cero
                        on:change=move |ev| edit(FormEdit::MostrarSaldosCero(event_target_checked(&ev)))
                    />
                    <span>"Mostrar saldos en cero"</span>
                </label>
            }
            .into_any()
        }
    };

    view! {
        <form class="search-form" on:submit=handle_submit>
            <div class="search-form__fields">{fields}</div>

            {move || validation_error.get().map(|msg| view! {
                <div class="form__error" role="alert">{msg}</div>
            })}

            <div class="search-form__actions">
                <button
                    type="submit"
                    class="button button--primary"
                    disabled=move || is_loading.get()
                >
                    {move || if is_loading.get() {
                        view! { <Spinner size=SpinnerSize::Small /> }.into_any()
                    } else {
                        icon("search")
                    }}
                    <span>{move || if is_loading.get() { "Buscando..." } else { "Buscar" }}</span>
                </button>
            </div>
        </form>
    }
}

#[component]
fn WarehouseSelect(filters: RwSignal<ReportFilters>, on_change: Callback<String>) -> impl IntoView {
    let selected = move || filters.with(|f| f.almacen_id().to_string());

    view! {
        <div class="form__group">
            <label class="form__label" for="almacenId">"Farmacia o Almacén"</label>
            <select
                id="almacenId"
                name="almacenId"
                class="form__select"
                required=true
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {WAREHOUSES
                    .iter()
                    .map(|w| {
                        let id = w.id;
                        view! {
                            <option value=id selected=move || selected() == id>
                                {w.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
