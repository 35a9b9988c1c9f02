//! Ячейка заголовка таблицы отчёта: сортировка по клику и фильтр по колонке
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="CANTIDAD"
//!     column="Cantidad"
//!     sort=Signal::derive(move || view_state.with(|s| s.sort.clone()))
//!     on_sort=Callback::new(move |column: String| view_state.update(|s| s.cycle_sort(&column)))
//!     filter=Signal::derive(move || view_state.with(|s| s.filter_value("Cantidad")))
//!     on_filter=Callback::new(move |(column, value)| view_state.update(|s| s.set_filter(column, value)))
//! />
//! ```

use crate::reports::data_table::model::{SortDirection, SortState};
use leptos::prelude::*;
use thaw::*;

/// " ▲" / " ▼" для текущей колонки, " ⇅" для остальных
pub fn sort_indicator(sort: Option<&SortState>, column: &str) -> &'static str {
    match sort {
        Some(s) if s.column == column => match s.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        },
        _ => " ⇅",
    }
}

pub fn sort_class(sort: Option<&SortState>, column: &str) -> &'static str {
    match sort {
        Some(s) if s.column == column => "table__sort-indicator table__sort-indicator--active",
        _ => "table__sort-indicator",
    }
}

/// Заголовок колонки отчёта
///
/// Клик по подписи переключает сортировку, поле под подписью фильтрует
/// строки по подстроке. Ширину колонки можно менять мышью.
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Ключ колонки в строке отчёта
    #[prop(into)]
    column: String,

    #[prop(into)]
    sort: Signal<Option<SortState>>,

    on_sort: Callback<String>,

    /// Текущее значение фильтра колонки
    #[prop(into)]
    filter: Signal<String>,

    /// (колонка, новое значение фильтра)
    on_filter: Callback<(String, String)>,

    /// Минимальная ширина колонки
    #[prop(optional, default = 120.0)]
    min_width: f64,
) -> impl IntoView {
    let column_for_click = column.clone();
    let column_for_indicator = column.clone();
    let column_for_class = column.clone();
    let placeholder = format!("Filtrar {}", label.to_lowercase());

    view! {
        <TableHeaderCell resizable=true min_width=min_width class="resizable">
            <div class="table__header-stack">
                <div
                    class="table__sortable-header"
                    title="Ordenar"
                    on:click=move |_| on_sort.run(column_for_click.clone())
                >
                    {label}
                    <span class=move || sort.with(|s| sort_class(s.as_ref(), &column_for_class))>
                        {move || sort.with(|s| sort_indicator(s.as_ref(), &column_for_indicator))}
                    </span>
                </div>
                <input
                    type="text"
                    class="table__column-filter"
                    placeholder=placeholder
                    prop:value=filter
                    on:click=|ev| ev.stop_propagation()
                    on:input=move |ev| on_filter.run((column.clone(), event_target_value(&ev)))
                />
            </div>
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        let asc = SortState {
            column: "Cantidad".to_string(),
            direction: SortDirection::Asc,
        };
        let desc = SortState {
            direction: SortDirection::Desc,
            ..asc.clone()
        };
        assert_eq!(sort_indicator(Some(&asc), "Cantidad"), " ▲");
        assert_eq!(sort_indicator(Some(&desc), "Cantidad"), " ▼");
        assert_eq!(sort_indicator(Some(&asc), "Producto"), " ⇅");
        assert_eq!(sort_indicator(None, "Cantidad"), " ⇅");
        assert!(sort_class(Some(&asc), "Cantidad").ends_with("--active"));
        assert_eq!(sort_class(None, "Cantidad"), "table__sort-indicator");
    }
}
