pub mod format;
pub mod model;

use crate::shared::components::table::SortableHeaderCell;
use crate::shared::config::use_app_config;
use crate::shared::date_utils::today_iso;
use crate::shared::export::{export_filename, export_rows_to_excel};
use crate::shared::icons::icon;
use contracts::reports::ReportRow;
use leptos::prelude::*;
use model::{
    cell_content, derive_layout, products_label, row_count_label, CellContent, DisplayRow,
    TableViewState,
};
use thaw::*;

const EMPTY_MESSAGE: &str =
    "No hay datos para mostrar. Realiza una búsqueda para ver los resultados.";

/// Таблица результатов отчёта
///
/// Сортировка, фильтры и раскрытые группы живут внутри компонента;
/// `rows` приходят из `DashboardContext` и не изменяются.
#[component]
pub fn DataTable(#[prop(into)] rows: Signal<Vec<ReportRow>>) -> impl IntoView {
    let config = use_app_config();
    let table_config = StoredValue::new(config.table);
    let export_prefix = StoredValue::new(config.export.filename_prefix);

    let view_state = RwSignal::new(TableViewState::default());
    let (export_notice, set_export_notice) = signal(None::<String>);

    Effect::new(move |_| {
        rows.track();
        view_state.update(|s| s.rows_replaced());
    });

    let layout = Memo::new(move |_| rows.with(|r| table_config.with_value(|cfg| derive_layout(r, cfg))));

    let display = Memo::new(move |_| {
        rows.with(|r| layout.with(|l| view_state.with(|s| s.display_rows(r, l))))
    });

    let sort = Signal::derive(move || view_state.with(|s| s.sort.clone()));

    let on_sort = Callback::new(move |column: String| {
        view_state.update(|s| s.cycle_sort(&column));
    });

    let on_filter = Callback::new(move |(column, value): (String, String)| {
        view_state.update(|s| s.set_filter(column, value));
    });

    let handle_export = move |_| {
        let filename = export_filename(&export_prefix.get_value(), &today_iso());
        let result = rows.with_untracked(|r| export_rows_to_excel(r, &filename));
        if let Err(e) = result {
            log::error!("Export failed: {}", e);
            set_export_notice.set(Some(e));
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(4000).await;
                set_export_notice.set(None);
            });
        }
    };

    let render_cell = move |cell: CellContent| match cell {
        CellContent::Empty => view! { <TableCell>""</TableCell> }.into_any(),
        CellContent::Text(text) => view! {
            <TableCell>
                <TableCellLayout truncate=true>{text}</TableCellLayout>
            </TableCell>
        }
        .into_any(),
        CellContent::GroupToggle { key, count, expanded } => {
            let label = key.clone();
            view! {
                <TableCell>
                    <div
                        class="table__group-toggle"
                        on:click=move |_| view_state.update(|s| s.toggle_group(&key))
                    >
                        <span class="table__group-marker">{if expanded { "➖" } else { "➕" }}</span>
                        <strong>{label}</strong>
                        <span class="table__group-count">{products_label(count)}</span>
                    </div>
                </TableCell>
            }
            .into_any()
        }
    };

    let render_row = move |row: DisplayRow| {
        let is_group = matches!(row, DisplayRow::Group { .. });
        let cells: Vec<CellContent> = rows.with(|data| {
            layout.with(|l| l.columns.iter().map(|c| cell_content(&row, c, data)).collect())
        });
        view! {
            <TableRow class:table__group-row=is_group class:table__detail-row=!is_group>
                {cells.into_iter().map(render_cell).collect_view()}
            </TableRow>
        }
    };

    view! {
        <div class="report-table">
            <div class="report-table__toolbar">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=handle_export
                    disabled=Signal::derive(move || rows.with(|r| r.is_empty()))
                >
                    {icon("download")}
                    " Descargar Excel"
                </Button>
                {move || export_notice.get().map(|msg| view! {
                    <span class="report-table__notice" role="alert">{msg}</span>
                })}
            </div>

            <Show
                when=move || rows.with(|r| !r.is_empty())
                fallback=|| view! { <div class="report-table__empty">{EMPTY_MESSAGE}</div> }
            >
                <div class="table-wrapper">
                    <Table>
                        <TableHeader>
                            <TableRow>
                                {move || {
                                    layout
                                        .get()
                                        .columns
                                        .into_iter()
                                        .map(|column| {
                                            let key = column.key.clone();
                                            let filter = Signal::derive(move || {
                                                view_state.with(|s| s.filter_value(&key))
                                            });
                                            view! {
                                                <SortableHeaderCell
                                                    label=column.header
                                                    column=column.key
                                                    sort=sort
                                                    on_sort=on_sort
                                                    filter=filter
                                                    on_filter=on_filter
                                                />
                                            }
                                        })
                                        .collect_view()
                                }}
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || display.get().into_iter().map(render_row).collect_view()}
                        </TableBody>
                    </Table>
                </div>
                <div class="report-table__footer">
                    {move || row_count_label(display.with(|d| d.len()), rows.with(|r| r.len()))}
                </div>
            </Show>
        </div>
    }
}
