//! Sidebar component: report type menu with collapse toggle

use crate::layout::global_context::use_dashboard;
use crate::shared::icons::icon;
use contracts::reports::ReportKind;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_dashboard();
    let collapsed = move || ctx.sidebar_collapsed.get();

    view! {
        <div class="app-sidebar__content">
            <div class="app-sidebar__header">
                <Show when=move || !collapsed()>
                    <h1 class="app-sidebar__title">"Farmacia App"</h1>
                </Show>
                <button
                    class="app-sidebar__toggle"
                    on:click=move |_| ctx.toggle_sidebar()
                >
                    {move || if collapsed() { icon("chevron-right") } else { icon("chevron-left") }}
                </button>
            </div>

            <nav class="app-sidebar__menu">
                {ReportKind::ALL.into_iter().map(|kind| {
                    view! {
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || ctx.active_report.get() == kind
                            class:app-sidebar__item--collapsed=collapsed
                            title=move || if collapsed() { kind.menu_label() } else { "" }
                            on:click=move |_| ctx.select_report(kind)
                        >
                            <div class="app-sidebar__item-content">
                                {icon(kind.icon())}
                                <Show when=move || !collapsed()>
                                    <span>{kind.menu_label()}</span>
                                </Show>
                            </div>
                        </div>
                    }
                }).collect_view()}
            </nav>
        </div>
    }
}
