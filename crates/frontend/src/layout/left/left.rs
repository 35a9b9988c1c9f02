use crate::layout::global_context::use_dashboard;
use leptos::prelude::*;

#[component]
pub fn Left(children: Children) -> impl IntoView {
    let ctx = use_dashboard();

    view! {
        <div
            data-zone="left"
            class="left app-sidebar"
            class:app-sidebar--collapsed=move || ctx.sidebar_collapsed.get()
        >
            {children()}
        </div>
    }
}
