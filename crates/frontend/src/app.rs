use crate::layout::global_context::DashboardContext;
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::reports::ActiveReport;
use crate::shared::config::AppConfig;
use leptos::prelude::*;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_context(config);

    // Provide the DashboardContext store to the whole app via context.
    let ctx = DashboardContext::new();
    provide_context(ctx);
    ctx.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <ActiveReport /> }.into_any()
        />
    }
}
