pub mod global_context;
pub mod left;

use leptos::prelude::*;
use left::Left;

/// Main application shell.
///
/// Layout structure:
/// ```text
/// +-----------+------------------------------+
/// |  Sidebar  |           Content            |
/// |   (Left)  |          (Center)            |
/// +-----------+------------------------------+
/// ```
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <div class="app-body">
                <Left>
                    {left()}
                </Left>

                <main class="app-main">
                    {center()}
                </main>
            </div>
        </div>
    }
}
