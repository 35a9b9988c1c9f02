pub mod app;
pub mod layout;
pub mod reports;
pub mod shared;

use app::App;
use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Trace);
    console_error_panic_hook::set_once();

    // уровень из конфигурации; предупреждения при её загрузке уже видны
    let config = match shared::config::load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            return;
        }
    };
    log::set_max_level(config.log_level().to_level_filter());

    log::info!("Starting with API at {}", config.api.base_url);
    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
