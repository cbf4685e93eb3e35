use std::rc::Rc;

use vinly::components::app::{App, AppProps};
use vinly::config::AppConfig;

fn main() {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
    if let Err(err) = &loaded {
        log::warn!("using default configuration: {err}");
    }
    yew::Renderer::<App>::with_props(AppProps {
        config: Rc::new(config),
    })
    .render();
}
