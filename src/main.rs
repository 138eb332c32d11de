mod components;
mod config;
mod error;
mod globe;
mod map_view;
mod model;
mod state;
mod util;

use components::App;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    util::init_logging(level);
    yew::Renderer::<App>::new().render();
}
