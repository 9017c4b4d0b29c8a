#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod adapters;
mod app;
mod core;
mod global_constants;
mod ports;
mod presentation;

use iced::daemon;

fn main() -> iced::Result {
    env_logger::init();

    log::info!("[MAIN] Starting Snip to Text");

    daemon(
        app::SnipApp::build,
        app::SnipApp::handle_update,
        app::SnipApp::render_view,
    )
    .subscription(app::SnipApp::handle_subscription)
    .style(app::SnipApp::handle_style)
    .run()
}
