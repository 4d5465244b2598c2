mod app;
mod config;
mod domain;
mod infra;
mod logging;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use crate::config::default_webview_data_dir;

fn main() {
    logging::init_logging();

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Feature Matrix"))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}
