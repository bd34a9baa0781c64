mod app;
mod application;
mod domain;
mod service;
mod ui;
mod utils;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("loadapp=info")),
        )
        .init();

    iced::application(app::LoadApp::default, app::update, app::view)
        .title("LoadApp")
        .run()
}
