mod app;
use word_quiz_app::*;

use app::{QuizApp, install_korean_font};
use config::AppConfig;
use database::db::{init_database, load_store_or_default};
use log::{error, info};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    let conn = match init_database(&config.database_path) {
        Ok(conn) => conn,
        Err(e) => {
            error!(
                "failed to open database {}: {}",
                config.database_path.display(),
                e
            );
            std::process::exit(1);
        }
    };

    let words = load_store_or_default(&conn);
    info!("word list has {} pairs", words.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([520.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Word Quiz",
        options,
        Box::new(move |cc| {
            install_korean_font(&cc.egui_ctx, &config);
            Ok(Box::new(QuizApp::new(words, conn, &config)))
        }),
    )
}
