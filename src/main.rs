use dioxus::prelude::*;
use tracing::info;

use truestake::config::AppConfig;
use truestake::ui::App;

fn main() {
    let config = AppConfig::embedded();

    // Init logger
    dioxus_logger::init(config.log_level()).expect("failed to init logger");
    info!("truestake v{} starting", env!("CARGO_PKG_VERSION"));

    launch(App);
}
