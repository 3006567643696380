use relm4::prelude::*;
use vitrine::config;
use vitrine::gui::app::AppModel;
use vitrine::preferences;
use vitrine::sys::runtime;

fn main() {
    env_logger::init();

    if std::env::args().nth(1).as_deref() == Some("--write-config") {
        match config::write_default_config() {
            Ok(path) => println!("{}", path.display()),
            Err(e) => {
                log::error!("Failed to write default config: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let config = config::load_or_setup();
    let prefs = preferences::current();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    if let Err(e) = runtime::start_background_services(tx) {
        log::error!("Background services unavailable: {:#}", e);
    }

    let app = RelmApp::new("org.vitrine.showcase").with_args(Vec::new());

    app.run::<AppModel>((config, prefs, rx));
}
