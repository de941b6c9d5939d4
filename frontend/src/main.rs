use log::{error, info};

use medequip_landing::config;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting MedEquip Pro landing page");
    if let Err(e) = medequip_landing::start() {
        error!("landing page could not start: {}", e);
    }
}
