//! geoattend main entrypoint.

use geoattend::run;
use geoattend::ui::messages;

fn main() {
    if let Err(e) = run() {
        messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
