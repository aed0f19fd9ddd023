use std::path::Path;

use mullion::options::Options;
use mullion::Viewer;

fn main() {
    env_logger::init();

    let mut builder = Viewer::builder();

    // Optional options preset: `mullion [preset.toml]`
    if let Some(path) = std::env::args().nth(1) {
        match Options::load(Path::new(&path)) {
            Ok(options) => {
                log::info!("loaded options preset from {path}");
                builder = builder.with_options(options);
            }
            Err(e) => {
                log::error!("failed to load options preset '{path}': {e}");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
