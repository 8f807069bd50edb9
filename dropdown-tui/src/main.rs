mod app;
mod error;
mod form;
mod paths;
mod render;
mod settings;

use std::fs::{self, File};

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;

fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

fn main() {
    init_logging();

    let result = settings::load().and_then(|config| App::new(config).run());
    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
    }
}
