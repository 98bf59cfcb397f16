use std::{
    env, fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use log::{info, warn};
use manga_core::config::{config_file, ReaderConfig};
use manga_core::MangaError;
use ui::App;

fn main() -> ExitCode {
    // The TUI owns the terminal, so stay quiet unless RUST_LOG asks otherwise.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config = load_config();
    let mut app = App::new(&config);

    if let Some(dir) = env::args_os().nth(1).map(PathBuf::from) {
        if let Err(e) = app.load_directory(&dir) {
            eprintln!("Failed to open {}: {}", dir.display(), e);
            return ExitCode::FAILURE;
        }
    }

    match app.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("zmreader: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> ReaderConfig {
    let path = env::var_os("ZMREADER_CONFIG")
        .map(PathBuf::from)
        .or_else(config_file);
    let Some(path) = path else {
        return ReaderConfig::default();
    };
    match read_config(&path) {
        Ok(Some(config)) => {
            info!("loaded config from {}", path.display());
            config.validate()
        }
        Ok(None) => ReaderConfig::default(),
        Err(e) => {
            warn!("ignoring {}: {}", path.display(), e);
            ReaderConfig::default()
        }
    }
}

/// `Ok(None)` when there is no config file at `path`.
fn read_config(path: &Path) -> Result<Option<ReaderConfig>, MangaError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    toml::from_str::<ReaderConfig>(&text)
        .map(Some)
        .map_err(|e| MangaError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "start_mode = \"page-turn\"\n[zoom]\nmax = 2.0\n[theme]\nname = \"mono\"\n",
        )
        .unwrap();
        let config = read_config(&path).unwrap().unwrap().validate();
        assert_eq!(config.zoom.max, 2.0);
        assert_eq!(config.zoom.min, ReaderConfig::default().zoom.min);
        assert_eq!(config.theme.get("name").map(String::as_str), Some("mono"));
        assert!(read_config(&dir.path().join("missing.toml")).unwrap().is_none());

        fs::write(&path, "zoom = [").unwrap();
        assert!(matches!(read_config(&path), Err(MangaError::Config(_))));
    }
}
