use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use blogdb2md::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    let exe_path = env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;
    if exe_dir.join(CFG_FILE_NAME).exists() {
        return Some(exe_dir.join(CFG_FILE_NAME));
    }

    None
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let Some(config_path) = cfg_path.or_else(get_config_path) else {
        println!("No {} found. Using defaults", CFG_FILE_NAME);
        return Ok(Config::default());
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)
        .with_context(|| format!("Could not load {}", config_path.display()))?;

    if let Some(ref mut log) = config.log {
        if log.location.is_none() && !log.log_to_console {
            let cache_dir = dirs::cache_dir().context("Could not find user cache dir")?;
            log.location = Some(cache_dir.join("blogdb2md").join("convert.log"));
        }
        if let Some(ref location) = log.location {
            println!("Log enabled. Files will be written in {}", location.display());
        }
    }

    Ok(config)
}
