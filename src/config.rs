use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Paths {
    pub source_db: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            source_db: PathBuf::from("blog.sqlite3"),
            output_dir: PathBuf::from("converted"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Source {
    pub table: String,
}

impl Default for Source {
    fn default() -> Self {
        Source {
            table: "pages".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Output {
    pub extension: String,
    pub delimiter: String,
    /// Escapes every non-ASCII char in title and summary as \uXXXX
    pub ascii_json: bool,
}

impl Default for Output {
    fn default() -> Self {
        Output {
            extension: "md".to_string(),
            delimiter: "---".to_string(),
            ascii_json: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
    #[serde(default = "default_log_to_console")]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn default_log_to_console() -> bool {
    true
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub source: Source,
    pub output: Output,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent().unwrap_or(Path::new("."));
    let rest = path.strip_prefix("${exe_dir}").unwrap_or(&path);
    Ok(exe_dir.join(rest))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if !is_identifier(&cfg.source.table) {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            format!("Invalid table name in configuration: {:?}", cfg.source.table)));
    }

    cfg.paths = Paths {
        source_db: parse_path(cfg.paths.source_db)?,
        output_dir: parse_path(cfg.paths.output_dir)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
