use crate::error::{Result, TaskdeckError};
use crate::model::Project;
use crate::theme::{Appearance, Rgb, SystemColors};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The base config directory name under ~/.config/
const CONFIG_DIR_NAME: &str = "taskdeck";

// ============================================================================
// Console Configuration
// ============================================================================

/// User preferences for the console.
///
/// Missing fields in a config file fall back to their defaults, so a partial
/// file is valid.
///
/// # Example
///
/// ```toml
/// appearance = "dark"
/// poll_interval_ms = 100
///
/// [theme_assets]
/// ConsoleBackground = "#1E1E1E"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Color theme of the console rows.
    #[serde(default)]
    pub appearance: Appearance,

    /// How long the event loop waits for input before checking the feed again.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Oldest records are dropped once more than this many are held.
    #[serde(default = "default_max_records")]
    pub max_records: usize,

    /// Fallback colors for the device and reverse appearances.
    #[serde(default)]
    pub system_colors: SystemColors,

    /// Named colors looked up by the device and reverse appearances.
    #[serde(default)]
    pub theme_assets: HashMap<String, Rgb>,
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_max_records() -> usize {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            appearance: Appearance::default(),
            poll_interval_ms: default_poll_interval_ms(),
            max_records: default_max_records(),
            system_colors: SystemColors::default(),
            theme_assets: HashMap::new(),
        }
    }
}

/// Check settings that parse but cannot be used.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.poll_interval_ms == 0 {
        return Err(TaskdeckError::Config(
            "poll_interval_ms must be greater than 0".to_string(),
        ));
    }
    if config.max_records == 0 {
        return Err(TaskdeckError::Config(
            "max_records must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// Config File Management
// ============================================================================

const CONFIG_FILENAME: &str = "config.toml";
const PROJECTS_FILENAME: &str = "projects.toml";
const FEED_FILENAME: &str = "feed.jsonl";
const LOG_FILENAME: &str = "taskdeck.log";

/// Default config file content with explanatory comments.
const DEFAULT_CONFIG_WITH_COMMENTS: &str = r##"# taskdeck configuration

# Console color theme: "dark", "light", "dracula", "device" or "reverse".
# "device" and "reverse" use [theme_assets] and fall back to [system_colors].
appearance = "dark"

# Milliseconds to wait for keyboard input before reading new output.
poll_interval_ms = 100

# Oldest output records are dropped beyond this count.
max_records = 10000

[system_colors]
window_background = "#ECECEC"
label = "#262626"
text = "#000000"

# Named colors for the device and reverse appearances, e.g.
# ConsoleBackground = "#1E1E1E"
# ConsoleBackgroundAlternate = "#252526"
# ReverseConsoleForeground = "#FFFFFF"
[theme_assets]
"##;

/// Get the taskdeck config directory path (~/.config/taskdeck/).
///
/// Does not create the directory.
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TaskdeckError::Config("Could not determine home directory".to_string()))?;
    Ok(config_dir_at(&home))
}

fn config_dir_at(base: &Path) -> PathBuf {
    base.join(".config").join(CONFIG_DIR_NAME)
}

/// Create `dir` if needed. Returns whether it was newly created.
fn ensure_dir(dir: &Path) -> Result<bool> {
    let created = !dir.exists();
    fs::create_dir_all(dir)?;
    Ok(created)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}

pub fn projects_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(PROJECTS_FILENAME))
}

/// Default feed location, used when `--feed` is not given.
pub fn default_feed_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(FEED_FILENAME))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(LOG_FILENAME))
}

/// Load `~/.config/taskdeck/config.toml`, creating it with commented defaults if missing.
pub fn load_config() -> Result<Config> {
    load_config_at(&config_path()?)
}

fn load_config_at(path: &Path) -> Result<Config> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG_WITH_COMMENTS)?;
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content).map_err(|e| {
        TaskdeckError::Config(format!("Failed to parse config file at {:?}: {}", path, e))
    })?;
    validate_config(&config)?;

    Ok(config)
}

pub fn save_config(config: &Config) -> Result<()> {
    save_config_at(&config_path()?, config)
}

fn save_config_at(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let content = toml::to_string(config)
        .map_err(|e| TaskdeckError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, content)?;
    Ok(())
}

// ============================================================================
// Projects File
// ============================================================================

/// Contents of `projects.toml`.
///
/// ```toml
/// [[projects]]
/// id = "6f1c1f0e-2f4b-4c55-9d59-2d7f1d3f9a10"
/// name = "web"
///
/// [[projects.tasks]]
/// id = "0b8e4a52-86f5-4df6-9d6e-8b3c3a8f2c11"
/// executable = "npm"
/// arguments = "run dev"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectsFile {
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl ProjectsFile {
    /// Find a project by name or by id.
    pub fn find(&self, key: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.name == key || p.id.to_string() == key)
    }
}

pub fn load_projects() -> Result<ProjectsFile> {
    load_projects_at(&projects_path()?)
}

fn load_projects_at(path: &Path) -> Result<ProjectsFile> {
    if !path.exists() {
        return Err(TaskdeckError::ProjectsFileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let projects: ProjectsFile = toml::from_str(&content)?;
    Ok(projects)
}

/// Load the project named (or identified by) `key`.
pub fn find_project(key: &str) -> Result<Project> {
    load_projects()?
        .find(key)
        .cloned()
        .ok_or_else(|| TaskdeckError::ProjectNotFound(key.to_string()))
}
