use serde::Deserialize;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

#[derive(Debug, Deserialize)]
#[cfg_attr(not(windows), allow(dead_code))]
struct Config {
    #[serde(default)]
    app_id: String,
    #[serde(default)]
    product_name: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    icon: String,
    #[serde(default = "default_log_filter")]
    log_filter: String,
    #[serde(default)]
    launch: Launch,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Launch {
    runtime: String,
    version_flag: String,
    archive_flag: String,
    archive: String,
}

impl Default for Launch {
    fn default() -> Self {
        Self {
            runtime: "java".to_string(),
            version_flag: "-version".to_string(),
            archive_flag: "-jar".to_string(),
            archive: "isstracker-1.0.jar".to_string(),
        }
    }
}

fn default_log_filter() -> String {
    "off".to_string()
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let manifest_dir = PathBuf::from(manifest_dir);
    let repo_root = manifest_dir.join("..");
    let config = load_config(&repo_root).unwrap_or_else(|err| {
        panic!("failed to load config.toml: {err}");
    });

    if let Err(err) = embed_resources(&repo_root, &config) {
        panic!("failed to embed resources: {err}");
    }

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR not set"));
    if let Err(err) = write_config_rs(&out_dir, &config) {
        panic!("failed to write config: {err}");
    }
}

fn load_config(repo_root: &Path) -> io::Result<Config> {
    let config_path = repo_root.join("config.toml");
    println!("cargo:rerun-if-changed={}", config_path.display());
    let contents = fs::read_to_string(&config_path)?;
    let cfg: Config = toml::from_str(&contents)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    if cfg.launch.runtime.trim().is_empty() || cfg.launch.archive.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "launch.runtime and launch.archive must not be empty",
        ));
    }
    Ok(cfg)
}

#[cfg(windows)]
fn embed_resources(repo_root: &Path, config: &Config) -> io::Result<()> {
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return Ok(());
    }
    let mut res = winres::WindowsResource::new();
    if let Some(icon_path) = resolve_icon_path(repo_root, config) {
        println!("cargo:rerun-if-changed={}", icon_path.display());
        res.set_icon(icon_path.to_string_lossy().as_ref());
    }
    if !config.product_name.is_empty() {
        res.set("ProductName", &config.product_name);
    }
    if !config.description.is_empty() {
        res.set("FileDescription", &config.description);
    }
    if !config.company.is_empty() {
        res.set("CompanyName", &config.company);
    }
    if !config.version.is_empty() {
        res.set("FileVersion", &config.version);
        res.set("ProductVersion", &config.version);
    }
    if !config.app_id.is_empty() {
        res.set("InternalName", &config.app_id);
    }
    res.compile()?;
    Ok(())
}

#[cfg(not(windows))]
fn embed_resources(repo_root: &Path, config: &Config) -> io::Result<()> {
    // No resource compiler off Windows hosts; still track the icon for rebuilds.
    if let Some(icon_path) = resolve_icon_path(repo_root, config) {
        println!("cargo:rerun-if-changed={}", icon_path.display());
    }
    Ok(())
}

fn resolve_icon_path(repo_root: &Path, config: &Config) -> Option<PathBuf> {
    if !config.icon.is_empty() {
        let candidate = repo_root.join(&config.icon);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    let assets_dir = repo_root.join("assets");
    if !assets_dir.exists() {
        return None;
    }
    let mut ico_paths: Vec<PathBuf> = fs::read_dir(&assets_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|e| e.eq_ignore_ascii_case("ico"))
                .unwrap_or(false)
        })
        .collect();
    ico_paths.sort();
    ico_paths.first().cloned()
}

fn write_config_rs(out_dir: &Path, config: &Config) -> io::Result<()> {
    let out_path = out_dir.join("launcher_config.rs");
    let mut file = fs::File::create(&out_path)?;
    writeln!(file, "pub const RUNTIME: &str = {:?};", config.launch.runtime)?;
    writeln!(file, "pub const VERSION_FLAG: &str = {:?};", config.launch.version_flag)?;
    writeln!(file, "pub const ARCHIVE_FLAG: &str = {:?};", config.launch.archive_flag)?;
    writeln!(file, "pub const ARCHIVE: &str = {:?};", config.launch.archive)?;
    writeln!(file, "pub const LOG_FILTER: &str = {:?};", config.log_filter)?;
    Ok(())
}
