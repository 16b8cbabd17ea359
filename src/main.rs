mod config;
mod host;
mod message;
mod profile;
mod running_average;
mod script;
mod stream;

use clap::Parser;
use config::{parse_names, AppConfig, NamesError};
use script::ScriptKind;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tokio::io::BufReader;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 100;

#[derive(Error, Debug)]
enum ProfilerError {
    #[error("Invalid arguments: {0}")]
    Names(#[from] NamesError),
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Reader task failed: {0}")]
    Reader(#[from] tokio::task::JoinError),
    #[error("Failed to save config: {0}")]
    SaveConfig(String),
}

/// Evaluates profiles over JSON messages read from stdin.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opts {
    /// Config file to read
    #[arg(long, default_value = AppConfig::CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Comma-separated message names to evaluate; runs a single profile instead of the configured ones
    #[arg(long)]
    names: Option<String>,

    /// Built-in script to run; runs a single profile instead of the configured ones
    #[arg(long, value_enum)]
    script: Option<ScriptKind>,

    /// Pretty-print reports
    #[arg(long)]
    pretty: bool,

    /// Write the effective config back to the config file
    #[arg(long)]
    save_config: bool,
}

impl Opts {
    fn effective_config(&self) -> Result<AppConfig, ProfilerError> {
        let mut app_config = AppConfig::load_from_file(&self.config);
        if self.names.is_some() || self.script.is_some() {
            // Unset overrides come from the first configured profile
            let mut profile = app_config.profiles.first().cloned().unwrap_or_default();
            if let Some(names) = &self.names {
                profile.names = parse_names(names)?;
            }
            if let Some(script) = self.script {
                profile.script = script;
            }
            app_config.profiles = vec![profile];
        }
        app_config.pretty |= self.pretty;
        Ok(app_config)
    }
}

#[tokio::main]
async fn main() -> Result<(), ProfilerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    let app_config = opts.effective_config()?;
    if opts.save_config {
        app_config
            .save_to_file(&opts.config)
            .map_err(|e| ProfilerError::SaveConfig(e.to_string()))?;
    }

    let mut profiles = app_config.build_profiles();
    if profiles.is_empty() {
        log::warn!("No profiles configured, messages will only be counted");
    }
    for profile in &app_config.profiles {
        log::info!("Starting profile {:?} (names: {:?})", profile.script, profile.names);
    }

    let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
    let reader = stream::spawn_reader(BufReader::new(tokio::io::stdin()), tx);

    let mut stdout = std::io::stdout().lock();
    while let Some(message) = rx.recv().await {
        for report in stream::evaluate_all(&mut profiles, &message) {
            let json = if app_config.pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            writeln!(stdout, "{}", json)?;
        }
        stdout.flush()?;
    }

    let sent = reader.await?;
    log::info!("Input closed after {} messages", sent);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::app::ProfileConfig;
    use std::fs;
    use std::path::Path;

    struct TempConfig(PathBuf);

    impl TempConfig {
        fn new(name: &str, config: &AppConfig) -> Self {
            let path = std::env::temp_dir().join(format!("profiler-opts-{}-{}.json", name, std::process::id()));
            fs::write(&path, serde_json::to_string(config).unwrap()).unwrap();
            TempConfig(path)
        }

        fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TempConfig {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    fn two_profiles() -> AppConfig {
        AppConfig {
            profiles: vec![
                ProfileConfig {
                    script: ScriptKind::Sum,
                    names: vec!["cpu_temp".to_string()],
                },
                ProfileConfig::default(),
            ],
            pretty: false,
        }
    }

    fn effective(config: &TempConfig, args: &[&str]) -> Result<AppConfig, ProfilerError> {
        let path = config.path().to_str().unwrap();
        let mut argv = vec!["profiler", "--config", path];
        argv.extend_from_slice(args);
        Opts::parse_from(argv).effective_config()
    }

    #[test]
    fn without_overrides_config_is_used() {
        let config = TempConfig::new("plain", &two_profiles());
        assert_eq!(effective(&config, &[]).unwrap(), two_profiles());
    }

    #[test]
    fn names_replace_the_filter() {
        let config = TempConfig::new("names", &two_profiles());
        let app_config = effective(&config, &["--names", "gpu_temp, fan"]).unwrap();
        assert_eq!(
            app_config.profiles,
            vec![ProfileConfig {
                script: ScriptKind::Sum,
                names: vec!["gpu_temp".to_string(), "fan".to_string()],
            }]
        );
    }

    #[test]
    fn script_replaces_the_script() {
        let config = TempConfig::new("script", &two_profiles());
        let app_config = effective(&config, &["--script", "running-average"]).unwrap();
        assert_eq!(
            app_config.profiles,
            vec![ProfileConfig {
                script: ScriptKind::RunningAverage,
                names: vec!["cpu_temp".to_string()],
            }]
        );
    }

    #[test]
    fn pretty_is_ored_with_config() {
        let config = TempConfig::new("pretty-off", &two_profiles());
        assert!(effective(&config, &["--pretty"]).unwrap().pretty);

        let mut pretty = two_profiles();
        pretty.pretty = true;
        let config = TempConfig::new("pretty-on", &pretty);
        assert!(effective(&config, &[]).unwrap().pretty);
    }

    #[test]
    fn bad_names_are_an_error() {
        let config = TempConfig::new("bad-names", &two_profiles());
        assert!(matches!(
            effective(&config, &["--names", "a,,b"]),
            Err(ProfilerError::Names(_))
        ));
    }
}
