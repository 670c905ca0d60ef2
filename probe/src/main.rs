// rime-settings-probe: resolve and print ibus-rime style settings for an app

mod config;
mod logging;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rime_settings::{color, current_settings, CurrentSettings, Settings, SettingsResolver};
use rime_settings_yaml::YamlConfigProvider;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rime-settings-probe")]
#[command(about = "Resolve the ibus-rime style settings an application would get")]
#[command(version)]
struct Cli {
    /// Application id; omit for the global settings
    app_id: Option<String>,

    /// Drop cached settings and reread the config
    #[arg(long)]
    reload: bool,

    /// Config source name (default: ibus_rime)
    #[arg(long)]
    source: Option<String>,

    /// Rime user data directory
    #[arg(long, env = "RIME_USER_DATA_DIR")]
    user_dir: Option<PathBuf>,

    /// Rime shared data directory
    #[arg(long, env = "RIME_SHARED_DATA_DIR")]
    shared_dir: Option<PathBuf>,

    /// YAML probe configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// Include the preset color schemes in the output
    #[arg(long)]
    list_schemes: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

#[derive(Debug, Serialize)]
struct Report {
    app_id: String,
    source: String,
    settings: Settings,
    #[serde(skip_serializing_if = "Option::is_none")]
    color_schemes: Option<Vec<SchemeReport>>,
}

#[derive(Debug, Serialize)]
struct SchemeReport {
    id: &'static str,
    text_color: String,
    back_color: String,
}

impl Report {
    fn new(app_id: &str, source: &str, settings: Settings, list_schemes: bool) -> Self {
        let color_schemes = list_schemes.then(|| {
            color::all()
                .iter()
                .map(|scheme| SchemeReport {
                    id: scheme.id,
                    text_color: color::to_hex(scheme.text_color),
                    back_color: color::to_hex(scheme.back_color),
                })
                .collect()
        });
        Self {
            app_id: app_id.to_string(),
            source: source.to_string(),
            settings,
            color_schemes,
        }
    }

    fn render(&self, format: Format) -> anyhow::Result<String> {
        Ok(match format {
            Format::Yaml => serde_yaml::to_string(self)?,
            Format::Json => serde_json::to_string_pretty(self)? + "\n",
        })
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut probe = config::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        probe.source_name = source;
    }
    if let Some(dir) = cli.user_dir {
        probe.user_dir = Some(dir);
    }
    if let Some(dir) = cli.shared_dir {
        probe.shared_dir = Some(dir);
    }

    let paths = probe.search_paths();
    tracing::debug!(?paths, source = %probe.source_name, "Probe configuration");

    let resolver =
        SettingsResolver::with_config(YamlConfigProvider::new(paths), probe.resolver_config());
    let app_id = cli.app_id.as_deref().unwrap_or("");

    CurrentSettings::global()
        .load(&resolver, Some(app_id), cli.reload)
        .with_context(|| format!("Failed to resolve settings for app '{}'", app_id))?;

    let report = Report::new(app_id, &probe.source_name, current_settings(), cli.list_schemes);
    print!("{}", report.render(cli.format)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::setup(cli.verbose);
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "rime-settings-probe",
            "org.gnome.Terminal",
            "--reload",
            "--format",
            "json",
            "--user-dir",
            "/tmp/rime",
        ])
        .unwrap();
        assert_eq!(cli.app_id.as_deref(), Some("org.gnome.Terminal"));
        assert!(cli.reload);
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.user_dir, Some(PathBuf::from("/tmp/rime")));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["rime-settings-probe"]).unwrap();
        assert!(cli.app_id.is_none());
        assert!(!cli.reload);
        assert_eq!(cli.format, Format::Yaml);
    }

    #[test]
    fn test_report_render() {
        let settings = Settings {
            color_scheme: color::lookup("luna"),
            ..Settings::default()
        };
        let report = Report::new("gedit", "ibus_rime", settings, true);

        let yaml = report.render(Format::Yaml).unwrap();
        assert!(yaml.contains("app_id: gedit"));
        assert!(yaml.contains("cursor_type: insert"));
        assert!(yaml.contains("#ffff7f"));

        let json: serde_json::Value =
            serde_json::from_str(&report.render(Format::Json).unwrap()).unwrap();
        assert_eq!(json["settings"]["color_scheme"]["id"], "luna");
        assert_eq!(json["color_schemes"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_report_omits_schemes_by_default() {
        let report = Report::new("", "ibus_rime", Settings::default(), false);
        let json: serde_json::Value =
            serde_json::from_str(&report.render(Format::Json).unwrap()).unwrap();
        assert!(json.get("color_schemes").is_none());
        assert!(json["settings"]["color_scheme"].is_null());
    }
}
