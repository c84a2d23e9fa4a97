mod ui;

use clap::Parser;
use eframe::egui;
use tracing::info;

use crate::ui::{FormApp, PersistedAppSettings, StartupConfig, SETTINGS_STORAGE_KEY};

/// Desktop form for keeping an in-memory roster of people. All records
/// live for the duration of the session only.
#[derive(Debug, Parser)]
#[command(name = "person-roster")]
struct Args {
    /// Window title override.
    #[arg(long)]
    title: Option<String>,

    /// Preload a handful of sample records for manual testing.
    #[arg(long)]
    demo: bool,

    /// Tracing filter, e.g. "info" or "form_core=debug".
    #[arg(long, default_value = "info")]
    log_filter: String,
}

impl Args {
    fn into_startup(self) -> StartupConfig {
        let defaults = StartupConfig::default();
        StartupConfig {
            title: self.title.unwrap_or(defaults.title),
            demo: self.demo,
        }
    }
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter.clone())
        .init();

    let startup = args.into_startup();
    info!(title = %startup.title, demo = startup.demo, "starting person roster app");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(startup.title.clone())
            .with_inner_size([1080.0, 720.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    let app_name = startup.title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| {
            let persisted_settings = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedAppSettings>(&text).ok())
            });
            Ok(Box::new(FormApp::bootstrap(startup, persisted_settings)))
        }),
    )
}
