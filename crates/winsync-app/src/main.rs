mod cli;
mod host;

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use winsync_common::{WindowShape, WinsyncError};
use winsync_config::{MediumKind, WinsyncConfig};
use winsync_registry::{FileMedium, MemoryStore, RegistryKeys, SharedMedium};

use host::{Host, HostOptions};

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- winsync crashed ---");
        eprintln!("Windows joined by this process may linger in the shared record");
        eprintln!("until another participant rewrites it.");
        eprintln!("-----------------------\n");

        default_hook(info);
    }));
}

/// Load config from `--config` if given, else the platform default.
/// Any failure falls back to defaults.
fn load_config(path: Option<&str>) -> (WinsyncConfig, Option<String>) {
    let result = match path {
        Some(path) => winsync_config::load_config_from(Path::new(path)),
        None => winsync_config::load_config(),
    };
    match result {
        Ok(config) => (config, None),
        Err(e) => (WinsyncConfig::default(), Some(e.to_string())),
    }
}

fn host_options(args: &cli::Args, config: &WinsyncConfig) -> Result<HostOptions, WinsyncError> {
    let meta_data = match &args.meta {
        Some(raw) => Some(
            serde_json::from_str(raw)
                .map_err(|e| WinsyncError::Other(format!("--meta is not valid JSON: {e}")))?,
        ),
        None => None,
    };

    Ok(HostOptions {
        keys: RegistryKeys {
            counter: config.registry.counter_key.clone(),
            windows: config.registry.windows_key.clone(),
        },
        tick_interval: config.polling.tick_interval(),
        origin: WindowShape::new(args.x, args.y, args.width, args.height),
        meta_data,
        drift: args.drift,
        max_ticks: args.ticks,
    })
}

async fn run_host<M: SharedMedium>(media: Vec<M>, options: HostOptions) -> Result<(), WinsyncError> {
    let mut host = Host::new(media, options)?;
    let ticks = host.run().await;
    tracing::info!(
        "Host stopped after {ticks} tick(s), {} participant(s) departed",
        host.participants().len()
    );
    Ok(())
}

async fn run(args: cli::Args, config: WinsyncConfig) -> Result<(), WinsyncError> {
    let options = host_options(&args, &config)?;
    let participants = args.participants.max(1);

    let kind = if args.memory {
        MediumKind::Memory
    } else {
        config.medium.kind
    };

    match kind {
        MediumKind::File => {
            let dir = match &args.directory {
                Some(dir) => PathBuf::from(dir),
                None => winsync_config::resolve_medium_dir(&config)?,
            };
            tracing::info!("Using file medium at {}", dir.display());
            let media = (0..participants)
                .map(|_| FileMedium::open(&dir))
                .collect::<Result<Vec<_>, _>>()?;
            run_host(media, options).await
        }
        MediumKind::Memory => {
            tracing::info!("Using in-process memory medium");
            let store = MemoryStore::new();
            let media: Vec<_> = (0..participants).map(|_| store.connect()).collect();
            run_host(media, options).await
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    install_panic_hook();

    let args = cli::parse();

    // Config picks the default log level, so it loads before logging is up.
    let (config, config_error) = load_config(args.config.as_deref());

    let log_directive = args
        .log_level
        .as_deref()
        .unwrap_or(config.logging.level.directive());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "winsync=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("winsync v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    match config_error {
        Some(e) => tracing::warn!("Config load failed, using defaults: {e}"),
        None => tracing::info!(
            "Config loaded (medium: {:?}, tick: {}ms)",
            config.medium.kind,
            config.polling.tick_interval_ms
        ),
    }

    if let Err(e) = run(args, config).await {
        tracing::error!("winsync failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn host_options_use_config_keys_and_cli_shape() {
        let args = cli::Args::try_parse_from(["winsync", "--x", "5", "--width", "640"]).unwrap();
        let mut config = WinsyncConfig::default();
        config.registry.windows_key = "demo.windows".into();
        config.polling.tick_interval_ms = 50;

        let options = host_options(&args, &config).unwrap();
        assert_eq!(options.keys.windows, "demo.windows");
        assert_eq!(options.keys.counter, "count");
        assert_eq!(options.tick_interval.as_millis(), 50);
        assert_eq!(options.origin, WindowShape::new(5.0, 0.0, 640.0, 300.0));
        assert!(options.meta_data.is_none());
    }

    #[test]
    fn invalid_meta_is_rejected() {
        let args = cli::Args::try_parse_from(["winsync", "--meta", "{not json"]).unwrap();
        let err = host_options(&args, &WinsyncConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--meta"));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let (config, error) = load_config(Some("/tmp/definitely_missing_winsync.toml"));
        assert!(error.is_some());
        assert_eq!(config.registry.windows_key, "windows");
    }

    #[tokio::test]
    async fn memory_run_completes() {
        let args = cli::Args::try_parse_from(["winsync", "--memory", "-n", "2", "--ticks", "2"])
            .unwrap();
        let mut config = WinsyncConfig::default();
        config.polling.tick_interval_ms = 1;
        run(args, config).await.unwrap();
    }
}
