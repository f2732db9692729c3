use std::sync::{Arc, Mutex};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::application::LedgerProcessor;
use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::{add_log, start_server};

pub fn run() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();

    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    if let Some(e) = config_error {
        warn!("Falling back to default configuration: {}", e);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let logs = Arc::new(Mutex::new(Vec::new()));
        let processor = LedgerProcessor::new(&config.loader);
        let server = start_server(&config, processor, logs.clone())?;

        let address = config.bind_address();
        info!(%address, "Ledger normalizer listening");
        add_log(
            &logs,
            "INFO",
            "System",
            &format!("HTTP server started on {}", address),
        );

        server.await
    })
}
