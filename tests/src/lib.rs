pub use exec_log::ExecLog;


pub use logging_driver::{DriverOp, LoggingDriver};

pub use std_util::*;

use tracing_subscriber::EnvFilter;
use trellis::{Client, Config};
use trellis_driver_memory::Memory;

/// One test's client, the store behind it and the log of every driver
/// operation the client issued.
pub struct TrellisTest {
    pub client: Client,
    pub memory: Memory,
    log: ExecLog,
}

impl TrellisTest {
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    pub async fn with_config(config: Config) -> Self {
        init_tracing();

        let memory = fixtures::memory();
        let driver = LoggingDriver::new(memory.clone());
        let log = ExecLog::new(driver.ops_log_handle());

        let client = Client::builder()
            .config(config)
            .connect(driver)
            .await
            .expect("failed to open session");

        Self {
            client,
            memory,
            log,
        }
    }

    pub fn log(&mut self) -> &mut ExecLog {
        &mut self.log
    }
}

/// Routes `tracing` output through the test harness. `RUST_LOG` selects the
/// level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
