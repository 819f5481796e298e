///
/// knox Runtime Static Library
///
/// Provides the runtime functions needed by C code emitted by the knox
/// compiler. This crate produces a static library (libknox_runtime.a) that
/// gets linked with the compiled program.
///
/// Contains:
/// - Runtime startup (knox_runtime_init)
/// - String helpers (knox_concat, knox_copy, knox_string_free)
/// - Random numbers (knox_random, knox_randomf, knox_randomd, knox_random_seed)
///

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub use knox_std_core::*;
pub use knox_std_random::*;
pub use knox_std_strings::*;

/// Environment variable holding the log filter, e.g. `KNOX_LOG=debug`.
pub const ENV_LOG: &str = "KNOX_LOG";

static INIT: Once = Once::new();

/// Install the stderr log subscriber. Safe to call more than once.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
        let installed = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_env_filter(filter)
            .try_init();
        if installed.is_err() {
            tracing::debug!("log subscriber already installed");
        }
    });
}

/// Runtime startup, called once by the emitted `main` before user code.
///
/// Installs logging and validates the runtime configuration so a bad
/// `KNOX_SEED` or `KNOX_CONFIG` is reported up front. Returns 0 on success
/// and 1 if the configuration could not be loaded; the runtime still works
/// in that case, with generators seeded from entropy.
#[unsafe(no_mangle)]
pub extern "C" fn knox_runtime_init() -> i32 {
    init_logging();
    match RuntimeConfig::from_env() {
        Ok(config) => {
            tracing::debug!(seed = ?config.random.seed, "knox runtime initialised");
            0
        }
        Err(err) => {
            tracing::warn!(%err, "invalid runtime configuration");
            1
        }
    }
}
