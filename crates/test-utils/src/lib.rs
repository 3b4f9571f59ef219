pub mod builders;
pub mod recording_target;

use std::sync::Once;
use std::time::Duration;

use cmdstub::logging::LOG_ENV_VAR;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Filter used when neither `CMDSTUB_LOG` nor `RUST_LOG` is set: the engine's
/// own start/wait/cancel events, warnings from everything else.
const DEFAULT_TEST_FILTER: &str = "cmdstub=debug,warn";

/// Longest a single stubbed wait may take before a test gives up.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Install a test-writer subscriber once per test binary.
///
/// Output is captured per test and only shown for failures (or with
/// `--nocapture`). `CMDSTUB_LOG` takes precedence over `RUST_LOG`, matching
/// the binary.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Await `f`, failing the test if it is still blocked after [`TEST_TIMEOUT`].
///
/// A stub whose signal is never resolved blocks forever; this turns that
/// hang into a test failure.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("stubbed call still blocked after {TEST_TIMEOUT:?}"),
    }
}

/// Cancel `ctx` from a background task after `delay`.
pub fn cancel_after(ctx: &CancellationToken, delay: Duration) -> tokio::task::JoinHandle<()> {
    let ctx = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        ctx.cancel();
    })
}
