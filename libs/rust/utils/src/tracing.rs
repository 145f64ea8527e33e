use futures::{Future, FutureExt};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Dependency targets that are too chatty at `info`
const SILENCED_TARGETS: &[&str] = &[
    "hyper_util",
    "reqwest",
    "reqwest_retry",
    "tokenizers",
    "fastembed",
    "ort",
];

fn filter_layer() -> EnvFilter {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    SILENCED_TARGETS.iter().fold(filter, |filter, target| {
        match format!("{target}=off").parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        }
    })
}

/// Install the global subscriber: JSON lines on stdout, filtered by
/// `RUST_LOG` (default `info`).
pub fn setup_tracing() {
    tracing_subscriber::registry()
        .with(filter_layer())
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_writer(std::io::stdout),
        )
        .init();
}

/// Run `future` with tracing installed, logging its error or panic before
/// returning.
pub async fn run_with_tracing<F, Fut>(future: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    setup_tracing();
    run_logged(future).await
}

async fn run_logged<F, Fut>(future: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    match std::panic::AssertUnwindSafe(future()).catch_unwind().await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!(error = %e, error_chain = ?e, "Service exited with error");
            Err(e)
        }
        Err(panic) => {
            capture_panic_details(panic);
            Err(anyhow::anyhow!("service panicked"))
        }
    }
}

fn capture_panic_details(e: Box<dyn std::any::Any + Send>) {
    let backtrace = backtrace::Backtrace::new();
    if let Some(s) = e.downcast_ref::<&str>() {
        error!(panic_message = *s, backtrace = ?backtrace, "Panic occurred with message");
    } else if let Some(s) = e.downcast_ref::<String>() {
        error!(panic_message = s, backtrace = ?backtrace, "Panic occurred with message");
    } else {
        error!(backtrace = ?backtrace, "Panic occurred but the payload is not a string");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_logged_passes_through_success() {
        assert!(run_logged(|| async { Ok::<(), anyhow::Error>(()) }).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_logged_returns_error() {
        let result = run_logged(|| async { Err::<(), _>(anyhow::anyhow!("bind failed")) }).await;
        assert_eq!(result.unwrap_err().to_string(), "bind failed");
    }

    #[tokio::test]
    async fn test_run_logged_converts_panic() {
        let result = run_logged(|| async {
            if "boom".len() == 4 {
                panic!("boom");
            }
            Ok::<(), anyhow::Error>(())
        })
        .await;
        assert_eq!(result.unwrap_err().to_string(), "service panicked");
    }

    #[test]
    fn test_filter_layer_builds() {
        let filter = filter_layer().to_string();
        assert!(filter.contains("reqwest=off"));
    }
}
