//! Telemetry helpers for applications embedding `axiskit`.
//!
//! Tracing setup stays explicit and opt-in. The engine only emits
//! `trace`/`debug`/`warn` events (measure passes, tick retry decisions, the
//! draw-area floor); wiring a subscriber is always the host application's
//! choice.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is
/// enabled, honoring `RUST_LOG` and falling back to `info`.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or
/// if a global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Like [`init_default_tracing`], with an explicit fallback filter for when
/// `RUST_LOG` is unset (e.g. `"axiskit=trace"` to watch layout passes).
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter)),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
