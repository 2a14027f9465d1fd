//! This module provides observability hooks for the kernel dispatchers.
//!
//! The transforms themselves are pure and silent; what callers occasionally
//! need visibility into is the dispatch layer — which kernel ran, over which
//! logical type, with which parameters. The `log_metric!` macro emits that as
//! one structured key-value line through the `log` facade, so the host
//! application's logger configuration governs whether anything is printed.

/// Logs a structured key-value metric line at `debug` level.
///
/// # Example
/// ```
/// use floe_partition::log_metric;
/// let n = 16u32;
/// log_metric!("event" = "bucket", "dtype" = "Int64", "n" = &n);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        {
            // Collect each pair as a JSON-ish string fragment.
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            log::debug!("FLOE_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}
