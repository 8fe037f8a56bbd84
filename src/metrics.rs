//! Executor metrics and tracing spans.
//!
//! With the `metrics` feature, every statement and connection attempt is
//! recorded on the OpenTelemetry meter `rowguard`, exported to a Prometheus
//! registry. Applications serve [`render`] (or scrape [`registry`]) from
//! their own HTTP endpoint.

#[cfg(feature = "metrics")]
pub use self::otel::*;

#[cfg(feature = "metrics")]
mod otel {
    use once_cell::sync::Lazy;
    use opentelemetry::{
        global,
        metrics::{Counter, Histogram, Meter, MeterProvider},
    };
    use opentelemetry_sdk::metrics::SdkMeterProvider;
    use prometheus::{Encoder, Registry, TextEncoder};
    use std::time::Duration;

    static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

    pub static METRICS: Lazy<RowguardMetrics> = Lazy::new(RowguardMetrics::init);

    pub struct RowguardMetrics {
        pub queries_total: Counter<u64>,
        pub query_errors_total: Counter<u64>,
        pub query_duration: Histogram<f64>,
        pub connect_duration: Histogram<f64>,
        _provider: Option<SdkMeterProvider>,
    }

    impl RowguardMetrics {
        pub fn init() -> Self {
            let (provider, meter) = Self::meter();

            let queries_total = meter
                .u64_counter("rowguard_queries_total")
                .with_description("Total statements executed")
                .build();

            let query_errors_total = meter
                .u64_counter("rowguard_query_errors_total")
                .with_description("Statements that failed")
                .build();

            let query_duration = meter
                .f64_histogram("rowguard_query_duration_seconds")
                .with_description("Duration of statements")
                .build();

            let connect_duration = meter
                .f64_histogram("rowguard_connect_duration_seconds")
                .with_description("Time spent establishing connections")
                .build();

            Self {
                queries_total,
                query_errors_total,
                query_duration,
                connect_duration,
                _provider: provider,
            }
        }

        fn meter() -> (Option<SdkMeterProvider>, Meter) {
            match opentelemetry_prometheus::exporter()
                .with_registry(REGISTRY.clone())
                .build()
            {
                Ok(exporter) => {
                    let provider = SdkMeterProvider::builder().with_reader(exporter).build();
                    let meter = provider.meter("rowguard");
                    (Some(provider), meter)
                }
                Err(e) => {
                    log::warn!("prometheus exporter unavailable, metrics go to the global meter: {e}");
                    (None, global::meter("rowguard"))
                }
            }
        }

        pub fn record_query(&self, elapsed: Duration) {
            self.queries_total.add(1, &[]);
            self.query_duration.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn record_query_error(&self) {
            self.query_errors_total.add(1, &[]);
        }

        pub fn record_connect(&self, elapsed: Duration) {
            self.connect_duration.record(elapsed.as_secs_f64(), &[]);
        }
    }

    /// The Prometheus registry the `rowguard` meter exports into.
    pub fn registry() -> &'static Registry {
        Lazy::force(&METRICS);
        &REGISTRY
    }

    /// Render all `rowguard` metrics in the Prometheus text format.
    pub fn render() -> Result<String, prometheus::Error> {
        let families = registry().gather();
        let mut buf = Vec::new();
        TextEncoder::new().encode(&families, &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(feature = "tracing")]
pub mod tracing_helpers {
    use tracing::Span;

    /// Span around one statement.
    pub fn execute_query_span(sql: &str) -> Span {
        tracing::debug_span!("rowguard.query", db.system = "postgresql", db.statement = %sql)
    }

    /// Span around establishing a connection.
    pub fn connect_span() -> Span {
        tracing::info_span!("rowguard.connect", db.system = "postgresql")
    }
}
