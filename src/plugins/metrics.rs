use axum::{routing::get, Router};
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

#[derive(Clone)]
pub struct MetricsPlugin {
    registry: Arc<Registry>,
    pub story_list_requests: Arc<IntCounterVec>,
    pub format_errors: Arc<IntCounterVec>,
}

impl MetricsPlugin {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("story_list_requests_total", "Story list requests by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(requests.clone()))?;

        let format_errors = IntCounterVec::new(
            Opts::new("story_format_errors_total", "Story fields dropped because they could not be formatted"),
            &["field"],
        )?;
        registry.register(Box::new(format_errors.clone()))?;

        #[cfg(target_os = "linux")]
        {
            let collector = prometheus::process_collector::ProcessCollector::for_self();
            registry.register(Box::new(collector)).ok();
        }

        Ok(MetricsPlugin {
            registry: Arc::new(registry),
            story_list_requests: Arc::new(requests),
            format_errors: Arc::new(format_errors),
        })
    }

    pub fn record_request(&self, outcome: &str) {
        self.story_list_requests.with_label_values(&[outcome]).inc();
    }

    pub fn record_format_error(&self, field: &str) {
        self.format_errors.with_label_values(&[field]).inc();
    }

    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn router(&self) -> Router {
        let metrics = self.clone();
        Router::new().route("/", get(move || {
            let rendered = metrics.render();
            async move {
                match rendered {
                    Ok(body) => (axum::http::StatusCode::OK, body),
                    Err(e) => {
                        tracing::error!("metrics encoding failed: {}", e);
                        (axum::http::StatusCode::INTERNAL_SERVER_ERROR, String::new())
                    }
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        let metrics = MetricsPlugin::new().unwrap();
        metrics.record_request("ok");
        metrics.record_request("ok");
        metrics.record_format_error("published");
        let text = metrics.render().unwrap();
        assert!(text.contains("story_list_requests_total{outcome=\"ok\"} 2"));
        assert!(text.contains("story_format_errors_total{field=\"published\"} 1"));
    }
}
