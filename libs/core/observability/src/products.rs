//! Product-specific metrics.

use metrics::{counter, histogram};

pub const PRODUCT_OPERATIONS_TOTAL: &str = "product_operations_total";
pub const PRODUCT_SEARCH_RESULTS: &str = "product_search_results";

/// Result label for a product operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Rejected because of the request (bad input, unknown id)
    ClientError,
    /// Storage or other internal failure
    Error,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::ClientError => "client_error",
            Outcome::Error => "error",
        }
    }
}

/// Product metrics recorder
pub struct ProductMetrics;

impl ProductMetrics {
    /// Count one `operation` (`list`, `get`, `create`, `update`, `delete`, `search`).
    pub fn record_operation(operation: &'static str, outcome: Outcome) {
        counter!(
            PRODUCT_OPERATIONS_TOTAL,
            "operation" => operation,
            "outcome" => outcome.as_str()
        )
        .increment(1);
    }

    /// Record the result count of a search.
    pub fn record_search_results(count: usize) {
        histogram!(PRODUCT_SEARCH_RESULTS).record(count as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_record_operation_labels() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            ProductMetrics::record_operation("create", Outcome::Success);
            ProductMetrics::record_operation("create", Outcome::Success);
            ProductMetrics::record_operation("get", Outcome::ClientError);
        });

        let rendered = handle.render();
        let create_line = rendered
            .lines()
            .find(|l| l.starts_with(PRODUCT_OPERATIONS_TOTAL) && l.contains(r#"operation="create""#))
            .unwrap();
        assert!(create_line.contains(r#"outcome="success""#));
        assert!(create_line.ends_with(" 2"));
        assert!(rendered.contains(r#"outcome="client_error""#));
    }

    #[test]
    fn test_record_search_results_histogram() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            ProductMetrics::record_search_results(3);
            ProductMetrics::record_search_results(0);
        });

        let rendered = handle.render();
        let value = |suffix: &str| -> f64 {
            let name = format!("{PRODUCT_SEARCH_RESULTS}_{suffix}");
            rendered
                .lines()
                .find(|l| l.starts_with(&name))
                .and_then(|l| l.split_whitespace().last())
                .unwrap()
                .parse()
                .unwrap()
        };
        assert_eq!(value("count"), 2.0);
        assert_eq!(value("sum"), 3.0);
    }
}
