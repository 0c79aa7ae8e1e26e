use doc_intake_core::config::HandlerConfig;
use doc_intake_core::contract::{classify_event, InvocationResponse};
use serde_json::Value;
use tracing::info;

/// Handler behind the OCR queue Lambda.
///
/// Queue batches are acknowledged in full with an empty partial batch
/// failure list; any other invocation gets `{"status": "ok"}`. Items are not
/// processed yet, so nothing is ever reported as failed.
#[derive(Debug, Clone, Default)]
pub struct OcrEventHandler {
    config: HandlerConfig,
}

impl OcrEventHandler {
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn handle(&self, event: &Value) -> InvocationResponse {
        info!(event = %event, "received ocr event");

        classify_event(event).response()
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use serde_json::json;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl CapturedLogs {
        fn lines(&self) -> Vec<String> {
            let bytes = self.buffer.lock().expect("poisoned mutex").clone();
            String::from_utf8(bytes)
                .expect("logs should be utf-8")
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer
                .lock()
                .expect("poisoned mutex")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn handle_capturing_logs(event: &Value) -> (InvocationResponse, Vec<String>) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(Level::TRACE)
            .finish();

        let handler = OcrEventHandler::default();
        let response = tracing::subscriber::with_default(subscriber, || handler.handle(event));
        (response, logs.lines())
    }

    #[test]
    fn acknowledges_queue_batch_with_no_failures() {
        let handler = OcrEventHandler::default();
        let response = handler.handle(&json!({"Records": [{"body": "x"}, {"body": "y"}]}));

        assert_eq!(response, InvocationResponse::acknowledge_all());
        assert_eq!(
            serde_json::to_value(&response).expect("serialize"),
            json!({"batchItemFailures": []})
        );
    }

    #[test]
    fn acknowledges_empty_batch() {
        let handler = OcrEventHandler::default();
        let response = handler.handle(&json!({"Records": []}));
        assert_eq!(
            serde_json::to_value(&response).expect("serialize"),
            json!({"batchItemFailures": []})
        );
    }

    #[test]
    fn acknowledges_records_key_of_any_type() {
        let handler = OcrEventHandler::default();
        for records in [json!(null), json!("not a list"), json!({"nested": true}), json!(7)] {
            let response = handler.handle(&json!({"Records": records}));
            assert_eq!(response, InvocationResponse::acknowledge_all());
        }
    }

    #[test]
    fn answers_direct_invocations_with_status_ok() {
        let handler = OcrEventHandler::default();
        for event in [
            json!({}),
            json!({"detail-type": "manual test"}),
            json!([{"Records": []}]),
            json!("Records"),
            json!(0),
            Value::Null,
        ] {
            let response = handler.handle(&event);
            assert_eq!(
                serde_json::to_value(&response).expect("serialize"),
                json!({"status": "ok"}),
                "event: {event}"
            );
        }
    }

    #[test]
    fn keeps_injected_config() {
        let config = HandlerConfig {
            table_name: "ocr-results".to_string(),
            bucket_name: "doc-intake-uploads-dev".to_string(),
        };
        let handler = OcrEventHandler::new(config.clone());

        assert_eq!(handler.config(), &config);
        assert_eq!(
            handler.handle(&json!({"Records": []})),
            InvocationResponse::acknowledge_all()
        );
    }

    #[test]
    fn logs_serialized_event_once_per_call() {
        let (response, lines) = handle_capturing_logs(&json!({"Records": [{"body": "x"}]}));

        assert_eq!(response, InvocationResponse::acknowledge_all());
        assert_eq!(lines.len(), 1, "logs: {lines:?}");
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains(r#"event={"Records":[{"body":"x"}]}"#));
    }

    #[test]
    fn logs_direct_invocations_too() {
        let (response, lines) = handle_capturing_logs(&json!("ping"));

        assert_eq!(response, InvocationResponse::ok());
        assert_eq!(lines.len(), 1, "logs: {lines:?}");
        assert!(lines[0].contains(r#"event="ping""#));
    }
}
