use doc_intake_core::config::HandlerConfig;
use doc_intake_core::contract::InvocationResponse;
use doc_intake_lambda::handlers::ocr::OcrEventHandler;
use doc_intake_lambda::observability::{init_logging, LogFormat};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(
    handler: &OcrEventHandler,
    event: LambdaEvent<Value>,
) -> Result<InvocationResponse, Error> {
    let LambdaEvent { payload, context } = event;
    let span = tracing::info_span!("ocr_invocation", request_id = %context.request_id);

    Ok(span.in_scope(|| handler.handle(&payload)))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging(LogFormat::Json);

    let config = HandlerConfig::from_env();
    tracing::info!(
        table_name = %config.table_name,
        bucket_name = %config.bucket_name,
        "ocr lambda starting"
    );
    let handler = OcrEventHandler::new(config);
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        handle_request(handler, event)
    }))
    .await
}

#[cfg(test)]
mod tests {
    use lambda_runtime::Context;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn acknowledges_sqs_batch_invocation() {
        let handler = OcrEventHandler::new(HandlerConfig {
            table_name: "ocr-results".to_string(),
            bucket_name: "doc-intake-uploads-dev".to_string(),
        });
        let event = LambdaEvent::new(
            json!({
                "Records": [
                    {"messageId": "m-1", "eventSource": "aws:sqs", "body": "x"},
                    {"messageId": "m-2", "eventSource": "aws:sqs", "body": "y"}
                ]
            }),
            Context::default(),
        );

        let response = handle_request(&handler, event)
            .await
            .expect("handler should not fail");

        assert_eq!(
            serde_json::to_value(response).expect("serialize"),
            json!({"batchItemFailures": []})
        );
    }

    #[tokio::test]
    async fn answers_direct_invocation_with_status() {
        let handler = OcrEventHandler::default();
        let event = LambdaEvent::new(json!({}), Context::default());

        let response = handle_request(&handler, event)
            .await
            .expect("handler should not fail");

        assert_eq!(response, InvocationResponse::ok());
    }
}
