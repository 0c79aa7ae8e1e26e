use std::sync::Arc;

use aws_sdk_s3::presigning::PresigningConfig;
use doc_intake_core::config::ApiConfig;
use doc_intake_core::contract::PresignTarget;
use doc_intake_lambda::adapters::presign::UploadPresigner;
use doc_intake_lambda::api::{build_router, ApiState};
use doc_intake_lambda::handlers::presign::PresignSettings;
use doc_intake_lambda::observability::{init_logging, LogFormat};
use tracing::info;

struct S3UploadPresigner {
    s3_client: aws_sdk_s3::Client,
}

impl UploadPresigner for S3UploadPresigner {
    fn presign_put(&self, target: &PresignTarget) -> Result<String, String> {
        let client = self.s3_client.clone();
        let target = target.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let presigning = PresigningConfig::expires_in(target.expires_in)
                    .map_err(|error| format!("invalid presign expiry: {error}"))?;

                let mut request = client.put_object().bucket(target.bucket).key(target.key);
                if !target.content_type.is_empty() {
                    request = request.content_type(target.content_type);
                }

                request
                    .presigned(presigning)
                    .await
                    .map(|presigned| presigned.uri().to_string())
                    .map_err(|error| format!("failed to presign s3 put: {error}"))
            })
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(LogFormat::from_env());

    let config = ApiConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    let state = Arc::new(ApiState {
        presigner: Arc::new(S3UploadPresigner {
            s3_client: aws_sdk_s3::Client::new(&aws_config),
        }),
        settings: PresignSettings {
            bucket_name: config.bucket_name.clone(),
            ttl: config.presign_ttl,
        },
    });
    let app = build_router(state, &config.allowed_origin)?;

    let addr = config.bind_address();
    info!(
        %addr,
        bucket = %config.bucket_name,
        environment = config.environment.as_str(),
        allowed_origin = %config.allowed_origin,
        "upload api starting"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
