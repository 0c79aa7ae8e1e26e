use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use doc_intake_core::contract::{
    validate_presign_request, PresignError, PresignRequest, PresignResponse, PresignTarget,
};
use doc_intake_core::storage_keys::{upload_object_key, UPLOADS_PREFIX};
use tracing::{info, warn};
use uuid::Uuid;

use crate::adapters::presign::UploadPresigner;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignSettings {
    pub bucket_name: String,
    pub ttl: Duration,
}

/// Issues a presigned `PUT` for a new upload.
///
/// The clock and the upload id are passed in so the response is
/// deterministic for a given input.
pub fn handle_presign_request(
    request: &PresignRequest,
    settings: &PresignSettings,
    presigner: &dyn UploadPresigner,
    now: DateTime<Utc>,
    upload_id: Uuid,
) -> Result<PresignResponse, PresignError> {
    if let Err(error) = validate_presign_request(request) {
        warn!(
            file_name = %request.file_name,
            file_size = request.file_size,
            error = %error,
            "rejected presign request"
        );
        return Err(error);
    }

    let key = upload_object_key(UPLOADS_PREFIX, upload_id, &request.file_name);
    let expires_at = chrono::Duration::from_std(settings.ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| PresignError::Presign("presign expiry is out of range".to_string()))?;

    let target = PresignTarget {
        bucket: settings.bucket_name.clone(),
        key: key.clone(),
        content_type: request.file_type.clone(),
        expires_in: settings.ttl,
    };

    let presigned_url = presigner.presign_put(&target).map_err(|error| {
        warn!(bucket = %target.bucket, key = %target.key, error = %error, "presign failed");
        PresignError::Presign(error)
    })?;

    info!(
        bucket = %target.bucket,
        key = %key,
        file_size = request.file_size,
        "issued upload url"
    );

    Ok(PresignResponse {
        presigned_url,
        key,
        bucket_name: settings.bucket_name.clone(),
        expires_at: expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}
