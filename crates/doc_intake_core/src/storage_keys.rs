use uuid::Uuid;

use crate::config::DeploymentEnvironment;

pub const UPLOADS_PREFIX: &str = "uploads";
pub const UPLOADS_BUCKET_PREFIX: &str = "doc-intake-uploads";

pub fn upload_object_key(base_prefix: &str, upload_id: Uuid, file_name: &str) -> String {
    let trimmed = base_prefix.trim_matches('/');
    format!("{trimmed}/{upload_id}-{file_name}")
}

pub fn uploads_bucket_name(environment: DeploymentEnvironment) -> String {
    format!("{UPLOADS_BUCKET_PREFIX}-{}", environment.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_id() -> Uuid {
        Uuid::parse_str("6f1c2a8e-3b7d-4c55-9e0a-1d2b3c4d5e6f").expect("valid uuid")
    }

    #[test]
    fn builds_upload_key_under_prefix() {
        let key = upload_object_key(UPLOADS_PREFIX, fixed_id(), "invoice.pdf");
        assert_eq!(
            key,
            "uploads/6f1c2a8e-3b7d-4c55-9e0a-1d2b3c4d5e6f-invoice.pdf"
        );
    }

    #[test]
    fn trims_slashes_around_prefix() {
        let key = upload_object_key("/uploads/", fixed_id(), "a.png");
        assert_eq!(key, "uploads/6f1c2a8e-3b7d-4c55-9e0a-1d2b3c4d5e6f-a.png");
    }

    #[test]
    fn keeps_file_name_verbatim() {
        let key = upload_object_key(UPLOADS_PREFIX, fixed_id(), "my scan (1).jpg");
        assert!(key.ends_with("-my scan (1).jpg"));
    }

    #[test]
    fn bucket_name_follows_environment() {
        assert_eq!(
            uploads_bucket_name(DeploymentEnvironment::Dev),
            "doc-intake-uploads-dev"
        );
        assert_eq!(
            uploads_bucket_name(DeploymentEnvironment::Prod),
            "doc-intake-uploads-prod"
        );
    }
}
