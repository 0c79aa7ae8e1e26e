use doc_intake_core::contract::PresignTarget;

pub trait UploadPresigner {
    fn presign_put(&self, target: &PresignTarget) -> Result<String, String>;
}
