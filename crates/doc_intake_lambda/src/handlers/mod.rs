pub mod ocr;
pub mod presign;
