//! Services Module
//!
//! 핸들러가 주입받아 사용하는 서비스 레이어
//!
//! # Services
//! - `UploadStore`: 첨부 파일 저장 (로컬 디렉토리)

mod upload_store;

pub use upload_store::{
    is_allowed_mime, StoredFile, UploadStore, ALLOWED_MIME_TYPES, MAX_FILE_SIZE, PUBLIC_PREFIX,
};
