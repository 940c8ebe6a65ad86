//! Upload Store
//!
//! 첨부 파일을 로컬 디렉토리에 저장하고 공개 URL(`/uploads/<name>`)을 돌려줌.
//!
//! # File Naming
//!
//! `{unix millis}-{0..1e9 난수}-{원본 파일명}`
//!
//! - 시간 + 난수로 충돌을 확률적으로 회피
//! - `create_new`로 열기 때문에 드물게 이름이 겹쳐도 기존 파일을 덮어쓰지 않고 새 이름으로 재시도
//! - 원본 파일명은 마지막 경로 요소만 사용 (`../` 등으로 디렉토리 탈출 불가)
//! - URL에서 의미가 있는 `%` `#` `?`는 `_`로 치환 → 반환된 URL을 그대로 요청해도 같은 파일
//! - 원본 파일명은 최대 200바이트 (확장자 유지), 저장 이름이 파일 시스템 한도(255바이트)를 넘지 않도록
//!
//! 보존 정책은 없음: 업로드된 파일은 계속 쌓임

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use rand::Rng;
use tokio::io::AsyncWriteExt;

/// 업로드 최대 크기 (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// 허용되는 MIME 타입 (요청에 선언된 content-type 기준, 내용 검사는 하지 않음)
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// 정적 서빙 경로
pub const PUBLIC_PREFIX: &str = "/uploads";

const MAX_NAME_ATTEMPTS: usize = 3;

/// 저장 이름에 들어가는 원본 파일명 최대 길이 (바이트)
///
/// 앞에 붙는 `{millis}-{난수}-` 접두어는 24바이트 안팎
const MAX_ORIGINAL_NAME_BYTES: usize = 200;

/// 잘라낼 때 보존하는 확장자 최대 길이 (`.` 포함)
const MAX_EXTENSION_BYTES: usize = 16;

/// 저장된 파일 정보
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_name: String,
    pub url: String,
}

/// 업로드 파일 저장소
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 업로드 디렉토리 생성 (이미 있으면 무시)
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create upload dir {}", self.dir.display()))
    }

    /// 파일 저장 후 공개 URL 반환
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile> {
        self.ensure_dir().await?;

        let original = sanitize_file_name(original_name);

        for _ in 0..MAX_NAME_ATTEMPTS {
            let file_name = stored_file_name(
                Utc::now().timestamp_millis(),
                rand::thread_rng().gen_range(0..1_000_000_000u32),
                &original,
            );
            let path = self.dir.join(&file_name);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tracing::warn!(%file_name, "upload name collision, retrying");
                    continue;
                }
                Err(e) => {
                    return Err(anyhow::Error::from(e)
                        .context(format!("failed to create {}", path.display())))
                }
            };

            file.write_all(bytes)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            file.flush().await?;

            tracing::info!(%file_name, size = bytes.len(), "file uploaded");

            return Ok(StoredFile {
                url: format!("{}/{}", PUBLIC_PREFIX, file_name),
                file_name,
            });
        }

        bail!("could not allocate a unique upload name for {}", original)
    }
}

/// 선언된 content-type이 허용 목록에 있는지 확인
///
/// `image/png; charset=binary` 같은 파라미터는 무시
pub fn is_allowed_mime(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ALLOWED_MIME_TYPES.contains(&essence.as_str())
}

fn stored_file_name(millis: i64, suffix: u32, original: &str) -> String {
    format!("{}-{}-{}", millis, suffix, original)
}

/// 원본 파일명에서 경로, 제어 문자, URL 예약 문자 제거 후 길이 제한
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(&['/', '\\'][..]).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if matches!(c, '%' | '#' | '?') { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "file".to_string()
    } else {
        truncate_keeping_extension(cleaned, MAX_ORIGINAL_NAME_BYTES)
    }
}

/// UTF-8 경계에서 자르되 짧은 확장자는 남김
fn truncate_keeping_extension(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_string();
    }

    let (stem, ext) = match name.rfind('.') {
        Some(i) if i > 0 && name.len() - i <= MAX_EXTENSION_BYTES => name.split_at(i),
        _ => (name, ""),
    };

    let mut end = (max - ext.len()).min(stem.len());
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{}", &stem[..end], ext)
}
