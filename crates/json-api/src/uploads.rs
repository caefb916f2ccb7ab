//! Uploaded file storage.
//!
//! Files are copied out of salvo's temporary multipart storage into
//! `<root>/ids` or `<root>/rooms` under a fresh UUID, and referenced by the
//! public path `uploads/<dir>/<uuid>.<ext>`.

use std::{
    io,
    path::{Path, PathBuf},
};

use salvo::http::{StatusError, form::FilePart};
use thiserror::Error;
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use crate::extensions::internal_error;

/// URL prefix uploaded files are served under.
pub(crate) const PUBLIC_PREFIX: &str = "uploads";

/// What an upload is for; decides its directory and accepted types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UploadKind {
    IdDocument,
    RoomImage,
}

impl UploadKind {
    fn dir(self) -> &'static str {
        match self {
            Self::IdDocument => "ids",
            Self::RoomImage => "rooms",
        }
    }

    /// File extension for an accepted content type.
    fn extension(self, content_type: &str) -> Option<&'static str> {
        match (self, content_type) {
            (_, "image/jpeg") => Some("jpg"),
            (_, "image/png") => Some("png"),
            (_, "image/webp") => Some("webp"),
            (Self::IdDocument, "application/pdf") => Some("pdf"),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum UploadError {
    #[error("unsupported file type {0}")]
    UnsupportedType(String),

    #[error("file is {size} bytes, the limit is {max}")]
    TooLarge { size: u64, max: u64 },

    #[error("failed to store upload")]
    Io(#[from] io::Error),
}

pub(crate) fn into_status_error(error: UploadError) -> StatusError {
    match error {
        UploadError::UnsupportedType(_) | UploadError::TooLarge { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        UploadError::Io(source) => internal_error("failed to store upload", &source),
    }
}

#[derive(Debug, Clone)]
pub(crate) struct UploadStore {
    root: PathBuf,
    max_bytes: u64,
}

impl UploadStore {
    pub(crate) fn new(root: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directories if they are missing.
    pub(crate) async fn ensure_dirs(&self) -> io::Result<()> {
        for kind in [UploadKind::IdDocument, UploadKind::RoomImage] {
            fs::create_dir_all(self.root.join(kind.dir())).await?;
        }

        Ok(())
    }

    /// Validate and keep a multipart file, returning its public path.
    pub(crate) async fn store(
        &self,
        kind: UploadKind,
        file: &FilePart,
    ) -> Result<String, UploadError> {
        let content_type = file.content_type().map(|mime| mime.essence_str().to_owned());

        self.store_file(kind, content_type.as_deref(), file.size(), file.path())
            .await
    }

    async fn store_file(
        &self,
        kind: UploadKind,
        content_type: Option<&str>,
        size: u64,
        source: &Path,
    ) -> Result<String, UploadError> {
        let content_type = content_type.unwrap_or("application/octet-stream");

        let extension = kind
            .extension(content_type)
            .ok_or_else(|| UploadError::UnsupportedType(content_type.to_owned()))?;

        if size > self.max_bytes {
            return Err(UploadError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }

        let file_name = format!("{}.{extension}", Uuid::now_v7());
        let dir = self.root.join(kind.dir());

        fs::create_dir_all(&dir).await?;
        fs::copy(source, dir.join(&file_name)).await?;

        Ok(format!("{PUBLIC_PREFIX}/{}/{file_name}", kind.dir()))
    }

    /// Best-effort removal of a stored file by its public path.
    pub(crate) async fn discard(&self, public_path: &str) {
        let Some(relative) = public_path
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return;
        };

        if relative.split('/').any(|segment| segment == "..") {
            return;
        }

        if let Err(source) = fs::remove_file(self.root.join(relative)).await {
            warn!(path = public_path, "failed to discard upload: {source}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use testresult::TestResult;

    use super::*;

    fn source_file(bytes: &[u8]) -> TestResult<tempfile::NamedTempFile> {
        let mut file = tempfile::NamedTempFile::new()?;

        file.write_all(bytes)?;

        Ok(file)
    }

    #[tokio::test]
    async fn stores_images_under_their_kind() -> TestResult {
        let root = tempfile::tempdir()?;
        let store = UploadStore::new(root.path(), 1024);
        let source = source_file(b"png bytes")?;

        let path = store
            .store_file(UploadKind::RoomImage, Some("image/png"), 9, source.path())
            .await?;

        assert!(path.starts_with("uploads/rooms/"), "unexpected path {path}");
        assert!(path.ends_with(".png"), "unexpected path {path}");

        let stored = root.path().join(path.trim_start_matches("uploads/"));

        assert_eq!(std::fs::read(stored)?, b"png bytes");

        Ok(())
    }

    #[tokio::test]
    async fn pdfs_are_only_accepted_as_id_documents() -> TestResult {
        let root = tempfile::tempdir()?;
        let store = UploadStore::new(root.path(), 1024);
        let source = source_file(b"%PDF")?;

        let document = store
            .store_file(UploadKind::IdDocument, Some("application/pdf"), 4, source.path())
            .await?;

        let image = store
            .store_file(UploadKind::RoomImage, Some("application/pdf"), 4, source.path())
            .await;

        assert!(document.starts_with("uploads/ids/"), "unexpected path {document}");
        assert!(
            matches!(image, Err(UploadError::UnsupportedType(ref t)) if t == "application/pdf"),
            "expected unsupported type, got {image:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn oversized_files_are_rejected() -> TestResult {
        let root = tempfile::tempdir()?;
        let store = UploadStore::new(root.path(), 4);
        let source = source_file(b"too big")?;

        let result = store
            .store_file(UploadKind::IdDocument, Some("image/jpeg"), 7, source.path())
            .await;

        assert!(
            matches!(result, Err(UploadError::TooLarge { size: 7, max: 4 })),
            "expected too large, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn discard_removes_stored_files() -> TestResult {
        let root = tempfile::tempdir()?;
        let store = UploadStore::new(root.path(), 1024);
        let source = source_file(b"jpeg")?;

        let path = store
            .store_file(UploadKind::IdDocument, Some("image/jpeg"), 4, source.path())
            .await?;

        store.discard(&path).await;

        assert!(
            !root.path().join(path.trim_start_matches("uploads/")).exists(),
            "expected {path} to be removed"
        );

        Ok(())
    }
}
