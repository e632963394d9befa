use std::path::{Path, PathBuf};

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use chrono::Utc;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload failed: {0}")]
    Upload(String),
}

/// A donation report payload as received from the transport layer.
#[derive(Debug, Clone)]
pub struct ReportUpload {
    pub bytes: Vec<u8>,
    pub original_name: String,
}

/// Where completed-donation reports land. Implementations return a stable
/// reference string the acceptance record keeps forever.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn store_report(&self, upload: ReportUpload) -> Result<String, ReportError>;
}

/// Writes reports under a public directory and returns the path a static
/// file server would expose them at, e.g. `/bloodDonationReport/169...-report.pdf`.
pub struct LocalReportStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalReportStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }
}

#[async_trait]
impl ReportStore for LocalReportStore {
    async fn store_report(&self, upload: ReportUpload) -> Result<String, ReportError> {
        let file_name = timestamped_name(&upload.original_name);
        fs::create_dir_all(&self.root).await?;
        fs::write(self.root.join(&file_name), &upload.bytes).await?;
        Ok(format!(
            "{}/{}",
            self.public_prefix.trim_end_matches('/'),
            file_name
        ))
    }
}

/// Uploads reports to an S3-compatible bucket (MinIO in dev) and returns an
/// `s3://bucket/key` reference.
pub struct S3ReportStore {
    client: S3Client,
    bucket: String,
}

impl S3ReportStore {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Creates the bucket on first use so a fresh MinIO container works
    /// without manual setup.
    async fn ensure_bucket(&self) -> Result<(), ReportError> {
        let exists = self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok();
        if !exists {
            self.client
                .create_bucket()
                .bucket(&self.bucket)
                .send()
                .await
                .map_err(|e| ReportError::Upload(e.to_string()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl ReportStore for S3ReportStore {
    async fn store_report(&self, upload: ReportUpload) -> Result<String, ReportError> {
        self.ensure_bucket().await?;

        let key = timestamped_name(&upload.original_name);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(upload.bytes))
            .send()
            .await
            .map_err(|e| ReportError::Upload(e.to_string()))?;

        Ok(format!("s3://{}/{}", self.bucket, key))
    }
}

/// `{unix_millis}-{name}`, with any directory components stripped from the
/// client-supplied name.
fn timestamped_name(original_name: &str) -> String {
    let base = Path::new(original_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = if base.is_empty() {
        "report".to_string()
    } else {
        base
    };
    format!("{}-{}", Utc::now().timestamp_millis(), base)
}
