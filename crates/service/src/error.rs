//! Typed error enum for the service layer.
//!
//! Every user-facing failure of the ledger maps onto one variant, so the HTTP
//! and CLI front ends can pick a status or message without downcasting.

use cloud_hunter_imaging::ImagingError;
use cloud_hunter_llm::LlmError;
use cloud_hunter_storage::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The upload is too small, unreadable, or not JPEG/PNG/WEBP.
    #[error("invalid image: {0}")]
    InputRejected(String),

    /// Classification worked but the picture shows no sky.
    #[error("no cloud structure found in the picture")]
    NotCloudContent,

    /// Every model and retry failed; nothing was written.
    #[error("classification unavailable: {reason}")]
    ClassificationUnavailable { rate_limited: bool, reason: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    #[error("imaging: {0}")]
    Imaging(ImagingError),

    /// A blocking task panicked or was cancelled.
    #[error("internal: {0}")]
    Internal(String),
}

impl ServiceError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Storage(StorageError::NotFound { .. }))
    }

    /// Whether retrying the same action later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ClassificationUnavailable { .. } => true,
            Self::Storage(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InputRejected(_) => {
                "无法读取此图片格式，请上传 JPG / PNG / WEBP 照片（可尝试截图后再上传）".to_owned()
            },
            Self::NotCloudContent => "鉴定失败：画面中未发现明显云彩结构".to_owned(),
            Self::ClassificationUnavailable { rate_limited: true, .. } => {
                "观测次数过多，请休息片刻".to_owned()
            },
            Self::ClassificationUnavailable { rate_limited: false, .. } => {
                "卫星连接暂时中断，请稍后再试".to_owned()
            },
            other => other.to_string(),
        }
    }
}

impl From<ImagingError> for ServiceError {
    fn from(err: ImagingError) -> Self {
        if err.is_input_rejection() { Self::InputRejected(err.to_string()) } else { Self::Imaging(err) }
    }
}

impl From<LlmError> for ServiceError {
    fn from(err: LlmError) -> Self {
        Self::ClassificationUnavailable { rate_limited: err.is_rate_limited(), reason: err.to_string() }
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {err}"))
    }
}
