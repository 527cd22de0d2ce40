use super::MediaField;
use axum::extract::multipart::MultipartError;
use thiserror::Error;

/// 上传处理错误
///
/// 除了 [`UploadError::Storage`] 之外都是请求本身的问题，对应 400
#[derive(Error, Debug)]
pub enum UploadError {
    /// 文件扩展名不在允许列表中
    #[error("{}", .field.invalid_type_message())]
    InvalidFileType { field: MediaField, file_name: String },

    #[error("File too large: '{file_name}' exceeds the limit of {limit} bytes")]
    FileTooLarge { file_name: String, limit: usize },

    #[error("Too many files for field '{}' (max {})", .field.field_name(), .field.max_count())]
    TooManyFiles { field: MediaField },

    /// 在非上传字段中提交了文件
    #[error("Unexpected field: {0}")]
    UnexpectedField(String),

    #[error("Please fill all required fields")]
    MissingFields,

    #[error("Please upload at least one project photo")]
    MissingPhotos,

    /// 字段存在但取值不合法，例如未知的项目类型或者价格不是数字
    #[error("{0}")]
    InvalidField(String),

    #[error("Invalid multipart request: {0}")]
    Multipart(#[from] MultipartError),

    /// 写入上传目录失败
    #[error("Failed to store uploaded file: {0}")]
    Storage(#[from] std::io::Error),
}
