//! 上传处理模块
//!
//! 负责解析 `multipart/form-data` 请求、校验上传的媒体文件，以及把文件写入上传目录：
//!
//! - [`form`]：读取 multipart 请求，校验文件类型/大小/数量以及必填字段，得到 [`ProjectDraft`]
//! - [`storage`]：为每个文件生成不冲突的文件名并写入磁盘，返回对外访问路径
//!
//! 所有校验都在写文件之前完成，写入后的清理由服务层负责。

pub mod error;
pub mod form;
pub mod storage;

use database::MAX_PROJECT_PHOTOS;
use std::path::Path;

pub use error::UploadError;
pub use form::{ProjectDraft, ProjectUploadForm, UploadedFile};
pub use storage::{FileStore, StoredFile, WrittenFiles};

/// 项目图片的表单字段名
pub const PHOTOS_FIELD: &str = "projectPhotos";

/// 项目视频的表单字段名
pub const VIDEO_FIELD: &str = "projectVideo";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];

/// 允许上传文件的表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaField {
    Photos,
    Video,
}

impl MediaField {
    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            PHOTOS_FIELD => Some(MediaField::Photos),
            VIDEO_FIELD => Some(MediaField::Video),
            _ => None,
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            MediaField::Photos => PHOTOS_FIELD,
            MediaField::Video => VIDEO_FIELD,
        }
    }

    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            MediaField::Photos => IMAGE_EXTENSIONS,
            MediaField::Video => VIDEO_EXTENSIONS,
        }
    }

    /// 单个字段最多允许的文件个数
    pub fn max_count(&self) -> usize {
        match self {
            MediaField::Photos => MAX_PROJECT_PHOTOS,
            MediaField::Video => 1,
        }
    }

    /// 文件扩展名（不区分大小写）是否在允许列表中
    pub fn accepts(&self, file_name: &str) -> bool {
        file_extension(file_name).is_some_and(|ext| {
            self.allowed_extensions()
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
    }

    pub fn invalid_type_message(&self) -> &'static str {
        match self {
            MediaField::Photos => "Only image files are allowed!",
            MediaField::Video => "Only video files are allowed!",
        }
    }
}

/// 取文件名中最后一个 `.` 之后的扩展名，保留原始大小写
pub fn file_extension(file_name: &str) -> Option<&str> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions_are_case_insensitive() {
        for name in ["a.jpg", "a.JPG", "a.jpeg", "a.JpEg", "a.png", "a.PNG", "a.gif", "a.GIF"] {
            assert!(MediaField::Photos.accepts(name), "{name} should be accepted");
        }
    }

    #[test]
    fn test_rejected_extensions() {
        for name in ["a.bmp", "a.webp", "a.png.exe", "png", "a.", "a"] {
            assert!(!MediaField::Photos.accepts(name), "{name} should be rejected");
        }
        assert!(!MediaField::Video.accepts("clip.png"));
        assert!(!MediaField::Photos.accepts("clip.mp4"));
    }

    #[test]
    fn test_video_extensions() {
        for name in ["clip.mp4", "clip.MOV", "clip.avi"] {
            assert!(MediaField::Video.accepts(name), "{name} should be accepted");
        }
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(MediaField::from_field_name("projectPhotos"), Some(MediaField::Photos));
        assert_eq!(MediaField::from_field_name("projectVideo"), Some(MediaField::Video));
        assert_eq!(MediaField::from_field_name("avatar"), None);
        assert_eq!(MediaField::Photos.max_count(), 5);
        assert_eq!(MediaField::Video.max_count(), 1);
    }

    #[test]
    fn test_file_extension_keeps_case() {
        assert_eq!(file_extension("lamp.PNG"), Some("PNG"));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz"));
        assert_eq!(file_extension("README"), None);
    }
}
