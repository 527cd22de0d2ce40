//! 上传表单解析
//!
//! 把 multipart 请求完整读入内存（单个文件受大小上限约束），在任何文件落盘之前完成全部校验。

use super::{file_extension, MediaField, UploadError};
use axum::extract::Multipart;
use database::{ProjectCreate, ProjectType};
use std::collections::HashMap;
use tracing::debug;

/// 必填的文本字段
pub const REQUIRED_FIELDS: [&str; 6] = ["name", "type", "description", "innovatorName", "innovatorContact", "price"];

/// 已读入内存、通过类型校验的上传文件
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: MediaField,
    /// 客户端提交的原始文件名
    pub file_name: String,
    /// 原始扩展名（保留大小写）
    pub extension: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// 校验扩展名后构建上传文件
    pub fn new(field: MediaField, file_name: impl Into<String>, data: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        if !field.accepts(&file_name) {
            return Err(UploadError::InvalidFileType { field, file_name });
        }

        let extension = file_extension(&file_name).unwrap_or_default().to_string();
        Ok(Self {
            field,
            file_name,
            extension,
            data,
        })
    }
}

/// 原始上传表单：文本字段 + 按字段分组的文件
#[derive(Debug, Default)]
pub struct ProjectUploadForm {
    pub fields: HashMap<String, String>,
    pub photos: Vec<UploadedFile>,
    pub video: Option<UploadedFile>,
}

impl ProjectUploadForm {
    /// 读取整个 multipart 请求
    ///
    /// 文件类型、单个文件大小、文件数量的校验在读取过程中完成，出错立即返回。
    /// 浏览器对未选择文件的 `<input type="file">` 会提交一个空文件名的空文件，这里直接忽略。
    pub async fn read(multipart: &mut Multipart, max_file_size: usize) -> Result<Self, UploadError> {
        let mut form = ProjectUploadForm::default();

        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            let Some(file_name) = field.file_name().map(str::to_string) else {
                let value = field.text().await?;
                form.fields.insert(name, value);
                continue;
            };

            let media = MediaField::from_field_name(&name).ok_or_else(|| UploadError::UnexpectedField(name.clone()))?;

            let mut data = Vec::new();
            while let Some(chunk) = field.chunk().await? {
                if data.len() + chunk.len() > max_file_size {
                    return Err(UploadError::FileTooLarge {
                        file_name,
                        limit: max_file_size,
                    });
                }
                data.extend_from_slice(&chunk);
            }

            if file_name.is_empty() && data.is_empty() {
                continue;
            }

            debug!("📎 收到文件 {} ({} bytes) 字段 {}", file_name, data.len(), name);
            form.add_file(UploadedFile::new(media, file_name, data)?)?;
        }

        Ok(form)
    }

    /// 按字段追加文件，超过字段允许的个数时报错
    pub fn add_file(&mut self, file: UploadedFile) -> Result<(), UploadError> {
        match file.field {
            MediaField::Photos => {
                if self.photos.len() >= MediaField::Photos.max_count() {
                    return Err(UploadError::TooManyFiles { field: MediaField::Photos });
                }
                self.photos.push(file);
            }
            MediaField::Video => {
                if self.video.is_some() {
                    return Err(UploadError::TooManyFiles { field: MediaField::Video });
                }
                self.video = Some(file);
            }
        }
        Ok(())
    }

    /// 校验必填字段和图片，转换为 [`ProjectDraft`]
    ///
    /// 检查顺序：必填字段 -> 至少一张图片 -> 项目类型 -> 价格格式
    pub fn into_draft(mut self) -> Result<ProjectDraft, UploadError> {
        let mut values = Vec::with_capacity(REQUIRED_FIELDS.len());
        for key in REQUIRED_FIELDS {
            let value = self
                .fields
                .remove(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(UploadError::MissingFields)?;
            values.push(value);
        }

        if self.photos.is_empty() {
            return Err(UploadError::MissingPhotos);
        }

        let [name, project_type, description, innovator_name, innovator_contact, price]: [String; 6] =
            values.try_into().map_err(|_| UploadError::MissingFields)?;

        let project_type = project_type.parse::<ProjectType>().map_err(UploadError::InvalidField)?;
        let price = price
            .parse::<f64>()
            .map_err(|_| UploadError::InvalidField(format!("price must be a number (got '{price}')")))?;

        Ok(ProjectDraft {
            name,
            project_type,
            description,
            innovator_name,
            innovator_contact,
            price,
            photos: self.photos,
            video: self.video,
        })
    }
}

/// 通过表单校验、尚未落盘的项目
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub name: String,
    pub project_type: ProjectType,
    pub description: String,
    pub innovator_name: String,
    pub innovator_contact: String,
    pub price: f64,
    /// 保持提交顺序
    pub photos: Vec<UploadedFile>,
    pub video: Option<UploadedFile>,
}

impl ProjectDraft {
    /// 结合文件存储后的访问路径生成数据库创建参数
    pub fn to_project_create(&self, photo_paths: Vec<String>, video_path: Option<String>) -> ProjectCreate {
        ProjectCreate {
            name: self.name.clone(),
            project_type: self.project_type,
            description: self.description.clone(),
            project_photos: photo_paths,
            project_video: video_path,
            innovator_name: self.innovator_name.clone(),
            innovator_contact: self.innovator_contact.clone(),
            price: self.price,
        }
    }
}
