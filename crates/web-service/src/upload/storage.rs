//! 上传文件存储
//!
//! 文件名格式：`<字段名>-<毫秒时间戳>-<随机数>.<原始扩展名>`，例如
//! `projectPhotos-1736150400000-482913467.png`。
//! 时间戳加随机数只能做到大概率不冲突，所以写入时使用 `create_new`，真冲突时报错而不是覆盖。

use super::UploadedFile;
use chrono::Utc;
use rand::Rng;
use std::io;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// 上传文件对外访问的路径前缀
pub const PUBLIC_UPLOAD_PREFIX: &str = "/uploads";

/// 已分配存储位置的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub file_name: String,
    pub disk_path: PathBuf,
    /// 记录在项目中的访问路径，例如 `/uploads/projectPhotos-xxx.png`
    pub public_path: String,
}

/// 本地磁盘上的上传目录
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 确保上传目录存在，启动时调用
    pub async fn prepare(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// 为上传文件分配一个新的文件名，不会写入磁盘
    pub fn allocate(&self, file: &UploadedFile) -> StoredFile {
        let file_name = generate_file_name(file.field.field_name(), &file.extension);
        StoredFile {
            disk_path: self.root.join(&file_name),
            public_path: format!("{PUBLIC_UPLOAD_PREFIX}/{file_name}"),
            file_name,
        }
    }

    /// 按顺序写入一批文件
    ///
    /// 返回的 [`WrittenFiles`] 在调用 [`WrittenFiles::keep`] 之前被 drop 时会删除本次写入的全部文件，
    /// 中途写入失败、后续步骤出错返回、请求被取消都走同一条清理路径。
    /// 目标文件已存在时返回 [`io::ErrorKind::AlreadyExists`]，已存在的文件不会被删除。
    pub async fn write_all(&self, files: &[(StoredFile, &[u8])]) -> io::Result<WrittenFiles> {
        let mut written = WrittenFiles::default();
        for (target, data) in files {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&target.disk_path)
                .await?;
            // 文件已经创建，即使内容没写完也归本次上传所有
            written.files.push(target.clone());
            file.write_all(data).await?;
            file.flush().await?;
            debug!("💾 文件已保存: {}", target.disk_path.display());
        }
        Ok(written)
    }
}

/// 已落盘但还没有被项目记录引用的文件
#[must_use = "drop 时会删除文件，确认保留需要调用 keep()"]
#[derive(Debug, Default)]
pub struct WrittenFiles {
    files: Vec<StoredFile>,
}

impl WrittenFiles {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// 项目记录已经创建，保留文件
    pub fn keep(mut self) -> Vec<StoredFile> {
        std::mem::take(&mut self.files)
    }
}

impl Drop for WrittenFiles {
    /// 删除失败只记录日志，不覆盖调用方原本的错误
    ///
    /// drop 里不能 await，这里使用同步删除；每次最多 6 个文件
    fn drop(&mut self) {
        for file in self.files.drain(..) {
            match std::fs::remove_file(&file.disk_path) {
                Ok(()) => debug!("🗑️ 已清理文件: {}", file.disk_path.display()),
                Err(e) => warn!("⚠️ 清理文件 {} 失败: {e}", file.disk_path.display()),
            }
        }
    }
}

/// 生成上传文件名
pub fn generate_file_name(field_name: &str, extension: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let random: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{field_name}-{millis}-{random}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::MediaField;

    #[test]
    fn test_generated_name_shape() {
        let name = generate_file_name("projectPhotos", "PNG");
        let parts: Vec<&str> = name.trim_end_matches(".PNG").split('-').collect();

        assert!(name.starts_with("projectPhotos-"));
        assert!(name.ends_with(".PNG"));
        assert_eq!(parts.len(), 3);
        assert!(parts[1].parse::<i64>().is_ok());
        assert!(parts[2].parse::<u32>().unwrap() < 1_000_000_000);
    }

    #[test]
    fn test_generated_names_differ() {
        let a = generate_file_name("projectVideo", "mp4");
        let b = generate_file_name("projectVideo", "mp4");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_write_all_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("uploads"));
        store.prepare().await.unwrap();

        let upload = UploadedFile::new(MediaField::Photos, "lamp.png", b"png-bytes".to_vec()).unwrap();
        let target = store.allocate(&upload);
        assert!(target.public_path.starts_with("/uploads/projectPhotos-"));
        assert!(target.public_path.ends_with(".png"));

        let written = store.write_all(&[(target.clone(), upload.data.as_slice())]).await.unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written.keep(), vec![target.clone()]);
        assert_eq!(fs::read(&target.disk_path).await.unwrap(), b"png-bytes");

        // 同名文件不允许覆盖，已存在的文件也不会被清理
        let err = store.write_all(&[(target.clone(), b"other".as_slice())]).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&target.disk_path).await.unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn test_dropped_files_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let photo = UploadedFile::new(MediaField::Photos, "a.jpg", vec![1]).unwrap();
        let video = UploadedFile::new(MediaField::Video, "b.mp4", vec![2]).unwrap();
        let targets = [store.allocate(&photo), store.allocate(&video)];

        let written = store
            .write_all(&[(targets[0].clone(), photo.data.as_slice()), (targets[1].clone(), video.data.as_slice())])
            .await
            .unwrap();
        assert!(targets.iter().all(|t| t.disk_path.exists()));

        drop(written);
        assert!(targets.iter().all(|t| !t.disk_path.exists()));
    }

    #[tokio::test]
    async fn test_partial_write_is_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let first = UploadedFile::new(MediaField::Photos, "a.jpg", vec![1]).unwrap();
        let first_target = store.allocate(&first);
        // 第二个目标所在目录不存在，写入失败
        let broken_target = StoredFile {
            file_name: "x.jpg".to_string(),
            disk_path: dir.path().join("missing").join("x.jpg"),
            public_path: "/uploads/x.jpg".to_string(),
        };

        let result = store
            .write_all(&[(first_target.clone(), first.data.as_slice()), (broken_target, b"x".as_slice())])
            .await;
        assert!(result.is_err());
        assert!(!first_target.disk_path.exists());
    }
}
