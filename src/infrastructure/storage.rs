// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::settings::ScratchSettings;
use crate::domain::repositories::scratch_repository::{ScratchError, ScratchStore};

/// 本地文件系统临时存储实现
pub struct LocalScratch {
    base_path: PathBuf,
}

impl LocalScratch {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// 创建存储目录
    pub async fn prepare(&self) -> Result<(), ScratchError> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn full_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

#[async_trait]
impl ScratchStore for LocalScratch {
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), ScratchError> {
        let full_path = self.full_path(key);

        // 确保目录存在
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&full_path).await?;
        file.write_all(data).await?;
        file.flush().await?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ScratchError> {
        match fs::read(self.full_path(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScratchError::Io(e)),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), ScratchError> {
        match fs::remove_file(self.full_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ScratchError::Io(e)),
        }
    }

    async fn purge(&self) -> Result<(), ScratchError> {
        match fs::remove_dir_all(&self.base_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ScratchError::Io(e)),
        }
    }
}

/// 内存临时存储实现
pub struct InMemoryScratch {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryScratch {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

impl Default for InMemoryScratch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScratchStore for InMemoryScratch {
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), ScratchError> {
        self.data.write().await.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ScratchError> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), ScratchError> {
        self.data.write().await.remove(key);
        Ok(())
    }

    async fn purge(&self) -> Result<(), ScratchError> {
        self.data.write().await.clear();
        Ok(())
    }
}

/// 临时存储工厂函数
///
/// `memory` 类型直接在内存中交接文本，不需要存储，返回 `None`。
/// `local` 类型在 `local_path` 下为本次运行新建一个独立子目录，
/// 清理时只删除该子目录，`local_path` 中原有的内容保持不变
pub async fn create_scratch_store(
    settings: &ScratchSettings,
) -> Result<Option<Arc<dyn ScratchStore>>, ScratchError> {
    match settings.storage_type.as_str() {
        "memory" => Ok(None),
        "local" => {
            let base_path = settings
                .local_path
                .clone()
                .unwrap_or_else(|| "./tmp".to_string());
            let run_dir = PathBuf::from(base_path)
                .join(format!("wordcrawl-{}", Uuid::new_v4().simple()));
            let store = LocalScratch::new(run_dir);
            store.prepare().await?;
            Ok(Some(Arc::new(store)))
        }
        other => Err(ScratchError::Other(format!(
            "Unsupported storage type: {}",
            other
        ))),
    }
}
