//! 导出会话
//!
//! 一次导出批次的作用域单元：持有输出目录、单位模式与内存中的
//! 输出文档。目录副作用（清空已有文件）发生在会话打开时；
//! 文档完整地在内存中累积，提交时一次性落盘。
//!
//! 会话为一次性使用，`commit` 按值消费自身。打开会话可能清空
//! 目录中已有文件，调用方不得在一个会话生命周期内交叉运行
//! 无关批次。

use crate::dxf_out;
use crate::entity::OutputEntity;
use crate::error::SessionError;
use crate::units::UnitMode;
use chrono::{Local, Timelike};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 输出文件扩展名
pub const FILE_EXTENSION: &str = ".dxf";

/// 目录参数为空白时使用的默认输出目录
pub fn default_folder() -> PathBuf {
    std::env::temp_dir().join("cadx_exports")
}

/// 去除文件系统非法字符
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| {
            !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') && !c.is_control()
        })
        .collect()
}

/// 构造输出文件名：`{分}_{秒}_{毫秒}_{净化后的header}{扩展名}`
///
/// 时间前缀作为同名批次的粗粒度区分。
pub fn build_file_name(header: &str, extension: &str) -> String {
    let now = Local::now();
    format!(
        "{}_{}_{}_{}{}",
        now.minute(),
        now.second(),
        now.timestamp_subsec_millis(),
        sanitize_file_name(header),
        extension
    )
}

/// 导出会话
#[derive(Debug)]
pub struct ExportSession {
    folder: PathBuf,
    units: UnitMode,
    entities: Vec<OutputEntity>,
}

impl ExportSession {
    /// 打开会话并准备输出目录
    ///
    /// 空白的目录参数回退到默认目录；目录创建是幂等的。
    /// `clear_existing` 为真时删除目录下的直接文件（不递归）。
    pub fn open(folder: &str, units: UnitMode, clear_existing: bool) -> Result<Self, SessionError> {
        let folder = if folder.trim().is_empty() {
            default_folder()
        } else {
            PathBuf::from(folder)
        };

        fs::create_dir_all(&folder)?;
        if clear_existing {
            clear_folder(&folder)?;
        }

        Ok(Self {
            folder,
            units,
            entities: Vec::new(),
        })
    }

    pub fn units(&self) -> UnitMode {
        self.units
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// 追加实体到内存文档，不触发文件IO
    pub fn add_entities(&mut self, entities: impl IntoIterator<Item = OutputEntity>) {
        self.entities.extend(entities);
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// 提交会话：把内存文档写为一个唯一命名的文件
    ///
    /// 空文档不落盘，返回 `Ok(None)`。
    pub fn commit(self, header: &str) -> Result<Option<PathBuf>, SessionError> {
        if self.entities.is_empty() {
            debug!(header, "empty export document, no file written");
            return Ok(None);
        }

        let file_name = build_file_name(header, FILE_EXTENSION);
        let path = self.folder.join(file_name);
        dxf_out::write(&path, &self.entities)?;

        info!(
            entities = self.entities.len(),
            path = %path.display(),
            "export document committed"
        );
        Ok(Some(path))
    }
}

/// 删除目录下的直接文件，保留子目录
fn clear_folder(folder: &Path) -> Result<(), SessionError> {
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
