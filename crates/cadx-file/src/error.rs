//! 会话级错误定义

use thiserror::Error;

/// 目录准备或文件提交阶段的错误
///
/// 节点级/图元级的可恢复错误分别见
/// `cadx_core::flatten::TraversalError` 与 `crate::entity::MappingError`。
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DXF error: {0}")]
    Dxf(String),
}
