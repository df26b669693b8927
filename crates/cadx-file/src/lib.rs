//! CADX 文件输出
//!
//! 把展平后的曲线图元转换为输出实体并落盘：
//! - `units`: 长度单位换算（英尺 → 毫米）
//! - `entity`: 输出实体模型与图元映射
//! - `dxf_out`: `.dxf` 文档写出
//! - `session`: 导出会话（输出目录 + 内存文档 + 一次提交）
//! - `export`: 按元素类别的批量导出编排

pub mod dxf_out;
pub mod entity;
pub mod error;
pub mod export;
pub mod session;
pub mod units;

pub use entity::{map_primitive, map_primitives, MappingError, OutputEntity};
pub use error::SessionError;
pub use export::{
    run_export, ElementKind, ExportFormat, ExportOutcome, ExportReport, ExportRequest, Selection,
};
pub use session::ExportSession;
pub use units::{UnitMode, MM_PER_FOOT};
