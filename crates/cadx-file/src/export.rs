//! 批量导出编排
//!
//! 按元素类别驱动整条流水线：获取每个元素的几何树 → 展平为图元
//! → 映射为输出实体 → 以类别名为header一次提交。节点级与图元级
//! 的可恢复错误随结果一起返回；会话级错误作为单个失败结果上报，
//! 绝不终止宿主进程。

use crate::entity::{map_primitives, MappingError};
use crate::session::ExportSession;
use crate::units::UnitMode;
use cadx_core::flatten::{flatten, TraversalError};
use cadx_core::tree::{GeometryOptions, GeometrySource};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// 可导出的元素类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Walls,
    Windows,
    StructuralFraming,
}

impl ElementKind {
    /// 配置界面使用的标签
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Walls => "Walls",
            ElementKind::Windows => "Windows",
            ElementKind::StructuralFraming => "Structural Framing",
        }
    }

    /// 输出文件的批次header
    pub fn header(self) -> &'static str {
        match self {
            ElementKind::Walls => "Walls",
            ElementKind::Windows => "Windows",
            ElementKind::StructuralFraming => "Framing",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Walls" => Some(ElementKind::Walls),
            "Windows" => Some(ElementKind::Windows),
            "Structural Framing" => Some(ElementKind::StructuralFraming),
            _ => None,
        }
    }

    /// 类别对应的几何提取选项
    ///
    /// 族类元素取精细层级且不含不可见对象；墙体用默认选项。
    fn geometry_options(self) -> GeometryOptions {
        match self {
            ElementKind::Walls => GeometryOptions::default(),
            ElementKind::Windows | ElementKind::StructuralFraming => GeometryOptions::fine(),
        }
    }
}

/// 输出文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Dxf,
    Dwg,
    Xml,
}

impl ExportFormat {
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Dxf => "DXF",
            ExportFormat::Dwg => "DWG",
            ExportFormat::Xml => "XML",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "DXF" => Some(ExportFormat::Dxf),
            "DWG" => Some(ExportFormat::Dwg),
            "XML" => Some(ExportFormat::Xml),
            _ => None,
        }
    }
}

/// 一次导出请求（来自配置界面协作方）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub element_kind: ElementKind,
    pub format: ExportFormat,
    /// 输出目录；空白时使用默认目录
    pub folder: String,
    pub units: UnitMode,
}

/// 上游元素选择的结果
#[derive(Debug)]
pub enum Selection<S> {
    Picked(Vec<S>),
    /// 用户在选择阶段中止，按"什么都不做"处理
    Cancelled,
}

/// 批次报告：提交的文件与本批恢复过的错误
#[derive(Debug, Default)]
pub struct ExportReport {
    /// 为 `None` 表示没有几何可写，未产生文件
    pub file: Option<PathBuf>,
    pub entities: usize,
    pub traversal_errors: Vec<TraversalError>,
    pub mapping_errors: Vec<MappingError>,
}

/// 导出结果
#[derive(Debug)]
pub enum ExportOutcome {
    Completed(ExportReport),
    Cancelled,
    NotImplemented(ExportFormat),
    Failed(String),
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExportOutcome::Completed(_) | ExportOutcome::Cancelled)
    }

    /// 面向用户的结果文本
    pub fn message(&self) -> String {
        match self {
            ExportOutcome::Completed(report) => match &report.file {
                Some(path) => format!(
                    "Export complete: {} entities written to {}",
                    report.entities,
                    path.display()
                ),
                None => "Export complete: no geometry to write".to_string(),
            },
            ExportOutcome::Cancelled => "Export cancelled".to_string(),
            ExportOutcome::NotImplemented(format) => {
                format!("{} export not implemented yet.", format.label())
            }
            ExportOutcome::Failed(message) => format!("Export failed: {message}"),
        }
    }
}

/// 执行一次导出请求
pub fn run_export<S: GeometrySource>(
    request: &ExportRequest,
    selection: Selection<S>,
) -> ExportOutcome {
    match request.format {
        ExportFormat::Dxf => {}
        other => return ExportOutcome::NotImplemented(other),
    }

    let elements = match selection {
        Selection::Picked(elements) => elements,
        Selection::Cancelled => return ExportOutcome::Cancelled,
    };

    let session = match ExportSession::open(&request.folder, request.units, true) {
        Ok(session) => session,
        Err(err) => return ExportOutcome::Failed(err.to_string()),
    };

    export_elements(session, request.element_kind, &elements)
}

/// 把一组元素的几何作为一个批次导出
pub fn export_elements<S: GeometrySource>(
    mut session: ExportSession,
    kind: ElementKind,
    elements: &[S],
) -> ExportOutcome {
    let options = kind.geometry_options();

    let mut primitives = Vec::new();
    let mut traversal_errors = Vec::new();
    for element in elements {
        // 元素没有几何时贡献零图元，不是错误
        let Some(node) = element.geometry(&options) else {
            continue;
        };
        let mut outcome = flatten(&node);
        primitives.append(&mut outcome.primitives);
        traversal_errors.append(&mut outcome.errors);
    }

    let (entities, mapping_errors) = map_primitives(&primitives, session.units());
    if !traversal_errors.is_empty() || !mapping_errors.is_empty() {
        warn!(
            kind = kind.label(),
            traversal = traversal_errors.len(),
            mapping = mapping_errors.len(),
            "recovered errors during export"
        );
    }

    info!(
        kind = kind.label(),
        elements = elements.len(),
        primitives = primitives.len(),
        entities = entities.len(),
        "export batch assembled"
    );

    let entity_count = entities.len();
    session.add_entities(entities);

    match session.commit(kind.header()) {
        Ok(file) => ExportOutcome::Completed(ExportReport {
            file,
            entities: entity_count,
            traversal_errors,
            mapping_errors,
        }),
        Err(err) => ExportOutcome::Failed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for kind in [
            ElementKind::Walls,
            ElementKind::Windows,
            ElementKind::StructuralFraming,
        ] {
            assert_eq!(ElementKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(ElementKind::from_label("Roofs"), None);

        for format in [ExportFormat::Dxf, ExportFormat::Dwg, ExportFormat::Xml] {
            assert_eq!(ExportFormat::from_label(format.label()), Some(format));
        }
    }

    #[test]
    fn test_headers_match_batch_names() {
        assert_eq!(ElementKind::Walls.header(), "Walls");
        assert_eq!(ElementKind::StructuralFraming.header(), "Framing");
    }
}
