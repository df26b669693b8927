//! 宿主几何树模型
//!
//! 宿主模型在边界处被翻译为本地的 `GeometryNode` 树：
//! 实体（Solid）、面（Face）、裸曲线（Curve）以及带放置变换的嵌套实例
//! （Instance）。树的坐标均为宿主原生单位（英尺）。

use crate::curve::Curve;
use crate::math::Transform3;
use serde::{Deserialize, Serialize};

/// 边：引用一条底层曲线
///
/// 宿主接口可能返回空曲线，以 `None` 表示。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub curve: Option<Curve>,
}

impl Edge {
    pub fn new(curve: Curve) -> Self {
        Self { curve: Some(curve) }
    }

    /// 没有底层曲线的边
    pub fn empty() -> Self {
        Self { curve: None }
    }
}

/// 边环：面的一个有序边界
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeLoop {
    pub edges: Vec<Edge>,
}

impl EdgeLoop {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }
}

/// 面：若干边环
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    pub edge_loops: Vec<EdgeLoop>,
}

impl Face {
    pub fn new(edge_loops: Vec<EdgeLoop>) -> Self {
        Self { edge_loops }
    }
}

/// 实体：带体积的面集合
///
/// 体积由宿主提供；体积不为正的实体在遍历时整体跳过。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solid {
    pub volume: f64,
    pub faces: Vec<Face>,
}

impl Solid {
    pub fn new(volume: f64, faces: Vec<Face>) -> Self {
        Self { volume, faces }
    }
}

/// 嵌套实例：局部坐标的子几何加放置变换
///
/// 子几何为 `None` 时实例不参与遍历。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub transform: Transform3,
    pub geometry: Option<Vec<GeometryNode>>,
}

impl Instance {
    pub fn new(transform: Transform3, geometry: Vec<GeometryNode>) -> Self {
        Self {
            transform,
            geometry: Some(geometry),
        }
    }
}

/// 几何树节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GeometryNode {
    Solid(Solid),
    Face(Face),
    Curve(Curve),
    Instance(Instance),
}

/// 几何细节层级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DetailLevel {
    Coarse,
    #[default]
    Medium,
    Fine,
}

/// 几何提取选项
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct GeometryOptions {
    /// 是否包含不可见子对象
    pub include_non_visible: bool,
    pub detail_level: DetailLevel,
}

impl GeometryOptions {
    /// 精细层级、不含不可见对象（族类元素的常用设置）
    pub fn fine() -> Self {
        Self {
            include_non_visible: false,
            detail_level: DetailLevel::Fine,
        }
    }
}

/// 宿主元素的只读几何访问边界
///
/// 返回 `None` 表示该元素没有几何，按零图元处理，不是错误。
pub trait GeometrySource {
    fn geometry(&self, options: &GeometryOptions) -> Option<GeometryNode>;
}
