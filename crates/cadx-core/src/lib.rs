//! CADX 核心几何模型
//!
//! 提供与宿主CAD/BIM模型无关的几何表示与遍历：
//! - `tree`: 宿主几何树（实体/面/边/嵌套实例）
//! - `curve`: 曲线模型（宿主曲线与展平后的曲线图元）
//! - `flatten`: 深度优先遍历引擎，把几何树展平为曲线图元序列
//!
//! # 示例
//!
//! ```rust
//! use cadx_core::prelude::*;
//!
//! // 一条有界线段，坐标单位为宿主原生单位（英尺）
//! let curve = Curve::Line(LinePrimitive::Bound {
//!     start: Point3::new(0.0, 0.0, 0.0),
//!     end: Point3::new(1.0, 0.0, 0.0),
//! });
//!
//! let outcome = flatten(&GeometryNode::Curve(curve));
//! assert_eq!(outcome.primitives.len(), 1);
//! ```

pub mod curve;
pub mod flatten;
pub mod math;
pub mod tree;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::curve::{
        ArcPrimitive, Curve, CurvePrimitive, EllipsePrimitive, LinePrimitive,
        PolylinePrimitive, Spline,
    };
    pub use crate::flatten::{flatten, flatten_all, FlattenOutcome, TraversalError};
    pub use crate::math::{Point3, Transform3, Vector3};
    pub use crate::tree::{
        DetailLevel, Edge, EdgeLoop, Face, GeometryNode, GeometryOptions, GeometrySource,
        Instance, Solid,
    };
}
