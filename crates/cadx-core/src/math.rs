//! 数学基础类型
//!
//! 基于 nalgebra 的三维点/向量别名与通用容差。

/// 三维点
pub type Point3 = nalgebra::Point3<f64>;

/// 三维向量
pub type Vector3 = nalgebra::Vector3<f64>;

/// 刚体变换（嵌套实例的放置变换）
pub type Transform3 = nalgebra::Isometry3<f64>;

/// 几何比较容差
pub const EPSILON: f64 = 1e-9;
