//! 曲线模型
//!
//! 两层表示：
//! - `Curve`: 宿主边所引用的曲线，按具体种类分类（直线/圆弧/椭圆/样条）
//! - `CurvePrimitive`: 展平后的曲线图元，是遍历引擎与实体映射层之间
//!   唯一交换的数据格式
//!
//! 所有坐标均为宿主原生长度单位（英尺），单位换算只发生在映射层。

use crate::math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// 样条离散化的默认段数
pub const TESSELLATION_SEGMENTS: usize = 16;

/// 线段/无界直线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LinePrimitive {
    /// 有界线段
    Bound { start: Point3, end: Point3 },
    /// 无界直线（以起点+方向表示）
    Unbound { origin: Point3, direction: Vector3 },
}

/// 圆弧/整圆
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ArcPrimitive {
    /// 有界圆弧
    Bound {
        center: Point3,
        radius: f64,
        start: Point3,
        end: Point3,
        normal: Vector3,
    },
    /// 无界圆弧，即整圆
    Full {
        center: Point3,
        radius: f64,
        normal: Vector3,
    },
}

/// 椭圆
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EllipsePrimitive {
    pub center: Point3,
    pub radius_x: f64,
    pub radius_y: f64,
    pub normal: Vector3,
}

/// 折线（无闭式输出表示的曲线经离散化后的结果）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolylinePrimitive {
    pub points: Vec<Point3>,
}

/// 曲线图元枚举
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CurvePrimitive {
    Line(LinePrimitive),
    Arc(ArcPrimitive),
    Ellipse(EllipsePrimitive),
    Polyline(PolylinePrimitive),
}

impl CurvePrimitive {
    /// 获取图元的类型名称
    pub fn kind_name(&self) -> &'static str {
        match self {
            CurvePrimitive::Line(_) => "Line",
            CurvePrimitive::Arc(_) => "Arc",
            CurvePrimitive::Ellipse(_) => "Ellipse",
            CurvePrimitive::Polyline(_) => "Polyline",
        }
    }
}

/// 样条曲线（控制点表示）
///
/// 作为没有闭式输出表示的曲线种类，导出前离散为折线。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spline {
    pub control_points: Vec<Point3>,
}

impl Spline {
    pub fn new(control_points: Vec<Point3>) -> Self {
        Self { control_points }
    }

    /// De Casteljau 求值，t ∈ [0, 1]
    ///
    /// 调用方保证控制点非空。
    fn point_at(&self, t: f64) -> Point3 {
        let mut points = self.control_points.clone();
        let n = points.len();

        for _ in 0..n.saturating_sub(1) {
            for i in 0..points.len() - 1 {
                let a = points[i].coords;
                let b = points[i + 1].coords;
                points[i] = Point3::from(a.lerp(&b, t));
            }
            points.pop();
        }

        points[0]
    }

    /// 按参数等分离散为折线点列
    ///
    /// 控制点不足两个时原样返回（由映射层判定是否可输出）。
    pub fn tessellate(&self, segments: usize) -> Vec<Point3> {
        if self.control_points.len() < 2 {
            return self.control_points.clone();
        }

        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect()
    }
}

/// 宿主曲线种类
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Curve {
    Line(LinePrimitive),
    Arc(ArcPrimitive),
    Ellipse(EllipsePrimitive),
    Spline(Spline),
}

impl Curve {
    /// 获取曲线的类型名称
    pub fn kind_name(&self) -> &'static str {
        match self {
            Curve::Line(_) => "Line",
            Curve::Arc(_) => "Arc",
            Curve::Ellipse(_) => "Ellipse",
            Curve::Spline(_) => "Spline",
        }
    }
}
