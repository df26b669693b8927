//! 输出实体模型与图元映射
//!
//! `OutputEntity` 是写入输出文档的实体表示，坐标已按会话单位换算。
//! 映射层是唯一做单位换算的组件；单个图元的映射失败只跳过该图元，
//! 不中断整批导出。
//!
//! 法向处理的既有不对称行为被原样保留（并由测试钉住）：
//! 整圆法向按坐标换算且不重新归一化，椭圆法向换算后归一化。

use crate::units::{convert_length, convert_point, convert_vector, UnitMode};
use cadx_core::curve::{ArcPrimitive, CurvePrimitive, LinePrimitive};
use cadx_core::math::{Point3, Vector3, EPSILON};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 线段实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub p1: Point3,
    pub p2: Point3,
}

/// 射线实体（无界直线的输出表示）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

/// 圆弧实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point3,
    pub radius: f64,
    /// 起始角度（度）
    pub start_angle_deg: f64,
    /// 终止角度（度）
    pub end_angle_deg: f64,
}

/// 圆实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point3,
    pub radius: f64,
    pub normal: Vector3,
}

/// 椭圆实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: Point3,
    pub radius_x: f64,
    pub radius_y: f64,
    pub normal: Vector3,
}

/// 三维折线实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline3D {
    pub vertices: Vec<Point3>,
}

/// 输出实体枚举
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputEntity {
    Line(Line),
    Ray(Ray),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    Polyline3D(Polyline3D),
}

impl OutputEntity {
    /// 获取实体的类型名称
    pub fn kind_name(&self) -> &'static str {
        match self {
            OutputEntity::Line(_) => "Line",
            OutputEntity::Ray(_) => "Ray",
            OutputEntity::Arc(_) => "Arc",
            OutputEntity::Circle(_) => "Circle",
            OutputEntity::Ellipse(_) => "Ellipse",
            OutputEntity::Polyline3D(_) => "Polyline3D",
        }
    }
}

/// 单图元映射错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("polyline requires at least 2 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("degenerate {0} radius")]
    DegenerateRadius(&'static str),

    #[error("degenerate normal vector")]
    DegenerateNormal,
}

/// 把一个曲线图元映射为输出实体
pub fn map_primitive(
    primitive: &CurvePrimitive,
    units: UnitMode,
) -> Result<OutputEntity, MappingError> {
    match primitive {
        CurvePrimitive::Line(LinePrimitive::Bound { start, end }) => {
            Ok(OutputEntity::Line(Line {
                p1: convert_point(start, units),
                p2: convert_point(end, units),
            }))
        }

        CurvePrimitive::Line(LinePrimitive::Unbound { origin, direction }) => {
            // 方向向量不是长度量，不做单位换算
            Ok(OutputEntity::Ray(Ray {
                origin: convert_point(origin, units),
                direction: *direction,
            }))
        }

        CurvePrimitive::Arc(ArcPrimitive::Bound {
            center,
            radius,
            start,
            end,
            normal: _,
        }) => {
            if *radius <= EPSILON {
                return Err(MappingError::DegenerateRadius("arc"));
            }
            // 角度由起/终点相对圆心的向量求得，在圆弧自身平面内取 XY 分量
            let start_angle_deg = (start.y - center.y).atan2(start.x - center.x).to_degrees();
            let end_angle_deg = (end.y - center.y).atan2(end.x - center.x).to_degrees();

            Ok(OutputEntity::Arc(Arc {
                center: convert_point(center, units),
                radius: convert_length(*radius, units),
                start_angle_deg,
                end_angle_deg,
            }))
        }

        CurvePrimitive::Arc(ArcPrimitive::Full {
            center,
            radius,
            normal,
        }) => {
            if *radius <= EPSILON {
                return Err(MappingError::DegenerateRadius("circle"));
            }
            // 法向按坐标换算，换算后不重新归一化
            Ok(OutputEntity::Circle(Circle {
                center: convert_point(center, units),
                radius: convert_length(*radius, units),
                normal: convert_vector(normal, units),
            }))
        }

        CurvePrimitive::Ellipse(ellipse) => {
            if ellipse.radius_x <= EPSILON {
                return Err(MappingError::DegenerateRadius("ellipse"));
            }
            // 法向换算后归一化为单位向量
            let normal = convert_vector(&ellipse.normal, units)
                .try_normalize(EPSILON)
                .ok_or(MappingError::DegenerateNormal)?;

            Ok(OutputEntity::Ellipse(Ellipse {
                center: convert_point(&ellipse.center, units),
                radius_x: convert_length(ellipse.radius_x, units),
                radius_y: convert_length(ellipse.radius_y, units),
                normal,
            }))
        }

        CurvePrimitive::Polyline(polyline) => {
            if polyline.points.len() < 2 {
                return Err(MappingError::TooFewVertices(polyline.points.len()));
            }
            Ok(OutputEntity::Polyline3D(Polyline3D {
                vertices: polyline
                    .points
                    .iter()
                    .map(|p| convert_point(p, units))
                    .collect(),
            }))
        }
    }
}

/// 按顺序映射一批图元，失败的图元跳过并收集错误
pub fn map_primitives(
    primitives: &[CurvePrimitive],
    units: UnitMode,
) -> (Vec<OutputEntity>, Vec<MappingError>) {
    let mut entities = Vec::with_capacity(primitives.len());
    let mut errors = Vec::new();

    for primitive in primitives {
        match map_primitive(primitive, units) {
            Ok(entity) => entities.push(entity),
            Err(err) => errors.push(err),
        }
    }

    (entities, errors)
}
