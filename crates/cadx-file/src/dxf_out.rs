//! DXF 文档写出
//!
//! 把 `OutputEntity` 列表一次性写为一个 `.dxf` 文件。
//! 实体坐标在进入本模块前已完成单位换算。

use crate::entity::OutputEntity;
use crate::error::SessionError;
use cadx_core::math::{Point3, Vector3};
use std::path::Path;

/// 写出整个输出文档
pub fn write(path: &Path, entities: &[OutputEntity]) -> Result<(), SessionError> {
    let mut drawing = dxf::Drawing::new();

    for entity in entities {
        let specific = to_dxf_entity(&mut drawing, entity);
        drawing.add_entity(dxf::entities::Entity::new(specific));
    }

    drawing
        .save_file(path)
        .map_err(|e| SessionError::Dxf(e.to_string()))?;

    Ok(())
}

/// 将输出实体转换为DXF实体
fn to_dxf_entity(drawing: &mut dxf::Drawing, entity: &OutputEntity) -> dxf::entities::EntityType {
    match entity {
        OutputEntity::Line(line) => {
            let mut dxf_line = dxf::entities::Line::default();
            dxf_line.p1 = to_dxf_point(&line.p1);
            dxf_line.p2 = to_dxf_point(&line.p2);
            dxf::entities::EntityType::Line(dxf_line)
        }

        OutputEntity::Ray(ray) => {
            let mut dxf_ray = dxf::entities::Ray::default();
            dxf_ray.start_point = to_dxf_point(&ray.origin);
            dxf_ray.unit_direction_vector = to_dxf_vector(&ray.direction);
            dxf::entities::EntityType::Ray(dxf_ray)
        }

        OutputEntity::Arc(arc) => {
            let mut dxf_arc = dxf::entities::Arc::default();
            dxf_arc.center = to_dxf_point(&arc.center);
            dxf_arc.radius = arc.radius;
            dxf_arc.start_angle = arc.start_angle_deg;
            dxf_arc.end_angle = arc.end_angle_deg;
            dxf::entities::EntityType::Arc(dxf_arc)
        }

        OutputEntity::Circle(circle) => {
            let mut dxf_circle = dxf::entities::Circle::default();
            dxf_circle.center = to_dxf_point(&circle.center);
            dxf_circle.radius = circle.radius;
            dxf_circle.normal = to_dxf_vector(&circle.normal);
            dxf::entities::EntityType::Circle(dxf_circle)
        }

        OutputEntity::Ellipse(ellipse) => {
            let mut dxf_ellipse = dxf::entities::Ellipse::default();
            dxf_ellipse.center = to_dxf_point(&ellipse.center);
            // 长轴端点向量沿 X 方向，长度为 radius_x
            dxf_ellipse.major_axis = dxf::Vector::new(ellipse.radius_x, 0.0, 0.0);
            // radius_x 在映射层已校验为非退化
            dxf_ellipse.minor_axis_ratio = ellipse.radius_y / ellipse.radius_x;
            dxf_ellipse.normal = to_dxf_vector(&ellipse.normal);
            dxf_ellipse.start_parameter = 0.0;
            dxf_ellipse.end_parameter = 2.0 * std::f64::consts::PI;
            dxf::entities::EntityType::Ellipse(dxf_ellipse)
        }

        OutputEntity::Polyline3D(polyline) => {
            let mut dxf_polyline = dxf::entities::Polyline::default();
            dxf_polyline.set_is_3d_polyline(true);
            for vertex in &polyline.vertices {
                dxf_polyline.add_vertex(drawing, dxf::entities::Vertex::new(to_dxf_point(vertex)));
            }
            dxf::entities::EntityType::Polyline(dxf_polyline)
        }
    }
}

fn to_dxf_point(point: &Point3) -> dxf::Point {
    dxf::Point::new(point.x, point.y, point.z)
}

fn to_dxf_vector(vector: &Vector3) -> dxf::Vector {
    dxf::Vector::new(vector.x, vector.y, vector.z)
}
