//! CADX 演示程序入口
//!
//! 构造一个合成的宿主模型（墙体实体 + 嵌套实例中的整圆柱轮廓），
//! 走一遍"展平 → 映射 → 提交"的完整导出流水线。
//!
//! 用法：`cadx [输出目录] [ft|mm]`

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cadx_core::curve::{ArcPrimitive, Curve, LinePrimitive};
use cadx_core::math::{Point3, Transform3, Vector3};
use cadx_core::tree::{
    Edge, EdgeLoop, Face, GeometryNode, GeometryOptions, GeometrySource, Instance, Solid,
};
use cadx_file::{run_export, ElementKind, ExportFormat, ExportRequest, Selection, UnitMode};

/// 固定几何的演示元素
struct DemoElement {
    node: GeometryNode,
}

impl GeometrySource for DemoElement {
    fn geometry(&self, _options: &GeometryOptions) -> Option<GeometryNode> {
        Some(self.node.clone())
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let folder = std::env::args().nth(1).unwrap_or_default();
    let units = match std::env::args().nth(2).as_deref() {
        Some("mm") => UnitMode::Millimeters,
        _ => UnitMode::Feet,
    };

    let request = ExportRequest {
        element_kind: ElementKind::Walls,
        format: ExportFormat::Dxf,
        folder,
        units,
    };

    let elements = vec![
        DemoElement { node: demo_wall() },
        DemoElement {
            node: demo_column(),
        },
    ];
    info!(elements = elements.len(), "running demo export");

    let outcome = run_export(&request, Selection::Picked(elements));
    info!("{}", outcome.message());

    Ok(())
}

/// 10ft x 1ft x 8ft 的墙体实体（六个矩形面）
fn demo_wall() -> GeometryNode {
    let (w, d, h) = (10.0, 1.0, 8.0);
    let corners = |pts: [(f64, f64, f64); 4]| {
        pts.map(|(x, y, z)| Point3::new(x, y, z))
    };

    let faces = vec![
        // 底面与顶面
        rect_face(corners([(0.0, 0.0, 0.0), (w, 0.0, 0.0), (w, d, 0.0), (0.0, d, 0.0)])),
        rect_face(corners([(0.0, 0.0, h), (w, 0.0, h), (w, d, h), (0.0, d, h)])),
        // 前后两侧
        rect_face(corners([(0.0, 0.0, 0.0), (w, 0.0, 0.0), (w, 0.0, h), (0.0, 0.0, h)])),
        rect_face(corners([(0.0, d, 0.0), (w, d, 0.0), (w, d, h), (0.0, d, h)])),
        // 左右端头
        rect_face(corners([(0.0, 0.0, 0.0), (0.0, d, 0.0), (0.0, d, h), (0.0, 0.0, h)])),
        rect_face(corners([(w, 0.0, 0.0), (w, d, 0.0), (w, d, h), (w, 0.0, h)])),
    ];

    GeometryNode::Solid(Solid::new(w * d * h, faces))
}

/// 嵌套实例中的圆柱轮廓（整圆，局部坐标）
fn demo_column() -> GeometryNode {
    let circle = Curve::Arc(ArcPrimitive::Full {
        center: Point3::new(0.0, 0.0, 0.0),
        radius: 0.5,
        normal: Vector3::new(0.0, 0.0, 1.0),
    });

    GeometryNode::Instance(Instance::new(
        Transform3::translation(20.0, 5.0, 0.0),
        vec![GeometryNode::Curve(circle)],
    ))
}

fn rect_face(corners: [Point3; 4]) -> Face {
    let edges = (0..4)
        .map(|i| {
            Edge::new(Curve::Line(LinePrimitive::Bound {
                start: corners[i],
                end: corners[(i + 1) % 4],
            }))
        })
        .collect();
    Face::new(vec![EdgeLoop::new(edges)])
}
