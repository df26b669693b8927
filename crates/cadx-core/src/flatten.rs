//! 几何树展平
//!
//! 深度优先遍历 `GeometryNode` 树，按"面→边环→边"的顺序产出
//! `CurvePrimitive` 序列。单个节点的错误只记录不中断，
//! 一个坏节点不会使整批导出失败。

use crate::curve::{Curve, CurvePrimitive, PolylinePrimitive, TESSELLATION_SEGMENTS};
use crate::tree::{Face, GeometryNode, Solid};
use thiserror::Error;
use tracing::debug;

/// 单节点遍历错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    #[error("edge carries no underlying curve")]
    MissingEdgeCurve,

    #[error("curve tessellation produced no points")]
    EmptyTessellation,
}

/// 展平结果：图元序列加本次遍历中恢复过的错误
#[derive(Debug, Default)]
pub struct FlattenOutcome {
    pub primitives: Vec<CurvePrimitive>,
    pub errors: Vec<TraversalError>,
}

impl FlattenOutcome {
    /// 遍历过程中没有跳过任何节点
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// 展平单个几何节点
pub fn flatten(node: &GeometryNode) -> FlattenOutcome {
    let mut walker = Flattener::default();
    walker.visit(node);
    walker.out
}

/// 按输入顺序展平多个几何节点
pub fn flatten_all<'a>(nodes: impl IntoIterator<Item = &'a GeometryNode>) -> FlattenOutcome {
    let mut walker = Flattener::default();
    for node in nodes {
        walker.visit(node);
    }
    walker.out
}

/// 按曲线的具体种类分类为图元
///
/// 直线/圆弧/椭圆原样传递，其余种类离散为折线。
pub fn classify_curve(curve: &Curve) -> Result<CurvePrimitive, TraversalError> {
    match curve {
        Curve::Line(line) => Ok(CurvePrimitive::Line(line.clone())),
        Curve::Arc(arc) => Ok(CurvePrimitive::Arc(arc.clone())),
        Curve::Ellipse(ellipse) => Ok(CurvePrimitive::Ellipse(ellipse.clone())),
        Curve::Spline(spline) => {
            let points = spline.tessellate(TESSELLATION_SEGMENTS);
            if points.is_empty() {
                return Err(TraversalError::EmptyTessellation);
            }
            Ok(CurvePrimitive::Polyline(PolylinePrimitive { points }))
        }
    }
}

#[derive(Default)]
struct Flattener {
    out: FlattenOutcome,
}

impl Flattener {
    fn visit(&mut self, node: &GeometryNode) {
        match node {
            GeometryNode::Solid(solid) => self.visit_solid(solid),
            GeometryNode::Face(face) => self.visit_face(face),
            GeometryNode::Curve(curve) => self.emit(curve),
            GeometryNode::Instance(instance) => {
                // 子几何按局部坐标原样输出，不应用实例的放置变换
                if let Some(children) = &instance.geometry {
                    for child in children {
                        self.visit(child);
                    }
                }
            }
        }
    }

    fn visit_solid(&mut self, solid: &Solid) {
        // 零体积/退化实体整体跳过，不产出也不报错
        if solid.volume <= 0.0 {
            debug!(volume = solid.volume, "skipping degenerate solid");
            return;
        }
        for face in &solid.faces {
            self.visit_face(face);
        }
    }

    fn visit_face(&mut self, face: &Face) {
        for edge_loop in &face.edge_loops {
            for edge in &edge_loop.edges {
                match &edge.curve {
                    Some(curve) => self.emit(curve),
                    None => self.out.errors.push(TraversalError::MissingEdgeCurve),
                }
            }
        }
    }

    fn emit(&mut self, curve: &Curve) {
        match classify_curve(curve) {
            Ok(primitive) => self.out.primitives.push(primitive),
            Err(err) => {
                debug!(kind = curve.kind_name(), %err, "skipping curve");
                self.out.errors.push(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{LinePrimitive, Spline};
    use crate::math::{Point3, Transform3, Vector3};
    use crate::tree::{Edge, EdgeLoop, Instance};
    use approx::assert_relative_eq;

    fn segment(x1: f64, x2: f64) -> Curve {
        Curve::Line(LinePrimitive::Bound {
            start: Point3::new(x1, 0.0, 0.0),
            end: Point3::new(x2, 0.0, 0.0),
        })
    }

    fn square_face() -> Face {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
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

    #[test]
    fn test_solid_emits_loop_then_edge_order() {
        let solid = Solid::new(1.0, vec![square_face(), square_face()]);
        let outcome = flatten(&GeometryNode::Solid(solid));
        assert!(outcome.is_clean());
        assert_eq!(outcome.primitives.len(), 8);
    }

    #[test]
    fn test_zero_volume_solid_emits_nothing() {
        let solid = Solid::new(0.0, vec![square_face()]);
        let outcome = flatten(&GeometryNode::Solid(solid));
        assert!(outcome.primitives.is_empty());
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_missing_edge_curve_is_recorded_and_walk_continues() {
        let face = Face::new(vec![EdgeLoop::new(vec![
            Edge::new(segment(0.0, 1.0)),
            Edge::empty(),
            Edge::new(segment(1.0, 2.0)),
        ])]);
        let outcome = flatten(&GeometryNode::Face(face));
        assert_eq!(outcome.primitives.len(), 2);
        assert_eq!(outcome.errors, vec![TraversalError::MissingEdgeCurve]);
    }

    #[test]
    fn test_instance_children_keep_local_coordinates() {
        // 非恒等变换也不应用到产出的图元上
        let transform = Transform3::translation(10.0, 20.0, 30.0);
        let instance = Instance::new(transform, vec![GeometryNode::Curve(segment(1.0, 2.0))]);

        let outcome = flatten(&GeometryNode::Instance(instance));
        assert_eq!(outcome.primitives.len(), 1);
        match &outcome.primitives[0] {
            CurvePrimitive::Line(LinePrimitive::Bound { start, end }) => {
                assert_relative_eq!(start.x, 1.0);
                assert_relative_eq!(end.x, 2.0);
                assert_relative_eq!(start.y, 0.0);
            }
            other => panic!("expected bound line, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_instance_without_geometry_emits_nothing() {
        let instance = Instance {
            transform: Transform3::identity(),
            geometry: None,
        };
        let outcome = flatten(&GeometryNode::Instance(instance));
        assert!(outcome.primitives.is_empty());
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_spline_classifies_to_polyline() {
        let spline = Curve::Spline(Spline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]));
        let outcome = flatten(&GeometryNode::Curve(spline));
        assert_eq!(outcome.primitives.len(), 1);
        assert!(matches!(
            outcome.primitives[0],
            CurvePrimitive::Polyline(_)
        ));
    }

    #[test]
    fn test_empty_spline_records_error() {
        let spline = Curve::Spline(Spline::new(vec![]));
        let outcome = flatten(&GeometryNode::Curve(spline));
        assert!(outcome.primitives.is_empty());
        assert_eq!(outcome.errors, vec![TraversalError::EmptyTessellation]);
    }

    #[test]
    fn test_flatten_all_preserves_input_order() {
        let nodes = vec![
            GeometryNode::Curve(segment(0.0, 1.0)),
            GeometryNode::Curve(segment(1.0, 2.0)),
        ];
        let outcome = flatten_all(&nodes);
        assert_eq!(outcome.primitives.len(), 2);
        match (&outcome.primitives[0], &outcome.primitives[1]) {
            (
                CurvePrimitive::Line(LinePrimitive::Bound { start: s0, .. }),
                CurvePrimitive::Line(LinePrimitive::Bound { start: s1, .. }),
            ) => {
                assert_relative_eq!(s0.x, 0.0);
                assert_relative_eq!(s1.x, 1.0);
            }
            _ => panic!("expected two bound lines"),
        }
    }

    #[test]
    fn test_unbound_line_passes_through() {
        let ray = Curve::Line(LinePrimitive::Unbound {
            origin: Point3::new(0.0, 0.0, 0.0),
            direction: Vector3::new(0.0, 0.0, 1.0),
        });
        let outcome = flatten(&GeometryNode::Curve(ray));
        assert!(matches!(
            outcome.primitives[0],
            CurvePrimitive::Line(LinePrimitive::Unbound { .. })
        ));
    }
}
