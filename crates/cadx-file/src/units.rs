//! 长度单位换算
//!
//! 宿主模型的原生长度单位为英尺；输出单位由 `UnitMode` 决定。
//! 换算只作用于长度量（坐标、半径），不作用于角度。

use cadx_core::math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// 英尺 → 毫米换算系数
pub const MM_PER_FOOT: f64 = 304.8;

/// 输出单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UnitMode {
    /// 英尺（宿主原生单位，坐标原样输出）
    #[default]
    Feet,
    /// 毫米
    Millimeters,
}

impl UnitMode {
    /// 长度换算系数
    pub fn factor(self) -> f64 {
        match self {
            UnitMode::Feet => 1.0,
            UnitMode::Millimeters => MM_PER_FOOT,
        }
    }
}

/// 换算单个长度量
pub fn convert_length(value: f64, units: UnitMode) -> f64 {
    value * units.factor()
}

/// 逐坐标换算点
pub fn convert_point(point: &Point3, units: UnitMode) -> Point3 {
    Point3::new(
        point.x * units.factor(),
        point.y * units.factor(),
        point.z * units.factor(),
    )
}

/// 逐分量换算向量
pub fn convert_vector(vector: &Vector3, units: UnitMode) -> Vector3 {
    vector * units.factor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_millimeter_factor() {
        assert_relative_eq!(convert_length(5.0, UnitMode::Millimeters), 1524.0);
        assert_relative_eq!(convert_length(1.0, UnitMode::Millimeters), 304.8);
    }

    #[test]
    fn test_feet_mode_leaves_values_untouched() {
        assert_relative_eq!(convert_length(5.0, UnitMode::Feet), 5.0);
        let p = convert_point(&Point3::new(1.0, 2.0, 3.0), UnitMode::Feet);
        assert_relative_eq!(p.y, 2.0);
    }
}
