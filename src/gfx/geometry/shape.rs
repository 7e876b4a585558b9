//! Shape families and their generator table.

use std::fmt;
use std::str::FromStr;

use super::primitives::{
    generate_cone, generate_cylinder, generate_ellipsoid, generate_hyperboloid, generate_sphere,
    generate_toroid, ConeParams, CylinderParams, EllipsoidParams, HyperboloidParams,
    SphereParams, ToroidParams,
};
use super::Mesh;
use crate::error::ShapeError;

/// The six supported surface families, in keyboard-shortcut order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeKind {
    #[default]
    Cylinder,
    Cone,
    Sphere,
    Ellipsoid,
    Hyperboloid,
    Toroid,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Sphere,
        ShapeKind::Ellipsoid,
        ShapeKind::Hyperboloid,
        ShapeKind::Toroid,
    ];

    /// Lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Cone => "cone",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Ellipsoid => "ellipsoid",
            ShapeKind::Hyperboloid => "hyperboloid",
            ShapeKind::Toroid => "toroid",
        }
    }

    /// Maps the shortcut digits `1..=6` to a family.
    pub fn from_digit(digit: u8) -> Option<ShapeKind> {
        match digit {
            1..=6 => Some(Self::ALL[digit as usize - 1]),
            _ => None,
        }
    }

    /// Default parameter set for this family.
    pub fn default_params(self) -> ShapeParams {
        match self {
            ShapeKind::Cylinder => ShapeParams::Cylinder(CylinderParams::default()),
            ShapeKind::Cone => ShapeParams::Cone(ConeParams::default()),
            ShapeKind::Sphere => ShapeParams::Sphere(SphereParams::default()),
            ShapeKind::Ellipsoid => ShapeParams::Ellipsoid(EllipsoidParams::default()),
            ShapeKind::Hyperboloid => ShapeParams::Hyperboloid(HyperboloidParams::default()),
            ShapeKind::Toroid => ShapeParams::Toroid(ToroidParams::default()),
        }
    }

    /// Generates this family with its default parameters.
    pub fn generate(self) -> Result<Mesh, ShapeError> {
        self.default_params().generate()
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                ShapeError::invalid("shape", format!("unknown shape family `{}`", s.trim()))
            })
    }
}

/// A family together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeParams {
    Cylinder(CylinderParams),
    Cone(ConeParams),
    Sphere(SphereParams),
    Ellipsoid(EllipsoidParams),
    Hyperboloid(HyperboloidParams),
    Toroid(ToroidParams),
}

impl ShapeParams {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeParams::Cylinder(_) => ShapeKind::Cylinder,
            ShapeParams::Cone(_) => ShapeKind::Cone,
            ShapeParams::Sphere(_) => ShapeKind::Sphere,
            ShapeParams::Ellipsoid(_) => ShapeKind::Ellipsoid,
            ShapeParams::Hyperboloid(_) => ShapeKind::Hyperboloid,
            ShapeParams::Toroid(_) => ShapeKind::Toroid,
        }
    }

    /// Dispatches to the generator for this family.
    pub fn generate(&self) -> Result<Mesh, ShapeError> {
        match self {
            ShapeParams::Cylinder(p) => generate_cylinder(p),
            ShapeParams::Cone(p) => generate_cone(p),
            ShapeParams::Sphere(p) => generate_sphere(p),
            ShapeParams::Ellipsoid(p) => generate_ellipsoid(p),
            ShapeParams::Hyperboloid(p) => generate_hyperboloid(p),
            ShapeParams::Toroid(p) => generate_toroid(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.name().parse::<ShapeKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.name());
        }
        assert_eq!(" Toroid ".parse::<ShapeKind>(), Ok(ShapeKind::Toroid));
        assert!(matches!(
            "cube".parse::<ShapeKind>(),
            Err(ShapeError::InvalidParameter { name: "shape", .. })
        ));
    }

    #[test]
    fn digits_follow_shortcut_order() {
        assert_eq!(ShapeKind::from_digit(1), Some(ShapeKind::Cylinder));
        assert_eq!(ShapeKind::from_digit(3), Some(ShapeKind::Sphere));
        assert_eq!(ShapeKind::from_digit(6), Some(ShapeKind::Toroid));
        assert_eq!(ShapeKind::from_digit(0), None);
        assert_eq!(ShapeKind::from_digit(7), None);
    }

    #[test]
    fn default_params_match_their_kind() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.default_params().kind(), kind);
        }
    }

    #[test]
    fn every_family_is_deterministic() {
        for kind in ShapeKind::ALL {
            let first = kind.generate().unwrap();
            let second = kind.generate().unwrap();
            let bits = |m: &Mesh| -> (Vec<u32>, Vec<u32>) {
                (
                    m.flat_vertices().iter().map(|v| v.to_bits()).collect(),
                    m.flat_colors().iter().map(|v| v.to_bits()).collect(),
                )
            };
            assert_eq!(bits(&first), bits(&second), "{kind}");
            assert_eq!(first.indices(), second.indices(), "{kind}");
        }
    }

    #[test]
    fn default_meshes_hold_invariants() {
        for kind in ShapeKind::ALL {
            let mesh = kind.generate().unwrap();
            let n = mesh.vertex_count() as u32;
            assert_eq!(mesh.vertices().len(), mesh.colors().len(), "{kind}");
            assert_eq!(mesh.indices().len() % 3, 0, "{kind}");
            assert!(mesh.indices().iter().all(|&i| i < n), "{kind}");
            assert!(mesh.triangle_count() > 0, "{kind}");
        }
    }
}
