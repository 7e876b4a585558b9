//! # Primitive Shape Generation
//!
//! One pure function per surface family. Every generator validates its
//! parameters up front, then walks the surface parametrization and appends
//! vertices, colors and triangles to a [`MeshBuilder`].
//!
//! Colors are flat per-vertex RGB: grid shapes derive them from the
//! parametrization (direction-like, always in `[0, 1]`), while the capped
//! shapes use one solid color per part.

use super::{Mesh, MeshBuilder};
use crate::error::ShapeError;
use std::f32::consts::PI;

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];

/// Parameters for [`generate_sphere`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    pub radius: f32,
    /// Subdivisions from pole to pole
    pub lat_bands: u32,
    /// Subdivisions around the Y axis
    pub long_bands: u32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            lat_bands: 30,
            long_bands: 30,
        }
    }
}

/// Parameters for [`generate_ellipsoid`]: per-axis scale of a unit sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsoidParams {
    pub scale_x: f32,
    pub scale_y: f32,
    pub scale_z: f32,
}

impl Default for EllipsoidParams {
    fn default() -> Self {
        Self {
            scale_x: 1.5,
            scale_y: 1.0,
            scale_z: 0.7,
        }
    }
}

/// Parameters for [`generate_hyperboloid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HyperboloidParams {
    /// Subdivisions along Y, spanning `[-1, 1]`
    pub rings: u32,
    /// Subdivisions around the Y axis
    pub slices: u32,
}

impl Default for HyperboloidParams {
    fn default() -> Self {
        Self {
            rings: 40,
            slices: 40,
        }
    }
}

/// Parameters for [`generate_toroid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToroidParams {
    /// Distance from the torus center to the tube center
    pub major_radius: f32,
    /// Tube radius
    pub minor_radius: f32,
    pub radial: u32,
    pub tubular: u32,
}

impl Default for ToroidParams {
    fn default() -> Self {
        Self {
            major_radius: 1.2,
            minor_radius: 0.4,
            radial: 40,
            tubular: 30,
        }
    }
}

/// Parameters for [`generate_cylinder`] and [`generate_cone`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    /// Accepted for compatibility but not applied: both shapes always span
    /// `y ∈ [-1, 1]`.
    pub height: f32,
    pub radius: f32,
    pub slices: u32,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 1.0,
            slices: 40,
        }
    }
}

/// Cones share the cylinder's parameter set.
pub type ConeParams = CylinderParams;

fn require_count(name: &'static str, value: u32) -> Result<(), ShapeError> {
    if value < 1 {
        return Err(ShapeError::invalid(
            name,
            format!("must be at least 1, got {value}"),
        ));
    }
    Ok(())
}

fn require_finite(name: &'static str, value: f32) -> Result<(), ShapeError> {
    if !value.is_finite() {
        return Err(ShapeError::invalid(
            name,
            format!("must be finite, got {value}"),
        ));
    }
    Ok(())
}

/// Rejects meshes whose vertex or index count would not fit in `u32`.
///
/// Returns both counts as capacities for the builder.
fn require_addressable(
    name: &'static str,
    vertex_count: u64,
    index_count: u64,
) -> Result<(usize, usize), ShapeError> {
    if vertex_count > u32::MAX as u64 {
        return Err(ShapeError::invalid(
            name,
            format!("{vertex_count} vertices exceed the u32 index range"),
        ));
    }
    if index_count > u32::MAX as u64 {
        return Err(ShapeError::invalid(
            name,
            format!("{index_count} indices exceed the u32 draw range"),
        ));
    }
    Ok((vertex_count as usize, index_count as usize))
}

/// Vertex and index counts of a `rows` × `cols` quad grid.
fn grid_counts(rows: u32, cols: u32) -> (u64, u64) {
    let (rows, cols) = (rows as u64, cols as u64);
    ((rows + 1) * (cols + 1), 6 * rows * cols)
}

fn abs3(v: [f32; 3]) -> [f32; 3] {
    v.map(f32::abs)
}

/// Generate a UV sphere
///
/// Vertices are laid out on a `(lat_bands + 1) × (long_bands + 1)` grid, with
/// `theta` running from the north pole (`+Y`) to the south pole and `phi`
/// sweeping a full turn. The first and last row each collapse onto a pole, so
/// every pole-adjacent cell yields one zero-area triangle.
///
/// Colors are the absolute value of the unit direction and do not depend on
/// `radius`.
pub fn generate_sphere(params: &SphereParams) -> Result<Mesh, ShapeError> {
    require_count("lat_bands", params.lat_bands)?;
    require_count("long_bands", params.long_bands)?;
    require_finite("radius", params.radius)?;
    let (grid_vertices, grid_indices) = grid_counts(params.lat_bands, params.long_bands);
    let (vertex_count, index_count) =
        require_addressable("lat_bands", grid_vertices, grid_indices)?;

    let SphereParams {
        radius,
        lat_bands,
        long_bands,
    } = *params;
    let mut mesh = MeshBuilder::with_capacity(vertex_count, index_count);

    for lat in 0..=lat_bands {
        let theta = lat as f32 * PI / lat_bands as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..=long_bands {
            let phi = lon as f32 * 2.0 * PI / long_bands as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let direction = [cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            mesh.push_vertex(direction.map(|c| radius * c), abs3(direction));
        }
    }

    mesh.push_grid_quads(0, lat_bands, long_bands);

    Ok(mesh.build())
}

/// Generate an ellipsoid by scaling a default unit sphere per axis
///
/// The sphere is generated fresh for every call and the scaled copy is
/// returned. Colors are copied from the sphere unchanged, so they still encode
/// direction rather than the stretched shape.
pub fn generate_ellipsoid(params: &EllipsoidParams) -> Result<Mesh, ShapeError> {
    require_finite("scale_x", params.scale_x)?;
    require_finite("scale_y", params.scale_y)?;
    require_finite("scale_z", params.scale_z)?;

    let sphere = generate_sphere(&SphereParams::default())?;
    Ok(sphere.scaled(params.scale_x, params.scale_y, params.scale_z))
}

/// Generate a one-sheet hyperboloid of revolution, `x² + z² - y² = 1`
///
/// `y` spans `[-1, 1]` in `rings` steps; each ring has radius `sqrt(1 + y²)`.
pub fn generate_hyperboloid(params: &HyperboloidParams) -> Result<Mesh, ShapeError> {
    require_count("rings", params.rings)?;
    require_count("slices", params.slices)?;
    let (grid_vertices, grid_indices) = grid_counts(params.rings, params.slices);
    let (vertex_count, index_count) = require_addressable("rings", grid_vertices, grid_indices)?;

    let HyperboloidParams { rings, slices } = *params;
    let mut mesh = MeshBuilder::with_capacity(vertex_count, index_count);

    for i in 0..=rings {
        let y = -1.0 + 2.0 * i as f32 / rings as f32;
        let r = (1.0 + y * y).sqrt();

        for j in 0..=slices {
            let theta = 2.0 * PI * j as f32 / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let position = [r * cos_theta, y, r * sin_theta];

            mesh.push_vertex(position, abs3(position.map(|c| c / 2.0)));
        }
    }

    mesh.push_grid_quads(0, rings, slices);

    Ok(mesh.build())
}

/// Generate a torus lying in the XY plane
///
/// `theta` sweeps the tube center around the Z axis at distance
/// `major_radius`; `phi` sweeps around the tube.
pub fn generate_toroid(params: &ToroidParams) -> Result<Mesh, ShapeError> {
    require_count("radial", params.radial)?;
    require_count("tubular", params.tubular)?;
    require_finite("major_radius", params.major_radius)?;
    require_finite("minor_radius", params.minor_radius)?;
    let (grid_vertices, grid_indices) = grid_counts(params.radial, params.tubular);
    let (vertex_count, index_count) =
        require_addressable("radial", grid_vertices, grid_indices)?;

    let ToroidParams {
        major_radius,
        minor_radius,
        radial,
        tubular,
    } = *params;
    let mut mesh = MeshBuilder::with_capacity(vertex_count, index_count);

    for i in 0..=radial {
        let theta = i as f32 * 2.0 * PI / radial as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for j in 0..=tubular {
            let phi = j as f32 * 2.0 * PI / tubular as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let ring = major_radius + minor_radius * cos_phi;

            mesh.push_vertex(
                [ring * cos_theta, ring * sin_theta, minor_radius * sin_phi],
                abs3([cos_theta, sin_theta, sin_phi]),
            );
        }
    }

    mesh.push_grid_quads(0, radial, tubular);

    Ok(mesh.build())
}

/// Point `i` of a `slices`-step circle of `radius` in the XZ plane.
fn rim_point(radius: f32, i: u32, slices: u32) -> (f32, f32) {
    let theta = 2.0 * PI * i as f32 / slices as f32;
    (radius * theta.cos(), radius * theta.sin())
}

/// Appends a center vertex plus a closed rim at height `y` and fans them.
///
/// The rim repeats its first point at the end so the fan closes on itself.
/// Returns the center index.
fn push_disk_fan(
    mesh: &mut MeshBuilder,
    center: [f32; 3],
    rim_y: f32,
    radius: f32,
    slices: u32,
    center_color: [f32; 3],
    rim_color: [f32; 3],
) -> u32 {
    let center_index = mesh.push_vertex(center, center_color);

    for i in 0..=slices {
        let (x, z) = rim_point(radius, i, slices);
        mesh.push_vertex([x, rim_y, z], rim_color);
        if i > 0 {
            mesh.push_triangle(center_index, center_index + i, center_index + i + 1);
        }
    }

    center_index
}

/// Generate a capped cylinder
///
/// Three vertex groups share one index space:
///
/// 1. bottom cap at `y = -1`, red, fan-triangulated from its center
/// 2. top cap at `y = 1`, green, fanned the same way
/// 3. side wall, blue, one (bottom, top) vertex pair per rim step joined into
///    a quad strip
///
/// The vertical span is always `[-1, 1]`; `params.height` is accepted but not
/// applied to the geometry.
pub fn generate_cylinder(params: &CylinderParams) -> Result<Mesh, ShapeError> {
    require_count("slices", params.slices)?;
    require_finite("height", params.height)?;
    require_finite("radius", params.radius)?;
    let slices = params.slices as u64;
    let (vertex_count, index_count) =
        require_addressable("slices", 2 * (slices + 2) + 2 * (slices + 1), 12 * slices)?;

    let CylinderParams { radius, slices, .. } = *params;
    let mut mesh = MeshBuilder::with_capacity(vertex_count, index_count);

    push_disk_fan(&mut mesh, [0.0, -1.0, 0.0], -1.0, radius, slices, RED, RED);
    push_disk_fan(&mut mesh, [0.0, 1.0, 0.0], 1.0, radius, slices, GREEN, GREEN);

    let side_offset = mesh.next_index();
    for i in 0..=slices {
        let (x, z) = rim_point(radius, i, slices);
        mesh.push_vertex([x, -1.0, z], BLUE);
        mesh.push_vertex([x, 1.0, z], BLUE);

        if i > 0 {
            let idx = side_offset + (i - 1) * 2;
            mesh.push_triangle(idx, idx + 1, idx + 2);
            mesh.push_triangle(idx + 1, idx + 2, idx + 3);
        }
    }

    Ok(mesh.build())
}

/// Generate a cone
///
/// A yellow base disk at `y = -1` plus a magenta apex at `(0, 1, 0)` fanned to
/// a second full-radius ring that also lies on the base plane. Only the apex
/// is elevated; the silhouette comes entirely from the apex fan.
///
/// Like the cylinder, `params.height` is accepted but not applied.
pub fn generate_cone(params: &ConeParams) -> Result<Mesh, ShapeError> {
    require_count("slices", params.slices)?;
    require_finite("height", params.height)?;
    require_finite("radius", params.radius)?;
    let slices = params.slices as u64;
    let (vertex_count, index_count) =
        require_addressable("slices", 2 * (slices + 2), 6 * slices)?;

    let ConeParams { radius, slices, .. } = *params;
    let mut mesh = MeshBuilder::with_capacity(vertex_count, index_count);

    push_disk_fan(&mut mesh, [0.0, -1.0, 0.0], -1.0, radius, slices, YELLOW, YELLOW);
    push_disk_fan(&mut mesh, [0.0, 1.0, 0.0], -1.0, radius, slices, MAGENTA, MAGENTA);

    Ok(mesh.build())
}
