//! # Procedural Geometry Generation
//!
//! This module turns the mathematical definition of a parametric surface into
//! renderable geometry: vertex positions, one RGB color per vertex and a
//! triangle index list.
//!
//! ## Supported Shapes
//!
//! - **Cylinder**: two fan-triangulated caps plus a quad-strip side wall
//! - **Cone**: a base disk plus a fan from a single apex
//! - **Sphere**: latitude/longitude grid
//! - **Ellipsoid**: a unit sphere scaled per axis
//! - **Hyperboloid**: one-sheet hyperboloid of revolution
//! - **Toroid**: torus swept around the Z axis
//!
//! ## Usage
//!
//! ```rust
//! use shapes3d::gfx::geometry::{generate_sphere, ShapeKind, SphereParams};
//!
//! let sphere = generate_sphere(&SphereParams::default()).unwrap();
//! assert_eq!(sphere.vertex_count(), 31 * 31);
//!
//! let toroid = ShapeKind::Toroid.generate().unwrap();
//! assert!(toroid.triangle_count() > 0);
//! ```

pub mod primitives;
pub mod shape;

pub use primitives::*;
pub use shape::{ShapeKind, ShapeParams};

use crate::error::ShapeError;

/// Generated geometry, ready for GPU upload.
///
/// A `Mesh` is sealed once produced: its arrays can be read but not modified.
/// Derived shapes are built with [`Mesh::scaled`], which returns a new value and
/// leaves the source untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Builds a mesh from raw arrays, checking every invariant.
    ///
    /// Fails with [`ShapeError::MalformedMesh`] if the color count differs from
    /// the vertex count, the index count is not a multiple of 3, or an index
    /// points past the last vertex.
    pub fn from_parts(
        vertices: Vec<[f32; 3]>,
        colors: Vec<[f32; 3]>,
        indices: Vec<u32>,
    ) -> Result<Self, ShapeError> {
        if vertices.len() != colors.len() {
            return Err(ShapeError::MalformedMesh(format!(
                "{} vertices but {} colors",
                vertices.len(),
                colors.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(ShapeError::MalformedMesh(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(ShapeError::MalformedMesh(format!(
                "index {} out of range for {} vertices",
                bad,
                vertices.len()
            )));
        }

        Ok(Self {
            vertices,
            colors,
            indices,
        })
    }

    /// Vertex positions in generation order.
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Per-vertex RGB colors, index-aligned with [`Mesh::vertices`].
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Triangle list; each consecutive triple is one triangle.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Positions as a flat `x, y, z, x, y, z, ...` slice.
    pub fn flat_vertices(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Colors as a flat `r, g, b, r, g, b, ...` slice.
    pub fn flat_colors(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Get the number of vertices in this mesh
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Area of a triangle given by its index triple.
    pub fn triangle_area(&self, triangle: [u32; 3]) -> f32 {
        let [a, b, c] = triangle.map(|i| self.vertices[i as usize]);
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let cross = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        0.5 * (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt()
    }

    /// Counts triangles whose area is at most `epsilon`.
    ///
    /// Grid shapes collapse a whole row of vertices onto each pole, so these
    /// zero-area triangles are expected there.
    pub fn degenerate_triangle_count(&self, epsilon: f32) -> usize {
        self.triangles()
            .filter(|&t| self.triangle_area(t) <= epsilon)
            .count()
    }

    /// Returns a copy with every position scaled component-wise.
    ///
    /// Colors and indices are carried over bit for bit.
    pub fn scaled(&self, sx: f32, sy: f32, sz: f32) -> Mesh {
        Mesh {
            vertices: self
                .vertices
                .iter()
                .map(|&[x, y, z]| [x * sx, y * sy, z * sz])
                .collect(),
            colors: self.colors.clone(),
            indices: self.indices.clone(),
        }
    }
}

/// Growable buffers used while a generator runs, sealed into a [`Mesh`] by
/// [`MeshBuilder::build`].
#[derive(Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            colors: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, position: [f32; 3], color: [f32; 3]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.colors.push(color);
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Number of vertices pushed so far; the index the next vertex will get.
    pub fn next_index(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Splits every cell of a `rows × cols` vertex grid into two triangles.
    ///
    /// The grid starts at `base` and is laid out row-major with `cols + 1`
    /// vertices per row. Cell `(i, j)` becomes `(a, b, a+1)` and `(b, b+1, a+1)`
    /// with `a = base + i·(cols+1) + j` and `b = a + cols + 1`.
    pub fn push_grid_quads(&mut self, base: u32, rows: u32, cols: u32) {
        for i in 0..rows {
            for j in 0..cols {
                let a = base + i * (cols + 1) + j;
                let b = a + cols + 1;
                self.push_triangle(a, b, a + 1);
                self.push_triangle(b, b + 1, a + 1);
            }
        }
    }

    pub fn build(self) -> Mesh {
        debug_assert_eq!(self.vertices.len(), self.colors.len());
        debug_assert_eq!(self.indices.len() % 3, 0);
        debug_assert!(self
            .indices
            .iter()
            .all(|&i| (i as usize) < self.vertices.len()));

        Mesh {
            vertices: self.vertices,
            colors: self.colors,
            indices: self.indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> MeshBuilder {
        let mut builder = MeshBuilder::new();
        let a = builder.push_vertex([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let b = builder.push_vertex([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let c = builder.push_vertex([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
        builder.push_triangle(a, b, c);
        builder
    }

    #[test]
    fn builder_assigns_sequential_indices() {
        let mut builder = MeshBuilder::new();
        assert_eq!(builder.push_vertex([0.0; 3], [0.0; 3]), 0);
        assert_eq!(builder.push_vertex([0.0; 3], [0.0; 3]), 1);
        assert_eq!(builder.next_index(), 2);
    }

    #[test]
    fn flat_views_follow_generation_order() {
        let mesh = unit_triangle().build();
        assert_eq!(
            mesh.flat_vertices(),
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(mesh.flat_colors().len(), 9);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn triangle_area_of_right_triangle() {
        let mesh = unit_triangle().build();
        assert!((mesh.triangle_area([0, 1, 2]) - 0.5).abs() < 1e-6);
        assert_eq!(mesh.degenerate_triangle_count(1e-6), 0);
    }

    #[test]
    fn grid_quads_match_row_major_layout() {
        let mut builder = MeshBuilder::new();
        for _ in 0..9 {
            builder.push_vertex([0.0; 3], [0.0; 3]);
        }
        builder.push_grid_quads(0, 2, 2);
        let mesh = builder.build();
        assert_eq!(&mesh.indices()[..6], &[0, 3, 1, 3, 4, 1]);
        assert_eq!(mesh.indices().len(), 24);
        assert!(mesh.indices().iter().all(|&i| i < 9));
    }

    #[test]
    fn scaled_leaves_source_untouched() {
        let source = unit_triangle().build();
        let before = source.clone();
        let scaled = source.scaled(2.0, 3.0, 4.0);

        assert_eq!(source, before);
        assert_eq!(scaled.vertices()[1], [2.0, 0.0, 0.0]);
        assert_eq!(scaled.vertices()[2], [0.0, 3.0, 0.0]);
        assert_eq!(scaled.colors(), source.colors());
        assert_eq!(scaled.indices(), source.indices());
    }

    #[test]
    fn from_parts_rejects_broken_invariants() {
        let v = vec![[0.0; 3]; 3];
        let c = vec![[0.0; 3]; 3];

        assert!(Mesh::from_parts(v.clone(), c.clone(), vec![0, 1, 2]).is_ok());
        assert!(matches!(
            Mesh::from_parts(v.clone(), vec![[0.0; 3]; 2], vec![0, 1, 2]),
            Err(ShapeError::MalformedMesh(_))
        ));
        assert!(matches!(
            Mesh::from_parts(v.clone(), c.clone(), vec![0, 1]),
            Err(ShapeError::MalformedMesh(_))
        ));
        assert!(matches!(
            Mesh::from_parts(v, c, vec![0, 1, 3]),
            Err(ShapeError::MalformedMesh(_))
        ));
    }
}
