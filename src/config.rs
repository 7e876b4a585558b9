//! Viewer configuration.
//!
//! Defaults reproduce the plain viewer: cylinder first, light-gray background,
//! both faces drawn, every frame re-uploaded. Environment variables can
//! override the runtime toggles:
//!
//! | variable                | value                          |
//! |-------------------------|--------------------------------|
//! | `SHAPES3D_SHAPE`        | shape name, e.g. `toroid`      |
//! | `SHAPES3D_ANIMATE`      | boolean, start spinning        |
//! | `SHAPES3D_CACHE_MESHES` | boolean, keep generated meshes |
//! | `SHAPES3D_VSYNC`        | boolean                        |
//!
//! Booleans accept `1/0`, `true/false`, `yes/no` and `on/off`.

use log::warn;

use crate::gfx::geometry::ShapeKind;
use crate::gfx::rendering::{BackendOptions, UploadPolicy, DEFAULT_CLEAR_COLOR};

pub const ENV_SHAPE: &str = "SHAPES3D_SHAPE";
pub const ENV_ANIMATE: &str = "SHAPES3D_ANIMATE";
pub const ENV_CACHE_MESHES: &str = "SHAPES3D_CACHE_MESHES";
pub const ENV_VSYNC: &str = "SHAPES3D_VSYNC";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    /// Initial logical window size.
    pub window_size: (u32, u32),
    pub initial_shape: ShapeKind,
    /// Radians of rotation per pixel dragged.
    pub drag_sensitivity: f32,
    /// Radians added to the Y angle per frame while spinning.
    pub spin_step: f32,
    /// Start with auto-spin enabled.
    pub animate: bool,
    pub clear_color: [f32; 4],
    /// Off by default: sphere grids face inward and the cylinder side wall
    /// alternates, so culling would hide parts of those shapes.
    pub cull_back_faces: bool,
    pub upload_policy: UploadPolicy,
    /// Keep one generated mesh per shape kind instead of regenerating on switch.
    pub cache_meshes: bool,
    pub vsync: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "3D Shapes".to_string(),
            window_size: (1200, 800),
            initial_shape: ShapeKind::Cylinder,
            drag_sensitivity: 0.01,
            spin_step: 0.01,
            animate: false,
            clear_color: DEFAULT_CLEAR_COLOR,
            cull_back_faces: false,
            upload_policy: UploadPolicy::EveryFrame,
            cache_meshes: false,
            vsync: true,
        }
    }
}

impl ViewerConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up through `lookup`. Unparsable values are
    /// logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(ENV_SHAPE) {
            match value.parse::<ShapeKind>() {
                Ok(shape) => self.initial_shape = shape,
                Err(err) => warn!("ignoring {ENV_SHAPE}={value:?}: {err}"),
            }
        }
        if let Some(animate) = lookup_bool(&lookup, ENV_ANIMATE) {
            self.animate = animate;
        }
        if let Some(cache) = lookup_bool(&lookup, ENV_CACHE_MESHES) {
            self.cache_meshes = cache;
        }
        if let Some(vsync) = lookup_bool(&lookup, ENV_VSYNC) {
            self.vsync = vsync;
        }
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_initial_shape(mut self, shape: ShapeKind) -> Self {
        self.initial_shape = shape;
        self
    }

    pub fn with_drag_sensitivity(mut self, sensitivity: f32) -> Self {
        self.drag_sensitivity = sensitivity;
        self
    }

    pub fn with_spin_step(mut self, step: f32) -> Self {
        self.spin_step = step;
        self
    }

    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_cull_back_faces(mut self, cull: bool) -> Self {
        self.cull_back_faces = cull;
        self
    }

    pub fn with_upload_policy(mut self, policy: UploadPolicy) -> Self {
        self.upload_policy = policy;
        self
    }

    pub fn with_cache_meshes(mut self, cache: bool) -> Self {
        self.cache_meshes = cache;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn backend_options(&self) -> BackendOptions {
        BackendOptions {
            cull_back_faces: self.cull_back_faces,
            vsync: self.vsync,
        }
    }
}

fn lookup_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let value = lookup(key)?;
    let parsed = parse_bool(&value);
    if parsed.is_none() {
        warn!("ignoring {key}={value:?}: expected a boolean");
    }
    parsed
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_plain_viewer() {
        let config = ViewerConfig::default();
        assert_eq!(config.window_size, (1200, 800));
        assert_eq!(config.initial_shape, ShapeKind::Cylinder);
        assert_eq!(config.clear_color, [0.95, 0.95, 0.95, 1.0]);
        assert_eq!(config.upload_policy, UploadPolicy::EveryFrame);
        assert!(!config.animate);
        assert!(!config.cache_meshes);
        assert!(!config.cull_back_faces);
    }

    #[test]
    fn overrides_apply() {
        let config = ViewerConfig::default().with_overrides(env(&[
            (ENV_SHAPE, "Toroid"),
            (ENV_ANIMATE, "yes"),
            (ENV_CACHE_MESHES, "1"),
            (ENV_VSYNC, "off"),
        ]));
        assert_eq!(config.initial_shape, ShapeKind::Toroid);
        assert!(config.animate);
        assert!(config.cache_meshes);
        assert!(!config.vsync);
    }

    #[test]
    fn bad_overrides_are_ignored() {
        let config = ViewerConfig::default()
            .with_overrides(env(&[(ENV_SHAPE, "dodecahedron"), (ENV_ANIMATE, "maybe")]));
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn builder_and_backend_options() {
        let config = ViewerConfig::default()
            .with_title("shapes")
            .with_initial_shape(ShapeKind::Sphere)
            .with_cull_back_faces(true)
            .with_vsync(false)
            .with_upload_policy(UploadPolicy::OnChange);
        assert_eq!(config.title, "shapes");
        assert_eq!(config.initial_shape, ShapeKind::Sphere);
        assert_eq!(config.upload_policy, UploadPolicy::OnChange);
        assert_eq!(
            config.backend_options(),
            BackendOptions {
                cull_back_faces: true,
                vsync: false
            }
        );
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool(" TRUE "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool(""), None);
    }
}
