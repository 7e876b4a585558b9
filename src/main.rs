use anyhow::Context;
use shapes3d::{ShapeKind, ShapeViewer, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = ViewerConfig::from_env();
    if let Some(name) = std::env::args().nth(1) {
        let shape: ShapeKind = name
            .parse()
            .with_context(|| format!("unknown shape {name:?}, expected one of cylinder, cone, sphere, ellipsoid, hyperboloid, toroid"))?;
        config = config.with_initial_shape(shape);
    }

    log::info!("starting with {}", config.initial_shape);
    let viewer = ShapeViewer::new(config).context("failed to prepare the initial shape")?;
    viewer.run().context("viewer terminated with an error")
}
