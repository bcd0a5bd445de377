/// XF3D Terminal Demo - Affine transformations of a wireframe letter
///
/// Controls:
///   - Arrow keys, `,` and `.`: Translate
///   - r/t, z/x, c/v: Rotate about Z, X and Y
///   - `=` / `-`: Scale up / down
///   - 1/2/3: Projection onto Oxy / Oxz / Oyz
///   - Q/ESC: Quit
use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use xf3d_core::{obj, Scene, Wireframe};
use xf3d_terminal::{cli::Cli, TerminalApp};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let model = match &cli.model {
        Some(path) => load_model(path)?,
        None => Wireframe::letter_h(),
    };
    log::info!(
        "model ready: {} vertices, {} edges",
        model.vertices().len(),
        model.edges().len()
    );

    let steps = cli.steps();
    log::info!("key steps: {:?}", steps);

    let mut app = TerminalApp::new().context("failed to query terminal size")?;
    let scene = app
        .run(Scene::new(model, steps))
        .context("terminal session failed")?;

    log::info!("exiting with matrix {:?}", scene.matrix());
    Ok(())
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(path) = path {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn load_model(path: &Path) -> Result<Wireframe> {
    log::info!("loading OBJ model from {}", path.display());

    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read model {}", path.display()))?;

    obj::parse_obj(&source).with_context(|| format!("failed to parse model {}", path.display()))
}
