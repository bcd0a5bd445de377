// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;
use xf3d_core::Steps;

#[derive(Parser, Debug, Clone)]
#[command(name = "xf3d")]
#[command(about = "Interactive 3D affine transformation demo", long_about = None)]
pub struct Cli {
    /// Wavefront OBJ file to show instead of the built-in letter
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Distance moved by one translation key press
    #[arg(long, default_value_t = 1.0)]
    pub translate_step: f64,

    /// Angle turned by one rotation key press, in degrees
    #[arg(long, value_name = "DEGREES", default_value_t = 18.0)]
    pub rotate_step: f64,

    /// Factor applied by `=`
    #[arg(long, default_value_t = 1.1)]
    pub scale_up: f64,

    /// Factor applied by `-`
    #[arg(long, default_value_t = 0.9)]
    pub scale_down: f64,

    /// Write log records to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn steps(&self) -> Steps {
        Steps {
            translate: self.translate_step,
            rotate: self.rotate_step.to_radians(),
            scale_up: self.scale_up,
            scale_down: self.scale_down,
        }
    }
}
