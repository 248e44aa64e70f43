/// wire3d Terminal Demo - Wireframe Cube
///
/// Renders the sample cube as a wireframe with backface culling.
/// Controls:
///   - WASD / Arrow Keys: Orbit the camera around its target
///   - +/-: Move the camera closer / farther
///   - C: Toggle backface culling
///   - Q/ESC: Quit

use clap::{Parser, ValueEnum};
use nalgebra::{Point3, Vector3};
use std::error::Error;
use wire3d_core::{
    Camera, CameraConfig, ClipMode, CullMode, Mesh, Pipeline, PipelineOptions, Viewport,
};
use wire3d_terminal::TerminalApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ClipArg {
    Off,
    Near,
    NearFar,
    Frustum,
}

impl From<ClipArg> for ClipMode {
    fn from(arg: ClipArg) -> Self {
        match arg {
            ClipArg::Off => ClipMode::Disabled,
            ClipArg::Near => ClipMode::Near,
            ClipArg::NearFar => ClipMode::NearFar,
            ClipArg::Frustum => ClipMode::Frustum,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "wire3d-terminal")]
#[command(about = "Wireframe cube renderer for the terminal")]
struct Args {
    /// Camera position, as X,Y,Z
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true, default_value = "-200,-150,400")]
    eye: [f64; 3],

    /// Point the camera looks at, as X,Y,Z
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true, default_value = "0,0,0")]
    target: [f64; 3],

    /// Camera up vector, as X,Y,Z
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true, default_value = "0,1,0")]
    up: [f64; 3],

    /// Half-angle field of view in degrees
    #[arg(long, default_value_t = wire3d_core::camera::DEFAULT_FOV_DEGREES)]
    fov: f64,

    /// Near plane distance
    #[arg(long, default_value_t = wire3d_core::camera::DEFAULT_NEAR)]
    near: f64,

    /// Far plane distance
    #[arg(long, default_value_t = wire3d_core::camera::DEFAULT_FAR)]
    far: f64,

    /// Cube edge length
    #[arg(long, default_value_t = 100.0)]
    size: f64,

    /// Draw back faces too
    #[arg(long)]
    no_cull: bool,

    /// Clipping stage
    #[arg(long, value_enum, default_value = "off")]
    clip: ClipArg,

    /// Print one 400x400 frame as text and exit
    #[arg(long)]
    once: bool,
}

impl Args {
    fn camera_config(&self) -> CameraConfig {
        CameraConfig {
            position: Point3::from(self.eye),
            target: Point3::from(self.target),
            up: Vector3::from(self.up),
            fov_degrees: self.fov,
            near: self.near,
            far: self.far,
            ..CameraConfig::default()
        }
    }

    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            cull: if self.no_cull {
                CullMode::Disabled
            } else {
                CullMode::Backface
            },
            clip: self.clip.into(),
        }
    }
}

fn parse_triple(s: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected X,Y,Z, got {:?}", s));
    };

    let parse = |v: &str| v.parse::<f64>().map_err(|e| format!("{:?}: {}", v, e));
    Ok([parse(*x)?, parse(*y)?, parse(*z)?])
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mesh = Mesh::cube(args.size);
    let camera = Camera::try_from(args.camera_config())?;
    let options = args.pipeline_options();
    log::info!("camera: {:?}, options: {:?}", camera.config(), options);

    if args.once {
        let viewport = Viewport::new(400, 400)?;
        let polylines = Pipeline::new(options).render(&mesh, &camera, &viewport)?;

        for polyline in &polylines {
            let points: Vec<String> = polyline
                .points
                .iter()
                .map(|p| format!("({:.2}, {:.2})", p.x, p.y))
                .collect();
            println!("face {}: {}", polyline.face_index, points.join(" "));
        }
        return Ok(());
    }

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh, camera, options)?;
    app.run()?;

    Ok(())
}
