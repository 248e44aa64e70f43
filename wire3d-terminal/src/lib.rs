/// Terminal front end: a crossterm drawing surface and frame loop around
/// the wire3d pipeline
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::{Camera, CullMode, Mesh, Pipeline, PipelineOptions, Polyline, Viewport};

pub mod renderer;

pub use renderer::AsciiCanvas;

/// Terminal cells are about half as wide as they are tall.
const CELL_ASPECT: f64 = 0.5;

/// Radians per orbit key press
const ORBIT_STEP: f64 = 0.1;

/// World units per dolly key press
const DOLLY_STEP: f64 = 20.0;

/// Aspect ratio to give the camera so a `columns` x `rows` grid shows
/// square geometry as square.
///
/// The projection scales x by `aspect * fov`, and `rows` cells hold as
/// much height as `rows / CELL_ASPECT` columns hold width.
pub fn terminal_aspect_ratio(columns: u16, rows: u16) -> f64 {
    rows as f64 / (columns as f64 * CELL_ASPECT)
}

/// Render one frame into `canvas`. Errors from the pipeline are returned
/// without touching the canvas.
pub fn render_into(
    canvas: &mut AsciiCanvas,
    pipeline: &Pipeline,
    mesh: &Mesh,
    camera: &Camera,
) -> wire3d_core::Result<Vec<Polyline>> {
    let viewport = Viewport::new(canvas.width() as u32, canvas.height() as u32)?;
    let polylines = pipeline.render(mesh, camera, &viewport)?;

    canvas.clear();
    canvas.stroke_all(&polylines);
    Ok(polylines)
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    mesh: Mesh,
    camera: Camera,
    pipeline: Pipeline,
    canvas: AsciiCanvas,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    visible_faces: usize,
    status: Option<String>,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, mut camera: Camera, options: PipelineOptions) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        camera
            .set_aspect_ratio(terminal_aspect_ratio(width, height))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        Ok(Self {
            mesh,
            camera,
            pipeline: Pipeline::new(options),
            canvas: AsciiCanvas::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            visible_faces: 0,
            status: None,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Camera changes happen here, strictly between frames
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => {
                self.canvas = AsciiCanvas::new(width as usize, height as usize);
                self.apply(|camera| camera.set_aspect_ratio(terminal_aspect_ratio(width, height)));
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('a') | KeyCode::Left => self.apply(|c| c.orbit(-ORBIT_STEP, 0.0)),
            KeyCode::Char('d') | KeyCode::Right => self.apply(|c| c.orbit(ORBIT_STEP, 0.0)),
            KeyCode::Char('w') | KeyCode::Up => self.apply(|c| c.orbit(0.0, ORBIT_STEP)),
            KeyCode::Char('s') | KeyCode::Down => self.apply(|c| c.orbit(0.0, -ORBIT_STEP)),
            KeyCode::Char('+') | KeyCode::Char('=') => self.apply(|c| c.dolly(DOLLY_STEP)),
            KeyCode::Char('-') => self.apply(|c| c.dolly(-DOLLY_STEP)),
            KeyCode::Char('c') => {
                let mut options = self.pipeline.options();
                options.cull = match options.cull {
                    CullMode::Backface => CullMode::Disabled,
                    CullMode::Disabled => CullMode::Backface,
                };
                self.pipeline = Pipeline::new(options);
            }
            _ => {}
        }
    }

    /// Apply a camera change; a rejected change keeps the old camera and
    /// shows the reason in the status line.
    fn apply(&mut self, change: impl FnOnce(&mut Camera) -> wire3d_core::Result<()>) {
        match change(&mut self.camera) {
            Ok(()) => self.status = None,
            Err(e) => {
                log::debug!("camera change rejected: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        match render_into(&mut self.canvas, &self.pipeline, &self.mesh, &self.camera) {
            Ok(polylines) => self.visible_faces = polylines.len(),
            Err(e) => {
                log::warn!("frame skipped: {}", e);
                self.status = Some(e.to_string());
            }
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        let eye = self.camera.position();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "wire3d | FPS: {:.1} | faces: {} | eye: ({:.0}, {:.0}, {:.0}) | cull: {:?} | WASD/Arrows=Orbit +/-=Dolly C=Cull Q=Quit",
                self.fps,
                self.visible_faces,
                eye.x,
                eye.y,
                eye.z,
                self.pipeline.options().cull,
            )),
            ResetColor
        )?;
        if let Some(status) = &self.status {
            queue!(
                stdout,
                cursor::MoveTo(0, 1),
                SetForegroundColor(Color::Red),
                Print(status),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire3d_core::CameraConfig;

    #[test]
    fn test_terminal_aspect_ratio() {
        // 80x40 cells cover a square area
        assert_eq!(terminal_aspect_ratio(80, 40), 1.0);
        assert_eq!(terminal_aspect_ratio(160, 40), 0.5);
    }

    #[test]
    fn test_render_into_draws_visible_faces() {
        let mut canvas = AsciiCanvas::new(80, 40);
        let camera = Camera::new(CameraConfig {
            aspect_ratio: terminal_aspect_ratio(80, 40),
            ..CameraConfig::default()
        })
        .unwrap();

        let polylines =
            render_into(&mut canvas, &Pipeline::default(), &Mesh::cube(100.0), &camera).unwrap();
        assert_eq!(polylines.len(), 3);

        let drawn = (0..40)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.get(x, y) != Some(' '))
            .count();
        assert!(drawn > 0);
    }

    #[test]
    fn test_render_into_rejects_empty_canvas() {
        let mut canvas = AsciiCanvas::new(0, 0);
        let result = render_into(&mut canvas, &Pipeline::default(), &Mesh::cube(1.0), &Camera::default());
        assert!(result.is_err());
    }
}
