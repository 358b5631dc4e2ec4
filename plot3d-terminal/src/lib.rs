//! Terminal front end: drives an [`Axes3d`] scene into the ASCII
//! rasterizer with interactive view controls.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::debug;
use plot3d_core::Axes3d;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiCanvas;

/// Degrees of rotation per keypress.
const ROTATE_STEP: f64 = 5.0;

/// Main application struct for terminal plot viewing
pub struct TerminalApp {
    axes: Axes3d,
    canvas: AsciiCanvas,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(axes: Axes3d) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            axes,
            canvas: AsciiCanvas::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// The wrapped axes, for adjusting the plot between frames.
    pub fn axes_mut(&mut self) -> &mut Axes3d {
        &mut self.axes
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

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            let (elev, azim) = (self.axes.elev(), self.axes.azim());
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('w') | KeyCode::Up => {
                    self.axes.view_init(elev + ROTATE_STEP, azim);
                }
                KeyCode::Char('s') | KeyCode::Down => {
                    self.axes.view_init(elev - ROTATE_STEP, azim);
                }
                KeyCode::Char('a') | KeyCode::Left => {
                    self.axes.view_init(elev, azim - ROTATE_STEP);
                }
                KeyCode::Char('d') | KeyCode::Right => {
                    self.axes.view_init(elev, azim + ROTATE_STEP);
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    let _ = self.axes.set_dist((self.axes.dist() - 1.0).max(2.0));
                }
                KeyCode::Char('-') => {
                    let _ = self.axes.set_dist(self.axes.dist() + 1.0);
                }
                _ => {}
            }
            debug!(
                "view: elev {} azim {} dist {}",
                self.axes.elev(),
                self.axes.azim(),
                self.axes.dist()
            );
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let scene = self
            .axes
            .render()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

        self.canvas.clear();
        self.canvas.render_scene(&scene);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Plot3D | FPS: {:.1} | elev {:.0} azim {:.0} | WASD/Arrows=Rotate +/-=Zoom Q=Quit",
                self.fps,
                self.axes.elev(),
                self.axes.azim()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
