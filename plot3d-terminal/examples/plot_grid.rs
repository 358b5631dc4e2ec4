//! Example: View a height-grid text file in the terminal
//!
//! Usage: cargo run --example plot_grid -- path/to/heights.txt
//!
//! The file holds one grid row per line, numbers separated by spaces;
//! `#` starts a comment line.

use std::env;
use std::fs;
use std::io;

use plot3d_core::{meshgrid, parse_grid, Axes3d, Color, Grid, SurfaceStyle};
use plot3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let z = if args.len() < 2 {
        eprintln!("Usage: {} <grid-file>", args[0]);
        eprintln!("\nNo grid file provided, using demo data...");
        let (_, _, z) = plot3d_core::sample_surface(0.25);
        z
    } else {
        let path = &args[1];
        println!("Loading grid file: {}", path);
        let text = fs::read_to_string(path)?;
        parse_grid(&text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?
    };

    let axes = surface_axes(&z)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let mut app = TerminalApp::new(axes)?;
    app.run()
}

fn surface_axes(z: &Grid) -> Result<Axes3d, plot3d_core::PlotError> {
    let cols: Vec<f64> = (0..z.cols()).map(|c| c as f64).collect();
    let rows: Vec<f64> = (0..z.rows()).map(|r| r as f64).collect();
    let (x, y) = meshgrid(&cols, &rows);

    let mut axes = Axes3d::new();
    let style = SurfaceStyle {
        rstride: 1,
        cstride: 1,
        color: Color::GREEN,
        edgecolor: Some(Color::BLACK),
        shade: true,
    };
    axes.plot_surface(&x, &y, z, style)?;
    Ok(axes)
}
