//! Plot3D Terminal Demo - Gaussian Surface
//!
//! Renders the demo surface with a wireframe overlay and a contour
//! projection on the floor of the box.
//! Controls:
//!   - WASD / Arrow Keys: Rotate the view
//!   - +/-: Zoom
//!   - Q/ESC: Quit

use std::io;

use plot3d_core::{sample_surface, Axes3d, Axis, Color, SurfaceStyle};
use plot3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    let mut axes = Axes3d::new();
    build_demo(&mut axes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    println!("Starting terminal plot viewer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(axes)?;
    app.run()?;

    println!("Thank you for using the Plot3D terminal viewer!");
    Ok(())
}

fn build_demo(axes: &mut Axes3d) -> Result<(), plot3d_core::PlotError> {
    let (x, y, z) = sample_surface(0.25);

    let style = SurfaceStyle {
        rstride: 1,
        cstride: 1,
        color: Color::CYAN,
        edgecolor: None,
        shade: true,
    };
    axes.plot_surface(&x, &y, &z, style)?;
    axes.plot_wireframe(&x, &y, &z, 4, 4, Color::GREY)?;

    let (lo, hi) = z.min_max().unwrap_or((0.0, 1.0));
    let levels = plot3d_core::contour::pick_levels(lo, hi, 5);
    axes.contour(&x, &y, &z, &levels, Axis::Z, Some(lo - 20.0), Color::YELLOW)?;

    axes.set_xlabel("x");
    axes.set_ylabel("y");
    axes.set_zlabel("height");
    Ok(())
}
