//! End-to-end: project a plot and rasterize it into a text frame.

use plot3d_core::{sample_surface, Axes3d, Color, SurfaceStyle};
use plot3d_terminal::AsciiCanvas;

#[test]
fn surface_scene_rasterizes_into_a_frame() {
    let (x, y, z) = sample_surface(0.5);
    let mut ax = Axes3d::new();
    let style = SurfaceStyle {
        rstride: 1,
        cstride: 1,
        color: Color::CYAN,
        edgecolor: None,
        shade: true,
    };
    ax.plot_surface(&x, &y, &z, style).unwrap();
    ax.plot_wireframe(&x, &y, &z, 3, 3, Color::GREY).unwrap();

    let scene = ax.render().unwrap();
    let mut canvas = AsciiCanvas::new(80, 40);
    canvas.render_scene(&scene);

    let frame = canvas.frame();
    assert_eq!(frame.lines().count(), 40);
    assert!(frame.lines().all(|l| l.chars().count() == 80));

    let inked = frame.chars().filter(|c| !c.is_whitespace()).count();
    // A full surface covers a large share of the canvas.
    assert!(inked > 400, "only {} cells inked", inked);
}

#[test]
fn rotating_the_view_changes_the_frame() {
    let (x, y, z) = sample_surface(0.5);

    let mut frames = Vec::new();
    for azim in [-60.0, 30.0] {
        let mut ax = Axes3d::new();
        ax.view_init(30.0, azim);
        let style = SurfaceStyle {
            rstride: 1,
            cstride: 1,
            ..SurfaceStyle::default()
        };
        ax.plot_surface(&x, &y, &z, style).unwrap();
        let mut canvas = AsciiCanvas::new(60, 30);
        canvas.render_scene(&ax.render().unwrap());
        frames.push(canvas.frame());
    }
    assert_ne!(frames[0], frames[1]);
}

#[test]
fn clearing_the_canvas_blanks_the_frame() {
    let mut ax = Axes3d::new();
    ax.scatter(&[0.0, 1.0], &[0.0, 1.0], &[0.0, 1.0], Color::RED, '*')
        .unwrap();
    let mut canvas = AsciiCanvas::new(20, 10);
    canvas.render_scene(&ax.render().unwrap());
    assert!(canvas.frame().contains('*'));
    canvas.clear();
    assert!(canvas.frame().chars().all(|c| c == ' ' || c == '\n'));
}
