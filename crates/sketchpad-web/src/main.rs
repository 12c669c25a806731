//! Headless demo: replays a few gestures and prints the draw calls.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use kurbo::Point;
    use sketchpad_core::{Session, ToolKind};
    use sketchpad_render::DrawCommand;
    use sketchpad_web::{Gesture, replay};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Sketchpad demo");

    let mut session = Session::new();
    session.attach_surface(Point::ZERO);

    let gestures = [
        Gesture::new(
            ToolKind::Pen,
            &[(40.0, 40.0), (60.0, 48.0), (90.0, 70.0), (130.0, 80.0), (170.0, 76.0)],
        ),
        Gesture::new(ToolKind::Rectangle, &[(200.0, 200.0), (360.0, 300.0)]),
        Gesture::new(ToolKind::Ellipse, &[(400.0, 200.0), (520.0, 290.0)]),
        Gesture::new(ToolKind::Arrow, &[(100.0, 400.0), (300.0, 420.0)]),
        Gesture::new(ToolKind::Select, &[(205.0, 205.0)]),
    ];

    match replay(&mut session, &gestures) {
        Ok(commands) => {
            for command in &commands {
                match command {
                    DrawCommand::Clear(rect) => println!("clear {rect:?}"),
                    DrawCommand::Save => println!("save"),
                    DrawCommand::Restore => println!("restore"),
                    DrawCommand::StrokePath { path, stroke, .. } => println!(
                        "stroke {} segments, width {}",
                        path.elements().len(),
                        stroke.width
                    ),
                    DrawCommand::FillPath { path, .. } => {
                        println!("fill {} segments", path.elements().len())
                    }
                    DrawCommand::FillText { text, .. } => println!("text {text:?}"),
                }
            }
            log::info!(
                "{} elements, undo available: {}",
                session.elements().len(),
                session.can_undo()
            );
        }
        Err(e) => {
            log::error!("Replay failed: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
