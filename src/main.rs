use std::rc::Rc;

use anyhow::Result;
use log::{info, LevelFilter};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use ledge_runner::core::GameConfig;
use ledge_runner::engine::animation::SystemClock;
use ledge_runner::engine::audio::LogSink;
use ledge_runner::engine::game_loop::FrameLimiter;
use ledge_runner::engine::input::InputManager;
use ledge_runner::engine::renderer::{HeadlessRenderer, Renderer};
use ledge_runner::game::sprites::SpriteLibrary;
use ledge_runner::game::{GameEvent, Session};

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Ledge Runner...");

    let config = GameConfig::from_env();
    info!("Assets from {}", config.asset_root.display());

    let sprites = SpriteLibrary::new(Rc::new(SystemClock::new()))?;
    let mut session = Session::load(&config, sprites)?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Ledge Runner")
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.screen_width,
            config.screen_height,
        ))
        .with_resizable(false)
        .build(&event_loop)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut input = InputManager::new();
    let mut limiter = FrameLimiter::new(config.target_fps);
    let mut renderer = HeadlessRenderer::new();
    let mut audio = LogSink;
    session.start(&mut audio);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            info!("Close requested, shutting down...");
            elwt.exit();
        }
        Event::WindowEvent {
            event: WindowEvent::KeyboardInput { event, .. },
            ..
        } => input.process_keyboard_event(&event),
        Event::WindowEvent {
            event: WindowEvent::MouseInput { state, button, .. },
            ..
        } => input.process_mouse_button(state, button),
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => input.process_cursor_moved(position.x, position.y),
        Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } => renderer.draw(&session.draw()),
        Event::AboutToWait => {
            let dt = limiter.tick();
            let frame = input.take_frame();
            for event in session.update(dt, &frame, &mut audio) {
                match event {
                    GameEvent::LevelChanged(level) => info!("Now in level {}", level),
                    GameEvent::GameOver | GameEvent::Won => {
                        let snapshot = session.snapshot();
                        info!(
                            "{:?}: score {}, health {}",
                            event, snapshot.score, snapshot.health
                        );
                    }
                }
            }
            if limiter.frame_count() % 600 == 0 {
                info!("{:.1} fps", limiter.fps());
            }
            window.request_redraw();
        }
        _ => {}
    })?;

    Ok(())
}
