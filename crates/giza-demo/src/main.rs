//! Rotating pyramid demo.
//!
//! Controls:
//! - Space: pause/resume the rotation
//! - Up/Down arrows: increase/decrease rotation speed (may go negative)
//! - Escape: quit

use anyhow::Result;

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use giza_engine::anim::AnimationState;
use giza_engine::core::{App, AppControl, FrameCtx};
use giza_engine::device::GpuInit;
use giza_engine::logging::{init_logging, LoggingConfig};
use giza_engine::render::{PyramidRenderer, RenderCtx};
use giza_engine::window::{Runtime, RuntimeConfig};

/// Speed change per arrow-key press, radians per frame.
const SPEED_STEP: f32 = 0.005;

const CLEAR_BLACK: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

struct PyramidApp {
    anim: AnimationState,
    renderer: Option<PyramidRenderer>,
}

impl PyramidApp {
    fn new() -> Self {
        Self {
            anim: AnimationState::new(),
            renderer: None,
        }
    }

    /// The UI collaborator: writes only `rotating` and `speed`, never the
    /// angle. Runs on the event-loop thread, serialized with frame ticks.
    fn on_key(&mut self, code: KeyCode) -> AppControl {
        match code {
            KeyCode::Space => {
                self.anim.toggle_rotating();
                log::info!(
                    "rotation {}",
                    if self.anim.is_rotating() { "resumed" } else { "paused" }
                );
            }
            KeyCode::ArrowUp => {
                self.anim.set_speed(self.anim.speed() + SPEED_STEP);
                log::info!("rotation speed {:+.3} rad/frame", self.anim.speed());
            }
            KeyCode::ArrowDown => {
                self.anim.set_speed(self.anim.speed() - SPEED_STEP);
                log::info!("rotation speed {:+.3} rad/frame", self.anim.speed());
            }
            KeyCode::Escape => return AppControl::Exit,
            _ => {}
        }
        AppControl::Continue
    }
}

impl App for PyramidApp {
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let renderer = PyramidRenderer::new(ctx)?;
        log::info!(
            "pyramid renderer ready ({} indices per draw)",
            renderer.index_count()
        );
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput { event: key, .. } = event {
            if key.state == ElementState::Pressed && !key.repeat {
                if let PhysicalKey::Code(code) = key.physical_key {
                    return self.on_key(code);
                }
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = self.renderer.as_ref() else {
            return AppControl::Continue;
        };
        let anim = &mut self.anim;

        ctx.render(CLEAR_BLACK, |rctx, target| {
            // Only place the angle advances; paused frames still redraw at
            // the frozen angle.
            let angle = anim.advance();
            renderer.render(rctx, target, angle);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    log::info!("giza pyramid demo — Space pauses, Up/Down change speed");

    Runtime::run(
        RuntimeConfig {
            title: "Giza".to_string(),
            initial_size: winit::dpi::LogicalSize::new(900.0, 700.0),
        },
        GpuInit::default(),
        PyramidApp::new(),
    )
}
