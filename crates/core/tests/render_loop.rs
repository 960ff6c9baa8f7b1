//! Drives the render loop end to end with a recording backend and a fake
//! scheduler standing in for `requestAnimationFrame`.

use glam::Vec2;
use raymarch_core::{
    FrameClock, FrameScheduler, PointerArray, PointerInput, RenderBackend, RenderContext,
    RenderLoop, Viewport, MAX_POINTERS,
};

#[derive(Debug, Default)]
struct Frame {
    viewport: Option<(u32, u32)>,
    time: Option<f32>,
    resolution: Option<Vec2>,
    pointers: Option<PointerArray>,
    vertex_count: Option<i32>,
    visible: bool,
}

/// Records what each frame set. `broken` mimics a program that failed to
/// compile: draws still arrive, they just produce nothing on screen.
#[derive(Default)]
struct RecordingBackend {
    broken: bool,
    viewport: (u32, u32),
    frames: Vec<Frame>,
}

impl RecordingBackend {
    fn current(&mut self) -> &mut Frame {
        self.frames.last_mut().expect("clear starts every frame")
    }

    fn last_frame(&self) -> &Frame {
        self.frames.last().expect("at least one frame drawn")
    }
}

impl RenderBackend for RecordingBackend {
    fn set_viewport(&mut self, viewport: &Viewport) {
        self.viewport = (viewport.width(), viewport.height());
    }

    fn clear(&mut self, _color: [f32; 4]) {
        let viewport = Some(self.viewport);
        self.frames.push(Frame {
            viewport,
            ..Frame::default()
        });
    }

    fn bind_quad(&mut self) {}

    fn set_time(&mut self, seconds: f32) {
        self.current().time = Some(seconds);
    }

    fn set_resolution(&mut self, resolution: Vec2) {
        self.current().resolution = Some(resolution);
    }

    fn set_pointers(&mut self, pointers: &PointerArray) {
        self.current().pointers = Some(*pointers);
    }

    fn draw_triangles(&mut self, vertex_count: i32) {
        let visible = !self.broken;
        let frame = self.current();
        frame.vertex_count = Some(vertex_count);
        frame.visible = visible;
    }
}

/// Queues frame requests so the test can play the role of the browser.
#[derive(Default)]
struct FakeScheduler {
    pending: usize,
}

impl FrameScheduler for FakeScheduler {
    fn request_next_frame(&mut self) {
        self.pending += 1;
    }
}

fn setup(backend: RecordingBackend) -> (RenderContext<RecordingBackend>, RenderLoop<FakeScheduler>) {
    let ctx = RenderContext::new(
        backend,
        Viewport::from_window(1024.0, 768.0, 1.0),
        PointerInput::new(true),
        FrameClock::new(0.0),
    );
    (ctx, RenderLoop::new(FakeScheduler::default()))
}

/// Fires every pending frame request once, at 60 Hz timestamps.
fn pump(ctx: &mut RenderContext<RecordingBackend>, render_loop: &mut RenderLoop<FakeScheduler>, frames: usize) {
    for _ in 0..frames {
        assert_eq!(render_loop.scheduler().pending as u64, render_loop.frames());
        let now = render_loop.frames() as f64 * 1000.0 / 60.0;
        render_loop.tick(ctx, now);
    }
}

#[test]
fn loop_runs_and_time_advances() {
    let (mut ctx, mut render_loop) = setup(RecordingBackend::default());
    render_loop.start(&mut ctx);
    pump(&mut ctx, &mut render_loop, 59);

    assert_eq!(render_loop.frames(), 60);
    let frames = &ctx.backend().frames;
    assert_eq!(frames[0].time, Some(0.0));
    let last = frames.last().unwrap().time.unwrap();
    assert!((last - 59.0 / 60.0).abs() < 1e-4, "got {last}");
    assert!(frames.iter().all(|f| f.vertex_count == Some(6)));
}

#[test]
fn resize_then_draw_uses_scaled_viewport() {
    let (mut ctx, mut render_loop) = setup(RecordingBackend::default());
    render_loop.start(&mut ctx);

    ctx.resize(Viewport::from_window(390.0, 844.0, 3.0));
    pump(&mut ctx, &mut render_loop, 1);

    let frame = ctx.backend().last_frame();
    assert_eq!(frame.viewport, Some((1170, 2532)));
    assert_eq!(frame.resolution, Some(Vec2::new(1170.0, 2532.0)));
}

#[test]
fn broken_shader_does_not_stop_the_loop() {
    let (mut ctx, mut render_loop) = setup(RecordingBackend {
        broken: true,
        ..RecordingBackend::default()
    });
    render_loop.start(&mut ctx);
    pump(&mut ctx, &mut render_loop, 10);

    assert_eq!(render_loop.frames(), 11);
    assert_eq!(render_loop.scheduler().pending, 11);
    assert_eq!(ctx.backend().frames.len(), 11);
    assert!(ctx
        .backend()
        .frames
        .iter()
        .all(|f| f.vertex_count == Some(6) && !f.visible));
}

#[test]
fn touch_state_reaches_next_frame_and_clears_after_end() {
    let (mut ctx, mut render_loop) = setup(RecordingBackend::default());
    render_loop.start(&mut ctx);

    ctx.touch(&[Vec2::new(100.0, 100.0), Vec2::new(200.0, 300.0)]);
    pump(&mut ctx, &mut render_loop, 1);
    let pointers = ctx.backend().last_frame().pointers.unwrap();
    assert_eq!(pointers.get(0), Some(Vec2::new(100.0, 668.0)));
    assert_eq!(pointers.get(1), Some(Vec2::new(200.0, 468.0)));
    assert_eq!(pointers.as_slice().len(), MAX_POINTERS * 2);

    ctx.touch_end();
    pump(&mut ctx, &mut render_loop, 1);
    let pointers = ctx.backend().last_frame().pointers.unwrap();
    assert!(pointers.as_slice().iter().all(|&c| c == 0.0));
}

#[test]
fn mouse_drag_and_touch_drag_render_identically() {
    let path = [Vec2::new(12.0, 34.0), Vec2::new(56.0, 78.0)];

    let (mut mouse_ctx, mut mouse_loop) = setup(RecordingBackend::default());
    mouse_loop.start(&mut mouse_ctx);
    mouse_ctx.mouse_down();
    for &p in &path {
        mouse_ctx.mouse_move(p);
        pump(&mut mouse_ctx, &mut mouse_loop, 1);
    }
    mouse_ctx.mouse_up();
    pump(&mut mouse_ctx, &mut mouse_loop, 1);

    let (mut touch_ctx, mut touch_loop) = setup(RecordingBackend::default());
    touch_loop.start(&mut touch_ctx);
    for &p in &path {
        touch_ctx.touch(&[p]);
        pump(&mut touch_ctx, &mut touch_loop, 1);
    }
    touch_ctx.touch_end();
    pump(&mut touch_ctx, &mut touch_loop, 1);

    let mouse_pointers: Vec<_> = mouse_ctx.backend().frames.iter().map(|f| f.pointers).collect();
    let touch_pointers: Vec<_> = touch_ctx.backend().frames.iter().map(|f| f.pointers).collect();
    assert_eq!(mouse_pointers, touch_pointers);
}

#[test]
fn coarse_pointer_devices_ignore_the_mouse() {
    let mut ctx = RenderContext::new(
        RecordingBackend::default(),
        Viewport::new(100, 100, 1.0),
        PointerInput::new(false),
        FrameClock::default(),
    );
    assert!(!ctx.mouse_down());
    ctx.mouse_move(Vec2::new(50.0, 50.0));
    let uniforms = ctx.draw(0.0);
    assert!(uniforms.pointers.is_empty());
}
