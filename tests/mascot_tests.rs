//! Mascot Lifecycle Tests
//!
//! End-to-end tests driving a [`Mascot`] through a fake host:
//! - Mounting with and without a container, and failed container setup
//! - Pointer, resize and frame callbacks
//! - Loop cancellation
//! - Per-frame render errors

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use glam::Vec3;
use howl::app::{FrameScheduler, Host, LoopHandle, Mascot};
use howl::config::MascotSettings;
use howl::errors::{HowlError, Result};
use howl::input::PointerMailbox;
use howl::renderer::{RenderBackend, RendererSettings};
use howl::scene::{Camera, Scene};
use howl::utils::time::Timer;

const EPSILON: f32 = 1e-5;
const DT: f32 = 1.0 / 60.0;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Fakes
// ============================================================================

#[derive(Default, Clone)]
struct Counters {
    frames: Rc<Cell<u32>>,
    meshes: Rc<Cell<usize>>,
    resizes: Rc<RefCell<Vec<(u32, u32)>>>,
}

struct RecordingBackend {
    counters: Counters,
    size: (u32, u32),
    fail: bool,
}

impl RenderBackend for RecordingBackend {
    fn render(&mut self, scene: &Scene, _camera: &Camera) -> Result<()> {
        self.counters.frames.set(self.counters.frames.get() + 1);
        self.counters.meshes.set(scene.visible_meshes().len());
        if self.fail {
            return Err(HowlError::SurfaceUnsupported);
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.counters.resizes.borrow_mut().push((width, height));
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}

#[derive(Default)]
struct FakeHost {
    /// Size of the container, `None` when the page has none.
    container: Option<(u32, u32)>,
    fail_container: bool,
    fail_backend: bool,
    failing_renders: bool,

    lookups: Vec<String>,
    backends_created: u32,
    listeners_registered: u32,
    listener: Option<PointerMailbox>,
    counters: Counters,
}

impl FakeHost {
    fn with_container(width: u32, height: u32) -> Self {
        Self {
            container: Some((width, height)),
            ..Self::default()
        }
    }
}

impl Host for FakeHost {
    type Container = (u32, u32);

    fn find_container(&mut self, id: &str) -> Result<Option<(u32, u32)>> {
        self.lookups.push(id.to_owned());
        if self.fail_container {
            return Err(HowlError::ContainerUnavailable("canvas rejected".into()));
        }
        Ok(self.container)
    }

    fn container_size(&self, container: &(u32, u32)) -> (u32, u32) {
        *container
    }

    fn create_backend(
        &mut self,
        _container: &(u32, u32),
        _settings: &RendererSettings,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn RenderBackend>> {
        if self.fail_backend {
            return Err(HowlError::AdapterRequestFailed("no adapter".into()));
        }
        self.backends_created += 1;
        Ok(Box::new(RecordingBackend {
            counters: self.counters.clone(),
            size: (width, height),
            fail: self.failing_renders,
        }))
    }

    fn register_listeners(&mut self, _container: &(u32, u32), mailbox: &PointerMailbox) {
        self.listeners_registered += 1;
        self.listener = Some(mailbox.clone());
    }
}

#[derive(Default)]
struct CountingScheduler {
    requests: u32,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}

fn mount(host: &mut FakeHost) -> Mascot {
    Mascot::mount(host, &MascotSettings::default())
        .expect("mount succeeds")
        .expect("container present")
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn missing_container_mounts_nothing() {
    let mut host = FakeHost::default();
    let mounted = Mascot::mount(&mut host, &MascotSettings::default()).expect("not an error");

    assert!(mounted.is_none());
    assert_eq!(host.lookups, vec!["canvas-container".to_owned()]);
    assert_eq!(host.backends_created, 0);
    assert_eq!(host.listeners_registered, 0);
}

#[test]
fn container_id_comes_from_settings() {
    let mut host = FakeHost::default();
    let settings = MascotSettings {
        container_id: "hero".to_owned(),
        ..MascotSettings::default()
    };
    let _ = Mascot::mount(&mut host, &settings).expect("not an error");
    assert_eq!(host.lookups, vec!["hero".to_owned()]);
}

#[test]
fn mount_builds_scene_and_registers_listeners() {
    let mut host = FakeHost::with_container(800, 600);
    let mascot = mount(&mut host);

    assert_eq!(host.backends_created, 1);
    assert_eq!(host.listeners_registered, 1);
    assert_eq!(mascot.backend().size(), (800, 600));

    // Rig, camera and three lights
    assert_eq!(mascot.scene().nodes.len(), 14);
    assert_eq!(mascot.scene().lights.len(), 3);
    assert!(mascot.scene().find_node_by_name("keyLight").is_some());
    assert!(mascot.scene().find_node_by_name("rimLight").is_some());

    let camera = mascot.camera().expect("active camera");
    assert!(approx(camera.aspect, 800.0 / 600.0));
    assert!(approx(camera.fov, 50.0_f32.to_radians()));
    let cam_pos = mascot
        .scene()
        .get_node(mascot.camera_node())
        .map(|n| n.transform.position)
        .expect("camera node");
    assert_eq!(cam_pos, Vec3::new(0.0, 0.5, 5.0));
}

#[test]
fn container_setup_failure_is_fatal() {
    let mut host = FakeHost {
        fail_container: true,
        ..FakeHost::with_container(800, 600)
    };
    let result = Mascot::mount(&mut host, &MascotSettings::default());

    // Not the silent no-container path
    assert!(matches!(result, Err(HowlError::ContainerUnavailable(_))));
    assert_eq!(host.backends_created, 0);
    assert_eq!(host.listeners_registered, 0);
}

#[test]
fn backend_failure_is_fatal() {
    let mut host = FakeHost {
        fail_backend: true,
        ..FakeHost::with_container(800, 600)
    };
    let result = Mascot::mount(&mut host, &MascotSettings::default());

    assert!(matches!(result, Err(HowlError::AdapterRequestFailed(_))));
    assert_eq!(host.listeners_registered, 0);
}

// ============================================================================
// Pointer to rotation
// ============================================================================

#[test]
fn pointer_at_right_edge_turns_head() {
    let mut host = FakeHost::with_container(800, 600);
    let mut mascot = mount(&mut host);

    let signal = mascot.on_pointer_move(800.0, 300.0);
    assert!(approx(signal.x, 1.0));
    assert!(approx(signal.y, 0.0));

    mascot.step(0.0, DT);

    let state = *mascot.animation();
    assert!(approx(state.target_yaw, 0.6));
    assert!(approx(state.yaw, 0.03));
    assert!(approx(state.pitch, 0.0));
    assert!(approx(mascot.driver().neck_yaw(), 0.015));

    let rig = *mascot.rig();
    let pivot = mascot
        .scene()
        .get_node(rig.head_pivot)
        .map(|n| n.transform.rotation_euler())
        .expect("pivot");
    assert!(approx(pivot.y, 0.03));
    let root_y = mascot.scene().get_node(rig.root).map(|n| n.transform.position.y).expect("root");
    assert!(approx(root_y, 0.0));
}

#[test]
fn neck_follows_half_head_yaw_every_step() {
    let mut host = FakeHost::with_container(800, 600);
    let mut mascot = mount(&mut host);
    let listener = host.listener.clone().expect("listener registered");
    let rig = *mascot.rig();

    // Pointer sweeps, jumps and leaves the viewport, through both input paths
    let path = [
        (800.0, 300.0),
        (0.0, 0.0),
        (400.0, 600.0),
        (1200.0, -300.0),
        (-400.0, 900.0),
        (400.0, 300.0),
        (640.0, 120.0),
    ];
    let mut step = 0;
    for (i, &(x, y)) in path.iter().enumerate() {
        for _ in 0..5 {
            if i % 2 == 0 {
                mascot.on_pointer_move(x, y);
            } else {
                listener.post(x, y, 800.0, 600.0);
            }
            mascot.step(step as f32 * DT, DT);
            step += 1;

            let pivot_yaw = mascot
                .scene()
                .get_node(rig.head_pivot)
                .map(|n| n.transform.rotation_euler().y)
                .expect("pivot");
            let neck_yaw = mascot
                .scene()
                .get_node(rig.neck)
                .map(|n| n.transform.rotation_euler().y)
                .expect("neck");

            // Euler extraction from the quaternion costs some precision
            assert!((pivot_yaw - mascot.animation().yaw).abs() < 1e-4);
            assert!((neck_yaw - pivot_yaw * 0.5).abs() < 1e-4, "step {step}: neck {neck_yaw} head {pivot_yaw}");
            assert!(approx(mascot.driver().neck_yaw(), mascot.animation().yaw * 0.5));
        }
    }
}

#[test]
fn step_renders_every_part() {
    let mut host = FakeHost::with_container(800, 600);
    let mut mascot = mount(&mut host);

    mascot.step(0.0, DT);
    mascot.step(DT, DT);

    assert_eq!(host.counters.frames.get(), 2);
    assert_eq!(host.counters.meshes.get(), 8);
}

#[test]
fn listener_samples_are_drained_on_step() {
    let mut host = FakeHost::with_container(800, 600);
    let mut mascot = mount(&mut host);
    let listener = host.listener.clone().expect("listener registered");

    // The listener reports against the page size, not the container size
    listener.post(0.0, 0.0, 1600.0, 900.0);
    mascot.step(0.0, DT);

    assert!(approx(mascot.pointer().signal().x, -1.0));
    assert!(approx(mascot.pointer().signal().y, 1.0));
    assert!(mascot.mailbox().take().is_none());
    assert!(approx(mascot.animation().target_pitch, 0.4));
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn resize_updates_camera_surface_and_pointer() {
    let mut host = FakeHost::with_container(800, 600);
    let mut mascot = mount(&mut host);

    mascot.on_resize(1000, 500);

    assert!(approx(mascot.camera().expect("camera").aspect, 2.0));
    assert_eq!(mascot.backend().size(), (1000, 500));
    assert_eq!(host.counters.resizes.borrow().as_slice(), &[(1000, 500)]);

    // Same pixel now maps against the new extent
    let signal = mascot.on_pointer_move(1000.0, 250.0);
    assert!(approx(signal.x, 1.0));
    assert!(approx(signal.y, 0.0));
}

#[test]
fn zero_height_resize_is_ignored() {
    let mut host = FakeHost::with_container(800, 600);
    let mut mascot = mount(&mut host);

    mascot.on_resize(800, 0);

    assert!(approx(mascot.camera().expect("camera").aspect, 800.0 / 600.0));
    assert_eq!(mascot.backend().size(), (800, 600));
    assert!(host.counters.resizes.borrow().is_empty());
    assert_eq!(mascot.viewport().height, 600);
}

// ============================================================================
// Frame loop
// ============================================================================

#[test]
fn frame_renders_and_schedules_next() {
    let mut host = FakeHost::with_container(800, 600);
    let mut mascot = mount(&mut host).with_timer(Timer::fixed(Duration::from_millis(500)));
    let mut scheduler = CountingScheduler::default();

    mascot.frame(&mut scheduler);
    mascot.frame(&mut scheduler);

    assert_eq!(scheduler.requests, 2);
    assert_eq!(host.counters.frames.get(), 2);
    // Idle bob at t = 1.0 s
    let expected = (1.0_f32 * 1.5).sin() * 0.1;
    assert!(approx(mascot.animation().idle_offset, expected));
}

#[test]
fn cancelled_loop_stops() {
    let mut host = FakeHost::with_container(800, 600);
    let handle = LoopHandle::new();
    let mut mascot = mount(&mut host).with_handle(handle.clone());
    let mut scheduler = CountingScheduler::default();

    mascot.frame(&mut scheduler);
    handle.cancel();
    mascot.frame(&mut scheduler);
    mascot.frame(&mut scheduler);

    assert!(mascot.handle().is_cancelled());
    assert_eq!(scheduler.requests, 1);
    assert_eq!(host.counters.frames.get(), 1);
}

#[test]
fn render_errors_do_not_stop_the_loop() {
    let mut host = FakeHost {
        failing_renders: true,
        ..FakeHost::with_container(800, 600)
    };
    let mut mascot = mount(&mut host).with_timer(Timer::fixed(Duration::from_millis(16)));
    let mut scheduler = CountingScheduler::default();

    for _ in 0..3 {
        mascot.frame(&mut scheduler);
    }

    assert_eq!(scheduler.requests, 3);
    assert_eq!(host.counters.frames.get(), 3);
}

#[test]
fn head_converges_over_many_frames() {
    let mut host = FakeHost::with_container(800, 600);
    let mut mascot = mount(&mut host);
    mascot.on_pointer_move(0.0, 0.0);

    for i in 0..600 {
        mascot.step(i as f32 * DT, DT);
    }

    let state = *mascot.animation();
    assert!((state.yaw + 0.6).abs() < 1e-4);
    assert!((state.pitch - 0.4).abs() < 1e-4);
}
