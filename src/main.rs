//! Ramify - interactive procedural tree visualizer
//!
//! Grows a recursive tree of cylinders. Arrow keys change recursion depth and
//! branch count, clicking a branch grows a new child there, space toggles the
//! branch spin animation. Drag to orbit, scroll to zoom.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowId},
};

use ramify::core::{
    camera::Camera,
    camera_controller::OrbitCameraController,
    input::InputState,
    logging,
    time::FrameTimer,
    types::Vec3,
};
use ramify::render::{GpuContext, Renderer};
use ramify::scene::{NodeContent, SceneGraph};
use ramify::tree::{TreeConfig, TreeHierarchy};

/// Ground quad half extent (20x20 world units total)
const GROUND_HALF_EXTENT: f32 = 10.0;
/// Ground color (0x21982e)
const GROUND_COLOR: [f32; 3] = [0.129, 0.596, 0.180];
/// Largest pointer travel between press and release still counted as a click
const CLICK_DRAG_TOLERANCE: f32 = 4.0;

const INITIAL_DEPTH: u32 = 3;
const INITIAL_BRANCH_COUNT: u32 = 3;

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<Renderer>,
    scene: SceneGraph,
    tree: TreeHierarchy,
    camera: Camera,
    orbit: OrbitCameraController,
    input: InputState,
    timer: FrameTimer,
    rng: StdRng,
    depth: u32,
    branch_count: u32,
    animate: bool,
    /// Pointer position at left-button press, for click-vs-drag detection
    press_position: Option<(f32, f32)>,
}

impl App {
    fn new(config: TreeConfig) -> Self {
        let mut scene = SceneGraph::new();

        let ground = scene.add_root_object(
            "ground",
            NodeContent::Plane {
                half_extent: GROUND_HALF_EXTENT,
                color: GROUND_COLOR,
            },
        );
        scene.rotate_local(ground, Vec3::X, -90.0);

        let trunk_mid = Vec3::new(0.0, config.trunk_length / 2.0, 0.0);
        let mut rng = StdRng::from_os_rng();
        let mut tree = TreeHierarchy::new(&mut scene, config);
        tree.rebuild(&mut scene, &mut rng, INITIAL_DEPTH, INITIAL_BRANCH_COUNT);

        // Camera orbits the trunk's mid-height
        let camera = Camera::new(trunk_mid + Vec3::new(0.0, 0.0, 11.0), 75.0, 16.0 / 9.0);
        let orbit = OrbitCameraController::new(trunk_mid, 11.0);

        Self {
            window: None,
            gpu: None,
            renderer: None,
            scene,
            tree,
            camera,
            orbit,
            input: InputState::new(),
            timer: FrameTimer::new(),
            rng,
            depth: INITIAL_DEPTH,
            branch_count: INITIAL_BRANCH_COUNT,
            animate: false,
            press_position: None,
        }
    }

    /// Apply one frame of input: parameter changes, clicks, animation.
    fn update(&mut self) {
        self.timer.tick();

        let mut params_changed = false;
        if self.input.is_key_just_pressed(KeyCode::ArrowUp) {
            self.depth += 1;
            params_changed = true;
        }
        if self.input.is_key_just_pressed(KeyCode::ArrowDown) {
            self.depth = self.depth.saturating_sub(1);
            params_changed = true;
        }
        if self.input.is_key_just_pressed(KeyCode::ArrowRight) {
            self.branch_count += 1;
            params_changed = true;
        }
        if self.input.is_key_just_pressed(KeyCode::ArrowLeft) {
            self.branch_count = self.branch_count.saturating_sub(1);
            params_changed = true;
        }
        if params_changed || self.input.is_key_just_pressed(KeyCode::KeyR) {
            self.tree
                .rebuild(&mut self.scene, &mut self.rng, self.depth, self.branch_count);
        }

        if self.input.is_key_just_pressed(KeyCode::Space) {
            self.animate = !self.animate;
            log::info!(
                "branch animation {}",
                if self.animate { "enabled" } else { "disabled" }
            );
        }

        if self.input.is_button_just_pressed(MouseButton::Left) {
            self.press_position = Some(self.input.mouse_position());
        }
        if self.input.is_button_just_released(MouseButton::Left) {
            if let Some((px, py)) = self.press_position.take() {
                let (x, y) = self.input.mouse_position();
                let travel = ((x - px).powi(2) + (y - py).powi(2)).sqrt();
                if travel <= CLICK_DRAG_TOLERANCE {
                    if let Some(window) = &self.window {
                        let size = window.inner_size();
                        self.tree.grow_at(
                            &mut self.scene,
                            &self.camera,
                            &mut self.rng,
                            x,
                            y,
                            size.width as f32,
                            size.height as f32,
                        );
                    }
                }
            }
        }

        if self.animate {
            self.tree.animate_step(&mut self.scene);
        }

        self.orbit.update(&mut self.camera, &self.input);
        self.input.end_frame();
    }

    fn render(&mut self) {
        let entries = self.scene.flatten();
        if let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) {
            if let Err(e) = renderer.render(gpu, &self.camera, &entries) {
                log::warn!("render failed: {}", e);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Ramify - Procedural Tree")
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        let gpu = pollster::block_on(GpuContext::new(window.clone()))
            .expect("Failed to create GPU context");
        let renderer = Renderer::new(&gpu);

        let size = window.inner_size();
        self.camera.set_aspect(size.width as f32, size.height as f32);

        log::info!("Window created: {}x{}", size.width, size.height);
        log::info!("GPU: {}", gpu.adapter.get_info().name);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
                if let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) {
                    renderer.resize(gpu);
                }
                self.camera.set_aspect(size.width as f32, size.height as f32);
            }
            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    logging::init();
    log::info!("Ramify starting...");

    let args: Vec<String> = std::env::args().collect();
    let config = parse_config_arg(&args);

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = App::new(config);

    event_loop.run_app(&mut app).expect("Event loop error");
}

/// Parse --config <path> from command line, falling back to defaults
fn parse_config_arg(args: &[String]) -> TreeConfig {
    for i in 0..args.len() {
        if args[i] == "--config" || args[i] == "-c" {
            if let Some(path) = args.get(i + 1) {
                match TreeConfig::load(path) {
                    Ok(config) => {
                        log::info!("Loaded tree config from {}", path);
                        return config;
                    }
                    Err(e) => {
                        log::warn!("Failed to load config {}: {}; using defaults", path, e);
                    }
                }
            }
        }
    }
    TreeConfig::default()
}
