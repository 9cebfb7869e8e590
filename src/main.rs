//! Setlist - an interactive piano landing page.
//!
//! Hover the keys to read the setlist, click to lock a key and hear its note,
//! scroll through the page sections and press space to spin the record.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use setlist::audio::{CpalSession, LoopingTrack};
use setlist::cli::Args;
use setlist::error::AudioError;
use setlist::page::{
    BackgroundFade, KeyId, PageCoordinator, PageEvent, PointerTracker, Rgb, ScrollView,
    VisibilityEntry,
};
use setlist::params::{OutputParams, PageLayout, RenderConfig, SynthParams};
use setlist::rendering::{PianoFrame, RenderSystem};

type NoteFactory = Box<dyn FnMut() -> Result<CpalSession, AudioError>>;

/// Number keys 1-9 select nav links in order
const NAV_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    needs_redraw: bool,

    // Page state
    page: PageCoordinator<NoteFactory, LoopingTrack>,
    scroll: ScrollView,
    fade: BackgroundFade,

    // Configuration
    render_config: RenderConfig,

    // Pointer tracking
    pointer: PointerTracker,
    hovered: Option<KeyId>,
    shown_title: String,

    // Time tracking
    start_time: Instant,
}

impl App {
    fn new(layout: &PageLayout, args: &Args) -> Self {
        let render_config = RenderConfig::default();
        let output_params = OutputParams::default();

        let session_params = output_params.clone();
        let factory: NoteFactory = Box::new(move || CpalSession::open(&session_params));
        let track = LoopingTrack::new(args.track.clone(), output_params);
        log::info!(target: "audio", "background track: {}", track.path().display());

        let page = PageCoordinator::new(layout, factory, SynthParams::default(), track);
        let initial = Rgb::parse(&layout.background).unwrap_or(Rgb::new(0, 0, 0));

        Self {
            window: None,
            render_system: None,
            needs_redraw: true,
            page,
            scroll: ScrollView::from_layout(
                layout,
                render_config.window_height as f32,
                render_config.nav_glide_s,
            ),
            fade: BackgroundFade::new(initial, render_config.background_fade_s),
            pointer: PointerTracker::new(layout.keys.len(), render_config.window_width as f64),
            render_config,
            hovered: None,
            shown_title: String::new(),
            start_time: Instant::now(),
        }
    }

    fn now_s(&self) -> f32 {
        self.start_time.elapsed().as_secs_f32()
    }

    fn dispatch(&mut self, event: PageEvent) {
        self.needs_redraw = true;
        match self.page.handle(event) {
            Ok(()) => {}
            Err(AudioError::EngineHalted) => {
                log::debug!(target: "page", "piano is silent: audio engine halted")
            }
            Err(e) => log::error!(target: "page", "piano audio disabled: {}", e),
        }
    }

    /// Move the hover to `key`, unhovering whatever it left
    fn hover(&mut self, key: Option<KeyId>) {
        if self.hovered == key {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            self.dispatch(PageEvent::KeyUnhover(previous));
        }
        if let Some(key) = key {
            self.dispatch(PageEvent::KeyHover(key));
        }
        self.hovered = key;
    }

    fn key_for_code(&self, code: KeyCode) -> Option<KeyId> {
        let label = match code {
            KeyCode::KeyC => "C",
            KeyCode::KeyD => "D",
            KeyCode::KeyE => "E",
            KeyCode::KeyF => "F",
            KeyCode::KeyG => "G",
            KeyCode::KeyA => "A",
            KeyCode::KeyB => "B",
            _ => return None,
        };
        self.page
            .keys()
            .keys()
            .iter()
            .position(|k| k.label.trim() == label)
            .map(KeyId)
    }

    fn deliver(&mut self, entries: Vec<VisibilityEntry>) {
        for entry in entries {
            log::trace!(
                target: "page",
                "section {:?} visible {:.0}%",
                entry.section,
                entry.ratio * 100.0
            );
            self.dispatch(PageEvent::Visibility {
                section: entry.section,
                is_intersecting: entry.is_intersecting,
            });
        }
    }

    fn scroll_by(&mut self, delta_px: f32) {
        let entries = self.scroll.scroll_by(delta_px);
        self.needs_redraw = true;
        self.deliver(entries);
    }

    /// Smooth scroll to the section a nav link targets
    fn follow_nav(&mut self, index: usize) {
        let Some(section) = self.page.sections().nav_section(index) else {
            log::debug!(target: "page", "nav link {} has no target section", index + 1);
            return;
        };
        let now_s = self.now_s();
        if self.scroll.glide_to(section, now_s) {
            self.needs_redraw = true;
        }
    }

    fn scale_factor(&self) -> f32 {
        self.window
            .as_ref()
            .map(|w| w.scale_factor() as f32)
            .unwrap_or(1.0)
    }

    fn handle_key(&mut self, event: &KeyEvent, event_loop: &ActiveEventLoop) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;

        if let Some(index) = NAV_KEYS.iter().position(|k| *k == code) {
            if pressed && !event.repeat {
                self.follow_nav(index);
            }
            return;
        }

        match code {
            KeyCode::Escape if pressed => event_loop.exit(),
            KeyCode::Space if pressed && !event.repeat => self.dispatch(PageEvent::PlayerClick),
            KeyCode::Tab if pressed && !event.repeat => {
                if let Some(index) = self.page.sections().next_nav() {
                    self.follow_nav(index);
                }
            }
            KeyCode::ArrowDown | KeyCode::PageDown if pressed => {
                self.scroll_by(self.render_config.scroll_step_px)
            }
            KeyCode::ArrowUp | KeyCode::PageUp if pressed => {
                self.scroll_by(-self.render_config.scroll_step_px)
            }
            _ => {
                let Some(key) = self.key_for_code(code) else {
                    return;
                };
                if pressed && !event.repeat {
                    self.hover(Some(key));
                    self.dispatch(PageEvent::KeyClick(key));
                } else if !pressed {
                    // Hand the hover back to whatever the pointer rests on
                    self.hover(self.pointer.key_under());
                }
            }
        }
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        let now_s = self.now_s();
        let entries = self.scroll.tick(now_s);
        self.deliver(entries);

        if let Some(background) = self.page.sections().background() {
            self.fade.retarget(background, now_s);
        }

        let viewport_h = self.scroll.viewport_h();
        let frame = PianoFrame {
            background: self.fade.sample(now_s),
            key_count: self.page.keys().keys().len(),
            hovered: self.hovered.map(|k| k.0),
            locked: self.page.keys().locked_key().map(|k| k.0),
            opacity: self
                .page
                .hero()
                .map_or(1.0, |hero| self.scroll.hero_opacity(hero)),
            scroll_shift: if viewport_h > 0.0 {
                self.scroll.scroll_y() / viewport_h
            } else {
                0.0
            },
        };

        if let Some(render_system) = self.render_system.as_mut() {
            match render_system.render(&frame) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    if let Some(window) = &self.window {
                        let size = window.inner_size();
                        render_system.resize(size.width, size.height);
                    }
                }
                Err(e) => log::error!("Render error: {:?}", e),
            }
        }

        self.needs_redraw = false;
        self.update_title();
    }

    /// Mirror the nav highlight, description region and player state in the
    /// window title
    fn update_title(&mut self) {
        let mut title = self
            .page
            .keys()
            .display()
            .map(|d| d.summary())
            .unwrap_or_else(|| "Setlist".to_string());
        if let Some(nav) = self.page.sections().active_nav() {
            title = format!("{} - {}", nav.label, title);
        }
        if self.page.player().shows_playing() {
            title.push_str("  [playing]");
        }

        if title != self.shown_title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.shown_title = title;
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let now_s = self.now_s();
        let animating = self.scroll.is_gliding() || !self.fade.is_settled(now_s);
        if self.needs_redraw || animating {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Setlist")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Initialize rendering system
        match pollster::block_on(RenderSystem::new(Arc::clone(&window))) {
            Ok(render_system) => self.render_system = Some(render_system),
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        }

        let size = window.inner_size();
        let viewport_h = size.height as f32 / window.scale_factor() as f32;
        self.pointer.set_width(size.width as f64);
        self.window = Some(window);

        log::info!(
            "Setlist is running: hover or click the keys, 1-9/Tab follow the nav, space plays the record, ESC quits"
        );

        self.dispatch(PageEvent::Loaded);
        let entries = self.scroll.set_viewport(viewport_h);
        self.deliver(entries);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
                self.pointer.set_width(size.width as f64);
                let viewport_h = size.height as f32 / self.scale_factor();
                let entries = self.scroll.set_viewport(viewport_h);
                self.needs_redraw = true;
                self.deliver(entries);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let key = self.pointer.moved(position.x);
                self.hover(key);
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer.left();
                self.hover(None);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(key) = self.hovered {
                    self.dispatch(PageEvent::KeyClick(key));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_px = match delta {
                    MouseScrollDelta::LineDelta(_, lines) => {
                        -lines * self.render_config.scroll_step_px
                    }
                    MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) / self.scale_factor(),
                };
                self.scroll_by(delta_px);
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(&event, event_loop),
            WindowEvent::Focused(false) => self.dispatch(PageEvent::FocusLost),
            WindowEvent::RedrawRequested => self.render_frame(),
            _ => {}
        }
    }
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    let layout = match args.load_layout() {
        Ok(layout) => layout,
        Err(e) => {
            log::error!(target: "config", "{}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(&layout, &args);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
