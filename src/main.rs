//! Ambient Field entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_field {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, MouseEvent, TouchEvent, Window};

    use ambient_field::renderer::CanvasSurface;
    use ambient_field::settings::DEFAULT_CANVASES;
    use ambient_field::{
        FieldError, FieldMode, FrameDriver, InputEvent, Settings, Surface, SurfaceSize,
    };

    type Driver = Rc<RefCell<FrameDriver<CanvasSurface>>>;

    /// Viewport size in CSS pixels
    fn viewport_size(window: &Window) -> SurfaceSize {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        SurfaceSize::from_signed(
            dim(window.inner_width()) as i64,
            dim(window.inner_height()) as i64,
        )
    }

    fn prefers_reduced_motion(window: &Window) -> bool {
        window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .map(|mq| mq.matches())
            .unwrap_or(false)
    }

    pub fn run() -> Result<(), FieldError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("Ambient Field starting...");

        let window = web_sys::window().ok_or(FieldError::NoWindow)?;
        let document = window.document().ok_or(FieldError::NoDocument)?;

        let settings = Settings::load();
        let animate = settings.animate(prefers_reduced_motion(&window));
        if !animate {
            log::info!("Reduced motion: rendering still frames");
        }

        let mut attached = 0;
        for (id, default_mode) in DEFAULT_CANVASES {
            if document.get_element_by_id(id).is_none() {
                continue;
            }
            let driver = attach(&window, &document, id, default_mode, &settings)?;
            setup_input_handlers(&window, driver.clone());
            setup_teardown(&window, driver.clone(), animate);

            if animate {
                driver.borrow_mut().start();
                request_animation_frame(driver);
            } else {
                driver.borrow_mut().render_still();
            }
            attached += 1;
        }

        if attached == 0 {
            return Err(FieldError::NoSurfaces);
        }

        log::info!("Ambient Field running on {} canvas(es)", attached);
        Ok(())
    }

    fn attach(
        window: &Window,
        document: &Document,
        id: &str,
        default_mode: FieldMode,
        settings: &Settings,
    ) -> Result<Driver, FieldError> {
        let mut surface = CanvasSurface::from_element_id(document, id)?;
        let data_mode = surface.canvas().get_attribute("data-mode");
        let mode = Settings::mode_for(id, data_mode.as_deref()).unwrap_or(default_mode);
        surface.resize(viewport_size(window));

        let seed = js_sys::Date::now() as u64;
        let driver = FrameDriver::new(mode, surface, seed).with_links(settings.links);
        log::info!("Attached {} field to #{} (seed {})", mode.as_str(), id, seed);
        Ok(Rc::new(RefCell::new(driver)))
    }

    fn setup_input_handlers(window: &Window, driver: Driver) {
        // Mouse move
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                driver.borrow_mut().handle_event(InputEvent::PointerMove {
                    x: event.client_x() as f32,
                    y: event.client_y() as f32,
                });
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse leaving the window
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.related_target().is_none() {
                    driver.borrow_mut().handle_event(InputEvent::PointerLeave);
                }
            });
            let _ = window
                .add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    driver.borrow_mut().handle_event(InputEvent::PointerMove {
                        x: touch.client_x() as f32,
                        y: touch.client_y() as f32,
                    });
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if event.touches().length() == 0 {
                    driver.borrow_mut().handle_event(InputEvent::PointerLeave);
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Viewport resize
        {
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let size = viewport_size(&window_clone);
                let mut d = driver.borrow_mut();
                d.handle_event(InputEvent::SurfaceResize {
                    width: size.width,
                    height: size.height,
                });
                if !d.is_running() {
                    d.render_still();
                }
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop the loop when the page is hidden; restart it when a cached page
    /// comes back
    fn setup_teardown(window: &Window, driver: Driver, animate: bool) {
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                driver.borrow_mut().stop();
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure =
                Closure::<dyn FnMut(_)>::new(move |event: web_sys::PageTransitionEvent| {
                    if !event.persisted() {
                        return;
                    }
                    let resumed = driver.borrow_mut().resume(animate);
                    if resumed {
                        request_animation_frame(driver.clone());
                    }
                });
            let _ = window
                .add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(driver: Driver) {
        let Some(window) = web_sys::window() else {
            return;
        };
        // A frame queued before a stop/start cycle belongs to a dead loop
        let run = driver.borrow().run_id();
        let closure = Closure::once(move |time: f64| {
            frame_loop(driver, run, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(driver: Driver, run: u64, time: f64) {
        if driver.borrow().run_id() != run {
            return;
        }
        let keep_going = driver.borrow_mut().frame(time);
        if keep_going {
            request_animation_frame(driver);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_field::run().map_err(|e| {
        log::error!("Ambient Field failed to start: {}", e);
        JsValue::from(e)
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ambient Field (native) starting...");
    log::info!("Native mode renders headless - serve the wasm build for the browser version");

    for mode in [
        ambient_field::FieldMode::Particles,
        ambient_field::FieldMode::Cells,
    ] {
        headless_session(mode);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Run a few seconds of a field against a recording surface with a
/// scripted pointer sweep and report draw-call counts
#[cfg(not(target_arch = "wasm32"))]
fn headless_session(mode: ambient_field::FieldMode) {
    use ambient_field::consts::FRAME_MS;
    use ambient_field::{FrameDriver, InputEvent, RecordingSurface, SurfaceSize};

    const FRAMES: u32 = 180;
    let size = SurfaceSize::new(1280, 720);
    let mut driver = FrameDriver::new(mode, RecordingSurface::new(size), 0x5eed);
    driver.start();

    let mut peak = ambient_field::renderer::DrawStats::default();
    for i in 0..FRAMES {
        // Sweep left to right across the middle, then leave
        if i < FRAMES / 2 {
            let t = i as f32 / (FRAMES / 2) as f32;
            driver.handle_event(InputEvent::PointerMove {
                x: t * size.width_f32(),
                y: size.height_f32() / 2.0,
            });
        } else if i == FRAMES / 2 {
            driver.handle_event(InputEvent::PointerLeave);
        }

        driver.frame(i as f64 * FRAME_MS);
        let stats = driver.last_stats();
        if stats.total() > peak.total() {
            peak = stats;
        }
    }
    driver.stop();

    let last = driver.last_stats();
    log::info!(
        "{}: {} entities, peak {} circles / {} rects / {} lines, final frame {} draw calls, {} fps",
        mode.as_str(),
        driver.state().entities.len(),
        peak.circles,
        peak.rects,
        peak.lines,
        last.total(),
        driver.fps()
    );
    println!(
        "{:<9} entities={:<5} peak_draws={:<6} final_draws={}",
        mode.as_str(),
        driver.state().entities.len(),
        peak.total(),
        last.total()
    );
}
