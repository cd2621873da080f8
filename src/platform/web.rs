//! Browser glue
//!
//! Binds the evasion engine and the celebration effects to the live page.
//! Everything runs on the main thread; shared state sits behind
//! `Rc<RefCell<..>>` and is borrowed only inside one callback.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Document, Element, Event,
    HtmlCanvasElement, HtmlElement, MouseEvent, PointerEvent, TouchEvent, Window,
};

use super::{SetupError, TUNING_ATTRIBUTE, ids};
use crate::audio::Chime;
use crate::celebration::{Celebration, CelebrationPlan};
use crate::effects::hearts::{HEART_CLASS, LAYER_CLASS};
use crate::effects::{BurstStatus, CONFETTI_CANVAS_ID, ConfettiBurst, DecorationLayer, SurfaceSize};
use crate::evasion::{EvasionController, EvasionEvent, Outcome, Placement, PointerKind, Stage};
use crate::geometry::{Rect, Viewport};
use crate::tuning::Tuning;

/// Required page elements, looked up once at setup
pub struct Page {
    pub card: HtmlElement,
    pub question: HtmlElement,
    pub actions: HtmlElement,
    pub yes_button: HtmlElement,
    pub no_button: HtmlElement,
    pub success: HtmlElement,
}

impl Page {
    pub fn locate(document: &Document) -> Result<Self, SetupError> {
        Ok(Self {
            card: html_element(document, ids::CARD)?,
            question: html_element(document, ids::QUESTION)?,
            actions: html_element(document, ids::ACTIONS)?,
            yes_button: html_element(document, ids::YES_BUTTON)?,
            no_button: html_element(document, ids::NO_BUTTON)?,
            success: html_element(document, ids::SUCCESS)?,
        })
    }
}

fn html_element(document: &Document, id: &'static str) -> Result<HtmlElement, SetupError> {
    document
        .get_element_by_id(id)
        .ok_or(SetupError::MissingElement(id))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SetupError::WrongElementType(id))
}

/// Live viewport size
fn viewport(window: &Window) -> Viewport {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(width, height)
}

/// High resolution clock (same timeline as animation frame timestamps)
fn now(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn client_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::from_ltwh(r.left(), r.top(), r.width(), r.height())
}

/// The real page as seen by the evasion engine
pub struct DomStage {
    window: Window,
    movable: HtmlElement,
    target: HtmlElement,
}

impl DomStage {
    pub fn new(window: Window, movable: HtmlElement, target: HtmlElement) -> Self {
        Self {
            window,
            movable,
            target,
        }
    }
}

impl Stage for DomStage {
    fn viewport(&self) -> Viewport {
        viewport(&self.window)
    }

    fn movable_rect(&self) -> Rect {
        client_rect(&self.movable)
    }

    fn target_rect(&self) -> Rect {
        client_rect(&self.target)
    }

    fn apply(&mut self, placement: &Placement) {
        if let Err(e) = self
            .movable
            .style()
            .set_property("transform", &placement.css_transform())
        {
            log::warn!("Failed to apply transform: {:?}", e);
        }
    }
}

/// Page session
struct App {
    window: Window,
    document: Document,
    page: Page,
    stage: DomStage,
    controller: EvasionController,
    celebration: Celebration,
    tuning: Tuning,
    rng: Pcg32,
}

impl App {
    fn handle(&mut self, event: EvasionEvent) {
        let now = now(&self.window);
        if let Outcome::Remeasured = self.controller.dispatch(event, now, &mut self.stage) {
            log::debug!("Origin re-measured after resize");
        }
    }

    fn accept(&mut self) {
        let plan = self.celebration.accept(&self.tuning);
        if let Err(e) = show_success(&self.page) {
            log::warn!("Failed to switch to success view: {:?}", e);
        }
        if let Some(plan) = plan {
            self.launch(plan);
        }
        let _ = self.page.yes_button.blur();
    }

    fn launch(&mut self, plan: CelebrationPlan) {
        if plan.play_chime {
            Chime::default().play();
        }

        let tuning = Tuning {
            confetti_duration_ms: plan.confetti_ms,
            hearts_duration_ms: plan.hearts_ms,
            ..self.tuning.clone()
        };
        let seed = self.rng.random::<u64>();
        if let Err(e) = launch_confetti(&self.window, &self.document, &tuning, seed) {
            log::warn!("Confetti failed to start: {:?}", e);
        }
        if let Err(e) = launch_hearts(&self.window, &self.document, &tuning, &mut self.rng) {
            log::warn!("Hearts failed to start: {:?}", e);
        }
    }
}

fn show_success(page: &Page) -> Result<(), JsValue> {
    page.question.set_hidden(true);
    page.success.set_hidden(false);
    page.success.class_list().add_1("is-visible")?;
    page.card.class_list().add_1("is-success")?;
    Ok(())
}

/// Look up the page, wire listeners, measure the button
pub fn run() -> Result<(), SetupError> {
    let window = web_sys::window().ok_or(SetupError::NoWindow)?;
    let document = window.document().ok_or(SetupError::NoDocument)?;
    let page = Page::locate(&document)?;

    let tuning = Tuning::from_attribute(page.card.get_attribute(TUNING_ATTRIBUTE).as_deref());
    let seed = js_sys::Date::now() as u64;

    let stage = DomStage::new(
        window.clone(),
        page.no_button.clone(),
        page.yes_button.clone(),
    );
    let mut controller = EvasionController::new(tuning.clone(), seed);
    controller.measure_origin(&stage);

    let app = Rc::new(RefCell::new(App {
        window,
        document,
        page,
        stage,
        controller,
        celebration: Celebration::new(),
        tuning,
        rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
    }));
    setup_listeners(&app)?;

    log::info!("Runaway card ready (seed {})", seed);
    Ok(())
}

fn setup_listeners(app: &Rc<RefCell<App>>) -> Result<(), SetupError> {
    let (window, document, no_button, yes_button) = {
        let a = app.borrow();
        (
            a.window.clone(),
            a.document.clone(),
            a.page.no_button.clone(),
            a.page.yes_button.clone(),
        )
    };

    // Resize - re-measure only
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            app.borrow_mut().handle(EvasionEvent::ViewportResized);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Mouse proximity
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let pointer = PointerKind::from_pointer_type(&event.pointer_type());
            let point = DVec2::new(event.client_x() as f64, event.client_y() as f64);
            app.borrow_mut()
                .handle(EvasionEvent::PointerProximity { pointer, point });
        });
        document
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Touch proximity - passive, never blocks scrolling
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            let point = event
                .touches()
                .get(0)
                .map(|t| DVec2::new(t.client_x() as f64, t.client_y() as f64));
            app.borrow_mut()
                .handle(EvasionEvent::TouchProximity { point });
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        document.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        closure.forget();
    }

    // Tap on the button
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            app.borrow_mut().handle(EvasionEvent::TapEvade);
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        no_button.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        closure.forget();
    }

    // Click on the button
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            event.prevent_default();
            app.borrow_mut().handle(EvasionEvent::ClickDart);
        });
        no_button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Accept
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().accept();
        });
        yes_button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

// === Confetti ===

/// One confetti run and the handles it must release when done
struct ConfettiRun {
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    burst: Rc<RefCell<ConfettiBurst>>,
    on_resize: Closure<dyn FnMut(Event)>,
}

fn launch_confetti(
    window: &Window,
    document: &Document,
    tuning: &Tuning,
    seed: u64,
) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_id(CONFETTI_CANVAS_ID);
    body.append_child(&canvas)?;

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into()?;
    resize_surface(window, &canvas, &ctx)?;

    let burst = Rc::new(RefCell::new(ConfettiBurst::new(
        tuning,
        viewport(window),
        now(window),
        seed,
    )));

    let on_resize = {
        let window = window.clone();
        let canvas = canvas.clone();
        let ctx = ctx.clone();
        let burst = burst.clone();
        Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            burst.borrow_mut().resize(viewport(&window));
            if let Err(e) = resize_surface(&window, &canvas, &ctx) {
                log::warn!("Confetti resize failed: {:?}", e);
            }
        })
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

    log::info!(
        "Confetti started ({} particles, {} ms)",
        burst.borrow().particles().len(),
        tuning.confetti_duration_ms
    );
    request_frame(Rc::new(ConfettiRun {
        window: window.clone(),
        canvas,
        ctx,
        burst,
        on_resize,
    }));
    Ok(())
}

/// Match the backing store to viewport x device pixel ratio
fn resize_surface(
    window: &Window,
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
) -> Result<(), JsValue> {
    let size = SurfaceSize::for_viewport(viewport(window), window.device_pixel_ratio());
    canvas.set_width(size.backing_width);
    canvas.set_height(size.backing_height);
    let style = canvas.style();
    style.set_property("width", &format!("{}px", size.css_width))?;
    style.set_property("height", &format!("{}px", size.css_height))?;
    ctx.set_transform(size.dpr, 0.0, 0.0, size.dpr, 0.0, 0.0)
}

fn request_frame(run: Rc<ConfettiRun>) {
    let window = run.window.clone();
    let callback = Closure::once_into_js(move |time: f64| confetti_frame(run, time));
    let _ = window.request_animation_frame(callback.unchecked_ref());
}

fn confetti_frame(run: Rc<ConfettiRun>, time: f64) {
    let status = run.burst.borrow_mut().step(time);
    match status {
        BurstStatus::Running => {
            if let Err(e) = draw_confetti(&run) {
                log::warn!("Confetti draw failed: {:?}", e);
            }
            request_frame(run);
        }
        BurstStatus::Finished => {
            let _ = run
                .window
                .remove_event_listener_with_callback("resize", run.on_resize.as_ref().unchecked_ref());
            run.canvas.remove();
            log::info!("Confetti finished after {} frames", run.burst.borrow().frames());
        }
    }
}

fn draw_confetti(run: &ConfettiRun) -> Result<(), JsValue> {
    let ctx = &run.ctx;
    ctx.clear_rect(0.0, 0.0, run.canvas.width() as f64, run.canvas.height() as f64);

    for particle in run.burst.borrow().particles() {
        ctx.save();
        ctx.translate(particle.pos.x, particle.pos.y)?;
        ctx.rotate(particle.rotation)?;
        ctx.set_fill_style_str(particle.color);
        let half = particle.size / 2.0;
        ctx.fill_rect(-half, -half, particle.size, particle.size);
        ctx.restore();
    }
    Ok(())
}

// === Hearts ===

fn launch_hearts(
    window: &Window,
    document: &Document,
    tuning: &Tuning,
    rng: &mut Pcg32,
) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let layer = DecorationLayer::generate(tuning, now(window), rng);

    let container = document.create_element("div")?;
    container.set_class_name(LAYER_CLASS);
    for heart in &layer.hearts {
        let el: HtmlElement = document.create_element("div")?.dyn_into()?;
        el.set_class_name(HEART_CLASS);
        let style = el.style();
        for (property, value) in heart.style() {
            style.set_property(property, &value)?;
        }
        container.append_child(&el)?;
    }
    body.append_child(&container)?;

    // Bulk teardown; individual hearts are not tracked
    let teardown = Closure::once_into_js(move || {
        container.remove();
        log::debug!("Hearts layer removed");
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        teardown.unchecked_ref(),
        layer.duration_ms as i32,
    )?;

    log::info!(
        "Hearts started ({} hearts, {} ms)",
        layer.hearts.len(),
        layer.duration_ms
    );
    Ok(())
}
