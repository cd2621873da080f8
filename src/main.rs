//! Runaway Card entry point
//!
//! On the web this wires the card to the page. Natively it runs a short
//! headless session against a simulated page and prints what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Runaway Card starting...");
    runaway_card::platform::web::run().map_err(|e| {
        log::error!("Setup failed: {}", e);
        JsValue::from(e)
    })
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Runaway Card (native) starting...");
    log::info!("Native mode is a headless demo - run with `trunk serve` for the web version");

    demo::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::DVec2;

    use runaway_card::effects::{BurstStatus, ConfettiBurst};
    use runaway_card::evasion::{PointerKind, SimulatedStage};
    use runaway_card::geometry::Viewport;
    use runaway_card::{Celebration, EvasionController, EvasionEvent, Outcome, Stage, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run() {
        let tuning = Tuning::default();
        let mut stage = SimulatedStage::centered(Viewport::new(1200.0, 800.0));
        let mut controller = EvasionController::new(tuning.clone(), 2024);
        controller.dispatch(EvasionEvent::ViewportResized, 0.0, &mut stage);

        println!("\nEvasion session:");
        let mut t = 0.0;
        for i in 0..8 {
            let near = stage.movable_rect().center() + DVec2::new(40.0, 10.0);
            let event = match i % 4 {
                0 => EvasionEvent::PointerProximity {
                    pointer: PointerKind::Mouse,
                    point: near,
                },
                1 => EvasionEvent::TouchProximity { point: Some(near) },
                2 => EvasionEvent::TapEvade,
                _ => EvasionEvent::ClickDart,
            };
            report(t, &event, controller.dispatch(event, t, &mut stage));
            // Every other event lands inside the debounce window
            t += if i % 2 == 0 { 120.0 } else { 400.0 };
        }

        stage.resize(Viewport::new(390.0, 844.0));
        report(
            t,
            &EvasionEvent::ViewportResized,
            controller.dispatch(EvasionEvent::ViewportResized, t, &mut stage),
        );
        t += 400.0;
        report(
            t,
            &EvasionEvent::ClickDart,
            controller.dispatch(EvasionEvent::ClickDart, t, &mut stage),
        );

        println!("\nAccept:");
        let mut celebration = Celebration::new();
        let plan = celebration.accept(&tuning);
        println!("  first accept  -> {:?}", plan);
        println!("  second accept -> {:?}", celebration.accept(&tuning));

        let mut burst = ConfettiBurst::new(&tuning, stage.viewport(), 0.0, 7);
        let mut now = 0.0;
        while burst.step(now) == BurstStatus::Running {
            now += FRAME_MS;
        }
        println!(
            "  confetti: {} particles, {} frames, finished at {:.0} ms",
            burst.particles().len(),
            burst.frames(),
            now
        );
    }

    fn report(t: f64, event: &EvasionEvent, outcome: Outcome) {
        match outcome {
            Outcome::Moved(placement) => {
                let json = serde_json::to_string(&placement).unwrap_or_default();
                println!("  {:>6.0} ms {:<40} moved {}", t, label(event), json);
            }
            other => println!("  {:>6.0} ms {:<40} {:?}", t, label(event), other),
        }
    }

    fn label(event: &EvasionEvent) -> String {
        match event {
            EvasionEvent::PointerProximity { pointer, .. } => format!("pointer ({:?})", pointer),
            EvasionEvent::TouchProximity { .. } => "touch".to_string(),
            other => format!("{:?}", other),
        }
    }
}
