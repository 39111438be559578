//! Headless sheet demo: drives a persistent sheet through a drag, a fling,
//! and the imperative surface, printing each snapshot change.
//!
//! Run with `cargo run -p snapsheet_engine --example sheet_demo`.

use snapsheet_core::{Snap, SnapPositioning, SnapSpec};
use snapsheet_engine::{SheetConfig, SheetController};

fn main() -> snapsheet_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snapsheet_engine=debug".into()),
        )
        .init();

    let spec = SnapSpec::new(
        SnapPositioning::RelativeToAvailableSpace,
        [Snap::Value(0.25), Snap::Value(0.6), Snap::Expanded],
    );
    let controller = SheetController::new(SheetConfig::persistent(spec))?;

    controller.subscribe(Box::new(|state| {
        println!(
            "extent {:.3} progress {:.2} scroll {:.0} expanded={} collapsed={}",
            state.extent, state.progress, state.scroll_offset, state.is_expanded, state.is_collapsed
        );
    }));

    // Layout pass: 1400px of content inside a 1000px viewport
    {
        let engine = controller.engine();
        let mut engine = engine.lock().unwrap();
        engine.update_measurements(1400.0, 0.0, 0.0, 1000.0);
        engine.update_scroll_metrics(0.0, 400.0);
    }

    println!("-- expand --");
    controller.expand();
    run_to_rest(&controller);

    println!("-- drag down 150px, slow release --");
    {
        let engine = controller.engine();
        let mut engine = engine.lock().unwrap();
        engine.drag_start();
        engine.drag_update(150.0);
        engine.drag_end(Some(-80.0));
    }
    run_to_rest(&controller);

    println!("-- fast downward fling --");
    {
        let engine = controller.engine();
        let mut engine = engine.lock().unwrap();
        engine.drag_start();
        engine.drag_update(40.0);
        engine.drag_end(Some(1500.0));
    }
    run_to_rest(&controller);

    println!("-- collapse --");
    controller.collapse();
    run_to_rest(&controller);

    Ok(())
}

/// Tick at a fixed 60fps cadence until the sheet comes to rest
fn run_to_rest(controller: &SheetController) {
    while controller.tick(16.0) {}
}
