//! Drives two overlap layouts through a simulated host loop.
//!
//! The first layout reveals from the bottom and is torn down and recreated halfway through,
//! resuming from its saved state. The second reveals from the end edge in one go.
//!
//! Run with `RUST_LOG=debug cargo run --example overlap_demo [style.toml]` to see the
//! state machine's transitions.

use std::time::{Duration, Instant};

use overlap_layout::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

fn bottom_style() -> overlap_layout::Result<StyleConfiguration> {
    match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read_to_string(&path).map_err(|err| {
                OverlapError::InvalidConfiguration {
                    key: path.clone(),
                    reason: err.to_string(),
                }
            })?;
            StyleConfiguration::from_toml_str(&source)
        }
        None => StyleConfiguration::from_toml_str(
            r##"
            overlap_edge = "bottom"
            overlap_color = "#FF3366CC"
            background_color = "#FFEEEEEE"
            corner_radius = 12.0
            overlap_duration = 1000
            timing = "ease_in_out"
            "##,
        ),
    }
}

fn named_listener(name: &'static str) -> OverlapCallbacks {
    OverlapCallbacks::new()
        .on_started(move || log::info!("[{}] overlap started", name))
        .on_completed(move || log::info!("[{}] overlap completed, layout clickable", name))
        .on_cancelled(move || log::info!("[{}] overlap cancelled", name))
}

/// Run frames until the layout settles or `budget` runs out. Returns the clock.
fn run_frames(layout: &mut OverlapLayout, mut now: Instant, budget: Duration) -> Instant {
    let deadline = now + budget;
    while now < deadline {
        now += FRAME;
        let animating = layout.on_animation_frame(now);
        if layout.take_all_dirty().contains(ChangeFlags::NEEDS_LAYOUT) {
            log::debug!(
                "frame +{:?}: extent {} panel {:?}",
                FRAME,
                layout.current_extent(),
                layout.panel_rect()
            );
        }
        if !animating {
            break;
        }
    }
    now
}

fn main() -> overlap_layout::Result<()> {
    env_logger::init();

    let mut now = Instant::now();

    let style = bottom_style()?;
    let mut first = OverlapLayout::new(style.clone());
    first.set_listener(named_listener("layout 1"));
    first.set_padding(16.0);
    first.add_child(Element::new(Size::new(280, 48)).tag("label"));
    first.on_measure(320, 200);
    first.on_draw(now);
    now = run_frames(&mut first, now, Duration::from_millis(450));

    // configuration change: save, tear down, recreate
    let saved = first.save_state().encode();
    log::info!("saved {} bytes at extent {}", saved.len(), first.current_extent());
    first.on_detached();

    let mut first = OverlapLayout::new(style);
    first.set_listener(named_listener("layout 1"));
    first.restore_state_bytes(&saved)?;
    first.add_child(Element::new(Size::new(280, 48)).tag("label"));
    first.on_measure(320, 200);
    first.on_draw(now);
    now = run_frames(&mut first, now, Duration::from_secs(5));
    log::info!(
        "layout 1: phase {:?}, enabled {}",
        first.phase(),
        first.is_enabled()
    );

    let attributes = StyleAttributes::new()
        .with(keys::OVERLAP_EDGE, 3)
        .with(keys::STACK_POSITION, 1)
        .with(keys::OVERLAP_COLOR, Color::from_hex(0xCC3366))
        .with(keys::OVERLAP_DURATION, 600);
    let mut second = OverlapLayout::from_attributes(&attributes)?;
    second.set_listener(named_listener("layout 2"));
    second.on_measure(320, 120);
    second.on_draw(now);
    run_frames(&mut second, now, Duration::from_secs(5));
    log::info!(
        "layout 2: phase {:?}, enabled {}",
        second.phase(),
        second.is_enabled()
    );

    Ok(())
}
