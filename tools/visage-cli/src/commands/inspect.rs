//! Show trace information.

use std::path::PathBuf;

use visage_widget_model::PointerEventKind;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let trace = super::load_trace(&path)?;

    let leave_count = trace
        .events
        .iter()
        .filter(|e| matches!(e.kind, PointerEventKind::Leave))
        .count();

    println!("Trace: {}", path.display());
    println!("  Schema: {}", trace.header.schema_version);
    println!("  Recorded: {}", trace.header.recorded_at);
    println!(
        "  Viewport: {}x{}",
        trace.header.viewport_width, trace.header.viewport_height
    );
    println!("  Sample rate: {}Hz", trace.header.sample_rate_hz);
    println!();

    println!("Events:");
    println!("  Moves: {}", trace.move_count());
    println!("  Leaves: {}", leave_count);
    println!("  Duration: {:.2}s", trace.duration_ms() as f64 / 1000.0);

    match trace.bounds() {
        Some(bounds) => {
            println!(
                "  Bounds: [{:.1}, {:.1}] to [{:.1}, {:.1}]",
                bounds.x,
                bounds.y,
                bounds.right(),
                bounds.bottom()
            );
        }
        None => println!("  Bounds: (no move events)"),
    }

    Ok(())
}
