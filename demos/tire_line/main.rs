use curesim::{FloorLayout, LineConfig, SimulationEngine, Stage};

/// Simulated seconds per dashboard refresh
const DEFAULT_WARP_SPEED: f64 = 30.0;
const DEFAULT_REFRESHES: usize = 240;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    // tire_line [refreshes] [warp speed]
    let mut args = std::env::args().skip(1);
    let refreshes = match args.next() {
        Some(value) => value.parse::<usize>()?,
        None => DEFAULT_REFRESHES,
    };
    let warp_speed = match args.next() {
        Some(value) => value.parse::<f64>()?,
        None => DEFAULT_WARP_SPEED,
    };

    let config = LineConfig::default();
    println!("🏭 Tire Factory Digital Twin");
    println!("Configuration:");
    println!("  Curing cavities: {}", config.pool_capacity);
    println!(
        "  Build time: {}±{}s, cure time: {}±{}s, inspection: {}s",
        config.build.mean,
        config.build.spread,
        config.cure.mean,
        config.cure.spread,
        config.inspection_duration
    );
    println!("  Warp speed: {} sim-seconds per update", warp_speed);
    println!();

    let layout = FloorLayout::default();
    for label in layout.area_labels(config.pool_capacity) {
        println!("  {:<24} at ({:.1}, {:.1})", label.text, label.at.0, label.at.1);
    }
    println!();

    let mut engine = SimulationEngine::seeded(config)?;
    engine.start()?;

    for _ in 0..refreshes {
        engine.step(warp_speed)?;
        let snapshot = engine.snapshot();
        println!(
            "t={:>7.0}s | gantry inventory {:>3} | tires finished {:>4} | cavity utilization {:>5.1}%",
            snapshot.time,
            snapshot.queue_depth,
            snapshot.completed,
            snapshot.utilization()
        );
    }
    engine.stop();

    let snapshot = engine.snapshot();
    println!();
    println!("Final map ({} active tires):", snapshot.units.len());
    for marker in layout.place(&snapshot).iter().take(50) {
        println!(
            "  {:<6} {:<10} {:?} at ({:.1}, {:.1})",
            marker.label, marker.status, marker.color, marker.at.0, marker.at.1
        );
    }
    println!(
        "Curing now: {}, waiting: {}, inspecting: {}",
        snapshot.count_in(Stage::Processing),
        snapshot.count_in(Stage::Queued),
        snapshot.count_in(Stage::Finishing)
    );

    Ok(())
}
