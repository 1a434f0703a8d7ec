//! Replay demonstration
//!
//! Feeds a short scripted session of decoded hints through a spawned engine
//! executor while the observer walks around, then prints the render snapshot.
//!
//! Run with: `RUST_LOG=bearing_fix=debug cargo run --example replay_demo`

use bearing_fix::api::{spawn, HintOutcome, OutcomeSink, SharedObserver};
use bearing_fix::{EngineConfig, TrackedHint};
use tracing_subscriber::EnvFilter;

/// One step of the script: where the observer stands, then what arrives
const SESSION: &str = r#"[
    { "observer": [0.0, 0.0],   "update": { "key": { "name": "scout" },  "hint": { "type": "bearing", "angle": -0.7853981633974483 } } },
    { "observer": [0.0, 0.0],   "update": { "key": { "name": "miner" },  "hint": { "type": "chunk_coarse", "chunk_x": 4, "chunk_z": -2 } } },
    { "observer": [10.0, 0.0],  "update": { "key": { "name": "scout" },  "hint": { "type": "bearing", "angle": -1.1071487177940904 } } },
    { "observer": [10.0, 0.0],  "update": { "key": { "name": "beacon" }, "hint": { "type": "vector", "x": 120, "y": 64, "z": 300 }, "color": 16711935 } },
    { "observer": [20.0, 5.0],  "update": { "key": { "name": "miner" },  "hint": { "type": "unknown" } } }
]"#;

#[derive(serde::Deserialize)]
struct Step {
    observer: (f64, f64),
    update: TrackedHint,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Bearing Fix - Replay Demo ===\n");

    let steps: Vec<Step> = serde_json::from_str(SESSION)?;
    let observer = SharedObserver::new();

    let sink: OutcomeSink = Box::new(|outcome: &HintOutcome| match outcome {
        HintOutcome::Published(event) => println!(
            "Entity {} found at {:.1} / {:.1} via {}.",
            event.key, event.x, event.z, event.source
        ),
        HintOutcome::Removed { key } => println!("Entity {} removed.", key),
        HintOutcome::Ignored { key, reason } => println!("Entity {}: {}.", key, reason),
    });
    let (handle, join) = spawn(EngineConfig::default(), observer.clone(), Some(sink))?;

    for step in steps {
        observer.set(step.observer.0, step.observer.1);
        handle.submit(step.update)?;
        // Wait until the executor has applied the step before moving the observer
        handle.snapshot()?;
    }

    println!("\n--- Render snapshot ---");
    for descriptor in handle.snapshot()? {
        println!("  {:>10.1} {:>10.1}  {}", descriptor.x, descriptor.z, descriptor.color);
    }

    handle.reset()?;
    println!("\nAfter session reset: {} positions", handle.snapshot()?.len());

    handle.shutdown()?;
    let _ = join.join();
    Ok(())
}
