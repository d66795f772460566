use steerfield_rbf::{
    FieldTestFunctions, VectorFieldEngine, field_samples_to_csv, generate_random_points,
    config::{GridParams, Params},
    generated::GenerationOutput,
    interpolant_config::KernelKind,
    presets::get_preset,
    progress::{ProgressMsg, closure_sink},
};
use steerfield_rbf_utils::Vector3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Print recompute events from a listener thread
    let (sink, listener) = closure_sink(64, |msg| match msg {
        ProgressMsg::FieldRecomputed { generation, num_sources, num_grid_points, elapsed } => {
            println!("generation {generation}: {num_sources} sources -> {num_grid_points} samples in {elapsed:?}");
        }
        ProgressMsg::RecomputeFailed { reason } => println!("recompute failed: {reason}"),
        _ => {}
    });

    // 11 x 3 x 11 grid over the play area
    let grid = GridParams::builder()
        .columns(11)
        .rows(3)
        .layers(11)
        .min_corner([-10.0, 0.0, -10.0])
        .max_corner([10.0, 4.0, 10.0])
        .build();

    let mut engine = VectorFieldEngine::new(Params::builder().grid(grid).build())?
        .with_progress_callback(sink);

    // A vortex sampled at a dozen random points
    let points = generate_random_points(12, Vector3::new(-8.0, 0.0, -8.0), Vector3::new(8.0, 0.0, 8.0), Some(7));
    let vectors = FieldTestFunctions::vortex(&points, Vector3::ZERO, 0.25);
    engine.set_sources(FieldTestFunctions::to_source_samples(&points, &vectors));
    engine.recompute()?;

    // Same sources, smoother Gaussian kernel
    engine.set_kernel(KernelKind::gaussian())?;
    engine.recompute()?;

    // Replace the sources with a generated payload
    let payload = r#"{
        "style": "exploratory",
        "vectors": [
            { "s": { "x": -6, "y": 1, "z": -6 }, "e": { "x": -2, "y": 1, "z": -6 } },
            { "s": { "x": 6, "y": 1, "z": -6 }, "e": { "x": 6, "y": 1, "z": -2 } },
            { "s": { "x": 6, "y": 1, "z": 6 }, "e": { "x": 2, "y": 1, "z": 6 } },
            { "s": { "x": -6, "y": 1, "z": 6 }, "e": { "x": -6, "y": 1, "z": 2 } }
        ]
    }"#;
    let output = GenerationOutput::from_json(payload)?;
    let preset = get_preset(&output.style);
    println!("style {} (max speed {})", preset.name, preset.max_speed);

    engine.set_sources_from_generation(&output);
    engine.recompute()?;

    if let Some(snapshot) = engine.field_samples() {
        let path = std::env::temp_dir().join("steer_field_demo.csv");
        field_samples_to_csv(&snapshot.samples, &path)?;
        println!("wrote {} samples to {}", snapshot.len(), path.display());
    }

    drop(engine);
    let _ = listener.join();

    Ok(())
}
