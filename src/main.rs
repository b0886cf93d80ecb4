use std::io::{self, Read};
use std::time::Instant;

mod config;
mod cpu;
mod math;
mod sky;
mod tonemap;
mod water;
mod waves;

use config::{validate_config, IncomingConfig};
use cpu::render_frame;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;

    let incoming: IncomingConfig = serde_json::from_str(&raw)?;
    let frames = match incoming {
        IncomingConfig::Single(frame) => vec![frame],
        IncomingConfig::Batch(batch) => batch.frames,
    };
    if frames.is_empty() {
        return Err("frames array must not be empty".into());
    }

    for frame in &frames {
        validate_config(frame)?;
    }

    let total = frames.len();
    for (index, frame) in frames.iter().enumerate() {
        let started = Instant::now();
        let image = render_frame(frame);
        let elapsed_ms = started.elapsed().as_millis();
        image.save(&frame.output_path)?;

        println!(
            "[{}/{}] Rendered ocean frame t={}s in {} ms: {}",
            index + 1,
            total,
            frame.time,
            elapsed_ms,
            frame.output_path
        );
    }

    Ok(())
}
