use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrameConfig {
    pub width: u32,
    pub height: u32,
    /// Elapsed scene time in seconds; drives the waves, sun and camera.
    pub time: f32,
    pub output_path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBatchConfig {
    pub frames: Vec<RenderFrameConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IncomingConfig {
    Single(RenderFrameConfig),
    Batch(RenderBatchConfig),
}

pub fn validate_config(config: &RenderFrameConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.width == 0 || config.height == 0 {
        return Err("width and height must be positive".into());
    }

    if !config.time.is_finite() {
        return Err("time must be a finite number of seconds".into());
    }

    let output_parent = Path::new(&config.output_path)
        .parent()
        .ok_or("outputPath must include a parent directory")?;

    if !output_parent.as_os_str().is_empty() && !output_parent.exists() {
        return Err(format!(
            "output directory does not exist: {}",
            output_parent.display()
        )
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32, time: f32, output_path: &str) -> RenderFrameConfig {
        RenderFrameConfig {
            width,
            height,
            time,
            output_path: output_path.to_string(),
        }
    }

    #[test]
    fn accepts_a_plain_frame() {
        assert!(validate_config(&frame(800, 450, 0.0, "ocean.png")).is_ok());
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(validate_config(&frame(0, 450, 0.0, "ocean.png")).is_err());
        assert!(validate_config(&frame(800, 0, 0.0, "ocean.png")).is_err());
    }

    #[test]
    fn rejects_non_finite_time() {
        assert!(validate_config(&frame(800, 450, f32::NAN, "ocean.png")).is_err());
        assert!(validate_config(&frame(800, 450, f32::INFINITY, "ocean.png")).is_err());
    }

    #[test]
    fn rejects_missing_output_directory() {
        let result = validate_config(&frame(800, 450, 0.0, "/no/such/directory/ocean.png"));
        assert!(result.is_err());
    }

    #[test]
    fn parses_single_and_batch_payloads() {
        let single: IncomingConfig = serde_json::from_str(
            r#"{"width": 800, "height": 450, "time": 1.5, "outputPath": "ocean.png"}"#,
        )
        .unwrap();
        assert!(matches!(single, IncomingConfig::Single(_)));

        let batch: IncomingConfig = serde_json::from_str(
            r#"{"frames": [
                {"width": 320, "height": 180, "time": 0.0, "outputPath": "f0.png"},
                {"width": 320, "height": 180, "time": 0.5, "outputPath": "f1.png"}
            ]}"#,
        )
        .unwrap();
        match batch {
            IncomingConfig::Batch(batch) => assert_eq!(batch.frames.len(), 2),
            IncomingConfig::Single(_) => panic!("batch payload parsed as single frame"),
        }
    }
}
