use anyhow::Result;
use shapescout_core::Shape;
use shapescout_cv::{
    Camera, CameraConfig, CaptureError, DetectorConfig, KEY_ESC, ShapeDetector, Window,
};
use tracing::{info, warn};

mod report;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
            |_| tracing_subscriber::EnvFilter::new("shapescout=info,shapescout_cv=info"),
        ))
        .with_writer(std::io::stderr)
        .init();

    let detector = ShapeDetector::new(DetectorConfig::default());
    let mut camera = Camera::open(CameraConfig::default())?;
    let window = Window::new("shapescout")?;

    let shapes: Vec<&str> = Shape::ALL.iter().map(|s| s.label()).collect();
    info!("robot vision online, looking for: {}", shapes.join(", "));
    info!("press ESC in the preview window to quit");

    loop {
        let frame = match camera.grab() {
            Ok(frame) => frame,
            Err(CaptureError::FrameRead) => {
                warn!("frame lost, reconnecting");
                camera.reconnect()?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let result = detector.detect(&frame)?;
        if let Some(line) = report::format_detections(&result.detections) {
            println!("{line}");
        }

        window.show(&result.annotated)?;
        if window.poll_key()? == KEY_ESC {
            info!("escape pressed, shutting down");
            break;
        }
    }

    Ok(())
}
