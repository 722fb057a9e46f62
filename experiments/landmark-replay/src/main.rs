mod settings;

use facemark_base::{init_file_logger, init_stdout_logger, log_fatal};
use facemark_camera::{Camera, CameraConfig, ReplayCamera};
use facemark_image::encode_png;
use facemark_infer::{AnalysisResult, Backend, Device, LandmarkAnalyzer, ModelSource, OnnxBackend};
use settings::Settings;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

async fn write_result(
    dir: &Path,
    index: usize,
    result: &AnalysisResult,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join(format!("landmarks_{index:05}.png"));
    tokio::fs::write(&path, encode_png(&result.frame)?).await?;
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    match &settings.log_dir {
        Some(dir) => init_file_logger(dir.clone())?,
        None => init_stdout_logger(),
    }

    log::info!("model: {}", settings.model_path.display());
    log::info!("frames: {}", settings.frames_dir.display());
    log::info!("output: {}", settings.output_dir.display());

    tokio::fs::create_dir_all(&settings.output_dir).await?;

    let camera_config = CameraConfig::default()
        .with_source_dir(settings.frames_dir.clone())
        .with_rotation_degrees(settings.rotation_degrees)
        .with_looping(settings.looping)
        .with_max_frames(settings.max_frames);
    let mut camera = ReplayCamera::open(camera_config).await?;

    let backend = OnnxBackend::new(Device::Cpu);
    let mut session = match backend.load_model(ModelSource::File(settings.model_path.clone())) {
        Ok(session) => session,
        Err(e) => log_fatal!("unable to load landmark model: {e}"),
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut analyzer = LandmarkAnalyzer::new(session.as_mut(), move |result| {
        // receiver lives until the end of main
        let _ = tx.send(result);
    });

    let mut frames = 0usize;
    let mut failed = 0usize;
    let mut written = 0usize;
    while let Some(image) = camera.recv().await? {
        if let Err(e) = analyzer.analyze(image) {
            log::error!("frame {frames}: {e}");
            failed += 1;
        }
        frames += 1;

        while let Ok(result) = rx.try_recv() {
            match write_result(&settings.output_dir, written, &result).await {
                Ok(path) => log::info!(
                    "{}: {} landmarks, inference {:?}",
                    path.display(),
                    result.landmarks.len(),
                    result.process_time
                ),
                Err(e) => log::error!("unable to write result {written}: {e}"),
            }
            written += 1;
        }
    }

    drop(analyzer);
    drop(session);

    log::info!("done: {frames} frames, {written} annotated, {failed} failed");
    Ok(())
}
