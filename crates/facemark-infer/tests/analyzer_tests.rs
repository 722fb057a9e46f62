use facemark_base::Tensor;
use facemark_camera::{Camera, CameraConfig, CapturedImage, PixelFormat, ReplayCamera};
use facemark_image::{Frame, MARKER_COLOR, encode_png};
use facemark_infer::{
    AnalysisResult, AnalyzerConfig, ChannelOrder, InferError, LANDMARK_COUNT, LandmarkAnalyzer,
    Session,
};
use std::collections::HashMap;
use std::path::PathBuf;

/// Returns a fixed landmark tensor and remembers what it was fed.
struct StubSession {
    inputs: Vec<String>,
    outputs: Vec<String>,
    landmarks: Tensor<f32>,
    fail: bool,
    calls: usize,
    last_input: Option<(String, Tensor<f32>)>,
}

impl StubSession {
    fn new(landmarks: Tensor<f32>) -> Self {
        Self {
            inputs: vec!["input".to_string()],
            outputs: vec!["landmarks".to_string(), "score".to_string()],
            landmarks,
            fail: false,
            calls: 0,
            last_input: None,
        }
    }

    fn failing() -> Self {
        let mut session = Self::new(centred_landmarks(LANDMARK_COUNT));
        session.fail = true;
        session
    }
}

impl Session for StubSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        self.calls += 1;
        if self.fail {
            return Err(InferError::BackendError("stub failure".to_string()));
        }
        let (name, tensor) = &inputs[0];
        self.last_input = Some((name.to_string(), tensor.clone()));

        let mut outputs = HashMap::new();
        outputs.insert("landmarks".to_string(), self.landmarks.clone());
        outputs.insert("score".to_string(), Tensor::new(vec![1], vec![0.9]).unwrap());
        Ok(outputs)
    }

    fn input_names(&self) -> &[String] {
        &self.inputs
    }

    fn output_names(&self) -> &[String] {
        &self.outputs
    }
}

fn centred_landmarks(count: usize) -> Tensor<f32> {
    Tensor::new(vec![1, count, 2], vec![0.0; count * 2]).unwrap()
}

fn solid_image(width: usize, height: usize, colour: [u8; 3], rotation: i32) -> CapturedImage {
    let data = colour.repeat(width * height);
    CapturedImage::new(width, height, PixelFormat::Rgb8, data, rotation)
}

fn frames_dir(name: &str, files: &[(&str, Vec<u8>)]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("facemark-analyzer-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    for (file, bytes) in files {
        std::fs::write(dir.join(file), bytes).unwrap();
    }
    dir
}

#[test]
fn test_solid_frame_end_to_end() {
    let mut session = StubSession::new(centred_landmarks(LANDMARK_COUNT));
    let mut results: Vec<AnalysisResult> = Vec::new();

    let mut analyzer = LandmarkAnalyzer::new(&mut session, |result| results.push(result));
    analyzer.analyze(solid_image(640, 480, [0, 200, 0], 90)).unwrap();
    drop(analyzer);

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.frame.width(), 256);
    assert_eq!(result.frame.height(), 256);
    assert_eq!(result.landmarks.len(), LANDMARK_COUNT);
    for landmark in &result.landmarks {
        assert_eq!(landmark.x(), 128.0);
        assert_eq!(landmark.y(), 128.0);
    }

    assert_eq!(result.frame.pixel(128, 128), Some(MARKER_COLOR));
    assert_eq!(result.frame.pixel(130, 128), Some(MARKER_COLOR));
    assert_eq!(result.frame.pixel(131, 128), Some([0, 200, 0]));
    assert_eq!(result.frame.pixel(0, 0), Some([0, 200, 0]));

    assert_eq!(session.calls, 1);
    let (name, input) = session.last_input.as_ref().unwrap();
    assert_eq!(name, "input");
    assert_eq!(input.shape, vec![1, 3, 256, 256]);
    assert_eq!(input.data[0], 0.0);
    assert_eq!(input.data[256 * 256], 200.0);
}

#[test]
fn test_results_are_deterministic() {
    let tensor = Tensor::new(vec![3, 2], vec![-16384.0, 16384.0, 0.0, -32768.0, 100.0, 200.0])
        .unwrap();
    let mut session = StubSession::new(tensor);
    let mut results = Vec::new();

    let mut analyzer = LandmarkAnalyzer::new(&mut session, |result: AnalysisResult| {
        results.push(result.landmarks)
    })
    .with_config(AnalyzerConfig::default().with_expected_landmarks(None));
    analyzer.analyze(solid_image(32, 32, [9, 9, 9], 0)).unwrap();
    analyzer.analyze(solid_image(32, 32, [9, 9, 9], 0)).unwrap();
    drop(analyzer);

    assert_eq!(results[0], results[1]);
    assert_eq!(results[0][0].x(), 64.0);
    assert_eq!(results[0][0].y(), 192.0);
    assert_eq!(results[0][1].y(), 0.0);
}

#[test]
fn test_unsupported_rotation_skips_callback() {
    let mut session = StubSession::new(centred_landmarks(LANDMARK_COUNT));
    let mut called = 0;

    let mut analyzer = LandmarkAnalyzer::new(&mut session, |_| called += 1);
    analyzer.analyze(solid_image(8, 8, [1, 2, 3], 45)).unwrap();
    drop(analyzer);

    assert_eq!(called, 0);
    assert_eq!(session.calls, 0);
}

#[test]
fn test_short_buffer_skips_callback() {
    let mut session = StubSession::new(centred_landmarks(LANDMARK_COUNT));
    let mut called = 0;

    let image = CapturedImage::new(8, 8, PixelFormat::Rgb8, vec![0; 10], 0);
    let mut analyzer = LandmarkAnalyzer::new(&mut session, |_| called += 1);
    analyzer.analyze(image).unwrap();
    drop(analyzer);

    assert_eq!(called, 0);
    assert_eq!(session.calls, 0);
}

#[test]
fn test_inference_error_propagates() {
    let mut session = StubSession::failing();
    let mut called = 0;

    let mut analyzer = LandmarkAnalyzer::new(&mut session, |_| called += 1);
    let result = analyzer.analyze(solid_image(8, 8, [1, 2, 3], 0));
    drop(analyzer);

    match result {
        Err(InferError::BackendError(msg)) => assert_eq!(msg, "stub failure"),
        other => panic!("expected BackendError, got {other:?}"),
    }
    assert_eq!(called, 0);
}

#[test]
fn test_wrong_landmark_count_is_shape_mismatch() {
    let mut session = StubSession::new(centred_landmarks(68));
    let mut called = 0;

    let mut analyzer = LandmarkAnalyzer::new(&mut session, |_| called += 1);
    let result = analyzer.analyze(solid_image(8, 8, [1, 2, 3], 0));
    drop(analyzer);

    assert!(matches!(result, Err(InferError::ShapeMismatch { .. })));
    assert_eq!(called, 0);
}

#[test]
fn test_bad_output_shape_is_shape_mismatch() {
    let mut session = StubSession::new(Tensor::new(vec![212], vec![0.0; 212]).unwrap());
    let mut analyzer = LandmarkAnalyzer::new(&mut session, |_| {});
    let result = analyzer.analyze(solid_image(8, 8, [1, 2, 3], 0));
    assert!(matches!(result, Err(InferError::ShapeMismatch { .. })));
}

#[test]
fn test_truncated_output_buffer_is_shape_mismatch() {
    let truncated = Tensor {
        shape: vec![1, LANDMARK_COUNT, 2],
        data: vec![0.0; 20],
    };
    let mut session = StubSession::new(truncated);
    let mut called = 0;

    let mut analyzer = LandmarkAnalyzer::new(&mut session, |_| called += 1);
    let result = analyzer.analyze(solid_image(8, 8, [1, 2, 3], 0));
    drop(analyzer);

    assert!(matches!(result, Err(InferError::ShapeMismatch { .. })));
    assert_eq!(called, 0);
}

#[test]
fn test_unusable_target_size_is_rejected_before_inference() {
    for size in [0, usize::MAX] {
        let mut session = StubSession::new(centred_landmarks(LANDMARK_COUNT));
        let mut called = 0;

        let mut analyzer = LandmarkAnalyzer::new(&mut session, |_| called += 1)
            .with_config(AnalyzerConfig::default().with_target_size(size));
        let result = analyzer.analyze(solid_image(8, 8, [1, 2, 3], 0));
        drop(analyzer);

        assert!(matches!(result, Err(InferError::InvalidConfig(_))), "size {size}");
        assert_eq!(called, 0);
        assert_eq!(session.calls, 0);
    }
}

#[test]
fn test_output_index_out_of_range() {
    let mut session = StubSession::new(centred_landmarks(LANDMARK_COUNT));
    let mut analyzer = LandmarkAnalyzer::new(&mut session, |_| {})
        .with_config(AnalyzerConfig::default().with_output_index(5));
    let result = analyzer.analyze(solid_image(8, 8, [1, 2, 3], 0));
    assert!(matches!(result, Err(InferError::BackendError(_))));
}

#[test]
fn test_config_controls_pipeline() {
    let mut session = StubSession::new(centred_landmarks(4));
    session.inputs = vec!["mask".to_string(), "pixels".to_string()];
    let mut results = Vec::new();

    let config = AnalyzerConfig::default()
        .with_target_size(64)
        .with_channel_order(ChannelOrder::Bgr)
        .with_input_name("pixels")
        .with_expected_landmarks(Some(4))
        .with_marker_radius(0)
        .with_marker_color([0, 0, 255]);
    let mut analyzer =
        LandmarkAnalyzer::new(&mut session, |result| results.push(result)).with_config(config);
    analyzer.analyze(solid_image(10, 10, [10, 20, 30], 180)).unwrap();
    drop(analyzer);

    let result = &results[0];
    assert_eq!(result.frame.width(), 64);
    assert_eq!(result.landmarks[0].x(), 32.0);
    assert_eq!(result.frame.pixel(32, 32), Some([0, 0, 255]));
    assert_eq!(result.frame.pixel(33, 32), Some([10, 20, 30]));

    let (name, input) = session.last_input.as_ref().unwrap();
    assert_eq!(name, "pixels");
    assert_eq!(input.shape, vec![1, 3, 64, 64]);
    assert_eq!(input.data[0], 30.0);
}

#[tokio::test]
async fn test_malformed_image_is_released() {
    let png = encode_png(&Frame::solid(8, 8, [5, 5, 5]).unwrap()).unwrap();
    let dir = frames_dir(
        "malformed",
        &[("a_broken.png", b"definitely not a png".to_vec()), ("b_good.png", png)],
    );
    let mut camera = ReplayCamera::open(CameraConfig::default().with_source_dir(&dir))
        .await
        .unwrap();
    let mut session = StubSession::new(centred_landmarks(LANDMARK_COUNT));
    let mut called = 0;

    {
        let mut analyzer = LandmarkAnalyzer::new(&mut session, |_| called += 1);
        let image = camera.recv().await.unwrap().unwrap();
        assert!(camera.in_flight());
        analyzer.analyze(image).unwrap();
        assert!(!camera.in_flight());

        let image = camera.recv().await.unwrap().unwrap();
        analyzer.analyze(image).unwrap();
        assert!(!camera.in_flight());
    }
    assert_eq!(called, 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_failed_inference_releases_image() {
    let png = encode_png(&Frame::solid(8, 8, [5, 5, 5]).unwrap()).unwrap();
    let dir = frames_dir("failing", &[("frame.png", png)]);
    let mut camera = ReplayCamera::open(CameraConfig::default().with_source_dir(&dir))
        .await
        .unwrap();
    let mut session = StubSession::failing();

    let mut analyzer = LandmarkAnalyzer::new(&mut session, |_| {});
    let image = camera.recv().await.unwrap().unwrap();
    assert!(analyzer.analyze(image).is_err());
    assert!(!camera.in_flight());

    std::fs::remove_dir_all(&dir).ok();
}
