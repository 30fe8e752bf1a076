use super::*;
use crate::foundation::core::Fps;

fn cfg(total_frames: u64) -> SinkConfig {
    SinkConfig {
        width: 3,
        height: 2,
        fps: Fps::default(),
        total_frames,
    }
}

#[test]
fn writes_numbered_pngs_starting_at_one() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("frames");
    let mut sink = PngSequenceSink::new(&dir);
    let frame = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));

    sink.begin(cfg(2)).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    sink.push_frame(FrameIndex(2), &frame).unwrap();
    sink.end().unwrap();

    assert!(dir.join("1.png").is_file());
    assert!(dir.join("2.png").is_file());
    let back = image::open(dir.join("2.png")).unwrap().to_rgba8();
    assert_eq!(back, frame);
}

#[test]
fn begin_clears_stale_frames() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("frames");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("7.png"), b"stale").unwrap();

    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg(1)).unwrap();
    assert!(!dir.join("7.png").exists());
}

#[test]
fn short_sequence_fails_at_end() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = PngSequenceSink::new(tmp.path().join("f"));
    let frame = RgbaImage::new(3, 2);
    sink.begin(cfg(3)).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    assert!(sink.end().is_err());
}

#[test]
fn mismatched_frame_size_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = PngSequenceSink::new(tmp.path().join("f"));
    sink.begin(cfg(1)).unwrap();
    assert!(sink.push_frame(FrameIndex(1), &RgbaImage::new(2, 2)).is_err());
}

#[test]
fn push_before_begin_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = PngSequenceSink::new(tmp.path().join("f"));
    assert!(sink.push_frame(FrameIndex(1), &RgbaImage::new(3, 2)).is_err());
}
