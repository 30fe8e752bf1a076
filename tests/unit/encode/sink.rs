use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::default(),
        total_frames: 3,
    }
}

#[test]
fn in_memory_sink_keeps_push_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    for i in 1..=3 {
        let frame = RgbaImage::from_pixel(2, 2, image::Rgba([i as u8, 0, 0, 255]));
        sink.push_frame(FrameIndex(i), &frame).unwrap();
    }
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(cfg()));
    let reds: Vec<u8> = sink.frames().iter().map(|(_, f)| f.get_pixel(0, 0)[0]).collect();
    assert_eq!(reds, vec![1, 2, 3]);
}

#[test]
fn gaps_and_repeats_are_rejected() {
    let frame = RgbaImage::new(2, 2);
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    assert!(sink.push_frame(FrameIndex(2), &frame).is_err());
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    assert!(sink.push_frame(FrameIndex(1), &frame).is_err());
    assert!(sink.push_frame(FrameIndex(3), &frame).is_err());
}

#[test]
fn begin_restarts_numbering() {
    let frame = RgbaImage::new(2, 2);
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
    sink.push_frame(FrameIndex(1), &frame).unwrap();
}

#[test]
fn guard_counts_written_frames() {
    let mut guard = SequenceGuard::default();
    assert_eq!(guard.written(), 0);
    guard.accept(FrameIndex(1)).unwrap();
    guard.accept(FrameIndex(2)).unwrap();
    assert_eq!(guard.written(), 2);
}
