use super::*;

fn frame(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: vec![255; (width * height * 4) as usize],
        premultiplied: false,
    }
}

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(30, 1).unwrap(),
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("warpstreak-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn in_memory_sink_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2, 2)).unwrap();
    sink.push_frame(FrameIndex(0), &frame(2, 2)).unwrap();
    sink.push_frame(FrameIndex(1), &frame(2, 2)).unwrap();
    assert!(!sink.is_ended());
    sink.end().unwrap();

    assert!(sink.is_ended());
    assert_eq!(sink.config(), Some(cfg(2, 2)));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].0, FrameIndex(1));
}

#[test]
fn png_sink_writes_numbered_files() {
    let dir = scratch_dir("png");
    let mut sink = PngDirSink::new(&dir);
    sink.begin(cfg(4, 3)).unwrap();
    sink.push_frame(FrameIndex(0), &frame(4, 3)).unwrap();
    sink.push_frame(FrameIndex(1), &frame(4, 3)).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written(), 2);
    assert_eq!(sink.dir(), dir.as_path());
    let path = sink.frame_path(FrameIndex(1));
    assert!(path.ends_with("frame_00001.png"));
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (4, 3));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn png_sink_rejects_misuse() {
    let dir = scratch_dir("misuse");
    let mut sink = PngDirSink::new(&dir);
    assert!(matches!(
        sink.push_frame(FrameIndex(0), &frame(4, 3)),
        Err(WarpError::Validation(_))
    ));

    sink.begin(cfg(4, 3)).unwrap();
    assert!(sink.push_frame(FrameIndex(0), &frame(3, 3)).is_err());
    assert_eq!(sink.written(), 0);

    std::fs::remove_dir_all(&dir).unwrap();
}
