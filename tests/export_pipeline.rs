use eframe_sketchpad::{Canvas, DirectorySink, DownloadSink, ExportFormat, SketchConfig};
use egui::{Color32, Pos2};

#[test]
fn test_jpeg_of_blank_surface_has_no_black() {
    let canvas = Canvas::new(SketchConfig::default(), 32, 24);
    let exported = canvas.export_jpeg().unwrap();
    assert_eq!(exported.file_name, "drawing.jpg");
    assert_eq!(exported.mime_type, "image/jpeg");

    let decoded = image::load_from_memory(&exported.bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (32, 24));
    // Allow for JPEG noise, but nothing may come out dark
    assert!(decoded.pixels().all(|p| p.0.iter().all(|&c| c > 240)));
}

#[test]
fn test_png_is_verbatim() {
    let mut canvas = Canvas::new(SketchConfig::default(), 40, 40);
    canvas.set_color(Color32::from_rgb(10, 120, 200));
    canvas.begin(Pos2::new(5.0, 5.0));
    canvas.extend(Pos2::new(35.0, 35.0));
    canvas.finish().unwrap();

    let exported = canvas.export(ExportFormat::Png).unwrap();
    assert_eq!(exported.file_name, "drawing.png");
    let decoded = image::load_from_memory(&exported.bytes).unwrap().to_rgba8();
    assert_eq!(&decoded, canvas.surface().pixels());
}

#[test]
fn test_export_uses_configured_stem() {
    let config = SketchConfig {
        export_file_stem: "sketch".to_owned(),
        ..Default::default()
    };
    let canvas = Canvas::new(config, 8, 8);
    assert_eq!(canvas.export_png().unwrap().file_name, "sketch.png");
    assert_eq!(canvas.export_jpeg().unwrap().file_name, "sketch.jpg");
}

#[test]
fn test_directory_sink_writes_file() {
    let dir = std::env::temp_dir().join(format!("sketchpad-export-{}", std::process::id()));
    let canvas = Canvas::new(SketchConfig::default(), 8, 8);
    let exported = canvas.export_png().unwrap();

    let mut sink = DirectorySink::new(&dir);
    sink.deliver(&exported).unwrap();

    let written = std::fs::read(dir.join("drawing.png")).unwrap();
    assert_eq!(written, exported.bytes);
    std::fs::remove_dir_all(&dir).unwrap();
}
