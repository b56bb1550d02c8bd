use eframe_sketchpad::{Canvas, CanvasError, SketchConfig, ToolMode};
use egui::{Color32, Pos2};

fn blank_canvas() -> Canvas {
    Canvas::new(SketchConfig::default(), 100, 100)
}

// Draw a straight stroke and commit it
fn draw(canvas: &mut Canvas, from: (f32, f32), to: (f32, f32)) {
    canvas.begin(Pos2::new(from.0, from.1));
    canvas.extend(Pos2::new(to.0, to.1));
    assert!(canvas.finish().unwrap());
}

#[test]
fn test_single_stroke_undo_redo() {
    let mut canvas = blank_canvas();
    canvas.set_color(Color32::BLACK);
    canvas.set_pencil_width(5);

    draw(&mut canvas, (10.0, 10.0), (10.0, 50.0));
    assert_eq!(canvas.history_len(), 1);
    assert_eq!(canvas.step(), 1);
    let drawn = canvas.surface().pixels().clone();
    assert_eq!(canvas.surface().pixel(10, 30).unwrap().0, [0, 0, 0, 255]);

    assert!(canvas.undo_now().unwrap());
    assert!(canvas.surface().is_blank());
    assert_eq!(canvas.step(), 0);

    assert!(canvas.redo_now().unwrap());
    assert_eq!(canvas.surface().pixels(), &drawn);
    assert_eq!(canvas.step(), 1);
}

#[test]
fn test_undo_all_strokes_returns_to_blank() {
    let mut canvas = blank_canvas();
    let n = 4;
    for i in 0..n {
        let x = 10.0 + 20.0 * i as f32;
        draw(&mut canvas, (x, 5.0), (x, 90.0));
    }
    for _ in 0..n {
        assert!(canvas.undo_now().unwrap());
    }
    assert!(canvas.surface().is_blank());
    assert_eq!(canvas.step(), 0);

    // Further undo is a silent no-op
    assert!(!canvas.undo_now().unwrap());
    assert!(canvas.undo().unwrap().is_none());
}

#[test]
fn test_undo_redo_round_trip() {
    let n = 5;
    for k in 0..=n {
        let mut canvas = blank_canvas();
        for i in 0..n {
            let y = 10.0 + 15.0 * i as f32;
            draw(&mut canvas, (5.0, y), (95.0, y));
        }
        let final_state = canvas.surface().pixels().clone();

        for _ in 0..k {
            canvas.undo_now().unwrap();
        }
        assert_eq!(canvas.step(), n - k);
        for _ in 0..k {
            canvas.redo_now().unwrap();
        }
        assert_eq!(canvas.step(), n);
        assert_eq!(canvas.surface().pixels(), &final_state, "k = {k}");
    }
}

#[test]
fn test_undo_restores_intermediate_state() {
    let mut canvas = blank_canvas();
    draw(&mut canvas, (10.0, 10.0), (90.0, 10.0));
    let after_first = canvas.surface().pixels().clone();
    draw(&mut canvas, (10.0, 50.0), (90.0, 50.0));

    canvas.undo_now().unwrap();
    assert_eq!(canvas.surface().pixels(), &after_first);
}

#[test]
fn test_commit_after_undo_discards_redo_branch() {
    let mut canvas = blank_canvas();
    draw(&mut canvas, (10.0, 10.0), (90.0, 10.0)); // A
    draw(&mut canvas, (10.0, 30.0), (90.0, 30.0)); // B
    canvas.undo_now().unwrap();
    draw(&mut canvas, (10.0, 60.0), (90.0, 60.0)); // C

    assert_eq!(canvas.history_len(), 2);
    assert_eq!(canvas.step(), 2);
    assert!(!canvas.can_redo());
    assert!(canvas.redo().unwrap().is_none());

    // B is gone from the pixels, A and C remain
    assert_eq!(canvas.surface().pixel(50, 30).unwrap().0[3], 0);
    assert_eq!(canvas.surface().pixel(50, 10).unwrap().0[3], 255);
    assert_eq!(canvas.surface().pixel(50, 60).unwrap().0[3], 255);
}

#[test]
fn test_commit_after_multiple_undos() {
    let mut canvas = blank_canvas();
    for i in 0..4 {
        let y = 10.0 + 20.0 * i as f32;
        draw(&mut canvas, (5.0, y), (95.0, y));
    }
    for _ in 0..3 {
        canvas.undo_now().unwrap();
    }
    draw(&mut canvas, (50.0, 5.0), (50.0, 95.0));
    assert_eq!(canvas.history_len(), 2);
    assert!(!canvas.redo_now().unwrap());
}

#[test]
fn test_clear_is_not_undoable() {
    let mut canvas = blank_canvas();
    draw(&mut canvas, (10.0, 10.0), (90.0, 90.0));
    draw(&mut canvas, (90.0, 10.0), (10.0, 90.0));

    canvas.clear();
    assert_eq!(canvas.step(), 0);
    assert_eq!(canvas.history_len(), 0);
    assert!(canvas.surface().is_blank());

    assert!(!canvas.undo_now().unwrap());
    assert!(canvas.surface().is_blank());
}

#[test]
fn test_eraser_paints_background() {
    let mut canvas = blank_canvas();
    canvas.set_pencil_width(10);
    draw(&mut canvas, (10.0, 50.0), (90.0, 50.0));

    canvas.set_mode(ToolMode::Eraser);
    canvas.set_eraser_width(10);
    draw(&mut canvas, (50.0, 40.0), (50.0, 60.0));

    assert_eq!(canvas.surface().pixel(50, 50).unwrap().0, [255, 255, 255, 255]);
    assert_eq!(canvas.surface().pixel(20, 50).unwrap().0, [0, 0, 0, 255]);
    assert_eq!(canvas.history_len(), 2);
}

#[test]
fn test_tool_switch_preserves_pencil_settings() {
    let mut canvas = blank_canvas();
    canvas.set_color(Color32::from_rgb(200, 30, 60));
    canvas.set_pencil_width(7);

    canvas.set_mode(ToolMode::Eraser);
    canvas.set_eraser_width(40);
    canvas.set_mode(ToolMode::Pencil);

    assert_eq!(canvas.tools().pencil_color(), Color32::from_rgb(200, 30, 60));
    assert_eq!(canvas.tools().pencil_width(), 7);
    assert_eq!(canvas.tools().eraser_width(), 40);
}

#[test]
fn test_width_change_mid_stroke_applies_to_next_stroke() {
    let mut canvas = blank_canvas();
    canvas.set_pencil_width(2);
    canvas.begin(Pos2::new(10.0, 10.0));
    canvas.set_pencil_width(30);
    canvas.extend(Pos2::new(10.0, 90.0));
    canvas.finish().unwrap();

    // Width 2 covers only pixels right next to the line
    assert_eq!(canvas.surface().pixel(20, 50).unwrap().0[3], 0);
    assert_eq!(canvas.tools().pencil_width(), 30);
}

#[test]
fn test_resize_discards_stroke_and_history() {
    let mut canvas = blank_canvas();
    draw(&mut canvas, (10.0, 10.0), (90.0, 90.0));
    canvas.begin(Pos2::new(20.0, 20.0));
    canvas.extend(Pos2::new(30.0, 30.0));

    canvas.resize(egui::vec2(200.0, 100.0));
    assert_eq!(canvas.surface().size(), (180, 60));
    assert!(canvas.surface().is_blank());
    assert!(!canvas.is_drawing());
    assert_eq!(canvas.history_len(), 0);

    // The pointer-up belonging to the discarded stroke is ignored
    assert!(!canvas.finish().unwrap());
    assert_eq!(canvas.history_len(), 0);
}

#[test]
fn test_stale_restore_after_resize_is_dropped() {
    let mut canvas = blank_canvas();
    draw(&mut canvas, (10.0, 10.0), (90.0, 90.0));
    let request = canvas.undo().unwrap().unwrap();

    canvas.resize_surface(40, 40);
    assert!(!canvas.complete_restore(request.decode()).unwrap());
    assert_eq!(canvas.surface().size(), (40, 40));
    assert_eq!(canvas.step(), 0);
}

#[test]
fn test_history_requests_are_serialized() {
    let mut canvas = blank_canvas();
    draw(&mut canvas, (10.0, 10.0), (90.0, 10.0));
    draw(&mut canvas, (10.0, 30.0), (90.0, 30.0));

    let first = canvas.undo().unwrap().unwrap();
    assert!(matches!(canvas.undo(), Err(CanvasError::RestoreInFlight)));
    assert!(!canvas.can_undo());

    canvas.complete_restore(first.decode()).unwrap();
    assert_eq!(canvas.step(), 1);
    assert!(canvas.undo().unwrap().is_some());
}

#[test]
fn test_decode_on_worker_thread() {
    let mut canvas = blank_canvas();
    draw(&mut canvas, (10.0, 10.0), (90.0, 10.0));
    draw(&mut canvas, (10.0, 30.0), (90.0, 30.0));

    let request = canvas.undo().unwrap().unwrap();
    let (tx, rx) = futures::channel::oneshot::channel();
    let worker = std::thread::spawn(move || {
        let _ = tx.send(request.decode());
    });
    let decoded = futures::executor::block_on(rx).unwrap();
    worker.join().unwrap();

    assert!(canvas.complete_restore(decoded).unwrap());
    assert_eq!(canvas.step(), 1);
    assert_eq!(canvas.surface().pixel(50, 30).unwrap().0[3], 0);
}
