use cubeview::{Axis, InputEvent, Mat4, StateChange, Vec3, Viewer, ViewerConfig};

const EPS: f32 = 1e-5;

fn viewer(width: u32, height: u32) -> Viewer {
    Viewer::new(ViewerConfig::default(), width, height).unwrap()
}

fn ndc(frame: &cubeview::Frame, p: Vec3) -> [f32; 3] {
    let world = frame.model.transform([p.x, p.y, p.z, 1.0]);
    let [x, y, z, w] = frame.view.transform(world);
    [x / w, y / w, z / w]
}

#[test]
fn view_matrix_matches_hand_computed_reference() {
    // 2:1 window at the default distance of 2.0
    let viewer = viewer(800, 400);
    assert_eq!(viewer.view().z(), 2.0);

    let cot = 1.0 / 0.7f32.tan();
    let a = (6.0 + 0.5) / (6.0 - 0.5);
    let b = -2.0 * 6.0 * 0.5 / (6.0 - 0.5);
    #[rustfmt::skip]
    let expected = [
        cot, 0.0,       0.0,         0.0,
        0.0, 2.0 * cot, 0.0,         0.0,
        0.0, 0.0,       a,           1.0,
        0.0, 0.0,       2.0 * a + b, 2.0,
    ];

    let actual = viewer.current_frame().view;
    for (i, (got, want)) in actual.as_array().iter().zip(expected).enumerate() {
        assert!((got - want).abs() < EPS, "cell {i}: got {got}, want {want}");
    }
}

#[test]
fn zoom_saturates_through_dispatch() {
    let mut viewer = viewer(800, 600);
    for _ in 0..50 {
        viewer.dispatch(InputEvent::ScrollDown).unwrap();
    }
    assert_eq!(viewer.view().z(), 5.0);
    assert_eq!(
        viewer.dispatch(InputEvent::ScrollDown).unwrap(),
        StateChange::None
    );

    for _ in 0..50 {
        viewer.dispatch(InputEvent::ScrollUp).unwrap();
    }
    assert_eq!(viewer.view().z(), 1.5);
    assert_eq!(viewer.dispatch(InputEvent::ScrollUp).unwrap(), StateChange::None);
}

#[test]
fn drag_then_tick() {
    let mut viewer = viewer(800, 600);
    viewer.dispatch(InputEvent::PointerDown { x: 100, y: 100 }).unwrap();
    viewer.dispatch(InputEvent::PointerMove { x: 150, y: 100 }).unwrap();
    assert_eq!(viewer.model().axis().direction(), Vec3::Y);

    let before = viewer.model().angle();
    let frame = viewer.frame();
    assert!((viewer.model().angle() - before - 0.01).abs() < 1e-7);
    let angle = viewer.model().angle() as f32;
    assert_eq!(frame.model, Mat4::rotate(viewer.model().axis(), angle));
}

#[test]
fn front_face_follows_the_drag() {
    let front = Vec3::new(0.0, 0.0, -0.5);

    let mut right = viewer(800, 800);
    right.dispatch(InputEvent::PointerDown { x: 100, y: 100 }).unwrap();
    right.dispatch(InputEvent::PointerMove { x: 160, y: 100 }).unwrap();
    let [x, y, _] = ndc(&right.frame(), front);
    assert!(x > 0.0 && y.abs() < EPS, "({x}, {y})");

    let mut up = viewer(800, 800);
    up.dispatch(InputEvent::PointerDown { x: 100, y: 100 }).unwrap();
    up.dispatch(InputEvent::PointerMove { x: 100, y: 160 }).unwrap();
    let [x, y, _] = ndc(&up.frame(), front);
    assert!(y > 0.0 && x.abs() < EPS, "({x}, {y})");
}

#[test]
fn spin_continues_after_release() {
    let mut viewer = viewer(800, 600);
    viewer.dispatch(InputEvent::PointerDown { x: 0, y: 0 }).unwrap();
    viewer.dispatch(InputEvent::PointerMove { x: 0, y: 9 }).unwrap();
    viewer.dispatch(InputEvent::PointerUp).unwrap();
    let axis = viewer.model().axis();

    viewer.dispatch(InputEvent::PointerMove { x: 500, y: 500 }).unwrap();
    let first = viewer.frame();
    let second = viewer.frame();
    assert_eq!(viewer.model().axis(), axis);
    assert_ne!(first.model, second.model);
}

#[test]
fn animation_speed_follows_frame_count() {
    let mut slow = viewer(800, 600);
    let mut fast = viewer(800, 600);
    for _ in 0..10 {
        slow.frame();
    }
    for _ in 0..20 {
        fast.frame();
    }
    assert!((slow.model().angle() - 0.1).abs() < 1e-5);
    assert!((fast.model().angle() - 0.2).abs() < 1e-5);
}

#[test]
fn viewers_are_independent() {
    let mut a = viewer(800, 600);
    let b = viewer(800, 600);
    a.dispatch(InputEvent::ScrollDown).unwrap();
    a.frame();
    assert_eq!(b.view().z(), 2.0);
    assert_eq!(b.model().angle(), 0.0);
    assert_eq!(b.current_frame().model, Mat4::IDENTITY);
}

#[test]
fn zero_axis_cannot_reach_rotate() {
    assert!(Axis::try_from(Vec3::new(0.0, 0.0, 0.0)).is_err());

    let mut viewer = viewer(800, 600);
    viewer.dispatch(InputEvent::PointerDown { x: 5, y: 5 }).unwrap();
    assert_eq!(
        viewer.dispatch(InputEvent::PointerMove { x: 5, y: 5 }).unwrap(),
        StateChange::None
    );
    let frame = viewer.frame();
    assert!(frame.model.as_array().iter().all(|c| c.is_finite()));
    assert_eq!(viewer.model().axis(), Axis::Y);
}

#[test]
fn configured_parameters_flow_into_matrices() {
    let config = ViewerConfig::from_toml("fov = 0.5\nnear = 1.0\nfar = 3.0\nspin_step = 0.05\n")
        .unwrap();
    let mut viewer = Viewer::new(config, 100, 100).unwrap();
    let view = viewer.current_frame().view;
    assert!((view.get(0, 0) - 1.0 / 0.5f32.tan()).abs() < EPS);
    assert!((view.get(2, 2) - 2.0).abs() < EPS);

    viewer.frame();
    assert!((viewer.model().angle() - 0.05).abs() < 1e-7);
}

#[test]
fn narrowed_zoom_range_moves_the_start_distance() {
    let config = ViewerConfig::from_toml("zoom_min = 2.5\nzoom_max = 4.0\n").unwrap();
    let viewer = Viewer::new(config, 800, 600).unwrap();
    assert_eq!(viewer.view().z(), 2.5);
}
