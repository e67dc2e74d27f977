use super::*;

fn secs(v: f64) -> AnimationDuration {
    AnimationDuration::new(v).unwrap()
}

#[test]
fn records_calls_with_host_time() {
    let mut r = RecordingRenderer::new();
    let root = r.resolve_root("#container").unwrap().handle;
    r.advance_clock(Duration::from_millis(5));

    let c = r.create_container(secs(0.25)).unwrap();
    let v = r.create_visual(c, "thin-colorful-streak", 10, 90, 0.5).unwrap();
    r.attach(root, c).unwrap();
    r.set_playing(c, true).unwrap();

    assert!(r.is_attached(c));
    assert!(r.is_playing(c));
    assert_eq!(r.attached_count(), 1);
    assert_eq!(r.events().len(), 4);
    assert!(r.events().iter().all(|(t, _)| *t == Duration::from_millis(5)));
    assert_eq!(
        r.events()[0].1,
        RenderEvent::CreateContainer {
            container: c,
            duration_ms: 250
        }
    );
    assert_eq!(
        r.events()[1].1,
        RenderEvent::CreateVisual {
            container: c,
            visual: v,
            render_class: "thin-colorful-streak".to_string(),
            left: 10,
            top: 90,
            rotation: 0.5,
        }
    );
}

#[test]
fn detach_is_idempotent_and_counted() {
    let mut r = RecordingRenderer::new();
    let root = r.resolve_root("#container").unwrap().handle;
    let c = r.create_container(secs(0.3)).unwrap();
    r.attach(root, c).unwrap();

    r.detach(root, c).unwrap();
    r.detach(root, c).unwrap();
    assert!(!r.is_attached(c));
    assert_eq!(r.redundant_detaches(), 1);
    assert_eq!(r.retained_containers(), 0);
    assert_eq!(
        r.events().last().unwrap().1,
        RenderEvent::Detach {
            container: c,
            was_attached: false
        }
    );
}

#[test]
fn unknown_handles_are_render_errors() {
    let mut r = RecordingRenderer::new();
    let root = r.resolve_root("#container").unwrap().handle;
    let bogus = ContainerHandle(999);
    assert!(matches!(
        r.create_visual(bogus, "x", 0, 0, 0.0),
        Err(WarpError::Render(_))
    ));
    assert!(r.attach(root, bogus).is_err());
    assert!(r.set_playing(bogus, true).is_err());

    let c = r.create_container(secs(0.3)).unwrap();
    assert!(r.attach(RootHandle(7), c).is_err());
    assert!(matches!(r.detach(root, bogus), Err(WarpError::Render(_))));
}

#[test]
fn event_log_can_be_disabled() {
    let mut r = RecordingRenderer::new().without_event_log();
    let root = r.resolve_root("#container").unwrap().handle;
    let c = r.create_container(secs(0.3)).unwrap();
    r.attach(root, c).unwrap();
    assert!(r.events().is_empty());
    assert_eq!(r.attached_count(), 1);
}

#[test]
fn events_serialize_with_an_op_tag() {
    let json = serde_json::to_value(RenderEvent::Attach {
        container: ContainerHandle(3),
    })
    .unwrap();
    assert_eq!(json["op"], "attach");
    assert_eq!(json["container"], 3);
}
