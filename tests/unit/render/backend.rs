use super::*;
use crate::render::recording::RecordingRenderer;

#[test]
fn outer_container_captures_root_and_perspective() {
    let mut renderer = RecordingRenderer::with_root("#warp", Some(800.0));
    let outer = OuterContainer::initialize(&mut renderer, "#warp").unwrap();
    assert_eq!(outer.root(), RootHandle(0));
    assert_eq!(outer.perspective(), Some(800.0));
}

#[test]
fn missing_root_is_a_precondition_failure() {
    let mut renderer = RecordingRenderer::without_root();
    let err = OuterContainer::initialize(&mut renderer, "#container").unwrap_err();
    assert!(matches!(err, WarpError::Precondition(_)));
    assert!(err.to_string().contains("#container"));

    let mut renderer = RecordingRenderer::new();
    assert!(OuterContainer::initialize(&mut renderer, "#other").is_err());
}

#[test]
fn boxed_renderers_forward_calls() {
    let mut boxed: Box<dyn Renderer> = Box::new(RecordingRenderer::new());
    let outer = OuterContainer::initialize(&mut boxed, "#container").unwrap();
    let c = boxed
        .create_container(AnimationDuration::new(0.3).unwrap())
        .unwrap();
    boxed.attach(outer.root(), c).unwrap();
    boxed.detach(outer.root(), c).unwrap();
    boxed.detach(outer.root(), c).unwrap();
}
