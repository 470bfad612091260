// File: crates/indicator-core/tests/transition.rs
// Purpose: Validate transition semantics: synchronous bypass, exactly-once
//          completion, and interruption without value commit.

use std::cell::RefCell;
use std::rc::Rc;

use indicator_core::transition::{CompletionCallback, Easing};
use indicator_core::{
    CanvasSize, Category, HeuristicMeasurer, IndicatorRenderer, IndicatorSpec, Scene, Shape,
    TransitionGroup, TransitionOptions,
};

fn completion_log() -> (CompletionCallback, Rc<RefCell<Vec<TransitionGroup>>>) {
    let log: Rc<RefCell<Vec<TransitionGroup>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let cb: CompletionCallback = Rc::new(RefCell::new(move |g: TransitionGroup| {
        sink.borrow_mut().push(g);
    }));
    (cb, log)
}

fn number_text(scene: &Scene, uid: &str) -> String {
    match scene.get(Category::Number, uid) {
        Some(Shape::Text { text, .. }) => text.clone(),
        other => panic!("expected number text node, got {other:?}"),
    }
}

#[test]
fn zero_duration_bypasses_the_state_machine() {
    let mut scene = Scene::new();
    let mut renderer = IndicatorRenderer::new();
    let canvas = CanvasSize::bare(400.0, 300.0);
    let (cb, log) = completion_log();

    let spec = IndicatorSpec::new("a", 100.0).with_range(0.0, 200.0);
    let opts = TransitionOptions { duration_ms: 0.0, easing: Easing::Linear };
    renderer.render(&mut scene, &canvas, &[spec], &HeuristicMeasurer, Some(&opts), Some(cb));

    assert_eq!(number_text(&scene, "a"), "100");
    assert!(!renderer.is_animating());
    assert!(log.borrow().is_empty(), "bypass path schedules no completions");
    assert_eq!(renderer.trace_state("a").unwrap().last_value, 100.0);
}

#[test]
fn animated_render_completes_once_and_commits() {
    let mut scene = Scene::new();
    let mut renderer = IndicatorRenderer::new();
    let canvas = CanvasSize::bare(400.0, 300.0);
    let (cb, log) = completion_log();

    let spec = IndicatorSpec::new("a", 100.0).with_range(0.0, 200.0);
    let opts = TransitionOptions { duration_ms: 500.0, easing: Easing::Linear };
    renderer.render(&mut scene, &canvas, &[spec], &HeuristicMeasurer, Some(&opts), Some(cb));

    // animation source is the committed value, 0 on first render
    assert_eq!(number_text(&scene, "a"), "0");
    assert!(renderer.is_animating());
    assert_eq!(renderer.trace_state("a").unwrap().last_value, 0.0);

    renderer.advance(&mut scene, 0.0);
    renderer.advance(&mut scene, 250.0);
    assert_eq!(number_text(&scene, "a"), "50");
    assert!(log.borrow().is_empty(), "not complete yet");

    renderer.advance(&mut scene, 600.0);
    assert_eq!(number_text(&scene, "a"), "100");
    assert_eq!(renderer.trace_state("a").unwrap().last_value, 100.0);
    assert_eq!(log.borrow().as_slice(), &[TransitionGroup::Number]);

    // further frames are inert
    renderer.advance(&mut scene, 700.0);
    assert_eq!(log.borrow().len(), 1);
    assert!(!renderer.is_animating());
}

#[test]
fn interruption_fires_completion_without_committing() {
    let mut scene = Scene::new();
    let mut renderer = IndicatorRenderer::new();
    let canvas = CanvasSize::bare(400.0, 300.0);
    let (cb, log) = completion_log();

    let spec = IndicatorSpec::new("a", 100.0).with_range(0.0, 200.0);
    let opts = TransitionOptions { duration_ms: 500.0, easing: Easing::Linear };
    renderer.render(
        &mut scene,
        &canvas,
        &[spec.clone()],
        &HeuristicMeasurer,
        Some(&opts),
        Some(cb.clone()),
    );
    renderer.advance(&mut scene, 0.0);
    renderer.advance(&mut scene, 250.0);
    assert_eq!(number_text(&scene, "a"), "50");

    // a new render supersedes the in-flight transition
    let superseding = IndicatorSpec::new("a", 60.0).with_range(0.0, 200.0);
    renderer.render(
        &mut scene,
        &canvas,
        &[superseding],
        &HeuristicMeasurer,
        Some(&opts),
        Some(cb),
    );
    assert_eq!(
        log.borrow().as_slice(),
        &[TransitionGroup::Number],
        "interrupted transition still completed exactly once"
    );
    // the mid-flight value was never committed: the new animation sources
    // from the last committed value, 0
    assert_eq!(renderer.trace_state("a").unwrap().last_value, 0.0);
    assert_eq!(number_text(&scene, "a"), "0");

    renderer.advance(&mut scene, 1000.0);
    renderer.advance(&mut scene, 1600.0);
    assert_eq!(number_text(&scene, "a"), "60");
    assert_eq!(renderer.trace_state("a").unwrap().last_value, 60.0);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn each_group_completes_independently() {
    let mut scene = Scene::new();
    let mut renderer = IndicatorRenderer::new();
    let canvas = CanvasSize::bare(400.0, 300.0);
    let (cb, log) = completion_log();

    let spec = IndicatorSpec::new("a", 80.0)
        .with_mode("number+delta+gauge")
        .with_range(0.0, 100.0)
        .with_gauge(Default::default())
        .with_delta_reference(50.0);
    let opts = TransitionOptions { duration_ms: 200.0, easing: Easing::CubicInOut };
    renderer.render(&mut scene, &canvas, &[spec], &HeuristicMeasurer, Some(&opts), Some(cb));

    renderer.advance(&mut scene, 0.0);
    renderer.advance(&mut scene, 300.0);
    let groups = log.borrow().clone();
    assert_eq!(groups.len(), 3, "number, delta, and gauge each complete once");
    assert!(groups.contains(&TransitionGroup::Number));
    assert!(groups.contains(&TransitionGroup::Delta));
    assert!(groups.contains(&TransitionGroup::GaugeValue));

    let state = renderer.trace_state("a").unwrap();
    assert_eq!(state.last_value, 80.0);
    assert_eq!(state.last_delta_value, 30.0);
}

#[test]
fn delta_animates_from_committed_delta() {
    let mut scene = Scene::new();
    let mut renderer = IndicatorRenderer::new();
    let canvas = CanvasSize::bare(400.0, 300.0);

    // first render commits synchronously: value 70, reference 50 -> delta 20
    let first = IndicatorSpec::new("a", 70.0)
        .with_mode("number+delta")
        .with_range(0.0, 100.0)
        .with_delta_reference(50.0);
    renderer.render(&mut scene, &canvas, &[first.clone()], &HeuristicMeasurer, None, None);
    assert_eq!(renderer.trace_state("a").unwrap().last_delta_value, 20.0);

    // animated render toward delta 40 starts from the committed 20
    let mut second = first;
    second.value = 90.0;
    let opts = TransitionOptions { duration_ms: 100.0, easing: Easing::Linear };
    renderer.render(&mut scene, &canvas, &[second], &HeuristicMeasurer, Some(&opts), None);
    let Some(Shape::Text { text, .. }) = scene.get(Category::Delta, "a") else {
        panic!("expected delta node");
    };
    assert_eq!(text, "\u{25b2}20");

    renderer.advance(&mut scene, 0.0);
    renderer.advance(&mut scene, 50.0);
    let Some(Shape::Text { text, .. }) = scene.get(Category::Delta, "a") else {
        panic!("expected delta node");
    };
    assert_eq!(text, "\u{25b2}30");
}
