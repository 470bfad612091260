// File: crates/indicator-core/src/transition.rs
// Summary: Per-element-group value transition state machine with an
//          exactly-once completion guarantee.

use std::cell::RefCell;
use std::rc::Rc;

/// Which animatable element group a transition belongs to. Each group runs
/// its own independent state machine; groups are started together but not
/// otherwise synchronized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionGroup {
    Number,
    Delta,
    GaugeValue,
}

/// Shared completion sink, invoked once per started transition (natural end
/// or interruption).
pub type CompletionCallback = Rc<RefCell<dyn FnMut(TransitionGroup)>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    CubicIn,
    CubicOut,
    CubicInOut,
}

impl Easing {
    /// Map normalized progress `t` in [0, 1] to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionOptions {
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self { duration_ms: 500.0, easing: Easing::CubicInOut }
    }
}

/// Interpolated value emitted by the animation clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub value: f64,
    /// True exactly once, on natural completion. The caller commits the
    /// target value into `RenderState` when it sees this.
    pub done: bool,
}

enum State {
    Idle,
    Animating {
        from: f64,
        to: f64,
        /// Stamped by the first `advance` so the clock origin is the frame
        /// the animation actually starts on.
        start_ms: Option<f64>,
        duration_ms: f64,
        easing: Easing,
        on_complete: Option<CompletionCallback>,
    },
    /// Cancelled before completion; the callback has already fired and the
    /// target value was never committed.
    Interrupted,
}

/// One group's transition. `begin` supersedes any in-flight animation,
/// firing its callback synchronously first, so every started transition
/// completes exactly once.
pub struct Transition {
    group: TransitionGroup,
    state: State,
}

impl Transition {
    pub fn new(group: TransitionGroup) -> Self {
        Self { group, state: State::Idle }
    }

    pub fn group(&self) -> TransitionGroup {
        self.group
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, State::Animating { .. })
    }

    /// Start interpolating from `from` to `to`. Any in-flight transition is
    /// interrupted first (callback fired, value not committed).
    pub fn begin(
        &mut self,
        from: f64,
        to: f64,
        opts: &TransitionOptions,
        on_complete: Option<CompletionCallback>,
    ) {
        self.cancel();
        self.state = State::Animating {
            from,
            to,
            start_ms: None,
            duration_ms: opts.duration_ms.max(0.0),
            easing: opts.easing,
            on_complete,
        };
    }

    /// Interrupt an in-flight transition. Fires its completion callback
    /// synchronously so callers awaiting completion are never left hanging;
    /// the target value is not committed.
    pub fn cancel(&mut self) {
        if let State::Animating { on_complete, .. } = &mut self.state {
            let cb = on_complete.take();
            self.state = State::Interrupted;
            if let Some(cb) = cb {
                (cb.borrow_mut())(self.group);
            }
        }
    }

    /// One animation-clock tick. Returns the interpolated sample while
    /// animating; `done` marks natural completion, after which the machine
    /// is idle again.
    pub fn advance(&mut self, now_ms: f64) -> Option<Sample> {
        match &mut self.state {
            State::Idle => None,
            State::Interrupted => {
                self.state = State::Idle;
                None
            }
            State::Animating { from, to, start_ms, duration_ms, easing, on_complete } => {
                let start = *start_ms.get_or_insert(now_ms);
                let t = if *duration_ms <= 0.0 {
                    1.0
                } else {
                    ((now_ms - start) / *duration_ms).clamp(0.0, 1.0)
                };
                if t >= 1.0 {
                    let to = *to;
                    let cb = on_complete.take();
                    self.state = State::Idle;
                    if let Some(cb) = cb {
                        (cb.borrow_mut())(self.group);
                    }
                    Some(Sample { value: to, done: true })
                } else {
                    let eased = easing.apply(t);
                    Some(Sample { value: *from + (*to - *from) * eased, done: false })
                }
            }
        }
    }
}
