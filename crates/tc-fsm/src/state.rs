//! The `State` capability and two ready-made implementations.

/// Actions of one state, parameterized over the machine's context `C`.
///
/// All three hooks default to doing nothing.
pub trait State<C>: 'static {
    /// Runs once when the machine transitions into this state.
    fn on_entry(&mut self, _ctx: &mut C) {}

    /// Runs on every update while this state is active and no global
    /// transition fired.
    fn on_update(&mut self, _ctx: &mut C) {}

    /// Runs once when the machine leaves this state.
    fn on_exit(&mut self, _ctx: &mut C) {}
}

/// A state with no actions.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopState;

impl<C> State<C> for NoopState {}

type Action<C> = Box<dyn FnMut(&mut C)>;

/// A state assembled from closures.
///
/// ```rust
/// use tc_fsm::{FnState, State};
///
/// let mut s = FnState::<u32>::new().entry(|n| *n += 10).update(|n| *n += 1);
/// let mut n = 0;
/// s.on_entry(&mut n);
/// s.on_update(&mut n);
/// assert_eq!(n, 11);
/// ```
pub struct FnState<C> {
    entry:  Option<Action<C>>,
    update: Option<Action<C>>,
    exit:   Option<Action<C>>,
}

impl<C> Default for FnState<C> {
    fn default() -> Self {
        Self { entry: None, update: None, exit: None }
    }
}

impl<C> FnState<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, f: impl FnMut(&mut C) + 'static) -> Self {
        self.entry = Some(Box::new(f));
        self
    }

    pub fn update(mut self, f: impl FnMut(&mut C) + 'static) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    pub fn exit(mut self, f: impl FnMut(&mut C) + 'static) -> Self {
        self.exit = Some(Box::new(f));
        self
    }
}

impl<C: 'static> State<C> for FnState<C> {
    fn on_entry(&mut self, ctx: &mut C) {
        if let Some(f) = &mut self.entry {
            f(ctx);
        }
    }

    fn on_update(&mut self, ctx: &mut C) {
        if let Some(f) = &mut self.update {
            f(ctx);
        }
    }

    fn on_exit(&mut self, ctx: &mut C) {
        if let Some(f) = &mut self.exit {
            f(ctx);
        }
    }
}
