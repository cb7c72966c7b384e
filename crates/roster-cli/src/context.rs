//! The navigation stack and its owning context.

use crate::flow::StepFn;
use crate::state::WorkingState;

/// One entry on the navigation stack: the step to run and the working
/// state as it stood when the frame was pushed.
pub struct Frame {
    pub step: StepFn,
    pub snapshot: WorkingState,
}

/// Owns the navigation stack and the working state for the step currently
/// executing. Pushing snapshots the live state; the dispatch loop installs
/// the top snapshot before every step, so later mutation never leaks into
/// frames already on the stack.
pub struct StepContext {
    entry: StepFn,
    init_state: WorkingState,
    pub state: WorkingState,
    stack: Vec<Frame>,
}

impl StepContext {
    pub fn new(entry: StepFn, init_state: WorkingState) -> Self {
        let stack = vec![Frame { step: entry, snapshot: init_state.clone() }];
        Self { entry, state: init_state.clone(), init_state, stack }
    }

    /// Snapshot the live state and stack a new step on top of it.
    pub fn push(&mut self, step: StepFn) {
        let snapshot = self.state.clone();
        self.stack.push(Frame { step, snapshot });
    }

    /// Remove and return the tail frame; `None` when the stack is empty.
    /// Total: callers gate navigation on `can_go_back` instead of errors.
    pub fn pop(&mut self) -> Option<Frame> {
        self.stack.pop()
    }

    /// True when a frame can be popped while still retaining `floor`
    /// frames. The entry frame sits at floor 1 and is never escaped by
    /// going back.
    pub fn can_go_back(&self, floor: usize) -> bool {
        self.stack.len() > floor
    }

    pub fn top(&self) -> Option<&Frame> {
        self.stack.last()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Drop every frame; the dispatch loop treats an empty stack as quit.
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Back to a freshly-constructed context: pristine working state and a
    /// single entry frame.
    pub fn restart(&mut self) {
        self.state = self.init_state.clone();
        self.stack.clear();
        self.stack.push(Frame { step: self.entry, snapshot: self.init_state.clone() });
    }
}
