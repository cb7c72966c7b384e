//! Navigation sentinels and the picked-or-navigate result of every
//! input-soliciting call.

/// Non-domain outcome of an input solicitation: the user asked to move
/// through the flow rather than select a value. Fieldless, so variants are
/// pairwise distinct and equal only to themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSignal {
    /// Return to the previous frame (a no-op at the entry step).
    Back,
    /// Clear the stack and re-seed it with the entry step.
    Reset,
    /// Empty the stack, ending the dispatch loop.
    Quit,
}

/// What an input-soliciting routine hands back: a domain value or a
/// navigation signal. Step functions must resolve `Nav` before touching
/// the value.
#[derive(Debug)]
pub enum Choice<T> {
    Picked(T),
    Nav(NavSignal),
}
