//! The step dispatch loop and sentinel resolution.

use roster_core::store::RosterStore;

use crate::context::StepContext;
use crate::nav::NavSignal;
use crate::prompt::Console;
use crate::render;

/// A unit of interactive logic. Each step reads the working state, may
/// solicit input, and leaves exactly one stack transition behind before
/// returning: push, pop, restart, or clear (the one permitted exception is
/// Back at the entry step, which is a no-op and simply re-renders). A step
/// that silently does none of these is a defect; the loop does not defend
/// against it.
pub type StepFn = fn(&mut App);

/// Everything a step function can touch: the navigation context, the
/// store, and the console.
pub struct App {
    pub ctx: StepContext,
    pub store: RosterStore,
    pub console: Console,
}

/// Step identity: frames are compared by the function they carry, the
/// closest analogue of looking a step up by name.
pub fn steps_match(a: StepFn, b: StepFn) -> bool {
    a as usize == b as usize
}

/// Drive the flow: install the top frame's snapshot as the current working
/// state, run its step, repeat until the stack empties.
pub fn run(app: &mut App) {
    loop {
        let (step, snapshot) = match app.ctx.top() {
            Some(frame) => (frame.step, frame.snapshot.clone()),
            None => break,
        };
        app.ctx.state = snapshot;
        step(app);
    }
    render::render_exit();
}

/// Map a navigation signal to its stack effect. Back at the entry step is
/// a deliberate no-op: the entry frame cannot be escaped by going back.
pub fn resolve_nav(app: &mut App, signal: NavSignal) {
    match signal {
        NavSignal::Back => {
            if app.ctx.can_go_back(1) {
                app.ctx.pop();
            }
        }
        NavSignal::Reset => app.ctx.restart(),
        NavSignal::Quit => app.ctx.clear(),
    }
}

/// Pop frames until `target` is on top, stopping at the entry frame if the
/// target is not on the stack. This is the "jump back to a landing menu"
/// convenience, built from the same pop primitive as single-step Back.
pub fn unwind_to(app: &mut App, target: StepFn) {
    while let Some(frame) = app.ctx.top() {
        if steps_match(frame.step, target) || !app.ctx.can_go_back(1) {
            break;
        }
        app.ctx.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::initial_state;
    use roster_core::model::Team;

    fn entry(_: &mut App) {}
    fn middle(_: &mut App) {}
    fn leaf(_: &mut App) {}

    fn test_app() -> App {
        let store = RosterStore::open_in_memory().unwrap();
        let pool = Team { id: 1, name: "Free Agents".to_string() };
        App {
            ctx: StepContext::new(entry, initial_state(pool)),
            store,
            console: Console::scripted_lines(Vec::<String>::new()),
        }
    }

    #[test]
    fn test_steps_match_is_identity() {
        assert!(steps_match(entry, entry));
        assert!(!steps_match(entry, middle));
    }

    #[test]
    fn test_back_pops_one_frame() {
        let mut app = test_app();
        app.ctx.push(middle);
        app.ctx.push(leaf);

        resolve_nav(&mut app, NavSignal::Back);
        assert_eq!(app.ctx.depth(), 2);
        assert!(steps_match(app.ctx.top().unwrap().step, middle));
    }

    #[test]
    fn test_back_at_entry_is_noop() {
        let mut app = test_app();
        resolve_nav(&mut app, NavSignal::Back);
        assert_eq!(app.ctx.depth(), 1);
        assert!(steps_match(app.ctx.top().unwrap().step, entry));
    }

    #[test]
    fn test_reset_reseeds_entry_frame() {
        let mut app = test_app();
        app.ctx.state.team_name = Some("The Dropouts".to_string());
        app.ctx.push(middle);
        app.ctx.push(leaf);

        resolve_nav(&mut app, NavSignal::Reset);
        assert_eq!(app.ctx.depth(), 1);
        let frame = app.ctx.top().unwrap();
        assert!(steps_match(frame.step, entry));
        assert!(frame.snapshot.team_name.is_none());
    }

    #[test]
    fn test_quit_clears_the_stack() {
        let mut app = test_app();
        app.ctx.push(middle);
        resolve_nav(&mut app, NavSignal::Quit);
        assert_eq!(app.ctx.depth(), 0);
    }

    #[test]
    fn test_unwind_to_stops_at_target() {
        let mut app = test_app();
        app.ctx.push(middle);
        app.ctx.push(leaf);
        app.ctx.push(leaf);

        unwind_to(&mut app, middle);
        assert_eq!(app.ctx.depth(), 2);
        assert!(steps_match(app.ctx.top().unwrap().step, middle));
    }

    #[test]
    fn test_unwind_to_missing_target_stops_at_entry() {
        let mut app = test_app();
        app.ctx.push(leaf);
        app.ctx.push(leaf);

        unwind_to(&mut app, middle);
        assert_eq!(app.ctx.depth(), 1);
        assert!(steps_match(app.ctx.top().unwrap().step, entry));
    }

    #[test]
    fn test_run_terminates_when_a_step_quits() {
        fn quitting_step(app: &mut App) {
            app.ctx.clear();
        }
        let store = RosterStore::open_in_memory().unwrap();
        let pool = Team { id: 1, name: "Free Agents".to_string() };
        let mut app = App {
            ctx: StepContext::new(quitting_step, initial_state(pool)),
            store,
            console: Console::scripted_lines(Vec::<String>::new()),
        };
        run(&mut app);
        assert_eq!(app.ctx.depth(), 0);
    }

    #[test]
    fn test_run_installs_snapshot_before_each_step() {
        // the step observes the frame's snapshot, not stray live mutation
        fn observing_step(app: &mut App) {
            assert_eq!(app.ctx.state.team_name.as_deref(), Some("snapshotted"));
            app.ctx.clear();
        }
        let store = RosterStore::open_in_memory().unwrap();
        let pool = Team { id: 1, name: "Free Agents".to_string() };
        let mut init = initial_state(pool);
        init.team_name = Some("snapshotted".to_string());
        let mut app = App {
            ctx: StepContext::new(observing_step, init),
            store,
            console: Console::scripted_lines(Vec::<String>::new()),
        };
        app.ctx.state.team_name = Some("stray mutation".to_string());
        run(&mut app);
        assert_eq!(app.ctx.depth(), 0);
    }
}
