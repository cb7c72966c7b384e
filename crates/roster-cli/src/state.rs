//! The working state shared across navigation frames.

use std::fmt;
use std::rc::Rc;

use roster_core::model::{Participant, Team};
use roster_core::store::RosterStore;

use crate::ops::OpKind;

/// Committing side effect staged by an operation step and run by the
/// confirmation step. Takes the store explicitly; everything else it
/// needs is captured when the operation stages it.
pub type CommitFn = Rc<dyn Fn(&mut RosterStore) -> rusqlite::Result<()>>;

/// The closed set of slots available to the executing step. The schema is
/// fixed here; steps replace slot values, they never grow the record.
/// Cloning is the copy-on-push snapshot: slot values are replace-not-mutate,
/// so a clone fully decouples a frame from the live state.
#[derive(Clone, Default)]
pub struct WorkingState {
    pub team: Option<Team>,
    pub team_name: Option<String>,
    pub operation: Option<OpKind>,
    pub participant: Option<Participant>,
    pub participant_name: Option<String>,
    pub competing_teams: Option<Vec<Team>>,
    pub free_agent_team: Option<Team>,
    pub team_roster: Option<Vec<Participant>>,
    pub free_agents: Option<Vec<Participant>>,
    pub save_prompt: Option<String>,
    pub exec_func: Option<CommitFn>,
}

impl fmt::Debug for WorkingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkingState")
            .field("team", &self.team)
            .field("team_name", &self.team_name)
            .field("operation", &self.operation)
            .field("participant", &self.participant)
            .field("participant_name", &self.participant_name)
            .field("competing_teams", &self.competing_teams)
            .field("free_agent_team", &self.free_agent_team)
            .field("team_roster", &self.team_roster)
            .field("free_agents", &self.free_agents)
            .field("save_prompt", &self.save_prompt)
            .field("exec_func", &self.exec_func.as_ref().map(|_| "<staged commit>"))
            .finish()
    }
}

/// Fresh initial state for construction and restart. A factory rather than
/// a shared constant, so the pristine record can never alias the live one.
pub fn initial_state(free_agent_team: Team) -> WorkingState {
    WorkingState {
        free_agent_team: Some(free_agent_team),
        ..Default::default()
    }
}
