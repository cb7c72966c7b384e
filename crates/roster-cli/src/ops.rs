//! The operation dispatch table.
//!
//! Every mutation the flow can perform, keyed by `OpKind` and resolved
//! through one table built at compile time — a finite, statically
//! checkable mapping instead of runtime name lookup.

use crate::flow::StepFn;
use crate::steps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    CreateTeam,
    CreateParticipant,
    UpdateTeamName,
    UpdateParticipantFirstName,
    UpdateParticipantLastName,
    RecruitFreeAgent,
    RemoveParticipant,
    DeleteParticipant,
    DeleteTeam,
}

/// Where the flow lands after the operation's confirmation screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnwindTarget {
    OperationSelect,
    TeamSelect,
}

pub struct OpSpec {
    pub kind: OpKind,
    pub menu_text: &'static str,
    /// Header title suffix while the operation runs.
    pub title: &'static str,
    /// Route through participant selection before the operation step.
    pub needs_participant: bool,
    /// Participant selection lists the free-agent pool, not the roster.
    pub load_free_agents: bool,
    /// Reject selection while the roster is at capacity.
    pub verify_team_full: bool,
    /// Reject selection while the roster is empty.
    pub verify_team_empty: bool,
    pub after_commit: UnwindTarget,
    pub step: StepFn,
}

pub const OPS: &[OpSpec] = &[
    OpSpec {
        kind: OpKind::CreateTeam,
        menu_text: "Create a new team",
        title: "CREATE TEAM",
        needs_participant: false,
        load_free_agents: false,
        verify_team_full: false,
        verify_team_empty: false,
        after_commit: UnwindTarget::OperationSelect,
        step: steps::create_team,
    },
    OpSpec {
        kind: OpKind::CreateParticipant,
        menu_text: "Enroll a new participant",
        title: "ENROLL PARTICIPANT",
        needs_participant: false,
        load_free_agents: false,
        verify_team_full: true,
        verify_team_empty: false,
        after_commit: UnwindTarget::OperationSelect,
        step: steps::create_participant,
    },
    OpSpec {
        kind: OpKind::UpdateTeamName,
        menu_text: "Rename the team",
        title: "RENAME TEAM",
        needs_participant: false,
        load_free_agents: false,
        verify_team_full: false,
        verify_team_empty: false,
        after_commit: UnwindTarget::OperationSelect,
        step: steps::update_team_name,
    },
    OpSpec {
        kind: OpKind::UpdateParticipantFirstName,
        menu_text: "Change a participant's first name",
        title: "CHANGE FIRST NAME",
        needs_participant: true,
        load_free_agents: false,
        verify_team_full: false,
        verify_team_empty: true,
        after_commit: UnwindTarget::OperationSelect,
        step: steps::update_participant_first_name,
    },
    OpSpec {
        kind: OpKind::UpdateParticipantLastName,
        menu_text: "Change a participant's last name",
        title: "CHANGE LAST NAME",
        needs_participant: true,
        load_free_agents: false,
        verify_team_full: false,
        verify_team_empty: true,
        after_commit: UnwindTarget::OperationSelect,
        step: steps::update_participant_last_name,
    },
    OpSpec {
        kind: OpKind::RecruitFreeAgent,
        menu_text: "Recruit a free agent",
        title: "RECRUIT FREE AGENT",
        needs_participant: true,
        load_free_agents: true,
        verify_team_full: true,
        verify_team_empty: false,
        after_commit: UnwindTarget::OperationSelect,
        step: steps::recruit_free_agent,
    },
    OpSpec {
        kind: OpKind::RemoveParticipant,
        menu_text: "Release a participant to free agency",
        title: "RELEASE PARTICIPANT",
        needs_participant: true,
        load_free_agents: false,
        verify_team_full: false,
        verify_team_empty: true,
        after_commit: UnwindTarget::OperationSelect,
        step: steps::remove_participant,
    },
    OpSpec {
        kind: OpKind::DeleteParticipant,
        menu_text: "Delete a participant",
        title: "DELETE PARTICIPANT",
        needs_participant: true,
        load_free_agents: false,
        verify_team_full: false,
        verify_team_empty: true,
        after_commit: UnwindTarget::OperationSelect,
        step: steps::delete_participant,
    },
    OpSpec {
        kind: OpKind::DeleteTeam,
        menu_text: "Delete the team",
        title: "DELETE TEAM",
        needs_participant: false,
        load_free_agents: false,
        verify_team_full: false,
        verify_team_empty: false,
        after_commit: UnwindTarget::TeamSelect,
        step: steps::delete_team,
    },
];

/// Look an operation up in the table. A miss means the table and the enum
/// have drifted apart, which is a defect, not an operating condition.
pub fn spec_of(kind: OpKind) -> &'static OpSpec {
    OPS.iter()
        .find(|op| op.kind == kind)
        .expect("operation missing from dispatch table")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: &[OpKind] = &[
        OpKind::CreateTeam,
        OpKind::CreateParticipant,
        OpKind::UpdateTeamName,
        OpKind::UpdateParticipantFirstName,
        OpKind::UpdateParticipantLastName,
        OpKind::RecruitFreeAgent,
        OpKind::RemoveParticipant,
        OpKind::DeleteParticipant,
        OpKind::DeleteTeam,
    ];

    #[test]
    fn test_table_covers_every_kind() {
        for kind in ALL_KINDS {
            assert_eq!(spec_of(*kind).kind, *kind);
        }
        assert_eq!(OPS.len(), ALL_KINDS.len());
    }

    #[test]
    fn test_participant_ops_route_through_selection() {
        for op in OPS {
            if op.load_free_agents {
                assert!(op.needs_participant, "{:?} lists a pool it never picks from", op.kind);
            }
        }
    }

    #[test]
    fn test_only_team_deletion_unwinds_to_entry() {
        for op in OPS {
            let expected = if op.kind == OpKind::DeleteTeam {
                UnwindTarget::TeamSelect
            } else {
                UnwindTarget::OperationSelect
            };
            assert_eq!(op.after_commit, expected);
        }
    }
}
