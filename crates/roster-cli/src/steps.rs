//! Concrete step functions for the interactive flow.
//!
//! Every step ends in exactly one stack transition: push the next step,
//! resolve a navigation signal, or (for the confirmation step) unwind to
//! the operation's landing menu.

use std::rc::Rc;

use roster_core::model::{Participant, Team, MAX_TEAM_SIZE};
use roster_core::validate::{self, FieldRules};

use crate::flow::{resolve_nav, unwind_to, App};
use crate::nav::{Choice, NavSignal};
use crate::ops::{self, OpKind, UnwindTarget};
use crate::prompt;
use crate::render;
use crate::state::CommitFn;

/// Store reads feeding a menu have no recovery path; surface the error and
/// end the flow.
fn fail_flow(app: &mut App, err: rusqlite::Error) {
    render::render_warning(&format!("Database error: {err}"));
    app.ctx.clear();
}

/// Entry step: choose which team to operate on. Re-fetches the team list
/// on every execution so teams created or deleted earlier in the session
/// show up.
pub fn select_team(app: &mut App) {
    let teams = match app.store.teams() {
        Ok(teams) => teams,
        Err(err) => return fail_flow(app, err),
    };
    app.ctx.state.competing_teams =
        Some(teams.iter().filter(|t| !t.is_free_agent_pool()).cloned().collect());

    render::render_header(
        "SELECT TEAM",
        Some("Choose a team to manage."),
        app.ctx.state.participant_name.as_deref(),
        app.ctx.state.team_name.as_deref(),
        false,
    );

    let options: Vec<(String, Team)> =
        teams.into_iter().map(|team| (team.name.clone(), team)).collect();
    let depth = app.ctx.depth();

    match prompt::menu_select(&mut app.console, &options, depth) {
        Choice::Nav(signal) => resolve_nav(app, signal),
        Choice::Picked(team) => match app.store.roster_of(team.id) {
            Ok(roster) => {
                let state = &mut app.ctx.state;
                state.team_name = Some(team.name.clone());
                state.team = Some(team);
                state.team_roster = Some(roster);
                app.ctx.push(select_operation);
            }
            Err(err) => fail_flow(app, err),
        },
    }
}

/// Second-level menu: choose an operation to run against the selected
/// team. The team row and its roster are re-fetched so changes committed
/// through an earlier confirmation are visible here.
pub fn select_operation(app: &mut App) {
    let stale = app.ctx.state.team.clone().expect("select_operation requires a selected team");
    let team = match app.store.team(stale.id) {
        Ok(team) => team,
        Err(err) => return fail_flow(app, err),
    };
    let roster = match app.store.roster_of(team.id) {
        Ok(roster) => roster,
        Err(err) => return fail_flow(app, err),
    };
    app.ctx.state.team_name = Some(team.name.clone());
    app.ctx.state.team = Some(team.clone());
    app.ctx.state.team_roster = Some(roster.clone());

    render::render_header(
        "SELECT OPERATION",
        Some("Choose an operation."),
        app.ctx.state.participant_name.as_deref(),
        app.ctx.state.team_name.as_deref(),
        false,
    );
    render::render_roster(&team.name, &roster);

    let options: Vec<(String, OpKind)> = ops::OPS
        .iter()
        .map(|op| (op.menu_text.to_string(), op.kind))
        .collect();
    let depth = app.ctx.depth();
    let roster_count = roster.len();
    let is_pool = team.is_free_agent_pool();

    let choice = prompt::menu_select_guarded(&mut app.console, &options, depth, |kind| {
        let spec = ops::spec_of(*kind);
        if is_pool
            && matches!(
                kind,
                OpKind::UpdateTeamName
                    | OpKind::DeleteTeam
                    | OpKind::RecruitFreeAgent
                    | OpKind::RemoveParticipant
            )
        {
            return Err(render::POOL_RESTRICTED.to_string());
        }
        if spec.verify_team_full && !is_pool && roster_count >= MAX_TEAM_SIZE {
            return Err(render::TEAM_FULL.to_string());
        }
        if spec.verify_team_empty && roster_count == 0 {
            return Err(render::TEAM_EMPTY.to_string());
        }
        Ok(())
    });

    match choice {
        Choice::Nav(signal) => resolve_nav(app, signal),
        Choice::Picked(kind) => {
            app.ctx.state.operation = Some(kind);
            let spec = ops::spec_of(kind);
            let next = if spec.needs_participant { select_participant } else { spec.step };
            app.ctx.push(next);
        }
    }
}

/// Choose the participant an operation targets: the free-agent pool for
/// recruitment, the team roster for everything else.
pub fn select_participant(app: &mut App) {
    let kind = app.ctx.state.operation.expect("select_participant requires an operation");
    let spec = ops::spec_of(kind);

    let pool: Vec<Participant> = if spec.load_free_agents {
        let fa_team = app
            .ctx
            .state
            .free_agent_team
            .clone()
            .expect("free-agent team is loaded at startup");
        match app.store.roster_of(fa_team.id) {
            Ok(agents) => {
                app.ctx.state.free_agents = Some(agents.clone());
                agents
            }
            Err(err) => return fail_flow(app, err),
        }
    } else {
        app.ctx.state.team_roster.clone().unwrap_or_default()
    };

    render::render_header(
        spec.title,
        Some("Choose a participant."),
        app.ctx.state.participant_name.as_deref(),
        app.ctx.state.team_name.as_deref(),
        false,
    );

    if pool.is_empty() {
        render::render_warning("No participants available.");
        prompt::wait_for_enter(&mut app.console);
        return resolve_nav(app, NavSignal::Back);
    }

    let options: Vec<(String, Participant)> =
        pool.into_iter().map(|p| (p.display_name(), p)).collect();
    let depth = app.ctx.depth();

    match prompt::menu_select(&mut app.console, &options, depth) {
        Choice::Nav(signal) => resolve_nav(app, signal),
        Choice::Picked(participant) => {
            let state = &mut app.ctx.state;
            state.participant_name = Some(participant.display_name());
            state.participant = Some(participant);
            app.ctx.push(spec.step);
        }
    }
}

/// Stage a prompt and commit closure, then hand off to confirmation.
fn stage_commit(app: &mut App, save_prompt: String, exec_func: CommitFn) {
    let state = &mut app.ctx.state;
    state.save_prompt = Some(save_prompt);
    state.exec_func = Some(exec_func);
    app.ctx.push(confirm_save);
}

/// Collect a team name, then stage the insert for confirmation.
pub fn create_team(app: &mut App) {
    render_op_header(app, OpKind::CreateTeam, Some("Enter a name for the new team."));

    let name = match prompt::prompt_field(&mut app.console, "Team name", &validate::TEAM_NAME) {
        Choice::Picked(name) => name,
        Choice::Nav(signal) => return resolve_nav(app, signal),
    };

    let team_name = name.clone();
    stage_commit(
        app,
        format!("Create team: {name}?"),
        Rc::new(move |store| store.insert_team(&team_name).map(|_| ())),
    );
}

/// Collect a new participant's attributes, then stage the insert. The
/// participant enrolls into the currently selected team.
pub fn create_participant(app: &mut App) {
    let team = app.ctx.state.team.clone().expect("create_participant requires a selected team");
    render_op_header(
        app,
        OpKind::CreateParticipant,
        Some("Enter the new participant's details."),
    );

    let first = match prompt::prompt_field(
        &mut app.console,
        "First name",
        &validate::PARTICIPANT_FIRST_NAME,
    ) {
        Choice::Picked(value) => value,
        Choice::Nav(signal) => return resolve_nav(app, signal),
    };
    let last = match prompt::prompt_field(
        &mut app.console,
        "Last name",
        &validate::PARTICIPANT_LAST_NAME,
    ) {
        Choice::Picked(value) => value,
        Choice::Nav(signal) => return resolve_nav(app, signal),
    };
    let birth = match prompt::prompt_field(
        &mut app.console,
        "Birth date (YYYY-MM-DD)",
        &validate::BIRTH_DATE,
    ) {
        Choice::Picked(value) => value,
        Choice::Nav(signal) => return resolve_nav(app, signal),
    };

    let display = roster_core::model::display_name(&first, &last);
    stage_commit(
        app,
        format!("Save new participant: {display}?"),
        Rc::new(move |store| {
            store.insert_participant(&first, &last, &birth, team.id).map(|_| ())
        }),
    );
}

/// Collect a replacement team name, then stage the update.
pub fn update_team_name(app: &mut App) {
    let team = app.ctx.state.team.clone().expect("update_team_name requires a selected team");
    render_op_header(app, OpKind::UpdateTeamName, Some("Enter the team's new name."));

    let name = match prompt::prompt_field(&mut app.console, "New team name", &validate::TEAM_NAME)
    {
        Choice::Picked(name) => name,
        Choice::Nav(signal) => return resolve_nav(app, signal),
    };

    let mut updated = team;
    updated.name = name.clone();
    stage_commit(
        app,
        format!("Update team name to: {name}?"),
        Rc::new(move |store| store.update_team(&updated)),
    );
}

pub fn update_participant_first_name(app: &mut App) {
    stage_participant_update(
        app,
        OpKind::UpdateParticipantFirstName,
        "New first name",
        &validate::PARTICIPANT_FIRST_NAME,
        |participant, value| participant.first_name = value,
    );
}

pub fn update_participant_last_name(app: &mut App) {
    stage_participant_update(
        app,
        OpKind::UpdateParticipantLastName,
        "New last name",
        &validate::PARTICIPANT_LAST_NAME,
        |participant, value| participant.last_name = value,
    );
}

/// Shared body of the two rename steps: collect the replacement value,
/// apply it to a copy, and stage the row update.
fn stage_participant_update(
    app: &mut App,
    kind: OpKind,
    label: &str,
    rules: &FieldRules,
    apply: fn(&mut Participant, String),
) {
    let participant = app
        .ctx
        .state
        .participant
        .clone()
        .expect("participant update requires a selection");
    render_op_header(app, kind, Some("Enter the replacement value."));

    let value = match prompt::prompt_field(&mut app.console, label, rules) {
        Choice::Picked(value) => value,
        Choice::Nav(signal) => return resolve_nav(app, signal),
    };

    let mut updated = participant;
    apply(&mut updated, value.clone());
    let display = updated.display_name();
    stage_commit(
        app,
        format!("Update participant to: {display}?"),
        Rc::new(move |store| store.update_participant(&updated)),
    );
}

/// Stage moving the picked free agent onto the selected team.
pub fn recruit_free_agent(app: &mut App) {
    let team = app.ctx.state.team.clone().expect("recruit requires a selected team");
    let participant = app
        .ctx
        .state
        .participant
        .clone()
        .expect("recruit requires a picked free agent");

    let mut moved = participant.clone();
    moved.team_id = team.id;
    stage_commit(
        app,
        format!("Move {} to {}?", participant.display_name(), team.name),
        Rc::new(move |store| store.update_participant(&moved)),
    );
}

/// Stage releasing the picked participant back to the free-agent pool.
pub fn remove_participant(app: &mut App) {
    let team = app.ctx.state.team.clone().expect("release requires a selected team");
    let pool = app
        .ctx
        .state
        .free_agent_team
        .clone()
        .expect("free-agent team is loaded at startup");
    let participant = app
        .ctx
        .state
        .participant
        .clone()
        .expect("release requires a picked participant");

    let mut moved = participant.clone();
    moved.team_id = pool.id;
    stage_commit(
        app,
        format!("Remove {} from {}?", participant.display_name(), team.name),
        Rc::new(move |store| store.update_participant(&moved)),
    );
}

/// Stage deleting the picked participant's record.
pub fn delete_participant(app: &mut App) {
    let participant = app
        .ctx
        .state
        .participant
        .clone()
        .expect("delete requires a picked participant");

    let id = participant.id;
    stage_commit(
        app,
        format!("Delete participant: {}?", participant.display_name()),
        Rc::new(move |store| store.delete_participant(id)),
    );
}

/// Stage deleting the selected team. Its roster returns to free agency in
/// the same commit.
pub fn delete_team(app: &mut App) {
    let team = app.ctx.state.team.clone().expect("delete_team requires a selected team");
    let pool = app
        .ctx
        .state
        .free_agent_team
        .clone()
        .expect("free-agent team is loaded at startup");

    let team_id = team.id;
    let pool_id = pool.id;
    stage_commit(
        app,
        format!("Delete team: {}? Its roster returns to free agency.", team.name),
        Rc::new(move |store| {
            store.reassign_roster(team_id, pool_id)?;
            store.delete_team(team_id)
        }),
    );
}

/// Generic confirmation: render the staged prompt, run the staged commit
/// on "y", then unwind to the operation's landing menu.
pub fn confirm_save(app: &mut App) {
    let prompt_text = app
        .ctx
        .state
        .save_prompt
        .clone()
        .expect("confirm_save requires a staged prompt");
    let commit = app
        .ctx
        .state
        .exec_func
        .clone()
        .expect("confirm_save requires a staged commit");

    let mut confirmed = match prompt::confirm(&mut app.console, &prompt_text) {
        Choice::Picked(answer) => answer,
        Choice::Nav(signal) => return resolve_nav(app, signal),
    };

    if confirmed {
        if let Err(err) = commit(&mut app.store) {
            render::render_warning(&format!("Save failed: {err}"));
            confirmed = false;
        }
    }

    render::render_result(&prompt_text, confirmed);
    prompt::wait_for_enter(&mut app.console);

    let target = app
        .ctx
        .state
        .operation
        .map(|kind| ops::spec_of(kind).after_commit)
        .unwrap_or(UnwindTarget::OperationSelect);
    match target {
        UnwindTarget::OperationSelect => unwind_to(app, select_operation),
        UnwindTarget::TeamSelect => unwind_to(app, select_team),
    }
}

/// Header for an operation step, with the cancel hint shown because every
/// operation step solicits free-text input.
fn render_op_header(app: &App, kind: OpKind, instruction: Option<&str>) {
    let spec = ops::spec_of(kind);
    render::render_header(
        spec.title,
        instruction,
        app.ctx.state.participant_name.as_deref(),
        app.ctx.state.team_name.as_deref(),
        true,
    );
}
