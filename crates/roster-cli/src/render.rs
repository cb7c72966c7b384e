//! Colour-tinted terminal output.
//!
//! Pure output: the engine never consumes a return value from here.

use std::io;

use crossterm::style::{Color, Stylize};
use crossterm::{cursor, execute, terminal};

use roster_core::model::Participant;

pub const APP_TITLE: &str = "Trivia Team Tracker";
pub const EXIT_MSG: &str = "Exiting program. Goodbye!";
pub const NONE_SELECTED: &str = "None selected";
pub const INVALID_SELECTION: &str = "Invalid selection. Please try again.";
pub const TEAM_FULL: &str = "Team is full. Cannot add more participants.";
pub const TEAM_EMPTY: &str = "Team has no participants for this operation.";
pub const POOL_RESTRICTED: &str = "That operation is not available for the free-agent pool.";
pub const OP_CANCELLED: &str = "Operation cancelled by user.";
pub const YN_PROMPT: &str = "Enter 'Y' for yes, 'N' for no:";
pub const HIT_ENTER: &str = "Press Enter to continue...";
pub const CANCEL_HINT: &str = "Hit Ctrl-C to return to the previous menu.";

/// Display roles mapped onto the palette.
#[derive(Debug, Clone, Copy)]
pub enum Tint {
    Title,
    Instruction,
    Info,
    Warn,
    List,
    Ask,
    Back,
    Exit,
}

fn color(tint: Tint) -> Color {
    match tint {
        Tint::Title => Color::Rgb { r: 0, g: 253, b: 255 },
        Tint::Instruction => Color::Rgb { r: 160, g: 160, b: 160 },
        Tint::Info => Color::Rgb { r: 102, g: 204, b: 0 },
        Tint::Warn => Color::Rgb { r: 255, g: 220, b: 0 },
        Tint::List => Color::Rgb { r: 250, g: 250, b: 250 },
        Tint::Ask => Color::Rgb { r: 255, g: 255, b: 255 },
        Tint::Back => Color::Rgb { r: 255, g: 147, b: 0 },
        Tint::Exit => Color::Rgb { r: 255, g: 70, b: 95 },
    }
}

pub fn tint(role: Tint, text: &str) -> String {
    format!("{}", text.with(color(role)))
}

pub fn clear_screen() {
    let _ = execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    );
}

/// Page banner, the currently-selected entities, and an optional
/// instruction line.
pub fn render_header(
    title_suffix: &str,
    instruction: Option<&str>,
    participant: Option<&str>,
    team: Option<&str>,
    show_cancel_hint: bool,
) {
    clear_screen();
    let banner = format!("*** {} - {} ***", APP_TITLE.to_uppercase(), title_suffix);
    println!("{}", tint(Tint::Title, &banner));
    println!("{}\n", tint(Tint::Title, &"=".repeat(banner.chars().count())));

    if show_cancel_hint {
        println!("{}\n", tint(Tint::Instruction, CANCEL_HINT));
    }

    if participant.is_some() || team.is_some() {
        println!("{}", tint(Tint::Instruction, "CURRENTLY SELECTED"));
        println!("{}", tint(Tint::Instruction, &"-".repeat(50)));
        println!(
            "Participant: {}",
            tint(Tint::Info, participant.unwrap_or(NONE_SELECTED))
        );
        println!(
            "       Team: {}",
            tint(Tint::Info, team.unwrap_or(NONE_SELECTED))
        );
        println!("{}", tint(Tint::Instruction, &"-".repeat(50)));
    }

    if let Some(instruction) = instruction {
        println!("\n{}", tint(Tint::Instruction, instruction));
    }
    println!();
}

/// Numbered options, a blank line, then the navigation entries.
pub fn render_menu(options: &[&str], nav: &[(char, &str)]) {
    for (i, label) in options.iter().enumerate() {
        println!("{}", tint(Tint::List, &format!("{:<2} {}", i + 1, label)));
    }
    println!();
    for (selector, label) in nav {
        let role = if *selector == 'x' { Tint::Exit } else { Tint::Back };
        println!(
            "{}",
            tint(role, &format!("{:<2} {}", selector.to_ascii_uppercase(), label))
        );
    }
}

pub fn render_roster(team_name: &str, roster: &[Participant]) {
    println!(
        "{}",
        tint(Tint::Instruction, &format!("{} ROSTER", team_name.to_uppercase()))
    );
    if roster.is_empty() {
        println!("{}", tint(Tint::List, "  (empty)"));
    }
    for participant in roster {
        println!("{}", tint(Tint::List, &format!("  {}", participant.display_name())));
    }
    println!();
}

pub fn render_save_prompt(text: &str) {
    clear_screen();
    println!("\n{}\n", tint(Tint::Ask, text));
}

/// Result screen for a confirmation: the staged prompt plus whether the
/// change was saved.
pub fn render_result(message: &str, confirmed: bool) {
    clear_screen();
    let status = if confirmed {
        tint(Tint::Info, "SAVED")
    } else {
        tint(Tint::Warn, OP_CANCELLED)
    };
    println!("\n{} : {}\n", tint(Tint::List, message), status);
}

pub fn render_warning(message: &str) {
    println!("\n{}\n", tint(Tint::Warn, message));
}

pub fn render_exit() {
    println!("\n{}\n", tint(Tint::Title, EXIT_MSG));
}
