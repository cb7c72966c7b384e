//! Terminal input solicitation.
//!
//! All reads happen through `Console`, which owns the raw-mode line reader
//! in interactive mode and a canned event queue in scripted mode. Ctrl-C
//! and Esc become `Cancelled` at this boundary; they never unwind through
//! the dispatch loop as errors.

use std::collections::VecDeque;
use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use roster_core::validate::{self, FieldRules, RuleKind};

use crate::nav::{Choice, NavSignal};
use crate::render;

/// One read from the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// Ctrl-C or Esc mid-read: cooperative cancellation.
    Cancelled,
    /// Stdin closed (Ctrl-D on an empty line, or a read failure).
    Eof,
}

/// Console input source: raw-mode key events interactively, canned events
/// under test.
pub struct Console {
    script: Option<VecDeque<InputEvent>>,
}

impl Console {
    pub fn interactive() -> Self {
        Self { script: None }
    }

    pub fn scripted<I>(events: I) -> Self
    where
        I: IntoIterator<Item = InputEvent>,
    {
        Self { script: Some(events.into_iter().collect()) }
    }

    /// Script plain line entries; an exhausted script reads as `Eof`.
    pub fn scripted_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::scripted(lines.into_iter().map(|l| InputEvent::Line(l.into())))
    }

    /// Print `prompt_text` and read one line. Terminal failures degrade to
    /// `Eof`, which every caller maps to quit.
    pub fn read_line(&mut self, prompt_text: &str) -> InputEvent {
        if let Some(script) = &mut self.script {
            return script.pop_front().unwrap_or(InputEvent::Eof);
        }
        print!("\n{} ", render::tint(render::Tint::Ask, prompt_text));
        if io::stdout().flush().is_err() {
            return InputEvent::Eof;
        }
        read_line_raw()
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Raw-mode line reader: echoes printable keys, handles backspace, and
/// converts Ctrl-C / Esc into `Cancelled`.
fn read_line_raw() -> InputEvent {
    let _guard = match RawModeGuard::enable() {
        Ok(guard) => guard,
        Err(_) => return InputEvent::Eof,
    };

    let mut line = String::new();
    loop {
        let ev = match event::read() {
            Ok(ev) => ev,
            Err(_) => return InputEvent::Eof,
        };
        let key = match ev {
            Event::Key(key) if key.kind != KeyEventKind::Release => key,
            _ => continue,
        };
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                echo("\r\n");
                return InputEvent::Cancelled;
            }
            KeyCode::Char('d')
                if key.modifiers.contains(KeyModifiers::CONTROL) && line.is_empty() =>
            {
                echo("\r\n");
                return InputEvent::Eof;
            }
            KeyCode::Esc => {
                echo("\r\n");
                return InputEvent::Cancelled;
            }
            KeyCode::Enter => {
                echo("\r\n");
                return InputEvent::Line(line);
            }
            KeyCode::Backspace => {
                if line.pop().is_some() {
                    echo("\u{8} \u{8}");
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                line.push(c);
                let mut buf = [0u8; 4];
                echo(c.encode_utf8(&mut buf));
            }
            _ => {}
        }
    }
}

fn echo(s: &str) {
    print!("{s}");
    let _ = io::stdout().flush();
}

/// Navigation entries shown under the numbered options, with the minimum
/// stack depth at which each becomes available. Back and restart stay
/// hidden at the entry depth.
const NAV_ENTRIES: &[(char, &str, NavSignal, usize)] = &[
    ('b', "Back", NavSignal::Back, 2),
    ('r', "Start over", NavSignal::Reset, 2),
    ('x', "Exit program", NavSignal::Quit, 1),
];

pub fn visible_nav(depth: usize) -> Vec<(char, &'static str)> {
    NAV_ENTRIES
        .iter()
        .filter(|(_, _, _, min_depth)| depth >= *min_depth)
        .map(|(selector, label, _, _)| (*selector, *label))
        .collect()
}

pub fn menu_select<T: Clone>(
    console: &mut Console,
    options: &[(String, T)],
    depth: usize,
) -> Choice<T> {
    menu_select_guarded(console, options, depth, |_| Ok(()))
}

/// Render the menu and loop until a valid selection arrives: a digit into
/// `options` (subject to `guard`) or a visible navigation letter. Anything
/// else warns and re-prompts in place.
pub fn menu_select_guarded<T: Clone>(
    console: &mut Console,
    options: &[(String, T)],
    depth: usize,
    guard: impl Fn(&T) -> Result<(), String>,
) -> Choice<T> {
    let labels: Vec<&str> = options.iter().map(|(label, _)| label.as_str()).collect();
    render::render_menu(&labels, &visible_nav(depth));

    loop {
        let line = match console.read_line("Enter your selection:") {
            InputEvent::Line(line) => line.trim().to_lowercase(),
            InputEvent::Cancelled => return Choice::Nav(NavSignal::Back),
            InputEvent::Eof => return Choice::Nav(NavSignal::Quit),
        };

        if line.chars().all(|c| c.is_ascii_digit()) && !line.is_empty() {
            match line.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => {
                    let (_, value) = &options[n - 1];
                    match guard(value) {
                        Ok(()) => return Choice::Picked(value.clone()),
                        Err(message) => render::render_warning(&message),
                    }
                }
                _ => render::render_warning(render::INVALID_SELECTION),
            }
            continue;
        }

        if let Some((_, _, signal, _)) = NAV_ENTRIES
            .iter()
            .find(|(selector, _, _, min_depth)| {
                depth >= *min_depth && line == selector.to_string()
            })
        {
            return Choice::Nav(*signal);
        }

        render::render_warning(render::INVALID_SELECTION);
    }
}

/// Prompt for one attribute value, re-prompting until it validates. Names
/// come back whitespace-normalized.
pub fn prompt_field(console: &mut Console, label: &str, rules: &FieldRules) -> Choice<String> {
    loop {
        let line = match console.read_line(&format!("{label}:")) {
            InputEvent::Line(line) => line,
            InputEvent::Cancelled => return Choice::Nav(NavSignal::Back),
            InputEvent::Eof => return Choice::Nav(NavSignal::Quit),
        };
        if validate_field(&line, rules) {
            let value = match rules.kind {
                RuleKind::Name => validate::normalize_name(&line),
                RuleKind::Date => line.trim().to_string(),
            };
            return Choice::Picked(value);
        }
    }
}

/// The validation collaborator surface: check the value and render the
/// warning here on failure.
fn validate_field(value: &str, rules: &FieldRules) -> bool {
    match validate::check(value, rules) {
        Ok(()) => true,
        Err(message) => {
            render::render_warning(&message);
            false
        }
    }
}

/// Yes/no confirmation for a staged change. Ctrl-C backs out; EOF quits.
pub fn confirm(console: &mut Console, prompt_text: &str) -> Choice<bool> {
    render::render_save_prompt(prompt_text);
    loop {
        match console.read_line(render::YN_PROMPT) {
            InputEvent::Line(line) => match line.trim().to_lowercase().as_str() {
                "y" => return Choice::Picked(true),
                "n" => return Choice::Picked(false),
                _ => render::render_warning(render::INVALID_SELECTION),
            },
            InputEvent::Cancelled => return Choice::Nav(NavSignal::Back),
            InputEvent::Eof => return Choice::Nav(NavSignal::Quit),
        }
    }
}

/// Block after a result screen until the user hits Enter (any terminal
/// close also releases it).
pub fn wait_for_enter(console: &mut Console) {
    let _ = console.read_line(render::HIT_ENTER);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<(String, &'static str)> {
        vec![
            ("Alpha".to_string(), "alpha"),
            ("Beta".to_string(), "beta"),
        ]
    }

    #[test]
    fn test_digit_selects_option() {
        let mut console = Console::scripted_lines(["2"]);
        match menu_select(&mut console, &options(), 1) {
            Choice::Picked(value) => assert_eq!(value, "beta"),
            other => panic!("expected a pick, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_reprompts() {
        let mut console = Console::scripted_lines(["9", "0", "1"]);
        match menu_select(&mut console, &options(), 1) {
            Choice::Picked(value) => assert_eq!(value, "alpha"),
            other => panic!("expected a pick, got {other:?}"),
        }
    }

    #[test]
    fn test_junk_reprompts() {
        let mut console = Console::scripted_lines(["??", "zz", "1"]);
        assert!(matches!(
            menu_select(&mut console, &options(), 1),
            Choice::Picked("alpha")
        ));
    }

    #[test]
    fn test_nav_letters_map_to_signals() {
        let mut console = Console::scripted_lines(["x"]);
        assert!(matches!(
            menu_select(&mut console, &options(), 1),
            Choice::Nav(NavSignal::Quit)
        ));

        let mut console = Console::scripted_lines(["B"]);
        assert!(matches!(
            menu_select(&mut console, &options(), 2),
            Choice::Nav(NavSignal::Back)
        ));

        let mut console = Console::scripted_lines(["r"]);
        assert!(matches!(
            menu_select(&mut console, &options(), 3),
            Choice::Nav(NavSignal::Reset)
        ));
    }

    #[test]
    fn test_back_hidden_at_entry_depth() {
        // "b" is not a visible selector at depth 1, so it re-prompts
        let mut console = Console::scripted_lines(["b", "1"]);
        assert!(matches!(
            menu_select(&mut console, &options(), 1),
            Choice::Picked("alpha")
        ));
        assert_eq!(visible_nav(1), vec![('x', "Exit program")]);
        assert_eq!(visible_nav(2).len(), 3);
    }

    #[test]
    fn test_guard_rejection_reprompts() {
        let mut console = Console::scripted_lines(["1", "2"]);
        let choice = menu_select_guarded(&mut console, &options(), 1, |value| {
            if *value == "alpha" {
                Err("alpha is unavailable".to_string())
            } else {
                Ok(())
            }
        });
        assert!(matches!(choice, Choice::Picked("beta")));
    }

    #[test]
    fn test_cancel_and_eof_map_to_nav() {
        let mut console = Console::scripted([InputEvent::Cancelled]);
        assert!(matches!(
            menu_select(&mut console, &options(), 2),
            Choice::Nav(NavSignal::Back)
        ));

        // exhausted script reads as EOF, which quits
        let mut console = Console::scripted_lines(Vec::<String>::new());
        assert!(matches!(
            menu_select(&mut console, &options(), 1),
            Choice::Nav(NavSignal::Quit)
        ));
    }

    #[test]
    fn test_prompt_field_loops_until_valid() {
        let mut console = Console::scripted_lines(["A", "An&rew", "  Andrew  "]);
        match prompt_field(&mut console, "First name", &validate::PARTICIPANT_FIRST_NAME) {
            Choice::Picked(value) => assert_eq!(value, "Andrew"),
            other => panic!("expected a value, got {other:?}"),
        }
    }

    #[test]
    fn test_prompt_field_cancel_backs_out() {
        let mut console = Console::scripted([InputEvent::Cancelled]);
        assert!(matches!(
            prompt_field(&mut console, "First name", &validate::PARTICIPANT_FIRST_NAME),
            Choice::Nav(NavSignal::Back)
        ));
    }

    #[test]
    fn test_confirm_parses_yes_no() {
        let mut console = Console::scripted_lines(["maybe", "Y"]);
        assert!(matches!(
            confirm(&mut console, "Save?"),
            Choice::Picked(true)
        ));

        let mut console = Console::scripted_lines(["n"]);
        assert!(matches!(
            confirm(&mut console, "Save?"),
            Choice::Picked(false)
        ));
    }
}
