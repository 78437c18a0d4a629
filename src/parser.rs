use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::element::{Dialogue, ScriptElement};
use crate::format::format_inline;

static METADATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(title|author|date):").expect("valid regex"));
static TRANSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)FADE TO BLACK|CUT TO BLACK|DISSOLVE TO BLACK|FADE OUT").expect("valid regex")
});

/// Parse Fountain-style screenplay text into a list of elements.
///
/// Never fails: anything that matches no other rule becomes dialogue.
pub fn parse(script: &str) -> Vec<ScriptElement> {
    let mut state = ParseState::default();

    for line in script.lines() {
        let line = trim_line(line);
        if line.is_empty() || METADATA.is_match(line) {
            continue;
        }
        process_line(line, &mut state);
    }

    state.finish()
}

/// Trim whitespace and any byte-order mark left over from file loading.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

#[derive(Default)]
struct ParseState {
    // Most recent character cue, attached to everything that follows
    character: String,
    dual: DualSlot,
    elements: Vec<ScriptElement>,
}

/// Holds the first half of a dual dialogue until its partner shows up.
#[derive(Default)]
enum DualSlot {
    #[default]
    Idle,
    Buffering(Dialogue),
}

impl ParseState {
    fn emit(&mut self, element: ScriptElement) {
        self.flush_dual();
        self.elements.push(element);
    }

    fn pair(&mut self, dialogue: Dialogue) {
        match std::mem::take(&mut self.dual) {
            DualSlot::Idle => self.dual = DualSlot::Buffering(dialogue),
            DualSlot::Buffering(left) => self.elements.push(ScriptElement::DualDialogue {
                left,
                right: dialogue,
            }),
        }
    }

    fn flush_dual(&mut self) {
        if let DualSlot::Buffering(dialogue) = std::mem::take(&mut self.dual) {
            self.elements.push(ScriptElement::Dialogue(dialogue));
        }
    }

    fn finish(mut self) -> Vec<ScriptElement> {
        self.flush_dual();
        self.elements
    }
}

/// What a single trimmed line contributes.
#[derive(Debug, PartialEq)]
enum LineKind {
    Element(ScriptElement),
    /// Character cue: changes the ambient speaker, emits nothing
    Cue(String),
    /// Dialogue ending in `^`, waiting to be paired
    Paired(Dialogue),
}

fn process_line(line: &str, state: &mut ParseState) {
    let kind = classify(line, &state.character);
    trace!(line, ?kind, "classified line");

    match kind {
        LineKind::Element(element) => state.emit(element),
        LineKind::Cue(name) => state.character = name,
        LineKind::Paired(dialogue) => state.pair(dialogue),
    }
}

/// Classify one non-empty, trimmed line. First matching rule wins.
fn classify(line: &str, character: &str) -> LineKind {
    let character = character.to_string();

    if let Some(rest) = line.strip_prefix('.') {
        return LineKind::Element(ScriptElement::SceneHeading {
            text: format_inline(trim_line(rest)),
        });
    }

    if line.starts_with("INT.") || line.starts_with("EXT.") {
        return LineKind::Element(ScriptElement::SceneHeading {
            text: format_inline(line),
        });
    }

    if let Some(rest) = line.strip_prefix('!') {
        return LineKind::Element(ScriptElement::Action {
            text: format_inline(trim_line(rest)),
            character,
        });
    }

    if let Some(rest) = line.strip_prefix('@') {
        return LineKind::Cue(format_inline(trim_line(rest)));
    }

    // All-caps without a parenthetical reads as a character cue
    if line == line.to_uppercase() && !line.contains('(') {
        return LineKind::Cue(format_inline(line));
    }

    if line.starts_with('(') && line.ends_with(')') {
        return LineKind::Element(ScriptElement::StageDirection {
            text: format_inline(line),
            character,
        });
    }

    if let Some(rest) = line.strip_prefix('~') {
        return LineKind::Element(ScriptElement::Lyrics {
            text: format!("<i>{}</i>", format_inline(trim_line(rest))),
            character,
        });
    }

    if TRANSITION.is_match(line) {
        return LineKind::Element(ScriptElement::Transition {
            text: format_inline(line),
        });
    }

    if let Some(rest) = line.strip_prefix('>') {
        return LineKind::Element(ScriptElement::Centered {
            text: format_inline(trim_line(rest)),
            character,
        });
    }

    match line.strip_suffix('^') {
        Some(rest) => LineKind::Paired(Dialogue {
            text: format_inline(trim_line(rest)),
            character,
        }),
        None => LineKind::Element(ScriptElement::Dialogue(Dialogue {
            text: format_inline(line),
            character,
        })),
    }
}
