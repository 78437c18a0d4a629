use serde::Serialize;

/// One line of spoken dialogue and the speaker in effect when it was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dialogue {
    pub text: String,
    pub character: String,
}

/// Script elements parsed from Fountain-style markup.
///
/// Text is stored with inline formatting already resolved to `<b>`, `<i>`
/// and `<u>` tags. Character cues are not elements of their own; they set the
/// `character` carried by everything after them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptElement {
    SceneHeading {
        text: String,
    },
    Action {
        text: String,
        character: String,
    },
    StageDirection {
        text: String,
        character: String,
    },
    Lyrics {
        text: String,
        character: String,
    },
    Transition {
        text: String,
    },
    Centered {
        text: String,
        character: String,
    },
    Dialogue(Dialogue),
    DualDialogue {
        left: Dialogue,
        right: Dialogue,
    },
}

impl ScriptElement {
    /// Short name of the element kind, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ScriptElement::SceneHeading { .. } => "scene_heading",
            ScriptElement::Action { .. } => "action",
            ScriptElement::StageDirection { .. } => "stage_direction",
            ScriptElement::Lyrics { .. } => "lyrics",
            ScriptElement::Transition { .. } => "transition",
            ScriptElement::Centered { .. } => "centered",
            ScriptElement::Dialogue(_) => "dialogue",
            ScriptElement::DualDialogue { .. } => "dual_dialogue",
        }
    }

    /// Formatted text of the element. `None` for dual dialogue, which has two.
    pub fn text(&self) -> Option<&str> {
        match self {
            ScriptElement::SceneHeading { text }
            | ScriptElement::Transition { text }
            | ScriptElement::Action { text, .. }
            | ScriptElement::StageDirection { text, .. }
            | ScriptElement::Lyrics { text, .. }
            | ScriptElement::Centered { text, .. } => Some(text),
            ScriptElement::Dialogue(d) => Some(&d.text),
            ScriptElement::DualDialogue { .. } => None,
        }
    }

    /// Ambient character attached at parse time.
    /// Scene headings, transitions and dual dialogue have none.
    pub fn character(&self) -> Option<&str> {
        match self {
            ScriptElement::Action { character, .. }
            | ScriptElement::StageDirection { character, .. }
            | ScriptElement::Lyrics { character, .. }
            | ScriptElement::Centered { character, .. } => Some(character),
            ScriptElement::Dialogue(d) => Some(&d.character),
            ScriptElement::SceneHeading { .. }
            | ScriptElement::Transition { .. }
            | ScriptElement::DualDialogue { .. } => None,
        }
    }

    /// Whether the element takes part in step-by-step navigation.
    pub fn is_navigable(&self) -> bool {
        !matches!(self, ScriptElement::SceneHeading { .. })
    }
}
