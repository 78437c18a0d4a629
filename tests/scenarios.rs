use std::cell::RefCell;
use std::rc::Rc;

use scriptfollow::{
    Config, Dialogue, Error, NavCommand, Navigator, ScriptElement, follow, follow_with_config, parse,
};

const BIG_FISH: &str = "\
Title: Big Fish
Author: John August
Date: 2003

.PROLOGUE

INT. BEDROOM - NIGHT

EDWARD
There are some fish that *cannot* be caught.
(beat)
It's not that they're __faster__ or stronger.

!Will rolls his eyes.

YOUNG WILL
Tell it again.^
WILL
Not again.^

~Oh the **big** river
> The End <
Slow fade out.
";

fn dialogue(text: &str, character: &str) -> Dialogue {
    Dialogue {
        text: text.to_string(),
        character: character.to_string(),
    }
}

#[test]
fn scenario_a_cue_sets_character_for_next_line() {
    let elements = parse("INT. HOUSE - DAY\nJOHN\nHello there.");
    assert_eq!(
        elements,
        vec![
            ScriptElement::SceneHeading {
                text: "INT. HOUSE - DAY".to_string()
            },
            ScriptElement::Dialogue(dialogue("Hello there.", "JOHN")),
        ]
    );
}

#[test]
fn scenario_b_paired_lines_merge() {
    assert_eq!(
        parse("Hi^\nBob^"),
        vec![ScriptElement::DualDialogue {
            left: dialogue("Hi", ""),
            right: dialogue("Bob", ""),
        }]
    );
}

#[test]
fn scenario_c_bold_line_without_character() {
    let elements = parse("*hello*");
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].text(), Some("<b>hello</b>"));
    assert_eq!(elements[0].character(), Some(""));
    assert_eq!(elements[0].kind(), "dialogue");
}

#[test]
fn scenario_d_window_at_top_of_long_script() {
    let script: String = (0..20).map(|i| format!("line {i}\n")).collect();
    let navigator = follow(&script).unwrap();

    assert_eq!(navigator.navigable().len(), 20);
    let window = navigator.current_window().unwrap();
    assert_eq!(window.start, 0);
    assert_eq!(window.end(), Some(10));
    assert_eq!(window.active_offset, 0);
}

#[test]
fn full_script_parses_in_order() {
    let elements = parse(BIG_FISH);
    let kinds: Vec<&str> = elements.iter().map(ScriptElement::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "scene_heading",
            "scene_heading",
            "dialogue",
            "stage_direction",
            "dialogue",
            "action",
            "dual_dialogue",
            "lyrics",
            "centered",
            "transition",
        ]
    );

    assert_eq!(
        elements[2].text(),
        Some("There are some fish that <b>cannot</b> be caught.")
    );
    assert_eq!(elements[4].text(), Some("It's not that they're <u>faster</u> or stronger."));
    assert_eq!(elements[5].character(), Some("EDWARD"));
    assert_eq!(
        elements[6],
        ScriptElement::DualDialogue {
            left: dialogue("Tell it again.", "YOUNG WILL"),
            right: dialogue("Not again.", "WILL"),
        }
    );
    assert_eq!(elements[7].text(), Some("<i>Oh the <b><i>big</i></b> river</i>"));
    assert_eq!(elements[8].text(), Some("The End <"));
    assert_eq!(elements[9].character(), None);
}

#[test]
fn parsing_is_repeatable() {
    assert_eq!(parse(BIG_FISH), parse(BIG_FISH));
}

#[test]
fn follow_walks_the_navigable_sequence() {
    let mut navigator = follow(BIG_FISH).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        navigator.subscribe(move |w| {
            if let Some(active) = w.active() {
                seen.borrow_mut().push(active.kind());
            }
        });
    }

    // Two scene headings are skipped
    assert_eq!(navigator.navigable().len(), 8);
    assert_eq!(navigator.current_window().unwrap().len(), 8);

    while navigator.apply(NavCommand::Advance).unwrap() {}
    assert_eq!(navigator.cursor(), Some(7));
    navigator.apply(NavCommand::ResetToTop).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 8);
    assert_eq!(seen.first(), Some(&"stage_direction"));
    assert_eq!(seen[6], "transition");
    assert_eq!(seen.last(), Some(&"dialogue"));
}

#[test]
fn configured_window_size_is_used() {
    let config = Config::from_toml_str("[navigation]\nwindow_size = 3\n").unwrap();
    let mut navigator = follow_with_config(BIG_FISH, &config).unwrap();
    navigator.advance().unwrap();
    navigator.advance().unwrap();

    let window = navigator.current_window().unwrap();
    assert_eq!(window.len(), 3);
    assert_eq!(window.start, 1);
    assert_eq!(window.active_offset, 1);
}

#[test]
fn even_configured_window_size_is_rejected() {
    let config = Config::from_toml_str("[navigation]\nwindow_size = 10\n").unwrap();
    assert!(matches!(
        follow_with_config(BIG_FISH, &config),
        Err(Error::InvalidWindowSize { size: 10 })
    ));
}

#[test]
fn shared_navigator_drives_many_views() {
    let navigator = Rc::new(RefCell::new(Navigator::default()));
    let views: Vec<Rc<RefCell<Option<usize>>>> =
        (0..3).map(|_| Rc::new(RefCell::new(None))).collect();

    for view in &views {
        let view = Rc::clone(view);
        navigator
            .borrow_mut()
            .subscribe(move |w| *view.borrow_mut() = Some(w.start + w.active_offset));
    }

    navigator.borrow_mut().load(parse(BIG_FISH));
    navigator.borrow_mut().advance().unwrap();
    navigator.borrow_mut().advance().unwrap();

    for view in &views {
        assert_eq!(*view.borrow(), Some(2));
    }
}

#[test]
fn window_serializes_for_renderers() {
    let navigator = follow("JOHN\nHello.\nMARY\nHi.").unwrap();
    let window = navigator.current_window().unwrap();
    let json = serde_json::to_value(window).unwrap();

    assert_eq!(json["start"], 0);
    assert_eq!(json["active_offset"], 0);
    assert_eq!(json["elements"][1]["character"], "MARY");
}
