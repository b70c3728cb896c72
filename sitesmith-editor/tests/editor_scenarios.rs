use serde_json::json;
use sitesmith_core::{Project, SectionType, Theme};
use sitesmith_editor::{EditError, ProjectEditor, MAX_HISTORY};

fn open_editor(name: &str) -> ProjectEditor {
    let mut editor = ProjectEditor::new();
    editor.create_project(Project::new(name, "blank", Theme::default()).unwrap());
    editor
}

fn rename(editor: &mut ProjectEditor, name: &str) {
    editor
        .record_change::<EditError, _>("project renamed", |project| {
            project.name = name.to_string();
            Ok(())
        })
        .unwrap();
}

#[test]
fn new_edit_discards_redo_branch() {
    let mut editor = open_editor("Site");
    rename(&mut editor, "v1");
    rename(&mut editor, "v2");

    assert!(editor.undo());
    assert!(editor.can_redo());

    rename(&mut editor, "v1b");
    assert!(!editor.can_redo());
    assert_eq!(editor.project().unwrap().name, "v1b");
}

#[test]
fn history_is_bounded_and_evicts_oldest() {
    let mut editor = open_editor("Site");

    let extra = 10;
    for i in 0..MAX_HISTORY + extra {
        rename(&mut editor, &format!("edit {i}"));
    }

    let history = editor.history();
    assert_eq!(history.len(), MAX_HISTORY);
    assert_eq!(history.cursor(), Some(MAX_HISTORY - 1));

    // The seed and the first `extra` edits were evicted; the oldest
    // surviving snapshot is the (extra+1)-th edit.
    assert_eq!(history.entries()[0].state.name, format!("edit {extra}"));
    assert_eq!(
        editor.project().unwrap().name,
        format!("edit {}", MAX_HISTORY + extra - 1)
    );

    // Walk all the way back: exactly MAX_HISTORY - 1 undo steps.
    let mut steps = 0;
    while editor.undo() {
        steps += 1;
    }
    assert_eq!(steps, MAX_HISTORY - 1);
    assert_eq!(editor.project().unwrap().name, format!("edit {extra}"));
}

#[test]
fn snapshots_are_independent_of_caller_copies() {
    let mut editor = open_editor("Site");
    editor.add_section(SectionType::Hero, None).unwrap();

    // Mutate a caller-side copy of the working document.
    let mut copy = editor.project().unwrap().clone();
    copy.name = "mangled".to_string();
    copy.sections.clear();

    let history = editor.history();
    let current = &history.entries()[history.cursor().unwrap()].state;
    assert_eq!(current.name, "Site");
    assert_eq!(current.sections.len(), 1);
    assert_eq!(editor.project().unwrap().sections.len(), 1);
}

#[test]
fn undo_redo_round_trip() {
    let mut editor = open_editor("d0");
    let d0 = editor.project().unwrap().clone();

    rename(&mut editor, "d1");
    let d1 = editor.project().unwrap().clone();

    rename(&mut editor, "d2");
    let d2 = editor.project().unwrap().clone();

    assert!(editor.undo());
    assert!(editor.undo());
    assert_eq!(editor.project().unwrap(), &d0);

    assert!(editor.redo());
    assert_eq!(editor.project().unwrap(), &d1);
    assert!(editor.redo());
    assert_eq!(editor.project().unwrap(), &d2);
}

#[test]
fn boundary_undo_redo_change_nothing() {
    let mut editor = open_editor("Site");
    rename(&mut editor, "v1");

    assert!(!editor.redo()); // already at the tail
    let before = editor.project().unwrap().clone();
    let len_before = editor.history().len();

    assert!(editor.undo());
    assert!(!editor.undo()); // at the oldest entry now

    assert_eq!(editor.history().len(), len_before);
    assert!(editor.redo());
    assert!(!editor.redo());
    assert_eq!(editor.project().unwrap(), &before);
}

#[test]
fn failed_mutator_is_atomic() {
    let mut editor = open_editor("Site");
    editor.add_section(SectionType::Hero, None).unwrap();

    let before = editor.project().unwrap().clone();
    let len_before = editor.history().len();
    editor.mark_saved();

    let result = editor.record_change::<EditError, _>("doomed edit", |project| {
        // Partially rework the draft, then fail.
        project.name = "halfway".to_string();
        project.sections.clear();
        Err(EditError::InvalidContentPath {
            path: "x".into(),
            reason: "boom".into(),
        })
    });

    assert!(result.is_err());
    assert_eq!(editor.project().unwrap(), &before);
    assert_eq!(editor.history().len(), len_before);
    assert!(!editor.can_redo());
    assert!(!editor.is_dirty());
}

#[test]
fn dirty_flag_lifecycle() {
    let mut editor = open_editor("Site");
    assert!(!editor.is_dirty());

    rename(&mut editor, "v1");
    assert!(editor.is_dirty());

    editor.mark_saved();
    assert!(editor.undo());
    assert!(editor.is_dirty());

    editor.mark_saved();
    assert!(editor.redo());
    assert!(editor.is_dirty());

    // Re-opening a project resets the flag.
    editor.load_project(Project::new("Other", "blank", Theme::default()).unwrap());
    assert!(!editor.is_dirty());

    editor.clear_project();
    assert!(!editor.is_dirty());
}

#[test]
fn linear_scenario_add_rename_undo_delete() {
    let mut editor = open_editor("Site");

    editor.add_section(SectionType::Hero, None).unwrap();
    let hero_id = editor.selected_section().unwrap();

    editor
        .update_section_content(hero_id, "headline", json!("Renamed"))
        .unwrap();

    assert!(editor.undo()); // back to the freshly added hero
    assert_eq!(
        editor.project().unwrap().section(hero_id).unwrap().content["headline"],
        json!("Welcome")
    );

    editor.remove_section(hero_id).unwrap(); // replaces the redo branch

    assert!(!editor.can_redo());
    let history = editor.history();
    assert_eq!(history.len(), 3); // seed, add, delete; the rename is gone
    assert_eq!(history.cursor(), Some(2));
    assert!(editor.project().unwrap().sections.is_empty());
}
