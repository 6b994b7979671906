//! Example notes written on first use of local storage.

use chrono::{DateTime, Duration, Utc};

use flownote_core::{new_note_id, Note, NoteCategory, NoteDraft};

/// Built-in example notes, newest first, created relative to `now`.
pub fn seed_notes(now: DateTime<Utc>) -> Vec<Note> {
    let drafts = [
        NoteDraft::new(NoteCategory::Work)
            .title("Meeting Notes - Q1 Planning")
            .content(
                "Discussed quarterly goals and roadmap priorities.\n\n\
                 - Ship the mobile redesign\n\
                 - Hire two engineers\n\
                 - Review the budget in March",
            )
            .tags(["meeting", "planning", "q1"])
            .pinned(true),
        NoteDraft::new(NoteCategory::Ideas)
            .title("App Feature Ideas")
            .content("Dark mode, offline sync, note sharing, and markdown export.")
            .tags(["features", "brainstorm"]),
        NoteDraft::new(NoteCategory::Tasks)
            .title("Weekly To-Do")
            .content("Finish the report, call the dentist, renew the gym membership.")
            .tags(["todo", "weekly"]),
        NoteDraft::new(NoteCategory::Personal)
            .title("Book Recommendations")
            .content("Atomic Habits, Deep Work, The Pragmatic Programmer.")
            .tags(["books", "reading"]),
    ];

    drafts
        .into_iter()
        .enumerate()
        .map(|(age_days, draft)| {
            Note::from_draft(new_note_id(), draft, now - Duration::days(age_days as i64))
        })
        .collect()
}
