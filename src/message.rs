use std::fmt;

use crate::gitlab::{Event, MergeRequestEvent, NoteEvent, PushEvent};

const BRANCH_PREFIX: &str = "refs/heads/";

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Push(push) => fmt::Display::fmt(push, f),
            Event::MergeRequest(mr) => fmt::Display::fmt(mr, f),
            Event::Note(note) => fmt::Display::fmt(note, f),
            Event::Unknown(_) => f.write_str("Unknown event type"),
        }
    }
}

impl PushEvent {
    pub fn branch(&self) -> &str {
        self.reference
            .strip_prefix(BRANCH_PREFIX)
            .unwrap_or(&self.reference)
    }

    /// `<web_url>/-/tree/<branch>` with the branch query-escaped.
    pub fn branch_link(&self) -> String {
        let branch: String =
            url::form_urlencoded::byte_serialize(self.branch().as_bytes()).collect();
        format!("{}/-/tree/{}", self.project.web_url, branch)
    }
}

impl fmt::Display for PushEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "New push by {} to {}:\n\nRef: {}\nBranch Page: {}",
            self.user_username,
            self.project.name,
            self.reference,
            self.branch_link()
        )
    }
}

impl fmt::Display for MergeRequestEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "New merge request by {}:\n\nTitle: {}\nLink: {}",
            self.user.username, self.object_attributes.title, self.object_attributes.url
        )
    }
}

impl fmt::Display for NoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "New comment by {}:\n\nLink: {}",
            self.user.username, self.object_attributes.url
        )
    }
}
