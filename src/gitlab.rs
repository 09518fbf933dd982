use serde::{de::Error as _, Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "nullable")]
    pub web_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub default_branch: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ObjectAttributes {
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PushEvent {
    #[serde(default, deserialize_with = "nullable")]
    pub user_username: String,
    #[serde(rename = "ref", default, deserialize_with = "nullable")]
    pub reference: String,
    #[serde(default, deserialize_with = "nullable")]
    pub project: Project,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MergeRequestEvent {
    #[serde(default, deserialize_with = "nullable")]
    pub user: User,
    #[serde(default, deserialize_with = "nullable")]
    pub project: Project,
    #[serde(default, deserialize_with = "nullable")]
    pub object_attributes: ObjectAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteEvent {
    #[serde(default, deserialize_with = "nullable")]
    pub user: User,
    #[serde(default, deserialize_with = "nullable")]
    pub project: Project,
    #[serde(default, deserialize_with = "nullable")]
    pub object_attributes: ObjectAttributes,
}

/// A webhook payload, discriminated by its `object_kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Push(PushEvent),
    MergeRequest(MergeRequestEvent),
    Note(NoteEvent),
    /// Any other kind, including a missing one. Holds the raw `object_kind`.
    Unknown(String),
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Tagged {
            #[serde(default, deserialize_with = "nullable")]
            object_kind: String,
            #[serde(flatten)]
            payload: serde_json::Map<String, serde_json::Value>,
        }

        let Tagged {
            object_kind,
            payload,
        } = match Option::<Tagged>::deserialize(de)? {
            Some(tagged) => tagged,
            None => return Ok(Event::Unknown(String::new())),
        };
        let payload = serde_json::Value::Object(payload);

        let event = match object_kind.as_str() {
            "push" => serde_json::from_value(payload).map(Event::Push),
            "merge_request" => serde_json::from_value(payload).map(Event::MergeRequest),
            "note" => serde_json::from_value(payload).map(Event::Note),
            _ => return Ok(Event::Unknown(object_kind)),
        };
        event.map_err(D::Error::custom)
    }
}

impl Event {
    pub fn kind(&self) -> &str {
        match self {
            Event::Push(_) => "push",
            Event::MergeRequest(_) => "merge_request",
            Event::Note(_) => "note",
            Event::Unknown(kind) => kind,
        }
    }
}

fn nullable<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(de).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Event {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn push_reads_top_level_actor() {
        let event = decode(
            r#"{
                "object_kind": "push",
                "user_username": "alice",
                "user_name": "Alice",
                "ref": "refs/heads/main",
                "checkout_sha": "da1560886d4f094c3e6c9ef40349f7d38b5d27d7",
                "project": {
                    "web_url": "https://git.example.com/g/p",
                    "name": "p",
                    "default_branch": "main"
                }
            }"#,
        );

        assert_eq!(
            event,
            Event::Push(PushEvent {
                user_username: "alice".into(),
                reference: "refs/heads/main".into(),
                project: Project {
                    web_url: "https://git.example.com/g/p".into(),
                    name: "p".into(),
                    default_branch: "main".into(),
                },
            })
        );
    }

    #[test]
    fn merge_request_reads_nested_actor() {
        let event = decode(
            r#"{
                "object_kind": "merge_request",
                "user": {"username": "carol", "name": "Carol"},
                "object_attributes": {
                    "iid": 7,
                    "title": "Add relay",
                    "url": "https://git.example.com/g/p/-/merge_requests/7"
                }
            }"#,
        );

        let mr = match event {
            Event::MergeRequest(mr) => mr,
            other => panic!("expected merge request, got {:?}", other),
        };
        assert_eq!(mr.user.username, "carol");
        assert_eq!(mr.object_attributes.title, "Add relay");
        assert_eq!(
            mr.object_attributes.url,
            "https://git.example.com/g/p/-/merge_requests/7"
        );
        assert_eq!(mr.project, Project::default());
    }

    #[test]
    fn note_reads_nested_actor() {
        let event = decode(
            r#"{"object_kind":"note","user":{"username":"bob"},"object_attributes":{"url":"https://git.example.com/g/p/issues/3#note_9"}}"#,
        );

        let note = match event {
            Event::Note(note) => note,
            other => panic!("expected note, got {:?}", other),
        };
        assert_eq!(note.user.username, "bob");
        assert_eq!(
            note.object_attributes.url,
            "https://git.example.com/g/p/issues/3#note_9"
        );
    }

    #[test]
    fn missing_and_null_fields_are_empty() {
        let event = decode(r#"{"object_kind":"push","user_username":null,"project":null}"#);
        assert_eq!(event, Event::Push(PushEvent::default()));

        let event = decode(r#"{"object_kind":"note","user":{"username":null}}"#);
        assert_eq!(event, Event::Note(NoteEvent::default()));
    }

    #[test]
    fn unrecognized_kinds_are_kept() {
        assert_eq!(
            decode(r#"{"object_kind":"pipeline","object_attributes":{"id":1}}"#),
            Event::Unknown("pipeline".into())
        );
        assert_eq!(decode(r#"{"object_kind":""}"#), Event::Unknown(String::new()));
        assert_eq!(decode(r#"{"object_kind":null}"#), Event::Unknown(String::new()));
        assert_eq!(decode("{}"), Event::Unknown(String::new()));
        assert_eq!(decode("null"), Event::Unknown(String::new()));
    }

    #[test]
    fn kind_round_trips_the_discriminator() {
        assert_eq!(decode(r#"{"object_kind":"push"}"#).kind(), "push");
        assert_eq!(decode(r#"{"object_kind":"tag_push"}"#).kind(), "tag_push");
    }

    #[test]
    fn wrong_shapes_are_errors() {
        assert!(serde_json::from_str::<Event>("[]").is_err());
        assert!(serde_json::from_str::<Event>(r#"{"object_kind":5}"#).is_err());
        assert!(serde_json::from_str::<Event>(r#"{"object_kind":"push","ref":1}"#).is_err());
        assert!(serde_json::from_str::<Event>(r#"{"object_kind":"note","user":"bob"}"#).is_err());
        assert!(serde_json::from_str::<Event>("{").is_err());
    }
}
