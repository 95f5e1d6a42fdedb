use crate::Time;

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct PersonId(pub i32);

impl PersonId {
    pub fn stub() -> PersonId {
        PersonId(0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub actor_id: String,
    #[serde(default)]
    pub local: bool,
    #[serde(default)]
    pub published: Time,
}

impl Person {
    pub fn stub() -> Person {
        Person {
            id: PersonId::stub(),
            name: String::from("stub"),
            display_name: None,
            actor_id: String::new(),
            local: true,
            published: Time::default(),
        }
    }

    /// Name to display, preferring the display name when the user set one
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}
