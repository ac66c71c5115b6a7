use anyhow::Context as _;
use serde::Deserialize;

const USERS_JSON: &str = r#"[
  { "id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz" },
  { "id": 2, "name": "Ervin Howell", "username": "Antonette", "email": "Shanna@melissa.tv" },
  { "id": 3, "name": "Clementine Bauch", "username": "Samantha", "email": "Nathan@yesenia.net" },
  { "id": 4, "name": "Patricia Lebsack", "username": "Karianne", "email": "Julianne.OConner@kory.org" },
  { "id": 5, "name": "Chelsey Dietrich", "username": "Kamren", "email": "Lucio_Hettinger@annie.ca" },
  { "id": 6, "name": "Dennis Schulist", "username": "Leopoldo_Corkery", "email": "Karley_Dach@jasper.info" },
  { "id": 7, "name": "Kurtis Weissnat", "username": "Elwyn.Skiles", "email": "Telly.Hoeger@billy.biz" },
  { "id": 8, "name": "Nicholas Runolfsdottir V", "username": "Maxime_Nienow", "email": "Sherwood@rosamond.me" }
]"#;

#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(skip)]
    key: String,
}

impl User {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Table columns. `Custom` renders an element rather than a text field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Id,
    Name,
    Username,
    Email,
    Custom,
}

#[derive(Clone, Debug)]
pub struct Column {
    pub key: &'static str,
    pub title: &'static str,
    pub kind: ColumnKind,
    pub width: f32,
}

pub fn demo_columns() -> Vec<Column> {
    vec![
        Column {
            key: "0",
            title: "id",
            kind: ColumnKind::Id,
            width: 56.,
        },
        Column {
            key: "1",
            title: "name",
            kind: ColumnKind::Name,
            width: 200.,
        },
        Column {
            key: "2",
            title: "username",
            kind: ColumnKind::Username,
            width: 150.,
        },
        Column {
            key: "3",
            title: "email",
            kind: ColumnKind::Email,
            width: 220.,
        },
        Column {
            key: "custom",
            title: "custom",
            kind: ColumnKind::Custom,
            width: 90.,
        },
    ]
}

pub fn demo_users() -> anyhow::Result<Vec<User>> {
    parse_users(USERS_JSON)
}

fn parse_users(json: &str) -> anyhow::Result<Vec<User>> {
    let mut users: Vec<User> =
        serde_json::from_str(json).context("failed to parse demo users")?;
    for user in &mut users {
        user.key = user.id.to_string();
    }
    Ok(users)
}

pub fn cell_text(user: &User, kind: ColumnKind) -> String {
    match kind {
        ColumnKind::Id => user.id.to_string(),
        ColumnKind::Name => user.name.clone(),
        ColumnKind::Username => user.username.clone().unwrap_or_default(),
        ColumnKind::Email => user.email.clone().unwrap_or_default(),
        ColumnKind::Custom => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_users_are_keyed_by_id() {
        let users = demo_users().unwrap();
        assert_eq!(users.len(), 8);
        assert_eq!(users[0].key(), "1");
        assert_eq!(users[7].key(), "8");
        assert_eq!(cell_text(&users[1], ColumnKind::Username), "Antonette");
    }

    #[test]
    fn optional_fields_may_be_missing() {
        let users = parse_users(r#"[{ "id": 42, "name": "Solo" }]"#).unwrap();
        assert_eq!(users[0].key(), "42");
        assert_eq!(cell_text(&users[0], ColumnKind::Email), "");
    }

    #[test]
    fn malformed_json_reports_context() {
        let err = parse_users("{").unwrap_err();
        assert!(err.to_string().contains("demo users"));
    }

    #[test]
    fn column_keys_are_unique() {
        let columns = demo_columns();
        let mut keys: Vec<_> = columns.iter().map(|c| c.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), columns.len());
    }
}
