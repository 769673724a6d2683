use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::{StoreError, present};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub email: Option<String>,
}

/// Partial update; absent or blank fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub email: Option<String>,
}

pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self { users: RwLock::new(users) }
    }

    /// Store pre-filled with the demo users
    pub fn seeded() -> Self {
        let user = |id, name: &str, age, email: &str| User {
            id,
            name: name.to_string(),
            age,
            email: email.to_string(),
        };

        Self::new(vec![
            user(1, "Alice", 25, "alice@example.com"),
            user(2, "Bob", 30, "bob@example.com"),
            user(3, "Carol", 28, "carol@example.com"),
        ])
    }

    pub fn list(&self) -> Vec<User> {
        self.users.read().clone()
    }

    pub fn get(&self, id: u32) -> Option<User> {
        self.users.read().iter().find(|user| user.id == id).cloned()
    }

    pub fn create(&self, request: NewUser) -> Result<User, StoreError> {
        let name = present(request.name).ok_or(StoreError::MissingField("name"))?;
        let age = request.age.ok_or(StoreError::MissingField("age"))?;
        let email = present(request.email).ok_or(StoreError::MissingField("email"))?;

        let mut users = self.users.write();
        let id = users.iter().map(|user| user.id).max().unwrap_or_default() + 1;
        let user = User { id, name, age, email };
        users.push(user.clone());

        Ok(user)
    }

    pub fn update(&self, id: u32, update: UserUpdate) -> Option<User> {
        let mut users = self.users.write();
        let user = users.iter_mut().find(|user| user.id == id)?;

        if let Some(name) = present(update.name) {
            user.name = name;
        }
        if let Some(age) = update.age.filter(|&age| age > 0) {
            user.age = age;
        }
        if let Some(email) = present(update.email) {
            user.email = email;
        }

        Some(user.clone())
    }

    pub fn delete(&self, id: u32) -> bool {
        let mut users = self.users.write();
        let before = users.len();
        users.retain(|user| user.id != id);
        users.len() != before
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
