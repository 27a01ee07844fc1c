#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use super::user::{AuthUser, NewUser, UserRepository};
use crate::AuthError;

#[derive(Clone, Default)]
pub struct MockUserRepository {
    pub users: Arc<Mutex<Vec<AuthUser>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<AuthUser>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<AuthUser, AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let now = Utc::now();
        let created = AuthUser {
            id: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            hashed_password: user.hashed_password.clone(),
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        drop(users);

        Ok(created)
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<AuthUser>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn delete_user(&self, id: &str) -> Result<(), AuthError> {
        let mut users = self.users.lock().unwrap();
        let len_before = users.len();
        users.retain(|u| u.id != id);
        if users.len() < len_before {
            Ok(())
        } else {
            Err(AuthError::UserNotFound)
        }
    }
}
