use crate::crypto::{Argon2Hasher, PasswordHasher, generate_user_id};
use crate::validators::{validate_email, validate_password, validate_username};
use crate::{AuthError, AuthUser, NewUser, SecretString, UserRepository};

pub struct SignupAction<U, H = Argon2Hasher> {
    users: U,
    hasher: H,
}

impl<U: UserRepository> SignupAction<U> {
    pub fn new(users: U) -> Self {
        Self::with_hasher(users, Argon2Hasher::default())
    }
}

impl<U: UserRepository, H: PasswordHasher> SignupAction<U, H> {
    pub fn with_hasher(users: U, hasher: H) -> Self {
        SignupAction { users, hasher }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// - `MissingCredentials` when email or password is empty
    /// - `InvalidEmail`, `InvalidPassword` or `Validation` for bad input
    /// - `UserAlreadyExists` when the email is taken
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "signup", skip_all, err)
    )]
    pub async fn execute(
        &self,
        email: &str,
        password: &SecretString,
        username: Option<&str>,
    ) -> Result<AuthUser, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        validate_email(email)?;
        validate_password(password.expose_secret())?;
        let username = validate_username(username)?;

        if self.users.find_user_by_email(email).await?.is_some() {
            log::info!(target: "parlor_auth", "msg=\"signup rejected\", reason=\"email taken\"");
            return Err(AuthError::UserAlreadyExists);
        }

        let hashed_password = self.hasher.hash(password)?;
        let user = self
            .users
            .create_user(&NewUser {
                id: generate_user_id(),
                email: email.to_owned(),
                username,
                hashed_password,
            })
            .await?;

        log::info!(target: "parlor_auth", "msg=\"signup success\", user_id={}", user.id);

        Ok(user)
    }
}
