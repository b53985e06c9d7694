use crate::config::admin_user_conf::AdminUserConfig;
use crate::dto::user_dto::RegisterRequest;
use crate::model::user::{User, UserChanges};
use crate::repository::repository_error::RepositoryError;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub const EMAIL_TAKEN: &str = "Email already registered";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const USER_NOT_FOUND: &str = "User not found";

#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, ServiceError>;
    async fn register(&self, request: RegisterRequest) -> Result<User, ServiceError>;
    /// A missing email or password never matches.
    async fn login(&self, email: Option<String>, password: Option<String>) -> Result<User, ServiceError>;
    async fn update_user(&self, id: ObjectId, changes: UserChanges) -> Result<User, ServiceError>;
    async fn delete_user(&self, id: ObjectId) -> Result<User, ServiceError>;
    /// Creates the configured administrator unless the email is taken.
    /// Returns whether a user was created.
    async fn bootstrap_admin(&self, admin: &AdminUserConfig) -> Result<bool, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

fn email_taken_or(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::AlreadyExists(_) => ServiceError::Conflict(EMAIL_TAKEN.to_string()),
        other => other.into(),
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.user_repo.list().await?)
    }

    #[instrument(skip(self, request), fields(email = ?request.email))]
    async fn register(&self, request: RegisterRequest) -> Result<User, ServiceError> {
        info!("Registering new user");
        if let Some(email) = &request.email {
            if self.user_repo.find_by_email(email).await?.is_some() {
                warn!("Email already registered");
                return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
            }
        }
        let user = User {
            id: None,
            name: request.name,
            email: request.email,
            password: request.password,
            phone_number: None,
            is_admin: false,
        };
        // The unique index still rejects a racing registration.
        let inserted = self.user_repo.insert(user).await.map_err(email_taken_or)?;
        info!("User registered");
        Ok(inserted)
    }

    #[instrument(skip(self, password), fields(email = ?email))]
    async fn login(&self, email: Option<String>, password: Option<String>) -> Result<User, ServiceError> {
        let (Some(email), Some(password)) = (email, password) else {
            warn!("Login without email or password");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };
        match self.user_repo.find_by_credentials(&email, &password).await? {
            Some(user) => {
                info!("User logged in");
                Ok(user)
            }
            None => {
                warn!("Invalid credentials");
                Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()))
            }
        }
    }

    #[instrument(skip(self, changes), fields(id = %id))]
    async fn update_user(&self, id: ObjectId, changes: UserChanges) -> Result<User, ServiceError> {
        self.user_repo.update(id, changes).await.map_err(|e| match e {
            RepositoryError::NotFound(_) => ServiceError::NotFound(USER_NOT_FOUND.to_string()),
            other => email_taken_or(other),
        })
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_user(&self, id: ObjectId) -> Result<User, ServiceError> {
        self.user_repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound(_) => ServiceError::NotFound(USER_NOT_FOUND.to_string()),
            other => other.into(),
        })
    }

    #[instrument(skip(self, admin), fields(email = %admin.email))]
    async fn bootstrap_admin(&self, admin: &AdminUserConfig) -> Result<bool, ServiceError> {
        if self.user_repo.find_by_email(&admin.email).await?.is_some() {
            info!("Admin user already exists, skipping creation");
            return Ok(false);
        }
        let user = User {
            id: None,
            name: Some(admin.name.clone()),
            email: Some(admin.email.clone()),
            password: Some(admin.password.clone()),
            phone_number: None,
            is_admin: true,
        };
        match self.user_repo.insert(user).await {
            Ok(_) => {
                info!("First admin user created");
                Ok(true)
            }
            Err(RepositoryError::AlreadyExists(_)) => Ok(false),
            Err(e) => {
                error!("Failed to create admin user: {e}");
                Err(e.into())
            }
        }
    }
}
