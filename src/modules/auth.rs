use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use diesel::pg::PgConnection;
use log::{error, warn};
use rand::RngCore;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};

use crate::errors::{CustomResult, Error};
use crate::modules::models::general::establish_connection;
use crate::modules::models::user::{AuthToken, User};

/// Permission levels carried by every login.
pub const PERM_VIEWER: i32 = 0;
pub const PERM_SWIMMER: i32 = 1;
pub const PERM_COACH: i32 = 2;
pub const PERM_MANAGER: i32 = 3;
pub const PERM_ADMIN: i32 = 4;

/// # build an opaque session token
/// `base64(user_id).random`, the id segment lets clients show who a token
/// belongs to without a round-trip
pub fn make_token(user_id: i64) -> String {
    let mut raw = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut raw);

    format!(
        "{}.{}",
        STANDARD.encode(user_id.to_string()),
        URL_SAFE_NO_PAD.encode(raw)
    )
}

/// decode the user id segment out of a session token
pub fn strip_token(token: &str) -> Option<i64> {
    let id_segment = token.split('.').next()?;
    let decoded = STANDARD.decode(id_segment).ok()?;
    String::from_utf8(decoded).ok()?.parse::<i64>().ok()
}

pub fn hash_password(password: &str) -> CustomResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| Error::PasswordHashError {
        reason: e.to_string(),
    })
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// # log a user in
/// verifies the password and records a fresh token; the caller never learns
/// whether the username or the password was wrong
pub fn login(conn: &mut PgConnection, username: &str, password: &str) -> CustomResult<(User, String)> {
    let user = match User::get_by_username(conn, username)? {
        Some(user) => user,
        None => {
            warn!(target:"auth:login", "unknown username: {}", username);
            return Err(Error::UnauthorizedError {
                reason: "username/password mismatch".to_string(),
            });
        }
    };

    if !verify_password(password, &user.password) {
        warn!(target:"auth:login", "bad password for: {}", username);
        return Err(Error::UnauthorizedError {
            reason: "username/password mismatch".to_string(),
        });
    }

    let token = make_token(user.id);
    AuthToken::new(conn, user.id, &token)?;

    Ok((user, token))
}

/// The authenticated caller, resolved from the `token` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub permissions: i32,
    pub active: bool,
    pub linked_swimmer: Option<i64>,
}

impl AuthUser {
    /// check the caller against a required permission level
    pub fn require(&self, level: i32) -> Result<(), Status> {
        if !self.active {
            return Err(Status::Forbidden);
        }
        if self.permissions < level {
            return Err(Status::Forbidden);
        }
        Ok(())
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthUser {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = match req.headers().get_one("token") {
            Some(token) => token.to_string(),
            None => return Outcome::Error((Status::BadRequest, ())),
        };

        let conn = &mut establish_connection();

        let auth_token = match AuthToken::get(conn, &token) {
            Ok(Some(auth_token)) => auth_token,
            Ok(None) => return Outcome::Error((Status::Unauthorized, ())),
            Err(e) => {
                error!(target:"auth:guard", "Error loading token: {}", e);
                return Outcome::Error((Status::InternalServerError, ()));
            }
        };

        match User::get_by_id(conn, auth_token.user_id) {
            Ok(user) => Outcome::Success(AuthUser {
                id: user.id,
                permissions: user.permissions,
                active: user.active,
                linked_swimmer: user.linked_swimmer,
            }),
            Err(e) => {
                error!(target:"auth:guard", "Error loading token user: {}", e);
                Outcome::Error((Status::Unauthorized, ()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let token = make_token(21274392002560);
        assert_eq!(strip_token(&token), Some(21274392002560));
    }

    #[test]
    fn garbage_tokens_strip_to_none() {
        assert_eq!(strip_token(""), None);
        assert_eq!(strip_token("not-base64.xyz"), None);
        assert_eq!(strip_token("bm90LWEtbnVtYmVy.xyz"), None);
    }

    #[test]
    fn tokens_differ_per_login() {
        assert_ne!(make_token(1), make_token(1));
    }

    #[test]
    fn password_round_trip() {
        let hash = bcrypt::hash("sw1m-fast", 4).unwrap();
        assert!(verify_password("sw1m-fast", &hash));
        assert!(!verify_password("sw1m-slow", &hash));
    }

    #[test]
    fn permission_levels() {
        let user = AuthUser {
            id: 1,
            permissions: PERM_COACH,
            active: true,
            linked_swimmer: None,
        };
        assert!(user.require(PERM_VIEWER).is_ok());
        assert!(user.require(PERM_COACH).is_ok());
        assert!(user.require(PERM_ADMIN).is_err());

        let inactive = AuthUser { active: false, ..user };
        assert!(inactive.require(PERM_VIEWER).is_err());
    }
}
