use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, patch, post};
use serde::Deserialize;

use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::modules::auth::{hash_password, verify_password, AuthUser, PERM_ADMIN};
use crate::modules::models::general::establish_connection;
use crate::modules::models::swimmer::Swimmer;
use crate::modules::models::user::{NewUser, User, UserChanges};
use crate::modules::snowflake::{generate_id, IdType};

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/***** MODIFY USERS *****/

#[post("/users", data = "<new_user>")]
pub fn save_one(new_user: Json<NewUserData>, auth: AuthUser) -> Result<Json<User>, Status> {
    auth.require(PERM_ADMIN)?;

    let data = new_user.into_inner();
    if data.username.is_empty() || data.password.is_empty() {
        return Err(Status::BadRequest);
    }
    if !(0..=PERM_ADMIN).contains(&data.permissions) {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();
    let taken = db_handle_get_error_http!(
        User::get_by_username(conn, &data.username),
        "routes/api/user:save_one",
        "user"
    );
    if taken.is_some() {
        return Err(Status::Conflict);
    }

    let password = match hash_password(&data.password) {
        Ok(hash) => hash,
        Err(error) => {
            error!(target:"routes/api/user:save_one", "Error hashing password: {}", error);
            return Err(Status::InternalServerError);
        }
    };
    let id = match generate_id(IdType::User, 0) {
        Ok(id) => id,
        Err(error) => {
            error!(target:"routes/api/user:save_one", "Error generating id: {}", error);
            return Err(Status::InternalServerError);
        }
    };

    let user = db_handle_get_error_http!(
        User::new(
            conn,
            &NewUser {
                id,
                username: data.username,
                password,
                name: data.name,
                email: data.email,
                permissions: data.permissions,
                active: true,
            }
        ),
        "routes/api/user:save_one",
        "user"
    );

    Ok(Json(user))
}

/// # update an account
/// anyone may edit their own profile fields; permissions and the active flag
/// take an admin
#[patch("/users/<user_id>", data = "<changes>")]
pub fn update_one(
    user_id: String,
    changes: Json<UserChanges>,
    auth: AuthUser,
) -> Result<Json<User>, Status> {
    let user_id = resolve_user_id(&user_id, &auth)?;
    let changes = changes.into_inner();

    // diesel rejects an empty changeset
    if changes.username.is_none()
        && changes.name.is_none()
        && changes.email.is_none()
        && changes.permissions.is_none()
        && changes.active.is_none()
    {
        return Err(Status::BadRequest);
    }

    if changes.permissions.is_some() || changes.active.is_some() {
        auth.require(PERM_ADMIN)?;
    } else if user_id != auth.id {
        auth.require(PERM_ADMIN)?;
    }
    if let Some(permissions) = changes.permissions {
        if !(0..=PERM_ADMIN).contains(&permissions) {
            return Err(Status::BadRequest);
        }
    }

    let conn = &mut establish_connection();

    if let Some(username) = &changes.username {
        let taken = db_handle_get_error_http!(
            User::get_by_username(conn, username),
            "routes/api/user:update_one",
            "user"
        );
        if matches!(taken, Some(ref other) if other.id != user_id) {
            return Err(Status::Conflict);
        }
    }

    let user = db_handle_get_error_http!(
        User::update_fields(conn, user_id, &changes),
        "routes/api/user:update_one",
        "user"
    );

    Ok(Json(user))
}

/// # change a password
/// self-service only, the old password is verified first
#[post("/users/<user_id>/password", data = "<data>")]
pub fn change_password(
    user_id: String,
    data: Json<PasswordChangeData>,
    auth: AuthUser,
) -> Result<Status, Status> {
    let user_id = resolve_user_id(&user_id, &auth)?;
    if user_id != auth.id {
        return Err(Status::Forbidden);
    }
    if data.new_password.is_empty() {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();
    let user = db_handle_get_error_http!(
        User::get_by_id(conn, user_id),
        "routes/api/user:change_password",
        "user"
    );
    if !verify_password(&data.old_password, &user.password) {
        return Err(Status::Forbidden);
    }

    let hash = match hash_password(&data.new_password) {
        Ok(hash) => hash,
        Err(error) => {
            error!(target:"routes/api/user:change_password", "Error hashing password: {}", error);
            return Err(Status::InternalServerError);
        }
    };
    db_handle_get_error_http!(
        User::set_password(conn, user_id, &hash),
        "routes/api/user:change_password",
        "user"
    );

    Ok(Status::Ok)
}

/// # link an account to a swimmer
/// a swimmer can be behind at most one login
#[patch("/users/<user_id>/link", data = "<data>")]
pub fn link_swimmer(
    user_id: String,
    data: Json<LinkData>,
    auth: AuthUser,
) -> Result<Json<User>, Status> {
    auth.require(PERM_ADMIN)?;
    let user_id = resolve_user_id(&user_id, &auth)?;

    let conn = &mut establish_connection();
    let exists = db_handle_get_error_http!(
        Swimmer::exists(conn, data.swimmer),
        "routes/api/user:link_swimmer",
        "swimmer"
    );
    if !exists {
        return Err(Status::BadRequest);
    }

    let taken = db_handle_get_error_http!(
        User::swimmer_link_taken(conn, data.swimmer),
        "routes/api/user:link_swimmer",
        "link"
    );
    if taken {
        return Err(Status::Conflict);
    }

    let user = db_handle_get_error_http!(
        User::link_swimmer(conn, user_id, data.swimmer),
        "routes/api/user:link_swimmer",
        "user"
    );

    Ok(Json(user))
}

/***** GETTERS *****/

#[get("/users/all")]
pub fn get_all(auth: AuthUser) -> Result<Json<Vec<User>>, Status> {
    auth.require(PERM_ADMIN)?;

    let conn = &mut establish_connection();
    let users = db_handle_get_error_http!(
        User::get_all(conn),
        "routes/api/user:get_all",
        "users"
    );

    Ok(Json(users))
}

/// # one account, `me` works for the caller's own
#[get("/users/<user_id>", rank = 2)]
pub fn get_one(user_id: String, auth: AuthUser) -> Result<Json<User>, Status> {
    let user_id = resolve_user_id(&user_id, &auth)?;
    if user_id != auth.id {
        auth.require(PERM_ADMIN)?;
    }

    let conn = &mut establish_connection();
    let user = db_handle_get_error_http!(
        User::get_by_id(conn, user_id),
        "routes/api/user:get_one",
        "user"
    );

    Ok(Json(user))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

fn resolve_user_id(user_id: &str, auth: &AuthUser) -> Result<i64, Status> {
    if user_id == "me" {
        return Ok(auth.id);
    }
    user_id.parse::<i64>().map_err(|_| Status::BadRequest)
}

#[derive(Deserialize)]
pub struct NewUserData {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub permissions: i32,
}

#[derive(Deserialize)]
pub struct PasswordChangeData {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct LinkData {
    pub swimmer: i64,
}
