use log::error;
use rocket::http::Status;
use rocket::post;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::modules::auth::{login, AuthUser};
use crate::modules::models::general::establish_connection;
use crate::modules::models::user::User;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # exchange credentials for a session token
/// a failed login never says whether the username or the password was wrong
#[post("/auth/login", data = "<credentials>")]
pub fn post_login(credentials: Json<LoginData>) -> Result<Json<LoginResponse>, Status> {
    let conn = &mut establish_connection();

    let (user, token) = match login(conn, &credentials.username, &credentials.password) {
        Ok(result) => result,
        Err(Error::UnauthorizedError { .. }) => return Err(Status::Unauthorized),
        Err(error) => {
            error!(target:"routes/api/auth:post_login", "Error logging in: {}", error);
            return Err(Status::InternalServerError);
        }
    };

    if !user.active {
        return Err(Status::Forbidden);
    }

    Ok(Json(LoginResponse { token, user }))
}

/// # validate the caller's token
/// bumps latest_access and hands the account back; deactivated accounts get
/// a 403 even with a valid token
#[post("/auth/check")]
pub fn post_check(auth: AuthUser) -> Result<Json<User>, Status> {
    if !auth.active {
        return Err(Status::Forbidden);
    }

    let conn = &mut establish_connection();
    db_handle_get_error_http!(
        User::touch_latest_access(conn, auth.id),
        "routes/api/auth:post_check",
        "user"
    );
    let user = db_handle_get_error_http!(
        User::get_by_id(conn, auth.id),
        "routes/api/auth:post_check",
        "user"
    );

    Ok(Json(user))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct LoginData {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}
