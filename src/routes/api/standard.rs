use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::Deserialize;

use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::modules::auth::{AuthUser, PERM_MANAGER, PERM_VIEWER};
use crate::modules::models::event::Event;
use crate::modules::models::general::establish_connection;
use crate::modules::models::standard::Standard;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # load one qualifying cutoff
/// the code is always `{authority}-{event}`, assembled here so boards can
/// rely on the shape
#[post("/standards", data = "<new_standard>")]
pub fn save_one(
    new_standard: Json<NewStandardData>,
    user: AuthUser,
) -> Result<Json<Standard>, Status> {
    user.require(PERM_MANAGER)?;

    let data = new_standard.into_inner();

    let conn = &mut establish_connection();
    let event = match Event::get_by_code(conn, &data.event) {
        Ok(event) => event,
        Err(diesel::result::Error::NotFound) => return Err(Status::BadRequest),
        Err(error) => {
            error!(target:"routes/api/standard:save_one", "Error getting event: {}", error);
            return Err(Status::InternalServerError);
        }
    };

    let code = format!("{}-{}", data.authority, data.event);
    if Standard::get_by_code(conn, &code).is_ok() {
        return Err(Status::Conflict);
    }

    let standard = db_handle_get_error_http!(
        Standard::new(
            conn,
            &Standard {
                code,
                name: data.name,
                short_name: data.short_name,
                authority: data.authority,
                min_time: data.min_time,
                year: data.year,
                event: data.event,
                gender: event.gender,
                course: data.course,
            }
        ),
        "routes/api/standard:save_one",
        "standard"
    );

    Ok(Json(standard))
}

/***** GETTERS *****/

#[get("/standards")]
pub fn get_all(user: AuthUser) -> Result<Json<Vec<Standard>>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let standards = db_handle_get_error_http!(
        Standard::get_all(conn),
        "routes/api/standard:get_all",
        "standards"
    );

    Ok(Json(standards))
}

#[get("/standards/<code>")]
pub fn get_one(code: String, user: AuthUser) -> Result<Json<Standard>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let standard = db_handle_get_error_http!(
        Standard::get_by_code(conn, &code),
        "routes/api/standard:get_one",
        "standard"
    );

    Ok(Json(standard))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct NewStandardData {
    pub name: String,
    pub short_name: String,
    pub authority: String,
    pub min_time: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub event: String,
    pub course: String,
}
