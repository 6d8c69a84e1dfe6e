use diesel::prelude::*;
use log::error;
use rocket::get;
use rocket::http::Status;
use rocket::serde::json::Json;
use serde::Serialize;

use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::modules::auth::{AuthUser, PERM_VIEWER};
use crate::modules::models::general::establish_connection;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

#[get("/ping")]
pub fn ping() -> &'static str {
    "pong"
}

/// # row counts for the dashboard footer
#[get("/info")]
pub fn info(user: AuthUser) -> Result<Json<ApiInfo>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();

    let swimmers = db_handle_get_error_http!(
        crate::schema::swimmers::table.count().get_result::<i64>(conn),
        "routes/api/status:info",
        "swimmer count"
    );
    let teams = db_handle_get_error_http!(
        crate::schema::teams::table.count().get_result::<i64>(conn),
        "routes/api/status:info",
        "team count"
    );
    let meets = db_handle_get_error_http!(
        crate::schema::meets::table.count().get_result::<i64>(conn),
        "routes/api/status:info",
        "meet count"
    );
    let entries = db_handle_get_error_http!(
        crate::schema::entries::table.count().get_result::<i64>(conn),
        "routes/api/status:info",
        "entry count"
    );
    let users = db_handle_get_error_http!(
        crate::schema::users::table.count().get_result::<i64>(conn),
        "routes/api/status:info",
        "user count"
    );

    Ok(Json(ApiInfo {
        swimmers,
        teams,
        meets,
        entries,
        users,
    }))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

/// # Struct representing a json response for database totals
#[derive(Serialize)]
pub struct ApiInfo {
    pub swimmers: i64,
    pub teams: i64,
    pub meets: i64,
    pub entries: i64,
    pub users: i64,
}
