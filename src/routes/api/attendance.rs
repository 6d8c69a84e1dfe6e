use chrono::NaiveDate;
use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::Deserialize;

use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::modules::auth::{AuthUser, PERM_COACH, PERM_VIEWER};
use crate::modules::models::attendance::{Attendance, NewAttendance};
use crate::modules::models::general::establish_connection;
use crate::modules::models::swimmer::Swimmer;
use crate::modules::snowflake::{generate_id, IdType};

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

#[post("/attendance", data = "<record>")]
pub fn save_one(record: Json<NewAttendanceData>, user: AuthUser) -> Result<Json<Attendance>, Status> {
    user.require(PERM_COACH)?;

    let data = record.into_inner();

    let conn = &mut establish_connection();
    let exists = db_handle_get_error_http!(
        Swimmer::exists(conn, data.swimmer),
        "routes/api/attendance:save_one",
        "swimmer"
    );
    if !exists {
        return Err(Status::BadRequest);
    }

    let id = match generate_id(IdType::Attendance, 0) {
        Ok(id) => id,
        Err(error) => {
            error!(target:"routes/api/attendance:save_one", "Error generating id: {}", error);
            return Err(Status::InternalServerError);
        }
    };

    let attendance = db_handle_get_error_http!(
        Attendance::new(
            conn,
            &NewAttendance {
                id,
                swimmer: data.swimmer,
                date: data.date,
                present: data.present,
                note: data.note,
            }
        ),
        "routes/api/attendance:save_one",
        "attendance"
    );

    Ok(Json(attendance))
}

/// # everyone's attendance for one practice day
#[get("/attendance/<date>")]
pub fn get_by_date(date: String, user: AuthUser) -> Result<Json<Vec<Attendance>>, Status> {
    user.require(PERM_VIEWER)?;

    let date = match NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => return Err(Status::BadRequest),
    };

    let conn = &mut establish_connection();
    let records = db_handle_get_error_http!(
        Attendance::for_date(conn, date),
        "routes/api/attendance:get_by_date",
        "attendance"
    );

    Ok(Json(records))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct NewAttendanceData {
    pub swimmer: i64,
    pub date: NaiveDate,
    pub present: bool,
    #[serde(default)]
    pub note: Option<String>,
}
