use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::Deserialize;

use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::modules::auth::{AuthUser, PERM_COACH, PERM_VIEWER};
use crate::modules::models::general::establish_connection;
use crate::modules::models::swimmer::{sanitize_name, Swimmer};
use crate::modules::models::team::{NewTeam, Team};
use crate::modules::snowflake::{generate_id, IdType};

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

#[post("/teams", data = "<new_team>")]
pub fn save_one(new_team: Json<NewTeamData>, user: AuthUser) -> Result<Json<Team>, Status> {
    user.require(PERM_COACH)?;

    let data = new_team.into_inner();
    if sanitize_name(&data.code) != data.code || sanitize_name(&data.name) != data.name {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();
    let taken = db_handle_get_error_http!(
        Team::exists(conn, &data.code),
        "routes/api/team:save_one",
        "team"
    );
    if taken {
        return Err(Status::Conflict);
    }

    let id = match generate_id(IdType::Team, 0) {
        Ok(id) => id,
        Err(error) => {
            error!(target:"routes/api/team:save_one", "Error generating id: {}", error);
            return Err(Status::InternalServerError);
        }
    };

    let team = db_handle_get_error_http!(
        Team::new(
            conn,
            &NewTeam {
                id,
                code: data.code,
                name: data.name,
                address: data.address,
                head_coach: data.head_coach,
                email: data.email,
                phone: data.phone,
            }
        ),
        "routes/api/team:save_one",
        "team"
    );

    Ok(Json(team))
}

#[get("/teams")]
pub fn get_all(user: AuthUser) -> Result<Json<Vec<Team>>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let teams = db_handle_get_error_http!(
        Team::get_all(conn),
        "routes/api/team:get_all",
        "teams"
    );

    Ok(Json(teams))
}

#[get("/teams/<code>")]
pub fn get_one(code: String, user: AuthUser) -> Result<Json<Team>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let team = db_handle_get_error_http!(
        Team::get_by_code(conn, &code),
        "routes/api/team:get_one",
        "team"
    );

    Ok(Json(team))
}

/// # the current roster, active swimmers only
#[get("/teams/<code>/roster/current")]
pub fn get_roster_current(code: String, user: AuthUser) -> Result<Json<Vec<Swimmer>>, Status> {
    user.require(PERM_VIEWER)?;
    roster(&code, true)
}

/// # everyone who ever swam for the team
#[get("/teams/<code>/roster/all")]
pub fn get_roster_all(code: String, user: AuthUser) -> Result<Json<Vec<Swimmer>>, Status> {
    user.require(PERM_VIEWER)?;
    roster(&code, false)
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

fn roster(code: &str, active_only: bool) -> Result<Json<Vec<Swimmer>>, Status> {
    let conn = &mut establish_connection();

    let exists = db_handle_get_error_http!(
        Team::exists(conn, code),
        "routes/api/team:roster",
        "team"
    );
    if !exists {
        return Err(Status::NotFound);
    }

    let swimmers = db_handle_get_error_http!(
        Swimmer::team_roster(conn, code, active_only),
        "routes/api/team:roster",
        "roster"
    );

    Ok(Json(swimmers))
}

#[derive(Deserialize)]
pub struct NewTeamData {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub head_coach: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}
