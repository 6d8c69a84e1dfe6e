use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::Deserialize;

use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::modules::auth::{AuthUser, PERM_COACH, PERM_VIEWER};
use crate::modules::helpers::swim_time::SwimTime;
use crate::modules::models::entry::{Entry, Relay};
use crate::modules::models::general::establish_connection;
use crate::modules::models::meet::{Meet, NewMeet};
use crate::modules::models::swimmer::{sanitize_name, Swimmer};
use crate::modules::snowflake::{generate_id, IdType};
use crate::routes::api::entry::ApiEntry;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

#[post("/meets", data = "<new_meet>")]
pub fn save_one(new_meet: Json<NewMeetData>, user: AuthUser) -> Result<Json<Meet>, Status> {
    user.require(PERM_COACH)?;

    let data = new_meet.into_inner();
    if sanitize_name(&data.name) != data.name {
        return Err(Status::BadRequest);
    }

    let id = match generate_id(IdType::Meet, 0) {
        Ok(id) => id,
        Err(error) => {
            error!(target:"routes/api/meet:save_one", "Error generating id: {}", error);
            return Err(Status::InternalServerError);
        }
    };

    let conn = &mut establish_connection();
    let meet = db_handle_get_error_http!(
        Meet::new(
            conn,
            &NewMeet {
                id,
                name: data.name,
                venue: data.venue,
                designator: data.designator,
                date: data.date,
                season: data.season,
                most_recent: data.most_recent,
            }
        ),
        "routes/api/meet:save_one",
        "meet"
    );

    Ok(Json(meet))
}

#[get("/meets")]
pub fn get_all(user: AuthUser) -> Result<Json<Vec<Meet>>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let meets = db_handle_get_error_http!(
        Meet::get_all(conn),
        "routes/api/meet:get_all",
        "meets"
    );

    Ok(Json(meets))
}

#[get("/meets/<meet_id>")]
pub fn get_one(meet_id: i64, user: AuthUser) -> Result<Json<Meet>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let meet = db_handle_get_error_http!(
        Meet::get_by_id(conn, meet_id),
        "routes/api/meet:get_one",
        "meet"
    );

    Ok(Json(meet))
}

/// # every entry of a meet, in program order then by time
#[get("/meets/<meet_id>/entries")]
pub fn get_entries(meet_id: i64, user: AuthUser) -> Result<Json<Vec<ApiEntry>>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    db_handle_get_error_http!(
        Meet::get_by_id(conn, meet_id),
        "routes/api/meet:get_entries",
        "meet"
    );
    let entries = db_handle_get_error_http!(
        Entry::for_meet(conn, meet_id),
        "routes/api/meet:get_entries",
        "entries"
    );

    api_entries_sorted(conn, entries)
}

/// # a meet's entries restricted to one team's swimmers
#[get("/meets/<meet_id>/entries/<team_code>")]
pub fn get_team_entries(
    meet_id: i64,
    team_code: String,
    user: AuthUser,
) -> Result<Json<Vec<ApiEntry>>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    db_handle_get_error_http!(
        Meet::get_by_id(conn, meet_id),
        "routes/api/meet:get_team_entries",
        "meet"
    );
    let roster = db_handle_get_error_http!(
        Swimmer::team_roster(conn, &team_code, false),
        "routes/api/meet:get_team_entries",
        "roster"
    );

    let mut entries = Vec::new();
    for swimmer in &roster {
        let swims = db_handle_get_error_http!(
            Entry::for_meet_swimmer(conn, meet_id, swimmer.id),
            "routes/api/meet:get_team_entries",
            "entries"
        );
        entries.extend(swims);
    }

    api_entries_sorted(conn, entries)
}

#[get("/season/<season>/meets")]
pub fn get_season(season: i32, user: AuthUser) -> Result<Json<Vec<Meet>>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let meets = db_handle_get_error_http!(
        Meet::by_season(conn, season),
        "routes/api/meet:get_season",
        "meets"
    );

    Ok(Json(meets))
}

#[get("/latest/meet")]
pub fn get_latest(user: AuthUser) -> Result<Json<Meet>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let meet = db_handle_get_error_http!(
        Meet::latest(conn),
        "routes/api/meet:get_latest",
        "meet"
    );

    Ok(Json(meet))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

fn api_entries_sorted(
    conn: &mut diesel::pg::PgConnection,
    mut entries: Vec<Entry>,
) -> Result<Json<Vec<ApiEntry>>, Status> {
    entries.sort_by(|a, b| {
        a.event
            .cmp(&b.event)
            .then_with(|| SwimTime::sort_key(&a.time).cmp(&SwimTime::sort_key(&b.time)))
    });

    let mut api = Vec::with_capacity(entries.len());
    for entry in &entries {
        let relay = db_handle_get_error_http!(
            Relay::get_by_entry(conn, entry.id),
            "routes/api/meet:api_entries_sorted",
            "relay"
        );
        api.push(ApiEntry::new(entry, relay.as_ref()));
    }
    Ok(Json(api))
}

#[derive(Deserialize)]
pub struct NewMeetData {
    pub name: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub designator: String,
    pub date: String,
    pub season: i32,
    #[serde(default)]
    pub most_recent: bool,
}
