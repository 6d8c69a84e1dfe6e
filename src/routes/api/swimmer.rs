use chrono::NaiveDate;
use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, patch, post};
use serde::{Deserialize, Serialize};

use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::modules::auth::{AuthUser, PERM_COACH, PERM_MANAGER, PERM_VIEWER};
use crate::modules::helpers::event_codes::EventCodes;
use crate::modules::helpers::swim_time::SwimTime;
use crate::modules::models::attendance::Attendance;
use crate::modules::models::entry::{Entry, Relay};
use crate::modules::models::general::establish_connection;
use crate::modules::models::swimmer::{sanitize_name, NewSwimmer, Swimmer, SwimmerChanges};
use crate::modules::models::team::Team;
use crate::modules::snowflake::{generate_id, generate_id_at, grad_year_bits, IdType, EPOCH_MS};
use crate::routes::api::entry::ApiEntry;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/***** MODIFY SWIMMERS *****/

/// # add a swimmer to the roster
/// the id encodes the join date when one is given, so long-gone alumni sort
/// where they belong
#[post("/swimmers", data = "<new_swimmer>")]
pub fn save_one(
    new_swimmer: Json<NewSwimmerData>,
    user: AuthUser,
) -> Result<Json<Swimmer>, Status> {
    user.require(PERM_COACH)?;

    let data = new_swimmer.into_inner();
    for name in [&data.first_name, &data.middle_name, &data.last_name] {
        if sanitize_name(name) != *name {
            return Err(Status::BadRequest);
        }
    }
    if data.gender != "M" && data.gender != "F" {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();
    let team_exists = db_handle_get_error_http!(
        Team::exists(conn, &data.team),
        "routes/api/swimmer:save_one",
        "team"
    );
    if !team_exists {
        return Err(Status::BadRequest);
    }

    let year = grad_year_bits(data.class);
    let id = match data.joined {
        Some(joined) => {
            let millis = EPOCH_MS.max(
                joined
                    .and_hms_opt(12, 0, 0)
                    .map(|dt| dt.and_utc().timestamp_millis())
                    .unwrap_or(EPOCH_MS),
            );
            generate_id_at(IdType::Swimmer, year, millis)
        }
        None => generate_id(IdType::Swimmer, year),
    };
    let id = match id {
        Ok(id) => id,
        Err(error) => {
            error!(target:"routes/api/swimmer:save_one", "Error generating id: {}", error);
            return Err(Status::InternalServerError);
        }
    };

    let swimmer = db_handle_get_error_http!(
        Swimmer::new(
            conn,
            &NewSwimmer {
                id,
                first_name: data.first_name,
                middle_name: data.middle_name,
                last_name: data.last_name,
                gender: data.gender,
                class: data.class,
                team: data.team,
                active: true,
                homeschool: data.homeschool,
                dob: data.dob,
            }
        ),
        "routes/api/swimmer:save_one",
        "swimmer"
    );

    let swimmer = match data.usas_id {
        Some(usas_id) => db_handle_get_error_http!(
            Swimmer::update_fields(
                conn,
                swimmer.id,
                &SwimmerChanges {
                    usas_id: Some(usas_id),
                    ..Default::default()
                }
            ),
            "routes/api/swimmer:save_one",
            "swimmer usas id"
        ),
        None => swimmer,
    };

    Ok(Json(swimmer))
}

#[patch("/swimmers/<swimmer_id>", data = "<changes>")]
pub fn update_one(
    swimmer_id: i64,
    changes: Json<SwimmerChanges>,
    user: AuthUser,
) -> Result<Json<Swimmer>, Status> {
    user.require(PERM_COACH)?;

    let changes = changes.into_inner();
    for name in [&changes.first_name, &changes.middle_name, &changes.last_name] {
        if let Some(name) = name {
            if sanitize_name(name) != *name {
                return Err(Status::BadRequest);
            }
        }
    }

    // diesel rejects an empty changeset
    if changes.first_name.is_none()
        && changes.middle_name.is_none()
        && changes.last_name.is_none()
        && changes.class.is_none()
        && changes.active.is_none()
        && changes.homeschool.is_none()
        && changes.usas_id.is_none()
    {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();
    let swimmer = db_handle_get_error_http!(
        Swimmer::update_fields(conn, swimmer_id, &changes),
        "routes/api/swimmer:update_one",
        "swimmer"
    );

    Ok(Json(swimmer))
}

/// # (de)activate a whole graduating class
/// how seniors leave the roster every fall
#[patch("/class/<year>/active", data = "<data>")]
pub fn set_class_active(
    year: i32,
    data: Json<ClassActiveData>,
    user: AuthUser,
) -> Result<Json<UpdatedCount>, Status> {
    user.require(PERM_MANAGER)?;

    let conn = &mut establish_connection();
    let updated = db_handle_get_error_http!(
        Swimmer::set_class_active(conn, year, data.active),
        "routes/api/swimmer:set_class_active",
        "class"
    );

    Ok(Json(UpdatedCount { updated }))
}

/***** GETTERS *****/

#[get("/swimmers/<swimmer_id>")]
pub fn get_one(swimmer_id: i64, user: AuthUser) -> Result<Json<ApiSwimmer>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let swimmer = db_handle_get_error_http!(
        Swimmer::get_by_id(conn, swimmer_id),
        "routes/api/swimmer:get_one",
        "swimmer"
    );
    let entry_count = db_handle_get_error_http!(
        Entry::count_for_swimmer(conn, swimmer_id),
        "routes/api/swimmer:get_one",
        "entry count"
    );
    let meets = db_handle_get_error_http!(
        Entry::distinct_meets_for_swimmer(conn, swimmer_id),
        "routes/api/swimmer:get_one",
        "meets"
    );

    Ok(Json(ApiSwimmer {
        swimmer,
        entry_count,
        meet_count: meets.len() as i64,
    }))
}

#[get("/swimmers/<swimmer_id>/entries")]
pub fn get_entries(swimmer_id: i64, user: AuthUser) -> Result<Json<Vec<ApiEntry>>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let entries = db_handle_get_error_http!(
        Entry::for_swimmer(conn, swimmer_id),
        "routes/api/swimmer:get_entries",
        "entries"
    );

    api_entries(conn, entries)
}

#[get("/swimmers/<swimmer_id>/entries/<event_code>")]
pub fn get_event_entries(
    swimmer_id: i64,
    event_code: String,
    user: AuthUser,
) -> Result<Json<Vec<ApiEntry>>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let entries = db_handle_get_error_http!(
        Entry::for_swimmer_event(conn, swimmer_id, &event_code),
        "routes/api/swimmer:get_event_entries",
        "entries"
    );

    api_entries(conn, entries)
}

/// # a swimmer's best times
/// one row per individual event of their gender, "NT" where they never swam
/// the event
#[get("/swimmers/<swimmer_id>/best")]
pub fn get_best_times(swimmer_id: i64, user: AuthUser) -> Result<Json<Vec<ApiBestTime>>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let swimmer = db_handle_get_error_http!(
        Swimmer::get_by_id(conn, swimmer_id),
        "routes/api/swimmer:get_best_times",
        "swimmer"
    );

    let mut best_times = Vec::new();
    for event in EventCodes::individual_events(&swimmer.gender) {
        let entries = db_handle_get_error_http!(
            Entry::for_swimmer_event(conn, swimmer_id, &event),
            "routes/api/swimmer:get_best_times",
            "entries"
        );

        let best = entries
            .into_iter()
            .filter(|entry| !entry.ignored)
            .min_by_key(|entry| SwimTime::sort_key(&entry.time));

        best_times.push(ApiBestTime {
            name: EventCodes::display_name(&event).unwrap_or_else(|| event.clone()),
            event,
            time: best
                .as_ref()
                .map(|entry| entry.time.clone())
                .unwrap_or_else(|| "NT".to_string()),
            standards: best.and_then(|entry| entry.standards),
        });
    }

    Ok(Json(best_times))
}

#[get("/swimmers/<swimmer_id>/attendance")]
pub fn get_attendance(swimmer_id: i64, user: AuthUser) -> Result<Json<Vec<Attendance>>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let records = db_handle_get_error_http!(
        Attendance::for_swimmer(conn, swimmer_id),
        "routes/api/swimmer:get_attendance",
        "attendance"
    );

    Ok(Json(records))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

fn api_entries(
    conn: &mut diesel::pg::PgConnection,
    entries: Vec<Entry>,
) -> Result<Json<Vec<ApiEntry>>, Status> {
    let mut api = Vec::with_capacity(entries.len());
    for entry in &entries {
        let relay = db_handle_get_error_http!(
            Relay::get_by_entry(conn, entry.id),
            "routes/api/swimmer:api_entries",
            "relay"
        );
        api.push(ApiEntry::new(entry, relay.as_ref()));
    }
    Ok(Json(api))
}

#[derive(Deserialize)]
pub struct NewSwimmerData {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub class: i32,
    pub team: String,
    #[serde(default)]
    pub homeschool: bool,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub usas_id: Option<String>,
    #[serde(default)]
    pub joined: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct ClassActiveData {
    pub active: bool,
}

#[derive(Serialize)]
pub struct UpdatedCount {
    pub updated: usize,
}

/// # Struct representing a json response for a swimmer with their stats
#[derive(Serialize)]
pub struct ApiSwimmer {
    #[serde(flatten)]
    pub swimmer: Swimmer,
    pub entry_count: i64,
    pub meet_count: i64,
}

/// # Struct representing a json response for one best time
#[derive(Serialize)]
pub struct ApiBestTime {
    pub event: String,
    pub name: String,
    pub time: String,
    pub standards: Option<String>,
}
