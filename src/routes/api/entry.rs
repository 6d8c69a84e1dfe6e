use log::error;
use once_cell::sync::Lazy;
use regex::Regex;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::{Deserialize, Serialize};

use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::modules::auth::{AuthUser, PERM_COACH, PERM_VIEWER};
use crate::modules::models::entry::{Entry, NewEntry, Relay};
use crate::modules::models::event::Event;
use crate::modules::models::general::establish_connection;
use crate::modules::models::meet::Meet;
use crate::modules::models::swimmer::Swimmer;
use crate::modules::redis::Redis;
use crate::modules::snowflake::{generate_id, IdType};

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # record a swim by hand
/// results imports go through the import binary; this is for corrections and
/// meets without an electronic file
#[post("/entries", data = "<new_entry>")]
pub fn save_one(new_entry: Json<NewEntryData>, user: AuthUser) -> Result<Json<ApiEntry>, Status> {
    user.require(PERM_COACH)?;

    let data = new_entry.into_inner();
    if !valid_time(&data.time) || !(valid_time(&data.seed) || data.seed == "NT") {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();

    let event = match Event::get_by_code(conn, &data.event) {
        Ok(event) => event,
        Err(diesel::result::Error::NotFound) => return Err(Status::BadRequest),
        Err(error) => {
            error!(target:"routes/api/entry:save_one", "Error getting event: {}", error);
            return Err(Status::InternalServerError);
        }
    };
    if event.relay != data.relay_swimmers.is_some() {
        return Err(Status::BadRequest);
    }

    let exists = db_handle_get_error_http!(
        Swimmer::exists(conn, data.swimmer),
        "routes/api/entry:save_one",
        "swimmer"
    );
    if !exists {
        return Err(Status::BadRequest);
    }
    db_handle_get_error_http!(
        Meet::get_by_id(conn, data.meet),
        "routes/api/entry:save_one",
        "meet"
    );

    let entry_id = match generate_id(IdType::Entry, 0) {
        Ok(id) => id,
        Err(error) => {
            error!(target:"routes/api/entry:save_one", "Error generating id: {}", error);
            return Err(Status::InternalServerError);
        }
    };

    let entry = db_handle_get_error_http!(
        Entry::new(
            conn,
            &NewEntry {
                id: entry_id,
                swimmer: data.swimmer,
                meet: data.meet,
                event: data.event.clone(),
                seed: data.seed,
                time: data.time,
                splits: serde_json::to_string(&data.splits).unwrap_or_else(|_| "[]".to_string()),
                relay: data.relay_swimmers.is_some(),
                place: data.place,
            }
        ),
        "routes/api/entry:save_one",
        "entry"
    );

    let relay = match data.relay_swimmers {
        Some(legs) => Some(db_handle_get_error_http!(
            Relay::new(
                conn,
                &Relay {
                    entry: entry_id,
                    swimmer_1: legs[0],
                    swimmer_2: legs[1],
                    swimmer_3: legs[2],
                    swimmer_4: legs[3],
                }
            ),
            "routes/api/entry:save_one",
            "relay"
        )),
        None => None,
    };

    invalidate_board_cache(&data.event);

    Ok(Json(ApiEntry::new(&entry, relay.as_ref())))
}

#[get("/entries/<entry_id>")]
pub fn get_one(entry_id: i64, user: AuthUser) -> Result<Json<ApiEntry>, Status> {
    user.require(PERM_VIEWER)?;

    let conn = &mut establish_connection();
    let entry = db_handle_get_error_http!(
        Entry::get_by_id(conn, entry_id),
        "routes/api/entry:get_one",
        "entry"
    );
    let relay = db_handle_get_error_http!(
        Relay::get_by_entry(conn, entry_id),
        "routes/api/entry:get_one",
        "relay"
    );

    Ok(Json(ApiEntry::new(&entry, relay.as_ref())))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+:[0-5]\d|\d{1,2})\.\d{2}$").unwrap());

fn valid_time(time: &str) -> bool {
    TIME_RE.is_match(time)
}

/// drop the cached leaderboards an entry mutation can change
pub fn invalidate_board_cache(event_code: &str) {
    let keys = [
        format!("/api/events/{}/all", event_code),
        format!("/api/events/{}/top5", event_code),
        "/api/top5".to_string(),
        "/api/top5/unofficial".to_string(),
    ];

    match &mut Redis::connect() {
        Ok(r_conn) => {
            for key in keys {
                if let Err(error) = Redis::delete(r_conn, key) {
                    error!(target:"routes/api/entry:invalidate", "Error dropping cache key: {}", error);
                }
            }
        }
        Err(error) => {
            error!(target:"routes/api/entry:invalidate", "Error connecting to redis: {}", error);
        }
    }
}

#[derive(Deserialize)]
pub struct NewEntryData {
    pub swimmer: i64,
    pub meet: i64,
    pub event: String,
    pub seed: String,
    pub time: String,
    #[serde(default)]
    pub splits: Vec<f64>,
    #[serde(default)]
    pub place: Option<i32>,
    #[serde(default)]
    pub relay_swimmers: Option<[i64; 4]>,
}

/// # Struct representing a json response for an entry
#[derive(Serialize, Deserialize, Clone)]
pub struct ApiEntry {
    pub id: i64,
    pub swimmer: i64,
    pub meet: i64,
    pub event: String,
    pub seed: String,
    pub time: String,
    pub splits: Vec<f64>,
    pub standards: Option<String>,
    pub relay: bool,
    pub place: Option<i32>,
    pub relay_swimmers: Option<[i64; 4]>,
}

impl ApiEntry {
    pub fn new(entry: &Entry, relay: Option<&Relay>) -> ApiEntry {
        ApiEntry {
            id: entry.id,
            swimmer: entry.swimmer,
            meet: entry.meet,
            event: entry.event.clone(),
            seed: entry.seed.clone(),
            time: entry.time.clone(),
            splits: entry.splits_vec(),
            standards: entry.standards.clone(),
            relay: entry.relay,
            place: entry.place,
            relay_swimmers: relay.map(|r| r.legs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::valid_time;

    #[test]
    fn accepts_stored_time_shapes() {
        assert!(valid_time("29.50"));
        assert!(valid_time("59.99"));
        assert!(valid_time("5.07"));
        assert!(valid_time("1:05.37"));
        assert!(valid_time("10:00.00"));
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(!valid_time("NT"));
        assert!(!valid_time(""));
        assert!(!valid_time("1:5.37"));
        assert!(!valid_time("65.371"));
        assert!(!valid_time("1:0a.37"));
    }
}
