use std::collections::HashMap;

use diesel::pg::PgConnection;
use diesel::QueryResult;
use log::error;
use rocket::get;
use rocket::http::uri::Origin;
use rocket::http::Status;
use serde::Serialize;

use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::macros::request_caching::{cache_response, read_cache_request};
use crate::modules::auth::{AuthUser, PERM_VIEWER};
use crate::modules::helpers::event_codes::EventCodes;
use crate::modules::helpers::ranking::{rank_event, RankedSwim};
use crate::modules::models::entry::{Entry, Relay};
use crate::modules::models::general::establish_connection;
use crate::modules::models::meet::Meet;
use crate::modules::models::swimmer::Swimmer;
use crate::modules::redis::Redis;
use crate::routes::api::entry::ApiEntry;

const BOARD_SIZE: usize = 5;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # every recorded swim of one event
#[get("/events/<event_code>/all")]
pub fn get_all_swims(
    event_code: String,
    user: AuthUser,
    origin: &Origin,
) -> Result<String, Status> {
    user.require(PERM_VIEWER)?;
    read_cache_request!(origin);

    let conn = &mut establish_connection();
    let entries = db_handle_get_error_http!(
        Entry::for_event(conn, &event_code),
        "routes/api/event:get_all_swims",
        "entries"
    );

    let mut swims = Vec::with_capacity(entries.len());
    for entry in &entries {
        let relay = db_handle_get_error_http!(
            Relay::get_by_entry(conn, entry.id),
            "routes/api/event:get_all_swims",
            "relay"
        );
        swims.push(ApiEntry::new(entry, relay.as_ref()));
    }

    cache_response!(origin, serde_json::to_string(&swims).unwrap());
}

/// # official top five of one event
#[get("/events/<event_code>/top5")]
pub fn get_top5(event_code: String, user: AuthUser, origin: &Origin) -> Result<String, Status> {
    user.require(PERM_VIEWER)?;
    read_cache_request!(origin);

    let conn = &mut establish_connection();
    let swims = db_handle_get_error_http!(
        board_swims(conn, &event_code),
        "routes/api/event:get_top5",
        "board swims"
    );

    let board = ApiBoard::new(&event_code, rank_event(swims, true, BOARD_SIZE));
    cache_response!(origin, serde_json::to_string(&board).unwrap());
}

/// # official top five of every ranked event
#[get("/top5")]
pub fn get_all_top5(user: AuthUser, origin: &Origin) -> Result<String, Status> {
    user.require(PERM_VIEWER)?;
    read_cache_request!(origin);

    let conn = &mut establish_connection();
    let boards = db_handle_get_error_http!(
        all_boards(conn, true),
        "routes/api/event:get_all_top5",
        "boards"
    );

    cache_response!(origin, serde_json::to_string(&boards).unwrap());
}

/// # unofficial top five of every ranked event
/// same boards but homeschool swimmers count
#[get("/top5/unofficial")]
pub fn get_all_top5_unofficial(user: AuthUser, origin: &Origin) -> Result<String, Status> {
    user.require(PERM_VIEWER)?;
    read_cache_request!(origin);

    let conn = &mut establish_connection();
    let boards = db_handle_get_error_http!(
        all_boards(conn, false),
        "routes/api/event:get_all_top5_unofficial",
        "boards"
    );

    cache_response!(origin, serde_json::to_string(&boards).unwrap());
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

/// # Struct representing a json response for one leaderboard
#[derive(Serialize, Clone)]
pub struct ApiBoard {
    pub event: String,
    pub name: String,
    pub swims: Vec<RankedSwim>,
}

impl ApiBoard {
    pub fn new(event_code: &str, swims: Vec<RankedSwim>) -> ApiBoard {
        ApiBoard {
            event: event_code.to_string(),
            name: EventCodes::display_name(event_code).unwrap_or_else(|| event_code.to_string()),
            swims,
        }
    }
}

/// flatten every countable swim of an event into rankable rows
fn board_swims(conn: &mut PgConnection, event_code: &str) -> QueryResult<Vec<RankedSwim>> {
    let entries = Entry::for_event(conn, event_code)?;

    let seasons: HashMap<i64, i32> = Meet::get_all(conn)?
        .into_iter()
        .map(|meet| (meet.id, meet.season))
        .collect();
    let swimmers: HashMap<i64, Swimmer> = Swimmer::get_all(conn)?
        .into_iter()
        .map(|swimmer| (swimmer.id, swimmer))
        .collect();

    let mut swims = Vec::with_capacity(entries.len());
    for entry in entries {
        let swimmer = match swimmers.get(&entry.swimmer) {
            Some(swimmer) => swimmer,
            None => {
                error!(target:"routes/api/event:board_swims", "entry {} has no swimmer", entry.id);
                continue;
            }
        };

        let relay_legs = match Relay::get_by_entry(conn, entry.id)? {
            Some(relay) => Some(relay.legs()),
            None => None,
        };
        let name = match relay_legs {
            Some(legs) => relay_board_name(&swimmers, legs),
            None => swimmer.display_name(),
        };

        swims.push(RankedSwim {
            entry_id: entry.id,
            swimmer_id: entry.swimmer,
            name,
            homeschool: swimmer.homeschool,
            time: entry.time.clone(),
            season: seasons.get(&entry.meet).copied().unwrap_or(0),
            first_split: entry.first_split(),
            relay_legs,
        });
    }

    Ok(swims)
}

/// relay rows show the foursome, "A Reyes / B Ola / C Ibe / D Uko"
fn relay_board_name(swimmers: &HashMap<i64, Swimmer>, legs: [i64; 4]) -> String {
    legs.iter()
        .map(|leg| {
            swimmers
                .get(leg)
                .map(|swimmer| swimmer.short_name())
                .unwrap_or_else(|| "?".to_string())
        })
        .collect::<Vec<String>>()
        .join(" / ")
}

fn all_boards(conn: &mut PgConnection, official: bool) -> QueryResult<Vec<ApiBoard>> {
    let mut boards = Vec::new();
    for gender in ["F", "M"] {
        for suffix in EventCodes::leaderboard_events() {
            let code = format!("{}{}", gender, suffix);
            let swims = board_swims(conn, &code)?;
            boards.push(ApiBoard::new(&code, rank_event(swims, official, BOARD_SIZE)));
        }
    }
    Ok(boards)
}
