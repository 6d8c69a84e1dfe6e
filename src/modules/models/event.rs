use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::events, primary_key(code))]
pub struct Event {
    pub code: String,
    pub name: String,
    pub distance: i32,
    pub stroke: String,
    pub relay: bool,
    pub gender: String,
}

impl Event {
    pub fn get_by_code(conn: &mut PgConnection, code_in: &str) -> QueryResult<Event> {
        use crate::schema::events::dsl::*;
        events.filter(code.eq(code_in)).first::<Event>(conn)
    }

    /// all events in program order: individual before relays, then by
    /// stroke and distance
    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<Event>> {
        use crate::schema::events::dsl::*;
        events.order((relay, stroke, distance)).load::<Event>(conn)
    }
}
