use diesel::pg::PgConnection;
use diesel::prelude::*;
use log::info;
use serde::{Deserialize, Serialize};

use crate::modules::helpers::event_codes::EventCodes;
use crate::modules::helpers::swim_time::SwimTime;
use crate::modules::models::entry::Entry;

/// Authorities in ascending cutoff order; a later tag overwrites an earlier
/// one, so every entry ends up with the best standard it makes.
pub const AUTHORITY_ORDER: [&str; 4] = ["USAS-BB", "USAS-A", "USAS-AA", "USAS-SS"];

#[derive(Queryable, Insertable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::standards, primary_key(code))]
pub struct Standard {
    pub code: String,
    pub name: String,
    pub short_name: String,
    pub authority: String,
    pub min_time: String,
    pub year: Option<i32>,
    pub event: String,
    pub gender: String,
    pub course: String,
}

impl Standard {
    pub fn new(conn: &mut PgConnection, new_standard: &Standard) -> QueryResult<Standard> {
        use crate::schema::standards;
        diesel::insert_into(standards::table)
            .values(new_standard)
            .get_result(conn)
    }

    pub fn get_by_code(conn: &mut PgConnection, code_in: &str) -> QueryResult<Standard> {
        use crate::schema::standards::dsl::*;
        standards.filter(code.eq(code_in)).first::<Standard>(conn)
    }

    /// ordered the way boards list them, slowest authority first
    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<Standard>> {
        use crate::schema::standards::dsl::*;
        standards.order((event, code)).load::<Standard>(conn)
    }

    /// # retag every entry against the standards table
    /// walks authorities slowest cutoff first over the sixteen individual
    /// events; entries at or under a cutoff take that standard's code
    ///
    /// ## Returns
    /// * `usize` - how many tags were written
    pub fn apply_all(conn: &mut PgConnection) -> QueryResult<usize> {
        let mut events = EventCodes::individual_events("F");
        events.extend(EventCodes::individual_events("M"));

        let mut tagged = 0;
        for event in &events {
            for authority in AUTHORITY_ORDER {
                let code = format!("{}-{}", authority, event);
                let standard = match Standard::get_by_code(conn, &code) {
                    Ok(standard) => standard,
                    Err(diesel::result::Error::NotFound) => continue,
                    Err(e) => return Err(e),
                };

                for entry in Entry::for_event(conn, event)? {
                    if !SwimTime::makes_cut(&entry.time, &standard.min_time) {
                        continue;
                    }
                    Entry::set_standard(conn, entry.id, &code)?;
                    info!(
                        target:"models/standard:apply_all",
                        "tagged {} ({}) with {}", entry.id, entry.time, code
                    );
                    tagged += 1;
                }
            }
        }

        Ok(tagged)
    }
}
