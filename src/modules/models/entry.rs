use diesel::pg::PgConnection;
use diesel::prelude::*;
use log::error;
use serde::{Deserialize, Serialize};

use crate::schema::{entries, relays};

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = entries)]
pub struct Entry {
    pub id: i64,
    pub swimmer: i64,
    pub meet: i64,
    pub event: String,
    pub seed: String,
    pub time: String,
    pub splits: String,
    pub standards: Option<String>,
    pub relay: bool,
    pub place: Option<i32>,
    pub ignored: bool,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = entries)]
pub struct NewEntry {
    pub id: i64,
    pub swimmer: i64,
    pub meet: i64,
    pub event: String,
    pub seed: String,
    pub time: String,
    pub splits: String,
    pub relay: bool,
    pub place: Option<i32>,
}

#[derive(Queryable, Insertable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = relays, primary_key(entry))]
pub struct Relay {
    pub entry: i64,
    pub swimmer_1: i64,
    pub swimmer_2: i64,
    pub swimmer_3: i64,
    pub swimmer_4: i64,
}

impl Entry {
    pub fn new(conn: &mut PgConnection, new_entry: &NewEntry) -> QueryResult<Entry> {
        match diesel::insert_into(entries::table)
            .values(new_entry)
            .get_result(conn)
        {
            Ok(entry) => Ok(entry),
            Err(e) => {
                error!(target:"models/entry:new", "Error creating entry: {}", e);
                Err(e)
            }
        }
    }

    pub fn get_by_id(conn: &mut PgConnection, id_in: i64) -> QueryResult<Entry> {
        use crate::schema::entries::dsl::*;
        entries.filter(id.eq(id_in)).first::<Entry>(conn)
    }

    pub fn for_swimmer(conn: &mut PgConnection, swimmer_in: i64) -> QueryResult<Vec<Entry>> {
        use crate::schema::entries::dsl::*;
        entries.filter(swimmer.eq(swimmer_in)).load::<Entry>(conn)
    }

    pub fn for_swimmer_event(
        conn: &mut PgConnection,
        swimmer_in: i64,
        event_in: &str,
    ) -> QueryResult<Vec<Entry>> {
        use crate::schema::entries::dsl::*;
        entries
            .filter(swimmer.eq(swimmer_in))
            .filter(event.eq(event_in))
            .load::<Entry>(conn)
    }

    pub fn for_meet(conn: &mut PgConnection, meet_in: i64) -> QueryResult<Vec<Entry>> {
        use crate::schema::entries::dsl::*;
        entries.filter(meet.eq(meet_in)).load::<Entry>(conn)
    }

    pub fn for_meet_swimmer(
        conn: &mut PgConnection,
        meet_in: i64,
        swimmer_in: i64,
    ) -> QueryResult<Vec<Entry>> {
        use crate::schema::entries::dsl::*;
        entries
            .filter(meet.eq(meet_in))
            .filter(swimmer.eq(swimmer_in))
            .load::<Entry>(conn)
    }

    /// every countable swim of an event, boards never see ignored rows
    pub fn for_event(conn: &mut PgConnection, event_in: &str) -> QueryResult<Vec<Entry>> {
        use crate::schema::entries::dsl::*;
        entries
            .filter(event.eq(event_in))
            .filter(ignored.eq(false))
            .load::<Entry>(conn)
    }

    pub fn count_for_swimmer(conn: &mut PgConnection, swimmer_in: i64) -> QueryResult<i64> {
        use crate::schema::entries::dsl::*;
        entries
            .filter(swimmer.eq(swimmer_in))
            .count()
            .get_result(conn)
    }

    pub fn distinct_meets_for_swimmer(
        conn: &mut PgConnection,
        swimmer_in: i64,
    ) -> QueryResult<Vec<i64>> {
        use crate::schema::entries::dsl::*;
        entries
            .filter(swimmer.eq(swimmer_in))
            .select(meet)
            .distinct()
            .load::<i64>(conn)
    }

    pub fn set_standard(
        conn: &mut PgConnection,
        id_in: i64,
        standard_code: &str,
    ) -> QueryResult<usize> {
        use crate::schema::entries::dsl::*;
        diesel::update(entries.filter(id.eq(id_in)))
            .set(standards.eq(standard_code))
            .execute(conn)
    }

    /// the splits column holds a JSON array of cumulative split seconds
    pub fn splits_vec(&self) -> Vec<f64> {
        serde_json::from_str(&self.splits).unwrap_or_default()
    }

    pub fn first_split(&self) -> Option<f64> {
        self.splits_vec().first().copied()
    }
}

impl Relay {
    pub fn new(conn: &mut PgConnection, new_relay: &Relay) -> QueryResult<Relay> {
        match diesel::insert_into(relays::table)
            .values(new_relay)
            .get_result(conn)
        {
            Ok(relay) => Ok(relay),
            Err(e) => {
                error!(target:"models/entry:relay_new", "Error creating relay: {}", e);
                Err(e)
            }
        }
    }

    pub fn get_by_entry(conn: &mut PgConnection, entry_in: i64) -> QueryResult<Option<Relay>> {
        use crate::schema::relays::dsl::*;
        relays
            .filter(entry.eq(entry_in))
            .first::<Relay>(conn)
            .optional()
    }

    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<Relay>> {
        use crate::schema::relays::dsl::*;
        relays.load::<Relay>(conn)
    }

    pub fn legs(&self) -> [i64; 4] {
        [self.swimmer_1, self.swimmer_2, self.swimmer_3, self.swimmer_4]
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;

    fn entry(splits: &str) -> Entry {
        Entry {
            id: 1,
            swimmer: 2,
            meet: 3,
            event: "F100L".to_string(),
            seed: "NT".to_string(),
            time: "59.90".to_string(),
            splits: splits.to_string(),
            standards: None,
            relay: false,
            place: None,
            ignored: false,
        }
    }

    #[test]
    fn splits_parse_from_json() {
        assert_eq!(entry("[13.2, 28.9]").splits_vec(), vec![13.2, 28.9]);
        assert_eq!(entry("[13.2, 28.9]").first_split(), Some(13.2));
    }

    #[test]
    fn malformed_or_empty_splits_are_empty() {
        assert!(entry("[]").splits_vec().is_empty());
        assert!(entry("not json").splits_vec().is_empty());
        assert_eq!(entry("[]").first_split(), None);
    }
}
