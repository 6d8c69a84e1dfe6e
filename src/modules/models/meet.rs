use diesel::pg::PgConnection;
use diesel::prelude::*;
use log::error;
use serde::{Deserialize, Serialize};

use crate::schema::meets;

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Meet {
    pub id: i64,
    pub name: String,
    pub venue: String,
    pub designator: String,
    pub date: String,
    pub season: i32,
    pub most_recent: bool,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = meets)]
pub struct NewMeet {
    pub id: i64,
    pub name: String,
    pub venue: String,
    pub designator: String,
    pub date: String,
    pub season: i32,
    pub most_recent: bool,
}

impl Meet {
    /// # create meet
    /// a meet flagged most-recent takes the flag from the previous holder,
    /// only one meet carries it at a time
    pub fn new(conn: &mut PgConnection, new_meet: &NewMeet) -> QueryResult<Meet> {
        use crate::schema::meets::dsl::*;

        if new_meet.most_recent {
            diesel::update(meets.filter(most_recent.eq(true)))
                .set(most_recent.eq(false))
                .execute(conn)?;
        }

        match diesel::insert_into(meets).values(new_meet).get_result(conn) {
            Ok(meet) => Ok(meet),
            Err(e) => {
                error!(target:"models/meet:new", "Error creating meet: {}", e);
                Err(e)
            }
        }
    }

    pub fn get_by_id(conn: &mut PgConnection, id_in: i64) -> QueryResult<Meet> {
        use crate::schema::meets::dsl::*;
        meets.filter(id.eq(id_in)).first::<Meet>(conn)
    }

    /// all meets, newest season first
    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<Meet>> {
        use crate::schema::meets::dsl::*;
        meets.order(season.desc()).load::<Meet>(conn)
    }

    pub fn by_season(conn: &mut PgConnection, season_in: i32) -> QueryResult<Vec<Meet>> {
        use crate::schema::meets::dsl::*;
        meets.filter(season.eq(season_in)).load::<Meet>(conn)
    }

    pub fn latest(conn: &mut PgConnection) -> QueryResult<Meet> {
        use crate::schema::meets::dsl::*;
        meets.filter(most_recent.eq(true)).first::<Meet>(conn)
    }
}
