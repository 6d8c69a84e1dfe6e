use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::select;
use log::error;
use serde::{Deserialize, Serialize};

use crate::schema::teams;

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Team {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub address: String,
    pub head_coach: String,
    pub email: String,
    pub phone: String,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = teams)]
pub struct NewTeam {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub address: String,
    pub head_coach: String,
    pub email: String,
    pub phone: String,
}

impl Team {
    pub fn new(conn: &mut PgConnection, new_team: &NewTeam) -> QueryResult<Team> {
        match diesel::insert_into(teams::table)
            .values(new_team)
            .get_result(conn)
        {
            Ok(team) => Ok(team),
            Err(e) => {
                error!(target:"models/team:new", "Error creating team: {}", e);
                Err(e)
            }
        }
    }

    pub fn exists(conn: &mut PgConnection, code_in: &str) -> QueryResult<bool> {
        use crate::schema::teams::dsl::*;
        select(exists(teams.filter(code.eq(code_in)))).get_result(conn)
    }

    pub fn get_by_code(conn: &mut PgConnection, code_in: &str) -> QueryResult<Team> {
        use crate::schema::teams::dsl::*;
        teams.filter(code.eq(code_in)).first::<Team>(conn)
    }

    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<Team>> {
        use crate::schema::teams::dsl::*;
        teams.order(code).load::<Team>(conn)
    }
}
