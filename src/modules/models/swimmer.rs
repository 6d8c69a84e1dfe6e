use chrono::{NaiveDate, Utc};
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::select;
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::macros::database_error_handeler::db_handle_get_error;
use crate::schema::swimmers;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9 ,.'-]").unwrap());

/// strip everything that has no business in a person or team name
pub fn sanitize_name(name: &str) -> String {
    NAME_RE.replace_all(name, "").to_string()
}

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Swimmer {
    pub id: i64,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub class: i32,
    pub team: String,
    pub active: bool,
    pub homeschool: bool,
    pub dob: Option<NaiveDate>,
    pub age: Option<i32>,
    pub usas_id: Option<String>,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = swimmers)]
pub struct NewSwimmer {
    pub id: i64,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub class: i32,
    pub team: String,
    pub active: bool,
    pub homeschool: bool,
    pub dob: Option<NaiveDate>,
}

#[derive(AsChangeset, Deserialize, Debug, Clone, Default)]
#[diesel(table_name = swimmers)]
pub struct SwimmerChanges {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub class: Option<i32>,
    pub active: Option<bool>,
    pub homeschool: Option<bool>,
    pub usas_id: Option<String>,
}

impl Swimmer {
    pub fn new(conn: &mut PgConnection, new_swimmer: &NewSwimmer) -> QueryResult<Swimmer> {
        match diesel::insert_into(swimmers::table)
            .values(new_swimmer)
            .get_result(conn)
        {
            Ok(swimmer) => Ok(swimmer),
            Err(e) => {
                error!(target:"models/swimmer:new", "Error creating swimmer: {}", e);
                Err(e)
            }
        }
    }

    pub fn exists(conn: &mut PgConnection, id_in: i64) -> QueryResult<bool> {
        use crate::schema::swimmers::dsl::*;
        select(exists(swimmers.filter(id.eq(id_in)))).get_result(conn)
    }

    pub fn get_by_id(conn: &mut PgConnection, id_in: i64) -> QueryResult<Swimmer> {
        use crate::schema::swimmers::dsl::*;
        swimmers.filter(id.eq(id_in)).first::<Swimmer>(conn)
    }

    pub fn get_by_usas_id(conn: &mut PgConnection, usas_id_in: &str) -> QueryResult<Option<Swimmer>> {
        use crate::schema::swimmers::dsl::*;
        swimmers
            .filter(usas_id.eq(usas_id_in))
            .first::<Swimmer>(conn)
            .optional()
    }

    pub fn get_by_name(
        conn: &mut PgConnection,
        last_name_in: &str,
        first_name_in: &str,
    ) -> QueryResult<Option<Swimmer>> {
        use crate::schema::swimmers::dsl::*;
        swimmers
            .filter(last_name.eq(last_name_in))
            .filter(first_name.eq(first_name_in))
            .first::<Swimmer>(conn)
            .optional()
    }

    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<Swimmer>> {
        use crate::schema::swimmers::dsl::*;
        swimmers.order(last_name).load::<Swimmer>(conn)
    }

    /// # team roster
    /// all swimmers of a team ordered by last name
    ///
    /// ## Arguments
    /// * `team_code` - the team to list
    /// * `active_only` - restrict to the current roster
    pub fn team_roster(
        conn: &mut PgConnection,
        team_code: &str,
        active_only: bool,
    ) -> QueryResult<Vec<Swimmer>> {
        use crate::schema::swimmers::dsl::*;

        if active_only {
            swimmers
                .filter(team.eq(team_code))
                .filter(active.eq(true))
                .order(last_name)
                .load::<Swimmer>(conn)
        } else {
            swimmers
                .filter(team.eq(team_code))
                .order(last_name)
                .load::<Swimmer>(conn)
        }
    }

    pub fn update_fields(
        conn: &mut PgConnection,
        id_in: i64,
        changes: &SwimmerChanges,
    ) -> QueryResult<Swimmer> {
        use crate::schema::swimmers::dsl::*;
        diesel::update(swimmers.filter(id.eq(id_in)))
            .set(changes)
            .get_result(conn)
    }

    /// flip the active flag for a whole graduating class
    pub fn set_class_active(
        conn: &mut PgConnection,
        class_in: i32,
        active_in: bool,
    ) -> QueryResult<usize> {
        use crate::schema::swimmers::dsl::*;
        diesel::update(swimmers.filter(class.eq(class_in)))
            .set(active.eq(active_in))
            .execute(conn)
    }

    /// # recompute ages from dates of birth
    /// only touches rows whose stored age drifted
    ///
    /// ## Returns
    /// * `usize` - how many swimmers were updated
    pub fn recompute_ages(conn: &mut PgConnection) -> Result<usize, diesel::result::Error> {
        let all = db_handle_get_error!(
            Swimmer::get_all(conn),
            "models/swimmer:recompute_ages",
            "swimmers"
        );

        let today = Utc::now().date_naive();
        let mut updated = 0;
        for swimmer in all {
            let swimmer_dob = match swimmer.dob {
                Some(swimmer_dob) => swimmer_dob,
                None => continue,
            };
            let new_age = ((today - swimmer_dob).num_days() / 365) as i32;
            if swimmer.age == Some(new_age) {
                continue;
            }

            use crate::schema::swimmers::dsl::*;
            diesel::update(swimmers.filter(id.eq(swimmer.id)))
                .set(age.eq(new_age))
                .execute(conn)?;
            info!(target:"models/swimmer:recompute_ages", "{} is now {}", swimmer.display_name(), new_age);
            updated += 1;
        }

        Ok(updated)
    }

    /// "Last, First Middle" with a trailing space trimmed when there is no
    /// middle name
    pub fn display_name(&self) -> String {
        format!("{}, {} {}", self.last_name, self.first_name, self.middle_name)
            .trim()
            .to_string()
    }

    /// "F Last" as relay boards abbreviate swimmers
    pub fn short_name(&self) -> String {
        let initial = self.first_name.chars().next().unwrap_or(' ');
        format!("{} {}", initial, self.last_name).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swimmer(first: &str, middle: &str, last: &str) -> Swimmer {
        Swimmer {
            id: 1,
            first_name: first.to_string(),
            middle_name: middle.to_string(),
            last_name: last.to_string(),
            gender: "F".to_string(),
            class: 2026,
            team: "SAGH".to_string(),
            active: true,
            homeschool: false,
            dob: None,
            age: None,
            usas_id: None,
        }
    }

    #[test]
    fn display_name_trims_missing_middle_name() {
        assert_eq!(swimmer("Ann", "", "Reyes").display_name(), "Reyes, Ann");
        assert_eq!(
            swimmer("Ann", "B", "Reyes").display_name(),
            "Reyes, Ann B"
        );
    }

    #[test]
    fn short_name_uses_the_first_initial() {
        assert_eq!(swimmer("Ann", "", "Reyes").short_name(), "A Reyes");
    }

    #[test]
    fn sanitize_strips_odd_characters() {
        assert_eq!(sanitize_name("O'Brien, Mary-Kate"), "O'Brien, Mary-Kate");
        assert_eq!(sanitize_name("Reyes; DROP TABLE"), "Reyes DROP TABLE");
        assert_eq!(sanitize_name("a<script>"), "ascript");
    }
}
