use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use log::error;
use serde::{Deserialize, Serialize};

use crate::schema::attendance;

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = attendance)]
pub struct Attendance {
    pub id: i64,
    pub swimmer: i64,
    pub date: NaiveDate,
    pub present: bool,
    pub note: Option<String>,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = attendance)]
pub struct NewAttendance {
    pub id: i64,
    pub swimmer: i64,
    pub date: NaiveDate,
    pub present: bool,
    pub note: Option<String>,
}

impl Attendance {
    pub fn new(conn: &mut PgConnection, new_record: &NewAttendance) -> QueryResult<Attendance> {
        match diesel::insert_into(attendance::table)
            .values(new_record)
            .get_result(conn)
        {
            Ok(record) => Ok(record),
            Err(e) => {
                error!(target:"models/attendance:new", "Error recording attendance: {}", e);
                Err(e)
            }
        }
    }

    pub fn for_swimmer(conn: &mut PgConnection, swimmer_in: i64) -> QueryResult<Vec<Attendance>> {
        use crate::schema::attendance::dsl::*;
        attendance
            .filter(swimmer.eq(swimmer_in))
            .order(date.desc())
            .load::<Attendance>(conn)
    }

    pub fn for_date(conn: &mut PgConnection, date_in: NaiveDate) -> QueryResult<Vec<Attendance>> {
        use crate::schema::attendance::dsl::*;
        attendance
            .filter(date.eq(date_in))
            .load::<Attendance>(conn)
    }
}
