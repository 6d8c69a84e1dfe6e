use chrono::Utc;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::select;
use log::error;
use serde::{Deserialize, Serialize};

use crate::schema::{auth_tokens, users};

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub email: String,
    pub permissions: i32,
    pub active: bool,
    pub linked_swimmer: Option<i64>,
    pub latest_access: Option<String>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub permissions: i32,
    pub active: bool,
}

#[derive(AsChangeset, Deserialize, Debug, Clone, Default)]
#[diesel(table_name = users)]
pub struct UserChanges {
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub permissions: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Queryable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = auth_tokens, primary_key(token))]
pub struct AuthToken {
    pub token: String,
    pub user_id: i64,
    pub timestamp: String,
}

impl User {
    pub fn new(conn: &mut PgConnection, new_user: &NewUser) -> QueryResult<User> {
        match diesel::insert_into(users::table)
            .values(new_user)
            .get_result(conn)
        {
            Ok(user) => Ok(user),
            Err(e) => {
                error!(target:"models/user:new", "Error creating user: {}", e);
                Err(e)
            }
        }
    }

    pub fn get_by_id(conn: &mut PgConnection, id_in: i64) -> QueryResult<User> {
        use crate::schema::users::dsl::*;
        users.filter(id.eq(id_in)).first::<User>(conn)
    }

    pub fn get_by_username(conn: &mut PgConnection, username_in: &str) -> QueryResult<Option<User>> {
        use crate::schema::users::dsl::*;
        users
            .filter(username.eq(username_in))
            .first::<User>(conn)
            .optional()
    }

    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<User>> {
        use crate::schema::users::dsl::*;
        users.order(username).load::<User>(conn)
    }

    pub fn update_fields(
        conn: &mut PgConnection,
        id_in: i64,
        changes: &UserChanges,
    ) -> QueryResult<User> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(id_in)))
            .set(changes)
            .get_result(conn)
    }

    pub fn set_password(conn: &mut PgConnection, id_in: i64, hash: &str) -> QueryResult<usize> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(id_in)))
            .set(password.eq(hash))
            .execute(conn)
    }

    pub fn touch_latest_access(conn: &mut PgConnection, id_in: i64) -> QueryResult<usize> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(id_in)))
            .set(latest_access.eq(Utc::now().to_rfc3339()))
            .execute(conn)
    }

    /// a swimmer may be linked to at most one login
    pub fn swimmer_link_taken(conn: &mut PgConnection, swimmer_in: i64) -> QueryResult<bool> {
        use crate::schema::users::dsl::*;
        select(exists(users.filter(linked_swimmer.eq(swimmer_in)))).get_result(conn)
    }

    pub fn link_swimmer(
        conn: &mut PgConnection,
        id_in: i64,
        swimmer_in: i64,
    ) -> QueryResult<User> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(id_in)))
            .set(linked_swimmer.eq(swimmer_in))
            .get_result(conn)
    }
}

impl AuthToken {
    pub fn new(conn: &mut PgConnection, user_id_in: i64, token_in: &str) -> QueryResult<AuthToken> {
        let new_token = AuthToken {
            token: token_in.to_string(),
            user_id: user_id_in,
            timestamp: Utc::now().to_rfc3339(),
        };

        diesel::insert_into(auth_tokens::table)
            .values(&new_token)
            .get_result(conn)
    }

    pub fn get(conn: &mut PgConnection, token_in: &str) -> QueryResult<Option<AuthToken>> {
        use crate::schema::auth_tokens::dsl::*;
        auth_tokens
            .filter(token.eq(token_in))
            .first::<AuthToken>(conn)
            .optional()
    }
}
