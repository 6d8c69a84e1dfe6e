pub mod errors;
pub mod schema;

pub mod cron_jobs;
pub mod modules;

pub mod macros {
    pub mod database_error_handeler;
    pub mod request_caching;
}

pub mod routes {
    pub mod api {
        pub mod attendance;
        pub mod auth;
        pub mod entry;
        pub mod event;
        pub mod meet;
        pub mod standard;
        pub mod status;
        pub mod swimmer;
        pub mod team;
        pub mod user;
    }
}
