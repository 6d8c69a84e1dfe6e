pub mod auth;
pub mod hytek;
pub mod redis;
pub mod snowflake;

pub mod models {
    pub mod attendance;
    pub mod entry;
    pub mod event;
    pub mod meet;
    pub mod standard;
    pub mod swimmer;
    pub mod team;
    pub mod user;

    pub mod general;
}

pub mod helpers {
    pub mod event_codes;
    pub mod logging;
    pub mod ranking;
    pub mod swim_time;

    pub mod fairings {
        pub mod cors;
    }
}
