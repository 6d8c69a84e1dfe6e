use rocket::{launch, routes, Build, Rocket};

use swim_team_backend::cron_jobs::register_cron_jobs;
use swim_team_backend::modules::helpers::fairings::cors::CORS;
use swim_team_backend::modules::helpers::logging::setup_logging;
use swim_team_backend::routes::api;

#[launch]
async fn rocket() -> Rocket<Build> {
    setup_logging().expect("Failed to setup logging");

    // register cron jobs that need to run.
    // these are jobs that either need to effect the database, redis, or both.
    register_cron_jobs().await;

    // start the webserver
    rocket::build().attach(CORS).mount(
        "/api",
        routes![
            // auth
            api::auth::post_login,
            api::auth::post_check,
            // users
            api::user::save_one,
            api::user::get_all,
            api::user::get_one,
            api::user::update_one,
            api::user::change_password,
            api::user::link_swimmer,
            // swimmers
            api::swimmer::save_one,
            api::swimmer::update_one,
            api::swimmer::set_class_active,
            api::swimmer::get_one,
            api::swimmer::get_entries,
            api::swimmer::get_event_entries,
            api::swimmer::get_best_times,
            api::swimmer::get_attendance,
            // teams
            api::team::save_one,
            api::team::get_all,
            api::team::get_one,
            api::team::get_roster_current,
            api::team::get_roster_all,
            // meets
            api::meet::save_one,
            api::meet::get_all,
            api::meet::get_one,
            api::meet::get_entries,
            api::meet::get_team_entries,
            api::meet::get_season,
            api::meet::get_latest,
            // entries
            api::entry::save_one,
            api::entry::get_one,
            // events / leaderboards
            api::event::get_all_swims,
            api::event::get_top5,
            api::event::get_all_top5,
            api::event::get_all_top5_unofficial,
            // standards
            api::standard::save_one,
            api::standard::get_all,
            api::standard::get_one,
            // attendance
            api::attendance::save_one,
            api::attendance::get_by_date,
            // status
            api::status::ping,
            api::status::info,
        ],
    )
}
