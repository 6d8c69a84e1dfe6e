use dotenvy::dotenv;
use log::{error, info};

use swim_team_backend::modules::helpers::logging::setup_logging;
use swim_team_backend::modules::models::general::establish_connection;
use swim_team_backend::modules::models::swimmer::Swimmer;

#[tokio::main]
async fn main() {
    dotenv().ok();
    setup_logging().expect("failed to setup logging");

    let connection = &mut establish_connection();
    match Swimmer::recompute_ages(connection) {
        Ok(updated) => {
            info!(target:"update_ages", "updated {} ages", updated);
        }
        Err(err) => {
            error!(target:"update_ages", "failed recomputing ages: {}", err);
        }
    }
}
