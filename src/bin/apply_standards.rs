use dotenvy::dotenv;
use log::{error, info};

use swim_team_backend::modules::helpers::logging::setup_logging;
use swim_team_backend::modules::models::general::establish_connection;
use swim_team_backend::modules::models::standard::Standard;

#[tokio::main]
async fn main() {
    dotenv().ok();
    setup_logging().expect("failed to setup logging");

    let connection = &mut establish_connection();
    match Standard::apply_all(connection) {
        Ok(tagged) => {
            info!(target:"apply_standards", "wrote {} standard tags", tagged);
        }
        Err(err) => {
            error!(target:"apply_standards", "failed applying standards: {}", err);
        }
    }
}
