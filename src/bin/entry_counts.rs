use std::collections::HashMap;

use dotenvy::dotenv;
use log::{error, info};

use swim_team_backend::modules::helpers::logging::setup_logging;
use swim_team_backend::modules::models::entry::{Entry, Relay};
use swim_team_backend::modules::models::general::establish_connection;
use swim_team_backend::modules::models::swimmer::Swimmer;

/// # per-swimmer swim counts, most active first
/// relay legs count for every swimmer in the foursome, not just the one the
/// entry hangs off
#[tokio::main]
async fn main() {
    dotenv().ok();
    setup_logging().expect("failed to setup logging");

    let connection = &mut establish_connection();

    let swimmers = match Swimmer::get_all(connection) {
        Ok(swimmers) => swimmers,
        Err(err) => {
            error!(target:"entry_counts", "failed loading swimmers: {}", err);
            return;
        }
    };
    let relays = match Relay::get_all(connection) {
        Ok(relays) => relays,
        Err(err) => {
            error!(target:"entry_counts", "failed loading relays: {}", err);
            return;
        }
    };

    // relay entries hang off the lead swimmer, count them through the legs
    // instead so nobody counts twice
    let mut counts: HashMap<i64, i64> = HashMap::new();
    for swimmer in &swimmers {
        let entries = match Entry::for_swimmer(connection, swimmer.id) {
            Ok(entries) => entries,
            Err(err) => {
                error!(target:"entry_counts", "failed counting {}: {}", swimmer.display_name(), err);
                return;
            }
        };
        let individual = entries.iter().filter(|entry| !entry.relay).count() as i64;
        counts.insert(swimmer.id, individual);
    }
    for relay in &relays {
        for leg in relay.legs() {
            *counts.entry(leg).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<&Swimmer> = swimmers.iter().collect();
    ranked.sort_by_key(|swimmer| -counts.get(&swimmer.id).copied().unwrap_or(0));

    for swimmer in ranked {
        info!(
            target:"entry_counts",
            "{}: {}", swimmer.display_name(), counts.get(&swimmer.id).copied().unwrap_or(0)
        );
    }
}
