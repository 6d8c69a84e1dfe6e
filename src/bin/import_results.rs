use std::env;
use std::fs;
use std::io::ErrorKind;

use dotenvy::dotenv;
use log::{error, info};

use swim_team_backend::errors::{CustomResult, Error};
use swim_team_backend::modules::helpers::logging::setup_logging;
use swim_team_backend::modules::hytek::{extract_team_results, save_meet_results, ParsedResults};
use swim_team_backend::modules::models::general::establish_connection;

/// # import a parsed .hy3 results dump
/// usage: import_results <file.json> <meet_id> <team_code> <team_shortname>
#[tokio::main]
async fn main() {
    dotenv().ok();
    setup_logging().expect("failed to setup logging");

    let args: Vec<String> = env::args().collect();
    if args.len() != 5 {
        error!(target:"import_results", "usage: import_results <file.json> <meet_id> <team_code> <team_shortname>");
        return;
    }
    let meet_id: i64 = match args[2].parse() {
        Ok(id) => id,
        Err(_) => {
            error!(target:"import_results", "meet id must be a number: {}", args[2]);
            return;
        }
    };

    let parsed = match load_results_file(&args[1]) {
        Ok(parsed) => parsed,
        Err(Error::FileDoesNotExistError { path }) => {
            error!(target:"import_results", "File does not exist: {}", path);
            return;
        }
        Err(Error::PermissionDeniedError { path }) => {
            error!(target:"import_results", "Permission denied: {}", path);
            return;
        }
        Err(err) => {
            error!(target:"import_results", "failed reading results file: {}", err);
            return;
        }
    };

    let results = extract_team_results(&parsed, &args[3], &args[4]);
    info!(target:"import_results", "extracted {} results for {}", results.len(), args[3]);

    let connection = &mut establish_connection();
    match save_meet_results(connection, &results, meet_id) {
        Ok(stats) => {
            info!(
                target:"import_results",
                "imported {} entries, skipped {}", stats.imported, stats.skipped
            );
        }
        Err(err) => {
            error!(target:"import_results", "import failed: {}", err);
        }
    }
}

fn load_results_file(path: &str) -> CustomResult<ParsedResults> {
    let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::FileDoesNotExistError {
            path: path.to_string(),
        },
        ErrorKind::PermissionDenied => Error::PermissionDeniedError {
            path: path.to_string(),
        },
        _ => Error::MalformedResultsError {
            reason: err.to_string(),
        },
    })?;

    serde_json::from_str(&contents).map_err(|err| Error::MalformedResultsError {
        reason: err.to_string(),
    })
}
