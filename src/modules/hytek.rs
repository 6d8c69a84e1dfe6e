use std::collections::HashMap;

use diesel::pg::PgConnection;
use log::{info, warn};
use serde::Deserialize;

use crate::errors::{CustomResult, Error};
use crate::modules::helpers::event_codes::EventCodes;
use crate::modules::helpers::swim_time::SwimTime;
use crate::modules::models::entry::{Entry, NewEntry, Relay};
use crate::modules::models::swimmer::Swimmer;
use crate::modules::snowflake::{generate_id, IdType};

const DQ_CODE: &str = "WithTimeTimeCode.DISQUALIFICATION";

/// The JSON dump of a parsed Hy-Tek .hy3 results file, as the meet-manager
/// toolchain exports it. Enum values arrive stringified (`Gender.FEMALE`,
/// `Stroke.BUTTERFLY`, ...).
#[derive(Deserialize, Debug, Clone)]
pub struct ParsedResults {
    pub meet: ParsedMeet,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ParsedMeet {
    #[serde(default)]
    pub events: HashMap<String, ParsedEvent>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ParsedEvent {
    pub distance: i32,
    pub stroke: String,
    pub gender: String,
    pub relay: bool,
    #[serde(default)]
    pub entries: Vec<ParsedEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ParsedEntry {
    #[serde(default)]
    pub swimmers: Vec<ParsedSwimmer>,
    #[serde(default)]
    pub relay: bool,
    #[serde(default)]
    pub relay_team_id: Option<String>,
    #[serde(default)]
    pub seed_time: f64,
    #[serde(default)]
    pub prelim_time: Option<f64>,
    #[serde(default)]
    pub finals_time: Option<f64>,
    #[serde(default)]
    pub prelim_time_code: Option<String>,
    #[serde(default)]
    pub finals_time_code: Option<String>,
    #[serde(default)]
    pub prelim_splits: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub finals_splits: Option<HashMap<String, f64>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParsedSwimmer {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub usa_swimming_id: Option<String>,
    #[serde(default)]
    pub team_code: Option<String>,
}

/// One row ready to land in the entries table.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedResult {
    pub name: String,
    pub usas_id: Option<String>,
    pub event: String,
    pub seed: String,
    pub time: String,
    pub splits: Vec<f64>,
    pub relay_swimmers: Option<Vec<ParsedSwimmer>>,
}

#[derive(Debug, Default, PartialEq)]
pub struct ImportStats {
    pub imported: usize,
    pub skipped: usize,
}

fn sorted_splits(splits: &Option<HashMap<String, f64>>) -> Vec<f64> {
    let mut values: Vec<f64> = splits
        .as_ref()
        .map(|m| m.values().copied().collect())
        .unwrap_or_default();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    values
}

/// cumulative splits are sorted ascending, so the lead-off leg's finish is
/// the split at a quarter of the race
fn leadoff_time(distance: i32, splits: &[f64]) -> Option<(f64, Vec<f64>)> {
    match distance {
        200 => splits.first().map(|t| (*t, Vec::new())),
        400 => splits.get(1).map(|t| (*t, splits[..2].to_vec())),
        800 => splits.get(3).map(|t| (*t, splits[..4].to_vec())),
        _ => None,
    }
}

fn is_dq(code: &Option<String>) -> bool {
    code.as_deref() == Some(DQ_CODE)
}

fn entry_gender(event: &ParsedEvent) -> Option<&'static str> {
    match event.gender.as_str() {
        "Gender.FEMALE" => Some("F"),
        "Gender.MALE" => Some("M"),
        _ => None,
    }
}

fn entry_stroke(event: &ParsedEvent) -> Option<char> {
    EventCodes::stroke_letter(event.stroke.trim_start_matches("Stroke."))
}

/// # flatten a parsed meet into importable rows for one team
/// individual swims yield a row per prelim and finals swim (finals seeded by
/// the prelim when there is one); relay swims also yield the lead-off leg as
/// an individual row. Disqualified swims are dropped.
pub fn extract_team_results(
    parsed: &ParsedResults,
    team_code: &str,
    team_shortname: &str,
) -> Vec<ImportedResult> {
    let mut results = Vec::new();

    for event in parsed.meet.events.values() {
        let gender = match entry_gender(event) {
            Some(gender) => gender,
            None => {
                warn!(target:"hytek:extract", "skipping mixed/unknown gender event");
                continue;
            }
        };
        let stroke = match entry_stroke(event) {
            Some(stroke) => stroke,
            None => {
                warn!(target:"hytek:extract", "skipping event with unknown stroke {}", event.stroke);
                continue;
            }
        };

        let event_code = EventCodes::assemble(gender, event.distance, stroke, event.relay, false);

        for entry in &event.entries {
            let lead_swimmer = match entry.swimmers.first() {
                Some(swimmer) => swimmer,
                None => continue,
            };
            if lead_swimmer.team_code.as_deref() != Some(team_code) {
                continue;
            }

            if entry.relay {
                let lead_code =
                    EventCodes::assemble(gender, event.distance, stroke, event.relay, true);
                let board_name = format!(
                    "{}, {}",
                    team_shortname,
                    entry.relay_team_id.clone().unwrap_or_default()
                );

                if entry.prelim_time.unwrap_or(0.0) > 0.0 {
                    if is_dq(&entry.prelim_time_code) {
                        continue;
                    }
                    let splits = sorted_splits(&entry.prelim_splits);
                    if let Some((lead, lead_splits)) = leadoff_time(event.distance, &splits) {
                        results.push(ImportedResult {
                            name: format!(
                                "{}, {}",
                                lead_swimmer.last_name, lead_swimmer.first_name
                            ),
                            usas_id: lead_swimmer.usa_swimming_id.clone(),
                            event: lead_code.clone(),
                            seed: "RELAY_LEADOFF".to_string(),
                            time: SwimTime::format(lead),
                            splits: lead_splits,
                            relay_swimmers: None,
                        });
                        results.push(ImportedResult {
                            name: board_name.clone(),
                            usas_id: lead_swimmer.usa_swimming_id.clone(),
                            event: event_code.clone(),
                            seed: SwimTime::format_seed(entry.seed_time),
                            time: SwimTime::format(entry.prelim_time.unwrap_or(0.0)),
                            splits,
                            relay_swimmers: Some(entry.swimmers.clone()),
                        });
                    }
                }

                if entry.finals_time.unwrap_or(0.0) > 0.0 {
                    if is_dq(&entry.finals_time_code) {
                        continue;
                    }
                    let splits = sorted_splits(&entry.finals_splits);
                    if let Some((lead, lead_splits)) = leadoff_time(event.distance, &splits) {
                        let seed = match entry.prelim_time {
                            Some(prelim) if prelim > 0.0 => SwimTime::format(prelim),
                            _ => SwimTime::format_seed(entry.seed_time),
                        };
                        results.push(ImportedResult {
                            name: format!(
                                "{}, {}",
                                lead_swimmer.last_name, lead_swimmer.first_name
                            ),
                            usas_id: lead_swimmer.usa_swimming_id.clone(),
                            event: lead_code.clone(),
                            seed: "RELAY_LEADOFF".to_string(),
                            time: SwimTime::format(lead),
                            splits: lead_splits,
                            relay_swimmers: None,
                        });
                        results.push(ImportedResult {
                            name: board_name,
                            usas_id: lead_swimmer.usa_swimming_id.clone(),
                            event: event_code.clone(),
                            seed,
                            time: SwimTime::format(entry.finals_time.unwrap_or(0.0)),
                            splits,
                            relay_swimmers: Some(entry.swimmers.clone()),
                        });
                    }
                }
            } else {
                let name = format!("{}, {}", lead_swimmer.last_name, lead_swimmer.first_name);

                if entry.prelim_time.unwrap_or(0.0) > 0.0 {
                    if is_dq(&entry.prelim_time_code) {
                        continue;
                    }
                    results.push(ImportedResult {
                        name: name.clone(),
                        usas_id: lead_swimmer.usa_swimming_id.clone(),
                        event: event_code.clone(),
                        seed: SwimTime::format_seed(entry.seed_time),
                        time: SwimTime::format(entry.prelim_time.unwrap_or(0.0)),
                        splits: sorted_splits(&entry.prelim_splits),
                        relay_swimmers: None,
                    });
                }

                if entry.finals_time.unwrap_or(0.0) > 0.0 {
                    if is_dq(&entry.finals_time_code) {
                        continue;
                    }
                    let seed = match entry.prelim_time {
                        Some(prelim) if prelim > 0.0 => SwimTime::format(prelim),
                        _ => SwimTime::format_seed(entry.seed_time),
                    };
                    results.push(ImportedResult {
                        name,
                        usas_id: lead_swimmer.usa_swimming_id.clone(),
                        event: event_code.clone(),
                        seed,
                        time: SwimTime::format(entry.finals_time.unwrap_or(0.0)),
                        splits: sorted_splits(&entry.finals_splits),
                        relay_swimmers: None,
                    });
                }
            }
        }
    }

    results
}

fn locate_swimmer(
    conn: &mut PgConnection,
    usas_id: &Option<String>,
    name: &str,
) -> CustomResult<Option<Swimmer>> {
    if let Some(usas) = usas_id {
        if !usas.is_empty() {
            if let Some(swimmer) = Swimmer::get_by_usas_id(conn, usas)? {
                return Ok(Some(swimmer));
            }
        }
    }

    let mut parts = name.splitn(2, ',');
    let last = parts.next().unwrap_or("").trim();
    let first = parts.next().unwrap_or("").trim();
    Ok(Swimmer::get_by_name(conn, last, first)?)
}

/// # save extracted rows into the database
/// swimmers are located by USA Swimming id first, name second; rows whose
/// swimmer cannot be located are logged and skipped
pub fn save_meet_results(
    conn: &mut PgConnection,
    results: &[ImportedResult],
    meet_id: i64,
) -> CustomResult<ImportStats> {
    let mut stats = ImportStats::default();

    for result in results {
        // relay rows carry a board name ("GHMV, A"), look those up through
        // the lead leg instead
        let lookup_name = match &result.relay_swimmers {
            Some(legs) => legs
                .first()
                .map(|lead| format!("{}, {}", lead.last_name, lead.first_name))
                .unwrap_or_else(|| result.name.clone()),
            None => result.name.clone(),
        };
        let swimmer = match locate_swimmer(conn, &result.usas_id, &lookup_name)? {
            Some(swimmer) => swimmer,
            None => {
                warn!(target:"hytek:save", "Unable to locate {}", result.name);
                stats.skipped += 1;
                continue;
            }
        };

        let entry_id = generate_id(IdType::Entry, 0)?;
        let new_entry = NewEntry {
            id: entry_id,
            swimmer: swimmer.id,
            meet: meet_id,
            event: result.event.clone(),
            seed: result.seed.clone(),
            time: result.time.clone(),
            splits: serde_json::to_string(&result.splits).map_err(|e| {
                Error::MalformedResultsError {
                    reason: e.to_string(),
                }
            })?,
            relay: result.relay_swimmers.is_some(),
            place: None,
        };
        Entry::new(conn, &new_entry)?;
        info!(target:"hytek:save", "imported {} {} ({})", result.name, result.event, result.time);
        stats.imported += 1;

        if let Some(relay_swimmers) = &result.relay_swimmers {
            let mut leg_ids = Vec::new();
            for swimmer in relay_swimmers {
                let name = format!("{}, {}", swimmer.last_name, swimmer.first_name);
                match locate_swimmer(conn, &swimmer.usa_swimming_id, &name)? {
                    Some(found) => leg_ids.push(found.id),
                    None => warn!(target:"hytek:save", "Unable to locate relay leg {}", name),
                }
            }
            if leg_ids.len() == 4 {
                Relay::new(
                    conn,
                    &Relay {
                        entry: entry_id,
                        swimmer_1: leg_ids[0],
                        swimmer_2: leg_ids[1],
                        swimmer_3: leg_ids[2],
                        swimmer_4: leg_ids[3],
                    },
                )?;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ParsedResults {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn individual_finals_are_seeded_by_prelims() {
        let parsed = parse(
            r#"{"meet": {"events": {"12": {
                "distance": 100, "stroke": "Stroke.BUTTERFLY", "gender": "Gender.FEMALE",
                "relay": false,
                "entries": [{
                    "swimmers": [{"first_name": "Ann", "last_name": "Reyes",
                                  "usa_swimming_id": "AR1", "team_code": "SAGH"}],
                    "relay": false,
                    "seed_time": 62.10,
                    "prelim_time": 61.50,
                    "finals_time": 60.90,
                    "prelim_splits": {"1": 13.1, "2": 28.4},
                    "finals_splits": {"1": 13.0, "2": 28.1}
                }]
            }}}}"#,
        );

        let rows = extract_team_results(&parsed, "SAGH", "GHMV");
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].event, "F100L");
        assert_eq!(rows[0].seed, "1:02.10");
        assert_eq!(rows[0].time, "1:01.50");

        assert_eq!(rows[1].seed, "1:01.50");
        assert_eq!(rows[1].time, "1:00.90");
        assert_eq!(rows[1].splits, vec![13.0, 28.1]);
    }

    #[test]
    fn other_teams_are_filtered_out() {
        let parsed = parse(
            r#"{"meet": {"events": {"3": {
                "distance": 50, "stroke": "Stroke.FREESTYLE", "gender": "Gender.MALE",
                "relay": false,
                "entries": [{
                    "swimmers": [{"first_name": "Bo", "last_name": "Kim", "team_code": "RIVL"}],
                    "relay": false, "seed_time": 25.0, "finals_time": 24.8,
                    "finals_splits": {"1": 12.1}
                }]
            }}}}"#,
        );
        assert!(extract_team_results(&parsed, "SAGH", "GHMV").is_empty());
    }

    #[test]
    fn disqualified_swims_are_dropped() {
        let parsed = parse(
            r#"{"meet": {"events": {"3": {
                "distance": 50, "stroke": "Stroke.FREESTYLE", "gender": "Gender.MALE",
                "relay": false,
                "entries": [{
                    "swimmers": [{"first_name": "Bo", "last_name": "Kim", "team_code": "SAGH"}],
                    "relay": false, "seed_time": 25.0,
                    "finals_time": 24.8, "finals_time_code": "WithTimeTimeCode.DISQUALIFICATION",
                    "finals_splits": {"1": 12.1}
                }]
            }}}}"#,
        );
        assert!(extract_team_results(&parsed, "SAGH", "GHMV").is_empty());
    }

    #[test]
    fn relays_yield_leadoff_and_relay_rows() {
        let parsed = parse(
            r#"{"meet": {"events": {"1": {
                "distance": 200, "stroke": "Stroke.MEDELY", "gender": "Gender.FEMALE",
                "relay": true,
                "entries": [{
                    "swimmers": [
                        {"first_name": "Ann", "last_name": "Reyes", "usa_swimming_id": "AR1", "team_code": "SAGH"},
                        {"first_name": "Bea", "last_name": "Ola", "team_code": "SAGH"},
                        {"first_name": "Cat", "last_name": "Ibe", "team_code": "SAGH"},
                        {"first_name": "Dee", "last_name": "Uko", "team_code": "SAGH"}
                    ],
                    "relay": true, "relay_team_id": "A",
                    "seed_time": 0.0,
                    "finals_time": 115.20,
                    "finals_splits": {"1": 29.1, "2": 61.3, "3": 89.0, "4": 115.2}
                }]
            }}}}"#,
        );

        let rows = extract_team_results(&parsed, "SAGH", "GHMV");
        assert_eq!(rows.len(), 2);

        // medley relay lead-off is a 50 backstroke for the lead swimmer
        assert_eq!(rows[0].event, "F50B");
        assert_eq!(rows[0].name, "Reyes, Ann");
        assert_eq!(rows[0].seed, "RELAY_LEADOFF");
        assert_eq!(rows[0].time, "29.10");
        assert!(rows[0].relay_swimmers.is_none());

        assert_eq!(rows[1].event, "F200RM");
        assert_eq!(rows[1].name, "GHMV, A");
        assert_eq!(rows[1].seed, "NT");
        assert_eq!(rows[1].time, "1:55.20");
        assert_eq!(rows[1].relay_swimmers.as_ref().unwrap().len(), 4);
    }

    #[test]
    fn four_hundred_relay_leadoff_keeps_two_splits() {
        let splits: Vec<f64> = vec![26.0, 54.2, 83.0, 112.4];
        let (lead, lead_splits) = leadoff_time(400, &splits).unwrap();
        assert_eq!(lead, 54.2);
        assert_eq!(lead_splits, vec![26.0, 54.2]);
        assert!(leadoff_time(100, &splits).is_none());
    }
}
