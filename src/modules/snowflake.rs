use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use rand::Rng;

use crate::errors::{CustomResult, Error};

/// Epoch for all ids: 1 September 2014 00:00:00 UTC, in milliseconds.
pub const EPOCH_MS: i64 = 1_409_547_600_000;

const SEQUENCE_BITS: u8 = 12;
const YEAR_BITS: u8 = 5;
const ID_TYPE_BITS: u8 = 5;

const YEAR_SHIFT: u8 = SEQUENCE_BITS;
const ID_TYPE_SHIFT: u8 = SEQUENCE_BITS + YEAR_BITS;
const TIMESTAMP_SHIFT: u8 = SEQUENCE_BITS + YEAR_BITS + ID_TYPE_BITS;

const MAX_SEQUENCE: i64 = (1 << SEQUENCE_BITS) - 1;
const MAX_YEAR: i64 = (1 << YEAR_BITS) - 1;

/// The entity discriminant packed into every id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdType {
    Swimmer = 1,
    Meet = 2,
    Entry = 3,
    Team = 4,
    User = 5,
    Attendance = 6,
}

struct GeneratorState {
    last_timestamp: i64,
    sequence: i64,
}

static STATE: Lazy<Mutex<GeneratorState>> = Lazy::new(|| {
    Mutex::new(GeneratorState {
        last_timestamp: -1,
        sequence: 0,
    })
});

fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_millis() as i64
}

fn wait_for_next_millis(last_timestamp: i64) -> i64 {
    let mut timestamp = current_timestamp();
    while timestamp <= last_timestamp {
        timestamp = current_timestamp();
    }
    timestamp
}

fn pack(timestamp: i64, id_type: IdType, year: i64, sequence: i64) -> i64 {
    ((timestamp - EPOCH_MS) << TIMESTAMP_SHIFT)
        | ((id_type as i64) << ID_TYPE_SHIFT)
        | (year << YEAR_SHIFT)
        | sequence
}

/// the five graduation-year bits for a class year, e.g. 2026 -> 26
pub fn grad_year_bits(class_year: i32) -> i64 {
    ((class_year % 100) % 32) as i64
}

/// # generate a new id
/// same-millisecond calls increment the sequence and roll over to the next
/// millisecond when it saturates
///
/// ## Arguments
/// * `id_type` - entity discriminant
/// * `year` - graduation-year bits (0 for everything but swimmers)
pub fn generate_id(id_type: IdType, year: i64) -> CustomResult<i64> {
    if !(0..=MAX_YEAR).contains(&year) {
        return Err(Error::IdGenerationError {
            reason: format!("grad year must be between 0 and {}", MAX_YEAR),
        });
    }

    let mut state = STATE.lock().unwrap();
    let mut timestamp = current_timestamp();

    if timestamp < state.last_timestamp {
        return Err(Error::IdGenerationError {
            reason: "clock moved backwards".to_string(),
        });
    }

    if timestamp == state.last_timestamp {
        state.sequence = (state.sequence + 1) & MAX_SEQUENCE;
        if state.sequence == 0 {
            timestamp = wait_for_next_millis(state.last_timestamp);
        }
    } else {
        state.sequence = 0;
    }

    state.last_timestamp = timestamp;
    Ok(pack(timestamp, id_type, year, state.sequence))
}

/// # generate an id at a fixed moment
/// used for backdated swimmer ids (team join dates); the sequence is random
/// since there is no counter to order against
///
/// ## Arguments
/// * `timestamp_ms` - unix milliseconds the id should encode
pub fn generate_id_at(id_type: IdType, year: i64, timestamp_ms: i64) -> CustomResult<i64> {
    if !(0..=MAX_YEAR).contains(&year) {
        return Err(Error::IdGenerationError {
            reason: format!("grad year must be between 0 and {}", MAX_YEAR),
        });
    }
    if timestamp_ms < EPOCH_MS {
        return Err(Error::IdGenerationError {
            reason: "timestamp before the id epoch".to_string(),
        });
    }

    let sequence = rand::thread_rng().gen_range(0..=MAX_SEQUENCE);
    Ok(pack(timestamp_ms, id_type, year, sequence))
}

/// decode the entity discriminant out of an id
pub fn id_type_of(id: i64) -> i64 {
    (id >> ID_TYPE_SHIFT) & ((1 << ID_TYPE_BITS) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn packs_the_documented_layout() {
        let ts = EPOCH_MS + 1_000_000;
        let id = pack(ts, IdType::Swimmer, 26, 7);
        assert_eq!(id >> TIMESTAMP_SHIFT, 1_000_000);
        assert_eq!(id_type_of(id), 1);
        assert_eq!((id >> YEAR_SHIFT) & MAX_YEAR, 26);
        assert_eq!(id & MAX_SEQUENCE, 7);
    }

    #[test]
    fn ids_are_unique_under_bursts() {
        let mut seen = HashSet::new();
        for _ in 0..5000 {
            let id = generate_id(IdType::Entry, 0).unwrap();
            assert!(seen.insert(id));
        }
    }

    #[test]
    fn rejects_out_of_range_years() {
        assert!(generate_id(IdType::Swimmer, 32).is_err());
        assert!(generate_id(IdType::Swimmer, -1).is_err());
    }

    #[test]
    fn grad_year_bits_take_the_two_digit_year() {
        assert_eq!(grad_year_bits(2026), 26);
        assert_eq!(grad_year_bits(2031), 31);
        assert_eq!(grad_year_bits(2032), 0);
    }

    #[test]
    fn backdated_ids_encode_the_given_moment() {
        let ts = EPOCH_MS + 86_400_000;
        let id = generate_id_at(IdType::Swimmer, 26, ts).unwrap();
        assert_eq!(id >> TIMESTAMP_SHIFT, 86_400_000);
        assert_eq!(id_type_of(id), 1);
        assert!(generate_id_at(IdType::Swimmer, 26, EPOCH_MS - 1).is_err());
    }
}
