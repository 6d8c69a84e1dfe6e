use std::collections::HashSet;

use serde::Serialize;

use crate::modules::helpers::swim_time::SwimTime;

/// One swim flattened for leaderboard ranking.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RankedSwim {
    pub entry_id: i64,
    pub swimmer_id: i64,
    pub name: String,
    pub homeschool: bool,
    pub time: String,
    pub season: i32,
    pub first_split: Option<f64>,
    pub relay_legs: Option<[i64; 4]>,
}

/// # rank the swims of one event
/// drops swims with a dead first split (0.0 means the touchpad never fired),
/// drops homeschool swimmers from official boards, sorts by time and keeps
/// each swimmer (or relay foursome) once.
///
/// ## Arguments
/// * `swims` - every recorded swim of the event
/// * `official` - whether homeschool swimmers are excluded
/// * `limit` - how many places the board shows
pub fn rank_event(mut swims: Vec<RankedSwim>, official: bool, limit: usize) -> Vec<RankedSwim> {
    swims.retain(|s| s.first_split != Some(0.0));
    if official {
        swims.retain(|s| !s.homeschool);
    }

    swims.sort_by_key(|s| SwimTime::sort_key(&s.time));

    let mut seen_swimmers: HashSet<i64> = HashSet::new();
    let mut seen_relays: HashSet<[i64; 4]> = HashSet::new();
    let mut board = Vec::new();

    for swim in swims {
        match swim.relay_legs {
            Some(legs) => {
                if !seen_relays.insert(legs) {
                    continue;
                }
            }
            None => {
                if !seen_swimmers.insert(swim.swimmer_id) {
                    continue;
                }
            }
        }
        board.push(swim);
        if board.len() == limit {
            break;
        }
    }

    board
}

#[cfg(test)]
mod tests {
    use super::{rank_event, RankedSwim};

    fn swim(entry_id: i64, swimmer_id: i64, time: &str) -> RankedSwim {
        RankedSwim {
            entry_id,
            swimmer_id,
            name: format!("Swimmer {}", swimmer_id),
            homeschool: false,
            time: time.to_string(),
            season: 2024,
            first_split: Some(13.2),
            relay_legs: None,
        }
    }

    #[test]
    fn ranks_by_padded_time() {
        let board = rank_event(
            vec![swim(1, 1, "1:02.00"), swim(2, 2, "59.90"), swim(3, 3, "1:00.10")],
            true,
            5,
        );
        let order: Vec<i64> = board.iter().map(|s| s.entry_id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn one_place_per_swimmer() {
        let board = rank_event(
            vec![swim(1, 7, "59.90"), swim(2, 7, "1:01.00"), swim(3, 8, "1:02.00")],
            true,
            5,
        );
        let order: Vec<i64> = board.iter().map(|s| s.entry_id).collect();
        assert_eq!(order, vec![1, 3]);
    }

    #[test]
    fn one_place_per_relay_foursome() {
        let mut a = swim(1, 100, "1:40.00");
        a.relay_legs = Some([1, 2, 3, 4]);
        let mut b = swim(2, 100, "1:41.00");
        b.relay_legs = Some([1, 2, 3, 4]);
        let mut c = swim(3, 100, "1:42.00");
        c.relay_legs = Some([1, 2, 3, 5]);

        let board = rank_event(vec![a, b, c], true, 5);
        let order: Vec<i64> = board.iter().map(|s| s.entry_id).collect();
        assert_eq!(order, vec![1, 3]);
    }

    #[test]
    fn official_boards_skip_homeschool() {
        let mut hs = swim(1, 1, "55.00");
        hs.homeschool = true;
        let board = rank_event(vec![hs.clone(), swim(2, 2, "56.00")], true, 5);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].entry_id, 2);

        let unofficial = rank_event(vec![hs, swim(2, 2, "56.00")], false, 5);
        assert_eq!(unofficial[0].entry_id, 1);
    }

    #[test]
    fn dead_touchpad_swims_are_dropped() {
        let mut dead = swim(1, 1, "50.00");
        dead.first_split = Some(0.0);
        let board = rank_event(vec![dead, swim(2, 2, "56.00")], true, 5);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].entry_id, 2);
    }

    #[test]
    fn truncates_to_limit() {
        let swims = (1..=8).map(|i| swim(i, i, "59.00")).collect();
        assert_eq!(rank_event(swims, true, 5).len(), 5);
    }
}
