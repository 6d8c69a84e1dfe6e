/// Event codes look like `F100L` or `M200RM`: gender prefix, distance, an
/// `R` for relays, then a stroke letter (F/B/S/L/M).
pub struct EventCodes {}

impl EventCodes {
    /// # assemble an event code
    ///
    /// ## Arguments
    /// * `gender` - "M" or "F"
    /// * `distance` - full race distance in yards/meters
    /// * `stroke_letter` - F, B, S, L or M
    /// * `relay` - whether this is a relay event
    /// * `leadoff` - attribute a relay lead-off leg: quarter distance,
    ///   individual code, medley lead-off swims backstroke
    pub fn assemble(
        gender: &str,
        distance: i32,
        stroke_letter: char,
        relay: bool,
        leadoff: bool,
    ) -> String {
        let mut code = gender.to_string();

        if relay && leadoff {
            code.push_str(&(distance / 4).to_string());
        } else if relay {
            code.push_str(&distance.to_string());
            code.push('R');
        } else {
            code.push_str(&distance.to_string());
        }

        if relay && leadoff && stroke_letter == 'M' {
            code.push('B');
        } else {
            code.push(stroke_letter);
        }

        code
    }

    pub fn stroke_letter(stroke_name: &str) -> Option<char> {
        match stroke_name {
            "FREESTYLE" => Some('F'),
            "BACKSTROKE" => Some('B'),
            "BREASTSTROKE" => Some('S'),
            "BUTTERFLY" => Some('L'),
            "MEDELY" | "MEDLEY" => Some('M'),
            _ => None,
        }
    }

    /// # display name for an event code
    /// accepts codes with or without the gender prefix
    pub fn display_name(code: &str) -> Option<String> {
        let chars: Vec<char> = code.chars().collect();
        let code = if (chars.first() == Some(&'M') || chars.first() == Some(&'F'))
            && chars.get(1).map(|c| c.is_ascii_digit()).unwrap_or(false)
        {
            &code[1..]
        } else {
            code
        };

        let chars: Vec<char> = code.chars().collect();
        if chars.len() < 2 {
            return None;
        }

        let last = chars[chars.len() - 1];
        let second_last = chars[chars.len() - 2];

        if second_last == 'R' {
            let distance = &code[..code.len() - 2];
            return match last {
                'F' => Some(format!("{} Freestyle Relay", distance)),
                'M' => Some(format!("{} Medley Relay", distance)),
                _ => None,
            };
        }

        let distance = &code[..code.len() - 1];
        match last {
            'F' => Some(format!("{} Freestyle", distance)),
            'M' => Some(format!("{} Individual Medley", distance)),
            'B' => Some(format!("{} Backstroke", distance)),
            'S' => Some(format!("{} Breaststroke", distance)),
            'L' => Some(format!("{} Butterfly", distance)),
            _ => None,
        }
    }

    /// the eight individual events every swimmer is ranked on, for a gender
    pub fn individual_events(gender: &str) -> Vec<String> {
        ["200F", "200M", "50F", "100L", "100F", "500F", "100B", "100S"]
            .iter()
            .map(|e| format!("{}{}", gender.to_uppercase(), e))
            .collect()
    }

    /// every ranked event code suffix, individual and relay
    pub fn leaderboard_events() -> Vec<&'static str> {
        vec![
            "200F", "200M", "50F", "100L", "100F", "500F", "100B", "100S", "200RM", "200RF",
            "400RF",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::EventCodes;

    #[test]
    fn assembles_individual_codes() {
        assert_eq!(EventCodes::assemble("F", 100, 'L', false, false), "F100L");
        assert_eq!(EventCodes::assemble("M", 500, 'F', false, false), "M500F");
    }

    #[test]
    fn assembles_relay_codes() {
        assert_eq!(EventCodes::assemble("F", 200, 'M', true, false), "F200RM");
        assert_eq!(EventCodes::assemble("M", 400, 'F', true, false), "M400RF");
    }

    #[test]
    fn leadoff_is_quarter_distance_individual() {
        assert_eq!(EventCodes::assemble("M", 400, 'F', true, true), "M100F");
        // medley relay lead-off swims backstroke
        assert_eq!(EventCodes::assemble("F", 200, 'M', true, true), "F50B");
    }

    #[test]
    fn names_from_codes() {
        assert_eq!(
            EventCodes::display_name("F100L").as_deref(),
            Some("100 Butterfly")
        );
        assert_eq!(
            EventCodes::display_name("200M").as_deref(),
            Some("200 Individual Medley")
        );
        assert_eq!(
            EventCodes::display_name("M200RM").as_deref(),
            Some("200 Medley Relay")
        );
        assert_eq!(
            EventCodes::display_name("400RF").as_deref(),
            Some("400 Freestyle Relay")
        );
        assert_eq!(EventCodes::display_name("M100X"), None);
    }

    #[test]
    fn individual_event_list_is_gendered() {
        let events = EventCodes::individual_events("f");
        assert_eq!(events.len(), 8);
        assert!(events.contains(&"F500F".to_string()));
    }
}
