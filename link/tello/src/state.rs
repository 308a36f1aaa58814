/// Fields of interest from one state datagram. The drone broadcasts a
/// `key:value;key:value;...` line roughly ten times a second.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateReport {
    /// Battery charge, percent.
    pub battery: Option<u8>,
    /// Height above takeoff point, decimeters.
    pub height_dm: Option<i32>,
}

/// Parse a state datagram. Unknown keys and malformed fields are skipped;
/// a line with nothing usable parses to an empty report.
pub fn parse_state(line: &str) -> StateReport {
    let mut report = StateReport::default();
    for field in line.trim().split(';') {
        let Some((key, value)) = field.split_once(':') else {
            continue;
        };
        match key {
            "bat" => report.battery = value.parse().ok(),
            "h" => report.height_dm = value.parse().ok(),
            _ => {}
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_datagram() {
        let line = "pitch:0;roll:-1;yaw:3;vgx:0;vgy:0;vgz:0;templ:62;temph:65;\
                    tof:10;h:12;bat:87;baro:163.81;time:0;agx:3.00;agy:-9.00;agz:-1005.00;\r\n";
        let report = parse_state(line);
        assert_eq!(report.battery, Some(87));
        assert_eq!(report.height_dm, Some(12));
    }

    #[test]
    fn test_parse_grounded_datagram() {
        let report = parse_state("h:0;bat:15");
        assert_eq!(report.battery, Some(15));
        assert_eq!(report.height_dm, Some(0));
    }

    #[test]
    fn test_parse_garbage_is_empty() {
        assert_eq!(parse_state("not a state line"), StateReport::default());
        assert_eq!(parse_state(""), StateReport::default());
        // Malformed values are dropped, not errors.
        assert_eq!(parse_state("bat:many;h:;x"), StateReport::default());
    }
}
