//! Section headers of the save export

/// Prefix that opens a new segment (split on `"\n+++"`)
pub const SEGMENT_DELIMITER: &str = "\n+++";

/// Separator between the parts of one stop field
pub const STOP_DELIMITER: char = '#';

/// Separator between the fields of one data line
pub const FIELD_DELIMITER: char = ' ';

/// Known segment kinds
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Section {
    /// Legacy station list, superseded by level content
    Stations,
    LengthOverrides,
    SpeedOverrides,
    Timetable,
    LevelContent,
    /// Anything newer exports add; skipped
    Unknown(String),
}

impl Section {
    /// Classify a header line such as `timetable:`
    pub fn from_header(line: &str) -> Section {
        let Some(name) = line.strip_suffix(':') else {
            return Section::Unknown(line.to_string());
        };

        match name {
            "stations" => Section::Stations,
            "length overrides" => Section::LengthOverrides,
            "speed overrides" => Section::SpeedOverrides,
            "timetable" => Section::Timetable,
            "level content" => Section::LevelContent,
            other => Section::Unknown(other.to_string()),
        }
    }

    /// Name used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            Section::Stations => "stations",
            Section::LengthOverrides => "length overrides",
            Section::SpeedOverrides => "speed overrides",
            Section::Timetable => "timetable",
            Section::LevelContent => "level content",
            Section::Unknown(_) => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_headers() {
        assert_eq!(Section::from_header("stations:"), Section::Stations);
        assert_eq!(Section::from_header("length overrides:"), Section::LengthOverrides);
        assert_eq!(Section::from_header("speed overrides:"), Section::SpeedOverrides);
        assert_eq!(Section::from_header("timetable:"), Section::Timetable);
        assert_eq!(Section::from_header("level content:"), Section::LevelContent);
    }

    #[test]
    fn test_unknown_headers() {
        assert_eq!(Section::from_header("signals:"), Section::Unknown("signals".into()));
        assert_eq!(Section::from_header("timetable"), Section::Unknown("timetable".into()));
        assert_eq!(Section::from_header("Timetable:"), Section::Unknown("Timetable".into()));
    }
}
