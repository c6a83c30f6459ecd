//! Line commands for the terminal front end

use crate::snapshot::Reading;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set { reading: Reading, value: f64 },
    Region(String),
    Season(String),
    Predict,
    Reset,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  set <reading> <value>   change a reading (prediction follows after a short pause)
  region <name>           select region and predict
  season <name>           select season and predict
  predict                 predict now
  reset                   restore default readings and predict
  show                    print current readings
  help                    this text
  quit                    exit

Readings: rainfall, temperature, humidity, soil_moisture, sunlight, soil_ph,
          nitrogen, phosphorus, potassium";

impl Command {
    /// Parse one input line; blank lines give `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = parts.collect();

        let command = match head.to_ascii_lowercase().as_str() {
            "set" => {
                let [key, value] = rest.as_slice() else {
                    return Err("usage: set <reading> <value>".to_string());
                };
                let reading = Reading::from_key(key).ok_or_else(|| format!("unknown reading '{}'", key))?;
                let value: f64 = value.parse().map_err(|_| format!("'{}' is not a number", value))?;
                Command::Set { reading, value }
            }
            "region" | "season" if rest.is_empty() => {
                return Err(format!("usage: {} <name>", head.to_ascii_lowercase()));
            }
            "region" => Command::Region(rest.join(" ")),
            "season" => Command::Season(rest.join(" ")),
            "predict" => Command::Predict,
            "reset" => Command::Reset,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{}' (try 'help')", other)),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        assert_eq!(
            Command::parse("set rainfall 300").unwrap(),
            Some(Command::Set { reading: Reading::Rainfall, value: 300.0 })
        );
        assert_eq!(
            Command::parse("  SET Soil_PH 6.2 ").unwrap(),
            Some(Command::Set { reading: Reading::SoilPh, value: 6.2 })
        );
        assert!(Command::parse("set rainfall").is_err());
        assert!(Command::parse("set wind 3").unwrap_err().contains("wind"));
        assert!(Command::parse("set rainfall lots").is_err());
    }

    #[test]
    fn test_parse_categories_keep_spaces() {
        assert_eq!(
            Command::parse("region North East").unwrap(),
            Some(Command::Region("North East".to_string()))
        );
        assert_eq!(Command::parse("season Winter").unwrap(), Some(Command::Season("Winter".to_string())));
        assert!(Command::parse("region").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("predict").unwrap(), Some(Command::Predict));
        assert_eq!(Command::parse("reset").unwrap(), Some(Command::Reset));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
        assert!(Command::parse("dance").is_err());
    }
}
