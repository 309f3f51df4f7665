//! Console command grammar

use std::str::FromStr;

use crate::tasks::TimerCommand;

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Timer(TimerCommand),
    Status,
    Help,
    Quit,
}

/// The six adjustment buttons of the timer window
pub const ADJUSTMENTS: [(&str, i64); 6] = [
    ("-h", -3600),
    ("-m", -60),
    ("-s", -1),
    ("+h", 3600),
    ("+m", 60),
    ("+s", 1),
];

pub const HELP: &str = "\
commands:
  start | pause | stop
  +h +m +s -h -m -s     adjust by an hour, a minute or a second
  adjust <seconds>      adjust by any amount
  default <[[H:]M:]S>   set the default time used by start
  reverse [on|off]      count up instead of down (toggles without argument)
  status                print the timer state as JSON
  help | quit";

impl FromStr for ConsoleInput {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let word = word.to_ascii_lowercase();

        if let Some((_, delta)) = ADJUSTMENTS.iter().find(|(name, _)| *name == word) {
            return Ok(Self::Timer(TimerCommand::Adjust(*delta)));
        }

        let input = match (word.as_str(), rest) {
            ("start", "") => Self::Timer(TimerCommand::Start),
            ("pause", "") => Self::Timer(TimerCommand::Pause),
            ("stop", "") => Self::Timer(TimerCommand::Stop),
            ("adjust", amount) => {
                let delta = amount
                    .parse::<i64>()
                    .map_err(|_| format!("adjust needs a whole number of seconds, got {:?}", amount))?;
                Self::Timer(TimerCommand::Adjust(delta))
            }
            ("default", "") => return Err("default needs a time, e.g. `default 1:30:00`".to_string()),
            ("default", text) => Self::Timer(TimerCommand::SetDefaultTime(text.to_string())),
            ("reverse", "") => Self::Timer(TimerCommand::ToggleReverse),
            ("reverse", flag) => match flag.to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" => Self::Timer(TimerCommand::SetReverse(true)),
                "off" | "false" | "no" => Self::Timer(TimerCommand::SetReverse(false)),
                "toggle" => Self::Timer(TimerCommand::ToggleReverse),
                other => return Err(format!("reverse takes on, off or toggle, got {:?}", other)),
            },
            ("status", "") => Self::Status,
            ("help", "") | ("?", "") => Self::Help,
            ("quit", "") | ("exit", "") => Self::Quit,
            _ => return Err(format!("unknown command {:?}, try `help`", line)),
        };

        Ok(input)
    }
}
