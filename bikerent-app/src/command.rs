use std::str::FromStr;

use bikerent_calendar::calendar;
use bikerent_core::CoreError;
use chrono::NaiveDate;

pub const HELP: &str = "\
commands:
  click <yyyy-MM-dd>   select a day
  clear                clear the selection
  prev | next          change month
  resize <px>          set the viewport width
  open | close         open/close the mobile booking sheet
  dates | select       open the date drawer / confirm the dates (mobile)
  book                 submit the booking
  done                 close the booking confirmation
  show | json          render the widget / dump its state
  help | quit";

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Click(NaiveDate),
    Clear,
    PreviousMonth,
    NextMonth,
    Resize(u32),
    OpenSheet,
    CloseSheet,
    OpenDates,
    ConfirmDates,
    Book,
    CloseConfirmation,
    Show,
    Json,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CoreError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();
        let argument = parts.next();

        if parts.next().is_some() {
            return Err(CoreError::ValidationError(format!("too many arguments: {}", line.trim())));
        }

        let command = match (name.as_str(), argument) {
            ("click", Some(raw)) => Command::Click(calendar::parse_iso_date(raw).map_err(|e| {
                CoreError::ValidationError(format!("invalid date {:?}: {}", raw, e))
            })?),
            ("resize", Some(raw)) => Command::Resize(raw.parse().map_err(|_| {
                CoreError::ValidationError(format!("invalid width {:?}", raw))
            })?),
            ("click", None) | ("resize", None) => {
                return Err(CoreError::ValidationError(format!("{} needs an argument", name)));
            }
            (_, Some(_)) => {
                return Err(CoreError::ValidationError(format!("{} takes no argument", name)));
            }
            ("clear", None) => Command::Clear,
            ("prev", None) => Command::PreviousMonth,
            ("next", None) => Command::NextMonth,
            ("open", None) => Command::OpenSheet,
            ("close", None) => Command::CloseSheet,
            ("dates", None) => Command::OpenDates,
            ("select", None) => Command::ConfirmDates,
            ("book", None) => Command::Book,
            ("done", None) => Command::CloseConfirmation,
            ("show", None) | ("", None) => Command::Show,
            ("json", None) => Command::Json,
            ("help", None) => Command::Help,
            ("quit", None) | ("exit", None) => Command::Quit,
            (other, None) => {
                return Err(CoreError::ValidationError(format!("unknown command {:?}", other)));
            }
        };
        Ok(command)
    }
}
