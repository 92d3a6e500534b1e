use super::date::{self, parse_date};
use super::{
    convert, evaluate, format_number, parse_float, AngleMode, Bitwise, Function, History,
    HistoryEntry, MemoryStore, NumberBase, Store,
};
use crate::error;
use crate::lang::{Error, Operator};
use chrono::{Local, NaiveDate, Utc};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

type Result<T> = std::result::Result<T, Error>;

pub const ERROR_DISPLAY: &str = "Error";
pub const ERROR_DELAY: Duration = Duration::from_secs(1);
pub const MAX_DISPLAY_LEN: usize = 64;

const THEME_KEY: &str = "theme";
const HISTORY_KEY: &str = "history";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Standard,
    Scientific,
    Programmer,
    Date,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Standard
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

impl Theme {
    pub fn toggle(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// One discrete event from the input surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Digit(char),
    Point,
    Operator(Operator),
    LParen,
    RParen,
    Equals,
    Clear,
    Backspace,
    SetMode(Mode),
    ToggleAngle,
    SetBase(NumberBase),
    Function(Function),
    Bitwise(Bitwise),
    SetStart(String),
    SetEnd(String),
    SetBirth(String),
    CalculateDifference,
    CalculateAge,
    ToggleTheme,
    ToggleHistory,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Input rejected without any state change.
    Ignored,
    Changed,
    Evaluated(HistoryEntry),
    /// The display shows `Error` until the reset is due.
    Failed(Error),
    /// A pending `Error` display went back to `"0"`.
    Reset,
}

#[derive(Debug, Clone, Copy)]
struct PendingReset {
    epoch: u64,
    due: Instant,
}

pub struct Runtime {
    display: String,
    expression: String,
    mode: Mode,
    angle_mode: AngleMode,
    number_base: NumberBase,
    theme: Theme,
    show_history: bool,
    history: History,
    operand: Option<(Bitwise, i64)>,
    start_date: String,
    end_date: String,
    birth_date: String,
    epoch: u64,
    pending_reset: Option<PendingReset>,
    store: Box<dyn Store>,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new(Box::new(MemoryStore::default()))
    }
}

impl Runtime {
    /// Restores the theme and the history from `store`. Display and
    /// expression always start fresh.
    pub fn new(store: Box<dyn Store>) -> Runtime {
        let theme = match store.load(THEME_KEY) {
            Ok(Some(s)) => s.parse().unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(error) => {
                warn!(%error, "could not load theme");
                Theme::default()
            }
        };
        let history = match store.load(HISTORY_KEY) {
            Ok(Some(s)) => History::from_json(&s).unwrap_or_else(|error| {
                warn!(%error, "discarding saved history");
                History::default()
            }),
            Ok(None) => History::default(),
            Err(error) => {
                warn!(%error, "could not load history");
                History::default()
            }
        };
        debug!(%theme, entries = history.len(), "runtime restored");
        Runtime {
            display: "0".to_string(),
            expression: String::new(),
            mode: Mode::default(),
            angle_mode: AngleMode::default(),
            number_base: NumberBase::default(),
            theme,
            show_history: false,
            history,
            operand: None,
            start_date: String::new(),
            end_date: String::new(),
            birth_date: String::new(),
            epoch: 0,
            pending_reset: None,
            store,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn number_base(&self) -> NumberBase {
        self.number_base
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn show_history(&self) -> bool {
        self.show_history
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_error(&self) -> bool {
        self.display == ERROR_DISPLAY
    }

    /// The date fields as entered: start, end and birth.
    pub fn dates(&self) -> (&str, &str, &str) {
        (&self.start_date, &self.end_date, &self.birth_date)
    }

    /// The display in binary, shown under the programmer keypad.
    pub fn binary_preview(&self) -> Option<String> {
        if self.mode != Mode::Programmer || self.is_error() {
            return None;
        }
        Some(convert(&self.display, self.number_base, NumberBase::Bin))
    }

    /// When the pending `Error` reset fires, if one is scheduled.
    pub fn reset_due(&self) -> Option<Instant> {
        match self.pending_reset {
            Some(pending) if pending.epoch == self.epoch => Some(pending.due),
            _ => None,
        }
    }

    pub fn enter(&mut self, input: Input) -> Event {
        self.enter_at(input, Instant::now())
    }

    /// Every calculator input supersedes a pending `Error` reset.
    pub fn enter_at(&mut self, input: Input, now: Instant) -> Event {
        match input {
            Input::ToggleTheme => return self.toggle_theme(),
            Input::ToggleHistory => {
                self.show_history = !self.show_history;
                return Event::Changed;
            }
            _ => {}
        }
        self.epoch += 1;
        let restored = self.is_error();
        if restored {
            self.display = "0".to_string();
        }
        debug!(?input, mode = ?self.mode, "enter");
        let result = match input {
            Input::Digit(ch) => self.digit(ch),
            Input::Point => self.point(),
            Input::Operator(op) => self.operator(op),
            Input::LParen => self.paren('('),
            Input::RParen => self.paren(')'),
            Input::Equals => self.equals(),
            Input::Clear => self.clear(),
            Input::Backspace => self.backspace(),
            Input::SetMode(mode) => self.set_mode(mode),
            Input::ToggleAngle => self.toggle_angle(),
            Input::SetBase(base) => self.set_base(base),
            Input::Function(function) => self.function(function),
            Input::Bitwise(op) => self.bitwise(op),
            Input::SetStart(s) => self.set_date_field(|this| &mut this.start_date, s),
            Input::SetEnd(s) => self.set_date_field(|this| &mut this.end_date, s),
            Input::SetBirth(s) => self.set_date_field(|this| &mut this.birth_date, s),
            Input::CalculateDifference => self.calculate_difference(),
            Input::CalculateAge => self.calculate_age(Local::now().date_naive()),
            Input::ToggleTheme | Input::ToggleHistory => Ok(Event::Ignored),
        };
        match result {
            Ok(Event::Ignored) if restored => Event::Changed,
            Ok(event) => event,
            Err(error) => self.fail(error, now),
        }
    }

    /// Fires the `Error` reset once it is due, unless a newer input has
    /// superseded it.
    pub fn tick(&mut self, now: Instant) -> Event {
        let pending = match self.pending_reset {
            Some(pending) if pending.due <= now => pending,
            _ => return Event::Ignored,
        };
        self.pending_reset = None;
        if pending.epoch != self.epoch || !self.is_error() {
            return Event::Ignored;
        }
        self.display = "0".to_string();
        Event::Reset
    }

    fn fail(&mut self, error: Error, now: Instant) -> Event {
        debug_assert!(error.is_evaluation());
        debug!(%error, "failed");
        self.display = ERROR_DISPLAY.to_string();
        self.pending_reset = Some(PendingReset {
            epoch: self.epoch,
            due: now + ERROR_DELAY,
        });
        Event::Failed(error)
    }

    fn digit(&mut self, ch: char) -> Result<Event> {
        let ch = ch.to_ascii_uppercase();
        let valid = match self.mode {
            Mode::Programmer => self.number_base.is_digit(ch),
            Mode::Standard | Mode::Scientific => ch.is_ascii_digit(),
            Mode::Date => false,
        };
        if !valid || self.display.len() >= MAX_DISPLAY_LEN {
            return Ok(Event::Ignored);
        }
        if self.display == "0" {
            self.display = ch.to_string();
        } else {
            self.display.push(ch);
        }
        Ok(Event::Changed)
    }

    fn point(&mut self) -> Result<Event> {
        match self.mode {
            Mode::Standard | Mode::Scientific => {}
            Mode::Programmer | Mode::Date => return Ok(Event::Ignored),
        }
        let numeral_start = self
            .display
            .rfind(|c: char| !c.is_ascii_digit() && c != '.')
            .map(|i| i + 1)
            .unwrap_or(0);
        if self.display[numeral_start..].contains('.') || self.display.len() >= MAX_DISPLAY_LEN {
            return Ok(Event::Ignored);
        }
        self.display.push('.');
        Ok(Event::Changed)
    }

    fn operator(&mut self, op: Operator) -> Result<Event> {
        match self.mode {
            Mode::Standard | Mode::Scientific => {}
            Mode::Programmer | Mode::Date => return Ok(Event::Ignored),
        }
        self.expression.push_str(&self.display);
        self.expression.push_str(&op.to_string());
        self.display = "0".to_string();
        Ok(Event::Changed)
    }

    fn paren(&mut self, ch: char) -> Result<Event> {
        if self.mode != Mode::Scientific || self.display.len() >= MAX_DISPLAY_LEN {
            return Ok(Event::Ignored);
        }
        if self.display == "0" {
            self.display = ch.to_string();
        } else {
            self.display.push(ch);
        }
        Ok(Event::Changed)
    }

    fn equals(&mut self) -> Result<Event> {
        let full = format!("{}{}", self.expression, self.display);
        let (result, display) = match self.mode {
            Mode::Standard | Mode::Scientific => {
                let value = format_number(evaluate(&full)?);
                (value.clone(), value)
            }
            Mode::Programmer => {
                let rhs = self.parse_display()?;
                let value = match self.operand {
                    Some((op, lhs)) => op.binary(lhs, rhs)?,
                    None => rhs,
                };
                self.operand = None;
                (value.to_string(), self.number_base.render(value))
            }
            Mode::Date => return Ok(Event::Ignored),
        };
        let entry = HistoryEntry::new(full, result, Utc::now().timestamp_millis());
        debug!(expression = %entry.expression, result = %entry.result, "evaluated");
        self.history.push(entry.clone());
        self.display = display;
        self.expression.clear();
        self.save_history();
        Ok(Event::Evaluated(entry))
    }

    fn clear(&mut self) -> Result<Event> {
        self.display = "0".to_string();
        self.expression.clear();
        self.operand = None;
        Ok(Event::Changed)
    }

    fn backspace(&mut self) -> Result<Event> {
        self.display.pop();
        if self.display.is_empty() || self.display == "-" {
            self.display = "0".to_string();
        }
        Ok(Event::Changed)
    }

    fn set_mode(&mut self, mode: Mode) -> Result<Event> {
        self.mode = mode;
        self.display = "0".to_string();
        self.expression.clear();
        self.operand = None;
        Ok(Event::Changed)
    }

    fn toggle_angle(&mut self) -> Result<Event> {
        if self.mode != Mode::Scientific {
            return Ok(Event::Ignored);
        }
        self.angle_mode = self.angle_mode.toggle();
        Ok(Event::Changed)
    }

    fn set_base(&mut self, base: NumberBase) -> Result<Event> {
        if self.mode != Mode::Programmer {
            return Ok(Event::Ignored);
        }
        self.display = convert(&self.display, self.number_base, base);
        self.number_base = base;
        Ok(Event::Changed)
    }

    fn function(&mut self, function: Function) -> Result<Event> {
        if self.mode != Mode::Scientific {
            return Ok(Event::Ignored);
        }
        let value = function.call(parse_float(&self.display), self.angle_mode)?;
        if !value.is_finite() {
            return Err(error!(InvalidExpression; "NOT A NUMBER"));
        }
        self.display = format_number(value);
        Ok(Event::Changed)
    }

    fn bitwise(&mut self, op: Bitwise) -> Result<Event> {
        if self.mode != Mode::Programmer {
            return Ok(Event::Ignored);
        }
        let mut value = self.parse_display()?;
        if op.is_binary() {
            if let Some((pending, lhs)) = self.operand {
                value = pending.binary(lhs, value)?;
            }
            self.expression = format!("{} {} ", self.number_base.render(value), op);
            self.operand = Some((op, value));
            self.display = "0".to_string();
        } else {
            self.display = self.number_base.render(op.unary(value)?);
        }
        Ok(Event::Changed)
    }

    fn parse_display(&self) -> Result<i64> {
        match self.number_base.parse(&self.display) {
            Ok(value) => Ok(value),
            Err(_) => Err(error!(InvalidExpression; "NOT A NUMBER")),
        }
    }

    fn set_date_field<F>(&mut self, field: F, value: String) -> Result<Event>
    where
        F: FnOnce(&mut Runtime) -> &mut String,
    {
        if self.mode != Mode::Date {
            return Ok(Event::Ignored);
        }
        *field(self) = value;
        Ok(Event::Changed)
    }

    fn calculate_difference(&mut self) -> Result<Event> {
        if self.mode != Mode::Date || self.start_date.is_empty() || self.end_date.is_empty() {
            return Ok(Event::Ignored);
        }
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;
        self.display = date::difference(start, end).to_string();
        Ok(Event::Changed)
    }

    fn calculate_age(&mut self, today: NaiveDate) -> Result<Event> {
        if self.mode != Mode::Date || self.birth_date.is_empty() {
            return Ok(Event::Ignored);
        }
        let birth = parse_date(&self.birth_date)?;
        self.display = date::age(birth, today).to_string();
        Ok(Event::Changed)
    }

    fn toggle_theme(&mut self) -> Event {
        self.theme = self.theme.toggle();
        let theme = self.theme.to_string();
        if let Err(error) = self.store.save(THEME_KEY, &theme) {
            warn!(%error, "could not save theme");
        }
        Event::Changed
    }

    fn save_history(&mut self) {
        let saved = self
            .history
            .to_json()
            .and_then(|json| self.store.save(HISTORY_KEY, &json));
        if let Err(error) = saved {
            warn!(%error, "could not save history");
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Mode::*;
        match self {
            Standard => write!(f, "standard"),
            Scientific => write!(f, "scientific"),
            Programmer => write!(f, "programmer"),
            Date => write!(f, "date"),
        }
    }
}

impl FromStr for Mode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Mode> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "std" => Ok(Mode::Standard),
            "scientific" | "sci" => Ok(Mode::Scientific),
            "programmer" | "prog" => Ok(Mode::Programmer),
            "date" => Ok(Mode::Date),
            _ => Err(error!(SyntaxError; "UNKNOWN MODE")),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = Error;
    fn from_str(s: &str) -> Result<Theme> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(error!(ParseFailure; "UNKNOWN THEME")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_age_with_fixed_today() {
        let mut r = Runtime::default();
        r.enter(Input::SetMode(Mode::Date));
        r.enter(Input::SetBirth("2000-06-15".to_string()));
        let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        assert_eq!(r.calculate_age(today).unwrap(), Event::Changed);
        assert_eq!(r.display(), "23y 11m 30d");
    }

    #[test]
    fn test_stale_reset_is_not_due() {
        let mut r = Runtime::default();
        let now = Instant::now();
        r.enter_at(Input::Equals, now);
        r.enter_at(Input::Operator(Operator::Divide), now);
        r.enter_at(Input::Equals, now);
        assert!(r.is_error());
        assert_eq!(r.reset_due(), Some(now + ERROR_DELAY));
        r.enter_at(Input::Digit('7'), now);
        assert_eq!(r.reset_due(), None);
        assert_eq!(r.tick(now + ERROR_DELAY), Event::Ignored);
        assert_eq!(r.display(), "7");
    }

    #[test]
    fn test_theme_and_mode_parse() {
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!("sci".parse::<Mode>().unwrap(), Mode::Scientific);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }
}
