use multicalc::mach::{Event, Runtime};
use multicalc::term::{parse, Key};
use std::time::Instant;

/// Enters a terminal line and collects the events it produced.
pub fn press(runtime: &mut Runtime, line: &str) -> Vec<Event> {
    press_at(runtime, line, Instant::now())
}

pub fn press_at(runtime: &mut Runtime, line: &str, now: Instant) -> Vec<Event> {
    let mut events = Vec::new();
    for key in parse(line).unwrap() {
        match key {
            Key::Input(input) => events.push(runtime.enter_at(input, now)),
            Key::Help | Key::Quit => {}
        }
    }
    events
}

pub fn display_after(line: &str) -> String {
    let mut runtime = Runtime::default();
    press(&mut runtime, line);
    runtime.display().to_string()
}
