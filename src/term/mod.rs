extern crate ansi_term;
extern crate linefeed;

mod keys;

pub use keys::{parse, Key, COMMANDS};

use crate::mach::{Event, Input, Mode, Runtime, Theme};
use ansi_term::{Colour, Style};
use linefeed::{Completer, Completion, Interface, Prompter, ReadResult, Signal, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

const HELP: &str = "\
Keys are typed and entered as a line: 0-9 a-f . + - * / ( ) =
Commands start with a colon:
  :clear :back                clear entry, delete last character
  :std :sci :prog :date       switch mode
  :angle                      toggle DEG/RAD (scientific)
  :sin :cos :tan :log :ln     functions (scientific)
  :sqrt :sq :exp :fact
  :bin :oct :dec :hex         switch base (programmer)
  :not :shl :shr              bitwise (programmer)
  :and :or :xor               bitwise, then = with the second operand
  :start=DATE :end=DATE :diff difference between dates (date)
  :birth=DATE :age            age today (date)
  :theme :history             toggle theme, toggle history list
  :help :quit";

pub fn main(runtime: Runtime) {
    if let Err(error) = main_loop(runtime) {
        eprintln!("{}", error);
    }
}

fn main_loop(mut runtime: Runtime) -> io::Result<()> {
    let interface = Interface::new("multicalc")?;
    interface.set_report_signal(Signal::Interrupt, true);
    interface.set_completer(Arc::new(CommandCompleter));
    interface.set_prompt("> ")?;
    info!(mode = %runtime.mode(), theme = %runtime.theme(), "session started");
    draw(&interface, &runtime)?;

    loop {
        let timeout = runtime
            .reset_due()
            .map(|due| due.saturating_duration_since(Instant::now()));
        let string = match interface.read_line_step(timeout)? {
            None => {
                if let Event::Reset = runtime.tick(Instant::now()) {
                    draw(&interface, &runtime)?;
                }
                continue;
            }
            Some(ReadResult::Input(string)) => string,
            Some(ReadResult::Signal(Signal::Interrupt)) => {
                interface.set_buffer("")?;
                runtime.enter(Input::Clear);
                draw(&interface, &runtime)?;
                continue;
            }
            Some(ReadResult::Signal(_)) | Some(ReadResult::Eof) => break,
        };
        let keys = match parse(&string) {
            Ok(keys) => keys,
            Err(error) => {
                print_error(&interface, &error.to_string())?;
                continue;
            }
        };
        if !keys.is_empty() {
            interface.add_history_unique(string);
        }
        for key in keys {
            match key {
                Key::Help => interface.write_fmt(format_args!("{}\n", HELP))?,
                Key::Quit => return Ok(()),
                Key::Input(input) => {
                    if let Event::Failed(error) = runtime.enter(input) {
                        debug!(%error, "input failed");
                        print_error(&interface, &error.to_string())?;
                    }
                }
            }
        }
        draw(&interface, &runtime)?;
    }
    Ok(())
}

fn print_error<T: Terminal>(interface: &Interface<T>, message: &str) -> io::Result<()> {
    interface.write_fmt(format_args!("{}\n", Style::new().bold().paint(message)))
}

struct Palette {
    display: Style,
    accent: Style,
    muted: Style,
}

impl Palette {
    fn new(theme: Theme) -> Palette {
        let cream = Colour::RGB(0xda, 0xd7, 0xc5);
        let teal = Colour::RGB(0x24, 0x47, 0x47);
        let sage = Colour::RGB(0x7b, 0x9c, 0x92);
        let slate = Colour::RGB(0x4e, 0x70, 0x6b);
        match theme {
            Theme::Dark => Palette {
                display: cream.on(teal).bold(),
                accent: sage.normal(),
                muted: slate.dimmed(),
            },
            Theme::Light => Palette {
                display: teal.on(cream).bold(),
                accent: slate.normal(),
                muted: sage.dimmed(),
            },
        }
    }
}

fn indicators(runtime: &Runtime) -> String {
    let mode = runtime.mode().to_string().to_uppercase();
    match runtime.mode() {
        Mode::Scientific => format!("{} {}", mode, runtime.angle_mode()),
        Mode::Programmer => format!("{} {}", mode, runtime.number_base()),
        Mode::Standard | Mode::Date => mode,
    }
}

fn draw<T: Terminal>(interface: &Interface<T>, runtime: &Runtime) -> io::Result<()> {
    let palette = Palette::new(runtime.theme());
    let mut out = String::new();
    out.push_str(&format!("{}\n", palette.accent.paint(indicators(runtime))));
    if runtime.mode() == Mode::Date {
        let (start, end, birth) = runtime.dates();
        out.push_str(&format!(
            "{}\n",
            palette
                .muted
                .paint(format!("start {} | end {} | birth {}", start, end, birth))
        ));
    }
    if !runtime.expression().is_empty() {
        out.push_str(&format!("{}\n", palette.muted.paint(runtime.expression())));
    }
    out.push_str(&format!(
        "{}\n",
        palette.display.paint(format!(" {} ", runtime.display()))
    ));
    if let Some(bin) = runtime.binary_preview() {
        out.push_str(&format!("{}\n", palette.muted.paint(format!("BIN {}", bin))));
    }
    if runtime.show_history() {
        if runtime.history().is_empty() {
            out.push_str(&format!("{}\n", palette.muted.paint("no history")));
        }
        for entry in runtime.history().iter() {
            out.push_str(&format!(
                "{} {}\n",
                palette.muted.paint(format!("{} =", entry.expression)),
                palette.accent.paint(&entry.result)
            ));
        }
    }
    interface.write_fmt(format_args!("{}", out))
}

struct CommandCompleter;

impl<Term: Terminal> Completer<Term> for CommandCompleter {
    fn complete(
        &self,
        word: &str,
        _prompter: &Prompter<Term>,
        _start: usize,
        _end: usize,
    ) -> Option<Vec<Completion>> {
        if !word.starts_with(':') {
            return None;
        }
        let comp_list: Vec<Completion> = COMMANDS
            .iter()
            .filter(|command| command.starts_with(word))
            .map(|command| {
                let mut comp = Completion::simple(command.to_string());
                if command.ends_with('=') {
                    comp.suffix = linefeed::complete::Suffix::None;
                }
                comp
            })
            .collect();
        if comp_list.is_empty() {
            None
        } else {
            Some(comp_list)
        }
    }
}
