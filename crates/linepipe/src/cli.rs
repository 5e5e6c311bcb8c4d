use clap::Parser;

const LONG_ABOUT: &str = r#"linepipe splits a line editor across three cooperating processes:
capture reads keystrokes, edit rewrites completed lines, echo prints both.

KEYS:
    E        end the current line and hand it to the editor
    a        substituted with z in the edited output
    X        erases the previous character (inert at the start of a line)
    K        discards everything typed so far on the line
    T        ends the line and shuts the pipeline down normally
    Ctrl+K   aborts the pipeline immediately

The raw keystrokes appear as typed; each completed line follows, rewritten
and wrapped in line breaks. The terminal is restored on every exit path."#;

#[derive(Parser)]
#[command(name = "linepipe")]
#[command(author, version)]
#[command(about = "Three-process line-editing terminal pipeline")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {}
