//! Slash commands of the interactive prompt.

use std::str::FromStr;

use rakugaki_server::domain::{Point, Tool};

use crate::error::ClientError;

pub const HELP: &str = "\
/join <name>              join the session (or rename)
/tool brush|eraser        select the tool
/width <n>                brush width
/size <n>                 eraser size
/line <x1> <y1> <x2> <y2> draw a straight stroke
/dot <x> <y>              draw a single-point stroke
/cursor <x> <y>           move your cursor
/undo  /redo  /clear      edit the shared history
/users                    list participants
/strokes                  list committed strokes
/quit                     leave";

/// A parsed prompt line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Join(String),
    Tool(Tool),
    Width(f64),
    Size(f64),
    Line { from: Point, to: Point },
    Dot(Point),
    Cursor(Point),
    Undo,
    Redo,
    Clear,
    Users,
    Strokes,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ClientError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(invalid("empty command"));
        };
        let args: Vec<&str> = words.collect();

        let command = match head {
            "/join" => {
                let name = line.trim_start().trim_start_matches("/join").trim();
                if name.is_empty() {
                    return Err(invalid("usage: /join <name>"));
                }
                Command::Join(name.to_string())
            }
            "/tool" => {
                let [tool] = args.as_slice() else {
                    return Err(invalid("usage: /tool brush|eraser"));
                };
                Command::Tool(tool.parse().map_err(|e| invalid(&format!("{e}")))?)
            }
            "/width" => Command::Width(positive(&args, "usage: /width <n>")?),
            "/size" => Command::Size(positive(&args, "usage: /size <n>")?),
            "/line" => {
                let [x1, y1, x2, y2] = numbers::<4>(&args, "usage: /line <x1> <y1> <x2> <y2>")?;
                Command::Line {
                    from: Point::new(x1, y1),
                    to: Point::new(x2, y2),
                }
            }
            "/dot" => {
                let [x, y] = numbers::<2>(&args, "usage: /dot <x> <y>")?;
                Command::Dot(Point::new(x, y))
            }
            "/cursor" => {
                let [x, y] = numbers::<2>(&args, "usage: /cursor <x> <y>")?;
                Command::Cursor(Point::new(x, y))
            }
            "/undo" => Command::Undo,
            "/redo" => Command::Redo,
            "/clear" => Command::Clear,
            "/users" => Command::Users,
            "/strokes" => Command::Strokes,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            other => return Err(invalid(&format!("unknown command '{other}', try /help"))),
        };
        Ok(command)
    }
}

fn invalid(message: &str) -> ClientError {
    ClientError::InvalidCommand(message.to_string())
}

fn numbers<const N: usize>(args: &[&str], usage: &str) -> Result<[f64; N], ClientError> {
    if args.len() != N {
        return Err(invalid(usage));
    }
    let mut values = [0.0; N];
    for (value, arg) in values.iter_mut().zip(args) {
        *value = arg
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(usage))?;
    }
    Ok(values)
}

fn positive(args: &[&str], usage: &str) -> Result<f64, ClientError> {
    let [value] = numbers::<1>(args, usage)?;
    if value <= 0.0 {
        return Err(invalid(usage));
    }
    Ok(value)
}
