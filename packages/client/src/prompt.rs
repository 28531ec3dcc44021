//! Interactive prompt: reads slash commands and turns them into messages.

use std::sync::Arc;

use rakugaki_server::infrastructure::dto::websocket::{ClientMessage, CursorMoveRequest};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{Mutex, mpsc};

use crate::{
    command::{Command, HELP},
    error::ClientError,
    gesture::{GestureBuilder, line_path},
    renderer::Renderer,
    session::ClientSession,
};

/// Spacing of the points generated for `/line`
const LINE_STEP: f64 = 5.0;

/// Whether the prompt keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one command to the local state, queueing any resulting messages.
pub fn execute<R: Renderer>(
    command: Command,
    gesture: &mut GestureBuilder,
    session: &mut ClientSession<R>,
    outbound: &mpsc::UnboundedSender<ClientMessage>,
) -> Result<Flow, ClientError> {
    let mut send = |message: ClientMessage| {
        outbound
            .send(message)
            .map_err(|_| ClientError::ConnectionClosed)
    };

    match command {
        Command::Join(name) => send(ClientMessage::UserJoin { name: Some(name) })?,
        Command::Tool(tool) => gesture.tool = tool,
        Command::Width(width) => gesture.width = width,
        Command::Size(size) => gesture.size = size,
        Command::Line { from, to } => {
            let path = line_path(from, to, LINE_STEP);
            for message in gesture.build(session.identity(), &path)? {
                send(message)?;
            }
        }
        Command::Dot(point) => {
            for message in gesture.build(session.identity(), &[point])? {
                send(message)?;
            }
        }
        Command::Cursor(point) => {
            let identity = session.identity().ok_or(ClientError::NotJoined)?;
            send(ClientMessage::CursorMove(CursorMoveRequest {
                user_id: Some(identity.user_id.clone()),
                x: point.x,
                y: point.y,
            }))?;
        }
        Command::Undo => send(ClientMessage::UndoRequest)?,
        Command::Redo => send(ClientMessage::RedoRequest)?,
        Command::Clear => send(ClientMessage::CanvasClear)?,
        Command::Users => session.list_users(),
        Command::Strokes => session.redraw(),
        Command::Help => session.renderer_mut().notice(HELP),
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Blocking prompt loop; run it on a blocking thread.
///
/// Sends `user:join` first, with `name` or a name read from the prompt.
pub fn run_prompt<R: Renderer>(
    name: Option<String>,
    session: Arc<Mutex<ClientSession<R>>>,
    outbound: mpsc::UnboundedSender<ClientMessage>,
) -> Result<(), ClientError> {
    let mut editor = DefaultEditor::new()?;
    let mut gesture = GestureBuilder::default();

    let name = match name {
        Some(name) => name,
        None => match editor.readline("display name: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e.into()),
        },
    };
    outbound
        .send(ClientMessage::UserJoin { name: Some(name) })
        .map_err(|_| ClientError::ConnectionClosed)?;

    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line);

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        let mut session = session.blocking_lock();
        match execute(command, &mut gesture, &mut session, &outbound) {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(ClientError::ConnectionClosed) => return Err(ClientError::ConnectionClosed),
            Err(e) => println!("{e}"),
        }
    }
}
