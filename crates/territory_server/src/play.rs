//! Hot-seat match driven by line-based text input.
//!
//! Commands: `x y` captures a field, `end` ends the turn, `quit` leaves.

use std::io::Write;
use territory::{Role, Session, Status, TurnOutcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::{Player, ServiceError, SessionManager, SessionUpdate};

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Capture the field at `(x, y)`.
    Capture(i64, i64),
    /// End the current turn.
    EndTurn,
    /// Stop playing.
    Quit,
}

impl Command {
    /// Parses one line of input.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let first = parts.next()?;
        match first.to_lowercase().as_str() {
            "end" => return Some(Command::EndTurn),
            "quit" | "exit" => return Some(Command::Quit),
            _ => {}
        }
        let x = first.parse().ok()?;
        let y = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Command::Capture(x, y))
    }
}

/// Plays a match between two locally registered players.
///
/// Reads commands from `input` until the game completes, the player
/// quits, or input ends; returns the last session state.
///
/// # Errors
///
/// Rejected moves are reported to `output` and play continues; any other
/// service failure, an invariant fault, or an I/O error aborts the match.
#[instrument(skip(manager, input, output))]
pub async fn run_hotseat<R, W>(
    manager: &SessionManager,
    name_a: String,
    name_b: String,
    input: R,
    output: &mut W,
) -> anyhow::Result<Session>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let player_a = manager.players().register(name_a).await?;
    let player_b = manager.players().register(name_b).await?;
    let session_id = manager.create_session("hot-seat".to_string()).await;
    manager.join(&session_id, player_a.token()).await?;
    manager.join(&session_id, player_b.token()).await?;

    let listener = log_updates(manager.subscribe(&session_id).await?);
    let result = play_turns(manager, &session_id, &player_a, &player_b, input, output).await;
    listener.abort();
    // Resolves once the task is cancelled and its receiver dropped.
    let _ = listener.await;
    let session = result?;

    if let Some(winner) = session.winner {
        writeln!(
            output,
            "Game over: {winner} ({} - {})",
            session.points_a, session.points_b
        )?;
        info!(%winner, "Hot-seat match finished");
    }
    Ok(session)
}

fn log_updates(mut updates: broadcast::Receiver<SessionUpdate>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Ok(update) = updates.recv().await {
            debug!(
                session_id = %update.session_id,
                round = update.session.current_round,
                "Session update received"
            );
        }
    })
}

async fn play_turns<R, W>(
    manager: &SessionManager,
    session_id: &str,
    player_a: &Player,
    player_b: &Player,
    input: R,
    output: &mut W,
) -> anyhow::Result<Session>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = manager.get_session(session_id).await?;
    render(output, &session, player_a.name(), player_b.name())?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            writeln!(output, "Unrecognized command: enter `x y`, `end` or `quit`")?;
            continue;
        };

        let token = match session.player_turn {
            Role::PlayerA => player_a.token(),
            Role::PlayerB => player_b.token(),
        };

        let result = match command {
            Command::Quit => break,
            Command::EndTurn => manager.end_turn(session_id, token).await,
            Command::Capture(x, y) => manager.make_move(session_id, token, x, y).await,
        };

        match result {
            Ok((updated, outcome)) => {
                session = updated;
                if let TurnOutcome::Passed { next, round } = outcome {
                    writeln!(output, "Turn passes to {next} (round {round})")?;
                }
                render(output, &session, player_a.name(), player_b.name())?;
            }
            Err(ServiceError::Move(e)) if !e.is_defect() => {
                writeln!(output, "Rejected: {}", e.kind())?;
            }
            Err(e) => return Err(e.into()),
        }

        if session.status == Status::Completed {
            break;
        }
    }
    Ok(session)
}

fn render<W: Write>(
    output: &mut W,
    session: &Session,
    name_a: &str,
    name_b: &str,
) -> std::io::Result<()> {
    write!(output, "{}", session.board.display(session.current_round))?;
    let active = match session.player_turn {
        Role::PlayerA => name_a,
        Role::PlayerB => name_b,
    };
    writeln!(
        output,
        "Round {} | {name_a}: {} pts, {} ap | {name_b}: {} pts, {} ap | to move: {active}",
        session.current_round,
        session.points_a,
        session.action_points.balance(Role::PlayerA),
        session.points_b,
        session.action_points.balance(Role::PlayerB),
    )
}
