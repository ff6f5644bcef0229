use std::{io::Write, time::Duration};

use client_core::{ModeController, MoveOutcome, Renderer};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, Lines},
    time::{interval, Interval, MissedTickBehavior},
};
use tracing::debug;

use crate::{
    commands::{Command, HELP},
    renderer::TerminalRenderer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Applies one command to the session. Refusals are reported to the player
/// through the renderer rather than ending the session.
pub async fn dispatch<R: Renderer>(controller: &mut ModeController<R>, command: Command) -> Flow {
    debug!(?command, "dispatching command");
    match command {
        Command::Move(direction) => match controller.handle_move(direction).await {
            Ok(report) if report.outcome == MoveOutcome::Blocked => {
                controller.renderer_mut().set_status("Blocked");
            }
            Ok(_) => {}
            Err(err) => controller.renderer_mut().notify(&err.to_string()),
        },
        Command::SwitchMode(mode) => controller.set_mode(mode),
        Command::Solve(algorithm) => {
            if let Err(err) = controller.solve(algorithm).await {
                controller.renderer_mut().notify(&err.to_string());
            }
        }
        Command::Speed(value) => {
            controller.set_speed(value);
            let delay = controller.step_delay();
            controller
                .renderer_mut()
                .notify(&format!("animation step every {} ms", delay.as_millis()));
        }
        Command::Reset => controller.reset(),
        Command::Scores => {
            controller.refresh_leaderboard().await;
        }
        Command::Help => controller.renderer_mut().notify(HELP),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Runs the session until `quit` or end of input, multiplexing player input,
/// the one-second play timer and the animation step interval.
pub async fn run<B>(
    controller: &mut ModeController<TerminalRenderer>,
    lines: &mut Lines<B>,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    B: AsyncBufRead + Unpin,
{
    controller.renderer_mut().present(out)?;

    let mut timer = paced(Duration::from_secs(1));
    let mut delay = controller.step_delay();
    let mut frames = paced(delay);

    loop {
        let mut redraw = true;
        let was_animating = controller.is_animating();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        if dispatch(controller, command).await == Flow::Quit {
                            break;
                        }
                    }
                    Err(err) => controller.renderer_mut().notify(&err.to_string()),
                }
            }
            _ = timer.tick() => {
                controller.tick_timer();
                redraw = false;
            }
            _ = frames.tick(), if controller.is_animating() => {
                controller.animation_step();
            }
        }

        if controller.step_delay() != delay {
            delay = controller.step_delay();
            frames = paced(delay);
        }
        if controller.is_animating() && !was_animating {
            // First step lands one full delay after the solve.
            frames.reset();
        }
        if redraw {
            controller.renderer_mut().present(out)?;
        }
    }
    Ok(())
}

fn paced(period: Duration) -> Interval {
    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticks
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
