use landgrab_proto::{Action, GameState, Point};

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

////////////////////////////////////////////////////////////////////////////////

/// A player's decision routine, asked for one action per turn.
pub trait Strategy {
    fn decide(
        &mut self,
        me: Point,
        coins: &[Point],
        walls: &[Point],
        board_size: i32,
    ) -> anyhow::Result<String>;
}

impl<F> Strategy for F
where
    F: FnMut(Point, &[Point], &[Point], i32) -> anyhow::Result<String>,
{
    fn decide(
        &mut self,
        me: Point,
        coins: &[Point],
        walls: &[Point],
        board_size: i32,
    ) -> anyhow::Result<String> {
        self(me, coins, walls, board_size)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StrategyFault {
    #[error("strategy failed: {0:#}")]
    Failed(anyhow::Error),

    #[error("strategy panicked: {0}")]
    Panicked(String),

    #[error("strategy returned no action")]
    Empty,
}

////////////////////////////////////////////////////////////////////////////////

/// Runs one turn of `strategy`, turning errors, panics and blank answers into
/// a `StrategyFault`.
pub fn invoke<S: Strategy + ?Sized>(
    strategy: &mut S,
    state: &GameState,
) -> Result<Action, StrategyFault> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        strategy.decide(
            state.agent_position,
            &state.items,
            &state.obstacles,
            state.board_size,
        )
    }));

    match outcome {
        Ok(Ok(text)) => Action::from_text(&text).ok_or(StrategyFault::Empty),
        Ok(Err(err)) => Err(StrategyFault::Failed(err)),
        Err(payload) => Err(StrategyFault::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

////////////////////////////////////////////////////////////////////////////////
