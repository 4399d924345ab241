use super::Level;

/// Everything a host can ask of a game session. `R` is the riddle type and
/// `I` the per-game input.
#[derive(Debug, Clone)]
pub enum SessionCommand<R, I> {
    Load(Level<R>),
    Input(I),
    Next,
    Prev,
    ResetCurrent,
    Pause,
    Resume,
    /// Sent by the host once a second.
    Tick,
    Finish,
    ConfirmFinish,
    CancelFinish,
    Restart,
}
