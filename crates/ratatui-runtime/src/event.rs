use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Clock tick, with milliseconds since the loop started.
    #[from(skip)]
    Tick(u64),
    Render,
    Crossterm(CrosstermEvent),
}
