/// State of the current round as seen by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundOutcome {
    #[default]
    InProgress,
    Win,
    Loss,
}

impl RoundOutcome {
    /// Terminal outcomes freeze the simulation until the round is reset.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundOutcome::InProgress)
    }

    pub fn banner(&self) -> Option<&'static str> {
        match self {
            RoundOutcome::InProgress => None,
            RoundOutcome::Win => Some("YOU WIN!"),
            RoundOutcome::Loss => Some("GAME OVER"),
        }
    }
}
