use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    #[msg("Ticket and prize counts must be at least one, with no more prizes than tickets")]
    InvalidConfig,
    #[msg("Ticket number is outside the configured range")]
    OutOfRange,
    #[msg("No paid tickets are available for the draw")]
    NoEligibleTickets,
    #[msg("All prizes have already been drawn")]
    NoPrizesRemaining,
    #[msg("A draw is already in progress")]
    DrawInProgress,
    #[msg("Ticket has already won a prize")]
    AlreadyWinner,
    #[msg("Operation is not allowed in the current draw phase")]
    InvalidState,
    #[msg("Raffle state could not be persisted or restored")]
    PersistenceFailure,
}
