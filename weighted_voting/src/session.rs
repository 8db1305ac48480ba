use log::debug;

use crate::catalog::OptionCatalog;
use crate::config::*;

/// The ballots collected so far in an interactive vote.
///
/// ```
/// use weighted_voting::{Ballot, OptionCatalog, Session};
///
/// let catalog = OptionCatalog::new(&["Anna".to_string(), "Bob".to_string()], 3);
/// let mut session = Session::new();
/// session.submit(&catalog, Ballot::new(&[0, 0, 1]))?;
/// assert_eq!(session.voter_number(), 2);
///
/// # Ok::<(), weighted_voting::BallotError>(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Session {
    ballots: Vec<Ballot>,
    // Set when the last input was rejected.
    error_flag: bool,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    /// Validates the ballot and keeps it if it is correct.
    ///
    /// A rejected ballot leaves the history untouched and raises the error flag.
    pub fn submit(&mut self, catalog: &OptionCatalog, ballot: Ballot) -> Result<(), BallotError> {
        if let Err(e) = catalog.validate_ballot(&ballot) {
            debug!("submit: rejected ballot {:?}: {}", ballot.choices, e);
            self.error_flag = true;
            return Err(e);
        }
        debug!(
            "submit: voter #{} ballot {:?}",
            self.voter_number(),
            ballot.choices
        );
        self.ballots.push(ballot);
        self.error_flag = false;
        Ok(())
    }

    /// Removes the last accepted ballot. Nothing happens if there is none.
    pub fn undo(&mut self) -> Option<Ballot> {
        let res = self.ballots.pop();
        debug!("undo: removed {:?}", res);
        res
    }

    pub fn reset(&mut self) {
        self.ballots.clear();
        self.error_flag = false;
    }

    /// Replaces the whole history with a single ballot, bypassing the validation.
    pub fn force(&mut self, ballot: Ballot) {
        self.ballots = vec![ballot];
        self.error_flag = false;
    }

    /// The number of the next voter. It starts at 1.
    pub fn voter_number(&self) -> usize {
        self.ballots.len() + 1
    }

    pub fn num_voters(&self) -> usize {
        self.ballots.len()
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    pub fn set_error_flag(&mut self) {
        self.error_flag = true;
    }

    pub fn clear_error_flag(&mut self) {
        self.error_flag = false;
    }

    /// Returns the error flag and lowers it.
    pub fn take_error_flag(&mut self) -> bool {
        std::mem::take(&mut self.error_flag)
    }
}
