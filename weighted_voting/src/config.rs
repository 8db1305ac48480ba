// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One of the named choices a voter can pick from.
///
/// The index is the position of the option in the catalog, starting at 0.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct VoteOption {
    pub index: usize,
    pub name: String,
}

/// The choices submitted by one voter on one input line.
///
/// The indices are kept signed and unchecked: a ballot is only known to be
/// valid once it went through `OptionCatalog::validate_ballot`.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Ballot {
    pub choices: Vec<i64>,
}

impl Ballot {
    pub fn new(choices: &[i64]) -> Ballot {
        Ballot {
            choices: choices.to_vec(),
        }
    }

    /// Reads a ballot from a line of whitespace-separated integers.
    ///
    /// An empty line is an empty ballot.
    pub fn parse(line: &str) -> Result<Ballot, BallotError> {
        let mut choices: Vec<i64> = Vec::new();
        for token in line.split_whitespace() {
            match token.parse::<i64>() {
                Ok(x) => choices.push(x),
                Err(_) => {
                    return Err(BallotError::InvalidToken {
                        token: token.to_string(),
                    })
                }
            }
        }
        Ok(Ballot { choices })
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// Reasons for rejecting a single ballot.
///
/// All of them are recoverable: the ballot is dropped and the voter can try again.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum BallotError {
    TooManyChoices { num_choices: usize, max_choices: usize },
    UnknownOption { index: i64 },
    InvalidToken { token: String },
}

impl Error for BallotError {}

impl Display for BallotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BallotError::TooManyChoices {
                num_choices,
                max_choices,
            } => write!(
                f,
                "Over maximum number of choices -> {} > {}",
                num_choices, max_choices
            ),
            BallotError::UnknownOption { index } => write!(f, "Check your index -> {}", index),
            BallotError::InvalidToken { token } => write!(f, "Not a number -> {}", token),
        }
    }
}

// ******** Output data structures *********

/// Number of votes received by each option, in catalog order.
///
/// Options that did not receive any vote are not listed.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Tally {
    pub entries: Vec<(String, u64)>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SamplingResult {
    /// The number of accepted ballots when voting closed.
    pub voters: usize,
    /// True when nobody voted and every option got a single vote.
    pub uniform: bool,
    /// All the submitted indices, sorted.
    pub population: Vec<usize>,
    pub tally: Tally,
    /// The distinct options drawn, in the order they were found.
    pub candidates: Vec<String>,
}

/// Errors that prevent the sampling from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingErrors {
    EmptyCatalog,
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::EmptyCatalog => write!(f, "VotingError: no option to sample from"),
        }
    }
}

// ********* Configuration **********

/// A control command that ends the vote with a forced outcome.
///
/// The outcome is a single ballot that contains `count` times the option `option`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Shortcut {
    pub command: String,
    pub option: usize,
    pub count: usize,
}

impl Default for Shortcut {
    fn default() -> Self {
        Shortcut {
            command: "-72".to_string(),
            option: 0,
            count: 3,
        }
    }
}

impl Shortcut {
    pub fn ballot(&self) -> Ballot {
        Ballot {
            choices: vec![self.option as i64; self.count],
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct SamplingRules {
    /// The maximum number of distinct candidates to draw.
    pub num_candidates: usize,
}

impl SamplingRules {
    pub const DEFAULT_RULES: SamplingRules = SamplingRules { num_candidates: 3 };
}
