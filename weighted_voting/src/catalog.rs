use log::debug;

use crate::config::*;

/// Marker for the keys that are used as comments in the configuration.
pub const COMMENT_MARKER: &str = "//";
/// Prefix of the keys that hold settings instead of options.
pub const RESERVED_PREFIX: char = '_';

/// The fixed set of options for a vote, and the limit on the number of choices per voter.
///
/// ```
/// use weighted_voting::{Ballot, OptionCatalog};
///
/// let catalog = OptionCatalog::new(&["Ramen".to_string(), "Tacos".to_string()], 2);
/// assert!(catalog.validate_ballot(&Ballot::new(&[0, 1])).is_ok());
/// assert!(catalog.validate_ballot(&Ballot::new(&[0, 1, 1])).is_err());
/// ```
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct OptionCatalog {
    options: Vec<VoteOption>,
    max_choices: usize,
}

impl OptionCatalog {
    pub fn new(names: &[String], max_choices: usize) -> OptionCatalog {
        let options = names
            .iter()
            .enumerate()
            .map(|(index, name)| VoteOption {
                index,
                name: name.clone(),
            })
            .collect();
        OptionCatalog {
            options,
            max_choices,
        }
    }

    /// Builds a catalog from the keys of a configuration document, in declaration order.
    ///
    /// Reserved keys (starting with `_`) and comments (containing `//`) are skipped.
    pub fn from_entries<'a, I>(keys: I, max_choices: usize) -> OptionCatalog
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<String> = keys
            .into_iter()
            .filter(|k| is_option_key(k))
            .map(|k| k.to_string())
            .collect();
        debug!("from_entries: options: {:?}", names);
        OptionCatalog::new(&names, max_choices)
    }

    /// All the options as `(index, name)` pairs, in index order.
    pub fn describe_all(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.options.iter().map(|o| (o.index, o.name.as_str()))
    }

    pub fn options(&self) -> &[VoteOption] {
        &self.options
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(|o| o.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn max_choices(&self) -> usize {
        self.max_choices
    }

    /// Overwrites the limit for all the ballots validated from now on.
    pub fn set_max_choices(&mut self, max_choices: usize) {
        debug!(
            "set_max_choices: {} -> {}",
            self.max_choices, max_choices
        );
        self.max_choices = max_choices;
    }

    /// Checks a ballot against the limit, then against the known indices.
    ///
    /// The first index that does not exist is reported.
    pub fn validate_ballot(&self, ballot: &Ballot) -> Result<(), BallotError> {
        if ballot.len() > self.max_choices {
            return Err(BallotError::TooManyChoices {
                num_choices: ballot.len(),
                max_choices: self.max_choices,
            });
        }
        for &index in ballot.choices.iter() {
            if self.checked_index(index).is_none() {
                return Err(BallotError::UnknownOption { index });
            }
        }
        Ok(())
    }

    pub(crate) fn checked_index(&self, index: i64) -> Option<usize> {
        usize::try_from(index).ok().filter(|idx| *idx < self.len())
    }
}

fn is_option_key(key: &str) -> bool {
    !key.contains(COMMENT_MARKER) && !key.starts_with(RESERVED_PREFIX)
}
