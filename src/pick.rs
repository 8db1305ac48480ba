use log::{debug, info, warn};

use weighted_voting::*;
use snafu::{prelude::*, Snafu};

use std::io::{self, BufRead};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::args::Args;
use crate::pick::config_reader::*;
use crate::pick::screen::{Screen, TerminalScreen};

pub mod config_reader;
pub mod screen;

#[derive(Debug, Snafu)]
pub enum PickError {
    #[snafu(display("Error opening configuration file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the configuration: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("The configuration must be a JSON object"))]
    NotAnObject {},
    #[snafu(display("Missing setting {key} in the configuration"))]
    MissingSetting { key: String },
    #[snafu(display("Setting {key} is not a valid number"))]
    ParsingJsonNumber { key: String },
    #[snafu(display("Malformed shortcut setting: {source}"))]
    ParsingShortcut { source: serde_json::Error },
    #[snafu(display("The shortcut refers to option {option}, which does not exist"))]
    UnknownShortcutOption { option: usize },
    #[snafu(display("No option found in the configuration"))]
    EmptyCatalog {},
    #[snafu(display("Error reading the votes"))]
    ReadingInput { source: std::io::Error },
    #[snafu(display("Error writing to the terminal"))]
    Terminal { source: std::io::Error },
    #[snafu(display("Sampling error: {source}"))]
    Sampling { source: VotingErrors },
}

pub type PickResult<T> = Result<T, PickError>;

/// What an input line asks for.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Command {
    Stop,
    ShowTable,
    Restart,
    Undo,
    Shortcut,
    Vote(String),
}

impl Command {
    pub fn parse(line: &str, shortcut: &Shortcut) -> Command {
        let line = line.trim().to_lowercase();
        match line.as_str() {
            "-1" => Command::Stop,
            "-t" => Command::ShowTable,
            "-r" => Command::Restart,
            "-z" => Command::Undo,
            x if x == shortcut.command.to_lowercase() => Command::Shortcut,
            _ => Command::Vote(line),
        }
    }
}

fn print_info<S: Screen>(screen: &mut S, shortcut: &Shortcut) -> io::Result<()> {
    screen.print_line("")?;
    screen.print_line("# Welcome to weighted sampling!")?;
    screen.print_line("# Start voting, e.g., 1 1 2 or 0 8 (separate with spaces)")?;
    screen.print_line("# Type '-1' to stop voting.")?;
    screen.print_line("# Type '-t' to show the table of options again.")?;
    screen.print_line("# Type '-r' to restart voting.")?;
    screen.print_line("# Type '-z' to undo the last vote.")?;
    screen.print_line(&format!(
        "# Type '{}' to pick option {} right away.",
        shortcut.command, shortcut.option
    ))?;
    screen.print_line("")?;
    screen.print_line(" ========= Voting Start ========= ")?;
    screen.print_line("")
}

fn print_table<S: Screen>(screen: &mut S, catalog: &OptionCatalog) -> io::Result<()> {
    screen.print_line("# Table of options:")?;
    for (index, name) in catalog.describe_all() {
        screen.print_line(&format!("* {} -> {}", index, name))?;
    }
    screen.print_line("")
}

fn print_result<S: Screen>(screen: &mut S, res: &SamplingResult) -> io::Result<()> {
    if res.uniform {
        screen.print_line("")?;
        screen.print_line("# No weights specified -> uniform weights.")?;
    }
    screen.print_line("")?;
    screen.print_line(&format!("# Total weights = {:?}", res.population))?;
    screen.print_line("")?;
    for (name, count) in res.tally.entries.iter() {
        let unit = if *count == 1 { "vote" } else { "votes" };
        screen.print_line(&format!("* {}: {} {}", name, count, unit))?;
    }
    screen.print_line("")?;
    screen.print_line("# Sampling result:")?;
    for (idx, name) in res.candidates.iter().enumerate() {
        screen.print_line(&format!("* Number {} candidate is {}", idx + 1, name))?;
    }
    Ok(())
}

/// Collects the ballots from the input until the vote is closed, then draws the candidates.
///
/// The end of the input closes the vote, like `-1`.
pub fn run_session<B, S, R>(
    catalog: &OptionCatalog,
    shortcut: &Shortcut,
    rules: &SamplingRules,
    input: B,
    screen: &mut S,
    rng: &mut R,
) -> PickResult<SamplingResult>
where
    B: BufRead,
    S: Screen,
    R: Rng + ?Sized,
{
    let mut session = Session::new();
    print_info(screen, shortcut).context(TerminalSnafu {})?;

    let mut lines = input.lines();
    loop {
        let prompt = format!("(Voter #{}) Vote for your choice: ", session.voter_number());
        screen.prompt(&prompt).context(TerminalSnafu {})?;

        let command = match lines.next() {
            Some(line) => {
                let line = line.context(ReadingInputSnafu {})?;
                // The typed line is echoed by the terminal.
                screen.retract_lines(1).context(TerminalSnafu {})?;
                Command::parse(&line, shortcut)
            }
            None => {
                info!("run_session: end of input, closing the vote");
                screen.print_line("").context(TerminalSnafu {})?;
                Command::Stop
            }
        };
        debug!("run_session: command: {:?}", command);

        if session.take_error_flag() {
            screen.retract_lines(2).context(TerminalSnafu {})?;
        }

        match command {
            Command::Stop => {
                screen
                    .print_line(" ========= Voting Done  =========")
                    .context(TerminalSnafu {})?;
                screen.print_line("").context(TerminalSnafu {})?;
                screen
                    .print_line(&format!("Total Electors: {}", session.num_voters()))
                    .context(TerminalSnafu {})?;
                break;
            }
            Command::ShowTable => {
                print_table(screen, catalog).context(TerminalSnafu {})?;
            }
            Command::Restart => {
                info!("run_session: restarting the vote");
                session.reset();
                screen.clear_all().context(TerminalSnafu {})?;
                print_info(screen, shortcut).context(TerminalSnafu {})?;
            }
            Command::Undo => {
                if session.undo().is_none() {
                    debug!("run_session: nothing to undo");
                }
            }
            Command::Shortcut => {
                info!(
                    "run_session: shortcut {:?}, forcing option {}",
                    shortcut.command, shortcut.option
                );
                session.force(shortcut.ballot());
                break;
            }
            Command::Vote(line) => {
                let res = match Ballot::parse(&line) {
                    Ok(ballot) => session.submit(catalog, ballot),
                    Err(e) => {
                        session.set_error_flag();
                        Err(e)
                    }
                };
                if let Err(e) = res {
                    warn!("run_session: rejected input {:?}: {}", line, e);
                    screen
                        .print_line(&format!("ERROR: {}", e))
                        .context(TerminalSnafu {})?;
                    screen.print_line("").context(TerminalSnafu {})?;
                }
            }
        }
    }

    let res = run_sampling(session.ballots(), catalog, rules, rng).context(SamplingSnafu {})?;
    print_result(screen, &res).context(TerminalSnafu {})?;
    Ok(res)
}

pub fn run_interactive(args: &Args) -> PickResult<()> {
    let mut config = read_config(&args.config)?;
    info!("config: {:?}", config);

    if let Some(max_choices) = args.max_choices {
        config.catalog.set_max_choices(max_choices);
    }

    let rules = match args.candidates {
        Some(num_candidates) => SamplingRules { num_candidates },
        None => SamplingRules::DEFAULT_RULES,
    };

    let mut rng: StdRng = match args.seed.or(config.random_seed) {
        Some(seed) => {
            info!("run_interactive: using random seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let mut screen = TerminalScreen::stdout();
    print_table(&mut screen, &config.catalog).context(TerminalSnafu {})?;
    run_session(
        &config.catalog,
        &config.shortcut,
        &rules,
        stdin.lock(),
        &mut screen,
        &mut rng,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[derive(Default)]
    struct RecordingScreen {
        lines: Vec<String>,
        prompts: Vec<String>,
        retracted: usize,
        clears: usize,
    }

    impl Screen for RecordingScreen {
        fn print_line(&mut self, line: &str) -> io::Result<()> {
            self.lines.push(line.to_string());
            Ok(())
        }

        fn prompt(&mut self, text: &str) -> io::Result<()> {
            self.prompts.push(text.to_string());
            Ok(())
        }

        fn retract_lines(&mut self, n: u16) -> io::Result<()> {
            self.retracted += n as usize;
            Ok(())
        }

        fn clear_all(&mut self) -> io::Result<()> {
            self.clears += 1;
            Ok(())
        }
    }

    impl RecordingScreen {
        fn has_line(&self, line: &str) -> bool {
            self.lines.iter().any(|l| l == line)
        }
    }

    fn catalog(names: &[&str], max_choices: usize) -> OptionCatalog {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        OptionCatalog::new(&names, max_choices)
    }

    fn run(
        catalog: &OptionCatalog,
        shortcut: &Shortcut,
        input: &str,
    ) -> (SamplingResult, RecordingScreen) {
        let mut screen = RecordingScreen::default();
        let mut rng = StdRng::seed_from_u64(42);
        let res = run_session(
            catalog,
            shortcut,
            &SamplingRules::DEFAULT_RULES,
            Cursor::new(input.to_string()),
            &mut screen,
            &mut rng,
        )
        .unwrap();
        (res, screen)
    }

    #[test]
    fn parse_commands() {
        let s = Shortcut::default();
        assert_eq!(Command::parse("-1", &s), Command::Stop);
        assert_eq!(Command::parse("  -T \n", &s), Command::ShowTable);
        assert_eq!(Command::parse("-R", &s), Command::Restart);
        assert_eq!(Command::parse("-z", &s), Command::Undo);
        assert_eq!(Command::parse("-72", &s), Command::Shortcut);
        assert_eq!(Command::parse(" 1 2 ", &s), Command::Vote("1 2".to_string()));
        assert_eq!(Command::parse("-5", &s), Command::Vote("-5".to_string()));

        let custom = Shortcut {
            command: "-Eat".to_string(),
            option: 1,
            count: 2,
        };
        assert_eq!(Command::parse("-eat", &custom), Command::Shortcut);
        assert_eq!(Command::parse("-72", &custom), Command::Vote("-72".to_string()));
    }

    #[test]
    fn accepts_and_rejects_ballots() {
        let c = catalog(&["a", "b"], 2);
        let (res, screen) = run(&c, &Shortcut::default(), "0 1\n0 1 1\n5\npizza\n-1\n");
        assert_eq!(res.voters, 1);
        assert_eq!(res.population, vec![0, 1]);
        assert!(screen.has_line("ERROR: Over maximum number of choices -> 3 > 2"));
        assert!(screen.has_line("ERROR: Check your index -> 5"));
        assert!(screen.has_line("ERROR: Not a number -> pizza"));
        assert!(screen.has_line("Total Electors: 1"));
        // Rejected ballots do not consume a voter number.
        assert_eq!(
            screen.prompts.last().unwrap(),
            "(Voter #2) Vote for your choice: "
        );
    }

    #[test]
    fn retracts_error_lines() {
        let c = catalog(&["a", "b"], 2);
        let (_, screen) = run(&c, &Shortcut::default(), "9\n0\n-1\n");
        // One echoed line per input, and the two lines of the error.
        assert_eq!(screen.retracted, 3 + 2);
    }

    #[test]
    fn undo_last_ballot() {
        let c = catalog(&["a", "b"], 2);
        let (res, _) = run(&c, &Shortcut::default(), "0\n1\n-z\n-1\n");
        assert_eq!(res.voters, 1);
        assert_eq!(res.population, vec![0]);
    }

    #[test]
    fn undo_with_empty_history() {
        let c = catalog(&["a", "b"], 2);
        let (res, screen) = run(&c, &Shortcut::default(), "-z\n-z\n1\n-1\n");
        assert_eq!(res.voters, 1);
        assert_eq!(res.population, vec![1]);
        assert_eq!(screen.prompts[2], "(Voter #1) Vote for your choice: ");
        assert_eq!(screen.prompts[3], "(Voter #2) Vote for your choice: ");
    }

    #[test]
    fn restart_clears_the_session() {
        let c = catalog(&["a", "b"], 2);
        let (res, screen) = run(&c, &Shortcut::default(), "0\n1\n-r\n1 1\n-1\n");
        assert_eq!(res.voters, 1);
        assert_eq!(res.population, vec![1, 1]);
        assert_eq!(screen.clears, 1);
        assert_eq!(screen.prompts[3], "(Voter #1) Vote for your choice: ");
    }

    #[test]
    fn show_table() {
        let c = catalog(&["a", "b"], 2);
        let (res, screen) = run(&c, &Shortcut::default(), " -T \n-1\n");
        assert_eq!(res.voters, 0);
        assert!(screen.has_line("# Table of options:"));
        assert!(screen.has_line("* 0 -> a"));
        assert!(screen.has_line("* 1 -> b"));
    }

    #[test]
    fn default_shortcut_ends_the_vote() {
        let c = catalog(&["72", "b"], 2);
        let (res, _) = run(&c, &Shortcut::default(), "1 1\n-72\n1\n-1\n");
        assert_eq!(res.population, vec![0, 0, 0]);
        assert_eq!(res.candidates, vec!["72".to_string()]);
    }

    #[test]
    fn custom_shortcut() {
        let c = catalog(&["a", "b", "c"], 1);
        let s = Shortcut {
            command: "-eat".to_string(),
            option: 2,
            count: 2,
        };
        let (res, _) = run(&c, &s, "-EAT\n");
        assert_eq!(res.population, vec![2, 2]);
        assert_eq!(res.candidates, vec!["c".to_string()]);
    }

    #[test]
    fn end_of_input_closes_the_vote() {
        let c = catalog(&["a", "b"], 2);
        let (res, screen) = run(&c, &Shortcut::default(), "1\n");
        assert_eq!(res.voters, 1);
        assert_eq!(res.population, vec![1]);
        assert!(screen.has_line("Total Electors: 1"));
    }

    #[test]
    fn no_votes_gives_uniform_weights() {
        let c = catalog(&["a", "b", "c", "d"], 2);
        let (res, screen) = run(&c, &Shortcut::default(), "-1\n");
        assert!(res.uniform);
        assert_eq!(res.population, vec![0, 1, 2, 3]);
        assert_eq!(res.candidates.len(), 3);
        assert!(screen.has_line("# No weights specified -> uniform weights."));
        assert!(screen.has_line("* a: 1 vote"));
    }

    #[test]
    fn prints_tally_and_candidates() {
        let c = catalog(&["option0", "option1"], 2);
        let (res, screen) = run(&c, &Shortcut::default(), "0 0\n1\n-1\n");
        assert_eq!(res.population, vec![0, 0, 1]);
        assert!(screen.has_line("# Total weights = [0, 0, 1]"));
        assert!(screen.has_line("* option0: 2 votes"));
        assert!(screen.has_line("* option1: 1 vote"));
        assert_eq!(res.candidates.len(), 2);
        assert!(screen.has_line(&format!(
            "* Number 1 candidate is {}",
            res.candidates[0]
        )));
        assert!(screen.has_line(&format!(
            "* Number 2 candidate is {}",
            res.candidates[1]
        )));
    }
}
