use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gerryboxes::generate::GenerateParams;
use gerryboxes::level::{read_level, LevelList, Tier};
use gerryboxes::logging::{LogLevel, Logger, StderrSink};
use gerryboxes::view::BoardView;
use gerryboxes::{Board, Command, Session};

#[derive(Debug, Parser)]
#[command(name = "player")]
#[command(about = "Play merge-and-split color boards from the terminal, one command per line on stdin")]
struct Cli {
    /// Log every merge and split to stderr, not only loads and wins.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Play a single level file.
    Play { level: PathBuf },
    /// Play a randomly generated board. Some generated boards cannot be won.
    Generate {
        #[arg(long, default_value_t = 24)]
        rows: usize,
        #[arg(long, default_value_t = 24)]
        cols: usize,
        #[arg(long, default_value_t = 4)]
        symbols: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// JSON file with any of `rows`, `cols`, `symbols` and `seed`, overriding the flags.
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Play through the level list, moving on with `continue` after each win.
    Campaign {
        /// Directory holding the `levels` list and the level files it names.
        #[arg(long, default_value = "resources")]
        resources: PathBuf,
        #[arg(long, default_value = "tutorial")]
        tier: Tier,
    },
}

struct Campaign {
    resources: PathBuf,
    list: LevelList,
    tier: Tier,
    index: usize,
}

impl Campaign {
    fn open(resources: PathBuf, tier: Tier) -> Result<Self> {
        let path = resources.join("levels");
        let list = LevelList::read(&path).with_context(|| format!("could not open level list {}", path.display()))?;
        Ok(Self { resources, list, tier, index: 0 })
    }

    fn current(&self) -> Result<Board> {
        let name = self.list
            .levels(self.tier)
            .get(self.index)
            .with_context(|| format!("no {} levels listed", self.tier))?;
        let path = self.resources.join(name);
        read_level(&path).with_context(|| format!("could not open level file {}", path.display()))
    }

    /// Step to the next level, or `None` once the list is exhausted.
    fn advance(&mut self) -> Result<Option<Board>> {
        match self.list.next_after(self.tier, self.index) {
            Some((tier, index)) => {
                self.tier = tier;
                self.index = index;
                self.current().map(Some)
            }
            None => Ok(None),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let logger = Logger::new(StderrSink {
        min_level: if cli.verbose { LogLevel::Debug } else { LogLevel::Info },
    });

    let (board, campaign) = match cli.mode {
        Mode::Play { level } => {
            let board = read_level(&level).with_context(|| format!("could not open level file {}", level.display()))?;
            (board, None)
        }
        Mode::Generate { rows, cols, symbols, seed, params } => {
            let params = match params {
                Some(path) => serde_json::from_str::<GenerateParams>(&fs::read_to_string(&path)?)
                    .with_context(|| format!("bad generation parameters in {}", path.display()))?,
                None => GenerateParams { rows, cols, symbols, seed },
            }
            .clamped();
            print!("{}", params.caption());
            (Board::generate(&params)?, None)
        }
        Mode::Campaign { resources, tier } => {
            let campaign = Campaign::open(resources, tier)?;
            (campaign.current()?, Some(campaign))
        }
    };

    run(Session::new(board, logger), campaign)
}

fn run(mut session: Session, mut campaign: Option<Campaign>) -> Result<()> {
    let mut out = std::io::stdout().lock();
    show(&mut out, &session)?;

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        match line.trim() {
            "" => continue,
            "quit" => break,
            "export" => {
                write!(out, "{}", session.board().to_level_string())?;
                continue;
            }
            "view" => {
                let view = BoardView::capture(session.board(), session.connectivity());
                writeln!(out, "{}", serde_json::to_string(&view)?)?;
                continue;
            }
            "continue" => match campaign.as_mut() {
                Some(campaign) if session.won() => match campaign.advance()? {
                    Some(board) => session.load(board),
                    None => {
                        writeln!(out, "every level is done")?;
                        break;
                    }
                },
                Some(_) => {
                    writeln!(out, "win this board first")?;
                    continue;
                }
                None => {
                    writeln!(out, "no level list to continue through")?;
                    continue;
                }
            },
            text => match text.parse::<Command>() {
                Ok(command) => {
                    session.apply(command);
                }
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            },
        }
        show(&mut out, &session)?;
    }

    Ok(())
}

fn show(out: &mut impl Write, session: &Session) -> Result<()> {
    write!(out, "{}", session.board())?;
    let status = session.board()
        .symbols()
        .iter()
        .zip(&session.connectivity().satisfied)
        .map(|(symbol, done)| format!("{}{}", symbol.display(), if *done { "+" } else { "-" }))
        .collect::<Vec<_>>();
    writeln!(out, "{}", status.join(" "))?;
    if session.won() {
        writeln!(out, "won")?;
    }
    Ok(())
}
