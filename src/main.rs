//! Pong Evolve entry point
//!
//! `evaluate` scores one generation of random network controllers and saves
//! the fittest. `demo` loads a saved controller and plays it against a
//! scripted stand-in for the human paddle, logging frames as it goes.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use pong_evolve::controller::{BallTracker, Controller, Decision, HumanInput, Observation};
use pong_evolve::{
    Candidate, FeedForward, Frame, Presenter, Settings, evaluate_generation, load_controller,
    run_interactive, save_controller,
};

const USAGE: &str = "\
usage:
  pong-evolve evaluate [--population N] [--seed S] [--hidden H] [--out PATH] [--settings PATH]
  pong-evolve demo [--model PATH] [--ticks T] [--seed S] [--settings PATH]";

const DEFAULT_MODEL: &str = "best.json";

/// Parsed command line options
#[derive(Debug, Clone)]
struct Options {
    population: usize,
    seed: u64,
    hidden: usize,
    model: PathBuf,
    ticks: u64,
    settings: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            population: 20,
            seed: 1,
            hidden: 6,
            model: PathBuf::from(DEFAULT_MODEL),
            ticks: 60 * 30,
            settings: None,
        }
    }
}

impl Options {
    fn parse(args: &[String]) -> Result<Self> {
        let mut opts = Self::default();
        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            let value = iter
                .next()
                .with_context(|| format!("missing value for {flag}"))?;
            match flag.as_str() {
                "--population" => opts.population = value.parse::<usize>().context("--population")?,
                "--seed" => opts.seed = value.parse::<u64>().context("--seed")?,
                "--hidden" => opts.hidden = value.parse::<usize>().context("--hidden")?,
                "--out" | "--model" => opts.model = PathBuf::from(value),
                "--ticks" => opts.ticks = value.parse::<u64>().context("--ticks")?,
                "--settings" => opts.settings = Some(PathBuf::from(value)),
                other => bail!("unknown option {other}\n{USAGE}"),
            }
        }
        Ok(opts)
    }

    fn load_settings(&self, fallback: Settings) -> Result<Settings> {
        match &self.settings {
            Some(path) => Ok(Settings::load_from_file(path)?),
            None => Ok(fallback),
        }
    }
}

/// Stand-in for a human: follows the ball, logs once a second, quits after
/// a fixed number of ticks
struct ScriptedHuman {
    tracker: BallTracker,
    last: Option<Frame>,
    remaining: u64,
    log_every: u64,
}

impl Presenter for ScriptedHuman {
    fn poll_input(&mut self) -> Option<HumanInput> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let Some(frame) = &self.last else {
            return Some(HumanInput::NoChange);
        };
        let obs = Observation {
            paddle_y: frame.paddles[1].y,
            ball_dx: (frame.ball.x - frame.paddles[1].x).abs(),
            ball_y: frame.ball.y,
        };
        Some(match self.tracker.decide(&obs) {
            Decision::Hold => HumanInput::Release,
            Decision::MoveUp => HumanInput::MoveUp,
            Decision::MoveDown => HumanInput::MoveDown,
        })
    }

    fn present(&mut self, frame: &Frame) {
        if frame.tick % self.log_every == 0 {
            log::info!(
                "tick {:>5} | score {}-{} | HITS={} | ball ({:.0}, {:.0})",
                frame.tick,
                frame.scores[0],
                frame.scores[1],
                frame.total_hits(),
                frame.ball.x,
                frame.ball.y
            );
        }
        self.last = Some(frame.clone());
    }
}

fn evaluate(opts: &Options) -> Result<()> {
    let settings = opts.load_settings(Settings::evaluation())?;
    let mut rng = Pcg32::seed_from_u64(opts.seed);
    let mut candidates: Vec<_> = (0..opts.population as u64)
        .map(|id| Candidate::new(id, FeedForward::new_random(&[opts.hidden], 1.0, &mut rng)))
        .collect();

    let report = evaluate_generation(&mut candidates, &settings, opts.seed);

    let mut ranking: Vec<_> = candidates.iter().map(|c| (c.id, c.fitness)).collect();
    ranking.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (rank, (id, fitness)) in ranking.iter().take(5).enumerate() {
        log::info!("#{} candidate {} fitness {}", rank + 1, id, fitness);
    }

    let Some((best_id, _)) = report.best else {
        bail!("empty population");
    };
    let best = candidates
        .iter()
        .find(|c| c.id == best_id)
        .context("best candidate missing")?;
    save_controller(&opts.model, &best.controller)?;
    Ok(())
}

fn demo(opts: &Options) -> Result<()> {
    let settings = opts.load_settings(Settings::default())?;
    let net: FeedForward = load_controller(&opts.model)
        .with_context(|| format!("loading model {}", opts.model.display()))?;

    let mut human = ScriptedHuman {
        tracker: BallTracker::new(settings.paddle_height),
        last: None,
        remaining: opts.ticks,
        log_every: u64::from(settings.fps.max(1)),
    };
    let last = run_interactive(&net, &mut human, &settings, Pcg32::seed_from_u64(opts.seed));
    log::info!(
        "Final score {}-{}, hits {:?}",
        last.scores[0],
        last.scores[1],
        last.hits
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!("{USAGE}");
    };
    let opts = Options::parse(rest)?;

    match command.as_str() {
        "evaluate" => evaluate(&opts),
        "demo" => demo(&opts),
        other => bail!("unknown command {other}\n{USAGE}"),
    }
}
