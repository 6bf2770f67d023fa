use std::collections::VecDeque;
use std::io;
use std::io::Write;
use std::thread;
use std::time;
use std::time::Instant;

use anyhow::Context;
use anyhow::bail;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use torus_life::config::Config;
use torus_life::engine::Engine;
use torus_life::events::Event;
use torus_life::io::convert_event;
use torus_life::noise::Noisy;
use torus_life::pace::Pacer;
use torus_life::pattern::Pattern;
use torus_life::render::Frame;
use torus_life::rule_set::Rule;

const FRAMERATE: u32 = 120;
const FRAMETIME: time::Duration =
    time::Duration::from_millis(((1f64 / FRAMERATE as f64) * 1_000f64) as u64);

/// One rule per configured rule set, each with its own noise source drawn from `rng`.
fn build_rules(config: &Config, rng: &mut StdRng) -> anyhow::Result<VecDeque<Box<dyn Rule>>> {
    let mut rules: VecDeque<Box<dyn Rule>> = VecDeque::with_capacity(config.rules.len());

    for &set in &config.rules {
        let rule: Box<dyn Rule> = match config.noise_odds {
            Some(odds) => {
                let rng = StdRng::from_rng(&mut *rng).context("Failed to seed rule noise")?;
                Box::new(Noisy::with_odds(set, rng, odds))
            }
            None => Box::new(set),
        };

        rules.push_back(rule);
    }

    Ok(rules)
}

/// Raw mode and the alternate screen, restored when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        // from here on, dropping the guard undoes whatever was set up
        let guard = Self;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen) {
            warn!(%err, "failed to leave the alternate screen");
        }

        if let Err(err) = terminal::disable_raw_mode() {
            warn!(%err, "failed to disable raw mode");
        }
    }
}

fn draw(stdout: &mut io::Stdout, frame: &str) -> io::Result<()> {
    queue!(stdout, cursor::MoveTo(0, 0))?;

    for line in frame.lines() {
        queue!(
            stdout,
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(line),
            cursor::MoveToNextLine(1)
        )?;
    }

    stdout.flush()
}

fn run(
    engine: &mut Engine,
    rules: &mut VecDeque<Box<dyn Rule>>,
    config: &Config,
) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    let mut pacer = Pacer::new(config);
    let mut frame = Frame::new(config.status_lines as usize);

    let mut dirty = true;
    let mut last = Instant::now();

    loop {
        let t = Instant::now();

        // Poll event for as long as FRAMETIME
        let event = if event::poll(FRAMETIME)? {
            convert_event(event::read()?)
        } else {
            None
        };

        match event {
            None => {}
            Some(Event::Quit) => break,
            Some(Event::TogglePause) => pacer.toggle_pause(),
            Some(Event::Step) => pacer.toggle_step(),
            Some(Event::Slower) => pacer.slower(),
            Some(Event::Faster) => pacer.faster(),
            Some(Event::CycleRule) => {
                if let Some(next) = rules.pop_front() {
                    let previous = engine.replace_rule(next);
                    rules.push_back(previous);
                }
            }
        }

        dirty |= event.is_some();

        let now = Instant::now();
        if pacer.tick(now - last) {
            engine.advance();
            dirty = true;
        }
        last = now;

        if dirty {
            draw(&mut stdout, frame.render(engine, &pacer))?;
            dirty = false;
        }

        let time_left = FRAMETIME.saturating_sub(t.elapsed());
        thread::sleep(time_left);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env().context("Failed to read configuration")?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, "seeding noise");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut rules = build_rules(&config, &mut rng)?;
    let Some(first) = rules.pop_front() else {
        bail!("No rules configured")
    };

    // Get the width and height of the terminal
    let (cols, rows) = terminal::size().context("Failed to read terminal size")?;
    let grid_rows = rows.saturating_sub(config.status_lines);

    let mut engine = Engine::new(grid_rows as usize, cols as usize, first)
        .with_context(|| format!("Failed to create a grid for a {cols}x{rows} terminal"))?;

    let pattern = Pattern::named(&config.pattern)
        .with_context(|| format!("Unknown pattern {:?}", config.pattern))?;
    let (row, col) = pattern.origin_on(engine.grid().rows(), engine.grid().cols());
    pattern
        .place(&mut engine, row, col)
        .context("Failed to place the starting pattern")?;

    let guard = TerminalGuard::enter().context("Failed to set up the terminal")?;
    let res = run(&mut engine, &mut rules, &config);
    drop(guard);

    engine.destroy();

    res
}
