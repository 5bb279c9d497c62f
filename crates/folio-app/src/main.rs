//! Portfolio terminal entry point.
//!
//! Plays the page timeline (boot lines on the loading screen, hero titles,
//! scripted terminal demo) and then hands the terminal to stdin: each line
//! read is submitted as a command. A line starting with `:keys`
//! (`:keys up up down down left right left right b a`) presses the named
//! keys instead. EOF quits.

mod app_state;
mod easter_egg;
mod input;
mod render;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use app_state::{AppContext, InputResult};
use folio_terminal::welcome_banner;
use folio_types::config::FolioConfig;
use render::TextRenderer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let fast = args.iter().any(|a| a == "--fast")
        || std::env::var("FOLIO_FAST").is_ok_and(|v| v == "1");

    // Config path from CLI arg, then FOLIO_CONFIG, else built-in defaults.
    let config_path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .or_else(|| std::env::var("FOLIO_CONFIG").ok())
        .map(PathBuf::from);
    let config = match &config_path {
        Some(path) => FolioConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => FolioConfig::default(),
    };

    let mut ctx = AppContext::new(config);
    log::info!(
        "Starting folio terminal ({} commands, fast={fast})",
        ctx.table.len()
    );

    let stdout = io::stdout();
    let mut renderer = TextRenderer::new(stdout.lock(), &ctx.config.prompt);
    renderer.block(&welcome_banner(&ctx.table))?;

    run_timeline(&mut ctx, &mut renderer, fast)?;
    run_interactive(&mut ctx, &mut renderer, io::stdin().lock())?;

    log::info!("Goodbye");
    Ok(())
}

/// Drive every timed effect until the terminal is live.
fn run_timeline<W: Write>(
    ctx: &mut AppContext,
    renderer: &mut TextRenderer<W>,
    fast: bool,
) -> Result<()> {
    let frame_ms = ctx.config.frame_ms;
    while !ctx.timeline_settled() {
        ctx.tick(frame_ms);
        renderer.frame(ctx)?;
        if !fast {
            std::thread::sleep(Duration::from_millis(u64::from(frame_ms)));
        }
    }
    log::debug!("timeline settled at {}ms", ctx.timers.now_ms());
    Ok(())
}

/// Read stdin lines until EOF, submitting each to the terminal.
fn run_interactive<W: Write, R: BufRead + IsTerminal>(
    ctx: &mut AppContext,
    renderer: &mut TextRenderer<W>,
    stdin: R,
) -> Result<()> {
    // On a tty the user's own typing is the echo.
    let interactive = stdin.is_terminal();
    renderer.set_echo_commands(!interactive);

    let mut last = Instant::now();
    let mut lines = stdin.lines();
    loop {
        if interactive {
            renderer.prompt()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading stdin")?;

        let elapsed = u32::try_from(last.elapsed().as_millis()).unwrap_or(u32::MAX);
        last = Instant::now();
        ctx.tick(elapsed);

        if input::dispatch_line(ctx, &line) == InputResult::Quit {
            break;
        }
        renderer.frame(ctx)?;
    }
    Ok(())
}
