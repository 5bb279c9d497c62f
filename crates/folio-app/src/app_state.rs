use std::rc::Rc;

use folio_terminal::{
    CancelToken, CommandTable, LineReader, Playback, PlaybackScript, Scrollback, Sequence,
    SequenceState, TimerQueue, Typewriter, builtin_table,
};
use folio_types::config::FolioConfig;
use folio_types::input::{Button, InputEvent};

use crate::easter_egg::KonamiDetector;

/// Which part of the page is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Boot lines typing on the loading screen.
    Loading,
    /// Loading screen gone, hero titles typing.
    Hero,
    /// Terminal accepts demo playback and user input.
    Terminal,
}

/// One-shot timeline events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    HideLoadingScreen,
    StartHero,
    EnableTerminal,
    DismissEasterEgg,
}

/// Whether the host should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// All state the page needs, passed explicitly instead of living in globals.
pub struct AppContext {
    pub config: FolioConfig,
    pub table: Rc<CommandTable>,
    pub scrollback: Scrollback,
    pub reader: LineReader,
    pub boot: Sequence<Typewriter>,
    pub hero: Sequence<Typewriter>,
    pub demo: Playback,
    pub timers: TimerQueue<AppEvent>,
    pub phase: Phase,
    pub konami: KonamiDetector,
    pub easter_egg_visible: bool,
    boot_cancel: CancelToken,
}

impl AppContext {
    /// Build the context with the stock command table and start the boot
    /// animation at t=0.
    pub fn new(config: FolioConfig) -> Self {
        Self::with_table(config, Rc::new(builtin_table()))
    }

    pub fn with_table(config: FolioConfig, table: Rc<CommandTable>) -> Self {
        let boot_cancel = CancelToken::new();
        let boot_steps: Vec<Typewriter> = config
            .boot
            .commands
            .iter()
            .map(|line| Typewriter::new(line, config.boot.char_delay_ms, config.boot.pause_ms))
            .collect();
        let mut boot = Sequence::new(boot_steps).with_cancel(boot_cancel.clone());
        boot.start();

        let hero_steps: Vec<Typewriter> = config
            .hero
            .iter()
            .map(|line| Typewriter::new(&line.text, line.char_delay_ms, config.settle_ms))
            .collect();
        let hero = Sequence::new(hero_steps).on_complete(|| log::info!("hero titles typed"));

        let script = PlaybackScript::new(config.demo.commands.iter().cloned(), config.demo.delay_ms);
        let mut demo = Playback::new(script);
        if config.demo.show_output {
            demo = demo.with_responses(Rc::clone(&table));
        }

        let mut timers = TimerQueue::new();
        timers.schedule(config.loading_screen_ms, AppEvent::HideLoadingScreen);
        timers.schedule(config.terminal_enable_ms, AppEvent::EnableTerminal);

        Self {
            scrollback: Scrollback::new(config.viewport_lines),
            reader: LineReader::new(Rc::clone(&table)),
            table,
            boot,
            hero,
            demo,
            timers,
            phase: Phase::Loading,
            konami: KonamiDetector::new(),
            easter_egg_visible: false,
            boot_cancel,
            config,
        }
    }

    /// Advance every driver and the timeline by `dt_ms`.
    pub fn tick(&mut self, dt_ms: u32) -> Vec<AppEvent> {
        self.boot.tick(dt_ms);
        self.hero.tick(dt_ms);
        self.demo.tick(dt_ms, &mut self.scrollback);

        let events = self.timers.advance(dt_ms);
        for event in &events {
            self.handle_event(*event);
        }
        events
    }

    fn handle_event(&mut self, event: AppEvent) {
        log::debug!("timeline event {event:?} at {}ms", self.timers.now_ms());
        match event {
            AppEvent::HideLoadingScreen => {
                // The boot text is off-screen from here on.
                if !self.boot.is_done() {
                    self.boot_cancel.cancel();
                }
                if self.phase == Phase::Loading {
                    self.phase = Phase::Hero;
                }
                log::info!("loading screen hidden");
                self.timers
                    .schedule(self.config.loading_fade_ms, AppEvent::StartHero);
            },
            AppEvent::StartHero => self.hero.start(),
            AppEvent::EnableTerminal => {
                self.phase = Phase::Terminal;
                log::info!("terminal enabled");
                self.demo.start();
            },
            AppEvent::DismissEasterEgg => self.easter_egg_visible = false,
        }
    }

    /// True once every timed effect has finished and the terminal is live.
    pub fn timeline_settled(&self) -> bool {
        self.phase == Phase::Terminal
            && !self.demo.is_running()
            && matches!(
                self.hero.state(),
                SequenceState::Done | SequenceState::Cancelled
            )
    }

    /// Whether typed input currently reaches the line reader.
    ///
    /// The scrollback has a single writer at a time: input is held back
    /// until the demo playback has finished.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Terminal && !self.demo.is_running()
    }

    /// Route a typed event to the easter egg detector and the line reader.
    pub fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        if matches!(event, InputEvent::Quit) {
            return InputResult::Quit;
        }
        self.feed_konami(event);
        if self.accepts_input() {
            self.reader.handle_input(event, &mut self.scrollback);
        }
        InputResult::Continue
    }

    /// Route a bare key press (no text entry): easter egg and scrolling.
    pub fn handle_key(&mut self, event: &InputEvent) -> InputResult {
        if matches!(event, InputEvent::Quit) {
            return InputResult::Quit;
        }
        self.feed_konami(event);
        match event {
            InputEvent::ButtonPress(Button::Up) => self.scrollback.scroll_by(-1),
            InputEvent::ButtonPress(Button::Down) => self.scrollback.scroll_by(1),
            _ => {},
        }
        InputResult::Continue
    }

    fn feed_konami(&mut self, event: &InputEvent) {
        if self.konami.feed(event) {
            log::info!("easter egg activated");
            self.easter_egg_visible = true;
            self.timers
                .schedule(self.config.easter_egg_ms, AppEvent::DismissEasterEgg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_terminal::LineKind;

    fn run_until_settled(ctx: &mut AppContext) -> u64 {
        let frame = ctx.config.frame_ms;
        while !ctx.timeline_settled() {
            ctx.tick(frame);
            assert!(ctx.timers.now_ms() < 60_000, "timeline never settled");
        }
        ctx.timers.now_ms()
    }

    fn type_line(ctx: &mut AppContext, text: &str) {
        for ch in text.chars() {
            ctx.handle_input(&InputEvent::TextInput(ch));
        }
        ctx.handle_input(&InputEvent::ButtonPress(Button::Confirm));
    }

    #[test]
    fn boot_starts_immediately() {
        let mut ctx = AppContext::new(FolioConfig::default());
        assert_eq!(ctx.phase, Phase::Loading);
        ctx.tick(50);
        assert_eq!(ctx.boot.display_text(), "s");
    }

    #[test]
    fn loading_screen_hides_on_schedule() {
        let mut ctx = AppContext::new(FolioConfig::default());
        let events = ctx.tick(3999);
        assert!(events.is_empty());
        assert_eq!(ctx.phase, Phase::Loading);
        assert_eq!(ctx.tick(1), vec![AppEvent::HideLoadingScreen]);
        assert_eq!(ctx.phase, Phase::Hero);
        // Boot text was still typing; it stops once hidden.
        ctx.tick(16);
        assert_eq!(ctx.boot.state(), SequenceState::Cancelled);
        assert_eq!(ctx.tick(500), vec![AppEvent::StartHero]);
    }

    #[test]
    fn demo_plays_then_terminal_accepts_input() {
        let mut ctx = AppContext::new(FolioConfig::default());
        run_until_settled(&mut ctx);
        let texts: Vec<&str> = ctx.scrollback.lines().iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["whoami", "ls", "cat about.txt"]);
        assert!(ctx.accepts_input());

        type_line(&mut ctx, "whoami");
        let last = ctx.scrollback.last().map(|l| (l.kind(), l.text().to_string()));
        assert_eq!(
            last,
            Some((
                LineKind::Output,
                "anuj - Fullstack Web/App · AI/ML Engineer".to_string()
            ))
        );
    }

    #[test]
    fn input_ignored_while_loading() {
        let mut ctx = AppContext::new(FolioConfig::default());
        type_line(&mut ctx, "help");
        assert!(ctx.scrollback.is_empty());
        assert!(ctx.reader.buffer().is_empty());
    }

    #[test]
    fn hero_titles_type_in_order() {
        let mut ctx = AppContext::new(FolioConfig::default());
        run_until_settled(&mut ctx);
        let titles: Vec<&str> = ctx.hero.steps().iter().map(|s| s.revealed()).collect();
        assert_eq!(
            titles,
            vec!["ANUJ", "Full Stack / AI-ML Developer", "Web • Mobile • AI/ML"]
        );
    }

    #[test]
    fn demo_with_output() {
        let mut config = FolioConfig::default();
        config.demo.commands = vec!["pwd".to_string()];
        config.demo.show_output = true;
        let mut ctx = AppContext::new(config);
        run_until_settled(&mut ctx);
        let texts: Vec<&str> = ctx.scrollback.lines().iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["pwd", "/home/anuj/portfolio"]);
    }

    #[test]
    fn konami_shows_and_dismisses_easter_egg() {
        let mut ctx = AppContext::new(FolioConfig::default());
        run_until_settled(&mut ctx);
        for b in [
            Button::Up,
            Button::Up,
            Button::Down,
            Button::Down,
            Button::Left,
            Button::Right,
            Button::Left,
            Button::Right,
        ] {
            ctx.handle_key(&InputEvent::ButtonPress(b));
        }
        ctx.handle_key(&InputEvent::TextInput('b'));
        ctx.handle_key(&InputEvent::TextInput('a'));
        assert!(ctx.easter_egg_visible);
        ctx.tick(2999);
        assert!(ctx.easter_egg_visible);
        ctx.tick(1);
        assert!(!ctx.easter_egg_visible);
    }

    #[test]
    fn quit_event() {
        let mut ctx = AppContext::new(FolioConfig::default());
        assert_eq!(ctx.handle_input(&InputEvent::Quit), InputResult::Quit);
        assert_eq!(ctx.handle_key(&InputEvent::Quit), InputResult::Quit);
    }
}
