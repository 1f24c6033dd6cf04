//! Terminal showcase for the kinetic typography engine: a scrollable
//! virtual page of animated sections driven by the keyboard and a fixed
//! frame loop.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use kinetext::config::ShowcaseConfig;
use kinetext::counter::Counter;
use kinetext::diagnostics::{Diagnostics, WarningClass};
use kinetext::kinetic::KineticText;
use kinetext::progress::{Container, EdgePair, ProgressSampler, Viewport};
use kinetext::rotation::{Phase, Rotation, SlideTransition};
use kinetext::scatter::{FieldParams, LetterField, ScatterParams, Vec2};
use kinetext::scroll::SmoothScroll;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

/// Scroll-driven kinetic typography showcase for the terminal.
#[derive(Parser)]
#[command(name = "kinetext", version, about)]
struct Cli {
    /// Path to a YAML showcase configuration.
    #[arg(short, long, env = "KINETEXT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the kinetic headline seed.
    #[arg(long)]
    seed: Option<u32>,

    /// Animation frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Rows scrolled per key press.
    #[arg(long, default_value_t = 4.0)]
    scroll_step: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ShowcaseConfig::load(path)?,
        None => ShowcaseConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.kinetic.seed = seed;
    }

    let diagnostics = Diagnostics::default().suppress_all(config.suppressed_classes()?);
    run_showcase(&config, &diagnostics, cli.fps.max(1), cli.scroll_step)
        .context("showcase failed")
}

/// Restores the terminal even when the showcase exits through an error.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)
            .context("failed to enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn run_showcase(
    config: &ShowcaseConfig,
    diagnostics: &Diagnostics,
    fps: u32,
    scroll_step: f64,
) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let (mut cols, mut rows) = terminal::size().context("failed to query terminal size")?;

    let started = Instant::now();
    let mut page = Page::new(config, diagnostics, rows, started);
    let mut scroll = SmoothScroll::new(page.max_scroll(f64::from(rows)));

    let frame = Duration::from_secs_f64(1.0 / f64::from(fps));
    let mut last_tick = started;

    loop {
        let deadline = last_tick + frame;
        while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    let now = Instant::now();
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            page.dispose();
                            return Ok(());
                        }
                        KeyCode::Up | KeyCode::Char('k') => scroll.scroll_by(-scroll_step),
                        KeyCode::Down | KeyCode::Char('j') => scroll.scroll_by(scroll_step),
                        KeyCode::PageUp => scroll.scroll_by(-f64::from(rows)),
                        KeyCode::PageDown => scroll.scroll_by(f64::from(rows)),
                        KeyCode::Left => page.carousel.prev(now),
                        KeyCode::Right => page.carousel.next(now),
                        KeyCode::Char('p') => page.carousel.toggle_pause(now),
                        KeyCode::Char(digit @ '1'..='9') => {
                            let index = digit as usize - '1' as usize;
                            page.carousel.jump_to(index, now);
                        }
                        _ => {}
                    }
                }
                Event::Resize(new_cols, new_rows) => {
                    cols = new_cols;
                    rows = new_rows;
                    page.relayout(rows, diagnostics);
                    scroll = SmoothScroll::new(page.max_scroll(f64::from(rows)));
                }
                _ => {}
            }
        }

        let now = Instant::now();
        scroll.tick(now.saturating_duration_since(last_tick));
        last_tick = now;

        let viewport = Viewport { height: f64::from(rows), scroll_offset: scroll.offset() };
        page.poll(now, viewport);

        let mut screen = Screen::new(cols, rows);
        page.render(&mut screen, viewport, now, started);
        screen.flush()?;
    }
}

/// Off-screen cell buffer flushed once per frame.
struct Screen {
    cols: u16,
    rows: u16,
    cells: Vec<(char, Color)>,
}

impl Screen {
    fn new(cols: u16, rows: u16) -> Self {
        let cells = vec![(' ', Color::Reset); usize::from(cols) * usize::from(rows)];
        Self { cols, rows, cells }
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col >= i32::from(self.cols) || row >= i32::from(self.rows) {
            return;
        }
        let index = row as usize * usize::from(self.cols) + col as usize;
        self.cells[index] = (ch, color);
    }

    fn put_str(&mut self, col: i32, row: i32, text: &str, color: Color) {
        let mut cursor = col;
        for ch in text.chars() {
            self.put(cursor, row, ch, color);
            cursor += 1;
        }
    }

    fn put_centered(&mut self, row: i32, offset: i32, text: &str, color: Color) {
        let col = (i32::from(self.cols) - text.width() as i32) / 2 + offset;
        self.put_str(col, row, text, color);
    }

    fn flush(&self) -> Result<()> {
        let mut stdout = io::stdout().lock();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        for row in 0..self.rows {
            queue!(stdout, cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let (ch, color) = self.cells[usize::from(row) * usize::from(self.cols) + usize::from(col)];
                queue!(stdout, SetForegroundColor(color), Print(ch))?;
            }
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()?;
        Ok(())
    }
}

/// Warm off-white ramp used for most text; intensity in `[0, 1]`.
fn warm(intensity: f64) -> Color {
    let i = intensity.clamp(0.0, 1.0);
    Color::Rgb {
        r: (240.0 * i) as u8,
        g: (228.0 * i) as u8,
        b: (205.0 * i) as u8,
    }
}

/// Muted accent ramp for highlights.
fn accent(intensity: f64) -> Color {
    let i = intensity.clamp(0.0, 1.0);
    Color::Rgb {
        r: (199.0 * i) as u8,
        g: (186.0 * i) as u8,
        b: (165.0 * i) as u8,
    }
}

/// The virtual page: sections stacked in page coordinates, each owning its
/// own animation state. Nothing is shared between sections but the scroll
/// offset they all read.
struct Page {
    hero: HeroSection,
    words: WordCycleSection,
    carousel: CarouselSection,
    stats: StatsSection,
}

impl Page {
    fn new(config: &ShowcaseConfig, diagnostics: &Diagnostics, rows: u16, now: Instant) -> Self {
        let mut page = Self {
            hero: HeroSection::new(config),
            words: WordCycleSection::new(config, now),
            carousel: CarouselSection::new(config, now),
            stats: StatsSection::new(config, diagnostics),
        };
        page.layout(rows, diagnostics);
        page
    }

    /// Stack the sections. A terminal too small to host a section leaves it
    /// without height; its samplers then degrade to progress 0.
    fn layout(&mut self, rows: u16, diagnostics: &Diagnostics) {
        let viewport_height = f64::from(rows);
        if rows < 8 {
            diagnostics.warn(
                WarningClass::UnsizedContainer,
                "terminal too small to lay out the page",
            );
        }
        let section_height = if rows < 8 { 0.0 } else { viewport_height };
        let mut top = 0.0;
        let mut place = |height: f64| {
            let container = Container { top, height };
            top += height;
            container
        };
        self.hero.relayout(place(section_height * 4.0));
        self.words.relayout(place(section_height));
        self.carousel.relayout(place(section_height));
        self.stats.relayout(place(section_height));
    }

    fn relayout(&mut self, rows: u16, diagnostics: &Diagnostics) {
        // Resize keeps animation state; geometry alone changes.
        self.layout(rows, diagnostics);
    }

    fn max_scroll(&self, viewport_height: f64) -> f64 {
        (self.stats.container.top + self.stats.container.height - viewport_height).max(0.0)
    }

    fn poll(&mut self, now: Instant, viewport: Viewport) {
        self.words.poll(now);
        self.carousel.poll(now);
        self.stats.poll(now, viewport);
    }

    fn render(&self, screen: &mut Screen, viewport: Viewport, now: Instant, started: Instant) {
        self.hero.render(screen, viewport, now.saturating_duration_since(started).as_secs_f64());
        self.words.render(screen, viewport, now);
        self.carousel.render(screen, viewport, now);
        self.stats.render(screen, viewport);
        self.render_hint(screen, viewport);
    }

    fn render_hint(&self, screen: &mut Screen, viewport: Viewport) {
        if viewport.scroll_offset < 1.0 {
            let bottom = i32::from(screen.rows) - 1;
            screen.put_centered(bottom, 0, "scroll: j/k  carousel: \u{2190}/\u{2192} 1-9 p  quit: q", warm(0.35));
        }
    }

    /// Tear down every timed animation. After this no tick can fire.
    fn dispose(&mut self) {
        self.words.rotation.dispose();
        self.carousel.rotation.dispose();
    }
}

fn screen_row(page_row: f64, viewport: Viewport) -> i32 {
    (page_row - viewport.scroll_offset).round() as i32
}

/// Hero: the kinetic headline assembling out of its scatter as the page
/// scrolls, over an ambient letter field.
struct HeroSection {
    text: KineticText,
    field: LetterField,
    tracking: kinetext::progress::BreakpointTable,
    brightness: kinetext::progress::BreakpointTable,
    container: Container,
    sampler: ProgressSampler,
}

impl HeroSection {
    fn new(config: &ShowcaseConfig) -> Self {
        let params = ScatterParams {
            distance: config.kinetic.scatter_distance,
            rotation_amplitude: config.kinetic.rotation_amplitude,
            ..ScatterParams::default()
        };
        let text = KineticText::from_text(&config.kinetic.headline, config.kinetic.seed, &params);
        let field = LetterField::generate(
            config.field.seed,
            &config.field.alphabet,
            &FieldParams { count: config.field.count, ..FieldParams::default() },
        );
        let container = Container { top: 0.0, height: 0.0 };
        Self {
            text,
            field,
            tracking: config.kinetic.tracking.clone(),
            brightness: config.kinetic.brightness.clone(),
            container,
            sampler: ProgressSampler::new(container, EdgePair { start: 0.0, end: 1.0 }),
        }
    }

    fn relayout(&mut self, container: Container) {
        self.container = container;
        self.sampler = ProgressSampler::new(container, EdgePair { start: 0.0, end: 1.0 });
    }

    fn render(&self, screen: &mut Screen, viewport: Viewport, elapsed: f64) {
        if !self.container.intersects(viewport) {
            return;
        }
        let progress = self.sampler.sample(viewport);
        let brightness = self.brightness.value_at(progress);

        self.render_field(screen, viewport, elapsed, brightness);
        self.render_headline(screen, viewport, progress, brightness);
    }

    fn render_field(&self, screen: &mut Screen, viewport: Viewport, elapsed: f64, brightness: f64) {
        let cols = f64::from(screen.cols);
        let rows = f64::from(screen.rows);
        // The field drifts on its own and sways slightly with the scroll.
        let pointer = Vec2::new(0.0, (viewport.scroll_offset / viewport.height.max(1.0)).sin() * 0.3);
        for entry in self.field.entries() {
            let drift = LetterField::drift_offset(entry, elapsed, pointer);
            let col = (entry.position.x * cols + drift.x / 4.0).round() as i32;
            let row = (entry.position.y * rows + drift.y / 8.0).round() as i32;
            screen.put(col, row, entry.glyph, warm(entry.opacity * brightness * 0.5));
        }
    }

    fn render_headline(&self, screen: &mut Screen, viewport: Viewport, progress: f64, brightness: f64) {
        let cols = f64::from(screen.cols);
        let rows = f64::from(screen.rows);
        // Sticky: centered while the hero plays out, released with the
        // scroll afterwards.
        let hero_span = self.container.height - viewport.height;
        let center_row = if viewport.scroll_offset <= hero_span {
            rows / 2.0
        } else {
            rows / 2.0 - (viewport.scroll_offset - hero_span)
        };

        let pitch = (self.tracking.value_at(progress) * 2.0).round().max(1.0) as i32;
        let count = self.text.char_count() as i32;
        let start_col = (cols as i32 - (count - 1).max(0) * pitch) / 2;

        // Scatter offsets are expressed in layout pixels; map them onto the
        // cell grid so a full scatter spans the screen.
        let cell_x = cols / 800.0;
        let cell_y = rows / 800.0;

        for (address, ch, transform) in self.text.frame_at(progress) {
            if ch == ' ' && transform.rotation.abs() < 45.0 {
                continue;
            }
            let rest_col = start_col + address.sequence_index as i32 * pitch;
            let col = rest_col + (transform.translate.x * cell_x).round() as i32;
            let row = center_row.round() as i32 + (transform.translate.y * cell_y).round() as i32;

            // Cells cannot rotate a glyph; a still-tumbling character shows
            // as a spin glyph until it settles.
            let glyph = if transform.rotation.abs() > 45.0 {
                const SPIN: [char; 4] = ['|', '/', '-', '\\'];
                SPIN[(transform.rotation.abs() / 45.0) as usize % SPIN.len()]
            } else {
                ch
            };
            screen.put(col, row, glyph, warm(transform.opacity * brightness));
        }
    }
}

/// One rotating word, sliding in from the side its direction dictates.
struct WordCycleSection {
    words: Vec<String>,
    rotation: Rotation,
    slide_span: f64,
    last_change: Option<Instant>,
    container: Container,
}

impl WordCycleSection {
    fn new(config: &ShowcaseConfig, now: Instant) -> Self {
        let words = config.word_cycle.words.clone();
        let mut rotation =
            Rotation::new(words.len(), Duration::from_millis(config.word_cycle.interval_ms), now);
        rotation.jump_to(config.word_cycle.start_index, now);
        Self {
            words,
            rotation,
            slide_span: 1000.0,
            last_change: None,
            container: Container { top: 0.0, height: 0.0 },
        }
    }

    fn relayout(&mut self, container: Container) {
        self.container = container;
    }

    fn poll(&mut self, now: Instant) {
        if self.rotation.poll_at(now) {
            self.last_change = Some(now);
        }
    }

    fn render(&self, screen: &mut Screen, viewport: Viewport, now: Instant) {
        if !self.container.intersects(viewport) {
            return;
        }
        let center = screen_row(self.container.top + self.container.height / 2.0, viewport);
        screen.put_centered(center - 2, 0, "We do", warm(0.55));

        let Some(word) = self.words.get(self.rotation.current_index()) else {
            return;
        };
        let t = transition_progress(self.last_change, now);
        let transition =
            SlideTransition::for_direction(self.rotation.direction(), self.slide_span);
        let offset = (transition.enter_offset(t) * f64::from(screen.cols) / self.slide_span)
            .round() as i32;
        screen.put_centered(center, offset, word, accent(0.9));
    }
}

/// The quote carousel: autoplay plus manual prev/next/jump.
struct CarouselSection {
    slides: Vec<kinetext::config::Slide>,
    rotation: Rotation,
    slide_span: f64,
    last_change: Option<Instant>,
    exiting: Option<usize>,
    container: Container,
}

impl CarouselSection {
    fn new(config: &ShowcaseConfig, now: Instant) -> Self {
        let slides = config.carousel.slides.clone();
        let rotation = Rotation::new(
            slides.len(),
            Duration::from_millis(config.carousel.interval_ms),
            now,
        );
        Self {
            slides,
            rotation,
            slide_span: config.carousel.slide_span,
            last_change: None,
            exiting: None,
            container: Container { top: 0.0, height: 0.0 },
        }
    }

    fn relayout(&mut self, container: Container) {
        self.container = container;
    }

    fn poll(&mut self, now: Instant) {
        let before = self.rotation.current_index();
        if self.rotation.poll_at(now) {
            self.record_change(before, now);
        }
    }

    fn next(&mut self, now: Instant) {
        let before = self.rotation.current_index();
        self.rotation.next(now);
        self.record_change(before, now);
    }

    fn prev(&mut self, now: Instant) {
        let before = self.rotation.current_index();
        self.rotation.prev(now);
        self.record_change(before, now);
    }

    fn jump_to(&mut self, index: usize, now: Instant) {
        let before = self.rotation.current_index();
        self.rotation.jump_to(index, now);
        self.record_change(before, now);
    }

    fn toggle_pause(&mut self, now: Instant) {
        match self.rotation.phase() {
            Phase::Running => self.rotation.pause(),
            Phase::Paused => self.rotation.start(now),
            _ => {}
        }
    }

    fn record_change(&mut self, before: usize, now: Instant) {
        if before != self.rotation.current_index() {
            self.exiting = Some(before);
            self.last_change = Some(now);
        }
    }

    fn render(&self, screen: &mut Screen, viewport: Viewport, now: Instant) {
        if !self.container.intersects(viewport) {
            return;
        }
        let center = screen_row(self.container.top + self.container.height / 2.0, viewport);
        let t = transition_progress(self.last_change, now);
        let transition =
            SlideTransition::for_direction(self.rotation.direction(), self.slide_span);
        let to_cells = f64::from(screen.cols) / self.slide_span;

        if t < 1.0 {
            if let Some(slide) = self.exiting.and_then(|i| self.slides.get(i)) {
                let offset = (transition.exit_offset(t) * to_cells).round() as i32;
                self.render_slide(screen, center, offset, slide, 0.4);
            }
        }
        if let Some(slide) = self.slides.get(self.rotation.current_index()) {
            let offset = (transition.enter_offset(t) * to_cells).round() as i32;
            self.render_slide(screen, center, offset, slide, 0.9);
        }

        let mut dots = String::new();
        for index in 0..self.rotation.total() {
            dots.push(if index == self.rotation.current_index() { '\u{25cf}' } else { '\u{25cb}' });
            dots.push(' ');
        }
        let paused = self.rotation.phase() == Phase::Paused;
        screen.put_centered(center + 4, 0, dots.trim_end(), accent(if paused { 0.4 } else { 0.8 }));
    }

    fn render_slide(
        &self,
        screen: &mut Screen,
        center: i32,
        offset: i32,
        slide: &kinetext::config::Slide,
        intensity: f64,
    ) {
        let width = usize::from(screen.cols).saturating_sub(12).max(16);
        let lines = wrap(&slide.quote, width);
        let first_row = center - 1 - lines.len() as i32 / 2;
        for (index, line) in lines.iter().enumerate() {
            screen.put_centered(first_row + index as i32, offset, line, warm(intensity));
        }
        screen.put_centered(
            first_row + lines.len() as i32 + 1,
            offset,
            &format!("\u{2014} {}", slide.author),
            accent(intensity),
        );
    }
}

/// Stat counters: they arm the first time their section scrolls into view.
struct StatsSection {
    counters: Vec<(Counter, String)>,
    container: Container,
}

impl StatsSection {
    fn new(config: &ShowcaseConfig, diagnostics: &Diagnostics) -> Self {
        let counters = config
            .counters
            .stats
            .iter()
            .map(|stat| (Counter::new(&stat.value, diagnostics), stat.label.clone()))
            .collect();
        Self { counters, container: Container { top: 0.0, height: 0.0 } }
    }

    fn relayout(&mut self, container: Container) {
        self.container = container;
    }

    fn poll(&mut self, now: Instant, viewport: Viewport) {
        if self.container.intersects(viewport) {
            for (counter, _) in &mut self.counters {
                counter.mark_visible(now);
            }
        }
        for (counter, _) in &mut self.counters {
            counter.poll_at(now);
        }
    }

    fn render(&self, screen: &mut Screen, viewport: Viewport) {
        if !self.container.intersects(viewport) {
            return;
        }
        let center = screen_row(self.container.top + self.container.height / 2.0, viewport);
        screen.put_centered(center - 3, 0, "By the numbers", warm(0.55));

        let slot = i32::from(screen.cols) / self.counters.len().max(1) as i32;
        for (index, (counter, label)) in self.counters.iter().enumerate() {
            let middle = slot * index as i32 + slot / 2;
            let value = counter.display();
            screen.put_str(middle - value.width() as i32 / 2, center, value, accent(1.0));
            screen.put_str(middle - label.width() as i32 / 2, center + 1, label, warm(0.45));
        }
    }
}

fn transition_progress(last_change: Option<Instant>, now: Instant) -> f64 {
    const TRANSITION: Duration = Duration::from_millis(450);
    match last_change {
        Some(at) => {
            (now.saturating_duration_since(at).as_secs_f64() / TRANSITION.as_secs_f64()).min(1.0)
        }
        None => 1.0,
    }
}

/// Greedy word wrap; a word longer than the width gets its own line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
