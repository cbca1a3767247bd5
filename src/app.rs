use crate::canvas::Canvas;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{Print, ResetColor},
    terminal::{
        self, BeginSynchronizedUpdate, DisableLineWrap, EnableLineWrap, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use matcha::{Engine, Knob, Palette, Params, PRESETS};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

const HUD_ROWS: u16 = 3;

struct TermGuard {
    out: Stdout,
}

impl TermGuard {
    fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            EnterAlternateScreen,
            DisableLineWrap,
            EnableMouseCapture,
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        Ok(Self { out })
    }
}

impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            EndSynchronizedUpdate,
            ResetColor,
            DisableMouseCapture,
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Front-end options that are not simulation parameters.
#[derive(Clone, Debug)]
pub(crate) struct Options {
    pub(crate) fps: u64,
    pub(crate) fixed_size: Option<(usize, usize)>,
    pub(crate) preset_idx: usize,
    pub(crate) inverted: bool,
    pub(crate) show_hud: bool,
    pub(crate) paused: bool,
    pub(crate) seed: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Action {
    Quit,
    TogglePause,
    Reset,
    ToggleInvert,
    ToggleHud,
    NextPreset,
    Preset(usize),
    SelectKnob(i32),
    Nudge(i32),
    Inject(usize, usize),
    RandomDrop,
}

pub(crate) fn map_key(k: KeyEvent) -> Option<Action> {
    let big = k.modifiers.contains(KeyModifiers::SHIFT);
    match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Char('i') | KeyCode::Char('I') => Some(Action::ToggleInvert),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Action::ToggleHud),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::NextPreset),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::RandomDrop),
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            (idx < PRESETS.len()).then_some(Action::Preset(idx))
        }
        KeyCode::Tab => Some(Action::SelectKnob(1)),
        KeyCode::BackTab => Some(Action::SelectKnob(-1)),
        KeyCode::Up | KeyCode::Right => Some(Action::Nudge(if big { 10 } else { 1 })),
        KeyCode::Down | KeyCode::Left => Some(Action::Nudge(if big { -10 } else { -1 })),
        _ => None,
    }
}

pub(crate) struct App {
    pub(crate) engine: Engine,
    pub(crate) preset_idx: usize,
    pub(crate) inverted: bool,
    pub(crate) show_hud: bool,
    pub(crate) paused: bool,
    pub(crate) knob_idx: usize,
    rng: StdRng,
}

impl App {
    pub(crate) fn new(engine: Engine, opts: &Options) -> Self {
        Self {
            engine,
            preset_idx: opts.preset_idx,
            inverted: opts.inverted,
            show_hud: opts.show_hud,
            paused: opts.paused,
            knob_idx: 0,
            rng: StdRng::seed_from_u64(opts.seed),
        }
    }

    pub(crate) fn knob(&self) -> Knob {
        Knob::ALL[self.knob_idx]
    }

    pub(crate) fn palette(&self) -> Palette {
        Palette::matcha(self.inverted)
    }

    /// Applies one action. Returns `false` when the app should exit.
    pub(crate) fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::TogglePause => self.paused = !self.paused,
            Action::Reset => {
                let p = *self.engine.params();
                self.engine.reset(p);
            }
            Action::ToggleInvert => self.inverted = !self.inverted,
            Action::ToggleHud => self.show_hud = !self.show_hud,
            Action::NextPreset => self.select_preset((self.preset_idx + 1) % PRESETS.len()),
            Action::Preset(idx) => self.select_preset(idx),
            Action::SelectKnob(delta) => {
                let n = Knob::ALL.len() as i32;
                self.knob_idx = (self.knob_idx as i32 + delta).rem_euclid(n) as usize;
            }
            Action::Nudge(ticks) => {
                let knob = self.knob();
                knob.nudge(self.engine.params_mut(), ticks);
                log::debug!("{} -> {}", knob.label(), knob.display(self.engine.params()));
            }
            Action::Inject(x, y) => self.engine.inject_blob(x as isize, y as isize),
            Action::RandomDrop => {
                let x = self.rng.gen_range(0..self.engine.width());
                let y = self.rng.gen_range(0..self.engine.height());
                self.engine.inject_blob(x as isize, y as isize);
            }
        }
        true
    }

    fn select_preset(&mut self, idx: usize) {
        let Some(preset) = PRESETS.get(idx) else {
            return;
        };
        self.preset_idx = idx;
        let mut p: Params = *self.engine.params();
        p.apply_preset(preset);
        self.engine.reset(p);
        log::debug!("preset {} (feed {}, kill {})", preset.name, p.feed, p.kill);
    }

    /// Preset name, with `*` once feed or kill have been moved off it.
    pub(crate) fn preset_label(&self) -> String {
        let preset = &PRESETS[self.preset_idx];
        let p = self.engine.params();
        // knob snapping can leave rounding noise far below the 0.001 step
        let same = |x: f64, y: f64| (x - y).abs() < 1e-9;
        if same(p.feed, preset.feed) && same(p.kill, preset.kill) {
            preset.name.to_string()
        } else {
            format!("{}*", preset.name)
        }
    }

    fn hud_lines(&self, fps: f32) -> [String; 3] {
        let p = self.engine.params();
        let line1 = format!(
            "Gray-Scott  preset:{}  grid:{}x{}  steps:{}  paused:{}  colors:{}  fps:{:>5.1}",
            self.preset_label(),
            self.engine.width(),
            self.engine.height(),
            self.engine.steps(),
            if self.paused { "yes" } else { "no " },
            if self.inverted { "inverted" } else { "normal" },
            fps
        );
        if !self.show_hud {
            return [
                format!("{line1}  (h: controls)"),
                String::new(),
                String::new(),
            ];
        }
        let knobs = Knob::ALL
            .iter()
            .enumerate()
            .map(|(i, k)| {
                let v = k.display(p);
                if i == self.knob_idx {
                    format!("[{} {}]", k.label(), v)
                } else {
                    format!(" {} {} ", k.label(), v)
                }
            })
            .collect::<Vec<_>>()
            .join("");
        let line3 = "keys: Q quit  SPACE pause  R reset  P/1-5 preset  I invert  H hide  TAB select  arrows adjust (SHIFT x10)  D drop  mouse paint".to_string();
        [line1, knobs, line3]
    }
}

fn grid_size(cols: u16, rows: u16) -> (usize, usize) {
    let render_rows = rows.saturating_sub(HUD_ROWS) as usize;
    ((cols as usize).max(1), (render_rows * 2).max(1))
}

pub(crate) fn run(params: Params, opts: Options) -> Result<()> {
    let mut tg = TermGuard::new().context("could not set up the terminal")?;
    let out = &mut tg.out;

    let mut term_size = terminal::size()?;
    let (w, h) = opts
        .fixed_size
        .unwrap_or_else(|| grid_size(term_size.0, term_size.1));
    let engine = Engine::new(w, h, params)?;
    let mut app = App::new(engine, &opts);
    log::info!("started on a {w}x{h} grid");

    let mut canvas = Canvas::new(
        term_size.0 as usize,
        term_size.1.saturating_sub(HUD_ROWS) as usize,
        HUD_ROWS,
    );

    let target = Duration::from_millis(1000 / opts.fps.max(1));
    let mut last_present = Instant::now();
    let mut fps_timer = Instant::now();
    let mut frames: u32 = 0;
    let mut fps: f32 = 0.0;

    loop {
        let now_size = terminal::size()?;
        if now_size != term_size {
            term_size = now_size;
            if opts.fixed_size.is_none() {
                let (w, h) = grid_size(term_size.0, term_size.1);
                let p = *app.engine.params();
                app.engine.resize(w, h, p)?;
                log::debug!("terminal resized, grid now {w}x{h}");
            }
            canvas = Canvas::new(
                term_size.0 as usize,
                term_size.1.saturating_sub(HUD_ROWS) as usize,
                HUD_ROWS,
            );
            execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
        }

        while event::poll(Duration::from_millis(0))? {
            let action = match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => map_key(k),
                Event::Mouse(m) => match m.kind {
                    MouseEventKind::Down(MouseButton::Left)
                    | MouseEventKind::Drag(MouseButton::Left) => canvas
                        .to_grid(m.column, m.row)
                        .filter(|&(x, y)| x < app.engine.width() && y < app.engine.height())
                        .map(|(x, y)| Action::Inject(x, y)),
                    _ => None,
                },
                _ => None,
            };
            if let Some(action) = action {
                let was_inverted = app.inverted;
                if !app.apply(action) {
                    log::info!("quit after {} steps", app.engine.steps());
                    return Ok(());
                }
                if app.inverted != was_inverted {
                    canvas.invalidate();
                }
            }
        }

        if !app.paused {
            app.engine.advance_frame();
        }

        queue!(out, BeginSynchronizedUpdate)?;
        canvas.draw(out, &app.engine.field(), &app.palette())?;

        // HUD (always redraw, cheap)
        let width = term_size.0 as usize;
        queue!(out, ResetColor)?;
        for (row, line) in app.hud_lines(fps).iter().enumerate() {
            let text: String = line.chars().take(width).collect();
            let pad = width.saturating_sub(text.chars().count());
            queue!(
                out,
                cursor::MoveTo(0, row as u16),
                Print(text),
                Print(" ".repeat(pad))
            )?;
        }
        queue!(out, ResetColor, EndSynchronizedUpdate)?;
        out.flush()?;

        frames += 1;
        if fps_timer.elapsed() >= Duration::from_millis(500) {
            let secs = fps_timer.elapsed().as_secs_f32();
            fps = frames as f32 / secs;
            fps_timer = Instant::now();
            frames = 0;
        }

        let elapsed = last_present.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }
        last_present = Instant::now();
    }
}
