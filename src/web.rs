//! Browser host: bootstrap, keyboard listeners, assets and the
//! `requestAnimationFrame` driver around [`Game`].
//!
//! Nothing in here makes gameplay decisions. The driver pumps `Game::tick`
//! with the frame delta, plays/stops the sounds the frame asks for, redraws,
//! and reloads the page once the game reports it is over.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlAudioElement, HtmlCanvasElement, HtmlImageElement,
    window,
};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{FrameEvent, FrameOutcome, Game, Sound};
use crate::input::InputState;
use crate::render::{Canvas, Sprite, TextStyle};

const CANVAS_ID: &str = "hzb-canvas";
const START_BUTTON_ID: &str = "hzb-start";

/// Create an image element for `source`. Loading happens in the background;
/// callers check `complete()` before drawing.
pub fn load_new_image(source: &str) -> Result<HtmlImageElement, GameError> {
    let img = HtmlImageElement::new()?;
    img.set_src(source);
    Ok(img)
}

fn sprite_source(sprite: Sprite) -> &'static str {
    match sprite {
        Sprite::Player => "assets/img/players/hz-bird.png",
        Sprite::Boss => "assets/img/bosses/boss.png",
    }
}

fn sprite_fallback_color(sprite: Sprite) -> &'static str {
    match sprite {
        Sprite::Player => "#f4a300",
        Sprite::Boss => "#6c3483",
    }
}

fn sound_source(sound: Sound) -> &'static str {
    match sound {
        Sound::BossTheme => "assets/audio/music/bossfight.mp3",
        Sound::Win => "assets/audio/sfx/gamewin.wav",
        Sound::Lose => "assets/audio/sfx/gamelose.wav",
    }
}

pub struct WebCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprites: HashMap<Sprite, HtmlImageElement>,
}

impl WebCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, GameError> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(GameError::NoCanvasContext)?
            .dyn_into()
            .map_err(|_| GameError::NoCanvasContext)?;
        let mut sprites = HashMap::new();
        for sprite in [Sprite::Player, Sprite::Boss] {
            match load_new_image(sprite_source(sprite)) {
                Ok(img) => {
                    sprites.insert(sprite, img);
                }
                Err(err) => log::warn!("sprite {sprite:?} unavailable: {err}"),
            }
        }
        Ok(Self { canvas, ctx, sprites })
    }
}

impl Canvas for WebCanvas {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_stroke_style(&JsValue::from_str(color));
        self.ctx.set_line_width(2.0);
        self.ctx.stroke_rect(x, y, w, h);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.ctx.set_font(&style.font());
        self.ctx.set_fill_style(&JsValue::from_str(style.color));
        self.ctx.set_text_align(style.align.as_css());
        self.ctx.fill_text(text, x, y).ok();
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: f64, y: f64, w: f64, h: f64) {
        // Missing or still-loading images degrade to a colored block.
        match self.sprites.get(&sprite) {
            Some(img) if img.complete() && img.natural_width() > 0 => {
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                    .ok();
            }
            _ => self.fill_rect(x, y, w, h, sprite_fallback_color(sprite)),
        }
    }
}

/// Sound effects and music. Failures are logged and never stop the frame loop.
struct Sounds {
    volume: f64,
    tracks: HashMap<Sound, Track>,
}

struct Track {
    el: HtmlAudioElement,
    // Autoplay blocks and decode errors reject the `play()` promise.
    on_reject: Closure<dyn FnMut(JsValue)>,
}

impl Sounds {
    fn new(volume: f64) -> Self {
        Self { volume, tracks: HashMap::new() }
    }

    fn track(&mut self, sound: Sound) -> Option<&Track> {
        if !self.tracks.contains_key(&sound) {
            match HtmlAudioElement::new_with_src(sound_source(sound)) {
                Ok(el) => {
                    el.set_volume(self.volume);
                    el.set_loop(sound == Sound::BossTheme);
                    el.load();
                    let on_reject = Closure::wrap(Box::new(move |err: JsValue| {
                        log::warn!("audio {sound:?} playback rejected: {err:?}");
                    }) as Box<dyn FnMut(JsValue)>);
                    self.tracks.insert(sound, Track { el, on_reject });
                }
                Err(err) => {
                    log::warn!("audio {sound:?} unavailable: {err:?}");
                    return None;
                }
            }
        }
        self.tracks.get(&sound)
    }

    fn play(&mut self, sound: Sound) {
        if let Some(track) = self.track(sound) {
            track.el.set_current_time(0.0);
            match track.el.play() {
                Ok(promise) => {
                    let _ = promise.catch(&track.on_reject);
                }
                Err(err) => log::warn!("audio {sound:?} failed to play: {err:?}"),
            }
        }
    }

    fn stop(&mut self, sound: Sound) {
        if let Some(track) = self.tracks.get(&sound) {
            track.el.pause().ok();
        }
    }
}

struct WebGame {
    game: Game,
    canvas: WebCanvas,
    sounds: Sounds,
    input: InputState,
    last_ts: Option<f64>,
}

thread_local! {
    static GAME_STATE: RefCell<Option<WebGame>> = const { RefCell::new(None) };
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn document() -> Result<Document, GameError> {
    window().ok_or(GameError::NoWindow)?.document().ok_or(GameError::NoDocument)
}

/// Add the "Start Game" button; clicking it swaps the button for the canvas.
pub fn install_start_button(config: GameConfig) -> Result<(), GameError> {
    let doc = document()?;
    let body = doc.body().ok_or(GameError::NoBody)?;
    if doc.get_element_by_id(START_BUTTON_ID).is_some() {
        return Ok(());
    }
    let button = doc.create_element("button")?;
    button.set_id(START_BUTTON_ID);
    button.set_text_content(Some("Start Game"));
    button
        .set_attribute("style", "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); font-size:28px; padding:12px 28px;")
        .ok();
    body.append_child(&button)?;

    let btn = button.clone();
    let closure = Closure::once(move |_evt: web_sys::MouseEvent| {
        btn.remove();
        if let Err(err) = launch(config) {
            log::error!("failed to start game: {err}");
        }
    });
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Create the viewport-sized canvas, build the game and start the frame loop.
pub fn launch(config: GameConfig) -> Result<(), GameError> {
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;
    let body = doc.body().ok_or(GameError::NoBody)?;

    let viewport = |v: Result<JsValue, JsValue>, fallback: u32| {
        v.ok()
            .and_then(|v| v.as_f64())
            .filter(|v| *v >= 1.0)
            .map(|v| v as u32)
            .unwrap_or(fallback)
    };
    let width = viewport(win.inner_width(), config.fallback_width);
    let height = viewport(win.inner_height(), config.fallback_height);

    let canvas: HtmlCanvasElement = match doc.get_element_by_id(CANVAS_ID) {
        Some(el) => el.dyn_into().map_err(|_| GameError::NoCanvasContext)?,
        None => {
            let c: HtmlCanvasElement =
                doc.create_element("canvas")?.dyn_into().map_err(|_| GameError::NoCanvasContext)?;
            c.set_id(CANVAS_ID);
            body.append_child(&c)?;
            c
        }
    };
    canvas.set_width(width);
    canvas.set_height(height);

    let volume = config.sfx_volume;
    let state = WebGame {
        game: Game::new(config, width as f64, height as f64),
        canvas: WebCanvas::new(canvas)?,
        sounds: Sounds::new(volume),
        input: InputState::default(),
        last_ts: None,
    };
    GAME_STATE.with(|g| g.replace(Some(state)));

    // Keyboard state is polled by the frame loop, listeners only record it.
    for (event, pressed) in [("keydown", true), ("keyup", false)] {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    if state.input.set_key(&evt.key(), pressed) {
                        evt.prevent_default();
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    Ok(())
}

fn frame(ts: f64) -> FrameOutcome {
    GAME_STATE.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let Some(state) = borrow.as_mut() else {
            return FrameOutcome::Running;
        };
        let dt = state.last_ts.map(|last| (ts - last).max(0.0)).unwrap_or(0.0);
        state.last_ts = Some(ts);
        let frame = state.game.tick(&state.input, dt);
        for event in &frame.events {
            match event {
                FrameEvent::Play(sound) => state.sounds.play(*sound),
                FrameEvent::Stop(sound) => state.sounds.stop(*sound),
                _ => {}
            }
        }
        state.game.draw(&mut state.canvas);
        frame.outcome
    })
}

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if let FrameOutcome::Over(outcome) = frame(ts) {
            log::info!("game over: {outcome:?}, reloading");
            if let Some(w) = window() {
                if let Err(err) = w.location().reload() {
                    log::error!("reload failed: {err:?}");
                }
            }
            return;
        }
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
