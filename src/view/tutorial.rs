//! Brewing tutorial page: step cards and the video control bar

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlAnchorElement, HtmlCanvasElement,
    HtmlInputElement, HtmlVideoElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use super::{create_div, on_click, on_click_id, set_text, toggle_class};
use crate::audio::CuePlayer;
use crate::bookmarks::Bookmarks;
use crate::sim::{
    PLAYBACK_SPEEDS, PlaybackState, SCREENSHOT_FILE_NAME, StepChange, VideoStepNav,
    screenshot_size,
};
use crate::{SetupError, Settings};

pub struct TutorialPanel {
    pub nav: VideoStepNav,
    steps: Vec<Element>,
    checkboxes: Vec<HtmlInputElement>,
    cues: CuePlayer,
}

pub type SharedTutorial = Rc<RefCell<TutorialPanel>>;

/// Bind to the page's `.brewing-steps` section
pub fn mount(document: &Document, settings: &Settings) -> Result<SharedTutorial, SetupError> {
    let section = document
        .query_selector(".brewing-steps")
        .ok()
        .flatten()
        .ok_or_else(|| SetupError::MissingContainer(".brewing-steps".into()))?;

    let nodes = section
        .query_selector_all(".step")
        .map_err(|_| SetupError::Dom(".step"))?;
    let steps: Vec<Element> = (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect();

    let mut checkboxes = Vec::with_capacity(steps.len());
    for step in &steps {
        let input: HtmlInputElement = document
            .create_element("input")
            .map_err(|_| SetupError::Dom("input"))?
            .dyn_into()
            .map_err(|_| SetupError::Dom("input"))?;
        input.set_type("checkbox");
        input.set_class_name("step-complete");
        if let Some(content) = step.query_selector(".step-content").ok().flatten() {
            let _ = content.append_child(&input);
        }
        checkboxes.push(input);
    }

    let html = format!(
        r#"<button id="prevStepBtn">← 上一步</button>
        <span>步骤 <span id="current-step">1</span>/{}</span>
        <button id="nextStepBtn">下一步 →</button>
        <button id="markAllBtn">全部完成</button>"#,
        steps.len()
    );
    let nav_el = create_div(document, "steps-navigation", &html)?;
    section
        .append_child(&nav_el)
        .map_err(|_| SetupError::Dom("steps-navigation"))?;

    let panel = Rc::new(RefCell::new(TutorialPanel {
        nav: VideoStepNav::new(steps.len()),
        steps: steps.clone(),
        checkboxes: checkboxes.clone(),
        cues: CuePlayer::new(settings),
    }));

    for (i, step) in steps.iter().enumerate() {
        let target = panel.clone();
        on_click(step, move || go_to(&target, i));
    }
    for (i, input) in checkboxes.iter().enumerate() {
        let target = panel.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            // Ticking a box must not also navigate to its card
            event.stop_propagation();
            target.borrow_mut().nav.toggle_complete(i);
        });
        let _ = input.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let panel = panel.clone();
        on_click_id(document, "prevStepBtn", move || {
            let change = panel.borrow_mut().nav.previous();
            show_change(&panel, change);
        });
    }
    {
        let panel = panel.clone();
        on_click_id(document, "nextStepBtn", move || {
            let change = panel.borrow_mut().nav.next();
            show_change(&panel, change);
        });
    }
    {
        let panel = panel.clone();
        on_click_id(document, "markAllBtn", move || mark_all_complete(&panel));
    }

    log::info!("Tutorial navigation mounted ({} steps)", steps.len());
    Ok(panel)
}

pub fn go_to(panel: &SharedTutorial, index: usize) {
    let change = panel.borrow_mut().nav.go_to(index);
    show_change(panel, change);
}

pub fn mark_all_complete(panel: &SharedTutorial) {
    let mut p = panel.borrow_mut();
    p.nav.mark_all_complete();
    for input in &p.checkboxes {
        input.set_checked(true);
    }
}

fn show_change(panel: &SharedTutorial, change: Option<StepChange>) {
    let Some(change) = change else { return };
    let p = panel.borrow();

    if let Some(prev) = p.steps.get(change.previous) {
        toggle_class(prev, "active-step", false);
    }
    if let Some(current) = p.steps.get(change.current) {
        toggle_class(current, "active-step", true);
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        current.scroll_into_view_with_scroll_into_view_options(&options);
    }
    if let Ok(document) = super::document() {
        set_text(&document, "current-step", &change.position.to_string());
    }

    p.cues.play_tone(change.cue_hz);
}

/// Custom control bar for the tutorial `<video>`, if the page has one
pub fn mount_video(document: &Document) -> Result<(), SetupError> {
    let video: HtmlVideoElement = document
        .query_selector("video")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into().ok())
        .ok_or_else(|| SetupError::MissingContainer("video".into()))?;
    video.set_class_name("custom-video-player");

    let speeds: String = PLAYBACK_SPEEDS
        .iter()
        .enumerate()
        .map(|(i, s)| format!(r#"<button class="speed-btn" data-speed="{i}">{s}x</button>"#))
        .collect();
    let html = format!(
        r#"<button id="playBtn">▶️</button>
        <input id="seekRange" type="range" min="0" max="100" value="0">
        <span class="time-display" id="timeDisplay">00:00 / 00:00</span>
        <button id="muteBtn">🔊</button>
        <button id="fullscreenBtn">⛶</button>
        <button id="screenshotBtn">📷</button>
        <button id="bookmarkBtn">🔖</button>
        <span class="speed-control">{speeds}</span>"#
    );
    let controls = create_div(document, "video-controls", &html)?;
    video
        .after_with_node_1(&controls)
        .map_err(|_| SetupError::Dom("video-controls"))?;

    let playback = Rc::new(RefCell::new(PlaybackState::default()));

    {
        let (video, playback) = (video.clone(), playback.clone());
        on_click_id(document, "playBtn", move || {
            if playback.borrow_mut().toggle_play() {
                let _ = video.play();
            } else {
                let _ = video.pause();
            }
            let playing = playback.borrow().playing;
            if let Ok(document) = super::document() {
                set_text(&document, "playBtn", if playing { "⏸️" } else { "▶️" });
            }
        });
    }
    {
        let (video, playback) = (video.clone(), playback.clone());
        on_click_id(document, "muteBtn", move || {
            let muted = playback.borrow_mut().toggle_mute();
            video.set_muted(muted);
            if let Ok(document) = super::document() {
                set_text(&document, "muteBtn", if muted { "🔇" } else { "🔊" });
            }
        });
    }
    {
        let video = video.clone();
        on_click_id(document, "fullscreenBtn", move || {
            let _ = video.request_fullscreen();
        });
    }
    {
        let video = video.clone();
        on_click_id(document, "screenshotBtn", move || {
            if let Err(e) = capture_screenshot(&video) {
                log::warn!("Screenshot failed: {}", e);
            }
        });
    }
    {
        let video = video.clone();
        on_click_id(document, "bookmarkBtn", move || {
            let bookmark = Bookmarks::add(video.current_time());
            log::info!("{} at {:.1}s", bookmark.label, bookmark.time);
        });
    }

    if let Ok(buttons) = controls.query_selector_all(".speed-btn") {
        for i in 0..buttons.length() {
            let Some(btn) = buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let (video, playback) = (video.clone(), playback.clone());
            let speed = PLAYBACK_SPEEDS[i as usize % PLAYBACK_SPEEDS.len()];
            on_click(&btn, move || {
                if playback.borrow_mut().set_rate(speed) {
                    video.set_playback_rate(speed);
                }
            });
        }
    }

    if let Some(range) = document
        .get_element_by_id("seekRange")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        let (video, playback) = (video.clone(), playback.clone());
        let input = range.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let percent = input.value().parse::<f64>().unwrap_or(0.0);
            let target = playback.borrow_mut().seek_percent(percent);
            video.set_current_time(target);
        });
        let _ = range.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let target = video.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut p = playback.borrow_mut();
            p.sync(target.current_time(), target.duration());
            let Ok(document) = super::document() else { return };
            set_text(&document, "timeDisplay", &p.time_display());
            if let Some(range) = document
                .get_element_by_id("seekRange")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                range.set_value(&format!("{:.1}", p.progress_percent()));
            }
        });
        let _ = video.add_event_listener_with_callback("timeupdate", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    log::info!("Video controls mounted");
    Ok(())
}

/// Save the current frame as a PNG download
fn capture_screenshot(video: &HtmlVideoElement) -> Result<(), SetupError> {
    let (width, height) = screenshot_size(video.video_width(), video.video_height())
        .ok_or(SetupError::Dom("video frame"))?;
    let document = super::document()?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| SetupError::Dom("canvas"))?
        .dyn_into()
        .map_err(|_| SetupError::Dom("canvas"))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into().ok())
        .ok_or(SetupError::Dom("2d context"))?;
    ctx.draw_image_with_html_video_element(video, 0.0, 0.0)
        .map_err(|_| SetupError::Dom("drawImage"))?;
    let url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| SetupError::Dom("toDataURL"))?;

    let link: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| SetupError::Dom("a"))?
        .dyn_into()
        .map_err(|_| SetupError::Dom("a"))?;
    link.set_href(&url);
    link.set_download(SCREENSHOT_FILE_NAME);
    link.click();

    log::info!("Captured {}x{} frame", width, height);
    Ok(())
}
