//! Whisking simulator panel

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::{
    clear_class, create_div, document, on_click, on_click_id, remove_by_id, set_disabled,
    set_style, set_style_by_id, set_text, set_timeout, toggle_class,
};
use crate::sim::{
    RandomSource, RunResult, SeededRandom, SequencerPhase, StepAck, StepKind, StepSequencer,
    Transition,
};
use crate::{SetupError, Settings};

const BUBBLE_COUNT: usize = 20;

/// Sequencer state plus what the panel needs to drive it
pub struct SequencerPanel {
    pub sequencer: StepSequencer,
    rng: SeededRandom,
    step_delay_ms: u32,
}

pub type SharedSequencer = Rc<RefCell<SequencerPanel>>;

impl SequencerPanel {
    pub fn can_advance(&self) -> bool {
        self.sequencer.can_advance()
    }
}

/// Build the panel inside `container` and wire its buttons
pub fn mount(
    document: &Document,
    container: &Element,
    settings: &Settings,
    seed: u64,
) -> Result<SharedSequencer, SetupError> {
    let sequencer = StepSequencer::whisking();

    let steps_html: String = sequencer
        .steps()
        .iter()
        .enumerate()
        .map(|(i, step)| {
            format!(
                r#"<div class="step-item" data-step="{}" data-index="{i}">
                    <span class="step-icon">{}</span>
                    <span class="step-name">{}</span>
                </div>"#,
                step.id, step.icon, step.name
            )
        })
        .collect();

    let html = format!(
        r#"<h3>🍵 宋代点茶模拟器</h3>
        <div class="controls">
            <button id="startBtn">开始点茶</button>
            <button id="autoBtn">自动点茶</button>
            <button id="resetBtn">重置</button>
            <button id="hintBtn">技巧提示</button>
        </div>
        <div class="status">
            <span>得分: <b id="scoreValue">0</b></span>
            <span>茶沫: <b id="foamValue">0%</b></span>
            <span>用时: <b id="timeValue">00:00</b></span>
        </div>
        <div class="foam-meter"><div id="foamFill" class="foam-fill"></div></div>
        <div class="tea-visualization">
            <div class="tools">
                <div class="tool" id="grinder">碾</div>
                <div class="tool" id="sieve">罗</div>
                <div class="tool" id="whisk">筅</div>
            </div>
            <div class="tea-bowl" id="teaBowl">
                <div class="tea-liquid"></div>
                <div class="tea-foam" id="teaFoam"></div>
                <div class="tea-bubbles" id="teaBubbles"></div>
            </div>
        </div>
        <div class="step-indicator">{steps_html}</div>"#
    );

    let panel_el = create_div(document, "diancha-control-panel", &html)?;
    container
        .append_child(&panel_el)
        .map_err(|_| SetupError::Dom("diancha-control-panel"))?;

    let panel = Rc::new(RefCell::new(SequencerPanel {
        sequencer,
        rng: SeededRandom::new(seed),
        step_delay_ms: settings.step_advance_delay_ms,
    }));

    {
        let panel = panel.clone();
        on_click_id(document, "startBtn", move || start(&panel));
    }
    {
        let panel = panel.clone();
        on_click_id(document, "autoBtn", move || toggle_auto(&panel));
    }
    {
        let panel = panel.clone();
        on_click_id(document, "resetBtn", move || reset(&panel));
    }
    {
        let panel = panel.clone();
        on_click_id(document, "hintBtn", move || hint(&panel));
    }

    if let Ok(items) = panel_el.query_selector_all(".step-item") {
        for i in 0..items.length() {
            let Some(item) = items.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let panel = panel.clone();
            on_click(&item, move || jump(&panel, i as usize));
        }
    }

    render(&panel.borrow());
    log::info!("Whisking simulator mounted");
    Ok(panel)
}

pub fn start(panel: &SharedSequencer) {
    let transition = {
        let mut p = panel.borrow_mut();
        let SequencerPanel { sequencer, rng, .. } = &mut *p;
        sequencer.start(super::now_ms(), rng)
    };
    apply(panel, transition);
}

pub fn toggle_auto(panel: &SharedSequencer) {
    let transition = {
        let mut p = panel.borrow_mut();
        let SequencerPanel { sequencer, rng, .. } = &mut *p;
        sequencer.toggle_auto_play(super::now_ms(), rng)
    };
    apply(panel, transition);
}

pub fn advance(panel: &SharedSequencer) {
    let transition = {
        let mut p = panel.borrow_mut();
        let SequencerPanel { sequencer, rng, .. } = &mut *p;
        sequencer.advance(rng)
    };
    apply(panel, transition);
}

fn acknowledge(panel: &SharedSequencer, ack: StepAck) {
    let transition = {
        let mut p = panel.borrow_mut();
        let SequencerPanel { sequencer, rng, .. } = &mut *p;
        sequencer.acknowledge(ack, rng)
    };
    apply(panel, transition);
}

pub fn jump(panel: &SharedSequencer, index: usize) {
    let transition = panel.borrow_mut().sequencer.jump_to(index);
    apply(panel, transition);
}

pub fn reset(panel: &SharedSequencer) {
    panel.borrow_mut().sequencer.reset(super::now_ms());
    if let Ok(document) = document() {
        remove_by_id(&document, "stepInstruction");
        clear_class(&document, ".tool", "active");
        if let Some(bubbles) = document.get_element_by_id("teaBubbles") {
            bubbles.set_inner_html("");
        }
    }
    render(&panel.borrow());
}

fn hint(panel: &SharedSequencer) {
    let tip = StepSequencer::hint(&mut panel.borrow_mut().rng);
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&format!("💡 点茶技巧：{tip}"));
    }
}

/// Reflect a transition in the DOM and schedule any follow-up
fn apply(panel: &SharedSequencer, transition: Transition) {
    let Ok(document) = document() else { return };

    match transition {
        Transition::Ignored => return,
        Transition::Entered { index, next_tick } => {
            animate_step(&document, panel, index);
            if let Some(tick) = next_tick {
                let panel = panel.clone();
                set_timeout(tick.delay_ms, move || {
                    let transition = {
                        let mut p = panel.borrow_mut();
                        let SequencerPanel { sequencer, rng, .. } = &mut *p;
                        sequencer.auto_tick(tick, rng)
                    };
                    apply(&panel, transition);
                });
            } else if panel.borrow().sequencer.phase() == SequencerPhase::Running {
                show_instruction(&document, panel);
            }
        }
        // Continue by hand from where auto-play stopped
        Transition::Halted { .. } => show_instruction(&document, panel),
        Transition::Finished(result) => {
            remove_by_id(&document, "stepInstruction");
            show_result(&document, panel, result);
        }
    }

    render(&panel.borrow());
}

/// Counters, meters, buttons and step markers
fn render(panel: &SequencerPanel) {
    let Ok(document) = document() else { return };
    let seq = &panel.sequencer;
    let state = seq.state();

    set_text(&document, "scoreValue", &state.score.to_string());
    set_text(&document, "foamValue", &format!("{}%", state.quality.round()));
    set_style_by_id(&document, "foamFill", "width", &format!("{}%", state.quality));
    set_style_by_id(
        &document,
        "teaFoam",
        "height",
        &format!("{}%", seq.foam_height_percent()),
    );
    if state.start_ms.is_some() {
        set_text(&document, "timeValue", &seq.elapsed_label(super::now_ms()));
    }

    let running = state.phase == SequencerPhase::Running;
    set_disabled(&document, "startBtn", running);
    set_text(
        &document,
        "startBtn",
        if running { "进行中..." } else { "开始点茶" },
    );
    set_text(
        &document,
        "autoBtn",
        if seq.is_auto_playing() { "停止自动" } else { "自动点茶" },
    );

    if let Ok(items) = document.query_selector_all(".step-item") {
        for i in 0..items.length() {
            if let Some(item) = items.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                toggle_class(&item, "active", i as usize == state.current_step);
            }
        }
    }
}

fn animate_step(document: &Document, panel: &SharedSequencer, index: usize) {
    let step = panel.borrow().sequencer.steps()[index].clone();

    clear_class(document, ".tool", "active");
    if let Some(tool) = step.tool.and_then(|id| document.get_element_by_id(id)) {
        toggle_class(&tool, "active", true);
    }

    match step.kind {
        StepKind::Whisk => {
            if let Some(bowl) = document.get_element_by_id("teaBowl") {
                toggle_class(&bowl, "stirring", true);
                set_timeout(step.duration_ms, move || toggle_class(&bowl, "stirring", false));
            }
        }
        StepKind::Foam => generate_bubbles(document, panel),
        StepKind::Prepare => {}
    }
}

fn generate_bubbles(document: &Document, panel: &SharedSequencer) {
    let Some(bubbles) = document.get_element_by_id("teaBubbles") else {
        return;
    };
    bubbles.set_inner_html("");

    let mut p = panel.borrow_mut();
    let rng = &mut p.rng;
    for _ in 0..BUBBLE_COUNT {
        let Ok(bubble) = create_div(document, "bubble", "") else {
            return;
        };
        let size = format!("{}px", 5.0 + rng.next_unit() * 10.0);
        set_style(&bubble, "left", &format!("{}%", rng.next_unit() * 90.0));
        set_style(&bubble, "width", &size);
        set_style(&bubble, "height", &size);
        set_style(&bubble, "animation-delay", &format!("{}s", rng.next_unit() * 2.0));
        let _ = bubbles.append_child(&bubble);
    }
}

/// Overlay asking the user to perform the current step
fn show_instruction(document: &Document, panel: &SharedSequencer) {
    remove_by_id(document, "stepInstruction");

    let step = panel.borrow().sequencer.current_step().clone();
    let html = format!(
        r#"<div class="instruction-icon">{}</div>
        <h4>{}</h4>
        <p>{}</p>
        <small>点击继续</small>"#,
        step.icon, step.name, step.description
    );
    let Ok(overlay) = create_div(document, "step-instruction", &html) else {
        return;
    };
    overlay.set_id("stepInstruction");

    let target = panel.clone();
    let el = overlay.clone();
    on_click(&overlay, move || {
        el.remove();
        let (delay, ack) = {
            let p = target.borrow();
            (p.step_delay_ms, p.sequencer.ack_token())
        };
        let Some(ack) = ack else { return };
        let target = target.clone();
        set_timeout(delay, move || acknowledge(&target, ack));
    });

    if let Some(body) = document.body() {
        let _ = body.append_child(&overlay);
    }
}

fn show_result(document: &Document, panel: &SharedSequencer, result: RunResult) {
    let grade = result.grade;
    let html = format!(
        r#"<h3 style="color: {}">{}</h3>
        <p>茶沫品质: {}%</p>
        <p>得分: {}</p>
        <p class="verse">{}</p>
        <button class="retry-btn">再试一次</button>"#,
        grade.color(),
        grade.label(),
        result.quality.round(),
        result.score,
        grade.verse()
    );
    let Ok(card) = create_div(document, "diancha-result", &html) else {
        return;
    };
    if let Some(retry) = card.query_selector(".retry-btn").ok().flatten() {
        let el = card.clone();
        let panel = panel.clone();
        on_click(&retry, move || {
            el.remove();
            reset(&panel);
        });
    }
    if let Some(body) = document.body() {
        let _ = body.append_child(&card);
    }
}
