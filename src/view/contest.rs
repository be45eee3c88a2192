//! Tea contest panel

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element};

use super::{
    clear_class, clock_stamp, create_div, document, on_click_id, set_disabled, set_style,
    set_text, set_timeout, toggle_class,
};
use crate::sim::contest::tea_display_heights;
use crate::sim::{Category, ContestGame, RoundReport, SeededRandom, Side};
use crate::{SetupError, Settings};

pub struct ContestPanel {
    pub game: ContestGame,
    rng: SeededRandom,
    end_delay_ms: u32,
    /// Log entries already in the DOM
    rendered_log: usize,
}

pub type SharedContest = Rc<RefCell<ContestPanel>>;

impl ContestPanel {
    pub fn can_play(&self) -> bool {
        self.game.can_play()
    }
}

pub fn mount(
    document: &Document,
    container: &Element,
    settings: &Settings,
    seed: u64,
) -> Result<SharedContest, SetupError> {
    let buttons: String = Category::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                r#"<button id="{}" class="category-btn" disabled>{} ({})</button>"#,
                c.button_id(),
                c.name(),
                i + 1
            )
        })
        .collect();

    let html = format!(
        r#"<h3>⚔️ 斗茶小游戏</h3>
        <div class="scoreboard">
            <span>你: <b id="playerScore">0</b></span>
            <span>第 <b id="currentRound">1</b> / {} 回合</span>
            <span>文人: <b id="aiScore">0</b></span>
        </div>
        <div class="tea-arena">
            <div class="tea-display" id="playerTea"></div>
            <div class="tea-display" id="aiTea"></div>
        </div>
        <div class="category-buttons">{buttons}</div>
        <button id="startGameBtn">开始斗茶</button>
        <div class="game-log" id="gameLog"></div>"#,
        settings.max_rounds
    );

    let panel_el = create_div(document, "doucha-game-panel", &html)?;
    container
        .append_child(&panel_el)
        .map_err(|_| SetupError::Dom("doucha-game-panel"))?;

    let panel = Rc::new(RefCell::new(ContestPanel {
        game: ContestGame::new(settings.max_rounds),
        rng: SeededRandom::new(seed),
        end_delay_ms: settings.round_end_delay_ms,
        rendered_log: 0,
    }));

    {
        let panel = panel.clone();
        on_click_id(document, "startGameBtn", move || start_game(&panel));
    }
    for category in Category::ALL {
        let panel = panel.clone();
        on_click_id(document, category.button_id(), move || {
            play_round(&panel, category)
        });
    }

    render(&panel);
    log::info!("Tea contest mounted");
    Ok(panel)
}

pub fn start_game(panel: &SharedContest) {
    {
        let mut p = panel.borrow_mut();
        p.game.start_game();
        p.rendered_log = 0;
    }
    if let Ok(document) = document() {
        if let Some(log_el) = document.get_element_by_id("gameLog") {
            log_el.set_inner_html("");
        }
        for side in [Side::Player, Side::Opponent] {
            if let Some(display) = document.get_element_by_id(&format!("{}Tea", side.dom_prefix())) {
                display.set_inner_html("");
            }
        }
        clear_class(&document, ".tea-display", "winning");
    }
    render(panel);
}

pub fn play_round(panel: &SharedContest, category: Category) {
    let report = {
        let mut p = panel.borrow_mut();
        let ContestPanel { game, rng, .. } = &mut *p;
        game.play_round(category, rng)
    };
    let Some(report) = report else { return };

    if let Ok(document) = document() {
        show_round(&document, &report);
    }

    if report.final_round {
        let delay = panel.borrow().end_delay_ms;
        let panel = panel.clone();
        set_timeout(delay, move || {
            panel.borrow_mut().game.end_game();
            render(&panel);
        });
    }
    render(panel);
}

fn show_round(document: &Document, report: &RoundReport) {
    draw_tea(document, Side::Player, report.player_points);
    draw_tea(document, Side::Opponent, report.opponent_points);

    clear_class(document, ".tea-display", "winning");
    if let Some(winner) = report.winner {
        if let Some(display) = document.get_element_by_id(&format!("{}Tea", winner.dom_prefix())) {
            toggle_class(&display, "winning", true);
        }
    }
}

/// Liquor and foam layers sized by the side's points
fn draw_tea(document: &Document, side: Side, points: u32) {
    let Some(display) = document.get_element_by_id(&format!("{}Tea", side.dom_prefix())) else {
        return;
    };
    display.set_inner_html("");
    let (liquid_h, foam_h) = tea_display_heights(points);

    if let Ok(liquid) = create_div(document, "tea-liquid-display", "") {
        set_style(&liquid, "height", &format!("{liquid_h}%"));
        let _ = display.append_child(&liquid);
    }
    if let Ok(foam) = create_div(document, "tea-foam-display", "") {
        set_style(&foam, "height", &format!("{foam_h}%"));
        set_style(&foam, "bottom", &format!("{liquid_h}%"));
        let _ = display.append_child(&foam);
    }
    if let Ok(label) = create_div(document, "tea-score-label", &points.to_string()) {
        let _ = display.append_child(&label);
    }
}

fn render(panel: &SharedContest) {
    let Ok(document) = document() else { return };
    let mut p = panel.borrow_mut();

    set_text(&document, "playerScore", &p.game.player_wins.to_string());
    set_text(&document, "aiScore", &p.game.ai_wins.to_string());
    set_text(&document, "currentRound", &p.game.round.to_string());

    let can_play = p.game.can_play();
    for category in Category::ALL {
        set_disabled(&document, category.button_id(), !can_play);
    }
    let active = p.game.is_active();
    set_disabled(&document, "startGameBtn", active);
    let label = if active {
        "游戏中..."
    } else if p.game.outcome().is_some() {
        "重新开始"
    } else {
        "开始斗茶"
    };
    set_text(&document, "startGameBtn", label);

    let Some(log_el) = document.get_element_by_id("gameLog") else {
        return;
    };
    if p.game.log.len() < p.rendered_log {
        log_el.set_inner_html("");
        p.rendered_log = 0;
    }
    let stamp = clock_stamp();
    for entry in &p.game.log[p.rendered_log..] {
        let class = format!("log-entry {}", entry.kind.css_class());
        if let Ok(line) = create_div(&document, &class, "") {
            line.set_text_content(Some(&format!("[{stamp}] {}", entry.message)));
            let _ = log_el.append_child(&line);
        }
    }
    p.rendered_log = p.game.log.len();
    log_el.set_scroll_top(log_el.scroll_height());
}
