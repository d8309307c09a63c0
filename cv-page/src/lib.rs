//! JSON page description to `PageSnapshot` replay engine.
//!
//! Drives the same rules the DOM controller applies, but against a headless
//! model of the page, so interaction sequences can be exercised without a
//! browser.

use cv_core::{
    clamp_skill_value, filter_matches, key_activates_timeline, PageError, PageState, Theme,
};
use serde::{Deserialize, Serialize};

/// Static inventory of the interactive elements found in the markup.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PageModel {
    #[serde(default)]
    pub skill_bars: Vec<SkillBar>,
    #[serde(default)]
    pub skill_blocks: Vec<SkillBlock>,
    #[serde(default)]
    pub filters: Vec<String>,
    #[serde(default)]
    pub timeline_items: usize,
    #[serde(default)]
    pub cards: usize,
}

impl PageModel {
    /// A page with nothing to interact with.
    pub fn is_empty(&self) -> bool {
        self.skill_bars.is_empty()
            && self.skill_blocks.is_empty()
            && self.filters.is_empty()
            && self.timeline_items == 0
            && self.cards == 0
    }
}

/// One skill bar; `value` carries the raw `data-value` attribute string.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SkillBar {
    #[serde(default)]
    pub value: Option<String>,
}

/// One filterable content block with its immutable category tag.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SkillBlock {
    #[serde(default)]
    pub category: Option<String>,
}

/// One user-visible interaction, in the order the browser would deliver it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PageAction {
    ToggleTheme,
    SetFilter { tag: String },
    ToggleDetails { block: usize },
    ActivateTimeline { item: usize },
    PressTimeline { item: usize, key: String },
    BarEntersViewport { bar: usize },
    CardEntersViewport { card: usize },
    Export { renderer: RendererBehavior },
    Print,
}

/// How the PDF renderer behaves for a simulated export trigger.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RendererBehavior {
    /// The render chain resolves and the file is saved.
    Ok,
    /// The render chain rejects; the controller downgrades to native print.
    Fail,
    /// The renderer is not loaded at all; native print runs directly.
    Missing,
}

/// Environment the page starts in.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReplayOptions {
    /// Raw value found under the theme storage key, if any.
    #[serde(default)]
    pub stored_theme: Option<String>,
    /// System-level color-scheme preference at load time.
    #[serde(default)]
    pub system_dark: bool,
    /// Whether the key-value store accepts writes this session.
    #[serde(default = "default_true")]
    pub storage_available: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            stored_theme: None,
            system_dark: false,
            storage_available: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Final observable state after a replay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageSnapshot {
    pub theme: Theme,
    pub persisted_theme: Option<Theme>,
    pub active_filter: String,
    pub filter_controls_active: Vec<bool>,
    pub blocks_visible: Vec<bool>,
    pub blocks_expanded: Vec<bool>,
    /// `None` until the bar first entered the viewport.
    pub bar_values: Vec<Option<u32>>,
    pub cards_revealed: Vec<bool>,
    pub active_timeline: Option<usize>,
    pub export: ExportSummary,
}

/// What the export controller did, and proof the finalization step ran.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportSummary {
    pub saved: u32,
    pub printed: u32,
    pub chrome_hidden: bool,
    pub control_enabled: bool,
}

/// Replay a page model and interaction script supplied as JSON strings.
pub fn replay_page_str(
    model_json: &str,
    script_json: &str,
    options: &ReplayOptions,
) -> Result<PageSnapshot, PageError> {
    let model: PageModel =
        serde_json::from_str(model_json).map_err(|err| PageError::Parse(err.to_string()))?;
    if model.is_empty() {
        return Err(PageError::MissingData);
    }
    let script: Vec<PageAction> =
        serde_json::from_str(script_json).map_err(|err| PageError::Parse(err.to_string()))?;
    Ok(replay_page(&model, &script, options))
}

/// Replay an already-parsed model. Never fails: actions aimed at targets
/// the page does not have are silent no-ops, like on the live document.
pub fn replay_page(
    model: &PageModel,
    script: &[PageAction],
    options: &ReplayOptions,
) -> PageSnapshot {
    let mut replay = Replay::start(model, options);
    for action in script {
        replay.apply(action);
    }
    replay.finish()
}

struct Replay<'a> {
    model: &'a PageModel,
    state: PageState,
    persisted_theme: Option<Theme>,
    storage_available: bool,
    bar_values: Vec<Option<u32>>,
    cards_revealed: Vec<bool>,
    blocks_expanded: Vec<bool>,
    export: ExportSummary,
}

impl<'a> Replay<'a> {
    fn start(model: &'a PageModel, options: &ReplayOptions) -> Self {
        let theme = Theme::resolve(options.stored_theme.as_deref(), options.system_dark);
        Self {
            model,
            state: PageState::new(theme),
            persisted_theme: options.stored_theme.as_deref().and_then(Theme::from_stored),
            storage_available: options.storage_available,
            bar_values: vec![None; model.skill_bars.len()],
            cards_revealed: vec![false; model.cards],
            blocks_expanded: vec![false; model.skill_blocks.len()],
            export: ExportSummary {
                saved: 0,
                printed: 0,
                chrome_hidden: false,
                control_enabled: true,
            },
        }
    }

    fn apply(&mut self, action: &PageAction) {
        match action {
            PageAction::ToggleTheme => {
                let next = self.state.toggle_theme();
                if self.storage_available {
                    self.persisted_theme = Some(next);
                }
            }
            PageAction::SetFilter { tag } => self.state.set_filter(tag),
            PageAction::ToggleDetails { block } => {
                if let Some(flag) = self.blocks_expanded.get_mut(*block) {
                    *flag = !*flag;
                }
            }
            PageAction::ActivateTimeline { item } => self.activate_timeline(*item),
            PageAction::PressTimeline { item, key } => {
                // Keyboard goes through the exact activation path of a click.
                if key_activates_timeline(key) {
                    self.activate_timeline(*item);
                }
            }
            PageAction::BarEntersViewport { bar } => self.reveal_bar(*bar),
            PageAction::CardEntersViewport { card } => {
                if let Some(flag) = self.cards_revealed.get_mut(*card) {
                    *flag = true;
                }
            }
            PageAction::Export { renderer } => self.run_export(*renderer),
            PageAction::Print => self.export.printed += 1,
        }
    }

    fn activate_timeline(&mut self, item: usize) {
        if item < self.model.timeline_items {
            self.state.activate_timeline(item);
        }
    }

    /// One-shot reveal: a second viewport entry for the same bar changes
    /// nothing, mirroring the unobserve-after-trigger contract.
    fn reveal_bar(&mut self, bar: usize) {
        let Some(slot) = self.bar_values.get_mut(bar) else {
            return;
        };
        if slot.is_none() {
            let raw = self.model.skill_bars[bar].value.as_deref();
            *slot = Some(clamp_skill_value(raw));
        }
    }

    /// Mirrors the async export path: guard, hide chrome, render or fall
    /// back, then a finalization step that always runs.
    fn run_export(&mut self, renderer: RendererBehavior) {
        if !self.state.begin_export() {
            return;
        }
        self.export.control_enabled = false;
        self.export.chrome_hidden = true;

        match renderer {
            RendererBehavior::Ok => self.export.saved += 1,
            RendererBehavior::Fail | RendererBehavior::Missing => self.export.printed += 1,
        }

        self.export.chrome_hidden = false;
        self.export.control_enabled = true;
        self.state.finish_export();
    }

    fn finish(self) -> PageSnapshot {
        let active = self.state.active_filter;
        let filter_controls_active = self
            .model
            .filters
            .iter()
            .map(|tag| *tag == active)
            .collect();
        let blocks_visible = self
            .model
            .skill_blocks
            .iter()
            .map(|block| filter_matches(&active, block.category.as_deref()))
            .collect();

        PageSnapshot {
            theme: self.state.theme,
            persisted_theme: self.persisted_theme,
            active_filter: active,
            filter_controls_active,
            blocks_visible,
            blocks_expanded: self.blocks_expanded,
            bar_values: self.bar_values,
            cards_revealed: self.cards_revealed,
            active_timeline: self.state.active_timeline,
            export: self.export,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> PageModel {
        PageModel {
            skill_bars: vec![
                SkillBar {
                    value: Some("90".to_string()),
                },
                SkillBar {
                    value: Some("137".to_string()),
                },
                SkillBar { value: None },
            ],
            skill_blocks: vec![
                SkillBlock {
                    category: Some("design".to_string()),
                },
                SkillBlock {
                    category: Some("dev".to_string()),
                },
                SkillBlock {
                    category: Some("design".to_string()),
                },
            ],
            filters: vec!["all".to_string(), "design".to_string(), "dev".to_string()],
            timeline_items: 3,
            cards: 2,
        }
    }

    fn replay(script: &[PageAction]) -> PageSnapshot {
        replay_page(&model(), script, &ReplayOptions::default())
    }

    #[test]
    fn default_view_shows_everything() {
        let snapshot = replay(&[]);
        assert_eq!(snapshot.active_filter, "all");
        assert_eq!(snapshot.blocks_visible, vec![true, true, true]);
        assert_eq!(snapshot.filter_controls_active, vec![true, false, false]);
        assert_eq!(snapshot.bar_values, vec![None, None, None]);
    }

    #[test]
    fn filter_shows_exactly_the_matching_blocks() {
        let snapshot = replay(&[PageAction::SetFilter {
            tag: "design".to_string(),
        }]);
        assert_eq!(snapshot.blocks_visible, vec![true, false, true]);
        assert_eq!(snapshot.filter_controls_active, vec![false, true, false]);

        let back = replay(&[
            PageAction::SetFilter {
                tag: "design".to_string(),
            },
            PageAction::SetFilter {
                tag: "all".to_string(),
            },
        ]);
        assert_eq!(back.blocks_visible, vec![true, true, true]);
    }

    #[test]
    fn viewport_entry_reveals_each_bar_once() {
        let snapshot = replay(&[
            PageAction::BarEntersViewport { bar: 1 },
            PageAction::BarEntersViewport { bar: 1 },
            PageAction::BarEntersViewport { bar: 2 },
        ]);
        assert_eq!(snapshot.bar_values, vec![None, Some(100), Some(0)]);

        let single = replay(&[
            PageAction::BarEntersViewport { bar: 1 },
            PageAction::BarEntersViewport { bar: 2 },
        ]);
        assert_eq!(snapshot.bar_values, single.bar_values);
    }

    #[test]
    fn only_the_last_activated_timeline_item_stays_active() {
        let snapshot = replay(&[
            PageAction::ActivateTimeline { item: 1 },
            PageAction::ActivateTimeline { item: 2 },
        ]);
        assert_eq!(snapshot.active_timeline, Some(2));
    }

    #[test]
    fn keyboard_activation_matches_click() {
        let clicked = replay(&[PageAction::ActivateTimeline { item: 1 }]);
        let pressed = replay(&[PageAction::PressTimeline {
            item: 1,
            key: "Enter".to_string(),
        }]);
        assert_eq!(clicked, pressed);

        let ignored = replay(&[PageAction::PressTimeline {
            item: 1,
            key: "Escape".to_string(),
        }]);
        assert_eq!(ignored.active_timeline, None);
    }

    #[test]
    fn details_toggle_is_local_to_the_block() {
        let snapshot = replay(&[
            PageAction::ToggleDetails { block: 0 },
            PageAction::ToggleDetails { block: 2 },
            PageAction::ToggleDetails { block: 2 },
        ]);
        assert_eq!(snapshot.blocks_expanded, vec![true, false, false]);
    }

    #[test]
    fn theme_toggles_persist_each_change() {
        let snapshot = replay(&[
            PageAction::ToggleTheme,
            PageAction::ToggleTheme,
            PageAction::ToggleTheme,
        ]);
        assert_eq!(snapshot.theme, Theme::Dark);
        assert_eq!(snapshot.persisted_theme, Some(Theme::Dark));
    }

    #[test]
    fn blocked_storage_keeps_theme_in_memory_only() {
        let options = ReplayOptions {
            storage_available: false,
            ..ReplayOptions::default()
        };
        let snapshot = replay_page(&model(), &[PageAction::ToggleTheme], &options);
        assert_eq!(snapshot.theme, Theme::Dark);
        assert_eq!(snapshot.persisted_theme, None);
    }

    #[test]
    fn export_finalizes_whatever_the_renderer_does() {
        for renderer in [
            RendererBehavior::Ok,
            RendererBehavior::Fail,
            RendererBehavior::Missing,
        ] {
            let snapshot = replay(&[PageAction::Export { renderer }]);
            assert!(!snapshot.export.chrome_hidden);
            assert!(snapshot.export.control_enabled);
            match renderer {
                RendererBehavior::Ok => {
                    assert_eq!(snapshot.export.saved, 1);
                    assert_eq!(snapshot.export.printed, 0);
                }
                _ => {
                    assert_eq!(snapshot.export.saved, 0);
                    assert_eq!(snapshot.export.printed, 1);
                }
            }
        }
    }

    #[test]
    fn actions_on_missing_targets_change_nothing() {
        let untouched = replay(&[]);
        let snapshot = replay(&[
            PageAction::BarEntersViewport { bar: 99 },
            PageAction::ToggleDetails { block: 99 },
            PageAction::ActivateTimeline { item: 99 },
            PageAction::CardEntersViewport { card: 99 },
        ]);
        assert_eq!(snapshot, untouched);
    }

    #[test]
    fn empty_model_is_rejected() {
        let err = replay_page_str("{}", "[]", &ReplayOptions::default()).unwrap_err();
        assert!(matches!(err, PageError::MissingData));
    }

    #[test]
    fn malformed_script_reports_a_parse_error() {
        let model = r#"{"cards": 1}"#;
        let err = replay_page_str(model, r#"[{"action": "warp"}]"#, &ReplayOptions::default())
            .unwrap_err();
        assert!(matches!(err, PageError::Parse(_)));
    }
}
