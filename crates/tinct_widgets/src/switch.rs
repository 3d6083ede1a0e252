//! Toggle switch
//!
//! A checkbox drawn as a sliding switch. Its appearance is a function of
//! five attributes:
//!
//! - `checked`, `disabled`, `indeterminate`: presence-based booleans
//! - `value`: submitted value, `"on"` when absent
//! - `color`: custom-property family used for the track (`primary` when
//!   absent), matching the families produced by theme expansion
//!
//! [`SwitchState`] holds those attributes, [`render`] turns a state into a
//! [`SwitchView`], and [`Switch`] ties the two together: each transition
//! re-renders and notifies render observers. Only a user toggle emits a
//! [`SwitchChange`]; programmatic attribute changes never do.
//!
//! # Example
//!
//! ```rust
//! use tinct_widgets::switch::{Switch, SwitchState};
//!
//! let mut switch = Switch::with_state(SwitchState {
//!     disabled: true,
//!     ..SwitchState::default()
//! });
//!
//! // Disabled switches ignore interaction
//! assert!(switch.toggle().is_none());
//!
//! switch.remove_attribute("disabled");
//! assert!(switch.toggle().is_some());
//! assert_eq!(switch.attribute("checked").as_deref(), Some(""));
//! ```

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, trace};

/// Value reported when the `value` attribute is absent
pub const DEFAULT_VALUE: &str = "on";

/// Color family used when the `color` attribute is absent
pub const DEFAULT_COLOR: &str = "primary";

/// Stylesheet imported at the top of the shadow tree; it styles the
/// color-family class on the root element
pub const SWITCH_STYLESHEET: &str = "components/switch/style.css";

/// Opacity applied to the root element of a disabled switch
pub const DISABLED_OPACITY: f32 = 0.5;

/// Callback invoked with each freshly rendered view
pub type RenderCallback = Arc<dyn Fn(&SwitchView) + Send + Sync>;

/// Callback invoked once per user toggle
pub type ChangeCallback = Arc<dyn Fn(&SwitchChange) + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// Attributes
// ─────────────────────────────────────────────────────────────────────────────

/// Attributes the switch reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwitchAttribute {
    Checked,
    Value,
    Disabled,
    Indeterminate,
    Color,
}

impl SwitchAttribute {
    pub const ALL: [SwitchAttribute; 5] = [
        SwitchAttribute::Checked,
        SwitchAttribute::Value,
        SwitchAttribute::Disabled,
        SwitchAttribute::Indeterminate,
        SwitchAttribute::Color,
    ];

    /// Look up an attribute by its (case-insensitive) name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "checked" => Some(SwitchAttribute::Checked),
            "value" => Some(SwitchAttribute::Value),
            "disabled" => Some(SwitchAttribute::Disabled),
            "indeterminate" => Some(SwitchAttribute::Indeterminate),
            "color" => Some(SwitchAttribute::Color),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SwitchAttribute::Checked => "checked",
            SwitchAttribute::Value => "value",
            SwitchAttribute::Disabled => "disabled",
            SwitchAttribute::Indeterminate => "indeterminate",
            SwitchAttribute::Color => "color",
        }
    }

    /// Whether the attribute is a presence-based boolean
    pub fn is_flag(self) -> bool {
        matches!(
            self,
            SwitchAttribute::Checked | SwitchAttribute::Disabled | SwitchAttribute::Indeterminate
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// State
// ─────────────────────────────────────────────────────────────────────────────

/// Complete attribute state of a switch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchState {
    pub checked: bool,
    pub value: String,
    pub disabled: bool,
    pub indeterminate: bool,
    pub color: String,
}

impl Default for SwitchState {
    fn default() -> Self {
        Self {
            checked: false,
            value: DEFAULT_VALUE.to_string(),
            disabled: false,
            indeterminate: false,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Inputs that move a switch from one state to the next
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchEvent {
    SetChecked(bool),
    SetDisabled(bool),
    SetIndeterminate(bool),
    /// `None` restores the default value
    SetValue(Option<String>),
    /// `None` restores the default color family
    SetColor(Option<String>),
    /// User interaction
    Toggle,
}

impl SwitchState {
    /// Next state after `event`
    ///
    /// A toggle on a disabled switch leaves the state unchanged. A toggle
    /// otherwise flips `checked` and clears `indeterminate`, as a native
    /// checkbox does when clicked.
    pub fn transition(&self, event: &SwitchEvent) -> SwitchState {
        let mut next = self.clone();
        match event {
            SwitchEvent::SetChecked(checked) => next.checked = *checked,
            SwitchEvent::SetDisabled(disabled) => next.disabled = *disabled,
            SwitchEvent::SetIndeterminate(indeterminate) => next.indeterminate = *indeterminate,
            SwitchEvent::SetValue(value) => {
                next.value = value.clone().unwrap_or_else(|| DEFAULT_VALUE.to_string());
            }
            SwitchEvent::SetColor(color) => {
                next.color = color
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .unwrap_or(DEFAULT_COLOR)
                    .to_string();
            }
            SwitchEvent::Toggle => {
                if !self.disabled {
                    next.checked = !self.checked;
                    next.indeterminate = false;
                }
            }
        }
        next
    }

    /// Reflected attribute value
    ///
    /// Flags return `None` when absent and the empty string when present.
    /// `value` and `color` always report a string, their defaults when unset.
    pub fn attribute(&self, attribute: SwitchAttribute) -> Option<String> {
        let flag = |on: bool| on.then(String::new);
        match attribute {
            SwitchAttribute::Checked => flag(self.checked),
            SwitchAttribute::Disabled => flag(self.disabled),
            SwitchAttribute::Indeterminate => flag(self.indeterminate),
            SwitchAttribute::Value => Some(self.value.clone()),
            SwitchAttribute::Color => Some(self.color.clone()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Everything needed to draw a switch
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchView {
    /// Class on the root element, selecting the color family
    pub color: String,
    /// Opacity of the root element (`None` = fully opaque)
    pub root_opacity: Option<f32>,
    /// Cursor override on the label (`None` = stylesheet default)
    pub label_cursor: Option<&'static str>,
    pub checked: bool,
    pub disabled: bool,
    /// Applied to the inner checkbox as a property after mounting; it has
    /// no markup attribute
    pub indeterminate: bool,
}

impl SwitchView {
    /// Shadow-tree markup for the view
    pub fn to_markup(&self) -> String {
        let mut input_attrs = String::new();
        if self.checked {
            input_attrs.push_str(" checked");
        }
        if self.disabled {
            input_attrs.push_str(" disabled");
        }

        let root_style = self
            .root_opacity
            .map(|opacity| format!(" style=\"opacity: {opacity};\""))
            .unwrap_or_default();
        let label_style = self
            .label_cursor
            .map(|cursor| format!(" style=\"cursor: {cursor}\""))
            .unwrap_or_default();

        format!(
            "<style>@import '{stylesheet}'</style>\
             <span id=\"root\" class=\"{class}\"{root_style}>\
             <label for=\"checkbox\" id=\"switch\"{label_style}>\
             <input id=\"checkbox\" type=\"checkbox\"{input_attrs}>\
             <span id=\"slider\"></span>\
             <span id=\"effects\"></span>\
             <span id=\"thumbs\"></span>\
             </label></span>",
            stylesheet = SWITCH_STYLESHEET,
            class = escape_attribute(&self.color),
        )
    }
}

/// Pure render function
pub fn render(state: &SwitchState) -> SwitchView {
    SwitchView {
        color: state.color.clone(),
        root_opacity: state.disabled.then_some(DISABLED_OPACITY),
        label_cursor: state.disabled.then_some("default"),
        checked: state.checked,
        disabled: state.disabled,
        indeterminate: state.indeterminate,
    }
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Switch
// ─────────────────────────────────────────────────────────────────────────────

/// Payload of the `change` notification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchChange {
    pub checked: bool,
    pub value: String,
}

/// A recorded state transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchTransition {
    pub event: SwitchEvent,
    pub from: SwitchState,
    pub to: SwitchState,
}

/// A switch instance: state, current view, and observers
pub struct Switch {
    state: SwitchState,
    view: SwitchView,
    render_listeners: SmallVec<[RenderCallback; 2]>,
    change_listeners: SmallVec<[ChangeCallback; 2]>,
    /// History of state transitions (for debugging)
    history: Vec<SwitchTransition>,
}

impl Switch {
    pub fn new() -> Self {
        Self::with_state(SwitchState::default())
    }

    pub fn with_state(state: SwitchState) -> Self {
        let view = render(&state);
        Self {
            state,
            view,
            render_listeners: SmallVec::new(),
            change_listeners: SmallVec::new(),
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &SwitchState {
        &self.state
    }

    /// The most recently rendered view
    pub fn view(&self) -> &SwitchView {
        &self.view
    }

    pub fn history(&self) -> &[SwitchTransition] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Register a render observer
    pub fn on_render<F: Fn(&SwitchView) + Send + Sync + 'static>(&mut self, callback: F) {
        self.render_listeners.push(Arc::new(callback));
    }

    /// Register a change observer
    pub fn on_change<F: Fn(&SwitchChange) + Send + Sync + 'static>(&mut self, callback: F) {
        self.change_listeners.push(Arc::new(callback));
    }

    /// Apply an event, re-rendering if the state changed
    ///
    /// Returns `true` when a transition happened.
    pub fn send(&mut self, event: SwitchEvent) -> bool {
        let next = self.state.transition(&event);
        if next == self.state {
            trace!(?event, "switch event caused no transition");
            return false;
        }

        let from = std::mem::replace(&mut self.state, next);
        debug!(?event, checked = self.state.checked, disabled = self.state.disabled, "switch transition");
        self.history.push(SwitchTransition {
            event,
            from,
            to: self.state.clone(),
        });

        self.view = render(&self.state);
        for listener in &self.render_listeners {
            listener(&self.view);
        }
        true
    }

    /// One user interaction
    ///
    /// Ignored on a disabled switch. Otherwise flips `checked`, clears
    /// `indeterminate`, and notifies change observers exactly once.
    pub fn toggle(&mut self) -> Option<SwitchChange> {
        if self.state.disabled {
            debug!("toggle ignored on disabled switch");
            return None;
        }

        self.send(SwitchEvent::Toggle);
        let change = SwitchChange {
            checked: self.state.checked,
            value: self.state.value.clone(),
        };
        for listener in &self.change_listeners {
            listener(&change);
        }
        Some(change)
    }

    /// Set an attribute by name
    ///
    /// Flags become present regardless of `value`. Returns `false` for
    /// attributes the switch does not observe.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        let Some(attribute) = SwitchAttribute::from_name(name) else {
            trace!(attribute = name, "ignoring unobserved attribute");
            return false;
        };
        let event = match attribute {
            SwitchAttribute::Checked => SwitchEvent::SetChecked(true),
            SwitchAttribute::Disabled => SwitchEvent::SetDisabled(true),
            SwitchAttribute::Indeterminate => SwitchEvent::SetIndeterminate(true),
            SwitchAttribute::Value => SwitchEvent::SetValue(Some(value.to_string())),
            SwitchAttribute::Color => SwitchEvent::SetColor(Some(value.to_string())),
        };
        self.send(event);
        true
    }

    /// Remove an attribute by name, restoring its default
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let Some(attribute) = SwitchAttribute::from_name(name) else {
            return false;
        };
        let event = match attribute {
            SwitchAttribute::Checked => SwitchEvent::SetChecked(false),
            SwitchAttribute::Disabled => SwitchEvent::SetDisabled(false),
            SwitchAttribute::Indeterminate => SwitchEvent::SetIndeterminate(false),
            SwitchAttribute::Value => SwitchEvent::SetValue(None),
            SwitchAttribute::Color => SwitchEvent::SetColor(None),
        };
        self.send(event);
        true
    }

    /// Reflected attribute value, `None` for absent flags and unobserved names
    pub fn attribute(&self, name: &str) -> Option<String> {
        SwitchAttribute::from_name(name).and_then(|attribute| self.state.attribute(attribute))
    }

    pub fn checked(&self) -> bool {
        self.state.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.send(SwitchEvent::SetChecked(checked));
    }

    pub fn disabled(&self) -> bool {
        self.state.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.send(SwitchEvent::SetDisabled(disabled));
    }

    pub fn indeterminate(&self) -> bool {
        self.state.indeterminate
    }

    pub fn set_indeterminate(&mut self, indeterminate: bool) {
        self.send(SwitchEvent::SetIndeterminate(indeterminate));
    }

    pub fn value(&self) -> &str {
        &self.state.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.send(SwitchEvent::SetValue(Some(value.into())));
    }

    pub fn color(&self) -> &str {
        &self.state.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.send(SwitchEvent::SetColor(Some(color.into())));
    }
}

impl Default for Switch {
    fn default() -> Self {
        Self::new()
    }
}
