//! Item definitions: the declarative description of one toolbar control.

use crate::format_state::FormatState;

/// Decides whether a button is highlighted for a snapshot.
pub type ActivePredicate = fn(&FormatState) -> bool;

/// Derives a select's or color picker's current value from a snapshot.
pub type ValueGetter = fn(&FormatState) -> String;

/// One entry of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    /// Inline style previewing the option, e.g. `font-family: Georgia, serif`.
    pub style: Option<String>,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// The empty-valued option acts as a placeholder and is never listed.
    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// The kind-specific part of an item.
#[derive(Debug, Clone)]
pub enum ItemKind {
    /// A push button dispatching `command`.
    Button {
        icon: Option<String>,
        command: Option<String>,
        is_active: Option<ActivePredicate>,
    },
    /// A dropdown of options.
    Select {
        options: Vec<SelectOption>,
        get_value: Option<ValueGetter>,
    },
    /// A button opening a palette; the chosen color is passed to `command`.
    ColorPicker {
        icon: Option<String>,
        command: Option<String>,
        colors: Vec<String>,
        get_value: Option<ValueGetter>,
        /// Indicator color used when the snapshot has no usable color.
        indicator_fallback: String,
    },
}

/// An immutable catalog entry.
#[derive(Debug, Clone)]
pub struct ItemDef {
    pub name: String,
    pub label: Option<String>,
    pub group: Option<String>,
    pub kind: ItemKind,
}

impl ItemDef {
    /// A button dispatching `command`.
    pub fn button(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            group: None,
            kind: ItemKind::Button {
                icon: None,
                command: Some(command.into()),
                is_active: None,
            },
        }
    }

    /// A select over `options`.
    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            name: name.into(),
            label: None,
            group: None,
            kind: ItemKind::Select {
                options,
                get_value: None,
            },
        }
    }

    /// A color picker over `colors` dispatching `command`.
    pub fn color_picker(
        name: impl Into<String>,
        command: impl Into<String>,
        colors: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: None,
            group: None,
            kind: ItemKind::ColorPicker {
                icon: None,
                command: Some(command.into()),
                colors,
                get_value: None,
                indicator_fallback: "currentColor".to_string(),
            },
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set the icon of a button or color picker. Ignored for selects.
    pub fn with_icon(mut self, new_icon: impl Into<String>) -> Self {
        match &mut self.kind {
            ItemKind::Button { icon, .. } | ItemKind::ColorPicker { icon, .. } => {
                *icon = Some(new_icon.into());
            }
            ItemKind::Select { .. } => {}
        }
        self
    }

    /// Remove the command, leaving a control that dispatches nothing.
    pub fn without_command(mut self) -> Self {
        match &mut self.kind {
            ItemKind::Button { command, .. } | ItemKind::ColorPicker { command, .. } => {
                *command = None;
            }
            ItemKind::Select { .. } => {}
        }
        self
    }

    /// Set the highlight predicate of a button. Ignored for other kinds.
    pub fn with_active(mut self, predicate: ActivePredicate) -> Self {
        if let ItemKind::Button { is_active, .. } = &mut self.kind {
            *is_active = Some(predicate);
        }
        self
    }

    /// Set the value getter of a select or color picker. Ignored for buttons.
    pub fn with_value(mut self, getter: ValueGetter) -> Self {
        match &mut self.kind {
            ItemKind::Select { get_value, .. } | ItemKind::ColorPicker { get_value, .. } => {
                *get_value = Some(getter);
            }
            ItemKind::Button { .. } => {}
        }
        self
    }

    /// Set the fallback indicator color of a color picker.
    pub fn with_indicator_fallback(mut self, color: impl Into<String>) -> Self {
        if let ItemKind::ColorPicker {
            indicator_fallback, ..
        } = &mut self.kind
        {
            *indicator_fallback = color.into();
        }
        self
    }

    /// The command this item dispatches, if any.
    pub fn command(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Button { command, .. } | ItemKind::ColorPicker { command, .. } => {
                command.as_deref()
            }
            ItemKind::Select { .. } => None,
        }
    }

    /// The item's value for a snapshot; `None` when the item reflects no value.
    pub fn value_for(&self, state: &FormatState) -> Option<String> {
        match &self.kind {
            ItemKind::Select { get_value, .. } | ItemKind::ColorPicker { get_value, .. } => {
                get_value.map(|get| get(state))
            }
            ItemKind::Button { .. } => None,
        }
    }

    /// Whether the button is highlighted for a snapshot; `None` for non-toggles.
    pub fn active_for(&self, state: &FormatState) -> Option<bool> {
        match &self.kind {
            ItemKind::Button {
                is_active: Some(predicate),
                ..
            } => Some(predicate(state)),
            _ => None,
        }
    }

    /// Text shown on a select before any snapshot arrives.
    ///
    /// The placeholder option's label, else the item label, else its name.
    pub fn placeholder_label(&self) -> &str {
        let placeholder = match &self.kind {
            ItemKind::Select { options, .. } => options
                .iter()
                .find(|option| option.is_placeholder())
                .map(|option| option.label.as_str())
                .filter(|label| !label.is_empty()),
            _ => None,
        };
        placeholder
            .or(self.label.as_deref().filter(|label| !label.is_empty()))
            .unwrap_or(self.name.as_str())
    }
}
