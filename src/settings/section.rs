//! Settings sections
//!
//! The seven mutually exclusive panels of the settings page.

use std::fmt;

use super::fields::Field;
use crate::i18n::tr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Model,
    Action,
    IdleTime,
    Stage,
    Scene,
    Language,
    TouchPrompt,
}

impl Section {
    /// Sidebar order
    pub const ALL: [Section; 7] = [
        Section::Model,
        Section::Action,
        Section::IdleTime,
        Section::Stage,
        Section::Scene,
        Section::Language,
        Section::TouchPrompt,
    ];

    /// Identifier used by menu targets
    pub fn id(self) -> &'static str {
        match self {
            Section::Model => "model-settings",
            Section::Action => "action-settings",
            Section::IdleTime => "idle-time-settings",
            Section::Stage => "stage-settings",
            Section::Scene => "scene-settings",
            Section::Language => "language-settings",
            Section::TouchPrompt => "touch-prompt-settings",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Section::Model => "🧊",
            Section::Action => "🏃",
            Section::IdleTime => "⏳",
            Section::Stage => "🎭",
            Section::Scene => "⛰️",
            Section::Language => "🌐",
            Section::TouchPrompt => "👆",
        }
    }

    /// Translation key of the sidebar label
    pub fn label_key(self) -> &'static str {
        match self {
            Section::Model => "section.model",
            Section::Action => "section.action",
            Section::IdleTime => "section.idle_time",
            Section::Stage => "section.stage",
            Section::Scene => "section.scene",
            Section::Language => "section.language",
            Section::TouchPrompt => "section.touch_prompt",
        }
    }

    /// Translation key of the panel heading
    pub fn heading_key(self) -> &'static str {
        match self {
            Section::Model => "heading.model",
            Section::Action => "heading.action",
            Section::IdleTime => "heading.idle_time",
            Section::Stage => "heading.stage",
            Section::Scene => "heading.scene",
            Section::Language => "heading.language",
            Section::TouchPrompt => "heading.touch_prompt",
        }
    }

    /// Fields rendered by this section's panel
    pub fn fields(self) -> &'static [Field] {
        match self {
            Section::Model => &[Field::Model, Field::ModelScale],
            Section::Action => &[Field::DefaultAction, Field::ActionSpeed],
            Section::IdleTime => &[Field::IdleDuration],
            Section::Stage => &[Field::StageLighting, Field::StageBackground],
            Section::Scene => &[Field::SceneEnvironment, Field::SceneWeather],
            Section::Language => &[Field::AppLanguage],
            Section::TouchPrompt => &[
                Field::TouchPromptText,
                Field::PromptDisplayDuration,
                Field::EnableTouchPrompt,
            ],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), tr(self.label_key()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = Section::ALL.iter().map(|s| s.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Section::ALL.len());
        assert!(ids.iter().all(|id| id.ends_with("-settings")));
    }

    #[test]
    fn test_every_field_belongs_to_exactly_one_section() {
        for field in Field::ALL {
            let owners = Section::ALL
                .iter()
                .filter(|s| s.fields().contains(&field))
                .count();
            assert_eq!(owners, 1, "{:?} should have one owning section", field);
            assert!(field.section().fields().contains(&field));
        }
    }
}
