//! Settings field definitions
//!
//! Every field has a closed domain. Enumerated fields are Rust enums whose
//! serialized form is the short option id (`model1`, `zh-CN`, ...). Numeric
//! fields carry a [`FloatRange`] or [`IntRange`] that every write goes through.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::section::Section;
use crate::i18n::tr;

/// Longest accepted touch prompt, in characters
pub const TOUCH_PROMPT_MAX_CHARS: usize = 200;

pub const MODEL_SCALE_RANGE: FloatRange = FloatRange::new(0.5, 2.0, 0.1);
pub const ACTION_SPEED_RANGE: FloatRange = FloatRange::new(0.5, 2.0, 0.1);
pub const IDLE_DURATION_RANGE: IntRange = IntRange::new(0, 300);
pub const PROMPT_DURATION_RANGE: IntRange = IntRange::new(1, 10);

/// Every field of the settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Model,
    ModelScale,
    DefaultAction,
    ActionSpeed,
    IdleDuration,
    StageLighting,
    StageBackground,
    SceneEnvironment,
    SceneWeather,
    AppLanguage,
    TouchPromptText,
    PromptDisplayDuration,
    EnableTouchPrompt,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Model,
        Field::ModelScale,
        Field::DefaultAction,
        Field::ActionSpeed,
        Field::IdleDuration,
        Field::StageLighting,
        Field::StageBackground,
        Field::SceneEnvironment,
        Field::SceneWeather,
        Field::AppLanguage,
        Field::TouchPromptText,
        Field::PromptDisplayDuration,
        Field::EnableTouchPrompt,
    ];

    pub fn section(self) -> Section {
        match self {
            Field::Model | Field::ModelScale => Section::Model,
            Field::DefaultAction | Field::ActionSpeed => Section::Action,
            Field::IdleDuration => Section::IdleTime,
            Field::StageLighting | Field::StageBackground => Section::Stage,
            Field::SceneEnvironment | Field::SceneWeather => Section::Scene,
            Field::AppLanguage => Section::Language,
            Field::TouchPromptText | Field::PromptDisplayDuration | Field::EnableTouchPrompt => {
                Section::TouchPrompt
            }
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Field::Model => "field.model",
            Field::ModelScale => "field.model_scale",
            Field::DefaultAction => "field.default_action",
            Field::ActionSpeed => "field.action_speed",
            Field::IdleDuration => "field.idle_duration",
            Field::StageLighting => "field.stage_lighting",
            Field::StageBackground => "field.stage_background",
            Field::SceneEnvironment => "field.scene_environment",
            Field::SceneWeather => "field.scene_weather",
            Field::AppLanguage => "field.app_language",
            Field::TouchPromptText => "field.touch_prompt_text",
            Field::PromptDisplayDuration => "field.prompt_display_duration",
            Field::EnableTouchPrompt => "field.enable_touch_prompt",
        }
    }
}

/// Inclusive float domain with a fixed step, anchored at `min`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp into `[min, max]` and snap to the nearest step.
    ///
    /// Works in whole step units so `1.8` comes back as exactly `1.8_f32`
    /// rather than `0.5 + 13 * 0.1`.
    pub fn coerce(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        let per_unit = (1.0 / self.step).round();
        let lo = (self.min * per_unit).round();
        let hi = (self.max * per_unit).round();
        let units = (value * per_unit).round().clamp(lo, hi);
        units / per_unit
    }
}

/// Inclusive integer domain with step 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub min: u32,
    pub max: u32,
}

impl IntRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn coerce(&self, value: i64) -> u32 {
        value.clamp(self.min as i64, self.max as i64) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelChoice {
    #[default]
    #[serde(rename = "model1")]
    Model1,
    #[serde(rename = "model2")]
    Model2,
    #[serde(rename = "model3")]
    Model3,
}

impl ModelChoice {
    pub const ALL: [ModelChoice; 3] = [ModelChoice::Model1, ModelChoice::Model2, ModelChoice::Model3];

    pub fn id(self) -> &'static str {
        match self {
            ModelChoice::Model1 => "model1",
            ModelChoice::Model2 => "model2",
            ModelChoice::Model3 => "model3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultAction {
    #[default]
    Dance1,
    Dance2,
    Idle,
    Wave,
}

impl DefaultAction {
    pub const ALL: [DefaultAction; 4] = [
        DefaultAction::Dance1,
        DefaultAction::Dance2,
        DefaultAction::Idle,
        DefaultAction::Wave,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DefaultAction::Dance1 => "dance1",
            DefaultAction::Dance2 => "dance2",
            DefaultAction::Idle => "idle",
            DefaultAction::Wave => "wave",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageLighting {
    #[default]
    Bright,
    Dim,
    Spotlight,
}

impl StageLighting {
    pub const ALL: [StageLighting; 3] = [
        StageLighting::Bright,
        StageLighting::Dim,
        StageLighting::Spotlight,
    ];

    pub fn id(self) -> &'static str {
        match self {
            StageLighting::Bright => "bright",
            StageLighting::Dim => "dim",
            StageLighting::Spotlight => "spotlight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageBackground {
    #[default]
    Plain,
    Gradient,
    Pattern,
}

impl StageBackground {
    pub const ALL: [StageBackground; 3] = [
        StageBackground::Plain,
        StageBackground::Gradient,
        StageBackground::Pattern,
    ];

    pub fn id(self) -> &'static str {
        match self {
            StageBackground::Plain => "plain",
            StageBackground::Gradient => "gradient",
            StageBackground::Pattern => "pattern",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneEnvironment {
    #[default]
    Forest,
    City,
    Space,
    Desert,
}

impl SceneEnvironment {
    pub const ALL: [SceneEnvironment; 4] = [
        SceneEnvironment::Forest,
        SceneEnvironment::City,
        SceneEnvironment::Space,
        SceneEnvironment::Desert,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SceneEnvironment::Forest => "forest",
            SceneEnvironment::City => "city",
            SceneEnvironment::Space => "space",
            SceneEnvironment::Desert => "desert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneWeather {
    #[default]
    None,
    Rain,
    Snow,
    Fog,
}

impl SceneWeather {
    pub const ALL: [SceneWeather; 4] = [
        SceneWeather::None,
        SceneWeather::Rain,
        SceneWeather::Snow,
        SceneWeather::Fog,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SceneWeather::None => "none",
            SceneWeather::Rain => "rain",
            SceneWeather::Snow => "snow",
            SceneWeather::Fog => "fog",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AppLanguage {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "ja-JP")]
    JaJp,
}

impl AppLanguage {
    pub const ALL: [AppLanguage; 3] = [AppLanguage::ZhCn, AppLanguage::EnUs, AppLanguage::JaJp];

    /// BCP 47 tag, also the i18n catalog name
    pub fn code(self) -> &'static str {
        match self {
            AppLanguage::ZhCn => "zh-CN",
            AppLanguage::EnUs => "en-US",
            AppLanguage::JaJp => "ja-JP",
        }
    }

    /// Languages are always listed in their own script
    fn native_name(self) -> &'static str {
        match self {
            AppLanguage::ZhCn => "简体中文",
            AppLanguage::EnUs => "English (US)",
            AppLanguage::JaJp => "日本語",
        }
    }
}

impl fmt::Display for AppLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.native_name())
    }
}

macro_rules! display_by_option_key {
    ($($ty:ident => $prefix:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&tr(&format!(concat!($prefix, ".{}"), self.id())))
                }
            }
        )*
    };
}

display_by_option_key! {
    ModelChoice => "option.model",
    DefaultAction => "option.action",
    StageLighting => "option.lighting",
    StageBackground => "option.background",
    SceneEnvironment => "option.environment",
    SceneWeather => "option.weather",
}

/// A single write into the form. One variant per field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Model(ModelChoice),
    ModelScale(f32),
    DefaultAction(DefaultAction),
    ActionSpeed(f32),
    IdleDuration(i64),
    StageLighting(StageLighting),
    StageBackground(StageBackground),
    SceneEnvironment(SceneEnvironment),
    SceneWeather(SceneWeather),
    AppLanguage(AppLanguage),
    TouchPromptText(String),
    PromptDisplayDuration(i64),
    EnableTouchPrompt(bool),
}

impl FieldUpdate {
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::Model(_) => Field::Model,
            FieldUpdate::ModelScale(_) => Field::ModelScale,
            FieldUpdate::DefaultAction(_) => Field::DefaultAction,
            FieldUpdate::ActionSpeed(_) => Field::ActionSpeed,
            FieldUpdate::IdleDuration(_) => Field::IdleDuration,
            FieldUpdate::StageLighting(_) => Field::StageLighting,
            FieldUpdate::StageBackground(_) => Field::StageBackground,
            FieldUpdate::SceneEnvironment(_) => Field::SceneEnvironment,
            FieldUpdate::SceneWeather(_) => Field::SceneWeather,
            FieldUpdate::AppLanguage(_) => Field::AppLanguage,
            FieldUpdate::TouchPromptText(_) => Field::TouchPromptText,
            FieldUpdate::PromptDisplayDuration(_) => Field::PromptDisplayDuration,
            FieldUpdate::EnableTouchPrompt(_) => Field::EnableTouchPrompt,
        }
    }
}
