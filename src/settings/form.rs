//! Settings form state
//!
//! A flat record of independent fields. All writes go through [`SettingsForm::set`],
//! which coerces the value into the field's domain; there is no cross-field validation.

use serde::{Deserialize, Serialize};

use super::fields::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    // Model
    model: ModelChoice,
    model_scale: f32,

    // Action
    default_action: DefaultAction,
    action_speed: f32,

    // Idle timing (seconds)
    idle_duration: u32,

    // Stage
    stage_lighting: StageLighting,
    stage_background: StageBackground,

    // Scene
    scene_environment: SceneEnvironment,
    scene_weather: SceneWeather,

    // Language
    app_language: AppLanguage,

    // Touch prompt
    touch_prompt_text: String,
    prompt_display_duration: u32,
    enable_touch_prompt: bool,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self {
            model: ModelChoice::Model1,
            model_scale: 1.0,
            default_action: DefaultAction::Dance1,
            action_speed: 1.0,
            idle_duration: 30,
            stage_lighting: StageLighting::Bright,
            stage_background: StageBackground::Plain,
            scene_environment: SceneEnvironment::Forest,
            scene_weather: SceneWeather::None,
            app_language: AppLanguage::ZhCn,
            touch_prompt_text: String::new(),
            prompt_display_duration: 3,
            enable_touch_prompt: false,
        }
    }
}

impl SettingsForm {
    /// Replace one field's value, coerced into its domain
    pub fn set(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Model(v) => self.model = v,
            FieldUpdate::ModelScale(v) => self.model_scale = MODEL_SCALE_RANGE.coerce(v),
            FieldUpdate::DefaultAction(v) => self.default_action = v,
            FieldUpdate::ActionSpeed(v) => self.action_speed = ACTION_SPEED_RANGE.coerce(v),
            FieldUpdate::IdleDuration(v) => self.idle_duration = IDLE_DURATION_RANGE.coerce(v),
            FieldUpdate::StageLighting(v) => self.stage_lighting = v,
            FieldUpdate::StageBackground(v) => self.stage_background = v,
            FieldUpdate::SceneEnvironment(v) => self.scene_environment = v,
            FieldUpdate::SceneWeather(v) => self.scene_weather = v,
            FieldUpdate::AppLanguage(v) => self.app_language = v,
            FieldUpdate::TouchPromptText(v) => self.touch_prompt_text = truncate_prompt(v),
            FieldUpdate::PromptDisplayDuration(v) => {
                self.prompt_display_duration = PROMPT_DURATION_RANGE.coerce(v)
            }
            FieldUpdate::EnableTouchPrompt(v) => self.enable_touch_prompt = v,
        }
    }

    /// Restore every field to its default in one step
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Pull values read from disk back into their domains
    pub fn normalized(mut self) -> Self {
        self.model_scale = MODEL_SCALE_RANGE.coerce(self.model_scale);
        self.action_speed = ACTION_SPEED_RANGE.coerce(self.action_speed);
        self.idle_duration = IDLE_DURATION_RANGE.coerce(self.idle_duration as i64);
        self.prompt_display_duration =
            PROMPT_DURATION_RANGE.coerce(self.prompt_display_duration as i64);
        self.touch_prompt_text = truncate_prompt(std::mem::take(&mut self.touch_prompt_text));
        self
    }

    /// Fields whose value differs from the default
    pub fn changed_fields(&self) -> Vec<Field> {
        let defaults = Self::default();
        Field::ALL
            .into_iter()
            .filter(|f| !self.same_value(&defaults, *f))
            .collect()
    }

    fn same_value(&self, other: &Self, field: Field) -> bool {
        match field {
            Field::Model => self.model == other.model,
            Field::ModelScale => self.model_scale == other.model_scale,
            Field::DefaultAction => self.default_action == other.default_action,
            Field::ActionSpeed => self.action_speed == other.action_speed,
            Field::IdleDuration => self.idle_duration == other.idle_duration,
            Field::StageLighting => self.stage_lighting == other.stage_lighting,
            Field::StageBackground => self.stage_background == other.stage_background,
            Field::SceneEnvironment => self.scene_environment == other.scene_environment,
            Field::SceneWeather => self.scene_weather == other.scene_weather,
            Field::AppLanguage => self.app_language == other.app_language,
            Field::TouchPromptText => self.touch_prompt_text == other.touch_prompt_text,
            Field::PromptDisplayDuration => {
                self.prompt_display_duration == other.prompt_display_duration
            }
            Field::EnableTouchPrompt => self.enable_touch_prompt == other.enable_touch_prompt,
        }
    }

    pub fn model(&self) -> ModelChoice {
        self.model
    }

    pub fn model_scale(&self) -> f32 {
        self.model_scale
    }

    pub fn default_action(&self) -> DefaultAction {
        self.default_action
    }

    pub fn action_speed(&self) -> f32 {
        self.action_speed
    }

    pub fn idle_duration(&self) -> u32 {
        self.idle_duration
    }

    pub fn stage_lighting(&self) -> StageLighting {
        self.stage_lighting
    }

    pub fn stage_background(&self) -> StageBackground {
        self.stage_background
    }

    pub fn scene_environment(&self) -> SceneEnvironment {
        self.scene_environment
    }

    pub fn scene_weather(&self) -> SceneWeather {
        self.scene_weather
    }

    pub fn app_language(&self) -> AppLanguage {
        self.app_language
    }

    pub fn touch_prompt_text(&self) -> &str {
        &self.touch_prompt_text
    }

    pub fn prompt_display_duration(&self) -> u32 {
        self.prompt_display_duration
    }

    pub fn enable_touch_prompt(&self) -> bool {
        self.enable_touch_prompt
    }
}

fn truncate_prompt(text: String) -> String {
    if text.chars().count() <= TOUCH_PROMPT_MAX_CHARS {
        text
    } else {
        text.chars().take(TOUCH_PROMPT_MAX_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let form = SettingsForm::default();
        assert_eq!(form.model(), ModelChoice::Model1);
        assert_eq!(form.model_scale(), 1.0);
        assert_eq!(form.default_action(), DefaultAction::Dance1);
        assert_eq!(form.idle_duration(), 30);
        assert_eq!(form.app_language(), AppLanguage::ZhCn);
        assert_eq!(form.prompt_display_duration(), 3);
        assert!(!form.enable_touch_prompt());
        assert!(form.changed_fields().is_empty());
    }

    #[test]
    fn test_set_is_independent_per_field() {
        let mut form = SettingsForm::default();
        form.set(FieldUpdate::SceneWeather(SceneWeather::Snow));

        assert_eq!(form.scene_weather(), SceneWeather::Snow);
        assert_eq!(form.changed_fields(), vec![Field::SceneWeather]);
    }

    #[test]
    fn test_numeric_fields_are_clamped() {
        let mut form = SettingsForm::default();
        form.set(FieldUpdate::ModelScale(3.0));
        form.set(FieldUpdate::ActionSpeed(0.1));
        form.set(FieldUpdate::IdleDuration(1000));
        form.set(FieldUpdate::PromptDisplayDuration(-3));

        assert_eq!(form.model_scale(), 2.0);
        assert_eq!(form.action_speed(), 0.5);
        assert_eq!(form.idle_duration(), 300);
        assert_eq!(form.prompt_display_duration(), 1);
    }

    #[test]
    fn test_reset_restores_every_field() {
        let mut form = SettingsForm::default();
        form.set(FieldUpdate::Model(ModelChoice::Model3));
        form.set(FieldUpdate::ModelScale(1.5));
        form.set(FieldUpdate::DefaultAction(DefaultAction::Wave));
        form.set(FieldUpdate::ActionSpeed(1.7));
        form.set(FieldUpdate::IdleDuration(120));
        form.set(FieldUpdate::StageLighting(StageLighting::Spotlight));
        form.set(FieldUpdate::StageBackground(StageBackground::Pattern));
        form.set(FieldUpdate::SceneEnvironment(SceneEnvironment::Space));
        form.set(FieldUpdate::SceneWeather(SceneWeather::Fog));
        form.set(FieldUpdate::AppLanguage(AppLanguage::JaJp));
        form.set(FieldUpdate::TouchPromptText("hello".into()));
        form.set(FieldUpdate::PromptDisplayDuration(8));
        form.set(FieldUpdate::EnableTouchPrompt(true));
        assert_eq!(form.changed_fields().len(), Field::ALL.len());

        form.reset_all();
        assert_eq!(form, SettingsForm::default());
        assert!(form.changed_fields().is_empty());
    }

    #[test]
    fn test_prompt_text_truncated() {
        let mut form = SettingsForm::default();
        form.set(FieldUpdate::TouchPromptText("摸".repeat(TOUCH_PROMPT_MAX_CHARS + 10)));
        assert_eq!(form.touch_prompt_text().chars().count(), TOUCH_PROMPT_MAX_CHARS);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "model": "model2", "model_scale": 9.0 }"#;
        let form: SettingsForm = serde_json::from_str(json).expect("partial form should parse");
        let form = form.normalized();
        assert_eq!(form.model(), ModelChoice::Model2);
        assert_eq!(form.model_scale(), 2.0);
        assert_eq!(form.idle_duration(), 30);
    }
}
