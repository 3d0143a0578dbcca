//! Internationalization (i18n) Support
//!
//! Translation lookup for the GUI. Built-in catalogs cover the three app
//! languages; a `deskpet.json` file in a locale directory can override any key.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, info, warn};

/// Language used before anything calls [`set_language`]
pub const DEFAULT_LANGUAGE: &str = "zh-CN";

/// Current active language
static CURRENT_LANG: RwLock<String> = RwLock::new(String::new());

/// Loaded overrides (language -> key -> value)
static OVERRIDES: RwLock<Option<HashMap<String, HashMap<String, String>>>> = RwLock::new(None);

const ZH_CN: &[(&str, &str)] = &[
    ("app.title", "桌面伙伴"),
    ("window.settings", "设置"),
    ("window.todo", "待办"),
    ("window.markdown", "笔记"),
    ("home.heading", "欢迎使用桌面伙伴"),
    ("home.hint", "在任意位置点击右键打开菜单。"),
    ("menu.settings", "设置"),
    ("tray.show", "显示窗口"),
    ("tray.hide", "隐藏窗口"),
    ("tray.quit", "退出"),
    ("settings.title", "设置"),
    ("settings.reset", "↩ 重置"),
    ("settings.save", "💾 保存"),
    ("settings.close", "✕"),
    ("section.model", "3D 模型"),
    ("section.action", "默认动作"),
    ("section.idle_time", "静止播放时间"),
    ("section.stage", "舞台设置"),
    ("section.scene", "场景设置"),
    ("section.language", "语言设置"),
    ("section.touch_prompt", "触碰提示"),
    ("heading.model", "3D 模型设置"),
    ("heading.action", "默认动作设置"),
    ("heading.idle_time", "静止播放时间设置"),
    ("heading.stage", "舞台设置"),
    ("heading.scene", "场景设置"),
    ("heading.language", "语言设置"),
    ("heading.touch_prompt", "触碰自定义提示设置"),
    ("field.model", "选择模型:"),
    ("field.model_scale", "模型缩放:"),
    ("field.default_action", "选择默认动作:"),
    ("field.action_speed", "动作速度:"),
    ("field.idle_duration", "静止多久后开始播放动作 (秒):"),
    ("field.stage_lighting", "舞台灯光:"),
    ("field.stage_background", "舞台背景:"),
    ("field.scene_environment", "选择场景环境:"),
    ("field.scene_weather", "天气效果:"),
    ("field.app_language", "应用程序语言:"),
    ("field.touch_prompt_text", "自定义提示文本:"),
    ("field.prompt_display_duration", "提示显示时长 (秒):"),
    ("field.enable_touch_prompt", "启用触碰提示"),
    ("hint.idle_duration", "此设置决定了当模型静止不动时，经过多长时间后会自动播放预设的默认动作。"),
    ("hint.app_language", "更改应用程序的显示语言。"),
    ("hint.touch_prompt_text", "输入当用户触碰模型时显示的提示信息..."),
    ("option.model.model1", "模型 A"),
    ("option.model.model2", "模型 B"),
    ("option.model.model3", "模型 C"),
    ("option.action.dance1", "舞蹈 A"),
    ("option.action.dance2", "舞蹈 B"),
    ("option.action.idle", "静止"),
    ("option.action.wave", "挥手"),
    ("option.lighting.bright", "明亮"),
    ("option.lighting.dim", "昏暗"),
    ("option.lighting.spotlight", "聚光灯"),
    ("option.background.plain", "纯色"),
    ("option.background.gradient", "渐变"),
    ("option.background.pattern", "图案"),
    ("option.environment.forest", "森林"),
    ("option.environment.city", "城市"),
    ("option.environment.space", "太空"),
    ("option.environment.desert", "沙漠"),
    ("option.weather.none", "无"),
    ("option.weather.rain", "下雨"),
    ("option.weather.snow", "下雪"),
    ("option.weather.fog", "雾"),
    ("ack.reset", "所有设置已重置为默认值！"),
    ("ack.saved", "设置已保存！"),
    ("ack.save_failed", "设置保存失败"),
    ("todo.body", "TODO 页面内容"),
];

const EN_US: &[(&str, &str)] = &[
    ("app.title", "Deskpet"),
    ("window.settings", "Settings"),
    ("window.todo", "Todo"),
    ("window.markdown", "Notes"),
    ("home.heading", "Welcome to Deskpet"),
    ("home.hint", "Right-click anywhere to open the menu."),
    ("menu.settings", "Settings"),
    ("tray.show", "Show Window"),
    ("tray.hide", "Hide Window"),
    ("tray.quit", "Quit"),
    ("settings.title", "Settings"),
    ("settings.reset", "↩ Reset"),
    ("settings.save", "💾 Save"),
    ("settings.close", "✕"),
    ("section.model", "3D Model"),
    ("section.action", "Default Action"),
    ("section.idle_time", "Idle Timing"),
    ("section.stage", "Stage"),
    ("section.scene", "Scene"),
    ("section.language", "Language"),
    ("section.touch_prompt", "Touch Prompt"),
    ("heading.model", "3D Model Settings"),
    ("heading.action", "Default Action Settings"),
    ("heading.idle_time", "Idle Timing Settings"),
    ("heading.stage", "Stage Settings"),
    ("heading.scene", "Scene Settings"),
    ("heading.language", "Language Settings"),
    ("heading.touch_prompt", "Touch Prompt Settings"),
    ("field.model", "Model:"),
    ("field.model_scale", "Model scale:"),
    ("field.default_action", "Default action:"),
    ("field.action_speed", "Action speed:"),
    ("field.idle_duration", "Play the action after idling for (s):"),
    ("field.stage_lighting", "Stage lighting:"),
    ("field.stage_background", "Stage background:"),
    ("field.scene_environment", "Environment:"),
    ("field.scene_weather", "Weather:"),
    ("field.app_language", "Application language:"),
    ("field.touch_prompt_text", "Prompt text:"),
    ("field.prompt_display_duration", "Prompt display time (s):"),
    ("field.enable_touch_prompt", "Enable touch prompt"),
    ("hint.idle_duration", "How long the model stays still before the default action plays."),
    ("hint.app_language", "Changes the display language of the application."),
    ("hint.touch_prompt_text", "Text shown when the model is touched..."),
    ("option.model.model1", "Model A"),
    ("option.model.model2", "Model B"),
    ("option.model.model3", "Model C"),
    ("option.action.dance1", "Dance A"),
    ("option.action.dance2", "Dance B"),
    ("option.action.idle", "Idle"),
    ("option.action.wave", "Wave"),
    ("option.lighting.bright", "Bright"),
    ("option.lighting.dim", "Dim"),
    ("option.lighting.spotlight", "Spotlight"),
    ("option.background.plain", "Plain"),
    ("option.background.gradient", "Gradient"),
    ("option.background.pattern", "Pattern"),
    ("option.environment.forest", "Forest"),
    ("option.environment.city", "City"),
    ("option.environment.space", "Space"),
    ("option.environment.desert", "Desert"),
    ("option.weather.none", "None"),
    ("option.weather.rain", "Rain"),
    ("option.weather.snow", "Snow"),
    ("option.weather.fog", "Fog"),
    ("ack.reset", "All settings were reset to their defaults!"),
    ("ack.saved", "Settings saved!"),
    ("ack.save_failed", "Could not save settings"),
    ("todo.body", "TODO page content"),
];

const JA_JP: &[(&str, &str)] = &[
    ("app.title", "デスクペット"),
    ("window.settings", "設定"),
    ("window.todo", "ToDo"),
    ("window.markdown", "ノート"),
    ("home.heading", "デスクペットへようこそ"),
    ("home.hint", "右クリックでメニューを開きます。"),
    ("menu.settings", "設定"),
    ("tray.show", "ウィンドウを表示"),
    ("tray.hide", "ウィンドウを隠す"),
    ("tray.quit", "終了"),
    ("settings.title", "設定"),
    ("settings.reset", "↩ リセット"),
    ("settings.save", "💾 保存"),
    ("settings.close", "✕"),
    ("section.model", "3D モデル"),
    ("section.action", "デフォルト動作"),
    ("section.idle_time", "待機時間"),
    ("section.stage", "ステージ"),
    ("section.scene", "シーン"),
    ("section.language", "言語"),
    ("section.touch_prompt", "タッチ表示"),
    ("heading.model", "3D モデル設定"),
    ("heading.action", "デフォルト動作設定"),
    ("heading.idle_time", "待機時間設定"),
    ("heading.stage", "ステージ設定"),
    ("heading.scene", "シーン設定"),
    ("heading.language", "言語設定"),
    ("heading.touch_prompt", "タッチ表示設定"),
    ("field.model", "モデル:"),
    ("field.model_scale", "モデルの拡大率:"),
    ("field.default_action", "デフォルト動作:"),
    ("field.action_speed", "動作速度:"),
    ("field.idle_duration", "動作を再生するまでの待機時間 (秒):"),
    ("field.stage_lighting", "照明:"),
    ("field.stage_background", "背景:"),
    ("field.scene_environment", "環境:"),
    ("field.scene_weather", "天気:"),
    ("field.app_language", "表示言語:"),
    ("field.touch_prompt_text", "表示テキスト:"),
    ("field.prompt_display_duration", "表示時間 (秒):"),
    ("field.enable_touch_prompt", "タッチ表示を有効にする"),
    ("hint.idle_duration", "モデルが静止してからデフォルト動作を再生するまでの時間です。"),
    ("hint.app_language", "アプリケーションの表示言語を変更します。"),
    ("hint.touch_prompt_text", "モデルに触れたときに表示するテキスト..."),
    ("option.model.model1", "モデル A"),
    ("option.model.model2", "モデル B"),
    ("option.model.model3", "モデル C"),
    ("option.action.dance1", "ダンス A"),
    ("option.action.dance2", "ダンス B"),
    ("option.action.idle", "静止"),
    ("option.action.wave", "手を振る"),
    ("option.lighting.bright", "明るい"),
    ("option.lighting.dim", "暗い"),
    ("option.lighting.spotlight", "スポットライト"),
    ("option.background.plain", "単色"),
    ("option.background.gradient", "グラデーション"),
    ("option.background.pattern", "パターン"),
    ("option.environment.forest", "森"),
    ("option.environment.city", "都市"),
    ("option.environment.space", "宇宙"),
    ("option.environment.desert", "砂漠"),
    ("option.weather.none", "なし"),
    ("option.weather.rain", "雨"),
    ("option.weather.snow", "雪"),
    ("option.weather.fog", "霧"),
    ("ack.reset", "すべての設定を初期値に戻しました！"),
    ("ack.saved", "設定を保存しました！"),
    ("ack.save_failed", "設定を保存できませんでした"),
    ("todo.body", "TODO ページの内容"),
];

/// Initialize the active language, defaulting to [`DEFAULT_LANGUAGE`]
pub fn init(lang: Option<&str>) {
    set_language(lang.unwrap_or(DEFAULT_LANGUAGE));
}

/// Set the active language
pub fn set_language(lang: &str) {
    {
        let mut current = CURRENT_LANG.write().unwrap_or_else(|e| e.into_inner());
        if *current == lang {
            return;
        }
        *current = lang.to_string();
    }
    info!("🌐 Language set to: {}", lang);

    load_overrides(lang);
}

/// Get the current language
pub fn current_language() -> String {
    let current = CURRENT_LANG.read().unwrap_or_else(|e| e.into_inner());
    if current.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        current.clone()
    }
}

/// Translate a key in the current language
pub fn tr(key: &str) -> String {
    translate(&current_language(), key)
}

/// Translate a key in a given language: override file, then built-in catalog,
/// then the key itself
pub fn translate(lang: &str, key: &str) -> String {
    let overrides = OVERRIDES.read().unwrap_or_else(|e| e.into_inner());
    if let Some(value) = overrides
        .as_ref()
        .and_then(|all| all.get(lang))
        .and_then(|t| t.get(key))
    {
        return value.clone();
    }

    builtin(lang, key).unwrap_or(key).to_string()
}

fn builtin(lang: &str, key: &str) -> Option<&'static str> {
    let catalog = match lang {
        "zh-CN" => ZH_CN,
        "en-US" => EN_US,
        "ja-JP" => JA_JP,
        _ => return None,
    };
    catalog.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Directories searched for `<lang>/LC_MESSAGES/deskpet.json`
fn locale_dirs() -> Vec<PathBuf> {
    let mut search = Vec::new();
    if let Some(data) = dirs::data_local_dir() {
        search.push(data.join("deskpet/locale"));
    }
    search.push(PathBuf::from("/usr/local/share/locale"));
    search.push(PathBuf::from("locale"));
    search
}

fn load_overrides(lang: &str) {
    load_overrides_from(&locale_dirs(), lang);
}

/// Load override translations for `lang`. The first readable file wins.
fn load_overrides_from(search: &[PathBuf], lang: &str) {
    for dir in search {
        let path = dir.join(format!("{}/LC_MESSAGES/deskpet.json", lang));
        if !path.exists() {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        match serde_json::from_str::<HashMap<String, String>>(&content) {
            Ok(trans) => {
                debug!("Loaded {} override translations for '{}'", trans.len(), lang);
                let mut all = OVERRIDES.write().unwrap_or_else(|e| e.into_inner());
                all.get_or_insert_with(HashMap::new)
                    .insert(lang.to_string(), trans);
                return;
            }
            Err(e) => warn!("Ignoring malformed {}: {}", path.display(), e),
        }
    }

    debug!("No override translations for '{}'", lang);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(translate("en-US", "menu.settings"), "Settings");
        assert_eq!(translate("zh-CN", "menu.settings"), "设置");
        assert_eq!(translate("ja-JP", "option.weather.fog"), "霧");
    }

    #[test]
    fn test_translation_fallback() {
        assert_eq!(translate("en-US", "unknown_key"), "unknown_key");
        assert_eq!(translate("fr-FR", "menu.settings"), "menu.settings");
    }

    #[test]
    fn test_catalogs_have_the_same_keys() {
        for (key, _) in ZH_CN {
            assert!(builtin("en-US", key).is_some(), "en-US is missing {}", key);
            assert!(builtin("ja-JP", key).is_some(), "ja-JP is missing {}", key);
        }
        assert_eq!(ZH_CN.len(), EN_US.len());
        assert_eq!(ZH_CN.len(), JA_JP.len());
    }

    #[test]
    fn test_overrides_read_from_locale_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let messages = dir.path().join("xx-TEST/LC_MESSAGES");
        std::fs::create_dir_all(&messages).unwrap();
        std::fs::write(
            messages.join("deskpet.json"),
            r#"{"menu.settings": "Réglages"}"#,
        )
        .unwrap();

        let missing = dir.path().join("nowhere");
        load_overrides_from(&[missing, dir.path().to_path_buf()], "xx-TEST");

        assert_eq!(translate("xx-TEST", "menu.settings"), "Réglages");
        // Keys absent from the file fall back to the key itself
        assert_eq!(translate("xx-TEST", "settings.save"), "settings.save");
    }

    #[test]
    fn test_malformed_override_is_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        let messages = dir.path().join("yy-TEST/LC_MESSAGES");
        std::fs::create_dir_all(&messages).unwrap();
        std::fs::write(messages.join("deskpet.json"), "not json").unwrap();

        load_overrides_from(&[dir.path().to_path_buf()], "yy-TEST");
        assert_eq!(translate("yy-TEST", "menu.settings"), "menu.settings");
    }
}
