//! Scene configuration: which effect to run and the two theme colors
//!
//! Scenes come from persisted invitation data. Three JSON shapes are accepted:
//! an invitation document (colors and animation under `customStyles`), a
//! theme document (`primaryColor`/`accentColor` at the top level), or a flat
//! scene document with `animation` next to the colors.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{DEFAULT_ACCENT, DEFAULT_PRIMARY, Rgba};
use crate::effects::EffectKind;
use crate::error::{FxError, FxResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    #[serde(default, with = "lossy_effect")]
    pub animation: EffectKind,
    #[serde(default = "default_primary")]
    pub primary_color: Rgba,
    #[serde(default = "default_accent")]
    pub accent_color: Rgba,
}

fn default_primary() -> Rgba {
    DEFAULT_PRIMARY
}

fn default_accent() -> Rgba {
    DEFAULT_ACCENT
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            animation: EffectKind::None,
            primary_color: DEFAULT_PRIMARY,
            accent_color: DEFAULT_ACCENT,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvitationDocument {
    #[serde(default)]
    custom_styles: Option<SceneConfig>,
}

impl SceneConfig {
    pub fn new(animation: EffectKind, primary_color: Rgba, accent_color: Rgba) -> Self {
        Self {
            animation,
            primary_color,
            accent_color,
        }
    }

    /// Parse any of the accepted document shapes
    pub fn from_json(payload: &str) -> FxResult<Self> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        if value.get("customStyles").is_some() {
            let invitation: InvitationDocument = serde_json::from_value(value)?;
            Ok(invitation.custom_styles.unwrap_or_default())
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }

    pub fn load(path: &Path) -> FxResult<Self> {
        let payload = fs::read_to_string(path).map_err(|source| FxError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_json(&payload)?;
        log::debug!("loaded scene {:?} from {}", scene, path.display());
        Ok(scene)
    }
}

/// Effect names as strings; unknown or missing names mean idle
mod lossy_effect {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::effects::EffectKind;

    pub fn serialize<S: Serializer>(kind: &EffectKind, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(kind.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EffectKind, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.as_deref().map_or(EffectKind::None, EffectKind::from_name_lossy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invitation_document() {
        let payload = r##"{
            "title": "Ana & Luis",
            "eventType": "wedding",
            "slug": "ana-luis",
            "customStyles": {
                "primaryColor": "#e91e63",
                "accentColor": "#ffd700",
                "fontFamily": "Playfair Display",
                "animation": "hearts"
            }
        }"##;
        let scene = SceneConfig::from_json(payload).unwrap();
        assert_eq!(scene.animation, EffectKind::Hearts);
        assert_eq!(scene.primary_color, Rgba::hex(0xe91e63));
        assert_eq!(scene.accent_color, Rgba::hex(0xffd700));
    }

    #[test]
    fn test_invitation_without_styles_uses_defaults() {
        let scene = SceneConfig::from_json(r#"{"title": "Party", "customStyles": null}"#).unwrap();
        assert_eq!(scene, SceneConfig::default());

        let scene = SceneConfig::from_json(r#"{"customStyles": {"animation": "stars"}}"#).unwrap();
        assert_eq!(scene.animation, EffectKind::Stars);
        assert_eq!(scene.primary_color, DEFAULT_PRIMARY);
        assert_eq!(scene.accent_color, DEFAULT_ACCENT);
    }

    #[test]
    fn test_theme_document() {
        let payload = r##"{"name": "Sunset", "primaryColor": "#ff8c00", "accentColor": "rgb(118, 75, 162)", "isDefault": false}"##;
        let scene = SceneConfig::from_json(payload).unwrap();
        assert_eq!(scene.animation, EffectKind::None);
        assert_eq!(scene.primary_color, Rgba::hex(0xff8c00));
        assert_eq!(scene.accent_color, DEFAULT_ACCENT);
    }

    #[test]
    fn test_unknown_animation_is_idle() {
        let scene = SceneConfig::from_json(r#"{"animation": "snowflakes"}"#).unwrap();
        assert_eq!(scene.animation, EffectKind::None);
        let scene = SceneConfig::from_json(r#"{"animation": null}"#).unwrap();
        assert_eq!(scene.animation, EffectKind::None);
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        let err = SceneConfig::from_json(r#"{"primaryColor": "chartreuse-ish"}"#).unwrap_err();
        assert!(matches!(err, FxError::Json(_)));
    }

    #[test]
    fn test_serializes_flat_shape() {
        let scene = SceneConfig::new(EffectKind::Fireworks, Rgba::hex(0x112233), Rgba::hex(0x445566));
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "animation": "fireworks",
                "primaryColor": "#112233",
                "accentColor": "#445566"
            })
        );
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = SceneConfig::load(Path::new("/nonexistent/invite-fx/scene.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/invite-fx/scene.json"));
    }
}
