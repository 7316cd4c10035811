//! Player appearance record
//!
//! Persisted separately from Progress in LocalStorage. Purely cosmetic:
//! the presentation layer derives a `PlayerStyle` from it and draws with
//! that. No gameplay effect.

use serde::{Deserialize, Serialize};

/// Outfit variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Outfit {
    #[default]
    Tactical,
    Scientist,
    Rebel,
}

impl Outfit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outfit::Tactical => "tactical",
            Outfit::Scientist => "scientist",
            Outfit::Rebel => "rebel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tactical" => Some(Outfit::Tactical),
            "scientist" => Some(Outfit::Scientist),
            "rebel" => Some(Outfit::Rebel),
            _ => None,
        }
    }

    /// Torso color for this outfit
    pub fn color(&self) -> &'static str {
        match self {
            Outfit::Tactical => "#1a1a1a",
            Outfit::Scientist => "#d0d0d0",
            Outfit::Rebel => "#660000",
        }
    }
}

/// Persisted appearance choices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customization {
    /// CSS color for the head
    pub skin: String,
    /// CSS color for the eyes
    pub eyes: String,
    pub outfit: Outfit,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            skin: "#4e9af1".to_string(),
            eyes: "#ffffff".to_string(),
            outfit: Outfit::Tactical,
        }
    }
}

impl Customization {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gunrun_custom";

    /// Load customization from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(custom) => return custom,
                    Err(e) => log::warn!("Corrupt customization record, using defaults: {e}"),
                }
            }
        }

        Self::default()
    }

    /// Save customization to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Customization saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Resolved draw colors for the player
///
/// Selected from customization data up front; the renderer never
/// consults the record directly.
#[derive(Debug, Clone)]
pub struct PlayerStyle {
    pub skin: String,
    pub eyes: String,
    pub torso: &'static str,
}

impl PlayerStyle {
    pub fn from_customization(custom: &Customization) -> Self {
        Self {
            skin: custom.skin.clone(),
            eyes: custom.eyes.clone(),
            torso: custom.outfit.color(),
        }
    }
}

impl Default for PlayerStyle {
    fn default() -> Self {
        Self::from_customization(&Customization::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Customization::default();
        assert_eq!(c.skin, "#4e9af1");
        assert_eq!(c.eyes, "#ffffff");
        assert_eq!(c.outfit, Outfit::Tactical);
    }

    #[test]
    fn test_outfit_round_trip() {
        for outfit in [Outfit::Tactical, Outfit::Scientist, Outfit::Rebel] {
            assert_eq!(Outfit::from_str(outfit.as_str()), Some(outfit));
        }
        assert_eq!(Outfit::from_str("clown"), None);
    }

    #[test]
    fn test_style_selects_outfit_color() {
        let custom = Customization {
            outfit: Outfit::Rebel,
            ..Default::default()
        };
        let style = PlayerStyle::from_customization(&custom);
        assert_eq!(style.torso, "#660000");
        assert_eq!(style.skin, "#4e9af1");
    }

    #[test]
    fn test_json_round_trip() {
        let custom = Customization {
            skin: "#112233".to_string(),
            eyes: "#aabbcc".to_string(),
            outfit: Outfit::Scientist,
        };
        let json = serde_json::to_string(&custom).unwrap();
        let back: Customization = serde_json::from_str(&json).unwrap();
        assert_eq!(back.skin, custom.skin);
        assert_eq!(back.outfit, Outfit::Scientist);
    }
}
