use std::fmt::Display;
use std::str::FromStr;

use crate::error::EngineError;

/// The ten independent capabilities Telegram exposes for group members.
/// The engine only ever computes a full set from a snapshot; it never
/// assumes what the previous state was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionSet {
    pub send_messages: bool,
    pub send_audios: bool,
    pub send_documents: bool,
    pub send_photos: bool,
    pub send_videos: bool,
    pub send_video_notes: bool,
    pub send_voice_notes: bool,
    pub send_polls: bool,
    pub send_other_messages: bool,
    pub add_web_page_previews: bool,
}

impl PermissionSet {
    pub fn allow_all() -> Self {
        PermissionSet {
            send_messages: true,
            send_audios: true,
            send_documents: true,
            send_photos: true,
            send_videos: true,
            send_video_notes: true,
            send_voice_notes: true,
            send_polls: true,
            send_other_messages: true,
            add_web_page_previews: true,
        }
    }
}

/// Current permission snapshot. A capability Telegram did not report is
/// `None` and folds to "allowed", since default group permissions are
/// permissive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionSnapshot {
    pub send_messages: Option<bool>,
    pub send_audios: Option<bool>,
    pub send_documents: Option<bool>,
    pub send_photos: Option<bool>,
    pub send_videos: Option<bool>,
    pub send_video_notes: Option<bool>,
    pub send_voice_notes: Option<bool>,
    pub send_polls: Option<bool>,
    pub send_other_messages: Option<bool>,
    pub add_web_page_previews: Option<bool>,
}

impl PermissionSnapshot {
    pub fn fold_permissive(self) -> PermissionSet {
        PermissionSet {
            send_messages: self.send_messages.unwrap_or(true),
            send_audios: self.send_audios.unwrap_or(true),
            send_documents: self.send_documents.unwrap_or(true),
            send_photos: self.send_photos.unwrap_or(true),
            send_videos: self.send_videos.unwrap_or(true),
            send_video_notes: self.send_video_notes.unwrap_or(true),
            send_voice_notes: self.send_voice_notes.unwrap_or(true),
            send_polls: self.send_polls.unwrap_or(true),
            send_other_messages: self.send_other_messages.unwrap_or(true),
            add_web_page_previews: self.add_web_page_previews.unwrap_or(true),
        }
    }
}

impl From<PermissionSet> for PermissionSnapshot {
    fn from(p: PermissionSet) -> Self {
        PermissionSnapshot {
            send_messages: Some(p.send_messages),
            send_audios: Some(p.send_audios),
            send_documents: Some(p.send_documents),
            send_photos: Some(p.send_photos),
            send_videos: Some(p.send_videos),
            send_video_notes: Some(p.send_video_notes),
            send_voice_notes: Some(p.send_voice_notes),
            send_polls: Some(p.send_polls),
            send_other_messages: Some(p.send_other_messages),
            add_web_page_previews: Some(p.add_web_page_previews),
        }
    }
}

/// What a /lock or /unlock command can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    All,
    Text,
    Stickers,
    Media,
    Images,
    Audio,
}

impl FromStr for Feature {
    type Err = EngineError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Feature::All),
            "text" => Ok(Feature::Text),
            "stickers" => Ok(Feature::Stickers),
            "media" => Ok(Feature::Media),
            "images" => Ok(Feature::Images),
            "audio" => Ok(Feature::Audio),
            other => Err(EngineError::Validation(format!(
                "Invalid feature '{other}'. Choose from: all, text, stickers, media, images, audio."
            ))),
        }
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Feature::All => "ALL",
            Feature::Text => "TEXT",
            Feature::Stickers => "STICKERS",
            Feature::Media => "MEDIA",
            Feature::Images => "IMAGES",
            Feature::Audio => "AUDIO",
        };
        write!(f, "{name}")
    }
}

/// Computes the next group-wide permission set. Capabilities named by the
/// feature are set to `!lock`; everything else keeps its snapshot value.
pub fn compute(feature: Feature, lock: bool, snapshot: PermissionSnapshot) -> PermissionSet {
    let mut next = snapshot.fold_permissive();
    let value = !lock;
    match feature {
        Feature::All => {
            next = PermissionSet {
                send_messages: value,
                send_audios: value,
                send_documents: value,
                send_photos: value,
                send_videos: value,
                send_video_notes: value,
                send_voice_notes: value,
                send_polls: value,
                send_other_messages: value,
                add_web_page_previews: value,
            };
        }
        Feature::Text => next.send_messages = value,
        Feature::Stickers => next.send_other_messages = value,
        Feature::Media => {
            next.send_photos = value;
            next.send_videos = value;
            next.send_documents = value;
            next.send_audios = value;
            next.send_voice_notes = value;
            next.send_video_notes = value;
            next.send_other_messages = value;
        }
        Feature::Images => next.send_photos = value,
        Feature::Audio => {
            next.send_audios = value;
            next.send_voice_notes = value;
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deny_all() -> PermissionSet {
        PermissionSet {
            send_messages: false,
            send_audios: false,
            send_documents: false,
            send_photos: false,
            send_videos: false,
            send_video_notes: false,
            send_voice_notes: false,
            send_polls: false,
            send_other_messages: false,
            add_web_page_previews: false,
        }
    }

    #[test]
    fn lock_all_denies_every_capability() {
        let next = compute(Feature::All, true, PermissionSnapshot::default());
        assert_eq!(next, deny_all());
    }

    #[test]
    fn unlock_all_allows_every_capability() {
        let snapshot = PermissionSnapshot::from(deny_all());
        let next = compute(Feature::All, false, snapshot);
        assert_eq!(next, PermissionSet::allow_all());
    }

    #[test]
    fn lock_audio_touches_only_audio_capabilities() {
        let mut snapshot = PermissionSnapshot::from(PermissionSet::allow_all());
        snapshot.send_polls = Some(false);
        let next = compute(Feature::Audio, true, snapshot);
        assert!(!next.send_audios);
        assert!(!next.send_voice_notes);
        // Untouched fields keep the snapshot value.
        assert!(!next.send_polls);
        assert!(next.send_messages);
        assert!(next.send_photos);
        assert!(next.send_other_messages);
    }

    #[test]
    fn unknown_snapshot_fields_default_to_allowed() {
        let next = compute(Feature::Images, true, PermissionSnapshot::default());
        assert!(!next.send_photos);
        assert!(next.send_messages);
        assert!(next.send_polls);
    }

    #[test]
    fn unrecognized_selector_is_a_validation_error() {
        assert!(matches!(
            "gifs".parse::<Feature>(),
            Err(EngineError::Validation(_))
        ));
        assert_eq!("MEDIA".parse::<Feature>().unwrap(), Feature::Media);
    }
}
