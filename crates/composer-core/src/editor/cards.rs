//! Attachment card skeletons.
//!
//! A new attachment starts as its own template whose body is the empty
//! structure of the chosen card type; the author fills the properties in.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Hero,
    Thumbnail,
    Signin,
    Animation,
    Video,
    Audio,
}

impl CardKind {
    pub const ALL: [CardKind; 6] = [
        CardKind::Hero,
        CardKind::Thumbnail,
        CardKind::Signin,
        CardKind::Animation,
        CardKind::Video,
        CardKind::Audio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Hero => "hero",
            CardKind::Thumbnail => "thumbnail",
            CardKind::Signin => "signin",
            CardKind::Animation => "animation",
            CardKind::Video => "video",
            CardKind::Audio => "audio",
        }
    }

    /// Structure type written in the card header.
    pub fn structure_type(&self) -> &'static str {
        match self {
            CardKind::Hero => "HeroCard",
            CardKind::Thumbnail => "ThumbnailCard",
            CardKind::Signin => "SigninCard",
            CardKind::Animation => "AnimationCard",
            CardKind::Video => "VideoCard",
            CardKind::Audio => "AudioCard",
        }
    }

    fn properties(&self) -> &'static [&'static str] {
        match self {
            CardKind::Hero => &["title", "subtitle", "text", "images", "buttons"],
            CardKind::Thumbnail => &["title", "subtitle", "text", "image", "buttons"],
            CardKind::Signin => &["text", "buttons"],
            CardKind::Animation => &["title", "subtitle", "image", "media"],
            CardKind::Video | CardKind::Audio => {
                &["title", "subtitle", "text", "image", "media", "buttons"]
            }
        }
    }

    /// Empty card body with one blank line per card property.
    pub fn skeleton(&self) -> String {
        let mut body = format!("[{}\n", self.structure_type());
        for property in self.properties() {
            body.push_str("    ");
            body.push_str(property);
            body.push_str(" =\n");
        }
        body.push(']');
        body
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown card kind: {s}"))
    }
}
