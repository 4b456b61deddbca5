//! Palette lookup tables
//!
//! The fixed sets of color, shape and icon tags a note or folder can carry.
//! Tags travel as plain strings in persisted state and backups. An unknown
//! tag decodes to the table's default instead of failing the whole document,
//! matching how cards fall back to `slate` and `file-text` when rendering.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! tag_table {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, {
            $($variant:ident => $tag:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every tag in the table, in display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire form of the tag
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }

            /// Look up a tag by its wire form
            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $($tag => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let tag = String::deserialize(deserializer)?;
                Ok($name::from_tag(&tag).unwrap_or_else(|| {
                    tracing::warn!(
                        "Unknown {} tag {:?}, falling back to {}",
                        stringify!($name),
                        tag,
                        $name::default()
                    );
                    $name::default()
                }))
            }
        }
    };
}

tag_table! {
    /// Color theme of a card
    Color, default = Slate, {
        Rose => "rose",
        Blue => "blue",
        Green => "green",
        Yellow => "yellow",
        Violet => "violet",
        Orange => "orange",
        Slate => "slate",
        Teal => "teal",
        Cyan => "cyan",
        Lime => "lime",
        Fuchsia => "fuchsia",
        Emerald => "emerald",
        Indigo => "indigo",
        Stone => "stone",
        Neutral => "neutral",
        Mint => "mint",
        Graphite => "graphite",
        Cherry => "cherry",
        Gold => "gold",
        Lavender => "lavender",
        Sky => "sky",
        Salmon => "salmon",
        Charcoal => "charcoal",
        Coffee => "coffee",
        Lilac => "lilac",
    }
}

tag_table! {
    /// Corner shape of a card. The wire form is the style token the
    /// renderer applies verbatim.
    Shape, default = Petal, {
        Rounded => "rounded-3xl",
        TopArch => "rounded-t-[3rem] rounded-b-2xl",
        LeafRight => "rounded-tr-[4rem] rounded-bl-[4rem] rounded-tl-xl rounded-br-xl",
        LeafLeft => "rounded-tl-[4rem] rounded-br-[4rem] rounded-tr-xl rounded-bl-xl",
        Petal => "rounded-tl-[2.5rem] rounded-br-[2.5rem] rounded-tr-xl rounded-bl-xl",
        BottomArch => "rounded-t-xl rounded-b-[4rem]",
        RightArch => "rounded-l-xl rounded-r-[4rem]",
        SoftLeaf => "rounded-tl-3xl rounded-br-3xl rounded-tr-md rounded-bl-md",
        NotchTopRight => "rounded-[2rem] rounded-tr-none",
        NotchBottomLeft => "rounded-[2.5rem] rounded-bl-none",
        Dome => "rounded-[3rem] rounded-t-lg",
        Wave => "rounded-[1.5rem] rounded-tr-[5rem]",
        Squircle => "rounded-2xl",
        Kite => "rounded-none rounded-tr-3xl rounded-bl-3xl",
        Lens => "rounded-[4rem] rounded-tr-none rounded-bl-none",
        Bullet => "rounded-t-full rounded-b-lg",
        Drop => "rounded-b-full rounded-t-lg",
        Blade => "rounded-tl-[3rem] rounded-br-[3rem] rounded-tr-none rounded-bl-none",
        Diamond => "rounded-[2rem] rounded-tl-none rounded-br-none",
        LeftPill => "rounded-l-[3rem] rounded-r-lg",
        RightPill => "rounded-r-[3rem] rounded-l-lg",
        Tag => "rounded-[3rem] rounded-br-lg",
        TailRight => "rounded-tl-2xl rounded-tr-2xl rounded-bl-2xl rounded-br-[4rem]",
        TailLeft => "rounded-tl-2xl rounded-tr-2xl rounded-br-2xl rounded-bl-[4rem]",
        Card => "rounded-lg",
        Pill => "rounded-[50px]",
    }
}

tag_table! {
    /// Watermark icon of a note card
    Icon, default = FileText, {
        FileText => "file-text",
        Star => "star",
        Heart => "heart",
        Zap => "zap",
        Coffee => "coffee",
        Sun => "sun",
        Moon => "moon",
        Cloud => "cloud",
        Music => "music",
        Camera => "camera",
        MapPin => "map-pin",
        Smile => "smile",
        Folder => "folder",
        Book => "book",
        Anchor => "anchor",
        Feather => "feather",
        Key => "key",
        Gift => "gift",
        Bell => "bell",
        Crown => "crown",
        Gamepad => "gamepad",
        Headphones => "headphones",
        Umbrella => "umbrella",
        Scissors => "scissors",
        Atom => "atom",
        Flask => "flask",
        Dna => "dna",
        Microscope => "microscope",
        Calculator => "calculator",
        Sigma => "sigma",
        Brain => "brain",
        Globe => "globe",
        Hourglass => "hourglass",
        Compass => "compass",
        Telescope => "telescope",
        GradCap => "grad-cap",
    }
}

impl Shape {
    /// Shapes offered in the folder style picker
    pub fn folder_choices() -> &'static [Shape] {
        &Shape::ALL[..9]
    }
}
