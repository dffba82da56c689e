// Path-keyed texture and sound handles

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Key for an asset path relative to the asset root.
///
/// FNV-1a over the path bytes, so the same path maps to the same key in
/// every build and on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(u64);

impl AssetId {
    pub const fn from_path(path: &str) -> Self {
        let bytes = path.as_bytes();
        let mut hash = FNV_OFFSET;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

macro_rules! path_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(AssetId);

        impl $name {
            pub const fn from_path(path: &str) -> Self {
                Self(AssetId::from_path(path))
            }

            pub fn id(&self) -> AssetId {
                self.0
            }
        }
    };
}

path_handle!(
    /// A sprite sheet or tile image the renderer looks up by key
    TextureHandle
);
path_handle!(
    /// A sound file the audio backend looks up by key
    SoundHandle
);
