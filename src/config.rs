use anyhow::Result;
use serde::Deserialize;

use crate::parse::FilenamePolicy;
use crate::session::MachineConfig;
use crate::thumbnail::ThumbnailSpec;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub limits: LimitsConfig,
    pub filename: FilenameConfig,
    pub locale: LocaleConfig,
    pub thumbnail: ThumbnailConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted audio upload, in MiB.
    pub max_audio_mib: u64,
    /// Maximum accepted thumbnail source, in MiB.
    pub max_image_mib: u64,
    /// Maximum length of title/artist/album/genre values.
    pub max_tag_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilenameConfig {
    pub max_length: usize,
    /// Accepted audio extensions, without the leading dot.
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub catalog_path: String,
    pub default_language: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "tagtrim".to_string(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_audio_mib: 40,
            max_image_mib: 5,
            max_tag_length: 64,
        }
    }
}

impl Default for FilenameConfig {
    fn default() -> Self {
        let policy = FilenamePolicy::default();
        Self {
            max_length: policy.max_length,
            allowed_extensions: policy.allowed_extensions,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            catalog_path: "locales/messages.json".to_string(),
            default_language: "en".to_string(),
        }
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        let spec = ThumbnailSpec::default();
        Self {
            max_width: spec.max_width,
            max_height: spec.max_height,
            quality: spec.quality,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn filename_policy(&self) -> FilenamePolicy {
        FilenamePolicy {
            max_length: self.filename.max_length,
            allowed_extensions: self.filename.allowed_extensions.clone(),
        }
    }

    pub fn thumbnail_spec(&self) -> ThumbnailSpec {
        ThumbnailSpec {
            max_width: self.thumbnail.max_width,
            max_height: self.thumbnail.max_height,
            quality: self.thumbnail.quality,
        }
    }

    pub fn machine_config(&self) -> MachineConfig {
        MachineConfig {
            max_tag_length: self.limits.max_tag_length,
            max_image_mib: self.limits.max_image_mib,
            max_audio_mib: self.limits.max_audio_mib,
            filename: self.filename_policy(),
            thumbnail: self.thumbnail_spec(),
            default_language: self.locale.default_language.clone(),
        }
    }
}
