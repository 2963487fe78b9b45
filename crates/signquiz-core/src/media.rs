//! Image reference resolution for options that carry no explicit image.
//!
//! Catalog content may omit media paths and rely on a naming convention
//! instead. The convention is an [`ImageResolver`] handed to the catalog by
//! whoever supplies it; the controller never sees it.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::model::{ImageOption, OptionId};

/// Derives an image reference from an option id.
pub trait ImageResolver: Send + Sync {
    fn resolve(&self, option_id: OptionId) -> String;
}

impl<F> ImageResolver for F
where
    F: Fn(OptionId) -> String + Send + Sync,
{
    fn resolve(&self, option_id: OptionId) -> String {
        self(option_id)
    }
}

/// Gloss images stored as `{base_path}/{id}.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossImages {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_base_path() -> String {
    "/glosses".to_string()
}

fn default_extension() -> String {
    "jpg".to_string()
}

impl Default for GlossImages {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            extension: default_extension(),
        }
    }
}

impl ImageResolver for GlossImages {
    fn resolve(&self, option_id: OptionId) -> String {
        format!(
            "{}/{}.{}",
            self.base_path.trim_end_matches('/'),
            option_id,
            self.extension.trim_start_matches('.')
        )
    }
}

/// The option's explicit image, or the resolver's derivation.
pub fn image_for<'a>(option: &'a ImageOption, resolver: &dyn ImageResolver) -> Cow<'a, str> {
    match &option.image_url {
        Some(url) => Cow::Borrowed(url.as_str()),
        None => Cow::Owned(resolver.resolve(option.id)),
    }
}
