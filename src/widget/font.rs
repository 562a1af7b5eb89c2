use egui::{FontData, FontDefinitions, FontFamily, FontId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::FontError;

pub const DEFAULT_FAMILY: &str = "Arial";
pub const DEFAULT_SIZE: u32 = 10;

/// Font requested by a layout component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub size: u32,
    pub bold: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: DEFAULT_FAMILY.into(),
            size: DEFAULT_SIZE,
            bold: false,
        }
    }
}

impl FontSpec {
    /// Size after applying a uniform scale factor, never below one point.
    pub fn scaled_size(&self, scale: f32) -> Result<u32, FontError> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(FontError::InvalidSize(scale));
        }
        Ok(((self.size as f32 * scale).floor() as u32).max(1))
    }
}

/// Maps layout family names onto egui font families.
///
/// Common desktop family names fold into egui's built-in proportional and
/// monospace families; anything else has to be registered first.
pub struct FontBook {
    families: HashMap<String, FontFamily>,
    definitions: FontDefinitions,
    dirty: bool,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    pub fn new() -> Self {
        let mut families = HashMap::new();
        for name in [
            "arial",
            "helvetica",
            "segoe ui",
            "roboto",
            "verdana",
            "tahoma",
            "ubuntu",
            "sans",
            "sans-serif",
        ] {
            families.insert(name.to_owned(), FontFamily::Proportional);
        }
        for name in ["courier", "courier new", "consolas", "menlo", "monospace"] {
            families.insert(name.to_owned(), FontFamily::Monospace);
        }
        Self {
            families,
            definitions: FontDefinitions::default(),
            dirty: false,
        }
    }

    pub fn family(&self, name: &str) -> Result<FontFamily, FontError> {
        self.families
            .get(&name.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| FontError::UnknownFamily(name.to_owned()))
    }

    /// Resolves `spec.family` at `size`.
    ///
    /// On failure the returned error carries the reason and the caller is
    /// expected to fall back to [`FontBook::fallback`].
    pub fn font_id(&self, spec: &FontSpec, size: u32) -> Result<FontId, FontError> {
        if size == 0 {
            return Err(FontError::InvalidSize(0.0));
        }
        let family = self.family(&spec.family)?;
        Ok(FontId::new(size as f32, family))
    }

    pub fn fallback(size: u32) -> FontId {
        FontId::proportional(size.max(1) as f32)
    }

    /// Adds a font file under `name` so layouts can reference it as `fontFamily`.
    ///
    /// The bytes are parsed up front; egui would panic on them at the next frame.
    pub fn register(&mut self, name: &str, bytes: Vec<u8>) -> Result<(), FontError> {
        if let Err(e) = ab_glyph::FontRef::try_from_slice(&bytes) {
            return Err(FontError::InvalidFontData {
                name: name.to_owned(),
                reason: e.to_string(),
            });
        }
        self.definitions
            .font_data
            .insert(name.to_owned(), Arc::new(FontData::from_owned(bytes)));
        let mut chain = self
            .definitions
            .families
            .get(&FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();
        chain.insert(0, name.to_owned());
        let family = FontFamily::Name(name.into());
        self.definitions.families.insert(family.clone(), chain);
        self.families.insert(name.trim().to_lowercase(), family);
        self.dirty = true;
        Ok(())
    }

    /// Font definitions to hand to the context, if a font was registered since the last call.
    pub fn take_definitions(&mut self) -> Option<FontDefinitions> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.definitions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_size_floors_and_clamps() {
        let spec = FontSpec {
            size: 15,
            ..Default::default()
        };
        assert_eq!(spec.scaled_size(1.0), Ok(15));
        assert_eq!(spec.scaled_size(0.5), Ok(7));
        assert_eq!(spec.scaled_size(0.01), Ok(1));
        assert_eq!(spec.scaled_size(0.0), Ok(1));
        assert!(spec.scaled_size(f32::NAN).is_err());
        assert!(spec.scaled_size(-1.0).is_err());
    }

    #[test]
    fn test_family_aliases() {
        let book = FontBook::new();
        assert_eq!(book.family("Arial"), Ok(FontFamily::Proportional));
        assert_eq!(book.family("Courier New"), Ok(FontFamily::Monospace));
        assert_eq!(
            book.family("Comic Sans"),
            Err(FontError::UnknownFamily("Comic Sans".into()))
        );
    }

    /// Bytes of one of egui's bundled fonts.
    fn bundled_font() -> Vec<u8> {
        FontDefinitions::default()
            .font_data
            .values()
            .next()
            .expect("egui ships default fonts")
            .font
            .to_vec()
    }

    #[test]
    fn test_register_makes_family_available() {
        let mut book = FontBook::new();
        assert!(book.take_definitions().is_none());
        book.register("Brand", bundled_font()).unwrap();
        assert_eq!(book.family("brand"), Ok(FontFamily::Name("Brand".into())));
        let defs = book.take_definitions().expect("definitions after register");
        assert!(defs.font_data.contains_key("Brand"));
        assert!(book.take_definitions().is_none());
    }

    #[test]
    fn test_register_rejects_invalid_font_data() {
        let mut book = FontBook::new();
        assert!(matches!(
            book.register("Brand", vec![0, 1, 2, 3]),
            Err(FontError::InvalidFontData { name, .. }) if name == "Brand"
        ));
        assert!(book.family("Brand").is_err());
        assert!(book.take_definitions().is_none());
    }

    #[test]
    fn test_font_id_size() {
        let book = FontBook::new();
        let id = book.font_id(&FontSpec::default(), 12).unwrap();
        assert_eq!(id, FontId::proportional(12.0));
        assert!(book.font_id(&FontSpec::default(), 0).is_err());
    }
}
