//! Font registry: system typeface discovery and family resolution.
//!
//! Wraps `font-kit` for OS-level enumeration and keeps the result in a
//! hash map keyed by lowercase family name. Header styles name their
//! typefaces with CSS-like chains (`"Inter, Roboto, sans-serif"`);
//! [`FontRegistry::resolve`] walks the chain and turns the first family
//! that exists into a [`FontRef`].
//!
//! A chain where no family exists is a packaging/configuration defect and
//! comes back as [`FontError`] rather than a silent substitution.
//!
//! ```text
//! FontRegistry
//!   ├── families: HashMap<String, Vec<FontFace>>   (discovered once)
//!   ├── generics: HashMap<GenericFamily, String>   (sans-serif → concrete)
//!   └── resolve(chain, weight, style) → Result<FontRef, FontError>
//! ```

use font_kit::family_name::FamilyName;
use font_kit::properties::{Properties as FkProperties, Style as FkStyle};
use font_kit::source::SystemSource;
use furl_core::FontRef;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FontError {
    #[error("font family list is empty")]
    EmptyFamily,
    #[error("no font family in {0:?} is installed")]
    FamilyNotFound(String),
    #[error("font registry has no faces")]
    NoFaces,
}

/// Font slant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// CSS generic families the registry maps to concrete families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum GenericFamily {
    Serif,
    SansSerif,
    Monospace,
}

/// One face within a family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFace {
    pub postscript_name: String,
    pub weight: u16,
    pub style: FontStyle,
}

pub struct FontRegistry {
    /// Family name (lowercase) → faces.
    families: HashMap<String, Vec<FontFace>>,
    generics: HashMap<GenericFamily, String>,
    face_count: usize,
}

impl FontRegistry {
    /// Enumerate system fonts. I/O bound; call once and keep the result.
    pub fn discover() -> Self {
        let start = Instant::now();
        let source = SystemSource::new();

        let mut families: HashMap<String, Vec<FontFace>> = HashMap::new();
        if let Ok(names) = source.all_families() {
            for name in &names {
                let Ok(handle) = source.select_family_by_name(name) else {
                    continue;
                };
                let faces: Vec<FontFace> = handle
                    .fonts()
                    .iter()
                    .filter_map(|h| h.load().ok())
                    .map(|font| {
                        let props = font.properties();
                        FontFace {
                            postscript_name: font.postscript_name().unwrap_or_default(),
                            weight: props.weight.0 as u16,
                            style: convert_style(props.style),
                        }
                    })
                    .collect();
                if !faces.is_empty() {
                    families.insert(name.to_lowercase(), faces);
                }
            }
        }

        let generics = resolve_generics(&source);
        let registry = Self::from_parts(families, generics);
        log::info!(
            "FontRegistry: {} faces in {} families ({:.1}ms)",
            registry.face_count,
            registry.families.len(),
            start.elapsed().as_secs_f64() * 1000.0,
        );
        registry
    }

    /// Registry over an explicit face list (bundled fonts, tests).
    ///
    /// Generic keywords start unmapped; see [`FontRegistry::with_generic`].
    pub fn from_faces<I>(faces: I) -> Self
    where
        I: IntoIterator<Item = (String, FontFace)>,
    {
        let mut families: HashMap<String, Vec<FontFace>> = HashMap::new();
        for (family, face) in faces {
            families.entry(family.to_lowercase()).or_default().push(face);
        }
        Self::from_parts(families, HashMap::new())
    }

    fn from_parts(
        families: HashMap<String, Vec<FontFace>>,
        generics: HashMap<GenericFamily, String>,
    ) -> Self {
        let face_count = families.values().map(Vec::len).sum();
        Self {
            families,
            generics,
            face_count,
        }
    }

    /// Map a generic keyword to a concrete, installed family.
    pub fn with_generic(mut self, generic: &str, family: &str) -> Self {
        if let Some(g) = parse_generic(generic) {
            self.generics.insert(g, family.to_lowercase());
        }
        self
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    pub fn face_count(&self) -> usize {
        self.face_count
    }

    pub fn has_family(&self, name: &str) -> bool {
        self.families.contains_key(&name.to_lowercase())
    }

    /// Resolve a CSS-style family chain to a typeface reference.
    ///
    /// Generic keywords resolve through the generic map. The returned
    /// `FontRef` names the concrete family with the weight and slant of
    /// the best matching face.
    pub fn resolve(&self, chain: &str, weight: u16, style: FontStyle) -> Result<FontRef, FontError> {
        if self.face_count == 0 {
            return Err(FontError::NoFaces);
        }
        let names = parse_chain(chain);
        if names.is_empty() {
            return Err(FontError::EmptyFamily);
        }

        for name in &names {
            let family = match parse_generic(name) {
                Some(generic) => match self.generics.get(&generic) {
                    Some(concrete) => concrete.as_str(),
                    None => continue,
                },
                None => name.as_str(),
            };
            if let Some(face) = self.families.get(family).and_then(|f| best_match(f, weight, style)) {
                return Ok(FontRef {
                    family: family.to_owned(),
                    weight: face.weight,
                    italic: face.style != FontStyle::Normal,
                });
            }
        }

        log::warn!("font chain {chain:?} matched no installed family");
        Err(FontError::FamilyNotFound(chain.to_owned()))
    }
}

impl fmt::Display for FontRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FontRegistry({} families, {} faces)",
            self.families.len(),
            self.face_count
        )
    }
}

/// Split `"Inter, 'Noto Sans', sans-serif"` into lowercase names.
fn parse_chain(chain: &str) -> Vec<String> {
    chain
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Closest face by style, then weight. Families hold few faces, so a
/// linear scan is enough.
fn best_match(faces: &[FontFace], weight: u16, style: FontStyle) -> Option<&FontFace> {
    faces.iter().min_by_key(|face| match_score(face, weight, style))
}

/// Lower is better: style distance dominates weight distance.
fn match_score(face: &FontFace, weight: u16, style: FontStyle) -> u32 {
    let style_diff = style_distance(face.style, style) as u32;
    let weight_diff = (face.weight as i32 - weight as i32).unsigned_abs();
    style_diff * 1000 + weight_diff
}

fn style_distance(a: FontStyle, b: FontStyle) -> u8 {
    match (a, b) {
        _ if a == b => 0,
        (FontStyle::Italic, FontStyle::Oblique) | (FontStyle::Oblique, FontStyle::Italic) => 1,
        _ => 2,
    }
}

fn parse_generic(name: &str) -> Option<GenericFamily> {
    match name {
        "serif" => Some(GenericFamily::Serif),
        "sans-serif" => Some(GenericFamily::SansSerif),
        "monospace" => Some(GenericFamily::Monospace),
        _ => None,
    }
}

fn convert_style(style: FkStyle) -> FontStyle {
    match style {
        FkStyle::Normal => FontStyle::Normal,
        FkStyle::Italic => FontStyle::Italic,
        FkStyle::Oblique => FontStyle::Oblique,
    }
}

fn resolve_generics(source: &SystemSource) -> HashMap<GenericFamily, String> {
    let props = FkProperties::new();
    let generics = [
        (GenericFamily::Serif, FamilyName::Serif),
        (GenericFamily::SansSerif, FamilyName::SansSerif),
        (GenericFamily::Monospace, FamilyName::Monospace),
    ];

    let mut map = HashMap::new();
    for (generic, fk_name) in generics {
        let Ok(handle) = source.select_best_match(&[fk_name], &props) else {
            continue;
        };
        if let Ok(font) = handle.load() {
            let name = font.family_name();
            if !name.is_empty() {
                map.insert(generic, name.to_lowercase());
            }
        }
    }
    map
}

// ===================================================================
// Tests
// ===================================================================
