use serde::{Deserialize, Serialize};

use crate::core::{Aesthetic, GeometryCatalog};

/// Public composer configuration.
///
/// This type is serializable so host applications can persist/load geometry
/// requirements without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    #[serde(default)]
    pub geometry_catalog: GeometryCatalog,
    #[serde(default = "default_validate_field_references")]
    pub validate_field_references: bool,
    #[serde(default)]
    pub strict_geometries: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            geometry_catalog: GeometryCatalog::default(),
            validate_field_references: default_validate_field_references(),
            strict_geometries: false,
        }
    }
}

impl ComposerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the geometry requirement table.
    #[must_use]
    pub fn with_geometry_catalog(mut self, catalog: GeometryCatalog) -> Self {
        self.geometry_catalog = catalog;
        self
    }

    /// Registers or replaces requirements for a single geometry.
    #[must_use]
    pub fn with_geometry<I>(mut self, geometry: impl Into<String>, required: I) -> Self
    where
        I: IntoIterator<Item = Aesthetic>,
    {
        self.geometry_catalog = self.geometry_catalog.with_geometry(geometry, required);
        self
    }

    /// Toggles the check that `Field` bindings name a column of the effective data.
    #[must_use]
    pub fn with_field_validation(mut self, enabled: bool) -> Self {
        self.validate_field_references = enabled;
        self
    }

    /// Rejects geometries missing from the catalog.
    #[must_use]
    pub fn with_strict_geometries(mut self, strict: bool) -> Self {
        self.strict_geometries = strict;
        self
    }
}

fn default_validate_field_references() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::ComposerConfig;
    use crate::core::{Aesthetic, Geometry};

    #[test]
    fn empty_json_object_yields_defaults() {
        let config: ComposerConfig = serde_json::from_str("{}").expect("config json");
        assert_eq!(config, ComposerConfig::default());
        assert!(config.validate_field_references);
        assert!(!config.strict_geometries);
    }

    #[test]
    fn with_geometry_extends_default_catalog() {
        let config = ComposerConfig::new().with_geometry("violin", [Aesthetic::X, Aesthetic::Y]);
        let violin = Geometry::new("violin").expect("geometry");
        assert_eq!(
            config.geometry_catalog.required(&violin),
            &[Aesthetic::X, Aesthetic::Y]
        );
        assert!(config.geometry_catalog.contains(&Geometry::ribbon()));
    }
}
