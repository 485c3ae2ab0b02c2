//! Tunables for a combination run.
use crate::error::{Error, Result};
use crate::level::ExplodeChances;

/// How generated output files are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    pub prefix: String,
    pub extension: String,
    /// Largest random suffix; suffixes are drawn from `[1, suffix_max]`.
    pub suffix_max: u32,
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            prefix: "gen_".into(),
            extension: "json".into(),
            suffix_max: 100_000,
        }
    }
}

/// Configuration for a combination run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct CombineConfig {
    /// Upper bound on the number of variants kept after shuffling.
    pub max_variants: usize,
    /// Orientations generated per corpus level, starting at 0° in 90° steps.
    pub rotations: usize,
    /// Placement offsets are drawn per axis from `[-offset_range, offset_range]`.
    pub offset_range: i64,
    /// Removal probabilities for the explode pass.
    pub explode: ExplodeChances,
    /// Leave out corpus files that fail to load instead of aborting.
    pub skip_unreadable: bool,
    /// Output file naming.
    pub output: OutputNaming,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            max_variants: 15,
            rotations: 4,
            offset_range: 10,
            explode: ExplodeChances::default(),
            skip_unreadable: false,
            output: OutputNaming::default(),
        }
    }
}

impl CombineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_variants(mut self, max_variants: usize) -> Self {
        self.max_variants = max_variants;
        self
    }

    pub fn with_rotations(mut self, rotations: usize) -> Self {
        self.rotations = rotations;
        self
    }

    pub fn with_offset_range(mut self, offset_range: i64) -> Self {
        self.offset_range = offset_range;
        self
    }

    pub fn with_explode(mut self, explode: ExplodeChances) -> Self {
        self.explode = explode;
        self
    }

    pub fn with_skip_unreadable(mut self, skip_unreadable: bool) -> Self {
        self.skip_unreadable = skip_unreadable;
        self
    }

    pub fn with_output(mut self, output: OutputNaming) -> Self {
        self.output = output;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.max_variants == 0 {
            return Err(Error::InvalidConfig("max_variants must be > 0".into()));
        }
        if !(1..=4).contains(&self.rotations) {
            return Err(Error::InvalidConfig(
                "rotations must be between 1 and 4".into(),
            ));
        }
        if self.offset_range < 0 {
            return Err(Error::InvalidConfig("offset_range must be >= 0".into()));
        }
        for (name, p) in [
            ("hazard", self.explode.hazard),
            ("other", self.explode.other),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidConfig(format!(
                    "{name} removal probability must be within [0, 1], got {p}"
                )));
            }
        }
        if self.output.suffix_max == 0 {
            return Err(Error::InvalidConfig("output suffix_max must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CombineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_variants, 15);
        assert_eq!(config.rotations, 4);
        assert_eq!(config.offset_range, 10);
        assert_eq!(config.explode, ExplodeChances::new(0.9, 0.3));
        assert!(!config.skip_unreadable);
    }

    #[test]
    fn builder_sets_fields() {
        let config = CombineConfig::new()
            .with_max_variants(3)
            .with_rotations(2)
            .with_offset_range(0)
            .with_skip_unreadable(true);
        assert_eq!(config.max_variants, 3);
        assert_eq!(config.rotations, 2);
        assert_eq!(config.offset_range, 0);
        assert!(config.skip_unreadable);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let bad = [
            CombineConfig::new().with_max_variants(0),
            CombineConfig::new().with_rotations(0),
            CombineConfig::new().with_rotations(5),
            CombineConfig::new().with_offset_range(-1),
            CombineConfig::new().with_explode(ExplodeChances::new(1.5, 0.3)),
            CombineConfig::new().with_explode(ExplodeChances::new(0.9, -0.1)),
            CombineConfig::new().with_output(OutputNaming {
                suffix_max: 0,
                ..Default::default()
            }),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
    }
}
