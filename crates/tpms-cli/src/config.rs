//! Run configuration
//!
//! A run is described by a JSON document: metadata, the mesh block
//! (resolution, size, optional operator stages) and exactly one generator
//! block. The whole configuration is validated up front into a [`RunPlan`]
//! — an ordered list of tagged stages — before any field computation
//! starts, so contradictory combinations fail fast.

use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tpms_core::grid::Size;
use tpms_core::ops::Direction;
use tpms_core::{Error, Result};

/// Top-level configuration document
#[derive(Debug, Deserialize)]
pub struct Config {
    pub metadata: Metadata,
    pub mesh: MeshConf,
    #[serde(default)]
    pub gyroid: Option<GeneratorParams>,
    #[serde(default)]
    pub schwarz_p: Option<GeneratorParams>,
    #[serde(default)]
    pub schwarz_d: Option<GeneratorParams>,
}

#[derive(Debug, Deserialize)]
pub struct Metadata {
    /// Base name for output files (extension is appended per format)
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct MeshConf {
    pub resolution: u32,
    pub size: SizeConf,
    #[serde(default)]
    pub thicken: Option<ThickenConf>,
    #[serde(default)]
    pub cap_extremes: Option<bool>,
    #[serde(default)]
    pub cuboid_heat_exchanger: Option<f32>,
    #[serde(default)]
    pub cylinder_heat_exchanger: Option<f32>,
}

/// Physical size: a single number (cube) or an array of exactly three
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum SizeConf {
    Scalar(f32),
    Triple([f32; 3]),
}

impl From<SizeConf> for Size {
    fn from(conf: SizeConf) -> Self {
        match conf {
            SizeConf::Scalar(s) => Size::Uniform(s),
            SizeConf::Triple(s) => Size::PerAxis(s),
        }
    }
}

/// Thicken stage: a bare distance defaults to a symmetric shell
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum ThickenConf {
    Distance(f32),
    Full {
        distance: f32,
        direction: Direction,
    },
}

impl ThickenConf {
    fn distance(self) -> f32 {
        match self {
            ThickenConf::Distance(d) | ThickenConf::Full { distance: d, .. } => d,
        }
    }

    fn direction(self) -> Direction {
        match self {
            ThickenConf::Distance(_) => Direction::Sym,
            ThickenConf::Full { direction, .. } => direction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeneratorParams {
    pub periodicity: f32,
    pub strut_param: f32,
}

/// The generator the run starts from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Generator {
    Gyroid(GeneratorParams),
    SchwarzP(GeneratorParams),
    SchwarzD(GeneratorParams),
}

/// One validated operator stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    Thicken { distance: f32, direction: Direction },
    CapExtremes,
    CuboidHeatExchanger { distance: f32 },
    CylinderHeatExchanger { distance: f32 },
}

/// A fully validated run: grid parameters, generator, ordered stages
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub resolution: u32,
    pub size: Size,
    pub generator: Generator,
    pub stages: Vec<Stage>,
}

impl Config {
    /// Load a configuration document from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parse a configuration document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("failed to parse: {e}")))
    }

    /// Validate the configuration as a whole into a [`RunPlan`]
    pub fn validate(&self) -> Result<RunPlan> {
        let generator = self.generator()?;
        let stages = self.stages()?;
        Ok(RunPlan {
            resolution: self.mesh.resolution,
            size: self.mesh.size.into(),
            generator,
            stages,
        })
    }

    fn generator(&self) -> Result<Generator> {
        let mut generators = Vec::new();
        if let Some(params) = self.gyroid {
            generators.push(Generator::Gyroid(params));
        }
        if let Some(params) = self.schwarz_p {
            generators.push(Generator::SchwarzP(params));
        }
        if let Some(params) = self.schwarz_d {
            generators.push(Generator::SchwarzD(params));
        }
        match generators.len() {
            0 => Err(Error::Config("no geometry defined".into())),
            1 => Ok(generators[0]),
            _ => Err(Error::Config(
                "more than one generator block defined".into(),
            )),
        }
    }

    fn stages(&self) -> Result<Vec<Stage>> {
        let mesh = &self.mesh;
        let heat_exchangers =
            mesh.cuboid_heat_exchanger.is_some() as usize + mesh.cylinder_heat_exchanger.is_some() as usize;
        let cap_extremes = mesh.cap_extremes == Some(true);
        if heat_exchangers > 0 && (mesh.thicken.is_some() || cap_extremes || heat_exchangers > 1) {
            return Err(Error::Config(
                "heat exchanger cannot be combined with thicken, cap_extremes \
                 or another heat exchanger"
                    .into(),
            ));
        }

        let mut stages = Vec::new();
        if let Some(thicken) = mesh.thicken {
            stages.push(Stage::Thicken {
                distance: thicken.distance(),
                direction: thicken.direction(),
            });
        }
        if cap_extremes {
            stages.push(Stage::CapExtremes);
        }
        if let Some(distance) = mesh.cuboid_heat_exchanger {
            stages.push(Stage::CuboidHeatExchanger { distance });
        }
        if let Some(distance) = mesh.cylinder_heat_exchanger {
            stages.push(Stage::CylinderHeatExchanger { distance });
        }
        Ok(stages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(extra_mesh: &str, generator: &str) -> String {
        format!(
            r#"{{
                "metadata": {{ "filename": "out" }},
                "mesh": {{ "resolution": 32, "size": 1.0{extra_mesh} }},
                {generator}
            }}"#
        )
    }

    fn gyroid_block() -> &'static str {
        r#""gyroid": { "periodicity": 2.0, "strut_param": 0.0 }"#
    }

    #[test]
    fn minimal_config_validates() {
        let config = Config::from_json(&minimal("", gyroid_block())).expect("parses");
        let plan = config.validate().expect("valid");
        assert_eq!(plan.resolution, 32);
        assert_eq!(plan.size, Size::Uniform(1.0));
        assert!(plan.stages.is_empty());
        assert!(matches!(plan.generator, Generator::Gyroid(_)));
    }

    #[test]
    fn size_accepts_a_triple() {
        let json = minimal("", gyroid_block()).replace("1.0", "[2.0, 1.0, 1.0]");
        let plan = Config::from_json(&json)
            .expect("parses")
            .validate()
            .expect("valid");
        assert_eq!(plan.size, Size::PerAxis([2.0, 1.0, 1.0]));
    }

    #[test]
    fn size_of_wrong_length_fails_to_parse() {
        let json = minimal("", gyroid_block()).replace("1.0", "[2.0, 1.0]");
        assert!(matches!(Config::from_json(&json), Err(Error::Config(_))));
    }

    #[test]
    fn missing_generator_is_rejected() {
        let json = r#"{
            "metadata": { "filename": "out" },
            "mesh": { "resolution": 32, "size": 1.0 }
        }"#;
        let config = Config::from_json(json).expect("parses");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn thicken_distance_shorthand_defaults_to_sym() {
        let json = minimal(r#", "thicken": 0.1"#, gyroid_block());
        let plan = Config::from_json(&json)
            .expect("parses")
            .validate()
            .expect("valid");
        assert_eq!(
            plan.stages,
            vec![Stage::Thicken {
                distance: 0.1,
                direction: Direction::Sym
            }]
        );
    }

    #[test]
    fn thicken_direction_parses_from_symbols() {
        let json = minimal(
            r#", "thicken": { "distance": 0.1, "direction": "+" }"#,
            gyroid_block(),
        );
        let plan = Config::from_json(&json)
            .expect("parses")
            .validate()
            .expect("valid");
        assert_eq!(
            plan.stages,
            vec![Stage::Thicken {
                distance: 0.1,
                direction: Direction::Outward
            }]
        );
    }

    #[test]
    fn unknown_thicken_direction_fails_to_parse() {
        let json = minimal(
            r#", "thicken": { "distance": 0.1, "direction": "up" }"#,
            gyroid_block(),
        );
        assert!(matches!(Config::from_json(&json), Err(Error::Config(_))));
    }

    #[test]
    fn stages_keep_application_order() {
        let json = minimal(r#", "thicken": 0.1, "cap_extremes": true"#, gyroid_block());
        let plan = Config::from_json(&json)
            .expect("parses")
            .validate()
            .expect("valid");
        assert_eq!(plan.stages.len(), 2);
        assert!(matches!(plan.stages[0], Stage::Thicken { .. }));
        assert_eq!(plan.stages[1], Stage::CapExtremes);
    }

    #[test]
    fn heat_exchanger_excludes_thicken() {
        let json = minimal(
            r#", "thicken": 0.1, "cuboid_heat_exchanger": 0.05"#,
            gyroid_block(),
        );
        let config = Config::from_json(&json).expect("parses");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn heat_exchanger_excludes_cap_extremes() {
        let json = minimal(
            r#", "cap_extremes": true, "cylinder_heat_exchanger": 0.05"#,
            gyroid_block(),
        );
        let config = Config::from_json(&json).expect("parses");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn heat_exchangers_exclude_each_other() {
        let json = minimal(
            r#", "cuboid_heat_exchanger": 0.05, "cylinder_heat_exchanger": 0.05"#,
            gyroid_block(),
        );
        let config = Config::from_json(&json).expect("parses");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn two_generator_blocks_are_rejected() {
        let json = format!(
            r#"{{
                "metadata": {{ "filename": "out" }},
                "mesh": {{ "resolution": 32, "size": 1.0 }},
                {},
                "schwarz_p": {{ "periodicity": 1.0, "strut_param": 0.0 }}
            }}"#,
            gyroid_block()
        );
        let config = Config::from_json(&json).expect("parses");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
