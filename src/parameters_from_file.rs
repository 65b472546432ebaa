//! Supports extracting DH parameters from YAML file (optional)

use std::path::Path;
use regex::Regex;
use yaml_rust2::{Yaml, YamlLoader};
use nalgebra::Isometry3;

use crate::kinematic_traits::DOF;
use crate::kinematics_error::{check_length, KinematicsError};
use crate::kinematics_impl::{DhKinematics, PANDA_EE_ROTATION};
use crate::parameters::dh_kinematics::{DhParameter, Parameters};

const TABLE_KEY: &str = "dh_kinematics_parameters";
const EE_ROTATION_KEY: &str = "dh_kinematics_ee_rotation";
const BASE_POSITION_KEY: &str = "base_position";
const DEGREES_PATTERN: &str = r"^\s*deg\(\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)\s*\)\s*$";

impl Parameters {
    /// Read the robot configuration from YAML file. YAML file like this is supported:
    /// ```yaml
    /// # Franka Emika Panda
    /// dh_kinematics_parameters:
    ///   - { a: 0.0,     d: 0.333, alpha: 0 }
    ///   - { a: 0.0,     d: 0.0,   alpha: deg(-90) }
    ///   - { a: 0.0,     d: 0.316, alpha: deg(90) }
    ///   - { a: 0.0825,  d: 0.0,   alpha: deg(90) }
    ///   - { a: -0.0825, d: 0.384, alpha: deg(-90) }
    ///   - { a: 0.0,     d: 0.0,   alpha: deg(90) }
    ///   - { a: 0.088,   d: 0.07,  alpha: deg(90) }
    /// dh_kinematics_ee_rotation: deg(-45)
    /// dof: 7
    /// ```
    /// Angles are in radians unless written as deg(angle). The end effector rotation
    /// defaults to the Panda value (-45 degrees) and dof, if present, must be 7.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, KinematicsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, KinematicsError> {
        let doc = load_document(contents)?;
        parse_parameters(&doc)
    }
}

impl DhKinematics {
    /// Reads robot parameters and the optional base position (`base_position: [x, y, z]`,
    /// defaults to the origin) from the YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, KinematicsError> {
        let contents = std::fs::read_to_string(path)?;
        let doc = load_document(&contents)?;
        let parameters = parse_parameters(&doc)?;
        match parse_base_position(&doc)? {
            Some(position) => Ok(DhKinematics::at_position(parameters, &position)),
            None => Ok(DhKinematics::with_base(parameters, Isometry3::identity())),
        }
    }
}

fn load_document(contents: &str) -> Result<Yaml, KinematicsError> {
    let mut docs = YamlLoader::load_from_str(contents)
        .map_err(|e| KinematicsError::ParseError(e.to_string()))?;
    if docs.is_empty() {
        return Err(KinematicsError::ParseError("Empty YAML document".to_string()));
    }
    Ok(docs.swap_remove(0))
}

fn parse_parameters(doc: &Yaml) -> Result<Parameters, KinematicsError> {
    let table = doc[TABLE_KEY].as_vec()
        .ok_or_else(|| KinematicsError::MissingField(TABLE_KEY.to_string()))?;

    if let Some(dof) = doc["dof"].as_i64() {
        if dof != DOF as i64 {
            return Err(KinematicsError::InvalidParameter(format!(
                "unsupported dof: {} (only {} is supported)", dof, DOF
            )));
        }
    }
    check_length(TABLE_KEY, DOF, table.len())?;

    let angles = AngleParser::new()?;
    let dh = table.iter().enumerate()
        .map(|(i, entry)| parse_dh_entry(&angles, i, entry))
        .collect::<Result<Vec<_>, _>>()?;

    let ee_rotation = match &doc[EE_ROTATION_KEY] {
        Yaml::BadValue => PANDA_EE_ROTATION,
        value => angles.parse(value, EE_ROTATION_KEY)?,
    };

    Parameters::from_dh_table(&dh, ee_rotation)
}

fn parse_dh_entry(angles: &AngleParser, index: usize, entry: &Yaml) -> Result<DhParameter, KinematicsError> {
    let field = |name: &str| format!("{}[{}].{}", TABLE_KEY, index, name);
    let parameter = DhParameter::new(
        parse_number(&entry["a"], &field("a"))?,
        parse_number(&entry["d"], &field("d"))?,
        angles.parse(&entry["alpha"], &field("alpha"))?,
    );
    if !parameter.is_finite() {
        return Err(KinematicsError::InvalidParameter(format!(
            "{}[{}] must be finite (got {:?})", TABLE_KEY, index, parameter
        )));
    }
    Ok(parameter)
}

fn parse_base_position(doc: &Yaml) -> Result<Option<[f64; 3]>, KinematicsError> {
    let values = match &doc[BASE_POSITION_KEY] {
        Yaml::BadValue | Yaml::Null => return Ok(None),
        Yaml::Array(values) => values,
        other => return Err(KinematicsError::ParseError(format!(
            "{} must be a list of 3 numbers, got {:?}", BASE_POSITION_KEY, other
        ))),
    };
    check_length(BASE_POSITION_KEY, 3, values.len())?;
    let mut position = [0.0; 3];
    for (i, value) in values.iter().enumerate() {
        position[i] = parse_number(value, BASE_POSITION_KEY)?;
    }
    Ok(Some(position))
}

/// Plain YAML number (integer or real).
fn parse_number(value: &Yaml, field: &str) -> Result<f64, KinematicsError> {
    match value {
        Yaml::Real(_) => value.as_f64()
            .ok_or_else(|| KinematicsError::ParseError(format!("{}: not a number", field))),
        Yaml::Integer(i) => Ok(*i as f64),
        Yaml::BadValue => Err(KinematicsError::MissingField(field.to_string())),
        other => Err(KinematicsError::ParseError(format!("{}: not a number: {:?}", field, other))),
    }
}

/// Reads angles in radians, or in degrees if written as deg(angle). The pattern is
/// compiled once per loaded document.
struct AngleParser {
    degrees: Regex,
}

impl AngleParser {
    fn new() -> Result<Self, KinematicsError> {
        let degrees = Regex::new(DEGREES_PATTERN)
            .map_err(|e| KinematicsError::ParseError(e.to_string()))?;
        Ok(AngleParser { degrees })
    }

    fn parse(&self, value: &Yaml, field: &str) -> Result<f64, KinematicsError> {
        match value {
            Yaml::String(text) => {
                let degrees = self.degrees.captures(text)
                    .and_then(|c| c.get(1))
                    .and_then(|m| m.as_str().parse::<f64>().ok())
                    .ok_or_else(|| KinematicsError::ParseError(format!(
                        "{}: expected radians or deg(angle), got '{}'", field, text
                    )))?;
                Ok(degrees.to_radians())
            }
            _ => parse_number(value, field),
        }
    }
}
