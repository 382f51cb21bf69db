//! Stack configuration.
//!
//! Read from a JSON stack file (camelCase keys) or from environment
//! variables, which `main` loads from `.env` first.

use crate::error::PlanError;
use crate::models::Ipv4;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a JSON stack file to use instead of the environment.
pub const STACK_CONFIG_ENV: &str = "STACK_CONFIG";

/// Zones used when the configuration does not say otherwise.
pub const DEFAULT_MAX_ZONES: usize = 3;

fn default_max_zones() -> usize {
    DEFAULT_MAX_ZONES
}

fn default_destination() -> Ipv4 {
    Ipv4 {
        addr: std::net::Ipv4Addr::UNSPECIFIED,
        mask: 0,
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StackConfig {
    pub vpc_cidr: Ipv4,
    pub vpc_name: String,
    pub igw_name: String,
    pub public_subnet_prefix: String,
    pub private_subnet_prefix: String,
    pub public_subnet_association: String,
    pub private_subnet_association: String,
    pub public_route_table_name: String,
    pub private_route_table_name: String,
    /// Destination of the public route, normally the default route.
    #[serde(default = "default_destination")]
    pub destination_cidr_block: Ipv4,
    /// Explicit public subnets, one per zone. Planned from `vpc_cidr` when absent.
    #[serde(default)]
    pub public_cidr_blocks: Option<Vec<Ipv4>>,
    #[serde(default)]
    pub private_cidr_blocks: Option<Vec<Ipv4>>,
    pub availability_zones: Vec<String>,
    #[serde(default = "default_max_zones")]
    pub max_zones: usize,
}

impl StackConfig {
    /// Load a JSON stack file.
    pub fn from_file(path: &str) -> Result<StackConfig, PlanError> {
        if !Path::new(path).exists() {
            return Err(PlanError::Config(format!(
                "Stack config file does not exist: {path}"
            )));
        }
        let json = std::fs::read_to_string(path)
            .map_err(|e| PlanError::Config(format!("Error reading {path}: {e}")))?;
        log::info!("Reading stack config: {path}");
        parse_json(&json).map_err(|e| PlanError::Config(format!("{path}: {e}")))
    }

    /// Load from process environment variables.
    pub fn from_env() -> Result<StackConfig, PlanError> {
        StackConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from `STACK_CONFIG` when set, else from the environment.
    pub fn load() -> Result<StackConfig, PlanError> {
        match std::env::var(STACK_CONFIG_ENV) {
            Ok(path) => StackConfig::from_file(&path),
            Err(_) => {
                log::debug!("{STACK_CONFIG_ENV} not set, reading environment");
                StackConfig::from_env()
            }
        }
    }

    /// Build from any key lookup, using the environment variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<StackConfig, PlanError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> Result<String, PlanError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| PlanError::Config(format!("Missing required key {key}")))
        };

        let destination_cidr_block = match lookup("DESTINATION_CIDR_BLOCK") {
            Some(cidr) => Ipv4::new(&cidr)?,
            None => default_destination(),
        };
        let max_zones = match lookup("MAX_ZONES") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| PlanError::InvalidCount(format!("MAX_ZONES={value}")))?,
            None => DEFAULT_MAX_ZONES,
        };

        Ok(StackConfig {
            vpc_cidr: Ipv4::new(&require("VPC_CIDR")?)?,
            vpc_name: require("VPC_NAME")?,
            igw_name: require("IGW_NAME")?,
            public_subnet_prefix: require("PUBLIC_SUBNET_PREFIX")?,
            private_subnet_prefix: require("PRIVATE_SUBNET_PREFIX")?,
            public_subnet_association: require("PUBLIC_SUBNET_ASSOCIATION")?,
            private_subnet_association: require("PRIVATE_SUBNET_ASSOCIATION")?,
            public_route_table_name: require("PUBLIC_ROUTE_TABLE_NAME")?,
            private_route_table_name: require("PRIVATE_ROUTE_TABLE_NAME")?,
            destination_cidr_block,
            public_cidr_blocks: lookup("PUBLIC_CIDR_BLOCKS")
                .map(|json| parse_cidr_list("PUBLIC_CIDR_BLOCKS", &json))
                .transpose()?,
            private_cidr_blocks: lookup("PRIVATE_CIDR_BLOCKS")
                .map(|json| parse_cidr_list("PRIVATE_CIDR_BLOCKS", &json))
                .transpose()?,
            availability_zones: parse_zone_list(&require("AVAILABILITY_ZONES")?),
            max_zones,
        })
    }

    /// Number of zones that get subnets.
    pub fn zone_count(&self) -> usize {
        self.availability_zones.len().min(self.max_zones)
    }
}

fn parse_json(json: &str) -> Result<StackConfig, String> {
    let deserializer = &mut serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(deserializer)
        .map_err(|e| format!("invalid value at '{}': {}", e.path(), e.inner()))
}

/// Parse a JSON array of CIDR strings, e.g. `["10.0.1.0/24","10.0.2.0/24"]`.
fn parse_cidr_list(key: &str, json: &str) -> Result<Vec<Ipv4>, PlanError> {
    let deserializer = &mut serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(deserializer).map_err(|e| {
        PlanError::Config(format!("{key}: invalid value at '{}': {}", e.path(), e.inner()))
    })
}

fn parse_zone_list(zones: &str) -> Vec<String> {
    zones
        .split(',')
        .map(str::trim)
        .filter(|z| !z.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("VPC_CIDR", "10.0.0.0/16"),
            ("VPC_NAME", "main-vpc"),
            ("IGW_NAME", "main-igw"),
            ("PUBLIC_SUBNET_PREFIX", "public-subnet-"),
            ("PRIVATE_SUBNET_PREFIX", "private-subnet-"),
            ("PUBLIC_SUBNET_ASSOCIATION", "public-assoc-"),
            ("PRIVATE_SUBNET_ASSOCIATION", "private-assoc-"),
            ("PUBLIC_ROUTE_TABLE_NAME", "public-rt"),
            ("PRIVATE_ROUTE_TABLE_NAME", "private-rt"),
            ("AVAILABILITY_ZONES", "us-east-1a, us-east-1b,us-east-1c,us-east-1d"),
        ])
    }

    fn lookup<'a>(
        vars: &'a HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_from_lookup_defaults() {
        let vars = sample_vars();
        let config = StackConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.vpc_cidr, Ipv4::new("10.0.0.0/16").unwrap());
        assert_eq!(config.destination_cidr_block.to_string(), "0.0.0.0/0");
        assert_eq!(config.availability_zones.len(), 4);
        assert_eq!(config.availability_zones[1], "us-east-1b");
        assert_eq!(config.max_zones, 3);
        assert_eq!(config.zone_count(), 3);
        assert!(config.public_cidr_blocks.is_none());
    }

    #[test]
    fn test_from_lookup_cidr_lists() {
        let mut vars = sample_vars();
        vars.insert("PUBLIC_CIDR_BLOCKS", r#"["10.0.1.0/24","10.0.2.0/24"]"#);
        vars.insert("PRIVATE_CIDR_BLOCKS", r#"["10.0.101.0/24","10.0.102.0/24"]"#);
        vars.insert("MAX_ZONES", "2");
        let config = StackConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.zone_count(), 2);
        assert_eq!(
            config.private_cidr_blocks.unwrap()[1],
            Ipv4::new("10.0.102.0/24").unwrap()
        );
    }

    #[test]
    fn test_from_lookup_errors() {
        let mut vars = sample_vars();
        vars.remove("IGW_NAME");
        assert_eq!(
            StackConfig::from_lookup(lookup(&vars)).unwrap_err(),
            PlanError::Config("Missing required key IGW_NAME".to_string())
        );

        let mut vars = sample_vars();
        vars.insert("PUBLIC_CIDR_BLOCKS", r#"["10.0.1.0/24","10.0.2.0/99"]"#);
        let err = StackConfig::from_lookup(lookup(&vars)).unwrap_err().to_string();
        assert!(err.contains("PUBLIC_CIDR_BLOCKS"), "{err}");
        assert!(err.contains("[1]"), "{err}");

        let mut vars = sample_vars();
        vars.insert("MAX_ZONES", "-1");
        assert!(matches!(
            StackConfig::from_lookup(lookup(&vars)),
            Err(PlanError::InvalidCount(_))
        ));

        let mut vars = sample_vars();
        vars.insert("VPC_CIDR", "10.0.0.0/16x");
        assert!(matches!(
            StackConfig::from_lookup(lookup(&vars)),
            Err(PlanError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let config = StackConfig::from_file("src/tests/test_data/stack_config_01.json")
            .expect("Error reading stack config");
        assert_eq!(config.vpc_name, "csye6225-vpc");
        assert_eq!(config.vpc_cidr.to_string(), "10.0.0.0/16");
        assert_eq!(config.zone_count(), 3);
        assert!(config.public_cidr_blocks.is_none());
    }

    #[test]
    fn test_from_file_errors() {
        assert!(StackConfig::from_file("src/tests/test_data/does_not_exist.json").is_err());

        let err = StackConfig::from_file("src/tests/test_data/stack_config_03.json")
            .unwrap_err()
            .to_string();
        assert!(err.contains("privateCidrBlocks[2]"), "{err}");
    }
}
