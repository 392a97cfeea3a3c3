//! The `env_args` attribute: simulation environment configuration stored as JSON on the
//! `data` group.
use std::path::Path;

use hdf5::File;
use log::{debug, info};
use serde::Deserialize;

use crate::attrs;
use crate::group::data_group;

/// Name of the attribute on the `data` group.
pub const ENV_ARGS: &str = "env_args";

/// Values interpolated into the `env_args` template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub robot: String,
    pub gripper_types: String,
    pub env: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            robot: "Panda".to_string(),
            gripper_types: "PandaGripper".to_string(),
            env: "Coffee_D0".to_string(),
        }
    }
}

const HEAD: &str = "{\n \"env_name\": ";

const ENV_KWARGS: &str = ",\n \
    \"env_version\": \"1.4.1\",\n \
    \"type\": 1,\n \
    \"env_kwargs\": {\n \
    \"has_renderer\": false,\n \
    \"has_offscreen_renderer\": true,\n \
    \"ignore_done\": true,\n \
    \"use_object_obs\": true,\n \
    \"use_camera_obs\": true,\n \
    \"control_freq\": 20,\n \
    \"controller_configs\": {\n \
    \"type\": \"OSC_POSE\",\n \
    \"input_max\": 1,\n \
    \"input_min\": -1,\n \
    \"output_max\": [\n \
    0.05,\n \
    0.05,\n \
    0.05,\n \
    0.5,\n \
    0.5,\n \
    0.5\n \
    ],\n \
    \"output_min\": [\n \
    -0.05,\n \
    -0.05,\n \
    -0.05,\n \
    -0.5,\n \
    -0.5,\n \
    -0.5\n \
    ],\n \
    \"kp\": 150,\n \
    \"damping\": 1,\n \
    \"impedance_mode\": \"fixed\",\n \
    \"kp_limits\": [\n \
    0,\n \
    300\n \
    ],\n \
    \"damping_limits\": [\n \
    0,\n \
    10\n \
    ],\n \
    \"position_limits\": null,\n \
    \"orientation_limits\": null,\n \
    \"uncouple_pos_ori\": true,\n \
    \"control_delta\": true,\n \
    \"interpolation\": null,\n \
    \"ramp_ratio\": 0.2\n \
    },\n \
    \"robots\": [\n ";

const GRIPPER: &str = "\n ],\n \"gripper_types\": ";

const TAIL: &str = ",\n \
    \"camera_depths\": true,\n \
    \"camera_heights\": 84,\n \
    \"camera_widths\": 84,\n \
    \"render_gpu_device_id\": 0,\n \
    \"reward_shaping\": false,\n \
    \"camera_names\": [\n \
    \"agentview\",\n \
    \"robot0_eye_in_hand\"\n \
    ]\n \
    }\n\
    }";

fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

impl EnvConfig {
    /// Render the `env_args` JSON string. Values are JSON-escaped; plain names are
    /// inserted as-is.
    pub fn render(&self) -> String {
        [
            HEAD,
            quote(&self.env).as_str(),
            ENV_KWARGS,
            quote(&self.robot).as_str(),
            GRIPPER,
            quote(&self.gripper_types).as_str(),
            TAIL,
        ]
        .concat()
    }
}

/// The parts of `env_args` that are inspected after writing it.
#[derive(Debug, Deserialize)]
pub struct EnvArgs {
    pub env_name: String,
    pub env_version: String,
    #[serde(rename = "type")]
    pub kind: i64,
    pub env_kwargs: EnvKwargs,
}

#[derive(Debug, Deserialize)]
pub struct EnvKwargs {
    pub robots: Vec<String>,
    pub gripper_types: String,
    pub control_freq: u32,
    pub controller_configs: ControllerConfigs,
    pub camera_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ControllerConfigs {
    #[serde(rename = "type")]
    pub kind: String,
}

impl EnvArgs {
    pub fn parse(s: &str) -> Result<EnvArgs, anyhow::Error> {
        Ok(serde_json::from_str(s)?)
    }

    /// Whether this was rendered from `cfg`.
    pub fn matches(&self, cfg: &EnvConfig) -> bool {
        self.env_name == cfg.env
            && self.env_kwargs.robots == [cfg.robot.as_str()]
            && self.env_kwargs.gripper_types == cfg.gripper_types
    }
}

/// Overwrite the `env_args` attribute of the `data` group in an existing file.
///
/// Returns the value as read back from the file.
pub fn modify_env_args<P>(path: P, cfg: &EnvConfig) -> Result<String, anyhow::Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!("Opening {} for modification..", path.display());

    let file = File::open_rw(path)?;
    let data = data_group(&file)?;

    attrs::write_string(&data, ENV_ARGS, &cfg.render())?;

    let written = attrs::read_string(&data, ENV_ARGS)?;
    let args = EnvArgs::parse(&written)?;
    ensure!(
        args.matches(cfg),
        "{}: {} does not reflect the requested configuration",
        path.display(),
        ENV_ARGS
    );

    info!(
        "{}: set {} (env: {}, robot: {}, gripper: {})",
        path.display(),
        ENV_ARGS,
        cfg.env,
        cfg.robot,
        cfg.gripper_types
    );

    Ok(written)
}

/// Read and parse the `env_args` attribute of a file.
pub fn read_env_args<P>(path: P) -> Result<EnvArgs, anyhow::Error>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let data = data_group(&file)?;

    EnvArgs::parse(&attrs::read_string(&data, ENV_ARGS)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_ENV_ARGS: &str = "{\n \"env_name\": \"Coffee_D0\",\n \"env_version\": \"1.4.1\",\n \"type\": 1,\n \"env_kwargs\": {\n \"has_renderer\": false,\n \"has_offscreen_renderer\": true,\n \"ignore_done\": true,\n \"use_object_obs\": true,\n \"use_camera_obs\": true,\n \"control_freq\": 20,\n \"controller_configs\": {\n \"type\": \"OSC_POSE\",\n \"input_max\": 1,\n \"input_min\": -1,\n \"output_max\": [\n 0.05,\n 0.05,\n 0.05,\n 0.5,\n 0.5,\n 0.5\n ],\n \"output_min\": [\n -0.05,\n -0.05,\n -0.05,\n -0.5,\n -0.5,\n -0.5\n ],\n \"kp\": 150,\n \"damping\": 1,\n \"impedance_mode\": \"fixed\",\n \"kp_limits\": [\n 0,\n 300\n ],\n \"damping_limits\": [\n 0,\n 10\n ],\n \"position_limits\": null,\n \"orientation_limits\": null,\n \"uncouple_pos_ori\": true,\n \"control_delta\": true,\n \"interpolation\": null,\n \"ramp_ratio\": 0.2\n },\n \"robots\": [\n \"Panda\"\n ],\n \"gripper_types\": \"PandaGripper\",\n \"camera_depths\": true,\n \"camera_heights\": 84,\n \"camera_widths\": 84,\n \"render_gpu_device_id\": 0,\n \"reward_shaping\": false,\n \"camera_names\": [\n \"agentview\",\n \"robot0_eye_in_hand\"\n ]\n }\n}";

    #[test]
    fn default_template() {
        assert_eq!(EnvConfig::default().render(), DEFAULT_ENV_ARGS);
    }

    #[test]
    fn interpolated() {
        let cfg = EnvConfig {
            robot: "UR5e".into(),
            gripper_types: "Robotiq85Gripper".into(),
            env: "Stack_D1".into(),
        };

        let args = EnvArgs::parse(&cfg.render()).unwrap();
        assert_eq!(args.env_name, "Stack_D1");
        assert_eq!(args.env_version, "1.4.1");
        assert_eq!(args.kind, 1);
        assert_eq!(args.env_kwargs.robots, ["UR5e"]);
        assert_eq!(args.env_kwargs.gripper_types, "Robotiq85Gripper");
        assert_eq!(args.env_kwargs.control_freq, 20);
        assert_eq!(args.env_kwargs.controller_configs.kind, "OSC_POSE");
        assert_eq!(
            args.env_kwargs.camera_names,
            ["agentview", "robot0_eye_in_hand"]
        );
        assert!(args.matches(&cfg));
        assert!(!args.matches(&EnvConfig::default()));
    }

    #[test]
    fn escaped_values() {
        let cfg = EnvConfig {
            robot: "Pan\"da".into(),
            ..EnvConfig::default()
        };

        let args = EnvArgs::parse(&cfg.render()).unwrap();
        assert_eq!(args.env_kwargs.robots, ["Pan\"da"]);
    }
}
