//! Tagged gain sets, one variant per algorithm (§9: "variable shapes" are
//! dispatched by tag, never papered over with a string-keyed map).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm")]
pub enum Gains {
    Pid(PidGains),
    Smc(SmcGains),
    Sts(StsGains),
    Mpc(MpcGains),
}

impl Gains {
    pub fn algorithm_id(&self) -> &'static str {
        match self {
            Gains::Pid(_) => "PID",
            Gains::Smc(_) => "SMC",
            Gains::Sts(_) => "STS",
            Gains::Mpc(_) => "MPC",
        }
    }
}

impl Default for Gains {
    fn default() -> Self {
        Gains::Pid(PidGains::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    pub kp_xy: f64,
    pub ki_xy: f64,
    pub kd_xy: f64,
    pub kp_z: f64,
    pub ki_z: f64,
    pub kd_z: f64,
    pub kp_att: f64,
    pub kd_att: f64,
    pub kp_yaw: f64,
    pub kd_yaw: f64,
    pub i_max: f64,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp_xy: 3.0,
            ki_xy: 0.4,
            kd_xy: 3.2,
            kp_z: 8.0,
            ki_z: 2.0,
            kd_z: 5.0,
            kp_att: 6.0,
            kd_att: 0.5,
            kp_yaw: 3.0,
            kd_yaw: 0.3,
            i_max: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmcGains {
    pub lambda_xy: f64,
    pub lambda_z: f64,
    pub eta_xy: f64,
    pub eta_z: f64,
    pub phi_xy: f64,
    pub phi_z: f64,
    pub lambda_att: f64,
    pub eta_att: f64,
    pub phi_att: f64,
}

impl Default for SmcGains {
    fn default() -> Self {
        Self {
            lambda_xy: 2.0,
            lambda_z: 3.0,
            eta_xy: 4.0,
            eta_z: 6.0,
            phi_xy: 0.6,
            phi_z: 0.6,
            lambda_att: 8.0,
            eta_att: 10.0,
            phi_att: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StsGains {
    pub lambda_xy: f64,
    pub lambda_z: f64,
    pub alpha1_xy: f64,
    pub alpha2_xy: f64,
    pub alpha1_z: f64,
    pub alpha2_z: f64,
    pub lambda_att: f64,
    pub alpha1_att: f64,
    pub alpha2_att: f64,
}

impl Default for StsGains {
    fn default() -> Self {
        Self {
            lambda_xy: 2.0,
            lambda_z: 3.0,
            alpha1_xy: 3.0,
            alpha2_xy: 2.0,
            alpha1_z: 4.0,
            alpha2_z: 3.5,
            lambda_att: 8.0,
            alpha1_att: 6.0,
            alpha2_att: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MpcGains {
    pub n: u32,
    pub q_pos: f64,
    pub q_vel: f64,
    pub r: f64,
    pub kp_att: f64,
    pub kd_att: f64,
}

impl Default for MpcGains {
    fn default() -> Self {
        Self {
            n: 10,
            q_pos: 4.0,
            q_vel: 1.0,
            r: 0.1,
            kp_att: 6.0,
            kd_att: 0.5,
        }
    }
}
