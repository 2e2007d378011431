//! Thrust-vector inversion: the one piece of math shared by all four
//! controllers (§4.3), mirroring the teacher's habit of factoring a small
//! numeric helper out of duplicated per-strategy formulas (e.g.
//! `MotorConstant::kt`/`ke` in the original electrical analysis module)
//! rather than inlining it four times.

use simcore::Params;

/// Desired world-frame roll/pitch and total thrust from a desired
/// acceleration and yaw, via small-attitude inversion of the thrust vector.
pub struct Attitude {
    pub thrust: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

pub fn invert(
    ax_des: f64,
    ay_des: f64,
    az_des: f64,
    yaw_setpoint: f64,
    params: &Params,
    roll: f64,
    pitch: f64,
) -> Attitude {
    let thrust = (params.mass * (params.gravity + ay_des) / (roll.cos() * pitch.cos()).max(0.1))
        .clamp(0.0, 4.0 * params.mass * params.gravity);

    let (sin_yaw, cos_yaw) = yaw_setpoint.sin_cos();

    let roll_arg =
        (params.mass * (ax_des * sin_yaw - az_des * cos_yaw) / thrust.max(0.1)).clamp(-0.8, 0.8);
    let roll_des = roll_arg.asin().clamp(-0.6, 0.6);

    let pitch_des = (ax_des * cos_yaw + az_des * sin_yaw)
        .atan2(params.gravity + ay_des)
        .clamp(-0.6, 0.6);

    Attitude {
        thrust,
        roll: roll_des,
        pitch: pitch_des,
        yaw: yaw_setpoint,
    }
}
