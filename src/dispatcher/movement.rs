/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::TimingConfig;
use crate::shared::{Car, CarStatus};

/***************************************/
/*       Public data structures        */
/***************************************/
/// The timed legs of a car's trip. A leg's timer fires when the leg is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Travel,
    Loading,
}

/// Result of a timer firing: the car's new position and status, plus the
/// next leg to schedule, if any, with its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub position: i32,
    pub status: CarStatus,
    pub next: Option<(Leg, u64)>,
}

/***************************************/
/*             Public API              */
/***************************************/

/// Starts a trip for an idle car. Returns the new status and the travel
/// duration.
pub fn depart(car: &Car, target: i32, timing: &TimingConfig) -> (CarStatus, u64) {
    let duration = car.distance_to(target).saturating_mul(timing.unit_travel_time);
    (CarStatus::Moving { target }, duration)
}

/**
 * Computes the transition caused by `leg` finishing for `car`.
 *
 * moving(t) --Travel--> loading(t) --Loading--> idle
 *
 * Returns `None` when the leg does not match the car's status, which means the
 * timer is stale.
 */
pub fn on_leg_complete(car: &Car, leg: Leg, timing: &TimingConfig) -> Option<Transition> {
    match (car.status, leg) {
        (CarStatus::Moving { target }, Leg::Travel) => Some(Transition {
            position: target,
            status: CarStatus::Loading { floor: target },
            next: Some((Leg::Loading, timing.loading_time)),
        }),
        (CarStatus::Loading { .. }, Leg::Loading) => Some(Transition {
            position: car.position,
            status: CarStatus::Idle,
            next: None,
        }),
        _ => None,
    }
}
